#![allow(dead_code)]

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

pub const HEADER: &str = "Time,Traffic,CTR,Keyword_Rank";

pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes `rows` under the standard header and returns the file path.
    pub fn write_dataset(&self, name: &str, rows: &[&str]) -> Result<PathBuf> {
        let mut content = String::from(HEADER);
        content.push('\n');
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        let path = self.path(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

pub fn build_test_context() -> Result<TestContext> {
    Ok(TestContext {
        temp_dir: tempfile::tempdir()?,
    })
}
