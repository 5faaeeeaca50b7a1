pub mod cli;
pub mod config;
pub mod loader;
pub mod report;
pub mod watch;
