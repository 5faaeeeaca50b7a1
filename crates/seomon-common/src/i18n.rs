//! Lightweight i18n translation registry.
//!
//! Provides a centralized, static translation map keyed by `(locale, message_key)`.
//! Supported locales: `en`, `zh-CN`. No external i18n framework dependency.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Default locale when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Supported locales.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh-CN"];

/// Central translation registry.
pub struct Translations {
    map: HashMap<(&'static str, &'static str), &'static str>,
}

impl Translations {
    /// Get a translated string for the given locale and key.
    /// Falls back to `en` if the locale is not found, then to the provided default.
    pub fn get<'a>(&self, locale: &str, key: &str, default: &'a str) -> &'a str {
        self.get_template(locale, key).unwrap_or(default)
    }

    /// Get a translated template string for formatting.
    /// Returns `None` if no translation is found for any locale.
    pub fn get_template(&self, locale: &str, key: &str) -> Option<&'static str> {
        self.map
            .get(&(locale, key))
            .or_else(|| {
                if locale != "en" {
                    self.map.get(&("en", key))
                } else {
                    None
                }
            })
            .copied()
    }
}

/// Global translation singleton.
pub static TRANSLATIONS: LazyLock<Translations> = LazyLock::new(|| {
    let mut map = HashMap::new();

    macro_rules! t {
        ($locale:expr, $key:expr, $val:expr) => {
            map.insert(($locale, $key), $val);
        };
    }

    // ---- Alert messages ----

    t!("en", "alert.traffic_floor", "Traffic dropped to {value} visitors");
    t!("zh-CN", "alert.traffic_floor", "流量下降至 {value} 位访客");

    t!("en", "alert.ctr_floor", "Low CTR detected: {value}%");
    t!("zh-CN", "alert.ctr_floor", "点击率过低：{value}%");

    t!("en", "alert.rank_ceiling", "Keyword rank dropped to position {value}");
    t!("zh-CN", "alert.rank_ceiling", "关键词排名下降至第 {value} 位");

    t!("en", "alert.drop_rate", "Traffic dropped by {rate:.2}% on {timestamp}");
    t!("zh-CN", "alert.drop_rate", "{timestamp} 流量下降 {rate:.2}%");

    // ---- Report labels ----

    t!("en", "report.status_alert", "System Status: ALERT MODE");
    t!("zh-CN", "report.status_alert", "系统状态：告警");

    t!("en", "report.status_normal", "System Status: NORMAL");
    t!("zh-CN", "report.status_normal", "系统状态：正常");

    t!("en", "report.no_alerts", "No alerts");
    t!("zh-CN", "report.no_alerts", "无告警");

    t!("en", "report.kpi.current_traffic", "Current Traffic");
    t!("zh-CN", "report.kpi.current_traffic", "当前流量");

    t!("en", "report.kpi.current_ctr", "Current CTR (%)");
    t!("zh-CN", "report.kpi.current_ctr", "当前点击率 (%)");

    t!("en", "report.kpi.current_rank", "Current Rank");
    t!("zh-CN", "report.kpi.current_rank", "当前排名");

    t!("en", "report.kpi.avg_traffic", "Avg Traffic");
    t!("zh-CN", "report.kpi.avg_traffic", "平均流量");

    Translations { map }
});

/// Returns true if `locale` has its own translation table.
pub fn is_supported_locale(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Maps unknown locales to [`DEFAULT_LOCALE`].
pub fn normalize_locale(locale: &str) -> &str {
    if is_supported_locale(locale) {
        locale
    } else {
        DEFAULT_LOCALE
    }
}
