//! Test fixtures.

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use footfall_core::{ClientEnv, Screen};

/// A plausible human browsing environment.
pub fn human_env() -> ClientEnv {
    ClientEnv {
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
            .into(),
        webdriver: false,
        screen: Some(Screen {
            width: 1920,
            height: 1080,
        }),
        language: Some("en-US".into()),
        languages: vec!["en-US".into(), "en".into()],
        timezone: Some("America/New_York".into()),
        page_url: "https://example.com/landing?utm_source=newsletter&utm_medium=email".into(),
        referrer: Some("https://news.example.org/".into()),
        automation_artifact: Some(false),
    }
}

/// A crawler environment (denylisted UA).
pub fn crawler_env() -> ClientEnv {
    ClientEnv {
        user_agent: "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)"
            .into(),
        ..human_env()
    }
}

/// A headless automation environment (clean UA, webdriver flag set).
pub fn webdriver_env() -> ClientEnv {
    ClientEnv {
        webdriver: true,
        ..human_env()
    }
}

/// One wire-shaped row as the tracker would send it.
pub fn row(event: &str) -> Value {
    json!({
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "session_id": "11111111-1111-1111-1111-111111111111",
        "event": event,
        "page": "/landing",
        "device": "desktop",
        "browser": "Chrome",
        "referrer": "direct",
        "utm_source": "",
        "utm_medium": "",
        "utm_campaign": "",
        "scroll_pct": 40,
        "is_bot": "false",
        "extra": "{}",
    })
}

/// A `{"rows": [...]}` batch body with `n` rows.
pub fn batch_body(n: usize) -> Value {
    let rows: Vec<Value> = (0..n).map(|i| row(&format!("event_{i}"))).collect();
    json!({ "rows": rows })
}
