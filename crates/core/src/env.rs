//! Client environment signals.
//!
//! Everything the classifier and the session model need to know about the
//! visitor's runtime, captured once per page load by the embedding
//! application and treated as immutable afterwards.

use serde::{Deserialize, Serialize};

/// Display surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
}

/// Environment signals captured at page load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientEnv {
    /// Raw user agent string.
    pub user_agent: String,

    /// Runtime reports it is controlled by automation software.
    pub webdriver: bool,

    /// Display surface; `None` when the runtime exposes no screen at all.
    pub screen: Option<Screen>,

    /// Primary language preference, if any.
    pub language: Option<String>,

    /// Full preference list (may be empty).
    pub languages: Vec<String>,

    /// IANA timezone name, if resolvable.
    pub timezone: Option<String>,

    /// Full page URL including the query string (carries UTM parameters).
    pub page_url: String,

    /// Referrer URL; empty or absent means a direct visit.
    pub referrer: Option<String>,

    /// Best-effort probe of the runtime's extension/automation object.
    /// `None` means the probe was unavailable or failed, which is never
    /// treated as a match.
    pub automation_artifact: Option<bool>,
}

impl ClientEnv {
    /// Extract the path component of the page URL.
    pub fn page_path(&self) -> String {
        url::Url::parse(&self.page_url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| "/".to_string())
    }

    /// Look up a query parameter of the page URL; empty string when absent.
    pub fn query_param(&self, name: &str) -> String {
        url::Url::parse(&self.page_url)
            .ok()
            .and_then(|u| {
                u.query_pairs()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.into_owned())
            })
            .unwrap_or_default()
    }

    /// Referrer with the direct-visit fallback applied.
    pub fn referrer_or_direct(&self) -> String {
        match self.referrer.as_deref() {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => "direct".to_string(),
        }
    }

    /// True when no usable language preference is reported at all.
    pub fn has_no_language(&self) -> bool {
        self.language.as_deref().map_or(true, str::is_empty) && self.languages.is_empty()
    }
}
