//! Bot classification.
//!
//! A pure, ordered rule chain evaluated once per page load, before any
//! session storage is touched. The first matching rule wins and becomes the
//! classification reason. A bot verdict disables all tracking for that page
//! load; it is never persisted, so the next load re-evaluates from scratch.
//!
//! Separately, soft signals accumulate low-confidence observations on the
//! session record for human review without ever reclassifying the visitor.

use std::fmt;

use crate::env::ClientEnv;

/// Known bot/crawler/automation-tool UA substrings, checked in order.
pub const BOT_UA_TOKENS: &[&str] = &[
    "bot", "spider", "crawl", "slurp", "googlebot", "bingbot", "yandex",
    "baidu", "duckduck", "sogou", "exabot", "facebot", "ia_archiver",
    "semrush", "ahrefsbot", "mj12bot", "dotbot", "rogerbot", "screaming",
    "headlesschrome", "phantomjs", "selenium", "webdriver", "puppeteer",
    "playwright", "chrome-lighthouse", "pingdom", "gtmetrix",
    "pagespeed", "wget", "curl/", "python-requests", "java/",
    "libwww", "prerender", "node-fetch", "axios/", "go-http",
    "facebookexternalhit", "whatsapp", "twitterbot", "linkedinbot",
];

/// Why a visitor was classified as a bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotReason {
    /// UA contained a denylisted token.
    UserAgent(&'static str),
    /// Runtime exposed an automation flag.
    WebdriverFlag,
    /// Absent or zero-dimension display surface.
    NoScreen,
    /// No usable language preference reported.
    NoLanguage,
    /// Automation-harness artifact in the runtime's extension object.
    ChromeAutomation,
}

impl fmt::Display for BotReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserAgent(token) => write!(f, "user_agent:{token}"),
            Self::WebdriverFlag => f.write_str("webdriver_flag"),
            Self::NoScreen => f.write_str("no_screen"),
            Self::NoLanguage => f.write_str("no_language"),
            Self::ChromeAutomation => f.write_str("chrome_automation"),
        }
    }
}

/// Classify the environment. `None` means human.
///
/// Rules short-circuit in a fixed order; the order is part of the contract
/// (a denylisted crawler is reported as `user_agent:*` even if it also runs
/// headless with no screen).
pub fn classify(env: &ClientEnv) -> Option<BotReason> {
    // 1. UA denylist, case-insensitive substring match
    let ua = env.user_agent.to_lowercase();
    for &token in BOT_UA_TOKENS {
        if ua.contains(token) {
            return Some(BotReason::UserAgent(token));
        }
    }

    // 2. Webdriver flag (Selenium / Playwright / Puppeteer)
    if env.webdriver {
        return Some(BotReason::WebdriverFlag);
    }

    // 3. Zero or missing screen
    match env.screen {
        None => return Some(BotReason::NoScreen),
        Some(s) if s.width == 0 || s.height == 0 => return Some(BotReason::NoScreen),
        Some(_) => {}
    }

    // 4. No language set
    if env.has_no_language() {
        return Some(BotReason::NoLanguage);
    }

    // 5. Automation artifact probe; a failed probe (None) is not a match
    if env.automation_artifact == Some(true) {
        return Some(BotReason::ChromeAutomation);
    }

    None
}

/// A soft signal: raises suspicion, never a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftSignal {
    /// A tracked interaction landed inside the fast-interaction window
    /// after page load.
    FastInteraction,
}

impl SoftSignal {
    /// Stable name stored on the session record (deduplication key).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FastInteraction => "fast_interaction",
        }
    }
}
