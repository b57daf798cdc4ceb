//! Session record and lifecycle.
//!
//! One record per browser client, persisted across page loads. Session
//! identity is a function of continuous-activity recency: a stored record is
//! resumed while `now - last_activity` stays inside the expiry window,
//! otherwise a new session starts (new id, counters incremented) while the
//! lifetime fields (`first_seen`, event history, high-water marks) carry
//! over.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::classifier::SoftSignal;
use crate::env::ClientEnv;

/// Device/browser capture derived from the user agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UaProfile {
    pub device: String,
    pub browser: String,
}

impl Default for UaProfile {
    fn default() -> Self {
        Self {
            device: "unknown".into(),
            browser: "unknown".into(),
        }
    }
}

/// First pointer activity observed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// One recorded event. The payload is opaque to the recorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub name: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

/// The persisted per-client session record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: Uuid,
    /// First visit ever observed through this store (epoch ms).
    pub first_seen: i64,
    /// Updated on every mutation (epoch ms).
    pub last_activity: i64,
    pub page_views: u32,
    pub session_count: u32,
    pub current_page: String,
    pub referrer: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub device: String,
    pub browser: String,
    pub screen_w: u32,
    pub screen_h: u32,
    pub language: String,
    pub timezone: String,
    /// High-water mark, only ever increases.
    pub max_scroll_pct: u32,
    /// High-water mark, only ever increases.
    pub time_on_page_secs: u64,
    pub has_mouse: bool,
    pub has_touch: bool,
    /// Bounded to the most recent N events.
    pub events: Vec<SessionEvent>,
    /// Count of distinct soft signals this page load. Advisory.
    pub bot_score: u32,
    pub bot_signals: Vec<String>,
}

impl SessionRecord {
    /// Resume a stored record or start a new session.
    ///
    /// Capture fields (page, referrer, UTM, device, screen, language,
    /// timezone) are re-derived because the whole record is rebuilt here;
    /// soft-signal state resets on every page load.
    pub fn initialize(
        stored: Option<SessionRecord>,
        env: &ClientEnv,
        profile: &UaProfile,
        now_ms: i64,
        expiry_ms: i64,
    ) -> Self {
        let resumed = stored
            .as_ref()
            .map_or(false, |s| s.is_fresh(now_ms, expiry_ms));

        let (session_id, page_views, session_count) = match (&stored, resumed) {
            (Some(s), true) => (s.session_id, s.page_views, s.session_count),
            (Some(s), false) => (Uuid::new_v4(), s.page_views + 1, s.session_count + 1),
            (None, _) => (Uuid::new_v4(), 1, 1),
        };

        let (screen_w, screen_h) = env.screen.map_or((0, 0), |s| (s.width, s.height));

        Self {
            session_id,
            first_seen: stored.as_ref().map_or(now_ms, |s| s.first_seen),
            last_activity: now_ms,
            page_views,
            session_count,
            current_page: env.page_path(),
            referrer: env.referrer_or_direct(),
            utm_source: env.query_param("utm_source"),
            utm_medium: env.query_param("utm_medium"),
            utm_campaign: env.query_param("utm_campaign"),
            device: profile.device.clone(),
            browser: profile.browser.clone(),
            screen_w,
            screen_h,
            language: env.language.clone().unwrap_or_else(|| "unknown".into()),
            timezone: env.timezone.clone().unwrap_or_else(|| "unknown".into()),
            max_scroll_pct: stored.as_ref().map_or(0, |s| s.max_scroll_pct),
            time_on_page_secs: stored.as_ref().map_or(0, |s| s.time_on_page_secs),
            has_mouse: false,
            has_touch: false,
            events: stored.map_or_else(Vec::new, |s| s.events),
            bot_score: 0,
            bot_signals: Vec::new(),
        }
    }

    /// Whether the record is still inside the inactivity window.
    pub fn is_fresh(&self, now_ms: i64, expiry_ms: i64) -> bool {
        now_ms - self.last_activity < expiry_ms
    }

    pub fn touch(&mut self, now_ms: i64) {
        self.last_activity = now_ms;
    }

    /// Append an event and truncate the history to the most recent `cap`.
    pub fn record_event(&mut self, name: &str, payload: Map<String, Value>, now_ms: i64, cap: usize) {
        self.events.push(SessionEvent {
            name: name.to_string(),
            timestamp: now_ms,
            payload,
        });
        if self.events.len() > cap {
            let excess = self.events.len() - cap;
            self.events.drain(..excess);
        }
        self.touch(now_ms);
    }

    /// Add a soft signal; distinct names only. Returns true when new.
    pub fn add_soft_signal(&mut self, signal: SoftSignal, now_ms: i64) -> bool {
        let name = signal.as_str();
        if self.bot_signals.iter().any(|s| s == name) {
            return false;
        }
        self.bot_signals.push(name.to_string());
        self.bot_score += 1;
        self.touch(now_ms);
        true
    }

    /// Advance the scroll high-water mark. Returns true when it advanced.
    pub fn record_scroll(&mut self, pct: u32, now_ms: i64) -> bool {
        if pct <= self.max_scroll_pct {
            return false;
        }
        self.max_scroll_pct = pct;
        self.touch(now_ms);
        true
    }

    /// Advance the time-on-page high-water mark.
    pub fn record_time_on_page(&mut self, secs: u64, now_ms: i64) {
        if secs > self.time_on_page_secs {
            self.time_on_page_secs = secs;
        }
        self.touch(now_ms);
    }

    /// Record first mouse/touch activity. Returns true on the first
    /// observation of that kind.
    pub fn note_pointer(&mut self, kind: PointerKind, now_ms: i64) -> bool {
        let flag = match kind {
            PointerKind::Mouse => &mut self.has_mouse,
            PointerKind::Touch => &mut self.has_touch,
        };
        if *flag {
            return false;
        }
        *flag = true;
        self.touch(now_ms);
        true
    }
}
