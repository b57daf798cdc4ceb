//! The tracker context.
//!
//! One `Tracker` is constructed per page lifecycle with its configuration,
//! store, and transport injected, and is passed to event handlers by the
//! embedding application. Classification runs first, before any storage
//! access: a bot verdict produces an inert tracker whose `track` calls are
//! no-ops for the rest of the page load.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::info;

use footfall_core::{
    classify, BotReason, ClientEnv, OutboundRow, PointerKind, SessionRecord, SoftSignal,
};

use crate::config::TrackerConfig;
use crate::flusher::{Flusher, FlushTrigger};
use crate::queue::DeliveryQueue;
use crate::store::SessionStore;
use crate::transport::Transport;
use crate::ua::UaCapture;

/// Session/event tracking pipeline for one page lifecycle.
pub struct Tracker {
    config: TrackerConfig,
    store: Arc<dyn SessionStore>,
    queue: Arc<DeliveryQueue>,
    flusher: Arc<Flusher>,
    verdict: Option<BotReason>,
    /// `None` for bot-classified loads; never written for them.
    session: Mutex<Option<SessionRecord>>,
    page_loaded_at: i64,
}

impl Tracker {
    /// Classify the environment and initialize the session.
    ///
    /// For human visitors this loads (or rotates) the stored record,
    /// persists it, and records the page view. For bots it does none of
    /// that: no store reads or writes happen at all.
    pub fn init(
        config: TrackerConfig,
        env: &ClientEnv,
        store: Arc<dyn SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Arc<Self> {
        let verdict = classify(env);
        let queue = Arc::new(DeliveryQueue::new(config.delivery.endpoint().is_some()));
        let flusher = Arc::new(Flusher::new(queue.clone(), transport));
        let now_ms = Utc::now().timestamp_millis();

        let session = match verdict {
            Some(reason) => {
                info!(%reason, "visitor classified as bot, tracking disabled");
                None
            }
            None => {
                let profile = UaCapture::new().profile(&env.user_agent);
                let record = SessionRecord::initialize(
                    store.load(),
                    env,
                    &profile,
                    now_ms,
                    config.session_expiry_ms,
                );
                store.save(&record);
                Some(record)
            }
        };

        let tracker = Arc::new(Self {
            config,
            store,
            queue,
            flusher,
            verdict,
            session: Mutex::new(session),
            page_loaded_at: now_ms,
        });

        if tracker.verdict.is_none() {
            let mut payload = Map::new();
            {
                let guard = tracker.session.lock();
                if let Some(record) = guard.as_ref() {
                    payload.insert("path".into(), Value::String(record.current_page.clone()));
                    payload.insert("referrer".into(), Value::String(record.referrer.clone()));
                    payload.insert("utm".into(), Value::String(record.utm_source.clone()));
                }
            }
            tracker.track("page_view", payload);
        }

        tracker
    }

    /// Whether this page load was classified as a bot.
    pub fn is_bot(&self) -> bool {
        self.verdict.is_some()
    }

    /// The classification reason, if any.
    pub fn bot_reason(&self) -> Option<BotReason> {
        self.verdict
    }

    /// Record an event and enqueue its outbound row.
    ///
    /// Safe to call at any time; a no-op for bot-classified loads and before
    /// initialization completes. Never returns an error to the caller.
    pub fn track(&self, name: &str, payload: Map<String, Value>) {
        if self.verdict.is_some() {
            return;
        }
        let mut guard = self.session.lock();
        let Some(record) = guard.as_mut() else {
            return;
        };

        let now = Utc::now();
        record.record_event(
            name,
            payload.clone(),
            now.timestamp_millis(),
            self.config.event_history_cap,
        );
        self.store.save(record);
        self.queue
            .enqueue(OutboundRow::snapshot(record, name, &payload, now));
    }

    /// Note a user interaction at the given time; interactions inside the
    /// fast-interaction window raise a soft signal.
    pub fn note_interaction_at(&self, at_ms: i64) {
        if at_ms - self.page_loaded_at >= self.config.fast_interaction_window_ms {
            return;
        }
        self.with_session(|record| record.add_soft_signal(SoftSignal::FastInteraction, at_ms));
    }

    /// Note a user interaction happening now.
    pub fn note_interaction(&self) {
        self.note_interaction_at(Utc::now().timestamp_millis());
    }

    /// Record first mouse/touch activity.
    pub fn note_pointer(&self, kind: PointerKind) {
        let now_ms = Utc::now().timestamp_millis();
        self.with_session(|record| record.note_pointer(kind, now_ms));
    }

    /// Advance the scroll high-water mark.
    pub fn record_scroll(&self, pct: u32) {
        let now_ms = Utc::now().timestamp_millis();
        self.with_session(|record| record.record_scroll(pct, now_ms));
    }

    /// Page visibility transitioned to hidden: flush via the unload-safe
    /// transport.
    pub fn page_hidden(&self) {
        self.flusher.flush_detached();
    }

    /// Page unload: persist the time-on-page mark, record the exit event,
    /// and flush via the unload-safe transport.
    pub fn page_exit(&self, time_on_page_secs: u64) {
        if self.verdict.is_none() {
            let max_scroll = {
                let mut guard = self.session.lock();
                match guard.as_mut() {
                    Some(record) => {
                        record.record_time_on_page(time_on_page_secs, Utc::now().timestamp_millis());
                        self.store.save(record);
                        record.max_scroll_pct
                    }
                    None => 0,
                }
            };

            let mut payload = Map::new();
            payload.insert(
                "time_on_page_secs".into(),
                Value::Number(time_on_page_secs.into()),
            );
            payload.insert("max_scroll_pct".into(), Value::Number(max_scroll.into()));
            self.track("page_exit", payload);
        }
        self.flusher.flush_detached();
    }

    /// Flush the delivery queue.
    pub async fn flush(&self, trigger: FlushTrigger) {
        self.flusher.flush(trigger).await;
    }

    /// Start the periodic flush task for this tracker.
    pub fn start_flush_timer(&self) -> tokio::task::JoinHandle<()> {
        self.flusher
            .start_timer(std::time::Duration::from_millis(self.config.flush_interval_ms))
    }

    /// Rows currently awaiting delivery.
    pub fn pending_rows(&self) -> usize {
        self.queue.len()
    }

    /// A copy of the current session record, for host introspection.
    pub fn session_snapshot(&self) -> Option<SessionRecord> {
        self.session.lock().clone()
    }

    /// Apply a mutation to the session record and persist it if the
    /// mutation reported a change.
    fn with_session(&self, f: impl FnOnce(&mut SessionRecord) -> bool) {
        if self.verdict.is_some() {
            return;
        }
        let mut guard = self.session.lock();
        if let Some(record) = guard.as_mut() {
            if f(record) {
                self.store.save(record);
            }
        }
    }
}
