//! Time-based local record ids.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use subwarden_core::RecordId;

/// Stored ids further ahead of the clock than this are treated as corrupt.
pub const MAX_FUTURE_SKEW_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Hands out `local-<unix-millis>` ids that strictly increase.
///
/// When two ids are requested within the same millisecond, or the clock steps
/// backwards, the later id is bumped past the previous one so an id is never
/// handed out twice.
#[derive(Debug, Default)]
pub struct LocalIdGenerator {
    last: AtomicI64,
}

impl LocalIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never hand out an id at or below `millis`, e.g. the newest id already on disk.
    ///
    /// Returns `false` and ignores the value when it lies more than
    /// [`MAX_FUTURE_SKEW_MILLIS`] ahead of the clock.
    pub fn observe(&self, millis: i64) -> bool {
        self.observe_at(millis, Utc::now().timestamp_millis())
    }

    pub fn next_id(&self) -> RecordId {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn observe_at(&self, millis: i64, now: i64) -> bool {
        if millis > now.saturating_add(MAX_FUTURE_SKEW_MILLIS) {
            return false;
        }
        self.last.fetch_max(millis, Ordering::SeqCst);
        true
    }

    fn next_at(&self, now: i64) -> RecordId {
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        RecordId::local(now.max(prev.saturating_add(1)))
    }
}
