//! Copy feedback: the short-lived "Copied!" marker after a clipboard copy.
//!
//! Purely cosmetic: it never feeds back into navigation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::script::catalog::StepId;
use crate::script::objections::ObjectionId;

/// Default time the marker stays visible, in milliseconds.
pub const DEFAULT_COPY_FEEDBACK_MS: u32 = 2000;

/// What was copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum CopyTarget {
    /// A script card on a given screen.
    Card { step: StepId, index: usize },
    Objection { objection: ObjectionId },
}

/// A showing "Copied!" marker and when it reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopyMarker {
    #[serde(flatten)]
    pub target: CopyTarget,
    pub expires_at: DateTime<Utc>,
}

/// One client's copy marker. Each surface keeps its own.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    window: chrono::Duration,
    last: Option<CopyMarker>,
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::from_millis(DEFAULT_COPY_FEEDBACK_MS)
    }
}

impl CopyFeedback {
    pub fn new(window: chrono::Duration) -> Self {
        Self { window, last: None }
    }

    pub fn from_millis(window_ms: u32) -> Self {
        Self::new(chrono::Duration::milliseconds(i64::from(window_ms)))
    }

    /// Record a copy at `now`. A newer copy replaces the older marker.
    pub fn record(&mut self, target: CopyTarget, now: DateTime<Utc>) -> CopyMarker {
        let marker = CopyMarker {
            target,
            expires_at: now + self.window,
        };
        self.last = Some(marker);
        marker
    }

    /// The marker still showing at `now`, if any.
    pub fn visible(&self, now: DateTime<Utc>) -> Option<CopyMarker> {
        self.last.filter(|marker| now < marker.expires_at)
    }

    /// A tracker with the same window and nothing recorded.
    pub fn fresh(&self) -> Self {
        Self::new(self.window)
    }
}
