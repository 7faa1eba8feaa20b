//! Notification seam for verification events
//!
//! The core emits exactly two one-shot events: `approval_requested` when a
//! match becomes pending with a non-empty approver set, and `resolved` on a
//! terminal transition. Delivery, user-facing rendering, and translating user
//! input back into `record_vote` calls all belong to the implementing
//! collaborator.

use crate::error::Result;
use crate::types::{ApprovalRequested, MatchResolved};
use async_trait::async_trait;
use std::sync::Mutex;

/// Trait for delivering verification events
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A match became pending and needs this approver's vote
    async fn approval_requested(&self, event: ApprovalRequested) -> Result<()>;

    /// A match reached a terminal state
    async fn resolved(&self, event: MatchResolved) -> Result<()>;
}

/// Notifier that drops all events, for deployments without delivery
#[derive(Debug, Default, Clone)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn approval_requested(&self, _event: ApprovalRequested) -> Result<()> {
        Ok(())
    }

    async fn resolved(&self, _event: MatchResolved) -> Result<()> {
        Ok(())
    }
}

/// Recording notifier for testing
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    approval_requests: Mutex<Vec<ApprovalRequested>>,
    resolutions: Mutex<Vec<MatchResolved>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All approval requests received so far
    pub fn approval_requests(&self) -> Vec<ApprovalRequested> {
        self.approval_requests
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// All resolution events received so far
    pub fn resolutions(&self) -> Vec<MatchResolved> {
        self.resolutions
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Clear recorded events
    pub fn clear(&self) {
        if let Ok(mut events) = self.approval_requests.lock() {
            events.clear();
        }
        if let Ok(mut events) = self.resolutions.lock() {
            events.clear();
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn approval_requested(&self, event: ApprovalRequested) -> Result<()> {
        if let Ok(mut events) = self.approval_requests.lock() {
            events.push(event);
        }
        Ok(())
    }

    async fn resolved(&self, event: MatchResolved) -> Result<()> {
        if let Ok(mut events) = self.resolutions.lock() {
            events.push(event);
        }
        Ok(())
    }
}
