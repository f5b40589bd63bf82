use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Text shown while navigation is frozen
pub const PAUSED_NOTICE: &str = "Rendering paused: graphics context lost";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Active,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextEvent {
    Lost,
    Restored,
}

const NONE: u8 = 0;
const LOST: u8 = 1;
const RESTORED: u8 = 2;

/// Thread-safe mailbox for context notifications.
///
/// GPU device-lost callbacks may run off the UI thread; they post here and
/// the guard picks the latest event up at the start of the next frame.
#[derive(Debug, Clone, Default)]
pub struct ContextSignal {
    pending: Arc<AtomicU8>,
}

impl ContextSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify_lost(&self) {
        self.pending.store(LOST, Ordering::Release);
    }

    pub fn notify_restored(&self) {
        self.pending.store(RESTORED, Ordering::Release);
    }

    /// Take the most recent unread event
    pub fn take(&self) -> Option<ContextEvent> {
        match self.pending.swap(NONE, Ordering::AcqRel) {
            LOST => Some(ContextEvent::Lost),
            RESTORED => Some(ContextEvent::Restored),
            _ => None,
        }
    }
}

/// Suspends navigation while the rendering context is gone.
///
/// `Active -> Lost -> Active`, or stays `Lost` if the platform never
/// restores the context. Nothing is re-synced on restore because frozen
/// state was never touched.
#[derive(Debug, Clone)]
pub struct ContextLossGuard {
    status: RenderStatus,
    losses: u32,
}

impl ContextLossGuard {
    pub fn new() -> Self {
        Self {
            status: RenderStatus::Active,
            losses: 0,
        }
    }

    pub fn status(&self) -> RenderStatus {
        self.status
    }

    pub fn is_suspended(&self) -> bool {
        self.status == RenderStatus::Lost
    }

    /// Number of losses seen since creation
    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.is_suspended().then_some(PAUSED_NOTICE)
    }

    /// Returns true if this call changed the status
    pub fn on_lost(&mut self) -> bool {
        if self.status == RenderStatus::Lost {
            return false;
        }
        self.status = RenderStatus::Lost;
        self.losses += 1;
        log::warn!("graphics context lost (#{}), navigation paused", self.losses);
        true
    }

    pub fn on_restored(&mut self) -> bool {
        if self.status == RenderStatus::Active {
            return false;
        }
        self.status = RenderStatus::Active;
        log::info!("graphics context restored, navigation resumed");
        true
    }

    pub fn apply(&mut self, event: ContextEvent) -> bool {
        match event {
            ContextEvent::Lost => self.on_lost(),
            ContextEvent::Restored => self.on_restored(),
        }
    }
}

impl Default for ContextLossGuard {
    fn default() -> Self {
        Self::new()
    }
}
