//! Outbound command surface and per-command policy table.
//!
//! The transport is a constructor-injected dependency (no module-level shared
//! handle), opened at session start and dropped at teardown, so tests can
//! substitute doubles.

use gesturedash_core::Result;
use gesturedash_protocol::{DetectionSettings, OperatingMode, StartAck};

/// Backend command surface. Each method is one independent request; there is
/// no queuing, batching, retry, or cancellation. Timeouts live inside the
/// implementation.
pub trait CommandTransport {
    fn start_detection(&self, settings: &DetectionSettings) -> Result<StartAck>;

    fn stop_detection(&self) -> Result<()>;

    fn update_settings(&self, settings: &DetectionSettings) -> Result<()>;

    fn set_mode(&self, mode: OperatingMode) -> Result<()>;

    /// Best-effort forced-disconnect signal on the event channel, used as the
    /// fallback when a stop request fails.
    fn force_disconnect(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Start,
    Stop,
    UpdateSettings,
    SetMode,
}

/// How a command interacts with the snapshot.
///
/// The optimistic/authoritative split is intentionally uneven: stop applies
/// its effect before the request resolves, while mode waits for the server's
/// `mode_changed` event because mode is authoritative server state. Keeping
/// the split here as data makes the asymmetry visible and testable instead of
/// ad hoc per-call logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandPolicy {
    /// Apply the snapshot effect before the request resolves.
    pub optimistic: bool,
    /// Reflect a transport failure in `connection_error`; otherwise failures
    /// are logged only.
    pub surfaces_error: bool,
}

impl CommandKind {
    pub const fn policy(self) -> CommandPolicy {
        match self {
            CommandKind::Start => CommandPolicy {
                optimistic: false,
                surfaces_error: true,
            },
            CommandKind::Stop => CommandPolicy {
                optimistic: true,
                surfaces_error: false,
            },
            CommandKind::UpdateSettings => CommandPolicy {
                optimistic: false,
                surfaces_error: false,
            },
            CommandKind::SetMode => CommandPolicy {
                optimistic: false,
                surfaces_error: false,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Start => "start_detection",
            CommandKind::Stop => "stop_detection",
            CommandKind::UpdateSettings => "update_settings",
            CommandKind::SetMode => "set_mode",
        }
    }
}
