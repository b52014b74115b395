//! The session synchronization controller.
//!
//! [`SessionSync`] exclusively owns the [`SessionSnapshot`] and is the only
//! writer. Inbound events from the push channel are folded in arrival order
//! through the core reducer; outbound commands mutate the snapshot according
//! to the per-command policies in [`crate::commands`]. Everything runs on one
//! logical thread of control; each handler runs to completion before the next
//! is dispatched.

use gesturedash_core::{reduce, DashError, SessionSnapshot};
use gesturedash_protocol::{DetectionSettings, OperatingMode, SessionEvent};
use tracing::{debug, warn};

use crate::commands::{CommandKind, CommandTransport};

/// Fixed user-facing message when starting detection fails at the transport.
pub const START_FAILED_MESSAGE: &str =
    "Failed to connect to the server. Please check if the backend is running.";

pub struct SessionSync<T: CommandTransport> {
    snapshot: SessionSnapshot,
    transport: T,
}

impl<T: CommandTransport> SessionSync<T> {
    /// Creates a fresh session with the default snapshot. The transport lives
    /// for the duration of the session and is dropped with it.
    pub fn new(transport: T) -> Self {
        Self {
            snapshot: SessionSnapshot::default(),
            transport,
        }
    }

    /// Read-only view for renderers. Renderers never mutate the snapshot.
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Applies one decoded channel event. Never fails; malformed or partial
    /// payloads were already absorbed at decode time.
    pub fn handle_event(&mut self, event: &SessionEvent) {
        self.snapshot = reduce(&self.snapshot, event);
    }

    /// Requests detection start. Streaming flips true only on the backend's
    /// literal acknowledgement; a transport failure surfaces the fixed
    /// user-facing message and leaves streaming at its pre-call value. An
    /// unexpected acknowledgement leaves both untouched.
    ///
    /// Returns `Err` only for locally invalid settings; network failures are
    /// absorbed into the snapshot.
    pub fn start_session(&mut self, settings: &DetectionSettings) -> Result<(), DashError> {
        settings
            .validate()
            .map_err(|err| DashError::InvalidSettings(err.message))?;

        self.snapshot.connection_error = None;
        match self.transport.start_detection(settings) {
            Ok(ack) if ack.is_started() => {
                self.snapshot.streaming = true;
            }
            Ok(ack) => {
                warn!(status = %ack.status, "Unexpected start_detection acknowledgement");
            }
            Err(err) => {
                warn!(command = CommandKind::Start.as_str(), error = %err, "Request failed");
                if CommandKind::Start.policy().surfaces_error {
                    self.snapshot.connection_error = Some(START_FAILED_MESSAGE.to_string());
                }
            }
        }
        Ok(())
    }

    /// Requests detection stop. The snapshot effect is applied optimistically
    /// before the request resolves; on failure the fallback is a best-effort
    /// forced disconnect on the event channel, never a retry.
    pub fn stop_session(&mut self) {
        if CommandKind::Stop.policy().optimistic {
            self.snapshot.streaming = false;
            self.snapshot.last_frame = None;
        }

        if let Err(err) = self.transport.stop_detection() {
            warn!(command = CommandKind::Stop.as_str(), error = %err, "Request failed; forcing disconnect");
            if let Err(fallback) = self.transport.force_disconnect() {
                warn!(error = %fallback, "Forced disconnect fallback failed");
            }
        }
    }

    /// Pushes new settings to a running session. Fire-and-forget: only sent
    /// while streaming, failures are logged and never reach the snapshot.
    pub fn update_settings(&mut self, settings: &DetectionSettings) -> Result<(), DashError> {
        settings
            .validate()
            .map_err(|err| DashError::InvalidSettings(err.message))?;

        if !self.snapshot.streaming {
            debug!("Not streaming; settings update not sent");
            return Ok(());
        }

        if let Err(err) = self.transport.update_settings(settings) {
            warn!(command = CommandKind::UpdateSettings.as_str(), error = %err, "Request failed");
        }
        Ok(())
    }

    /// Requests a mode switch. Mode is authoritative server state, so the
    /// snapshot changes only when the corresponding `mode_changed` event
    /// arrives, never optimistically.
    pub fn set_mode(&mut self, mode: OperatingMode) {
        if let Err(err) = self.transport.set_mode(mode) {
            warn!(command = CommandKind::SetMode.as_str(), error = %err, mode = mode.as_wire(), "Request failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesturedash_core::Result as CoreResult;
    use gesturedash_protocol::{GestureFrame, Resolution, StartAck, ACK_DETECTION_STARTED};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct MockTransport {
        start_acks: RefCell<VecDeque<CoreResult<StartAck>>>,
        stop_fails: bool,
        update_fails: bool,
        set_mode_fails: bool,
        calls: RefCell<Vec<String>>,
    }

    impl MockTransport {
        fn transport_error(command: &str) -> DashError {
            DashError::Transport {
                command: command.to_string(),
                details: "connection refused".to_string(),
            }
        }

        fn with_start_acks(acks: Vec<CoreResult<StartAck>>) -> Self {
            Self {
                start_acks: RefCell::new(acks.into()),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl CommandTransport for MockTransport {
        fn start_detection(&self, _settings: &DetectionSettings) -> CoreResult<StartAck> {
            self.calls.borrow_mut().push("start".to_string());
            self.start_acks
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(Self::transport_error("start_detection")))
        }

        fn stop_detection(&self) -> CoreResult<()> {
            self.calls.borrow_mut().push("stop".to_string());
            if self.stop_fails {
                Err(Self::transport_error("stop_detection"))
            } else {
                Ok(())
            }
        }

        fn update_settings(&self, _settings: &DetectionSettings) -> CoreResult<()> {
            self.calls.borrow_mut().push("update".to_string());
            if self.update_fails {
                Err(Self::transport_error("update_settings"))
            } else {
                Ok(())
            }
        }

        fn set_mode(&self, mode: OperatingMode) -> CoreResult<()> {
            self.calls.borrow_mut().push(format!("mode:{}", mode.as_wire()));
            if self.set_mode_fails {
                Err(Self::transport_error("set_mode"))
            } else {
                Ok(())
            }
        }

        fn force_disconnect(&self) -> CoreResult<()> {
            self.calls.borrow_mut().push("force_disconnect".to_string());
            Ok(())
        }
    }

    fn started_ack() -> CoreResult<StartAck> {
        Ok(StartAck {
            status: ACK_DETECTION_STARTED.to_string(),
        })
    }

    fn settings() -> DetectionSettings {
        DetectionSettings {
            sensitivity: 5,
            resolution: Resolution::Medium,
        }
    }

    #[test]
    fn start_sets_streaming_on_literal_ack() {
        let mut sync = SessionSync::new(MockTransport::with_start_acks(vec![started_ack()]));
        sync.start_session(&settings()).expect("start");
        assert!(sync.snapshot().streaming);
        assert_eq!(sync.snapshot().connection_error, None);
    }

    #[test]
    fn start_failure_surfaces_fixed_message_and_leaves_streaming() {
        let mut sync = SessionSync::new(MockTransport::default());
        sync.start_session(&settings()).expect("start");
        assert!(!sync.snapshot().streaming);
        assert_eq!(
            sync.snapshot().connection_error.as_deref(),
            Some(START_FAILED_MESSAGE)
        );
    }

    #[test]
    fn repeated_start_failure_never_flips_state() {
        let mut sync = SessionSync::new(MockTransport::default());
        sync.start_session(&settings()).expect("start");
        let after_first = sync.snapshot().clone();
        sync.start_session(&settings()).expect("start");
        assert_eq!(sync.snapshot(), &after_first);
    }

    #[test]
    fn start_failure_while_streaming_keeps_streaming() {
        let mut sync = SessionSync::new(MockTransport::default());
        sync.handle_event(&SessionEvent::Status {
            value: "active".to_string(),
        });
        sync.start_session(&settings()).expect("start");
        assert!(sync.snapshot().streaming);
    }

    #[test]
    fn unexpected_ack_changes_nothing() {
        let acks = vec![Ok(StartAck {
            status: "Detection already running".to_string(),
        })];
        let mut sync = SessionSync::new(MockTransport::with_start_acks(acks));
        sync.start_session(&settings()).expect("start");
        assert!(!sync.snapshot().streaming);
        assert_eq!(sync.snapshot().connection_error, None);
    }

    #[test]
    fn invalid_settings_never_reach_the_transport() {
        let mut sync = SessionSync::new(MockTransport::default());
        let bad = DetectionSettings {
            sensitivity: 0,
            resolution: Resolution::Low,
        };
        assert!(sync.start_session(&bad).is_err());
        assert!(sync.transport.calls().is_empty());
    }

    #[test]
    fn stop_is_optimistic_and_clears_frame() {
        let mut sync = SessionSync::new(MockTransport::with_start_acks(vec![started_ack()]));
        sync.start_session(&settings()).expect("start");
        sync.handle_event(&SessionEvent::GestureUpdate(GestureFrame {
            frame: Some("frame-1".to_string()),
            ..GestureFrame::default()
        }));
        assert!(sync.snapshot().last_frame.is_some());

        sync.stop_session();
        assert!(!sync.snapshot().streaming);
        assert_eq!(sync.snapshot().last_frame, None);
        assert_eq!(sync.transport.calls(), vec!["start", "stop"]);
    }

    #[test]
    fn stop_failure_falls_back_to_forced_disconnect() {
        let transport = MockTransport {
            stop_fails: true,
            ..MockTransport::default()
        };
        let mut sync = SessionSync::new(transport);
        sync.handle_event(&SessionEvent::Status {
            value: "active".to_string(),
        });

        sync.stop_session();
        // Optimistic effect holds even though the request failed.
        assert!(!sync.snapshot().streaming);
        assert_eq!(sync.transport.calls(), vec!["stop", "force_disconnect"]);
    }

    #[test]
    fn settings_update_only_sent_while_streaming() {
        let mut sync = SessionSync::new(MockTransport::default());
        sync.update_settings(&settings()).expect("update");
        assert!(sync.transport.calls().is_empty());

        sync.handle_event(&SessionEvent::Status {
            value: "active".to_string(),
        });
        sync.update_settings(&settings()).expect("update");
        assert_eq!(sync.transport.calls(), vec!["update"]);
    }

    #[test]
    fn settings_update_failure_stays_off_the_snapshot() {
        let transport = MockTransport {
            update_fails: true,
            ..MockTransport::default()
        };
        let mut sync = SessionSync::new(transport);
        sync.handle_event(&SessionEvent::Status {
            value: "active".to_string(),
        });
        let before = sync.snapshot().clone();

        sync.update_settings(&settings()).expect("update");
        assert_eq!(sync.snapshot(), &before);
    }

    #[test]
    fn set_mode_is_not_optimistic() {
        let mut sync = SessionSync::new(MockTransport::default());
        sync.set_mode(OperatingMode::HomeAutomation);
        assert_eq!(sync.snapshot().mode, OperatingMode::General);
        assert_eq!(
            sync.transport.calls(),
            vec!["mode:home_automation".to_string()]
        );

        sync.handle_event(&SessionEvent::ModeChanged {
            mode: OperatingMode::HomeAutomation,
        });
        assert_eq!(sync.snapshot().mode, OperatingMode::HomeAutomation);
    }

    #[test]
    fn set_mode_failure_is_absorbed() {
        let transport = MockTransport {
            set_mode_fails: true,
            ..MockTransport::default()
        };
        let mut sync = SessionSync::new(transport);
        let before = sync.snapshot().clone();
        sync.set_mode(OperatingMode::HomeAutomation);
        assert_eq!(sync.snapshot(), &before);
    }
}
