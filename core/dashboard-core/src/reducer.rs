//! Pure reducer folding pushed backend events into the session snapshot.
//!
//! Events are applied strictly in arrival order; each application runs to
//! completion before the next, so last-write-wins resolves every overlap.
//! Processing an event never fails: partial payloads fall back to defaults and
//! out-of-range ids are dropped with a log line.

use gesturedash_protocol::SessionEvent;

use crate::snapshot::{GestureTelemetry, SessionSnapshot};

/// Applies one event to the current snapshot, returning the next snapshot.
pub fn reduce(current: &SessionSnapshot, event: &SessionEvent) -> SessionSnapshot {
    let mut next = current.clone();
    match event {
        SessionEvent::Connected => {
            next.connection_error = None;
        }
        SessionEvent::ConnectionFailed { reason } => {
            next.connection_error = Some(reason.clone());
            next.streaming = false;
        }
        SessionEvent::Disconnected => {
            next.streaming = false;
        }
        SessionEvent::GestureUpdate(frame) => {
            if frame.frame.is_some() {
                next.last_frame = frame.frame.clone();
            }
            next.gesture = GestureTelemetry::from_frame(frame);
            next.streaming = true;
            if let Some(tokens) = &frame.button_states {
                // Embedded array is authoritative: wholesale replace, no merge.
                next.aux_states.replace_from_tokens(tokens);
            }
        }
        SessionEvent::AuxUpdate { id, state } => {
            if !next.aux_states.set(*id, state.is_on()) {
                tracing::warn!(id, "Ignoring aux update for unknown switch id");
            }
        }
        SessionEvent::Status { value } => {
            next.streaming = value == "active";
        }
        SessionEvent::ModeChanged { mode } => {
            next.mode = *mode;
        }
    }
    next
}
