//! The renderable snapshot of a live detection session.
//!
//! One snapshot exists per UI session. It is created with defaults at session
//! start, mutated only through the reducer and the command layer, exposed
//! read-only to renderers, and discarded on teardown. Nothing here persists
//! across reloads (the theme preference lives separately, see [`crate::theme`]).

use gesturedash_protocol::{
    GestureFrame, Handedness, OperatingMode, SwitchState, AUX_SWITCH_COUNT,
};
use serde::Serialize;

/// Sentinel gesture label shown before any telemetry arrives.
pub const NO_GESTURE_LABEL: &str = "No Gesture Detected";

/// Last reported gesture telemetry. Replaced wholesale on every
/// `gesture_update`; absent wire fields reset to these defaults rather than
/// carrying the previous value over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureTelemetry {
    pub label: String,
    pub confidence: f64,
    pub handedness: Handedness,
    pub hand_count: u32,
    pub fps: f64,
}

impl Default for GestureTelemetry {
    fn default() -> Self {
        Self {
            label: NO_GESTURE_LABEL.to_string(),
            confidence: 0.0,
            handedness: Handedness::Unknown,
            hand_count: 0,
            fps: 0.0,
        }
    }
}

impl GestureTelemetry {
    /// Builds the full sub-record from one wire frame. Field-by-field
    /// fallback goes to the fixed defaults, never to a prior snapshot.
    pub fn from_frame(frame: &GestureFrame) -> Self {
        let defaults = Self::default();
        Self {
            label: frame.gesture.clone().unwrap_or(defaults.label),
            confidence: frame.confidence.unwrap_or(defaults.confidence),
            handedness: frame
                .handedness
                .as_deref()
                .map(Handedness::from_wire)
                .unwrap_or(defaults.handedness),
            hand_count: frame.hand_count.unwrap_or(defaults.hand_count),
            fps: frame.fps.unwrap_or(defaults.fps),
        }
    }
}

/// The fixed map of auxiliary switch states, ids 1..=3.
///
/// Two update disciplines apply: `aux_update` flips a single id, while a
/// `gesture_update` carrying a token array replaces the whole map positionally
/// (index 0 = id 1). The id set itself never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AuxStates([bool; AUX_SWITCH_COUNT]);

impl AuxStates {
    pub fn get(&self, id: u8) -> Option<bool> {
        let index = Self::index_of(id)?;
        Some(self.0[index])
    }

    /// Single-key update. Returns false when the id is outside the fixed set.
    pub fn set(&mut self, id: u8, on: bool) -> bool {
        match Self::index_of(id) {
            Some(index) => {
                self.0[index] = on;
                true
            }
            None => false,
        }
    }

    /// Wholesale positional replace from wire tokens. No partial merge:
    /// positions missing from a short array reset to off, extras are ignored.
    pub fn replace_from_tokens(&mut self, tokens: &[String]) {
        for (index, slot) in self.0.iter_mut().enumerate() {
            *slot = tokens
                .get(index)
                .map(|token| SwitchState::from_token(token).is_on())
                .unwrap_or(false);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, bool)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, on)| (index as u8 + 1, *on))
    }

    fn index_of(id: u8) -> Option<usize> {
        if (1..=AUX_SWITCH_COUNT as u8).contains(&id) {
            Some(id as usize - 1)
        } else {
            None
        }
    }
}

/// Complete UI-visible state of the current session.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SessionSnapshot {
    /// True iff the backend has confirmed an active detection session. Forced
    /// false whenever the transport channel drops.
    pub streaming: bool,
    /// Most recent camera frame, base64 as delivered. Overwritten in place;
    /// no history.
    pub last_frame: Option<String>,
    pub gesture: GestureTelemetry,
    pub aux_states: AuxStates,
    pub mode: OperatingMode,
    /// Last transport-level failure message; cleared on (re)connect.
    pub connection_error: Option<String>,
}
