//! Wire types for the gesture detection backend.
//!
//! This crate is shared by the dashboard client and any future front ends to
//! prevent schema drift. The backend is the authority on event payloads, but
//! clients reuse these types to decode pushed events and build valid commands.
//!
//! Decoding is deliberately tolerant: optional payload fields that are absent
//! decode as `None` and are substituted with fixed defaults downstream. An
//! event is never rejected for missing fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The literal acknowledgement the backend returns when detection starts.
/// Anything else in the `status` field is not a success.
pub const ACK_DETECTION_STARTED: &str = "Detection Started";

/// Number of auxiliary switches the backend reports. Fixed; the set of ids
/// (1..=3) never grows or shrinks.
pub const AUX_SWITCH_COUNT: usize = 3;

/// HTTP command endpoints, relative to the backend base URL.
pub const START_DETECTION_PATH: &str = "start_detection";
pub const STOP_DETECTION_PATH: &str = "stop_detection";
pub const UPDATE_SETTINGS_PATH: &str = "update_settings";
pub const SET_MODE_PATH: &str = "set_mode";
/// Best-effort cleanup endpoint used as the forced-disconnect fallback when a
/// stop request fails.
pub const FORCE_CLEANUP_PATH: &str = "force_cleanup";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// State token for an auxiliary switch. The backend sends the literal strings
/// `"ON"` and `"OFF"`; any other token is treated as off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchState {
    On,
    #[default]
    Off,
}

impl SwitchState {
    pub fn from_token(token: &str) -> Self {
        if token == "ON" {
            SwitchState::On
        } else {
            SwitchState::Off
        }
    }

    pub fn is_on(self) -> bool {
        matches!(self, SwitchState::On)
    }
}

/// Which hand the detector attributed the gesture to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    /// Tolerant parse: unrecognized values collapse to `Unknown`.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "Left" => Handedness::Left,
            "Right" => Handedness::Right,
            _ => Handedness::Unknown,
        }
    }
}

/// Operational mode of the detection backend. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OperatingMode {
    #[default]
    General,
    HomeAutomation,
}

impl OperatingMode {
    /// Parses the backend's mode strings. `general` is accepted as a synonym
    /// of `general_recognition` (older backend revisions used both).
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "general_recognition" | "general" => Some(OperatingMode::General),
            "home_automation" => Some(OperatingMode::HomeAutomation),
            _ => None,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            OperatingMode::General => "general_recognition",
            OperatingMode::HomeAutomation => "home_automation",
        }
    }
}

/// Camera resolution requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Low,
    #[default]
    Medium,
    High,
}

impl Resolution {
    pub fn as_wire(self) -> &'static str {
        match self {
            Resolution::Low => "low",
            Resolution::Medium => "medium",
            Resolution::High => "high",
        }
    }
}

pub const MIN_SENSITIVITY: u8 = 1;
pub const MAX_SENSITIVITY: u8 = 10;

/// Detection settings sent with `start_detection` and `update_settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionSettings {
    pub sensitivity: u8,
    pub resolution: Resolution,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            sensitivity: 5,
            resolution: Resolution::Medium,
        }
    }
}

impl DetectionSettings {
    pub fn validate(&self) -> Result<(), ErrorInfo> {
        if !(MIN_SENSITIVITY..=MAX_SENSITIVITY).contains(&self.sensitivity) {
            return Err(ErrorInfo::new(
                "invalid_sensitivity",
                format!(
                    "sensitivity must be between {} and {}",
                    MIN_SENSITIVITY, MAX_SENSITIVITY
                ),
            ));
        }
        Ok(())
    }
}

/// Request body wrapper for the settings-carrying endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsRequest {
    pub settings: DetectionSettings,
}

/// Request body for `set_mode`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModeRequest {
    pub mode: String,
}

impl ModeRequest {
    pub fn new(mode: OperatingMode) -> Self {
        Self {
            mode: mode.as_wire().to_string(),
        }
    }
}

/// Response body of `start_detection`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StartAck {
    #[serde(default)]
    pub status: String,
}

impl StartAck {
    pub fn is_started(&self) -> bool {
        self.status == ACK_DETECTION_STARTED
    }
}

/// Full `gesture_update` payload as the backend emits it.
///
/// Every field is optional on the wire. The backend sends more than the
/// snapshot consumes (`system_status`, `mode`, `serial_connected` ride along
/// with telemetry); those fields are kept so real payloads decode cleanly but
/// are ignored by the reducer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureFrame {
    /// Base64-encoded JPEG. Kept opaque; the client never decodes it.
    #[serde(default)]
    pub frame: Option<String>,
    #[serde(default)]
    pub gesture: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub handedness: Option<String>,
    #[serde(default)]
    pub hand_count: Option<u32>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub current_fps: Option<f64>,
    /// Positional `"ON"`/`"OFF"` tokens, index 0 = switch id 1. When present
    /// it is authoritative for the whole switch map.
    #[serde(default)]
    pub button_states: Option<Vec<String>>,
    #[serde(default)]
    pub system_status: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub serial_connected: Option<bool>,
}

/// Canonical inbound event, after name synonyms and payload shapes have been
/// normalized by [`decode_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Connected,
    ConnectionFailed { reason: String },
    Disconnected,
    GestureUpdate(GestureFrame),
    AuxUpdate { id: u8, state: SwitchState },
    Status { value: String },
    ModeChanged { mode: OperatingMode },
}

#[derive(Debug, Deserialize)]
struct AuxUpdatePayload {
    #[serde(alias = "id")]
    button: u8,
    #[serde(default)]
    state: String,
}

#[derive(Debug, Deserialize)]
struct ModePayload {
    mode: String,
}

/// Normalizes a raw channel event into a canonical [`SessionEvent`].
///
/// This is the transport adapter boundary: event-name synonyms that appeared
/// interchangeably across backend revisions map to one canonical event each.
///
/// | canonical      | synonyms        |
/// |----------------|-----------------|
/// | `gesture_update` | (none)        |
/// | `aux_update`   | `button_update` |
/// | `status`       | `system_status` |
/// | `mode_changed` | `mode_change`   |
///
/// Channel lifecycle signals (`connect`, `connect_error`, `disconnect`) are
/// folded into the same enum. Unknown event names and undecodable payloads
/// return `None`; they are ignored, never an error.
pub fn decode_event(name: &str, payload: &Value) -> Option<SessionEvent> {
    match name {
        "connect" => Some(SessionEvent::Connected),
        "connect_error" => Some(SessionEvent::ConnectionFailed {
            reason: failure_reason(payload),
        }),
        "disconnect" => Some(SessionEvent::Disconnected),
        "gesture_update" => serde_json::from_value::<GestureFrame>(payload.clone())
            .ok()
            .map(SessionEvent::GestureUpdate),
        "aux_update" | "button_update" => serde_json::from_value::<AuxUpdatePayload>(payload.clone())
            .ok()
            .map(|update| SessionEvent::AuxUpdate {
                id: update.button,
                state: SwitchState::from_token(&update.state),
            }),
        "status" | "system_status" => status_value(payload).map(|value| SessionEvent::Status { value }),
        "mode_changed" | "mode_change" => serde_json::from_value::<ModePayload>(payload.clone())
            .ok()
            .and_then(|payload| OperatingMode::from_wire(&payload.mode))
            .map(|mode| SessionEvent::ModeChanged { mode }),
        _ => None,
    }
}

fn failure_reason(payload: &Value) -> String {
    payload
        .as_str()
        .map(str::to_string)
        .or_else(|| {
            payload
                .get("message")
                .and_then(|value| value.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Connection to server failed".to_string())
}

// The status event is a bare JSON string on current backends; older revisions
// wrapped it as {"status": "..."}.
fn status_value(payload: &Value) -> Option<String> {
    payload
        .as_str()
        .map(str::to_string)
        .or_else(|| {
            payload
                .get("status")
                .and_then(|value| value.as_str())
                .map(str::to_string)
        })
}
