//! Blocking HTTP implementation of the command surface.
//!
//! All timeout logic lives here at construction time; the sync controller has
//! none of its own. Responses beyond the start acknowledgement are not
//! consumed past status checking.

use gesturedash_core::{DashError, Result};
use gesturedash_protocol::{
    DetectionSettings, ModeRequest, OperatingMode, SettingsRequest, StartAck, FORCE_CLEANUP_PATH,
    SET_MODE_PATH, START_DETECTION_PATH, STOP_DETECTION_PATH, UPDATE_SETTINGS_PATH,
};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use crate::commands::CommandTransport;

const DEFAULT_TIMEOUT_MS: u64 = 5_000;

pub struct HttpCommands {
    client: Client,
    base_url: String,
}

impl HttpCommands {
    /// Builds a transport against the backend base URL (e.g.
    /// `http://localhost:5001`) with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| transport_error("client", err))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn post_json<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<reqwest::blocking::Response> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .map_err(|err| transport_error(path, err))?;
        response
            .error_for_status()
            .map_err(|err| transport_error(path, err))
    }
}

impl CommandTransport for HttpCommands {
    fn start_detection(&self, settings: &DetectionSettings) -> Result<StartAck> {
        let response = self.post_json(
            START_DETECTION_PATH,
            &SettingsRequest {
                settings: *settings,
            },
        )?;
        response
            .json::<StartAck>()
            .map_err(|err| transport_error(START_DETECTION_PATH, err))
    }

    fn stop_detection(&self) -> Result<()> {
        self.post_json(STOP_DETECTION_PATH, &serde_json::json!({}))?;
        Ok(())
    }

    fn update_settings(&self, settings: &DetectionSettings) -> Result<()> {
        self.post_json(
            UPDATE_SETTINGS_PATH,
            &SettingsRequest {
                settings: *settings,
            },
        )?;
        Ok(())
    }

    fn set_mode(&self, mode: OperatingMode) -> Result<()> {
        let response = self.post_json(SET_MODE_PATH, &ModeRequest::new(mode))?;
        // Body is not consumed beyond logging.
        debug!(status = %response.status(), mode = mode.as_wire(), "set_mode acknowledged");
        Ok(())
    }

    fn force_disconnect(&self) -> Result<()> {
        self.post_json(FORCE_CLEANUP_PATH, &serde_json::json!({}))?;
        Ok(())
    }
}

fn transport_error(command: &str, err: reqwest::Error) -> DashError {
    DashError::Transport {
        command: command.to_string(),
        details: err.to_string(),
    }
}
