//! `kite/status` notification
//!
//! Tells the client what to show in its status bar after each
//! (re)registration.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::notification::Notification;

use crate::constants::{error_color, warning_color, StatusColor, KITE_BRANDING};

#[derive(Debug)]
pub enum KiteStatus {}

impl Notification for KiteStatus {
    type Params = StatusParams;
    const METHOD: &'static str = "kite/status";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusParams {
    pub text: String,
    pub tooltip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<StatusColor>,
}

impl StatusParams {
    /// Features registered for `registered` categories
    pub fn ready(registered: usize) -> Self {
        if registered == 0 {
            return Self {
                text: KITE_BRANDING.to_string(),
                tooltip: "All file extensions are disabled".to_string(),
                color: Some(warning_color()),
            };
        }
        Self {
            text: KITE_BRANDING.to_string(),
            tooltip: format!("{} feature(s) registered", registered),
            color: None,
        }
    }

    /// Registration with the client failed
    pub fn error(message: impl Into<String>, theme: Option<&str>) -> Self {
        Self {
            text: KITE_BRANDING.to_string(),
            tooltip: message.into(),
            color: Some(error_color(theme)),
        }
    }
}
