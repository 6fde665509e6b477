//! Presentation constants shared with the client

use serde::{Deserialize, Serialize};

/// Colour for warning-level status text
pub const WARNING_COLOR: &str = "#929497";

/// Colour for error-level status text on high-contrast themes
pub const HIGH_CONTRAST_ERROR_COLOR: &str = "#ff0000";

/// Theme colour id used for error-level status text otherwise
pub const ERROR_THEME_COLOR: &str = "editorWarning.foreground";

/// Status bar label
pub const KITE_BRANDING: &str = " 𝕜𝕚𝕥𝕖 ";

/// Position encoding the server speaks
pub const OFFSET_ENCODING: &str = "utf-16";

/// A status colour, either a literal hex value or a theme colour id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum StatusColor {
    Hex(String),
    Themed(String),
}

/// Colour for error-level status text under `theme`.
///
/// `editorWarning.foreground` renders invisibly on the high contrast
/// themes, so those get a literal red. No theme counts as not high contrast.
pub fn error_color(theme: Option<&str>) -> StatusColor {
    match theme {
        Some(name) if name.contains("High Contrast") => {
            StatusColor::Hex(HIGH_CONTRAST_ERROR_COLOR.to_string())
        }
        _ => StatusColor::Themed(ERROR_THEME_COLOR.to_string()),
    }
}

pub fn warning_color() -> StatusColor {
    StatusColor::Hex(WARNING_COLOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_color() {
        assert_eq!(
            error_color(Some("Default High Contrast")),
            StatusColor::Hex("#ff0000".to_string())
        );
        assert_eq!(
            error_color(Some("Default Dark+")),
            StatusColor::Themed("editorWarning.foreground".to_string())
        );
        assert_eq!(
            error_color(None),
            StatusColor::Themed("editorWarning.foreground".to_string())
        );
    }

    #[test]
    fn test_status_color_serialization() {
        let json = serde_json::to_value(warning_color()).expect("serialize");
        assert_eq!(json, serde_json::json!({ "kind": "hex", "value": "#929497" }));
    }
}
