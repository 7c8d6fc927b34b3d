//! Configuration glue for the external typing-effect widget.

use serde::{Deserialize, Serialize};

use crate::error::TypingConfigError;

/// Element the widget is mounted on.
pub const TYPING_SELECTOR: &str = ".typing";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingConfig {
    pub strings: Vec<String>,
    pub type_speed_ms: u32,
    pub back_speed_ms: u32,
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            strings: [" ", "Web Designer", "Web Developer", "App Developer"]
                .into_iter()
                .map(String::from)
                .collect(),
            type_speed_ms: 100,
            back_speed_ms: 60,
            looping: true,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WidgetOptions<'a> {
    strings: &'a [String],
    type_speed: u32,
    back_speed: u32,
    #[serde(rename = "loop")]
    looping: bool,
}

impl TypingConfig {
    pub fn validate(&self) -> Result<(), TypingConfigError> {
        if self.strings.is_empty() {
            return Err(TypingConfigError::NoStrings);
        }
        if self.type_speed_ms == 0 {
            return Err(TypingConfigError::ZeroSpeed {
                field: "type_speed_ms",
            });
        }
        if self.back_speed_ms == 0 {
            return Err(TypingConfigError::ZeroSpeed {
                field: "back_speed_ms",
            });
        }
        Ok(())
    }

    /// Options object in the shape the widget constructor expects.
    pub fn widget_options(&self) -> serde_json::Value {
        serde_json::to_value(WidgetOptions {
            strings: &self.strings,
            type_speed: self.type_speed_ms,
            back_speed: self.back_speed_ms,
            looping: self.looping,
        })
        .unwrap_or_default()
    }
}

/// The typing-effect widget lives outside this crate; it only receives
/// its configuration.
pub trait TypingWidget {
    fn mount(&mut self, selector: &str, config: &TypingConfig);
}
