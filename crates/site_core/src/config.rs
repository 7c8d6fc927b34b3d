use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::AsideClosePolicy;
use tracing::warn;

use crate::typing::TypingConfig;

pub const DEFAULT_SETTINGS_FILE: &str = "site.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    /// Viewports narrower than this close the aside after a nav click.
    pub breakpoint_px: u32,
    /// Visible-area ratio at which a card reveals.
    pub reveal_threshold: f64,
    pub aside_close_policy: AsideClosePolicy,
    pub fallback_title: String,
    pub queue_capacity: usize,
    pub typing: TypingConfig,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            breakpoint_px: 1200,
            reveal_threshold: 0.15,
            aside_close_policy: AsideClosePolicy::default(),
            fallback_title: "Project Preview".into(),
            queue_capacity: 256,
            typing: TypingConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    breakpoint_px: Option<u32>,
    reveal_threshold: Option<f64>,
    aside_close_policy: Option<AsideClosePolicy>,
    fallback_title: Option<String>,
    queue_capacity: Option<usize>,
    typing: Option<TypingFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypingFile {
    strings: Option<Vec<String>>,
    type_speed_ms: Option<u32>,
    back_speed_ms: Option<u32>,
    #[serde(rename = "loop")]
    looping: Option<bool>,
}

/// Defaults, then `site.toml` in the working directory, then `FOLIO__*`
/// environment overrides. Never fails; unusable input is skipped.
pub fn load_settings() -> SiteSettings {
    let mut settings = SiteSettings::default();

    if let Ok(raw) = fs::read_to_string(DEFAULT_SETTINGS_FILE) {
        match toml::from_str::<SettingsFile>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(err) => warn!(%err, file = DEFAULT_SETTINGS_FILE, "ignoring unreadable settings file"),
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// Strict variant used when a settings path is given explicitly.
pub fn load_settings_from(path: &Path) -> anyhow::Result<SiteSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let file_cfg: SettingsFile = toml::from_str(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;

    let mut settings = SiteSettings::default();
    apply_file(&mut settings, file_cfg);
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
        .typing
        .validate()
        .with_context(|| format!("invalid typing section in '{}'", path.display()))?;
    validate_threshold(settings.reveal_threshold)
        .with_context(|| format!("invalid reveal_threshold in '{}'", path.display()))?;
    Ok(settings)
}

fn apply_file(settings: &mut SiteSettings, file_cfg: SettingsFile) {
    if let Some(v) = file_cfg.breakpoint_px {
        settings.breakpoint_px = v;
    }
    if let Some(v) = file_cfg.reveal_threshold {
        settings.reveal_threshold = v;
    }
    if let Some(v) = file_cfg.aside_close_policy {
        settings.aside_close_policy = v;
    }
    if let Some(v) = file_cfg.fallback_title {
        settings.fallback_title = v;
    }
    if let Some(v) = file_cfg.queue_capacity {
        settings.queue_capacity = v;
    }
    if let Some(typing) = file_cfg.typing {
        if let Some(v) = typing.strings {
            settings.typing.strings = v;
        }
        if let Some(v) = typing.type_speed_ms {
            settings.typing.type_speed_ms = v;
        }
        if let Some(v) = typing.back_speed_ms {
            settings.typing.back_speed_ms = v;
        }
        if let Some(v) = typing.looping {
            settings.typing.looping = v;
        }
    }
}

pub(crate) fn apply_env_overrides(
    settings: &mut SiteSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = parsed(&lookup, "FOLIO__BREAKPOINT_PX") {
        settings.breakpoint_px = v;
    }
    let threshold: Option<f64> = parsed(&lookup, "FOLIO__REVEAL_THRESHOLD");
    if let Some(v) = threshold {
        if validate_threshold(v).is_ok() {
            settings.reveal_threshold = v;
        } else {
            warn!(value = v, "FOLIO__REVEAL_THRESHOLD outside 0..=1; ignored");
        }
    }
    if let Some(v) = parsed(&lookup, "FOLIO__ASIDE_CLOSE_POLICY") {
        settings.aside_close_policy = v;
    }
    if let Some(v) = parsed(&lookup, "FOLIO__TYPE_SPEED_MS") {
        settings.typing.type_speed_ms = v;
    }
    if let Some(v) = parsed(&lookup, "FOLIO__BACK_SPEED_MS") {
        settings.typing.back_speed_ms = v;
    }
    if let Some(v) = parsed(&lookup, "FOLIO__TYPING_LOOP") {
        settings.typing.looping = v;
    }
    if let Some(v) = parsed(&lookup, "FOLIO__QUEUE_CAPACITY") {
        settings.queue_capacity = v;
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, raw = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

fn validate_threshold(value: f64) -> anyhow::Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&value),
        "reveal threshold {value} must lie within 0..=1"
    );
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
