use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, bail, Context};
use contact_form::FormKeys;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "site.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub form_endpoint: Option<String>,
    pub form_keys: FormKeys,
    pub request_timeout_seconds: u64,
    pub content_path: Option<PathBuf>,
    pub effects_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            form_endpoint: None,
            form_keys: FormKeys::default(),
            request_timeout_seconds: 10,
            content_path: None,
            effects_enabled: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    form_endpoint: Option<String>,
    form_field_name: Option<String>,
    form_field_email: Option<String>,
    form_field_message: Option<String>,
    request_timeout_seconds: Option<u64>,
    content_path: Option<PathBuf>,
    effects_enabled: Option<bool>,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn form_endpoint_url(&self) -> anyhow::Result<Url> {
        let raw = self
            .form_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "no form endpoint configured; set form_endpoint in {DEFAULT_CONFIG_PATH} or APP__FORM_ENDPOINT"
                )
            })?;

        let url = Url::parse(raw).with_context(|| format!("invalid form endpoint '{raw}'"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("form endpoint must be http or https, got '{}'", url.scheme());
        }
        Ok(url)
    }
}

pub fn load_settings(config_path: &Path) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if config_path.exists() {
        let raw = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config '{}'", config_path.display()))?;
        let file_cfg: FileSettings = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config '{}'", config_path.display()))?;
        apply_file(&mut settings, file_cfg);
    }

    if let Some(v) = env("SITE_FORM_ENDPOINT") {
        settings.form_endpoint = Some(v);
    }
    if let Some(v) = env("APP__FORM_ENDPOINT") {
        settings.form_endpoint = Some(v);
    }

    if let Some(v) = env("APP__FORM_FIELD_NAME") {
        settings.form_keys.name = v;
    }
    if let Some(v) = env("APP__FORM_FIELD_EMAIL") {
        settings.form_keys.email = v;
    }
    if let Some(v) = env("APP__FORM_FIELD_MESSAGE") {
        settings.form_keys.message = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECONDS") {
        settings.request_timeout_seconds = v
            .parse()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECONDS is not a number: '{v}'"))?;
    }

    if let Some(v) = env("APP__CONTENT_PATH") {
        settings.content_path = Some(PathBuf::from(v));
    }

    if let Some(v) = env("APP__EFFECTS_ENABLED") {
        settings.effects_enabled = parse_flag(&v)
            .ok_or_else(|| anyhow!("APP__EFFECTS_ENABLED must be true or false, got '{v}'"))?;
    }

    if settings.request_timeout_seconds == 0 {
        bail!("request_timeout_seconds must be greater than zero");
    }

    Ok(settings)
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.form_endpoint {
        settings.form_endpoint = Some(v);
    }
    if let Some(v) = file_cfg.form_field_name {
        settings.form_keys.name = v;
    }
    if let Some(v) = file_cfg.form_field_email {
        settings.form_keys.email = v;
    }
    if let Some(v) = file_cfg.form_field_message {
        settings.form_keys.message = v;
    }
    if let Some(v) = file_cfg.request_timeout_seconds {
        settings.request_timeout_seconds = v;
    }
    if let Some(v) = file_cfg.content_path {
        settings.content_path = Some(v);
    }
    if let Some(v) = file_cfg.effects_enabled {
        settings.effects_enabled = v;
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
