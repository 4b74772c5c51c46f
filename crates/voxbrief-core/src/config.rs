use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoxbriefError};
use crate::templates::Templates;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300; // ceiling for one inference call
pub const DEFAULT_TYPING_INTERVAL_SECS: u64 = 4; // Telegram chat actions expire after ~5s
pub const DEFAULT_INFERENCE_PORT: u16 = 8000;
pub const DEFAULT_INFERENCE_BIND: &str = "0.0.0.0";
pub const DEFAULT_SUMMARY_MIN_WORDS: usize = 20;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024; // Telegram bots download at most 20 MB

/// Plain environment variables read without the `VOXBRIEF_` prefix.
const BOT_ENV_VARS: [&str; 2] = ["BOT_TOKEN", "ML_SERVER_URL"];

/// Top-level config (voxbrief.toml + VOXBRIEF_* env overrides + BOT_TOKEN/ML_SERVER_URL).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoxbriefConfig {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub templates: Templates,
    #[serde(default)]
    pub inference: InferenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token. Also read from `BOT_TOKEN`.
    pub bot_token: Option<String>,
    /// Base URL of the inference service. Also read from `ML_SERVER_URL`.
    /// Unset disables the media relay.
    pub ml_server_url: Option<String>,
    /// Where downloaded media is kept while it is relayed. Defaults to the
    /// system temp dir.
    pub scratch_dir: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_typing_interval_secs")]
    pub typing_interval_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            ml_server_url: None,
            scratch_dir: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            typing_interval_secs: DEFAULT_TYPING_INTERVAL_SECS,
        }
    }
}

impl BotConfig {
    /// The bot token, or `MissingSetting` when unset or blank.
    pub fn bot_token(&self) -> Result<&str> {
        non_blank(self.bot_token.as_deref())
            .ok_or(VoxbriefError::MissingSetting { name: "BOT_TOKEN" })
    }

    /// Inference base URL without a trailing slash. `None` when unset or blank.
    pub fn ml_server_url(&self) -> Option<&str> {
        non_blank(self.ml_server_url.as_deref()).map(|url| url.trim_end_matches('/'))
    }

    pub fn scratch_dir(&self) -> PathBuf {
        non_blank(self.scratch_dir.as_deref())
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn typing_interval(&self) -> Duration {
        Duration::from_secs(self.typing_interval_secs.max(1))
    }
}

/// Settings for the inference HTTP service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_inference_bind")]
    pub bind: String,
    #[serde(default = "default_inference_port")]
    pub port: u16,
    /// Request body cap for `POST /process`.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub summary: SummaryPolicy,
    /// Speech-to-text backend (OpenAI-compatible `/v1/audio/transcriptions`).
    #[serde(default)]
    pub transcriber: BackendConfig,
    /// Summarization backend (OpenAI-compatible `/v1/chat/completions`).
    #[serde(default)]
    pub summarizer: BackendConfig,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            bind: default_inference_bind(),
            port: default_inference_port(),
            max_upload_bytes: default_max_upload_bytes(),
            summary: SummaryPolicy::default(),
            transcriber: BackendConfig::default(),
            summarizer: BackendConfig::default(),
        }
    }
}

/// When and how a transcript is summarized.
///
/// Transcripts shorter than `min_words` words stand in as their own summary.
/// `max_length` / `min_length` bound the generated summary, in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPolicy {
    pub min_words: usize,
    pub max_length: u32,
    pub min_length: u32,
}

impl Default for SummaryPolicy {
    fn default() -> Self {
        Self {
            min_words: DEFAULT_SUMMARY_MIN_WORDS,
            max_length: 150,
            min_length: 30,
        }
    }
}

/// One model backend. A backend without `base_url` is not loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// Falls back to the backend's own default model when unset.
    pub model: Option<String>,
}

impl BackendConfig {
    pub fn base_url(&self) -> Option<&str> {
        non_blank(self.base_url.as_deref()).map(|url| url.trim_end_matches('/'))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_typing_interval_secs() -> u64 {
    DEFAULT_TYPING_INTERVAL_SECS
}
fn default_inference_bind() -> String {
    DEFAULT_INFERENCE_BIND.to_string()
}
fn default_inference_port() -> u16 {
    DEFAULT_INFERENCE_PORT
}
fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl VoxbriefConfig {
    /// Load config from a TOML file with env var overrides.
    ///
    /// Precedence, lowest first:
    ///   1. Built-in defaults
    ///   2. The TOML file (explicit path, else ~/.voxbrief/voxbrief.toml); a missing file is skipped
    ///   3. `VOXBRIEF_*` env vars, nested with `__` (e.g. `VOXBRIEF_INFERENCE__PORT`)
    ///   4. `BOT_TOKEN` and `ML_SERVER_URL`
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        Self::extract(Figment::new().merge(Toml::file(&path)))
    }

    /// Config from env vars alone. Used when the TOML file is unreadable.
    pub fn from_env() -> Result<Self> {
        Self::extract(Figment::new())
    }

    /// `load`, falling back to defaults plus env when the file cannot be
    /// read or parsed. `on_error` sees the load failure before the fallback.
    pub fn load_or_env(config_path: Option<&str>, on_error: impl FnOnce(&VoxbriefError)) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            on_error(&e);
            Self::from_env().unwrap_or_default()
        })
    }

    fn extract(base: Figment) -> Result<Self> {
        base.merge(Env::prefixed("VOXBRIEF_").split("__"))
            .merge(
                Env::raw()
                    .only(&BOT_ENV_VARS)
                    .map(|key| format!("bot.{key}").into()),
            )
            .extract()
            .map_err(|e| VoxbriefError::Config(e.to_string()))
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.voxbrief/voxbrief.toml", home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_any_source() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let cfg = VoxbriefConfig::load(Some("absent.toml")).map_err(|e| e.to_string())?;
            assert!(cfg.bot.bot_token().is_err());
            assert!(cfg.bot.ml_server_url().is_none());
            assert_eq!(cfg.bot.request_timeout(), Duration::from_secs(300));
            assert_eq!(cfg.inference.port, 8000);
            assert_eq!(cfg.inference.summary.min_words, 20);
            Ok(())
        });
    }

    #[test]
    fn plain_env_vars_fill_bot_section() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("BOT_TOKEN", "123:abc");
            jail.set_env("ML_SERVER_URL", "http://ml:8000/");
            let cfg = VoxbriefConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(cfg.bot.bot_token().map_err(|e| e.to_string())?, "123:abc");
            assert_eq!(cfg.bot.ml_server_url(), Some("http://ml:8000"));
            Ok(())
        });
    }

    #[test]
    fn blank_env_values_count_as_unset() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("BOT_TOKEN", "  ");
            jail.set_env("ML_SERVER_URL", "");
            let cfg = VoxbriefConfig::from_env().map_err(|e| e.to_string())?;
            assert!(cfg.bot.bot_token().is_err());
            assert!(cfg.bot.ml_server_url().is_none());
            Ok(())
        });
    }

    #[test]
    fn toml_file_then_env_overrides() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "voxbrief.toml",
                r#"
                [bot]
                ml_server_url = "http://from-file:8000"
                request_timeout_secs = 30

                [templates]
                echo = "echo: {text}"

                [inference.summary]
                min_words = 5

                [inference.transcriber]
                base_url = "http://whisper:9000"
                "#,
            )?;
            jail.set_env("ML_SERVER_URL", "http://from-env:8000");
            jail.set_env("VOXBRIEF_INFERENCE__PORT", "9001");

            let cfg = VoxbriefConfig::load(Some("voxbrief.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.bot.ml_server_url(), Some("http://from-env:8000"));
            assert_eq!(cfg.bot.request_timeout_secs, 30);
            assert_eq!(cfg.templates.render_echo("x"), "echo: x");
            assert_eq!(cfg.inference.summary.min_words, 5);
            assert_eq!(cfg.inference.summary.max_length, 150);
            assert_eq!(cfg.inference.port, 9001);
            assert_eq!(cfg.inference.transcriber.base_url(), Some("http://whisper:9000"));
            assert!(cfg.inference.summarizer.base_url().is_none());
            Ok(())
        });
    }

    #[test]
    fn unreadable_file_falls_back_to_env() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("voxbrief.toml", "[bot\nbroken = ")?;
            jail.set_env("VOXBRIEF_INFERENCE__PORT", "9100");
            jail.set_env("ML_SERVER_URL", "http://ml:8000");

            let mut failed = false;
            let cfg = VoxbriefConfig::load_or_env(Some("voxbrief.toml"), |e| {
                failed = e.code() == "CONFIG_ERROR";
            });
            assert!(failed);
            assert_eq!(cfg.inference.port, 9100);
            assert_eq!(cfg.bot.ml_server_url(), Some("http://ml:8000"));
            Ok(())
        });
    }

    #[test]
    fn scratch_dir_defaults_to_temp_dir() {
        let bot = BotConfig::default();
        assert_eq!(bot.scratch_dir(), std::env::temp_dir());

        let bot = BotConfig {
            scratch_dir: Some("/var/tmp/voxbrief".into()),
            ..BotConfig::default()
        };
        assert_eq!(bot.scratch_dir(), PathBuf::from("/var/tmp/voxbrief"));
    }
}
