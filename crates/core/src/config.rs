use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::domain::weather::{WeatherCondition, WeatherReading};
use crate::recommend::bands::{TemperatureBands, DEFAULT_COLD_BELOW, DEFAULT_WARM_FROM};

pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub recommendation: RecommendationConfig,
    pub weather: WeatherConfig,
    pub upload: UploadConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct RecommendationConfig {
    pub cold_below: i32,
    pub warm_from: i32,
}

#[derive(Clone, Debug)]
pub struct WeatherConfig {
    pub temperature: Option<i32>,
    pub condition: WeatherCondition,
}

#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub base_url: String,
    pub max_bytes: usize,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub cold_below: Option<i32>,
    pub warm_from: Option<i32>,
    pub weather_temperature: Option<i32>,
    pub weather_condition: Option<WeatherCondition>,
    pub upload_base_url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recommendation: RecommendationConfig {
                cold_below: DEFAULT_COLD_BELOW,
                warm_from: DEFAULT_WARM_FROM,
            },
            weather: WeatherConfig { temperature: None, condition: WeatherCondition::Sunny },
            upload: UploadConfig {
                base_url: "myclo://images".to_string(),
                max_bytes: 10 * 1024 * 1024,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl RecommendationConfig {
    pub fn bands(&self) -> Result<TemperatureBands, ConfigError> {
        TemperatureBands::new(self.cold_below, self.warm_from).ok_or_else(|| {
            ConfigError::Validation(format!(
                "recommendation.cold_below ({}) must be lower than recommendation.warm_from ({})",
                self.cold_below, self.warm_from
            ))
        })
    }
}

impl WeatherConfig {
    /// Reading for the static weather provider, if a temperature is configured.
    pub fn reading(&self) -> Option<WeatherReading> {
        self.temperature.map(|temperature| WeatherReading::new(temperature, self.condition))
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("myclo.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(recommendation) = patch.recommendation {
            if let Some(cold_below) = recommendation.cold_below {
                self.recommendation.cold_below = cold_below;
            }
            if let Some(warm_from) = recommendation.warm_from {
                self.recommendation.warm_from = warm_from;
            }
        }

        if let Some(weather) = patch.weather {
            if let Some(temperature) = weather.temperature {
                self.weather.temperature = Some(temperature);
            }
            if let Some(condition) = weather.condition {
                self.weather.condition = condition;
            }
        }

        if let Some(upload) = patch.upload {
            if let Some(base_url) = upload.base_url {
                self.upload.base_url = base_url;
            }
            if let Some(max_bytes) = upload.max_bytes {
                self.upload.max_bytes = max_bytes;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("MYCLO_RECOMMENDATION_COLD_BELOW") {
            self.recommendation.cold_below = parse_i32("MYCLO_RECOMMENDATION_COLD_BELOW", &value)?;
        }
        if let Some(value) = read_env("MYCLO_RECOMMENDATION_WARM_FROM") {
            self.recommendation.warm_from = parse_i32("MYCLO_RECOMMENDATION_WARM_FROM", &value)?;
        }

        if let Some(value) = read_env("MYCLO_WEATHER_TEMPERATURE") {
            self.weather.temperature = Some(parse_i32("MYCLO_WEATHER_TEMPERATURE", &value)?);
        }
        if let Some(value) = read_env("MYCLO_WEATHER_CONDITION") {
            self.weather.condition =
                value.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                    key: "MYCLO_WEATHER_CONDITION".to_string(),
                    value: value.clone(),
                })?;
        }

        if let Some(value) = read_env("MYCLO_UPLOAD_BASE_URL") {
            self.upload.base_url = value;
        }
        if let Some(value) = read_env("MYCLO_UPLOAD_MAX_BYTES") {
            self.upload.max_bytes = parse_usize("MYCLO_UPLOAD_MAX_BYTES", &value)?;
        }

        let log_level = read_env("MYCLO_LOGGING_LEVEL").or_else(|| read_env("MYCLO_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format = read_env("MYCLO_LOGGING_FORMAT").or_else(|| read_env("MYCLO_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(cold_below) = overrides.cold_below {
            self.recommendation.cold_below = cold_below;
        }
        if let Some(warm_from) = overrides.warm_from {
            self.recommendation.warm_from = warm_from;
        }
        if let Some(temperature) = overrides.weather_temperature {
            self.weather.temperature = Some(temperature);
        }
        if let Some(condition) = overrides.weather_condition {
            self.weather.condition = condition;
        }
        if let Some(base_url) = overrides.upload_base_url {
            self.upload.base_url = base_url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.recommendation.bands()?;
        validate_upload(&self.upload)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("myclo.toml"), PathBuf::from("config/myclo.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_upload(upload: &UploadConfig) -> Result<(), ConfigError> {
    if upload.base_url.trim().is_empty() {
        return Err(ConfigError::Validation("upload.base_url must not be empty".to_string()));
    }

    if upload.max_bytes == 0 || upload.max_bytes > MAX_UPLOAD_BYTES {
        return Err(ConfigError::Validation(format!(
            "upload.max_bytes must be in range 1..={MAX_UPLOAD_BYTES}"
        )));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_i32(key: &str, value: &str) -> Result<i32, ConfigError> {
    value.trim().parse::<i32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    recommendation: Option<RecommendationPatch>,
    weather: Option<WeatherPatch>,
    upload: Option<UploadPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationPatch {
    cold_below: Option<i32>,
    warm_from: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct WeatherPatch {
    temperature: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_parsed")]
    condition: Option<WeatherCondition>,
}

#[derive(Debug, Default, Deserialize)]
struct UploadPatch {
    base_url: Option<String>,
    max_bytes: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    #[serde(default, deserialize_with = "deserialize_parsed")]
    format: Option<LogFormat>,
}

/// File values go through the same `FromStr` as env overrides.
fn deserialize_parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Option::<String>::deserialize(deserializer)?
        .map(|value| value.parse().map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
    use crate::domain::weather::{WeatherCondition, WeatherReading};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    const MYCLO_VARS: &[&str] = &[
        "MYCLO_RECOMMENDATION_COLD_BELOW",
        "MYCLO_RECOMMENDATION_WARM_FROM",
        "MYCLO_WEATHER_TEMPERATURE",
        "MYCLO_WEATHER_CONDITION",
        "MYCLO_UPLOAD_BASE_URL",
        "MYCLO_UPLOAD_MAX_BYTES",
        "MYCLO_LOGGING_LEVEL",
        "MYCLO_LOG_LEVEL",
        "MYCLO_LOGGING_FORMAT",
        "MYCLO_LOG_FORMAT",
    ];

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_match_the_standard_bands() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(MYCLO_VARS);

        let config = AppConfig::load(LoadOptions {
            config_path: Some("does-not-exist.toml".into()),
            ..LoadOptions::default()
        })
        .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.recommendation.cold_below == 15, "cold band should start below 15")?;
        ensure(config.recommendation.warm_from == 25, "warm band should start at 25")?;
        ensure(config.weather.reading().is_none(), "no static reading without a temperature")?;
        ensure(matches!(config.logging.format, LogFormat::Compact), "compact logging by default")
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(MYCLO_VARS);
        env::set_var("TEST_MYCLO_IMAGE_HOST", "https://cdn.example.test");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("myclo.toml");
            fs::write(
                &path,
                r#"
[upload]
base_url = "${TEST_MYCLO_IMAGE_HOST}/closet"

[weather]
temperature = 18
condition = "rainy"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.upload.base_url == "https://cdn.example.test/closet",
                "upload base url should be interpolated from environment",
            )?;
            ensure(
                config.weather.reading() == Some(WeatherReading::new(18, WeatherCondition::Rainy)),
                "static weather reading should come from the file",
            )
        })();

        clear_vars(&["TEST_MYCLO_IMAGE_HOST"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(MYCLO_VARS);
        env::set_var("MYCLO_RECOMMENDATION_WARM_FROM", "28");
        env::set_var("MYCLO_LOG_FORMAT", "json");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("myclo.toml");
            fs::write(
                &path,
                r#"
[recommendation]
cold_below = 12
warm_from = 26

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.recommendation.cold_below == 12, "file value should beat default")?;
            ensure(config.recommendation.warm_from == 28, "env value should beat file")?;
            ensure(config.logging.level == "debug", "override should beat file")?;
            ensure(matches!(config.logging.format, LogFormat::Json), "log format alias from env")
        })();

        clear_vars(MYCLO_VARS);
        result
    }

    #[test]
    fn inverted_bands_fail_validation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(MYCLO_VARS);

        let error = match AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                cold_below: Some(25),
                warm_from: Some(15),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }) {
            Ok(_) => {
                return Err("expected validation failure but config load succeeded".to_string())
            }
            Err(error) => error,
        };

        ensure(
            matches!(
                error,
                ConfigError::Validation(ref message)
                    if message.contains("recommendation.cold_below")
            ),
            "validation failure should mention recommendation.cold_below",
        )
    }

    #[test]
    fn malformed_env_override_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(MYCLO_VARS);
        env::set_var("MYCLO_WEATHER_CONDITION", "snowy");

        let result = match AppConfig::load(LoadOptions::default()) {
            Ok(_) => Err("snowy should not be accepted".to_string()),
            Err(error) => ensure(
                matches!(
                    error,
                    ConfigError::InvalidEnvOverride { ref key, .. }
                        if key == "MYCLO_WEATHER_CONDITION"
                ),
                "invalid weather override should name the variable",
            ),
        };

        clear_vars(MYCLO_VARS);
        result
    }

    #[test]
    fn required_file_must_exist() {
        let error = AppConfig::load(LoadOptions {
            config_path: Some("missing/myclo.toml".into()),
            require_file: true,
            ..LoadOptions::default()
        })
        .expect_err("missing file should fail");

        assert!(matches!(error, ConfigError::MissingConfigFile(_)));
    }

    #[test]
    fn file_enum_values_parse_case_insensitively() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(MYCLO_VARS);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("myclo.toml");
        fs::write(
            &path,
            r#"
[weather]
temperature = 9
condition = "Rainy"

[logging]
format = "JSON"
"#,
        )
        .map_err(|err| err.to_string())?;

        let config =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.weather.condition == WeatherCondition::Rainy, "condition should parse")?;
        ensure(matches!(config.logging.format, LogFormat::Json), "format should parse")
    }

    #[test]
    fn unknown_file_condition_is_a_parse_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(MYCLO_VARS);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("myclo.toml");
        fs::write(&path, "[weather]\ncondition = \"snowy\"\n").map_err(|err| err.to_string())?;

        match AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() }) {
            Ok(_) => Err("snowy should not be accepted from the file".to_string()),
            Err(error) => ensure(
                matches!(error, ConfigError::ParseFile { .. }),
                "unknown condition should fail file parsing",
            ),
        }
    }
}
