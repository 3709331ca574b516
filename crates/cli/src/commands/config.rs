use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use myclo_core::config::AppConfig;
use toml::Value;

/// Renders the effective configuration with the source of each value.
pub fn run(config: &AppConfig, explicit_path: Option<&Path>) -> String {
    let config_file_path = detect_config_path(explicit_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines =
        vec!["effective config (source precedence: override > env > file > default):".to_string()];

    lines.push(render_line(
        "recommendation.cold_below",
        &config.recommendation.cold_below.to_string(),
        source("recommendation.cold_below", &["MYCLO_RECOMMENDATION_COLD_BELOW"]),
    ));
    lines.push(render_line(
        "recommendation.warm_from",
        &config.recommendation.warm_from.to_string(),
        source("recommendation.warm_from", &["MYCLO_RECOMMENDATION_WARM_FROM"]),
    ));

    let temperature = config
        .weather
        .temperature
        .map(|value| format!("{value}°C"))
        .unwrap_or_else(|| "<unset>".to_string());
    lines.push(render_line(
        "weather.temperature",
        &temperature,
        source("weather.temperature", &["MYCLO_WEATHER_TEMPERATURE"]),
    ));
    lines.push(render_line(
        "weather.condition",
        config.weather.condition.as_str(),
        source("weather.condition", &["MYCLO_WEATHER_CONDITION"]),
    ));

    lines.push(render_line(
        "upload.base_url",
        &config.upload.base_url,
        source("upload.base_url", &["MYCLO_UPLOAD_BASE_URL"]),
    ));
    lines.push(render_line(
        "upload.max_bytes",
        &config.upload.max_bytes.to_string(),
        source("upload.max_bytes", &["MYCLO_UPLOAD_MAX_BYTES"]),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", &["MYCLO_LOGGING_LEVEL", "MYCLO_LOG_LEVEL"]),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", &["MYCLO_LOGGING_FORMAT", "MYCLO_LOG_FORMAT"]),
    ));

    lines.join("\n")
}

fn detect_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then(|| path.to_path_buf());
    }

    let root = PathBuf::from("myclo.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/myclo.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    // Same precedence and blank filtering as the loader's env overrides.
    if let Some(env_key) = env_keys.iter().find(|key| env_value_is_set(key)) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn env_value_is_set(key: &str) -> bool {
    env::var(key).is_ok_and(|value| !value.trim().is_empty())
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
