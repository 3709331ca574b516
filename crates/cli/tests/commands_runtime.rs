use std::fs;
use std::path::PathBuf;

use myclo_cli::commands::recommend::{self, RecommendArgs};
use myclo_cli::commands::search::{self, SearchArgs};
use myclo_cli::load_config;
use myclo_core::config::{AppConfig, ConfigError};
use myclo_core::WeatherCondition;
use serde_json::Value;
use tempfile::TempDir;

const SCENARIO_CLOSET: &str = r#"
[[items]]
name = "Sweater"
type = "top"
thickness = "thick"

[[items]]
name = "Jeans"
type = "bottom"
thickness = "thick"

[[items]]
name = "Coat"
type = "outer"
"#;

#[test]
fn recommend_cold_sunny_fills_every_slot() {
    let (_dir, closet) = closet_file(SCENARIO_CLOSET);

    let result = recommend::run(&AppConfig::default(), args(&closet, Some("10"), Some("sunny")));
    assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "recommend");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["data"]["band"], "cold");
    assert_eq!(slot_name(&payload, "top"), Some("Sweater"));
    assert_eq!(slot_name(&payload, "bottom"), Some("Jeans"));
    assert_eq!(slot_name(&payload, "outer"), Some("Coat"));
}

#[test]
fn recommend_mild_sunny_leaves_top_and_outer_empty() {
    let (_dir, closet) = closet_file(SCENARIO_CLOSET);

    let result = recommend::run(&AppConfig::default(), args(&closet, Some("20"), Some("sunny")));
    let payload = parse_payload(&result.output);

    assert_eq!(result.exit_code, 0);
    assert_eq!(payload["message"], "1 of 3 slots matched");
    assert_eq!(payload["data"]["suggestion"]["top"], Value::Null);
    assert_eq!(slot_name(&payload, "bottom"), Some("Jeans"));
    assert_eq!(payload["data"]["suggestion"]["outer"], Value::Null);
}

#[test]
fn recommend_mild_rainy_adds_the_coat() {
    let (_dir, closet) = closet_file(SCENARIO_CLOSET);

    let result = recommend::run(&AppConfig::default(), args(&closet, Some("20"), Some("Rainy")));
    let payload = parse_payload(&result.output);

    assert_eq!(payload["data"]["weather"], "rainy");
    assert_eq!(payload["data"]["weather_icon"], "cloud-rain");
    assert_eq!(slot_name(&payload, "outer"), Some("Coat"));
}

#[test]
fn recommend_uses_configured_weather_when_no_temperature_is_given() {
    let (_dir, closet) = closet_file(SCENARIO_CLOSET);
    let mut config = AppConfig::default();
    config.weather.temperature = Some(30);
    config.weather.condition = WeatherCondition::Rainy;

    let result = recommend::run(&config, args(&closet, None, None));
    let payload = parse_payload(&result.output);

    assert_eq!(result.exit_code, 0);
    assert_eq!(payload["data"]["temperature"], 30);
    assert_eq!(payload["data"]["band"], "warm");
    assert_eq!(payload["message"], "0 of 3 slots matched");
}

#[test]
fn recommend_without_any_weather_reports_unavailable() {
    let (_dir, closet) = closet_file(SCENARIO_CLOSET);

    let result = recommend::run(&AppConfig::default(), args(&closet, None, Some("sunny")));
    let payload = parse_payload(&result.output);

    assert_eq!(result.exit_code, 5);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "weather_unavailable");
    assert!(payload["correlation_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(payload["user_message"].is_string());
}

#[test]
fn recommend_rejects_non_integer_temperature() {
    let (_dir, closet) = closet_file(SCENARIO_CLOSET);

    let result = recommend::run(&AppConfig::default(), args(&closet, Some("12.5"), None));
    let payload = parse_payload(&result.output);

    assert_eq!(result.exit_code, 4);
    assert_eq!(payload["error_class"], "invalid_input");
    assert_eq!(
        payload["user_message"],
        "The input could not be accepted. Check it and try again."
    );
}

#[test]
fn recommend_rejects_unknown_weather() {
    let (_dir, closet) = closet_file(SCENARIO_CLOSET);

    let result = recommend::run(&AppConfig::default(), args(&closet, Some("12"), Some("hail")));

    assert_eq!(result.exit_code, 4);
}

#[test]
fn recommend_on_empty_closet_matches_nothing() {
    let (_dir, closet) = closet_file("");

    let result = recommend::run(&AppConfig::default(), args(&closet, Some("-5"), Some("cloudy")));
    let payload = parse_payload(&result.output);

    assert_eq!(result.exit_code, 0);
    for slot in ["top", "bottom", "outer"] {
        assert_eq!(payload["data"]["suggestion"][slot], Value::Null);
    }
}

#[test]
fn invalid_closet_item_is_reported_with_its_position() {
    let (_dir, closet) = closet_file(
        r#"
[[items]]
name = "Tee"
type = "top"
"#,
    );

    let result = recommend::run(&AppConfig::default(), args(&closet, Some("20"), None));
    let payload = parse_payload(&result.output);

    assert_eq!(result.exit_code, 3);
    assert_eq!(payload["error_class"], "closet_file");
    let message = payload["message"].as_str().unwrap_or_default();
    assert!(message.contains("#1"), "unexpected message: {message}");
    assert!(message.contains("thickness is required"), "unexpected message: {message}");
}

#[test]
fn search_returns_exactly_the_coat() {
    let (_dir, closet) = closet_file(SCENARIO_CLOSET);

    let result =
        search::run(&AppConfig::default(), SearchArgs { closet, query: "coat".to_string() });
    let payload = parse_payload(&result.output);

    assert_eq!(result.exit_code, 0);
    let names = item_names(&payload);
    assert_eq!(names, vec!["Coat"]);
    assert_eq!(payload["data"]["items"][0]["type"], "outer");
    assert_eq!(payload["data"]["items"][0]["id"], 3);
}

#[test]
fn empty_search_lists_the_closet_in_file_order() {
    let (_dir, closet) = closet_file(SCENARIO_CLOSET);

    let result = search::run(&AppConfig::default(), SearchArgs { closet, query: String::new() });
    let payload = parse_payload(&result.output);

    assert_eq!(item_names(&payload), vec!["Sweater", "Jeans", "Coat"]);
    assert_eq!(payload["message"], "3 items in closet");
}

#[test]
fn search_resolves_uploaded_images() {
    let (dir, closet) = closet_file(
        r#"
[[items]]
name = "Rain Jacket"
type = "outer"
image = "jacket.png"
"#,
    );
    fs::write(dir.path().join("jacket.png"), b"not really a png").expect("image file");

    let mut config = AppConfig::default();
    config.upload.base_url = "https://img.example.test/closet".to_string();
    let result = search::run(&config, SearchArgs { closet, query: "JACKET".to_string() });
    let payload = parse_payload(&result.output);

    assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);
    let image_ref = payload["data"]["items"][0]["image_ref"].as_str().unwrap_or_default();
    assert!(
        image_ref.starts_with("https://img.example.test/closet/"),
        "unexpected ref: {image_ref}"
    );
}

#[test]
fn empty_image_is_reported_as_an_upload_failure() {
    let (dir, closet) = closet_file(
        r#"
[[items]]
name = "Rain Jacket"
type = "outer"
image = "jacket.png"
"#,
    );
    fs::write(dir.path().join("jacket.png"), b"").expect("image file");

    let result = search::run(&AppConfig::default(), SearchArgs { closet, query: String::new() });
    let payload = parse_payload(&result.output);

    assert_eq!(result.exit_code, 3);
    assert_eq!(payload["error_class"], "closet_file");
    assert!(payload["user_message"].as_str().is_some_and(|text| text.contains("image")));
}

#[test]
fn explicit_config_path_must_exist() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("typo-myclo.toml");

    let error = load_config(Some(missing.clone())).expect_err("missing --config should fail");

    assert!(matches!(error, ConfigError::MissingConfigFile(ref path) if *path == missing));
}

#[test]
fn explicit_config_path_is_loaded() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("myclo.toml");
    fs::write(&path, "[recommendation]\ncold_below = 10\nwarm_from = 20\n").expect("config");

    let config = load_config(Some(path)).expect("config should load");

    assert_eq!(config.recommendation.cold_below, 10);
    assert_eq!(config.recommendation.warm_from, 20);
}

fn args(closet: &PathBuf, temperature: Option<&str>, weather: Option<&str>) -> RecommendArgs {
    RecommendArgs {
        closet: closet.clone(),
        temperature: temperature.map(str::to_string),
        weather: weather.map(str::to_string),
    }
}

fn closet_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("closet.toml");
    fs::write(&path, contents).expect("closet file");
    (dir, path)
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn slot_name<'a>(payload: &'a Value, slot: &str) -> Option<&'a str> {
    payload["data"]["suggestion"][slot]["name"].as_str()
}

fn item_names(payload: &Value) -> Vec<&str> {
    payload["data"]["items"]
        .as_array()
        .map(|items| items.iter().filter_map(|item| item["name"].as_str()).collect())
        .unwrap_or_default()
}
