use std::path::PathBuf;

use myclo_core::config::AppConfig;
use myclo_core::{
    ApplicationError, Conditions, DeterministicRecommendationEngine, DigestImageUploader,
    StaticWeatherProvider, UnavailableWeatherProvider, WardrobeSession, WeatherCondition,
    WeatherError, WeatherProvider, WeatherReading,
};
use serde_json::json;

use crate::closet_file;
use crate::commands::{current_thread_runtime, CommandResult};

const COMMAND: &str = "recommend";

#[derive(Clone, Debug)]
pub struct RecommendArgs {
    pub closet: PathBuf,
    pub temperature: Option<String>,
    pub weather: Option<String>,
}

pub fn run(config: &AppConfig, args: RecommendArgs) -> CommandResult {
    let bands = match config.recommendation.bands() {
        Ok(bands) => bands,
        Err(error) => {
            let correlation_id = uuid::Uuid::new_v4().to_string();
            let message = error.to_string();
            let error = ApplicationError::Configuration(message.clone());
            return CommandResult::application_failure(COMMAND, &correlation_id, message, error);
        }
    };
    let mut session = WardrobeSession::new(DeterministicRecommendationEngine::new(bands));
    let correlation_id = session.session_id().to_string();
    let fail = |message: String, error: ApplicationError| {
        CommandResult::application_failure(COMMAND, &correlation_id, message, error)
    };

    let runtime = match current_thread_runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let uploader = DigestImageUploader::new(&config.upload.base_url, config.upload.max_bytes);
    let inputs = match runtime.block_on(closet_file::read_inputs(&args.closet, &uploader)) {
        Ok(inputs) => inputs,
        Err(error) => return CommandResult::closet_failure(COMMAND, &correlation_id, error),
    };

    for (index, input) in inputs.into_iter().enumerate() {
        if let Err(error) = session.add_item(input) {
            let message = format!("closet item #{} is invalid: {error}", index + 1);
            return fail(message, error.into());
        }
    }

    let reading = match weather_reading(config, &args, &runtime) {
        Ok(reading) => reading,
        Err(ApplicationError::WeatherUnavailable(weather)) => {
            let message = format!("{} ({weather})", weather.user_message());
            return fail(message, weather.into());
        }
        Err(error) => return fail(error.to_string(), error),
    };
    session.apply_weather(Ok(reading));

    let suggestion = match session.suggest() {
        Ok(suggestion) => suggestion,
        Err(error) => return fail(error.to_string(), error),
    };

    let matched = suggestion.filled().count();
    CommandResult::success_with_data(
        COMMAND,
        format!("{matched} of 3 slots matched"),
        json!({
            "temperature": reading.temperature,
            "weather": reading.condition.as_str(),
            "weather_icon": reading.condition.icon(),
            "band": bands.classify(reading.temperature),
            "suggestion": suggestion,
        }),
    )
}

/// Explicit `--temp` wins over the configured provider; `--weather` overrides
/// the condition either way, the same way a user picks a condition by hand.
fn weather_reading(
    config: &AppConfig,
    args: &RecommendArgs,
    runtime: &tokio::runtime::Runtime,
) -> Result<WeatherReading, ApplicationError> {
    let override_condition =
        args.weather.as_deref().map(str::parse::<WeatherCondition>).transpose()?;

    if let Some(temperature) = args.temperature.as_deref() {
        let weather = override_condition.unwrap_or(config.weather.condition);
        let conditions = Conditions::parse(temperature, weather.as_str())?;
        return Ok(WeatherReading::new(conditions.temperature, conditions.weather));
    }

    let reading = match config.weather.reading() {
        Some(reading) => runtime.block_on(StaticWeatherProvider::new(reading).current())?,
        None => runtime.block_on(
            UnavailableWeatherProvider::new(WeatherError::FetchFailed(
                "no weather reading configured; pass --temp or set weather.temperature"
                    .to_string(),
            ))
            .current(),
        )?,
    };

    Ok(match override_condition {
        Some(condition) => WeatherReading::new(reading.temperature, condition),
        None => reading,
    })
}
