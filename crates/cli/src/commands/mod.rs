pub mod config;
pub mod recommend;
pub mod search;

use myclo_core::{ApplicationError, DomainError, UploadError, ValidationError};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: impl Into<Option<Value>>,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            user_message: None,
            correlation_id: None,
            data: data.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            user_message: None,
            correlation_id: None,
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Failure carrying the interface mapping of an application error:
    /// the user-safe message and the correlation id travel with the payload.
    pub fn application_failure(
        command: &str,
        correlation_id: &str,
        message: impl Into<String>,
        error: ApplicationError,
    ) -> Self {
        let (error_class, exit_code) = classify(&error);
        let interface = error.into_interface(correlation_id);
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            user_message: Some(interface.user_message().to_string()),
            correlation_id: Some(interface.correlation_id().to_string()),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Closet file failures; validation and upload errors are recovered from
    /// the context chain, read and parse errors stay plain `closet_file`.
    pub fn closet_failure(command: &str, correlation_id: &str, error: anyhow::Error) -> Self {
        let message = format!("{error:#}");
        let application = if let Some(upload) = error.downcast_ref::<UploadError>() {
            Some(ApplicationError::Upload(upload.clone()))
        } else {
            error.downcast_ref::<ValidationError>().cloned().map(ApplicationError::from)
        };

        match application {
            Some(application) => {
                Self::application_failure(command, correlation_id, message, application)
            }
            None => Self::failure(command, "closet_file", message, 3),
        }
    }
}

fn classify(error: &ApplicationError) -> (&'static str, u8) {
    match error {
        ApplicationError::Configuration(_) => ("config_validation", 2),
        ApplicationError::Domain(DomainError::Validation(_)) | ApplicationError::Upload(_) => {
            ("closet_file", 3)
        }
        ApplicationError::Domain(DomainError::InvalidInput(_) | DomainError::UnknownItem(_)) => {
            ("invalid_input", 4)
        }
        ApplicationError::WeatherUnavailable(_) => ("weather_unavailable", 5),
    }
}

pub(crate) fn current_thread_runtime(
    command: &str,
) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            1,
        )
    })
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        let message = error.to_string().replace('\\', "\\\\").replace('"', "\\\"");
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\
             \"error_class\":\"serialization\",\"message\":\"{message}\"}}"
        )
    })
}
