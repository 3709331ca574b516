use thiserror::Error;

use crate::collaborators::{UploadError, WeatherError};
use crate::domain::item::{ClothingType, ItemId};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("clothing item name must not be empty")]
    MissingName,
    #[error("unknown clothing type `{0}` (expected top|bottom|outer)")]
    UnknownClothingType(String),
    #[error("unknown thickness `{0}` (expected thin|medium|thick)")]
    UnknownThickness(String),
    #[error("thickness is required for {kind} items")]
    MissingThickness { kind: ClothingType },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("temperature `{0}` is not an integer")]
    Temperature(String),
    #[error("unknown weather condition `{0}` (expected sunny|rainy|cloudy)")]
    Weather(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    #[error("no closet item with id {0}")]
    UnknownItem(ItemId),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("weather data unavailable: {0}")]
    WeatherUnavailable(#[from] WeatherError),
    #[error("image upload failed: {0}")]
    Upload(#[from] UploadError),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl From<ValidationError> for ApplicationError {
    fn from(value: ValidationError) -> Self {
        Self::Domain(value.into())
    }
}

impl From<InvalidInputError> for ApplicationError {
    fn from(value: InvalidInputError) -> Self {
        Self::Domain(value.into())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "The input could not be accepted. Check it and try again.",
            Self::ServiceUnavailable { .. } => {
                "Weather or image services are unavailable right now. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(error) => Self::BadRequest {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::WeatherUnavailable(error) => Self::ServiceUnavailable {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Upload(error) => Self::ServiceUnavailable {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}
