//! Contracts for the services that feed the core: a weather source and an
//! image store. Both may block on I/O in real deployments; the core only ever
//! receives their resolved results.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::item::ImageRef;
use crate::domain::weather::WeatherReading;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WeatherError {
    #[error("location services are not supported")]
    LocationUnsupported,
    #[error("location lookup was denied or failed")]
    LocationDenied,
    #[error("weather lookup failed: {0}")]
    FetchFailed(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::LocationUnsupported => "Your device does not support location services.",
            Self::LocationDenied => "Could not determine your location.",
            Self::FetchFailed(_) => "Could not retrieve weather information.",
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self) -> Result<WeatherReading, WeatherError>;
}

/// Always reports the same reading.
#[derive(Clone, Copy, Debug)]
pub struct StaticWeatherProvider {
    reading: WeatherReading,
}

impl StaticWeatherProvider {
    pub fn new(reading: WeatherReading) -> Self {
        Self { reading }
    }
}

#[async_trait]
impl WeatherProvider for StaticWeatherProvider {
    async fn current(&self) -> Result<WeatherReading, WeatherError> {
        Ok(self.reading)
    }
}

/// Always fails with the configured error.
#[derive(Clone, Debug)]
pub struct UnavailableWeatherProvider {
    error: WeatherError,
}

impl UnavailableWeatherProvider {
    pub fn new(error: WeatherError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl WeatherProvider for UnavailableWeatherProvider {
    async fn current(&self) -> Result<WeatherReading, WeatherError> {
        Err(self.error.clone())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("image is empty")]
    Empty,
    #[error("image is {size} bytes, limit is {max}")]
    TooLarge { size: usize, max: usize },
    #[error("upload failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, bytes: &[u8]) -> Result<ImageRef, UploadError>;
}

/// Content-addressed uploader: the reference is `<base_url>/<blake3 hex>`, so
/// identical images always resolve to the same reference.
#[derive(Clone, Debug)]
pub struct DigestImageUploader {
    base_url: String,
    max_bytes: usize,
}

impl DigestImageUploader {
    pub fn new(base_url: impl Into<String>, max_bytes: usize) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, max_bytes }
    }

    pub fn reference_for(&self, bytes: &[u8]) -> Result<ImageRef, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge { size: bytes.len(), max: self.max_bytes });
        }

        let digest = blake3::hash(bytes);
        Ok(ImageRef(format!("{}/{}", self.base_url, digest.to_hex())))
    }
}

#[async_trait]
impl ImageUploader for DigestImageUploader {
    async fn upload(&self, bytes: &[u8]) -> Result<ImageRef, UploadError> {
        self.reference_for(bytes)
    }
}
