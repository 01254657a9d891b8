//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration handling (endpoints, timeout, cache location)
//! - Abstraction over forecast providers, with the JMA implementation
//! - The local SQLite forecast cache
//! - Shared domain models (areas, forecasts)
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod store;

pub use config::Config;
pub use error::{StoreError, WeatherError};
pub use model::{Area, AreaForecast, ForecastEntry};
pub use provider::{ForecastProvider, jma::JmaProvider, provider_from_config};
pub use store::{CachedArea, ForecastStore};
