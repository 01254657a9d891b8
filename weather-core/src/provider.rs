use crate::{Area, AreaForecast, Config, error::WeatherError, provider::jma::JmaProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod jma;

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// All forecast offices, sorted by code.
    async fn list_areas(&self) -> Result<Vec<Area>, WeatherError>;

    async fn get_forecast(&self, area_code: &str) -> Result<AreaForecast, WeatherError>;
}

/// Construct the forecast provider described by `config`.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn ForecastProvider>, WeatherError> {
    Ok(Box::new(JmaProvider::new(config)?))
}

/// Office codes are plain digit strings; anything else never reaches a URL.
pub fn validate_area_code(area_code: &str) -> Result<&str, WeatherError> {
    let code = area_code.trim();

    if code.is_empty() {
        return Err(WeatherError::NoArea);
    }
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(WeatherError::InvalidAreaCode(code.to_string()));
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_code_must_be_digits() {
        assert_eq!(validate_area_code(" 130000 ").unwrap(), "130000");
        assert!(matches!(validate_area_code(""), Err(WeatherError::NoArea)));
        assert!(matches!(
            validate_area_code("../130000"),
            Err(WeatherError::InvalidAreaCode(code)) if code == "../130000"
        ));
    }

    #[test]
    fn provider_from_default_config() {
        let provider = provider_from_config(&Config::default());
        assert!(provider.is_ok());
    }
}
