use anyhow::{Context, anyhow};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use std::{fmt, path::PathBuf};
use tracing::debug;
use weather_core::{
    Area, AreaForecast, CachedArea, Config, ForecastProvider, ForecastStore, WeatherError,
    provider::validate_area_code, provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "JMA weather forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List forecast areas (JMA offices).
    Areas {
        /// Only show areas whose code or name contains this text.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Fetch the forecast for an area from the JMA API.
    Fetch {
        /// Office code, e.g. 130000 for Tokyo. Falls back to the default area,
        /// then to an interactive picker.
        code: Option<String>,

        /// Store the forecast in the local cache.
        #[arg(long)]
        save: bool,
    },

    /// Show a forecast previously stored with `fetch --save`.
    Show {
        /// Office code. Falls back to the default area, then to a picker over cached areas.
        code: Option<String>,
    },

    /// List areas with a cached forecast.
    Cached,

    /// Interactively edit timeout, cache location and default area.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Areas { filter } => {
                let provider = provider_from_config(&config)?;
                let areas = provider.list_areas().await?;
                let areas = filter_areas(areas, filter.as_deref());

                if areas.is_empty() {
                    println!("No matching areas.");
                }
                for area in areas {
                    println!("{}", AreaOption(area));
                }
            }
            Command::Fetch { code, save } => {
                let provider = provider_from_config(&config)?;
                let code = match code.or_else(|| config.default_area.clone()) {
                    Some(code) => code,
                    None => pick_area(provider.as_ref()).await?,
                };

                let forecast = provider.get_forecast(&code).await?;
                print!("{}", forecast.render());

                if save {
                    let path = config.database_path()?;
                    let mut store = open_store(&path)?;
                    let rows = store.save_forecast(&forecast)?;
                    println!("\nSaved {rows} entries to {}.", path.display());
                }
            }
            Command::Show { code } => {
                let store = open_store(&config.database_path()?)?;
                let code = match code.or_else(|| config.default_area.clone()) {
                    Some(code) => code,
                    None => pick_cached_area(&store)?,
                };

                let forecast = load_cached(&store, &code)?;
                print!("{}", forecast.render());
            }
            Command::Cached => {
                let store = open_store(&config.database_path()?)?;
                let cached = store.cached_areas()?;

                if cached.is_empty() {
                    println!("Cache is empty. Hint: run `weather fetch <code> --save`.");
                }
                for area in cached {
                    println!("{}", CachedLine(&area));
                }
            }
            Command::Configure => {
                configure(&mut config)?;
                let path = config.save()?;
                println!("Configuration saved to {}.", path.display());
            }
        }

        Ok(())
    }
}

fn open_store(path: &std::path::Path) -> anyhow::Result<ForecastStore> {
    ForecastStore::open(path)
        .with_context(|| format!("Failed to open forecast cache: {}", path.display()))
}

/// Cached forecast for `code`, trimmed the same way `fetch` trims it.
fn load_cached(store: &ForecastStore, code: &str) -> anyhow::Result<AreaForecast> {
    let code = validate_area_code(code)?;

    store.load_forecast(code)?.ok_or_else(|| {
        anyhow!(
            "No cached forecast for area {code}.\n\
             Hint: run `weather fetch {code} --save` first."
        )
    })
}

fn filter_areas(areas: Vec<Area>, filter: Option<&str>) -> Vec<Area> {
    let Some(needle) = filter.map(str::to_lowercase) else {
        return areas;
    };

    areas
        .into_iter()
        .filter(|area| {
            area.code.contains(&needle)
                || area.name.to_lowercase().contains(&needle)
                || area.en_name.as_deref().is_some_and(|en| en.to_lowercase().contains(&needle))
        })
        .collect()
}

async fn pick_area(provider: &dyn ForecastProvider) -> anyhow::Result<String> {
    let areas = provider.list_areas().await?;
    debug!(count = areas.len(), "Offering area picker");

    let options = areas.into_iter().map(AreaOption).collect();
    let choice = Select::new("Select an area:", options)
        .with_page_size(15)
        .prompt()
        .map_err(|_| WeatherError::NoArea)?;

    Ok(choice.0.code)
}

fn pick_cached_area(store: &ForecastStore) -> anyhow::Result<String> {
    let cached = store.cached_areas()?;
    if cached.is_empty() {
        return Err(anyhow!(
            "No cached forecasts yet.\nHint: run `weather fetch <code> --save` first."
        ));
    }

    let labels: Vec<String> = cached.iter().map(|a| CachedLine(a).to_string()).collect();
    let choice = Select::new("Select a cached area:", labels.clone())
        .prompt()
        .map_err(|_| WeatherError::NoArea)?;

    let idx = labels.iter().position(|l| *l == choice).unwrap_or_default();
    Ok(cached[idx].area_code.clone())
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    config.timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;

    let db_default = config.database_path()?.display().to_string();
    let db_path = Text::new("Forecast cache file:")
        .with_default(&db_default)
        .prompt()
        .context("Failed to read cache path")?;
    if db_path != db_default {
        config.database_path = Some(PathBuf::from(db_path));
    }

    let area = Text::new("Default area code (empty for none):")
        .with_initial_value(config.default_area.as_deref().unwrap_or_default())
        .prompt()
        .context("Failed to read default area")?;
    let area = area.trim();
    if area.is_empty() {
        config.default_area = None;
    } else {
        validate_area_code(area)?;
        config.set_default_area(area);
    }

    Ok(())
}

/// Picker / listing row for an area.
struct AreaOption(Area);

impl fmt::Display for AreaOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.0.code, self.0.name)?;
        if let Some(en) = &self.0.en_name {
            write!(f, " ({en})")?;
        }
        Ok(())
    }
}

struct CachedLine<'a>(&'a CachedArea);

impl fmt::Display for CachedLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let area = self.0;
        let saved = DateTime::parse_from_rfc3339(&area.saved_at)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| area.saved_at.clone());

        write!(
            f,
            "{}  {}  {} entries, saved {saved}",
            area.area_code, area.area_name, area.entries
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(code: &str, name: &str, en: &str) -> Area {
        Area { code: code.into(), name: name.into(), en_name: Some(en.into()) }
    }

    #[test]
    fn filter_matches_code_and_names() {
        let areas = vec![
            area("130000", "東京都", "Tokyo"),
            area("270000", "大阪府", "Osaka"),
        ];

        assert_eq!(filter_areas(areas.clone(), Some("tokyo")).len(), 1);
        assert_eq!(filter_areas(areas.clone(), Some("大阪"))[0].code, "270000");
        assert_eq!(filter_areas(areas.clone(), Some("0000")).len(), 2);
        assert_eq!(filter_areas(areas, None).len(), 2);
    }

    #[test]
    fn area_option_shows_code_and_names() {
        assert_eq!(
            AreaOption(area("130000", "東京都", "Tokyo")).to_string(),
            "130000  東京都 (Tokyo)"
        );
    }

    fn tokyo_forecast() -> AreaForecast {
        AreaForecast {
            area_code: "130000".into(),
            area_name: "東京地方".into(),
            publishing_office: None,
            report_time: None,
            entries: vec![weather_core::ForecastEntry {
                time: DateTime::parse_from_rfc3339("2024-01-15T17:00:00+09:00").unwrap(),
                weather: "晴れ".into(),
            }],
        }
    }

    #[test]
    fn show_trims_code_like_fetch() {
        let mut store = ForecastStore::open_in_memory().unwrap();
        store.save_forecast(&tokyo_forecast()).unwrap();

        let forecast = load_cached(&store, " 130000 ").unwrap();
        assert_eq!(forecast.area_name, "東京地方");
        assert_eq!(forecast.entries.len(), 1);
    }

    #[test]
    fn show_without_cache_hints_at_fetch() {
        let store = ForecastStore::open_in_memory().unwrap();
        let err = load_cached(&store, "270000").unwrap_err().to_string();

        assert!(err.contains("No cached forecast for area 270000"));
        assert!(err.contains("Hint: run `weather fetch 270000 --save` first."));
    }

    #[test]
    fn show_rejects_bad_code() {
        let store = ForecastStore::open_in_memory().unwrap();
        assert!(load_cached(&store, "").is_err());
        assert!(load_cached(&store, "tokyo").is_err());
    }

    #[test]
    fn parses_fetch_with_save() {
        let cli = Cli::try_parse_from(["weather", "fetch", "130000", "--save"]).unwrap();
        match cli.command {
            Command::Fetch { code, save } => {
                assert_eq!(code.as_deref(), Some("130000"));
                assert!(save);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
