//! SQLite cache of fetched forecasts.
//!
//! One row per (area, forecast time); saving the same slot again replaces it.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::{fs, path::Path};
use tracing::{debug, info};

use crate::{
    error::StoreError,
    model::{AreaForecast, ForecastEntry},
};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS weather_forecast (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        area_code TEXT,
        area_name TEXT,
        time TEXT,
        weather_text TEXT,
        created_at TEXT,
        UNIQUE(area_code, time)
    );
";

/// Summary of what is cached for one area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedArea {
    pub area_code: String,
    pub area_name: String,
    pub entries: u32,
    pub saved_at: String,
}

#[derive(Debug)]
pub struct ForecastStore {
    conn: Connection,
}

impl ForecastStore {
    /// Open (or create) the cache file, creating parent directories as needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        debug!(path = %path.display(), "Opening forecast cache");
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Store every entry of `forecast`, returning the number of rows written.
    pub fn save_forecast(&mut self, forecast: &AreaForecast) -> Result<usize, StoreError> {
        self.save_forecast_at(forecast, Utc::now())
    }

    pub fn save_forecast_at(
        &mut self,
        forecast: &AreaForecast,
        saved_at: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let created_at = saved_at.to_rfc3339();
        let tx = self.conn.transaction()?;

        let mut written = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO weather_forecast
                 (area_code, area_name, time, weather_text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;

            for entry in &forecast.entries {
                written += stmt.execute(params![
                    forecast.area_code,
                    forecast.area_name,
                    entry.time.to_rfc3339(),
                    entry.weather,
                    created_at,
                ])?;
            }
        }
        tx.commit()?;

        info!(area_code = %forecast.area_code, rows = written, "Saved forecast");
        Ok(written)
    }

    /// Cached forecast for an area ordered by time, or `None` if nothing was saved.
    pub fn load_forecast(&self, area_code: &str) -> Result<Option<AreaForecast>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT area_name, time, weather_text
             FROM weather_forecast
             WHERE area_code = ?1
             ORDER BY time",
        )?;

        let rows = stmt
            .query_map([area_code], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(%area_code, rows = rows.len(), "Loaded cached forecast");

        let Some(area_name) = rows.first().map(|(name, _, _)| name.clone()) else {
            return Ok(None);
        };

        let entries = rows
            .into_iter()
            .map(|(_, time, weather)| {
                let time = DateTime::parse_from_rfc3339(&time)
                    .map_err(|source| StoreError::InvalidTime { value: time, source })?;
                Ok(ForecastEntry { time, weather })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(Some(AreaForecast {
            area_code: area_code.to_string(),
            area_name,
            publishing_office: None,
            report_time: None,
            entries,
        }))
    }

    pub fn cached_areas(&self) -> Result<Vec<CachedArea>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT area_code, area_name, COUNT(*), MAX(created_at)
             FROM weather_forecast
             GROUP BY area_code
             ORDER BY area_code",
        )?;

        let areas = stmt
            .query_map([], |row| {
                Ok(CachedArea {
                    area_code: row.get(0)?,
                    area_name: row.get(1)?,
                    entries: row.get(2)?,
                    saved_at: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(areas)
    }
}
