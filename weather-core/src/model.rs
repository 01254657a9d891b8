use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// A forecast office from the area index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub code: String,
    pub name: String,
    pub en_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<FixedOffset>,
    pub weather: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaForecast {
    /// Office code the forecast was requested for.
    pub area_code: String,
    /// Name of the first sub-area in the report.
    pub area_name: String,
    pub publishing_office: Option<String>,
    pub report_time: Option<DateTime<FixedOffset>>,
    pub entries: Vec<ForecastEntry>,
}

impl AreaForecast {
    /// Human-readable block: header line, blank line, one `<time> : <weather>` per entry.
    pub fn render(&self) -> String {
        let mut out = format!("Area: {}\n", self.area_name);

        if let Some(office) = &self.publishing_office {
            let _ = write!(out, "Issued by: {office}");
            if let Some(at) = self.report_time {
                let _ = write!(out, " at {}", at.to_rfc3339());
            }
            out.push('\n');
        }

        out.push('\n');
        for entry in &self.entries {
            let _ = writeln!(out, "{} : {}", entry.time.to_rfc3339(), entry.weather);
        }

        out
    }
}
