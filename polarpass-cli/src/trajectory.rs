//! CSV trajectory reader

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::config::InputConfig;

/// Layouts tried, in order, after RFC 3339
const FALLBACK_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Timestamped latitude samples read from one file
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub times: Vec<DateTime<Utc>>,
    pub latitude: Vec<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.latitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latitude.is_empty()
    }

    pub fn from_path(path: impl AsRef<Path>, input: &InputConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open trajectory '{}'", path.display()))?;
        Self::from_reader(file, input)
            .with_context(|| format!("Failed to read trajectory '{}'", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R, input: &InputConfig) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let headers = csv.headers().context("Failed to read CSV header")?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow!("Column '{}' not found in header {:?}", name, headers))
        };
        let time_idx = column(&input.time_column)?;
        let lat_idx = column(&input.latitude_column)?;

        let mut times = Vec::new();
        let mut latitude = Vec::new();
        for record in csv.records() {
            let record = record.context("Malformed CSV record")?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let (Some(raw_time), Some(raw_lat)) = (record.get(time_idx), record.get(lat_idx)) else {
                bail!("Line {}: missing time or latitude field", line);
            };
            let time = parse_time(raw_time, input.time_format.as_deref())
                .with_context(|| format!("Line {}: bad timestamp '{}'", line, raw_time))?;
            let lat: f64 = raw_lat
                .parse()
                .with_context(|| format!("Line {}: bad latitude '{}'", line, raw_lat))?;

            times.push(time);
            latitude.push(lat);
        }

        tracing::debug!("Read {} trajectory samples", latitude.len());
        Ok(Self { times, latitude })
    }
}

/// Parse a timestamp with an explicit layout, or RFC 3339 and the fallbacks
pub fn parse_time(raw: &str, format: Option<&str>) -> Result<DateTime<Utc>> {
    if let Some(format) = format {
        let naive = NaiveDateTime::parse_from_str(raw, format)?;
        return Ok(naive.and_utc());
    }

    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(time.with_timezone(&Utc));
    }
    FALLBACK_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow!("Unrecognized timestamp layout"))
}
