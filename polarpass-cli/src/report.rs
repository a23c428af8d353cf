//! Per-file segmentation results and their rendering

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use polarpass_core::{Hemisphere, PassRecord, Segmentation};
use serde::Serialize;

/// What one trajectory file produced
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: String,
    pub samples: usize,
    pub boundary_lat: f64,
    pub north: Vec<PassRecord<DateTime<Utc>>>,
    pub south: Vec<PassRecord<DateTime<Utc>>>,
    /// Inferred crossings across data gaps, both hemispheres
    pub placeholders: usize,
}

impl FileReport {
    pub fn new(
        source: impl Into<String>,
        samples: usize,
        boundary_lat: f64,
        segmentation: &Segmentation<DateTime<Utc>>,
    ) -> Self {
        let records = |hemisphere| {
            segmentation
                .passes(hemisphere)
                .iter()
                .map(|pass| pass.to_record())
                .collect::<Vec<_>>()
        };
        Self {
            source: source.into(),
            samples,
            boundary_lat,
            north: records(Hemisphere::North),
            south: records(Hemisphere::South),
            placeholders: segmentation.placeholder_count(Hemisphere::North)
                + segmentation.placeholder_count(Hemisphere::South),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One line per pass; `--` marks a side inferred across a data gap
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {} samples, boundary {:.1} deg, {} northern / {} southern passes, {} inferred crossings",
            self.source,
            self.samples,
            self.boundary_lat,
            self.north.len(),
            self.south.len(),
            self.placeholders
        );
        for (label, passes) in [("N", &self.north), ("S", &self.south)] {
            for (n, pass) in passes.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}{:<4} start {} [{}] frac {}   end {} [{}] frac {}",
                    label,
                    n + 1,
                    format_time(pass.s_time),
                    format_index(pass.s_ind),
                    format_frac(pass.s_frac),
                    format_time(pass.e_time),
                    format_index(pass.e_ind),
                    format_frac(pass.e_frac),
                );
            }
        }
        out
    }
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| format!("{:<19}", "--"))
}

fn format_index(index: Option<usize>) -> String {
    index.map(|i| i.to_string()).unwrap_or_else(|| "--".to_string())
}

fn format_frac(frac: Option<f64>) -> String {
    frac.map(|f| format!("{:.3}", f)).unwrap_or_else(|| "--".to_string())
}
