use std::collections::BTreeMap;
use chrono::{DateTime, NaiveDate};
use tracing::{info, warn};

use crate::db::Database;
use crate::models::{AggregatedAnalysis, Category, FraudReport};

/// Recomputes the analysis table from the full report table.
pub struct Aggregator {
    db: Database,
}

impl Aggregator {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Aggregate every stored report and overwrite the analysis table.
    /// An empty or unreadable report table yields [`AggregatedAnalysis::empty`].
    pub fn aggregate(&self) -> AggregatedAnalysis {
        let reports = match self.db.load_reports() {
            Ok(reports) => reports,
            Err(e) => {
                warn!(error = %e, "Failed to read reports, aggregating nothing");
                Vec::new()
            }
        };

        let analysis = summarize(&reports);
        if reports.is_empty() {
            warn!("No reports to aggregate");
        }

        match self.db.save_analysis(&analysis) {
            Ok(rows) => info!(total = analysis.total(), rows, "Analysis stored"),
            Err(e) => warn!(error = %e, "Failed to store analysis"),
        }
        analysis
    }
}

/// Frequency and monthly-trend summary of `reports`.
pub fn summarize(reports: &[FraudReport]) -> AggregatedAnalysis {
    let mut analysis = AggregatedAnalysis::empty();
    if reports.is_empty() {
        return analysis;
    }

    analysis.set_scalar(Category::TotalFraudCount, reports.len() as u64);
    analysis.set_grouped(Category::CountsByFraudType, count_by(reports, |r| Some(r.fraud_type.clone())));
    analysis.set_grouped(Category::CountsByChannel, count_by(reports, |r| Some(r.channel.clone())));
    analysis.set_grouped(Category::CountsByAudience, count_by(reports, |r| Some(r.target_audience.clone())));
    analysis.set_grouped(Category::CountsBySource, count_by(reports, |r| Some(r.source.clone())));
    analysis.set_grouped(
        Category::CountsByMonth,
        count_by(reports, |r| parse_report_date(&r.report_date).map(|d| d.format("%Y-%m").to_string())),
    );
    analysis
}

fn count_by<F>(reports: &[FraudReport], key: F) -> BTreeMap<String, u64>
where
    F: Fn(&FraudReport) -> Option<String>,
{
    let mut counts = BTreeMap::new();
    for report in reports {
        if let Some(k) = key(report) {
            *counts.entry(k).or_insert(0) += 1;
        }
    }
    counts
}

/// Best-effort date parsing; `None` keeps the report out of every month bucket.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    // Month precision: anchor on the first day
    NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").ok()
}
