//! Ingestion metrics.
//!
//! Recorded through the `metrics` facade; with no recorder installed every
//! call is a no-op, so the parse engine stays free of side effects.

use crate::domain::ParseStats;
use crate::ingest::continuation::SkipReason;

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
    pub labels: Vec<&'static str>,
}

impl MetricDoc {
    /// Help text with the label names appended, as shown by exporters
    pub fn description(&self) -> String {
        if self.labels.is_empty() {
            self.help.to_string()
        } else {
            format!("{} (labels: {})", self.help, self.labels.join(", "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

/// Naming convention: listing_{phase}_{metric_name}[_total]
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("listing_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("listing_", $phase, "_", $name)
    };
}

/// Metrics for the CSV ingestion phase
pub struct IngestMetrics;

impl IngestMetrics {
    pub fn record_row_skipped(reason: SkipReason) {
        ::metrics::counter!(phase_metric!(counter, "ingest", "rows_skipped"), "reason" => reason.as_str())
            .increment(1);
    }

    pub fn record_row_error(field: &'static str) {
        ::metrics::counter!(phase_metric!(counter, "ingest", "row_errors"), "field" => field)
            .increment(1);
    }

    /// Record the summary of a finished run
    pub fn record_run(stats: &ParseStats, duration_secs: f64) {
        ::metrics::counter!(phase_metric!(counter, "ingest", "runs")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "ingest", "rows_seen"))
            .increment(stats.total_rows as u64);
        ::metrics::counter!(phase_metric!(counter, "ingest", "projects_created"))
            .increment(stats.projects_created as u64);
        ::metrics::counter!(phase_metric!(counter, "ingest", "configurations_created"))
            .increment(stats.configurations_created as u64);
        ::metrics::histogram!(phase_metric!(histogram, "ingest", "duration_seconds"))
            .record(duration_secs);
    }

    /// Attach help text to every ingestion metric on the installed recorder
    pub fn describe() {
        for doc in Self::metrics_documentation() {
            let description = doc.description();
            match doc.metric_type {
                MetricType::Counter => ::metrics::describe_counter!(doc.name, description),
                MetricType::Histogram => ::metrics::describe_histogram!(doc.name, description),
            }
        }
    }

    pub fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "ingest", "runs"),
                metric_type: MetricType::Counter,
                help: "Total number of parse runs",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "ingest", "rows_seen"),
                metric_type: MetricType::Counter,
                help: "Non-empty data rows read",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "ingest", "rows_skipped"),
                metric_type: MetricType::Counter,
                help: "Rows dropped as carrying no usable unit data",
                labels: vec!["reason"],
            },
            MetricDoc {
                name: phase_metric!(counter, "ingest", "row_errors"),
                metric_type: MetricType::Counter,
                help: "Rows recorded as parse errors",
                labels: vec!["field"],
            },
            MetricDoc {
                name: phase_metric!(counter, "ingest", "projects_created"),
                metric_type: MetricType::Counter,
                help: "Projects created across runs",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "ingest", "configurations_created"),
                metric_type: MetricType::Counter,
                help: "Unit configurations created across runs",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "ingest", "duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Wall time of a parse run in seconds",
                labels: vec![],
            },
        ]
    }
}
