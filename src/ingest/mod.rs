//! Broker spreadsheet ingestion.
//!
//! `parse` takes the full text of a CSV/TSV export and returns projects, unit
//! configurations and row diagnostics. It does no I/O. Stages run strictly in
//! order: header resolution, line splitting, row building, continuation
//! filtering, normalization with aggregation, diagnostics.

pub mod aggregate;
pub mod continuation;
pub mod diagnostics;
pub mod headers;
pub mod normalize;
pub mod row;
pub mod splitter;

use std::time::Instant;

use sha2::{Digest, Sha256};
use tracing::{info, info_span, warn};

use crate::domain::{ParseStats, ParsedResult};
use crate::error::{IngestError, Result};
use crate::metrics::IngestMetrics;

use aggregate::Aggregator;
use continuation::{ContinuationFilter, RowDecision, SkipReason};
use diagnostics::Diagnostics;
use headers::{resolve_headers, HeaderMap};
use row::build_row;
use splitter::{is_blank_line, split_line, Delimiter};

/// Lowercase hex SHA-256 of the input text.
pub fn source_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Lines with their 1-based line numbers, `\r\n` or `\n` terminated.
fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(index, line)| (index + 1, line))
}

/// Detected layout of an input file: its delimiter and column mapping.
#[derive(Debug, Clone)]
pub struct Layout {
    pub header_line_number: usize,
    pub delimiter: Delimiter,
    pub headers: HeaderMap,
}

/// Resolve the header line: the first line with any content. Fails only when
/// the input has none.
pub fn detect_layout(text: &str) -> Result<Layout> {
    let (header_line_number, header_line) = numbered_lines(text)
        .find(|(_, line)| !line.trim().is_empty())
        .ok_or(IngestError::EmptyInput)?;
    let delimiter = Delimiter::detect(header_line);
    let headers = resolve_headers(&split_line(header_line, delimiter));
    Ok(Layout {
        header_line_number,
        delimiter,
        headers,
    })
}

/// Parse a broker spreadsheet export.
///
/// Only an input without a header line is an error. Rows that carry no unit
/// data are skipped and counted in `stats.skipped`; rows that fail while
/// being normalized become entries in `errors`.
pub fn parse(text: &str) -> Result<ParsedResult> {
    let started = Instant::now();
    let span = info_span!("parse_listing_csv", bytes = text.len());
    let _enter = span.enter();

    let layout = detect_layout(text)?;
    let unmapped_headers = layout.headers.unmapped();
    for name in &unmapped_headers {
        warn!(header = %name, "column has no canonical field and will be ignored");
    }

    let mut filter = ContinuationFilter::new();
    let mut aggregator = Aggregator::new();
    let mut diagnostics = Diagnostics::new();

    for (row_number, line) in numbered_lines(text).skip(layout.header_line_number) {
        if line.trim().is_empty() {
            continue;
        }
        diagnostics.row_seen();

        if is_blank_line(line, layout.delimiter) {
            diagnostics.skip(row_number, SkipReason::Blank);
            continue;
        }

        let original = build_row(&split_line(line, layout.delimiter), &layout.headers);
        match filter.decide(original.clone()) {
            RowDecision::Skip(reason) => diagnostics.skip(row_number, reason),
            RowDecision::Accept { row, continuation } => {
                if !continuation {
                    filter.advance(&row);
                }
                if let Err(error) = aggregator.add(&row, original) {
                    diagnostics.error(row_number, line, &error);
                }
            }
        }
    }

    let (projects, configurations) = aggregator.into_parts();
    let (total_rows, skipped, errors) = diagnostics.into_parts();
    let stats = ParseStats {
        total_rows,
        projects_created: projects.len(),
        configurations_created: configurations.len(),
        error_count: errors.len(),
        skipped,
        unmapped_headers,
        delimiter: layout.delimiter.name().to_string(),
        source_sha256: source_digest(text),
    };

    IngestMetrics::record_run(&stats, started.elapsed().as_secs_f64());
    info!(
        total_rows = stats.total_rows,
        projects = stats.projects_created,
        configurations = stats.configurations_created,
        errors = stats.error_count,
        skipped = stats.skipped.total(),
        "parse finished"
    );

    Ok(ParsedResult {
        projects,
        configurations,
        errors,
        stats,
    })
}
