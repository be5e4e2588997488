use tracing::{debug, warn};

use crate::domain::{ParseError, SkipCounts};
use crate::error::RowError;
use crate::ingest::continuation::SkipReason;
use crate::metrics::IngestMetrics;

/// Per-run record of what happened to each data row.
#[derive(Debug, Default)]
pub struct Diagnostics {
    total_rows: usize,
    skipped: SkipCounts,
    errors: Vec<ParseError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_seen(&mut self) {
        self.total_rows += 1;
    }

    pub fn skip(&mut self, row_number: usize, reason: SkipReason) {
        debug!(row = row_number, reason = reason.as_str(), "row skipped");
        IngestMetrics::record_row_skipped(reason);
        let counter = match reason {
            SkipReason::Blank => &mut self.skipped.blank,
            SkipReason::MissingSpecification => &mut self.skipped.missing_specification,
            SkipReason::NoteRow => &mut self.skipped.note_row,
            SkipReason::OrphanContinuation => &mut self.skipped.orphan_continuation,
            SkipReason::MissingIdentity => &mut self.skipped.missing_identity,
        };
        *counter += 1;
    }

    pub fn error(&mut self, row_number: usize, line: &str, error: &RowError) {
        warn!(row = row_number, field = error.field(), "row failed: {}", error);
        IngestMetrics::record_row_error(error.field());
        self.errors.push(ParseError {
            row_number,
            field: error.field().to_string(),
            value: line.to_string(),
            reason: error.to_string(),
        });
    }

    #[cfg(test)]
    pub fn skipped(&self) -> &SkipCounts {
        &self.skipped
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_parts(self) -> (usize, SkipCounts, Vec<ParseError>) {
        (self.total_rows, self.skipped, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_are_counted_by_reason() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.skip(2, SkipReason::NoteRow);
        diagnostics.skip(3, SkipReason::NoteRow);
        diagnostics.skip(4, SkipReason::OrphanContinuation);
        assert_eq!(diagnostics.skipped().note_row, 2);
        assert_eq!(diagnostics.skipped().orphan_continuation, 1);
        assert_eq!(diagnostics.skipped().total(), 3);
        assert!(diagnostics.errors().is_empty());
    }

    #[test]
    fn test_error_keeps_line_and_reason() {
        let mut diagnostics = Diagnostics::new();
        let error = RowError::NonFinite {
            field: "price",
            value: "999".to_string(),
        };
        diagnostics.error(7, "Acme,Skyline,999", &error);
        let recorded = &diagnostics.errors()[0];
        assert_eq!(recorded.row_number, 7);
        assert_eq!(recorded.field, "price");
        assert_eq!(recorded.value, "Acme,Skyline,999");
        assert_eq!(recorded.reason, "price value '999' is out of numeric range");
    }
}
