//! Result types for bulk index operations.

/// Maximum number of per-document errors carried in a bulk summary.
///
/// A systemic failure can reject the whole payload; sampling keeps the
/// summary (and anything that logs it) bounded.
pub const MAX_SAMPLE_ERRORS: usize = 3;

/// Summary of a bulk index operation.
///
/// A bulk call can partially succeed: some documents are accepted while
/// others are rejected (for example on a type coercion mismatch). The
/// summary reports counts plus a small sample of the item-level errors.
#[derive(Debug, Clone, Default)]
pub struct BulkIndexSummary {
    /// Total number of documents submitted.
    pub total: usize,
    /// Number of documents accepted by the index.
    pub indexed: usize,
    /// Number of documents rejected at the item level.
    pub failed: usize,
    /// Up to [`MAX_SAMPLE_ERRORS`] item-level error descriptions.
    pub sample_errors: Vec<String>,
}

impl BulkIndexSummary {
    /// Summary for an empty bulk request.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when every submitted document was accepted.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    /// Record one item-level failure, keeping at most the sample cap.
    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.failed += 1;
        if self.sample_errors.len() < MAX_SAMPLE_ERRORS {
            self.sample_errors.push(error.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_errors_are_capped() {
        let mut summary = BulkIndexSummary {
            total: 10,
            ..Default::default()
        };

        for i in 0..7 {
            summary.record_failure(format!("error {}", i));
        }

        assert_eq!(summary.failed, 7);
        assert_eq!(summary.sample_errors.len(), MAX_SAMPLE_ERRORS);
        assert_eq!(summary.sample_errors[0], "error 0");
    }

    #[test]
    fn test_complete_summary() {
        let summary = BulkIndexSummary {
            total: 3,
            indexed: 3,
            ..Default::default()
        };
        assert!(summary.is_complete());
    }
}
