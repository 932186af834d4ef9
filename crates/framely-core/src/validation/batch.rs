//! File batch validation
//!
//! Filters a raw selection down to image files and merges it into the current
//! batch, capping the result at [`MAX_BATCH_FILES`] entries.

use crate::constants::MAX_BATCH_FILES;
use crate::draft::OrderedBatch;
use crate::error::ValidationError;
use crate::models::CandidateFile;

/// Summary of one merge, used by the shell to report what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Files appended to the batch
    pub accepted: usize,
    /// Files dropped because they are not images
    pub rejected: usize,
    /// Image files dropped because the batch reached its cap
    pub dropped: usize,
    /// Batch is at its cap; further selection should be disabled
    pub full: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileBatchValidator {
    max_files: usize,
}

impl Default for FileBatchValidator {
    fn default() -> Self {
        Self {
            max_files: MAX_BATCH_FILES,
        }
    }
}

impl FileBatchValidator {
    pub fn new(max_files: usize) -> Self {
        Self { max_files }
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn is_full(&self, batch: &OrderedBatch<CandidateFile>) -> bool {
        batch.len() >= self.max_files
    }

    /// Merge `candidates` into `current`, returning the new batch.
    ///
    /// Non-image files are dropped. If none remain the merge fails with
    /// [`ValidationError::NoValidImages`] and `current` stays as it was.
    /// Accepted files keep their selection order; anything past the cap is
    /// silently discarded.
    pub fn merge(
        &self,
        current: &OrderedBatch<CandidateFile>,
        candidates: Vec<CandidateFile>,
    ) -> Result<(OrderedBatch<CandidateFile>, BatchOutcome), ValidationError> {
        let total = candidates.len();
        let images: Vec<CandidateFile> = candidates.into_iter().filter(|f| f.is_image()).collect();
        let rejected = total - images.len();

        if images.is_empty() {
            tracing::debug!(rejected, "Selection contained no image files");
            return Err(ValidationError::NoValidImages);
        }

        let selected = images.len();
        let mut merged = current.clone();
        merged.extend(images);
        merged.truncate(self.max_files);

        let accepted = merged.len().saturating_sub(current.len());
        let outcome = BatchOutcome {
            accepted,
            rejected,
            dropped: selected - accepted,
            full: self.is_full(&merged),
        };

        tracing::debug!(
            accepted = outcome.accepted,
            rejected = outcome.rejected,
            dropped = outcome.dropped,
            len = merged.len(),
            "Merged file selection into batch"
        );

        Ok((merged, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> CandidateFile {
        CandidateFile::new(name, "image/png", name.as_bytes().to_vec())
    }

    fn document(name: &str) -> CandidateFile {
        CandidateFile::new(name, "application/pdf", name.as_bytes().to_vec())
    }

    fn names(batch: &OrderedBatch<CandidateFile>) -> Vec<&str> {
        batch.iter().map(|f| f.file_name.as_str()).collect()
    }

    #[test]
    fn test_merge_filters_non_images_and_keeps_order() {
        let validator = FileBatchValidator::default();
        let (batch, outcome) = validator
            .merge(
                &OrderedBatch::new(),
                vec![image("b.png"), document("x.pdf"), image("a.png")],
            )
            .unwrap();

        assert_eq!(names(&batch), vec!["b.png", "a.png"]);
        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.rejected, 1);
        assert_eq!(outcome.dropped, 0);
        assert!(!outcome.full);
    }

    #[test]
    fn test_merge_without_images_fails_and_keeps_batch() {
        let validator = FileBatchValidator::default();
        let current: OrderedBatch<_> = vec![image("a.png")].into_iter().collect();

        let err = validator
            .merge(&current, vec![document("x.pdf"), document("y.txt")])
            .unwrap_err();
        assert_eq!(err, ValidationError::NoValidImages);
        assert_eq!(names(&current), vec!["a.png"]);

        assert_eq!(
            validator.merge(&current, Vec::new()).unwrap_err(),
            ValidationError::NoValidImages
        );
    }

    #[test]
    fn test_merge_caps_single_selection_at_ten() {
        let validator = FileBatchValidator::default();
        let files: Vec<_> = (0..11).map(|i| image(&format!("{i}.png"))).collect();

        let (batch, outcome) = validator.merge(&OrderedBatch::new(), files).unwrap();
        assert_eq!(batch.len(), MAX_BATCH_FILES);
        assert_eq!(batch.get(9).unwrap().file_name, "9.png");
        assert_eq!(outcome.accepted, 10);
        assert_eq!(outcome.dropped, 1);
        assert!(outcome.full);
    }

    #[test]
    fn test_merge_caps_across_successive_selections() {
        let validator = FileBatchValidator::default();
        let mut batch = OrderedBatch::new();

        for round in 0..4 {
            let files: Vec<_> = (0..4).map(|i| image(&format!("{round}-{i}.png"))).collect();
            let (next, _) = validator.merge(&batch, files).unwrap();
            assert!(next.len() <= MAX_BATCH_FILES);
            batch = next;
        }

        assert_eq!(batch.len(), MAX_BATCH_FILES);
        assert_eq!(batch.default_item().unwrap().file_name, "0-0.png");
        assert_eq!(batch.get(9).unwrap().file_name, "2-1.png");
    }

    #[test]
    fn test_merge_into_full_batch_accepts_nothing() {
        let validator = FileBatchValidator::new(2);
        let current: OrderedBatch<_> = vec![image("a.png"), image("b.png")].into_iter().collect();

        let (batch, outcome) = validator.merge(&current, vec![image("c.png")]).unwrap();
        assert_eq!(names(&batch), vec!["a.png", "b.png"]);
        assert_eq!(outcome.accepted, 0);
        assert_eq!(outcome.dropped, 1);
        assert!(outcome.full);
    }
}
