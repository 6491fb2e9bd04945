//! Run an operation over many documents, collecting failures.

use std::fmt;

use crate::error::CorpusError;

/// One document that could not be processed.
#[derive(Debug)]
pub struct Failure<K, E = CorpusError> {
    pub item: K,
    pub error: E,
}

/// Outcome of a batch run.
#[derive(Debug)]
pub struct BatchReport<K, E = CorpusError> {
    pub succeeded: Vec<K>,
    pub failures: Vec<Failure<K, E>>,
}

impl<K, E> Default for BatchReport<K, E> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<K: fmt::Debug, E: fmt::Display> BatchReport<K, E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one item.
    pub fn record(&mut self, item: K, result: Result<(), E>) {
        match result {
            Ok(()) => self.succeeded.push(item),
            Err(error) => {
                tracing::warn!(?item, %error, "item failed");
                self.failures.push(Failure { item, error });
            }
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failures.len()
    }

    /// True when no item failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary, e.g. `"3 succeeded, 1 failed"`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} succeeded, {} failed",
            self.succeeded.len(),
            self.failures.len()
        )
    }
}

/// Apply `f` to every item; a failing item never stops the batch.
pub fn run_batch<K, E>(
    items: impl IntoIterator<Item = K>,
    mut f: impl FnMut(&K) -> Result<(), E>,
) -> BatchReport<K, E>
where
    K: fmt::Debug,
    E: fmt::Display,
{
    let mut report = BatchReport::new();
    for item in items {
        let result = f(&item);
        report.record(item, result);
    }
    tracing::info!(summary = %report.summary(), "batch finished");
    report
}
