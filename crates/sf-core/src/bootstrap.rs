//! Bootstrap attempt bookkeeping.
//!
//! One attempt per independent data source. The outcome is complete exactly
//! when every attempt has reached a terminal status, regardless of success.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootstrapSource {
    CategoryTree,
    Subcategories,
    SubSubcategories,
    Brands,
    InitialProducts,
}

impl BootstrapSource {
    /// Every source, in the order attempts are reported.
    pub const ALL: [BootstrapSource; 5] = [
        BootstrapSource::CategoryTree,
        BootstrapSource::Subcategories,
        BootstrapSource::SubSubcategories,
        BootstrapSource::Brands,
        BootstrapSource::InitialProducts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BootstrapSource::CategoryTree => "category_tree",
            BootstrapSource::Subcategories => "subcategories",
            BootstrapSource::SubSubcategories => "sub_subcategories",
            BootstrapSource::Brands => "brands",
            BootstrapSource::InitialProducts => "initial_products",
        }
    }
}

impl fmt::Display for BootstrapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptStatus {
    Pending,
    Fulfilled,
    Rejected { reason: String },
}

impl AttemptStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AttemptStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapAttempt {
    pub source: BootstrapSource,
    pub status: AttemptStatus,
}

/// Aggregate of every bootstrap attempt for one mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapOutcome {
    attempts: Vec<BootstrapAttempt>,
}

impl BootstrapOutcome {
    pub fn new(attempts: Vec<BootstrapAttempt>) -> Self {
        Self { attempts }
    }

    /// Outcome with every source still pending.
    pub fn pending(sources: &[BootstrapSource]) -> Self {
        Self::new(
            sources
                .iter()
                .map(|source| BootstrapAttempt {
                    source: *source,
                    status: AttemptStatus::Pending,
                })
                .collect(),
        )
    }

    /// Record the terminal status of one source.
    pub fn settle(&mut self, source: BootstrapSource, status: AttemptStatus) {
        match self.attempts.iter_mut().find(|a| a.source == source) {
            Some(attempt) => attempt.status = status,
            None => self.attempts.push(BootstrapAttempt { source, status }),
        }
    }

    pub fn attempts(&self) -> &[BootstrapAttempt] {
        &self.attempts
    }

    pub fn is_complete(&self) -> bool {
        self.attempts.iter().all(|a| a.status.is_terminal())
    }

    pub fn fulfilled(&self) -> impl Iterator<Item = BootstrapSource> + '_ {
        self.attempts
            .iter()
            .filter(|a| a.status == AttemptStatus::Fulfilled)
            .map(|a| a.source)
    }

    pub fn rejected(&self) -> impl Iterator<Item = (BootstrapSource, &str)> + '_ {
        self.attempts.iter().filter_map(|a| match &a.status {
            AttemptStatus::Rejected { reason } => Some((a.source, reason.as_str())),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_completes_only_when_every_attempt_is_terminal() {
        let mut outcome = BootstrapOutcome::pending(&BootstrapSource::ALL);
        assert!(!outcome.is_complete());

        for source in &BootstrapSource::ALL[..4] {
            outcome.settle(*source, AttemptStatus::Fulfilled);
        }
        assert!(!outcome.is_complete());

        outcome.settle(
            BootstrapSource::InitialProducts,
            AttemptStatus::Rejected {
                reason: "HTTP 500".into(),
            },
        );
        assert!(outcome.is_complete());
        assert_eq!(outcome.fulfilled().count(), 4);
        assert_eq!(
            outcome.rejected().collect::<Vec<_>>(),
            vec![(BootstrapSource::InitialProducts, "HTTP 500")]
        );
    }

    #[test]
    fn empty_outcome_is_trivially_complete() {
        assert!(BootstrapOutcome::default().is_complete());
    }
}
