use crate::core::intersection::overlap_minutes;
use crate::domain::model::Rate;
use crate::utils::error::{BillingError, Result};

/// Keeps the rate catalog consistent: a single basic rate and pairwise
/// disjoint special windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapValidator;

impl OverlapValidator {
    pub fn new() -> Self {
        Self
    }

    /// Checks `candidate` against the `existing` catalog before it is written.
    /// An entry stored under the candidate's own id is ignored, so re-saving
    /// an unchanged rate always passes.
    pub fn validate(&self, candidate: &Rate, existing: &[Rate]) -> Result<()> {
        let others: Vec<&Rate> = existing
            .iter()
            .filter(|rate| !rate.shares_identity(candidate))
            .collect();

        if candidate.is_basic() {
            if let Some(basic) = others.iter().find(|rate| rate.is_basic()) {
                tracing::debug!("Basic rate already defined: {}", basic);
                return Err(BillingError::DuplicateBasicRate);
            }
            return Ok(());
        }

        match others
            .into_iter()
            .filter(|rate| !rate.is_basic())
            .find(|rate| self.overlap(rate, candidate))
        {
            Some(conflicting) => Err(BillingError::WindowConflict {
                conflicting: conflicting.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Whether the windows of two rates share any minute. Basic rates have
    /// no window and overlap nothing.
    pub fn overlap(&self, first: &Rate, second: &Rate) -> bool {
        match (first.window(), second.window()) {
            (Some(a), Some(b)) => overlap_minutes(&a, &b) != 0,
            _ => false,
        }
    }
}
