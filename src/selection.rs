//! Selection
//!
//! Picks the winning benefit out of a card's graded candidates.

use crate::grading::GradedBenefit;

/// Chooses one benefit from a card's candidates.
pub trait SelectionPolicy {
    /// Select the winning candidate, or `None` when there are no candidates.
    fn select<'c, 'b>(&self, candidates: &'c [GradedBenefit<'b>]) -> Option<&'c GradedBenefit<'b>>;
}

/// Arg-max over grades; the earliest candidate wins a tie.
#[derive(Debug, Copy, Clone, Default)]
pub struct HighestGrade;

impl SelectionPolicy for HighestGrade {
    fn select<'c, 'b>(&self, candidates: &'c [GradedBenefit<'b>]) -> Option<&'c GradedBenefit<'b>> {
        candidates.iter().fold(None, |best, candidate| match best {
            Some(current) if current.grade() >= candidate.grade() => Some(current),
            _ => Some(candidate),
        })
    }
}
