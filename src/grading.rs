//! Grading
//!
//! Turns a benefit into a monetary grade for one transaction, so discounts, points and
//! cashback can be compared on the same scale.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    benefits::{Benefit, BenefitKind, BenefitValue, CashbackUnit},
    cards::CardId,
};

/// Errors that can occur while grading a benefit.
#[derive(Debug, Error, PartialEq)]
pub enum GradingError {
    /// A points-denominated benefit was graded for a card with no points-to-money rate.
    #[error("card {card} has points benefits but no points-to-money rate")]
    MissingPointsRate {
        /// Card missing the rate
        card: CardId,
    },

    /// The grade overflowed decimal arithmetic.
    #[error("grade for a benefit of card {card} overflowed")]
    Overflow {
        /// Card the benefit belongs to
        card: CardId,
    },
}

/// A benefit together with its grade for one transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradedBenefit<'b> {
    benefit: &'b Benefit,
    grade: Decimal,
}

impl<'b> GradedBenefit<'b> {
    /// Pair a benefit with its grade.
    pub fn new(benefit: &'b Benefit, grade: Decimal) -> Self {
        Self { benefit, grade }
    }

    /// The graded benefit
    pub fn benefit(&self) -> &'b Benefit {
        self.benefit
    }

    /// Monetary grade
    pub fn grade(&self) -> Decimal {
        self.grade
    }
}

/// Grades `benefit` for a purchase of `amount` (in major currency units).
///
/// - Percentage discounts are worth that share of the amount.
/// - Flat discounts are worth their value, clamped to the amount.
/// - Points, and cashback paid in points, are converted at `points_rate`.
/// - Cashback paid in money is worth its value.
///
/// Percentage points and percentage cashback take their share of the amount first and then
/// convert it like their flat counterparts.
///
/// # Errors
///
/// - [`GradingError::MissingPointsRate`]: the benefit is paid in points and `points_rate` is `None`.
/// - [`GradingError::Overflow`]: the calculation overflowed.
pub fn grade(
    benefit: &Benefit,
    amount: Decimal,
    points_rate: Option<Decimal>,
) -> Result<Decimal, GradingError> {
    let card = benefit.card();
    let overflow = || GradingError::Overflow { card };

    let earned = match benefit.value() {
        BenefitValue::Percentage(percent) => (*percent * Decimal::ONE)
            .checked_mul(amount)
            .ok_or_else(overflow)?,
        BenefitValue::Flat(value) => *value,
    };

    match benefit.kind() {
        BenefitKind::Discount => match benefit.value() {
            BenefitValue::Flat(_) => Ok(earned.min(amount)),
            BenefitValue::Percentage(_) => Ok(earned),
        },
        BenefitKind::Cashback(CashbackUnit::Money) => Ok(earned),
        BenefitKind::Points | BenefitKind::Cashback(CashbackUnit::Points) => {
            let rate = points_rate.ok_or(GradingError::MissingPointsRate { card })?;

            earned.checked_mul(rate).ok_or_else(overflow)
        }
    }
}

/// Grades `benefit` and pairs the grade with it.
///
/// # Errors
///
/// See [`grade`].
pub fn graded(
    benefit: &Benefit,
    amount: Decimal,
    points_rate: Option<Decimal>,
) -> Result<GradedBenefit<'_>, GradingError> {
    Ok(GradedBenefit::new(
        benefit,
        grade(benefit, amount, points_rate)?,
    ))
}
