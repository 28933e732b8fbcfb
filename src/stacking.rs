//! Stacking
//!
//! Cashback is never chosen as a card's primary benefit. A card's standing (business-less)
//! cashback is paid on top of whatever wins, so it is resolved separately here and added to the
//! primary grade by the ranker. Cashback scoped to a business is not stacked.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    benefits::Benefit,
    cards::CreditCard,
    grading::{GradedBenefit, GradingError, graded},
    selection::{HighestGrade, SelectionPolicy},
};

/// Cashback bonus resolved for one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardBonus<'b> {
    selected: Option<GradedBenefit<'b>>,
    candidates: usize,
}

impl<'b> CardBonus<'b> {
    /// Bonus value; zero when the card has no standing cashback.
    pub fn grade(&self) -> Decimal {
        self.selected
            .as_ref()
            .map_or(Decimal::ZERO, GradedBenefit::grade)
    }

    /// The cashback benefit paying the bonus
    pub fn benefit(&self) -> Option<&'b Benefit> {
        self.selected.as_ref().map(GradedBenefit::benefit)
    }

    /// Number of cashback benefits that competed for the bonus.
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// More than one cashback benefit matched, so one had to be picked.
    pub fn is_ambiguous(&self) -> bool {
        self.candidates > 1
    }
}

/// Resolves a card's standing bonus: its unconditional (business-less) cashback.
///
/// With several standing cashback benefits, the highest graded one wins (the first in
/// catalog order on a tie) and the result reports [`CardBonus::is_ambiguous`].
///
/// # Errors
///
/// Returns a [`GradingError`] if a points cashback is found and the card has no points rate.
pub fn card_bonus<'b>(
    card: &CreditCard,
    benefits: impl IntoIterator<Item = &'b Benefit>,
    amount: Decimal,
) -> Result<CardBonus<'b>, GradingError> {
    let candidates = benefits
        .into_iter()
        .filter(|&benefit| benefit.card() == card.id() && benefit.is_standing_bonus())
        .map(|benefit| graded(benefit, amount, card.points_rate()))
        .collect::<Result<SmallVec<[GradedBenefit<'b>; 2]>, _>>()?;

    Ok(CardBonus {
        selected: HighestGrade.select(&candidates).copied(),
        candidates: candidates.len(),
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        benefits::{BenefitKind, BenefitValue, CashbackUnit},
        businesses::BusinessId,
        cards::CardId,
    };

    use super::*;

    fn visa() -> CreditCard {
        CreditCard::with_points_rate(CardId(0), "Visa", Decimal::new(1, 2))
    }

    fn cashback(card: u32, points: i64) -> Benefit {
        Benefit::new(
            CardId(card),
            BenefitKind::CASHBACK,
            BenefitValue::Flat(Decimal::from(points)),
        )
    }

    #[test]
    fn single_standing_cashback_is_the_bonus() -> TestResult {
        let benefits = [cashback(0, 50), cashback(1, 500)];
        let bonus = card_bonus(&visa(), &benefits, Decimal::from(1000))?;

        assert_eq!(bonus.grade(), Decimal::new(5, 1));
        assert_eq!(bonus.benefit(), benefits.first());
        assert!(!bonus.is_ambiguous());

        Ok(())
    }

    #[test]
    fn no_standing_cashback_is_zero() -> TestResult {
        let benefits = [Benefit::new(
            CardId(0),
            BenefitKind::Discount,
            BenefitValue::percent(Decimal::from(10)),
        )];

        let bonus = card_bonus(&visa(), &benefits, Decimal::from(1000))?;

        assert_eq!(bonus.grade(), Decimal::ZERO);
        assert!(bonus.benefit().is_none());
        assert_eq!(bonus.candidates(), 0);

        Ok(())
    }

    #[test]
    fn scoped_cashback_is_not_a_standing_bonus() -> TestResult {
        let benefits = [Benefit::at_business(
            CardId(0),
            BusinessId(1),
            BenefitKind::Cashback(CashbackUnit::Money),
            BenefitValue::Flat(Decimal::from(15)),
        )];

        let standing = card_bonus(&visa(), &benefits, Decimal::from(100))?;

        assert_eq!(standing.grade(), Decimal::ZERO);
        assert!(standing.benefit().is_none());

        Ok(())
    }

    #[test]
    fn duplicate_standing_cashback_picks_highest_and_flags() -> TestResult {
        let benefits = [cashback(0, 20), cashback(0, 80), cashback(0, 80)];
        let bonus = card_bonus(&visa(), &benefits, Decimal::from(1000))?;

        assert_eq!(bonus.grade(), Decimal::new(8, 1));
        assert_eq!(bonus.candidates(), 3);
        assert!(bonus.is_ambiguous());
        assert!(matches!(
            (bonus.benefit(), benefits.get(1)),
            (Some(picked), Some(expected)) if std::ptr::eq(picked, expected)
        ));

        Ok(())
    }

    #[test]
    fn points_cashback_on_rateless_card_fails() {
        let card = CreditCard::new(CardId(0), "Visa");
        let benefits = [cashback(0, 50)];

        assert!(matches!(
            card_bonus(&card, &benefits, Decimal::from(10)),
            Err(GradingError::MissingPointsRate { card: CardId(0) })
        ));
    }
}
