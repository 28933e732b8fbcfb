//! Ranking
//!
//! Ranks the cards a user holds for one transaction.
//!
//! Each held card is scored in three steps:
//!
//! 1. Every benefit of the card that applies to the transaction (card-wide, or scoped to the
//!    transaction's business) and that the user's [`ProfitType`](crate::preferences::ProfitType)
//!    admits is graded, and the [`SelectionPolicy`] picks the card's primary benefit.
//! 2. The card's standing cashback bonus is added on top, whether or not a primary benefit was
//!    found. Cashback scoped to a business never competes and is not stacked.
//! 3. Cards are sorted by total grade, highest first, ties broken by ascending card id.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    benefits::Benefit,
    businesses::{Business, BusinessId},
    catalog::CatalogStore,
    cards::{CardId, CreditCard},
    grading::{GradedBenefit, GradingError, graded},
    preferences::{PreferenceStore, UserPreferences},
    pricing::{PricingError, to_money},
    selection::{HighestGrade, SelectionPolicy},
    stacking::card_bonus,
    transactions::Transaction,
};

/// Errors that can occur while ranking cards.
#[derive(Debug, Error, PartialEq)]
pub enum RankingError {
    /// A benefit could not be graded (usually a card missing its points-to-money rate).
    #[error(transparent)]
    Grading(#[from] GradingError),

    /// A grade could not be expressed in the transaction's currency.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The preference store has no entry for the user.
    #[error("no preferences stored for user {0}")]
    UnknownUser(String),
}

/// One held card's evaluation for a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedCreditCard<'a> {
    card: CardId,
    grade: Decimal,
    profit: Money<'a, Currency>,
    base: Decimal,
    bonus: Decimal,
    benefit: Option<Benefit>,
}

impl<'a> EvaluatedCreditCard<'a> {
    /// An evaluation worth nothing, used for cards with no applicable benefits.
    pub fn zero(card: CardId, currency: &'a Currency) -> Self {
        Self {
            card,
            grade: Decimal::ZERO,
            profit: Money::from_minor(0, currency),
            base: Decimal::ZERO,
            bonus: Decimal::ZERO,
            benefit: None,
        }
    }

    /// Evaluated card
    pub fn card(&self) -> CardId {
        self.card
    }

    /// Total grade: primary benefit plus cashback bonus.
    pub fn grade(&self) -> Decimal {
        self.grade
    }

    /// Estimated profit in the transaction's currency.
    ///
    /// This is the grade rounded to the currency's minor units.
    pub fn profit(&self) -> &Money<'a, Currency> {
        &self.profit
    }

    /// Grade of the primary benefit alone
    pub fn base(&self) -> Decimal {
        self.base
    }

    /// Cashback layered on top of the primary benefit
    pub fn bonus(&self) -> Decimal {
        self.bonus
    }

    /// The primary benefit, if the card had one
    pub fn benefit(&self) -> Option<&Benefit> {
        self.benefit.as_ref()
    }
}

/// Held cards ordered best first.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<'a> {
    cards: Vec<EvaluatedCreditCard<'a>>,
}

impl<'a> Ranking<'a> {
    /// The best card, if the user holds any.
    pub fn best(&self) -> Option<&EvaluatedCreditCard<'a>> {
        self.cards.first()
    }

    /// Evaluations in rank order
    pub fn as_slice(&self) -> &[EvaluatedCreditCard<'a>] {
        &self.cards
    }

    /// Iterate evaluations in rank order
    pub fn iter(&self) -> std::slice::Iter<'_, EvaluatedCreditCard<'a>> {
        self.cards.iter()
    }

    /// Number of ranked cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether no cards were ranked
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Consume the ranking, returning the evaluations in rank order.
    pub fn into_vec(self) -> Vec<EvaluatedCreditCard<'a>> {
        self.cards
    }
}

impl<'r, 'a> IntoIterator for &'r Ranking<'a> {
    type Item = &'r EvaluatedCreditCard<'a>;
    type IntoIter = std::slice::Iter<'r, EvaluatedCreditCard<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// Ranks a user's cards against an injected catalog.
#[derive(Debug)]
pub struct Ranker<'c, C: CatalogStore, P: SelectionPolicy = HighestGrade> {
    catalog: &'c C,
    policy: P,
}

impl<'c, C: CatalogStore> Ranker<'c, C> {
    /// Ranker picking each card's highest graded benefit.
    pub fn new(catalog: &'c C) -> Self {
        Self::with_policy(catalog, HighestGrade)
    }
}

impl<'c, C: CatalogStore, P: SelectionPolicy> Ranker<'c, C, P> {
    /// Ranker with a custom selection policy.
    pub fn with_policy(catalog: &'c C, policy: P) -> Self {
        Self { catalog, policy }
    }

    /// Ranks the user's held cards for `transaction`.
    ///
    /// Held cards missing from the catalog are ranked with a zero grade.
    ///
    /// # Errors
    ///
    /// - [`RankingError::Grading`]: a benefit needed the card's points rate and it has none.
    ///   Only kinds the user's profit type admits are graded, so whether this occurs depends
    ///   on [`UserPreferences::profit_type`].
    /// - [`RankingError::Pricing`]: a grade could not be represented in the transaction currency.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(
            held = preferences.held_cards().len(),
            profit_type = ?preferences.profit_type(),
            business = ?transaction.business(),
        )
    )]
    pub fn recommend<'a>(
        &self,
        preferences: &UserPreferences,
        transaction: &Transaction<'a>,
    ) -> Result<Ranking<'a>, RankingError> {
        let amount = transaction.amount_decimal();
        let currency = transaction.currency();
        let by_card = qualifying_benefits(self.catalog.benefits(), preferences, transaction);

        let mut cards = Vec::with_capacity(preferences.held_cards().len());

        for &card_id in preferences.held_cards() {
            let Some(card) = self.catalog.card(card_id) else {
                debug!(card = %card_id, "held card is not in the catalog");
                cards.push(EvaluatedCreditCard::zero(card_id, currency));
                continue;
            };

            let benefits = by_card.get(&card_id).map_or(&[][..], SmallVec::as_slice);

            cards.push(self.evaluate(card, benefits, preferences, transaction, amount)?);
        }

        cards.sort_by(|a, b| b.grade.cmp(&a.grade).then_with(|| a.card.cmp(&b.card)));

        Ok(Ranking { cards })
    }

    /// Looks up `user` in `store` and ranks their held cards for `transaction`.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::UnknownUser`] if the store has no preferences for `user`, and
    /// otherwise the errors of [`Ranker::recommend`].
    pub fn recommend_for<'a>(
        &self,
        store: &impl PreferenceStore,
        user: &str,
        transaction: &Transaction<'a>,
    ) -> Result<Ranking<'a>, RankingError> {
        let preferences = store
            .preferences(user)
            .ok_or_else(|| RankingError::UnknownUser(user.to_string()))?;

        self.recommend(preferences, transaction)
    }

    fn evaluate<'a>(
        &self,
        card: &CreditCard,
        benefits: &[&Benefit],
        preferences: &UserPreferences,
        transaction: &Transaction<'a>,
        amount: Decimal,
    ) -> Result<EvaluatedCreditCard<'a>, RankingError> {
        let card_id = card.id();
        let profit_type = preferences.profit_type();
        let overflow = || GradingError::Overflow { card: card_id };

        let candidates = benefits
            .iter()
            .filter(|benefit| profit_type.admits(benefit.kind()))
            .map(|benefit| graded(benefit, amount, card.points_rate()))
            .collect::<Result<SmallVec<[GradedBenefit<'_>; 4]>, _>>()?;

        let primary = self.policy.select(&candidates);
        let base = primary.map_or(Decimal::ZERO, GradedBenefit::grade);

        let standing = card_bonus(card, benefits.iter().copied(), amount)?;

        if standing.is_ambiguous() {
            warn!(
                card = %card_id,
                candidates = standing.candidates(),
                "card has more than one standing cashback benefit; using the highest graded"
            );
        }

        let bonus = standing.grade();
        let grade = base.checked_add(bonus).ok_or_else(overflow)?;

        debug!(
            card = %card_id,
            candidates = candidates.len(),
            %base,
            %bonus,
            %grade,
            "evaluated card"
        );

        Ok(EvaluatedCreditCard {
            card: card_id,
            grade,
            profit: to_money(grade, transaction.currency())?,
            base,
            bonus,
            benefit: primary.map(|selected| selected.benefit().clone()),
        })
    }
}

/// Groups the benefits that apply to `transaction` by held card, keeping catalog order.
fn qualifying_benefits<'b>(
    benefits: &'b [Benefit],
    preferences: &UserPreferences,
    transaction: &Transaction<'_>,
) -> FxHashMap<CardId, SmallVec<[&'b Benefit; 4]>> {
    let mut by_card: FxHashMap<CardId, SmallVec<[&'b Benefit; 4]>> = FxHashMap::default();

    for benefit in benefits {
        if preferences.holds(benefit.card()) && benefit.applies_at(transaction.business()) {
            by_card.entry(benefit.card()).or_default().push(benefit);
        }
    }

    by_card
}

/// Catalog view over borrowed benefits and cards.
struct CatalogView<'c> {
    benefits: &'c [Benefit],
    cards: &'c FxHashMap<CardId, CreditCard>,
}

impl CatalogStore for CatalogView<'_> {
    fn card(&self, id: CardId) -> Option<&CreditCard> {
        self.cards.get(&id)
    }

    fn business(&self, _id: BusinessId) -> Option<&Business> {
        None
    }

    fn benefits(&self) -> &[Benefit] {
        self.benefits
    }
}

/// Ranks the user's held cards for `transaction` using the highest-grade policy.
///
/// The result holds one evaluation per held card, best first.
///
/// # Errors
///
/// See [`Ranker::recommend`].
pub fn recommend<'a>(
    benefits: &[Benefit],
    cards: &FxHashMap<CardId, CreditCard>,
    preferences: &UserPreferences,
    transaction: &Transaction<'a>,
) -> Result<Vec<EvaluatedCreditCard<'a>>, RankingError> {
    let view = CatalogView { benefits, cards };

    Ok(Ranker::new(&view)
        .recommend(preferences, transaction)?
        .into_vec())
}
