//! Catalog
//!
//! The reference data the ranker reads: cards, businesses and the benefits cards offer.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    benefits::Benefit,
    businesses::{Business, BusinessId},
    cards::{CardId, CreditCard},
};

/// Supplies catalog data to the ranker.
pub trait CatalogStore {
    /// Look up a card.
    fn card(&self, id: CardId) -> Option<&CreditCard>;

    /// Look up a business.
    fn business(&self, id: BusinessId) -> Option<&Business>;

    /// All benefits, in catalog order.
    fn benefits(&self) -> &[Benefit];
}

/// Data-integrity problems found in a catalog.
///
/// None of these stop a ranking; they are reported so the catalog can be fixed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// A card has more than one unconditional cashback benefit.
    #[error("card {card} has {count} standing cashback benefits; the highest graded one is used")]
    DuplicateStandingBonus {
        /// Card with the duplicates
        card: CardId,

        /// Number of standing cashback benefits
        count: usize,
    },

    /// A card offers points-denominated benefits but has no points-to-money rate.
    #[error("card {card} offers points but has no points-to-money rate")]
    MissingPointsRate {
        /// Card missing the rate
        card: CardId,
    },

    /// A benefit references a card the catalog does not contain.
    #[error("benefit references unknown card {card}")]
    UnknownCard {
        /// Missing card id
        card: CardId,
    },

    /// A benefit is scoped to a business the catalog does not contain.
    #[error("benefit of card {card} references unknown business {business}")]
    UnknownBusiness {
        /// Card offering the benefit
        card: CardId,

        /// Missing business id
        business: BusinessId,
    },
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: FxHashMap<CardId, CreditCard>,
    businesses: FxHashMap<BusinessId, Business>,
    benefits: Vec<Benefit>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card, returning the card it replaced if the id was already present.
    pub fn insert_card(&mut self, card: CreditCard) -> Option<CreditCard> {
        self.cards.insert(card.id(), card)
    }

    /// Add a business, returning the business it replaced if the id was already present.
    pub fn insert_business(&mut self, business: Business) -> Option<Business> {
        self.businesses.insert(business.id, business)
    }

    /// Append a benefit.
    pub fn push_benefit(&mut self, benefit: Benefit) {
        self.benefits.push(benefit);
    }

    /// Builder-style [`Catalog::insert_card`].
    #[must_use]
    pub fn with_card(mut self, card: CreditCard) -> Self {
        self.insert_card(card);
        self
    }

    /// Builder-style [`Catalog::insert_business`].
    #[must_use]
    pub fn with_business(mut self, business: Business) -> Self {
        self.insert_business(business);
        self
    }

    /// Builder-style [`Catalog::push_benefit`].
    #[must_use]
    pub fn with_benefit(mut self, benefit: Benefit) -> Self {
        self.push_benefit(benefit);
        self
    }

    /// All cards keyed by id
    pub fn cards(&self) -> &FxHashMap<CardId, CreditCard> {
        &self.cards
    }

    /// All businesses keyed by id
    pub fn businesses(&self) -> &FxHashMap<BusinessId, Business> {
        &self.businesses
    }

    /// Find a business by display name.
    pub fn business_named(&self, name: &str) -> Option<&Business> {
        self.businesses.values().find(|business| business.name == name)
    }

    /// Checks the catalog for data-integrity problems.
    ///
    /// Issues are ordered by kind, then by card id.
    pub fn audit(&self) -> Vec<IntegrityIssue> {
        let mut standing: FxHashMap<CardId, usize> = FxHashMap::default();
        let mut rateless: Vec<CardId> = Vec::new();
        let mut unknown_cards: Vec<CardId> = Vec::new();
        let mut unknown_businesses: Vec<(CardId, BusinessId)> = Vec::new();

        for benefit in &self.benefits {
            let card_id = benefit.card();

            if benefit.is_standing_bonus() {
                *standing.entry(card_id).or_default() += 1;
            }

            match self.cards.get(&card_id) {
                None => unknown_cards.push(card_id),
                Some(card) if benefit.kind().needs_points_rate() && card.points_rate().is_none() => {
                    rateless.push(card_id);
                }
                Some(_) => {}
            }

            if let Some(business) = benefit.business()
                && !self.businesses.contains_key(&business)
            {
                unknown_businesses.push((card_id, business));
            }
        }

        let mut duplicates: Vec<(CardId, usize)> =
            standing.into_iter().filter(|(_, count)| *count > 1).collect();

        duplicates.sort_unstable();
        rateless.sort_unstable();
        rateless.dedup();
        unknown_cards.sort_unstable();
        unknown_cards.dedup();
        unknown_businesses.sort_unstable();
        unknown_businesses.dedup();

        duplicates
            .into_iter()
            .map(|(card, count)| IntegrityIssue::DuplicateStandingBonus { card, count })
            .chain(
                rateless
                    .into_iter()
                    .map(|card| IntegrityIssue::MissingPointsRate { card }),
            )
            .chain(
                unknown_cards
                    .into_iter()
                    .map(|card| IntegrityIssue::UnknownCard { card }),
            )
            .chain(
                unknown_businesses
                    .into_iter()
                    .map(|(card, business)| IntegrityIssue::UnknownBusiness { card, business }),
            )
            .collect()
    }
}

impl CatalogStore for Catalog {
    fn card(&self, id: CardId) -> Option<&CreditCard> {
        self.cards.get(&id)
    }

    fn business(&self, id: BusinessId) -> Option<&Business> {
        self.businesses.get(&id)
    }

    fn benefits(&self) -> &[Benefit] {
        &self.benefits
    }
}
