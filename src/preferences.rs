//! User Preferences

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{benefits::BenefitKind, cards::CardId};

/// The lens a user compares benefits through.
///
/// Cashback is never a profit type; it is layered on top of whichever benefit wins.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitType {
    /// Prefer discounts.
    LowestPrice,

    /// Prefer points.
    Points,

    /// Compare discounts and points on one monetary scale.
    NominalProfit,
}

impl ProfitType {
    /// Whether a benefit of `kind` competes for a card's primary benefit under this lens.
    pub fn admits(self, kind: BenefitKind) -> bool {
        match self {
            ProfitType::LowestPrice => kind == BenefitKind::Discount,
            ProfitType::Points => kind == BenefitKind::Points,
            ProfitType::NominalProfit => {
                matches!(kind, BenefitKind::Discount | BenefitKind::Points)
            }
        }
    }
}

/// The cards a user holds and how they want them compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPreferences {
    held_cards: Vec<CardId>,
    profit_type: ProfitType,
}

impl UserPreferences {
    /// Creates preferences for the given cards.
    ///
    /// The user's order is kept; repeated ids are dropped after their first occurrence.
    pub fn new(held_cards: impl IntoIterator<Item = CardId>, profit_type: ProfitType) -> Self {
        let mut unique: Vec<CardId> = Vec::new();

        for card in held_cards {
            if !unique.contains(&card) {
                unique.push(card);
            }
        }

        Self {
            held_cards: unique,
            profit_type,
        }
    }

    /// Held card ids in the user's order
    pub fn held_cards(&self) -> &[CardId] {
        &self.held_cards
    }

    /// Whether the user holds `card`
    pub fn holds(&self, card: CardId) -> bool {
        self.held_cards.contains(&card)
    }

    /// The chosen profit type
    pub fn profit_type(&self) -> ProfitType {
        self.profit_type
    }
}

/// Supplies user preferences to the ranker's callers.
pub trait PreferenceStore {
    /// Look up the preferences for `user`.
    fn preferences(&self, user: &str) -> Option<&UserPreferences>;
}

/// In-memory preference store keyed by user name.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: FxHashMap<String, UserPreferences>,
}

impl UserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user's preferences.
    pub fn insert(&mut self, user: impl Into<String>, preferences: UserPreferences) {
        self.users.insert(user.into(), preferences);
    }

    /// Number of users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl PreferenceStore for UserDirectory {
    fn preferences(&self, user: &str) -> Option<&UserPreferences> {
        self.users.get(user)
    }
}
