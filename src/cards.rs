//! Credit Cards

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Credit card identifier.
///
/// Card ids are totally ordered; the ranker uses that order to break ties.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A credit card in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditCard {
    id: CardId,
    name: String,
    points_rate: Option<Decimal>,
}

impl CreditCard {
    /// Creates a card that does not offer points.
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            points_rate: None,
        }
    }

    /// Creates a card whose points are worth `points_rate` currency units each.
    pub fn with_points_rate(id: CardId, name: impl Into<String>, points_rate: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            points_rate: Some(points_rate),
        }
    }

    /// Returns the card id
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Monetary value of a single point, if the card has a points programme.
    pub fn points_rate(&self) -> Option<Decimal> {
        self.points_rate
    }
}
