//! Card and Business Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    businesses::{Business, BusinessId},
    cards::{CardId, CreditCard},
    fixtures::{
        FixtureError,
        values::{FixtureNumber, parse_decimal},
    },
};

/// Wrapper for cards in YAML
#[derive(Debug, Deserialize)]
pub struct CardsFixture {
    /// Map of card key -> card fixture
    pub cards: FxHashMap<String, CardFixture>,
}

/// Card Fixture
#[derive(Debug, Deserialize)]
pub struct CardFixture {
    /// Card id
    pub id: u32,

    /// Card name
    pub name: String,

    /// Monetary value of one point (e.g., `0.01`)
    #[serde(default)]
    pub points_rate: Option<FixtureNumber>,
}

impl TryFrom<CardFixture> for CreditCard {
    type Error = FixtureError;

    fn try_from(fixture: CardFixture) -> Result<Self, Self::Error> {
        let id = CardId(fixture.id);

        match fixture.points_rate {
            Some(rate) => Ok(CreditCard::with_points_rate(
                id,
                fixture.name,
                parse_decimal(&rate)?,
            )),
            None => Ok(CreditCard::new(id, fixture.name)),
        }
    }
}

/// Wrapper for businesses in YAML
#[derive(Debug, Deserialize)]
pub struct BusinessesFixture {
    /// Map of business key -> business fixture
    pub businesses: FxHashMap<String, BusinessFixture>,
}

/// Business Fixture
#[derive(Debug, Deserialize)]
pub struct BusinessFixture {
    /// Business id
    pub id: u32,

    /// Business name
    pub name: String,
}

impl From<BusinessFixture> for Business {
    fn from(fixture: BusinessFixture) -> Self {
        Business::new(BusinessId(fixture.id), fixture.name)
    }
}
