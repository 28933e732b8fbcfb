//! Benefit Fixtures

use serde::Deserialize;

use crate::{
    benefits::{Benefit, BenefitKind, CashbackUnit},
    businesses::BusinessId,
    cards::CardId,
    fixtures::{
        FixtureError,
        values::{FixtureNumber, parse_value},
    },
};

/// Wrapper for benefits in YAML.
///
/// Benefits are a list so that catalog order, which breaks ties, is the file order.
#[derive(Debug, Deserialize)]
pub struct BenefitsFixture {
    /// Benefits in catalog order
    pub benefits: Vec<BenefitFixture>,
}

/// Cashback unit as written in YAML
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashbackUnitFixture {
    /// Paid in points
    #[default]
    Points,

    /// Paid in money
    Money,
}

impl From<CashbackUnitFixture> for CashbackUnit {
    fn from(unit: CashbackUnitFixture) -> Self {
        match unit {
            CashbackUnitFixture::Points => CashbackUnit::Points,
            CashbackUnitFixture::Money => CashbackUnit::Money,
        }
    }
}

/// Benefit fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BenefitFixture {
    /// Discount benefit
    Discount {
        /// Card key
        card: String,

        /// Business key, if scoped
        #[serde(default)]
        business: Option<String>,

        /// `"10%"` or a flat currency amount
        value: FixtureNumber,
    },

    /// Points benefit
    Points {
        /// Card key
        card: String,

        /// Business key, if scoped
        #[serde(default)]
        business: Option<String>,

        /// `"5%"` of the amount in points, or a flat point count
        value: FixtureNumber,
    },

    /// Cashback benefit
    Cashback {
        /// Card key
        card: String,

        /// Business key, if scoped
        #[serde(default)]
        business: Option<String>,

        /// Payout unit, points unless stated
        #[serde(default)]
        unit: CashbackUnitFixture,

        /// Percentage or flat amount in `unit`
        value: FixtureNumber,
    },
}

impl BenefitFixture {
    /// Card key the benefit belongs to
    pub fn card(&self) -> &str {
        match self {
            BenefitFixture::Discount { card, .. }
            | BenefitFixture::Points { card, .. }
            | BenefitFixture::Cashback { card, .. } => card,
        }
    }

    /// Business key the benefit is scoped to
    pub fn business(&self) -> Option<&str> {
        match self {
            BenefitFixture::Discount { business, .. }
            | BenefitFixture::Points { business, .. }
            | BenefitFixture::Cashback { business, .. } => business.as_deref(),
        }
    }

    /// Convert to a [`Benefit`], resolving card and business keys with the given lookups.
    ///
    /// # Errors
    ///
    /// Returns an error if a key does not resolve or the value is invalid.
    pub fn try_into_benefit(
        self,
        card_id: impl Fn(&str) -> Result<CardId, FixtureError>,
        business_id: impl Fn(&str) -> Result<BusinessId, FixtureError>,
    ) -> Result<Benefit, FixtureError> {
        let card = card_id(self.card())?;
        let business = self.business().map(business_id).transpose()?;

        let (kind, value) = match &self {
            BenefitFixture::Discount { value, .. } => (BenefitKind::Discount, value),
            BenefitFixture::Points { value, .. } => (BenefitKind::Points, value),
            BenefitFixture::Cashback { unit, value, .. } => {
                (BenefitKind::Cashback((*unit).into()), value)
            }
        };

        let value = parse_value(value)?;

        Ok(match business {
            Some(business) => Benefit::at_business(card, business, kind, value),
            None => Benefit::new(card, kind, value),
        })
    }
}
