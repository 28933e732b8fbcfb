//! Transactions

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{businesses::BusinessId, pricing::to_decimal};

/// A purchase to recommend a card for.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction<'a> {
    amount: Money<'a, Currency>,
    business: Option<BusinessId>,
}

impl<'a> Transaction<'a> {
    /// A purchase that is not tied to a particular business.
    pub fn new(amount: Money<'a, Currency>) -> Self {
        Self {
            amount,
            business: None,
        }
    }

    /// A purchase at `business`.
    pub fn at(amount: Money<'a, Currency>, business: BusinessId) -> Self {
        Self {
            amount,
            business: Some(business),
        }
    }

    /// Purchase amount
    pub fn amount(&self) -> &Money<'a, Currency> {
        &self.amount
    }

    /// Purchase amount in major units
    pub fn amount_decimal(&self) -> Decimal {
        to_decimal(&self.amount)
    }

    /// Business being paid, if known
    pub fn business(&self) -> Option<BusinessId> {
        self.business
    }

    /// Currency of the purchase
    pub fn currency(&self) -> &'a Currency {
        self.amount.currency()
    }
}
