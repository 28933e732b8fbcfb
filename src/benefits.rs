//! Benefits
//!
//! A benefit is something a card gives back on a purchase: a discount, points, or cashback.
//! Benefits are either card-wide or scoped to a single business.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::{businesses::BusinessId, cards::CardId};

/// How a benefit's value is expressed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A percentage of the transaction amount.
    Percentage,

    /// A flat number: currency units for discounts, a count for points.
    FlatNumber,
}

/// Unit a cashback benefit is paid out in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CashbackUnit {
    /// Paid as points, converted with the card's points-to-money rate.
    #[default]
    Points,

    /// Paid as money.
    Money,
}

/// The economic mechanism behind a benefit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BenefitKind {
    /// Lowers the price paid.
    Discount,

    /// Earns loyalty points.
    Points,

    /// Standing bonus paid back on top of any other benefit.
    Cashback(CashbackUnit),
}

impl BenefitKind {
    /// Cashback in the default unit (points).
    pub const CASHBACK: Self = Self::Cashback(CashbackUnit::Points);

    /// Whether this is any kind of cashback.
    pub fn is_cashback(self) -> bool {
        matches!(self, Self::Cashback(_))
    }

    /// Whether grading this kind of benefit needs the card's points-to-money rate.
    pub fn needs_points_rate(self) -> bool {
        matches!(self, Self::Points | Self::Cashback(CashbackUnit::Points))
    }
}

/// A benefit value together with how it is interpreted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BenefitValue {
    /// A percentage of the transaction amount.
    Percentage(Percentage),

    /// A flat amount (currency units or a point count, depending on the benefit kind).
    Flat(Decimal),
}

impl BenefitValue {
    /// Builds a percentage value from percentage points, so `10` is 10%.
    pub fn percent(points: Decimal) -> Self {
        Self::Percentage(Percentage::from(points / Decimal::ONE_HUNDRED))
    }

    /// The value kind
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Percentage(_) => ValueKind::Percentage,
            Self::Flat(_) => ValueKind::FlatNumber,
        }
    }

    /// The raw number: percentage points for percentages, the amount otherwise.
    pub fn number(&self) -> Decimal {
        match self {
            Self::Percentage(percent) => *percent * Decimal::ONE_HUNDRED,
            Self::Flat(amount) => *amount,
        }
    }
}

/// A benefit offered by a credit card.
#[derive(Debug, Clone, PartialEq)]
pub struct Benefit {
    card: CardId,
    business: Option<BusinessId>,
    kind: BenefitKind,
    value: BenefitValue,
}

impl Benefit {
    /// Creates a card-wide benefit.
    pub fn new(card: CardId, kind: BenefitKind, value: BenefitValue) -> Self {
        Self {
            card,
            business: None,
            kind,
            value,
        }
    }

    /// Creates a benefit that only applies at `business`.
    pub fn at_business(
        card: CardId,
        business: BusinessId,
        kind: BenefitKind,
        value: BenefitValue,
    ) -> Self {
        Self {
            card,
            business: Some(business),
            kind,
            value,
        }
    }

    /// Card offering the benefit
    pub fn card(&self) -> CardId {
        self.card
    }

    /// Business the benefit is scoped to, if any
    pub fn business(&self) -> Option<BusinessId> {
        self.business
    }

    /// Benefit kind
    pub fn kind(&self) -> BenefitKind {
        self.kind
    }

    /// Benefit value
    pub fn value(&self) -> &BenefitValue {
        &self.value
    }

    /// Value kind
    pub fn value_kind(&self) -> ValueKind {
        self.value.kind()
    }

    /// A card-wide benefit has no business scope.
    pub fn is_card_wide(&self) -> bool {
        self.business.is_none()
    }

    /// A card's standing bonus: cashback without a business scope.
    pub fn is_standing_bonus(&self) -> bool {
        self.kind.is_cashback() && self.is_card_wide()
    }

    /// Whether the benefit applies to a purchase at `business` (or at no particular business).
    ///
    /// Card-wide benefits always apply; scoped benefits only apply at their own business.
    pub fn applies_at(&self, business: Option<BusinessId>) -> bool {
        match self.business {
            None => true,
            Some(scope) => business == Some(scope),
        }
    }
}
