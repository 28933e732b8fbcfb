//! Cardwise prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    benefits::{Benefit, BenefitKind, BenefitValue, CashbackUnit, ValueKind},
    businesses::{Business, BusinessId},
    cards::{CardId, CreditCard},
    catalog::{Catalog, CatalogStore, IntegrityIssue},
    fixtures::{Fixture, FixtureError},
    grading::{GradedBenefit, GradingError, grade},
    preferences::{PreferenceStore, ProfitType, UserDirectory, UserPreferences},
    pricing::PricingError,
    ranking::{EvaluatedCreditCard, Ranker, Ranking, RankingError, recommend},
    report::ReportError,
    selection::{HighestGrade, SelectionPolicy},
    stacking::{CardBonus, card_bonus},
    transactions::Transaction,
};
