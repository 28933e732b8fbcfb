//! Cardwise
//!
//! Cardwise recommends which of a user's credit cards to pay with. It normalises each card's
//! benefits into a comparable grade, stacks cashback on top of the best primary benefit, and
//! ranks the held cards by what the user stands to gain.

pub mod benefits;
pub mod businesses;
pub mod cards;
pub mod catalog;
pub mod fixtures;
pub mod grading;
pub mod preferences;
pub mod prelude;
pub mod pricing;
pub mod ranking;
pub mod report;
pub mod selection;
pub mod stacking;
pub mod transactions;
pub mod utils;
