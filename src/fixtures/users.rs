//! User Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::preferences::ProfitType;

/// Wrapper for users in YAML
#[derive(Debug, Deserialize)]
pub struct UsersFixture {
    /// Map of user name -> user fixture
    pub users: FxHashMap<String, UserFixture>,
}

/// User Fixture
#[derive(Debug, Deserialize)]
pub struct UserFixture {
    /// Held card keys, in the user's order
    pub cards: Vec<String>,

    /// Profit type (`lowest_price`, `points` or `nominal_profit`)
    pub profit: ProfitType,
}
