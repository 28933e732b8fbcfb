//! Fixtures
//!
//! Loads a catalog and its users from YAML files laid out as
//! `<base>/{cards,businesses,benefits,users}/<set>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::warn;

use crate::{
    businesses::{Business, BusinessId},
    cards::{CardId, CreditCard},
    catalog::Catalog,
    fixtures::{
        benefits::BenefitsFixture,
        cards::{BusinessesFixture, CardsFixture},
        users::UsersFixture,
    },
    preferences::{UserDirectory, UserPreferences},
};

pub mod benefits;
pub mod cards;
pub mod users;
pub mod values;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid number
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Card not found
    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// Business not found
    #[error("Business not found: {0}")]
    BusinessNotFound(String),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Two cards share an id
    #[error("Duplicate card id {id} for card {key}")]
    DuplicateCardId {
        /// Repeated id
        id: CardId,

        /// Key of the second card using it
        key: String,
    },

    /// Two businesses share an id
    #[error("Duplicate business id {id} for business {key}")]
    DuplicateBusinessId {
        /// Repeated id
        id: BusinessId,

        /// Key of the second business using it
        key: String,
    },
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog built from the loaded files
    catalog: Catalog,

    /// Users built from the loaded files
    users: UserDirectory,

    /// String key -> id mappings for lookups
    card_keys: FxHashMap<String, CardId>,
    business_keys: FxHashMap<String, BusinessId>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
            users: UserDirectory::new(),
            card_keys: FxHashMap::default(),
            business_keys: FxHashMap::default(),
        }
    }

    fn read(&self, category: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));

        Ok(fs::read_to_string(file_path)?)
    }

    /// Load cards from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if two cards share an id.
    pub fn load_cards(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CardsFixture = serde_norway::from_str(&self.read("cards", name)?)?;

        for (key, card_fixture) in fixture.cards {
            let card = CreditCard::try_from(card_fixture)?;
            let id = card.id();

            if self.catalog.insert_card(card).is_some() {
                return Err(FixtureError::DuplicateCardId { id, key });
            }

            self.card_keys.insert(key, id);
        }

        Ok(self)
    }

    /// Load businesses from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if two businesses share an id.
    pub fn load_businesses(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: BusinessesFixture =
            serde_norway::from_str(&self.read("businesses", name)?)?;

        for (key, business_fixture) in fixture.businesses {
            let business = Business::from(business_fixture);
            let id = business.id;

            if self.catalog.insert_business(business).is_some() {
                return Err(FixtureError::DuplicateBusinessId { id, key });
            }

            self.business_keys.insert(key, id);
        }

        Ok(self)
    }

    /// Load benefits from a YAML fixture file
    ///
    /// Cards and businesses must be loaded first. Integrity issues in the resulting catalog
    /// are logged as warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a benefit references a card
    /// or business key that has not been loaded.
    pub fn load_benefits(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: BenefitsFixture = serde_norway::from_str(&self.read("benefits", name)?)?;

        for benefit_fixture in fixture.benefits {
            let benefit = benefit_fixture.try_into_benefit(
                |key| self.card_id(key),
                |key| self.business_id(key),
            )?;

            self.catalog.push_benefit(benefit);
        }

        for issue in self.catalog.audit() {
            warn!(fixture = name, %issue, "catalog integrity issue");
        }

        Ok(self)
    }

    /// Load users from a YAML fixture file
    ///
    /// Cards must be loaded first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a user holds a card key that
    /// has not been loaded.
    pub fn load_users(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: UsersFixture = serde_norway::from_str(&self.read("users", name)?)?;

        for (user, user_fixture) in fixture.users {
            let cards = user_fixture
                .cards
                .iter()
                .map(|key| self.card_id(key))
                .collect::<Result<Vec<_>, _>>()?;

            self.users
                .insert(user, UserPreferences::new(cards, user_fixture.profit));
        }

        Ok(self)
    }

    /// Load a complete fixture set (cards, businesses, benefits and users with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_at("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_at(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_cards(name)?
            .load_businesses(name)?
            .load_benefits(name)?
            .load_users(name)?;

        Ok(fixture)
    }

    /// Get a card id by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the card is not found.
    pub fn card_id(&self, key: &str) -> Result<CardId, FixtureError> {
        self.card_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::CardNotFound(key.to_string()))
    }

    /// Get a business id by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the business is not found.
    pub fn business_id(&self, key: &str) -> Result<BusinessId, FixtureError> {
        self.business_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::BusinessNotFound(key.to_string()))
    }

    /// Get a user's preferences by name
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found.
    pub fn user(&self, name: &str) -> Result<&UserPreferences, FixtureError> {
        use crate::preferences::PreferenceStore;

        self.users
            .preferences(name)
            .ok_or_else(|| FixtureError::UserNotFound(name.to_string()))
    }

    /// The loaded catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The loaded users
    pub fn users(&self) -> &UserDirectory {
        &self.users
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
