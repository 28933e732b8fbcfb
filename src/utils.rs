//! Utils

use clap::Parser;

/// Arguments for the recommend example
#[derive(Debug, Parser)]
pub struct ExampleRecommendArgs {
    /// Fixture set to load cards, businesses, benefits and users from
    #[clap(short, long, default_value = "default")]
    pub fixture: String,

    /// User whose held cards are ranked
    #[clap(short, long)]
    pub user: String,

    /// Transaction amount, e.g. "1000 ILS"
    #[clap(short, long)]
    pub amount: String,

    /// Business the transaction happens at, by display name or fixture key
    #[clap(short, long)]
    pub business: Option<String>,
}
