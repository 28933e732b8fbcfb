//! Recommend Example
//!
//! This example ranks a user's cards for a single transaction.
//!
//! Use `-f` to load a fixture set by name
//! Use `-u` to pick the user whose cards are ranked
//! Use `-a` to give the transaction amount, e.g. `-a "1000 ILS"`
//! Use `-b` to give the business the transaction happens at, by name or fixture key
//!
//! Set `RUST_LOG=cardwise=debug` to see how each card was graded.

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cardwise::{
    fixtures::{Fixture, values::parse_money},
    ranking::Ranker,
    transactions::Transaction,
    utils::ExampleRecommendArgs,
};

/// Recommend Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = ExampleRecommendArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let amount = parse_money(&args.amount)?;

    let transaction = match args.business.as_deref() {
        Some(business) => {
            let id = match fixture.catalog().business_named(business) {
                Some(named) => named.id,
                None => fixture.business_id(business)?,
            };

            Transaction::at(amount, id)
        }
        None => Transaction::new(amount),
    };

    let start = Instant::now();

    let ranking =
        Ranker::new(fixture.catalog()).recommend_for(fixture.users(), &args.user, &transaction)?;

    let elapsed = start.elapsed().as_secs_f32();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    ranking.write_to(&mut handle, fixture.catalog())?;

    println!("Ranked for {} in {elapsed}s", transaction.amount());

    Ok(())
}
