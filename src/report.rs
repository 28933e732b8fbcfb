//! Report
//!
//! Renders a [`Ranking`] as a table for display.

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    benefits::{Benefit, BenefitKind, BenefitValue, CashbackUnit},
    catalog::CatalogStore,
    ranking::{EvaluatedCreditCard, Ranking},
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

impl Ranking<'_> {
    /// Writes the ranking as a table, followed by the recommended card.
    ///
    /// Card and business names are looked up in `catalog`; ids are shown for anything missing.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if writing to `out` fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        catalog: &impl CatalogStore,
    ) -> Result<(), ReportError> {
        let mut builder = Builder::default();

        builder.push_record(["#", "Card", "Benefit", "Base", "Bonus", "Grade", "Profit"]);

        for (rank, evaluated) in self.iter().enumerate() {
            builder.push_record(row(rank + 1, evaluated, catalog));
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..7), Alignment::right());

        writeln!(out, "\n{table}")?;

        match self.best() {
            Some(best) => writeln!(
                out,
                " Recommended: \x1b[1m{}\x1b[0m ({})\n",
                card_name(best, catalog),
                best.profit()
            )?,
            None => writeln!(out, " No cards held.\n")?,
        }

        Ok(())
    }
}

fn row(
    rank: usize,
    evaluated: &EvaluatedCreditCard<'_>,
    catalog: &impl CatalogStore,
) -> [String; 7] {
    [
        rank.to_string(),
        card_name(evaluated, catalog),
        evaluated
            .benefit()
            .map_or_else(|| "-".to_string(), |benefit| describe(benefit, catalog)),
        amount(evaluated.base()),
        amount(evaluated.bonus()),
        amount(evaluated.grade()),
        evaluated.profit().to_string(),
    ]
}

fn card_name(evaluated: &EvaluatedCreditCard<'_>, catalog: &impl CatalogStore) -> String {
    catalog.card(evaluated.card()).map_or_else(
        || format!("unknown card {}", evaluated.card()),
        |card| card.name().to_string(),
    )
}

fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Short human description of a benefit, e.g. `10% off at Golda` or `50 points`.
pub fn describe(benefit: &Benefit, catalog: &impl CatalogStore) -> String {
    let number = benefit.value().number().normalize();
    let percent = matches!(benefit.value(), BenefitValue::Percentage(_));

    let what = match (benefit.kind(), percent) {
        (BenefitKind::Discount, true) => format!("{number}% off"),
        (BenefitKind::Discount, false) => format!("{number} off"),
        (BenefitKind::Points | BenefitKind::Cashback(CashbackUnit::Points), true) => {
            format!("{number}% in points")
        }
        (BenefitKind::Points | BenefitKind::Cashback(CashbackUnit::Points), false) => {
            format!("{number} points")
        }
        (BenefitKind::Cashback(CashbackUnit::Money), true) => format!("{number}% cashback"),
        (BenefitKind::Cashback(CashbackUnit::Money), false) => format!("{number} cashback"),
    };

    match benefit.business() {
        None => what,
        Some(id) => match catalog.business(id) {
            Some(business) => format!("{what} at {}", business.name),
            None => format!("{what} at business {id}"),
        },
    }
}
