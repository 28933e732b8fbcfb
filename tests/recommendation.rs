//! Integration tests for ranking a user's cards.
//!
//! The catalog used throughout:
//!
//! - Visa (#0, 0.01 per point): 10% off at Golda, 50 points standing cashback
//! - Isracard (#1, 0.02 per point): 100 points anywhere, 15 money cashback at Golda
//! - Max (#2, no points rate): 20 off at Aroma
//!
//! At 1000 ILS in Golda a discount seeker gets 100.5 from Visa (100 off plus 0.5 cashback)
//! and nothing from Isracard or Max. Isracard's Golda cashback is scoped to a business, so it
//! is never stacked.

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, ILS},
};
use testresult::TestResult;

use cardwise::prelude::*;

const GOLDA: BusinessId = BusinessId(1);
const AROMA: BusinessId = BusinessId(2);

const VISA: CardId = CardId(0);
const ISRACARD: CardId = CardId(1);
const MAX: CardId = CardId(2);

fn catalog() -> Catalog {
    Catalog::new()
        .with_card(CreditCard::with_points_rate(VISA, "Visa", Decimal::new(1, 2)))
        .with_card(CreditCard::with_points_rate(
            ISRACARD,
            "Isracard",
            Decimal::new(2, 2),
        ))
        .with_card(CreditCard::new(MAX, "Max"))
        .with_business(Business::new(GOLDA, "Golda"))
        .with_business(Business::new(AROMA, "Aroma"))
        .with_benefit(Benefit::at_business(
            VISA,
            GOLDA,
            BenefitKind::Discount,
            BenefitValue::percent(Decimal::from(10)),
        ))
        .with_benefit(Benefit::new(
            VISA,
            BenefitKind::CASHBACK,
            BenefitValue::Flat(Decimal::from(50)),
        ))
        .with_benefit(Benefit::new(
            ISRACARD,
            BenefitKind::Points,
            BenefitValue::Flat(Decimal::from(100)),
        ))
        .with_benefit(Benefit::at_business(
            ISRACARD,
            GOLDA,
            BenefitKind::Cashback(CashbackUnit::Money),
            BenefitValue::Flat(Decimal::from(15)),
        ))
        .with_benefit(Benefit::at_business(
            MAX,
            AROMA,
            BenefitKind::Discount,
            BenefitValue::Flat(Decimal::from(20)),
        ))
}

fn shekels(minor: i64) -> Money<'static, Currency> {
    Money::from_minor(minor, ILS)
}

fn grades(ranking: &Ranking<'_>) -> Vec<(CardId, Decimal)> {
    ranking
        .iter()
        .map(|evaluated| (evaluated.card(), evaluated.grade()))
        .collect()
}

fn everyone(profit_type: ProfitType) -> UserPreferences {
    UserPreferences::new([MAX, ISRACARD, VISA], profit_type)
}

fn transactions() -> Vec<Transaction<'static>> {
    vec![
        Transaction::new(shekels(100_000)),
        Transaction::at(shekels(100_000), GOLDA),
        Transaction::at(shekels(5_000), AROMA),
        Transaction::at(shekels(1), BusinessId(99)),
    ]
}

const PROFIT_TYPES: [ProfitType; 3] = [
    ProfitType::LowestPrice,
    ProfitType::Points,
    ProfitType::NominalProfit,
];

#[test]
fn recommending_twice_gives_the_same_ranking() -> TestResult {
    let catalog = catalog();
    let ranker = Ranker::new(&catalog);

    for profit_type in PROFIT_TYPES {
        for transaction in transactions() {
            let prefs = everyone(profit_type);

            let first = ranker.recommend(&prefs, &transaction)?;
            let second = ranker.recommend(&prefs, &transaction)?;

            assert_eq!(first, second);
        }
    }

    Ok(())
}

#[test]
fn ranking_is_sorted_by_grade_then_card_id() -> TestResult {
    let catalog = catalog();
    let ranker = Ranker::new(&catalog);

    for profit_type in PROFIT_TYPES {
        for transaction in transactions() {
            let prefs = everyone(profit_type);
            let ranking = ranker.recommend(&prefs, &transaction)?;

            assert_eq!(ranking.len(), prefs.held_cards().len());

            for pair in ranking.as_slice().windows(2) {
                if let [earlier, later] = pair {
                    assert!(earlier.grade() >= later.grade());

                    if earlier.grade() == later.grade() {
                        assert!(earlier.card() < later.card());
                    }
                }
            }
        }
    }

    Ok(())
}

#[test]
fn equal_grades_rank_lower_card_id_first() -> TestResult {
    let catalog = Catalog::new()
        .with_card(CreditCard::new(CardId(3), "Leumi"))
        .with_card(CreditCard::new(CardId(1), "Isracard"))
        .with_benefit(Benefit::new(
            CardId(3),
            BenefitKind::Discount,
            BenefitValue::percent(Decimal::from(5)),
        ))
        .with_benefit(Benefit::new(
            CardId(1),
            BenefitKind::Discount,
            BenefitValue::Flat(Decimal::from(5)),
        ));
    let prefs = UserPreferences::new([CardId(3), CardId(1)], ProfitType::LowestPrice);

    let ranking = Ranker::new(&catalog).recommend(&prefs, &Transaction::new(shekels(10_000)))?;

    assert_eq!(
        grades(&ranking),
        vec![
            (CardId(1), Decimal::from(5)),
            (CardId(3), Decimal::from(5)),
        ]
    );

    Ok(())
}

#[test]
fn standing_cashback_never_lowers_a_grade() -> TestResult {
    let without = catalog();
    let with = catalog().with_benefit(Benefit::new(
        ISRACARD,
        BenefitKind::Cashback(CashbackUnit::Money),
        BenefitValue::Flat(Decimal::from(3)),
    ));

    for profit_type in PROFIT_TYPES {
        for transaction in transactions() {
            let prefs = everyone(profit_type);

            let before = Ranker::new(&without).recommend(&prefs, &transaction)?;
            let after = Ranker::new(&with).recommend(&prefs, &transaction)?;

            let grade_of = |ranking: &Ranking<'_>| {
                ranking
                    .iter()
                    .find(|evaluated| evaluated.card() == ISRACARD)
                    .map(EvaluatedCreditCard::grade)
            };

            let (Some(before), Some(after)) = (grade_of(&before), grade_of(&after)) else {
                return Err("Isracard missing from ranking".into());
            };

            assert!(after >= before, "{after} < {before} for {profit_type:?}");
        }
    }

    Ok(())
}

#[test]
fn business_benefits_only_count_at_their_business() -> TestResult {
    let catalog = catalog();
    let prefs = UserPreferences::new([VISA, MAX], ProfitType::LowestPrice);
    let ranker = Ranker::new(&catalog);

    let elsewhere = ranker.recommend(&prefs, &Transaction::at(shekels(100_000), AROMA))?;
    let nowhere = ranker.recommend(&prefs, &Transaction::new(shekels(100_000)))?;

    // Visa keeps only its standing cashback away from Golda; Max only discounts at Aroma.
    assert_eq!(
        grades(&elsewhere),
        vec![(MAX, Decimal::from(20)), (VISA, Decimal::new(5, 1))]
    );
    assert_eq!(
        grades(&nowhere),
        vec![(VISA, Decimal::new(5, 1)), (MAX, Decimal::ZERO)]
    );

    Ok(())
}

#[test]
fn percentage_discount_is_exact_share() -> TestResult {
    let discount = Benefit::new(
        VISA,
        BenefitKind::Discount,
        BenefitValue::percent(Decimal::from(10)),
    );

    assert_eq!(grade(&discount, Decimal::from(1000), None)?, Decimal::from(100));
    assert_eq!(
        grade(&discount, Decimal::new(1005, 1), None)?,
        Decimal::new(1005, 2)
    );

    Ok(())
}

#[test]
fn points_are_worth_count_times_rate() -> TestResult {
    let points = Benefit::new(
        ISRACARD,
        BenefitKind::Points,
        BenefitValue::Flat(Decimal::from(100)),
    );

    assert_eq!(
        grade(&points, Decimal::from(1000), Some(Decimal::new(2, 2)))?,
        Decimal::new(20, 1)
    );

    Ok(())
}

#[test]
fn discount_at_business_stacks_with_standing_points_cashback() -> TestResult {
    let catalog = catalog();
    let prefs = UserPreferences::new([VISA], ProfitType::LowestPrice);

    let ranking =
        Ranker::new(&catalog).recommend(&prefs, &Transaction::at(shekels(100_000), GOLDA))?;
    let visa = ranking.best().ok_or("empty ranking")?;

    assert_eq!(visa.base(), Decimal::from(100));
    assert_eq!(visa.bonus(), Decimal::new(5, 1));
    assert_eq!(visa.grade(), Decimal::new(1005, 1));
    assert_eq!(visa.profit(), &shekels(10_050));

    Ok(())
}

#[test]
fn missing_held_card_ranks_with_zero() -> TestResult {
    let catalog = catalog();
    let prefs = UserPreferences::new([CardId(77), VISA], ProfitType::NominalProfit);

    let ranking = Ranker::new(&catalog).recommend(&prefs, &Transaction::new(shekels(1_000)))?;

    assert_eq!(
        grades(&ranking),
        vec![(VISA, Decimal::new(5, 1)), (CardId(77), Decimal::ZERO)]
    );

    Ok(())
}

#[test]
fn points_seeker_with_only_discounts_gets_just_the_bonus() -> TestResult {
    let catalog = catalog();
    let prefs = UserPreferences::new([VISA, MAX], ProfitType::Points);

    let ranking =
        Ranker::new(&catalog).recommend(&prefs, &Transaction::at(shekels(100_000), GOLDA))?;

    let visa = ranking.best().ok_or("empty ranking")?;

    assert_eq!(visa.card(), VISA);
    assert_eq!(visa.base(), Decimal::ZERO);
    assert_eq!(visa.grade(), Decimal::new(5, 1));
    assert!(visa.benefit().is_none());

    let max = ranking.as_slice().last().ok_or("empty ranking")?;

    assert_eq!(max.card(), MAX);
    assert_eq!(max.grade(), Decimal::ZERO);

    Ok(())
}

#[test]
fn free_function_ranks_like_the_ranker() -> TestResult {
    let catalog = catalog();
    let prefs = everyone(ProfitType::NominalProfit);
    let transaction = Transaction::at(shekels(100_000), GOLDA);

    let ranked = recommend(catalog.benefits(), catalog.cards(), &prefs, &transaction)?;

    assert_eq!(
        ranked
            .iter()
            .map(|evaluated| (evaluated.card(), evaluated.grade()))
            .collect::<Vec<_>>(),
        vec![
            (VISA, Decimal::new(1005, 1)),
            (ISRACARD, Decimal::from(2)),
            (MAX, Decimal::ZERO),
        ]
    );

    Ok(())
}

#[test]
fn scoped_cashback_adds_nothing_at_its_business() -> TestResult {
    let catalog = catalog();
    let prefs = UserPreferences::new([ISRACARD, VISA], ProfitType::LowestPrice);

    let ranking =
        Ranker::new(&catalog).recommend(&prefs, &Transaction::at(shekels(100_000), GOLDA))?;
    let isracard = ranking
        .iter()
        .find(|evaluated| evaluated.card() == ISRACARD)
        .ok_or("Isracard missing from ranking")?;

    assert_eq!(isracard.bonus(), Decimal::ZERO);
    assert_eq!(isracard.grade(), Decimal::ZERO);
    assert_eq!(ranking.best().map(EvaluatedCreditCard::card), Some(VISA));

    Ok(())
}

#[test]
fn several_standing_cashbacks_use_the_highest() -> TestResult {
    let catalog = catalog()
        .with_benefit(Benefit::new(
            VISA,
            BenefitKind::Cashback(CashbackUnit::Money),
            BenefitValue::Flat(Decimal::from(4)),
        ))
        .with_benefit(Benefit::new(
            VISA,
            BenefitKind::CASHBACK,
            BenefitValue::Flat(Decimal::from(100)),
        ));
    let prefs = everyone(ProfitType::LowestPrice);

    assert_eq!(catalog.audit().len(), 1);

    let ranking =
        Ranker::new(&catalog).recommend(&prefs, &Transaction::at(shekels(100_000), GOLDA))?;
    let visa = ranking.best().ok_or("empty ranking")?;

    assert_eq!(ranking.len(), 3);
    assert_eq!(visa.card(), VISA);
    assert_eq!(visa.base(), Decimal::from(100));
    assert_eq!(visa.bonus(), Decimal::from(4));
    assert_eq!(visa.grade(), Decimal::from(104));

    Ok(())
}
