use std::sync::Once;

use dicepool::stats::{self, Summary};
use dicepool::{
    constant, d, interpret, nd, normalize, pair, pool, reroll, try_pool, DiceError, Distribution,
    EngineConfig, ExecutionError, Outcome, ValidationError,
};

const EPS: f64 = 1e-9;

static TRACING: Once = Once::new();

/// Route pool step events to the test output when `RUST_LOG` is set.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn count_at_least_five(count: u32, face: &i64) -> u32 {
    count + u32::from(*face >= 5)
}

#[test]
fn d6_has_six_equal_faces() {
    let d6 = d(6).unwrap();
    assert_eq!(d6.len(), 6);
    for face in 1..=6 {
        assert!((d6.get(&face).unwrap() - 1.0 / 6.0).abs() < EPS);
    }
    assert!(d6.get(&7).is_none());
}

#[test]
fn sum_of_2d6() {
    init_tracing();
    let sum = pool(|acc, face| acc + face, 0i64, &nd(2, 6).unwrap());

    let expected = [
        (2, 1.0), (3, 2.0), (4, 3.0), (5, 4.0), (6, 5.0), (7, 6.0),
        (8, 5.0), (9, 4.0), (10, 3.0), (11, 2.0), (12, 1.0),
    ];
    assert_eq!(sum.len(), expected.len());
    for (total, ways) in expected {
        let weight = sum.get(&total).unwrap();
        assert!((weight - ways / 36.0).abs() < EPS, "P({total}) = {weight}");
    }
}

#[test]
fn successes_in_12d6() {
    init_tracing();
    let mut hits = pool(count_at_least_five, 0u32, &nd(12, 6).unwrap());
    normalize(&mut hits).unwrap();

    assert_eq!(hits.len(), 13);
    assert!((stats::average(&hits).unwrap() - 4.0).abs() < EPS);
    assert!((stats::median(&hits).unwrap() - 4.0).abs() < EPS);

    let table = stats::frequencies(&hits).unwrap();
    assert!((table[&0] - 0.007_707_346_6).abs() < 1e-9);
    assert!((table[&6] - 0.111_274_817).abs() < 1e-8);
    assert!((table[&12] - 1.881_676_4e-6).abs() < 1e-12);
}

#[test]
fn pool_of_one_die_equals_interpret() {
    let d8 = d(8).unwrap();
    let pooled = pool(|acc: i64, face: &i64| acc * 10 + face, 3, [&d8]);
    let interpreted = interpret(|face| 3 * 10 + face, &d8);
    assert!(pooled.approx_eq(&interpreted, EPS));
}

#[test]
fn structurally_equal_histories_merge() {
    // Order-insensitive history of two coin flips.
    let coin = d(2).unwrap();
    let histories = pool(
        |history: Outcome, face| history.push(*face).sorted(),
        Outcome::empty_list(),
        [&coin, &coin],
    );
    assert_eq!(histories.len(), 3);
    let mixed = Outcome::from(vec![1i64, 2]);
    assert!((histories.get(&mixed).unwrap() - 0.5).abs() < EPS);
}

#[test]
fn keep_highest_two_of_4d6() {
    let kept = pool(
        |mut top: Vec<i64>, face| {
            top.push(*face);
            top.sort_unstable_by(|a, b| b.cmp(a));
            top.truncate(2);
            top
        },
        Vec::new(),
        &nd(4, 6).unwrap(),
    );
    let total = interpret(|top| top.iter().sum::<i64>(), &kept);
    assert!(total.is_normalized(EPS));
    assert!((total.get(&12).unwrap() - 171.0 / 1296.0).abs() < EPS);
    assert!((total.get(&2).unwrap() - 1.0 / 1296.0).abs() < EPS);
}

#[test]
fn advantage_with_pair() {
    let d20 = d(20).unwrap();
    let advantage = pair(|a, b| *a.max(b), &d20, &d20);
    assert!(advantage.is_normalized(EPS));
    assert!((advantage.get(&20).unwrap() - 39.0 / 400.0).abs() < EPS);
    assert!((stats::average(&advantage).unwrap() - 13.825).abs() < EPS);
}

#[test]
fn reroll_ones_keeps_mass() {
    let d6 = d(6).unwrap();
    let rerolled = reroll(
        |face| if *face == 1 { d6.clone() } else { constant(*face) },
        &d6,
    );
    assert!(rerolled.is_normalized(EPS));
    assert!((rerolled.get(&6).unwrap() - 7.0 / 36.0).abs() < EPS);
    assert!((stats::average(&rerolled).unwrap() - (3.5 + 2.5 / 6.0)).abs() < EPS);
}

#[test]
fn exploding_die_via_reroll() {
    // A d4 that explodes once on 4.
    let d4 = d(4).unwrap();
    let exploding = d4.reroll(|face| {
        if *face == 4 {
            d4.interpret(|extra| 4 + extra)
        } else {
            constant(*face)
        }
    });
    assert_eq!(exploding.len(), 7);
    assert!(!exploding.contains(&4));
    assert!((exploding.get(&8).unwrap() - 1.0 / 16.0).abs() < EPS);
}

#[test]
fn invalid_construction_fails_fast() {
    assert_eq!(
        d(0).unwrap_err(),
        DiceError::Validation(ValidationError::InvalidSides { sides: 0 })
    );
    assert!(nd(5, -6).unwrap_err().is_validation());
}

#[test]
fn degenerate_normalization_is_reported() {
    let mut empty: Distribution<i64> = Distribution::new();
    assert_eq!(
        normalize(&mut empty).unwrap_err(),
        DiceError::Execution(ExecutionError::DegenerateNormalization { total: 0.0 })
    );
}

#[test]
fn try_pool_guards_history_explosion() {
    let config = EngineConfig {
        max_outcomes: 10_000,
        ..EngineConfig::default()
    };
    let result = try_pool(
        &config,
        |mut rolls: Vec<i64>, face| {
            rolls.push(*face);
            rolls
        },
        Vec::new(),
        &nd(8, 6).unwrap(),
    );
    let Err(DiceError::Execution(ExecutionError::OutcomeLimitExceeded { step, actual, .. })) =
        result
    else {
        panic!("expected outcome limit error");
    };
    assert_eq!(step, 5);
    assert_eq!(actual, 46_656);
}

#[test]
fn summary_of_3d6() {
    let three_d6 = pool(|acc, face| acc + face, 0i64, &nd(3, 6).unwrap());
    let summary = Summary::of(&three_d6).unwrap();
    assert_eq!(summary.outcomes, 16);
    assert!((summary.mean - 10.5).abs() < EPS);
    assert!((summary.median - 10.5).abs() < EPS);
    assert!((summary.variance - 3.0 * 35.0 / 12.0).abs() < EPS);
    assert_eq!(summary.frequencies.first().map(|f| f.outcome), Some(3));
}
