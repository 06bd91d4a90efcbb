//! Common test utilities for drift-polars tests

#![allow(dead_code)]

use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal};

/// Monthly frame: `balance` (log-normal, ~2% null), `weight`, `month`, `year`
pub fn monthly_frame(n: usize, seed: u64) -> DataFrame {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = LogNormal::new(4.0, 1.2).unwrap();

    let balance: Vec<Option<f64>> = (0..n)
        .map(|_| (!rng.gen_bool(0.02)).then(|| dist.sample(&mut rng)))
        .collect();
    let weight: Vec<f64> = (0..n).map(|_| rng.gen_range(0.5..2.0)).collect();
    let month: Vec<String> = (0..n).map(|i| format!("2021-{:02}", i % 12 + 1)).collect();
    let year: Vec<i32> = (0..n).map(|i| 2020 + (i % 3) as i32).collect();

    df![
        "balance" => balance,
        "weight" => weight,
        "month" => month,
        "year" => year,
    ]
    .unwrap()
}

/// 1000 positive balances: a dense body and a long right tail
pub fn balance_frame() -> DataFrame {
    let balance: Vec<f64> = (0..980)
        .map(|i| 10.0 + f64::from(i) * 0.01)
        .chain((0..20).map(|j| 60.0 + 5.0 * f64::from(j)))
        .collect();
    let month: Vec<String> = (0..1000).map(|i| format!("2021-{:02}", i % 12 + 1)).collect();
    let year: Vec<&str> = (0..1000).map(|i| if i < 500 { "2020" } else { "2021" }).collect();
    df!["balance" => balance, "month" => month, "year" => year].unwrap()
}

/// Value of `statistic` in a wide frame's `column`
pub fn wide_value(wide: &DataFrame, column: &str, statistic: &str) -> f64 {
    let names = wide.column("variable").unwrap().str().unwrap();
    let row = names
        .iter()
        .position(|s| s == Some(statistic))
        .unwrap();
    wide.column(column).unwrap().f64().unwrap().get(row).unwrap()
}
