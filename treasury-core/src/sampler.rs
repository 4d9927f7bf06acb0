//! Year and month sampling.
//!
//! Both samplers reduce a daily table to one observation per bucket:
//! 1. optionally drop rows missing any required tenor
//! 2. (year mode) keep only rows inside the anniversary window of the anchor
//! 3. group rows into `key -> candidates`
//! 4. pick one candidate per key uniformly at random
//!
//! The random source is passed in, so a seeded RNG gives repeatable picks.

use chrono::{Days, Months, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashSet};

use crate::config::TreasuryConfig;
use crate::sample::{BucketKey, MonthOfYear, Sample, SampledRow};
use crate::table::{CurveRow, YieldCurveTable};

/// Dates eligible for year sampling around `anchor`.
///
/// For each of `window_years` annual steps back from the anchor the anchor
/// point keeps the anchor's day-of-month (clamped to the month's length),
/// and the `window_slack_days` days before it are included as well, so a
/// weekend or holiday on the anniversary still leaves a candidate.
pub fn anniversary_window(anchor: NaiveDate, config: &TreasuryConfig) -> HashSet<NaiveDate> {
    let slack = u64::from(config.window_slack_days);
    let mut window = HashSet::new();

    for step in 0..config.window_years {
        let Some(point) = step
            .checked_mul(12)
            .and_then(|months| anchor.checked_sub_months(Months::new(months)))
        else {
            break;
        };
        for back in 0..=slack {
            if let Some(date) = point.checked_sub_days(Days::new(back)) {
                window.insert(date);
            }
        }
    }

    window
}

/// One random observation per calendar year near the anchor's anniversary.
///
/// Years with no eligible row simply have no entry in the result.
pub fn sample_by_year<R: Rng + ?Sized>(
    table: &YieldCurveTable,
    anchor: NaiveDate,
    allow_missing: bool,
    config: &TreasuryConfig,
    rng: &mut R,
) -> Sample<i32> {
    let window = anniversary_window(anchor, config);
    let candidates = table
        .rows()
        .iter()
        .filter(|row| window.contains(&row.date))
        .filter(|row| allow_missing || table.is_complete(row, &config.tenors));

    let sample = reduce(table, group_by::<i32, _>(candidates), rng);
    tracing::debug!(
        %anchor,
        window = window.len(),
        years = sample.len(),
        "sampled by year"
    );
    sample
}

/// One random observation per calendar month.
///
/// The table is expected to hold a single year of data; rows from other
/// years land in the same month buckets.
pub fn sample_by_month<R: Rng + ?Sized>(
    table: &YieldCurveTable,
    allow_missing: bool,
    config: &TreasuryConfig,
    rng: &mut R,
) -> Sample<MonthOfYear> {
    let candidates = table
        .rows()
        .iter()
        .filter(|row| allow_missing || table.is_complete(row, &config.tenors));

    let sample = reduce(table, group_by::<MonthOfYear, _>(candidates), rng);
    tracing::debug!(months = sample.len(), "sampled by month");
    sample
}

/// Group rows into buckets, preserving table order within each bucket.
pub fn group_by<'a, K, I>(rows: I) -> BTreeMap<K, Vec<&'a CurveRow>>
where
    K: BucketKey,
    I: IntoIterator<Item = &'a CurveRow>,
{
    let mut groups: BTreeMap<K, Vec<&CurveRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(K::of(row.date)).or_default().push(row);
    }
    groups
}

fn reduce<K: BucketKey, R: Rng + ?Sized>(
    table: &YieldCurveTable,
    groups: BTreeMap<K, Vec<&CurveRow>>,
    rng: &mut R,
) -> Sample<K> {
    let rows = groups
        .into_iter()
        .filter_map(|(key, candidates)| {
            candidates.choose(&mut *rng).map(|row| SampledRow {
                key,
                date: row.date,
                values: row.values.clone(),
            })
        })
        .collect();

    Sample {
        columns: table.columns().to_vec(),
        rows,
    }
}
