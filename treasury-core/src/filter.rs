//! Range filtering of bucketed samples.
//!
//! Keeps the rows whose key lies in `[start, end]`, ordered by observation
//! date, truncated to at most `num_years` rows with `num_years` clamped to
//! `[1, max_years]`.
//!
//! Sort order: newest first, except when only `start` is given, in which
//! case oldest first. This decides which end of the range survives the
//! truncation. Callers that depend on a particular end should pass both
//! bounds explicitly.

use std::borrow::Cow;

use crate::error::{Result, TreasuryError};
use crate::sample::{BucketKey, Sample};

/// Caller-supplied bounds for one filter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterBounds<K> {
    pub start: Option<K>,
    pub end: Option<K>,
    /// Any integer; clamped on use.
    pub num_years: i64,
}

impl<K> Default for FilterBounds<K> {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            num_years: 10,
        }
    }
}

impl<K: BucketKey> FilterBounds<K> {
    pub fn new(num_years: i64, start: Option<K>, end: Option<K>) -> Self {
        Self {
            start,
            end,
            num_years,
        }
    }

    /// Equal explicit bounds select a single bucket's worth of data and
    /// skip filtering altogether.
    pub fn is_identity(&self) -> bool {
        self.start.is_some() && self.start == self.end
    }

    /// `num_years` clamped into `[1, max_years]`.
    pub fn row_limit(&self, max_years: u32) -> usize {
        let max = i64::from(max_years.max(1));
        self.num_years.clamp(1, max) as usize
    }

    fn ascending(&self) -> bool {
        self.start.is_some() && self.end.is_none()
    }
}

/// Apply `bounds` to `sample` without modifying it.
///
/// Returns the input itself (borrowed) for identity bounds, otherwise an
/// owned subset. Fails with [`TreasuryError::Range`] when the resolved
/// start is later than the resolved end.
pub fn filter_sample<'a, K: BucketKey>(
    sample: &'a Sample<K>,
    bounds: &FilterBounds<K>,
    max_years: u32,
) -> Result<Cow<'a, Sample<K>>> {
    if bounds.is_identity() {
        return Ok(Cow::Borrowed(sample));
    }

    let Some((min_key, max_key)) = sample.key_range() else {
        if let (Some(start), Some(end)) = (bounds.start, bounds.end) {
            check_order(start, end)?;
        }
        return Ok(Cow::Owned(Sample {
            columns: sample.columns.clone(),
            rows: Vec::new(),
        }));
    };

    let start = bounds.start.unwrap_or(min_key);
    let end = bounds.end.unwrap_or(max_key);
    check_order(start, end)?;

    let mut rows: Vec<_> = sample
        .rows
        .iter()
        .filter(|r| r.key >= start && r.key <= end)
        .cloned()
        .collect();

    if bounds.ascending() {
        rows.sort_by(|a, b| a.date.cmp(&b.date));
    } else {
        rows.sort_by(|a, b| b.date.cmp(&a.date));
    }
    rows.truncate(bounds.row_limit(max_years));

    tracing::debug!(%start, %end, kept = rows.len(), "filtered sample");
    Ok(Cow::Owned(Sample {
        columns: sample.columns.clone(),
        rows,
    }))
}

fn check_order<K: BucketKey>(start: K, end: K) -> Result<()> {
    if start > end {
        return Err(TreasuryError::Range {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SampledRow;
    use chrono::NaiveDate;

    /// One row per year, 1990..=2020, observed on Feb 15.
    fn yearly() -> Sample<i32> {
        Sample {
            columns: vec!["10 Yr".into()],
            rows: (1990..=2020)
                .map(|y| SampledRow {
                    key: y,
                    date: NaiveDate::from_ymd_opt(y, 2, 15).unwrap(),
                    values: vec![Some(f64::from(y - 1985))],
                })
                .collect(),
        }
    }

    fn run(bounds: FilterBounds<i32>) -> Vec<i32> {
        filter_sample(&yearly(), &bounds, 10).unwrap().keys()
    }

    #[test]
    fn defaults_keep_latest_ten() {
        assert_eq!(
            run(FilterBounds::default()),
            (2011..=2020).rev().collect::<Vec<_>>()
        );
    }

    #[test]
    fn num_years_alone_keeps_latest() {
        assert_eq!(
            run(FilterBounds::new(5, None, None)),
            vec![2020, 2019, 2018, 2017, 2016]
        );
    }

    #[test]
    fn non_positive_num_years_keeps_one() {
        assert_eq!(run(FilterBounds::new(0, None, None)), vec![2020]);
        assert_eq!(run(FilterBounds::new(-20, None, None)), vec![2020]);
    }

    #[test]
    fn large_num_years_keeps_ten() {
        assert_eq!(run(FilterBounds::new(50, None, None)).len(), 10);
    }

    #[test]
    fn start_only_keeps_earliest_from_start() {
        let keys = run(FilterBounds::new(10, Some(1995), None));
        assert_eq!(keys, (1995..=2004).collect::<Vec<_>>());
    }

    #[test]
    fn end_only_keeps_latest_up_to_end() {
        let keys = run(FilterBounds::new(10, None, Some(2010)));
        assert_eq!(keys, (2001..=2010).rev().collect::<Vec<_>>());
    }

    #[test]
    fn start_and_end_keep_latest_in_range() {
        let keys = run(FilterBounds::new(5, Some(1992), Some(2018)));
        assert_eq!(keys, vec![2018, 2017, 2016, 2015, 2014]);
    }

    #[test]
    fn narrow_range_limits_rows() {
        let keys = run(FilterBounds::new(10, Some(2000), Some(2002)));
        assert_eq!(keys, vec![2002, 2001, 2000]);
    }

    #[test]
    fn equal_bounds_return_input_untouched() {
        let sample = yearly();
        let out = filter_sample(&sample, &FilterBounds::new(3, Some(2000), Some(2000)), 10).unwrap();
        match out {
            Cow::Borrowed(b) => assert!(std::ptr::eq(b, &sample)),
            Cow::Owned(_) => panic!("equal bounds must not copy"),
        }
    }

    #[test]
    fn inverted_bounds_fail() {
        let err = filter_sample(&yearly(), &FilterBounds::new(10, Some(2010), Some(2000)), 10)
            .unwrap_err();
        assert!(matches!(err, TreasuryError::Range { .. }));
    }

    #[test]
    fn start_after_data_fails() {
        // end defaults to 2020
        let err = filter_sample(&yearly(), &FilterBounds::new(10, Some(2030), None), 10)
            .unwrap_err();
        assert!(matches!(err, TreasuryError::Range { .. }));
    }

    #[test]
    fn empty_sample_filters_to_empty() {
        let empty: Sample<i32> = Sample {
            columns: vec!["10 Yr".into()],
            rows: vec![],
        };
        let out = filter_sample(&empty, &FilterBounds::default(), 10).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.columns, empty.columns);
    }

    #[test]
    fn max_years_is_configurable() {
        let sample = yearly();
        let out = filter_sample(&sample, &FilterBounds::new(50, None, None), 3).unwrap();
        assert_eq!(out.keys(), vec![2020, 2019, 2018]);
    }

    #[test]
    fn input_is_not_mutated() {
        let sample = yearly();
        let before = sample.clone();
        let _ = filter_sample(&sample, &FilterBounds::new(4, None, Some(2005)), 10).unwrap();
        assert_eq!(sample, before);
    }
}
