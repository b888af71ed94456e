//! Folds per-bucket usage rows into a per-user summary.

use crate::models::usage::{BucketUsageReport, BucketUsageRow, UsageSummary};

/// Display-only ceiling reported as `capacity` (60 GiB). Not enforced.
pub const DISPLAY_CAPACITY: i64 = 60 * 1024 * 1024 * 1024;

/// How a single field is folded into the running summary.
#[derive(Clone, Copy, Debug)]
enum Fold {
    Max,
    /// A zero accumulator counts as "unset", so a true zero minimum is
    /// indistinguishable from no data.
    Min,
    Sum,
    /// Pairwise mean of the running value and the new one. This is not the
    /// dataset average and depends on row order.
    PairwiseAverage,
}

impl Fold {
    fn apply(self, acc: i64, value: Option<i64>) -> i64 {
        let value = value.unwrap_or(0);
        match self {
            Fold::Max => acc.max(value),
            Fold::Min if acc == 0 => value,
            Fold::Min => acc.min(value),
            Fold::Sum => acc.saturating_add(value),
            Fold::PairwiseAverage if acc == 0 => value,
            Fold::PairwiseAverage if value == 0 => acc,
            Fold::PairwiseAverage => (acc + value) / 2,
        }
    }
}

/// Build the usage report for a user's buckets, processing rows in order.
pub fn aggregate_usage(rows: Vec<BucketUsageRow>) -> BucketUsageReport {
    let mut total = rows.iter().fold(UsageSummary::default(), |mut acc, row| {
        acc.max_object_size = Fold::Max.apply(acc.max_object_size, row.object_max_size);
        acc.min_object_size = Fold::Min.apply(acc.min_object_size, row.object_min_size);
        acc.total_used_capacity = Fold::Sum.apply(acc.total_used_capacity, row.used_capacity);
        acc.total_object_count = Fold::Sum.apply(acc.total_object_count, row.object_count);
        acc.all_average = Fold::PairwiseAverage.apply(acc.all_average, row.object_average_size);
        acc
    });
    total.bucket_count = rows.len() as i64;
    total.capacity = DISPLAY_CAPACITY;

    BucketUsageReport {
        detail: rows,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(max: i64, min: i64, used: i64, count: i64, avg: i64) -> BucketUsageRow {
        BucketUsageRow {
            object_max_size: Some(max),
            object_min_size: Some(min),
            used_capacity: Some(used),
            object_count: Some(count),
            object_average_size: Some(avg),
            ..Default::default()
        }
    }

    #[test]
    fn folds_two_buckets() {
        let rows = vec![row(10, 2, 100, 5, 20), row(30, 1, 50, 3, 10)];
        let report = aggregate_usage(rows.clone());

        assert_eq!(report.detail, rows);
        assert_eq!(
            report.total,
            UsageSummary {
                max_object_size: 30,
                min_object_size: 1,
                total_used_capacity: 150,
                total_object_count: 8,
                all_average: 15,
                bucket_count: 2,
                capacity: 64_424_509_440,
            }
        );
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let report = aggregate_usage(Vec::new());
        assert!(report.detail.is_empty());
        assert_eq!(
            report.total,
            UsageSummary {
                capacity: DISPLAY_CAPACITY,
                ..Default::default()
            }
        );
    }

    #[test]
    fn average_is_pairwise_and_order_dependent() {
        // A weighted mean by object count would be 40 for both orders.
        let avg = |a| row(0, 0, 0, 1, a);
        let forward = aggregate_usage(vec![avg(10), avg(30), avg(80)]);
        let backward = aggregate_usage(vec![avg(80), avg(30), avg(10)]);
        assert_eq!(forward.total.all_average, 50);
        assert_eq!(backward.total.all_average, 32);
    }

    #[test]
    fn empty_buckets_count_as_zero() {
        let empty = BucketUsageRow {
            object_count: Some(0),
            ..Default::default()
        };
        let report = aggregate_usage(vec![row(40, 4, 400, 10, 40), empty]);

        assert_eq!(report.total.bucket_count, 2);
        assert_eq!(report.total.max_object_size, 40);
        assert_eq!(report.total.total_used_capacity, 400);
        assert_eq!(report.total.total_object_count, 10);
        assert_eq!(report.total.all_average, 40);
        // A missing minimum folds in as zero once the accumulator is set.
        assert_eq!(report.total.min_object_size, 0);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let report = aggregate_usage(vec![row(1, 1, i64::MAX, i64::MAX, 1), row(1, 1, 5, 5, 1)]);
        assert_eq!(report.total.total_used_capacity, i64::MAX);
        assert_eq!(report.total.total_object_count, i64::MAX);
    }

    #[test]
    fn min_restarts_after_zero_accumulator() {
        let report = aggregate_usage(vec![row(5, 0, 5, 1, 5), row(9, 7, 9, 1, 9)]);
        assert_eq!(report.total.min_object_size, 7);
    }
}
