// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Text rendering of coding-time breakdowns.
//!
//! Buckets are ordered by percentage and rendered one per line with aligned
//! name and duration columns followed by a fixed-width bar:
//!
//! ```text
//! Rust    1h 2m 3s   ██████████████████░░░░░░░  70.00%
//! Go      10m 0s     ████████░░░░░░░░░░░░░░░░░  30.00%
//! ```

use serde::Deserialize;

use crate::wakatime::{WakatimeCategory, WakatimeMachine};

/// Number of cells in a percentage bar.
pub const BAR_WIDTH: usize = 25;

const FILLED_CELL: char = '█';
const EMPTY_CELL: char = '░';

/// Formats a duration, omitting leading zero units.
///
/// # Examples
///
/// ```
/// use markscribe::format_time;
///
/// assert_eq!(format_time(0, 0, 45), "45s");
/// assert_eq!(format_time(0, 5, 3), "5m 3s");
/// assert_eq!(format_time(2, 0, 0), "2h 0m 0s");
/// ```
pub fn format_time(hours: u64, minutes: u64, seconds: u64,) -> String
{
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Renders a `width`-cell bar followed by the percentage with two decimals.
///
/// A cell is filled while its index is below `percent / (100 / width)`.
pub fn bar(percent: f64, width: usize,) -> String
{
    let cell_share = 100.0 / width as f64;
    let cells: String = (0..width)
        .map(|index| {
            if (index as f64) < percent / cell_share {
                FILLED_CELL
            } else {
                EMPTY_CELL
            }
        })
        .collect();

    format!("{cells}  {percent:.2}%")
}

/// Renders up to `count` aligned bar-chart lines, highest percentage first.
///
/// The sort is stable: buckets with equal percentages keep their input
/// order. Name and duration columns are padded to the longest value plus two
/// spaces. Lines are joined with `\n`.
pub fn category_bar(count: usize, buckets: &[WakatimeCategory],) -> String
{
    let mut sorted: Vec<&WakatimeCategory,> = buckets.iter().collect();
    sorted.sort_by(|a, b| b.percent.total_cmp(&a.percent,),);

    let durations: Vec<String,> = sorted
        .iter()
        .map(|bucket| format_time(bucket.hours, bucket.minutes, bucket.seconds,),)
        .collect();

    let name_width = sorted
        .iter()
        .map(|bucket| bucket.name.chars().count(),)
        .max()
        .unwrap_or(0,)
        + 2;
    let duration_width = durations
        .iter()
        .map(|duration| duration.chars().count(),)
        .max()
        .unwrap_or(0,)
        + 2;

    sorted
        .iter()
        .zip(&durations,)
        .take(count,)
        .map(|(bucket, duration)| {
            format!(
                "{:<name_width$} {:<duration_width$} {}",
                bucket.name,
                duration,
                bar(bucket.percent, BAR_WIDTH,)
            )
        })
        .collect::<Vec<_,>>()
        .join("\n",)
}

impl From<WakatimeMachine,> for WakatimeCategory
{
    fn from(machine: WakatimeMachine,) -> Self
    {
        machine.bucket
    }
}

/// Bucket list handed over by a template: either plain buckets or machine
/// records, which are reduced to plain buckets.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BucketSet
{
    /// Machine records carrying `machine_name_id`.
    Machines(Vec<WakatimeMachine,>,),
    /// Plain category buckets.
    Categories(Vec<WakatimeCategory,>,)
}

impl BucketSet
{
    /// Converts the set into the uniform bucket shape.
    pub fn into_buckets(self,) -> Vec<WakatimeCategory,>
    {
        match self {
            Self::Machines(machines,) => {
                machines.into_iter().map(WakatimeCategory::from,).collect()
            }
            Self::Categories(categories,) => categories
        }
    }
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn bucket(name: &str, percent: f64, hours: u64, minutes: u64, seconds: u64,) -> WakatimeCategory
    {
        WakatimeCategory {
            name: name.to_owned(),
            percent,
            hours,
            minutes,
            seconds,
            ..WakatimeCategory::default()
        }
    }

    fn filled_cells(line: &str,) -> usize
    {
        line.chars().filter(|c| *c == FILLED_CELL,).count()
    }

    fn bar_column(line: &str,) -> Option<usize,>
    {
        line.chars()
            .position(|c| c == FILLED_CELL || c == EMPTY_CELL,)
    }

    #[test]
    fn format_time_omits_leading_zero_units()
    {
        assert_eq!(format_time(0, 0, 45,), "45s");
        assert_eq!(format_time(0, 5, 3,), "5m 3s");
        assert_eq!(format_time(2, 0, 0,), "2h 0m 0s");
        assert_eq!(format_time(0, 0, 0,), "0s");
    }

    #[test]
    fn bar_fills_cells_below_threshold()
    {
        let rendered = bar(70.0, BAR_WIDTH,);
        assert_eq!(filled_cells(&rendered,), 18);
        assert!(rendered.ends_with("  70.00%",));
        assert_eq!(filled_cells(&bar(0.0, BAR_WIDTH,),), 0);
        assert_eq!(filled_cells(&bar(100.0, BAR_WIDTH,),), BAR_WIDTH);
    }

    #[test]
    fn category_bar_sorts_and_aligns_columns()
    {
        let buckets = vec![bucket("Rust", 30.0, 0, 10, 0,), bucket("Go", 70.0, 1, 2, 3,)];

        let output = category_bar(10, &buckets,);
        let lines: Vec<&str,> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            format!("Go     1h 2m 3s   {}{}  70.00%", "█".repeat(18,), "░".repeat(7,))
        );
        assert_eq!(
            lines[1],
            format!("Rust   10m 0s     {}{}  30.00%", "█".repeat(8,), "░".repeat(17,))
        );
    }

    #[test]
    fn category_bar_truncates_to_count()
    {
        let buckets = vec![
            bucket("Rust", 50.0, 1, 0, 0,),
            bucket("Go", 30.0, 0, 30, 0,),
            bucket("Zig", 20.0, 0, 20, 0,),
        ];

        let output = category_bar(2, &buckets,);
        assert_eq!(output.lines().count(), 2);
        assert!(output.starts_with("Rust",));
        assert!(!output.contains("Zig",));
        assert_eq!(category_bar(0, &buckets,), "");
    }

    #[test]
    fn category_bar_keeps_input_order_for_equal_percentages()
    {
        let buckets = vec![
            bucket("Bash", 25.0, 0, 1, 0,),
            bucket("Rust", 50.0, 0, 2, 0,),
            bucket("Make", 25.0, 0, 1, 0,),
        ];

        let output = category_bar(3, &buckets,);
        let names: Vec<&str,> = output
            .lines()
            .filter_map(|line| line.split_whitespace().next(),)
            .collect();
        assert_eq!(names, vec!["Rust", "Bash", "Make"]);
    }

    #[test]
    fn category_bar_of_empty_set_is_empty()
    {
        assert_eq!(category_bar(5, &[],), "");
    }

    #[test]
    fn bucket_set_adapts_machine_records()
    {
        let machines: BucketSet = serde_json::from_value(json!([
            { "name": "laptop", "machine_name_id": "m-1", "percent": 60.0, "hours": 1 },
            { "name": "desktop", "machine_name_id": "m-2", "percent": 40.0, "minutes": 40 }
        ]))
        .expect("machines",);
        assert!(matches!(machines, BucketSet::Machines(_,)));

        let buckets = machines.into_buckets();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].name, "laptop");
        assert_eq!(buckets[1].minutes, 40);
    }

    #[test]
    fn bucket_set_accepts_plain_categories()
    {
        let categories: BucketSet =
            serde_json::from_value(json!([{ "name": "Rust", "percent": 100.0, "seconds": 5 }]),)
                .expect("categories",);
        assert!(matches!(categories, BucketSet::Categories(_,)));
        assert_eq!(categories.into_buckets()[0].seconds, 5);
    }

    proptest! {
        #[test]
        fn category_bar_lines_are_aligned_and_ordered(
            entries in prop::collection::vec(
                ("[A-Za-z+#]{1,14}", 0.0f64..=100.0, 0u64..5, 0u64..60, 0u64..60),
                1..12
            ),
            count in 0usize..15
        ) {
            let buckets: Vec<WakatimeCategory,> = entries
                .iter()
                .map(|(name, percent, h, m, s)| bucket(name, *percent, *h, *m, *s,),)
                .collect();

            let output = category_bar(count, &buckets,);
            let lines: Vec<&str,> = output.lines().collect();

            prop_assert_eq!(lines.len(), count.min(buckets.len(),));

            let columns: Vec<Option<usize,>,> =
                lines.iter().map(|line| bar_column(line,),).collect();
            prop_assert!(columns.windows(2,).all(|pair| pair[0] == pair[1],));

            let fills: Vec<usize,> = lines.iter().map(|line| filled_cells(line,),).collect();
            prop_assert!(fills.windows(2,).all(|pair| pair[0] >= pair[1],));
            prop_assert!(fills.iter().all(|fill| *fill <= BAR_WIDTH,));
        }
    }
}
