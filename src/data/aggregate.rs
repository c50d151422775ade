use indexmap::IndexMap;

use super::model::{AggregateEntry, BucketRule, Record};

// ---------------------------------------------------------------------------
// Range-bucketed grouping
// ---------------------------------------------------------------------------

/// Bucket `field` into the first rule whose inclusive range contains it.
///
/// Records that match no rule are dropped from both the counts and the
/// percentage denominator. Entries appear in the order their label is
/// first matched while scanning `records`.
pub fn aggregate_by_range(
    records: &[Record],
    field: &str,
    rules: &[BucketRule],
) -> Vec<AggregateEntry> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for record in records {
        let Some(value) = record.get(field).and_then(coerce_number) else {
            continue;
        };
        if let Some(rule) = rules.iter().find(|r| r.contains(value)) {
            *counts.entry(rule.label.as_str()).or_default() += 1;
        }
    }
    finish(counts)
}

/// Numeric view of a raw field. Blank counts as zero; only the exact
/// spellings `Infinity`, `+Infinity` and `-Infinity` are infinite. Anything
/// else that does not parse to a finite number is unmatched.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    match trimmed {
        "" => Some(0.0),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => trimmed.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

// ---------------------------------------------------------------------------
// Exact-match grouping
// ---------------------------------------------------------------------------

/// Group by the raw string value of `field`; every distinct value, the
/// empty string included, becomes its own entry.
pub fn aggregate_by_key(records: &[Record], field: &str) -> Vec<AggregateEntry> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for record in records {
        let key = record.get(field).unwrap_or("");
        *counts.entry(key).or_default() += 1;
    }
    finish(counts)
}

fn finish(counts: IndexMap<&str, usize>) -> Vec<AggregateEntry> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .into_iter()
        .map(|(label, count)| AggregateEntry {
            label: label.to_string(),
            count,
            percentage: format_percentage(count, total),
        })
        .collect()
}

/// `count / total * 100` with two decimals. `{:.2}` rounds the exact
/// binary value to nearest, ties to even.
pub fn format_percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", count as f64 / total as f64 * 100.0)
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Number of records satisfying `predicate`.
pub fn count_where<P>(records: &[Record], predicate: P) -> usize
where
    P: Fn(&Record) -> bool,
{
    records.iter().filter(|&r| predicate(r)).count()
}

/// Number of records.
pub fn count_all(records: &[Record]) -> usize {
    records.len()
}

/// Predicate: `field` equals `expected` exactly.
pub fn field_equals<'a>(field: &'a str, expected: &'a str) -> impl Fn(&Record) -> bool + 'a {
    move |r| r.get(field) == Some(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(field: &str, values: &[&str]) -> Vec<Record> {
        values
            .iter()
            .map(|v| Record::from_pairs([(field, *v)]))
            .collect()
    }

    fn decades() -> Vec<BucketRule> {
        vec![
            BucketRule::new(1900.0, 1999.0, "1900s"),
            BucketRule::new(2000.0, 2009.0, "2000s"),
            BucketRule::new(2010.0, 2023.0, "2010s"),
        ]
    }

    fn entry(label: &str, count: usize, percentage: &str) -> AggregateEntry {
        AggregateEntry {
            label: label.into(),
            count,
            percentage: percentage.into(),
        }
    }

    #[test]
    fn test_range_year_built_scenario() {
        let recs = records("yearbuilt", &["1905", "2005", "2015", "2015"]);
        let out = aggregate_by_range(&recs, "yearbuilt", &decades());
        assert_eq!(
            out,
            vec![
                entry("1900s", 1, "25.00"),
                entry("2000s", 1, "25.00"),
                entry("2010s", 2, "50.00"),
            ]
        );
    }

    #[test]
    fn test_range_order_is_first_encountered() {
        let recs = records("yearbuilt", &["2015", "1905", "2015", "2001"]);
        let labels: Vec<String> = aggregate_by_range(&recs, "yearbuilt", &decades())
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(labels, vec!["2010s", "1900s", "2000s"]);
    }

    #[test]
    fn test_range_first_match_wins() {
        let rules = vec![
            BucketRule::new(0.0, 10.0, "A"),
            BucketRule::new(5.0, 15.0, "B"),
        ];
        let out = aggregate_by_range(&records("v", &["7"]), "v", &rules);
        assert_eq!(out, vec![entry("A", 1, "100.00")]);
    }

    #[test]
    fn test_range_drops_unmatched_from_denominator() {
        let recs = records("yearbuilt", &["1850", "1905", "abc", "2030", "2012"]);
        let out = aggregate_by_range(&recs, "yearbuilt", &decades());
        assert_eq!(
            out,
            vec![entry("1900s", 1, "50.00"), entry("2010s", 1, "50.00")]
        );
        let matched: usize = out.iter().map(|e| e.count).sum();
        assert!(matched < recs.len());
    }

    #[test]
    fn test_range_blank_is_zero_and_missing_column_is_unmatched() {
        let rules = vec![BucketRule::new(0.0, 0.0, "none"), BucketRule::new(1.0, 10.0, "low")];
        let recs = records("numfloors", &["", " 3 "]);
        let out = aggregate_by_range(&recs, "numfloors", &rules);
        assert_eq!(out, vec![entry("none", 1, "50.00"), entry("low", 1, "50.00")]);

        assert!(aggregate_by_range(&recs, "yearbuilt", &rules).is_empty());
    }

    #[test]
    fn test_range_open_ended_bucket() {
        let rules = vec![
            BucketRule::new(1.0, 50.0, "1-50 floors"),
            BucketRule::new(51.0, f64::INFINITY, "51+ floors"),
        ];
        let out = aggregate_by_range(&records("numfloors", &["102", "4"]), "numfloors", &rules);
        assert_eq!(out[0].label, "51+ floors");
        assert_eq!(out[1].label, "1-50 floors");
    }

    #[test]
    fn test_coerce_number_rejects_loose_infinity() {
        for raw in ["inf", "INF", "infinity", "NaN", "nan"] {
            assert_eq!(coerce_number(raw), None, "{raw}");
        }
        assert_eq!(coerce_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(coerce_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(coerce_number(" 42 "), Some(42.0));

        let rules = vec![BucketRule::new(51.0, f64::INFINITY, "51+ floors")];
        let recs = records("numfloors", &["inf", "INF", "60"]);
        assert_eq!(
            aggregate_by_range(&recs, "numfloors", &rules),
            vec![entry("51+ floors", 1, "100.00")]
        );
    }

    #[test]
    fn test_range_nothing_matches_is_empty() {
        let recs = records("yearbuilt", &["1700", "1800"]);
        assert!(aggregate_by_range(&recs, "yearbuilt", &decades()).is_empty());
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert!(aggregate_by_range(&[], "yearbuilt", &decades()).is_empty());
        assert!(aggregate_by_key(&[], "bldgclass").is_empty());
    }

    #[test]
    fn test_key_counts_every_record_in_first_seen_order() {
        let recs = records("bldgclass", &["D4", "O6", "D4", "", "K1", "O6", "D4"]);
        let out = aggregate_by_key(&recs, "bldgclass");

        let labels: Vec<&str> = out.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["D4", "O6", "", "K1"]);
        assert_eq!(out.iter().map(|e| e.count).sum::<usize>(), recs.len());
        assert_eq!(out[0], entry("D4", 3, "42.86"));
        assert_eq!(out[2], entry("", 1, "14.29"));
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let recs = records("k", &["a", "b", "c", "a", "b", "c", "c"]);
        let out = aggregate_by_key(&recs, "k");
        let sum: f64 = out
            .iter()
            .map(|e| e.percentage.parse::<f64>().unwrap())
            .inspect(|p| assert!((0.0..=100.0).contains(p)))
            .sum();
        assert!((sum - 100.0).abs() <= 0.01 * out.len() as f64, "sum = {sum}");
    }

    #[test]
    fn test_format_percentage() {
        let cases = vec![
            (1, 3, "33.33"),
            (2, 3, "66.67"),
            (1, 8, "12.50"),
            (5, 5, "100.00"),
            (0, 5, "0.00"),
            (0, 0, "0.00"),
            // Exact ties round to the even digit.
            (1, 32, "3.12"),
            (3, 32, "9.38"),
            (5, 32, "15.62"),
        ];
        for (count, total, expected) in cases {
            assert_eq!(format_percentage(count, total), expected, "{count}/{total}");
        }
    }

    #[test]
    fn test_count_where_ride_types() {
        let recs = records("type", &["classic_bike", "classic_bike", "electric_bike"]);
        assert_eq!(count_where(&recs, field_equals("type", "classic_bike")), 2);
        assert_eq!(count_where(&recs, field_equals("type", "electric_bike")), 1);
        assert_eq!(count_where(&recs, field_equals("missing", "classic_bike")), 0);
        assert_eq!(count_all(&recs), 3);
    }
}
