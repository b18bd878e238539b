use crate::core::{FieldValue, Record, SortConfig, SortDirection};
use std::cmp::Ordering;

/// Returns a new, sorted sequence; the input is left untouched.
///
/// The sort is stable in both directions: records with equal keys keep
/// their relative input order. A record missing the key sorts as the
/// smallest value.
pub fn sort_records<'a>(records: &[&'a Record], config: &SortConfig) -> Vec<&'a Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_records(a, b, config));
    sorted
}

pub fn compare_records(a: &Record, b: &Record, config: &SortConfig) -> Ordering {
    let ordering = compare_values(a.get(&config.key), b.get(&config.key));
    match config.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

pub fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.natural_cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::seed_records;

    fn refs(records: &[Record]) -> Vec<&Record> {
        records.iter().collect()
    }

    #[test]
    fn test_sort_by_age() {
        let data = seed_records();
        let asc = sort_records(&refs(&data), &SortConfig::ascending("age"));
        assert_eq!(asc[0].get("age"), Some(&FieldValue::from(24)));
        assert_eq!(asc[0].get("name"), Some(&FieldValue::from("Kate")));

        let desc = sort_records(&refs(&data), &SortConfig::descending("age"));
        assert_eq!(desc[0].get("age"), Some(&FieldValue::from(35)));
    }

    #[test]
    fn test_adjacent_pairs_are_ordered() {
        let data = seed_records();
        for key in ["name", "age", "location", "role"] {
            let asc = sort_records(&refs(&data), &SortConfig::ascending(key));
            for pair in asc.windows(2) {
                assert_ne!(
                    compare_values(pair[0].get(key), pair[1].get(key)),
                    Ordering::Greater
                );
            }

            let desc = sort_records(&refs(&data), &SortConfig::descending(key));
            for pair in desc.windows(2) {
                assert_ne!(
                    compare_values(pair[0].get(key), pair[1].get(key)),
                    Ordering::Less
                );
            }
        }
    }

    #[test]
    fn test_sort_is_idempotent() {
        let data = seed_records();
        let config = SortConfig::descending("department");
        let once = sort_records(&refs(&data), &config);
        let twice = sort_records(&once, &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let data = seed_records();

        // age 35: Frank 在 Victor 之前
        let desc = sort_records(&refs(&data), &SortConfig::descending("age"));
        assert_eq!(desc[0].get("name"), Some(&FieldValue::from("Frank")));
        assert_eq!(desc[1].get("name"), Some(&FieldValue::from("Victor")));

        let asc = sort_records(&refs(&data), &SortConfig::ascending("age"));
        let age_25: Vec<String> = asc
            .iter()
            .filter(|r| r.get("age") == Some(&FieldValue::from(25)))
            .map(|r| r.get("name").map(|v| v.to_string()).unwrap_or_default())
            .collect();
        assert_eq!(age_25, vec!["Alice", "Olivia"]);
    }

    #[test]
    fn test_missing_key_sorts_first() {
        let data = vec![
            Record::from_pairs([("name", FieldValue::from("B")), ("age", FieldValue::from(3))]),
            Record::from_pairs([("name", "A")]),
            Record::from_pairs([("name", FieldValue::from("C")), ("age", FieldValue::from(1))]),
        ];
        let asc = sort_records(&refs(&data), &SortConfig::ascending("age"));
        let order: Vec<String> = asc
            .iter()
            .map(|r| r.get("name").map(|v| v.to_string()).unwrap_or_default())
            .collect();
        assert_eq!(order, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let data = seed_records();
        let input = refs(&data);
        let _ = sort_records(&input, &SortConfig::ascending("age"));
        assert_eq!(input[0].get("name"), Some(&FieldValue::from("Alice")));
    }
}
