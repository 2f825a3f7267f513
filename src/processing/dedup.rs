//! Prefix sorting and de-duplication.

use crate::models::Prefix;
use itertools::Itertools;
use std::error::Error;

/// Sort prefixes shortest first and drop exact duplicates.
pub fn sort_prefixes(mut prefixes: Vec<Prefix>) -> Vec<Prefix> {
    let original_count = prefixes.len();

    // Dedup - must be sorted first
    prefixes.sort();
    prefixes.dedup();

    let removed = original_count - prefixes.len();
    if removed > 0 {
        log::debug!("Removed {removed} duplicate prefix(es)");
    }
    prefixes
}

/// Return error if duplicate prefixes found.
pub fn check_for_duplicate_prefixes(prefixes: &[Prefix]) -> Result<(), Box<dyn Error>> {
    match prefixes.iter().duplicates().next() {
        Some(dup) => Err(format!("Duplicate found: {dup}").into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Prefix {
        s.parse().expect("Error parsing prefix")
    }

    #[test]
    fn test_sort_prefixes() {
        let sorted = sort_prefixes(vec![
            p("10.1.0.0/16"),
            p("10.0.0.0/8"),
            p("10.1.0.0/16"),
            p("9.0.0.0/16"),
            p("10.1.0.7/16"),
        ]);
        let text: Vec<String> = sorted.iter().map(|s| s.to_string()).collect();
        assert_eq!(text, vec!["10.0.0.0/8", "9.0.0.0/16", "10.1.0.0/16"], "sorted and deduped");
    }

    #[test]
    fn test_check_for_duplicate_prefixes() {
        assert!(
            check_for_duplicate_prefixes(&[p("10.0.0.0/8"), p("10.0.0.0/16")]).is_ok(),
            "same address with another length is not a duplicate"
        );
        let err = check_for_duplicate_prefixes(&[p("10.0.0.0/8"), p("10.9.9.9/8")])
            .expect_err("Duplicate not found");
        assert_eq!(err.to_string(), "Duplicate found: 10.0.0.0/8", "duplicate named");
    }

    #[test]
    fn test_duplicates_found_before_sorting() {
        let raw = vec![p("10.1.0.0/16"), p("10.0.0.0/8"), p("10.1.0.0/16")];
        assert!(check_for_duplicate_prefixes(&raw).is_err(), "raw input holds a duplicate");
        let sorted = sort_prefixes(raw);
        assert!(check_for_duplicate_prefixes(&sorted).is_ok(), "sort_prefixes keeps one copy");
        assert_eq!(sorted.len(), 2, "one copy kept");
    }
}
