use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A calendar month advice can be tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    pub id: i32,
    /// Month number, 1 (January) to 12 (December).
    pub num: u32,
    pub name: String,
}

/// Names the month table is seeded with, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// Check that `num` designates a calendar month.
pub fn validate_month(num: u32) -> Result<u32, DomainError> {
    if (1..=12).contains(&num) {
        Ok(num)
    } else {
        Err(DomainError::Validation(
            "month number must be between 1 and 12".to_string(),
        ))
    }
}

/// Parse a comma-separated list of month numbers such as `"1,3,12"`.
///
/// Entries that are not integers in `1..=12` are dropped and duplicates are
/// collapsed, keeping the order of first appearance.
pub fn parse_month_list(raw: &str) -> Vec<u32> {
    let mut months = Vec::new();
    for num in raw
        .split(',')
        .filter_map(|part| part.trim().parse::<u32>().ok())
        .filter(|num| validate_month(*num).is_ok())
    {
        if !months.contains(&num) {
            months.push(num);
        }
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_list_filters_out_of_range() {
        assert_eq!(parse_month_list("1,3,13,0,12"), vec![1, 3, 12]);
    }

    #[test]
    fn test_parse_month_list_ignores_garbage_and_duplicates() {
        assert_eq!(parse_month_list(" 4, abc,4,,-2, 5 "), vec![4, 5]);
        assert!(parse_month_list("").is_empty());
    }

    #[test]
    fn test_validate_month_bounds() {
        assert!(validate_month(1).is_ok());
        assert!(validate_month(12).is_ok());
        assert!(matches!(
            validate_month(13),
            Err(DomainError::Validation(_))
        ));
        assert!(validate_month(0).is_err());
    }
}
