use serde::{Deserialize, Serialize};

use super::Month;
use crate::error::DomainError;

/// Longest advice text accepted, in characters.
pub const MAX_DETAIL_LEN: usize = 10_000;

/// Advice entity - a piece of advice tagged with one or more months.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advice {
    pub id: i32,
    pub detail: String,
    pub months: Vec<Month>,
}

impl Advice {
    /// Validate an advice text before it is stored.
    pub fn validate_detail(detail: &str) -> Result<(), DomainError> {
        if detail.trim().is_empty() {
            return Err(DomainError::Validation(
                "advice detail must not be empty".to_string(),
            ));
        }
        if detail.chars().count() > MAX_DETAIL_LEN {
            return Err(DomainError::Validation(format!(
                "advice detail must not exceed {} characters",
                MAX_DETAIL_LEN
            )));
        }
        Ok(())
    }

    /// Numbers of the months this advice is tagged with.
    pub fn month_numbers(&self) -> Vec<u32> {
        self.months.iter().map(|m| m.num).collect()
    }
}

/// One advice as listed for a given month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAdvice {
    pub id: i32,
    pub detail: String,
    /// Name of the month the listing was made for.
    pub month: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_detail() {
        assert!(Advice::validate_detail("Plant tomatoes").is_ok());
        assert!(Advice::validate_detail("   ").is_err());
        assert!(Advice::validate_detail(&"a".repeat(MAX_DETAIL_LEN)).is_ok());
        assert!(Advice::validate_detail(&"a".repeat(MAX_DETAIL_LEN + 1)).is_err());
    }
}
