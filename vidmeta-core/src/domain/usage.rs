//! Account usage types

use serde::{Deserialize, Serialize};

/// Generation usage reported for the signed-in account
///
/// Counts are signed so an over-allowance balance still decodes.
/// Fractional counts are not expected and fail to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub free_credits_remaining: i64,
    pub total_generations: i64,
}

impl UsageStats {
    /// True when no free generations are left
    pub fn is_exhausted(&self) -> bool {
        self.free_credits_remaining <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_credits_decode() {
        let usage: UsageStats = serde_json::from_str(
            r#"{"free_credits_remaining": -2, "total_generations": 14}"#,
        )
        .unwrap();
        assert_eq!(usage.free_credits_remaining, -2);
        assert_eq!(usage.total_generations, 14);
        assert!(usage.is_exhausted());
    }

    #[test]
    fn test_remaining_credits() {
        let usage = UsageStats {
            free_credits_remaining: 3,
            total_generations: 0,
        };
        assert!(!usage.is_exhausted());
    }
}
