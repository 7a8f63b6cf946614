//! Scoring - error count to a bounded score

/// Score with no errors
pub const MAX_SCORE: u8 = 100;

/// Points removed per error
pub const ERROR_PENALTY: u8 = 20;

/// `max(0, 100 - 20 × errors)`
pub fn score_for(error_count: usize) -> u8 {
    let penalty = error_count.saturating_mul(ERROR_PENALTY as usize);
    MAX_SCORE.saturating_sub(penalty.min(MAX_SCORE as usize) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_score_points() {
        assert_eq!(score_for(0), 100);
        assert_eq!(score_for(1), 80);
        assert_eq!(score_for(3), 40);
        assert_eq!(score_for(5), 0);
        assert_eq!(score_for(12), 0);
        assert_eq!(score_for(usize::MAX), 0);
    }

    proptest! {
        #[test]
        fn prop_non_increasing(n in 0usize..1000) {
            prop_assert!(score_for(n + 1) <= score_for(n));
            prop_assert!(score_for(n) <= MAX_SCORE);
        }
    }
}
