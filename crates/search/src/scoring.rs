//! Match score arithmetic.
//!
//! The score of a candidate against some criteria is the share of selected
//! criteria items it satisfies. Set-valued dimensions (subjects, grades)
//! contribute one item per selected value, every other constrained dimension
//! contributes exactly one item.

use serde::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Score reported when nothing is constrained
pub const UNCONSTRAINED_SCORE: u8 = 100;

/// Running `(matched, total)` pair behind a match score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchBreakdown {
    /// Selected items the candidate satisfies
    pub matched: u32,
    /// Selected items across all constrained dimensions
    pub total: u32,
}

impl MatchBreakdown {
    /// One item, matched or not
    pub fn single(matched: bool) -> Self {
        Self {
            matched: matched as u32,
            total: 1,
        }
    }

    /// One item per selected value, matched when `has` holds for it
    pub fn count_items<'a, I>(selected: I, has: impl Fn(&str) -> bool) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        selected
            .into_iter()
            .map(|item| Self::single(has(item)))
            .sum()
    }

    /// Percentage of matched items, rounded half up, in `0..=100`.
    ///
    /// An empty breakdown scores 100.
    pub fn score(&self) -> u8 {
        if self.total == 0 {
            return UNCONSTRAINED_SCORE;
        }
        let matched = u64::from(self.matched.min(self.total));
        let total = u64::from(self.total);
        // round(100 * m / t) without floats
        ((200 * matched + total) / (2 * total)) as u8
    }

    pub fn is_full_match(&self) -> bool {
        self.matched == self.total
    }
}

impl Add for MatchBreakdown {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            matched: self.matched + other.matched,
            total: self.total + other.total,
        }
    }
}

impl AddAssign for MatchBreakdown {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for MatchBreakdown {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(matched: u32, total: u32) -> MatchBreakdown {
        MatchBreakdown { matched, total }
    }

    #[test]
    fn test_empty_breakdown_scores_100() {
        assert_eq!(MatchBreakdown::default().score(), 100);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(breakdown(2, 3).score(), 67);
        assert_eq!(breakdown(1, 3).score(), 33);
        assert_eq!(breakdown(1, 2).score(), 50);
        assert_eq!(breakdown(1, 8).score(), 13); // 12.5 rounds up
        assert_eq!(breakdown(0, 5).score(), 0);
        assert_eq!(breakdown(5, 5).score(), 100);
    }

    #[test]
    fn test_sum_and_add_assign() {
        let parts = [breakdown(2, 3), MatchBreakdown::single(true), MatchBreakdown::single(false)];
        let total: MatchBreakdown = parts.into_iter().sum();
        assert_eq!(total, breakdown(3, 5));

        let mut running = MatchBreakdown::default();
        running += breakdown(1, 1);
        running += breakdown(0, 2);
        assert_eq!(running, breakdown(1, 3));
        assert!(!running.is_full_match());
    }

    #[test]
    fn test_count_items() {
        let selected = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let tally = MatchBreakdown::count_items(&selected, |item| item != "B");
        assert_eq!(tally, breakdown(2, 3));
    }
}
