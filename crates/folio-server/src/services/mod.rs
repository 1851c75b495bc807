//! Outbound integrations.

pub mod leetcode;

pub use leetcode::{LeetCodeError, LeetCodeService, LeetCodeStats, StatsSource};
