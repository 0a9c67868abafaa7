//! Tenure locks ("burn").
//!
//! Matches are accumulated from the weakest tier towards the strongest. A
//! player is locked at the weakest tier `t` for which the matches played in
//! `t` or any weaker tier reach the threshold, and from then on may only be
//! fielded at `t` or weaker tiers for the rest of the leg. Extra matches can
//! only move the lock towards weaker tiers, never back.

use super::history::{PlayerHistory, TierCounts};
use crate::domain::{Category, Tier};

/// Which matches feed the lock computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockScope {
    /// Only teams of the same gender category (classic league)
    Category,
    /// Every team of the club (group league)
    AllTeams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockPolicy {
    pub threshold: u32,
    pub scope: LockScope,
}

impl LockPolicy {
    pub fn per_category(threshold: u32) -> Self {
        Self {
            threshold,
            scope: LockScope::Category,
        }
    }

    pub fn club_wide(threshold: u32) -> Self {
        Self {
            threshold,
            scope: LockScope::AllTeams,
        }
    }

    fn counts(&self, history: &PlayerHistory, category: Category) -> TierCounts {
        match self.scope {
            LockScope::Category => history.tier_counts(Some(category)),
            LockScope::AllTeams => history.tier_counts(None),
        }
    }

    /// Tier the player is locked at given what they already played
    pub fn current_lock(&self, history: Option<&PlayerHistory>, category: Category) -> Option<Tier> {
        let counts = self.counts(history?, category);
        lock_tier(&counts, self.threshold)
    }

    /// Tier the player would be locked at after one more match at
    /// `candidate_tier`. No history means no lock.
    pub fn future_lock(
        &self,
        history: Option<&PlayerHistory>,
        candidate_tier: Tier,
        category: Category,
    ) -> Option<Tier> {
        let counts = self.counts(history?, category);
        future_lock_from_counts(Some(&counts), candidate_tier, self.threshold)
    }

    /// Whether the player may still be fielded at `tier`
    pub fn permits(&self, history: Option<&PlayerHistory>, tier: Tier, category: Category) -> bool {
        match self.current_lock(history, category) {
            Some(lock) => tier >= lock,
            None => true,
        }
    }
}

/// Weakest tier whose cumulative count (that tier and weaker) reaches
/// `threshold`
pub fn lock_tier(counts: &TierCounts, threshold: u32) -> Option<Tier> {
    let mut accumulated = 0;
    for (&tier, &count) in counts.iter().rev() {
        accumulated += count;
        if accumulated >= threshold {
            return Some(tier);
        }
    }
    None
}

pub fn future_lock_from_counts(counts: Option<&TierCounts>, candidate_tier: Tier, threshold: u32) -> Option<Tier> {
    let mut projected = counts?.clone();
    *projected.entry(candidate_tier).or_insert(0) += 1;
    lock_tier(&projected, threshold)
}
