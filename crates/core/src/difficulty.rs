//! Difficulty module - score-driven speed curve
//!
//! Every lock adds the number of cleared rows to the score. The tier rises by
//! one for every `acceleration` points and each tier shortens the gravity
//! interval by `fall_step_ms`, down to `min_fall_interval_ms`.

use crate::types::Rules;

/// Difficulty tier plus the gravity interval it implies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Difficulty {
    /// Tier, starting at 1
    pub tier: u32,
    pub fall_interval_ms: u32,
}

impl Difficulty {
    /// Difficulty reached at `score`
    pub fn for_score(score: u32, rules: &Rules) -> Self {
        let tier = tier_for(score, rules);
        Self {
            tier,
            fall_interval_ms: fall_interval_ms(tier, rules),
        }
    }
}

/// Tier reached at `score`: `score / acceleration + 1`
pub fn tier_for(score: u32, rules: &Rules) -> u32 {
    (score / rules.acceleration.max(1)).saturating_add(1)
}

/// Gravity interval at `tier`, clamped to the rules' floor
pub fn fall_interval_ms(tier: u32, rules: &Rules) -> u32 {
    let reduced =
        i64::from(rules.base_fall_interval_ms) - i64::from(tier) * i64::from(rules.fall_step_ms);
    let floor = i64::from(rules.min_fall_interval_ms);
    // both operands fit in u32 once the floor is applied
    reduced.max(floor).min(i64::from(u32::MAX)) as u32
}

/// Score gained by a lock that cleared `rows` rows
pub fn score_for_clear(rows: usize) -> u32 {
    rows as u32
}
