use {
    crate::{RequirementKey, TrackedKey},
    serde::{Deserialize, Serialize},
    std::collections::BTreeSet,
};

/// Snapshot of a hitcher's counters as delivered by the backend.
///
/// Every field defaults, so a record with missing fields reads as zero / empty
/// instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub tokens: u32,
    pub total_rides: u32,
    /// Kilometres.
    pub distance_traveled: f64,
    /// Days.
    pub current_streak: u32,
    pub longest_streak: u32,
    /// 0..=5 rating.
    pub trust_score: f64,
    /// Kilograms.
    pub co2_saved: f64,
    pub referral_count: u32,
    /// Collected plate codes.
    pub rto_collection: BTreeSet<String>,
    pub active_quests: BTreeSet<String>,
    pub completed_trails: BTreeSet<String>,
    /// Quests whose reward has been paid.
    pub completed_quests: BTreeSet<String>,
}

impl UserStats {
    /// The value a requirement key is compared against.
    pub fn stat(&self, key: RequirementKey) -> f64 {
        match key {
            RequirementKey::TotalRides => self.total_rides as f64,
            RequirementKey::DistanceKm => self.distance_traveled,
            RequirementKey::CurrentStreak => self.current_streak as f64,
            RequirementKey::Tokens => self.tokens as f64,
            RequirementKey::TrustScore => self.trust_score,
            RequirementKey::ReferralCount => self.referral_count as f64,
            RequirementKey::RtoPlates => self.rto_collection.len() as f64,
            RequirementKey::Co2Saved => self.co2_saved,
        }
    }

    /// The value a quest's tracked key accumulates from.
    pub fn tracked(&self, key: TrackedKey) -> f64 {
        match key {
            TrackedKey::RidesCount => self.total_rides as f64,
            TrackedKey::DistanceKm => self.distance_traveled,
            TrackedKey::StreakDays => self.current_streak as f64,
        }
    }

    /// Sets the current streak and raises the longest streak if it was beaten.
    pub fn record_streak(&mut self, days: u32) {
        self.current_streak = days;
        self.longest_streak = self.longest_streak.max(days);
    }

    pub fn add_tokens(&mut self, amount: u32) {
        self.tokens = self.tokens.saturating_add(amount);
    }

    /// Returns `false` and leaves the balance untouched when it cannot cover `amount`.
    pub fn spend_tokens(&mut self, amount: u32) -> bool {
        match self.tokens.checked_sub(amount) {
            Some(rest) => {
                self.tokens = rest;
                true
            }
            None => false,
        }
    }

    /// Marks a quest as completed. Returns `false` if it already was.
    pub fn complete_quest(&mut self, quest_id: &str) -> bool {
        self.completed_quests.insert(quest_id.to_string())
    }

    pub fn has_plate(&self, code: &str) -> bool {
        self.rto_collection.contains(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_zero() {
        let stats: UserStats = ron::from_str("(tokens: 40)").unwrap();
        assert_eq!(stats.tokens, 40);
        assert_eq!(stats.total_rides, 0);
        assert_eq!(stats.distance_traveled, 0.0);
        assert!(stats.rto_collection.is_empty());
    }

    #[test]
    fn rto_plates_counts_collection() {
        let stats = UserStats {
            rto_collection: ["KA-01", "MH-12"].into_iter().map(String::from).collect(),
            ..Default::default()
        };
        assert_eq!(stats.stat(RequirementKey::RtoPlates), 2.0);
    }

    #[test]
    fn quest_completes_once() {
        let mut stats = UserStats::default();
        assert!(stats.complete_quest("streak_week"));
        assert!(!stats.complete_quest("streak_week"));
        assert_eq!(stats.completed_quests.len(), 1);
    }

    #[test]
    fn record_streak_keeps_longest() {
        let mut stats = UserStats::default();
        stats.record_streak(7);
        stats.record_streak(2);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.longest_streak, 7);
    }

    #[test]
    fn spend_tokens_refuses_overdraft() {
        let mut stats = UserStats {
            tokens: 30,
            ..Default::default()
        };
        assert!(!stats.spend_tokens(31));
        assert_eq!(stats.tokens, 30);
        assert!(stats.spend_tokens(30));
        assert_eq!(stats.tokens, 0);
    }
}
