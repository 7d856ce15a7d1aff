use serde::{Deserialize, Serialize};

/// Every stat a badge requirement may constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementKey {
    TotalRides,
    DistanceKm,
    CurrentStreak,
    Tokens,
    TrustScore,
    ReferralCount,
    /// Size of the plate collection.
    RtoPlates,
    Co2Saved,
}

impl RequirementKey {
    pub const ALL: [RequirementKey; 8] = [
        RequirementKey::TotalRides,
        RequirementKey::DistanceKm,
        RequirementKey::CurrentStreak,
        RequirementKey::Tokens,
        RequirementKey::TrustScore,
        RequirementKey::ReferralCount,
        RequirementKey::RtoPlates,
        RequirementKey::Co2Saved,
    ];
}

/// Sparse set of stat thresholds a badge asks for.
///
/// Unknown keys are rejected when parsing. A threshold of `0` is treated exactly
/// like an absent key: it never constrains anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Requirement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rides: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_streak: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_score: Option<f64>,
    /// Stored badge records call this `referrals`.
    #[serde(alias = "referrals", skip_serializing_if = "Option::is_none")]
    pub referral_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rto_plates: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co2_saved: Option<f64>,
}

impl Requirement {
    pub fn threshold(&self, key: RequirementKey) -> Option<f64> {
        match key {
            RequirementKey::TotalRides => self.total_rides,
            RequirementKey::DistanceKm => self.distance_km,
            RequirementKey::CurrentStreak => self.current_streak,
            RequirementKey::Tokens => self.tokens,
            RequirementKey::TrustScore => self.trust_score,
            RequirementKey::ReferralCount => self.referral_count,
            RequirementKey::RtoPlates => self.rto_plates,
            RequirementKey::Co2Saved => self.co2_saved,
        }
    }

    pub fn with(mut self, key: RequirementKey, threshold: f64) -> Self {
        let slot = match key {
            RequirementKey::TotalRides => &mut self.total_rides,
            RequirementKey::DistanceKm => &mut self.distance_km,
            RequirementKey::CurrentStreak => &mut self.current_streak,
            RequirementKey::Tokens => &mut self.tokens,
            RequirementKey::TrustScore => &mut self.trust_score,
            RequirementKey::ReferralCount => &mut self.referral_count,
            RequirementKey::RtoPlates => &mut self.rto_plates,
            RequirementKey::Co2Saved => &mut self.co2_saved,
        };
        *slot = Some(threshold);
        self
    }

    /// Keys that actually constrain: present and neither zero nor NaN.
    pub fn constraints(&self) -> impl Iterator<Item = (RequirementKey, f64)> + '_ {
        RequirementKey::ALL.into_iter().filter_map(move |key| {
            self.threshold(key)
                .filter(|t| is_set(*t))
                .map(|t| (key, t))
        })
    }
}

/// The three stats quest progress is tracked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedKey {
    RidesCount,
    DistanceKm,
    StreakDays,
}

impl TrackedKey {
    pub const ALL: [TrackedKey; 3] = [
        TrackedKey::RidesCount,
        TrackedKey::DistanceKm,
        TrackedKey::StreakDays,
    ];
}

/// Quest targets, restricted to the progress-tracked keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuestRequirement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rides_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_days: Option<f64>,
}

impl QuestRequirement {
    pub fn target(&self, key: TrackedKey) -> Option<f64> {
        match key {
            TrackedKey::RidesCount => self.rides_count,
            TrackedKey::DistanceKm => self.distance_km,
            TrackedKey::StreakDays => self.streak_days,
        }
    }

    /// Same zero-means-absent rule as [`Requirement::constraints`].
    pub fn targets(&self) -> impl Iterator<Item = (TrackedKey, f64)> + '_ {
        TrackedKey::ALL
            .into_iter()
            .filter_map(move |key| self.target(key).filter(|t| is_set(*t)).map(|t| (key, t)))
    }
}

fn is_set(threshold: f64) -> bool {
    threshold != 0.0 && !threshold.is_nan()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_thresholds_are_not_constraints() {
        let req = Requirement::default()
            .with(RequirementKey::TotalRides, 0.0)
            .with(RequirementKey::Tokens, 100.0);
        let keys: Vec<_> = req.constraints().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![RequirementKey::Tokens]);
    }

    #[test]
    fn referrals_alias_parses() {
        let req: Requirement =
            ron::from_str("#![enable(implicit_some)]\n(referrals: 3, rto_plates: 5)").unwrap();
        assert_eq!(req.referral_count, Some(3.0));
        assert_eq!(req.rto_plates, Some(5.0));
    }

    #[test]
    fn unknown_requirement_key_is_rejected() {
        let parsed = ron::from_str::<Requirement>("#![enable(implicit_some)]\n(total_ridez: 3)");
        assert!(parsed.is_err());
    }

    #[test]
    fn quest_targets_skip_missing_keys() {
        let req = QuestRequirement {
            rides_count: Some(10.0),
            streak_days: Some(0.0),
            ..Default::default()
        };
        let targets: Vec<_> = req.targets().collect();
        assert_eq!(targets, vec![(TrackedKey::RidesCount, 10.0)]);
    }
}
