use serde::{Deserialize, Serialize};

/// Where a token movement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenSource {
    Travel,
    Eco,
    Social,
    Quest,
    RtoDiscovery,
    Redemption,
}

/// Lifetime earnings split by activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenBreakdown {
    pub travel_tokens: u32,
    pub eco_tokens: u32,
    pub social_tokens: u32,
    pub quest_tokens: u32,
}

impl TokenBreakdown {
    /// Plate bonuses and redemptions are not part of the breakdown.
    pub fn credit(&mut self, source: TokenSource, amount: u32) {
        let slot = match source {
            TokenSource::Travel => &mut self.travel_tokens,
            TokenSource::Eco => &mut self.eco_tokens,
            TokenSource::Social => &mut self.social_tokens,
            TokenSource::Quest => &mut self.quest_tokens,
            TokenSource::RtoDiscovery | TokenSource::Redemption => return,
        };
        *slot = slot.saturating_add(amount);
    }

    pub fn total(&self) -> u32 {
        self.travel_tokens
            .saturating_add(self.eco_tokens)
            .saturating_add(self.social_tokens)
            .saturating_add(self.quest_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_ignores_non_earning_sources() {
        let mut breakdown = TokenBreakdown::default();
        breakdown.credit(TokenSource::Travel, 50);
        breakdown.credit(TokenSource::Eco, 25);
        breakdown.credit(TokenSource::RtoDiscovery, 100);
        assert_eq!(breakdown.travel_tokens, 50);
        assert_eq!(breakdown.eco_tokens, 25);
        assert_eq!(breakdown.total(), 75);
    }
}
