//! Token balance movements and their history.
//!
//! The balance itself lives in `CurrentUser.stats.tokens`; [`TokenLedger`] keeps
//! everything around it (transactions, per-activity breakdown, redemptions, badges).

use {
    bevy::prelude::*,
    catalog_assets::RewardDefinition,
    chrono::{DateTime, Utc},
    hitch_events::{BadgeEarned, StreakUpdated, TokensEarned},
    profile_resources::CurrentUser,
    progression::{RedeemError, can_redeem},
    progression_components::{TokenBreakdown, TokenSource},
};

// --- Resources ---

#[derive(Debug, Clone, PartialEq)]
pub struct TokenTransaction {
    /// Negative for spending.
    pub amount: i64,
    pub source: TokenSource,
    pub reference: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Redemption {
    pub reward_id: String,
    pub reward_name: String,
    pub tokens_spent: u32,
    pub redeemed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub badge_id: String,
    pub title: String,
    pub achieved_at: DateTime<Utc>,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct TokenLedger {
    pub history: Vec<TokenTransaction>,
    pub breakdown: TokenBreakdown,
    pub redemptions: Vec<Redemption>,
    /// Earned badge ids, each at most once.
    pub badges: Vec<String>,
    pub achievements: Vec<Achievement>,
}

impl TokenLedger {
    pub fn record_credit(
        &mut self,
        amount: u32,
        source: TokenSource,
        reference: Option<String>,
        at: DateTime<Utc>,
    ) {
        self.breakdown.credit(source, amount);
        self.history.push(TokenTransaction {
            amount: i64::from(amount),
            source,
            reference,
            timestamp: at,
        });
    }

    pub fn record_redemption(&mut self, reward: &RewardDefinition, at: DateTime<Utc>) {
        self.history.push(TokenTransaction {
            amount: -i64::from(reward.token_cost),
            source: TokenSource::Redemption,
            reference: Some(reward.id.clone()),
            timestamp: at,
        });
        self.redemptions.push(Redemption {
            reward_id: reward.id.clone(),
            reward_name: reward.name.clone(),
            tokens_spent: reward.token_cost,
            redeemed_at: at,
        });
    }

    /// Returns `false` if the badge was already recorded.
    pub fn record_badge(&mut self, badge_id: &str, title: &str, at: DateTime<Utc>) -> bool {
        if self.badges.iter().any(|id| id == badge_id) {
            return false;
        }
        self.badges.push(badge_id.to_string());
        self.achievements.push(Achievement {
            badge_id: badge_id.to_string(),
            title: title.to_string(),
            achieved_at: at,
        });
        true
    }

    pub fn total_spent(&self) -> u32 {
        self.redemptions.iter().map(|r| r.tokens_spent).sum()
    }
}

// --- Events ---

/// Request to exchange tokens for a store reward.
///
/// # Observers
/// - `redeem_reward`: validates with `progression::can_redeem`, deducts the cost,
///   decrements the stock and answers with `RewardRedeemed` or `RedemptionRejected`.
#[derive(Event, Debug, Clone)]
pub struct RedeemReward {
    pub reward_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct RewardRedeemed {
    pub reward_id: String,
    pub tokens_spent: u32,
    pub balance: u32,
}

/// Nothing was changed.
#[derive(Event, Debug, Clone)]
pub struct RedemptionRejected {
    pub reward_id: String,
    pub error: RedeemError,
}

// --- Plugin ---

pub struct WalletPlugin;

impl Plugin for WalletPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TokenLedger>()
            .add_observer(credit_tokens)
            .add_observer(redeem_reward)
            .add_observer(update_streak)
            .add_observer(record_badge);
    }
}

// --- Observers ---

pub fn credit_tokens(
    trigger: On<TokensEarned>,
    mut user: ResMut<CurrentUser>,
    mut ledger: ResMut<TokenLedger>,
) {
    let event = trigger.event();
    if event.amount == 0 {
        trace!(source = ?event.source, "ignoring zero token credit");
        return;
    }

    user.stats.add_tokens(event.amount);
    ledger.record_credit(event.amount, event.source, event.reference.clone(), Utc::now());

    debug!(
        amount = event.amount,
        source = ?event.source,
        balance = user.stats.tokens,
        "tokens credited"
    );
}

pub fn redeem_reward(
    trigger: On<RedeemReward>,
    mut user: ResMut<CurrentUser>,
    mut ledger: ResMut<TokenLedger>,
    mut rewards: ResMut<Assets<RewardDefinition>>,
    mut commands: Commands,
) {
    let reward_id = trigger.event().reward_id.clone();

    let reject = |commands: &mut Commands, error: RedeemError| {
        warn!(%reward_id, %error, "redemption rejected");
        commands.trigger(RedemptionRejected {
            reward_id: reward_id.clone(),
            error,
        });
    };

    let Some(asset_id) = rewards
        .iter()
        .find(|(_, reward)| reward.id == reward_id)
        .map(|(id, _)| id)
    else {
        reject(&mut commands, RedeemError::UnknownReward(reward_id.clone()));
        return;
    };
    let Some(mut reward) = rewards.get_mut(asset_id) else {
        return;
    };

    if let Err(error) = can_redeem(user.stats.tokens, &reward) {
        reject(&mut commands, error);
        return;
    }
    if !user.stats.spend_tokens(reward.token_cost) {
        return;
    }
    reward.stock_available -= 1;
    ledger.record_redemption(&reward, Utc::now());

    info!(
        %reward_id,
        tokens_spent = reward.token_cost,
        balance = user.stats.tokens,
        "reward redeemed"
    );
    commands.trigger(RewardRedeemed {
        reward_id: reward_id.clone(),
        tokens_spent: reward.token_cost,
        balance: user.stats.tokens,
    });
}

pub fn update_streak(trigger: On<StreakUpdated>, mut user: ResMut<CurrentUser>) {
    let days = trigger.event().days;
    user.stats.record_streak(days);
    debug!(days, longest = user.stats.longest_streak, "streak updated");
}

pub fn record_badge(trigger: On<BadgeEarned>, mut ledger: ResMut<TokenLedger>) {
    let event = trigger.event();
    if !ledger.record_badge(&event.badge_id, &event.title, Utc::now()) {
        trace!(badge_id = %event.badge_id, "badge already recorded");
    }
}
