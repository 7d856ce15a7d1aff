use {catalog_assets::RewardDefinition, thiserror::Error};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedeemError {
    #[error("insufficient tokens: need {cost}, have {balance}")]
    InsufficientTokens { balance: u32, cost: u32 },

    #[error("reward {reward_id} is out of stock")]
    OutOfStock { reward_id: String },

    #[error("reward {reward_id} is not offered")]
    Inactive { reward_id: String },

    #[error("unknown reward {0}")]
    UnknownReward(String),
}

/// Checks a redemption without performing it.
pub fn can_redeem(balance: u32, reward: &RewardDefinition) -> Result<(), RedeemError> {
    if !reward.is_active {
        return Err(RedeemError::Inactive {
            reward_id: reward.id.clone(),
        });
    }
    if balance < reward.token_cost {
        return Err(RedeemError::InsufficientTokens {
            balance,
            cost: reward.token_cost,
        });
    }
    if reward.stock_available == 0 {
        return Err(RedeemError::OutOfStock {
            reward_id: reward.id.clone(),
        });
    }
    Ok(())
}
