//! Creation parameters of a ledger.

use ink::prelude::string::String;

use crate::model::{Amount, TokenMetadata, DECIMALS};

pub const DEFAULT_NAME: &str = "Mat42Coin";
pub const DEFAULT_SYMBOL: &str = "M42";
/// Supply cap of the preset, in whole tokens.
pub const DEFAULT_MAX_SUPPLY_TOKENS: u64 = 10_000_000;
/// Genesis allocation of the preset, in whole tokens, credited to the creator.
pub const DEFAULT_GENESIS_TOKENS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    pub metadata: TokenMetadata,
    pub max_supply: Amount,
    pub initial_supply: Amount,
}

impl TokenConfig {
    pub fn new(name: String, symbol: String, decimals: u8, max_supply: Amount) -> Self {
        Self {
            metadata: TokenMetadata { name, symbol, decimals },
            max_supply,
            initial_supply: Amount::ZERO,
        }
    }

    pub fn with_initial_supply(mut self, initial_supply: Amount) -> Self {
        self.initial_supply = initial_supply;
        self
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::new(
            String::from(DEFAULT_NAME),
            String::from(DEFAULT_SYMBOL),
            DECIMALS,
            Amount::tokens(DEFAULT_MAX_SUPPLY_TOKENS),
        )
        .with_initial_supply(Amount::tokens(DEFAULT_GENESIS_TOKENS))
    }
}
