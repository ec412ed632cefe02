//! Ledger state held in ordinary maps, for hosts that run the rules
//! outside a contract.

use ink::prelude::collections::BTreeMap;

use crate::config::TokenConfig;
use crate::logic::{self, LedgerState};
use crate::model::{Amount, Identity, LedgerEvent, Result, TokenMetadata};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLedger<A: Ord> {
    metadata: TokenMetadata,
    owner_acc: A,
    max_supply: Amount,
    total_supply: Amount,
    balances: BTreeMap<A, Amount>,
    allowances: BTreeMap<(A, A), Amount>,
}

impl<A: Identity + Ord> MemoryLedger<A> {
    /// Creates a ledger owned by `creator`, minting the genesis allocation to it.
    pub fn new(creator: A, config: TokenConfig) -> Result<Self> {
        let mut ledger = Self {
            metadata: config.metadata,
            owner_acc: creator,
            max_supply: config.max_supply,
            total_supply: Amount::ZERO,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        };
        if !config.initial_supply.is_zero() {
            logic::mint(&mut ledger, creator, creator, config.initial_supply)?;
        }
        Ok(ledger)
    }

    // -------- read API --------

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn owner(&self) -> A {
        self.owner_acc
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn max_supply(&self) -> Amount {
        self.max_supply
    }

    pub fn balance_of(&self, account: &A) -> Amount {
        self.read_balance(account)
    }

    pub fn allowance(&self, owner: &A, spender: &A) -> Amount {
        self.read_allowance(owner, spender)
    }

    /// Accounts with a non-zero balance.
    pub fn holders(&self) -> impl Iterator<Item = (&A, &Amount)> {
        self.balances.iter()
    }

    // -------- write API --------

    pub fn transfer(&mut self, caller: A, to: A, amount: Amount) -> Result<LedgerEvent<A>> {
        logic::transfer(self, caller, to, amount)
    }

    pub fn approve(&mut self, caller: A, spender: A, amount: Amount) -> LedgerEvent<A> {
        logic::approve(self, caller, spender, amount)
    }

    pub fn increase_allowance(
        &mut self,
        caller: A,
        spender: A,
        delta: Amount,
    ) -> Result<LedgerEvent<A>> {
        logic::increase_allowance(self, caller, spender, delta)
    }

    pub fn decrease_allowance(
        &mut self,
        caller: A,
        spender: A,
        delta: Amount,
    ) -> Result<LedgerEvent<A>> {
        logic::decrease_allowance(self, caller, spender, delta)
    }

    pub fn transfer_from(
        &mut self,
        caller: A,
        from: A,
        to: A,
        amount: Amount,
    ) -> Result<[LedgerEvent<A>; 2]> {
        logic::transfer_from(self, caller, from, to, amount)
    }

    pub fn mint(&mut self, caller: A, to: A, amount: Amount) -> Result<LedgerEvent<A>> {
        logic::mint(self, caller, to, amount)
    }

    pub fn burn(&mut self, caller: A, amount: Amount) -> Result<LedgerEvent<A>> {
        logic::burn(self, caller, amount)
    }

    pub fn transfer_ownership(&mut self, caller: A, new_owner: A) -> Result<LedgerEvent<A>> {
        logic::transfer_ownership(self, caller, new_owner)
    }
}

impl<A: Identity + Ord> LedgerState<A> for MemoryLedger<A> {
    fn read_balance(&self, account: &A) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn write_balance(&mut self, account: &A, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, amount);
        }
    }

    fn read_allowance(&self, owner: &A, spender: &A) -> Amount {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or_default()
    }

    fn write_allowance(&mut self, owner: &A, spender: &A, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), amount);
        }
    }

    fn read_supply(&self) -> Amount {
        self.total_supply
    }

    fn write_supply(&mut self, amount: Amount) {
        self.total_supply = amount;
    }

    fn supply_cap(&self) -> Amount {
        self.max_supply
    }

    fn read_owner(&self) -> A {
        self.owner_acc
    }

    fn write_owner(&mut self, owner: A) {
        self.owner_acc = owner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Error;
    use ink::primitives::AccountId;

    const OWNER: [u8; 20] = [0xA1; 20];
    const OTHER: [u8; 20] = [0xB2; 20];

    fn tokens(whole: u64) -> Amount {
        Amount::tokens(whole)
    }

    fn ledger() -> MemoryLedger<[u8; 20]> {
        MemoryLedger::new(OWNER, TokenConfig::default()).unwrap()
    }

    #[test]
    fn creation_mints_genesis_to_creator() {
        let ledger = ledger();
        assert_eq!(ledger.owner(), OWNER);
        assert_eq!(ledger.balance_of(&OWNER), tokens(1_000));
        assert_eq!(ledger.total_supply(), tokens(1_000));
        assert_eq!(ledger.max_supply(), tokens(10_000_000));
        assert_eq!(ledger.name(), "Mat42Coin");
        assert_eq!(ledger.symbol(), "M42");
        assert_eq!(ledger.decimals(), 18);
    }

    #[test]
    fn genesis_above_cap_is_rejected() {
        let config = TokenConfig::default().with_initial_supply(tokens(10_000_001));
        assert_eq!(
            MemoryLedger::new(OWNER, config).unwrap_err(),
            Error::SupplyCapExceeded
        );
    }

    #[test]
    fn empty_genesis_leaves_no_holders() {
        let config = TokenConfig::default().with_initial_supply(Amount::ZERO);
        let ledger = MemoryLedger::new(OWNER, config).unwrap();
        assert_eq!(ledger.total_supply(), Amount::ZERO);
        assert_eq!(ledger.holders().count(), 0);
    }

    #[test]
    fn drained_accounts_are_dropped() {
        let mut ledger = ledger();
        ledger.transfer(OWNER, OTHER, tokens(1_000)).unwrap();
        let holders: Vec<_> = ledger.holders().map(|(acc, bal)| (*acc, *bal)).collect();
        assert_eq!(holders, vec![(OTHER, tokens(1_000))]);
    }

    #[test]
    fn walkthrough() {
        let mut ledger = ledger();

        // 1. plain transfer
        ledger.transfer(OWNER, OTHER, tokens(100)).unwrap();
        assert_eq!(ledger.balance_of(&OWNER), tokens(900));
        assert_eq!(ledger.balance_of(&OTHER), tokens(100));

        // 2. overdraft
        let before = ledger.clone();
        assert_eq!(
            ledger.transfer(OTHER, OWNER, tokens(100_000)),
            Err(Error::InsufficientBalance)
        );
        assert_eq!(ledger, before);

        // 3. delegated spend
        ledger.approve(OWNER, OTHER, tokens(51));
        assert_eq!(ledger.allowance(&OWNER, &OTHER), tokens(51));
        ledger.transfer_from(OTHER, OWNER, OTHER, tokens(50)).unwrap();
        assert_eq!(ledger.allowance(&OWNER, &OTHER), tokens(1));
        assert_eq!(ledger.balance_of(&OWNER), tokens(850));
        assert_eq!(ledger.balance_of(&OTHER), tokens(150));
        let before = ledger.clone();
        assert_eq!(
            ledger.transfer_from(OTHER, OWNER, OTHER, tokens(5_000)),
            Err(Error::InsufficientAllowance)
        );
        assert_eq!(ledger, before);

        // 4. owner-gated mint
        ledger.mint(OWNER, OTHER, tokens(500)).unwrap();
        assert_eq!(ledger.balance_of(&OTHER), tokens(650));
        assert_eq!(ledger.total_supply(), tokens(1_500));
        assert_eq!(ledger.mint(OTHER, OTHER, tokens(100)), Err(Error::Unauthorized));

        // 5. burn
        ledger.burn(OTHER, tokens(200)).unwrap();
        assert_eq!(ledger.balance_of(&OTHER), tokens(450));
        assert_eq!(ledger.total_supply(), tokens(1_300));
        assert_eq!(ledger.burn(OTHER, tokens(100_000)), Err(Error::InsufficientBalance));

        // 6. ownership hand-over
        ledger.transfer_ownership(OWNER, OTHER).unwrap();
        assert_eq!(ledger.owner(), OTHER);
        assert_eq!(ledger.mint(OWNER, OWNER, tokens(1)), Err(Error::Unauthorized));
        ledger.transfer_ownership(OTHER, OWNER).unwrap();
        assert_eq!(ledger.owner(), OWNER);
    }

    #[test]
    fn independent_instances_do_not_share_state() {
        let alice = AccountId::from([1u8; 32]);
        let bob = AccountId::from([2u8; 32]);
        let mut first = MemoryLedger::new(alice, TokenConfig::default()).unwrap();
        let second = MemoryLedger::new(alice, TokenConfig::default()).unwrap();
        first.transfer(alice, bob, tokens(1)).unwrap();
        assert_eq!(second.balance_of(&bob), Amount::ZERO);
        assert_eq!(first.balance_of(&bob), tokens(1));
    }
}
