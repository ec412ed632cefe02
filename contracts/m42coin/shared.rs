//! Thread-safe handle over a [`MemoryLedger`].
//!
//! Every mutation runs its full check-then-write sequence under the write
//! lock; queries share the read lock and never observe a half-applied call.

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;

use crate::memory::MemoryLedger;
use crate::model::{Amount, Identity, LedgerEvent, Result};

#[derive(Debug)]
pub struct SharedLedger<A: Ord> {
    inner: Arc<RwLock<MemoryLedger<A>>>,
}

impl<A: Ord> Clone for SharedLedger<A> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<A: Identity + Ord> SharedLedger<A> {
    pub fn new(ledger: MemoryLedger<A>) -> Self {
        Self { inner: Arc::new(RwLock::new(ledger)) }
    }

    /// Consistent copy of the whole state.
    pub fn snapshot(&self) -> MemoryLedger<A> {
        self.inner.read().clone()
    }

    // -------- read API --------

    pub fn balance_of(&self, account: &A) -> Amount {
        self.inner.read().balance_of(account)
    }

    pub fn allowance(&self, owner: &A, spender: &A) -> Amount {
        self.inner.read().allowance(owner, spender)
    }

    pub fn total_supply(&self) -> Amount {
        self.inner.read().total_supply()
    }

    pub fn max_supply(&self) -> Amount {
        self.inner.read().max_supply()
    }

    pub fn owner(&self) -> A {
        self.inner.read().owner()
    }

    pub fn decimals(&self) -> u8 {
        self.inner.read().decimals()
    }

    // -------- write API --------

    pub fn transfer(&self, caller: A, to: A, amount: Amount) -> Result<LedgerEvent<A>> {
        let outcome = self.inner.write().transfer(caller, to, amount);
        traced("transfer", caller, outcome)
    }

    pub fn approve(&self, caller: A, spender: A, amount: Amount) -> LedgerEvent<A> {
        let event = self.inner.write().approve(caller, spender, amount);
        debug!("approve by {:?}: {:?}", caller, event);
        event
    }

    pub fn increase_allowance(&self, caller: A, spender: A, delta: Amount) -> Result<LedgerEvent<A>> {
        let outcome = self.inner.write().increase_allowance(caller, spender, delta);
        traced("increase_allowance", caller, outcome)
    }

    pub fn decrease_allowance(&self, caller: A, spender: A, delta: Amount) -> Result<LedgerEvent<A>> {
        let outcome = self.inner.write().decrease_allowance(caller, spender, delta);
        traced("decrease_allowance", caller, outcome)
    }

    pub fn transfer_from(
        &self,
        caller: A,
        from: A,
        to: A,
        amount: Amount,
    ) -> Result<[LedgerEvent<A>; 2]> {
        let outcome = self.inner.write().transfer_from(caller, from, to, amount);
        traced("transfer_from", caller, outcome)
    }

    pub fn mint(&self, caller: A, to: A, amount: Amount) -> Result<LedgerEvent<A>> {
        let outcome = self.inner.write().mint(caller, to, amount);
        traced("mint", caller, outcome)
    }

    pub fn burn(&self, caller: A, amount: Amount) -> Result<LedgerEvent<A>> {
        let outcome = self.inner.write().burn(caller, amount);
        traced("burn", caller, outcome)
    }

    pub fn transfer_ownership(&self, caller: A, new_owner: A) -> Result<LedgerEvent<A>> {
        let outcome = self.inner.write().transfer_ownership(caller, new_owner);
        traced("transfer_ownership", caller, outcome)
    }
}

fn traced<A: Identity, T: core::fmt::Debug>(op: &str, caller: A, outcome: Result<T>) -> Result<T> {
    match &outcome {
        Ok(applied) => debug!("{} by {:?}: {:?}", op, caller, applied),
        Err(err) => warn!("{} by {:?} rejected: {}", op, caller, err),
    }
    outcome
}
