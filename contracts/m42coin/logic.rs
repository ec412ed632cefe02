//! Accounting rules of the ledger.
//!
//! Every operation takes the state and the calling identity explicitly and
//! performs all of its checks and checked arithmetic before the first write,
//! so a returned error always leaves the state untouched.

use crate::model::{Amount, Error, Identity, LedgerEvent, Result};

/// Storage backing a ledger. Absent entries read as zero.
pub trait LedgerState<A: Identity> {
    fn read_balance(&self, account: &A) -> Amount;
    fn write_balance(&mut self, account: &A, amount: Amount);

    fn read_allowance(&self, owner: &A, spender: &A) -> Amount;
    fn write_allowance(&mut self, owner: &A, spender: &A, amount: Amount);

    fn read_supply(&self) -> Amount;
    fn write_supply(&mut self, amount: Amount);

    fn supply_cap(&self) -> Amount;

    fn read_owner(&self) -> A;
    fn write_owner(&mut self, owner: A);
}

// -------- guards --------

pub fn ensure_owner<A: Identity, S: LedgerState<A>>(state: &S, caller: A) -> Result<()> {
    if state.read_owner() != caller {
        return Err(Error::Unauthorized)
    }
    Ok(())
}

// -------- operations --------

pub fn transfer<A: Identity, S: LedgerState<A>>(
    state: &mut S,
    caller: A,
    to: A,
    amount: Amount,
) -> Result<LedgerEvent<A>> {
    move_balance(state, caller, to, amount)?;
    Ok(LedgerEvent::Transferred { from: caller, to, amount })
}

/// Overwrites the allowance `caller` grants to `spender`.
pub fn approve<A: Identity, S: LedgerState<A>>(
    state: &mut S,
    caller: A,
    spender: A,
    amount: Amount,
) -> LedgerEvent<A> {
    state.write_allowance(&caller, &spender, amount);
    LedgerEvent::Approved { owner: caller, spender, amount }
}

pub fn increase_allowance<A: Identity, S: LedgerState<A>>(
    state: &mut S,
    caller: A,
    spender: A,
    delta: Amount,
) -> Result<LedgerEvent<A>> {
    let new_val = state
        .read_allowance(&caller, &spender)
        .checked_add(delta)
        .ok_or(Error::Overflow)?;
    Ok(approve(state, caller, spender, new_val))
}

/// Lowers an allowance; asking for more than remains is an error, not a clamp.
pub fn decrease_allowance<A: Identity, S: LedgerState<A>>(
    state: &mut S,
    caller: A,
    spender: A,
    delta: Amount,
) -> Result<LedgerEvent<A>> {
    let new_val = state
        .read_allowance(&caller, &spender)
        .checked_sub(delta)
        .ok_or(Error::InsufficientAllowance)?;
    Ok(approve(state, caller, spender, new_val))
}

/// Spends `amount` of the allowance `from` granted to `caller`.
///
/// The allowance is checked before the balance. A caller moving its own
/// funds through this path still needs an allowance from itself.
/// Returns the transfer followed by the reduced allowance.
pub fn transfer_from<A: Identity, S: LedgerState<A>>(
    state: &mut S,
    caller: A,
    from: A,
    to: A,
    amount: Amount,
) -> Result<[LedgerEvent<A>; 2]> {
    let current_allow = state.read_allowance(&from, &caller);
    if current_allow < amount {
        return Err(Error::InsufficientAllowance)
    }
    let new_allow = current_allow.checked_sub(amount).ok_or(Error::Underflow)?;

    // writes nothing unless it succeeds, so the allowance is only consumed after it
    move_balance(state, from, to, amount)?;
    state.write_allowance(&from, &caller, new_allow);

    Ok([
        LedgerEvent::Transferred { from, to, amount },
        LedgerEvent::Approved { owner: from, spender: caller, amount: new_allow },
    ])
}

pub fn mint<A: Identity, S: LedgerState<A>>(
    state: &mut S,
    caller: A,
    to: A,
    amount: Amount,
) -> Result<LedgerEvent<A>> {
    ensure_owner(state, caller)?;

    let new_total = state.read_supply().checked_add(amount).ok_or(Error::Overflow)?;
    if new_total > state.supply_cap() {
        return Err(Error::SupplyCapExceeded)
    }
    let new_to = state.read_balance(&to).checked_add(amount).ok_or(Error::Overflow)?;

    state.write_balance(&to, new_to);
    state.write_supply(new_total);
    Ok(LedgerEvent::Minted { to, amount })
}

/// Destroys `amount` from the caller's own balance.
pub fn burn<A: Identity, S: LedgerState<A>>(
    state: &mut S,
    caller: A,
    amount: Amount,
) -> Result<LedgerEvent<A>> {
    let from_bal = state.read_balance(&caller);
    if from_bal < amount {
        return Err(Error::InsufficientBalance)
    }
    let new_from = from_bal.checked_sub(amount).ok_or(Error::Underflow)?;
    let new_total = state.read_supply().checked_sub(amount).ok_or(Error::Underflow)?;

    state.write_balance(&caller, new_from);
    state.write_supply(new_total);
    Ok(LedgerEvent::Burned { from: caller, amount })
}

pub fn transfer_ownership<A: Identity, S: LedgerState<A>>(
    state: &mut S,
    caller: A,
    new_owner: A,
) -> Result<LedgerEvent<A>> {
    ensure_owner(state, caller)?;
    if new_owner.is_null() {
        return Err(Error::InvalidOwner)
    }
    state.write_owner(new_owner);
    Ok(LedgerEvent::OwnershipTransferred { previous_owner: caller, new_owner })
}

// -------- internals --------

fn move_balance<A: Identity, S: LedgerState<A>>(
    state: &mut S,
    from: A,
    to: A,
    amount: Amount,
) -> Result<()> {
    let from_bal = state.read_balance(&from);
    if from_bal < amount {
        return Err(Error::InsufficientBalance)
    }
    if from == to {
        return Ok(())
    }
    let new_from = from_bal.checked_sub(amount).ok_or(Error::Underflow)?;
    let new_to = state.read_balance(&to).checked_add(amount).ok_or(Error::Overflow)?;

    state.write_balance(&from, new_from);
    state.write_balance(&to, new_to);
    Ok(())
}
