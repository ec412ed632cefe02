use core::fmt;

use ink::prelude::string::String;
use ink::primitives::AccountId;
use primitive_types::U256;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(scale::Encode, scale::Decode, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    /// Source account holds less than the requested amount.
    InsufficientBalance,
    /// Spender was granted less than the requested amount.
    InsufficientAllowance,
    /// Caller is not the administrative owner.
    Unauthorized,
    /// Mint would push total supply above the cap.
    SupplyCapExceeded,
    Overflow,
    Underflow,
    /// Ownership cannot be handed to the null account.
    InvalidOwner,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InsufficientBalance => "insufficient balance",
            Error::InsufficientAllowance => "insufficient allowance",
            Error::Unauthorized => "caller is not the owner",
            Error::SupplyCapExceeded => "supply cap exceeded",
            Error::Overflow => "arithmetic overflow",
            Error::Underflow => "arithmetic underflow",
            Error::InvalidOwner => "new owner is the null account",
        };
        f.write_str(msg)
    }
}

/// Number of fractional decimal digits of one whole token.
pub const DECIMALS: u8 = 18;

/// Token quantity in base units.
///
/// Backed by a 256-bit unsigned integer. Arithmetic is only exposed in
/// checked form, so callers decide what an overflow means.
#[derive(
    scale::Encode, scale::Decode, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub struct Amount(U256);

impl Amount {
    pub const ZERO: Amount = Amount(U256([0; 4]));
    pub const MAX: Amount = Amount(U256::MAX);

    /// `whole` tokens expressed in base units at [`DECIMALS`].
    pub fn tokens(whole: u64) -> Self {
        Amount(U256::from(whole) * U256::exp10(DECIMALS as usize))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Amount(value)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount(U256::from(value))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(U256::from(value))
    }
}

impl From<Amount> for U256 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// U256 has no layout of its own, so the amount is described as a single leaf cell.
#[cfg(feature = "std")]
impl ink::storage::traits::StorageLayout for Amount {
    fn layout(key: &ink::primitives::Key) -> ink::metadata::layout::Layout {
        ink::metadata::layout::Layout::Leaf(ink::metadata::layout::LeafLayout::from_key::<Self>(
            ink::metadata::layout::LayoutKey::from(key),
        ))
    }
}

/// Account identity the ledger can hold balances for.
pub trait Identity: Copy + Eq + fmt::Debug {
    /// True for the all-zero identity, which no key controls.
    fn is_null(&self) -> bool;
}

impl Identity for AccountId {
    fn is_null(&self) -> bool {
        *self == AccountId::from([0u8; 32])
    }
}

/// 20-byte addresses as used by EVM-style hosts.
impl Identity for [u8; 20] {
    fn is_null(&self) -> bool {
        self.iter().all(|byte| *byte == 0)
    }
}

#[derive(scale::Encode, scale::Decode, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Record of an applied mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEvent<A> {
    Transferred { from: A, to: A, amount: Amount },
    Approved { owner: A, spender: A, amount: Amount },
    Minted { to: A, amount: Amount },
    Burned { from: A, amount: Amount },
    OwnershipTransferred { previous_owner: A, new_owner: A },
}
