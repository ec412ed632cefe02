#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod config;
pub mod logic;
pub mod memory;
pub mod model;
#[cfg(feature = "std")]
pub mod shared;
pub mod units;

pub use self::m42coin::{M42Coin, M42CoinRef};
pub use model::{Amount, Error, Identity, LedgerEvent, Result, TokenMetadata};

#[ink::contract]
mod m42coin {
    use crate::config::TokenConfig;
    use crate::logic::{self, LedgerState};
    use crate::model::{Amount, Error, LedgerEvent, Result, TokenMetadata};
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    #[ink(event)]
    pub struct Transferred {
        #[ink(topic)]
        pub(crate) from_acc: AccountId,
        #[ink(topic)]
        pub(crate) to_acc: AccountId,
        pub(crate) amount_val: Amount,
    }

    #[ink(event)]
    pub struct Approved {
        #[ink(topic)]
        pub(crate) owner_acc: AccountId,
        #[ink(topic)]
        pub(crate) spender_acc: AccountId,
        pub(crate) amount_val: Amount,
    }

    #[ink(event)]
    pub struct Minted {
        #[ink(topic)]
        pub(crate) to_acc: AccountId,
        pub(crate) amount_val: Amount,
    }

    #[ink(event)]
    pub struct Burned {
        #[ink(topic)]
        pub(crate) from_acc: AccountId,
        pub(crate) amount_val: Amount,
    }

    #[ink(event)]
    pub struct OwnershipTransferred {
        #[ink(topic)]
        pub(crate) previous_acc: AccountId,
        #[ink(topic)]
        pub(crate) new_acc: AccountId,
    }

    #[ink(storage)]
    pub struct M42Coin {
        // governance
        owner_acc: AccountId,

        // descriptive, fixed at creation
        metadata: TokenMetadata,

        // supply
        max_supply: Amount,
        total_supply: Amount,

        // accounts
        balances: Mapping<AccountId, Amount>,
        allowances: Mapping<(AccountId, AccountId), Amount>,
    }

    impl M42Coin {
        // -------- constructors --------

        #[ink(constructor)]
        pub fn new(
            name: String,
            symbol: String,
            decimals: u8,
            max_supply: Amount,
            initial_supply: Amount,
        ) -> core::result::Result<Self, Error> {
            let config = TokenConfig::new(name, symbol, decimals, max_supply)
                .with_initial_supply(initial_supply);
            Self::with_config(config)
        }

        /// Mat42Coin preset: 1 000 M42 to the deployer, capped at 10 000 000.
        #[ink(constructor, default)]
        pub fn new_default() -> core::result::Result<Self, Error> {
            Self::with_config(TokenConfig::default())
        }

        fn with_config(config: TokenConfig) -> core::result::Result<Self, Error> {
            let owner_acc = Self::env().caller();
            let mut contract = Self {
                owner_acc,
                metadata: config.metadata,
                max_supply: config.max_supply,
                total_supply: Amount::ZERO,
                balances: Mapping::default(),
                allowances: Mapping::default(),
            };
            if !config.initial_supply.is_zero() {
                let event = logic::mint(&mut contract, owner_acc, owner_acc, config.initial_supply)?;
                contract.emit(event);
            }
            Ok(contract)
        }

        // -------- read API --------

        #[ink(message)]
        pub fn name(&self) -> String {
            self.metadata.name.clone()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            self.metadata.symbol.clone()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            self.metadata.decimals
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner_acc
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Amount {
            self.total_supply
        }

        #[ink(message)]
        pub fn max_supply(&self) -> Amount {
            self.max_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner_acc: AccountId) -> Amount {
            self.read_balance(&owner_acc)
        }

        #[ink(message)]
        pub fn allowance(&self, owner_acc: AccountId, spender_acc: AccountId) -> Amount {
            self.read_allowance(&owner_acc, &spender_acc)
        }

        // -------- write API --------

        #[ink(message)]
        pub fn transfer(&mut self, to_acc: AccountId, amount_val: Amount) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::transfer(self, caller_acc, to_acc, amount_val)?;
            self.emit(event);
            Ok(())
        }

        /// Sets the allowance of `spender_acc`, replacing any previous value.
        #[ink(message)]
        pub fn approve(&mut self, spender_acc: AccountId, amount_val: Amount) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::approve(self, caller_acc, spender_acc, amount_val);
            self.emit(event);
            Ok(())
        }

        #[ink(message)]
        pub fn increase_allowance(&mut self, spender_acc: AccountId, add_val: Amount) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::increase_allowance(self, caller_acc, spender_acc, add_val)?;
            self.emit(event);
            Ok(())
        }

        #[ink(message)]
        pub fn decrease_allowance(&mut self, spender_acc: AccountId, sub_val: Amount) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::decrease_allowance(self, caller_acc, spender_acc, sub_val)?;
            self.emit(event);
            Ok(())
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from_acc: AccountId,
            to_acc: AccountId,
            amount_val: Amount,
        ) -> Result<()> {
            let caller_acc = self.env().caller();
            let [moved, remaining] = logic::transfer_from(self, caller_acc, from_acc, to_acc, amount_val)?;
            self.emit(moved);
            self.emit(remaining);
            Ok(())
        }

        /// Owner-only; bounded by the supply cap.
        #[ink(message)]
        pub fn mint(&mut self, to_acc: AccountId, amount_val: Amount) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::mint(self, caller_acc, to_acc, amount_val)?;
            self.emit(event);
            Ok(())
        }

        #[ink(message)]
        pub fn burn(&mut self, amount_val: Amount) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::burn(self, caller_acc, amount_val)?;
            self.emit(event);
            Ok(())
        }

        #[ink(message)]
        pub fn transfer_ownership(&mut self, new_acc: AccountId) -> Result<()> {
            let caller_acc = self.env().caller();
            let event = logic::transfer_ownership(self, caller_acc, new_acc)?;
            self.emit(event);
            Ok(())
        }

        // ---- internals ----

        fn emit(&self, event: LedgerEvent<AccountId>) {
            match event {
                LedgerEvent::Transferred { from, to, amount } => self.env().emit_event(Transferred {
                    from_acc: from,
                    to_acc: to,
                    amount_val: amount,
                }),
                LedgerEvent::Approved { owner, spender, amount } => self.env().emit_event(Approved {
                    owner_acc: owner,
                    spender_acc: spender,
                    amount_val: amount,
                }),
                LedgerEvent::Minted { to, amount } => {
                    self.env().emit_event(Minted { to_acc: to, amount_val: amount })
                }
                LedgerEvent::Burned { from, amount } => {
                    self.env().emit_event(Burned { from_acc: from, amount_val: amount })
                }
                LedgerEvent::OwnershipTransferred { previous_owner, new_owner } => {
                    self.env().emit_event(OwnershipTransferred {
                        previous_acc: previous_owner,
                        new_acc: new_owner,
                    })
                }
            }
        }
    }

    impl LedgerState<AccountId> for M42Coin {
        fn read_balance(&self, account: &AccountId) -> Amount {
            self.balances.get(account).unwrap_or_default()
        }

        fn write_balance(&mut self, account: &AccountId, amount: Amount) {
            if amount.is_zero() {
                self.balances.remove(account);
            } else {
                self.balances.insert(account, &amount);
            }
        }

        fn read_allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
            self.allowances.get(&(*owner, *spender)).unwrap_or_default()
        }

        fn write_allowance(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) {
            if amount.is_zero() {
                self.allowances.remove(&(*owner, *spender));
            } else {
                self.allowances.insert(&(*owner, *spender), &amount);
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

        fn read_owner(&self) -> AccountId {
            self.owner_acc
        }

        fn write_owner(&mut self, owner: AccountId) {
            self.owner_acc = owner;
        }
    }


    #[cfg(all(test, feature = "e2e-tests"))]
    mod e2e_tests {
        use super::*;
        use ink_e2e::ContractsBackend;

        type E2EResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

        #[ink_e2e::test]
        async fn e2e_demo_session<Client: E2EBackend>(mut client: Client) -> E2EResult<()> {
            let mut constructor = M42CoinRef::new_default();
            let contract = client
                .instantiate("m42coin", &ink_e2e::alice(), &mut constructor)
                .submit()
                .await
                .expect("instantiate failed");
            let mut call_builder = contract.call_builder::<M42Coin>();

            let alice_acc = ink_e2e::account_id(ink_e2e::AccountKeyring::Alice);
            let bob_acc = ink_e2e::account_id(ink_e2e::AccountKeyring::Bob);

            // transfers, the last one overdrawn
            let transfer = call_builder.transfer(bob_acc, Amount::tokens(100));
            client
                .call(&ink_e2e::alice(), &transfer)
                .submit()
                .await
                .expect("transfer failed");
            let transfer_back = call_builder.transfer(alice_acc, Amount::tokens(50));
            client
                .call(&ink_e2e::bob(), &transfer_back)
                .submit()
                .await
                .expect("transfer back failed");
            let overdraft = call_builder.transfer(bob_acc, Amount::tokens(100_000));
            let overdraft_res = client.call(&ink_e2e::alice(), &overdraft).submit().await;
            assert!(overdraft_res.is_err(), "overdrawn transfer should fail");

            // delegated spend
            let approve = call_builder.approve(alice_acc, Amount::tokens(51));
            client
                .call(&ink_e2e::bob(), &approve)
                .submit()
                .await
                .expect("approve failed");
            let spend = call_builder.transfer_from(bob_acc, alice_acc, Amount::tokens(50));
            client
                .call(&ink_e2e::alice(), &spend)
                .submit()
                .await
                .expect("transfer_from failed");
            let overspend = call_builder.transfer_from(bob_acc, alice_acc, Amount::tokens(5_000));
            let overspend_res = client.call(&ink_e2e::alice(), &overspend).submit().await;
            assert!(overspend_res.is_err(), "transfer_from beyond allowance should fail");

            let allowance = call_builder.allowance(bob_acc, alice_acc);
            let remaining = client
                .call(&ink_e2e::alice(), &allowance)
                .dry_run()
                .await?
                .return_value();
            assert_eq!(remaining, Amount::tokens(1));

            // owner mint, then a rejected one
            let mint = call_builder.mint(bob_acc, Amount::tokens(500));
            client
                .call(&ink_e2e::alice(), &mint)
                .submit()
                .await
                .expect("mint failed");
            let rogue_mint = call_builder.mint(bob_acc, Amount::tokens(100));
            let rogue_res = client.call(&ink_e2e::bob(), &rogue_mint).submit().await;
            assert!(rogue_res.is_err(), "mint by non-owner should fail");

            // burn
            let burn = call_builder.burn(Amount::tokens(200));
            client
                .call(&ink_e2e::bob(), &burn)
                .submit()
                .await
                .expect("burn failed");

            let balance = call_builder.balance_of(bob_acc);
            let bob_bal = client
                .call(&ink_e2e::bob(), &balance)
                .dry_run()
                .await?
                .return_value();
            assert_eq!(bob_bal, Amount::tokens(100 - 50 - 50 + 500 - 200));

            let supply = call_builder.total_supply();
            let supply_val = client
                .call(&ink_e2e::bob(), &supply)
                .dry_run()
                .await?
                .return_value();
            assert_eq!(supply_val, Amount::tokens(1_000 + 500 - 200));

            // ownership round trip
            let hand_over = call_builder.transfer_ownership(bob_acc);
            client
                .call(&ink_e2e::alice(), &hand_over)
                .submit()
                .await
                .expect("transfer_ownership failed");
            let owner = call_builder.owner();
            let owner_acc = client
                .call(&ink_e2e::alice(), &owner)
                .dry_run()
                .await?
                .return_value();
            assert_eq!(owner_acc, bob_acc);

            let hand_back = call_builder.transfer_ownership(alice_acc);
            client
                .call(&ink_e2e::bob(), &hand_back)
                .submit()
                .await
                .expect("transfer_ownership back failed");

            Ok(())
        }
    }
}
