#![no_std]

//! Supply ledger driven by a monetary policy.
//!
//! Only the boundary the policy consumes is implemented: the total supply,
//! the signed `rebase` entry point and the policy wiring. Per-account
//! balances, transfers and allowances live elsewhere.

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, log, symbol_short,
    Address, Env, String,
};

contractmeta!(
    key = "Description",
    val = "Elastic supply ledger rebased by a monetary policy"
);

/// Highest market rate the policy accepts, with 7 decimals.
pub const MAX_RATE: u128 = 1_000_000 * 10_000_000;

/// Supply ceiling. Matches `supply_policy::MAX_SUPPLY` so that
/// `MAX_SUPPLY * MAX_RATE` fits in an `i128`.
pub const MAX_SUPPLY: i128 = i128::MAX / MAX_RATE as i128;

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    AccessDenied = 3,
    MonetaryPolicyNotSet = 4,
    InvalidSupply = 5,
    ArithmeticOverflow = 6,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TokenMetadata {
    pub decimal: u32,
    pub name: String,
    pub symbol: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LedgerRebaseEvent {
    pub epoch: u64,
    pub total_supply: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PolicyUpdatedEvent {
    pub monetary_policy: Address,
}

#[contracttype]
pub enum DataKey {
    Owner,
    Metadata,
    TotalSupply,
    MonetaryPolicy,
}

#[contract]
pub struct ElasticLedger;

#[contractimpl]
impl ElasticLedger {
    pub fn initialize(
        env: Env,
        owner: Address,
        decimal: u32,
        name: String,
        symbol: String,
        initial_supply: i128,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        if !(0..=MAX_SUPPLY).contains(&initial_supply) {
            return Err(Error::InvalidSupply);
        }

        let metadata = TokenMetadata {
            decimal,
            name,
            symbol,
        };
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Metadata, &metadata);
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &initial_supply);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        Ok(())
    }

    pub fn set_monetary_policy(env: Env, caller: Address, policy: Address) -> Result<(), Error> {
        let owner = Self::read_owner(&env)?;
        caller.require_auth();
        if caller != owner {
            return Err(Error::AccessDenied);
        }
        env.storage()
            .instance()
            .set(&DataKey::MonetaryPolicy, &policy);
        env.events().publish(
            ("LEDGER", symbol_short!("POLICY")),
            PolicyUpdatedEvent {
                monetary_policy: policy,
            },
        );
        Ok(())
    }

    /// Applies `supply_delta` and returns the new total supply. Growth stops
    /// at `MAX_SUPPLY`; contraction stops at zero.
    pub fn rebase(env: Env, epoch: u64, supply_delta: i128) -> Result<i128, Error> {
        let policy: Address = env
            .storage()
            .instance()
            .get(&DataKey::MonetaryPolicy)
            .ok_or(Error::MonetaryPolicyNotSet)?;
        policy.require_auth();

        let supply = Self::total_supply(env.clone())?;
        let new_supply = if supply_delta == 0 {
            supply
        } else {
            let raw = supply
                .checked_add(supply_delta)
                .ok_or(Error::ArithmeticOverflow)?;
            raw.clamp(0, MAX_SUPPLY)
        };

        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &new_supply);
        log!(&env, "ledger rebase", epoch, supply_delta, new_supply);
        env.events().publish(
            ("LEDGER", symbol_short!("REBASE")),
            LedgerRebaseEvent {
                epoch,
                total_supply: new_supply,
            },
        );
        Ok(new_supply)
    }

    pub fn total_supply(env: Env) -> Result<i128, Error> {
        env.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .ok_or(Error::NotInitialized)
    }

    pub fn monetary_policy(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::MonetaryPolicy)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Self::read_owner(&env)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        Ok(Self::read_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Ok(Self::read_metadata(&env)?.symbol)
    }

    pub fn decimals(env: Env) -> Result<u32, Error> {
        Ok(Self::read_metadata(&env)?.decimal)
    }

    fn read_owner(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }

    fn read_metadata(env: &Env) -> Result<TokenMetadata, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .ok_or(Error::NotInitialized)
    }
}
