#![no_std]

//! Single entry point for scheduled rebases. Drives the supply policy and
//! then runs an owner-managed batch of follow-up calls. The whole cycle is
//! one invocation, so a failing follow-up reverts the policy's rebase too.

use soroban_sdk::{
    contract, contractimpl, contractmeta, log, vec, Address, Env, IntoVal, Symbol, Val, Vec,
};

mod errors;
mod events;
mod types;


pub use errors::Error;
pub use events::{TransactionAddedEvent, TransactionRemovedEvent, TransactionToggledEvent};
pub use types::{CallOrigin, TransactionEntry};

use types::DataKey;

contractmeta!(
    key = "Description",
    val = "Rebase orchestrator running the policy and its downstream batch"
);

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contract]
pub struct RebaseOrchestrator;

#[contractimpl]
impl RebaseOrchestrator {
    pub fn initialize(env: Env, owner: Address, policy: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Policy, &policy);
        write_transactions(&env, &Vec::new(&env));
        Ok(())
    }

    /// Appends an enabled entry and returns its index.
    pub fn add_transaction(
        env: Env,
        caller: Address,
        destination: Address,
        function: Symbol,
        args: Vec<Val>,
    ) -> Result<u32, Error> {
        require_owner(&env, &caller)?;
        let mut transactions = read_transactions(&env);
        transactions.push_back(TransactionEntry {
            destination: destination.clone(),
            function: function.clone(),
            args,
            enabled: true,
        });
        write_transactions(&env, &transactions);

        let index = transactions.len() - 1;
        events::emit_transaction_added(&env, index, destination, function);
        Ok(index)
    }

    pub fn set_transaction_enabled(
        env: Env,
        caller: Address,
        index: u32,
        enabled: bool,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        let mut transactions = read_transactions(&env);
        let mut entry = transactions.get(index).ok_or(Error::IndexOutOfBounds)?;
        entry.enabled = enabled;
        transactions.set(index, entry);
        write_transactions(&env, &transactions);
        events::emit_transaction_toggled(&env, index, enabled);
        Ok(())
    }

    /// Moves the last entry into `index` and shrinks the list, so the
    /// order of the remaining entries can change.
    pub fn remove_transaction(env: Env, caller: Address, index: u32) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        let mut transactions = read_transactions(&env);
        let removed = transactions.get(index).ok_or(Error::IndexOutOfBounds)?;
        let last = transactions.len() - 1;
        if index != last {
            if let Some(tail) = transactions.get(last) {
                transactions.set(index, tail);
            }
        }
        transactions.pop_back();
        write_transactions(&env, &transactions);
        events::emit_transaction_removed(&env, index, removed.destination);
        Ok(())
    }

    pub fn transactions_size(env: Env) -> u32 {
        read_transactions(&env).len()
    }

    pub fn transaction_at(env: Env, index: u32) -> Result<TransactionEntry, Error> {
        read_transactions(&env)
            .get(index)
            .ok_or(Error::IndexOutOfBounds)
    }

    /// Runs the policy rebase, then every enabled entry in index order.
    ///
    /// `origin` must be `External`. Any failure is returned as an error,
    /// which reverts everything done during this call. A batch entry that
    /// calls back into this contract is refused by the host and surfaces
    /// as `DownstreamFailure`.
    pub fn rebase(env: Env, caller: Address, origin: CallOrigin) -> Result<u32, Error> {
        if origin != CallOrigin::External {
            return Err(Error::ContractCallerRejected);
        }
        let policy = read_policy(&env)?;
        caller.require_auth();

        let self_address = env.current_contract_address();
        let policy_args = vec![&env, self_address.into_val(&env)];
        match env.try_invoke_contract::<Val, Error>(
            &policy,
            &Symbol::new(&env, "rebase"),
            policy_args,
        ) {
            Ok(Ok(_)) => {}
            _ => {
                log!(&env, "policy rebase failed");
                return Err(Error::PolicyRebaseFailed);
            }
        }

        let mut executed = 0u32;
        for (index, entry) in read_transactions(&env).iter().enumerate() {
            if !entry.enabled {
                continue;
            }
            match env.try_invoke_contract::<Val, Error>(
                &entry.destination,
                &entry.function,
                entry.args.clone(),
            ) {
                Ok(Ok(_)) => executed += 1,
                _ => {
                    log!(&env, "downstream transaction failed", index as u32);
                    return Err(Error::DownstreamFailure);
                }
            }
        }

        events::emit_rebase_executed(&env, caller, executed);
        Ok(executed)
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        env.storage().instance().set(&DataKey::Owner, &new_owner);
        bump(&env);
        Ok(())
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        read_owner(&env)
    }

    pub fn policy(env: Env) -> Result<Address, Error> {
        read_policy(&env)
    }
}

fn bump(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn read_owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

fn read_policy(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Policy)
        .ok_or(Error::NotInitialized)
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    let owner = read_owner(env)?;
    caller.require_auth();
    if *caller != owner {
        return Err(Error::AccessDenied);
    }
    Ok(())
}

fn read_transactions(env: &Env) -> Vec<TransactionEntry> {
    env.storage()
        .instance()
        .get(&DataKey::Transactions)
        .unwrap_or_else(|| Vec::new(env))
}

fn write_transactions(env: &Env, transactions: &Vec<TransactionEntry>) {
    env.storage()
        .instance()
        .set(&DataKey::Transactions, transactions);
    bump(env);
}
