use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env};

use crate::errors::Error;
use crate::events;
use crate::external;
use crate::math::{
    self, SupplyDeltaInput, DEFAULT_DEVIATION_THRESHOLD, DEFAULT_MAX_RATE_CHANGE_PCT,
    DEFAULT_REBASE_LAG,
};
use crate::storage;
use crate::types::{PolicyConfig, RebaseRecord, RebaseState, RebaseTiming};

contractmeta!(
    key = "Description",
    val = "Supply policy computing damped rebase adjustments from oracle rates"
);

pub const DEFAULT_MIN_REBASE_TIME_INTERVAL_SEC: u64 = 86_400;
pub const DEFAULT_REBASE_WINDOW_OFFSET_SEC: u64 = 72_000;
pub const DEFAULT_REBASE_WINDOW_LENGTH_SEC: u64 = 900;

#[contract]
pub struct SupplyPolicy;

#[contractimpl]
impl SupplyPolicy {
    /// Binds the policy to its ledger. Oracles and the orchestrator are wired
    /// afterwards; until then `rebase` fails with `ConfigurationError`.
    pub fn initialize(
        env: Env,
        owner: Address,
        ledger: Address,
        base_index_value: u128,
    ) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        if base_index_value == 0 {
            return Err(Error::ConfigurationError);
        }

        storage::write_config(
            &env,
            &PolicyConfig {
                owner,
                ledger,
                base_index_value,
                deviation_threshold: DEFAULT_DEVIATION_THRESHOLD,
                rebase_lag: DEFAULT_REBASE_LAG,
                max_positive_rate_change_pct: DEFAULT_MAX_RATE_CHANGE_PCT,
                max_negative_rate_change_pct: DEFAULT_MAX_RATE_CHANGE_PCT,
                market_oracle: None,
                index_oracle: None,
                orchestrator: None,
            },
        );
        storage::write_timing(
            &env,
            &RebaseTiming {
                min_rebase_time_interval_sec: DEFAULT_MIN_REBASE_TIME_INTERVAL_SEC,
                rebase_window_offset_sec: DEFAULT_REBASE_WINDOW_OFFSET_SEC,
                rebase_window_length_sec: DEFAULT_REBASE_WINDOW_LENGTH_SEC,
            },
        );
        storage::write_state(
            &env,
            &RebaseState {
                epoch: 0,
                last_rebase_timestamp_sec: 0,
            },
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Owner configuration
    // ------------------------------------------------------------------

    pub fn set_market_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), Error> {
        let mut config = storage::require_owner(&env, &caller)?;
        config.market_oracle = Some(oracle.clone());
        storage::write_config(&env, &config);
        events::emit_market_oracle_set(&env, oracle);
        Ok(())
    }

    pub fn set_index_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), Error> {
        let mut config = storage::require_owner(&env, &caller)?;
        config.index_oracle = Some(oracle.clone());
        storage::write_config(&env, &config);
        events::emit_index_oracle_set(&env, oracle);
        Ok(())
    }

    pub fn set_orchestrator(env: Env, caller: Address, orchestrator: Address) -> Result<(), Error> {
        let mut config = storage::require_owner(&env, &caller)?;
        config.orchestrator = Some(orchestrator.clone());
        storage::write_config(&env, &config);
        events::emit_orchestrator_set(&env, orchestrator);
        Ok(())
    }

    pub fn set_deviation_threshold(
        env: Env,
        caller: Address,
        deviation_threshold: u128,
    ) -> Result<(), Error> {
        let mut config = storage::require_owner(&env, &caller)?;
        config.deviation_threshold = deviation_threshold;
        storage::write_config(&env, &config);
        Ok(())
    }

    pub fn set_rebase_lag(env: Env, caller: Address, rebase_lag: u32) -> Result<(), Error> {
        let mut config = storage::require_owner(&env, &caller)?;
        if rebase_lag == 0 {
            return Err(Error::ConfigurationError);
        }
        config.rebase_lag = rebase_lag;
        storage::write_config(&env, &config);
        Ok(())
    }

    /// Caps on a single rebase, as whole percents of the current supply.
    pub fn set_rate_change_maximums(
        env: Env,
        caller: Address,
        max_positive_rate_change_pct: u32,
        max_negative_rate_change_pct: u32,
    ) -> Result<(), Error> {
        let mut config = storage::require_owner(&env, &caller)?;
        config.max_positive_rate_change_pct = max_positive_rate_change_pct;
        config.max_negative_rate_change_pct = max_negative_rate_change_pct;
        storage::write_config(&env, &config);
        Ok(())
    }

    pub fn set_rebase_timing_parameters(
        env: Env,
        caller: Address,
        min_rebase_time_interval_sec: u64,
        rebase_window_offset_sec: u64,
        rebase_window_length_sec: u64,
    ) -> Result<(), Error> {
        storage::require_owner(&env, &caller)?;
        let timing = RebaseTiming {
            min_rebase_time_interval_sec,
            rebase_window_offset_sec,
            rebase_window_length_sec,
        };
        timing.validate()?;
        storage::write_timing(&env, &timing);
        events::emit_timing_set(&env, &timing);
        Ok(())
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        let mut config = storage::require_owner(&env, &caller)?;
        config.owner = new_owner;
        storage::write_config(&env, &config);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Rebase
    // ------------------------------------------------------------------

    pub fn in_rebase_window(env: Env) -> Result<bool, Error> {
        let timing = storage::read_timing(&env)?;
        Ok(timing.in_window(env.ledger().timestamp()))
    }

    /// Runs one rebase cycle. Only the configured orchestrator may call it.
    ///
    /// The epoch advances and the ledger is adjusted even when the computed
    /// delta is zero. Any failure leaves epoch, timestamp and supply as
    /// they were.
    pub fn rebase(env: Env, caller: Address) -> Result<RebaseRecord, Error> {
        let config = storage::read_config(&env)?;
        let orchestrator = config
            .orchestrator
            .clone()
            .ok_or(Error::ConfigurationError)?;
        caller.require_auth();
        if caller != orchestrator {
            return Err(Error::AccessDenied);
        }
        let market_oracle = config
            .market_oracle
            .clone()
            .ok_or(Error::ConfigurationError)?;
        let index_oracle = config
            .index_oracle
            .clone()
            .ok_or(Error::ConfigurationError)?;

        let timing = storage::read_timing(&env)?;
        let mut state = storage::read_state(&env)?;
        let now = env.ledger().timestamp();

        if !timing.in_window(now) {
            return Err(Error::OutsideRebaseWindow);
        }
        if now.saturating_sub(state.last_rebase_timestamp_sec)
            < timing.min_rebase_time_interval_sec
        {
            return Err(Error::MinIntervalNotElapsed);
        }

        let exchange_rate = external::market_rate(&env, &market_oracle)?;
        let index_value = external::index_value(&env, &index_oracle)?;
        let target_rate = math::target_rate(index_value, config.base_index_value)?;
        if target_rate == 0 {
            return Err(Error::InvalidIndexData);
        }

        let supply = external::total_supply(&env, &config.ledger)?;
        let supply_delta = math::compute_supply_delta(&SupplyDeltaInput {
            supply,
            rate: exchange_rate,
            target_rate,
            deviation_threshold: config.deviation_threshold,
            rebase_lag: config.rebase_lag,
            max_positive_rate_change_pct: config.max_positive_rate_change_pct,
            max_negative_rate_change_pct: config.max_negative_rate_change_pct,
        })?;

        state.epoch = state.epoch.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        state.last_rebase_timestamp_sec = timing.window_open(now);
        storage::write_state(&env, &state);

        let new_supply = external::apply_rebase(&env, &config.ledger, state.epoch, supply_delta)?;
        log!(
            &env,
            "policy rebase",
            state.epoch,
            exchange_rate,
            target_rate,
            supply_delta,
            new_supply
        );

        let record = RebaseRecord {
            epoch: state.epoch,
            exchange_rate,
            index_value,
            requested_supply_adjustment: supply_delta,
            timestamp_sec: now,
        };
        events::emit_log_rebase(&env, &record);
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn config(env: Env) -> Result<PolicyConfig, Error> {
        storage::read_config(&env)
    }

    pub fn timing(env: Env) -> Result<RebaseTiming, Error> {
        storage::read_timing(&env)
    }

    pub fn epoch(env: Env) -> Result<u64, Error> {
        Ok(storage::read_state(&env)?.epoch)
    }

    pub fn last_rebase_timestamp_sec(env: Env) -> Result<u64, Error> {
        Ok(storage::read_state(&env)?.last_rebase_timestamp_sec)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(storage::read_config(&env)?.owner)
    }

    pub fn ledger(env: Env) -> Result<Address, Error> {
        Ok(storage::read_config(&env)?.ledger)
    }

    pub fn market_oracle(env: Env) -> Result<Option<Address>, Error> {
        Ok(storage::read_config(&env)?.market_oracle)
    }

    pub fn index_oracle(env: Env) -> Result<Option<Address>, Error> {
        Ok(storage::read_config(&env)?.index_oracle)
    }

    pub fn orchestrator(env: Env) -> Result<Option<Address>, Error> {
        Ok(storage::read_config(&env)?.orchestrator)
    }
}
