use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env, Vec};

use crate::errors::Error;
use crate::events;
use crate::median::compute_median;
use crate::storage::{
    self, read_config, read_providers, read_reports, require_owner, require_provider,
    validate_parameters, write_config, write_providers, write_reports,
};
use crate::types::{OracleConfig, Report, REPORTS_PER_PROVIDER};

#[contract]
pub struct MedianOracle;

contractmeta!(
    key = "Description",
    val = "Median oracle over time-windowed provider reports"
);

/// Most recent report whose age lies in `[report_delay_sec, report_expiration_time_sec]`.
/// `reports` is ordered oldest first.
pub fn select_report(reports: &Vec<Report>, now: u64, config: &OracleConfig) -> Option<Report> {
    let mut i = reports.len();
    while i > 0 {
        i -= 1;
        let report = reports.get_unchecked(i);
        let Some(age) = now.checked_sub(report.timestamp) else {
            continue;
        };
        if age >= config.report_delay_sec && age <= config.report_expiration_time_sec {
            return Some(report);
        }
    }
    None
}

#[contractimpl]
impl MedianOracle {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn initialize(
        env: Env,
        owner: Address,
        report_expiration_time_sec: u64,
        report_delay_sec: u64,
        minimum_providers: u32,
    ) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        validate_parameters(report_expiration_time_sec, minimum_providers)?;

        write_config(
            &env,
            &OracleConfig {
                owner,
                report_expiration_time_sec,
                report_delay_sec,
                minimum_providers,
            },
        );
        write_providers(&env, &Vec::new(&env));
        Ok(())
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        let mut config = require_owner(&env, &caller)?;
        config.owner = new_owner;
        write_config(&env, &config);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------------

    pub fn add_provider(env: Env, caller: Address, provider: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        let mut providers = read_providers(&env);
        if providers.first_index_of(&provider).is_some() {
            return Err(Error::ProviderAlreadyExists);
        }
        providers.push_back(provider.clone());
        write_providers(&env, &providers);

        events::emit_provider_added(&env, provider);
        Ok(())
    }

    /// Removes `provider` by swapping the last roster entry into its slot.
    /// Unknown providers are ignored.
    pub fn remove_provider(env: Env, caller: Address, provider: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        let mut providers = read_providers(&env);
        let Some(index) = providers.first_index_of(&provider) else {
            return Ok(());
        };

        let last = providers.len() - 1;
        if index != last {
            let moved = providers.get_unchecked(last);
            providers.set(index, moved);
        }
        providers.pop_back();
        write_providers(&env, &providers);
        storage::remove_reports(&env, &provider);

        events::emit_provider_removed(&env, provider);
        Ok(())
    }

    pub fn providers_size(env: Env) -> u32 {
        read_providers(&env).len()
    }

    pub fn provider_at(env: Env, index: u32) -> Result<Address, Error> {
        read_providers(&env)
            .get(index)
            .ok_or(Error::IndexOutOfBounds)
    }

    pub fn providers(env: Env) -> Vec<Address> {
        read_providers(&env)
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    pub fn push_report(env: Env, provider: Address, payload: u128) -> Result<(), Error> {
        require_provider(&env, &provider)?;
        let now = env.ledger().timestamp();

        let mut reports = read_reports(&env, &provider);
        reports.push_back(Report {
            provider: provider.clone(),
            timestamp: now,
            payload,
        });
        while reports.len() > REPORTS_PER_PROVIDER {
            reports.pop_front();
        }
        write_reports(&env, &provider, &reports);

        events::emit_report_pushed(&env, provider, payload, now);
        Ok(())
    }

    /// Clears the caller's own history. Other providers are untouched.
    pub fn purge_reports(env: Env, provider: Address) -> Result<(), Error> {
        require_provider(&env, &provider)?;
        storage::remove_reports(&env, &provider);
        Ok(())
    }

    pub fn reports_of(env: Env, provider: Address) -> Vec<Report> {
        read_reports(&env, &provider)
    }

    /// Returns `(median, true)` over every provider holding a report inside
    /// the delay/expiration window, or `(0, false)` when fewer than
    /// `minimum_providers` qualify.
    pub fn get_data(env: Env) -> Result<(u128, bool), Error> {
        let config = read_config(&env)?;
        let now = env.ledger().timestamp();

        let mut values: Vec<u128> = Vec::new(&env);
        for provider in read_providers(&env).iter() {
            let reports = read_reports(&env, &provider);
            match select_report(&reports, now, &config) {
                Some(report) => values.push_back(report.payload),
                None => events::emit_report_out_of_range(&env, provider),
            }
        }

        if values.len() < config.minimum_providers {
            log!(&env, "insufficient valid reports", values.len());
            return Ok((0, false));
        }
        match compute_median(&values) {
            Some(median) => Ok((median, true)),
            None => Ok((0, false)),
        }
    }

    // ------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------

    pub fn set_report_expiration_time_sec(
        env: Env,
        caller: Address,
        report_expiration_time_sec: u64,
    ) -> Result<(), Error> {
        let mut config = require_owner(&env, &caller)?;
        validate_parameters(report_expiration_time_sec, config.minimum_providers)?;
        config.report_expiration_time_sec = report_expiration_time_sec;
        write_config(&env, &config);
        Ok(())
    }

    pub fn set_report_delay_sec(env: Env, caller: Address, report_delay_sec: u64) -> Result<(), Error> {
        let mut config = require_owner(&env, &caller)?;
        config.report_delay_sec = report_delay_sec;
        write_config(&env, &config);
        Ok(())
    }

    pub fn set_minimum_providers(env: Env, caller: Address, minimum_providers: u32) -> Result<(), Error> {
        let mut config = require_owner(&env, &caller)?;
        validate_parameters(config.report_expiration_time_sec, minimum_providers)?;
        config.minimum_providers = minimum_providers;
        write_config(&env, &config);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(read_config(&env)?.owner)
    }

    pub fn report_expiration_time_sec(env: Env) -> Result<u64, Error> {
        Ok(read_config(&env)?.report_expiration_time_sec)
    }

    pub fn report_delay_sec(env: Env) -> Result<u64, Error> {
        Ok(read_config(&env)?.report_delay_sec)
    }

    pub fn minimum_providers(env: Env) -> Result<u32, Error> {
        Ok(read_config(&env)?.minimum_providers)
    }
}
