use soroban_sdk::{contracttype, Address};

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PolicyConfig {
    pub owner: Address,
    pub ledger: Address,
    /// Index reading at which the target rate equals one unit (`SCALE`).
    pub base_index_value: u128,
    /// Relative band around the target rate, fixed point with `DECIMALS`.
    pub deviation_threshold: u128,
    /// Damping divisor for the raw supply delta. Never zero.
    pub rebase_lag: u32,
    pub max_positive_rate_change_pct: u32,
    pub max_negative_rate_change_pct: u32,
    pub market_oracle: Option<Address>,
    pub index_oracle: Option<Address>,
    pub orchestrator: Option<Address>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RebaseTiming {
    pub min_rebase_time_interval_sec: u64,
    pub rebase_window_offset_sec: u64,
    pub rebase_window_length_sec: u64,
}

impl RebaseTiming {
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.min_rebase_time_interval_sec == 0 {
            return Err(crate::Error::ConfigurationError);
        }
        let end = self
            .rebase_window_offset_sec
            .checked_add(self.rebase_window_length_sec)
            .ok_or(crate::Error::InvalidTiming)?;
        if end > self.min_rebase_time_interval_sec {
            return Err(crate::Error::InvalidTiming);
        }
        Ok(())
    }

    /// Windows recur every interval counted from timestamp zero.
    pub fn in_window(&self, now: u64) -> bool {
        if self.min_rebase_time_interval_sec == 0 {
            return false;
        }
        let phase = now % self.min_rebase_time_interval_sec;
        phase >= self.rebase_window_offset_sec
            && phase - self.rebase_window_offset_sec < self.rebase_window_length_sec
    }

    /// Opening instant of the window containing `now`.
    pub fn window_open(&self, now: u64) -> u64 {
        now - now % self.min_rebase_time_interval_sec + self.rebase_window_offset_sec
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RebaseState {
    pub epoch: u64,
    pub last_rebase_timestamp_sec: u64,
}

/// Published as `LogRebase` and returned from `rebase`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RebaseRecord {
    pub epoch: u64,
    pub exchange_rate: u128,
    pub index_value: u128,
    pub requested_supply_adjustment: i128,
    pub timestamp_sec: u64,
}

#[contracttype]
pub enum DataKey {
    Config,
    Timing,
    State,
}
