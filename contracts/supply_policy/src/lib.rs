#![no_std]

//! Monetary policy that turns a market rate and a reference index into a
//! damped, bounded supply adjustment, applied at most once per rebase
//! window.

pub mod contract;
mod errors;
mod events;
mod external;
pub mod math;
mod storage;
mod types;


pub use contract::{SupplyPolicy, SupplyPolicyClient};
pub use errors::Error;
pub use math::{DECIMALS, MAX_RATE, MAX_SUPPLY, SCALE};
pub use types::{PolicyConfig, RebaseRecord, RebaseState, RebaseTiming};
