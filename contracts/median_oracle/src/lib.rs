#![no_std]

pub mod contract;
mod errors;
mod events;
pub mod median;
mod storage;
mod types;


pub use contract::{MedianOracle, MedianOracleClient};
pub use errors::Error;
pub use events::{ReportOutOfRangeEvent, ReportPushedEvent};
pub use types::{OracleConfig, Report, MAX_REPORT_EXPIRATION_TIME, REPORTS_PER_PROVIDER};
