use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–2) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // --- Authorization (3) ---
    AccessDenied = 3,

    // --- Timing (4–6) ---
    InvalidTiming = 4,
    OutsideRebaseWindow = 5,
    MinIntervalNotElapsed = 6,

    // --- Oracle data (7–8) ---
    InvalidMarketData = 7,
    InvalidIndexData = 8,

    // --- Configuration (9–10) ---
    ConfigurationError = 9,
    InvalidSupply = 10,

    // --- Collaborators (11) ---
    LedgerFailure = 11,

    // --- Arithmetic (12) ---
    ArithmeticOverflow = 12,
}
