use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    AccessDenied = 3,
    /// `rebase` was reached through another contract.
    ContractCallerRejected = 4,
    IndexOutOfBounds = 5,
    PolicyRebaseFailed = 6,
    DownstreamFailure = 7,
}
