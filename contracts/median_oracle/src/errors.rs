use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–2) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // --- Authorization (3–4) ---
    AccessDenied = 3,
    NotProvider = 4,

    // --- Roster / parameters (5–7) ---
    ProviderAlreadyExists = 5,
    InvalidParameter = 6,
    IndexOutOfBounds = 7,
}
