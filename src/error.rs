use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("can't register a pin with no name")]
    EmptyName,
    #[error("can't register pin {name:?} with name being only a number")]
    NumericName { name: String },
    #[error("can't register pin {name:?} with invalid pin number {number}")]
    InvalidNumber { name: String, number: i32 },
    #[error(
        "can't register pin {name:?} twice with the same number {number}; already registered as {existing:?}"
    )]
    DuplicateNumber {
        name: String,
        number: i32,
        existing: String,
    },
    #[error("can't register pin {name:?} twice; already registered as {existing:?}")]
    DuplicateName { name: String, existing: String },
    #[error("can't register pin {name:?}, it is already an alias for {real:?}; use register_alias() instead")]
    PinIsAlias { name: String, real: String },
    #[error("can't register pin {name:?}; an alias already exists: {existing:?}")]
    NameTakenByAlias { name: String, existing: String },
    #[error(
        "can't register pin {name:?} twice with different number; already registered as {existing:?}"
    )]
    TierNumberMismatch { name: String, existing: String },
    #[error("can't register an alias with no name")]
    EmptyAlias,
    #[error("can't register alias {alias:?} with no destination")]
    EmptyDest { alias: String },
    #[error("can't register alias {alias:?} with name being only a number")]
    NumericAlias { alias: String },
    #[error("can't register alias {alias:?} twice; it is already an alias: {existing:?}")]
    AliasRedefined { alias: String, existing: String },
    #[error("Configuration error: {0}")]
    Config(String),
}
