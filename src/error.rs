use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("simple password must not be empty")]
    EmptySimplePassword,

    #[error("unique key must not be empty")]
    EmptyUniqueKey,

    #[error("length must be at least 1")]
    ZeroLength,

    #[error("at least one character class must be enabled")]
    NoCharacterClasses,

    #[error("custom symbols must not contain letters or digits, found {0:?}")]
    AlphanumericSymbol(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] Violation),
}

pub type Result<T> = std::result::Result<T, Error>;
