pub mod charset;
pub mod error;
pub mod generator;
pub mod strength;

pub use charset::{CharacterClass, CharacterSetOptions, DEFAULT_SYMBOLS};
pub use error::{Error, Result, Violation};
pub use generator::{DerivationInput, DerivedPassword, derive};
