//! Configurable RFC 5321 / RFC 5322 address grammar.
//!
//! [`GrammarConfig`] selects the productions, [`parse_address`] runs them.
//! Nothing here looks at DNS or TLD tables; that happens after a structural
//! match, in [`crate::mail`].

pub mod config;
mod error;
mod literal;
mod parser;
mod types;

pub use config::{AcceptancePolicy, DomainNameForm, GrammarConfig, LocalPartForm, Standard};
pub use error::GrammarError;
pub use parser::parse_address;
pub use types::{DomainPart, ParseResult};
