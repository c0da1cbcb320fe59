#![forbid(unsafe_code)]
//! mailgrammar_lib: field validation lifecycle + configurable mail address grammar
//!
//! A [`Validator`] resolves a field from an input source, applies the
//! undefined/empty/required-value rules and hands non-trivial values to a
//! [`FieldCheck`]. [`MailAddressCheck`] is the mail address check: it derives a
//! [`GrammarConfig`] from the validator options, runs the recursive-descent
//! recognizer in [`grammar`] and then applies the domain acceptance policy.

#[macro_use]
mod macros;

pub mod domain;
pub mod grammar;
pub mod input;
pub mod mail;
pub mod mx;
pub mod options;
pub mod validator;

pub use domain::{DomainClassifier, DomainInfo, TableClassifier};
pub use grammar::{
    AcceptancePolicy, DomainNameForm, DomainPart, GrammarConfig, GrammarError, LocalPartForm,
    ParseResult, Standard, parse_address,
};
pub use input::{
    InputResolver, InputSource, RequestInputs, UnknownSourceName, UnsupportedSource,
};
pub use mail::{MailAddressCheck, MailAddressValidator};
pub use mx::{MxError, MxLookup};
#[cfg(feature = "with-mx")]
pub use mx::{DnsMxLookup, MxAnswer, MxHost, check_mx};
pub use options::{ConfigError, OptionKind, OptionStore, OptionValue};
pub use validator::{
    FieldCheck, FieldOptions, Rejection, RejectionKind, ValidationError, ValidationOutcome,
    Validator,
};
