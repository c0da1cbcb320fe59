//! MX existence checks.
//!
//! [`MxLookup`] is what the mail check calls when `CheckForMX` is on. The
//! DNS-backed [`DnsMxLookup`] and [`check_mx`] need the optional `with-mx`
//! feature; without it callers supply their own lookup (a closure works).

use std::time::Duration;

mod error;
#[cfg(feature = "with-mx")]
mod resolver;
#[cfg(feature = "with-mx")]
mod types;

pub use error::MxError;
#[cfg(feature = "with-mx")]
pub use resolver::{DnsMxLookup, check_mx};
#[cfg(feature = "with-mx")]
pub use types::{MxAnswer, MxHost};

/// Timeout applied by [`DnsMxLookup`] when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub trait MxLookup {
    /// `Ok(false)` when the domain publishes no usable MX record. Errors are
    /// treated like a missing record by the caller.
    fn has_mx(&self, domain: &str) -> Result<bool, MxError>;
}

impl<F> MxLookup for F
where
    F: Fn(&str) -> Result<bool, MxError>,
{
    fn has_mx(&self, domain: &str) -> Result<bool, MxError> {
        self(domain)
    }
}

#[cfg(all(test, feature = "with-mx"))]
mod tests;
