// Thin wrappers over `tracing` so call sites stay free of cfg noise when the
// `with-tracing` feature is off.

macro_rules! debug_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "with-tracing")]
        tracing::debug!($($arg)+);
    };
}

macro_rules! warn_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "with-tracing")]
        tracing::warn!($($arg)+);
    };
}
