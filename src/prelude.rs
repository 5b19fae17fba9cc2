//! The module re-exports a number of useful components that you may wish
//! to consume.

pub use tracing::Instrument;

pub use tracing::{
    debug,
    debug_span,
    error,
    error_span,
    event,
    info,
    info_span,
    span,
    trace,
    trace_span,
    warn,
    warn_span,
};

pub use crate::handler::{Handler, HandlerOptions};
pub use crate::options::Options;
pub use crate::record::{Attr, Record};

pub mod filter {
    pub use tracing_subscriber::filter::LevelFilter;
    #[cfg(feature = "env-filter")]
    pub use tracing_subscriber::filter::EnvFilter;
}
