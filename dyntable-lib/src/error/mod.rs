//! Error types

mod config;
mod data;
mod filter;

pub use config::*;
pub use data::*;
pub use filter::*;

/// Any error the table engine can surface to a caller.
///
/// Filter failures never reach this type during a render; they are
/// isolated to the offending cell. They only appear here when a pipeline
/// is applied directly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The table configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The item collection is invalid.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A filter failed while transforming a value.
    #[error(transparent)]
    Filter(#[from] FilterError),
}
