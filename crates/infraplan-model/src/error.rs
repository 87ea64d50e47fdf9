//! Error types for the model crate
//!
//! The engine itself never fails; errors exist only at the parsing boundary
//! where wire data enters the model.

/// Errors raised while parsing wire data into model types
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A date string did not match the dd.mm.yyyy wire format
    #[error("invalid wire date '{value}': expected dd.mm.yyyy")]
    InvalidDate {
        /// The offending input
        value: String,
    },

    /// A finance slot name is not part of the eleven-slot vocabulary
    #[error("unknown finance field '{0}'")]
    UnknownFinanceField(String),

    /// A snapshot carries no timeline dates, so no row can be built
    #[error("project snapshot has no timeline dates")]
    EmptyTimeline,
}
