use std::fmt;

/// Fail-fast errors surfaced by the introspection pipeline
///
/// Per-association probe failures are not represented here: they are
/// recovered locally during relationship detection and never abort a
/// generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested model name does not resolve to a known manifest
    ///
    /// The equivalent of a 404 when the generator is driven remotely.
    ModelNotFound {
        /// The studly-cased model name that failed to resolve
        model: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ModelNotFound { model } => {
                write!(
                    f,
                    "model '{}' not found. Add a manifest for it to the models directory first.",
                    model
                )
            }
        }
    }
}

impl std::error::Error for Error {}
