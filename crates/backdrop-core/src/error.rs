use thiserror::Error;

/// Everything that can go wrong while configuring or driving a backdrop.
///
/// None of these are fatal to the hosting page: configuration errors are
/// reported once at mount time, and surface errors only make a frame a no-op.
#[derive(Debug, Error)]
pub enum BackdropError {
    #[error("invalid option `{option}`: {reason}")]
    Config {
        option: &'static str,
        reason: String,
    },

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("unknown blend mode `{0}`")]
    UnknownBlendMode(String),

    #[error("unknown generator kind `{0}`")]
    UnknownGenerator(String),

    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("malformed options: {0}")]
    Options(#[from] serde_json::Error),
}

impl BackdropError {
    pub(crate) fn config(option: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            option,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = BackdropError> = std::result::Result<T, E>;
