use thiserror::Error;

/// Failures raised by a metadata resolver.
///
/// Everything except `NotFound` is handed back to the caller untouched by the
/// codec, so a cancelled or timed-out lookup aborts the whole render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no metadata registered for denomination {0:?}")]
    NotFound(String),

    #[error("metadata lookup exceeded its deadline")]
    DeadlineExceeded,

    #[error("metadata lookup was cancelled")]
    Cancelled,

    #[error("metadata endpoint unreachable: {0}")]
    Transport(String),

    #[error("metadata endpoint answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid denomination metadata: {0}")]
    InvalidMetadata(String),
}

/// Errors surfaced by the value renderers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextualError {
    #[error("no metadata found for denomination {denom:?}")]
    MetadataNotFound { denom: String },

    #[error("duplicate denomination {0:?}")]
    DuplicateDenomination(String),

    #[error("malformed coin text {0:?}")]
    MalformedCoinText(String),

    #[error("malformed number {0:?}")]
    MalformedNumber(String),

    #[error("{text:?} has more than {exponent} fractional digits")]
    PrecisionExceeded { text: String, exponent: u32 },

    #[error("invalid denomination {0:?}")]
    InvalidDenomination(String),

    #[error("expected exactly one screen, got {0}")]
    ScreenCount(usize),

    #[error("no value renderer for field type {0:?}")]
    UnsupportedField(String),

    #[error("value does not match the renderer: expected {0}")]
    UnexpectedValue(&'static str),

    #[error(transparent)]
    Resolver(ResolveError),
}

impl From<ResolveError> for TextualError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound(denom) => TextualError::MetadataNotFound { denom },
            other => TextualError::Resolver(other),
        }
    }
}

pub type TextualResult<T> = Result<T, TextualError>;
