use super::error::{ErrorKind, TranslateError};

/// The single terminal result of one translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Success(String),
    Cancelled,
    TimedOut,
    Failed { kind: ErrorKind, message: String },
}

impl TranslationOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the error kind for `Failed` outcomes.
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<TranslateError> for TranslationOutcome {
    fn from(err: TranslateError) -> Self {
        Self::Failed {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
