use thiserror::Error;

/// Failure of an advisory request.
///
/// None of these touch the ledger; callers surface them as read-only messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdvisorError {
    /// No credential was supplied at startup; the advisor is disabled.
    #[error("advisor is not configured: {0}")]
    ConfigurationMissing(String),

    #[error("question must not be empty")]
    EmptyQuestion,

    /// The model provider rejected the credential.
    #[error("model provider rejected the credential: {0}")]
    Unauthorized(String),

    #[error("model provider quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Transport failure, timeout, or an unexpected provider status.
    #[error("model provider unreachable: {0}")]
    Unreachable(String),

    /// The provider answered but the payload held no text.
    #[error("model provider returned an unusable response: {0}")]
    InvalidResponse(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AdvisorError {
    /// Stable machine-readable code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing(_) => "configuration_missing",
            Self::EmptyQuestion => "empty_question",
            Self::Unauthorized(_) => "ai_unauthorized",
            Self::QuotaExceeded(_) => "ai_quota_exceeded",
            Self::Unreachable(_) => "ai_unreachable",
            Self::InvalidResponse(_) => "ai_invalid_response",
            Self::Internal(_) => "internal_error",
        }
    }

    /// True for failures of the remote model service itself.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_) | Self::QuotaExceeded(_) | Self::Unreachable(_) | Self::InvalidResponse(_)
        )
    }
}
