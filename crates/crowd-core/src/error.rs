use thiserror::Error;

/// Unified error type for the whole Crowd workspace.
#[derive(Error, Debug)]
pub enum CrowdError {
    // ── Remote service errors ──────────────────────────────────
    #[error("registration conflict: name '{0}' rejected")]
    RegistrationConflict(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("remote rejected request: HTTP {status}: {body}")]
    RemoteRejection { status: u16, body: String },

    // ── Content errors ─────────────────────────────────────────
    #[error("persona not found: {0}")]
    PersonaNotFound(String),

    #[error("suggestion pool too small for persona {persona}: {size} entries, need 2")]
    InsufficientPool { persona: String, size: usize },

    #[error("cannot choose from an empty {0}")]
    EmptyPool(&'static str),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("config validation failed: {field}: {reason}")]
    ConfigValidation { field: String, reason: String },

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CrowdError {
    /// Whether the failure is likely to clear up on its own (network blips,
    /// overloaded or rate-limiting servers).
    pub fn is_transient(&self) -> bool {
        match self {
            CrowdError::Transport(_) => true,
            CrowdError::RemoteRejection { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Short category label used in log fields.
    pub fn category(&self) -> &'static str {
        match self {
            CrowdError::RegistrationConflict(_)
            | CrowdError::Transport(_)
            | CrowdError::RemoteRejection { .. } => "remote",
            CrowdError::PersonaNotFound(_)
            | CrowdError::InsufficientPool { .. }
            | CrowdError::EmptyPool(_) => "content",
            CrowdError::Config(_) | CrowdError::ConfigValidation { .. } => "config",
            _ => "system",
        }
    }
}

pub type Result<T> = std::result::Result<T, CrowdError>;
