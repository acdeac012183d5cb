/// Errors from the ambient surfaces of the engine: loading difficulty tables
/// and reading move scripts. Gameplay calls never fail; they are no-ops.
#[derive(thiserror::Error, Debug)]
pub enum ScavengerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("difficulty table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tier `{tier}` is invalid: {reason}")]
    InvalidTier { tier: String, reason: String },

    #[error("unknown difficulty `{0}`")]
    UnknownTier(String),

    #[error("move script line {line}: unknown command `{command}`")]
    Script { line: usize, command: char },
}

pub type ScavengerResult<T> = Result<T, ScavengerError>;
