/// Failure raised by the execution pipeline instead of a result.
///
/// GraphQL errors that belong in the response are not represented here, they are part of the
/// [ExecutionResult](crate::ExecutionResult).
#[derive(Debug, thiserror::Error, strum::IntoStaticStr)]
pub enum ExecutionError {
    /// The request was aborted cooperatively
    #[error("the request was canceled")]
    Canceled,
    /// Unexpected condition in the pipeline
    #[error("internal error: {0}")]
    Internal(String),
    /// Fault raised by a downstream component
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl ExecutionError {
    /// Whether the pipeline stopped because the request was canceled
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// Name of the error variant
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ExecutionError {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Other(error)
    }
}
