use std::borrow::Cow;

use serde::ser::SerializeMap;

/// Result of one execution, in the shape of a GraphQL response
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct ExecutionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub errors: Vec<GraphqlError>,
}

impl ExecutionResult {
    pub fn from_data(data: serde_json::Value) -> Self {
        ExecutionResult {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: impl IntoIterator<Item = GraphqlError>) -> Self {
        ExecutionResult {
            data: None,
            errors: errors.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: GraphqlError) -> Self {
        self.errors.push(error);
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether at least one error comes from a failure on our side rather than from the
    /// request sent by the client.
    pub fn has_unhandled_errors(&self) -> bool {
        self.errors.iter().any(GraphqlError::is_unhandled)
    }
}

#[derive(Debug, Clone)]
pub struct GraphqlError {
    pub message: Cow<'static, str>,
    pub code: ErrorCode,
    pub path: Vec<serde_json::Value>,
}

impl GraphqlError {
    pub fn new(message: impl Into<Cow<'static, str>>, code: ErrorCode) -> Self {
        GraphqlError {
            message: message.into(),
            code,
            path: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl IntoIterator<Item = impl Into<serde_json::Value>>) -> Self {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_unhandled(&self) -> bool {
        self.code.is_unhandled()
    }

    // ------------- //
    // Common errors //
    // ------------- //

    pub fn internal_server_error() -> Self {
        GraphqlError::new("Internal server error", ErrorCode::InternalServerError)
    }

    pub fn parsing_error(message: impl Into<Cow<'static, str>>) -> Self {
        GraphqlError::new(message, ErrorCode::OperationParsingError)
    }

    pub fn validation_error(message: impl Into<Cow<'static, str>>) -> Self {
        GraphqlError::new(message, ErrorCode::OperationValidationError)
    }
}

impl std::fmt::Display for GraphqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.message.fmt(f)
    }
}

impl serde::Serialize for GraphqlError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(serde::Serialize)]
        struct Extensions {
            code: ErrorCode,
        }

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("message", &self.message)?;
        if !self.path.is_empty() {
            map.serialize_entry("path", &self.path)?;
        }
        map.serialize_entry("extensions", &Extensions { code: self.code })?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    // Operation preparation phases
    OperationParsingError,
    OperationValidationError,
    VariableError,
    // Auth
    Unauthenticated,
    Unauthorized,
    // Rate limit
    RateLimited,
    // Server side
    InternalServerError,
    SubgraphError,
    GatewayTimeout,
}

impl ErrorCode {
    /// Errors we could not handle, as opposed to errors caused by the shape of the request
    pub fn is_unhandled(self) -> bool {
        match self {
            ErrorCode::BadRequest
            | ErrorCode::OperationParsingError
            | ErrorCode::OperationValidationError
            | ErrorCode::VariableError
            | ErrorCode::Unauthenticated
            | ErrorCode::Unauthorized
            | ErrorCode::RateLimited => false,
            ErrorCode::InternalServerError | ErrorCode::SubgraphError | ErrorCode::GatewayTimeout => true,
        }
    }
}
