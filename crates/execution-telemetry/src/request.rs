use std::{fmt, sync::Arc};

use async_graphql_parser::types::{DocumentOperations, ExecutableDocument, OperationDefinition, ServiceDocument};
use tokio_util::sync::CancellationToken;

use crate::response::GraphqlError;

/// One incoming execution of a GraphQL document.
///
/// The request is owned by the pipeline. Telemetry only ever appends a listener to it. Cloning
/// is cheap, the document and variables are shared.
#[derive(Clone)]
pub struct ExecutionRequest {
    /// The document text as sent by the client
    pub document: Arc<str>,
    /// The operation to execute, if the client specified one
    pub operation_name: Option<String>,
    /// Variables sent alongside the document
    pub variables: Arc<serde_json::Map<String, serde_json::Value>>,
    /// Signals the pipeline that the client went away
    pub cancellation: CancellationToken,
    /// Observers notified as the request moves through the pipeline
    pub listeners: Vec<Arc<dyn ExecutionListener>>,
}

impl ExecutionRequest {
    pub fn new(document: impl Into<Arc<str>>) -> Self {
        Self {
            document: document.into(),
            operation_name: None,
            variables: Default::default(),
            cancellation: CancellationToken::new(),
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_variables(mut self, variables: serde_json::Map<String, serde_json::Value>) -> Self {
        self.variables = Arc::new(variables);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn add_listener(&mut self, listener: Arc<dyn ExecutionListener>) {
        self.listeners.push(listener);
    }

    /// Notifies every listener, in registration order, that validation completed.
    pub fn validation_completed(&self, context: &ValidationContext<'_>) {
        for listener in &self.listeners {
            listener.validation_completed(self, context);
        }
    }
}

impl fmt::Debug for ExecutionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionRequest")
            .field("document", &self.document)
            .field("operation_name", &self.operation_name)
            .field("variables", &self.variables)
            .field("canceled", &self.cancellation.is_cancelled())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Observer of the execution phases of a single request.
pub trait ExecutionListener: Send + Sync {
    /// Called once the document was parsed, the operation resolved and validated.
    ///
    /// Not called when parsing or operation resolution fails.
    fn validation_completed(&self, request: &ExecutionRequest, context: &ValidationContext<'_>) {
        let _ = (request, context);
    }
}

/// What the pipeline knows about a request once validation completed
pub struct ValidationContext<'a> {
    pub schema: &'a ServiceDocument,
    pub document: &'a ExecutableDocument,
    pub operation: Operation<'a>,
    pub validation: &'a ValidationResult,
}

/// The operation of a document selected for execution
#[derive(Clone, Copy)]
pub struct Operation<'a> {
    pub name: Option<&'a str>,
    pub definition: &'a OperationDefinition,
}

impl<'a> Operation<'a> {
    /// Selects the operation to execute following the GraphQL rules: the named one if a name
    /// was given, otherwise the only operation of the document.
    pub fn select(document: &'a ExecutableDocument, operation_name: Option<&str>) -> Option<Self> {
        match (&document.operations, operation_name) {
            (DocumentOperations::Single(operation), None) => Some(Operation {
                name: None,
                definition: &operation.node,
            }),
            (DocumentOperations::Single(_), Some(_)) => None,
            (DocumentOperations::Multiple(operations), Some(requested)) => operations
                .iter()
                .find(|(name, _)| name.as_str() == requested)
                .map(|(name, operation)| Operation {
                    name: Some(name.as_str()),
                    definition: &operation.node,
                }),
            (DocumentOperations::Multiple(operations), None) if operations.len() == 1 => {
                operations.iter().next().map(|(name, operation)| Operation {
                    name: Some(name.as_str()),
                    definition: &operation.node,
                })
            }
            (DocumentOperations::Multiple(_), None) => None,
        }
    }

    pub fn ty(&self) -> OperationType {
        self.definition.ty.into()
    }
}

/// The type of an operation; `query`, `mutation` or `subscription`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl From<async_graphql_parser::types::OperationType> for OperationType {
    fn from(value: async_graphql_parser::types::OperationType) -> Self {
        use async_graphql_parser::types::OperationType as ParsedOperationType;

        match value {
            ParsedOperationType::Query => Self::Query,
            ParsedOperationType::Mutation => Self::Mutation,
            ParsedOperationType::Subscription => Self::Subscription,
        }
    }
}

/// Outcome of document validation against the schema
#[derive(Debug, Default, Clone)]
pub struct ValidationResult {
    pub errors: Vec<GraphqlError>,
}
