#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Tracing of GraphQL operation executions.
//!
//! The [`TelemetryProvider`] wraps one execution of the request pipeline in an OpenTelemetry span.
//! Tags are written in three phases: from the incoming request before the pipeline runs, from
//! the resolved operation once validation completes, and from the result once the pipeline
//! returns. Each phase can be customized through [`TelemetryHooks`] or through the callbacks of
//! [`TelemetryOptions`].

/// Configuration section for execution tracing
pub mod config;
/// Potential errors from the execution pipeline
pub mod error;
/// Enrichment hooks invoked at each phase
pub mod hooks;
/// The observer attached to a request to catch the end of validation
pub mod listener;
/// Options consumed by the provider
pub mod options;
/// The orchestrator
pub mod provider;
/// Execution requests and the validation context handed to listeners
pub mod request;
/// Execution results
pub mod response;
/// Sanitization of executable documents before they are recorded
pub mod sanitize;
/// Span abstraction and the OpenTelemetry backend
pub mod span;
/// [Tower](https://docs.rs/tower/latest/tower/) integration
pub mod tower;


pub use config::TelemetryConfig;
pub use error::ExecutionError;
pub use hooks::{DefaultHooks, TelemetryHooks};
pub use listener::OperationListener;
pub use options::TelemetryOptions;
pub use provider::TelemetryProvider;
pub use request::{ExecutionListener, ExecutionRequest, Operation, OperationType, ValidationContext, ValidationResult};
pub use response::{ErrorCode, ExecutionResult, GraphqlError};
pub use span::{otel::OtelSpanSource, SpanSource, TelemetrySpan};

/// Instrumentation scope under which spans are reported
pub const SCOPE: &str = "grafbase-execution-telemetry";
/// Version of the instrumentation scope
pub const SCOPE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tracing target for logging
pub const GRAFBASE_TARGET: &str = "grafbase";
