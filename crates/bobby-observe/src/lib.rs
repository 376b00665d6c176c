//! Observability for Bobby: the process-wide tracing subscriber, optional
//! OpenTelemetry export, and the session span handed to the chat client.

pub mod tracing_setup;
