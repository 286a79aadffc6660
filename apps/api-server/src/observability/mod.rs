//! Observability - request IDs woven into tracing spans.

mod request_id;

pub use request_id::RequestIdMiddleware;
