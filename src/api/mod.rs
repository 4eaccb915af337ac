//! HTTP surface for the function host.
//!
//! Two routes cover the whole surface:
//!
//! - `GET /health` - liveness plus the registered function names.
//! - `POST /invoke/{function}` - dispatches an invocation event to the named
//!   function and flattens its response envelope into the HTTP response.
//!
//! The host itself adds nothing to function semantics; calling a function
//! over HTTP or in-process produces the same envelope.

/// Route definitions and request dispatch.
pub mod routes;
/// Listener binding and graceful shutdown.
pub mod server;

pub use routes::create_router;
pub use server::serve;
