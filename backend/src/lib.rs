//! Check-in streak backend.
//!
//! Fans check in to creators once per UTC calendar day. The crate records
//! those check-ins, keeps per-creator daily counters, and derives each fan's
//! current streak. It is laid out hexagonally: [`domain`] holds the rules and
//! ports, [`inbound`] exposes them over HTTP, and [`outbound`] implements the
//! storage ports with Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
