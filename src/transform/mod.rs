//! Bidirectional rule transformation.
//!
//! Both directions are pure, stateless, single-pass functions: safe to call
//! concurrently on independent inputs, failing fast on the first unknown
//! tag with no partial output.

pub mod request;
pub mod response;

pub use request::to_wire;
pub use response::from_wire;
