//! Tower middleware layers applied around the router.

pub mod recover;
pub mod tracing_layer;
