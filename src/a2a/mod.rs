//! A2A protocol: JSON-RPC envelope and task wire types, plus the pure
//! request/response translation.
//!
//! Everything here is request-scoped and side-effect free. The HTTP layer
//! (`crate::api::a2a`) drives these functions; the agent runtime is the only
//! collaborator with I/O.

mod envelope;
mod types;

pub use envelope::{
    build_task, echo_id, flatten_parts, id_or_new, message_list, normalize, protocol_valid,
};
pub use types::*;
