//! Types and helpers shared by the record service and its client.

pub mod types;
pub mod utils;
