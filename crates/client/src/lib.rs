//! Client-side mirror of the personnel record service.
//!
//! [`PersonStore`] keeps an ordered copy of the server's records and the
//! loading/error flags a presentation layer renders. Every action issues one
//! call through a [`PersonApi`] and touches local state only after the server
//! confirms.

pub mod api;
pub mod errors;
pub mod store;

pub use api::{HttpPersonApi, PersonApi};
pub use errors::ClientError;
pub use store::{MirrorState, PersonStore};
