//! # backoffice-rs-api
//!
//! Client side of the REST conventions shared by the dashboard's list,
//! detail, create, update, and delete endpoints.
//!
//! ## Modules
//!
//! - [`envelope`] - Response envelopes and error detection
//! - [`transport`] - The [`Transport`] seam and the [`ApiRequest`] it carries
//! - [`client`] - A typed [`ResourceClient`] for one resource

pub mod client;
pub mod envelope;
pub mod transport;

pub use client::{ListPage, ListQuery, ResourceClient};
pub use envelope::{ApiStatus, DeleteEnvelope, DetailEnvelope, ListEnvelope, MutationEnvelope};
pub use transport::{ApiRequest, Transport};
