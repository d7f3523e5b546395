//! # Oneclick Client
//!
//! `reqwest`-based implementation of the [`BackendApi`] seam defined in
//! `oneclick-core`. One request per operation: no retry, no caching. The
//! upload goes out as `multipart/form-data`, everything else is JSON.

mod client;

pub use client::{BackendClientConfig, HttpBackendClient};

pub use oneclick_core::api::BackendApi;
