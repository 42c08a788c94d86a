//! Client-side state container for a remote product catalog.
//!
//! # Overview
//! `ProductStore` holds the current product sequence in memory and keeps it
//! consistent with a REST collection through four operations: fetch, create,
//! update, delete. Mutations return a uniform `OperationResult` so callers
//! can display feedback without inspecting errors.
//!
//! # Design
//! - `CatalogClient` is stateless — each operation is split into `build_*`
//!   (produces an `HttpRequest`) and `parse_*` (consumes an `HttpResponse`),
//!   so request construction and response interpretation are deterministic
//!   and free of I/O.
//! - The round-trip itself runs behind the injected `Transport` trait; the
//!   composition root supplies a real HTTP client, tests supply doubles.
//! - The store's sequence is an immutable `Arc<[Product]>` snapshot that is
//!   rebuilt and reinstalled on every mutation, so observers detect change
//!   by pointer inequality and never see intermediate states.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod store;
pub mod types;

pub use client::CatalogClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use store::ProductStore;
pub use types::{NewProduct, OperationResult, Product, ProductPatch};
