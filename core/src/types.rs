//! Domain DTOs and wire envelopes for the product catalog API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently,
//! so the client core never couples to Axum internals. Integration tests
//! catch any schema drift between the two crates.
//!
//! Product ids are opaque strings assigned by the server; the core never
//! constructs one and compares them only for equality.

use serde::{Deserialize, Serialize};

/// A single catalog product as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: f64,
}

/// Candidate payload for creating a new product. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub image: String,
    pub price: f64,
}

impl NewProduct {
    /// Submission invariant: `name` and `image` non-empty, `price` a
    /// positive finite number.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
            && !self.image.is_empty()
            && self.price.is_finite()
            && self.price > 0.0
    }
}

/// Partial update payload. Only the fields present in the JSON are applied;
/// omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Uniform return contract for every mutating store operation, letting
/// callers display feedback without inspecting errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Response body of `GET /api/products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionEnvelope {
    pub data: Vec<Product>,
}

/// Success response body of `POST /api/products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEnvelope {
    pub data: Product,
}

/// Error response body of `POST /api/products` on a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
}

/// Response body of `PUT` and `DELETE` on `/api/products/{id}`. Failure is
/// reported through `success`, not through the HTTP status alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Product>,
}
