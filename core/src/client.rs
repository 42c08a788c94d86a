//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`, keeping the parsing logic deterministic and free of I/O.
//!
//! The update and delete endpoints report failure through the response
//! payload's `success` field, so their parsers read the body first and treat
//! the status code as secondary; only an unparseable body falls back to
//! status-based classification.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CollectionEnvelope, ErrorEnvelope, MutationEnvelope, NewProduct, Product, ProductPatch,
    ResourceEnvelope,
};

/// Stateless client for the product catalog API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. `ProductStore` executes the round-trip between
/// `build_*` and `parse_*` through its injected transport.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_products(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/products", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_product(&self, candidate: &NewProduct) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(candidate).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/products", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update_product(
        &self,
        id: &str,
        patch: &ProductPatch,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(patch).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/api/products/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_product(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/api/products/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Parse the full-collection response. The returned order is the
    /// server's order; callers install it verbatim.
    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        if response.status != 200 {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        let envelope: CollectionEnvelope = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(envelope.data)
    }

    /// Parse a creation response: `{data}` on 2xx, `{message}` otherwise.
    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        if !is_success(response.status) {
            if let Ok(err) = serde_json::from_str::<ErrorEnvelope>(&response.body) {
                return Err(ApiError::Rejected { message: err.message });
            }
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        let envelope: ResourceEnvelope = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(envelope.data)
    }

    /// Parse an update response. Returns the updated record and the server's
    /// message on success; `success: false` maps to `Rejected` regardless of
    /// the HTTP status.
    pub fn parse_update_product(
        &self,
        response: HttpResponse,
    ) -> Result<(Product, String), ApiError> {
        let envelope = parse_mutation(response)?;
        match envelope.data {
            Some(product) => Ok((product, envelope.message)),
            None => Err(ApiError::DeserializationError(
                "update response missing data field".to_string(),
            )),
        }
    }

    /// Parse a deletion response. Returns the server's message on success.
    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<String, ApiError> {
        let envelope = parse_mutation(response)?;
        Ok(envelope.message)
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decode a `MutationEnvelope` and turn `success: false` into `Rejected`.
/// An unparseable body on a non-2xx status classifies by status instead.
fn parse_mutation(response: HttpResponse) -> Result<MutationEnvelope, ApiError> {
    let envelope: MutationEnvelope = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(e) if is_success(response.status) => {
            return Err(ApiError::DeserializationError(e.to_string()));
        }
        Err(_) => {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
    };
    if !envelope.success {
        return Err(ApiError::Rejected {
            message: envelope.message,
        });
    }
    Ok(envelope)
}
