//! Stateful product store: the in-memory catalog plus the four operations
//! that keep it consistent with the remote collection.
//!
//! # Design
//! The store owns the product sequence as an immutable snapshot
//! (`Arc<[Product]>`). Every mutation builds a complete new sequence and
//! installs it in a single assignment, so a snapshot taken by an observer
//! is never modified underneath it and change detection reduces to
//! `Arc::ptr_eq` on successive snapshots.
//!
//! The HTTP round-trip goes through the injected [`Transport`], which keeps
//! the store testable with scripted doubles and leaves the choice of HTTP
//! client to the composition root.
//!
//! Error handling is uniform across the mutating operations: local
//! validation failures and server-reported rejections surface their message
//! in the returned [`OperationResult`], and transport or malformed-response
//! failures are converted to a generic per-operation failure message.
//! `fetch_products` has no `OperationResult` contract and propagates errors
//! to the caller instead.

use std::sync::Arc;

use crate::client::CatalogClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{NewProduct, OperationResult, Product, ProductPatch};

const INVALID_CANDIDATE: &str = "Please fill in all fields correctly";
const CREATED: &str = "Product created successfully";
const CREATE_FAILED: &str = "An error occurred while creating the product";
const UPDATE_FAILED: &str = "An error occurred while updating the product";
const DELETE_FAILED: &str = "An error occurred while deleting the product";

/// In-memory holder of the current product collection, synchronized with
/// the remote catalog after each mutation.
///
/// Constructed once by the application's composition root and handed to
/// consumers by reference; all state lives here, never in globals.
pub struct ProductStore<T: Transport> {
    client: CatalogClient,
    transport: T,
    products: Arc<[Product]>,
}

impl<T: Transport> ProductStore<T> {
    /// Create a store with an empty product sequence.
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: CatalogClient::new(base_url),
            transport,
            products: Arc::from(Vec::new()),
        }
    }

    /// Current snapshot of the product sequence. Cheap to clone; two
    /// snapshots compare pointer-equal iff no mutation happened between
    /// them.
    pub fn products(&self) -> Arc<[Product]> {
        Arc::clone(&self.products)
    }

    /// Replace the local sequence with the server's full collection.
    ///
    /// Errors propagate to the caller; the local sequence is left untouched
    /// on failure.
    pub fn fetch_products(&mut self) -> Result<(), ApiError> {
        let request = self.client.build_list_products();
        let response = self.transport.execute(request)?;
        let products = self.client.parse_list_products(response)?;
        tracing::debug!(count = products.len(), "catalog refreshed from server");
        self.products = Arc::from(products);
        Ok(())
    }

    /// Validate and submit a creation candidate, appending the
    /// server-returned record on success.
    ///
    /// Invalid candidates fail immediately without a network call.
    pub fn create_product(&mut self, candidate: &NewProduct) -> OperationResult {
        if !candidate.is_valid() {
            return OperationResult::failure(INVALID_CANDIDATE);
        }

        let request = match self.client.build_create_product(candidate) {
            Ok(request) => request,
            Err(_) => return OperationResult::failure(CREATE_FAILED),
        };
        let response = match self.transport.execute(request) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "create request failed in transit");
                return OperationResult::failure(CREATE_FAILED);
            }
        };
        match self.client.parse_create_product(response) {
            Ok(created) => {
                let mut next = self.products.to_vec();
                next.push(created);
                self.products = Arc::from(next);
                OperationResult::success(CREATED)
            }
            Err(ApiError::Rejected { message }) => {
                tracing::warn!(%message, "create rejected by server");
                OperationResult::failure(message)
            }
            Err(_) => OperationResult::failure(CREATE_FAILED),
        }
    }

    /// Delete the product with the given id, removing it from the local
    /// sequence once the server confirms.
    pub fn delete_product(&mut self, id: &str) -> OperationResult {
        let request = self.client.build_delete_product(id);
        let response = match self.transport.execute(request) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "delete request failed in transit");
                return OperationResult::failure(DELETE_FAILED);
            }
        };
        match self.client.parse_delete_product(response) {
            Ok(message) => {
                let next: Vec<Product> = self
                    .products
                    .iter()
                    .filter(|p| p.id != id)
                    .cloned()
                    .collect();
                self.products = Arc::from(next);
                OperationResult::success(message)
            }
            Err(ApiError::Rejected { message }) => {
                tracing::warn!(%message, "delete rejected by server");
                OperationResult::failure(message)
            }
            Err(_) => OperationResult::failure(DELETE_FAILED),
        }
    }

    /// Apply a partial update, replacing the matching local record with the
    /// server-returned one; all other records keep their position.
    pub fn update_product(&mut self, id: &str, patch: &ProductPatch) -> OperationResult {
        let request = match self.client.build_update_product(id, patch) {
            Ok(request) => request,
            Err(_) => return OperationResult::failure(UPDATE_FAILED),
        };
        let response = match self.transport.execute(request) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "update request failed in transit");
                return OperationResult::failure(UPDATE_FAILED);
            }
        };
        match self.client.parse_update_product(response) {
            Ok((updated, message)) => {
                let next: Vec<Product> = self
                    .products
                    .iter()
                    .map(|p| if p.id == id { updated.clone() } else { p.clone() })
                    .collect();
                self.products = Arc::from(next);
                OperationResult::success(message)
            }
            Err(ApiError::Rejected { message }) => {
                tracing::warn!(%message, "update rejected by server");
                OperationResult::failure(message)
            }
            Err(_) => OperationResult::failure(UPDATE_FAILED),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::http::{HttpRequest, HttpResponse, TransportError};

    /// Transport double: replays a queue of scripted responses and records
    /// every request it is asked to execute.
    struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn new() -> Self {
            Self {
                responses: RefCell::new(VecDeque::new()),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn push_ok(&self, status: u16, body: &str) {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
        }

        fn push_err(&self, message: &str) {
            self.responses
                .borrow_mut()
                .push_back(Err(TransportError::new(message)));
        }
    }

    impl Transport for &ScriptedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("scripted transport ran out of responses")
        }
    }

    fn store(transport: &ScriptedTransport) -> ProductStore<&ScriptedTransport> {
        ProductStore::new("http://localhost:3000", transport)
    }

    fn product(id: &str, name: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            image: format!("{name}.png"),
            price,
        }
    }

    fn seed(store: &mut ProductStore<&ScriptedTransport>, transport: &ScriptedTransport, products: &[Product]) {
        let body = serde_json::to_string(&crate::types::CollectionEnvelope {
            data: products.to_vec(),
        })
        .unwrap();
        transport.push_ok(200, &body);
        store.fetch_products().unwrap();
    }

    #[test]
    fn new_store_is_empty() {
        let transport = ScriptedTransport::new();
        let store = store(&transport);
        assert!(store.products().is_empty());
    }

    #[test]
    fn fetch_replaces_sequence_in_server_order() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        transport.push_ok(
            200,
            r#"{"data":[{"id":"2","name":"B","image":"b.png","price":2.0},{"id":"1","name":"A","image":"a.png","price":1.0}]}"#,
        );
        store.fetch_products().unwrap();

        let products = store.products();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "2");
        assert_eq!(products[1].id, "1");
    }

    #[test]
    fn fetch_failure_propagates_and_keeps_sequence() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        seed(&mut store, &transport, &[product("1", "A", 1.0)]);

        transport.push_err("connection refused");
        let err = store.fetch_products().unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(store.products().len(), 1);
    }

    #[test]
    fn create_rejects_invalid_candidates_without_network_call() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);

        let candidates = [
            NewProduct { name: String::new(), image: "x.png".into(), price: 10.0 },
            NewProduct { name: "X".into(), image: String::new(), price: 10.0 },
            NewProduct { name: "X".into(), image: "x.png".into(), price: 0.0 },
            NewProduct { name: "X".into(), image: "x.png".into(), price: -3.0 },
            NewProduct { name: "X".into(), image: "x.png".into(), price: f64::NAN },
            NewProduct { name: "X".into(), image: "x.png".into(), price: f64::INFINITY },
        ];
        for candidate in &candidates {
            let result = store.create_product(candidate);
            assert_eq!(
                result,
                OperationResult::failure("Please fill in all fields correctly")
            );
        }
        assert!(transport.requests.borrow().is_empty(), "no request may be sent");
        assert!(store.products().is_empty());
    }

    #[test]
    fn create_appends_server_returned_record() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        seed(&mut store, &transport, &[product("1", "A", 1.0)]);

        transport.push_ok(
            201,
            r#"{"data":{"id":"srv-2","name":"Lamp","image":"lamp.png","price":24.99}}"#,
        );
        let candidate = NewProduct {
            name: "Lamp".into(),
            image: "lamp.png".into(),
            price: 24.99,
        };
        let result = store.create_product(&candidate);
        assert_eq!(result, OperationResult::success("Product created successfully"));

        let products = store.products();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].id, "srv-2");
    }

    #[test]
    fn create_surfaces_server_error_message() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        transport.push_ok(400, r#"{"message":"Please provide all fields"}"#);

        let candidate = NewProduct {
            name: "X".into(),
            image: "x.png".into(),
            price: 1.0,
        };
        let result = store.create_product(&candidate);
        assert_eq!(result, OperationResult::failure("Please provide all fields"));
        assert!(store.products().is_empty());
    }

    #[test]
    fn create_converts_transport_failure_to_generic_message() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        transport.push_err("connection reset");

        let candidate = NewProduct {
            name: "X".into(),
            image: "x.png".into(),
            price: 1.0,
        };
        let result = store.create_product(&candidate);
        assert_eq!(
            result,
            OperationResult::failure("An error occurred while creating the product")
        );
    }

    #[test]
    fn delete_removes_only_matching_record_preserving_order() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        let initial = [product("1", "A", 1.0), product("2", "B", 2.0), product("3", "C", 3.0)];
        seed(&mut store, &transport, &initial);

        transport.push_ok(200, r#"{"success":true,"message":"Product deleted"}"#);
        let result = store.delete_product("2");
        assert_eq!(result, OperationResult::success("Product deleted"));

        let products = store.products();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0], initial[0]);
        assert_eq!(products[1], initial[2]);
    }

    #[test]
    fn delete_of_unknown_id_is_failure_and_idempotent_on_state() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        seed(&mut store, &transport, &[product("1", "A", 1.0)]);

        transport.push_ok(404, r#"{"success":false,"message":"Product not found"}"#);
        transport.push_ok(404, r#"{"success":false,"message":"Product not found"}"#);

        let first = store.delete_product("ghost");
        let before = store.products();
        let second = store.delete_product("ghost");

        assert_eq!(first, OperationResult::failure("Product not found"));
        assert_eq!(second, first);
        assert!(Arc::ptr_eq(&before, &store.products()), "failed delete must not touch state");
        assert_eq!(store.products().len(), 1);
    }

    #[test]
    fn delete_converts_transport_failure_to_generic_message() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        seed(&mut store, &transport, &[product("1", "A", 1.0)]);

        transport.push_err("broken pipe");
        let result = store.delete_product("1");
        assert_eq!(
            result,
            OperationResult::failure("An error occurred while deleting the product")
        );
        assert_eq!(store.products().len(), 1);
    }

    #[test]
    fn update_replaces_only_matching_record() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        let initial = [product("1", "A", 1.0), product("2", "B", 2.0)];
        seed(&mut store, &transport, &initial);

        transport.push_ok(
            200,
            r#"{"success":true,"message":"Product updated successfully","data":{"id":"2","name":"B2","image":"b.png","price":5.0}}"#,
        );
        let patch = ProductPatch {
            name: Some("B2".into()),
            price: Some(5.0),
            ..ProductPatch::default()
        };
        let result = store.update_product("2", &patch);
        assert_eq!(result, OperationResult::success("Product updated successfully"));

        let products = store.products();
        assert_eq!(products[0], initial[0]);
        assert_eq!(products[1].name, "B2");
        assert_eq!(products[1].price, 5.0);
    }

    #[test]
    fn update_of_unknown_id_surfaces_server_message() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        seed(&mut store, &transport, &[product("1", "A", 1.0)]);
        let before = store.products();

        transport.push_ok(404, r#"{"success":false,"message":"Product not found"}"#);
        let result = store.update_product("ghost", &ProductPatch::default());
        assert_eq!(result, OperationResult::failure("Product not found"));
        assert!(Arc::ptr_eq(&before, &store.products()));
    }

    #[test]
    fn update_converts_transport_failure_to_generic_message() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        transport.push_err("timed out");
        let result = store.update_product("1", &ProductPatch::default());
        assert_eq!(
            result,
            OperationResult::failure("An error occurred while updating the product")
        );
    }

    #[test]
    fn successful_mutation_installs_new_snapshot() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);
        seed(&mut store, &transport, &[product("1", "A", 1.0)]);
        let before = store.products();

        transport.push_ok(200, r#"{"success":true,"message":"Product deleted"}"#);
        store.delete_product("1");
        let after = store.products();

        assert!(!Arc::ptr_eq(&before, &after));
        // The old snapshot is immutable: an observer holding it still sees
        // the pre-mutation sequence.
        assert_eq!(before.len(), 1);
        assert!(after.is_empty());
    }

    #[test]
    fn operations_hit_expected_endpoints() {
        let transport = ScriptedTransport::new();
        let mut store = store(&transport);

        transport.push_ok(200, r#"{"data":[]}"#);
        store.fetch_products().unwrap();
        transport.push_ok(200, r#"{"success":true,"message":"Product deleted"}"#);
        store.delete_product("abc");

        let requests = transport.requests.borrow();
        assert_eq!(requests[0].path, "http://localhost:3000/api/products");
        assert_eq!(requests[1].path, "http://localhost:3000/api/products/abc");
    }
}
