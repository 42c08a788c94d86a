use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub image: String,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
}

// A Vec rather than a map: the list endpoint must return insertion order.
pub type Db = Arc<RwLock<Vec<Product>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            axum::routing::put(update_product).delete(delete_product),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>) -> Json<serde_json::Value> {
    let products = db.read().await;
    Json(json!({ "data": *products }))
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<NewProduct>,
) -> (StatusCode, Json<serde_json::Value>) {
    if input.name.is_empty()
        || input.image.is_empty()
        || !input.price.is_finite()
        || input.price <= 0.0
    {
        tracing::debug!("rejecting invalid create payload");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Please provide all fields" })),
        );
    }
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        image: input.image,
        price: input.price,
    };
    db.write().await.push(product.clone());
    tracing::debug!(id = %product.id, "product created");
    (StatusCode::CREATED, Json(json!({ "data": product })))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<ProductPatch>,
) -> (StatusCode, Json<serde_json::Value>) {
    let mut products = db.write().await;
    let Some(product) = products.iter_mut().find(|p| p.id == id) else {
        return not_found();
    };
    if let Some(name) = input.name {
        product.name = name;
    }
    if let Some(image) = input.image {
        product.image = image;
    }
    if let Some(price) = input.price {
        product.price = price;
    }
    tracing::debug!(id = %id, "product updated");
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Product updated successfully",
            "data": product.clone(),
        })),
    )
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    let mut products = db.write().await;
    let before = products.len();
    products.retain(|p| p.id != id);
    if products.len() == before {
        return not_found();
    }
    tracing::debug!(id = %id, "product deleted");
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Product deleted" })),
    )
}

fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Product not found" })),
    )
}
