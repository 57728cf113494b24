use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use ocr::OcrSpaceClient;
use sea_orm::DatabaseConnection;

use std::sync::Arc;

use crate::{receipts, store::ReceiptStore};

/// Largest accepted receipt photo.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct ServerState {
    pub store: ReceiptStore,
    pub extractor: Option<Arc<OcrSpaceClient>>,
    /// Base of the links handed out for published receipts.
    pub public_url: Arc<str>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, public_url: &str) -> Self {
        Self {
            store: ReceiptStore::new(db),
            extractor: None,
            public_url: Arc::from(public_url),
        }
    }

    /// Enable `POST /extract` with the given OCR client.
    #[must_use]
    pub fn extractor(mut self, extractor: OcrSpaceClient) -> Self {
        self.extractor = Some(Arc::new(extractor));
        self
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/receipts", post(receipts::publish))
        .route("/receipts/{id}", get(receipts::get))
        .route("/totals", post(receipts::totals))
        .route(
            "/extract",
            post(receipts::extract).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES)),
        )
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
