//! Receipt API endpoints

use api_types::{
    extract::{CandidateView, ExtractQuery, ExtractResponse},
    publish::{PublishRequest, PublishResponse},
    receipt::SharedReceipt,
    totals::{TotalsRequest, TotalsResponse},
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
};
use engine::{
    CandidateList, EngineError, ExtractionOutcome, ReceiptImage, SummarySink, allocation_status,
    extract_receipt,
};

use crate::{ServerError, server::ServerState, wire};

/// Handle requests for publishing a receipt summary
pub async fn publish(
    State(state): State<ServerState>,
    Json(payload): Json<PublishRequest>,
) -> Result<(StatusCode, Json<PublishResponse>), ServerError> {
    let session = wire::session_from_wire(payload.people, payload.items)?;
    let id = session
        .publish(&state.store, payload.title.as_deref())
        .await?;
    let url = format!("{}/{id}", state.public_url.trim_end_matches('/'));
    Ok((StatusCode::CREATED, Json(PublishResponse { id, url })))
}

/// Handle requests for reading a published receipt
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<SharedReceipt>, ServerError> {
    let document = state.store.fetch(&id).await?;
    Ok(Json(wire::shared_receipt(&document)))
}

/// Handle requests for computing totals of an unpublished bill
pub async fn totals(
    Json(payload): Json<TotalsRequest>,
) -> Result<Json<TotalsResponse>, ServerError> {
    let session = wire::session_from_wire(payload.people, payload.items)?;
    let totals = session.totals()?;
    let classification = session.classify()?;

    Ok(Json(TotalsResponse {
        totals: totals
            .iter()
            .map(|(id, total)| (id.as_uuid(), total.to_major()))
            .collect(),
        rounded_totals: totals
            .iter()
            .map(|(id, total)| (id.as_uuid(), total.round_cents().to_major()))
            .collect(),
        grand_total: classification.grand_total.to_major(),
        unsplit_items: classification
            .unsplit
            .iter()
            .map(|item| item.id.as_uuid())
            .collect(),
        statuses: session
            .items()
            .iter()
            .map(|item| (item.id.as_uuid(), wire::item_status(allocation_status(item))))
            .collect(),
    }))
}

/// Handle receipt photo uploads
///
/// The raw request body is the image; its type comes from `Content-Type`.
pub async fn extract(
    State(state): State<ServerState>,
    Query(query): Query<ExtractQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ExtractResponse>, ServerError> {
    let Some(extractor) = state.extractor.as_deref() else {
        return Err(ServerError::Engine(EngineError::Extraction(
            "receipt extraction is not configured".to_string(),
        )));
    };
    if body.is_empty() {
        return Err(ServerError::Generic("No file provided".to_string()));
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("image/jpeg");
    let mut image = ReceiptImage::new(body.to_vec(), content_type);
    if let Some(language) = query.language.filter(|l| !l.trim().is_empty()) {
        image = image.language(language);
    }

    let outcome = extract_receipt(extractor, &image).await;
    let message = outcome.message();
    let candidates = match outcome {
        ExtractionOutcome::Items(items) => CandidateList::from_extracted(items),
        ExtractionOutcome::Empty => CandidateList::new(),
        ExtractionOutcome::Failed(reason) => return Err(EngineError::Extraction(reason).into()),
    };

    Ok(Json(ExtractResponse {
        candidates: candidates
            .as_slice()
            .iter()
            .map(|candidate| CandidateView {
                id: candidate.id.as_uuid(),
                name: candidate.name.clone(),
                price: candidate.price.clone(),
                is_editing: candidate.is_editing,
            })
            .collect(),
        message,
    }))
}
