use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use super::allocation::ExpirationCurve;
use super::engine::PricingEngine;
use super::request::{ExpirationCurveRequest, PricingRequest, PricingResponse};
use crate::error::AppError;

/// Router exposing the pricing engine over HTTP.
pub fn pricing_router(engine: Arc<PricingEngine>) -> Router {
    Router::new()
        .route("/api/v1/pricing/suggestions", post(suggestions_handler))
        .route(
            "/api/v1/pricing/expiration-curve",
            post(expiration_curve_handler),
        )
        .with_state(engine)
}

pub(crate) async fn suggestions_handler(
    State(engine): State<Arc<PricingEngine>>,
    payload: Result<Json<PricingRequest>, JsonRejection>,
) -> Result<Json<PricingResponse>, AppError> {
    let Json(request) = payload?;
    let response = engine.quote(&request)?;
    Ok(Json(response))
}

pub(crate) async fn expiration_curve_handler(
    State(engine): State<Arc<PricingEngine>>,
    payload: Result<Json<ExpirationCurveRequest>, JsonRejection>,
) -> Result<Json<ExpirationCurve>, AppError> {
    let Json(request) = payload?;
    Ok(Json(engine.expiration_curve(&request.expiration_allocation)))
}
