/*
 * Responsibility
 * - /payments handler (payments service)
 * - 更新は status のみ (金額・通貨は作成後に変えない)
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use token_gate::Principal;
use uuid::Uuid;

use crate::{
    api::v1::dto::{
        ListQuery,
        payments::{CreatePaymentRequest, PaymentResponse, UpdatePaymentRequest},
    },
    error::AppError,
    repos::payment_repo::{self, NewPayment},
    state::AppState,
};

const RESOURCE: &str = "payment";

pub async fn list_payments(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    let rows = payment_repo::list(&state.db, q.page())
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    Ok(Json(rows.into_iter().map(PaymentResponse::from).collect()))
}

pub async fn create_payment(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let row = payment_repo::create(
        &state.db,
        NewPayment {
            order_ref: req.order_ref.trim(),
            customer_id: req.customer_id,
            amount_cents: req.amount_cents,
            currency: &req.currency,
            status: req.status.as_str(),
        },
    )
    .await
    .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    tracing::info!(
        payment_id = %row.id,
        amount_cents = row.amount_cents,
        currency = %row.currency,
        by = %principal.subject,
        "payment recorded"
    );
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, AppError> {
    let row = payment_repo::get(&state.db, payment_id)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok(Json(row.into()))
}

pub async fn update_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
    principal: Principal,
    Json(req): Json<UpdatePaymentRequest>,
) -> Result<Json<PaymentResponse>, AppError> {
    let row = payment_repo::update_status(&state.db, payment_id, req.status.as_str())
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?
        .ok_or(AppError::not_found(RESOURCE))?;

    tracing::info!(payment_id = %row.id, status = %row.status, by = %principal.subject, "payment status changed");
    Ok(Json(row.into()))
}

pub async fn delete_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
    principal: Principal,
) -> Result<StatusCode, AppError> {
    let deleted = payment_repo::delete(&state.db, payment_id)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    if !deleted {
        return Err(AppError::not_found(RESOURCE));
    }
    tracing::info!(%payment_id, by = %principal.subject, "payment deleted");
    Ok(StatusCode::NO_CONTENT)
}
