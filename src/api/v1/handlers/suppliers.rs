/*
 * Responsibility
 * - /suppliers CRUD handler (suppliers service)
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
        suppliers::{CreateSupplierRequest, SupplierResponse, UpdateSupplierRequest},
    },
    error::AppError,
    repos::supplier_repo,
    state::AppState,
};

const RESOURCE: &str = "supplier";

pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<SupplierResponse>>, AppError> {
    let rows = supplier_repo::list(&state.db, q.page())
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    Ok(Json(rows.into_iter().map(SupplierResponse::from).collect()))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateSupplierRequest>,
) -> Result<(StatusCode, Json<SupplierResponse>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let row = supplier_repo::create(
        &state.db,
        req.name.trim(),
        req.contact_email.trim(),
        req.phone.as_deref(),
    )
    .await
    .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    tracing::info!(supplier_id = %row.id, by = %principal.subject, "supplier created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> Result<Json<SupplierResponse>, AppError> {
    let row = supplier_repo::get(&state.db, supplier_id)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok(Json(row.into()))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    principal: Principal,
    Json(req): Json<UpdateSupplierRequest>,
) -> Result<Json<SupplierResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let row = supplier_repo::update(
        &state.db,
        supplier_id,
        req.name.as_deref().map(str::trim),
        req.contact_email.as_deref().map(str::trim),
        req.phone.as_deref(),
    )
    .await
    .map_err(|e| AppError::from_repo(RESOURCE, e))?
    .ok_or(AppError::not_found(RESOURCE))?;

    tracing::info!(supplier_id = %row.id, by = %principal.subject, "supplier updated");
    Ok(Json(row.into()))
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    principal: Principal,
) -> Result<StatusCode, AppError> {
    let deleted = supplier_repo::delete(&state.db, supplier_id)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    if !deleted {
        return Err(AppError::not_found(RESOURCE));
    }
    tracing::info!(%supplier_id, by = %principal.subject, "supplier deleted");
    Ok(StatusCode::NO_CONTENT)
}
