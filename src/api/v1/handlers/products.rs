/*
 * Responsibility
 * - /products CRUD handler (inventory service)
 * - sku 重複は 409
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
        products::{CreateProductRequest, ProductResponse, UpdateProductRequest},
    },
    error::AppError,
    repos::product_repo::{self, NewProduct, ProductChanges},
    state::AppState,
};

const RESOURCE: &str = "product";

pub async fn list_products(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let rows = product_repo::list(&state.db, q.page())
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    Ok(Json(rows.into_iter().map(ProductResponse::from).collect()))
}

pub async fn create_product(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let row = product_repo::create(
        &state.db,
        NewProduct {
            sku: req.sku.trim(),
            name: req.name.trim(),
            description: req.description.as_deref(),
            quantity: req.quantity,
            unit_price_cents: req.unit_price_cents,
            supplier_id: req.supplier_id,
        },
    )
    .await
    .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    tracing::info!(product_id = %row.id, sku = %row.sku, by = %principal.subject, "product created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ProductResponse>, AppError> {
    let row = product_repo::get(&state.db, product_id)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok(Json(row.into()))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    principal: Principal,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let changes = ProductChanges {
        name: req.name.as_deref().map(str::trim),
        description: req.description.as_deref(),
        quantity: req.quantity,
        unit_price_cents: req.unit_price_cents,
        supplier_id: req.supplier_id,
    };
    let row = product_repo::update(&state.db, product_id, changes)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?
        .ok_or(AppError::not_found(RESOURCE))?;

    tracing::info!(product_id = %row.id, by = %principal.subject, "product updated");
    Ok(Json(row.into()))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    principal: Principal,
) -> Result<StatusCode, AppError> {
    let deleted = product_repo::delete(&state.db, product_id)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    if !deleted {
        return Err(AppError::not_found(RESOURCE));
    }
    tracing::info!(%product_id, by = %principal.subject, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
