/*
 * Responsibility
 * - /customers CRUD handler (customer service)
 * - 認可は routes 側の guard で済んでいる前提。ここは validation → repo のみ
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
        customers::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest},
    },
    error::AppError,
    repos::customer_repo::{self, CustomerChanges, NewCustomer},
    state::AppState,
};

const RESOURCE: &str = "customer";

pub async fn list_customers(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let rows = customer_repo::list(&state.db, q.page())
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    Ok(Json(rows.into_iter().map(CustomerResponse::from).collect()))
}

pub async fn create_customer(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let row = customer_repo::create(
        &state.db,
        NewCustomer {
            name: req.name.trim(),
            email: req.email.trim(),
            phone: req.phone.as_deref(),
            address: req.address.as_deref(),
        },
    )
    .await
    .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    tracing::info!(customer_id = %row.id, by = %principal.subject, "customer created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, AppError> {
    let row = customer_repo::get(&state.db, customer_id)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok(Json(row.into()))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    principal: Principal,
    Json(req): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let changes = CustomerChanges {
        name: req.name.as_deref().map(str::trim),
        email: req.email.as_deref().map(str::trim),
        phone: req.phone.as_deref(),
        address: req.address.as_deref(),
    };
    let row = customer_repo::update(&state.db, customer_id, changes)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?
        .ok_or(AppError::not_found(RESOURCE))?;

    tracing::info!(customer_id = %row.id, by = %principal.subject, "customer updated");
    Ok(Json(row.into()))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    principal: Principal,
) -> Result<StatusCode, AppError> {
    let deleted = customer_repo::delete(&state.db, customer_id)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    if !deleted {
        return Err(AppError::not_found(RESOURCE));
    }
    tracing::info!(%customer_id, by = %principal.subject, "customer deleted");
    Ok(StatusCode::NO_CONTENT)
}
