/*
 * Responsibility
 * - /admin-users CRUD handler (admin service)
 * - 読み取りは AdminPolicy、変更は SuperAdminPolicy (routes 側)
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
        admin_users::{AdminUserResponse, CreateAdminUserRequest, UpdateAdminUserRequest},
    },
    error::AppError,
    repos::admin_user_repo,
    state::AppState,
};

const RESOURCE: &str = "admin user";

pub async fn list_admin_users(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<AdminUserResponse>>, AppError> {
    let rows = admin_user_repo::list(&state.db, q.page())
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    Ok(Json(rows.into_iter().map(AdminUserResponse::from).collect()))
}

pub async fn create_admin_user(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateAdminUserRequest>,
) -> Result<(StatusCode, Json<AdminUserResponse>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let row = admin_user_repo::create(
        &state.db,
        req.email.trim(),
        req.display_name.trim(),
        &req.role,
    )
    .await
    .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    tracing::info!(admin_user_id = %row.id, role = %row.role, by = %principal.subject, "admin user created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_admin_user(
    State(state): State<AppState>,
    Path(admin_user_id): Path<Uuid>,
) -> Result<Json<AdminUserResponse>, AppError> {
    let row = admin_user_repo::get(&state.db, admin_user_id)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?
        .ok_or(AppError::not_found(RESOURCE))?;

    Ok(Json(row.into()))
}

pub async fn update_admin_user(
    State(state): State<AppState>,
    Path(admin_user_id): Path<Uuid>,
    principal: Principal,
    Json(req): Json<UpdateAdminUserRequest>,
) -> Result<Json<AdminUserResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let row = admin_user_repo::update(
        &state.db,
        admin_user_id,
        req.display_name.as_deref().map(str::trim),
        req.role.as_deref(),
    )
    .await
    .map_err(|e| AppError::from_repo(RESOURCE, e))?
    .ok_or(AppError::not_found(RESOURCE))?;

    tracing::info!(admin_user_id = %row.id, role = %row.role, by = %principal.subject, "admin user updated");
    Ok(Json(row.into()))
}

pub async fn delete_admin_user(
    State(state): State<AppState>,
    Path(admin_user_id): Path<Uuid>,
    principal: Principal,
) -> Result<StatusCode, AppError> {
    let deleted = admin_user_repo::delete(&state.db, admin_user_id)
        .await
        .map_err(|e| AppError::from_repo(RESOURCE, e))?;

    if !deleted {
        return Err(AppError::not_found(RESOURCE));
    }
    tracing::info!(%admin_user_id, by = %principal.subject, "admin user deleted");
    Ok(StatusCode::NO_CONTENT)
}
