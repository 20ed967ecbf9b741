use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use frit_common::{
    params::{CreateUserParams, ListUsersParams, UpdateUserParams, UpdateUserStatusParams},
    views::{ApiResponse, Pagination, User},
};
use frit_db::storage::{UserFilter, UserStore};
use tracing::info;

use crate::{context::ApiContext, error::ApiError};

/// Path ids that are not integers cannot name a user.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::not_found())
}

#[utoipa::path(
    get,
    path = "/api/users",
    tags = ["users"],
    params(ListUsersParams),
    responses((status = 200, description = "A page of users", body = ApiResponse<Vec<User>>))
)]
pub async fn list_users(
    State(ctx): State<ApiContext>,
    query: Result<Query<ListUsersParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let Query(query) = query?;
    let pagination = query.pagination();
    let filter = UserFilter {
        status: query.status(),
        search: query.search(),
    };

    let page = ctx.db.list(filter, pagination).await?;

    Ok(Json(ApiResponse::paginated(
        "Users retrieved successfully",
        page.items.into_iter().map(Into::into).collect(),
        Pagination::new(pagination.page, pagination.limit, page.total_items),
    )))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tags = ["users"],
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "Resolved user", body = ApiResponse<User>),
        (status = 404, description = "No such user", body = frit_common::views::ApiErrorResponse),
    )
)]
pub async fn get_user(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = ctx
        .db
        .get(parse_id(&id)?)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(ApiResponse::ok("User retrieved successfully", user.into())))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tags = ["users"],
    request_body(content = CreateUserParams, content_type = "application/json"),
    responses(
        (status = 201, description = "Created user", body = ApiResponse<User>),
        (status = 400, description = "Missing name or email", body = frit_common::views::ApiErrorResponse),
        (status = 409, description = "Email already in use", body = frit_common::views::ApiErrorResponse),
    )
)]
pub async fn create_user(
    State(ctx): State<ApiContext>,
    body: Result<Json<CreateUserParams>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let Json(body) = body?;

    let user = ctx.db.create(body.validate()?).await?;
    info!(user_id = user.id, "Created user");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User created successfully", user.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tags = ["users"],
    params(("id" = u64, Path, description = "User id")),
    request_body(content = UpdateUserParams, content_type = "application/json"),
    responses(
        (status = 200, description = "Updated user", body = ApiResponse<User>),
        (status = 400, description = "Invalid status", body = frit_common::views::ApiErrorResponse),
        (status = 404, description = "No such user", body = frit_common::views::ApiErrorResponse),
        (status = 409, description = "Email already in use", body = frit_common::views::ApiErrorResponse),
    )
)]
pub async fn update_user(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserParams>, JsonRejection>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = parse_id(&id)?;
    let Json(body) = body?;

    let user = ctx.db.update(id, body.validate()?).await?;
    info!(user_id = user.id, "Updated user");

    Ok(Json(ApiResponse::ok("User updated successfully", user.into())))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tags = ["users"],
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "The deleted user", body = ApiResponse<User>),
        (status = 404, description = "No such user", body = frit_common::views::ApiErrorResponse),
    )
)]
pub async fn delete_user(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = ctx.db.delete(parse_id(&id)?).await?;
    info!(user_id = user.id, "Deleted user");

    Ok(Json(ApiResponse::ok("User deleted successfully", user.into())))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/status",
    tags = ["users"],
    params(("id" = u64, Path, description = "User id")),
    request_body(content = UpdateUserStatusParams, content_type = "application/json"),
    responses(
        (status = 200, description = "Updated user", body = ApiResponse<User>),
        (status = 400, description = "Missing or invalid status", body = frit_common::views::ApiErrorResponse),
        (status = 404, description = "No such user", body = frit_common::views::ApiErrorResponse),
    )
)]
pub async fn update_user_status(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserStatusParams>, JsonRejection>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let Json(body) = body?;
    let status = body.validate()?;

    let user = ctx.db.set_status(parse_id(&id)?, status).await?;
    info!(user_id = user.id, %status, "Updated user status");

    Ok(Json(ApiResponse::ok("User status updated successfully", user.into())))
}
