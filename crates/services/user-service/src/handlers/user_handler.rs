//! User handlers.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::{
    parse_user_id, User, UserPayload, UserResponse, UserSummary, MSG_INVALID_USER_ID,
    MSG_USER_CREATED, MSG_USER_UPDATED,
};

use crate::extractors::JsonBody;
use crate::state::AppState;

/// Outcome message of a create-or-update request
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "user created successfully")]
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Query string of `GET /user`
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub id: Option<String>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_or_update_user))
        .route("/users/", get(list_users).post(create_or_update_user))
        .route("/user", get(get_user_by_query))
        .route("/user/:id", get(get_user))
        .route("/user/:id/", get(get_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All stored users", body = Vec<UserSummary>),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserSummary>>> {
    let users = state.users.list_all().await.map_err(as_server_error)?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// Create a user, or overwrite one when the body carries a positive id
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Body is not valid JSON"),
        (status = 404, description = "No user with the given id"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_or_update_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    // The status follows the id the client sent, not the one assigned.
    let is_update = payload.is_update();
    let mut user = User::from(payload);

    state.users.create_or_update(&mut user).await?;

    if is_update {
        Ok((StatusCode::OK, Json(MessageResponse::new(MSG_USER_UPDATED))))
    } else {
        Ok((StatusCode::CREATED, Json(MessageResponse::new(MSG_USER_CREATED))))
    }
}

/// Get user by ID
///
/// A segment that is not all digits, or does not decode, is a routing miss
/// (404 without body).
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "Numeric user ID")
    ),
    responses(
        (status = 200, description = "User record", body = UserResponse),
        (status = 400, description = "ID out of range"),
        (status = 404, description = "Non-numeric ID or user not found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Response> {
    let Ok(Path(raw_id)) = path else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    if raw_id.is_empty() || !raw_id.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    let user = find_user(&state, &raw_id).await?;
    Ok(Json(user).into_response())
}

/// Get user by ID passed as `?id=`
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    params(
        ("id" = String, Query, description = "User ID")
    ),
    responses(
        (status = 200, description = "User record", body = UserResponse),
        (status = 400, description = "Missing or invalid ID"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_user_by_query(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> AppResult<Json<UserResponse>> {
    let raw_id = query
        .ok()
        .and_then(|Query(query)| query.id)
        .ok_or_else(|| AppError::bad_request(MSG_INVALID_USER_ID))?;

    Ok(Json(find_user(&state, &raw_id).await?))
}

async fn find_user(state: &AppState, raw_id: &str) -> AppResult<UserResponse> {
    let id = parse_user_id(raw_id)?;
    let user = state.users.find_by_id(id).await?;
    Ok(UserResponse::from(user))
}

/// Listing has no client-error outcome; anything that goes wrong is a 500.
fn as_server_error(err: AppError) -> AppError {
    match err {
        AppError::BadRequest(msg) | AppError::NotFound(msg) => AppError::internal(msg),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use common::StoreError;

    use super::*;
    use crate::repository::MockUserRepository;
    use crate::store::MockKvStore;

    fn app(users: MockUserRepository) -> Router {
        let state = AppState::new(Arc::new(users), Arc::new(MockKvStore::new()));
        user_routes().with_state(state)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_list_not_found_becomes_server_error() {
        let mut users = MockUserRepository::new();
        users
            .expect_list_all()
            .returning(|| Err(AppError::no_user_found()));

        let (status, body) = get(app(users), "/users").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_get_user_decoding_error_hides_detail() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|_| Err(AppError::Decoding("missing field `city`".to_string())));

        let (status, body) = get(app(users), "/user/1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_get_user_store_error() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|_| Err(AppError::Store(StoreError::WrongType)));

        let (status, _) = get(app(users), "/user?id=1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_non_numeric_path_never_reaches_repository() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().never();

        let (status, body) = get(app(users), "/user/abc").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_path_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().never();

        let (status, body) = get(app(users), "/user/%FF").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_query_is_invalid_id() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().never();

        let (status, body) = get(app(users), "/user?id=1&id=2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"invalid userID"}"#);
    }

    #[tokio::test]
    async fn test_path_id_is_passed_through() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .withf(|id| *id == 42)
            .returning(|id| {
                Ok(User {
                    id,
                    ..User::new("Ann", 40, "Oslo")
                })
            });

        let (status, body) = get(app(users), "/user/42/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"id":42,"name":"Ann","age":40,"city":"Oslo"}"#);
    }
}
