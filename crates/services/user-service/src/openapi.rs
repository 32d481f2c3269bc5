//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::user_handler::MessageResponse;
use domain::{UserPayload, UserResponse, UserSummary};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::create_or_update_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::get_user_by_query,
    ),
    components(
        schemas(
            UserPayload,
            UserResponse,
            UserSummary,
            MessageResponse,
        )
    ),
    tags(
        (name = "Users", description = "User record endpoints"),
    )
)]
pub struct ApiDoc;
