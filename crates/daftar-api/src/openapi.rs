//! OpenAPI document assembly.

use axum::Json;
use utoipa::OpenApi;

use crate::error::{ErrorBody, ErrorDetail};
use crate::routes::admin::{LoginRequest, LoginResponse, LogoutResponse, UsersResponse};
use crate::routes::register::{
    ExtractRequest, ExtractResponse, RegisterRequest, RegisterResponse, RegisteredUser,
};
use crate::state::RegistrationRecord;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::register::register,
        crate::routes::register::extract,
        crate::routes::admin::login,
        crate::routes::admin::logout,
        crate::routes::admin::list_users,
        crate::routes::admin::export_csv,
    ),
    components(schemas(
        RegisterRequest,
        RegisterResponse,
        RegisteredUser,
        ExtractRequest,
        ExtractResponse,
        LoginRequest,
        LoginResponse,
        LogoutResponse,
        UsersResponse,
        RegistrationRecord,
        ErrorBody,
        ErrorDetail,
    )),
    tags(
        (name = "register", description = "Public registration intake"),
        (name = "admin", description = "Authenticated admin console"),
    ),
    info(
        title = "daftar-api",
        description = "IC registration service: validated intake with duplicate detection over identity fingerprints, OCR-assisted field extraction, and an authenticated admin console."
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
