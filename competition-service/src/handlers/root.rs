use axum::Json;

use crate::dtos::MessageResponse;

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = MessageResponse)),
    tag = "General"
)]
pub async fn read_root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Competition API running"))
}

#[utoipa::path(
    get,
    path = "/api/hello",
    responses((status = 200, description = "Greeting", body = MessageResponse)),
    tag = "General"
)]
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from the backend API!"))
}
