use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use docrelay_persist::{ChatTurn, DocumentSession, TurnRole};

use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub source_id: String,
    /// Email of the owner, mirrored back for display.
    pub user: String,
    pub file_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub source_id: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    /// The provider's reply text.
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub source_id: String,
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub chat_history: Vec<TurnResponse>,
    pub user: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl From<ChatTurn> for TurnResponse {
    fn from(turn: ChatTurn) -> Self {
        Self {
            role: match turn.role {
                TurnRole::User => "user",
                TurnRole::Assistant => "assistant",
            }
            .to_string(),
            content: turn.content,
            created_at: turn.created_at,
        }
    }
}

impl From<DocumentSession> for SessionResponse {
    fn from(session: DocumentSession) -> Self {
        Self {
            id: session.id,
            source_id: session.source_id,
            name: session.name,
            uploaded_at: session.uploaded_at,
            chat_history: session.chat_history.into_iter().map(Into::into).collect(),
            user: session.owner,
        }
    }
}

/// Upload a PDF and register it with the provider
#[utoipa::path(
    post,
    path = "/pdf/upload",
    request_body(content = String, content_type = "multipart/form-data", description = "PDF file under the `file` field"),
    responses(
        (status = 201, description = "File registered and session created", body = UploadResponse),
        (status = 400, description = "No file uploaded"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 500, description = "Provider or server error")
    ),
    tag = "pdf"
)]
pub async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("document.pdf").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidInput(format!("Failed to read file: {}", e)))?;
            file = Some((name, data.to_vec()));
            break;
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| ApiError::InvalidInput("No file uploaded".to_string()))?;

    let registered = state.service.register_upload(&user, bytes, &file_name).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            source_id: registered.source_id,
            user: user.email,
            file_name: registered.file_name,
        }),
    ))
}

/// Relay a chat message against an uploaded PDF
#[utoipa::path(
    post,
    path = "/pdf/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Provider reply", body = ChatResponse),
        (status = 400, description = "Empty message"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Session not found"),
        (status = 500, description = "Provider or server error")
    ),
    tag = "pdf"
)]
pub async fn chat_with_pdf(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let reply = state
        .service
        .relay_message(&user, &req.source_id, &req.message)
        .await?;

    Ok(Json(ChatResponse { message: reply }))
}

/// List the caller's sessions
#[utoipa::path(
    get,
    path = "/pdf/all",
    responses(
        (status = 200, description = "Sessions owned by the caller", body = [SessionResponse]),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Caller has no sessions"),
        (status = 500, description = "Server error")
    ),
    tag = "pdf"
)]
pub async fn list_pdfs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<SessionResponse>>> {
    let sessions = state.service.list_sessions(&user).await?;

    // An empty list is reported as 404, matching the deployed API.
    if sessions.is_empty() {
        return Err(ApiError::NotFound("No PDFs found for this user.".to_string()));
    }

    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

/// Delete a session
#[utoipa::path(
    delete,
    path = "/pdf/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Not found or not owned by the caller"),
        (status = 500, description = "Server error")
    ),
    tag = "pdf"
)]
pub async fn delete_pdf(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.service.delete_session(&user, &id).await?;

    Ok(Json(MessageResponse {
        message: "PDF deleted successfully".to_string(),
    }))
}
