pub mod health;
pub mod pdf;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        pdf::upload_pdf,
        pdf::chat_with_pdf,
        pdf::list_pdfs,
        pdf::delete_pdf,
        health::health_check,
    ),
    components(schemas(
        pdf::UploadResponse,
        pdf::ChatRequest,
        pdf::ChatResponse,
        pdf::SessionResponse,
        pdf::TurnResponse,
        pdf::MessageResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "pdf", description = "PDF upload, chat relay, listing and deletion"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
