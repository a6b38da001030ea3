//! HTTP shell: routing, bearer auth, and the request-handling boundary
//!
//! The boundary is the only place errors are rendered: every failure becomes
//! the uniform `{error:{message,type}}` envelope, validation as 400, auth as
//! 401, and everything else as 502.

use crate::gemini::GenerationBackend;
use crate::models::{
    ChatCompletionRequest, Config, ErrorEnvelope, ImagesResponse, ModelEntry, ModelList,
};
use crate::translate::MODEL_BASE;
use crate::{stream, translate, Error};
use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<dyn GenerationBackend>,
}

impl AppState {
    pub fn new(config: Arc<Config>, backend: Arc<dyn GenerationBackend>) -> Self {
        Self { config, backend }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .route("/v1/models", get(list_models))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(api)
        .route("/health", get(health_check))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

async fn auth_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.config.proxy_api_key.as_deref() else {
        return next.run(request).await;
    };

    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "));

    if presented.is_some_and(|key| constant_time_compare(key, expected)) {
        next.run(request).await
    } else {
        tracing::warn!("Rejected request with missing or invalid API key");
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorEnvelope::new(
                "invalid or missing API key",
                "authentication_error",
            )),
        )
            .into_response()
    }
}

async fn chat_completions(
    State(state): State<AppState>,
    Json(request): Json<ChatCompletionRequest>,
) -> Response {
    match handle_generation(&state, &request).await {
        Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn handle_generation(
    state: &AppState,
    request: &ChatCompletionRequest,
) -> crate::Result<ImagesResponse> {
    let image_size = translate::select_resolution(&request.model)?;
    let vendor_request = translate::build_generate_request(request, image_size);

    tracing::info!(
        model = %request.model,
        messages = request.messages.len(),
        size = ?image_size,
        "Forwarding image generation request to Gemini"
    );

    let body_stream = state.backend.stream_generate(&vendor_request).await?;
    let chunk = stream::aggregate(body_stream).await?;
    Ok(translate::translate_response(&chunk))
}

fn error_response(err: &Error) -> Response {
    let status = match err {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };
    tracing::error!("Request failed: {}", err);
    (
        status,
        Json(ErrorEnvelope::new(err.to_string(), "vertex_api_error")),
    )
        .into_response()
}

async fn list_models() -> impl IntoResponse {
    Json(ModelList {
        object: "list".to_string(),
        data: vec![
            ModelEntry::new(MODEL_BASE),
            ModelEntry::new(format!("{}-2k", MODEL_BASE)),
            ModelEntry::new(format!("{}-4k", MODEL_BASE)),
        ],
    })
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({"status": "ok"})),
    )
}
