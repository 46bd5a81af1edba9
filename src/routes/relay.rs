//! Relay endpoint
//!
//! Accepts a multipart upload, forwards it to the model provider and returns
//! either the raw answer or the JSON object embedded in it.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, warn, Instrument};

use crate::{
    error::{AppError, AppResult},
    metrics::{record_attachment, record_request},
    middleware::auth::AuthenticatedCaller,
    proxy::RequestContext,
    relay::{extract_json_object, message_content, ChatRequest, RelayForm, RelayResponse},
    AppState,
};

/// Handle a relay request
///
/// Authentication has already run; this validates the body, calls the
/// provider and shapes the reply.
pub async fn relay(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, AppError> {
    let caller = request
        .extensions()
        .get::<AuthenticatedCaller>()
        .cloned()
        .ok_or_else(|| {
            warn!("AuthenticatedCaller not found in request extensions");
            AppError::Unauthorized
        })?;

    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("multipart/form-data"));
    if !is_multipart {
        return Err(AppError::BadRequest(
            "Content-Type must be multipart/form-data".to_string(),
        ));
    }

    let multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?;

    let mut form = RelayForm::from_multipart(multipart).await?;
    let prompt = form.resolve_prompt(state.config.prompt_preset)?;
    let model = form
        .model
        .take()
        .unwrap_or_else(|| state.config.default_model.clone());

    if let Some(image) = &form.image {
        record_attachment("image", image.bytes.len());
    }
    if let Some(pdf) = &form.pdf {
        record_attachment("pdf", pdf.bytes.len());
    }

    let chat_request = ChatRequest::new(&model, prompt, form.image.as_ref(), form.pdf.as_ref());
    let ctx = RequestContext::new(state.provider.name())
        .with_model(&model)
        .with_caller(caller.key_fingerprint)
        .with_expect_json(form.expect_json);
    drop(form);

    ctx.log_request_start(chat_request.attachment_count());

    let result = forward(&state, &chat_request, &ctx)
        .instrument(ctx.create_span())
        .await;

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status(),
    };
    record_request(
        status.as_u16(),
        &model,
        ctx.start_time.elapsed().as_secs_f64(),
    );

    result
}

/// Call the provider and post-process its reply
async fn forward(
    state: &AppState,
    request: &ChatRequest,
    ctx: &RequestContext,
) -> AppResult<Response> {
    let upstream = state.provider.chat_completion(request, ctx).await?;
    let content = message_content(&upstream);

    let response = if ctx.expect_json {
        let extracted = extract_json_object(content.as_deref())?;
        debug!(trace_id = %ctx.trace_id, "Extracted JSON object from upstream content");
        (StatusCode::OK, Json(extracted)).into_response()
    } else {
        (StatusCode::OK, Json(RelayResponse { response: content.clone() })).into_response()
    };

    ctx.log_request_complete(content.is_some());
    Ok(response)
}

/// CORS preflight: empty 204, headers added by the router
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Any method other than POST and OPTIONS
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
