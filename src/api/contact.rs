use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::Serialize;

use crate::{
    error::Result,
    leads::{ContactForm, LeadGateway},
    state::AppState,
};

/// 配置联系表单路由。
pub fn setup_route() -> Router<AppState> {
    Router::new().route("/contact", post(contact_submit))
}

#[derive(Debug, Serialize)]
pub struct Submitted {
    success: bool,
    message: &'static str,
}

/// 接收联系表单。
///
/// 校验失败返回 422 及字段错误；成功后交给 [`LeadGateway`] 投递并返回 202。
async fn contact_submit(
    State(gateway): State<Arc<dyn LeadGateway>>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<Submitted>)> {
    let lead = form.validate()?;
    gateway.submit(&lead).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(Submitted {
            success: true,
            message: "Thanks! We'll be in touch within one business day.",
        }),
    ))
}
