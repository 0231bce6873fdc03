//! # お問い合わせハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/contact` - お問い合わせ受付
//!
//! CORS プリフライト（`OPTIONS`）は `CorsLayer` が応答する。

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::ContactError,
    usecase::{ContactUseCase, DeliveryReport},
};

/// 受付成功時のメッセージ
const SUCCESS_MESSAGE: &str = "Emails sent successfully";
/// 受付確認メールだけ届かなかった場合のメッセージ
const PARTIAL_SUCCESS_MESSAGE: &str =
    "Your message was received, but the confirmation email could not be sent";

/// お問い合わせハンドラの共有状態
pub struct ContactState {
    pub usecase: Arc<ContactUseCase>,
}

/// 受付成功レスポンス
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(flatten)]
    pub report:  DeliveryReport,
}

/// POST /api/contact
///
/// ボディは `Content-Type` に関係なく JSON として解釈する。
/// 空・JSON として不正な場合はボディなしとして扱う。
pub async fn submit_contact(
    State(state): State<Arc<ContactState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ContactError> {
    let raw = serde_json::from_slice::<Value>(&body).ok();

    let report = state.usecase.submit(raw.as_ref()).await?;

    let message = if report.fully_delivered() {
        SUCCESS_MESSAGE
    } else {
        PARTIAL_SUCCESS_MESSAGE
    };

    Ok(Json(ContactResponse {
        success: true,
        message,
        report,
    }))
}
