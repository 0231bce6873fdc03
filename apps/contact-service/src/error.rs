//! # Contact Service エラー定義
//!
//! お問い合わせ API のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## レスポンス形式
//!
//! フォーム側のスクリプトが `success` / `error` だけを見ても扱えるようにしつつ、
//! RFC 9457 Problem Details のフィールドも同じオブジェクトに含める。
//!
//! ```json
//! {
//!   "success": false,
//!   "error": "firstName is required",
//!   "type": "https://pixdotsolutions.com/errors/validation-error",
//!   "title": "Validation Error",
//!   "status": 400,
//!   "detail": "firstName is required",
//!   "field": "firstName"
//! }
//! ```

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pixdot_domain::{ValidationError, notification::NotificationError};
use pixdot_shared::{ErrorResponse, event_log::error};
use serde::Serialize;
use thiserror::Error;

use crate::usecase::DeliveryReport;

/// Contact Service で発生するエラー
#[derive(Debug, Error)]
pub enum ContactError {
    /// 入力検証エラー
    #[error("入力検証エラー: {0}")]
    Validation(#[from] ValidationError),

    /// 管理者通知の送信に失敗
    #[error("管理者通知の送信に失敗: {cause}")]
    Delivery {
        cause:  NotificationError,
        report: DeliveryReport,
    },

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

/// エラーレスポンスのボディ
#[derive(Debug, Serialize)]
struct ContactErrorBody {
    success:  bool,
    error:    String,
    #[serde(flatten)]
    problem:  ErrorResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    field:    Option<&'static str>,
    #[serde(flatten)]
    delivery: Option<DeliveryReport>,
}

impl ContactErrorBody {
    fn new(problem: ErrorResponse) -> Self {
        Self {
            success: false,
            error: problem.detail.clone(),
            problem,
            field: None,
            delivery: None,
        }
    }
}

impl ContactError {
    /// ログに付与する `error.category` と `error.kind`
    ///
    /// 入力検証エラーはクライアント起因なのでエラーログを出さない。
    fn log_fields(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Validation(_) => None,
            Self::Delivery {
                cause: NotificationError::Authentication(_),
                ..
            } => Some((
                error::category::CONFIGURATION,
                error::kind::MAIL_AUTHENTICATION,
            )),
            Self::Delivery { .. } => Some((
                error::category::EXTERNAL_SERVICE,
                error::kind::MAIL_TRANSPORT,
            )),
            Self::Unexpected(_) => Some((error::category::INTERNAL, error::kind::INTERNAL)),
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        if let Some((category, kind)) = self.log_fields() {
            tracing::error!(error.category = category, error.kind = kind, "{}", self);
        }

        let body = match self {
            ContactError::Validation(e) => ContactErrorBody {
                field: e.field(),
                ..ContactErrorBody::new(ErrorResponse::validation_error(e.to_string()))
            },
            ContactError::Delivery { cause, report } => {
                let problem = match &cause {
                    NotificationError::Authentication(_) => ErrorResponse::new(
                        "mail-authentication-failed",
                        "Mail Authentication Failed",
                        500,
                        cause.public_detail(),
                    ),
                    NotificationError::Transport(_) | NotificationError::Template(_) => {
                        ErrorResponse::new(
                            "mail-delivery-failed",
                            "Mail Delivery Failed",
                            500,
                            cause.public_detail(),
                        )
                    }
                };
                ContactErrorBody {
                    delivery: Some(report),
                    ..ContactErrorBody::new(problem)
                }
            }
            ContactError::Unexpected(_) => ContactErrorBody::new(ErrorResponse::internal_error()),
        };

        let status = StatusCode::from_u16(body.problem.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(body)).into_response()
    }
}

/// `CatchPanicLayer` 用のパニックハンドラ
///
/// パニックの内容はログにのみ出し、クライアントには汎用の 500 を返す。
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    ContactError::Unexpected(format!("ハンドラがパニック: {detail}")).into_response()
}
