//! # ヘルスチェックハンドラ
//!
//! Contact Service の稼働状態を確認するためのエンドポイント。
//!
//! - `GET /`: 固定文字列を返すだけの生存確認。メール設定の状態に関係なく 200
//! - `GET /health`: 稼働状態に加え、時刻と認証情報の設定有無を返す
//!
//! 共通部分のレスポンス型は [`pixdot_shared::HealthResponse`] を参照。

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use pixdot_domain::clock::Clock;
use pixdot_shared::HealthResponse;
use serde::Serialize;

use crate::config::MailBackend;

/// `GET /` のレスポンス本文
pub const LIVENESS_MESSAGE: &str = "Pixdot Backend Running 🚀";

/// ヘルスチェックハンドラの共有状態
pub struct HealthState {
    pub clock:                  Arc<dyn Clock>,
    pub mail_backend:           MailBackend,
    pub credentials_configured: bool,
}

/// ヘルスチェックレスポンス
#[derive(Debug, Serialize)]
pub struct HealthDetail {
    #[serde(flatten)]
    pub health:                 HealthResponse,
    pub timestamp:              DateTime<Utc>,
    pub credentials_configured: bool,
    pub mail_backend:           MailBackend,
}

/// GET /
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// GET /health
///
/// 認証情報の値そのものは返さず、設定されているかどうかだけを返す。
pub async fn health_check(State(state): State<Arc<HealthState>>) -> Json<HealthDetail> {
    Json(HealthDetail {
        health:                 HealthResponse::healthy(env!("CARGO_PKG_VERSION")),
        timestamp:              state.clock.now(),
        credentials_configured: state.credentials_configured,
        mail_backend:           state.mail_backend,
    })
}
