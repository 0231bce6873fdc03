//! # Contact Service アプリケーション構築
//!
//! DI（送信トランスポート・State）の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Json,
    Router,
    http::{Method, StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::{get, post},
};
use pixdot_domain::{clock::Clock, notification::NotificationError};
use pixdot_infra::notification::{
    BrevoNotificationSender,
    NoopNotificationSender,
    NotificationSender,
    SmtpNotificationSender,
};
use pixdot_shared::{
    ErrorResponse,
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::{MailBackend, MailConfig},
    error::handle_panic,
    handler::{ContactState, HealthState, health_check, liveness, submit_contact},
    usecase::{ContactUseCase, NotificationDispatcher, TemplateRenderer},
};

/// 設定で選択されたメール送信トランスポートを構築する
///
/// 認証情報が未設定でも構築は成功し、送信時に認証エラーを返す。
pub fn build_sender(mail: &MailConfig) -> Result<Arc<dyn NotificationSender>, NotificationError> {
    let sender: Arc<dyn NotificationSender> = match mail.backend {
        MailBackend::Smtp => Arc::new(SmtpNotificationSender::new(
            &mail.smtp_host,
            mail.smtp_port,
            mail.sender.clone(),
            mail.smtp_password.clone(),
        )?),
        MailBackend::Brevo => Arc::new(BrevoNotificationSender::new(
            &mail.brevo_api_url,
            mail.brevo_api_key.clone(),
            mail.sender.clone(),
        )?),
        MailBackend::Noop => Arc::new(NoopNotificationSender),
    };
    Ok(sender)
}

/// DI コンテナの構築とルーター定義を行う
///
/// 送信トランスポートと時刻プロバイダを受け取り、
/// ユースケース → State → Router の順に組み立てる。
pub fn build_app(
    mail: &MailConfig,
    sender: Arc<dyn NotificationSender>,
    clock: Arc<dyn Clock>,
) -> Result<Router, NotificationError> {
    let dispatcher =
        NotificationDispatcher::new(sender, TemplateRenderer::new()?, mail.dispatch_settings());
    let contact_state = Arc::new(ContactState {
        usecase: Arc::new(ContactUseCase::new(dispatcher)),
    });

    let health_state = Arc::new(HealthState {
        clock,
        mail_backend: mail.backend,
        credentials_configured: mail.credentials_configured(),
    });

    // フォームは別オリジンの静的サイトから送られる
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/", get(liveness))
        .merge(
            Router::new()
                .route("/health", get(health_check))
                .with_state(health_state),
        )
        .route("/api/contact", post(submit_contact))
        .with_state(contact_state)
        .fallback(not_found)
        // レイヤー順序が重要: 下に書いたものが外側
        // 1. CatchPanicLayer（最外）: ハンドラのパニックを汎用の 500 に変換
        // 2. CorsLayer: プリフライトに応答し、全レスポンスに CORS ヘッダーを付与
        // 3. SetRequestIdLayer: UUID v7 を生成（またはクライアント提供値を使用）
        // 4. TraceLayer: カスタムスパンに request_id を含め、全ログに自動注入
        // 5. CanonicalLogLineLayer: リクエスト完了時に1行サマリログを出力（スパン内）
        // 6. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic));

    Ok(app)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found("The requested resource was not found")),
    )
}
