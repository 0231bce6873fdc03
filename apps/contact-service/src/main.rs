//! # Contact Service サーバー
//!
//! お問い合わせフォームの送信先となる API サーバー。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |---------|------|------|
//! | `GET` | `/` | 生存確認 |
//! | `GET` | `/health` | 稼働状態と認証情報の設定有無 |
//! | `POST` | `/api/contact` | お問い合わせ受付 |
//!
//! 環境変数は [`config`](pixdot_contact_service::config) を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（メールを送らない）
//! MAIL_BACKEND=noop cargo run -p pixdot-contact-service
//!
//! # 本番環境
//! EMAIL_USER=... EMAIL_PASS=... cargo run -p pixdot-contact-service --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use pixdot_contact_service::{app_builder, config::ContactConfig};
use pixdot_domain::clock::SystemClock;
use pixdot_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// Contact Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("contact-service");
    pixdot_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "contact-service").entered();

    // 設定読み込み
    let config = ContactConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Contact Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // 認証情報の値は出さない
    if config.mail.credentials_configured() {
        tracing::info!(
            mail.backend = %config.mail.backend,
            mail.sender = %config.mail.sender.address,
            "メール送信の認証情報が設定されています"
        );
    } else {
        tracing::warn!(
            mail.backend = %config.mail.backend,
            "メール送信の認証情報が未設定です。送信時に認証エラーになります"
        );
    }

    let sender = app_builder::build_sender(&config.mail)
        .context("メール送信トランスポートの構築に失敗しました")?;
    let app = app_builder::build_app(&config.mail, sender, Arc::new(SystemClock))
        .context("アプリケーションの構築に失敗しました")?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Contact Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
