//! # Pixdot インフラ層
//!
//! メールトランスポートとの通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! ドメイン層で定義された [`EmailMessage`](pixdot_domain::notification::EmailMessage) を
//! 実際のトランスポート（SMTP リレー、メール配信 API）で送信する。
//! トランスポート固有のエラーはすべて
//! [`NotificationError`](pixdot_domain::notification::NotificationError) に変換し、
//! 上位層に lettre や reqwest の型を漏らさない。
//!
//! ## 依存関係
//!
//! ```text
//! contact-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信トレイトと SMTP / Brevo / Noop 実装
//! - `mock` - テスト用のモック送信（`test-utils` feature）

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;

pub use notification::{
    BrevoNotificationSender,
    NoopNotificationSender,
    NotificationSender,
    SenderIdentity,
    SmtpNotificationSender,
};
