//! # Pixdot ドメイン層
//!
//! お問い合わせフォームの中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 検証済みのお問い合わせ（[`contact::ContactSubmission`]）は
//!   生成後に変更できない
//! - **検証の一元化**: 生の JSON からの変換はすべて [`contact::validate`] を通る
//! - **ドメインエラー**: クライアント起因の失敗は [`ValidationError`]、送信起因の失敗は
//!   [`notification::NotificationError`] で表現する
//!
//! ## 依存関係の方向
//!
//! ```text
//! contact-service → infra → domain
//!        ↘                    ↑
//!          ──────────────────
//! ```
//!
//! ドメイン層は SMTP やメール配信 API には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`contact`] - お問い合わせ内容と入力検証
//! - [`notification`] - メールメッセージと送信結果
//! - [`credential`] - 送信用認証情報
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - 検証エラー
//!
//! ## 使用例
//!
//! ```rust
//! use pixdot_domain::contact;
//!
//! let raw = serde_json::json!({});
//! let result = contact::validate(Some(&raw));
//!
//! assert_eq!(result.unwrap_err().to_string(), "firstName is required");
//! ```

pub mod clock;
pub mod contact;
pub mod credential;
pub mod error;
pub mod notification;

pub use error::ValidationError;
