//! # 通知送信
//!
//! メールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP（Gmail などのリレー）、Brevo（HTTP API）、Noop（ローカル開発用）
//! - **環境変数切替**: `MAIL_BACKEND` でランタイム選択
//! - **認証情報なしでは通信しない**: 資格情報が未設定の送信は接続を試みず
//!   [`NotificationError::Authentication`] を返す

mod brevo;
mod noop;
mod smtp;

use async_trait::async_trait;
use lettre::Address;
pub use brevo::{BrevoNotificationSender, DEFAULT_BREVO_API_URL};
pub use noop::NoopNotificationSender;
use pixdot_domain::notification::{DeliveryReceipt, EmailMessage, NotificationError};
pub use smtp::SmtpNotificationSender;

/// 送信元の表示名とアドレス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub name:    String,
    pub address: String,
}

impl SenderIdentity {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name:    name.into(),
            address: address.into(),
        }
    }
}

/// 返信先アドレスを解釈する
///
/// Reply-To は補助的なヘッダなので、解釈できないアドレスは警告を出して付けずに送る。
/// 入力検証は粗いため、ここで弾かれるアドレスも受け付け済みのお問い合わせに含まれうる。
fn parse_reply_to(reply_to: Option<&str>) -> Option<Address> {
    let reply_to = reply_to?;
    match reply_to.parse::<Address>() {
        Ok(address) => Some(address),
        Err(e) => {
            tracing::warn!(error = %e, "返信先アドレスを解釈できないため Reply-To を付けずに送信します");
            None
        }
    }
}

/// メール送信トレイト
///
/// 通知基盤の中核。メール送信の具体的な方法を抽象化する。
/// SMTP / Brevo / Noop の 3 実装を環境変数で切り替える。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    ///
    /// 成功時はトランスポートが返した応答（リプライコードや HTTP ステータス）を返す。
    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, NotificationError>;
}
