//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! ローカル開発や `MAIL_BACKEND=noop` で使用する。

use async_trait::async_trait;
use pixdot_domain::notification::{DeliveryReceipt, EmailMessage, NotificationError};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, NotificationError> {
        tracing::info!(
            subject = %email.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(DeliveryReceipt::new(200, "skipped"))
    }
}
