//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 本番では Gmail などの SMTP リレーにアプリパスワードで認証して接続する。
//!
//! ## TLS モード
//!
//! | ポート | 接続方式 |
//! |-------|---------|
//! | 587 | STARTTLS |
//! | 465 | 暗黙的 TLS |
//! | その他 | TLS なし（Mailpit 等のローカル SMTP 向け） |

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    Address,
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{self, authentication::Credentials},
};
use pixdot_domain::{
    credential::Credential,
    notification::{DeliveryReceipt, EmailMessage, NotificationError},
};

use super::{NotificationSender, SenderIdentity, parse_reply_to};

/// SMTP 接続のタイムアウト
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 接続はプールされ、リクエスト間で再利用される。
pub struct SmtpNotificationSender {
    /// 認証情報が未設定の場合は `None`（送信時に認証エラーを返す）
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    sender:    SenderIdentity,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "smtp.gmail.com"）
    /// - `port`: SMTP サーバーのポート番号（587 / 465 / その他）
    /// - `sender`: 送信元。アドレスは SMTP 認証のユーザー名も兼ねる
    /// - `password`: SMTP パスワード（未設定なら `None`）
    pub fn new(
        host: &str,
        port: u16,
        sender: SenderIdentity,
        password: Option<Credential>,
    ) -> Result<Self, NotificationError> {
        let transport = password
            .map(|password| build_transport(host, port, &sender.address, &password))
            .transpose()?;

        Ok(Self { transport, sender })
    }

    fn build_message(&self, email: &EmailMessage) -> Result<Message, NotificationError> {
        let from_address: Address = self
            .sender
            .address
            .parse()
            .map_err(|e| NotificationError::Transport(format!("invalid sender address: {e}")))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| NotificationError::Transport(format!("invalid recipient address: {e}")))?;

        let mut builder = Message::builder()
            .from(Mailbox::new(Some(self.sender.name.clone()), from_address))
            .to(to)
            .subject(&email.subject);

        if let Some(reply_to) = parse_reply_to(email.reply_to.as_deref()) {
            builder = builder.reply_to(Mailbox::new(None, reply_to));
        }

        builder
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| NotificationError::Transport(format!("failed to build message: {e}")))
    }
}

fn build_transport(
    host: &str,
    port: u16,
    username: &str,
    password: &Credential,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotificationError> {
    let builder = match port {
        587 => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host),
        465 => AsyncSmtpTransport::<Tokio1Executor>::relay(host),
        // builder_dangerous: TLS なしで接続
        _ => Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)),
    }
    .map_err(|e| NotificationError::Transport(format!("failed to configure SMTP relay: {e}")))?;

    Ok(builder
        .port(port)
        .timeout(Some(SMTP_TIMEOUT))
        .credentials(Credentials::new(
            username.to_string(),
            password.as_str().to_string(),
        ))
        .build())
}

/// SMTP のリプライコードが認証失敗（530 / 534 / 535）を示すか
fn is_authentication_code(code: &str) -> bool {
    code.starts_with("53")
}

fn classify_error(error: &smtp::Error) -> NotificationError {
    match error.status() {
        Some(code) if is_authentication_code(&code.to_string()) => {
            NotificationError::Authentication(format!("SMTP 認証失敗: {code}"))
        }
        _ => NotificationError::Transport(error.to_string()),
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, NotificationError> {
        let Some(transport) = &self.transport else {
            return Err(NotificationError::Authentication(
                "SMTP パスワードが設定されていない".to_string(),
            ));
        };

        let message = self.build_message(email)?;

        let response = transport
            .send(message)
            .await
            .map_err(|e| classify_error(&e))?;

        let code = response.code().to_string();
        let detail = response
            .message()
            .collect::<Vec<_>>()
            .join(" ");

        Ok(DeliveryReceipt::new(code.parse().unwrap_or(250), detail))
    }
}
