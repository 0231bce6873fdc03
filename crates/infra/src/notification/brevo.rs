//! Brevo 通知送信実装
//!
//! Brevo のトランザクションメール API（`POST /v3/smtp/email`）を reqwest で呼び出す。
//! SMTP ポートが塞がれたホスティング環境でも HTTPS だけで送信できる。

use std::time::Duration;

use async_trait::async_trait;
use pixdot_domain::{
    credential::Credential,
    notification::{DeliveryReceipt, EmailMessage, NotificationError},
};
use serde::Serialize;

use super::{NotificationSender, SenderIdentity, parse_reply_to};

/// Brevo API の既定エンドポイント
pub const DEFAULT_BREVO_API_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// API 呼び出しのタイムアウト
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// --- リクエスト型 ---

#[derive(Debug, Serialize)]
struct Contact<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name:  Option<&'a str>,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender:       Contact<'a>,
    to:           [Contact<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to:     Option<Contact<'a>>,
    subject:      &'a str,
    html_content: &'a str,
    text_content: &'a str,
}

/// Brevo 通知送信
pub struct BrevoNotificationSender {
    api_url: String,
    api_key: Option<Credential>,
    sender:  SenderIdentity,
    client:  reqwest::Client,
}

impl BrevoNotificationSender {
    /// 新しい Brevo 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `api_url`: 送信エンドポイント（通常は [`DEFAULT_BREVO_API_URL`]）
    /// - `api_key`: API キー（未設定なら `None`）
    /// - `sender`: 送信元（Brevo で認証済みのアドレスであること）
    pub fn new(
        api_url: &str,
        api_key: Option<Credential>,
        sender: SenderIdentity,
    ) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotificationError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_url: api_url.to_string(),
            api_key,
            sender,
            client,
        })
    }
}

#[async_trait]
impl NotificationSender for BrevoNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, NotificationError> {
        let Some(api_key) = &self.api_key else {
            return Err(NotificationError::Authentication(
                "Brevo API キーが設定されていない".to_string(),
            ));
        };

        let reply_to = parse_reply_to(email.reply_to.as_deref());
        let request = SendEmailRequest {
            sender:       Contact {
                name:  Some(&self.sender.name),
                email: &self.sender.address,
            },
            to:           [Contact {
                name:  None,
                email: &email.to,
            }],
            reply_to:     reply_to.as_ref().map(|address| Contact {
                name:  None,
                email: address.as_ref(),
            }),
            subject:      &email.subject,
            html_content: &email.html_body,
            text_content: &email.text_body,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<body unreadable: {e}>"));

        match status {
            status if status.is_success() => Ok(DeliveryReceipt::new(status.as_u16(), body)),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => Err(
                NotificationError::Authentication(format!("Brevo API が認証を拒否: {status}")),
            ),
            status => Err(NotificationError::Transport(format!(
                "status {}: {}",
                status.as_u16(),
                body
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, extract::State, http::HeaderMap, http::StatusCode, routing::post};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured {
        requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    /// 指定ステータスを返すスタブ API を起動し、URL を返す
    async fn spawn_stub(status: StatusCode, body: &'static str) -> (String, Captured) {
        let captured = Captured::default();
        let app = Router::new()
            .route(
                "/v3/smtp/email",
                post(
                    move |State(captured): State<Captured>,
                          headers: HeaderMap,
                          Json(payload): Json<Value>| async move {
                        let api_key = headers
                            .get("api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        captured.requests.lock().unwrap().push((api_key, payload));
                        (status, body)
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/v3/smtp/email"), captured)
    }

    fn sender() -> SenderIdentity {
        SenderIdentity::new("Pixdot Solutions", "noreply@pixdotsolutions.com")
    }

    fn make_email() -> EmailMessage {
        EmailMessage {
            to:        "admin@pixdotsolutions.com".to_string(),
            reply_to:  Some("jane@example.com".to_string()),
            subject:   "New Contact: Jane Doe".to_string(),
            html_body: "<p>Hi</p>".to_string(),
            text_body: "Hi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_api_keyヘッダ付きでbrevo形式のjsonを送る() {
        let (url, captured) = spawn_stub(StatusCode::CREATED, r#"{"messageId":"<1@brevo>"}"#).await;
        let sut =
            BrevoNotificationSender::new(&url, Some(Credential::new("xkeysib-test")), sender())
                .unwrap();

        let receipt = sut.send_email(&make_email()).await.unwrap();

        assert_eq!(receipt.status_code, 201);
        assert_eq!(receipt.detail, r#"{"messageId":"<1@brevo>"}"#);

        let requests = captured.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (api_key, payload) = &requests[0];
        assert_eq!(api_key.as_deref(), Some("xkeysib-test"));
        assert_eq!(
            payload,
            &json!({
                "sender": { "name": "Pixdot Solutions", "email": "noreply@pixdotsolutions.com" },
                "to": [{ "email": "admin@pixdotsolutions.com" }],
                "replyTo": { "email": "jane@example.com" },
                "subject": "New Contact: Jane Doe",
                "htmlContent": "<p>Hi</p>",
                "textContent": "Hi"
            })
        );
    }

    #[tokio::test]
    async fn test_返信先なしではreply_toを送らない() {
        let (url, captured) = spawn_stub(StatusCode::CREATED, "{}").await;
        let sut =
            BrevoNotificationSender::new(&url, Some(Credential::new("xkeysib-test")), sender())
                .unwrap();
        let mut email = make_email();
        email.reply_to = None;

        sut.send_email(&email).await.unwrap();

        let requests = captured.requests.lock().unwrap();
        assert!(requests[0].1.get("replyTo").is_none());
    }

    #[tokio::test]
    async fn test_解釈できない返信先はreply_toを送らずに送信する() {
        let (url, captured) = spawn_stub(StatusCode::CREATED, "{}").await;
        let sut =
            BrevoNotificationSender::new(&url, Some(Credential::new("xkeysib-test")), sender())
                .unwrap();
        let mut email = make_email();
        email.reply_to = Some("jane doe@example.com".to_string());

        let receipt = sut.send_email(&email).await.unwrap();

        assert_eq!(receipt.status_code, 201);
        let requests = captured.requests.lock().unwrap();
        assert!(requests[0].1.get("replyTo").is_none());
        assert_eq!(requests[0].1["to"], json!([{ "email": "admin@pixdotsolutions.com" }]));
    }

    #[tokio::test]
    async fn test_401は認証エラーになる() {
        let (url, _) = spawn_stub(StatusCode::UNAUTHORIZED, r#"{"code":"unauthorized"}"#).await;
        let sut =
            BrevoNotificationSender::new(&url, Some(Credential::new("wrong")), sender()).unwrap();

        let result = sut.send_email(&make_email()).await;

        assert!(matches!(result, Err(NotificationError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_その他の非2xxは送信エラーにステータスと本文を含める() {
        let (url, _) = spawn_stub(StatusCode::BAD_REQUEST, "sender not verified").await;
        let sut =
            BrevoNotificationSender::new(&url, Some(Credential::new("xkeysib-test")), sender())
                .unwrap();

        let result = sut.send_email(&make_email()).await;

        assert_eq!(
            result,
            Err(NotificationError::Transport(
                "status 400: sender not verified".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_本文を読み切れなくても理由を送信エラーに残す() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Content-Length より短い本文で接続を切るサーバー
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 100\r\n\r\npartial")
                .await
                .unwrap();
            // 書き込み側だけ閉じ、クライアントが切断するまで読み捨てる
            socket.shutdown().await.unwrap();
            while matches!(socket.read(&mut buf).await, Ok(n) if n > 0) {}
        });
        let sut = BrevoNotificationSender::new(
            &format!("http://{addr}/v3/smtp/email"),
            Some(Credential::new("xkeysib-test")),
            sender(),
        )
        .unwrap();

        let result = sut.send_email(&make_email()).await;

        let Err(NotificationError::Transport(detail)) = result else {
            panic!("送信エラーになること");
        };
        assert!(detail.starts_with("status 502: <body unreadable: "));
    }

    #[tokio::test]
    async fn test_api_key未設定なら通信せずに認証エラーを返す() {
        let (url, captured) = spawn_stub(StatusCode::CREATED, "{}").await;
        let sut = BrevoNotificationSender::new(&url, None, sender()).unwrap();

        let result = sut.send_email(&make_email()).await;

        assert!(matches!(result, Err(NotificationError::Authentication(_))));
        assert!(captured.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_接続できない場合は送信エラーになる() {
        // ポート 9 (discard) は通常リッスンされていない
        let sut = BrevoNotificationSender::new(
            "http://127.0.0.1:9/v3/smtp/email",
            Some(Credential::new("xkeysib-test")),
            sender(),
        )
        .unwrap();

        let result = sut.send_email(&make_email()).await;

        assert!(matches!(result, Err(NotificationError::Transport(_))));
    }
}
