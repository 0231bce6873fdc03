//! # 通知
//!
//! お問い合わせ受付時に送るメールと、その送信結果を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`EmailMessage`] | メールメッセージ | テンプレートレンダリングの出力 |
//! | [`RecipientRole`] | 受信者の役割 | 管理者通知 / 受付確認 |
//! | [`DeliveryReceipt`] | 配信受領 | トランスポートが返した成功応答 |
//! | [`DispatchResult`] | 送信結果 | 1通ごとの成功・失敗 |
//! | [`DispatchOutcome`] | 送信結果一式 | 1件のお問い合わせに対する2通分の結果 |
//!
//! ## 設計方針
//!
//! - **1通ごとに独立**: 管理者宛ての失敗が受付確認メールの送信を妨げない
//! - **失敗は値で表現**: 送信失敗は [`DispatchResult::Failed`] として集約し、
//!   HTTP ステータスの判断は呼び出し側に任せる
//! - **認証情報を漏らさない**: [`NotificationError::public_detail`] はクライアントに
//!   返してよい文言のみを返す

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// 認証情報の欠落・拒否
    #[error("メール送信の認証に失敗: {0}")]
    Authentication(String),

    /// 接続失敗、タイムアウト、リレーや API の拒否など
    #[error("メール送信に失敗: {0}")]
    Transport(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    Template(String),
}

impl NotificationError {
    /// ログ用のエラー種別
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "mail_authentication",
            Self::Transport(_) => "mail_transport",
            Self::Template(_) => "template",
        }
    }

    /// クライアントに返してよい英語の説明
    ///
    /// 認証失敗の詳細はトランスポートの応答に資格情報の断片が含まれうるため返さない。
    pub fn public_detail(&self) -> String {
        match self {
            Self::Authentication(_) => {
                "Email authentication failed. Please check the mail credentials.".to_string()
            }
            Self::Transport(detail) => format!("Failed to send email: {detail}"),
            Self::Template(_) => "Failed to prepare email".to_string(),
        }
    }
}

/// 受信者の役割
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecipientRole {
    /// サイト管理者（お問い合わせ内容の通知）
    Admin,
    /// お問い合わせの送信者（受付確認）
    Submitter,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 返信先（管理者通知では送信者のアドレス）
    pub reply_to:  Option<String>,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// 配信受領
///
/// トランスポートが返した成功応答。SMTP ならリプライコード、API なら HTTP ステータス。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub status_code: u16,
    pub detail:      String,
}

impl DeliveryReceipt {
    pub fn new(status_code: u16, detail: impl Into<String>) -> Self {
        Self {
            status_code,
            detail: detail.into(),
        }
    }
}

/// 1通分の送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Sent(DeliveryReceipt),
    Failed(NotificationError),
}

impl DispatchResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    /// 失敗時のエラー
    pub fn error(&self) -> Option<&NotificationError> {
        match self {
            Self::Sent(_) => None,
            Self::Failed(e) => Some(e),
        }
    }
}

impl From<Result<DeliveryReceipt, NotificationError>> for DispatchResult {
    fn from(result: Result<DeliveryReceipt, NotificationError>) -> Self {
        match result {
            Ok(receipt) => Self::Sent(receipt),
            Err(e) => Self::Failed(e),
        }
    }
}

/// 1件のお問い合わせに対する送信結果一式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// 2通とも送信を試みた（個々の成否は問わない）
    Completed {
        admin:     DispatchResult,
        submitter: DispatchResult,
    },
    /// メール本文の生成に失敗し、1通も送信していない
    RenderFailed(NotificationError),
}
