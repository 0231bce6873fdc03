//! # ドメイン層エラー定義
//!
//! お問い合わせ内容の検証で発生するエラー型。
//!
//! ## 設計方針
//!
//! - **閉じた列挙型**: 呼び出し側はメッセージ文字列ではなくバリアントで分岐する
//! - **thiserror 活用**: `#[error(...)]` がそのままクライアント向けの理由文になる
//! - **送信前に検出**: 検証エラーが返った時点でメール送信は一切行われていない
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `MissingBody` | 400 Bad Request | ボディなし・空・オブジェクト以外 |
//! | `MissingField` | 400 Bad Request | 必須項目の欠落（項目名を含む） |
//! | `InvalidEmail` | 400 Bad Request | メールアドレスの形式不正 |

use thiserror::Error;

use crate::contact::RequiredField;

/// お問い合わせ内容の検証エラー
///
/// `Display` はクライアントにそのまま返す英語の理由文。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// ボディがない、空、または JSON オブジェクトではない
    #[error("No JSON body received")]
    MissingBody,

    /// 必須項目が未入力（欠落、空文字、空白のみ）
    #[error("{0} is required")]
    MissingField(RequiredField),

    /// メールアドレスの形式が不正
    #[error("Invalid email format")]
    InvalidEmail,
}

impl ValidationError {
    /// 欠落している項目名を返す（`MissingField` 以外は `None`）
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) => Some(field.into()),
            Self::MissingBody | Self::InvalidEmail => None,
        }
    }
}
