//! # 送信用認証情報
//!
//! SMTP パスワードやメール配信 API キーをラップする値オブジェクト。
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`Credential`] | 認証情報 | メールトランスポートへの認証 |

/// 認証情報
///
/// # セキュリティ
///
/// Debug 出力では値をマスクする。
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}

impl Credential {
    /// 認証情報を作成する
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 空白をすべて除去して作成する
    ///
    /// Gmail のアプリパスワードは `abcd efgh ijkl mnop` のように4文字区切りで表示され、
    /// そのまま貼り付けられることが多い。空白除去後に空になる場合は `None`。
    pub fn without_whitespace(value: &str) -> Option<Self> {
        let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        (!compact.is_empty()).then_some(Self(compact))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
