//! # Contact Service 設定
//!
//! 環境変数から Contact Service の設定を読み込む。
//!
//! ## 設計方針
//!
//! - **起動時に1回だけ読む**: 読み込んだ設定は不変の値としてユースケースに渡す
//! - **認証情報の欠落は起動エラーにしない**: 送信時に認証エラーとして表面化させる
//! - **不正な値は起動エラー**: ポート番号の形式不正と未知のバックエンド名
//!
//! ## 環境変数
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `CONTACT_HOST` | `0.0.0.0` | バインドアドレス |
//! | `PORT` | `5000` | ポート番号 |
//! | `MAIL_BACKEND` | `smtp` | `smtp` / `brevo` / `noop` |
//! | `EMAIL_USER` | `noreply@pixdotsolutions.com` | 送信元アドレス（SMTP ユーザー名） |
//! | `EMAIL_PASS` | なし | SMTP パスワード（空白は除去） |
//! | `BREVO_API_KEY` | なし | Brevo API キー |
//! | `RECEIVER_EMAIL` | 送信元アドレス | 管理者の受信アドレス |
//! | `SMTP_HOST` | `smtp.gmail.com` | SMTP リレー |
//! | `SMTP_PORT` | `587` | SMTP ポート |
//! | `BREVO_API_URL` | Brevo の送信エンドポイント | API URL |
//! | `MAIL_SENDER_NAME` | `Pixdot Solutions` | 送信元の表示名 |
//! | `SUPPORT_PHONES` | `+91-87789 96278,+91-87789 64644` | 受付確認メールに載せる電話番号（カンマ区切り） |
//! | `SUPPORT_EMAIL` | `info@pixdotsolutions.com` | 受付確認メールに載せる問い合わせ先 |

use std::env;

use pixdot_domain::credential::Credential;
use pixdot_infra::notification::{DEFAULT_BREVO_API_URL, SenderIdentity};
use serde::Serialize;
use thiserror::Error;

use crate::usecase::DispatchSettings;

const DEFAULT_SENDER_ADDRESS: &str = "noreply@pixdotsolutions.com";
const DEFAULT_SENDER_NAME: &str = "Pixdot Solutions";
const DEFAULT_SUPPORT_PHONES: &str = "+91-87789 96278,+91-87789 64644";
const DEFAULT_SUPPORT_EMAIL: &str = "info@pixdotsolutions.com";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// ポート番号として解釈できない
    #[error("{name} は有効なポート番号である必要があります: {value:?}")]
    InvalidPort { name: &'static str, value: String },

    /// 未知のメール送信バックエンド
    #[error("MAIL_BACKEND が不正です（smtp / brevo / noop のいずれか）: {0:?}")]
    UnknownBackend(String),
}

/// メール送信バックエンド
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MailBackend {
    Smtp,
    Brevo,
    Noop,
}

/// メール送信の設定
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub backend:        MailBackend,
    /// 送信元（アドレスは SMTP ユーザー名を兼ねる）
    pub sender:         SenderIdentity,
    /// 管理者の受信アドレス
    pub admin_address:  String,
    pub smtp_host:      String,
    pub smtp_port:      u16,
    pub smtp_password:  Option<Credential>,
    pub brevo_api_url:  String,
    pub brevo_api_key:  Option<Credential>,
    pub support_phones: Vec<String>,
    pub support_email:  String,
}

impl MailConfig {
    /// 選択中のバックエンドに必要な認証情報が設定されているか
    ///
    /// Noop は認証不要なので常に `true`。
    pub fn credentials_configured(&self) -> bool {
        match self.backend {
            MailBackend::Smtp => self.smtp_password.is_some(),
            MailBackend::Brevo => self.brevo_api_key.is_some(),
            MailBackend::Noop => true,
        }
    }

    /// メール本文の生成と宛先決定に使う設定
    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            admin_address:  self.admin_address.clone(),
            company_name:   self.sender.name.clone(),
            support_phones: self.support_phones.clone(),
            support_email:  self.support_email.clone(),
        }
    }
}

/// Contact Service サーバーの設定
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    pub mail: MailConfig,
}

impl ContactConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let backend = match get("MAIL_BACKEND") {
            Some(value) => value
                .trim()
                .to_lowercase()
                .parse()
                .map_err(|_| ConfigError::UnknownBackend(value))?,
            None => MailBackend::Smtp,
        };

        let sender_address = get("EMAIL_USER").unwrap_or_else(|| DEFAULT_SENDER_ADDRESS.to_string());
        let admin_address = get("RECEIVER_EMAIL").unwrap_or_else(|| sender_address.clone());

        let support_phones = get("SUPPORT_PHONES")
            .unwrap_or_else(|| DEFAULT_SUPPORT_PHONES.to_string())
            .split(',')
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
            .map(str::to_string)
            .collect();

        let mail = MailConfig {
            backend,
            sender: SenderIdentity::new(
                get("MAIL_SENDER_NAME").unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
                sender_address,
            ),
            admin_address,
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            smtp_port: parse_port("SMTP_PORT", get("SMTP_PORT"), 587)?,
            smtp_password: get("EMAIL_PASS")
                .as_deref()
                .and_then(Credential::without_whitespace),
            brevo_api_url: get("BREVO_API_URL")
                .unwrap_or_else(|| DEFAULT_BREVO_API_URL.to_string()),
            brevo_api_key: get("BREVO_API_KEY").map(|key| Credential::new(key.trim())),
            support_phones,
            support_email: get("SUPPORT_EMAIL")
                .unwrap_or_else(|| DEFAULT_SUPPORT_EMAIL.to_string()),
        };

        Ok(Self {
            host: get("CONTACT_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_port("PORT", get("PORT"), 5000)?,
            mail,
        })
    }
}

fn parse_port(name: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ContactConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ContactConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[rstest]
    fn test_未設定ならデフォルト値を使う() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.mail.backend, MailBackend::Smtp);
        assert_eq!(
            config.mail.sender,
            SenderIdentity::new("Pixdot Solutions", "noreply@pixdotsolutions.com")
        );
        assert_eq!(config.mail.admin_address, "noreply@pixdotsolutions.com");
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.mail.brevo_api_url, "https://api.brevo.com/v3/smtp/email");
        assert_eq!(
            config.mail.support_phones,
            vec!["+91-87789 96278", "+91-87789 64644"]
        );
        assert_eq!(config.mail.support_email, "info@pixdotsolutions.com");
    }

    #[rstest]
    fn test_認証情報が未設定でも読み込みは成功する() {
        let config = load(&[]).unwrap();

        assert!(config.mail.smtp_password.is_none());
        assert!(config.mail.brevo_api_key.is_none());
        assert!(!config.mail.credentials_configured());
    }

    #[rstest]
    fn test_受信アドレス未設定なら送信元アドレスを使う() {
        let config = load(&[("EMAIL_USER", "contact@example.com")]).unwrap();
        assert_eq!(config.mail.admin_address, "contact@example.com");

        let config = load(&[
            ("EMAIL_USER", "contact@example.com"),
            ("RECEIVER_EMAIL", "owner@example.com"),
        ])
        .unwrap();
        assert_eq!(config.mail.admin_address, "owner@example.com");
    }

    #[rstest]
    fn test_アプリパスワードの空白を除去する() {
        let config = load(&[("EMAIL_PASS", "abcd efgh ijkl mnop")]).unwrap();

        assert_eq!(
            config.mail.smtp_password.unwrap().as_str(),
            "abcdefghijklmnop"
        );
    }

    #[rstest]
    #[case("smtp", MailBackend::Smtp)]
    #[case("brevo", MailBackend::Brevo)]
    #[case("noop", MailBackend::Noop)]
    #[case(" Brevo ", MailBackend::Brevo)]
    fn test_バックエンドを読み込む(#[case] value: &str, #[case] expected: MailBackend) {
        let config = load(&[("MAIL_BACKEND", value)]).unwrap();
        assert_eq!(config.mail.backend, expected);
    }

    #[rstest]
    fn test_未知のバックエンドは起動エラー() {
        assert_eq!(
            load(&[("MAIL_BACKEND", "sendgrid")]).unwrap_err(),
            ConfigError::UnknownBackend("sendgrid".to_string())
        );
    }

    #[rstest]
    #[case("PORT")]
    #[case("SMTP_PORT")]
    fn test_不正なポート番号は起動エラー(#[case] name: &'static str) {
        assert_eq!(
            load(&[(name, "abc")]).unwrap_err(),
            ConfigError::InvalidPort {
                name,
                value: "abc".to_string()
            }
        );
    }

    #[rstest]
    fn test_ポート番号を上書きできる() {
        let config = load(&[("PORT", "8080"), ("SMTP_PORT", "465")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.mail.smtp_port, 465);
    }

    #[rstest]
    #[case(MailBackend::Smtp, &[("EMAIL_PASS", "secret")], true)]
    #[case(MailBackend::Smtp, &[("BREVO_API_KEY", "xkeysib")], false)]
    #[case(MailBackend::Brevo, &[("BREVO_API_KEY", "xkeysib")], true)]
    #[case(MailBackend::Brevo, &[("EMAIL_PASS", "secret")], false)]
    #[case(MailBackend::Noop, &[], true)]
    fn test_選択中のバックエンドの認証情報で判定する(
        #[case] backend: MailBackend,
        #[case] vars: &[(&str, &str)],
        #[case] expected: bool,
    ) {
        let backend_name = backend.to_string();
        let mut all = vec![("MAIL_BACKEND", backend_name.as_str())];
        all.extend_from_slice(vars);

        assert_eq!(load(&all).unwrap().mail.credentials_configured(), expected);
    }

    #[rstest]
    fn test_空文字は未設定として扱う() {
        let config = load(&[("EMAIL_PASS", ""), ("PORT", "  ")]).unwrap();

        assert!(config.mail.smtp_password.is_none());
        assert_eq!(config.port, 5000);
    }

    #[rstest]
    fn test_認証情報はdebug出力に含まれない() {
        let config = load(&[("EMAIL_PASS", "supersecret")]).unwrap();
        assert!(!format!("{config:?}").contains("supersecret"));
    }
}
