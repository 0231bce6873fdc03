//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンでお問い合わせメールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **HTML のみエスケープ**: tera の autoescape は `.html` テンプレートにだけ効く。
//!   plaintext 版は入力をそのまま載せる
//! - **件名パターン**: 管理者通知は `New Contact: {名} {姓}`、
//!   受付確認は `Thank you for contacting {会社名}`

use pixdot_domain::{
    contact::ContactSubmission,
    notification::{EmailMessage, NotificationError},
};
use tera::{Context, Tera};

use super::DispatchSettings;

const ADMIN_NOTIFICATION: &str = "admin_notification";
const ACKNOWLEDGMENT: &str = "acknowledgment";

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`ContactSubmission` から
/// 管理者通知と受付確認の `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "admin_notification.html",
                    include_str!("../../../templates/notifications/admin_notification.html"),
                ),
                (
                    "admin_notification.txt",
                    include_str!("../../../templates/notifications/admin_notification.txt"),
                ),
                (
                    "acknowledgment.html",
                    include_str!("../../../templates/notifications/acknowledgment.html"),
                ),
                (
                    "acknowledgment.txt",
                    include_str!("../../../templates/notifications/acknowledgment.txt"),
                ),
            ])
            .map_err(|e| NotificationError::Template(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 管理者宛ての通知メールを生成する
    ///
    /// 返信先には送信者のアドレスを設定し、受信箱からそのまま返信できるようにする。
    pub fn render_admin_notification(
        &self,
        submission: &ContactSubmission,
        settings: &DispatchSettings,
    ) -> Result<EmailMessage, NotificationError> {
        let mut context = Context::new();
        context.insert("full_name", &submission.full_name());
        context.insert("email", submission.email());
        context.insert("phone", submission.phone());
        context.insert("company", submission.company());
        context.insert("subject", submission.subject());
        context.insert("message", submission.message());

        let (html_body, text_body) = self.render_pair(ADMIN_NOTIFICATION, &context)?;

        Ok(EmailMessage {
            to: settings.admin_address.clone(),
            reply_to: Some(submission.email().to_string()),
            subject: format!(
                "New Contact: {} {}",
                submission.first_name(),
                submission.last_name()
            ),
            html_body,
            text_body,
        })
    }

    /// 送信者宛ての受付確認メールを生成する
    pub fn render_acknowledgment(
        &self,
        submission: &ContactSubmission,
        settings: &DispatchSettings,
    ) -> Result<EmailMessage, NotificationError> {
        let mut context = Context::new();
        context.insert("first_name", submission.first_name());
        context.insert("message", submission.message());
        context.insert("company_name", &settings.company_name);
        context.insert("support_phones", &settings.support_phones);
        context.insert("support_email", &settings.support_email);

        let (html_body, text_body) = self.render_pair(ACKNOWLEDGMENT, &context)?;

        Ok(EmailMessage {
            to: submission.email().to_string(),
            reply_to: None,
            subject: format!("Thank you for contacting {}", settings.company_name),
            html_body,
            text_body,
        })
    }

    /// HTML 版と plaintext 版をまとめてレンダリングする
    fn render_pair(
        &self,
        template_name: &str,
        context: &Context,
    ) -> Result<(String, String), NotificationError> {
        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), context)
            .map_err(|e| NotificationError::Template(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), context)
            .map_err(|e| NotificationError::Template(e.to_string()))?;

        Ok((html_body, text_body))
    }
}
