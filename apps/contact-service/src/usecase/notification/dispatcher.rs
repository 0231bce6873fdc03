//! # 通知ディスパッチャー
//!
//! テンプレートレンダリング → 管理者通知の送信 → 受付確認の送信を統合する。
//!
//! ## 設計方針
//!
//! - **先にすべてレンダリング**: 2通とも生成できてから送信を始める。
//!   生成に失敗した場合は1通も送らない
//! - **逐次送信**: 管理者通知を必ず先に送り、その後に受付確認を送る
//! - **1通ごとに独立**: 管理者通知の失敗は受付確認の送信を妨げない
//! - **再送しない**: 失敗は結果として返し、自動で再試行はしない
//! - **依存性注入**: `NotificationSender` は trait で抽象化

use std::sync::Arc;

use pixdot_domain::{
    contact::ContactSubmission,
    notification::{DispatchOutcome, DispatchResult, EmailMessage, RecipientRole},
};
use pixdot_infra::notification::NotificationSender;
use pixdot_shared::{
    event_log::{error, event},
    log_business_event,
};

use super::{DispatchSettings, TemplateRenderer};

/// 通知ディスパッチャー
pub struct NotificationDispatcher {
    sender:            Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    settings:          DispatchSettings,
}

impl NotificationDispatcher {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            sender,
            template_renderer,
            settings,
        }
    }

    /// お問い合わせ1件分の通知を送信する
    ///
    /// 送信の成否はエラーではなく [`DispatchOutcome`] で返す。
    pub async fn dispatch(&self, submission: &ContactSubmission) -> DispatchOutcome {
        let rendered = self
            .template_renderer
            .render_admin_notification(submission, &self.settings)
            .and_then(|admin| {
                self.template_renderer
                    .render_acknowledgment(submission, &self.settings)
                    .map(|submitter| (admin, submitter))
            });

        let (admin_email, submitter_email) = match rendered {
            Ok(emails) => emails,
            Err(e) => {
                tracing::error!(
                    error.category = error::category::CONFIGURATION,
                    error.kind = error::kind::TEMPLATE,
                    error = %e,
                    "通知テンプレートのレンダリングに失敗"
                );
                return DispatchOutcome::RenderFailed(e);
            }
        };

        let admin = self.send(&admin_email, RecipientRole::Admin).await;
        let submitter = self.send(&submitter_email, RecipientRole::Submitter).await;

        DispatchOutcome::Completed { admin, submitter }
    }

    /// 1通を送信し、結果をビジネスイベントとして記録する
    async fn send(&self, email: &EmailMessage, role: RecipientRole) -> DispatchResult {
        let role_str: &str = role.into();

        let result = DispatchResult::from(self.sender.send_email(email).await);

        match &result {
            DispatchResult::Sent(receipt) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.result = event::result::SUCCESS,
                    notification.recipient_role = role_str,
                    notification.status_code = receipt.status_code,
                    "通知メール送信成功"
                );
            }
            DispatchResult::Failed(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.result = event::result::FAILURE,
                    notification.recipient_role = role_str,
                    error.kind = e.kind(),
                    error = %e,
                    "通知メール送信失敗"
                );
            }
        }

        result
    }
}
