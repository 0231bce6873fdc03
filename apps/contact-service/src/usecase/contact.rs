//! # お問い合わせユースケース
//!
//! 入力検証 → 通知送信 → 結果判定の流れを統合する。
//!
//! ## HTTP ステータスの判定
//!
//! | 管理者通知 | 受付確認 | 結果 |
//! |-----------|---------|------|
//! | 成功 | 成功 | 成功 |
//! | 成功 | 失敗 | 成功（内訳で受付確認の失敗を返す） |
//! | 失敗 | 問わない | [`ContactError::Delivery`] |
//!
//! 管理者に届いていればお問い合わせは受け付けたものとみなす。

use pixdot_domain::{
    contact,
    notification::{DispatchOutcome, DispatchResult},
};
use pixdot_shared::{event_log::event, log_business_event};
use serde::Serialize;
use serde_json::Value;

use super::NotificationDispatcher;
use crate::error::ContactError;

/// 1通分の送信状況（レスポンス用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientStatus {
    pub delivered:   bool,
    /// トランスポートの応答コード（失敗時は `None`）
    pub status_code: Option<u16>,
    /// 成功時はトランスポートの応答、失敗時はクライアントに返してよい説明
    pub detail:      String,
}

impl From<&DispatchResult> for RecipientStatus {
    fn from(result: &DispatchResult) -> Self {
        match result {
            DispatchResult::Sent(receipt) => Self {
                delivered:   true,
                status_code: Some(receipt.status_code),
                detail:      receipt.detail.clone(),
            },
            DispatchResult::Failed(e) => Self {
                delivered:   false,
                status_code: None,
                detail:      e.public_detail(),
            },
        }
    }
}

/// 送信結果の内訳
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub admin_status: RecipientStatus,
    pub user_status:  RecipientStatus,
}

impl DeliveryReport {
    fn new(admin: &DispatchResult, submitter: &DispatchResult) -> Self {
        Self {
            admin_status: admin.into(),
            user_status:  submitter.into(),
        }
    }

    /// 受付確認まで届いたか
    pub fn fully_delivered(&self) -> bool {
        self.admin_status.delivered && self.user_status.delivered
    }
}

/// お問い合わせユースケース
pub struct ContactUseCase {
    dispatcher: NotificationDispatcher,
}

impl ContactUseCase {
    pub fn new(dispatcher: NotificationDispatcher) -> Self {
        Self { dispatcher }
    }

    /// お問い合わせを受け付ける
    ///
    /// 検証に失敗した場合は送信を一切行わずにエラーを返す。
    pub async fn submit(&self, raw: Option<&Value>) -> Result<DeliveryReport, ContactError> {
        let submission = match contact::validate(raw) {
            Ok(submission) => submission,
            Err(e) => {
                log_business_event!(
                    event.category = event::category::CONTACT,
                    event.action = event::action::SUBMISSION_REJECTED,
                    event.result = event::result::FAILURE,
                    contact.reason = %e,
                    "お問い合わせを拒否"
                );
                return Err(e.into());
            }
        };

        let (admin, submitter) = match self.dispatcher.dispatch(&submission).await {
            DispatchOutcome::Completed { admin, submitter } => (admin, submitter),
            DispatchOutcome::RenderFailed(e) => {
                return Err(ContactError::Unexpected(e.to_string()));
            }
        };

        let report = DeliveryReport::new(&admin, &submitter);

        if let DispatchResult::Failed(cause) = admin {
            return Err(ContactError::Delivery { cause, report });
        }

        log_business_event!(
            event.category = event::category::CONTACT,
            event.action = event::action::SUBMISSION_ACCEPTED,
            event.result = event::result::SUCCESS,
            contact.acknowledged = submitter.is_sent(),
            "お問い合わせを受付"
        );

        Ok(report)
    }
}
