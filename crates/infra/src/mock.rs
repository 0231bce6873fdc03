//! # テスト用モック送信
//!
//! ユースケーステストや API テストで使用するインメモリのメール送信。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! pixdot-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use pixdot_domain::notification::{DeliveryReceipt, EmailMessage, NotificationError};

use crate::notification::NotificationSender;

// ===== MockNotificationSender =====

/// 送信を試みたメールをすべて記録するモック
///
/// 宛先アドレスごとに失敗を仕込める。仕込んでいない宛先は `202` で成功する。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    attempts: Arc<Mutex<Vec<EmailMessage>>>,
    failures: Arc<Mutex<HashMap<String, NotificationError>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した宛先への送信を失敗させる
    pub fn fail_for(&self, to: impl Into<String>, error: NotificationError) {
        self.failures.lock().unwrap().insert(to.into(), error);
    }

    /// 送信を試みたメール（失敗したものを含む、試行順）
    pub fn attempts(&self) -> Vec<EmailMessage> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, NotificationError> {
        self.attempts.lock().unwrap().push(email.clone());

        match self.failures.lock().unwrap().get(&email.to) {
            Some(error) => Err(error.clone()),
            None => Ok(DeliveryReceipt::new(202, "accepted")),
        }
    }
}
