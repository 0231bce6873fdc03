//! # ユースケース層
//!
//! ハンドラから呼ばれるビジネスロジックを実装する。
//!
//! - `contact`: お問い合わせの受付（検証 → 通知 → 結果判定）
//! - `notification`: メール本文の生成と送信

pub mod contact;
pub mod notification;

pub use contact::{ContactUseCase, DeliveryReport, RecipientStatus};
pub use notification::{DispatchSettings, NotificationDispatcher, TemplateRenderer};
