//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: 稼働確認（`/`, `/health`）
//! - `contact`: お問い合わせ受付（`POST /api/contact`）

pub mod contact;
pub mod health;

pub use contact::{ContactState, submit_contact};
pub use health::{HealthState, health_check, liveness};
