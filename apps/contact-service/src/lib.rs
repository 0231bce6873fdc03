//! # Contact Service ライブラリ
//!
//! Web サイトのお問い合わせフォームを受け付け、管理者への通知と
//! 送信者への受付確認をメールで送る API サーバーのコアモジュール。
//!
//! ## 処理の流れ
//!
//! ```text
//! POST /api/contact → 入力検証 → 管理者通知の送信 → 受付確認の送信 → レスポンス
//! ```
//!
//! ## モジュール構成
//!
//! - `app_builder`: DI とルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラーと HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `usecase`: お問い合わせ受付と通知送信

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
