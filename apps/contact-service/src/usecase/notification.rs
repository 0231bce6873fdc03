//! # 通知ユースケース
//!
//! お問い合わせ1件につき、管理者通知と受付確認の2通を生成・送信する。

mod dispatcher;
mod template_renderer;

pub use dispatcher::NotificationDispatcher;
pub use template_renderer::TemplateRenderer;

/// メール生成と宛先決定に使う設定
///
/// 起動時に環境変数から1回だけ組み立て、以降は読み取り専用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    /// 管理者の受信アドレス
    pub admin_address:  String,
    /// 件名・署名に使う会社名
    pub company_name:   String,
    /// 受付確認メールに載せる電話番号
    pub support_phones: Vec<String>,
    /// 受付確認メールに載せる問い合わせ先アドレス
    pub support_email:  String,
}
