//! # お問い合わせ
//!
//! Web サイトのお問い合わせフォームから届く内容と、その検証を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`ContactSubmission`] | お問い合わせ | 検証済みのフォーム入力 |
//! | [`RequiredField`] | 必須項目 | 検証順に並んだ必須入力項目 |
//!
//! ## 検証ルール
//!
//! - ボディは JSON オブジェクトであること
//! - 必須項目は `firstName → lastName → email → subject → message` の順に確認し、
//!   最初に見つかった欠落を返す
//! - メールアドレスは「`@` がちょうど1つ」かつ「最後の `@` 以降に `.` を含む」だけを確認する。
//!   RFC 準拠の検証は行わない（フォームの入力ミスを弾ければ十分）
//! - 任意項目（`phone`, `company`）は未入力なら `"N/A"` になる

use serde_json::{Map, Value};
use strum::IntoStaticStr;

use crate::ValidationError;

/// 任意項目が未入力のときの値
pub const NOT_PROVIDED: &str = "N/A";

/// 必須項目
///
/// 宣言順がそのまま検証順になる。`Display` は JSON のキー名（camelCase）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum RequiredField {
    FirstName,
    LastName,
    Email,
    Subject,
    Message,
}

impl RequiredField {
    /// 検証順に並べた全必須項目
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Subject,
        Self::Message,
    ];

    /// JSON のキー名
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// お問い合わせ（検証済み）
///
/// [`validate`] を通してのみ生成される。生成後は変更できない。
/// 必須項目は前後の空白を除去済み、任意項目は未入力なら [`NOT_PROVIDED`]。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    first_name: String,
    last_name:  String,
    email:      String,
    subject:    String,
    message:    String,
    phone:      String,
    company:    String,
}

impl ContactSubmission {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// 「名 姓」形式の氏名
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn company(&self) -> &str {
        &self.company
    }
}

/// 生の JSON からお問い合わせを検証・生成する
///
/// # エラー
///
/// - `raw` が `None` またはオブジェクト以外: [`ValidationError::MissingBody`]
/// - 必須項目の欠落: [`ValidationError::MissingField`]（検証順で最初のもの）
/// - メールアドレスの形式不正: [`ValidationError::InvalidEmail`]
pub fn validate(raw: Option<&Value>) -> Result<ContactSubmission, ValidationError> {
    let Some(Value::Object(fields)) = raw else {
        return Err(ValidationError::MissingBody);
    };

    // RequiredField::ALL と同じ順序で確認する
    let first_name = required_text(fields, RequiredField::FirstName)?;
    let last_name = required_text(fields, RequiredField::LastName)?;
    let email = required_text(fields, RequiredField::Email)?;
    let subject = required_text(fields, RequiredField::Subject)?;
    let message = required_text(fields, RequiredField::Message)?;

    if !is_plausible_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(ContactSubmission {
        first_name,
        last_name,
        email,
        subject,
        message,
        phone: optional_text(fields, "phone"),
        company: optional_text(fields, "company"),
    })
}

/// メールアドレスの最低限の形式チェック
///
/// `@` がちょうど1つで、最後の `@` 以降に `.` を含むこと。
pub fn is_plausible_email(value: &str) -> bool {
    if value.matches('@').count() != 1 {
        return false;
    }
    value
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'))
}

/// 文字列または数値を空白除去済みのテキストとして取り出す
///
/// 空文字・空白のみ・その他の型は `None`。
fn text_value(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn required_text(fields: &Map<String, Value>, field: RequiredField) -> Result<String, ValidationError> {
    text_value(fields.get(field.key())).ok_or(ValidationError::MissingField(field))
}

fn optional_text(fields: &Map<String, Value>, key: &str) -> String {
    text_value(fields.get(key)).unwrap_or_else(|| NOT_PROVIDED.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn valid_body() -> Value {
        json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "subject": "Pricing",
            "message": "Hi"
        })
    }

    fn body_without(key: &str) -> Value {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove(key);
        body
    }

    fn body_with(key: &str, value: Value) -> Value {
        let mut body = valid_body();
        body.as_object_mut().unwrap().insert(key.to_string(), value);
        body
    }

    #[rstest]
    fn test_有効な入力から任意項目をデフォルト値で補完する() {
        let submission = validate(Some(&valid_body())).unwrap();

        assert_eq!(submission.first_name(), "Jane");
        assert_eq!(submission.last_name(), "Doe");
        assert_eq!(submission.full_name(), "Jane Doe");
        assert_eq!(submission.email(), "jane@example.com");
        assert_eq!(submission.subject(), "Pricing");
        assert_eq!(submission.message(), "Hi");
        assert_eq!(submission.phone(), "N/A");
        assert_eq!(submission.company(), "N/A");
    }

    #[rstest]
    fn test_任意項目が指定されていればその値を使う() {
        let mut body = valid_body();
        let fields = body.as_object_mut().unwrap();
        fields.insert("phone".to_string(), json!("+91-1234567890"));
        fields.insert("company".to_string(), json!("Test Company"));

        let submission = validate(Some(&body)).unwrap();

        assert_eq!(submission.phone(), "+91-1234567890");
        assert_eq!(submission.company(), "Test Company");
    }

    #[rstest]
    fn test_数値の電話番号は文字列として扱う() {
        let submission = validate(Some(&body_with("phone", json!(1234567890)))).unwrap();
        assert_eq!(submission.phone(), "1234567890");
    }

    #[rstest]
    #[case(json!(""))]
    #[case(json!("   "))]
    #[case(Value::Null)]
    fn test_空の任意項目はデフォルト値になる(#[case] company: Value) {
        let submission = validate(Some(&body_with("company", company))).unwrap();
        assert_eq!(submission.company(), NOT_PROVIDED);
    }

    #[rstest]
    fn test_必須項目の前後の空白を除去する() {
        let body = json!({
            "firstName": "  Jane ",
            "lastName": "\tDoe",
            "email": " jane@example.com ",
            "subject": "Pricing\n",
            "message": "  Hi  "
        });

        let submission = validate(Some(&body)).unwrap();

        assert_eq!(submission.full_name(), "Jane Doe");
        assert_eq!(submission.email(), "jane@example.com");
        assert_eq!(submission.subject(), "Pricing");
        assert_eq!(submission.message(), "Hi");
    }

    #[rstest]
    fn test_ボディなしはmissing_bodyを返す() {
        assert_eq!(validate(None), Err(ValidationError::MissingBody));
    }

    #[rstest]
    #[case(json!([]))]
    #[case(json!("firstName"))]
    #[case(json!(42))]
    #[case(Value::Null)]
    fn test_オブジェクト以外はmissing_bodyを返す(#[case] raw: Value) {
        assert_eq!(validate(Some(&raw)), Err(ValidationError::MissingBody));
    }

    #[rstest]
    fn test_空オブジェクトは最初の必須項目firstnameを返す() {
        assert_eq!(
            validate(Some(&json!({}))),
            Err(ValidationError::MissingField(RequiredField::FirstName))
        );
    }

    #[rstest]
    #[case("firstName", RequiredField::FirstName)]
    #[case("lastName", RequiredField::LastName)]
    #[case("email", RequiredField::Email)]
    #[case("subject", RequiredField::Subject)]
    #[case("message", RequiredField::Message)]
    fn test_欠落した必須項目を返す(#[case] key: &str, #[case] expected: RequiredField) {
        assert_eq!(
            validate(Some(&body_without(key))),
            Err(ValidationError::MissingField(expected))
        );
    }

    #[rstest]
    #[case(json!(""))]
    #[case(json!("   "))]
    #[case(Value::Null)]
    #[case(json!(true))]
    #[case(json!({"text": "Hi"}))]
    fn test_空白のみや文字列以外の必須項目は欠落扱い(#[case] value: Value) {
        assert_eq!(
            validate(Some(&body_with("subject", value))),
            Err(ValidationError::MissingField(RequiredField::Subject))
        );
    }

    #[rstest]
    fn test_複数欠落時は検証順で最初の項目を返す() {
        let body = json!({ "firstName": "Jane", "subject": "Pricing" });
        assert_eq!(
            validate(Some(&body)),
            Err(ValidationError::MissingField(RequiredField::LastName))
        );
    }

    #[rstest]
    fn test_メールアドレス検証より必須項目の欠落を優先する() {
        let body = json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "not-an-email",
            "subject": "Pricing"
        });
        assert_eq!(
            validate(Some(&body)),
            Err(ValidationError::MissingField(RequiredField::Message))
        );
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("jane@")]
    #[case("jane@example")]
    #[case("jane@@example.com")]
    #[case("jane@doe@example.com")]
    #[case("jane.doe.example.com")]
    fn test_不正なメールアドレスはinvalid_emailを返す(#[case] email: &str) {
        assert_eq!(
            validate(Some(&body_with("email", json!(email)))),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[rstest]
    #[case("jane@example.com")]
    #[case("jane.doe+form@mail.example.co.in")]
    #[case("@example.com")]
    #[case("jane@.")]
    fn test_粗い形式チェックを通るメールアドレス(#[case] email: &str) {
        assert!(is_plausible_email(email), "{email} は通ること");
    }

    #[rstest]
    fn test_required_fieldのキー名はcamel_case() {
        let keys: Vec<_> = RequiredField::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(
            keys,
            vec!["firstName", "lastName", "email", "subject", "message"]
        );
        assert_eq!(RequiredField::FirstName.to_string(), "firstName");
    }
}
