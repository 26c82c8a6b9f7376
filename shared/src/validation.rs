use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

/// Minimum accepted strength score for a new password.
pub const MIN_PASSWORD_STRENGTH: u8 = 3;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Inline messages keyed by form field name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message recorded for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First message by field order; used for toast-style forms.
    pub fn first_message(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Login needs both fields before any request goes out.
pub fn validate_login(email: &str, password: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    if email.trim().is_empty() || password.is_empty() {
        errors.add("form", "Please enter both email and password");
    }
    errors.into_result()
}

pub fn validate_forgot_password(email: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    let email = email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Invalid email address");
    }
    errors.into_result()
}

/// Score 0..=5: one point each for length, upper, lower, digit, symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordStrength(pub u8);

impl PasswordStrength {
    pub fn of(password: &str) -> Self {
        if password.is_empty() {
            return PasswordStrength(0);
        }
        let checks = [
            password.chars().count() >= MIN_PASSWORD_LENGTH,
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_lowercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ];
        PasswordStrength(checks.iter().filter(|ok| **ok).count() as u8)
    }

    pub fn score(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "",
            1 => "Weak",
            2 => "Fair",
            3 => "Good",
            _ => "Strong",
        }
    }

    /// CSS modifier for the strength bar.
    pub fn css_class(self) -> &'static str {
        match self.0 {
            0 => "strength-none",
            1 => "strength-weak",
            2 => "strength-fair",
            3 => "strength-good",
            _ => "strength-strong",
        }
    }

    pub fn is_acceptable(self) -> bool {
        self.0 >= MIN_PASSWORD_STRENGTH
    }
}

pub fn validate_reset_password(
    token: Option<&str>,
    password: &str,
    confirm: &str,
) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    if token.map(str::trim).unwrap_or_default().is_empty() {
        errors.add("token", "Reset link is missing or invalid. Request a new one.");
    }

    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add("password", "Password must be at least 8 characters");
    } else if !PasswordStrength::of(password).is_acceptable() {
        errors.add("password", "Password is too weak. Use a stronger password.");
    }

    if confirm.is_empty() {
        errors.add("confirmPassword", "Confirm Password is required");
    } else if confirm != password {
        errors.add("confirmPassword", "Passwords must match");
    }
    errors.into_result()
}

pub fn validate_user_edit(name: &str, email: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    if name.trim().is_empty() {
        errors.add("Name", "Name is required");
    }
    let email = email.trim();
    if email.is_empty() {
        errors.add("Email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("Email", "Invalid email format");
    }
    errors.into_result()
}

pub fn validate_service(name: &str, group: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    if name.trim().is_empty() {
        errors.add("name", "Service name is required");
    }
    if group.trim().is_empty() {
        errors.add("group", "Category is required");
    }
    errors.into_result()
}

/// Returns the parsed amount on success.
pub fn validate_transaction_edit(devotee_name: &str, amount: &str) -> Result<f64, FormErrors> {
    let mut errors = FormErrors::new();
    if devotee_name.trim().is_empty() {
        errors.add("DevoteeName", "Devotee name is required");
    }
    let parsed = amount.trim().trim_start_matches('$').parse::<f64>();
    let amount = match parsed {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        Ok(_) => {
            errors.add("Amount", "Amount cannot be negative");
            None
        }
        Err(_) => {
            errors.add("Amount", "Enter a valid amount");
            None
        }
    };
    match (errors.is_empty(), amount) {
        (true, Some(value)) => Ok(value),
        _ => Err(errors),
    }
}

/// Draft of an outgoing email as typed into the send-mail form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmailDraft {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body_html: String,
}

impl EmailDraft {
    pub fn with_sender(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            ..Self::default()
        }
    }

    pub fn body_text(&self) -> String {
        strip_html(&self.body_html)
    }
}

/// Checks run in the order the form reports them; the first failure is the
/// toast text.
pub fn validate_email_draft(draft: &EmailDraft) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    let to = draft.to.trim();
    let from = draft.from.trim();

    if to.is_empty() || from.is_empty() || draft.subject.trim().is_empty() {
        errors.add("form", "Please fill in all required fields (To, From, Subject)");
    } else if !is_valid_email(to) {
        errors.add("form", "Please enter a valid \"To\" email address");
    } else if !is_valid_email(from) {
        errors.add("form", "Please enter a valid \"From\" email address");
    } else if draft.body_text().trim().is_empty() {
        errors.add("form", "Email body cannot be empty");
    }
    errors.into_result()
}

pub fn validate_media_update(title: &str, url: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    if title.trim().is_empty() {
        errors.add("title", "Title is required");
    }
    let url = url.trim();
    if url.is_empty() {
        errors.add("url", "Media URL is required");
    } else if !(url.starts_with("https://") || url.starts_with("http://")) {
        errors.add("url", "Media URL must start with http:// or https://");
    }
    errors.into_result()
}

/// Plain-text form of an HTML fragment: tags dropped, block ends become
/// line breaks, common entities decoded.
pub fn strip_html(html: &str) -> String {
    let with_breaks = html
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("</p>", "</p>\n");
    let text = TAG_RE.replace_all(&with_breaks, "");
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.trim_end_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("ann@example.org"));
        assert!(is_valid_email("a.b+c@mail.example.co"));
        assert!(!is_valid_email("ann@example"));
        assert!(!is_valid_email("ann example@x.org"));
        assert!(!is_valid_email("@example.org"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("ann@example.org", "secret").is_ok());
        let errors = validate_login("ann@example.org", "").unwrap_err();
        assert_eq!(errors.first_message(), Some("Please enter both email and password"));
        assert!(validate_login("  ", "secret").is_err());
    }

    #[test]
    fn test_forgot_password_messages() {
        assert!(validate_forgot_password("ann@example.org").is_ok());
        assert_eq!(
            validate_forgot_password("").unwrap_err().get("email"),
            Some("Email is required")
        );
        assert_eq!(
            validate_forgot_password("ann").unwrap_err().get("email"),
            Some("Invalid email address")
        );
    }

    #[test]
    fn test_password_strength_scores() {
        assert_eq!(PasswordStrength::of("").score(), 0);
        assert_eq!(PasswordStrength::of("abc").score(), 1);
        assert_eq!(PasswordStrength::of("abcdefgh").score(), 2);
        assert_eq!(PasswordStrength::of("abcdefg1").score(), 3);
        assert_eq!(PasswordStrength::of("Abcdefg1").score(), 4);
        assert_eq!(PasswordStrength::of("Abcdefg1!").score(), 5);
        assert_eq!(PasswordStrength::of("Abcdefg1!").label(), "Strong");
        assert_eq!(PasswordStrength::of("abcdefgh").label(), "Fair");
    }

    #[test]
    fn test_reset_password_rules() {
        assert!(validate_reset_password(Some("tok"), "Abcdefg1", "Abcdefg1").is_ok());

        let errors = validate_reset_password(Some("tok"), "Ab1", "Ab1").unwrap_err();
        assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));

        let errors = validate_reset_password(Some("tok"), "abcdefgh", "abcdefgh").unwrap_err();
        assert_eq!(errors.get("password"), Some("Password is too weak. Use a stronger password."));

        let errors = validate_reset_password(Some("tok"), "Abcdefg1", "Abcdefg2").unwrap_err();
        assert_eq!(errors.get("confirmPassword"), Some("Passwords must match"));
        assert!(errors.get("password").is_none());

        let errors = validate_reset_password(None, "Abcdefg1", "Abcdefg1").unwrap_err();
        assert!(errors.get("token").is_some());
    }

    #[test]
    fn test_user_edit_rules() {
        assert!(validate_user_edit("Ann", "ann@example.org").is_ok());
        let errors = validate_user_edit(" ", "not-an-email").unwrap_err();
        assert_eq!(errors.get("Name"), Some("Name is required"));
        assert_eq!(errors.get("Email"), Some("Invalid email format"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_service_and_transaction_rules() {
        assert!(validate_service("Archana", "Pooja").is_ok());
        assert_eq!(validate_service("", "").unwrap_err().len(), 2);

        assert_eq!(validate_transaction_edit("Ravi", "$51.00").unwrap(), 51.0);
        assert!(validate_transaction_edit("Ravi", "-1").is_err());
        assert!(validate_transaction_edit("Ravi", "abc").is_err());
        assert!(validate_transaction_edit("", "10").is_err());
    }

    #[test]
    fn test_email_draft_order_of_checks() {
        let mut draft = EmailDraft::with_sender("noreply@sstmi.org");
        assert_eq!(
            validate_email_draft(&draft).unwrap_err().first_message(),
            Some("Please fill in all required fields (To, From, Subject)")
        );

        draft.to = "ravi".into();
        draft.subject = "Festival".into();
        assert_eq!(
            validate_email_draft(&draft).unwrap_err().first_message(),
            Some("Please enter a valid \"To\" email address")
        );

        draft.to = "ravi@example.org".into();
        draft.body_html = "<p><br></p>".into();
        assert_eq!(
            validate_email_draft(&draft).unwrap_err().first_message(),
            Some("Email body cannot be empty")
        );

        draft.body_html = "<p>Hello <b>Ravi</b></p>".into();
        assert!(validate_email_draft(&draft).is_ok());
        assert_eq!(draft.body_text(), "Hello Ravi");
    }

    #[test]
    fn test_strip_html_decodes_entities() {
        assert_eq!(strip_html("<p>Fish &amp; chips</p><p>2 &lt; 3</p>"), "Fish & chips\n2 < 3");
        assert_eq!(strip_html("plain"), "plain");
        assert_eq!(strip_html("<div\nclass=\"x\">a</div>"), "a");
    }

    #[test]
    fn test_media_update_rules() {
        assert!(validate_media_update("Banner", "https://cdn.example.org/a.jpg").is_ok());
        let errors = validate_media_update("", "ftp://x").unwrap_err();
        assert!(errors.get("title").is_some());
        assert!(errors.get("url").is_some());
    }
}
