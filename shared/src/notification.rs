use serde::{Deserialize, Serialize};

/// Toast text for failures that carry no message of their own.
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again later.";

/// How long a toast stays up unless closed by hand.
pub const DEFAULT_TOAST_TIMEOUT_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Distinguishes two toasts with the same text so the dismiss timer of an
    /// older one cannot close a newer one
    pub id: u32,
    pub message: String,
    pub kind: ToastKind,
}

impl Notification {
    pub fn success(id: u32, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
            kind: ToastKind::Success,
        }
    }

    /// Empty messages are replaced with [`GENERIC_FAILURE`].
    pub fn error(id: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        };
        Self {
            id,
            message,
            kind: ToastKind::Error,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_falls_back_to_generic_text() {
        assert_eq!(Notification::error(1, "  ").message, GENERIC_FAILURE);
        assert_eq!(Notification::error(2, "Invalid credentials").message, "Invalid credentials");
    }

    #[test]
    fn test_css_class_by_kind() {
        assert_eq!(Notification::success(1, "ok").css_class(), "toast toast-success");
        assert_eq!(Notification::error(1, "no").css_class(), "toast toast-error");
    }
}
