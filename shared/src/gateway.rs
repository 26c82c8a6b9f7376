//! Wire shapes of the managed API gateway.
//!
//! The user gateway answers `{"statusCode": 200, "body": "<json string>"}` and
//! expects most requests wrapped as `{"body": "<json string>"}`. The service
//! catalog gateway takes `{"httpMethod": "POST" | "DELETE", "body": "<json>"}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::Record;
use crate::validation::EmailDraft;
use crate::{PortalConfig, Service, User};

/// Paths relative to the configured gateway base URLs.
pub mod endpoints {
    pub const LOGIN: &str = "user/login";
    pub const LIST_USERS: &str = "listusers";
    pub const UPDATE_USER_STATUS: &str = "UpdateUserStatus";
    pub const UPDATE_USER_INFO: &str = "updateUserInfo";
    pub const FORGOT_PASSWORD: &str = "ForgotPassword";
    pub const RESET_PASSWORD: &str = "ResetPassword";
    pub const SERVICES: &str = "services";
    pub const SEND_EMAIL: &str = "send-email";
    pub const TRANSACTIONS: &str = "transactions";
    pub const MEDIA: &str = "media";
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GatewayError {
    #[error("failed to encode request: {0}")]
    Serialize(String),
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    #[error("response carried no body")]
    MissingBody,
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },
}

impl GatewayError {
    fn malformed(e: serde_json::Error) -> Self {
        GatewayError::MalformedBody(e.to_string())
    }
}

/// Envelope returned by the gateway's proxy integrations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Usually a JSON document encoded as a string; some integrations inline it
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        self.status_code == Some(200)
    }

    /// Decode the inner document regardless of status.
    pub fn decode_body<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        match &self.body {
            None | Some(serde_json::Value::Null) => Err(GatewayError::MissingBody),
            Some(serde_json::Value::String(raw)) => {
                serde_json::from_str(raw).map_err(GatewayError::malformed)
            }
            Some(inline) => serde_json::from_value(inline.clone()).map_err(GatewayError::malformed),
        }
    }

    /// `message` field of the inner document, when there is one.
    pub fn message(&self) -> Option<String> {
        self.decode_body::<MessageReply>()
            .ok()
            .and_then(|reply| reply.message)
            .filter(|m| !m.trim().is_empty())
    }

    /// Decode on 200; otherwise surface the gateway's own message.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, GatewayError> {
        if self.is_success() {
            return self.decode_body();
        }
        Err(self.rejection("Something went wrong"))
    }

    pub fn rejection(&self, fallback: &str) -> GatewayError {
        GatewayError::Rejected {
            status: self.status_code,
            message: self.message().unwrap_or_else(|| fallback.to_string()),
        }
    }
}

/// `{"body": "<json string>"}` request wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyEnvelope {
    pub body: String,
}

impl BodyEnvelope {
    pub fn wrap<T: Serialize>(payload: &T) -> Result<Self, GatewayError> {
        let body =
            serde_json::to_string(payload).map_err(|e| GatewayError::Serialize(e.to_string()))?;
        Ok(Self { body })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Post,
    Delete,
}

/// Service gateway wrapper carrying the intended method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodEnvelope {
    pub http_method: HttpMethod,
    pub body: String,
}

impl MethodEnvelope {
    pub fn new<T: Serialize>(http_method: HttpMethod, payload: &T) -> Result<Self, GatewayError> {
        let BodyEnvelope { body } = BodyEnvelope::wrap(payload)?;
        Ok(Self { http_method, body })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginCredentials {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub action: String,
    pub user: LoginCredentials,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            action: "LoginUser".to_string(),
            user: LoginCredentials {
                user_id: email.trim().to_string(),
                password: password.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roleid: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserListReply {
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserStatusUpdate {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserInfoUpdate {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role_id: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Body of a catalog create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSave {
    pub group: String,
    pub name: String,
    pub price: String,
}

/// Body of a catalog delete; `name` identifies the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDelete {
    pub name: String,
    pub price: String,
}

impl From<&Service> for ServiceSave {
    fn from(service: &Service) -> Self {
        Self {
            group: service.group.trim().to_string(),
            name: service.name.trim().to_string(),
            price: service.price.trim().to_string(),
        }
    }
}

impl From<&Service> for ServiceDelete {
    fn from(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            price: service.price.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
}

impl EmailRequest {
    /// The sender is always the portal's configured address, whatever the
    /// form's From field holds.
    pub fn from_draft(draft: &EmailDraft, config: &PortalConfig) -> Self {
        Self {
            sender: config.sender_email.clone(),
            recipient: draft.to.trim().to_string(),
            subject: draft.subject.trim().to_string(),
            body_text: draft.body_text(),
            body_html: draft.body_html.clone(),
        }
    }
}

/// Website media slot update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaUpdateRequest {
    pub section: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

/// Decode a list of flat JSON objects into generic records. Accepts a bare
/// array, `{list_key: [...]}`, or a gateway envelope whose body is either.
pub fn decode_record_list(
    value: serde_json::Value,
    list_key: &str,
    id_key: &str,
) -> Result<Vec<Record>, GatewayError> {
    if value.is_array() {
        return Ok(Record::list_from_json(id_key, &value));
    }
    if let Some(list) = value.get(list_key).filter(|list| list.is_array()) {
        return Ok(Record::list_from_json(id_key, list));
    }
    let envelope: GatewayResponse =
        serde_json::from_value(value).map_err(GatewayError::malformed)?;
    if envelope.status_code.is_some() && !envelope.is_success() {
        return Err(envelope.rejection("Something went wrong"));
    }
    let body: serde_json::Value = envelope.decode_body()?;
    let list = body.get(list_key).unwrap_or(&body);
    if !list.is_array() {
        return Err(GatewayError::MalformedBody(format!("expected a list of {list_key}")));
    }
    Ok(Record::list_from_json(id_key, list))
}

/// Join a base URL and a relative endpoint with exactly one slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TableRecord;
    use serde_json::json;

    #[test]
    fn test_decode_string_encoded_body() {
        let response: GatewayResponse = serde_json::from_value(json!({
            "statusCode": 200,
            "body": "{\"name\":\"Ann\",\"roleid\":1,\"message\":\"Login successful\"}"
        }))
        .unwrap();
        assert!(response.is_success());
        let reply: LoginReply = response.into_result().unwrap();
        assert_eq!(reply.name.as_deref(), Some("Ann"));
        assert_eq!(reply.roleid, Some(1));
    }

    #[test]
    fn test_decode_inline_body() {
        let response: GatewayResponse = serde_json::from_value(json!({
            "statusCode": 200,
            "body": {"users": []}
        }))
        .unwrap();
        let reply: UserListReply = response.decode_body().unwrap();
        assert!(reply.users.is_empty());
    }

    #[test]
    fn test_rejection_uses_gateway_message() {
        let response: GatewayResponse = serde_json::from_value(json!({
            "statusCode": 401,
            "body": "{\"message\":\"Invalid credentials\"}"
        }))
        .unwrap();
        let err = response.into_result::<LoginReply>().unwrap_err();
        assert_eq!(
            err,
            GatewayError::Rejected {
                status: Some(401),
                message: "Invalid credentials".into()
            }
        );
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_rejection_fallback_and_malformed() {
        let response = GatewayResponse {
            status_code: Some(500),
            body: Some(json!("not json")),
        };
        assert_eq!(response.message(), None);
        assert_eq!(response.rejection("Something went wrong").to_string(), "Something went wrong");
        assert!(matches!(
            response.decode_body::<MessageReply>(),
            Err(GatewayError::MalformedBody(_))
        ));
        assert_eq!(
            GatewayResponse::default().decode_body::<MessageReply>(),
            Err(GatewayError::MissingBody)
        );
    }

    #[test]
    fn test_request_wrappers() {
        let envelope = BodyEnvelope::wrap(&UserStatusUpdate {
            user_id: "ann@example.org".into(),
            is_active: false,
        })
        .unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"body": "{\"UserId\":\"ann@example.org\",\"IsActive\":false}"})
        );

        let service = Service {
            name: " Archana ".into(),
            price: "11".into(),
            group: "Pooja".into(),
        };
        let envelope =
            MethodEnvelope::new(HttpMethod::Delete, &ServiceDelete::from(&service)).unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "httpMethod": "DELETE",
                "body": "{\"name\":\" Archana \",\"price\":\"11\"}"
            })
        );
        assert_eq!(ServiceSave::from(&service).name, "Archana");
    }

    #[test]
    fn test_login_request_shape() {
        assert_eq!(
            serde_json::to_value(LoginRequest::new(" ann@example.org ", "pw")).unwrap(),
            json!({"action": "LoginUser", "user": {"UserId": "ann@example.org", "Password": "pw"}})
        );
        let reset = ResetPasswordRequest {
            token: "t".into(),
            new_password: "p".into(),
        };
        assert_eq!(
            serde_json::to_value(reset).unwrap(),
            json!({"token": "t", "newPassword": "p"})
        );
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://api.example.org/Prod/", "/services"),
            "https://api.example.org/Prod/services"
        );
        assert_eq!(
            join_url("https://api.example.org/ProdUser", "user/login"),
            "https://api.example.org/ProdUser/user/login"
        );
    }

    #[test]
    fn test_email_sender_ignores_typed_from() {
        let config = PortalConfig::default();
        let mut draft = EmailDraft::with_sender("someone@elsewhere.org");
        draft.to = " devotee@example.org ".into();
        draft.subject = "Receipt".into();
        draft.body_html = "<p>Thank you</p>".into();

        let request = EmailRequest::from_draft(&draft, &config);
        assert_eq!(request.sender, "noreply@sstmi.org");
        assert_eq!(request.recipient, "devotee@example.org");
        assert_eq!(request.body_text, "Thank you");
    }

    #[test]
    fn test_decode_record_list_shapes() {
        let bare = json!([{"id": "m1", "section": "banner", "url": "https://x/a.jpg"}]);
        let rows = decode_record_list(bare, "media", "id").unwrap();
        assert_eq!(rows[0].id, "m1");
        assert_eq!(rows[0].field("section"), crate::FieldValue::Text("banner".into()));

        let keyed = json!({"media": [{"id": "m2"}, {"id": "m3"}]});
        assert_eq!(decode_record_list(keyed, "media", "id").unwrap().len(), 2);

        let wrapped = json!({
            "statusCode": 200,
            "body": "{\"media\":[{\"id\":\"m4\",\"title\":\"Diwali\"}]}"
        });
        let rows = decode_record_list(wrapped, "media", "id").unwrap();
        assert_eq!(rows[0].id, "m4");
    }

    #[test]
    fn test_decode_record_list_errors() {
        let rejected = json!({"statusCode": 500, "body": "{\"message\":\"Down\"}"});
        assert_eq!(
            decode_record_list(rejected, "media", "id").unwrap_err().to_string(),
            "Down"
        );
        let not_a_list = json!({"statusCode": 200, "body": "{\"media\":\"none\"}"});
        assert!(matches!(
            decode_record_list(not_a_list, "media", "id"),
            Err(GatewayError::MalformedBody(_))
        ));
    }
}
