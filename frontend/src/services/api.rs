use std::rc::Rc;

use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::gateway::{
    decode_record_list, endpoints, BodyEnvelope, EmailRequest, ForgotPasswordRequest,
    GatewayError, GatewayResponse, HttpMethod, LoginReply, LoginRequest, MediaUpdateRequest,
    MethodEnvelope, ResetPasswordRequest, ServiceDelete, ServiceSave, UserInfoUpdate,
    UserListReply, UserStatusUpdate,
};
use shared::notification::GENERIC_FAILURE;
use shared::{PortalConfig, Record, Service, SessionUser, Transaction, User};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request failed with status {status}: {text}")]
    Http { status: u16, text: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ApiError {
    /// Toast text: the gateway's own message when it sent one.
    pub fn user_message(&self) -> String {
        self.user_message_or(GENERIC_FAILURE)
    }

    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Gateway(GatewayError::Rejected { message, .. }) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<gloo::net::Error> for ApiError {
    fn from(e: gloo::net::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// Successful login: who signed in plus the gateway's greeting.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub user: SessionUser,
    pub message: Option<String>,
}

/// API client for the portal's external gateways
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    config: Rc<PortalConfig>,
}

impl ApiClient {
    pub fn new(config: Rc<PortalConfig>) -> Self {
        Self { config }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let url = self.config.user_url(endpoints::LOGIN);
        let response = post_json(&url, &LoginRequest::new(email, password)).await?;
        let envelope = read_gateway(response).await?;
        let reply: LoginReply = envelope.into_result()?;

        Ok(LoginOutcome {
            user: SessionUser {
                name: reply.name.unwrap_or_default(),
                email: email.trim().to_string(),
                roleid: reply.roleid.unwrap_or(4),
            },
            message: reply.message,
        })
    }

    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let url = self.config.user_url(endpoints::FORGOT_PASSWORD);
        let body = BodyEnvelope::wrap(&ForgotPasswordRequest {
            email: email.trim().to_string(),
        })?;
        let envelope = read_gateway(post_json(&url, &body).await?).await?;
        if !envelope.is_success() {
            return Err(envelope.rejection("Something went wrong").into());
        }
        Ok(envelope
            .message()
            .unwrap_or_else(|| "Password reset link sent!".to_string()))
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<String, ApiError> {
        let url = self.config.user_url(endpoints::RESET_PASSWORD);
        let body = BodyEnvelope::wrap(&ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        })?;
        let envelope = read_gateway(post_json(&url, &body).await?).await?;
        if !envelope.is_success() {
            return Err(envelope.rejection("Something went wrong").into());
        }
        Ok(envelope
            .message()
            .unwrap_or_else(|| "New Password Updated Successfully".to_string()))
    }

    /// Get every portal account
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let url = self.config.user_url(endpoints::LIST_USERS);
        let response = Request::get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await?;
        let envelope = read_gateway(response).await?;
        let reply: UserListReply = envelope.decode_body()?;
        Ok(reply.users)
    }

    /// Activate or deactivate an account. The gateway confirms with a message.
    pub async fn update_user_status(
        &self,
        user_id: &str,
        is_active: bool,
    ) -> Result<String, ApiError> {
        let url = self.config.user_url(endpoints::UPDATE_USER_STATUS);
        let body = BodyEnvelope::wrap(&UserStatusUpdate {
            user_id: user_id.to_string(),
            is_active,
        })?;
        let envelope = read_gateway(post_json(&url, &body).await?).await?;
        envelope
            .message()
            .ok_or_else(|| envelope.rejection("Something went wrong").into())
    }

    pub async fn update_user_info(&self, update: &UserInfoUpdate) -> Result<(), ApiError> {
        let url = self.config.user_url(endpoints::UPDATE_USER_INFO);
        let body = BodyEnvelope::wrap(update)?;
        let response = post_json(&url, &body).await?;
        let http_ok = response.ok();
        let envelope = read_gateway(response).await?;
        if http_ok || envelope.message().is_some() {
            Ok(())
        } else {
            Err(envelope.rejection("Failed to update user").into())
        }
    }

    /// Get the service catalog. This gateway returns a bare JSON array.
    pub async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        let url = self.config.services_url(endpoints::SERVICES);
        let response = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;
        read_json(ensure_ok(response).await?).await
    }

    pub async fn save_service(&self, service: &Service) -> Result<(), ApiError> {
        let envelope = MethodEnvelope::new(HttpMethod::Post, &ServiceSave::from(service))?;
        self.service_call(&envelope).await
    }

    pub async fn delete_service(&self, service: &Service) -> Result<(), ApiError> {
        let envelope = MethodEnvelope::new(HttpMethod::Delete, &ServiceDelete::from(service))?;
        self.service_call(&envelope).await
    }

    async fn service_call(&self, envelope: &MethodEnvelope) -> Result<(), ApiError> {
        let url = self.config.services_url(endpoints::SERVICES);
        let response = ensure_ok(post_json(&url, envelope).await?).await?;
        let reply = read_gateway(response).await?;
        match reply.body {
            Some(body) if !body.is_null() => Ok(()),
            _ => Err(GatewayError::MissingBody.into()),
        }
    }

    pub async fn send_email(&self, request: &EmailRequest) -> Result<(), ApiError> {
        let url = self.config.email_url(endpoints::SEND_EMAIL);
        let envelope = read_gateway(post_json(&url, request).await?).await?;
        if envelope.is_success() {
            Ok(())
        } else {
            Err(envelope.rejection("Failed to send email. Please try again.").into())
        }
    }

    /// Transactions arrive either as a bare array or inside a gateway
    /// envelope as `{"transactions": [...]}`.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let url = self.config.transactions_url(endpoints::TRANSACTIONS);
        let response = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let value: serde_json::Value = read_json(ensure_ok(response).await?).await?;
        decode_transactions(value)
    }

    pub async fn update_transaction(&self, transaction: &Transaction) -> Result<String, ApiError> {
        let url = self.config.transactions_url(endpoints::TRANSACTIONS);
        let envelope = MethodEnvelope::new(HttpMethod::Post, transaction)?;
        let reply = read_gateway(post_json(&url, &envelope).await?).await?;
        if reply.is_success() {
            Ok(reply
                .message()
                .unwrap_or_else(|| "Transaction updated successfully!".to_string()))
        } else {
            Err(reply.rejection("Failed to update transaction").into())
        }
    }

    /// Entries currently on the website. Their shape is not fixed, so rows
    /// come back as generic records keyed by `id`.
    pub async fn list_media(&self) -> Result<Vec<Record>, ApiError> {
        let url = self.config.media_url(endpoints::MEDIA);
        let response = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let value: serde_json::Value = read_json(ensure_ok(response).await?).await?;
        Ok(decode_record_list(value, "media", "id")?)
    }

    pub async fn update_media(&self, request: &MediaUpdateRequest) -> Result<String, ApiError> {
        let url = self.config.media_url(endpoints::MEDIA);
        let envelope = MethodEnvelope::new(HttpMethod::Post, request)?;
        let reply = read_gateway(post_json(&url, &envelope).await?).await?;
        if reply.is_success() {
            Ok(reply
                .message()
                .unwrap_or_else(|| "Media updated successfully!".to_string()))
        } else {
            Err(reply.rejection("Failed to update media").into())
        }
    }
}

async fn post_json<B: Serialize>(url: &str, body: &B) -> Result<Response, ApiError> {
    let response = Request::post(url)
        .header("Content-Type", "application/json")
        .json(body)
        .map_err(|e| GatewayError::Serialize(e.to_string()))?
        .send()
        .await?;
    Ok(response)
}

/// Non-2xx answers become `ApiError::Http` carrying the response text.
async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ApiError::Http { status, text })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn read_gateway(response: Response) -> Result<GatewayResponse, ApiError> {
    read_json(response).await
}

fn decode_transactions(value: serde_json::Value) -> Result<Vec<Transaction>, ApiError> {
    #[derive(serde::Deserialize)]
    struct TransactionListReply {
        #[serde(default)]
        transactions: Vec<Transaction>,
    }

    if value.is_array() {
        return serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()));
    }
    let envelope: GatewayResponse =
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
    if envelope.status_code.is_some() && !envelope.is_success() {
        return Err(envelope.rejection("Failed to load transactions").into());
    }
    let reply: TransactionListReply = envelope.decode_body()?;
    Ok(reply.transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use serde_json::json;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_transactions_array_and_envelope() {
        let bare = json!([{"TransactionId": "t1", "Amount": 51}]);
        let list = decode_transactions(bare).unwrap();
        assert_eq!(list[0].amount, 51.0);

        let wrapped = json!({
            "statusCode": 200,
            "body": "{\"transactions\":[{\"TransactionId\":\"t2\",\"DevoteeName\":\"Ravi\"}]}"
        });
        let list = decode_transactions(wrapped).unwrap();
        assert_eq!(list[0].devotee_name, "Ravi");
    }

    #[wasm_bindgen_test]
    fn test_decode_transactions_rejected() {
        let rejected = json!({"statusCode": 403, "body": "{\"message\":\"Forbidden\"}"});
        let err = decode_transactions(rejected).unwrap_err();
        assert_eq!(err.user_message(), "Forbidden");
    }

    #[wasm_bindgen_test]
    fn test_user_message_fallbacks() {
        assert_eq!(ApiError::Network("offline".into()).user_message(), GENERIC_FAILURE);
        let send_failed = "Failed to send email. Please try again.";
        assert_eq!(
            ApiError::Decode("eof".into()).user_message_or(send_failed),
            send_failed
        );
    }
}
