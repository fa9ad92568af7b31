use crate::error::ApiError;
use crate::sanitizer::Sanitizer;
use parley_session::SessionRegistry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

const MESSAGE_REQUIRED: &str = "Field 'message' is required";

/// A validated `POST /chat` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// Parse and validate a raw request body. An empty body counts as `{}`.
    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        let body = if body.trim().is_empty() { "{}" } else { body };
        let payload: Value = serde_json::from_str(body)
            .map_err(|_| ApiError::BadRequest("Invalid JSON".to_string()))?;
        let Value::Object(mut fields) = payload else {
            return Err(ApiError::BadRequest(
                "Payload must be a JSON object".to_string(),
            ));
        };

        let message = match fields.remove("message") {
            Some(Value::String(m)) if !m.trim().is_empty() => m,
            _ => return Err(ApiError::BadRequest(MESSAGE_REQUIRED.to_string())),
        };
        let session_id = match fields.remove("session_id") {
            Some(Value::String(id)) if !id.trim().is_empty() => Some(id),
            _ => None,
        };

        Ok(Self {
            message,
            session_id,
        })
    }
}

/// Successful `POST /chat` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub session_id: String,
}

/// Routes chat requests to the right session.
pub struct ChatRouter {
    registry: Arc<SessionRegistry>,
    sanitizer: Sanitizer,
}

impl ChatRouter {
    pub fn new(registry: Arc<SessionRegistry>, sanitizer: Sanitizer) -> Self {
        Self {
            registry,
            sanitizer,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Resolve or create the session and run one turn.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply, ApiError> {
        let content = self
            .sanitizer
            .check(&request.message)
            .map_err(|reason| {
                warn!(reason = %reason, "Rejected chat message");
                ApiError::BadRequest(reason.to_string())
            })?;
        if content.trim().is_empty() {
            return Err(ApiError::BadRequest(MESSAGE_REQUIRED.to_string()));
        }

        let session = self
            .registry
            .get_or_create(request.session_id.as_deref())
            .await?;
        let reply = session.respond(&content).await;

        info!(
            session_id = %session.id(),
            message_len = content.len(),
            reply_len = reply.len(),
            "Chat turn handled"
        );

        Ok(ChatReply {
            reply,
            session_id: session.id().to_string(),
        })
    }
}
