//! HTTP implementation of the `ReflectionProvider` trait.
//!
//! Wire contract:
//!
//! - `POST {base}/chat` with the latest message, the topic rendered as
//!   `"Name: word, word. voice"`, the stance, depth and recent history.
//!   Answers `{ success, response?, error? }`.
//! - `POST {base}/warm-up` with `{ max_turns }`. Best effort.
//!
//! Timeouts are applied by the caller.

use async_trait::async_trait;
use orenda_core::error::BridgeError;
use orenda_core::provider::{
    HistoryTurn, ReflectionProvider, ReflectionRequest, ReflectionResult, Role, TopicContext,
};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Iterations requested from the warm-up endpoint.
const WARM_UP_TURNS: u32 = 3;

#[derive(Debug, Serialize)]
struct WireTurn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    user_message: &'a str,
    house_name: String,
    bridge_stance: &'static str,
    relationship_depth: u32,
    depth_level: &'a str,
    conversation_history: Vec<WireTurn<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct WarmUpBody {
    max_turns: u32,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    success: bool,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Agent => "assistant",
    }
}

/// Renders a topic the way the endpoint expects it in `house_name`.
#[must_use]
pub fn house_name(topic: &TopicContext) -> String {
    format!(
        "{}: {}. {}",
        topic.name,
        topic.theme_words.join(", "),
        topic.voice
    )
}

fn chat_body(request: &ReflectionRequest) -> ChatBody<'_> {
    ChatBody {
        user_message: &request.user_message,
        house_name: request.topic.as_ref().map(house_name).unwrap_or_default(),
        bridge_stance: request.stance.as_str(),
        relationship_depth: request.relationship_depth,
        depth_level: &request.depth_level,
        conversation_history: request
            .history
            .iter()
            .map(|HistoryTurn { role, text }| WireTurn {
                role: wire_role(*role),
                content: text,
            })
            .collect(),
        user_id: request.user_id.as_deref(),
    }
}

/// Reflection provider backed by the remote bridge endpoint.
#[derive(Debug, Clone)]
pub struct HttpReflectionProvider {
    client: Client,
    chat_url: Url,
    warm_up_url: Url,
}

impl HttpReflectionProvider {
    /// Creates a client for the endpoint rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Config` if `base_url` is not an absolute
    /// `http` or `https` URL.
    pub fn new(base_url: &str) -> Result<Self, BridgeError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base = Url::parse(&format!("{trimmed}/"))
            .map_err(|e| BridgeError::Config(format!("invalid bridge url '{base_url}': {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(BridgeError::Config(format!(
                "bridge url '{base_url}' must use http or https"
            )));
        }
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| BridgeError::Config(format!("invalid bridge url '{base_url}': {e}")))
        };
        Ok(Self {
            client: Client::new(),
            chat_url: join("chat")?,
            warm_up_url: join("warm-up")?,
        })
    }

    /// The `/chat` endpoint this client posts to.
    #[must_use]
    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }
}

#[async_trait]
impl ReflectionProvider for HttpReflectionProvider {
    #[instrument(skip(self, request), fields(stance = request.stance.as_str()))]
    async fn reflect(&self, request: &ReflectionRequest) -> Result<ReflectionResult, BridgeError> {
        let response = self
            .client
            .post(self.chat_url.clone())
            .json(&chat_body(request))
            .send()
            .await
            .map_err(|e| BridgeError::Provider(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::Provider(format!(
                "endpoint returned {status}"
            )));
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| BridgeError::Provider(format!("malformed response: {e}")))?;
        if let Some(error) = reply.error.as_deref() {
            debug!(error, success = reply.success, "endpoint reported an error");
        }
        Ok(ReflectionResult {
            success: reply.success,
            response: reply.response.unwrap_or_default(),
        })
    }

    async fn warm_up(&self) -> Result<(), BridgeError> {
        let response = self
            .client
            .post(self.warm_up_url.clone())
            .json(&WarmUpBody {
                max_turns: WARM_UP_TURNS,
            })
            .send()
            .await
            .map_err(|e| BridgeError::Provider(format!("warm-up failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::Provider(format!(
                "warm-up returned {status}"
            )));
        }
        Ok(())
    }
}
