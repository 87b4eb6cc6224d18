/// Assistant gateway - OpenAI-compatible chat completions client
///
/// The gateway is a seam: the conversation engine only needs "prompt in, raw
/// text out", so tests substitute a stub and the production implementation
/// talks to any OpenAI-compatible endpoint.
use crate::config::AssistantSettings;
use crate::error::{Result, ServerError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed system prompt constraining the reply schema.
///
/// The assistant must answer with plain JSON carrying `type`, `data` and
/// `textResponse`; the parser on the receiving end tolerates anything else by
/// falling back.
const SYSTEM_PROMPT: &str = "You are a music library web application assistant. \
You can answer questions about music, songs, artists, albums, and playlists. \
But also you can handle navigation requests like \"open library\" or \"open playlist <name>\". \
User can navigate only on 7 pages: home, library, profile, playlists, playlist, playlist editing, chat. \
You should always return plain json responses with type and your answer, for example if user wants to navigate somewhere you should return json like this: \
{\"type\": \"navigation\", \"data\": { \"where\": \"playlist\" or \"home\" or \"library\", \"params\": {} }, \"textResponse\": your response } \
or { \"type\": \"question\", \"data\": {}, \"textResponse\": your response } \
or { \"type\": \"action\", \"data\": { \"actionName\": PLAY_MUSIC or PLAY_PLAYLIST, \"params\": {} }, \"textResponse\": your response }. \
Also user can ask for suggestions like \"suggest me songs about happy-sounding pop songs\". \
You can also talk about some basic questions like \"How are you?\" \"What are you doing?\" etc. \
If user asks you about stuff that don't connect to project you should return \"I don't answer questions about other topics\".";

/// Prompt-in, raw-text-out contract of the upstream assistant
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Send one user prompt, stateless, and return the raw reply text
    async fn ask(&self, prompt: &str) -> Result<String>;
}

/// Production gateway against an OpenAI-compatible `chat/completions` endpoint
pub struct OpenAiAssistant {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionReply,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    content: Option<String>,
}

impl OpenAiAssistant {
    pub fn new(settings: &AssistantSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| ServerError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl AssistantGateway for OpenAiAssistant {
    async fn ask(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatCompletionMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatCompletionMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.base_url);
        let mut builder = self.client.post(&url).json(&request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ServerError::Internal(format!("Assistant request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServerError::Internal(format!(
                "Assistant returned status {status}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ServerError::Internal(format!("Assistant reply not readable: {e}")))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
