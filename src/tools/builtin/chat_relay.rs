//! Chat relay tool implementation
//!
//! Logs into a remote chat service with configured credentials, snapshots
//! the session cookies to disk, opens a conversation, and submits the
//! query. The answer comes back whole, or as a stream of partial tokens
//! when the streaming flag is set.
//!
//! The cookie snapshot is written to a fixed per-email path on every
//! invocation; concurrent invocations can race on that file. Known issue,
//! not addressed here.

use crate::config::AgentConfig;
use crate::tools::builtin::http_client;
use crate::tools::{TokenStream, Tool, ToolDescription, ToolError, ToolOutput};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing::debug;

const NAME: &str = "chat_relay";

/// Relay tool for a HuggingChat-style conversation service.
pub struct ChatRelayTool {
    email: Option<String>,
    password: Option<String>,
    streaming: bool,
    web_search: bool,
    cookie_dir: PathBuf,
    base_url: String,
}

impl ChatRelayTool {
    /// Create the tool from configuration, resolving credentials once.
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            email: config.chat_email(),
            password: config.chat_password(),
            streaming: config.chat.streaming,
            web_search: config.chat.web_search,
            cookie_dir: config.chat.cookie_dir.clone(),
            base_url: config.chat.base_url.clone(),
        }
    }

    fn credentials(&self) -> Result<(&str, &str), ToolError> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(ToolError::NotConfigured {
                tool: NAME.to_string(),
                reason: "chat service email and password are not set".to_string(),
            }),
        }
    }

    /// Log in and return the session cookies the service issued.
    fn login(
        &self,
        client: &reqwest::blocking::Client,
        email: &str,
        password: &str,
    ) -> Result<BTreeMap<String, String>, ToolError> {
        let response = client
            .post(format!("{}/login", self.base_url))
            .form(&[("username", email), ("password", password)])
            .send()?;

        if !response.status().is_success() {
            return Err(ToolError::AuthenticationFailed(format!(
                "login rejected with status {}",
                response.status()
            )));
        }

        let cookies = session_cookies(response.headers());
        if cookies.is_empty() {
            return Err(ToolError::AuthenticationFailed(
                "login succeeded but no session cookies were issued".to_string(),
            ));
        }
        Ok(cookies)
    }

    /// Write the cookie snapshot to `<cookie_dir>/<email>.json`.
    fn save_cookie_snapshot(
        &self,
        email: &str,
        cookies: &BTreeMap<String, String>,
    ) -> Result<PathBuf, ToolError> {
        fs::create_dir_all(&self.cookie_dir)?;
        let path = self.cookie_dir.join(format!("{email}.json"));
        let body = serde_json::to_string_pretty(cookies).map_err(io::Error::other)?;
        fs::write(&path, body)?;
        debug!(path = %path.display(), "saved session cookie snapshot");
        Ok(path)
    }

    fn open_conversation(
        &self,
        client: &reqwest::blocking::Client,
        cookie_header: &str,
    ) -> Result<String, ToolError> {
        let body = client
            .post(format!("{}/chat/conversation", self.base_url))
            .header(COOKIE, cookie_header)
            .json(&json!({}))
            .send()?
            .error_for_status()?
            .text()?;

        let opened: ConversationOpened = serde_json::from_str(&body).map_err(|e| {
            ToolError::MalformedResponse(format!("conversation response is not valid JSON: {e}"))
        })?;
        opened.conversation_id.ok_or_else(|| {
            ToolError::MalformedResponse(
                "conversation response has no conversation id".to_string(),
            )
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConversationOpened {
    conversation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelayAnswer {
    text: Option<String>,
}

/// One line of the streamed answer body.
#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    kind: String,
    token: Option<String>,
}

/// Pull `name=value` pairs out of the `Set-Cookie` headers, dropping the
/// attributes.
fn session_cookies(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut cookies = BTreeMap::new();
    for value in headers.get_all(SET_COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        let pair = raw.split(';').next().unwrap_or(raw);
        if let Some((name, value)) = pair.split_once('=') {
            cookies.insert(name.trim().to_string(), value.trim().to_string());
        }
    }
    cookies
}

fn cookie_header(cookies: &BTreeMap<String, String>) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Lazily parse the newline-delimited answer body into partial tokens.
///
/// `stream` events yield their token; the `finalAnswer` event ends the
/// stream; anything else is skipped.
fn token_stream(response: reqwest::blocking::Response) -> TokenStream {
    let mut lines = BufReader::new(response).lines();
    let mut done = false;

    TokenStream::new(std::iter::from_fn(move || {
        if done {
            return None;
        }
        loop {
            match lines.next() {
                None => return None,
                Some(Err(e)) => {
                    done = true;
                    return Some(Err(ToolError::Io(e)));
                }
                Some(Ok(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let event: StreamEvent = match serde_json::from_str(&line) {
                        Ok(event) => event,
                        Err(e) => {
                            done = true;
                            return Some(Err(ToolError::MalformedResponse(format!(
                                "stream line is not valid JSON: {e}"
                            ))));
                        }
                    };
                    match event.kind.as_str() {
                        "stream" => {
                            if let Some(token) = event.token {
                                return Some(Ok(token));
                            }
                        }
                        "finalAnswer" => {
                            done = true;
                            return None;
                        }
                        _ => {}
                    }
                }
            }
        }
    }))
}

#[async_trait]
impl Tool for ChatRelayTool {
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: NAME.to_string(),
            description: "Relay a question to the remote chat service and return its answer. \
                          Use this tool for general Q&A that other tools cannot cover."
                .to_string(),
        }
    }

    fn run(&self, query: &str) -> Result<ToolOutput, ToolError> {
        let (email, password) = self.credentials()?;
        let client = http_client()?;

        let cookies = self.login(&client, email, password)?;
        self.save_cookie_snapshot(email, &cookies)?;
        let cookie_header = cookie_header(&cookies);

        let conversation_id = self.open_conversation(&client, &cookie_header)?;
        debug!(%conversation_id, streaming = self.streaming, "submitting chat relay query");

        let response = client
            .post(format!(
                "{}/chat/conversation/{conversation_id}",
                self.base_url
            ))
            .header(COOKIE, &cookie_header)
            .json(&json!({
                "inputs": query,
                "stream": self.streaming,
                "web_search": self.web_search
            }))
            .send()?
            .error_for_status()?;

        if self.streaming {
            return Ok(ToolOutput::Stream(token_stream(response)));
        }

        let body = response.text()?;
        let answer: RelayAnswer = serde_json::from_str(&body).map_err(|e| {
            ToolError::MalformedResponse(format!("chat response is not valid JSON: {e}"))
        })?;
        let text = answer.text.ok_or_else(|| {
            ToolError::MalformedResponse("chat response has no text field".to_string())
        })?;

        Ok(ToolOutput::Text(text))
    }
}
