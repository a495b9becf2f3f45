use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use super::error::ChatError;
use super::message::{Message, Role, ToolCall};

/// Schema of one tool advertised to the completion provider.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// What the provider came back with: a finished reply, or a request to run
/// a tool before it can answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Reply(String),
    ToolInvocation(ToolCall),
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        model: &str,
        history: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<CompletionOutcome, ChatError>;
}

/// Client for any OpenAI-compatible chat completions endpoint. The key is
/// passed per call since tenants may override it turn by turn.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_base: String,
}

impl OpenAiClient {
    pub fn new(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    fn build_request(&self, model: &str, history: &[Message], tools: &[ToolDefinition]) -> Value {
        let messages = history.iter().map(wire_message).collect::<Vec<_>>();

        let mut request = json!({
            "model": model,
            "messages": messages,
        });

        if !tools.is_empty() {
            let tools = tools
                .iter()
                .map(|tool| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": tool.name,
                            "description": tool.description,
                            "parameters": tool.parameters,
                        },
                    })
                })
                .collect::<Vec<_>>();

            request["tools"] = Value::Array(tools);
            request["tool_choice"] = json!("auto");
        }

        request
    }
}

fn wire_message(message: &Message) -> Value {
    if let Some(call) = &message.tool_call {
        return json!({
            "role": "assistant",
            "content": Value::Null,
            "tool_calls": [{
                "id": call.id,
                "type": "function",
                "function": {
                    "name": call.name,
                    "arguments": call.arguments,
                },
            }],
        });
    }

    match message.role {
        Role::Tool => json!({
            "role": "tool",
            "tool_call_id": message.tool_call_id,
            "name": message.tool_name,
            "content": message.content,
        }),
        _ => json!({
            "role": message.role,
            "content": message.content,
        }),
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        model: &str,
        history: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<CompletionOutcome, ChatError> {
        let body = self.build_request(model, history, tools);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|why| ChatError::Unexpected(why.into()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|error| error.message)
                .unwrap_or_else(|| "An unknown API error occurred.".to_string());

            return Err(ChatError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response
            .json::<CompletionResponse>()
            .await
            .map_err(|why| ChatError::Unexpected(why.into()))?;

        parse_outcome(parsed)
    }
}

fn parse_outcome(response: CompletionResponse) -> Result<CompletionOutcome, ChatError> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        ChatError::Unexpected(anyhow::anyhow!("completion response had no choices"))
    })?;

    if let Some(mut calls) = choice.message.tool_calls {
        if !calls.is_empty() {
            if calls.len() > 1 {
                log::warn!(
                    "model requested {} tool calls, honoring only the first",
                    calls.len()
                );
            }

            let call = calls.remove(0);
            return Ok(CompletionOutcome::ToolInvocation(ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            }));
        }
    }

    Ok(CompletionOutcome::Reply(
        choice.message.content.unwrap_or_default(),
    ))
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: WireAssistantMessage,
}

#[derive(Deserialize)]
struct WireAssistantMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunctionCall,
}

#[derive(Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
pub(super) struct ApiErrorBody {
    pub(super) error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
pub(super) struct ApiErrorDetail {
    pub(super) message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiClient {
        OpenAiClient::new(reqwest::Client::new(), "https://api.openai.com/v1")
    }

    #[test]
    fn plain_messages_encode_role_and_content() {
        let encoded = wire_message(&Message::user("hello"));

        assert_eq!(encoded, json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn tool_requests_encode_as_assistant_tool_calls() {
        let call = ToolCall {
            id: "call_9".into(),
            name: "search".into(),
            arguments: r#"{"query":"weather"}"#.into(),
        };

        let encoded = wire_message(&Message::tool_request(call));

        assert_eq!(encoded["role"], "assistant");
        assert_eq!(encoded["content"], Value::Null);
        assert_eq!(encoded["tool_calls"][0]["id"], "call_9");
        assert_eq!(encoded["tool_calls"][0]["type"], "function");
        assert_eq!(encoded["tool_calls"][0]["function"]["name"], "search");
        assert_eq!(
            encoded["tool_calls"][0]["function"]["arguments"],
            r#"{"query":"weather"}"#
        );
    }

    #[test]
    fn tool_results_encode_with_their_call_id() {
        let encoded = wire_message(&Message::tool_result("call_9", "search", r#"{"results":[]}"#));

        assert_eq!(
            encoded,
            json!({
                "role": "tool",
                "tool_call_id": "call_9",
                "name": "search",
                "content": r#"{"results":[]}"#,
            })
        );
    }

    #[test]
    fn request_without_tools_omits_the_tool_fields() {
        let request = client().build_request("gpt-3.5-turbo", &[Message::user("hi")], &[]);

        assert_eq!(request["model"], "gpt-3.5-turbo");
        assert_eq!(request["messages"][0]["role"], "user");
        assert!(request.get("tools").is_none());
        assert!(request.get("tool_choice").is_none());
    }

    #[test]
    fn request_with_tools_advertises_them_with_auto_choice() {
        let tool = ToolDefinition {
            name: "search".into(),
            description: "Search the web.".into(),
            parameters: json!({"type": "object"}),
        };

        let request = client().build_request("gpt-4", &[Message::user("hi")], &[tool]);

        assert_eq!(request["tools"][0]["type"], "function");
        assert_eq!(request["tools"][0]["function"]["name"], "search");
        assert_eq!(request["tool_choice"], "auto");
    }

    #[test]
    fn plain_content_parses_as_a_reply() {
        let response: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"hi there"}}]}"#).unwrap();

        let outcome = parse_outcome(response).unwrap();
        assert_eq!(outcome, CompletionOutcome::Reply("hi there".into()));
    }

    #[test]
    fn null_content_parses_as_an_empty_reply() {
        let response: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();

        let outcome = parse_outcome(response).unwrap();
        assert_eq!(outcome, CompletionOutcome::Reply(String::new()));
    }

    #[test]
    fn tool_calls_parse_as_an_invocation() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":null,"tool_calls":[
                {"id":"call_1","type":"function",
                 "function":{"name":"search","arguments":"{\"query\":\"news\"}"}}
            ]}}]}"#,
        )
        .unwrap();

        let outcome = parse_outcome(response).unwrap();
        assert_eq!(
            outcome,
            CompletionOutcome::ToolInvocation(ToolCall {
                id: "call_1".into(),
                name: "search".into(),
                arguments: r#"{"query":"news"}"#.into(),
            })
        );
    }

    #[test]
    fn only_the_first_of_several_tool_calls_is_honored() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":null,"tool_calls":[
                {"id":"call_1","type":"function","function":{"name":"search","arguments":"{}"}},
                {"id":"call_2","type":"function","function":{"name":"search","arguments":"{}"}}
            ]}}]}"#,
        )
        .unwrap();

        match parse_outcome(response).unwrap() {
            CompletionOutcome::ToolInvocation(call) => assert_eq!(call.id, "call_1"),
            other => panic!("expected a tool invocation, got {other:?}"),
        }
    }

    #[test]
    fn empty_tool_call_list_falls_back_to_the_reply() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"plain","tool_calls":[]}}]}"#,
        )
        .unwrap();

        let outcome = parse_outcome(response).unwrap();
        assert_eq!(outcome, CompletionOutcome::Reply("plain".into()));
    }

    #[test]
    fn missing_choices_are_rejected() {
        let response: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();

        assert!(parse_outcome(response).is_err());
    }
}
