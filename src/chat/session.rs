use std::sync::Arc;

use super::completion::{CompletionOutcome, CompletionProvider};
use super::error::ChatError;
use super::history::{self, ContextId, HistoryStore};
use super::message::{Message, ToolCall};
use super::search::{self, SearchOutcome, SearchProvider};

/// Tenant-resolved settings for one turn. The command layer merges the
/// per-guild row with the process defaults before submitting.
#[derive(Debug, Clone, Default)]
pub struct TenantConfig {
    pub api_key: Option<String>,
    pub persona: Option<String>,
}

/// How many snippets a search round-trip asks for.
const SEARCH_RESULT_LIMIT: u8 = 5;

/// Drives conversation turns: owns the histories, the completion provider
/// and the optional search provider, plus the process defaults captured
/// from config at construction.
pub struct SessionManager {
    history: HistoryStore,
    completion: Arc<dyn CompletionProvider>,
    search: Option<Arc<dyn SearchProvider>>,
    default_persona: String,
    default_model: String,
}

impl SessionManager {
    pub fn new(
        history: HistoryStore,
        completion: Arc<dyn CompletionProvider>,
        search: Option<Arc<dyn SearchProvider>>,
        default_persona: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            history,
            completion,
            search,
            default_persona: default_persona.into(),
            default_model: default_model.into(),
        }
    }

    pub fn web_search_available(&self) -> bool {
        self.search.is_some()
    }

    /// Runs one conversation turn.
    ///
    /// Seeds a fresh context with the persona, appends the user message,
    /// asks the completion provider (advertising the `search` tool when
    /// tool use is allowed), runs at most one tool round-trip, appends the
    /// assistant reply and applies the retention cap. A failed first call
    /// retracts everything this turn added, so a retry starts clean.
    pub async fn submit_turn(
        &self,
        context_id: ContextId,
        user_text: &str,
        tenant: TenantConfig,
        allow_tool_use: bool,
        model: Option<&str>,
    ) -> Result<String, ChatError> {
        let api_key = tenant.api_key.ok_or(ChatError::Unconfigured)?;

        let search = match (allow_tool_use, &self.search) {
            (true, Some(search)) => Some(search.clone()),
            (true, None) => return Err(ChatError::ToolUnavailable),
            (false, _) => None,
        };

        let model = model.unwrap_or(&self.default_model);

        // the write lock is held for the whole turn: turns on the same
        // context serialize, distinct contexts proceed in parallel
        let guard = self.history.context(context_id).await;
        let mut messages = guard.lock().write().await;

        let pre_turn_len = messages.len();

        if messages.is_empty() {
            let persona = tenant
                .persona
                .unwrap_or_else(|| self.default_persona.clone());
            messages.push(Message::system(persona));
        }
        messages.push(Message::user(user_text));

        let tools = match &search {
            Some(_) => vec![search::search_tool()],
            None => Vec::new(),
        };

        let outcome = match self
            .completion
            .complete(&api_key, model, &messages, &tools)
            .await
        {
            Ok(outcome) => outcome,
            Err(why) => {
                // retract the turn so a retry does not duplicate it
                messages.truncate(pre_turn_len);
                return Err(why);
            }
        };

        let reply = match outcome {
            CompletionOutcome::Reply(text) => text,
            CompletionOutcome::ToolInvocation(call) => {
                let Some(search) = search else {
                    messages.truncate(pre_turn_len);
                    return Err(ChatError::Unexpected(anyhow::anyhow!(
                        "model called tool {:?} although none was advertised",
                        call.name
                    )));
                };

                self.run_tool_round_trip(&mut messages, &api_key, model, search, call)
                    .await?
            }
        };

        messages.push(Message::assistant(reply.clone()));
        history::apply_cap(&mut messages);

        Ok(reply)
    }

    /// Executes the single tool round-trip a turn may carry: record the
    /// call, run the search, record the result, ask again without tools.
    /// Failures past this point leave the round-trip in history.
    async fn run_tool_round_trip(
        &self,
        messages: &mut Vec<Message>,
        api_key: &str,
        model: &str,
        search: Arc<dyn SearchProvider>,
        call: ToolCall,
    ) -> Result<String, ChatError> {
        messages.push(Message::tool_request(call.clone()));

        let outcome = match parse_query(&call.arguments) {
            Some(query) => {
                log::info!("web search: {query:?}");
                SearchOutcome::from_result(search.search(&query, SEARCH_RESULT_LIMIT).await)
            }
            None => {
                log::warn!("tool call {} carried unparsable arguments", call.id);
                SearchOutcome::Error(
                    "Could not parse the search query from the tool call.".to_string(),
                )
            }
        };

        messages.push(Message::tool_result(call.id, call.name, outcome.encode()));

        // no tools on the follow-up call: one round-trip per turn
        match self.completion.complete(api_key, model, messages, &[]).await? {
            CompletionOutcome::Reply(text) => Ok(text),
            CompletionOutcome::ToolInvocation(call) => {
                Err(ChatError::Unexpected(anyhow::anyhow!(
                    "model called tool {:?} on the follow-up turn",
                    call.name
                )))
            }
        }
    }

    /// Discards the context's history. Idempotent.
    pub async fn reset_context(&self, context_id: ContextId) {
        let discarded = self.history.reset(context_id).await;
        log::info!("context {context_id} reset, {discarded} messages discarded");
    }
}

fn parse_query(arguments: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(arguments).ok()?;
    parsed.get("query")?.as_str().map(str::to_owned)
}
