//! Append-only annotation and thread mutations, plus agent replies

use crate::{WatchdogConfig, WatchdogError};
use gadfly_domain::traits::{GenerateOptions, KnowledgeStore, ReasoningService};
use gadfly_domain::{
    Annotation, AnnotationId, ConversationMessage, EntryId, KnowledgeEntry, Role,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Agent reply recorded when the service returns no text
pub const EMPTY_REPLY: &str = "Neural link interrupted during response.";

/// Prompt asking the annotation's agent to answer the user
///
/// The thread is replayed in order. `user_message` is appended as a final
/// `USER:` line unless the thread already ends with it.
pub fn build_reply_prompt(
    entry: &KnowledgeEntry,
    annotation: &Annotation,
    user_message: &str,
    word_limit: usize,
) -> String {
    let already_appended = annotation
        .thread
        .last()
        .is_some_and(|m| m.role == Role::User && m.content == user_message);

    let mut thread = annotation.thread_transcript();
    if !already_appended {
        if !thread.is_empty() {
            thread.push('\n');
        }
        thread.push_str(&format!("USER: {}", user_message));
    }

    format!(
        "GADFLY AGENT INTERFACE\n\
         Agent: {agent}\n\
         Original Objection: {objection}\n\
         Target Intel: {summary}\n\n\
         [CONVERSATION THREAD]\n{thread}\n\n\
         TASK:\n\
         As the {agent}, answer the user's defense or question. \
         Stay analytical and objective and do not apologize. \
         Point out weak evidence; acknowledge a valid counter-argument.\n\n\
         Response Limit: {limit} words.",
        agent = annotation.agent,
        objection = annotation.message,
        summary = entry.summary,
        thread = thread,
        limit = word_limit,
    )
}

/// Mutation surface for annotations and their conversation threads
///
/// Every mutation appends; existing threads are never rewritten.
pub struct AnnotationManager<S, R> {
    store: Arc<S>,
    service: Arc<R>,
    config: WatchdogConfig,
}

impl<S, R> Clone for AnnotationManager<S, R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            service: Arc::clone(&self.service),
            config: self.config.clone(),
        }
    }
}

impl<S, R> AnnotationManager<S, R>
where
    S: KnowledgeStore + 'static,
    R: ReasoningService + 'static,
{
    /// Create a manager with default timing
    pub fn new(store: Arc<S>, service: Arc<R>) -> Self {
        Self::with_config(store, service, WatchdogConfig::default())
    }

    /// Create a manager with custom configuration
    pub fn with_config(store: Arc<S>, service: Arc<R>, config: WatchdogConfig) -> Self {
        Self {
            store,
            service,
            config,
        }
    }

    pub(crate) fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub(crate) fn service(&self) -> &Arc<R> {
        &self.service
    }

    /// Attach an annotation to an entry
    pub fn append_annotation(
        &self,
        entry_id: EntryId,
        annotation: Annotation,
    ) -> Result<AnnotationId, WatchdogError> {
        let id = annotation.id;
        let kind = annotation.kind;
        self.store
            .append_annotation(entry_id, annotation)
            .map_err(|e| WatchdogError::Store(e.to_string()))?;
        debug!("Appended {} annotation {} to {}", kind.as_str(), id, entry_id);
        Ok(id)
    }

    /// Append a message to an annotation's thread
    pub fn append_reply(
        &self,
        entry_id: EntryId,
        annotation_id: AnnotationId,
        message: ConversationMessage,
    ) -> Result<(), WatchdogError> {
        self.store
            .append_thread_message(entry_id, annotation_id, message)
            .map_err(|e| WatchdogError::Store(e.to_string()))
    }

    /// Record a user reply and schedule the agent's answer
    ///
    /// The user message is appended before this returns, so replies sent
    /// in sequence land in the thread in that order. The agent answers
    /// after the configured reply delay; failures there are logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the user message cannot be appended.
    pub fn reply_to_agent(
        &self,
        entry_id: EntryId,
        annotation_id: AnnotationId,
        text: impl Into<String>,
    ) -> Result<JoinHandle<()>, WatchdogError> {
        let text = text.into();
        self.append_reply(entry_id, annotation_id, ConversationMessage::user(text.clone()))?;

        let manager = self.clone();
        let delay = self.config.reply_delay();
        Ok(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = match manager.generate_agent_reply(entry_id, annotation_id, &text).await {
                Ok(Some(reply)) => reply,
                Ok(None) => return,
                Err(e) => {
                    error!("Agent reply for annotation {} failed: {}", annotation_id, e);
                    return;
                }
            };
            if let Err(e) = manager.append_reply(entry_id, annotation_id, reply) {
                error!("Failed to append agent reply to {}: {}", annotation_id, e);
            }
        }))
    }

    /// Generate the agent's answer to `user_message`
    ///
    /// Returns `None` when the entry or annotation is gone, the service is
    /// unconfigured, or generation fails.
    pub async fn generate_agent_reply(
        &self,
        entry_id: EntryId,
        annotation_id: AnnotationId,
        user_message: &str,
    ) -> Result<Option<ConversationMessage>, WatchdogError> {
        if !self.service.is_configured() {
            debug!("Agent reply skipped: reasoning service not configured");
            return Ok(None);
        }

        let entry = self
            .store
            .get_entry(entry_id)
            .map_err(|e| WatchdogError::Store(e.to_string()))?;
        let Some(entry) = entry else {
            return Ok(None);
        };
        let Some(annotation) = entry.annotations.iter().find(|a| a.id == annotation_id) else {
            return Ok(None);
        };

        let prompt = build_reply_prompt(&entry, annotation, user_message, self.config.reply_word_limit);
        let options = GenerateOptions::new(
            format!(
                "You are the {}. You prioritize intellectual honesty and falsification.",
                annotation.agent
            ),
            self.config.reply_temperature,
        )
        .with_max_output_tokens(self.config.reply_max_tokens);

        match self.service.generate(&prompt, &options).await {
            Ok(generation) if generation.text.trim().is_empty() => {
                Ok(Some(ConversationMessage::agent(EMPTY_REPLY)))
            }
            Ok(generation) => Ok(Some(ConversationMessage::agent(generation.text))),
            Err(e) => {
                error!("Agent reply generation failed: {}", e);
                Ok(None)
            }
        }
    }
}
