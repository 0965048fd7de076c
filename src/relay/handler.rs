//! Turn relay
//!
//! The core component. One call to [`TurnRelay::handle`] processes one
//! inbound turn end to end:
//! - Session setup (token fetched once, remote conversation opened once)
//! - Command-prefix gating and forwarding of the message text
//! - Draining the remote reply stream on a sliding silence window
//! - Unconditional session persistence, on failure paths included

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::core::{InboundTurn, Reply, ReplySink, RelayResult, TurnKind};
use crate::remote::{Activity, ChannelAccount, ChannelData, ConversationClient, TokenProvider};
use crate::session::{Session, SessionStore};

use super::config::RelayConfig;
use super::speech::SpeechTemplate;

/// What became of one handled turn
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Turn processed; `delivered` counts the remote agent's relayed replies
    Completed {
        /// Number of agent replies delivered to the calling channel
        delivered: usize,
    },

    /// Message did not match the command-prefix gate; dropped by design
    Discarded,

    /// Nothing to forward (non-message activity or empty text)
    Ignored,

    /// A forwarding step failed; one error reply went to the channel
    Failed {
        /// The error message that was reported
        message: String,
    },
}

/// Relays inbound turns to a remote conversational agent and the agent's
/// replies back to the calling channel
///
/// # Example
///
/// ```ignore
/// let relay = TurnRelay::new(config, store, tokens, client);
/// let outcome = relay.handle(&turn, &sink, &cancel).await?;
/// ```
pub struct TurnRelay {
    config: RelayConfig,
    speech: SpeechTemplate,
    store: Arc<dyn SessionStore>,
    tokens: Arc<dyn TokenProvider>,
    client: Arc<dyn ConversationClient>,
}

impl TurnRelay {
    /// Create a relay from its configuration and collaborators
    pub fn new(
        config: RelayConfig,
        store: Arc<dyn SessionStore>,
        tokens: Arc<dyn TokenProvider>,
        client: Arc<dyn ConversationClient>,
    ) -> Self {
        let speech = SpeechTemplate::new(&config.voice, &config.locale);
        Self {
            config,
            speech,
            store,
            tokens,
            client,
        }
    }

    /// Get the relay configuration
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Handle one inbound turn
    ///
    /// Errors from the forwarding steps are reported to the calling channel
    /// as a single plain-text reply and folded into the returned
    /// [`TurnOutcome`]; the session is persisted either way. Only a session
    /// store failure propagates as `Err`.
    pub async fn handle(
        &self,
        turn: &InboundTurn,
        sink: &dyn ReplySink,
        cancel: &CancellationToken,
    ) -> RelayResult<TurnOutcome> {
        tracing::info!(
            "[TurnRelay] Handling turn for conversation {}",
            turn.conversation_id
        );

        let mut session = self
            .store
            .load(&turn.conversation_id)
            .await?
            .unwrap_or_default();

        let outcome = match self.relay_turn(&mut session, turn, sink, cancel).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("[TurnRelay] Error relaying turn: {}", e);
                let message = e.to_string();
                if let Err(delivery) = sink
                    .deliver(vec![Reply::text(format!("Error: {}", message))])
                    .await
                {
                    tracing::warn!(
                        "[TurnRelay] Failed to report error to channel: {}",
                        delivery
                    );
                }
                TurnOutcome::Failed { message }
            }
        };

        // Persisted with whatever values the session holds at this point, so
        // a retry after a mid-turn failure resumes instead of starting over.
        session.touch();
        self.store.write(&turn.conversation_id, &session).await?;

        Ok(outcome)
    }

    /// The fallible forwarding steps of one turn
    async fn relay_turn(
        &self,
        session: &mut Session,
        turn: &InboundTurn,
        sink: &dyn ReplySink,
        cancel: &CancellationToken,
    ) -> RelayResult<TurnOutcome> {
        let (token, conversation_id) =
            self.ensure_session(session, &turn.conversation_id).await?;

        match &turn.kind {
            TurnKind::ConversationStarted => {
                if let Some(greeting) = &self.config.greeting {
                    let reply = Reply::text(greeting)
                        .with_speak(self.speech.render(greeting))
                        .expecting_input();
                    sink.deliver(vec![reply]).await?;
                    Ok(TurnOutcome::Completed { delivered: 1 })
                } else {
                    Ok(TurnOutcome::Completed { delivered: 0 })
                }
            }

            TurnKind::Message { text } => {
                self.relay_message(session, text, &token, &conversation_id, sink, cancel)
                    .await
            }

            TurnKind::Other { name } => {
                tracing::debug!("[TurnRelay] Ignoring activity type: {}", name);
                Ok(TurnOutcome::Ignored)
            }
        }
    }

    /// Make sure the session has a token and an open remote conversation
    ///
    /// The token is fetched at most once per session lifetime. A newly
    /// opened conversation id is persisted immediately, before any message
    /// is forwarded, so a crash later in the turn never leads to a second
    /// remote conversation for the same external id.
    async fn ensure_session(
        &self,
        session: &mut Session,
        external_id: &str,
    ) -> RelayResult<(String, String)> {
        let token = match &session.token {
            Some(token) => token.clone(),
            None => {
                tracing::info!("[TurnRelay] New session for {}, fetching token", external_id);
                let token = self.tokens.fetch_token().await?;
                session.token = Some(token.clone());
                token
            }
        };

        let conversation_id = match &session.conversation_id {
            Some(id) => id.clone(),
            None => {
                let id = self.client.start_conversation(&token).await?;
                session.conversation_id = Some(id.clone());
                session.touch();
                self.store.write(external_id, session).await?;
                id
            }
        };

        Ok((token, conversation_id))
    }

    /// Forward one message and drain the remote agent's replies
    async fn relay_message(
        &self,
        session: &mut Session,
        text: &str,
        token: &str,
        conversation_id: &str,
        sink: &dyn ReplySink,
        cancel: &CancellationToken,
    ) -> RelayResult<TurnOutcome> {
        let forwarded = match self.apply_command_gate(text) {
            Some(rest) => rest,
            None => {
                tracing::info!("[TurnRelay] Discarding message without command prefix");
                return Ok(TurnOutcome::Discarded);
            }
        };

        if forwarded.is_empty() {
            tracing::debug!("[TurnRelay] Empty message text, nothing to forward");
            return Ok(TurnOutcome::Ignored);
        }

        if self.config.echo_enabled {
            sink.deliver(vec![Reply::text(format!("You said: {}", forwarded))])
                .await?;
        }

        let activity = Activity::message(
            ChannelAccount::new(&self.config.relay_sender_id, &self.config.relay_sender_name),
            forwarded,
        )
        .with_channel_data(ChannelData {
            bot_id: Some(self.config.bot_id.clone()),
            tenant_id: Some(self.config.tenant_id.clone()),
        })
        .with_locale(&self.config.locale);

        tracing::info!(
            "[TurnRelay] Forwarding message to remote conversation {}",
            conversation_id
        );
        self.client
            .post_activity(token, conversation_id, &activity)
            .await?;

        let delivered = self
            .drain_replies(token, conversation_id, &mut session.watermark, sink, cancel)
            .await?;

        Ok(TurnOutcome::Completed { delivered })
    }

    /// Apply the command-prefix gate
    ///
    /// Returns the text to forward, or `None` when the gate is enabled and
    /// the text does not start with the configured token. A match is
    /// stripped up to and including the first space; a prefix-only message
    /// strips to the empty string.
    fn apply_command_gate<'a>(&self, text: &'a str) -> Option<&'a str> {
        let Some(prefix) = &self.config.command_prefix else {
            return Some(text);
        };

        match text.get(..prefix.len()) {
            Some(head) if head.eq_ignore_ascii_case(prefix) => match text.find(' ') {
                Some(idx) => Some(&text[idx + 1..]),
                None => Some(""),
            },
            _ => None,
        }
    }

    /// Drain the remote conversation's reply stream
    ///
    /// Sliding-window termination: every cycle waits the poll interval,
    /// polls for activities since the watermark, and relays matching agent
    /// messages as one batch; a reply-bearing cycle restarts the silence
    /// window. The loop ends when the window elapses with no new matching
    /// replies, when the hard poll cap is reached, or when cancelled at a
    /// wait boundary. The reported cursor is adopted on every cycle that
    /// carries one, matching replies or not.
    async fn drain_replies(
        &self,
        token: &str,
        conversation_id: &str,
        watermark: &mut Option<String>,
        sink: &dyn ReplySink,
        cancel: &CancellationToken,
    ) -> RelayResult<usize> {
        let mut delivered = 0;
        let mut polls = 0;
        let mut window_start = Instant::now();

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("[TurnRelay] Drain cancelled after {} polls", polls);
                    break;
                }
                () = tokio::time::sleep(self.config.poll_interval) => {}
            }

            polls += 1;
            let set = self
                .client
                .get_activities(token, conversation_id, watermark.as_deref())
                .await?;

            let replies: Vec<Reply> = set
                .agent_messages(&self.config.remote_agent_name)
                .into_iter()
                .filter_map(|a| a.text.as_deref())
                .map(|text| {
                    Reply::text(text)
                        .with_speak(self.speech.render(text))
                        .expecting_input()
                })
                .collect();

            if !replies.is_empty() {
                delivered += replies.len();
                tracing::info!(
                    "[TurnRelay] Relaying {} replies (poll {})",
                    replies.len(),
                    polls
                );
                sink.deliver(replies).await?;
                window_start = Instant::now();
            }

            if let Some(next) = set.watermark {
                *watermark = Some(next);
            }

            if polls >= self.config.max_polls {
                tracing::warn!(
                    "[TurnRelay] Poll cap ({}) reached, ending drain",
                    self.config.max_polls
                );
                break;
            }

            if window_start.elapsed() >= self.config.silence_window {
                tracing::debug!("[TurnRelay] Silence window elapsed after {} polls", polls);
                break;
            }
        }

        Ok(delivered)
    }
}
