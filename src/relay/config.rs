//! Relay configuration
//!
//! All knobs for the relay live in one immutable value passed in at
//! construction: endpoints, identities, polling cadence, and the feature
//! toggles for greeting/echo/command-gate behavior.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Configuration for a TurnRelay
///
/// Use the builder pattern to configure the relay:
///
/// ```ignore
/// let config = RelayConfig::new("https://tokens.example.com/generate", "bot-1", "tenant-1")
///     .with_messaging_base_url("https://messaging.example.com/v3")
///     .with_remote_agent_name("helpdesk")
///     .with_command_prefix("OK")
///     .with_greeting("Hi! Ask me anything.")
///     .with_echo(true);
/// ```
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Token endpoint URL (queried with botId/tenantId)
    pub token_endpoint: String,

    /// Base URL of the remote messaging service
    pub messaging_base_url: String,

    /// Bot identifier forwarded as channel metadata
    pub bot_id: String,

    /// Tenant identifier forwarded as channel metadata
    pub tenant_id: String,

    /// Fixed sender id stamped on forwarded activities
    pub relay_sender_id: String,

    /// Fixed sender display name stamped on forwarded activities
    pub relay_sender_name: String,

    /// Sender name the remote agent replies under; only matching message
    /// activities are relayed back to the user
    pub remote_agent_name: String,

    /// Delay between polls of the reply stream
    pub poll_interval: Duration,

    /// How long to keep polling after the last matching reply
    pub silence_window: Duration,

    /// Hard upper bound on polls per drain, as a safety net under a remote
    /// agent that never goes silent
    pub max_polls: usize,

    /// Whether to acknowledge each forwarded message with "You said: ..."
    pub echo_enabled: bool,

    /// When set, inbound text must start with this token (case-insensitive)
    /// to be forwarded; the token is stripped before forwarding
    pub command_prefix: Option<String>,

    /// Reply emitted when the calling channel opens a conversation
    pub greeting: Option<String>,

    /// Locale stamped on forwarded activities and the speech template
    pub locale: String,

    /// Voice name used in the speech-markup template
    pub voice: String,
}

impl RelayConfig {
    /// Create a configuration with defaults for everything but the token
    /// endpoint and channel identity
    pub fn new(
        token_endpoint: impl Into<String>,
        bot_id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            token_endpoint: token_endpoint.into(),
            messaging_base_url: String::new(),
            bot_id: bot_id.into(),
            tenant_id: tenant_id.into(),
            relay_sender_id: "relay".to_string(),
            relay_sender_name: "relay".to_string(),
            remote_agent_name: String::new(),
            poll_interval: Duration::from_millis(500),
            silence_window: Duration::from_secs(3),
            max_polls: 120,
            echo_enabled: false,
            command_prefix: None,
            greeting: None,
            locale: "en-US".to_string(),
            voice: "en-US-JennyNeural".to_string(),
        }
    }

    /// Set the messaging service base URL
    pub fn with_messaging_base_url(mut self, url: impl Into<String>) -> Self {
        self.messaging_base_url = url.into();
        self
    }

    /// Set the sender identity stamped on forwarded activities
    pub fn with_relay_sender(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.relay_sender_id = id.into();
        self.relay_sender_name = name.into();
        self
    }

    /// Set the remote agent's sender name
    pub fn with_remote_agent_name(mut self, name: impl Into<String>) -> Self {
        self.remote_agent_name = name.into();
        self
    }

    /// Set the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the silence window
    pub fn with_silence_window(mut self, window: Duration) -> Self {
        self.silence_window = window;
        self
    }

    /// Set the hard poll cap per drain
    pub fn with_max_polls(mut self, max: usize) -> Self {
        self.max_polls = max;
        self
    }

    /// Enable or disable the "You said: ..." acknowledgement
    pub fn with_echo(mut self, enabled: bool) -> Self {
        self.echo_enabled = enabled;
        self
    }

    /// Require inbound text to start with the given token
    pub fn with_command_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = Some(prefix.into());
        self
    }

    /// Emit a greeting when the calling channel opens a conversation
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Set the voice and locale for speech-markup rendering
    pub fn with_voice(mut self, voice: impl Into<String>, locale: impl Into<String>) -> Self {
        self.voice = voice.into();
        self.locale = locale.into();
        self
    }

    /// Create a configuration from environment variables
    ///
    /// Reads from:
    /// - `RELAY_TOKEN_ENDPOINT` (required)
    /// - `RELAY_MESSAGING_URL` (required)
    /// - `RELAY_BOT_ID` (required)
    /// - `RELAY_TENANT_ID` (required)
    /// - `RELAY_AGENT_NAME` (required)
    /// - `RELAY_POLL_INTERVAL_MS` (optional, defaults to 500)
    /// - `RELAY_SILENCE_WINDOW_MS` (optional, defaults to 3000)
    /// - `RELAY_COMMAND_PREFIX` (optional, gate disabled when unset)
    /// - `RELAY_GREETING` (optional, no greeting when unset)
    /// - `RELAY_ECHO` (optional, "1"/"true" enables the acknowledgement)
    /// - `RELAY_VOICE` / `RELAY_LOCALE` (optional)
    pub fn from_env() -> Result<Self> {
        let token_endpoint = env::var("RELAY_TOKEN_ENDPOINT")
            .context("RELAY_TOKEN_ENDPOINT environment variable not set")?;
        let messaging_url = env::var("RELAY_MESSAGING_URL")
            .context("RELAY_MESSAGING_URL environment variable not set")?;
        let bot_id =
            env::var("RELAY_BOT_ID").context("RELAY_BOT_ID environment variable not set")?;
        let tenant_id =
            env::var("RELAY_TENANT_ID").context("RELAY_TENANT_ID environment variable not set")?;
        let agent_name = env::var("RELAY_AGENT_NAME")
            .context("RELAY_AGENT_NAME environment variable not set")?;

        let poll_interval = env::var("RELAY_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(500));

        let silence_window = env::var("RELAY_SILENCE_WINDOW_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_secs(3));

        let echo_enabled = env::var("RELAY_ECHO")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let mut config = Self::new(token_endpoint, bot_id, tenant_id)
            .with_messaging_base_url(messaging_url)
            .with_remote_agent_name(agent_name)
            .with_poll_interval(poll_interval)
            .with_silence_window(silence_window)
            .with_echo(echo_enabled);

        if let Ok(prefix) = env::var("RELAY_COMMAND_PREFIX") {
            config = config.with_command_prefix(prefix);
        }
        if let Ok(greeting) = env::var("RELAY_GREETING") {
            config = config.with_greeting(greeting);
        }
        if let (Ok(voice), Ok(locale)) = (env::var("RELAY_VOICE"), env::var("RELAY_LOCALE")) {
            config = config.with_voice(voice, locale);
        }

        Ok(config)
    }
}
