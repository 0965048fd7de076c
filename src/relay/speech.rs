//! Speech-markup rendering
//!
//! Replies carry a `speak` field so voice channels can read them out. The
//! rendering is literal template substitution: the reply text is escaped
//! and dropped into a fixed voice/locale SSML shell. Anything beyond that
//! (prosody, synthesis) is the channel's business.

/// Voice/locale template for speech markup
#[derive(Debug, Clone)]
pub struct SpeechTemplate {
    voice: String,
    locale: String,
}

impl SpeechTemplate {
    /// Create a template for the given voice and locale
    pub fn new(voice: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            voice: voice.into(),
            locale: locale.into(),
        }
    }

    /// Render the speech markup for one reply text
    pub fn render(&self, text: &str) -> String {
        format!(
            "<speak version=\"1.0\" xml:lang=\"{}\"><voice name=\"{}\">{}</voice></speak>",
            self.locale,
            self.voice,
            escape_xml(text)
        )
    }
}

/// Escape text for inclusion in markup
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
