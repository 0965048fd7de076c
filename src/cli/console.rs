use colored::*;
use std::io::{self, Write};

use crate::core::{Reply, ReplySink, RelayResult};

/// Console handles terminal I/O for the demo channel with colored formatting
pub struct Console {
    user_color: Color,
    agent_color: Color,
    show_speech: bool,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            user_color: Color::Cyan,
            agent_color: Color::Green,
            show_speech: false,
        }
    }

    /// Also print each reply's speech markup (dimmed)
    pub fn with_speech(mut self) -> Self {
        self.show_speech = true;
        self
    }

    /// Print a user message with colored formatting
    pub fn print_user(&self, message: &str) {
        println!("{} {}", "User:".color(self.user_color).bold(), message);
    }

    /// Print one relayed reply
    pub fn print_reply(&self, reply: &Reply) {
        println!(
            "{} {}",
            "Agent:".color(self.agent_color).bold(),
            reply.text.color(self.agent_color)
        );
        if self.show_speech {
            if let Some(ref speak) = reply.speak {
                println!("  {}", speak.bright_black());
            }
        }
    }

    /// Print a system message (status, info)
    pub fn print_system(&self, message: &str) {
        println!("{} {}", "System:".yellow().bold(), message);
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    /// Read a line of input from the user
    pub fn read_input(&self) -> io::Result<String> {
        print!("{} ", ">".color(self.user_color).bold());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    /// Print a welcome banner
    pub fn print_banner(&self) {
        println!("{}", "=".repeat(60).bright_blue());
        println!("{}", "  Turn Relay - console channel".bright_blue().bold());
        println!("{}", "=".repeat(60).bright_blue());
        println!();
        println!("Type your message and press Enter. Type 'exit' or 'quit' to end the session.");
        println!();
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ReplySink for Console {
    async fn deliver(&self, replies: Vec<Reply>) -> RelayResult<()> {
        for reply in &replies {
            self.print_reply(reply);
        }
        Ok(())
    }
}
