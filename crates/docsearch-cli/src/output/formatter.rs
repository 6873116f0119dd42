//! Output format selection.

use clap::ValueEnum;
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};

/// Output format for CLI results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable formatted text (default for terminals).
    #[default]
    Text,
    /// JSON format for machine consumption (default for pipes).
    Json,
    /// JSON Lines format (one JSON object per line).
    Jsonl,
    /// Bare values, one per line, for shell pipelines.
    Raw,
}

impl OutputFormat {
    /// Check if this format is machine-readable (JSON or JSONL).
    #[must_use]
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json | Self::Jsonl)
    }

    /// Returns `Text` for interactive terminals, `Json` for pipes/redirects.
    #[must_use]
    pub fn detect() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Text
        } else {
            Self::Json
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Jsonl => write!(f, "jsonl"),
            Self::Raw => write!(f, "raw"),
        }
    }
}
