use agentweb_core::types::{Direction, Turn};
use colored::Colorize;

/// One transcript line, labelled by which side spoke
pub fn render_turn(turn: &Turn) -> String {
    match turn.direction() {
        Direction::Outgoing => format!("{} {}", "You:".bright_green().bold(), turn.content),
        Direction::Incoming => format!("{} {}", "Agent:".bright_cyan().bold(), turn.content),
    }
}

/// Prints only what changed between successive transcripts.
///
/// The server copy is authoritative: when a transcript no longer begins with
/// what was already shown (cleared, or rewritten by another client), it is
/// printed again from the top.
#[derive(Debug, Default)]
pub struct TranscriptPrinter {
    shown: Vec<Turn>,
}

impl TranscriptPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, transcript: &[Turn]) -> Vec<String> {
        let mut lines = Vec::new();
        if !transcript.starts_with(&self.shown) {
            let note = if transcript.is_empty() {
                "(history cleared)"
            } else {
                "(history changed)"
            };
            lines.push(note.bright_black().to_string());
            self.shown.clear();
        }
        lines.extend(transcript[self.shown.len()..].iter().map(render_turn));
        self.shown = transcript.to_vec();
        lines
    }
}
