//! Terminal rendering and input parsing for the board.

use crate::models::Board;

/// A line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Zero-based position on the board
    Address { category: usize, clue: usize },
    Restart,
    Show,
    Help,
    Quit,
    Unknown(String),
}

/// Parse `<column> <row>` (1-based, as printed) or a keyword.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "r" | "restart" => return Command::Restart,
        "s" | "show" | "" => return Command::Show,
        "h" | "help" | "?" => return Command::Help,
        "q" | "quit" | "exit" => return Command::Quit,
        _ => {}
    }

    let mut parts = line.split(|c: char| c.is_whitespace() || c == ',' || c == '-');
    let mut next_index = || {
        parts
            .by_ref()
            .find(|p| !p.is_empty())
            .and_then(|p| p.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
    };

    match (next_index(), next_index(), next_index()) {
        (Some(category), Some(clue), None) => Command::Address { category, clue },
        _ => Command::Unknown(line.to_string()),
    }
}

pub const HELP: &str = "\
Commands:
  <column> <row>   reveal the question, then the answer (e.g. `3 2`)
  r, restart       deal a new board
  s, show          redraw the board
  q, quit          leave";

/// Fit `text` into exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return format!("{text:<width$}");
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Render the board as a fixed-width grid.
pub fn render_board(board: &Board, placeholder: &str, column_width: usize) -> String {
    let columns = board.categories.len();
    // Tallest column; shorter ones pad with the placeholder
    let rows = board
        .categories
        .iter()
        .map(|c| c.clues.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();

    let rule = format!(
        "----+{}",
        vec!["-".repeat(column_width + 2); columns].join("+")
    );

    out.push_str("    |");
    for (i, category) in board.categories.iter().enumerate() {
        let label = format!("{}. {}", i + 1, category.title);
        out.push_str(&format!(" {} |", fit(&label, column_width)));
    }
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("{:>3} |", row + 1));
        for category in &board.categories {
            let text = category
                .clues
                .get(row)
                .map_or(placeholder, |clue| clue.display_text(placeholder));
            out.push_str(&format!(" {} |", fit(text, column_width)));
        }
        out.push('\n');
    }

    out.push_str(&rule);
    out.push('\n');
    out
}
