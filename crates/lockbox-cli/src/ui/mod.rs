//! Terminal output helpers.
//!
//! Color is enabled only when stdout is a TTY, `NO_COLOR` is unset,
//! and the terminal is not dumb. All user-facing lines go through
//! these helpers so interactive and scripted runs print the same text.

use std::io::IsTerminal;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;

use lockbox_core::RetrievedBlob;

/// Message shown in place of items the passkey could not open. Matches
/// the vault's own wording so scripts see one string for this case.
const UNREADABLE: &str = "Incorrect passkey or corrupted data";

/// Whether stdout should carry ANSI colors.
pub fn color_enabled() -> bool {
    let is_tty = std::io::stdout().is_terminal();
    let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
    let no_color = std::env::var("NO_COLOR").is_ok();
    is_tty && !no_color && !term_is_dumb
}

/// Print a success line to stdout.
pub fn print_success(message: &str) {
    if color_enabled() {
        println!("{}", message.green());
    } else {
        println!("{}", message);
    }
}

/// Print an error line to stderr.
pub fn print_error(message: &str) {
    if color_enabled() {
        eprintln!("{} {}", "Error:".red(), message);
    } else {
        eprintln!("Error: {}", message);
    }
}

/// Print a warning line to stdout.
pub fn print_warning(message: &str) {
    if color_enabled() {
        println!("{}", message.yellow());
    } else {
        println!("{}", message);
    }
}

/// Print an informational line to stdout.
pub fn print_info(message: &str) {
    println!("{}", message);
}

/// Render retrieved items as a table. Items the passkey failed to open
/// keep their row so numbering stays stable across passkeys.
pub fn blob_table(items: &[RetrievedBlob]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Data"]);
    let color = color_enabled();
    for item in items {
        let index = Cell::new(item.index);
        let value = match &item.plaintext {
            Some(text) => Cell::new(text),
            None if color => Cell::new(UNREADABLE).fg(Color::Red),
            None => Cell::new(UNREADABLE),
        };
        table.add_row(vec![index, value]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_matches_vault_wording() {
        assert_eq!(
            UNREADABLE,
            lockbox_core::VaultError::DecryptionFailure.to_string()
        );
    }

    #[test]
    fn test_blob_table_shows_plaintext_and_failures() {
        let items = vec![
            RetrievedBlob {
                index: 1,
                plaintext: Some("first".to_string()),
            },
            RetrievedBlob {
                index: 2,
                plaintext: None,
            },
        ];
        let rendered = blob_table(&items).to_string();
        assert!(rendered.contains("first"));
        assert!(rendered.contains(UNREADABLE));
        assert!(rendered.contains("Data"));
    }

    #[test]
    fn test_blob_table_keeps_original_numbering() {
        let items = vec![RetrievedBlob {
            index: 3,
            plaintext: None,
        }];
        let rendered = blob_table(&items).to_string();
        assert!(rendered.contains('3'));
    }
}
