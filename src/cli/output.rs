//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::DecodedRecord;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of credentials (Id, Website, Username, Email, Password, Modified).
///
/// Passwords are masked; unreadable ones are marked instead.
pub fn print_records_table(records: &[&DecodedRecord]) {
    if records.is_empty() {
        info("No credentials to show.");
        tip("Run `passvault add <WEBSITE>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Website", "Username", "Email", "Password", "Modified"]);

    for decoded in records {
        let r = &decoded.record;
        let password = if decoded.password_unreadable {
            style("<unreadable>").red().to_string()
        } else {
            r.masked_password()
        };
        table.add_row(vec![
            r.id.to_string(),
            r.website.clone(),
            r.username.clone(),
            r.email.clone(),
            password,
            r.modified_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
}
