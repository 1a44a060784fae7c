//! `passvault audit` — show recent vault activity.
//!
//! `--since` takes a look-back window such as `30m`, `24h`, `7d` or `2w`.

use chrono::{DateTime, TimeDelta, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::audit::{AuditEntry, AuditLog};
use crate::cli::output;
use crate::cli::Cli;
use crate::errors::{Result, VaultError};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let cutoff = since.map(since_cutoff).transpose()?;

    let audit = AuditLog::open(&cli.vault_dir())
        .ok_or_else(|| VaultError::AuditError("failed to open audit database".into()))?;
    let entries = audit.query(last, cutoff)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    println!("{}", activity_table(&entries));
    Ok(())
}

/// Turn a look-back window into the oldest timestamp to include.
fn since_cutoff(window: &str) -> Result<DateTime<Utc>> {
    let window = window.trim();
    let bad = |why: &str| {
        VaultError::CommandFailed(format!(
            "invalid --since '{window}': {why} (examples: 30m, 24h, 7d, 2w)"
        ))
    };

    let Some(unit) = window.chars().last() else {
        return Err(bad("empty window"));
    };
    let amount: i64 = window[..window.len() - unit.len_utf8()]
        .parse()
        .map_err(|_| bad("expected a whole number before the unit"))?;
    if amount < 0 {
        return Err(bad("window cannot be negative"));
    }

    let delta = match unit {
        'm' => TimeDelta::try_minutes(amount),
        'h' => TimeDelta::try_hours(amount),
        'd' => TimeDelta::try_days(amount),
        'w' => TimeDelta::try_weeks(amount),
        _ => return Err(bad("unit must be m, h, d or w")),
    }
    .ok_or_else(|| bad("window is too large"))?;

    Utc::now()
        .checked_sub_signed(delta)
        .ok_or_else(|| bad("window is too large"))
}

fn activity_table(entries: &[AuditEntry]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["When (UTC)", "Action", "Record", "Details"]);

    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            styled_action(&entry.operation),
            entry.record_id.map(|id| format!("#{id}")).unwrap_or_default(),
            entry.details.clone().unwrap_or_default(),
        ]);
    }
    table
}

fn styled_action(action: &str) -> String {
    let styled = match action {
        "init" => style(action).green(),
        "add" | "edit" => style(action).blue(),
        "delete" => style(action).red(),
        "unlock" => style(action).yellow(),
        "copy" => style(action).cyan(),
        _ => style(action),
    };
    styled.to_string()
}
