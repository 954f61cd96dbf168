//! `ls` presentation: stack table, truncated client-side.

use super::shared::{format_heading, format_relative_time, new_table, or_missing};
use crate::types::Stack;
use chrono::{DateTime, Utc};

/// Maximum rows rendered by the stack table.
pub const LIST_LIMIT: usize = 20;

pub const NOTHING_FOUND: &str = "Nothing has been found";

/// Heading plus `ID | NAME | STATUS | UPDATED | INITIATOR` for the first
/// [`LIST_LIMIT`] stacks, in the order given.
pub fn format_stack_table(
    project: &str,
    stacks: &[Stack],
    now: DateTime<Utc>,
    color: bool,
) -> String {
    if stacks.is_empty() {
        return NOTHING_FOUND.to_string();
    }
    let mut table = new_table(vec!["ID", "NAME", "STATUS", "UPDATED", "INITIATOR"]);
    for stack in stacks.iter().take(LIST_LIMIT) {
        let operation = &stack.latest_operation;
        table.add_row(vec![
            or_missing(&stack.id).to_string(),
            or_missing(&stack.name).to_string(),
            or_missing(&stack.status).to_string(),
            format_relative_time(operation.timestamp, now),
            or_missing(&operation.initiator).to_string(),
        ]);
    }
    let heading = format_heading(&format!("Listing Stacks in [{}] GCP project", project), color);
    format!("{}\n\n{}", heading, table)
}
