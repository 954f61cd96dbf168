//! `show` presentation: detail table, components and operation phases.

use super::shared::{format_heading, format_relative_time, new_table, or_missing};
use crate::types::Stack;
use chrono::{DateTime, Utc};

pub fn format_stack_detail(stack: &Stack, now: DateTime<Utc>, color: bool) -> String {
    let operation = &stack.latest_operation;
    let mut details = new_table(Vec::new());
    details.add_row(vec!["Stack ID", or_missing(&stack.id)]);
    details.add_row(vec!["Stack Name", or_missing(&stack.name)]);
    details.add_row(vec!["Latest Status", or_missing(&stack.status)]);
    details.add_row(vec![
        "Last Updated".to_string(),
        format_relative_time(operation.timestamp, now),
    ]);
    details.add_row(vec!["Initiator", or_missing(&operation.initiator)]);
    details.add_row(vec!["State File Location", or_missing(&stack.state_location.uri)]);

    let mut components = new_table(vec!["COMPONENT NAME", "STATUS"]);
    for component in &stack.components {
        components.add_row(vec![or_missing(&component.name), or_missing(&component.status)]);
    }

    let mut out = format!(
        "{}\n{}\n\n{}",
        format_heading(&format!("Showing details of [{}]", stack.id), color),
        details,
        components
    );

    if !operation.phases.is_empty() {
        let mut phases = new_table(vec!["PHASE", "STATUS"]);
        for phase in &operation.phases {
            phases.add_row(vec![or_missing(&phase.phase), or_missing(&phase.status)]);
        }
        out.push_str(&format!("\n\n{}", phases));
    }
    out
}
