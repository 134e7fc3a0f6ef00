//! 3.0.0 r3 -> 3.1.0 r1: custom event variables become local and pass by reference.
//!
//! Custom event definitions used to share the project's global variables by
//! slot number. From 3.1.0 their slots are local variables named `V<slot>`,
//! calls bind caller values to them as `{type: "variable"}` unions, and
//! engine field stores always name a target variable.

use gbsproj_domain::{
    is_local_variable_id, to_local_variable_id, CustomEvent, EventNode, Project, VariableTable,
};

use crate::use_cases::migration::rules::{RewriteContext, RewriteRules};
use crate::use_cases::migration::walker::{map_entity_scripts, walk_events, WalkOrder};

/// Prefixes local variable references in a single custom event script node
pub fn migrate_script_event(node: EventNode, rules: &RewriteRules) -> EventNode {
    rules.rewrite_variables(node)
}

/// Rewrites a single node for its scope: call expansion, field defaults and,
/// inside custom event scripts, local variable references
pub fn migrate_event(node: EventNode, rules: &RewriteRules, ctx: &RewriteContext<'_>) -> EventNode {
    rules.rewrite_event(node, ctx)
}

/// Rewrites every node of an event list, nested branches included.
///
/// Parent-first: a node is rewritten against its original children.
pub fn migrate_event_list(
    events: Vec<EventNode>,
    rules: &RewriteRules,
    ctx: &RewriteContext<'_>,
) -> Vec<EventNode> {
    walk_events(events, WalkOrder::ParentFirst, &mut |node| {
        migrate_event(node, rules, ctx)
    })
}

/// Migrates a custom event definition.
///
/// Variable slots are re-keyed `<slot>` -> `V<slot>` and marked pass by
/// reference; the actor table is left alone. `custom_events` is the
/// pre-migration table calls in the script resolve against.
pub fn migrate_custom_event(
    mut custom_event: CustomEvent,
    rules: &RewriteRules,
    custom_events: &[CustomEvent],
) -> CustomEvent {
    let original_variables = custom_event.variables.clone();

    if let Some(script) = custom_event.script.take() {
        let ctx = RewriteContext::new(custom_events).in_custom_event(original_variables.as_ref());
        custom_event.script = Some(migrate_event_list(script, rules, &ctx));
    }

    custom_event.variables = custom_event.variables.map(migrate_variable_table);
    custom_event
}

fn migrate_variable_table(variables: VariableTable) -> VariableTable {
    variables
        .into_iter()
        .map(|(slot, mut variable)| {
            if is_local_variable_id(&slot) {
                variable.pass_by_reference.get_or_insert(true);
            } else {
                variable.pass_by_reference = Some(true);
            }
            variable.id = to_local_variable_id(&variable.id);
            (to_local_variable_id(&slot), variable)
        })
        .collect()
}

/// Applies the 3.1.0 r1 rewrites to every scene entity script and custom event
pub fn migrate_300r3_to_310r1(mut project: Project, rules: &RewriteRules) -> Project {
    let custom_events = std::mem::take(&mut project.custom_events);

    let scene_ctx = RewriteContext::new(&custom_events);
    project.scenes = map_entity_scripts(std::mem::take(&mut project.scenes), |script| {
        migrate_event_list(script, rules, &scene_ctx)
    });

    project.custom_events = custom_events
        .iter()
        .cloned()
        .map(|event| migrate_custom_event(event, rules, &custom_events))
        .collect();

    project
}
