//! Command rewrite rules.
//!
//! The command catalog is resolved once into a `command id -> [ArgRewrite]`
//! table. Rewriting a node is then a lookup plus a fold over the node's
//! arguments, whatever command it is and wherever it sits in the tree.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde_json::Value;

use gbsproj_domain::commands::EVENT_CALL_CUSTOM_EVENT;
use gbsproj_domain::{
    is_local_variable_id, to_local_variable_id, ArgValue, CustomEvent, EventArgs, EventNode,
    UnionKind, VariableTable,
};

use crate::infrastructure::catalog::{CommandCatalog, FieldKind};

/// Argument naming the custom event a call invokes
pub const CUSTOM_EVENT_ID_ARG: &str = "customEventId";

static VARIABLE_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$variable\[([^\]]+)\]\$$").expect("valid regex"));

/// Argument key binding a caller value to a custom event variable slot
pub fn variable_param_key(slot: &str) -> String {
    format!("$variable[{}]$", slot)
}

/// The slot named by a `$variable[<slot>]$` argument key
pub fn variable_param_slot(key: &str) -> Option<&str> {
    VARIABLE_PARAM_RE
        .captures(key)
        .and_then(|caps| caps.get(1))
        .map(|slot| slot.as_str())
}

/// A single argument rewrite
#[derive(Debug, Clone, PartialEq)]
pub enum ArgRewrite {
    /// Field storing a variable id as a bare scalar
    VariableReference { field: String },
    /// Field storing a `{type, value}` union
    UnionVariable { field: String },
    /// `$variable[..]$` parameters of a custom event call
    CustomEventCall,
    /// Field filled with `value` when absent
    DefaultValue { field: String, value: Value },
}

impl ArgRewrite {
    fn is_variable_rewrite(&self) -> bool {
        matches!(
            self,
            Self::VariableReference { .. } | Self::UnionVariable { .. }
        )
    }
}

/// Which kind of script an event list belongs to
#[derive(Debug, Clone, Copy, Default)]
pub enum ScriptScope<'a> {
    /// Scene, actor or trigger script; variable ids are global
    #[default]
    Entity,
    /// Custom event definition script; numeric ids name the definition's own slots
    CustomEvent {
        variables: Option<&'a VariableTable>,
    },
}

impl ScriptScope<'_> {
    pub fn is_custom_event(&self) -> bool {
        matches!(self, Self::CustomEvent { .. })
    }
}

/// What a rewrite may consult besides the node itself
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    /// Custom event definitions as they were before the current stage
    pub custom_events: &'a [CustomEvent],
    pub scope: ScriptScope<'a>,
}

impl<'a> RewriteContext<'a> {
    pub fn new(custom_events: &'a [CustomEvent]) -> Self {
        Self {
            custom_events,
            scope: ScriptScope::Entity,
        }
    }

    pub fn in_custom_event(mut self, variables: Option<&'a VariableTable>) -> Self {
        self.scope = ScriptScope::CustomEvent { variables };
        self
    }

    fn custom_event(&self, id: &str) -> Option<&'a CustomEvent> {
        self.custom_events
            .iter()
            .find(|event| event.id.as_deref() == Some(id))
    }
}

/// Rewrite strategies keyed by command id
#[derive(Debug, Clone, Default)]
pub struct RewriteRules {
    by_command: HashMap<String, Vec<ArgRewrite>>,
}

impl RewriteRules {
    /// Resolves the catalog into rewrite strategies.
    ///
    /// Per command, variable rewrites run first, then the call rule, then
    /// field defaults. Defaults are written as given and never prefixed.
    pub fn from_catalog(catalog: &CommandCatalog) -> Self {
        let mut by_command: HashMap<String, Vec<ArgRewrite>> = catalog
            .iter()
            .filter_map(|(command, descriptor)| {
                let mut rewrites: Vec<ArgRewrite> = descriptor
                    .fields
                    .iter()
                    .filter_map(|field| match field.kind {
                        FieldKind::Variable => Some(ArgRewrite::VariableReference {
                            field: field.key.clone(),
                        }),
                        FieldKind::Union => Some(ArgRewrite::UnionVariable {
                            field: field.key.clone(),
                        }),
                        FieldKind::Other => None,
                    })
                    .collect();
                rewrites.extend(descriptor.fields.iter().filter_map(|field| {
                    field
                        .migration_default
                        .clone()
                        .map(|value| ArgRewrite::DefaultValue {
                            field: field.key.clone(),
                            value,
                        })
                }));
                (!rewrites.is_empty()).then(|| (command.to_string(), rewrites))
            })
            .collect();

        let call = by_command
            .entry(EVENT_CALL_CUSTOM_EVENT.to_string())
            .or_default();
        let first_default = call
            .iter()
            .position(|rewrite| matches!(rewrite, ArgRewrite::DefaultValue { .. }))
            .unwrap_or(call.len());
        call.insert(first_default, ArgRewrite::CustomEventCall);

        Self { by_command }
    }

    pub fn for_command(&self, command: &str) -> &[ArgRewrite] {
        self.by_command
            .get(command)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Prefixes local variable references in one node's arguments.
    ///
    /// Assumes the node lives in a custom event script. Does not recurse.
    pub fn rewrite_variables(&self, node: EventNode) -> EventNode {
        self.for_command(&node.command)
            .iter()
            .filter(|rewrite| rewrite.is_variable_rewrite())
            .fold(node, |node, rewrite| apply_variable_rewrite(node, rewrite, None))
    }

    /// Applies every rule for the node's command that holds in `ctx`'s scope.
    /// Does not recurse.
    pub fn rewrite_event(&self, node: EventNode, ctx: &RewriteContext<'_>) -> EventNode {
        self.for_command(&node.command)
            .iter()
            .fold(node, |node, rewrite| match (rewrite, ctx.scope) {
                (
                    ArgRewrite::VariableReference { .. } | ArgRewrite::UnionVariable { .. },
                    ScriptScope::CustomEvent { variables },
                ) => apply_variable_rewrite(node, rewrite, variables),
                (ArgRewrite::VariableReference { .. } | ArgRewrite::UnionVariable { .. }, _) => {
                    node
                }
                (ArgRewrite::CustomEventCall, _) => rewrite_custom_event_call(node, ctx),
                (ArgRewrite::DefaultValue { field, value }, _) => {
                    apply_default(node, field, value)
                }
            })
    }
}

/// `"0"` names a custom event slot; anything else (`"L1"`, `"T0"`, `"V0"`) is left as is
fn local_slot_id(id: &str) -> String {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        to_local_variable_id(id)
    } else {
        id.to_string()
    }
}

fn apply_variable_rewrite(
    mut node: EventNode,
    rewrite: &ArgRewrite,
    variables: Option<&VariableTable>,
) -> EventNode {
    let (field, wrap_scalars) = match rewrite {
        ArgRewrite::VariableReference { field } => (field, true),
        ArgRewrite::UnionVariable { field } => (field, false),
        _ => return node,
    };
    let Some(arg) = node.args.as_mut().and_then(|args| args.get_mut(field)) else {
        return node;
    };

    let rewritten = match &*arg {
        ArgValue::Raw(_) if wrap_scalars => arg
            .as_raw_scalar()
            .map(|id| ArgValue::variable(local_slot_id(&id))),
        ArgValue::Union(union) if union.kind == UnionKind::Variable => {
            union.value_str().and_then(|id| {
                let local = local_slot_id(&id);
                (local != id).then(|| {
                    let mut union = union.clone();
                    union.value = Value::String(local);
                    ArgValue::Union(union)
                })
            })
        }
        _ => None,
    };

    if let Some(rewritten) = rewritten {
        if let (Some(table), Some(union)) = (variables, rewritten.as_variable_union()) {
            let declared = union
                .value_str()
                .filter(|id| is_local_variable_id(id))
                .map(|id| {
                    let slot = &id[1..];
                    table.contains_key(slot) || table.contains_key(&id)
                });
            if declared == Some(false) {
                tracing::debug!(
                    event_id = ?node.id,
                    field = %field,
                    "Variable references a slot the custom event does not declare"
                );
            }
        }
        *arg = rewritten;
    }
    node
}

fn rewrite_custom_event_call(mut node: EventNode, ctx: &RewriteContext<'_>) -> EventNode {
    let Some(callee_id) = node.arg(CUSTOM_EVENT_ID_ARG).and_then(ArgValue::as_raw_scalar) else {
        return node;
    };
    let Some(callee) = ctx.custom_event(&callee_id) else {
        tracing::debug!(
            event_id = ?node.id,
            custom_event_id = %callee_id,
            "Call to unknown custom event left unchanged"
        );
        return node;
    };
    let Some(args) = node.args.take() else {
        return node;
    };

    let in_custom_event = ctx.scope.is_custom_event();
    let mut migrated = EventArgs::new();
    for (key, value) in args {
        let Some(slot) = variable_param_slot(&key) else {
            migrated.insert(key, value);
            continue;
        };
        let new_key = variable_param_key(&to_local_variable_id(slot));
        let value = call_param_value(value, in_custom_event);
        if new_key == key {
            migrated.insert(new_key, value);
        } else {
            migrated.entry(new_key).or_insert(value);
        }
    }

    for slot in callee.variable_slots() {
        migrated
            .entry(variable_param_key(&to_local_variable_id(slot)))
            .or_insert_with(|| {
                if in_custom_event {
                    ArgValue::variable(local_slot_id(slot))
                } else {
                    ArgValue::variable(slot)
                }
            });
    }

    node.args = Some(migrated);
    node
}

fn call_param_value(value: ArgValue, in_custom_event: bool) -> ArgValue {
    match value {
        ArgValue::Raw(_) => match value.as_raw_scalar() {
            Some(id) if in_custom_event => ArgValue::variable(local_slot_id(&id)),
            Some(id) => ArgValue::variable(id),
            None => value,
        },
        ArgValue::Union(mut union) => {
            if in_custom_event && union.kind == UnionKind::Variable {
                if let Some(id) = union.value_str() {
                    union.value = Value::String(local_slot_id(&id));
                }
            }
            ArgValue::Union(union)
        }
    }
}

fn apply_default(mut node: EventNode, field: &str, value: &Value) -> EventNode {
    let args = node.args.get_or_insert_with(EventArgs::new);
    if !args.contains_key(field) {
        args.insert(field.to_string(), ArgValue::Raw(value.clone()));
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbsproj_domain::commands::*;
    use gbsproj_domain::CustomEventVariable;
    use serde_json::json;

    fn rules() -> RewriteRules {
        RewriteRules::from_catalog(&CommandCatalog::builtin())
    }

    fn node(value: Value) -> EventNode {
        serde_json::from_value(value).unwrap()
    }

    fn script_1() -> CustomEvent {
        CustomEvent::new("script-1")
            .with_name("Script 1")
            .with_variable("0", CustomEventVariable::new("0", "Variable A"))
            .with_variable("1", CustomEventVariable::new("1", "output"))
    }

    #[test]
    fn test_call_rule_is_registered_once() {
        let rules = rules();
        assert_eq!(
            rules.for_command(EVENT_CALL_CUSTOM_EVENT),
            &[ArgRewrite::CustomEventCall]
        );
        assert!(rules.for_command("EVENT_TEXT").is_empty());
    }

    #[test]
    fn test_defaults_come_after_variable_rewrites() {
        let rules = rules();
        assert_eq!(
            rules.for_command(EVENT_ENGINE_FIELD_STORE),
            &[
                ArgRewrite::VariableReference {
                    field: "value".into()
                },
                ArgRewrite::DefaultValue {
                    field: "value".into(),
                    value: json!("0")
                },
            ]
        );
    }

    #[test]
    fn test_variable_param_keys() {
        assert_eq!(variable_param_slot("$variable[1]$"), Some("1"));
        assert_eq!(variable_param_slot("$variable[V1]$"), Some("V1"));
        assert_eq!(variable_param_slot("$actor[1]$"), None);
        assert_eq!(variable_param_key("V0"), "$variable[V0]$");
    }

    #[test]
    fn test_bare_variable_is_wrapped_and_prefixed() {
        let event = node(json!({"command": EVENT_INC_VALUE, "args": {"variable": "0"}, "id": "event-1"}));
        let event = rules().rewrite_variables(event);
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "command": EVENT_INC_VALUE,
                "args": {"variable": {"type": "variable", "value": "V0"}},
                "id": "event-1"
            })
        );
    }

    #[test]
    fn test_variable_rewrite_is_idempotent() {
        let rules = rules();
        let once = rules.rewrite_variables(node(
            json!({"command": EVENT_INC_VALUE, "args": {"variable": 2}, "id": "event-1"}),
        ));
        let twice = rules.rewrite_variables(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.arg("variable"), Some(&ArgValue::variable("V2")));
    }

    #[test]
    fn test_union_variable_is_prefixed_in_place() {
        let event = node(json!({
            "command": EVENT_ACTOR_SET_DIRECTION,
            "args": {"actorId": "player", "direction": {"type": "variable", "value": "3"}},
            "id": "event-1"
        }));
        let event = rules().rewrite_variables(event);
        assert_eq!(
            serde_json::to_value(&event).unwrap()["args"],
            json!({"actorId": "player", "direction": {"type": "variable", "value": "V3"}})
        );
    }

    #[test]
    fn test_union_field_literal_is_untouched() {
        let input = json!({
            "command": EVENT_ACTOR_SET_DIRECTION,
            "args": {"actorId": "player", "direction": "left"},
            "id": "event-1"
        });
        let event = rules().rewrite_variables(node(input.clone()));
        assert_eq!(serde_json::to_value(&event).unwrap(), input);
    }

    #[test]
    fn test_non_slot_ids_are_not_prefixed() {
        let event = rules().rewrite_variables(node(
            json!({"command": EVENT_INC_VALUE, "args": {"variable": "L1"}, "id": "event-1"}),
        ));
        assert_eq!(event.arg("variable"), Some(&ArgValue::variable("L1")));
    }

    #[test]
    fn test_entity_scope_skips_variable_rewrite() {
        let input = json!({"command": EVENT_INC_VALUE, "args": {"variable": "0"}, "id": "event-1"});
        let ctx = RewriteContext::new(&[]);
        let event = rules().rewrite_event(node(input.clone()), &ctx);
        assert_eq!(serde_json::to_value(&event).unwrap(), input);
    }

    #[test]
    fn test_custom_event_call_backfills_and_rekeys() {
        let custom_events = vec![script_1()];
        let ctx = RewriteContext::new(&custom_events);
        let event = rules().rewrite_event(
            node(json!({
                "command": EVENT_CALL_CUSTOM_EVENT,
                "args": {"customEventId": "script-1", "$variable[1]$": "L1"},
                "id": "event-1"
            })),
            &ctx,
        );
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "command": EVENT_CALL_CUSTOM_EVENT,
                "args": {
                    "customEventId": "script-1",
                    "$variable[V0]$": {"type": "variable", "value": "0"},
                    "$variable[V1]$": {"type": "variable", "value": "L1"}
                },
                "id": "event-1"
            })
        );
    }

    #[test]
    fn test_unknown_custom_event_call_is_unchanged() {
        let input = json!({
            "command": EVENT_CALL_CUSTOM_EVENT,
            "args": {"customEventId": "script-1", "$variable[1]$": "L1"},
            "id": "event-1"
        });
        let event = rules().rewrite_event(node(input.clone()), &RewriteContext::new(&[]));
        assert_eq!(serde_json::to_value(&event).unwrap(), input);
    }

    #[test]
    fn test_call_actor_params_are_untouched() {
        let custom_events = vec![script_1()];
        let event = rules().rewrite_event(
            node(json!({
                "command": EVENT_CALL_CUSTOM_EVENT,
                "args": {"customEventId": "script-1", "$actor[0]$": "player"},
                "id": "event-1"
            })),
            &RewriteContext::new(&custom_events),
        );
        assert_eq!(event.arg("$actor[0]$"), Some(&ArgValue::raw_str("player")));
        assert!(event.arg("$actor[V0]$").is_none());
    }

    #[test]
    fn test_call_inside_custom_event_prefixes_local_slots() {
        let custom_events = vec![script_1()];
        let ctx = RewriteContext::new(&custom_events).in_custom_event(None);
        let event = rules().rewrite_event(
            node(json!({
                "command": EVENT_CALL_CUSTOM_EVENT,
                "args": {"customEventId": "script-1", "$variable[0]$": "2", "$variable[1]$": "L1"},
                "id": "event-1"
            })),
            &ctx,
        );
        assert_eq!(event.arg("$variable[V0]$"), Some(&ArgValue::variable("V2")));
        assert_eq!(event.arg("$variable[V1]$"), Some(&ArgValue::variable("L1")));
    }

    #[test]
    fn test_backfill_inside_custom_event_uses_local_slot() {
        let custom_events = vec![script_1()];
        let ctx = RewriteContext::new(&custom_events).in_custom_event(None);
        let rules = rules();
        let once = rules.rewrite_event(
            node(json!({
                "command": EVENT_CALL_CUSTOM_EVENT,
                "args": {"customEventId": "script-1", "$variable[0]$": "2"},
                "id": "event-1"
            })),
            &ctx,
        );
        assert_eq!(once.arg("$variable[V1]$"), Some(&ArgValue::variable("V1")));

        let twice = rules.rewrite_event(once.clone(), &ctx);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_call_rule_is_idempotent() {
        let custom_events = vec![script_1()];
        let ctx = RewriteContext::new(&custom_events);
        let rules = rules();
        let once = rules.rewrite_event(
            node(json!({
                "command": EVENT_CALL_CUSTOM_EVENT,
                "args": {"customEventId": "script-1", "$variable[1]$": "L1"},
                "id": "event-1"
            })),
            &ctx,
        );
        let twice = rules.rewrite_event(once.clone(), &ctx);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_migrated_param_wins_over_legacy_duplicate() {
        let custom_events = vec![script_1()];
        let event = rules().rewrite_event(
            node(json!({
                "command": EVENT_CALL_CUSTOM_EVENT,
                "args": {
                    "customEventId": "script-1",
                    "$variable[0]$": "9",
                    "$variable[V0]$": {"type": "variable", "value": "4"}
                },
                "id": "event-1"
            })),
            &RewriteContext::new(&custom_events),
        );
        assert_eq!(event.arg("$variable[V0]$"), Some(&ArgValue::variable("4")));
        assert!(event.arg("$variable[0]$").is_none());
    }

    #[test]
    fn test_engine_field_store_gains_default() {
        let event = rules().rewrite_event(
            node(json!({
                "command": EVENT_ENGINE_FIELD_STORE,
                "args": {"engineFieldKey": "plat_run_vel"},
                "id": "event-1"
            })),
            &RewriteContext::new(&[]),
        );
        assert_eq!(
            serde_json::to_value(&event).unwrap()["args"],
            json!({"engineFieldKey": "plat_run_vel", "value": "0"})
        );
    }

    #[test]
    fn test_engine_field_store_keeps_existing_value() {
        let input = json!({
            "command": EVENT_ENGINE_FIELD_STORE,
            "args": {"engineFieldKey": "plat_run_vel", "value": "5"},
            "id": "event-1"
        });
        let event = rules().rewrite_event(node(input.clone()), &RewriteContext::new(&[]));
        assert_eq!(serde_json::to_value(&event).unwrap(), input);
    }

    #[test]
    fn test_node_without_args_gets_args_only_for_defaults() {
        let rules = rules();
        let ctx = RewriteContext::new(&[]);
        let inc = rules.rewrite_event(EventNode::new(EVENT_INC_VALUE, "event-1"), &ctx);
        assert!(inc.args.is_none());
        let store = rules.rewrite_event(EventNode::new(EVENT_ENGINE_FIELD_STORE, "event-2"), &ctx);
        assert_eq!(store.arg("value"), Some(&ArgValue::raw_str("0")));
    }
}
