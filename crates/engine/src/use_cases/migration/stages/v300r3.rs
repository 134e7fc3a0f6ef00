//! 3.0.0 r2 -> 3.0.0 r3: every scene, actor, trigger and custom event gets a symbol.
//!
//! Each kind is generated against the symbols its namespace already held in
//! the input. Symbols generated here are not fed back into that set, so two
//! entities with the same name get the same symbol; `ensure_symbols_unique`
//! separates them afterwards.

use gbsproj_domain::Project;

use crate::use_cases::migration::symbols::{SymbolKind, SymbolNamespace};

/// Adds a generated `symbol` to every entity missing one
pub fn migrate_300r2_to_300r3(mut project: Project) -> Project {
    let scenes = existing_symbols(project.scenes.iter().map(|s| s.symbol.as_deref()));
    let actors = existing_symbols(
        project
            .scenes
            .iter()
            .flat_map(|s| s.actors.iter().map(|a| a.symbol.as_deref())),
    );
    let triggers = existing_symbols(
        project
            .scenes
            .iter()
            .flat_map(|s| s.triggers.iter().map(|t| t.symbol.as_deref())),
    );
    let scripts = existing_symbols(project.custom_events.iter().map(|e| e.symbol.as_deref()));

    fill_symbols(
        SymbolKind::Scene,
        &scenes,
        project
            .scenes
            .iter_mut()
            .map(|scene| (scene.name.as_str(), &mut scene.symbol)),
    );

    for scene in &mut project.scenes {
        fill_symbols(
            SymbolKind::Actor,
            &actors,
            scene
                .actors
                .iter_mut()
                .map(|actor| (actor.name.as_str(), &mut actor.symbol)),
        );
        fill_symbols(
            SymbolKind::Trigger,
            &triggers,
            scene
                .triggers
                .iter_mut()
                .map(|trigger| (trigger.name.as_str(), &mut trigger.symbol)),
        );
    }

    fill_symbols(
        SymbolKind::Script,
        &scripts,
        project
            .custom_events
            .iter_mut()
            .map(|event| (event.name.as_deref().unwrap_or_default(), &mut event.symbol)),
    );

    project
}

fn existing_symbols<'a>(symbols: impl Iterator<Item = Option<&'a str>>) -> SymbolNamespace {
    symbols.flatten().filter(|s| !s.is_empty()).collect()
}

fn fill_symbols<'a>(
    kind: SymbolKind,
    existing: &SymbolNamespace,
    entities: impl Iterator<Item = (&'a str, &'a mut Option<String>)>,
) {
    let mut unnamed = 0;
    for (name, symbol) in entities {
        let ordinal = unnamed;
        if name.is_empty() {
            unnamed += 1;
        }
        if symbol.as_deref().is_none_or(str::is_empty) {
            *symbol = Some(existing.suggest(&kind.preferred_name(name, ordinal)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn migrate(input: Value) -> Value {
        let project = Project::from_value(input).unwrap();
        serde_json::to_value(migrate_300r2_to_300r3(project)).unwrap()
    }

    #[test]
    fn test_empty_project_is_unchanged() {
        let input = json!({"scenes": [], "customEvents": []});
        assert_eq!(migrate(input.clone()), input);
    }

    #[test]
    fn test_existing_symbols_are_kept() {
        let output = migrate(json!({
            "scenes": [{"name": "Hello", "symbol": "my_scene", "actors": [], "triggers": []}],
            "customEvents": []
        }));
        assert_eq!(output["scenes"][0]["symbol"], json!("my_scene"));
    }

    #[test]
    fn test_generated_symbol_avoids_existing_ones() {
        let output = migrate(json!({
            "scenes": [
                {"name": "Hello", "actors": [], "triggers": []},
                {"name": "Other", "symbol": "scene_hello", "actors": [], "triggers": []}
            ],
            "customEvents": []
        }));
        assert_eq!(output["scenes"][0]["symbol"], json!("scene_hello_0"));
        assert_eq!(output["scenes"][1]["symbol"], json!("scene_hello"));
    }

    #[test]
    fn test_actor_namespace_spans_scenes() {
        let output = migrate(json!({
            "scenes": [
                {"name": "A", "actors": [{"name": "Guard"}], "triggers": []},
                {"name": "B", "actors": [{"name": "X", "symbol": "actor_guard"}], "triggers": []}
            ],
            "customEvents": []
        }));
        assert_eq!(output["scenes"][0]["actors"][0]["symbol"], json!("actor_guard_0"));
    }

    #[test]
    fn test_namespaces_do_not_collide_across_kinds() {
        let output = migrate(json!({
            "scenes": [{
                "name": "",
                "actors": [{"name": "", "symbol": "scene_1"}],
                "triggers": []
            }],
            "customEvents": []
        }));
        assert_eq!(output["scenes"][0]["symbol"], json!("scene_1"));
    }

    #[test]
    fn test_unnamed_custom_event_without_name_field() {
        let output = migrate(json!({"scenes": [], "customEvents": [{"id": "script-1"}]}));
        assert_eq!(output["customEvents"][0]["symbol"], json!("script_1"));
        assert!(output["customEvents"][0].get("name").is_none());
    }

    #[test]
    fn test_empty_symbol_is_regenerated() {
        let output = migrate(json!({
            "scenes": [{"name": "Room", "symbol": "", "actors": [], "triggers": []}],
            "customEvents": []
        }));
        assert_eq!(output["scenes"][0]["symbol"], json!("scene_room"));
    }
}
