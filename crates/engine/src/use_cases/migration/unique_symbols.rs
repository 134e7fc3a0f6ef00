//! Symbol uniqueness pass.
//!
//! Stage 300r3 may hand out one symbol to several same-named entities, and
//! hand-edited files can contain duplicates too. This pass walks the document
//! in order and gives every entity whose symbol is missing or already claimed
//! a fresh one. The first holder of a symbol keeps it.

use gbsproj_domain::Project;

use crate::use_cases::migration::symbols::{SymbolKind, SymbolNamespace};

/// Makes every symbol unique within its namespace
pub fn ensure_symbols_unique(mut project: Project) -> Project {
    let mut scenes = SymbolNamespace::new();
    let mut actors = SymbolNamespace::new();
    let mut triggers = SymbolNamespace::new();
    let mut scripts = SymbolNamespace::new();

    dedupe(
        SymbolKind::Scene,
        &mut scenes,
        project
            .scenes
            .iter_mut()
            .map(|scene| (scene.name.as_str(), &mut scene.symbol)),
    );

    for scene in &mut project.scenes {
        dedupe(
            SymbolKind::Actor,
            &mut actors,
            scene
                .actors
                .iter_mut()
                .map(|actor| (actor.name.as_str(), &mut actor.symbol)),
        );
    }

    for scene in &mut project.scenes {
        dedupe(
            SymbolKind::Trigger,
            &mut triggers,
            scene
                .triggers
                .iter_mut()
                .map(|trigger| (trigger.name.as_str(), &mut trigger.symbol)),
        );
    }

    dedupe(
        SymbolKind::Script,
        &mut scripts,
        project
            .custom_events
            .iter_mut()
            .map(|event| (event.name.as_deref().unwrap_or_default(), &mut event.symbol)),
    );

    project
}

fn dedupe<'a>(
    kind: SymbolKind,
    namespace: &mut SymbolNamespace,
    entities: impl Iterator<Item = (&'a str, &'a mut Option<String>)>,
) {
    let mut unnamed = 0;
    for (name, symbol) in entities {
        let ordinal = unnamed;
        if name.is_empty() {
            unnamed += 1;
        }
        match symbol.as_deref().filter(|s| !s.is_empty()) {
            Some(current) if namespace.reserve(current) => {}
            Some(current) => {
                let fresh = namespace.claim(current);
                tracing::debug!(kind = kind.prefix(), from = %current, to = %fresh, "Renamed duplicate symbol");
                *symbol = Some(fresh);
            }
            None => *symbol = Some(namespace.claim(&kind.preferred_name(name, ordinal))),
        }
    }
}
