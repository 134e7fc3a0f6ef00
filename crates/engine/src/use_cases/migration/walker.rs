//! Event tree traversal.
//!
//! Scripts nest: branching commands own child event lists, which may branch
//! again. Migrations need to apply one per-node rewrite to every node wherever
//! it sits, so traversal is written once here, generically over
//! [`EventNode::map_branches`], and never special-cases command ids.
//!
//! All functions consume their input and return the rebuilt value. A caller
//! that still needs the pre-migration document keeps its own clone.

use gbsproj_domain::{EventNode, Project, Scene, ScriptOwner};

/// When a node is visited relative to its nested event lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkOrder {
    /// Visit the node first (it sees its original children), then walk the
    /// children of the node the visitor returned.
    #[default]
    ParentFirst,
    /// Walk the children first, then visit the node holding the rewritten children.
    ChildrenFirst,
}

/// Applies `visit` to every node of `events`, recursing into nested lists
pub fn walk_events<F>(events: Vec<EventNode>, order: WalkOrder, visit: &mut F) -> Vec<EventNode>
where
    F: FnMut(EventNode) -> EventNode,
{
    events
        .into_iter()
        .map(|node| walk_event(node, order, &mut *visit))
        .collect()
}

fn walk_event<F>(node: EventNode, order: WalkOrder, visit: &mut F) -> EventNode
where
    F: FnMut(EventNode) -> EventNode,
{
    match order {
        WalkOrder::ParentFirst => {
            let node = visit(node);
            node.map_branches(|children| walk_events(children, order, &mut *visit))
        }
        WalkOrder::ChildrenFirst => {
            let node = node.map_branches(|children| walk_events(children, order, &mut *visit));
            visit(node)
        }
    }
}

/// Rebuilds every script owned by the scenes, their actors and their triggers.
///
/// `f` receives whole event lists; combine with [`walk_events`] for per-node work.
pub fn map_entity_scripts<F>(scenes: Vec<Scene>, mut f: F) -> Vec<Scene>
where
    F: FnMut(Vec<EventNode>) -> Vec<EventNode>,
{
    scenes
        .into_iter()
        .map(|scene| {
            let mut scene = scene.map_scripts(&mut f);
            scene.actors = std::mem::take(&mut scene.actors)
                .into_iter()
                .map(|actor| actor.map_scripts(&mut f))
                .collect();
            scene.triggers = std::mem::take(&mut scene.triggers)
                .into_iter()
                .map(|trigger| trigger.map_scripts(&mut f))
                .collect();
            scene
        })
        .collect()
}

/// Calls `f` for every node reachable from the project, parents before children
pub fn for_each_event<F>(project: &Project, mut f: F)
where
    F: FnMut(&EventNode),
{
    fn visit_list<F: FnMut(&EventNode)>(events: &[EventNode], f: &mut F) {
        for node in events {
            f(node);
            for (_, children) in node.branches() {
                visit_list(children, f);
            }
        }
    }

    for scene in &project.scenes {
        for script in scene.scripts() {
            visit_list(script, &mut f);
        }
        for actor in &scene.actors {
            for script in actor.scripts() {
                visit_list(script, &mut f);
            }
        }
        for trigger in &scene.triggers {
            for script in trigger.scripts() {
                visit_list(script, &mut f);
            }
        }
    }
    for custom_event in &project.custom_events {
        if let Some(script) = &custom_event.script {
            visit_list(script, &mut f);
        }
    }
}

/// Number of event nodes in the project, nested ones included
pub fn count_events(project: &Project) -> usize {
    let mut count = 0;
    for_each_event(project, |_| count += 1);
    count
}
