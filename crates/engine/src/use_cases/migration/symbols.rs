//! Symbol generation.
//!
//! Symbols are stable identifiers emitted into generated C code, so they must
//! be valid C identifiers and unique per namespace. They are derived from the
//! entity's display name so they stay readable in build output.
//!
//! The sanitizing steps reproduce the editor's historical output bit for bit:
//! existing projects reference these symbols, and a "cleaner" algorithm would
//! silently rename them. In particular only the *first* run of underscores is
//! collapsed (`"a  b  c"` becomes `"a_b__c"`).
//!
//! One step differs from the editor: before numbering a taken symbol only a
//! trailing `_<digits>` is stripped, so `scene_level_2_boss` gives
//! `scene_level_2_boss_0`. The editor removed the first `_<digits>` anywhere
//! and produced `scene_level_boss_0`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

/// Symbols are cut here to leave room for a `_NNN` suffix within C's
/// 31 significant identifier characters.
pub const MAX_SYMBOL_LENGTH: usize = 27;

static NON_SYMBOL_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_]").expect("valid regex"));
static UNDERSCORE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));
static NUMERIC_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_[0-9]+$").expect("valid regex"));

/// Converts a preferred name into a valid C symbol.
///
/// Lower-cases, replaces anything outside `[a-z0-9_]` with `_` (one per UTF-16
/// code unit, as the editor counted them), collapses the first run of
/// underscores, truncates to [`MAX_SYMBOL_LENGTH`] and prefixes `_` when the
/// result would start with a digit.
pub fn to_valid_symbol(name: &str) -> String {
    let lower = name.to_lowercase();
    let replaced = NON_SYMBOL_CHAR_RE.replace_all(&lower, |caps: &Captures<'_>| {
        let units = caps[0].chars().map(char::len_utf16).sum::<usize>();
        "_".repeat(units)
    });
    let squashed = UNDERSCORE_RUN_RE.replace(&replaced, "_");
    let symbol: String = squashed.chars().take(MAX_SYMBOL_LENGTH).collect();

    if symbol.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", symbol)
    } else {
        symbol
    }
}

/// Generates a symbol for `name` that is not in `existing`.
///
/// When the sanitized name is taken, a trailing `_<digits>` is stripped and
/// `_0`, `_1`, ... are tried in order. Deterministic for identical inputs.
pub fn gen_symbol(name: &str, existing: &HashSet<String>) -> String {
    let initial = to_valid_symbol(name);
    if !existing.contains(&initial) {
        return initial;
    }

    let base = NUMERIC_SUFFIX_RE.replace(&initial, "").into_owned();
    (0u64..)
        .map(|count| format!("{}_{}", base, count))
        .find(|candidate| !existing.contains(candidate))
        .unwrap_or(initial)
}

/// Entity kinds that receive symbols, each with its own namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Scene,
    Actor,
    Trigger,
    /// Custom event definitions
    Script,
}

impl SymbolKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Scene => "scene",
            Self::Actor => "actor",
            Self::Trigger => "trigger",
            Self::Script => "script",
        }
    }

    /// Scenes and scripts number unnamed entries from 1, actors and triggers from 0.
    /// Existing save files depend on this.
    fn fallback_number(&self, unnamed_ordinal: usize) -> usize {
        match self {
            Self::Scene | Self::Script => unnamed_ordinal + 1,
            Self::Actor | Self::Trigger => unnamed_ordinal,
        }
    }

    /// Preferred (unsanitized) symbol name for an entity, e.g. `scene_Hello World`.
    ///
    /// An empty display name falls back to a number: `unnamed_ordinal` counts
    /// the unnamed entities of this kind seen before this one (per scene for
    /// actors and triggers, per project otherwise).
    pub fn preferred_name(&self, display_name: &str, unnamed_ordinal: usize) -> String {
        if display_name.is_empty() {
            format!("{}_{}", self.prefix(), self.fallback_number(unnamed_ordinal))
        } else {
            format!("{}_{}", self.prefix(), display_name)
        }
    }
}

/// The symbols already used in one namespace.
///
/// Threaded through a pass explicitly so symbol generation stays a pure
/// function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolNamespace {
    used: HashSet<String>,
}

impl SymbolNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.used.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Records `symbol` as used. Returns false if it already was.
    pub fn reserve(&mut self, symbol: impl Into<String>) -> bool {
        self.used.insert(symbol.into())
    }

    /// Generates a symbol not yet used in this namespace without recording it
    pub fn suggest(&self, name: &str) -> String {
        gen_symbol(name, &self.used)
    }

    /// Generates a fresh symbol and records it
    pub fn claim(&mut self, name: &str) -> String {
        let symbol = self.suggest(name);
        self.used.insert(symbol.clone());
        symbol
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolNamespace {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            used: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_to_valid_symbol_lowercases_and_replaces() {
        assert_eq!(to_valid_symbol("Hello World"), "hello_world");
        assert_eq!(to_valid_symbol("scene_Hello World"), "scene_hello_world");
        assert_eq!(to_valid_symbol("Door #2!"), "door_2_");
    }

    #[test]
    fn test_only_first_underscore_run_is_collapsed() {
        assert_eq!(to_valid_symbol("a  b  c"), "a_b__c");
        assert_eq!(to_valid_symbol("a__b"), "a_b");
    }

    #[test]
    fn test_truncates_to_max_length() {
        let symbol = to_valid_symbol("abcdefghijklmnopqrstuvwxyz0123456789");
        assert_eq!(symbol, "abcdefghijklmnopqrstuvwxyz0");
        assert_eq!(symbol.len(), MAX_SYMBOL_LENGTH);
    }

    #[test]
    fn test_leading_digit_is_prefixed() {
        assert_eq!(to_valid_symbol("1st Floor"), "_1st_floor");
    }

    #[test]
    fn test_astral_characters_count_as_two_units() {
        // U+1F600 is a surrogate pair in UTF-16; the first run is then squashed
        assert_eq!(to_valid_symbol("\u{1F600}x\u{1F600}"), "_x__");
    }

    #[test]
    fn test_gen_symbol_returns_initial_when_free() {
        assert_eq!(gen_symbol("Hello World", &set(&[])), "hello_world");
    }

    #[test]
    fn test_gen_symbol_appends_counter_from_zero() {
        assert_eq!(gen_symbol("actor", &set(&["actor"])), "actor_0");
        assert_eq!(
            gen_symbol("actor", &set(&["actor", "actor_0", "actor_1"])),
            "actor_2"
        );
    }

    #[test]
    fn test_gen_symbol_strips_trailing_numeric_suffix() {
        assert_eq!(gen_symbol("scene_1", &set(&["scene_1"])), "scene_0");
        assert_eq!(
            gen_symbol("scene_1", &set(&["scene_1", "scene_0"])),
            "scene_2"
        );
    }

    #[test]
    fn test_gen_symbol_keeps_inner_numbers() {
        assert_eq!(
            gen_symbol("scene_level_2_boss", &set(&["scene_level_2_boss"])),
            "scene_level_2_boss_0"
        );
        assert_eq!(
            gen_symbol("scene_level_2_boss_3", &set(&["scene_level_2_boss_3"])),
            "scene_level_2_boss_0"
        );
    }

    #[test]
    fn test_preferred_name_fallbacks() {
        assert_eq!(SymbolKind::Scene.preferred_name("", 0), "scene_1");
        assert_eq!(SymbolKind::Script.preferred_name("", 1), "script_2");
        assert_eq!(SymbolKind::Actor.preferred_name("", 0), "actor_0");
        assert_eq!(SymbolKind::Trigger.preferred_name("", 3), "trigger_3");
        assert_eq!(SymbolKind::Actor.preferred_name("Guard", 3), "actor_Guard");
    }

    #[test]
    fn test_namespace_claim_records_symbols() {
        let mut namespace = SymbolNamespace::new();
        assert_eq!(namespace.claim("scene_a"), "scene_a");
        assert_eq!(namespace.claim("scene_a"), "scene_a_0");
        assert_eq!(namespace.claim("scene_a"), "scene_a_1");
        assert_eq!(namespace.len(), 3);
    }

    #[test]
    fn test_namespaces_are_independent() {
        let mut scenes = SymbolNamespace::new();
        let mut actors = SymbolNamespace::new();
        assert_eq!(scenes.claim("shared"), "shared");
        assert_eq!(actors.claim("shared"), "shared");
    }

    #[test]
    fn test_namespace_from_existing_symbols() {
        let namespace: SymbolNamespace = ["trigger_0"].into_iter().collect();
        assert!(namespace.contains("trigger_0"));
        assert_eq!(namespace.suggest("trigger_0"), "trigger_1");
        assert_eq!(namespace.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_gen_symbol_never_returns_existing(
            name in ".{0,40}",
            existing in proptest::collection::hash_set("[a-z_]{1,6}(_[0-9]{1,2})?", 0..32),
        ) {
            let symbol = gen_symbol(&name, &existing);
            prop_assert!(!existing.contains(&symbol));
        }

        #[test]
        fn prop_gen_symbol_is_deterministic(
            name in ".{0,40}",
            existing in proptest::collection::hash_set("[a-z_]{1,8}", 0..16),
        ) {
            prop_assert_eq!(gen_symbol(&name, &existing), gen_symbol(&name, &existing));
        }

        #[test]
        fn prop_valid_symbol_is_identifier_safe(name in ".{0,64}") {
            let symbol = to_valid_symbol(&name);
            prop_assert!(symbol.len() <= MAX_SYMBOL_LENGTH + 1);
            prop_assert!(symbol.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
            prop_assert!(!symbol.starts_with(|c: char| c.is_ascii_digit()));
        }

        #[test]
        fn prop_claimed_symbols_are_unique(names in proptest::collection::vec("[A-Za-z ]{0,12}", 0..24)) {
            let mut namespace = SymbolNamespace::new();
            let mut seen = HashSet::new();
            for name in &names {
                prop_assert!(seen.insert(namespace.claim(name)));
            }
        }
    }
}
