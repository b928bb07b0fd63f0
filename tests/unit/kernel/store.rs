use super::*;
use crate::kernel::services::adapters::scaffold;
use crate::kernel::services::ports::catalog::{
    Category, ChallengeDescriptor, Difficulty, ValidationRules, WorkspaceRef,
};
use crate::kernel::state::{FileMap, PlaygroundState, Scaffold};
use rustc_hash::FxHashSet;

fn descriptor(id: &str) -> ChallengeDescriptor {
    ChallengeDescriptor {
        id: id.to_string(),
        slug: format!("{}-slug", id),
        title: format!("Challenge {}", id),
        category: Category::Core,
        difficulty: Difficulty::Beginner,
        tags: Vec::new(),
        requirements: Vec::new(),
        workspace: WorkspaceRef {
            path: "src/app/main.ts".to_string(),
            name: "Main".to_string(),
        },
        validation: None,
    }
}

fn scaffold_of(pairs: &[(&str, &str)], default_file: &str) -> Scaffold {
    Scaffold {
        files: pairs
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect(),
        default_file: default_file.to_string(),
        read_only: FxHashSet::default(),
        language: "typescript".to_string(),
    }
}

fn loaded_store(id: &str, pairs: &[(&str, &str)], default_file: &str) -> Store {
    let mut store = Store::new(PlaygroundState::new());
    let result = store.dispatch(Action::ChallengeLoaded {
        descriptor: descriptor(id),
        scaffold: scaffold_of(pairs, default_file),
    });
    assert!(result.state_changed);
    store
}

fn assert_active_file_invariant(state: &PlaygroundState) {
    match &state.active_file {
        Some(path) => assert!(state.working.contains_key(path)),
        None => assert!(state.working.is_empty()),
    }
}

#[test]
fn load_selects_default_file_and_seeds_working_set() {
    let store = loaded_store("c1", &[("a.ts", "x")], "a.ts");
    let state = store.state();

    assert_eq!(state.active_file.as_deref(), Some("a.ts"));
    assert_eq!(state.working.get("a.ts").map(String::as_str), Some("x"));
    assert!(!state.loading);
    assert!(state.validation.is_none());
    assert_active_file_invariant(state);
}

#[test]
fn load_emits_sandbox_sync() {
    let mut store = Store::new(PlaygroundState::new());
    let result = store.dispatch(Action::ChallengeLoaded {
        descriptor: descriptor("c1"),
        scaffold: scaffold_of(&[("a.ts", "x")], "a.ts"),
    });
    assert!(matches!(result.effects.as_slice(), [Effect::SyncSandbox]));
}

#[test]
fn load_replaces_previous_challenge_wholesale() {
    let mut store = loaded_store("c1", &[("a.ts", "x")], "a.ts");
    store.dispatch(Action::UpdateFileContent {
        path: "a.ts".to_string(),
        content: "edited".to_string(),
    });

    store.dispatch(Action::ChallengeLoaded {
        descriptor: descriptor("c2"),
        scaffold: scaffold_of(&[("b.ts", "y")], "b.ts"),
    });

    let state = store.state();
    assert_eq!(state.descriptor.as_ref().unwrap().id, "c2");
    assert_eq!(state.active_file.as_deref(), Some("b.ts"));
    assert!(!state.working.contains_key("a.ts"));
    assert_active_file_invariant(state);
}

#[test]
fn load_failure_retains_previous_state() {
    let mut store = loaded_store("c1", &[("a.ts", "x")], "a.ts");
    store.dispatch(Action::ChallengeLoadStarted {
        category: "core".to_string(),
        slug: "c2-slug".to_string(),
    });
    assert!(store.state().loading);

    let result = store.dispatch(Action::ChallengeLoadFailed {
        category: "core".to_string(),
        slug: "c2-slug".to_string(),
        error: "boom".to_string(),
    });

    assert!(result.effects.is_empty());
    let state = store.state();
    assert!(!state.loading);
    assert_eq!(state.load_error.as_deref(), Some("boom"));
    // No half-updated state: c1 is fully intact.
    assert_eq!(state.descriptor.as_ref().unwrap().id, "c1");
    assert_eq!(state.working.get("a.ts").map(String::as_str), Some("x"));
    assert_active_file_invariant(state);
}

#[test]
fn update_changes_working_but_never_the_model() {
    let mut store = loaded_store("c1", &[("a.ts", "x")], "a.ts");

    let result = store.dispatch(Action::UpdateFileContent {
        path: "a.ts".to_string(),
        content: "y".to_string(),
    });

    assert!(result.state_changed);
    assert!(matches!(result.effects.as_slice(), [Effect::SyncSandbox]));
    let state = store.state();
    assert_eq!(state.working["a.ts"], "y");
    assert_eq!(state.model.as_ref().unwrap().files["a.ts"], "x");
}

#[test]
fn update_with_identical_content_is_a_no_op() {
    let mut store = loaded_store("c1", &[("a.ts", "x")], "a.ts");
    let result = store.dispatch(Action::UpdateFileContent {
        path: "a.ts".to_string(),
        content: "x".to_string(),
    });
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn update_unknown_path_is_dropped() {
    let mut store = loaded_store("c1", &[("a.ts", "x")], "a.ts");
    let result = store.dispatch(Action::UpdateFileContent {
        path: "ghost.ts".to_string(),
        content: "y".to_string(),
    });
    assert!(!result.state_changed);
    assert!(!store.state().working.contains_key("ghost.ts"));
}

#[test]
fn update_read_only_path_is_rejected() {
    let mut store = Store::new(PlaygroundState::new());
    let mut scaffold = scaffold_of(&[("a.ts", "x"), ("index.html", "<html>")], "a.ts");
    scaffold.read_only.insert("index.html".to_string());
    store.dispatch(Action::ChallengeLoaded {
        descriptor: descriptor("c1"),
        scaffold,
    });

    let result = store.dispatch(Action::UpdateFileContent {
        path: "index.html".to_string(),
        content: "tampered".to_string(),
    });

    assert!(!result.state_changed);
    assert_eq!(store.state().working["index.html"], "<html>");
}

#[test]
fn set_active_file_ignores_unknown_paths() {
    let mut store = loaded_store("c1", &[("a.ts", "x")], "a.ts");

    let result = store.dispatch(Action::SetActiveFile {
        path: "missing.ts".to_string(),
    });

    assert!(!result.state_changed);
    assert_eq!(store.state().active_file.as_deref(), Some("a.ts"));
    assert_active_file_invariant(store.state());
}

#[test]
fn set_active_file_switches_between_known_paths() {
    let mut store = loaded_store("c1", &[("a.ts", "x"), ("b.ts", "y")], "a.ts");

    let result = store.dispatch(Action::SetActiveFile {
        path: "b.ts".to_string(),
    });

    assert!(result.state_changed);
    assert_eq!(store.state().active_file.as_deref(), Some("b.ts"));
}

#[test]
fn reset_restores_original_files_after_edits() {
    let mut store = loaded_store("c1", &[("a.ts", "x"), ("b.ts", "y")], "a.ts");
    for content in ["1", "2", "3"] {
        store.dispatch(Action::UpdateFileContent {
            path: "a.ts".to_string(),
            content: content.to_string(),
        });
    }
    store.dispatch(Action::UpdateFileContent {
        path: "b.ts".to_string(),
        content: "edited".to_string(),
    });

    let result = store.dispatch(Action::ResetChallenge);

    assert!(result.state_changed);
    assert!(matches!(result.effects.as_slice(), [Effect::SyncSandbox]));
    let state = store.state();
    assert_eq!(state.working, state.model.as_ref().unwrap().files);
    assert!(state.validation.is_none());
}

#[test]
fn reset_without_edits_is_a_no_op() {
    let mut store = loaded_store("c1", &[("a.ts", "x")], "a.ts");
    let result = store.dispatch(Action::ResetChallenge);
    assert!(!result.state_changed);
}

#[test]
fn reset_when_idle_is_a_no_op() {
    let mut store = Store::new(PlaygroundState::new());
    let result = store.dispatch(Action::ResetChallenge);
    assert!(!result.state_changed);
}

#[test]
fn clear_returns_to_idle_and_tears_down() {
    let mut store = loaded_store("c1", &[("a.ts", "x")], "a.ts");

    let result = store.dispatch(Action::ClearPlayground);

    assert!(result.state_changed);
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::TeardownSandbox]
    ));
    let state = store.state();
    assert!(state.descriptor.is_none());
    assert!(state.model.is_none());
    assert!(state.working.is_empty());
    assert!(state.active_file.is_none());
    assert_active_file_invariant(state);
}

#[test]
fn clear_preserves_theme() {
    let mut store = Store::new(PlaygroundState::with_theme("light"));
    store.dispatch(Action::ChallengeLoaded {
        descriptor: descriptor("c1"),
        scaffold: scaffold_of(&[("a.ts", "x")], "a.ts"),
    });
    store.dispatch(Action::ClearPlayground);
    assert_eq!(store.state().theme, "light");
}

#[test]
fn sandbox_status_updates_flags_once() {
    let mut store = loaded_store("c1", &[("a.ts", "x")], "a.ts");

    let first = store.dispatch(Action::SandboxStatus {
        busy: true,
        failed: false,
    });
    let second = store.dispatch(Action::SandboxStatus {
        busy: true,
        failed: false,
    });

    assert!(first.state_changed);
    assert!(!second.state_changed);
    assert!(store.state().host_busy);
}

#[test]
fn validation_recomputed_on_edit() {
    let mut d = descriptor("c1");
    d.validation = Some(ValidationRules {
        entry: "a.ts".to_string(),
        expect: vec!["done".to_string()],
    });
    let mut store = Store::new(PlaygroundState::new());
    store.dispatch(Action::ChallengeLoaded {
        descriptor: d,
        scaffold: scaffold_of(&[("a.ts", "x")], "a.ts"),
    });
    assert!(store.state().validation.is_none());

    store.dispatch(Action::UpdateFileContent {
        path: "a.ts".to_string(),
        content: "done".to_string(),
    });
    assert!(store.state().validation.as_ref().unwrap().passed);

    store.dispatch(Action::UpdateFileContent {
        path: "a.ts".to_string(),
        content: "not quite".to_string(),
    });
    assert!(!store.state().validation.as_ref().unwrap().passed);
}

#[test]
fn invariant_holds_across_arbitrary_operation_sequences() {
    let mut store = Store::new(PlaygroundState::new());
    assert_active_file_invariant(store.state());

    let actions = [
        Action::SetActiveFile {
            path: "a.ts".to_string(),
        },
        Action::ChallengeLoaded {
            descriptor: descriptor("c1"),
            scaffold: scaffold_of(&[("a.ts", "x"), ("b.ts", "y")], "a.ts"),
        },
        Action::SetActiveFile {
            path: "b.ts".to_string(),
        },
        Action::UpdateFileContent {
            path: "b.ts".to_string(),
            content: "z".to_string(),
        },
        Action::SetActiveFile {
            path: "missing.ts".to_string(),
        },
        Action::ResetChallenge,
        Action::ChallengeLoaded {
            descriptor: descriptor("c2"),
            scaffold: scaffold_of(&[("c.ts", "w")], "c.ts"),
        },
        Action::ClearPlayground,
    ];
    for action in actions {
        store.dispatch(action);
        assert_active_file_invariant(store.state());
    }
}

#[test]
fn generated_scaffold_loads_cleanly() {
    let d = descriptor("c1");
    let generated = scaffold::generate(&d);
    let mut store = Store::new(PlaygroundState::new());
    store.dispatch(Action::ChallengeLoaded {
        descriptor: d,
        scaffold: generated,
    });

    let state = store.state();
    assert_eq!(state.active_file.as_deref(), Some("src/app/main.ts"));
    assert!(state.is_read_only("index.html"));
    assert_active_file_invariant(state);
}
