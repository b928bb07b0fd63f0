use super::*;
use crate::kernel::state::FileMap;

fn files(pairs: &[(&str, &str)]) -> FileMap {
    pairs
        .iter()
        .map(|(p, c)| (p.to_string(), c.to_string()))
        .collect()
}

fn apply(base: &FileMap, d: &FileDiff, target: &FileMap) -> FileMap {
    let mut result = base.clone();
    for path in d.create.iter().chain(d.update.iter()) {
        result.insert(path.clone(), target[path].clone());
    }
    for path in &d.destroy {
        result.remove(path);
    }
    result
}

#[test]
fn identical_maps_diff_empty() {
    let a = files(&[("a.ts", "x"), ("b.ts", "y")]);
    let d = diff(&a, &a);
    assert!(d.is_empty());
    assert_eq!(d, FileDiff::default());
}

#[test]
fn partitions_create_update_destroy() {
    let old = files(&[("a.ts", "x"), ("b.ts", "y")]);
    let new = files(&[("a.ts", "x2"), ("c.ts", "z")]);

    let d = diff(&old, &new);
    assert_eq!(d.create, vec!["c.ts".to_string()]);
    assert_eq!(d.update, vec!["a.ts".to_string()]);
    assert_eq!(d.destroy, vec!["b.ts".to_string()]);
}

#[test]
fn content_comparison_is_exact() {
    // No normalization: trailing whitespace counts as a change.
    let old = files(&[("a.ts", "x")]);
    let new = files(&[("a.ts", "x ")]);
    assert_eq!(diff(&old, &new).update, vec!["a.ts".to_string()]);
}

#[test]
fn unchanged_path_is_absent_from_all_partitions() {
    let old = files(&[("a.ts", "x"), ("b.ts", "y")]);
    let new = files(&[("a.ts", "x"), ("b.ts", "changed")]);

    let d = diff(&old, &new);
    assert!(!d.create.contains(&"a.ts".to_string()));
    assert!(!d.update.contains(&"a.ts".to_string()));
    assert!(!d.destroy.contains(&"a.ts".to_string()));
}

#[test]
fn create_and_destroy_are_disjoint() {
    let pairs: &[(&[(&str, &str)], &[(&str, &str)])] = &[
        (&[], &[("a.ts", "x")]),
        (&[("a.ts", "x")], &[]),
        (&[("a.ts", "x"), ("b.ts", "y")], &[("b.ts", "z"), ("c.ts", "w")]),
        (&[("a.ts", "")], &[("a.ts", "")]),
    ];
    for (old, new) in pairs {
        let d = diff(&files(old), &files(new));
        for path in &d.create {
            assert!(!d.destroy.contains(path), "{} in both partitions", path);
        }
    }
}

#[test]
fn applying_diff_reproduces_target() {
    let cases: &[(&[(&str, &str)], &[(&str, &str)])] = &[
        (&[], &[]),
        (&[], &[("a.ts", "x")]),
        (&[("a.ts", "x")], &[]),
        (
            &[("a.ts", "x"), ("b.ts", "y"), ("c.ts", "z")],
            &[("a.ts", "x"), ("b.ts", "y2"), ("d.ts", "w")],
        ),
    ];
    for (old, new) in cases {
        let (old, new) = (files(old), files(new));
        let d = diff(&old, &new);
        assert_eq!(apply(&old, &d, &new), new);
    }
}

#[test]
fn output_is_sorted() {
    let old = files(&[]);
    let new = files(&[("z.ts", "1"), ("a.ts", "2"), ("m.ts", "3")]);
    let d = diff(&old, &new);
    assert_eq!(
        d.create,
        vec!["a.ts".to_string(), "m.ts".to_string(), "z.ts".to_string()]
    );
}

#[test]
fn edit_against_snapshot_is_a_pure_update() {
    let snapshot = files(&[("a.ts", "x")]);
    let mut working = snapshot.clone();
    working.insert("a.ts".to_string(), "y".to_string());

    let d = diff(&snapshot, &working);
    assert!(d.create.is_empty());
    assert_eq!(d.update, vec!["a.ts".to_string()]);
    assert!(d.destroy.is_empty());
}
