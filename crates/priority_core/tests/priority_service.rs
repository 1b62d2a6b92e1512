use priority_core::{Container, ImportError, PriorityNode, PriorityService, RelocateOutcome};
use std::collections::HashSet;
use uuid::Uuid;

fn all_ids(nodes: &[PriorityNode]) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for node in nodes {
        node.collect_ids(&mut ids);
    }
    ids
}

#[test]
fn add_top_level_and_child_append_in_order() {
    let mut service = PriorityService::new();
    let first = service.add_top_level("First");
    let second = service.add_top_level("Second");
    let child_a = service.add_child(first, "Child A").unwrap();
    let child_b = service.add_child(first, "Child B").unwrap();

    assert_eq!(service.tree().root_ids(), vec![first, second]);
    assert_eq!(service.tree().child_ids(first), Some(vec![child_a, child_b]));
    assert_eq!(service.export(), "- First\n-- Child A\n-- Child B\n- Second\n");
}

#[test]
fn add_child_to_missing_parent_is_noop() {
    let mut service = PriorityService::with_sample();
    let before = service.snapshot();

    assert_eq!(service.add_child(Uuid::new_v4(), "lost"), None);
    assert_eq!(service.snapshot(), before);
}

#[test]
fn rename_to_blank_keeps_previous_content() {
    let mut service = PriorityService::new();
    let id = service.add_top_level("Keep me");

    assert!(!service.rename(id, ""));
    assert!(!service.rename(id, "   \t"));
    assert_eq!(service.get(id).unwrap().content, "Keep me");

    assert!(service.rename(id, "Renamed"));
    assert_eq!(service.get(id).unwrap().content, "Renamed");
}

#[test]
fn delete_cascades_to_descendants() {
    let mut service = PriorityService::new();
    let keep = service.add_top_level("keep");
    let doomed = service.add_top_level("doomed");
    let child = service.add_child(doomed, "child").unwrap();
    let grandchild = service.add_child(child, "grandchild").unwrap();

    assert!(service.delete(doomed));
    let remaining: HashSet<_> = all_ids(&service.snapshot()).into_iter().collect();
    assert_eq!(remaining, HashSet::from([keep]));
    assert!(!remaining.contains(&child));
    assert!(!remaining.contains(&grandchild));

    assert!(!service.delete(doomed));
}

#[test]
fn ids_stay_unique_across_adds_and_imports() {
    let mut service = PriorityService::with_sample();
    let root = service.add_top_level("extra");
    for n in 0..20 {
        service.add_child(root, &format!("child {n}")).unwrap();
    }
    let ids = all_ids(&service.snapshot());
    let distinct: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), ids.len());

    let text = service.export();
    service.import(&text).unwrap();
    service.import(&text).unwrap();
    let ids = all_ids(&service.snapshot());
    let distinct: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), ids.len());
    assert_eq!(ids.len(), 26);
}

#[test]
fn relocate_by_token_accepts_drag_triple() {
    let mut service = PriorityService::with_sample();
    let roots = service.tree().root_ids();
    let (wake, work, sleep) = (roots[0], roots[1], roots[2]);

    let outcome = service.relocate_by_token(
        &sleep.to_string(),
        &format!("children-of:{work}"),
        0,
    );
    assert_eq!(outcome, RelocateOutcome::Moved);
    assert_eq!(
        service.export(),
        "- Wake up\n- Go to work\n-- Sleep\n-- Take the bus\n-- Get some work done!\n"
    );

    let outcome = service.relocate_by_token(&sleep.to_string(), "root", 0);
    assert_eq!(outcome, RelocateOutcome::Moved);
    assert_eq!(service.tree().root_ids(), vec![sleep, wake, work]);
}

#[test]
fn relocate_by_token_ignores_garbage() {
    let mut service = PriorityService::with_sample();
    let before = service.snapshot();
    let wake = service.tree().root_ids()[0];

    assert_eq!(
        service.relocate_by_token("not-an-id", "root", 0),
        RelocateOutcome::SourceNotFound
    );
    assert_eq!(
        service.relocate_by_token(&wake.to_string(), "children-xyz", 0),
        RelocateOutcome::DestinationNotFound
    );
    assert_eq!(service.snapshot(), before);
}

#[test]
fn relocate_rejects_cycle_through_service() {
    let mut service = PriorityService::with_sample();
    let work = service.tree().root_ids()[1];
    let bus = service.tree().child_ids(work).unwrap()[0];
    let before = service.export();

    assert_eq!(
        service.relocate(work, Container::ChildrenOf(bus), 0),
        RelocateOutcome::CycleRejected
    );
    assert_eq!(service.export(), before);
}

#[test]
fn import_replaces_tree_on_success() {
    let mut service = PriorityService::with_sample();

    let count = service.import("- One\n-- Two\n\n--- Three\n- Four").unwrap();
    assert_eq!(count, 4);
    assert_eq!(service.export(), "- One\n-- Two\n--- Three\n- Four\n");
}

#[test]
fn failed_import_leaves_tree_untouched() {
    let mut service = PriorityService::with_sample();
    let before = service.snapshot();

    assert_eq!(service.import("   \n "), Err(ImportError::Empty));
    assert_eq!(
        service.import("Not a valid line"),
        Err(ImportError::Malformed { lines: vec![1] })
    );
    assert_eq!(
        service.import("- fine\n--broken\n- fine again\noops"),
        Err(ImportError::Malformed { lines: vec![2, 4] })
    );
    assert_eq!(service.snapshot(), before);
}

#[test]
fn snapshot_serializes_for_rendering_layer() {
    let mut service = PriorityService::new();
    let root = service.add_top_level("Root");
    service.add_child(root, "Leaf").unwrap();

    let json = serde_json::to_value(service.snapshot()).unwrap();
    assert_eq!(json[0]["id"], root.to_string());
    assert_eq!(json[0]["content"], "Root");
    assert_eq!(json[0]["children"][0]["content"], "Leaf");
    assert_eq!(json[0]["children"][0]["children"], serde_json::json!([]));

    let decoded: Vec<PriorityNode> = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, service.snapshot());
}

#[test]
fn deep_chain_survives_export_import_and_delete() {
    const DEPTH: usize = 10_000;
    let mut service = PriorityService::new();
    let top = service.add_top_level("level 0");
    let mut bottom = top;
    for depth in 1..DEPTH {
        bottom = service.add_child(bottom, &format!("level {depth}")).unwrap();
    }
    assert_eq!(service.tree().depth(bottom), Some(DEPTH));

    let text = service.export();
    assert_eq!(text.lines().count(), DEPTH);
    assert!(text.ends_with(&format!(" level {}\n", DEPTH - 1)));

    assert_eq!(
        service.relocate(top, Container::ChildrenOf(bottom), 0),
        RelocateOutcome::CycleRejected
    );

    assert_eq!(service.import(&text).unwrap(), DEPTH);
    assert_eq!(service.export(), text);

    let top = service.tree().root_ids()[0];
    assert!(service.delete(top));
    assert!(service.is_empty());
}

#[test]
fn content_with_line_breaks_is_flattened_and_round_trips() {
    let mut service = PriorityService::new();
    let root = service.add_top_level("Plan\nthe week ");
    let child = service.add_child(root, "line\r\nbreaks").unwrap();
    assert!(service.rename(child, " split\nagain "));

    assert_eq!(service.tree().content(root), Some("Plan the week"));
    let text = service.export();
    assert_eq!(text, "- Plan the week\n-- split again\n");
    assert_eq!(service.import(&text).unwrap(), 2);
    assert_eq!(service.export(), text);
}
