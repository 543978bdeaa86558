//! Decision scenarios: nearest-ACL-wins, inheritance, default deny.

use fabryk_acl::{Action, Decision, Reason};
use proptest::prelude::*;

use crate::common::{TestHarness, anonymous, path, superuser, user};

#[test]
fn test_inherited_reader_grant() {
    let harness = TestHarness::new();
    assert_eq!(harness.decide(&anonymous(), "/a/b", Action::Read), Decision::Allow);
    assert_eq!(
        harness.decide(&anonymous(), "/a/b", Action::ManageAcl),
        Decision::Deny
    );
}

#[test]
fn test_child_acl_overrides_parent_completely() {
    let harness = TestHarness::new();
    let alice = user("alice", &[]);
    assert_eq!(harness.decide(&alice, "/a", Action::UpdateContent), Decision::Allow);
    assert_eq!(harness.decide(&alice, "/a/c", Action::UpdateContent), Decision::Deny);
    assert_eq!(harness.decide(&alice, "/a/c", Action::ManageAcl), Decision::Deny);
    assert_eq!(harness.decide(&alice, "/a/c", Action::Read), Decision::Allow);
}

#[test]
fn test_everyone_grant_dropped_by_child_acl() {
    // /a/c's ACL does not mention EVERYONE, so anonymous loses READ there.
    let harness = TestHarness::new();
    assert_eq!(harness.decide(&anonymous(), "/a/c", Action::Read), Decision::Deny);
}

#[test]
fn test_no_governing_acl_denies() {
    let harness = TestHarness::new();
    let verdict = harness
        .engine()
        .evaluate(&user("alice", &[]), &path("/x/y"), Action::Read)
        .unwrap();
    assert_eq!(verdict.decision, Decision::Deny);
    assert_eq!(verdict.reason, Reason::NoGoverningAcl);
}

#[test]
fn test_group_membership_grants() {
    let harness = TestHarness::new();
    let bob = user("bob", &["alice"]);
    assert_eq!(harness.decide(&bob, "/a/b", Action::ManageAcl), Decision::Allow);
}

#[test]
fn test_superuser_allowed_everywhere() {
    let harness = TestHarness::new();
    for raw in ["/", "/a", "/a/c", "/a/d", "/x/y", "/never/created"] {
        for action in Action::ALL {
            assert_eq!(harness.decide(&superuser(), raw, action), Decision::Allow);
        }
    }
}

#[test]
fn test_resolution_reports_governing_node() {
    let harness = TestHarness::new();
    let resolution = harness.engine().resolve(&path("/a/b")).unwrap().unwrap();
    assert_eq!(resolution.governing, path("/a"));
    assert_eq!(resolution.distance, 1);

    let own = harness.engine().resolve(&path("/a/c")).unwrap().unwrap();
    assert_eq!(own.governing, path("/a/c"));
    assert_eq!(own.distance, 0);
}

#[test]
fn test_custom_role_matrix() {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use fabryk_acl::{DecisionEngine, RoleMatrix, RoleMatrixConfig};

    let config = RoleMatrixConfig(BTreeMap::from([(
        "reader".to_string(),
        vec![Action::Read, Action::UpdateContent],
    )]));
    let harness = TestHarness::new();
    let engine = DecisionEngine::new(
        Arc::new(RoleMatrix::from_config(&config).unwrap()),
        harness.repo.clone(),
        harness.repo.clone(),
    );

    let alice = user("alice", &[]);
    // alice is admin on /a, but the custom matrix does not define admin.
    assert!(!engine.decide(&alice, &path("/a"), Action::Read).unwrap().is_allowed());
    assert!(
        engine
            .decide(&alice, &path("/a/c"), Action::UpdateContent)
            .unwrap()
            .is_allowed()
    );
}

proptest! {
    #[test]
    fn prop_no_acl_on_chain_denies_ordinary_callers(
        segments in proptest::collection::vec("[a-z]{1,6}", 1..5),
        action_index in 0usize..5,
    ) {
        let raw = format!("/x/{}", segments.join("/"));
        let harness = TestHarness::from_seed(&format!(
            r#"{{"resources": [{{"path": "{raw}"}}]}}"#
        ));
        let action = Action::ALL[action_index];
        prop_assert_eq!(harness.decide(&user("alice", &["staff"]), &raw, action), Decision::Deny);
        prop_assert_eq!(harness.decide(&superuser(), &raw, action), Decision::Allow);
    }

    #[test]
    fn prop_descendants_inherit_parent_acl(
        segments in proptest::collection::vec("[a-z]{1,6}", 1..5),
    ) {
        let raw = format!("/a/b/{}", segments.join("/"));
        let harness = TestHarness::from_seed(&format!(
            r#"{{"resources": [
                {{"path": "/a", "acl": {{"EVERYONE": ["reader"], "alice": ["admin"]}}}},
                {{"path": "{raw}"}}
            ]}}"#
        ));
        let deep = harness.engine().resolve(&path(&raw)).unwrap().unwrap();
        let parent = harness.engine().resolve(&path("/a/b")).unwrap().unwrap();
        prop_assert_eq!(deep.acl, parent.acl);
        prop_assert_eq!(deep.governing, path("/a"));
    }
}
