//! Tombstone masking and cascade.

use fabryk_acl::{Action, AclStore, Decision, Error, NodeState, Reason};

use crate::common::{TestHarness, path, superuser, user};

#[test]
fn test_tombstone_hides_from_ordinary_callers() {
    let harness = TestHarness::new();
    let verdict = harness
        .engine()
        .evaluate(&user("alice", &[]), &path("/a/d"), Action::Read)
        .unwrap();
    assert_eq!(verdict.decision, Decision::Deny);
    assert_eq!(
        verdict.reason,
        Reason::Hidden {
            state: NodeState::Tombstoned
        }
    );
}

#[test]
fn test_superuser_sees_true_state() {
    let harness = TestHarness::new();
    assert_eq!(harness.decide(&superuser(), "/a/d", Action::Read), Decision::Allow);

    let err = harness
        .gateway
        .check(&superuser(), &path("/a/d"), Action::Read)
        .unwrap_err();
    assert!(matches!(err, Error::ResourceGone { .. }));

    let err = harness
        .gateway
        .check(&superuser(), &path("/a/d/e"), Action::Read)
        .unwrap_err();
    assert!(matches!(err, Error::ResourceNotFound { .. }));
}

#[test]
fn test_absent_nodes_hidden_from_ordinary_callers() {
    let harness = TestHarness::new();
    // /a grants EVERYONE reader, but nothing exists at /a/zzz.
    let verdict = harness
        .engine()
        .evaluate(&user("alice", &[]), &path("/a/zzz"), Action::Read)
        .unwrap();
    assert_eq!(
        verdict.reason,
        Reason::Hidden {
            state: NodeState::Absent
        }
    );
}

#[test]
fn test_tombstoning_cascades_acls() {
    let harness = TestHarness::from_seed(
        r#"{"resources": [
            {"path": "/a", "acl": {"alice": ["admin"]}},
            {"path": "/a/b", "acl": {"bob": ["writer"]}},
            {"path": "/a/b/c", "acl": {"carol": ["reader"]}},
            {"path": "/a/b/c/d"}
        ]}"#,
    );

    let removed = harness.repo.tombstone(&path("/a/b")).unwrap();
    assert_eq!(removed, 2);

    for raw in ["/a/b", "/a/b/c"] {
        assert!(!harness.repo.has_acl(&path(raw)).unwrap());
    }
    assert_eq!(harness.repo.state(&path("/a/b")).unwrap(), NodeState::Tombstoned);
    assert_eq!(harness.repo.state(&path("/a/b/c")).unwrap(), NodeState::Absent);
    assert_eq!(harness.repo.state(&path("/a/b/c/d")).unwrap(), NodeState::Absent);
    assert!(harness.repo.has_acl(&path("/a")).unwrap());
}

#[test]
fn test_set_acl_on_tombstone_by_superuser_is_gone() {
    let harness = TestHarness::new();
    let mut assignments = fabryk_acl::Assignments::new();
    assignments.insert("bob".to_string(), vec!["reader".to_string()]);

    let err = harness
        .gateway
        .set_acl(&superuser(), &path("/a/d"), assignments)
        .unwrap_err();
    assert!(matches!(err, Error::ResourceGone { .. }));
}

#[test]
fn test_purge_makes_path_absent_and_reusable() {
    let harness = TestHarness::new();
    harness.repo.purge(&path("/a/d")).unwrap();
    assert_eq!(harness.repo.state(&path("/a/d")).unwrap(), NodeState::Absent);

    harness.repo.create(&path("/a/d")).unwrap();
    // Recreated node inherits from /a again.
    assert_eq!(
        harness.decide(&user("alice", &[]), "/a/d", Action::ManageAcl),
        Decision::Allow
    );
}
