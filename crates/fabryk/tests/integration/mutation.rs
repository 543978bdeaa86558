//! Mutation gateway scenarios.

use fabryk_acl::{Action, Assignments, Decision, Error, SetOutcome};

use crate::common::{TestHarness, anonymous, path, superuser, user};

fn assignments(pairs: &[(&str, &[&str])]) -> Assignments {
    pairs
        .iter()
        .map(|(principal, roles)| {
            (
                principal.to_string(),
                roles.iter().map(|r| r.to_string()).collect(),
            )
        })
        .collect()
}

#[test]
fn test_set_then_replace() {
    let harness = TestHarness::new();
    let alice = user("alice", &[]);
    let target = path("/a/b");

    let outcome = harness
        .gateway
        .set_acl(&alice, &target, assignments(&[("bob", &["writer"])]))
        .unwrap();
    assert_eq!(outcome, SetOutcome::Created);
    assert_eq!(
        harness.decide(&user("bob", &[]), "/a/b", Action::UpdateContent),
        Decision::Allow
    );
    // The new ACL does not mention alice; she lost control of /a/b.
    assert_eq!(harness.decide(&alice, "/a/b", Action::ManageAcl), Decision::Deny);

    let outcome = harness
        .gateway
        .set_acl(&superuser(), &target, assignments(&[("carol", &["reader"])]))
        .unwrap();
    assert_eq!(outcome, SetOutcome::Replaced);
    assert_eq!(
        harness.decide(&user("bob", &[]), "/a/b", Action::Read),
        Decision::Deny
    );
}

#[test]
fn test_root_is_prohibited_for_everyone() {
    let harness = TestHarness::new();
    let root = path("/");
    for caller in [superuser(), user("alice", &[]), anonymous()] {
        let err = harness
            .gateway
            .set_acl(&caller, &root, assignments(&[("alice", &["admin"])]))
            .unwrap_err();
        assert!(matches!(err, Error::RootProhibited));

        let err = harness.gateway.set_acl(&caller, &root, Assignments::new()).unwrap_err();
        assert!(matches!(err, Error::RootProhibited));

        let err = harness.gateway.set_acl_json(&caller, &root, b"garbage").unwrap_err();
        assert!(matches!(err, Error::RootProhibited));

        let err = harness.gateway.delete_acl(&caller, &root).unwrap_err();
        assert!(matches!(err, Error::RootProhibited));
    }
}

#[test]
fn test_invalid_payloads_leave_store_unchanged() {
    let harness = TestHarness::new();
    let target = path("/a");
    let before = harness.gateway.get_acl(&superuser(), &target, false).unwrap();

    let bodies: [&[u8]; 5] = [
        b"{}",
        br#"{"": ["admin"]}"#,
        br#"{"p": []}"#,
        br#"{"p": [" "]}"#,
        br#"["not", "a", "map"]"#,
    ];
    for body in bodies {
        let err = harness
            .gateway
            .set_acl_json(&superuser(), &target, body)
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }), "{err}");
    }

    let after = harness.gateway.get_acl(&superuser(), &target, false).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_unauthorized_set_is_forbidden() {
    let harness = TestHarness::new();
    let err = harness
        .gateway
        .set_acl(&anonymous(), &path("/a/b"), assignments(&[("EVERYONE", &["admin"])]))
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { action: Action::ManageAcl, .. }));
    assert!(harness.gateway.get_acl(&superuser(), &path("/a/b"), false).unwrap().is_none());
}

#[test]
fn test_delete_restores_inheritance() {
    let harness = TestHarness::new();
    let alice = user("alice", &[]);
    assert_eq!(harness.decide(&alice, "/a/c", Action::UpdateContent), Decision::Deny);

    let removed = harness.gateway.delete_acl(&superuser(), &path("/a/c")).unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(harness.decide(&alice, "/a/c", Action::UpdateContent), Decision::Allow);

    let err = harness.gateway.delete_acl(&superuser(), &path("/a/c")).unwrap_err();
    assert!(matches!(err, Error::AclNotFound { .. }));
}

#[test]
fn test_get_acl_direct_and_effective() {
    let harness = TestHarness::new();
    let alice = user("alice", &[]);
    let target = path("/a/b");

    assert!(harness.gateway.get_acl(&alice, &target, false).unwrap().is_none());
    let effective = harness.gateway.get_acl(&alice, &target, true).unwrap().unwrap();
    assert_eq!(
        Some(effective),
        harness.gateway.get_acl(&alice, &path("/a"), false).unwrap()
    );

    // Stable across repeated reads.
    let first = harness.gateway.get_acl(&alice, &path("/a"), false).unwrap();
    let second = harness.gateway.get_acl(&alice, &path("/a"), false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_get_acl_requires_read() {
    let harness = TestHarness::new();
    let err = harness
        .gateway
        .get_acl(&anonymous(), &path("/x/y"), true)
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { action: Action::Read, .. }));
}

#[test]
fn test_unknown_roles_are_stored_but_grant_nothing() {
    let harness = TestHarness::new();
    harness
        .gateway
        .set_acl(&superuser(), &path("/a/b"), assignments(&[("bob", &["curator"])]))
        .unwrap();
    for action in Action::ALL {
        assert_eq!(harness.decide(&user("bob", &[]), "/a/b", action), Decision::Deny);
    }
}
