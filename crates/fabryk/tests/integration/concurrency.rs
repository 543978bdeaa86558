//! Readers racing ACL replacement see the old or the new ACL, never a mix.

use std::sync::Arc;
use std::thread;

use fabryk_acl::{Acl, AclStore, Action, Assignments};

use crate::common::{TestHarness, path, superuser, user};

fn acl_for(principal: &str, role: &str) -> Assignments {
    Assignments::from([(principal.to_string(), vec![role.to_string()])])
}

#[test]
fn test_concurrent_replacement_is_atomic() {
    let harness = Arc::new(TestHarness::new());
    let target = path("/a/b");
    let old = acl_for("alice", "admin");
    let new = acl_for("bob", "writer");
    harness
        .gateway
        .set_acl(&superuser(), &target, old.clone())
        .unwrap();

    let expected_old = Acl::try_from_assignments(old.clone()).unwrap();
    let expected_new = Acl::try_from_assignments(new.clone()).unwrap();

    let writer = {
        let harness = Arc::clone(&harness);
        let target = target.clone();
        thread::spawn(move || {
            for i in 0..200 {
                let next = if i % 2 == 0 { new.clone() } else { old.clone() };
                harness.gateway.set_acl(&superuser(), &target, next).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let harness = Arc::clone(&harness);
            let target = target.clone();
            let (expected_old, expected_new) = (expected_old.clone(), expected_new.clone());
            thread::spawn(move || {
                for _ in 0..500 {
                    let seen = harness.repo.get_acl(&target).unwrap().unwrap();
                    assert!(seen == expected_old || seen == expected_new, "torn read: {seen:?}");

                    // Allowed under either ACL.
                    let both = user("alice", &["bob"]);
                    assert!(
                        harness
                            .engine()
                            .decide(&both, &target, Action::UpdateContent)
                            .unwrap()
                            .is_allowed()
                    );
                    // Denied under either ACL.
                    assert!(
                        !harness
                            .engine()
                            .decide(&user("carol", &[]), &target, Action::Read)
                            .unwrap()
                            .is_allowed()
                    );
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}
