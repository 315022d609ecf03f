//! Property tests for group management and resolution.

use std::collections::BTreeSet;

use proptest::prelude::*;

use permgroup::PermissionStore;
use permgroup_testkit::generators::{
    group_name, invalid_group_name, invalid_token, overlapping_groups, permission_token,
    principal_id, GroupSpec,
};
use permgroup_testkit::TestFixture;

fn seed(fixture: &mut TestFixture, groups: &[GroupSpec]) {
    for spec in groups {
        let tokens: Vec<&str> = spec.tokens.iter().map(String::as_str).collect();
        let users: Vec<&str> = spec.users.iter().map(String::as_str).collect();
        fixture.seed_group(&spec.name, &tokens, &users);
    }
}

fn expected_sources<S: permgroup::DocumentStore>(
    store: &PermissionStore<S>,
    id: &str,
    token: &str,
) -> Vec<String> {
    store
        .groups()
        .iter()
        .filter(|g| g.has_user(id) && g.has_permission(token))
        .map(|g| g.name.clone())
        .collect()
}

proptest! {
    #[test]
    fn test_create_then_exists(name in group_name()) {
        let mut fixture = TestFixture::new();
        prop_assert!(fixture.store.create_group(&name).unwrap());
        prop_assert!(fixture.store.group_exists(&name));

        let before = fixture.store.groups().to_vec();
        prop_assert!(!fixture.store.create_group(&name).unwrap());
        prop_assert_eq!(fixture.store.groups(), &before[..]);
        prop_assert_eq!(fixture.saved_document().groups.len(), 1);
    }

    #[test]
    fn test_illegal_names_are_never_created(name in invalid_group_name()) {
        let mut fixture = TestFixture::new();
        prop_assert!(!fixture.store.create_group(&name).unwrap());
        prop_assert!(!fixture.store.group_exists(&name));
        prop_assert_eq!(fixture.backend.write_count(), 1);
    }

    #[test]
    fn test_add_then_remove_permission_restores_set(
        spec: GroupSpec,
        token in permission_token(),
    ) {
        let mut fixture = TestFixture::new();
        seed(&mut fixture, std::slice::from_ref(&spec));
        let before = fixture.store.group(&spec.name).unwrap().1.permissions.clone();

        let added = fixture.store.add_group_permission(&spec.name, &token).unwrap();
        prop_assert_eq!(added, !before.contains(&token));
        if added {
            prop_assert!(fixture.store.remove_group_permission(&spec.name, &token).unwrap());
        }
        let after = &fixture.store.group(&spec.name).unwrap().1.permissions;
        prop_assert_eq!(after, &before);
    }

    #[test]
    fn test_illegal_tokens_are_never_granted(spec: GroupSpec, token in invalid_token()) {
        let mut fixture = TestFixture::new();
        seed(&mut fixture, std::slice::from_ref(&spec));
        prop_assert!(!fixture.store.add_group_permission(&spec.name, &token).unwrap());
        prop_assert!(!fixture.store.group_has_permission(&spec.name, &token));
    }

    #[test]
    fn test_resolution_is_order_invariant(groups in overlapping_groups(6)) {
        let mut forward = TestFixture::new();
        seed(&mut forward, &groups);
        let mut reversed_groups = groups.clone();
        reversed_groups.reverse();
        let mut backward = TestFixture::new();
        seed(&mut backward, &reversed_groups);

        for id in ["1001", "1002", "1003", "9999"] {
            let a = forward.store.resolve_user_permissions(id);
            let b = backward.store.resolve_user_permissions(id);

            let set_a: BTreeSet<_> = a.permissions.iter().collect();
            let set_b: BTreeSet<_> = b.permissions.iter().collect();
            prop_assert_eq!(&set_a, &set_b);
            prop_assert_eq!(set_a.len(), a.permissions.len());

            for token in &a.permissions {
                prop_assert_eq!(a.granted_by(token), &expected_sources(&forward.store, id, token)[..]);
                prop_assert_eq!(b.granted_by(token), &expected_sources(&backward.store, id, token)[..]);
            }
            let keys: BTreeSet<_> = a.source.keys().collect();
            prop_assert_eq!(keys, set_a);
        }
    }

    #[test]
    fn test_has_permission_with_public_fallback(
        groups in overlapping_groups(4),
        public_tokens in prop::sample::subsequence(vec!["flyperm1", "chatperm", "tpperm01"], 0..=3),
        id in prop::sample::select(vec!["1001", "1002", "1003", "9999"]),
        token in prop::sample::select(vec!["flyperm1", "homeperm", "tpperm01", "kitperm1", "chatperm"]),
    ) {
        let mut fixture = TestFixture::with_public_group();
        seed(&mut fixture, &groups);
        for t in &public_tokens {
            fixture.store.add_public_group_permission(t).unwrap();
        }

        let via_groups = fixture.store.resolve_user_permissions(id).contains(token);
        let via_public = public_tokens.contains(&token);

        prop_assert_eq!(fixture.store.has_permission(id, token), via_groups || via_public);
        prop_assert_eq!(fixture.store.has_permission_with(id, token, true), via_groups || via_public);
        prop_assert_eq!(fixture.store.has_permission_with(id, token, false), via_groups);
    }

    #[test]
    fn test_rename_to_self_is_noop_success(spec: GroupSpec) {
        let mut fixture = TestFixture::new();
        seed(&mut fixture, std::slice::from_ref(&spec));
        let writes = fixture.backend.write_count();
        let before = fixture.store.groups().to_vec();

        prop_assert!(fixture.store.rename_group(&spec.name, &spec.name).unwrap());
        prop_assert_eq!(fixture.store.groups(), &before[..]);
        prop_assert_eq!(fixture.backend.write_count(), writes);
    }

    #[test]
    fn test_rename_to_illegal_name_keeps_original(spec: GroupSpec, bad in invalid_group_name()) {
        let mut fixture = TestFixture::new();
        seed(&mut fixture, std::slice::from_ref(&spec));

        prop_assert!(!fixture.store.rename_group(&spec.name, &bad).unwrap());
        prop_assert!(fixture.store.group_exists(&spec.name));
        let saved = fixture.saved_document();
        prop_assert_eq!(saved.groups[0].name.as_str(), spec.name.as_str());
    }

    #[test]
    fn test_membership_round_trip(spec: GroupSpec, id in principal_id()) {
        let mut fixture = TestFixture::new();
        seed(&mut fixture, std::slice::from_ref(&spec));
        let before = fixture.store.group(&spec.name).unwrap().1.users.clone();

        let added = fixture.store.add_user_to_group(&spec.name, &id).unwrap();
        prop_assert_eq!(added, !before.contains(&id));
        prop_assert!(fixture.store.group_has_user(&spec.name, &id));
        if added {
            prop_assert!(fixture.store.remove_user_from_group(&spec.name, &id).unwrap());
        }
        prop_assert_eq!(&fixture.store.group(&spec.name).unwrap().1.users, &before);
    }
}
