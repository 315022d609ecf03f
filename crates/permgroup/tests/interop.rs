//! Interop with permission documents written by existing deployments.

use std::fs;
use std::sync::Arc;

use permgroup::{MemoryStore, PermissionConfig, PermissionStore};
use permgroup_testkit::vectors::all_documents;

fn open_with(json: &str, public: bool) -> (Arc<MemoryStore>, PermissionStore<Arc<MemoryStore>>) {
    let backend = Arc::new(MemoryStore::with_document("permission.json", json.as_bytes()));
    let config = PermissionConfig::default().with_public_group(public);
    let store = PermissionStore::open(Arc::clone(&backend), config).unwrap();
    (backend, store)
}

#[test]
fn test_golden_documents() {
    for vector in all_documents() {
        let (_, store) = open_with(vector.json, vector.has_public_group);

        assert_eq!(store.admins(), vector.admins, "{}", vector.name);
        let names: Vec<_> = store.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vector.groups, "{}", vector.name);

        for &(id, token, expected) in vector.checks {
            assert_eq!(
                store.has_permission(id, token),
                expected,
                "{}: has_permission({id}, {token})",
                vector.name
            );
        }
    }
}

#[test]
fn test_empty_groups_do_not_contribute_to_resolution() {
    let vector = &all_documents()[2];
    let (_, store) = open_with(vector.json, true);

    let resolved = store.resolve_user_permissions("1002");
    assert_eq!(resolved.permissions, ["kitperm1", "homeperm", "tpperm01"]);
    assert_eq!(resolved.granted_by("homeperm"), ["builder", "会员"]);

    assert_eq!(store.groups_containing("1001").len(), 2);
    assert!(store.resolve_user_permissions("1001").source.values().all(|g| g == &["builder"]));
}

#[test]
fn test_opening_existing_document_does_not_rewrite_it() {
    let json = r#"{"adminGroup":["1"],"userGroup":[],"extra":"kept by nobody"}"#;
    let (backend, store) = open_with(json, false);

    assert!(store.is_admin("1"));
    assert_eq!(backend.write_count(), 0);
    assert_eq!(backend.snapshot("permission.json").unwrap(), json.as_bytes());
}

#[test]
fn test_missing_member_lists_default_to_empty() {
    let json = r#"{"adminGroup":[],"userGroup":[{"groupName":"vip"}]}"#;
    let (_, mut store) = open_with(json, false);

    assert!(store.group_exists("vip"));
    assert!(store.add_user_to_group("vip", "user-42").unwrap());
    assert!(!store.has_permission("user-42", "flyperm1"));
}

#[test]
fn test_stored_public_group_is_kept_when_feature_is_off() {
    let vector = &all_documents()[2];
    let (backend, mut store) = open_with(vector.json, false);

    assert!(!store.has_permission("1003", "chatperm"));
    assert!(store.public_group_permissions().is_err());

    store.add_admin("9").unwrap();
    let saved = permgroup::core::decode_document(&backend.snapshot("permission.json").unwrap()).unwrap();
    assert_eq!(saved.public_group.unwrap().permissions, ["chatperm"]);
}

#[test]
fn test_duplicate_group_names_from_legacy_writers_still_load() {
    let json = r#"{"adminGroup":[],"userGroup":[
        {"groupName":"vip","authority":["flyperm1"],"user":["1"]},
        {"groupName":"vip","authority":["homeperm"],"user":["1"]}
    ]}"#;
    let (_, mut store) = open_with(json, false);

    assert_eq!(store.groups().len(), 2);
    // Name lookups hit the first match
    assert_eq!(store.group("vip").unwrap().0, 0);
    assert!(store.delete_group("vip").unwrap());
    assert!(store.group_has_permission("vip", "homeperm"));
}

#[test]
fn test_file_written_in_legacy_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("permission.json");
    let mut store = PermissionStore::open_file(&path, true).unwrap();
    store.create_group("vip").unwrap();
    store.add_group_permission("vip", "flyperm1").unwrap();
    store.add_user_to_group("vip", "user-42").unwrap();

    let value: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "adminGroup": [],
            "userGroup": [{"groupName": "vip", "authority": ["flyperm1"], "user": ["user-42"]}],
            "publicGroup": {"authority": []}
        })
    );
}
