//! Proptest generators for property-based testing.

use std::collections::HashSet;

use proptest::prelude::*;

/// Generate a legal group or definition name.
pub fn group_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_\u{4e00}-\u{9fa5}]{1,16}".prop_map(String::from)
}

/// Generate a name that breaks the name rule (too long or a bad character).
pub fn invalid_group_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{17,24}".prop_map(String::from),
        "[a-z]{0,6}[ \\-.!@#é][a-z]{0,6}".prop_map(String::from),
    ]
}

/// Generate a legal permission token.
pub fn permission_token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{6,12}".prop_map(String::from)
}

/// Generate a token that breaks the token rule.
pub fn invalid_token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9]{0,5}".prop_map(String::from),
        "[a-zA-Z0-9]{13,20}".prop_map(String::from),
        "[a-z]{3}[_\\- ][a-z]{3}".prop_map(String::from),
    ]
}

/// Generate a principal id. Ids are opaque; any non-empty string works.
pub fn principal_id() -> impl Strategy<Value = String> {
    "[0-9]{4,16}".prop_map(String::from)
}

/// Blueprint for one group: its name, grants and members.
#[derive(Debug, Clone)]
pub struct GroupSpec {
    pub name: String,
    pub tokens: Vec<String>,
    pub users: Vec<String>,
}

impl Arbitrary for GroupSpec {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            group_name(),
            prop::collection::vec(permission_token(), 0..6),
            prop::collection::vec(principal_id(), 0..6),
        )
            .prop_map(|(name, tokens, users)| GroupSpec {
                name,
                tokens: dedup(tokens),
                users: dedup(users),
            })
            .boxed()
    }
}

/// Generate groups with distinct names drawn from a small shared pool of
/// tokens and users, so groups overlap.
pub fn overlapping_groups(max_groups: usize) -> impl Strategy<Value = Vec<GroupSpec>> {
    let tokens = ["flyperm1", "homeperm", "tpperm01", "kitperm1", "chatperm"];
    let users = ["1001", "1002", "1003"];

    prop::collection::vec(
        (
            group_name(),
            prop::sample::subsequence(tokens.to_vec(), 0..=tokens.len()),
            prop::sample::subsequence(users.to_vec(), 0..=users.len()),
        ),
        1..=max_groups,
    )
    .prop_map(|raw| {
        let mut seen = HashSet::new();
        raw.into_iter()
            .filter(|(name, _, _)| seen.insert(name.clone()))
            .map(|(name, tokens, users)| GroupSpec {
                name,
                tokens: tokens.into_iter().map(String::from).collect(),
                users: users.into_iter().map(String::from).collect(),
            })
            .collect()
    })
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|i| seen.insert(i.clone())).collect()
}
