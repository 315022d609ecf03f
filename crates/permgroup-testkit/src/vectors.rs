//! Golden permission documents for interop verification.
//!
//! Each vector is a document in the established on-disk layout together with
//! facts any reader of that layout must agree on.

/// A golden document vector.
#[derive(Debug, Clone)]
pub struct GoldenDocument {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The raw JSON as found on disk.
    pub json: &'static str,
    /// Expected admin ids, in order.
    pub admins: &'static [&'static str],
    /// Expected group names, in order.
    pub groups: &'static [&'static str],
    /// Whether a public group is present.
    pub has_public_group: bool,
    /// `(principal, token, expected)` checks with the public group consulted.
    pub checks: &'static [(&'static str, &'static str, bool)],
}

/// Get all golden documents.
pub fn all_documents() -> Vec<GoldenDocument> {
    vec![
        GoldenDocument {
            name: "Freshly created document",
            json: r#"{"adminGroup":[],"userGroup":[]}"#,
            admins: &[],
            groups: &[],
            has_public_group: false,
            checks: &[("1001", "flyperm1", false)],
        },
        GoldenDocument {
            name: "Single group with one member",
            json: r#"{"adminGroup":["2535400000000001"],"userGroup":[{"groupName":"vip","authority":["flyperm1"],"user":["user-42"]}]}"#,
            admins: &["2535400000000001"],
            groups: &["vip"],
            has_public_group: false,
            checks: &[
                ("user-42", "flyperm1", true),
                ("user-99", "flyperm1", false),
                ("2535400000000001", "flyperm1", false),
            ],
        },
        GoldenDocument {
            name: "Overlapping groups with public fallback",
            json: r#"{
                "adminGroup": [],
                "userGroup": [
                    {"groupName": "builder", "authority": ["kitperm1", "homeperm"], "user": ["1001", "1002"]},
                    {"groupName": "会员", "authority": ["homeperm", "tpperm01"], "user": ["1002"]},
                    {"groupName": "empty", "authority": [], "user": ["1001"]}
                ],
                "publicGroup": {"authority": ["chatperm"]}
            }"#,
            admins: &[],
            groups: &["builder", "会员", "empty"],
            has_public_group: true,
            checks: &[
                ("1001", "kitperm1", true),
                ("1001", "tpperm01", false),
                ("1002", "tpperm01", true),
                ("1003", "chatperm", true),
                ("1003", "homeperm", false),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use permgroup_core::decode_document;

    #[test]
    fn test_all_documents_decode() {
        for vector in all_documents() {
            let doc = decode_document(vector.json.as_bytes())
                .unwrap_or_else(|e| panic!("{}: {}", vector.name, e));

            assert_eq!(doc.admins, vector.admins, "{}", vector.name);
            let names: Vec<_> = doc.groups.iter().map(|g| g.name.as_str()).collect();
            assert_eq!(names, vector.groups, "{}", vector.name);
            assert_eq!(doc.public_group.is_some(), vector.has_public_group, "{}", vector.name);
            assert!(doc.check().is_ok(), "{}", vector.name);
        }
    }
}
