use std::collections::HashSet;

use crate::models::RecordId;

use super::normalize::NormalizedCollaborator;

/// Snapshot of the current project's members. Build a fresh one whenever the
/// member list changes; it is never cached across an add.
#[derive(Debug, Default, Clone)]
pub struct MemberIndex {
    ids: HashSet<RecordId>,
    emails: HashSet<String>,
}

impl MemberIndex {
    pub fn new(members: &[NormalizedCollaborator]) -> Self {
        Self {
            ids: members.iter().filter_map(|m| m.id.clone()).collect(),
            emails: members.iter().filter_map(|m| m.email_key.clone()).collect(),
        }
    }

    /// Identifier match first, then case-insensitive e-mail. Names never count.
    pub fn contains(&self, candidate: &NormalizedCollaborator) -> bool {
        if candidate.id.as_ref().is_some_and(|id| self.ids.contains(id)) {
            return true;
        }
        candidate
            .email_key
            .as_ref()
            .is_some_and(|email| self.emails.contains(email))
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.emails.is_empty()
    }
}

/// Recomputes `in_project` for every candidate against `members`.
pub fn classify(candidates: &mut [NormalizedCollaborator], members: &[NormalizedCollaborator]) {
    let index = MemberIndex::new(members);
    for candidate in candidates {
        candidate.in_project = index.contains(candidate);
    }
}

/// Same person for deduplication: ids decide when both sides have one,
/// otherwise e-mails decide when both sides have one.
pub fn same_collaborator(a: &NormalizedCollaborator, b: &NormalizedCollaborator) -> bool {
    if let (Some(left), Some(right)) = (&a.id, &b.id) {
        return left == right;
    }
    match (&a.email_key, &b.email_key) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

/// Keeps the first occurrence of each collaborator, preserving order.
pub fn dedupe(
    candidates: impl IntoIterator<Item = NormalizedCollaborator>,
) -> Vec<NormalizedCollaborator> {
    let mut kept: Vec<NormalizedCollaborator> = Vec::new();
    for candidate in candidates {
        if !kept.iter().any(|k| same_collaborator(k, &candidate)) {
            kept.push(candidate);
        }
    }
    kept
}

/// Members first, then directory entries not already present.
pub fn merge_candidates(
    members: &[NormalizedCollaborator],
    directory: &[NormalizedCollaborator],
) -> Vec<NormalizedCollaborator> {
    dedupe(members.iter().chain(directory.iter()).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{fields::ID_FIELDS, normalize::normalize_record};
    use serde_json::json;

    fn collaborator(value: serde_json::Value) -> NormalizedCollaborator {
        normalize_record(&value, ID_FIELDS)
    }

    #[test]
    fn id_match_wins_even_when_emails_differ() {
        let members = vec![collaborator(json!({ "id": 1, "email": "a@x.com" }))];
        let index = MemberIndex::new(&members);
        assert!(index.contains(&collaborator(json!({ "id": 1 }))));
        assert!(index.contains(&collaborator(json!({ "id": "1", "email": "other@x.com" }))));
    }

    #[test]
    fn email_match_applies_when_ids_differ() {
        let members = vec![collaborator(json!({ "id": 1, "email": "a@x.com" }))];
        let index = MemberIndex::new(&members);
        assert!(index.contains(&collaborator(json!({ "id": 2, "email": "A@X.com " }))));
        assert!(!index.contains(&collaborator(json!({ "id": 2, "email": "b@x.com" }))));
    }

    #[test]
    fn names_never_match() {
        let members = vec![collaborator(json!({ "nome": "Ana Souza" }))];
        let index = MemberIndex::new(&members);
        assert!(index.is_empty());
        assert!(!index.contains(&collaborator(json!({ "nome": "Ana Souza" }))));
    }

    #[test]
    fn classification_is_idempotent() {
        let members = vec![collaborator(json!({ "id": 1, "email": "a@x.com" }))];
        let mut candidates = vec![
            collaborator(json!({ "id": 2, "email": "a@x.com" })),
            collaborator(json!({ "id": 3 })),
        ];
        classify(&mut candidates, &members);
        let first: Vec<bool> = candidates.iter().map(|c| c.in_project).collect();
        classify(&mut candidates, &members);
        let second: Vec<bool> = candidates.iter().map(|c| c.in_project).collect();
        assert_eq!(first, vec![true, false]);
        assert_eq!(first, second);
    }

    #[test]
    fn dedupe_prefers_ids_then_emails() {
        let merged = dedupe(vec![
            collaborator(json!({ "id": 1, "email": "a@x.com", "nome": "Ana" })),
            collaborator(json!({ "id": 1, "email": "changed@x.com" })),
            collaborator(json!({ "email": "A@x.com", "nome": "Ana again" })),
            collaborator(json!({ "id": 2, "email": "a@x.com" })),
            collaborator(json!({ "nome": "Ana" })),
            collaborator(json!({ "nome": "Ana" })),
        ]);
        let names: Vec<&str> = merged.iter().map(|c| c.name.as_str()).collect();
        // ids 1 and 2 differ so both stay; nameless-key entries never collapse
        assert_eq!(names, vec!["Ana", "A", "Ana", "Ana"]);
    }

    #[test]
    fn merge_keeps_member_copy() {
        let mut member = collaborator(json!({ "id": 4, "nome": "Carlos" }));
        member.in_project = true;
        let directory = vec![
            collaborator(json!({ "id": 4, "nome": "Carlos Silva" })),
            collaborator(json!({ "id": 5, "nome": "Lúcia" })),
        ];
        let merged = merge_candidates(&[member], &directory);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "Carlos");
        assert!(merged[0].in_project);
        assert_eq!(merged[1].name, "Lúcia");
    }
}
