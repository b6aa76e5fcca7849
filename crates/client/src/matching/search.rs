use super::normalize::NormalizedCollaborator;

pub const MAX_RESULTS: usize = 12;

/// Lower-cased trimmed term, or `None` for an empty/whitespace term.
pub fn search_term(raw: &str) -> Option<String> {
    let term = raw.trim().to_lowercase();
    (!term.is_empty()).then_some(term)
}

/// Case-insensitive substring match over name, e-mail, role and skills.
/// `term` must already be normalised by [`search_term`].
pub fn matches(candidate: &NormalizedCollaborator, term: &str) -> bool {
    if candidate.name.to_lowercase().contains(term) {
        return true;
    }
    if candidate
        .email_key
        .as_deref()
        .is_some_and(|email| email.contains(term))
    {
        return true;
    }
    if candidate
        .role
        .as_deref()
        .is_some_and(|role| role.to_lowercase().contains(term))
    {
        return true;
    }
    candidate
        .skills
        .iter()
        .map(|s| format!("{} {}", s.name, s.level).to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
        .contains(term)
}

pub fn filter_candidates(
    candidates: &[NormalizedCollaborator],
    term: &str,
    limit: usize,
) -> Vec<NormalizedCollaborator> {
    candidates
        .iter()
        .filter(|c| matches(c, term))
        .take(limit)
        .cloned()
        .collect()
}
