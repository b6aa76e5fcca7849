// Add-collaborator workflow state

use crate::matching::NormalizedCollaborator;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AddFlow {
    #[default]
    Idle,
    Searching {
        term: String,
    },
    CandidateSelected {
        candidate: NormalizedCollaborator,
    },
    Submitting {
        candidate: NormalizedCollaborator,
    },
    Succeeded {
        candidate: NormalizedCollaborator,
    },
}

/// Result of picking a candidate from the search results.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    AlreadyMember(NormalizedCollaborator),
    Ready(NormalizedCollaborator),
}

impl AddFlow {
    /// Blank terms drop back to idle.
    pub fn begin_search(&mut self, term: &str) {
        let term = term.trim();
        *self = if term.is_empty() {
            AddFlow::Idle
        } else {
            AddFlow::Searching {
                term: term.to_string(),
            }
        };
    }

    /// Members go back to idle so the submit action stays disabled.
    pub fn select(&mut self, candidate: NormalizedCollaborator) -> Selection {
        if candidate.in_project {
            *self = AddFlow::Idle;
            return Selection::AlreadyMember(candidate);
        }
        *self = AddFlow::CandidateSelected {
            candidate: candidate.clone(),
        };
        Selection::Ready(candidate)
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, AddFlow::CandidateSelected { .. })
    }

    /// Moves to `Submitting` and hands back the candidate; `None` when no
    /// submission is allowed from the current state.
    pub fn start_submit(&mut self) -> Option<NormalizedCollaborator> {
        match std::mem::take(self) {
            AddFlow::CandidateSelected { candidate } => {
                *self = AddFlow::Submitting {
                    candidate: candidate.clone(),
                };
                Some(candidate)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// A failed submission returns to `CandidateSelected` so it can be retried.
    pub fn finish_submit(&mut self, succeeded: bool) {
        if let AddFlow::Submitting { candidate } = std::mem::take(self) {
            *self = if succeeded {
                AddFlow::Succeeded { candidate }
            } else {
                AddFlow::CandidateSelected { candidate }
            };
        }
    }

    pub fn selected(&self) -> Option<&NormalizedCollaborator> {
        match self {
            AddFlow::CandidateSelected { candidate }
            | AddFlow::Submitting { candidate }
            | AddFlow::Succeeded { candidate } => Some(candidate),
            AddFlow::Idle | AddFlow::Searching { .. } => None,
        }
    }

    pub fn reset(&mut self) {
        *self = AddFlow::Idle;
    }
}
