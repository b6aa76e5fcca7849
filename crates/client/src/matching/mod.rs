pub mod fields;
pub mod membership;
pub mod normalize;
pub mod ranking;
pub mod search;
pub mod text;

pub use membership::{classify, dedupe, merge_candidates, same_collaborator, MemberIndex};
pub use normalize::{
    normalize_entry, normalize_member, normalize_record, NormalizedCollaborator, SkillEntry,
};
pub use ranking::{rank_candidates, required_skills, RankedCandidate, RequiredSkill};
pub use search::{filter_candidates, search_term, MAX_RESULTS};
