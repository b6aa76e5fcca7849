// Skill-based recommendation: who in the directory covers the project's tags

use crate::models::{Project, SkillLevel};

use super::normalize::NormalizedCollaborator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredSkill {
    pub name: String,
    pub min_level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMatch {
    pub name: String,
    pub level: SkillLevel,
    pub required: SkillLevel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub collaborator: NormalizedCollaborator,
    pub matches: Vec<SkillMatch>,
    pub score: u32,
}

/// Tags without a usable name are skipped. A missing or blank level means
/// intermediate; an unrecognised one means beginner.
pub fn required_skills(project: &Project) -> Vec<RequiredSkill> {
    project
        .tags
        .iter()
        .filter_map(|tag| {
            Some(RequiredSkill {
                name: tag.skill_name()?.to_string(),
                min_level: match tag.skill_level.as_deref().map(str::trim) {
                    None | Some("") => SkillLevel::Intermediate,
                    Some(code) => SkillLevel::from_code(code).unwrap_or(SkillLevel::Beginner),
                },
            })
        })
        .collect()
}

/// Candidates holding at least one required skill at or above its level,
/// best score first. Unknown collaborator levels count as beginner.
pub fn rank_candidates(
    candidates: &[NormalizedCollaborator],
    required: &[RequiredSkill],
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .filter_map(|candidate| {
            let mut matches = Vec::new();
            for need in required {
                for skill in &candidate.skills {
                    if skill.name.to_lowercase() != need.name.to_lowercase() {
                        continue;
                    }
                    let level =
                        SkillLevel::from_code(&skill.level_code).unwrap_or(SkillLevel::Beginner);
                    if level.ordinal() >= need.min_level.ordinal() {
                        matches.push(SkillMatch {
                            name: skill.name.clone(),
                            level,
                            required: need.min_level,
                        });
                    }
                }
            }
            if matches.is_empty() {
                return None;
            }
            let score = matches.iter().map(|m| u32::from(m.level.ordinal())).sum();
            Some(RankedCandidate {
                collaborator: candidate.clone(),
                matches,
                score,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
