//! Canonical collaborator view built from membership records, directory
//! entries and search details. Resolution never fails: every field has a
//! display default.

use serde::Serialize;
use serde_json::Value;

use crate::models::RecordId;

use super::{
    fields::{self, first_id, first_list, first_scalar, first_text, FieldPath},
    membership::MemberIndex,
    text::{capitalize_name, format_skill_level, name_from_email, normalize_email, valid_string},
};

pub const DEFAULT_NAME: &str = "Colaborador";
pub const MISSING_EMAIL: &str = "E-mail não informado";
pub const DEFAULT_SKILL: &str = "Habilidade";
pub const NO_SKILLS: &str = "Sem habilidades cadastradas";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillEntry {
    #[serde(rename = "nome")]
    pub name: String,
    /// Localized label (or the raw code when unknown).
    #[serde(rename = "nivel")]
    pub level: String,
    #[serde(skip)]
    pub level_code: String,
}

impl SkillEntry {
    fn summary(&self) -> String {
        if self.level.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.level)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCollaborator {
    pub id: Option<RecordId>,
    #[serde(rename = "nome")]
    pub name: String,
    /// Original casing, or [`MISSING_EMAIL`].
    pub email: String,
    /// Trimmed lower-case e-mail used for comparisons.
    #[serde(skip)]
    pub email_key: Option<String>,
    pub skill_name: String,
    pub skill_level: String,
    pub skill_level_label: String,
    #[serde(rename = "skillsResumo")]
    pub skills_summary: String,
    pub skills: Vec<SkillEntry>,
    #[serde(skip)]
    pub role: Option<String>,
    #[serde(rename = "estaNoProjeto")]
    pub in_project: bool,
}

impl NormalizedCollaborator {
    pub fn has_email(&self) -> bool {
        self.email_key.is_some()
    }

    /// Key used to pick this collaborator from a result list.
    pub fn selection_key(&self) -> Option<String> {
        self.id
            .as_ref()
            .map(RecordId::to_string)
            .or_else(|| self.email_key.clone())
    }

    /// Short "Skill - Nível" line used on project cards.
    pub fn skill_line(&self) -> String {
        if self.skill_name == DEFAULT_SKILL && self.skills.is_empty() {
            return self.skills_summary.clone();
        }
        if self.skill_level_label.is_empty() {
            self.skill_name.clone()
        } else {
            format!("{} - {}", self.skill_name, self.skill_level_label)
        }
    }
}

/// Builds a project member. `details` comes from the directory search and
/// outranks the membership record for identity fields; the membership's
/// contributed skill outranks everything for the skill pair.
pub fn normalize_member(member: &Value, details: Option<&Value>) -> NormalizedCollaborator {
    let email = details
        .and_then(|d| first_text(d, fields::EMAIL_FIELDS))
        .or_else(|| first_text(member, fields::MEMBER_EMAIL_FIELDS));

    let explicit_name = details
        .and_then(|d| first_text(d, fields::NAME_FIELDS))
        .or_else(|| first_text(member, fields::MEMBER_NAME_FIELDS));

    let skills = details
        .map(resolve_skills)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| resolve_skills(member));

    // Member contributed level, detail level, member `nivel`, detail `nivel`.
    let resolved_level = first_scalar(member, fields::CONTRIBUTED_SKILL_LEVEL_FIELDS)
        .or_else(|| details.and_then(|d| first_scalar(d, fields::DETAIL_SKILL_LEVEL_FIELDS)))
        .or_else(|| first_scalar(member, fields::PLAIN_LEVEL_FIELDS))
        .or_else(|| details.and_then(|d| first_scalar(d, fields::PLAIN_LEVEL_FIELDS)));

    let (skill_name, skill_level) =
        if let Some(name) = first_text(member, fields::CONTRIBUTED_SKILL_NAME_FIELDS) {
            (name, resolved_level.unwrap_or_default())
        } else if let Some(name) =
            details.and_then(|d| first_text(d, fields::DETAIL_SKILL_NAME_FIELDS))
        {
            (name, resolved_level.unwrap_or_default())
        } else if let Some(first) = skills.first() {
            (
                first.name.clone(),
                resolved_level.unwrap_or_else(|| first.level_code.clone()),
            )
        } else {
            (DEFAULT_SKILL.to_string(), resolved_level.unwrap_or_default())
        };

    let single_skill = details
        .and_then(|d| first_text(d, fields::SINGLE_SKILL_FIELDS))
        .or_else(|| first_text(member, fields::SINGLE_SKILL_FIELDS));

    let id = first_id(member, fields::MEMBER_ID_FIELDS)
        .or_else(|| details.and_then(|d| first_id(d, fields::ID_FIELDS)));

    let role = details
        .and_then(|d| first_text(d, fields::ROLE_FIELDS))
        .or_else(|| first_text(member, fields::ROLE_FIELDS));

    let mut collaborator = assemble(
        id,
        explicit_name,
        email,
        skill_name,
        skill_level,
        skills,
        single_skill,
    );
    collaborator.role = role;
    collaborator.in_project = true;
    collaborator
}

/// Builds a directory entry and classifies it against the current members.
pub fn normalize_entry(raw: &Value, members: &MemberIndex) -> NormalizedCollaborator {
    let mut collaborator = normalize_record(raw, fields::ID_FIELDS);
    collaborator.in_project = members.contains(&collaborator);
    collaborator
}

/// Directory shape without membership classification.
pub fn normalize_record(raw: &Value, id_fields: &[FieldPath]) -> NormalizedCollaborator {
    let email = first_text(raw, fields::EMAIL_FIELDS);
    let name = first_text(raw, fields::NAME_FIELDS);
    let skills = resolve_skills(raw);
    let (skill_name, skill_level) = match skills.first() {
        Some(first) => (first.name.clone(), first.level_code.clone()),
        None => (DEFAULT_SKILL.to_string(), String::new()),
    };
    let single_skill = first_text(raw, fields::SINGLE_SKILL_FIELDS);

    let mut collaborator = assemble(
        first_id(raw, id_fields),
        name,
        email,
        skill_name,
        skill_level,
        skills,
        single_skill,
    );
    collaborator.role = first_text(raw, fields::ROLE_FIELDS);
    collaborator
}

fn assemble(
    id: Option<RecordId>,
    name: Option<String>,
    email: Option<String>,
    skill_name: String,
    skill_level: String,
    skills: Vec<SkillEntry>,
    single_skill: Option<String>,
) -> NormalizedCollaborator {
    let name = name
        .map(|n| capitalize_name(&n))
        .or_else(|| email.as_deref().and_then(name_from_email))
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    let skill_level_label = format_skill_level(&skill_level);

    let skills_summary = if !skills.is_empty() {
        skills
            .iter()
            .map(SkillEntry::summary)
            .collect::<Vec<_>>()
            .join(", ")
    } else if skill_name != DEFAULT_SKILL {
        SkillEntry {
            name: skill_name.clone(),
            level: skill_level_label.clone(),
            level_code: skill_level.clone(),
        }
        .summary()
    } else {
        single_skill.unwrap_or_else(|| NO_SKILLS.to_string())
    };

    NormalizedCollaborator {
        id,
        name,
        email_key: email.as_deref().and_then(normalize_email),
        email: email.unwrap_or_else(|| MISSING_EMAIL.to_string()),
        skill_name,
        skill_level,
        skill_level_label,
        skills_summary,
        skills,
        role: None,
        in_project: false,
    }
}

fn resolve_skills(record: &Value) -> Vec<SkillEntry> {
    let Some(list) = first_list(record, fields::SKILL_LIST_FIELDS) else {
        return Vec::new();
    };
    list.iter()
        .filter_map(|entry| {
            let (name, level_code) = match entry {
                Value::String(s) => (valid_string(s)?.to_string(), String::new()),
                _ => (
                    first_text(entry, fields::SKILL_ENTRY_NAME_FIELDS)?,
                    first_scalar(entry, fields::SKILL_ENTRY_LEVEL_FIELDS).unwrap_or_default(),
                ),
            };
            Some(SkillEntry {
                level: format_skill_level(&level_code),
                name,
                level_code,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_falls_back_to_email_then_default() {
        let from_email = normalize_record(&json!({ "email": "a.b_c@x.com" }), fields::ID_FIELDS);
        assert_eq!(from_email.name, "A B C");

        let bare = normalize_record(&json!({}), fields::ID_FIELDS);
        assert_eq!(bare.name, DEFAULT_NAME);
        assert_eq!(bare.email, MISSING_EMAIL);
        assert_eq!(bare.email_key, None);
        assert_eq!(bare.skills_summary, NO_SKILLS);
        assert_eq!(bare.skill_name, DEFAULT_SKILL);
    }

    #[test]
    fn email_keeps_display_casing() {
        let c = normalize_record(&json!({ "email": " Ana.Souza@Example.com " }), fields::ID_FIELDS);
        assert_eq!(c.email, "Ana.Souza@Example.com");
        assert_eq!(c.email_key.as_deref(), Some("ana.souza@example.com"));
    }

    #[test]
    fn directory_entry_skills_and_summary() {
        let c = normalize_record(
            &json!({
                "id": 1,
                "nome": "ana souza",
                "habilidades": [
                    { "nome": "Python", "nivel": "ADVANCED" },
                    { "name": "SQL", "level": "intermediate" },
                    { "nivel": "beginner" },
                    "Docker"
                ]
            }),
            fields::ID_FIELDS,
        );
        assert_eq!(c.id.as_ref().unwrap().as_str(), "1");
        assert_eq!(c.name, "Ana Souza");
        assert_eq!(c.skill_name, "Python");
        assert_eq!(c.skill_level, "ADVANCED");
        assert_eq!(c.skill_level_label, "Avançado");
        assert_eq!(c.skills.len(), 3);
        assert_eq!(
            c.skills_summary,
            "Python (Avançado), SQL (Intermediário), Docker"
        );
    }

    #[test]
    fn single_free_text_skill_used_for_summary() {
        let c = normalize_record(&json!({ "skill": "Figma" }), fields::ID_FIELDS);
        assert_eq!(c.skills_summary, "Figma");
        assert_eq!(c.skill_name, DEFAULT_SKILL);
    }

    #[test]
    fn member_contributed_skill_wins_over_details() {
        let member = json!({
            "collaborator_id": 5,
            "collaborator_email": "carlos@example.com",
            "contributed_skill_name": "DevOps",
            "contributed_skill_level": "advanced"
        });
        let details = json!({
            "id": 77,
            "name": "Carlos Silva",
            "email": "Carlos@Example.com",
            "skill_name": "Docker",
            "skill_level": "beginner",
            "skills": [{ "nome": "Kubernetes", "nivel": "intermediate" }]
        });

        let c = normalize_member(&member, Some(&details));
        assert_eq!(c.id.as_ref().unwrap().as_str(), "5");
        assert_eq!(c.name, "Carlos Silva");
        assert_eq!(c.email, "Carlos@Example.com");
        assert_eq!(c.skill_name, "DevOps");
        assert_eq!(c.skill_level_label, "Avançado");
        assert_eq!(c.skills_summary, "Kubernetes (Intermediário)");
        assert!(c.in_project);
        assert_eq!(c.skill_line(), "DevOps - Avançado");
    }

    #[test]
    fn member_without_details_uses_own_record() {
        let member = json!({ "id": 3, "collaborator_email": "maria_clara@x.com", "nivel": "beginner" });
        let c = normalize_member(&member, None);
        assert_eq!(c.name, "Maria Clara");
        assert_eq!(c.skill_name, DEFAULT_SKILL);
        assert_eq!(c.skill_level, "beginner");
        assert_eq!(c.skill_level_label, "Iniciante");
        assert_eq!(c.skills_summary, NO_SKILLS);
        assert_eq!(c.skill_line(), NO_SKILLS);
        assert_eq!(c.id.as_ref().unwrap().as_str(), "3");
    }

    #[test]
    fn member_level_survives_without_a_skill_name() {
        let member = json!({
            "id": 3,
            "collaborator_email": "m@x.com",
            "contributed_skill_level": "advanced",
            "nivel": "beginner"
        });
        let c = normalize_member(&member, None);
        assert_eq!(c.skill_level_label, "Avançado");

        let listed = json!({
            "collaborator_email": "m@x.com",
            "nivel": "beginner",
            "skills": [{ "nome": "Go", "nivel": "advanced" }]
        });
        let c = normalize_member(&listed, None);
        assert_eq!(c.skill_name, "Go");
        assert_eq!(c.skill_level_label, "Iniciante");

        let from_details = normalize_member(
            &json!({ "collaborator_email": "m@x.com", "nivel": "beginner" }),
            Some(&json!({ "skill_level": "intermediate" })),
        );
        assert_eq!(from_details.skill_level_label, "Intermediário");
    }

    #[test]
    fn detail_skill_pair_used_when_member_has_none() {
        let member = json!({ "email": "bia@example.com" });
        let details = json!({ "skill_name": "React", "skill_level": "intermediate" });
        let c = normalize_member(&member, Some(&details));
        assert_eq!(c.skill_name, "React");
        assert_eq!(c.skill_level_label, "Intermediário");
        assert_eq!(c.skills_summary, "React (Intermediário)");
    }

    #[test]
    fn serializes_canonical_keys() {
        let c = normalize_record(&json!({ "id": "x", "nome": "Ana" }), fields::ID_FIELDS);
        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["nome"], "Ana");
        assert_eq!(value["skillsResumo"], NO_SKILLS);
        assert_eq!(value["estaNoProjeto"], false);
        assert_eq!(value["skillLevelLabel"], "");
        assert!(value.get("email_key").is_none());
    }
}
