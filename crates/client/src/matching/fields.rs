//! Ordered field accessors for the collaborator shapes the upstream services
//! send. Each list is tried front to back; the first usable value wins.

use serde_json::Value;

use crate::models::RecordId;

use super::text::valid_string;

/// A path of object keys into a JSON record.
pub type FieldPath = &'static [&'static str];

pub const NAME_FIELDS: &[FieldPath] = &[
    &["nome"],
    &["name"],
    &["full_name"],
    &["fullName"],
    &["display_name"],
    &["displayName"],
    &["usuario", "nome"],
    &["usuario", "name"],
];

/// Name aliases that only appear on membership records.
pub const MEMBER_NAME_FIELDS: &[FieldPath] = &[&["collaborator_name"], &["nome"], &["name"]];

pub const EMAIL_FIELDS: &[FieldPath] = &[
    &["email"],
    &["collaborator_email"],
    &["usuario", "email"],
];

pub const MEMBER_EMAIL_FIELDS: &[FieldPath] = &[
    &["collaborator_email"],
    &["email"],
    &["usuario", "email"],
];

pub const ID_FIELDS: &[FieldPath] = &[
    &["id"],
    &["colaborador_id"],
    &["collaborator_id"],
    &["colaboradorId"],
    &["collaboratorId"],
];

/// On a membership record the collaborator id outranks the row's own id.
pub const MEMBER_ID_FIELDS: &[FieldPath] = &[
    &["collaborator_id"],
    &["colaborador_id"],
    &["id"],
];

pub const MEMBER_USER_ID_FIELDS: &[FieldPath] = &[
    &["user_id"],
    &["collaborator_user_id"],
    &["usuario", "id"],
];

pub const CONTRIBUTED_SKILL_NAME_FIELDS: &[FieldPath] = &[
    &["contributed_skill_name"],
    &["skill"],
    &["primary_skill"],
    &["primarySkill"],
];

pub const CONTRIBUTED_SKILL_LEVEL_FIELDS: &[FieldPath] = &[
    &["contributed_skill_level"],
    &["primary_skill_level"],
    &["primarySkillLevel"],
];

pub const DETAIL_SKILL_NAME_FIELDS: &[FieldPath] = &[&["skill_name"]];
pub const DETAIL_SKILL_LEVEL_FIELDS: &[FieldPath] = &[&["skill_level"]];
/// Bare level on either record, consulted after the explicit skill levels.
pub const PLAIN_LEVEL_FIELDS: &[FieldPath] = &[&["nivel"]];

pub const SKILL_LIST_FIELDS: &[FieldPath] = &[
    &["skills"],
    &["habilidades"],
    &["competencias"],
    &["user", "skills"],
];

pub const SKILL_ENTRY_NAME_FIELDS: &[FieldPath] = &[&["nome"], &["name"], &["titulo"], &["title"]];
pub const SKILL_ENTRY_LEVEL_FIELDS: &[FieldPath] = &[&["nivel"], &["level"]];

/// Single free-text skill some directory entries carry instead of a list.
pub const SINGLE_SKILL_FIELDS: &[FieldPath] = &[&["skill"], &["primary_skill"], &["primarySkill"]];

pub const ROLE_FIELDS: &[FieldPath] = &[&["cargo"], &["role"]];

pub fn lookup<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(record, |value, key| value.get(key))
}

/// First non-blank string, trimmed.
pub fn first_text(record: &Value, fields: &[FieldPath]) -> Option<String> {
    fields.iter().find_map(|path| match lookup(record, path)? {
        Value::String(s) => valid_string(s).map(str::to_string),
        _ => None,
    })
}

/// Like [`first_text`] but also accepts numbers, for level codes sent as ordinals.
pub fn first_scalar(record: &Value, fields: &[FieldPath]) -> Option<String> {
    fields.iter().find_map(|path| match lookup(record, path)? {
        Value::String(s) => valid_string(s).map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub fn first_id(record: &Value, fields: &[FieldPath]) -> Option<RecordId> {
    fields
        .iter()
        .find_map(|path| lookup(record, path).and_then(RecordId::from_value))
}

pub fn first_list<'a>(record: &'a Value, fields: &[FieldPath]) -> Option<&'a [Value]> {
    fields.iter().find_map(|path| match lookup(record, path)? {
        Value::Array(items) if !items.is_empty() => Some(items.as_slice()),
        _ => None,
    })
}
