use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Identifier that upstream services send either as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into().trim().to_string();
        (!id.is_empty()).then_some(Self(id))
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::new(s.as_str()),
            Value::Number(n) => Self::new(n.to_string()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// JSON form for outgoing payloads: numeric ids go back out as numbers.
    pub fn to_json(&self) -> Value {
        match self.0.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String(self.0.clone()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RecordId::from_value(&value)
            .ok_or_else(|| de::Error::custom(format!("invalid identifier: {value}")))
    }
}

/// Accepts strings, numbers, booleans or null; blank strings become `None`.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<RecordId>, D::Error> {
    Ok(RecordId::from_value(&Value::deserialize(deserializer)?))
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: de::DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "beginner" => Some(SkillLevel::Beginner),
            "intermediate" => Some(SkillLevel::Intermediate),
            "advanced" => Some(SkillLevel::Advanced),
            _ => None,
        }
    }

    pub fn as_api(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Iniciante",
            SkillLevel::Intermediate => "Intermediário",
            SkillLevel::Advanced => "Avançado",
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            SkillLevel::Beginner => 1,
            SkillLevel::Intermediate => 2,
            SkillLevel::Advanced => 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<ProjectTag>,
}

impl Project {
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Sem título")
    }

    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or("Sem descrição")
    }

    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or("Sem categoria")
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().filter_map(ProjectTag::display_name).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectTag {
    #[serde(default, deserialize_with = "lenient_id")]
    pub tag_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tag_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub titulo: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub skill_level: Option<String>,
}

impl ProjectTag {
    pub fn display_name(&self) -> Option<String> {
        self.name
            .clone()
            .or_else(|| self.tag_name.clone())
            .or_else(|| self.tag_id.as_ref().map(RecordId::to_string))
            .or_else(|| self.titulo.clone())
            .or_else(|| self.title.clone())
    }

    /// Name usable for skill matching; a bare tag id does not count.
    pub fn skill_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.tag_name.as_deref())
            .or(self.titulo.as_deref())
            .or(self.title.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

impl Tag {
    pub fn matches_name(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.trim().to_lowercase() == name.trim().to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<NewProjectTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProjectTag {
    pub tag_id: RecordId,
    pub skill_level: SkillLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub nome: String,
    pub sobrenome: String,
    #[serde(rename = "CPF")]
    pub cpf: String,
    #[serde(rename = "nomeUsuario")]
    pub nome_usuario: String,
    pub telefone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionRequest {
    pub id_projeto: Value,
    pub descricao_projeto: String,
    pub categoria_projeto: String,
    pub participantes: Vec<Participant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub collaborator_email: String,
    pub contributed_skill_name: String,
    pub contributed_skill_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default, deserialize_with = "lenient_string")]
    pub perfil_sugerido: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub justificativa: Option<String>,
}

impl Suggestion {
    pub fn profile(&self) -> &str {
        self.perfil_sugerido.as_deref().unwrap_or("Perfil sugerido")
    }

    pub fn rationale(&self) -> &str {
        self.justificativa
            .as_deref()
            .unwrap_or("Sem justificativa informada.")
    }
}
