use serde_json::Value;

use crate::{
    error::Result,
    http::{HttpClient, RequestOptions},
    matching::NormalizedCollaborator,
    models::{Participant, Project, SkillLevel, Suggestion, SuggestionRequest},
};

#[derive(Clone)]
pub struct SuggestionsApi {
    http: HttpClient,
}

impl SuggestionsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<Suggestion>> {
        let payload = self
            .http
            .request(
                "/api/v1/projetos/sugestoes",
                RequestOptions::post(serde_json::to_value(request)?),
            )
            .await?;
        Ok(match payload.get("sugestoes") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        })
    }
}

impl SuggestionRequest {
    pub fn for_project(project: &Project, members: &[NormalizedCollaborator]) -> Self {
        let id_projeto = project
            .id
            .as_ref()
            .map(|id| id.to_json())
            .unwrap_or_else(|| Value::from(0));

        let descricao_projeto = project.description.clone().unwrap_or_else(|| {
            let label = project
                .title
                .clone()
                .or_else(|| project.id.as_ref().map(ToString::to_string))
                .unwrap_or_default();
            format!("Projeto {label}").trim_end().to_string()
        });

        let participantes = members
            .iter()
            .filter(|m| m.has_email())
            .map(|m| Participant {
                collaborator_email: m.email.clone(),
                contributed_skill_name: m.skill_name.clone(),
                contributed_skill_level: level_ordinal(&m.skill_level),
            })
            .collect();

        Self {
            id_projeto,
            descricao_projeto,
            categoria_projeto: project.category.clone().unwrap_or_default(),
            participantes,
        }
    }
}

/// beginner/intermediate/advanced as 1/2/3, small numeric codes as-is, else 0.
fn level_ordinal(code: &str) -> u8 {
    SkillLevel::from_code(code)
        .map(|level| level.ordinal())
        .or_else(|| code.trim().parse().ok())
        .unwrap_or(0)
}
