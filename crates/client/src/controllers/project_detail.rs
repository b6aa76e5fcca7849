//! Project detail page: members, collaborator search, the add-collaborator
//! flow and AI suggestions.

use futures::future::join_all;
use serde_json::Value;

use crate::{
    api::Services,
    error::Result,
    matching::{
        fields::{self, first_scalar, first_text},
        filter_candidates, merge_candidates, normalize_entry, normalize_member, rank_candidates,
        required_skills, search_term, MemberIndex, NormalizedCollaborator, RankedCandidate,
        MAX_RESULTS,
    },
    models::{Project, Suggestion, SuggestionRequest},
};

use super::{
    add_collaborator::{AddFlow, Selection},
    Notice, Outcome,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchPanel {
    #[default]
    Hidden,
    Results {
        term: String,
        items: Vec<NormalizedCollaborator>,
    },
}

impl SearchPanel {
    pub fn items(&self) -> &[NormalizedCollaborator] {
        match self {
            SearchPanel::Results { items, .. } => items,
            SearchPanel::Hidden => &[],
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, SearchPanel::Results { .. })
    }

    pub fn empty_message(&self) -> Option<String> {
        match self {
            SearchPanel::Results { term, items } if items.is_empty() => {
                Some(format!("Nenhum colaborador encontrado para \"{term}\"."))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionsPanel {
    Suggestions(Vec<Suggestion>),
    Empty,
    Failed(String),
}

impl SuggestionsPanel {
    pub fn message(&self) -> Option<&str> {
        match self {
            SuggestionsPanel::Empty => Some("Nenhuma sugestão retornada."),
            SuggestionsPanel::Failed(message) => Some(message),
            SuggestionsPanel::Suggestions(_) => None,
        }
    }
}

pub struct ProjectDetailController {
    services: Services,
    project: Option<Project>,
    members: Vec<NormalizedCollaborator>,
    /// Raw directory, fetched on the first search and kept for the page's life.
    directory: Option<Vec<Value>>,
    flow: AddFlow,
    panel: SearchPanel,
}

impl ProjectDetailController {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            project: None,
            members: Vec::new(),
            directory: None,
            flow: AddFlow::default(),
            panel: SearchPanel::default(),
        }
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn members(&self) -> &[NormalizedCollaborator] {
        &self.members
    }

    pub fn flow(&self) -> &AddFlow {
        &self.flow
    }

    pub fn panel(&self) -> &SearchPanel {
        &self.panel
    }

    pub async fn load(&mut self, id: &str) -> Outcome {
        let id = id.trim();
        if id.is_empty() {
            return Outcome::notice(Notice::error("ID do projeto não fornecido na URL."));
        }

        let project = match self.services.projects.get(id).await {
            Ok(project) => project,
            Err(e) => return Outcome::notice(Notice::error(format!("Erro ao carregar: {e}"))),
        };
        let members = match self.fetch_members(id).await {
            Ok(members) => members,
            Err(e) => return Outcome::notice(Notice::error(format!("Erro ao carregar: {e}"))),
        };

        tracing::debug!(project = %id, members = members.len(), "project loaded");
        self.project = Some(project);
        self.members = members;
        self.flow.reset();
        self.panel = SearchPanel::Hidden;
        Outcome::none()
    }

    /// Members with directory details looked up concurrently. A failed lookup
    /// falls back to the membership record alone.
    async fn fetch_members(&self, project_id: &str) -> Result<Vec<NormalizedCollaborator>> {
        let records = self.services.projects.members(project_id).await?;
        let directory = &self.services.directory;

        let lookups = records.iter().map(|record| async move {
            let email = first_text(record, fields::MEMBER_EMAIL_FIELDS);
            let user_id = first_scalar(record, fields::MEMBER_USER_ID_FIELDS);
            if email.is_none() && user_id.is_none() {
                return None;
            }
            match directory.search(email.as_deref(), user_id.as_deref()).await {
                Ok(details) => details,
                Err(e) => {
                    tracing::warn!(email = ?email, "member lookup failed: {e}");
                    None
                }
            }
        });
        let details = join_all(lookups).await;

        Ok(records
            .iter()
            .zip(details.iter())
            .map(|(record, details)| normalize_member(record, details.as_ref()))
            .collect())
    }

    /// Members first, then the directory re-classified against the current
    /// member set.
    async fn candidates(&mut self) -> Result<Vec<NormalizedCollaborator>> {
        if self.directory.is_none() {
            let raw = self
                .services
                .directory
                .list(1, self.services.directory_page_size)
                .await?;
            self.directory = Some(raw);
        }
        let index = MemberIndex::new(&self.members);
        let directory: Vec<NormalizedCollaborator> = self
            .directory
            .iter()
            .flatten()
            .map(|raw| normalize_entry(raw, &index))
            .collect();
        Ok(merge_candidates(&self.members, &directory))
    }

    /// A blank term hides the panel without touching the network.
    pub async fn search(&mut self, term: &str) -> Outcome {
        let Some(normalized) = search_term(term) else {
            self.panel = SearchPanel::Hidden;
            self.flow.reset();
            return Outcome::none();
        };

        self.flow.begin_search(term);
        match self.candidates().await {
            Ok(candidates) => {
                self.panel = SearchPanel::Results {
                    term: term.trim().to_string(),
                    items: filter_candidates(&candidates, &normalized, MAX_RESULTS),
                };
                Outcome::none()
            }
            Err(e) => {
                tracing::warn!("collaborator search failed: {e}");
                Outcome::notice(Notice::error(e.to_string()))
            }
        }
    }

    /// Picks a result by [`NormalizedCollaborator::selection_key`].
    pub fn select(&mut self, key: &str) -> Outcome {
        let Some(candidate) = self
            .panel
            .items()
            .iter()
            .find(|c| c.selection_key().as_deref() == Some(key.trim()))
            .cloned()
        else {
            return Outcome::notice(Notice::error("Selecione um colaborador no campo de busca."));
        };

        match self.flow.select(candidate) {
            Selection::AlreadyMember(c) => {
                Outcome::notice(Notice::info(format!("{} já está inscrito neste projeto.", c.name)))
            }
            Selection::Ready(c) => Outcome::notice(Notice::info(format!(
                "{} ainda não está inscrito neste projeto.",
                c.name
            ))),
        }
    }

    /// Adds the selected collaborator, then reloads members from the server.
    pub async fn submit(&mut self) -> Outcome {
        let Some(project_id) = self
            .project
            .as_ref()
            .and_then(|p| p.id.as_ref())
            .map(ToString::to_string)
        else {
            return Outcome::notice(Notice::error("Projeto inválido."));
        };
        let has_id = self.flow.selected().is_some_and(|c| c.id.is_some());
        if !has_id || !self.flow.can_submit() {
            return Outcome::notice(Notice::error("Selecione um colaborador no campo de busca."));
        }
        let Some(candidate) = self.flow.start_submit() else {
            return Outcome::notice(Notice::error("Selecione um colaborador no campo de busca."));
        };
        let collaborator_id = candidate.id.as_ref().map(ToString::to_string).unwrap_or_default();

        if let Err(e) = self
            .services
            .enrollment
            .add_to_project(&collaborator_id, &project_id)
            .await
        {
            tracing::warn!(collaborator = %collaborator_id, "adding collaborator failed: {e}");
            self.flow.finish_submit(false);
            return Outcome::notice(Notice::error(e.to_string()));
        }

        self.flow.finish_submit(true);
        self.panel = SearchPanel::Hidden;
        tracing::info!(collaborator = %collaborator_id, project = %project_id, "collaborator added");

        match self.fetch_members(&project_id).await {
            Ok(members) => {
                self.members = members;
                Outcome::notice(Notice::success("Colaborador adicionado ao projeto!"))
            }
            Err(e) => {
                tracing::warn!("refreshing members failed: {e}");
                Outcome::notice(Notice::error(format!(
                    "Colaborador adicionado, mas a lista não pôde ser atualizada: {e}"
                )))
            }
        }
    }

    pub async fn generate_suggestions(&self) -> SuggestionsPanel {
        let Some(project) = &self.project else {
            return SuggestionsPanel::Failed("Projeto inválido.".to_string());
        };
        let request = SuggestionRequest::for_project(project, &self.members);
        match self.services.suggestions.suggest(&request).await {
            Ok(suggestions) if suggestions.is_empty() => SuggestionsPanel::Empty,
            Ok(suggestions) => SuggestionsPanel::Suggestions(suggestions),
            Err(e) => {
                tracing::warn!("suggestion request failed: {e}");
                SuggestionsPanel::Failed(e.to_string())
            }
        }
    }

    pub fn member_ids_summary(&self) -> String {
        let ids: Vec<String> = self
            .members
            .iter()
            .filter_map(|m| m.id.as_ref().map(ToString::to_string))
            .collect();
        if ids.is_empty() {
            "Nenhum colaborador inscrito".to_string()
        } else {
            ids.join(", ")
        }
    }

    /// Directory collaborators outside the project ranked by the project's
    /// required skills.
    pub async fn recommend_candidates(&mut self) -> Result<Vec<RankedCandidate>> {
        let Some(project) = &self.project else {
            return Ok(Vec::new());
        };
        let required = required_skills(project);
        let outside: Vec<NormalizedCollaborator> = self
            .candidates()
            .await?
            .into_iter()
            .filter(|c| !c.in_project)
            .collect();
        Ok(rank_candidates(&outside, &required))
    }
}
