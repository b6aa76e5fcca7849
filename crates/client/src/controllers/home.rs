use futures::future::join_all;

use crate::{
    api::{ProjectQuery, Services},
    matching::{
        fields::ID_FIELDS, filter_candidates, normalize_member, normalize_record, search_term,
        NormalizedCollaborator,
    },
    models::Project,
};

use super::{greeting, Notice, Outcome, Page};

const SUGGESTION_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum EnrolledState {
    Loaded(Vec<NormalizedCollaborator>),
    Failed,
}

impl EnrolledState {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            EnrolledState::Failed => Some("Não foi possível carregar os colaboradores."),
            EnrolledState::Loaded(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard {
    pub project: Project,
    pub collaborators: EnrolledState,
}

impl ProjectCard {
    fn id(&self) -> Option<&str> {
        self.project.id.as_ref().map(|id| id.as_str())
    }

    fn matches(&self, term: &str) -> bool {
        let project = &self.project;
        let hit = |text: &String| text.to_lowercase().contains(term);
        let in_fields = [&project.title, &project.description, &project.category]
            .into_iter()
            .flatten()
            .any(hit);
        in_fields || project.tag_names().iter().any(hit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollaboratorPanel {
    Hidden,
    Results {
        term: String,
        items: Vec<NormalizedCollaborator>,
    },
    Failed(String),
}

impl CollaboratorPanel {
    pub fn empty_message(&self) -> Option<String> {
        match self {
            CollaboratorPanel::Results { term, items } if items.is_empty() => {
                Some(format!("Nenhum colaborador encontrado para \"{term}\"."))
            }
            _ => None,
        }
    }
}

pub struct HomeController {
    services: Services,
    cards: Vec<ProjectCard>,
    selected: Option<String>,
}

impl HomeController {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            cards: Vec::new(),
            selected: None,
        }
    }

    pub fn greeting(&self) -> Option<String> {
        greeting(&self.services.session)
    }

    pub fn cards(&self) -> &[ProjectCard] {
        &self.cards
    }

    /// Loads the caller's projects and, per project, its enrolled
    /// collaborators. One failing enrolment lookup only marks its own card.
    pub async fn load(&mut self) -> Outcome {
        self.services.session.ensure_from_legacy();
        if !self.services.session.is_authenticated() {
            self.cards.clear();
            return Outcome::notice(Notice::info("Faça login para ver seus projetos."));
        }

        let projects = match self.services.projects.list(&ProjectQuery::mine()).await {
            Ok(projects) => projects,
            Err(e) => {
                tracing::warn!("loading projects failed: {e}");
                return Outcome::notice(Notice::error("Erro ao carregar projetos."));
            }
        };

        let enrollment = &self.services.enrollment;
        let lookups = projects.iter().map(|project| async move {
            let Some(id) = project.id.as_ref() else {
                return EnrolledState::Loaded(Vec::new());
            };
            match enrollment.enrolled(id.as_str()).await {
                Ok(records) => EnrolledState::Loaded(
                    records.iter().map(|r| normalize_member(r, None)).collect(),
                ),
                Err(e) => {
                    tracing::warn!(project = %id, "loading enrolled collaborators failed: {e}");
                    EnrolledState::Failed
                }
            }
        });
        let enrolled = join_all(lookups).await;

        self.selected = None;
        self.cards = projects
            .into_iter()
            .zip(enrolled)
            .map(|(project, collaborators)| ProjectCard {
                project,
                collaborators,
            })
            .collect();

        if self.cards.is_empty() {
            return Outcome::notice(Notice::info("Nenhum projeto encontrado."));
        }
        Outcome::none()
    }

    /// Cards to show: the picked suggestion if any, else every card matching
    /// `term` over title, description, category and tag names.
    pub fn filter(&self, term: &str) -> Vec<&ProjectCard> {
        if let Some(id) = &self.selected {
            return self
                .cards
                .iter()
                .filter(|c| c.id() == Some(id.as_str()))
                .collect();
        }
        match search_term(term) {
            Some(term) => self.cards.iter().filter(|c| c.matches(&term)).collect(),
            None => self.cards.iter().collect(),
        }
    }

    pub fn suggestions(&self, term: &str) -> Vec<&Project> {
        let Some(term) = search_term(term) else {
            return Vec::new();
        };
        self.cards
            .iter()
            .filter(|c| c.matches(&term))
            .take(SUGGESTION_LIMIT)
            .map(|c| &c.project)
            .collect()
    }

    pub fn select_suggestion(&mut self, id: &str) {
        self.selected = Some(id.trim().to_string()).filter(|id| !id.is_empty());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// A blank term hides the panel without touching the network.
    pub async fn search_collaborators(&self, term: &str) -> CollaboratorPanel {
        let Some(normalized) = search_term(term) else {
            return CollaboratorPanel::Hidden;
        };

        match self.services.enrollment.list_all().await {
            Ok(records) => {
                let all: Vec<NormalizedCollaborator> = records
                    .iter()
                    .map(|r| normalize_record(r, ID_FIELDS))
                    .collect();
                CollaboratorPanel::Results {
                    term: term.trim().to_string(),
                    items: filter_candidates(&all, &normalized, usize::MAX),
                }
            }
            Err(e) => {
                tracing::warn!("collaborator search failed: {e}");
                CollaboratorPanel::Failed("Erro ao buscar colaboradores.".to_string())
            }
        }
    }

    pub fn logout(&mut self) -> Outcome {
        if let Err(e) = self.services.session.clear() {
            tracing::warn!("clearing session failed: {e}");
        }
        self.cards.clear();
        self.selected = None;
        Outcome::none().redirect(Page::Login)
    }
}
