//! Per-screen controllers. Each owns its page state for as long as the page
//! lives and hands back plain view values; nothing here renders.

pub mod add_collaborator;
pub mod create_project;
pub mod home;
pub mod login;
pub mod project_detail;
pub mod register;

use serde::Serialize;

use crate::session::SessionStore;

pub use add_collaborator::{AddFlow, Selection};
pub use create_project::{CreateProjectController, DraftSkill, ProjectForm};
pub use home::{CollaboratorPanel, EnrolledState, HomeController, ProjectCard};
pub use login::{LoginController, LoginForm};
pub use project_detail::{ProjectDetailController, SearchPanel, SuggestionsPanel};
pub use register::{format_phone, RegisterController, RegisterForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Page {
    Home,
    Login,
    Register,
    CreateProject,
    Project(String),
}

/// What a handler wants shown next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Option<Notice>,
    pub redirect: Option<Page>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            redirect: None,
        }
    }

    pub fn redirect(mut self, page: Page) -> Self {
        self.redirect = Some(page);
        self
    }

    pub fn is_error(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::is_error)
    }
}

/// Header greeting for the signed-in user.
pub fn greeting(session: &SessionStore) -> Option<String> {
    session
        .get()
        .filter(|s| !s.email.trim().is_empty())
        .map(|s| format!("Olá, {}", s.email))
}
