pub mod auth;
pub mod collaborators;
pub mod envelope;
pub mod projects;
pub mod suggestions;
pub mod tags;

use std::sync::Arc;

use crate::{
    config::Config,
    error::Result,
    http::HttpClient,
    session::SessionStore,
    storage::{FileStore, KeyValueStore},
};

pub use auth::AuthApi;
pub use collaborators::{DirectoryApi, EnrollmentApi};
pub use projects::{ProjectQuery, ProjectsApi};
pub use suggestions::SuggestionsApi;
pub use tags::{TagCache, TagsApi};

/// Every remote service client plus the session they authenticate with.
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct Services {
    pub session: SessionStore,
    pub auth: AuthApi,
    pub projects: ProjectsApi,
    pub tags: TagsApi,
    pub directory: DirectoryApi,
    pub enrollment: EnrollmentApi,
    pub suggestions: SuggestionsApi,
    pub directory_page_size: u32,
}

impl Services {
    pub fn new(config: &Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("idealizador/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let session = SessionStore::new(store);
        let http = |base: &str| HttpClient::new(client.clone(), base, session.clone());

        Ok(Self {
            auth: AuthApi::new(http(&config.auth_url)),
            projects: ProjectsApi::new(http(&config.projects_url)),
            tags: TagsApi::new(http(&config.projects_url)),
            directory: DirectoryApi::new(http(&config.directory_url)),
            enrollment: EnrollmentApi::new(http(&config.enrollment_url)),
            suggestions: SuggestionsApi::new(http(&config.suggestions_url)),
            directory_page_size: config.directory_page_size,
            session,
        })
    }

    /// Services backed by the file store at `config.state_path`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config, Arc::new(FileStore::new(&config.state_path)))
    }
}
