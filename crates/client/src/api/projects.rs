use serde_json::Value;

use crate::{
    error::{ClientError, Result},
    http::{HttpClient, RequestOptions},
    models::{NewProject, Project},
};

use super::envelope::extract_list;

#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    pub mine: bool,
    pub q: Option<String>,
    pub tag: Option<String>,
}

impl ProjectQuery {
    pub fn mine() -> Self {
        Self {
            mine: true,
            ..Self::default()
        }
    }
}

#[derive(Clone)]
pub struct ProjectsApi {
    http: HttpClient,
}

impl ProjectsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        let mut options = RequestOptions::get();
        if query.mine {
            options = options.query("mine", 1);
        }
        if let Some(q) = query.q.as_deref().filter(|q| !q.trim().is_empty()) {
            options = options.query("q", q.trim());
        }
        if let Some(tag) = query.tag.as_deref().filter(|t| !t.trim().is_empty()) {
            options = options.query("tag", tag.trim());
        }
        let payload = self.http.request("/projects", options).await?;
        Ok(extract_list(payload)
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    /// Direct fetch; on a 405 retries with a trailing slash, and as a last
    /// resort looks the id up in the caller's own project list.
    pub async fn get(&self, id: &str) -> Result<Project> {
        let first_error = match self.fetch_one(&format!("/projects/{id}")).await {
            Ok(project) => return Ok(project),
            Err(e) => e,
        };

        if first_error.to_string().contains("405") {
            match self.fetch_one(&format!("/projects/{id}/")).await {
                Ok(project) => return Ok(project),
                Err(e) => tracing::debug!(%id, "trailing-slash project fetch failed: {e}"),
            }
        }

        match self.list(&ProjectQuery::mine()).await {
            Ok(projects) => projects
                .into_iter()
                .find(|p| p.id.as_ref().is_some_and(|pid| pid.as_str() == id))
                .ok_or(first_error),
            Err(e) => {
                tracing::debug!(%id, "project list fallback failed: {e}");
                Err(first_error)
            }
        }
    }

    async fn fetch_one(&self, path: &str) -> Result<Project> {
        match self.http.request(path, RequestOptions::get()).await? {
            Value::Null => Err(ClientError::Domain("Projeto não encontrado".to_string())),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    /// Raw membership records for the project.
    pub async fn members(&self, id: &str) -> Result<Vec<Value>> {
        let payload = self
            .http
            .request(&format!("/projects/{id}/members"), RequestOptions::get())
            .await?;
        Ok(extract_list(payload))
    }

    pub async fn create(&self, project: &NewProject) -> Result<Value> {
        self.http
            .request("/projects", RequestOptions::post(serde_json::to_value(project)?))
            .await
    }
}
