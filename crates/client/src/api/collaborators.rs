use serde_json::{json, Value};

use crate::{
    error::{ClientError, Result},
    http::{HttpClient, RequestOptions},
};

use super::envelope::{extract_list, extract_single};

/// Paged collaborator directory (`/collaborators`).
#[derive(Clone)]
pub struct DirectoryApi {
    http: HttpClient,
}

impl DirectoryApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, page: u32, page_size: u32) -> Result<Vec<Value>> {
        let options = RequestOptions::get()
            .query("page", page)
            .query("page_size", page_size);
        Ok(extract_list(self.http.request("/collaborators", options).await?))
    }

    /// Looks a collaborator up by e-mail, or by user id when no e-mail is given.
    pub async fn search(&self, email: Option<&str>, user_id: Option<&str>) -> Result<Option<Value>> {
        let options = match (email, user_id) {
            (Some(email), _) => RequestOptions::get().query("email", email),
            (None, Some(user_id)) => RequestOptions::get().query("user_id", user_id),
            (None, None) => return Ok(None),
        };
        let payload = self.http.request("/collaborators/search", options).await?;
        Ok(extract_single(payload))
    }
}

/// Collaborator enrollment service (`/colaboradores`).
#[derive(Clone)]
pub struct EnrollmentApi {
    http: HttpClient,
}

impl EnrollmentApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list_all(&self) -> Result<Vec<Value>> {
        Ok(extract_list(
            self.http.request("/colaboradores", RequestOptions::get()).await?,
        ))
    }

    pub async fn enrolled(&self, project_id: &str) -> Result<Vec<Value>> {
        let payload = self
            .http
            .request(
                &format!("/colaboradores/inscritos/{project_id}"),
                RequestOptions::get(),
            )
            .await?;
        Ok(extract_list(payload))
    }

    pub async fn add_to_project(&self, collaborator_id: &str, project_id: &str) -> Result<()> {
        if collaborator_id.trim().is_empty() || project_id.trim().is_empty() {
            return Err(ClientError::Domain(
                "Dados inválidos para adicionar colaborador".to_string(),
            ));
        }
        self.http
            .request(
                &format!("/colaboradores/{collaborator_id}/projetos/{project_id}"),
                RequestOptions::post(json!({})),
            )
            .await?;
        Ok(())
    }
}
