use std::collections::HashMap;

use serde_json::json;

use crate::{
    error::{ClientError, Result},
    http::{HttpClient, RequestOptions},
    models::Tag,
};

use super::envelope::extract_list;

/// Tags already seen by one screen, keyed by lower-cased name.
#[derive(Debug, Default, Clone)]
pub struct TagCache {
    by_name: HashMap<String, Tag>,
}

impl TagCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.by_name.get(&name.trim().to_lowercase())
    }

    pub fn insert(&mut self, tag: Tag) {
        if let Some(name) = tag.name.as_deref() {
            self.by_name.insert(name.trim().to_lowercase(), tag.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[derive(Clone)]
pub struct TagsApi {
    http: HttpClient,
}

impl TagsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: Option<&str>) -> Result<Vec<Tag>> {
        let mut options = RequestOptions::get();
        if let Some(q) = query.filter(|q| !q.trim().is_empty()) {
            options = options.query("q", q.trim());
        }
        let payload = self.http.request("/tags", options).await?;
        Ok(extract_list(payload)
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    pub async fn create(&self, name: &str) -> Result<Tag> {
        self.http
            .request_as("/tags", RequestOptions::post(json!({ "name": name })))
            .await
    }

    /// Get-or-create by name (case-insensitive): cache, then a filtered list,
    /// then creation. Two concurrent callers can both create the same name.
    pub async fn ensure(&self, name: &str, known: &TagCache) -> Result<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::Validation(
                "Nome da habilidade vazio.".to_string(),
            ));
        }
        if let Some(tag) = known.get(name) {
            return Ok(tag.clone());
        }
        if let Some(tag) = self
            .list(Some(name))
            .await?
            .into_iter()
            .find(|t| t.matches_name(name))
        {
            return Ok(tag);
        }
        tracing::debug!(%name, "creating tag");
        self.create(name).await
    }
}
