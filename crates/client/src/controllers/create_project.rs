use futures::future::try_join_all;

use crate::{
    api::{Services, TagCache},
    error::{ClientError, Result},
    matching::text::valid_string,
    models::{NewProject, NewProjectTag, SkillLevel},
};

use super::{Notice, Outcome, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSkill {
    pub name: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub category: String,
}

impl ProjectForm {
    fn validate(&self) -> Result<()> {
        let checks = [
            (&self.title, "O título do projeto é obrigatório."),
            (&self.description, "A descrição do projeto é obrigatória."),
            (&self.category, "A categoria do projeto é obrigatória."),
        ];
        for (value, message) in checks {
            if valid_string(value).is_none() {
                return Err(ClientError::Validation(message.to_string()));
            }
        }
        Ok(())
    }
}

/// Owns the draft skill list and the tags resolved so far. Both live only as
/// long as the create-project page.
pub struct CreateProjectController {
    services: Services,
    skills: Vec<DraftSkill>,
    tags: TagCache,
}

impl CreateProjectController {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            skills: Vec::new(),
            tags: TagCache::new(),
        }
    }

    pub fn skills(&self) -> &[DraftSkill] {
        &self.skills
    }

    /// `level_code` takes the form's BEGINNER/INTERMEDIATE/ADVANCED values;
    /// anything else is intermediate.
    pub fn add_skill(&mut self, name: &str, level_code: &str) -> Outcome {
        let Some(name) = valid_string(name) else {
            return Outcome::notice(Notice::error(
                "Informe o nome da habilidade antes de adicionar.",
            ));
        };
        let duplicate = self
            .skills
            .iter()
            .any(|s| s.name.to_lowercase() == name.to_lowercase());
        if duplicate {
            return Outcome::notice(Notice::info("Essa habilidade já foi adicionada."));
        }
        self.skills.push(DraftSkill {
            name: name.to_string(),
            level: SkillLevel::from_code(level_code).unwrap_or(SkillLevel::Intermediate),
        });
        Outcome::none()
    }

    pub fn remove_skill(&mut self, index: usize) -> Option<DraftSkill> {
        (index < self.skills.len()).then(|| self.skills.remove(index))
    }

    pub async fn submit(&mut self, form: &ProjectForm) -> Outcome {
        if let Err(e) = form.validate() {
            return Outcome::notice(Notice::error(e.to_string()));
        }

        match self.create(form).await {
            Ok(()) => {
                self.skills.clear();
                Outcome::notice(Notice::success("Projeto criado com sucesso!")).redirect(Page::Home)
            }
            Err(e) => {
                tracing::warn!("project creation failed: {e}");
                Outcome::notice(Notice::error(format!("Falha ao criar o projeto. {e}")))
            }
        }
    }

    async fn create(&mut self, form: &ProjectForm) -> Result<()> {
        let links = self.resolve_tags().await?;
        let project = NewProject {
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
            category: form.category.trim().to_string(),
            tags: links,
        };
        self.services.projects.create(&project).await?;
        tracing::info!(title = %project.title, tags = project.tags.len(), "project created");
        Ok(())
    }

    /// One get-or-create per draft skill, all in flight together. Results
    /// keep the draft order; repeated tag ids keep the last level.
    async fn resolve_tags(&mut self) -> Result<Vec<NewProjectTag>> {
        let tags_api = &self.services.tags;
        let cache = &self.tags;
        let resolved = try_join_all(
            self.skills
                .iter()
                .map(|skill| tags_api.ensure(&skill.name, cache)),
        )
        .await?;

        let mut links: Vec<NewProjectTag> = Vec::with_capacity(resolved.len());
        for (skill, mut tag) in self.skills.iter().zip(resolved) {
            if tag.name.is_none() {
                tag.name = Some(skill.name.clone());
            }
            match links.iter_mut().find(|link| link.tag_id == tag.id) {
                Some(existing) => existing.skill_level = skill.level,
                None => links.push(NewProjectTag {
                    tag_id: tag.id.clone(),
                    skill_level: skill.level,
                }),
            }
            self.tags.insert(tag);
        }
        Ok(links)
    }
}
