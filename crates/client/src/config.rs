use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub auth_url: String,
    pub projects_url: String,
    pub directory_url: String,
    pub enrollment_url: String,
    pub suggestions_url: String,
    pub state_path: String,
    pub directory_page_size: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            auth_url: base_url("IDEALIZADOR_AUTH_URL", "https://loginidealizador.azurewebsites.net"),
            projects_url: base_url("IDEALIZADOR_PROJECTS_URL", "https://bdprojetos.azurewebsites.net"),
            directory_url: base_url(
                "IDEALIZADOR_DIRECTORY_URL",
                "https://colaboradores-projects.azurewebsites.net",
            ),
            enrollment_url: base_url(
                "IDEALIZADOR_ENROLLMENT_URL",
                "https://colaboradoresidealizador.azurewebsites.net",
            ),
            suggestions_url: base_url(
                "IDEALIZADOR_SUGGESTIONS_URL",
                "https://iaidealizador.azurewebsites.net",
            ),
            state_path: env::var("IDEALIZADOR_STATE_PATH")
                .unwrap_or_else(|_| "./data/session.json".to_string()),
            directory_page_size: env::var("IDEALIZADOR_DIRECTORY_PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(50),
        }
    }

    /// Points every remote service at the same base URL.
    pub fn single_host(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            auth_url: base.clone(),
            projects_url: base.clone(),
            directory_url: base.clone(),
            enrollment_url: base.clone(),
            suggestions_url: base,
            state_path: "./data/session.json".to_string(),
            directory_page_size: 50,
        }
    }
}

fn base_url(key: &str, default: &str) -> String {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .trim_end_matches('/')
        .to_string()
}
