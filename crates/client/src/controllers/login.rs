use crate::{
    api::Services,
    error::ClientError,
    matching::text::valid_string,
    session::Session,
};

use super::{Notice, Outcome, Page};

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub struct LoginController {
    services: Services,
}

impl LoginController {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    /// On success the session `{email, token}` is stored and the home page
    /// is next. Messages follow the login screen's wording.
    pub async fn submit(&self, form: &LoginForm) -> Outcome {
        let Some(email) = valid_string(&form.email) else {
            return Outcome::notice(Notice::error("Informe e-mail e senha."));
        };
        if form.password.trim().is_empty() {
            return Outcome::notice(Notice::error("Informe e-mail e senha."));
        }

        let token = match self.services.auth.login(email, &form.password).await {
            Ok(token) => token,
            Err(e @ ClientError::Network(_)) => {
                tracing::warn!("login request failed: {e}");
                return Outcome::notice(Notice::error(e.to_string()));
            }
            Err(e) => return Outcome::notice(Notice::error(format!("Erro: {e}"))),
        };

        let session = Session {
            email: email.to_string(),
            token,
        };
        let stored = self
            .services
            .session
            .save(&session)
            .and_then(|_| self.services.session.save_legacy_token(&session.token));
        if let Err(e) = stored {
            return Outcome::notice(Notice::error(format!("Erro: {e}")));
        }

        tracing::info!(email = %session.email, "signed in");
        Outcome::none().redirect(Page::Home)
    }
}
