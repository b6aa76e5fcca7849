use crate::{
    api::Services,
    error::ClientError,
    matching::text::is_valid_email,
    models::RegisterRequest,
};

use super::{Notice, Outcome, Page};

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub nome: String,
    pub sobrenome: String,
    pub cpf: String,
    pub email: String,
    pub senha: String,
    pub confirmar_senha: String,
    pub nome_usuario: String,
    pub telefone: String,
    pub aceitou_termos: bool,
}

impl RegisterForm {
    /// First failing rule wins, in the order the sign-up screen checks them.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.senha != self.confirmar_senha {
            return Err(ClientError::Validation("As senhas não coincidem!".to_string()));
        }
        if !self.aceitou_termos {
            return Err(ClientError::Validation(
                "Você deve aceitar os termos de uso!".to_string(),
            ));
        }
        let required = [
            &self.email,
            &self.senha,
            &self.nome,
            &self.sobrenome,
            &self.cpf,
            &self.nome_usuario,
            &self.telefone,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(ClientError::Validation(
                "Preencha todos os campos obrigatórios!".to_string(),
            ));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ClientError::Validation("Digite um email válido".to_string()));
        }
        Ok(())
    }

    fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.trim().to_string(),
            password: self.senha.clone(),
            nome: self.nome.trim().to_string(),
            sobrenome: self.sobrenome.trim().to_string(),
            cpf: self.cpf.trim().to_string(),
            nome_usuario: self.nome_usuario.trim().to_string(),
            telefone: format_phone(&self.telefone),
        }
    }
}

/// Masks a Brazilian phone number as the user types:
/// `(dd) ddddd-dddd` from 11 digits, `(dd) dddd-dddd` from 7, `(dd) …` from 3.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    let len = digits.len();
    if len >= 11 {
        format!(
            "({}) {}-{}{}",
            &digits[..2],
            &digits[2..7],
            &digits[7..11],
            &digits[11..]
        )
    } else if len >= 7 {
        format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..])
    } else if len >= 3 {
        format!("({}) {}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

pub struct RegisterController {
    services: Services,
}

impl RegisterController {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    pub async fn submit(&self, form: &RegisterForm) -> Outcome {
        if let Err(e) = form.validate() {
            return Outcome::notice(Notice::error(e.to_string()));
        }

        match self.services.auth.register(&form.to_request()).await {
            Ok(_) => Outcome::notice(Notice::success(
                "Conta criada com sucesso! Redirecionando para o login...",
            ))
            .redirect(Page::Login),
            Err(e @ ClientError::Http { .. }) if e.status().is_some_and(|s| s < 500) => {
                Outcome::notice(Notice::error(format!("Erro: {e}")))
            }
            Err(e) => {
                tracing::warn!("registration failed: {e}");
                Outcome::notice(Notice::error("Erro: Erro ao criar conta"))
            }
        }
    }
}
