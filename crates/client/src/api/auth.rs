use serde_json::Value;

use crate::{
    error::{ClientError, Result},
    http::{HttpClient, RequestOptions},
    models::{LoginRequest, LoginResponse, RegisterRequest},
};

#[derive(Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Returns the access token issued for the credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let body = serde_json::to_value(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response: LoginResponse = self
            .http
            .request_as("/login", RequestOptions::post(body))
            .await?;
        response
            .access_token
            .ok_or_else(|| ClientError::Domain("Resposta de login sem token de acesso.".to_string()))
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Value> {
        self.http
            .request("/register", RequestOptions::post(serde_json::to_value(request)?))
            .await
    }
}
