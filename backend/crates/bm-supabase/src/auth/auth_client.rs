use crate::auth::wire::{TokenResponse, WireUser};
use crate::{AuthService, BackendClient, Result, SignUpOutcome};

use async_trait::async_trait;
use bm_core::{AuthSession, User};
use chrono::Utc;
use log::{debug, info};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

const AUTH_PREFIX: &str = "auth/v1";

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// GoTrue client under `{url}/auth/v1`.
#[derive(Clone)]
pub struct AuthClient {
    client: BackendClient,
}

impl AuthClient {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    async fn token(&self, grant_type: &str, body: &impl Serialize) -> Result<AuthSession> {
        let url = self.client.endpoint(
            &format!("{AUTH_PREFIX}/token"),
            &[("grant_type", grant_type)],
        )?;
        let req = self.client.request(Method::POST, url, None).json(body);
        let token: TokenResponse = self.client.execute(req).await?;
        Ok(token.into_session(Utc::now()))
    }
}

#[async_trait]
impl AuthService for AuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let session = self
            .token("password", &Credentials { email, password })
            .await?;
        info!("signed in user {}", session.user.id);
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<SignUpOutcome> {
        let url = self.client.endpoint(
            &format!("{AUTH_PREFIX}/signup"),
            &[("redirect_to", redirect_to)],
        )?;
        let req = self
            .client
            .request(Method::POST, url, None)
            .json(&Credentials { email, password });
        let body: Value = self.client.execute(req).await?;

        // With confirmation enabled the response is the bare user, no tokens.
        if body.get("access_token").is_some() {
            let token: TokenResponse = serde_json::from_value(body)?;
            let session = token.into_session(Utc::now());
            info!("signed up user {} (session created)", session.user.id);
            Ok(SignUpOutcome::SessionCreated(session))
        } else {
            debug!("sign-up pending email confirmation");
            Ok(SignUpOutcome::ConfirmationRequired)
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = self
            .client
            .endpoint(&format!("{AUTH_PREFIX}/logout"), &[])?;
        let req = self.client.request(Method::POST, url, Some(access_token));
        self.client.execute_empty(req).await
    }

    async fn get_user(&self, access_token: &str) -> Result<User> {
        let url = self.client.endpoint(&format!("{AUTH_PREFIX}/user"), &[])?;
        let req = self.client.request(Method::GET, url, Some(access_token));
        let user: WireUser = self.client.execute(req).await?;
        Ok(user.into_user())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession> {
        #[derive(Serialize)]
        struct RefreshRequest<'a> {
            refresh_token: &'a str,
        }

        let session = self
            .token("refresh_token", &RefreshRequest { refresh_token })
            .await?;
        debug!("refreshed session for user {}", session.user.id);
        Ok(session)
    }

    async fn verify_email(&self, token_hash: &str, kind: &str) -> Result<AuthSession> {
        #[derive(Serialize)]
        struct VerifyRequest<'a> {
            #[serde(rename = "type")]
            kind: &'a str,
            token_hash: &'a str,
        }

        let url = self
            .client
            .endpoint(&format!("{AUTH_PREFIX}/verify"), &[])?;
        let req = self
            .client
            .request(Method::POST, url, None)
            .json(&VerifyRequest { kind, token_hash });
        let token: TokenResponse = self.client.execute(req).await?;
        let session = token.into_session(Utc::now());
        info!("verified email for user {}", session.user.id);
        Ok(session)
    }
}
