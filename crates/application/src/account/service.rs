//! Account service.
//!
//! The only component that performs network I/O for account operations.
//! Each operation builds one request from the endpoint catalog, attaches the
//! session token when the endpoint needs it, sends it once, and hands the
//! outcome to [`classify`]. Failures are reported once; nothing is retried.

use petland_domain::{
    AccessToken, ApiOperation, ChatCredentials, ClientConfig, EmailCodeRequest,
    EmailCodeSubmission, Header, LoginRequest, LoginResponse, RegistrationRequest, RequestSpec,
    ResponseSpec, User, request::DEFAULT_TIMEOUT_MS,
};
use serde::Serialize;
use url::Url;

use super::classifier::classify;
use crate::auth::{CredentialStore, NotAuthenticated, SessionStatus};
use crate::error::{AccountError, AccountResult, UnderlyingError};
use crate::ports::{CredentialStorageError, HttpClient};

/// Account operations over an [`HttpClient`].
pub struct AccountService<C> {
    client: C,
    base_url: Url,
    timeout_ms: u64,
    credentials: CredentialStore,
}

impl<C: HttpClient> AccountService<C> {
    /// Creates a service with the default request timeout.
    #[must_use]
    pub const fn new(client: C, base_url: Url, credentials: CredentialStore) -> Self {
        Self {
            client,
            base_url,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            credentials,
        }
    }

    /// Creates a service from client configuration.
    #[must_use]
    pub fn from_config(client: C, config: &ClientConfig, credentials: CredentialStore) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            timeout_ms: config.request_timeout_ms,
            credentials,
        }
    }

    /// Returns the credential store this service writes to.
    #[must_use]
    pub const fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Signs in and stores the issued token.
    ///
    /// Stored credentials are only touched on success.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` on 400, `ServerUnavailable` on 500, otherwise
    /// `Unknown`.
    pub async fn login(&self, identifier: &str, password: &str, persist: bool) -> AccountResult<()> {
        let body = json_body(&LoginRequest {
            login: identifier,
            password,
        })?;
        let response = self.send(ApiOperation::Login, Some(body)).await?;

        let LoginResponse { access_token } = parse(ApiOperation::Login, &response)?;
        let token = AccessToken::new(access_token)
            .map_err(|e| UnderlyingError::MalformedResponse(e.to_string()))?;

        self.credentials
            .save(token, persist)
            .await
            .map_err(storage_error)?;
        tracing::info!(persist, "signed in");
        Ok(())
    }

    /// Creates an account, then signs in with the same email and password.
    ///
    /// The result is the login's result: if registration succeeds but the
    /// login fails, the account exists but no session is stored.
    ///
    /// # Errors
    ///
    /// `AccountAlreadyExists` on 409, `ServerUnavailable` on 500, otherwise
    /// `Unknown`; after a successful registration, any login error.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> AccountResult<()> {
        let body = json_body(&RegistrationRequest {
            first_name,
            last_name,
            email,
            password,
        })?;
        self.send(ApiOperation::Register, Some(body)).await?;
        tracing::info!("account registered");

        self.login(email, password, true).await
    }

    /// Asks the server to email a verification code to `email`.
    ///
    /// The code is generated and checked by the server; submit it with
    /// [`submit_email_code`](Self::submit_email_code).
    ///
    /// # Errors
    ///
    /// `ServerUnavailable` on 500, otherwise `Unknown`.
    pub async fn verify_email(&self, email: &str) -> AccountResult<()> {
        let body = json_body(&EmailCodeRequest { email })?;
        self.send(ApiOperation::VerifyEmail, Some(body)).await?;
        Ok(())
    }

    /// Submits the verification code the user received.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` on 400 (wrong or expired code),
    /// `ServerUnavailable` on 500, otherwise `Unknown`.
    pub async fn submit_email_code(&self, email: &str, code: &str) -> AccountResult<()> {
        let body = json_body(&EmailCodeSubmission { email, code })?;
        self.send(ApiOperation::SubmitEmailCode, Some(body)).await?;
        Ok(())
    }

    /// Fetches the signed-in user and records their id in the store.
    ///
    /// A 401 leaves the stored token in place; the caller decides whether to
    /// sign out.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a session, `Unauthorized` on 401,
    /// `ServerUnavailable` on 500, otherwise `Unknown`.
    pub async fn get_user(&self) -> AccountResult<User> {
        let response = self.send(ApiOperation::GetUser, None).await?;
        let user: User = parse(ApiOperation::GetUser, &response)?;

        if let Err(e) = self.credentials.set_user_id(user.id.clone()).await {
            tracing::warn!(error = %e, "failed to persist user id");
        }
        Ok(user)
    }

    /// Pushes chat linkage fields for the signed-in user.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a session, `ServerUnavailable` on 500,
    /// otherwise `Unknown`.
    pub async fn update_chat_credentials(&self, chat_id: &str, session_id: &str) -> AccountResult<()> {
        let body = json_body(&ChatCredentials {
            chat_id: chat_id.to_string(),
            session_id: session_id.to_string(),
        })?;
        self.send(ApiOperation::UpdateChatCredentials, Some(body))
            .await?;
        Ok(())
    }

    /// Signs out locally. No request is sent.
    ///
    /// # Errors
    ///
    /// `Unknown` if the remembered session cannot be removed.
    pub async fn sign_out(&self) -> AccountResult<()> {
        self.credentials.clear().await.map_err(storage_error)?;
        tracing::info!("signed out");
        Ok(())
    }

    /// Returns the current session status.
    pub async fn session_status(&self) -> SessionStatus {
        self.credentials.status().await
    }

    async fn send(
        &self,
        operation: ApiOperation,
        body: Option<serde_json::Value>,
    ) -> AccountResult<ResponseSpec> {
        let endpoint = operation.endpoint();
        let url = endpoint
            .url(&self.base_url)
            .map_err(|e| UnderlyingError::InvalidRequest(e.to_string()))?;

        let mut request = RequestSpec::new(endpoint.method, url)
            .with_timeout_ms(self.timeout_ms)
            .with_header(Header::new("Accept", "application/json"));
        if endpoint.requires_auth {
            request = request.with_header(self.credentials.auth_header().await?);
        }
        if let Some(body) = body {
            request = request.with_json(body);
        }

        tracing::debug!(%operation, method = %endpoint.method, url = %request.url, "sending request");
        let outcome = self.client.execute(&request).await;

        match classify(operation, outcome) {
            Ok(response) => {
                tracing::debug!(
                    %operation,
                    status = %response.status,
                    elapsed_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
                    "request succeeded"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(%operation, error = %e, "request failed");
                Err(e)
            }
        }
    }
}

impl From<NotAuthenticated> for AccountError {
    fn from(_: NotAuthenticated) -> Self {
        Self::NotAuthenticated
    }
}

fn json_body<T: Serialize>(value: &T) -> AccountResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| AccountError::Unknown(UnderlyingError::InvalidRequest(e.to_string())))
}

fn parse<T: serde::de::DeserializeOwned>(
    operation: ApiOperation,
    response: &ResponseSpec,
) -> AccountResult<T> {
    response.body_as().map_err(|e| {
        AccountError::Unknown(UnderlyingError::MalformedResponse(format!(
            "{operation}: {e}"
        )))
    })
}

fn storage_error(e: CredentialStorageError) -> AccountError {
    AccountError::Unknown(UnderlyingError::Storage(e.to_string()))
}
