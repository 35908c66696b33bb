use std::path::{Path, PathBuf};

use error_stack::ResultExt;
use google_sheets4::oauth2::{
    self,
    authenticator::Authenticator,
    authorized_user::AuthorizedUserSecret,
    storage::{TokenInfo, TokenStorage},
    AuthorizedUserAuthenticator, InstalledFlowAuthenticator, InstalledFlowReturnMethod,
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::config::auth_config::AuthConfig;

use super::http_client::{HttpClient, HttpsConnector};

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const AUTHORIZED_USER_TYPE: &str = "authorized_user";

pub type SheetsAuthenticator = Authenticator<HttpsConnector>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to read application secret")]
    MissingApplicationSecret,
    #[error("Failed to build authenticator")]
    AuthenticatorBuildFailed,
    #[error("Interactive authorization failed")]
    AuthorizationFailed,
}

/// Hands out an authenticator for the Sheets API, preferring the saved `authorized_user` token.
pub struct CredentialProvider {
    config: AuthConfig,
    client: HttpClient,
}

impl std::fmt::Debug for CredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialProvider")
            .field("config", &self.config)
            .finish()
    }
}

impl CredentialProvider {
    pub fn new(config: AuthConfig, client: HttpClient) -> Self {
        Self { config, client }
    }

    /// Returns an authenticator that is ready to issue tokens.
    ///
    /// A saved token is used without touching the network. Otherwise the user is sent through
    /// the installed-app consent flow and the resulting refresh token is saved for the next run.
    #[instrument(name = "CredentialProvider::obtain")]
    pub async fn obtain(&self) -> error_stack::Result<SheetsAuthenticator, AuthError> {
        if let Some(secret) = load_saved_token(&self.config.token_path).await {
            tracing::info!(
                "🔑 Reusing saved credentials from {}",
                self.config.token_path.display()
            );
            return AuthorizedUserAuthenticator::with_client(secret, self.client.clone())
                .build()
                .await
                .change_context(AuthError::AuthenticatorBuildFailed);
        }

        tracing::info!("🔐 No usable saved credentials, starting interactive authorization");
        self.authorize_interactively().await
    }

    #[instrument(name = "CredentialProvider::authorize_interactively")]
    async fn authorize_interactively(
        &self,
    ) -> error_stack::Result<SheetsAuthenticator, AuthError> {
        let credentials_path = &self.config.credentials_path;
        let app_secret = oauth2::read_application_secret(credentials_path)
            .await
            .change_context(AuthError::MissingApplicationSecret)
            .attach_printable_lazy(|| {
                format!(
                    "Could not read OAuth client registration at '{}'",
                    credentials_path.display()
                )
            })?;

        let storage = AuthorizedUserStorage::new(
            self.config.token_path.clone(),
            app_secret.client_id.clone(),
            app_secret.client_secret.clone(),
        );

        let authenticator = InstalledFlowAuthenticator::with_client(
            app_secret,
            InstalledFlowReturnMethod::HTTPRedirect,
            self.client.clone(),
        )
        .with_storage(Box::new(storage))
        .build()
        .await
        .change_context(AuthError::AuthenticatorBuildFailed)?;

        // Runs the consent flow now instead of on the first spreadsheet call.
        authenticator
            .token(&[SPREADSHEETS_SCOPE])
            .await
            .change_context(AuthError::AuthorizationFailed)?;

        tracing::info!(
            "✅ Authorization complete, credentials saved to {}",
            self.config.token_path.display()
        );
        Ok(authenticator)
    }
}

/// Reads the saved token. Anything missing or malformed counts as "no saved token".
pub async fn load_saved_token(path: &Path) -> Option<AuthorizedUserSecret> {
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(err) => {
            tracing::debug!("No saved token at {}: {}", path.display(), err);
            return None;
        }
    };

    let secret: AuthorizedUserSecret = match serde_json::from_slice(&content) {
        Ok(secret) => secret,
        Err(err) => {
            tracing::warn!("Ignoring unreadable saved token at {}: {}", path.display(), err);
            return None;
        }
    };

    if secret.key_type != AUTHORIZED_USER_TYPE || secret.refresh_token.is_empty() {
        tracing::warn!(
            "Ignoring saved token at {}: not an {} token",
            path.display(),
            AUTHORIZED_USER_TYPE
        );
        return None;
    }

    Some(secret)
}

/// Writes `{type, client_id, client_secret, refresh_token}` so the next run can skip consent.
pub async fn save_token(path: &Path, secret: &AuthorizedUserSecret) -> std::io::Result<()> {
    let payload = serde_json::to_vec(secret)?;
    tokio::fs::write(path, payload).await
}

/// Token storage for the interactive flow.
///
/// Tokens are kept in memory for this run; whenever one arrives with a refresh token it is also
/// saved to disk in `authorized_user` form.
pub struct AuthorizedUserStorage {
    token_path: PathBuf,
    client_id: String,
    client_secret: String,
    current: RwLock<Option<TokenInfo>>,
}

impl AuthorizedUserStorage {
    pub fn new(token_path: PathBuf, client_id: String, client_secret: String) -> Self {
        Self {
            token_path,
            client_id,
            client_secret,
            current: RwLock::new(None),
        }
    }
}

#[async_trait::async_trait]
impl TokenStorage for AuthorizedUserStorage {
    async fn set(&self, _scopes: &[&str], token: TokenInfo) -> anyhow::Result<()> {
        if let Some(refresh_token) = token.refresh_token.clone() {
            let secret = AuthorizedUserSecret {
                client_id: self.client_id.clone(),
                client_secret: self.client_secret.clone(),
                refresh_token,
                key_type: AUTHORIZED_USER_TYPE.to_string(),
            };
            save_token(&self.token_path, &secret).await?;
        }

        // -- LOCK WRITE --
        let mut guard = self.current.write().await;
        guard.replace(token);
        // -- END LOCK WRITE --
        Ok(())
    }

    async fn get(&self, _scopes: &[&str]) -> Option<TokenInfo> {
        self.current.read().await.clone()
    }
}
