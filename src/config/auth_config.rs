use std::path::PathBuf;

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// OAuth client registration downloaded from the cloud console (`installed` or `web` key).
    pub credentials_path: PathBuf,
    /// Where the `authorized_user` token is saved after the first interactive authorization.
    pub token_path: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("credentials.json"),
            token_path: PathBuf::from("token.json"),
        }
    }
}
