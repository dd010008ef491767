use crate::{
    session::Session,
    types::{Credential, Provider},
    utils,
};

/// Seconds before the reported expiry at which a token is already treated as stale.
const EXPIRY_MARGIN_SECS: i64 = 240;

pub struct CredentialManager {
    session: Session,
}

impl CredentialManager {
    pub fn new(session: Session) -> Self {
        CredentialManager { session }
    }

    /// Returns the usable credential for `provider`.
    ///
    /// Expired credentials are removed and reported as absent so the caller
    /// sends the user through the login flow again.
    pub async fn load(&self, provider: Provider) -> Option<Credential> {
        let credential: Credential = self.session.get(provider.credential_key()).await?;
        if Self::is_expired(&credential) {
            self.clear(provider).await;
            return None;
        }
        Some(credential)
    }

    pub async fn persist(&self, credential: &Credential) -> Result<(), String> {
        self.session
            .insert(credential.provider.credential_key(), credential)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn clear(&self, provider: Provider) {
        self.session.remove(provider.credential_key()).await;
    }

    pub async fn is_connected(&self, provider: Provider) -> bool {
        self.load(provider).await.is_some()
    }

    fn is_expired(credential: &Credential) -> bool {
        match credential.expires_at {
            Some(expires_at) => {
                utils::now_timestamp() >= expires_at.saturating_sub(EXPIRY_MARGIN_SECS)
            }
            None => false,
        }
    }
}
