#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::StoreBox;

pub const CREDENTIAL_KEY: &str = "openai_api_key";
pub const MASK_PREFIX: &str = "...";
const MASK_VISIBLE_CHARS: usize = 4;

/// The API credential used for remote completions. Having no credential is a
/// valid state, callers are expected to ask the user for one.
pub struct CredentialStore {
    store: StoreBox,
}

impl CredentialStore {
    pub fn new(store: StoreBox) -> CredentialStore {
        return CredentialStore { store };
    }

    pub async fn read(&self) -> Result<Option<String>> {
        let credential = self.store.get(CREDENTIAL_KEY).await?;
        return Ok(credential.filter(|e| return !e.trim().is_empty()));
    }

    pub async fn write(&self, credential: &str) -> Result<()> {
        let credential = credential.trim();
        // The masked form is what gets displayed back, saving it would replace
        // the real credential with garbage.
        if credential.is_empty() || credential.starts_with(MASK_PREFIX) {
            bail!("Please enter a valid API key");
        }

        self.store.set(CREDENTIAL_KEY, credential).await?;
        tracing::debug!(credential = CredentialStore::mask(credential), "Credential saved");

        return Ok(());
    }

    pub async fn reset(&self) -> Result<()> {
        self.store.clear(CREDENTIAL_KEY).await?;
        tracing::debug!("Credential cleared");

        return Ok(());
    }

    pub async fn masked(&self) -> Result<Option<String>> {
        return Ok(self
            .read()
            .await?
            .map(|credential| return CredentialStore::mask(&credential)));
    }

    pub fn mask(credential: &str) -> String {
        let count = credential.chars().count();
        let visible = credential
            .chars()
            .skip(count.saturating_sub(MASK_VISIBLE_CHARS))
            .collect::<String>();

        return format!("{MASK_PREFIX}{visible}");
    }
}
