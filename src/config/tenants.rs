use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Per-guild overrides for the chat surface.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct TenantOverrides {
    pub api_key: Option<String>,
    pub persona: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct TenantsTOML {
    /// Keyed by guild id; kept in insertion order so the file stays stable
    /// across rewrites.
    #[serde(default)]
    tenants: IndexMap<String, TenantOverrides>,
}

/// Overrides persisted next to the main config as `tenants.toml`. An
/// absent file is an empty store; the file appears on the first write.
pub struct TenantStore {
    path: PathBuf,
    cached: RwLock<TenantsTOML>,
}

impl TenantStore {
    pub fn read(path: PathBuf) -> Result<Self, anyhow::Error> {
        let cached = match path.is_file() {
            true => toml::from_str(&std::fs::read_to_string(&path)?)?,
            false => TenantsTOML::default(),
        };

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    /// Looks up the overrides for a tenant. No id or no row means no
    /// overrides.
    pub async fn resolve(&self, tenant_id: Option<u64>) -> TenantOverrides {
        let Some(id) = tenant_id else {
            return TenantOverrides::default();
        };

        self.cached
            .read()
            .await
            .tenants
            .get(&id.to_string())
            .cloned()
            .unwrap_or_default()
    }

    pub async fn set_key(
        &self,
        tenant_id: u64,
        api_key: Option<String>,
    ) -> Result<(), anyhow::Error> {
        self.mutate(tenant_id, |row| row.api_key = api_key).await
    }

    pub async fn set_persona(
        &self,
        tenant_id: u64,
        persona: Option<String>,
    ) -> Result<(), anyhow::Error> {
        self.mutate(tenant_id, |row| row.persona = persona).await
    }

    async fn mutate(
        &self,
        tenant_id: u64,
        apply: impl FnOnce(&mut TenantOverrides),
    ) -> Result<(), anyhow::Error> {
        let mut cached = self.cached.write().await;

        let row = cached.tenants.entry(tenant_id.to_string()).or_default();
        apply(row);
        row.updated_at = Some(Utc::now());

        let serialized = toml::to_string(&*cached)?;
        tokio::fs::write(&self.path, serialized).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> TenantStore {
        TenantStore::read(dir.path().join("tenants.toml")).unwrap()
    }

    #[tokio::test]
    async fn an_absent_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();

        let tenants = store(&dir);

        assert_eq!(tenants.resolve(Some(42)).await, TenantOverrides::default());
        assert_eq!(tenants.resolve(None).await, TenantOverrides::default());
    }

    #[tokio::test]
    async fn overrides_survive_a_reread() {
        let dir = tempfile::tempdir().unwrap();

        let tenants = store(&dir);
        tenants.set_key(42, Some("sk-guild".to_string())).await.unwrap();
        tenants
            .set_persona(42, Some("You are a librarian.".to_string()))
            .await
            .unwrap();
        tenants.set_key(43, Some("sk-other".to_string())).await.unwrap();

        let reread = store(&dir);
        let row = reread.resolve(Some(42)).await;

        assert_eq!(row.api_key.as_deref(), Some("sk-guild"));
        assert_eq!(row.persona.as_deref(), Some("You are a librarian."));
        assert!(row.updated_at.is_some());
        assert_eq!(reread.resolve(Some(43)).await.api_key.as_deref(), Some("sk-other"));
    }

    #[tokio::test]
    async fn clearing_a_key_keeps_the_rest_of_the_row() {
        let dir = tempfile::tempdir().unwrap();

        let tenants = store(&dir);
        tenants.set_key(42, Some("sk-guild".to_string())).await.unwrap();
        tenants
            .set_persona(42, Some("You are a librarian.".to_string()))
            .await
            .unwrap();

        tenants.set_key(42, None).await.unwrap();

        let row = tenants.resolve(Some(42)).await;
        assert_eq!(row.api_key, None);
        assert_eq!(row.persona.as_deref(), Some("You are a librarian."));
    }
}
