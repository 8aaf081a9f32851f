use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Descriptor for a hosted avatar model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarModel {
    pub id: String,
    pub name: String,
    pub model_url: String,
    pub category: String,
    pub expressions: Vec<String>,
    pub animations: Vec<String>,
}

/// Resolves an avatar identifier to a model descriptor.
#[async_trait::async_trait]
pub trait AvatarCatalog: Send + Sync {
    async fn resolve(&self, avatar_id: &str) -> Result<AvatarModel>;
}

/// Caching decorator: resolved models are kept for the process lifetime,
/// keyed by avatar id.
pub struct CachedCatalog {
    inner: Arc<dyn AvatarCatalog>,
    cache: RwLock<HashMap<String, AvatarModel>>,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn AvatarCatalog>) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl AvatarCatalog for CachedCatalog {
    async fn resolve(&self, avatar_id: &str) -> Result<AvatarModel> {
        {
            let cache = self.cache.read().await;
            if let Some(model) = cache.get(avatar_id) {
                return Ok(model.clone());
            }
        }

        let model = self.inner.resolve(avatar_id).await?;

        let mut cache = self.cache.write().await;
        cache.insert(avatar_id.to_string(), model.clone());

        Ok(model)
    }
}

/// Catalog of built-in presenter avatars, used when no external avatar
/// provider is configured.
pub struct BuiltinCatalog;

#[async_trait::async_trait]
impl AvatarCatalog for BuiltinCatalog {
    async fn resolve(&self, avatar_id: &str) -> Result<AvatarModel> {
        let model = match avatar_id {
            "avatar-1" => AvatarModel {
                id: "avatar-1".to_string(),
                name: "Professor Alex".to_string(),
                model_url: "https://models.avatarcast.dev/avatar-1.glb".to_string(),
                category: "professional".to_string(),
                expressions: strings(&["neutral", "smile", "surprised", "thinking", "explaining"]),
                animations: strings(&["idle", "talk", "gesture", "nod", "point"]),
            },
            "avatar-2" => AvatarModel {
                id: "avatar-2".to_string(),
                name: "Dr. Maya".to_string(),
                model_url: "https://models.avatarcast.dev/avatar-2.glb".to_string(),
                category: "professional".to_string(),
                expressions: strings(&["confident", "smile", "serious", "encouraging", "questioning"]),
                animations: strings(&["idle", "talk", "gesture", "emphasize", "welcome"]),
            },
            "avatar-3" => AvatarModel {
                id: "avatar-3".to_string(),
                name: "Teacher Sam".to_string(),
                model_url: "https://models.avatarcast.dev/avatar-3.glb".to_string(),
                category: "professional".to_string(),
                expressions: strings(&["friendly", "smile", "excited", "thoughtful", "supportive"]),
                animations: strings(&["idle", "talk", "gesture", "applaud", "teaching"]),
            },
            other => bail!("avatar {} not found", other),
        };

        info!("Resolved avatar {} ({})", model.id, model.name);

        Ok(model)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
