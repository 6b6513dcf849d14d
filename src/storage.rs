use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;
use uuid::Uuid;

/// URL prefix under which stored files are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Stores `body` under a generated name derived from `original_name` and
    /// returns the public path of the stored file.
    async fn put_object(&self, original_name: &str, body: Bytes) -> anyhow::Result<String>;
}

#[derive(Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub async fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("create upload dir {}", root.display()))?;
        Ok(Self { root })
    }

    /// Synchronous variant for tests; creates the directory if missing.
    #[cfg(test)]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        std::fs::create_dir_all(&root).expect("create temp upload dir");
        Self { root }
    }
}

#[async_trait]
impl StorageClient for LocalStorage {
    async fn put_object(&self, original_name: &str, body: Bytes) -> anyhow::Result<String> {
        let file_name = generated_file_name(original_name);
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;
        tracing::debug!(file = %file_name, bytes = body.len(), "upload stored");
        Ok(format!("{}/{}", PUBLIC_PREFIX, file_name))
    }
}

/// `<unix millis>-<random>-<name>`; the name keeps only characters that are
/// safe in a single path segment.
fn generated_file_name(original_name: &str) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let nonce = Uuid::new_v4().simple().to_string();
    let base = original_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();
    let mut name: String = base
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if name.trim_matches('.').is_empty() {
        name = "upload".into();
    }
    format!("{}-{}-{}", millis, &nonce[..8], name)
}
