use super::ArtifactStore;
use anyhow::{Context, Result};
use std::time::{Duration, SystemTime};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// How long artifacts are kept. `max_age: None` keeps them forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub max_age: Option<Duration>,
}

impl RetentionPolicy {
    pub fn keep_forever() -> Self {
        Self { max_age: None }
    }

    pub fn max_age(max_age: Duration) -> Self {
        Self {
            max_age: Some(max_age),
        }
    }

    /// Whether a file last modified at `modified` has expired as of `now`
    pub fn is_expired(&self, modified: SystemTime, now: SystemTime) -> bool {
        match self.max_age {
            Some(max_age) => now
                .duration_since(modified)
                .map(|age| age > max_age)
                .unwrap_or(false),
            None => false,
        }
    }
}

impl ArtifactStore {
    /// Delete expired artifacts. Returns how many files were removed.
    pub async fn sweep(&self, policy: &RetentionPolicy) -> Result<usize> {
        if policy.max_age.is_none() {
            return Ok(0);
        }

        let now = SystemTime::now();
        let mut removed = 0;

        let mut entries = tokio::fs::read_dir(self.root())
            .await
            .with_context(|| format!("Failed to read {}", self.root().display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            let modified = metadata.modified()?;
            if policy.is_expired(modified, now) {
                let path = entry.path();
                tokio::fs::remove_file(&path)
                    .await
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                debug!("Removed expired artifact {}", path.display());
                removed += 1;
            }
        }

        if removed > 0 {
            info!("Retention sweep removed {} artifact(s)", removed);
        }

        Ok(removed)
    }

    /// Run [`ArtifactStore::sweep`] every `interval` until the task is aborted
    pub fn spawn_sweeper(&self, policy: RetentionPolicy, interval: Duration) -> JoinHandle<()> {
        let store = self.clone();

        tokio::spawn(async move {
            info!(
                "Retention sweeper started (max age {:?}, every {:?})",
                policy.max_age, interval
            );

            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if let Err(e) = store.sweep(&policy).await {
                    error!("Retention sweep failed: {:#}", e);
                }
            }
        })
    }
}
