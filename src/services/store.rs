use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{CandidateRecord, DonationRecord, DonationStatus};

/// Errors that can occur with store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// On-disk layout: the two collections the web client kept in local storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreSnapshot {
    #[serde(default)]
    available_donations: Vec<DonationRecord>,
    #[serde(default)]
    recipients: Vec<CandidateRecord>,
}

/// JSON file backed store for donations and recipients
///
/// The whole snapshot lives in memory; every mutation rewrites the file
/// through a temporary sibling and a rename, and only reaches memory once
/// the write succeeded.
pub struct JsonStore {
    path: PathBuf,
    data: RwLock<StoreSnapshot>,
}

impl JsonStore {
    /// Open a store, starting empty when the file does not exist yet
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => StoreSnapshot::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("Store file {} not found, starting empty", path.display());
                StoreSnapshot::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(
            "Loaded {} donations and {} recipients from {}",
            snapshot.available_donations.len(),
            snapshot.recipients.len(),
            path.display()
        );

        Ok(Self {
            path,
            data: RwLock::new(snapshot),
        })
    }

    pub async fn donations(&self) -> Vec<DonationRecord> {
        self.data.read().await.available_donations.clone()
    }

    pub async fn recipients(&self) -> Vec<CandidateRecord> {
        self.data.read().await.recipients.clone()
    }

    /// Look up a donation that is still open for matching
    pub async fn find_available_donation(&self, id: &str) -> Option<DonationRecord> {
        self.data
            .read()
            .await
            .available_donations
            .iter()
            .find(|d| d.id == id)
            .filter(|d| d.status.unwrap_or_default() == DonationStatus::Available)
            .cloned()
    }

    /// Insert a donation, replacing any previous record with the same id
    pub async fn add_donation(&self, record: DonationRecord) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        let mut staged = data.clone();
        match staged.available_donations.iter().position(|d| d.id == record.id) {
            Some(index) => staged.available_donations[index] = record,
            None => staged.available_donations.push(record),
        }
        self.persist(&staged).await?;
        *data = staged;
        Ok(())
    }

    /// Insert or replace a recipient by id
    pub async fn upsert_recipient(&self, record: CandidateRecord) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        let mut staged = data.clone();
        match staged.recipients.iter().position(|r| r.id == record.id) {
            Some(index) => staged.recipients[index] = record,
            None => staged.recipients.push(record),
        }
        self.persist(&staged).await?;
        *data = staged;
        Ok(())
    }

    async fn persist(&self, snapshot: &StoreSnapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;

        tracing::trace!("Persisted store to {}", self.path.display());
        Ok(())
    }
}
