// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Access to the event document store.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::event::{EventRecord, EventShort};

/// Errors from the document store.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("event not found: {0}")]
    NotFound(String),

    #[error("invalid event id: {0:?}")]
    InvalidId(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A store of event documents.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Fetches one event document.
    async fn get_event(&self, id: &str) -> Result<EventRecord, RepoError>;

    /// Lists the events index.
    async fn list_events(&self) -> Result<Vec<EventShort>, RepoError>;

    /// Writes the whole event document and refreshes its index entry.
    /// New events are assigned an id; the saved record is returned.
    async fn save_event(&self, record: EventRecord, is_new: bool)
    -> Result<EventRecord, RepoError>;

    /// Removes an event and its index entry.
    async fn delete_event(&self, id: &str) -> Result<(), RepoError>;
}

/// Event documents as JSON files.
///
/// Layout under the data directory:
///
/// - `events/<id>.json`: one document per event,
/// - `data/events.json`: the index, a map from id to [`EventShort`].
#[derive(Debug, Clone)]
pub struct JsonRepository {
    events_dir: PathBuf,
    index_path: PathBuf,
}

impl JsonRepository {
    /// Opens the store, creating its directories if needed.
    #[tracing::instrument]
    pub async fn open(data_dir: &Path) -> Result<Self, RepoError> {
        let events_dir = data_dir.join("events");
        let index_dir = data_dir.join("data");
        for dir in [&events_dir, &index_dir] {
            fs::create_dir_all(dir).await.map_err(|source| RepoError::Io {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(Self {
            events_dir,
            index_path: index_dir.join("events.json"),
        })
    }

    fn event_path(&self, id: &str) -> Result<PathBuf, RepoError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        match valid {
            true => Ok(self.events_dir.join(format!("{id}.json"))),
            false => Err(RepoError::InvalidId(id.to_owned())),
        }
    }

    async fn read_index(&self) -> Result<BTreeMap<String, EventShort>, RepoError> {
        match fs::read_to_string(&self.index_path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|source| RepoError::Json {
                path: self.index_path.clone(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(RepoError::Io {
                path: self.index_path.clone(),
                source,
            }),
        }
    }

    async fn write_index(&self, index: &BTreeMap<String, EventShort>) -> Result<(), RepoError> {
        write_json(&self.index_path, index).await
    }
}

#[async_trait]
impl EventRepository for JsonRepository {
    #[tracing::instrument(skip(self))]
    async fn get_event(&self, id: &str) -> Result<EventRecord, RepoError> {
        let path = self.event_path(id)?;
        let content = match fs::read_to_string(&path).await {
            Ok(a) => a,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RepoError::NotFound(id.to_owned()));
            }
            Err(source) => return Err(RepoError::Io { path, source }),
        };
        serde_json::from_str(&content).map_err(|source| RepoError::Json { path, source })
    }

    async fn list_events(&self) -> Result<Vec<EventShort>, RepoError> {
        let index = self.read_index().await?;
        Ok(index.into_values().collect())
    }

    #[tracing::instrument(skip(self, record), fields(id = %record.id))]
    async fn save_event(
        &self,
        mut record: EventRecord,
        is_new: bool,
    ) -> Result<EventRecord, RepoError> {
        if is_new {
            record.id = format!("event-{}", Uuid::new_v4().simple());
            tracing::debug!(id = %record.id, "assigned id to new event");
        } else if record.id.is_empty() {
            return Err(RepoError::InvalidId(record.id));
        }

        let path = self.event_path(&record.id)?;
        write_json(&path, &record).await?;

        let mut index = self.read_index().await?;
        index.insert(record.id.clone(), EventShort::from(&record));
        self.write_index(&index).await?;

        tracing::info!(id = %record.id, days = record.schedule.len(), "event saved");
        Ok(record)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_event(&self, id: &str) -> Result<(), RepoError> {
        let path = self.event_path(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RepoError::NotFound(id.to_owned()));
            }
            Err(source) => return Err(RepoError::Io { path, source }),
        }

        let mut index = self.read_index().await?;
        if index.remove(id).is_some() {
            self.write_index(&index).await?;
        }
        Ok(())
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), RepoError> {
    let content = serde_json::to_string_pretty(value).map_err(|source| RepoError::Json {
        path: path.to_owned(),
        source,
    })?;
    fs::write(path, content)
        .await
        .map_err(|source| RepoError::Io {
            path: path.to_owned(),
            source,
        })
}
