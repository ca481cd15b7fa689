// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use jiff::tz::TimeZone;

use crate::event::{Category, EventDraft, EventRecord, EventShort};
use crate::repo::{EventRepository, JsonRepository};
use crate::Config;

/// eventdesk application core.
#[derive(Clone)]
pub struct Desk {
    config: Config,
    tz: TimeZone,
    repo: Arc<dyn EventRepository>,
}

impl Desk {
    /// Creates a new instance backed by the JSON document store in the
    /// configured data directory.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;
        let data_dir = config
            .data_dir
            .clone()
            .ok_or("Data directory is not configured")?;

        let repo = JsonRepository::open(&data_dir)
            .await
            .map_err(|e| format!("Failed to open event store: {e}"))?;

        Self::with_repository(config, Arc::new(repo))
    }

    /// Creates a new instance on top of an arbitrary repository.
    pub fn with_repository(
        config: Config,
        repo: Arc<dyn EventRepository>,
    ) -> Result<Self, Box<dyn Error>> {
        let tz = config.time_zone()?;
        Ok(Self { config, tz, repo })
    }

    /// The time zone dates are displayed in.
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// Categories offered by the event form.
    pub fn categories(&self) -> &[Category] {
        &self.config.categories
    }

    pub async fn list_events(&self) -> Result<Vec<EventShort>, Box<dyn Error>> {
        let mut events = self.repo.list_events().await?;
        events.sort_by(|a, b| {
            start_key(&a.start_date)
                .cmp(&start_key(&b.start_date))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(events)
    }

    pub async fn get_event(&self, id: &str) -> Result<EventRecord, Box<dyn Error>> {
        Ok(self.repo.get_event(id).await?)
    }

    /// A draft for a brand new event.
    pub fn default_event_draft(&self) -> EventDraft {
        EventDraft::new(EventRecord::default_draft(), true)
    }

    /// A draft seeded from a stored event.
    pub async fn event_draft(&self, id: &str) -> Result<EventDraft, Box<dyn Error>> {
        let record = self.get_event(id).await?;
        Ok(EventDraft::new(record, false))
    }

    /// Persists a draft, replacing the stored document wholesale.
    pub async fn save_event(&self, draft: EventDraft) -> Result<EventRecord, Box<dyn Error>> {
        let is_new = draft.is_new();
        let record = self.repo.save_event(draft.into_record(), is_new).await?;
        Ok(record)
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), Box<dyn Error>> {
        Ok(self.repo.delete_event(id).await?)
    }
}

impl fmt::Debug for Desk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Desk")
            .field("config", &self.config)
            .field("tz", &self.tz)
            .finish_non_exhaustive()
    }
}

// events without a readable start date go last
fn start_key(start: &str) -> (bool, i64) {
    match start.trim().parse::<i64>() {
        Ok(ms) => (false, ms),
        Err(_) => (true, 0),
    }
}
