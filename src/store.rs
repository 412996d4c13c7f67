// src/store.rs
use crate::api::{ApiError, RecordApi, RemoteAuth};
use crate::domain::record::{Record, RecordFields};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Whether the snapshot was re-fetched after a confirmed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    Done,
    /// The write went through and is reflected locally; the listing failed.
    Failed(String),
}

/// In-memory snapshot of the remote records for one session.
///
/// The remote service is the source of truth. Mutations go out first and are
/// only reflected here once the service confirms them, after which the whole
/// snapshot is re-fetched.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    generation: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bumped by every change; zero until the first load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap the whole snapshot. Duplicate ids keep the last occurrence.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        let mut deduped: Vec<Record> = Vec::with_capacity(records.len());
        for record in records {
            match deduped.iter().position(|r| r.id == record.id) {
                Some(i) => deduped[i] = record,
                None => deduped.push(record),
            }
        }

        self.records = deduped;
        self.generation += 1;
    }

    pub fn find(&self, id: &str) -> Result<&Record, StoreError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn upsert(&mut self, record: Record) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        self.generation += 1;
    }

    pub fn remove(&mut self, id: &str) -> Result<Record, StoreError> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.generation += 1;
        Ok(self.records.remove(pos))
    }

    /// Replace the snapshot with the service's current list.
    pub fn sync(&mut self, api: &dyn RecordApi, auth: &RemoteAuth) -> Result<(), StoreError> {
        let records = api.list_records(auth)?;
        log::debug!("synced {} records", records.len());
        self.replace_all(records);
        Ok(())
    }

    /// Re-fetch after a write the service already confirmed. Only an expired
    /// remote session is an error here; other failures keep the local change.
    fn refresh_after_write(
        &mut self,
        api: &dyn RecordApi,
        auth: &RemoteAuth,
    ) -> Result<Refresh, StoreError> {
        match self.sync(api, auth) {
            Ok(()) => Ok(Refresh::Done),
            Err(StoreError::Api(ApiError::Unauthenticated)) => {
                Err(StoreError::Api(ApiError::Unauthenticated))
            }
            Err(err) => {
                log::warn!("write confirmed but refresh failed: {err}");
                Ok(Refresh::Failed(err.to_string()))
            }
        }
    }

    pub fn create(
        &mut self,
        api: &dyn RecordApi,
        auth: &RemoteAuth,
        fields: &RecordFields,
    ) -> Result<(String, Refresh), StoreError> {
        let created = api.create_record(auth, fields)?;
        let id = created.id.clone();
        log::info!("created record {id}");

        self.upsert(created);
        let refresh = self.refresh_after_write(api, auth)?;
        Ok((id, refresh))
    }

    pub fn update(
        &mut self,
        api: &dyn RecordApi,
        auth: &RemoteAuth,
        id: &str,
        fields: &RecordFields,
    ) -> Result<Refresh, StoreError> {
        self.find(id)?;

        let updated = api.update_record(auth, id, fields)?;
        log::info!("updated record {id}");

        self.upsert(updated);
        self.refresh_after_write(api, auth)
    }

    pub fn delete(
        &mut self,
        api: &dyn RecordApi,
        auth: &RemoteAuth,
        id: &str,
    ) -> Result<Refresh, StoreError> {
        self.find(id)?;

        api.delete_record(auth, id)?;
        log::info!("deleted record {id}");

        self.remove(id)?;
        self.refresh_after_write(api, auth)
    }
}
