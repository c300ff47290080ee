use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use common::types::{PersonFields, PersonRecord};

use crate::api::PersonApi;
use crate::errors::ClientError;

const FETCH_FAILED: &str = "Failed to fetch employees";
const ADD_FAILED: &str = "Failed to add employee";
const UPDATE_FAILED: &str = "Failed to update employee";
const DELETE_FAILED: &str = "Failed to delete employee";

/// What the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorState {
    pub records: Vec<PersonRecord>,
    /// Set while a refresh is in flight.
    pub loading: bool,
    /// Set while a create/update/delete is in flight.
    pub action_loading: bool,
    pub error: Option<String>,
}

/// Client-held copy of the record list.
///
/// Actions take `&self` so one store can be shared between UI handlers. The
/// state lock is released before each network call and re-acquired to apply
/// the result, so `snapshot` always sees the flags of in-flight calls.
pub struct PersonStore {
    api: Arc<dyn PersonApi>,
    state: RwLock<MirrorState>,
}

impl PersonStore {
    pub fn new(api: Arc<dyn PersonApi>) -> Self {
        Self { api, state: RwLock::new(MirrorState::default()) }
    }

    pub async fn snapshot(&self) -> MirrorState {
        self.state.read().await.clone()
    }

    pub async fn records(&self) -> Vec<PersonRecord> {
        self.state.read().await.records.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Replace the local list with the server's.
    pub async fn refresh(&self) {
        {
            let mut s = self.state.write().await;
            s.loading = true;
            s.error = None;
        }
        let result = self.api.list().await;
        let mut s = self.state.write().await;
        s.loading = false;
        match result {
            Ok(users) => {
                info!(count = users.len(), "mirror refreshed");
                s.records = users;
            }
            Err(e) => s.error = Some(failed(FETCH_FAILED, &e)),
        }
    }

    /// Create on the server, then append the returned record.
    pub async fn add(&self, fields: PersonFields) {
        self.mutate(ADD_FAILED, self.api.create(&fields), |records, created| {
            records.push(created);
        })
        .await
    }

    /// Update on the server, then swap in the returned record by id.
    pub async fn modify(&self, id: i32, fields: PersonFields) {
        self.mutate(UPDATE_FAILED, self.api.update(id, &fields), |records, updated| {
            for r in records.iter_mut().filter(|r| r.id == id) {
                *r = updated.clone();
            }
        })
        .await
    }

    /// Delete on the server, then drop the id locally.
    pub async fn remove(&self, id: i32) {
        self.mutate(DELETE_FAILED, self.api.delete(id), |records, ()| {
            records.retain(|r| r.id != id);
        })
        .await
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    async fn mutate<T, Fut, F>(&self, action: &str, call: Fut, apply: F)
    where
        Fut: Future<Output = Result<T, ClientError>>,
        F: FnOnce(&mut Vec<PersonRecord>, T),
    {
        {
            let mut s = self.state.write().await;
            s.action_loading = true;
            s.error = None;
        }
        let result = call.await;
        let mut s = self.state.write().await;
        s.action_loading = false;
        match result {
            Ok(value) => apply(&mut s.records, value),
            Err(e) => s.error = Some(failed(action, &e)),
        }
    }
}

fn failed(action: &str, err: &ClientError) -> String {
    warn!(err = %err, status = ?err.status(), "{action}");
    err.describe(action)
}
