use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use common::types::{Envelope, PersonFields, PersonRecord};
use configs::ClientConfig;

use crate::errors::ClientError;

/// The four record operations, as seen from the client.
#[async_trait]
pub trait PersonApi: Send + Sync {
    async fn list(&self) -> Result<Vec<PersonRecord>, ClientError>;
    async fn create(&self, fields: &PersonFields) -> Result<PersonRecord, ClientError>;
    async fn update(&self, id: i32, fields: &PersonFields) -> Result<PersonRecord, ClientError>;
    async fn delete(&self, id: i32) -> Result<(), ClientError>;
}

/// `PersonApi` over HTTP against `<base>/api/user`.
#[derive(Clone, Debug)]
pub struct HttpPersonApi {
    client: Client,
    endpoint: String,
}

impl HttpPersonApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        let endpoint = format!("{}/api/user", base_url.trim_end_matches('/'));
        Self { client, endpoint }
    }

    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self::new(&cfg.api_base)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<Envelope<T>, ClientError> {
        let res = req.send().await.map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = res.status();
        let bytes = res.bytes().await.map_err(|e| ClientError::Transport(e.to_string()))?;
        debug!(status = status.as_u16(), len = bytes.len(), "record api response");
        if !status.is_success() {
            let message = serde_json::from_slice::<Envelope<Value>>(&bytes)
                .map(|env| env.message)
                .unwrap_or_else(|_| {
                    format!("Request failed with status code {}", status.as_u16())
                });
            return Err(ClientError::Http { status: status.as_u16(), message });
        }
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn require_data<T>(env: Envelope<T>) -> Result<T, ClientError> {
    env.data.ok_or_else(|| ClientError::Decode("envelope without data".into()))
}

/// `data.users` as records; an absent or non-array `users` reads as an empty list.
fn users_from(data: Option<Value>) -> Result<Vec<PersonRecord>, ClientError> {
    match data.and_then(|mut d| d.get_mut("users").map(Value::take)) {
        Some(users @ Value::Array(_)) => {
            serde_json::from_value(users).map_err(|e| ClientError::Decode(e.to_string()))
        }
        _ => Ok(Vec::new()),
    }
}

#[async_trait]
impl PersonApi for HttpPersonApi {
    async fn list(&self) -> Result<Vec<PersonRecord>, ClientError> {
        let env: Envelope<Value> = self.send(self.client.get(&self.endpoint)).await?;
        users_from(env.data)
    }

    async fn create(&self, fields: &PersonFields) -> Result<PersonRecord, ClientError> {
        let env = self.send(self.client.post(&self.endpoint).json(fields)).await?;
        require_data(env)
    }

    async fn update(
        &self,
        id: i32,
        fields: &PersonFields,
    ) -> Result<PersonRecord, ClientError> {
        let url = format!("{}/{}", self.endpoint, id);
        let env = self.send(self.client.put(url).json(fields)).await?;
        require_data(env)
    }

    async fn delete(&self, id: i32) -> Result<(), ClientError> {
        let url = format!("{}/{}", self.endpoint, id);
        let _: Envelope<Value> = self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

/// In-memory stand-in that answers like the service does.
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};
    use tokio::sync::oneshot;

    #[derive(Default)]
    struct Table {
        rows: Vec<PersonRecord>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct InMemoryPersonApi {
        table: Mutex<Table>,
        fail_next: Mutex<Option<ClientError>>,
        gate: Mutex<Option<oneshot::Receiver<()>>>,
    }

    impl InMemoryPersonApi {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make the next call fail with `err` without touching the table.
        pub fn fail_next(&self, err: ClientError) {
            *lock(&self.fail_next) = Some(err);
        }

        /// Park the next call until the returned sender fires or is dropped.
        pub fn hold_next(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            *lock(&self.gate) = Some(rx);
            tx
        }

        /// Rows as the "server" currently holds them.
        pub fn rows(&self) -> Vec<PersonRecord> {
            lock(&self.table).rows.clone()
        }

        async fn pass_gate(&self) {
            let held = lock(&self.gate).take();
            if let Some(rx) = held {
                let _ = rx.await;
            }
        }

        fn take_failure(&self) -> Result<(), ClientError> {
            match lock(&self.fail_next).take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
        m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(fields: &PersonFields) -> Result<(), ClientError> {
        if fields.name.is_empty() || fields.designation.is_empty() {
            return Err(ClientError::Http {
                status: 400,
                message: "Name and designation are required".into(),
            });
        }
        Ok(())
    }

    fn not_found() -> ClientError {
        ClientError::Http { status: 404, message: "User not found".into() }
    }

    #[async_trait]
    impl PersonApi for InMemoryPersonApi {
        async fn list(&self) -> Result<Vec<PersonRecord>, ClientError> {
            self.pass_gate().await;
            self.take_failure()?;
            Ok(self.rows())
        }

        async fn create(&self, fields: &PersonFields) -> Result<PersonRecord, ClientError> {
            self.pass_gate().await;
            self.take_failure()?;
            check(fields)?;
            let mut table = lock(&self.table);
            table.last_id += 1;
            let rec = PersonRecord {
                id: table.last_id,
                name: fields.name.clone(),
                designation: fields.designation.clone(),
            };
            table.rows.push(rec.clone());
            Ok(rec)
        }

        async fn update(
            &self,
            id: i32,
            fields: &PersonFields,
        ) -> Result<PersonRecord, ClientError> {
            self.pass_gate().await;
            self.take_failure()?;
            check(fields)?;
            let mut table = lock(&self.table);
            let row = table
                .rows
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(not_found)?;
            row.name = fields.name.clone();
            row.designation = fields.designation.clone();
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ClientError> {
            self.pass_gate().await;
            self.take_failure()?;
            let mut table = lock(&self.table);
            let before = table.rows.len();
            table.rows.retain(|r| r.id != id);
            if table.rows.len() == before {
                return Err(not_found());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_joins_base_without_double_slash() {
        let expected = "http://localhost:3000/api/user";
        assert_eq!(HttpPersonApi::new("http://localhost:3000/").endpoint(), expected);
        assert_eq!(HttpPersonApi::new("http://localhost:3000").endpoint(), expected);
    }

    #[test]
    fn users_decoded_from_list_payload() {
        let data = json!({"users": [{"id": 1, "name": "Ada", "designation": "Engineer"}]});
        let users = users_from(Some(data)).unwrap();
        let ada = PersonRecord { id: 1, name: "Ada".into(), designation: "Engineer".into() };
        assert_eq!(users, vec![ada]);
    }

    #[test]
    fn missing_or_non_array_users_is_empty_list() {
        assert!(users_from(None).unwrap().is_empty());
        assert!(users_from(Some(json!({}))).unwrap().is_empty());
        assert!(users_from(Some(json!({"users": null}))).unwrap().is_empty());
        assert!(users_from(Some(json!({"users": "none"}))).unwrap().is_empty());
    }

    #[test]
    fn malformed_user_entry_is_decode_error() {
        let err = users_from(Some(json!({"users": [{"id": "x"}]}))).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn from_config_uses_api_base() {
        let cfg = ClientConfig { api_base: "http://records.internal:6000".into() };
        let api = HttpPersonApi::from_config(&cfg);
        assert_eq!(api.endpoint(), "http://records.internal:6000/api/user");
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // port 9 (discard) on localhost is expected to refuse connections
        let api = HttpPersonApi::new("http://127.0.0.1:9");
        let err = api.list().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(err.status(), None);
    }
}
