//! Fakes for the application ports, shared by unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use petland_domain::{Credential, RequestSpec, ResponseSpec};

use crate::ports::{Clock, CredentialRepository, CredentialStorageError, HttpClient, HttpClientError};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Repository keeping the "persisted" credential in shared memory, so a
/// second store built from a clone behaves like the app after a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialRepository {
    stored: Arc<Mutex<Option<Credential>>>,
    fail_writes: Arc<Mutex<bool>>,
    unreadable: Arc<Mutex<Option<String>>>,
}

impl MemoryCredentialRepository {
    pub fn stored(&self) -> Option<Credential> {
        self.stored.lock().unwrap().clone()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Makes `load` fail as if the stored copy could not be parsed, until
    /// the next successful `save` or `clear`.
    pub fn make_unreadable(&self, reason: &str) {
        *self.unreadable.lock().unwrap() = Some(reason.to_string());
    }

    pub fn is_unreadable(&self) -> bool {
        self.unreadable.lock().unwrap().is_some()
    }

    fn check_writable(&self) -> Result<(), CredentialStorageError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(CredentialStorageError::Io(std::io::Error::other(
                "disk full",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialRepository for MemoryCredentialRepository {
    async fn load(&self) -> Result<Option<Credential>, CredentialStorageError> {
        if let Some(reason) = self.unreadable.lock().unwrap().clone() {
            return Err(CredentialStorageError::Serialization(reason));
        }
        Ok(self.stored())
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStorageError> {
        self.check_writable()?;
        *self.unreadable.lock().unwrap() = None;
        *self.stored.lock().unwrap() = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialStorageError> {
        self.check_writable()?;
        *self.unreadable.lock().unwrap() = None;
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

struct Scripted {
    outcome: Result<ResponseSpec, HttpClientError>,
    delay: Option<Duration>,
}

/// HTTP client answering from per-path scripts and recording every request.
#[derive(Clone, Default)]
pub struct FakeHttpClient {
    scripts: Arc<Mutex<HashMap<String, VecDeque<Scripted>>>>,
    requests: Arc<Mutex<Vec<RequestSpec>>>,
}

impl FakeHttpClient {
    /// Queues a response for the next request to `path`.
    pub fn respond(&self, path: &str, response: ResponseSpec) -> &Self {
        self.push(path, Ok(response), None)
    }

    /// Queues a response delivered after `delay`.
    pub fn respond_after(&self, path: &str, response: ResponseSpec, delay: Duration) -> &Self {
        self.push(path, Ok(response), Some(delay))
    }

    /// Queues a transport failure.
    pub fn fail(&self, path: &str, error: HttpClientError) -> &Self {
        self.push(path, Err(error), None)
    }

    fn push(
        &self,
        path: &str,
        outcome: Result<ResponseSpec, HttpClientError>,
        delay: Option<Duration>,
    ) -> &Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(Scripted { outcome, delay });
        self
    }

    /// Returns every request seen so far.
    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the requests sent to `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RequestSpec> {
        self.requests()
            .into_iter()
            .filter(|r| r.path() == path)
            .collect()
    }
}

impl HttpClient for FakeHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(request.path())
            .and_then(VecDeque::pop_front);

        let Some(Scripted { outcome, delay }) = scripted else {
            panic!("no scripted response for {}", request.path());
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        outcome
    }
}
