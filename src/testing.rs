//! In-memory collaborators for tests. Both count their calls.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::domain::{
    error::{IdentityCreationError, ProfileWriteError},
    models::{
        identity::{CredentialReceipt, IdentityId},
        profile::{EmailAddress, Profile},
    },
    repositories::{identity_provider::IdentityProvider, profile_store::ProfileStore},
};

#[derive(Default)]
struct ProviderState {
    accounts: HashMap<EmailAddress, IdentityId>,
    issued: Vec<IdentityId>,
    next_uid: u64,
    failure: Option<IdentityCreationError>,
    raw_uid: Option<Option<String>>,
}

/// Provider with a unique-email constraint and sequential uids (`uid-1`, `uid-2`, ...)
#[derive(Clone, Default)]
pub struct FakeIdentityProvider {
    state: Arc<Mutex<ProviderState>>,
    calls: Arc<AtomicUsize>,
}

impl FakeIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every following call fails with `err`
    pub fn fail_with(&self, err: IdentityCreationError) {
        self.state.lock().unwrap().failure = Some(err);
    }

    /// Every following call succeeds but hands back `uid` verbatim
    pub fn issue_raw_uid(&self, uid: Option<String>) {
        self.state.lock().unwrap().raw_uid = Some(uid);
    }

    pub fn create_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn issued(&self) -> Vec<IdentityId> {
        self.state.lock().unwrap().issued.clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn create_credential(
        &self,
        email: &EmailAddress,
        _password: &str,
    ) -> Result<CredentialReceipt, IdentityCreationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // let concurrent callers interleave before the uniqueness check
        tokio::task::yield_now().await;

        let mut state = self.state.lock().unwrap();
        if let Some(err) = &state.failure {
            return Err(err.clone());
        }
        if let Some(raw) = &state.raw_uid {
            return Ok(CredentialReceipt::new(raw.clone()));
        }
        if state.accounts.contains_key(email) {
            return Err(IdentityCreationError::EmailAlreadyInUse);
        }
        state.next_uid += 1;
        let uid = format!("uid-{}", state.next_uid);
        let id = IdentityId::new(uid.clone()).unwrap();
        state.accounts.insert(email.clone(), id.clone());
        state.issued.push(id);
        Ok(CredentialReceipt::new(Some(uid)))
    }
}

/// Upserting map store with queued failures
#[derive(Clone, Default)]
pub struct FakeProfileStore {
    profiles: Arc<Mutex<HashMap<IdentityId, Profile>>>,
    failures: Arc<Mutex<VecDeque<ProfileWriteError>>>,
    writes: Arc<AtomicUsize>,
}

impl FakeProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next write fails with `err`; later writes are unaffected
    pub fn fail_next(&self, err: ProfileWriteError) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn get(&self, id: &IdentityId) -> Option<Profile> {
        self.profiles.lock().unwrap().get(id).cloned()
    }

    pub fn snapshot(&self) -> HashMap<IdentityId, Profile> {
        self.profiles.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStore for FakeProfileStore {
    async fn write(&self, id: &IdentityId, profile: &Profile) -> Result<(), ProfileWriteError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        self.profiles
            .lock()
            .unwrap()
            .insert(id.clone(), profile.clone());
        Ok(())
    }
}
