//! Preference store: session owner of the user's study context.
//!
//! # Responsibility
//! - Load the persisted context once and expose `ready` only afterwards.
//! - Apply guarded mutations, persist them, and notify subscribers.
//!
//! # Invariants
//! - Lifecycle is `Uninitialized -> Loading -> Ready`, never backwards.
//! - The first mutator or `subscribe` call on an uninitialized store loads it.
//! - Mutations requested while `Loading` are queued and replayed in call order.
//! - Storage failures never roll back in-memory state and never surface to
//!   callers; they are logged.
//! - Mutation and notification complete within one `&mut self` call.

use crate::catalog::Catalog;
use crate::model::preferences::Preferences;
use crate::prefs::cascade::{apply_mutation, sanitize, Mutation};
use crate::prefs::record::PreferenceRecord;
use crate::storage::KeyValueStore;
use log::{debug, error, info, warn};
use std::collections::BTreeMap;

/// Well-known storage key for the serialized context.
pub const DEFAULT_STORAGE_KEY: &str = "pastpaper.preferences.v1";

/// Construction options for [`PreferenceStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceStoreConfig {
    /// Key the serialized record is stored under.
    pub storage_key: String,
}

impl Default for PreferenceStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Load lifecycle of a preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Uninitialized,
    Loading,
    Ready,
}

/// Result of one mutator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// State changed, was persisted and subscribers were notified.
    Applied,
    /// Accepted, but the context already had this value.
    Unchanged,
    /// Violates ownership; prior state retained.
    Rejected,
    /// Load is in flight; will be replayed once it completes.
    Queued,
}

/// Raw stored value read by [`PreferenceStore::begin_load`].
///
/// Hand it back to [`PreferenceStore::complete_load`] to finish loading.
#[must_use = "a pending load does nothing until passed to complete_load"]
#[derive(Debug)]
pub struct PendingLoad {
    raw: Option<String>,
}

/// Handle returned by [`PreferenceStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Preferences)>;

/// Observable, durable study-context container.
pub struct PreferenceStore<'c, S: KeyValueStore> {
    catalog: &'c Catalog,
    storage: S,
    config: PreferenceStoreConfig,
    state: LoadState,
    current: Preferences,
    queued: Vec<Mutation>,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_subscription: u64,
}

impl<'c, S: KeyValueStore> PreferenceStore<'c, S> {
    /// Creates an uninitialized store using the default storage key.
    pub fn new(catalog: &'c Catalog, storage: S) -> Self {
        Self::with_config(catalog, storage, PreferenceStoreConfig::default())
    }

    pub fn with_config(catalog: &'c Catalog, storage: S, config: PreferenceStoreConfig) -> Self {
        Self {
            catalog,
            storage,
            config,
            state: LoadState::Uninitialized,
            current: Preferences::default(),
            queued: Vec::new(),
            listeners: BTreeMap::new(),
            next_subscription: 0,
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    pub fn config(&self) -> &PreferenceStoreConfig {
        &self.config
    }

    /// Returns an immutable copy of the current context.
    pub fn snapshot(&self) -> Preferences {
        self.current.clone()
    }

    /// Starts the one-shot load by reading the raw stored value.
    ///
    /// Returns `None` when loading already started.
    ///
    /// # Side effects
    /// - Reads durable storage; read failures degrade to "absent".
    pub fn begin_load(&mut self) -> Option<PendingLoad> {
        if self.state != LoadState::Uninitialized {
            return None;
        }
        self.state = LoadState::Loading;
        info!("event=prefs_load module=prefs status=start");

        let raw = match self.storage.get(&self.config.storage_key) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=prefs_load module=prefs status=degraded error_code=storage_read_failed error={}",
                    err
                );
                None
            }
        };
        Some(PendingLoad { raw })
    }

    /// Finishes loading: decodes the stored value, becomes ready, notifies
    /// subscribers, then replays queued mutations.
    pub fn complete_load(&mut self, pending: PendingLoad) {
        if self.state != LoadState::Loading {
            debug!("event=prefs_load module=prefs status=ignored state={:?}", self.state);
            return;
        }

        let restored = pending
            .raw
            .as_deref()
            .and_then(|raw| match PreferenceRecord::decode(raw) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(
                        "event=prefs_load module=prefs status=degraded error_code=prefs_record_invalid error={}",
                        err
                    );
                    None
                }
            });

        let loaded = Preferences {
            university_id: restored.as_ref().and_then(|r| r.university_id.clone()),
            stream_id: restored.as_ref().and_then(|r| r.stream_id.clone()),
            college_id: restored.as_ref().and_then(|r| r.college_id.clone()),
            ready: true,
            revision: self.current.revision,
        };
        // Why: the catalog may have changed since the record was written, so
        // a stored stream/college can now belong to another university.
        let repaired = sanitize(self.catalog, loaded.clone());
        if !repaired.same_context(&loaded) {
            warn!("event=prefs_load module=prefs status=repaired reason=ownership_violation");
            self.persist(&repaired);
        }

        self.current = repaired;
        self.state = LoadState::Ready;
        info!(
            "event=prefs_load module=prefs status=ok restored={} queued={}",
            restored.is_some(),
            self.queued.len()
        );
        self.notify();

        for mutation in std::mem::take(&mut self.queued) {
            self.apply(mutation);
        }
    }

    /// Runs [`begin_load`](Self::begin_load) and
    /// [`complete_load`](Self::complete_load) back to back.
    pub fn load(&mut self) {
        if let Some(pending) = self.begin_load() {
            self.complete_load(pending);
        }
    }

    /// Selects a university, clearing stream/college it does not own.
    pub fn set_university(&mut self, university_id: Option<&str>) -> MutationOutcome {
        self.submit(Mutation::SetUniversity(normalize_id(university_id)))
    }

    /// Selects a stream owned by the current university.
    pub fn set_stream(&mut self, stream_id: Option<&str>) -> MutationOutcome {
        self.submit(Mutation::SetStream(normalize_id(stream_id)))
    }

    /// Selects a college affiliated with the current university.
    pub fn set_college(&mut self, college_id: Option<&str>) -> MutationOutcome {
        self.submit(Mutation::SetCollege(normalize_id(college_id)))
    }

    /// Clears every context field and the stored record.
    pub fn reset(&mut self) -> MutationOutcome {
        self.submit(Mutation::Reset)
    }

    /// Registers a listener called with each new snapshot.
    ///
    /// On an uninitialized store this also runs the load, so the listener
    /// receives the first ready snapshot.
    pub fn subscribe(&mut self, listener: impl FnMut(&Preferences) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        self.load_on_first_access();
        id
    }

    /// Removes a listener; returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn load_on_first_access(&mut self) {
        if self.state == LoadState::Uninitialized {
            debug!("event=prefs_load module=prefs status=triggered reason=first_access");
            self.load();
        }
    }

    fn submit(&mut self, mutation: Mutation) -> MutationOutcome {
        self.load_on_first_access();
        if self.state != LoadState::Ready {
            debug!(
                "event=prefs_mutation module=prefs status=queued field={}",
                mutation.field()
            );
            self.queued.push(mutation);
            return MutationOutcome::Queued;
        }
        self.apply(mutation)
    }

    fn apply(&mut self, mutation: Mutation) -> MutationOutcome {
        let Some(mut next) = apply_mutation(self.catalog, &self.current, &mutation) else {
            debug!(
                "event=prefs_mutation module=prefs status=rejected field={}",
                mutation.field()
            );
            return MutationOutcome::Rejected;
        };
        if next.same_context(&self.current) {
            if mutation == Mutation::Reset {
                // Undecodable records load as defaults but stay in storage.
                self.clear_persisted();
            }
            return MutationOutcome::Unchanged;
        }

        next.revision = self.current.revision + 1;
        if mutation == Mutation::Reset {
            self.clear_persisted();
        } else {
            self.persist(&next);
        }
        self.current = next;
        debug!(
            "event=prefs_mutation module=prefs status=ok field={} revision={}",
            mutation.field(),
            self.current.revision
        );
        self.notify();
        MutationOutcome::Applied
    }

    fn persist(&self, prefs: &Preferences) {
        let encoded = match PreferenceRecord::from_preferences(prefs).encode() {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(
                    "event=prefs_persist module=prefs status=error error_code=prefs_encode_failed error={}",
                    err
                );
                return;
            }
        };
        if let Err(err) = self.storage.set(&self.config.storage_key, &encoded) {
            error!(
                "event=prefs_persist module=prefs status=error error_code=storage_write_failed error={}",
                err
            );
        }
    }

    fn clear_persisted(&self) {
        if let Err(err) = self.storage.remove(&self.config.storage_key) {
            error!(
                "event=prefs_persist module=prefs status=error error_code=storage_remove_failed error={}",
                err
            );
        }
    }

    fn notify(&mut self) {
        let snapshot = self.current.clone();
        for listener in self.listeners.values_mut() {
            listener(&snapshot);
        }
    }
}

fn normalize_id(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{LoadState, MutationOutcome, PreferenceStore};
    use crate::catalog::Catalog;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn starts_uninitialized_and_not_ready() {
        let catalog = Catalog::sample().expect("sample catalog");
        let store = PreferenceStore::new(&catalog, MemoryKeyValueStore::new());
        assert_eq!(store.load_state(), LoadState::Uninitialized);
        assert!(!store.snapshot().ready);
    }

    #[test]
    fn first_mutation_triggers_load() {
        let catalog = Catalog::sample().expect("sample catalog");
        let mut store = PreferenceStore::new(&catalog, MemoryKeyValueStore::new());
        assert_eq!(store.set_university(Some("U1")), MutationOutcome::Applied);
        assert_eq!(store.load_state(), LoadState::Ready);
        assert!(store.snapshot().ready);
    }

    #[test]
    fn begin_load_is_one_shot() {
        let catalog = Catalog::sample().expect("sample catalog");
        let mut store = PreferenceStore::new(&catalog, MemoryKeyValueStore::new());
        let pending = store.begin_load().expect("first begin_load should start loading");
        assert_eq!(store.load_state(), LoadState::Loading);
        assert!(store.begin_load().is_none());
        store.complete_load(pending);
        assert!(store.is_ready());
        assert!(store.begin_load().is_none());
    }

    #[test]
    fn blank_ids_are_treated_as_unset() {
        let catalog = Catalog::sample().expect("sample catalog");
        let mut store = PreferenceStore::new(&catalog, MemoryKeyValueStore::new());
        store.load();
        assert_eq!(store.set_university(Some("U1")), MutationOutcome::Applied);
        assert_eq!(store.set_university(Some("   ")), MutationOutcome::Applied);
        assert_eq!(store.snapshot().university_id, None);
    }

    #[test]
    fn repeated_value_is_unchanged_and_keeps_revision() {
        let catalog = Catalog::sample().expect("sample catalog");
        let mut store = PreferenceStore::new(&catalog, MemoryKeyValueStore::new());
        store.load();
        store.set_university(Some("U1"));
        let revision = store.snapshot().revision;
        assert_eq!(store.set_university(Some("U1")), MutationOutcome::Unchanged);
        assert_eq!(store.snapshot().revision, revision);
    }
}
