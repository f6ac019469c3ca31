//! In-memory entity store.
//!
//! # Responsibility
//! - Own the project, client, contact and subscriber collections.
//! - Provide the only sanctioned mutators and publish new snapshots.
//!
//! # Invariants
//! - Every mutation replaces exactly one collection snapshot in one step.
//! - Ids are unique per collection and never reissued, even after deletion.
//! - Timestamps are assigned once at creation from wall-clock time.
//! - Mutators never fail; deleting an unknown id is a silent no-op.

use crate::config::{ConfigError, SeedMode, StoreConfig};
use crate::model::client::{Client, NewClient};
use crate::model::contact::{ContactSubmission, NewContact};
use crate::model::id::{now_epoch_ms, EntityId};
use crate::model::project::{NewProject, Project};
use crate::model::subscriber::Subscriber;
use crate::model::Record;
use crate::seed::{seed_clients, seed_projects};
use crate::store::observer::{Collection, ListenerRegistry, Snapshot, StoreChange, SubscriptionId};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::iter;
use std::sync::Arc;

/// Ids that were issued once but whose records are gone.
///
/// Kept so a restored store never hands them out again. Each list is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RetiredIds {
    pub projects: Vec<EntityId>,
    pub clients: Vec<EntityId>,
    pub contacts: Vec<EntityId>,
    pub subscribers: Vec<EntityId>,
}

impl RetiredIds {
    pub fn get(&self, collection: Collection) -> &[EntityId] {
        match collection {
            Collection::Projects => &self.projects,
            Collection::Clients => &self.clients,
            Collection::Contacts => &self.contacts,
            Collection::Subscribers => &self.subscribers,
        }
    }

    pub fn get_mut(&mut self, collection: Collection) -> &mut Vec<EntityId> {
        match collection {
            Collection::Projects => &mut self.projects,
            Collection::Clients => &mut self.clients,
            Collection::Contacts => &mut self.contacts,
            Collection::Subscribers => &mut self.subscribers,
        }
    }

    pub fn is_empty(&self) -> bool {
        Collection::ALL
            .iter()
            .all(|collection| self.get(*collection).is_empty())
    }
}

/// Owned copy of all four collections plus retired ids.
///
/// Used to hand state to a `SnapshotRepository` and to rebuild a store from it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    pub projects: Vec<Project>,
    pub clients: Vec<Client>,
    pub contacts: Vec<ContactSubmission>,
    pub subscribers: Vec<Subscriber>,
    #[serde(default)]
    pub retired_ids: RetiredIds,
}

impl StoreState {
    /// State of a fresh store: seed projects and clients, nothing else.
    pub fn seeded() -> Self {
        Self {
            projects: seed_projects(),
            clients: seed_clients(),
            ..Self::default()
        }
    }

    /// Ids of the records currently held in `collection`, in order.
    pub fn live_ids(&self, collection: Collection) -> Vec<EntityId> {
        match collection {
            Collection::Projects => collect_ids(&self.projects),
            Collection::Clients => collect_ids(&self.clients),
            Collection::Contacts => collect_ids(&self.contacts),
            Collection::Subscribers => collect_ids(&self.subscribers),
        }
    }
}

/// Process-local store owned by the UI root.
///
/// Readers take cheap `Snapshot` handles; mutators take `&mut self`, so the
/// single-writer rule is enforced by the borrow checker.
#[derive(Debug)]
pub struct EntityStore {
    config: StoreConfig,
    projects: Snapshot<Project>,
    clients: Snapshot<Client>,
    contacts: Snapshot<ContactSubmission>,
    subscribers: Snapshot<Subscriber>,
    issued: HashMap<Collection, HashSet<EntityId>>,
    listeners: ListenerRegistry,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    /// Creates a store with seed projects and clients and default options.
    pub fn new() -> Self {
        Self::build(StoreState::seeded(), StoreConfig::default())
    }

    /// Creates a store using explicit options.
    ///
    /// # Errors
    /// - Returns `ConfigError` when `config` fails validation.
    pub fn with_config(config: StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = match config.seed {
            SeedMode::Fixtures => StoreState::seeded(),
            SeedMode::Empty => StoreState::default(),
        };
        Ok(Self::build(state, config))
    }

    /// Rebuilds a store from previously captured state.
    ///
    /// `config.seed` is ignored; every loaded id, live or retired, counts as
    /// already issued.
    ///
    /// # Errors
    /// - Returns `ConfigError` when `config` fails validation.
    pub fn from_state(state: StoreState, config: StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(state, config))
    }

    fn build(state: StoreState, config: StoreConfig) -> Self {
        let issued: HashMap<Collection, HashSet<EntityId>> = Collection::ALL
            .iter()
            .map(|collection| {
                let ids = state
                    .live_ids(*collection)
                    .into_iter()
                    .chain(state.retired_ids.get(*collection).iter().cloned())
                    .collect();
                (*collection, ids)
            })
            .collect();

        info!(
            "event=store_init module=store status=ok projects={} clients={} contacts={} subscribers={} retired={}",
            state.projects.len(),
            state.clients.len(),
            state.contacts.len(),
            state.subscribers.len(),
            Collection::ALL
                .iter()
                .map(|collection| state.retired_ids.get(*collection).len())
                .sum::<usize>()
        );

        Self {
            config,
            projects: state.projects.into(),
            clients: state.clients.into(),
            contacts: state.contacts.into(),
            subscribers: state.subscribers.into(),
            issued,
            listeners: ListenerRegistry::default(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn projects(&self) -> Snapshot<Project> {
        Arc::clone(&self.projects)
    }

    pub fn clients(&self) -> Snapshot<Client> {
        Arc::clone(&self.clients)
    }

    pub fn contacts(&self) -> Snapshot<ContactSubmission> {
        Arc::clone(&self.contacts)
    }

    pub fn subscribers(&self) -> Snapshot<Subscriber> {
        Arc::clone(&self.subscribers)
    }

    /// Copies all four collections and the retired ids into a `StoreState`.
    pub fn state(&self) -> StoreState {
        let mut state = StoreState {
            projects: self.projects.to_vec(),
            clients: self.clients.to_vec(),
            contacts: self.contacts.to_vec(),
            subscribers: self.subscribers.to_vec(),
            retired_ids: RetiredIds::default(),
        };

        for collection in Collection::ALL {
            let live: HashSet<EntityId> = state.live_ids(collection).into_iter().collect();
            let mut retired: Vec<EntityId> = self
                .issued
                .get(&collection)
                .into_iter()
                .flatten()
                .filter(|id| !live.contains(*id))
                .cloned()
                .collect();
            retired.sort();
            *state.retired_ids.get_mut(collection) = retired;
        }

        state
    }

    /// Appends a project and returns its generated id.
    pub fn add_project(&mut self, project: NewProject) -> EntityId {
        let id = self.issue_id(Collection::Projects);
        self.projects = appended(&self.projects, project.into_project(id.clone()));
        self.log_added(Collection::Projects, &id, self.projects.len());
        self.publish(StoreChange::Projects(self.projects()));
        id
    }

    /// Removes the project with `id`, if any.
    ///
    /// Returns whether a record was removed. Unknown ids leave the current
    /// snapshot in place and notify nobody.
    pub fn delete_project(&mut self, id: &str) -> bool {
        match without(&self.projects, id) {
            Some((next, removed)) => {
                self.projects = next;
                debug!(
                    "{}",
                    delete_event(Collection::Projects, Some(removed.id()), id, self.projects.len())
                );
                self.publish(StoreChange::Projects(self.projects()));
                true
            }
            None => {
                debug!(
                    "{}",
                    delete_event(Collection::Projects, None, id, self.projects.len())
                );
                false
            }
        }
    }

    /// Appends a client testimonial and returns its generated id.
    pub fn add_client(&mut self, client: NewClient) -> EntityId {
        let id = self.issue_id(Collection::Clients);
        self.clients = appended(&self.clients, client.into_client(id.clone()));
        self.log_added(Collection::Clients, &id, self.clients.len());
        self.publish(StoreChange::Clients(self.clients()));
        id
    }

    /// Removes the client with `id`, if any. Same contract as `delete_project`.
    pub fn delete_client(&mut self, id: &str) -> bool {
        match without(&self.clients, id) {
            Some((next, removed)) => {
                self.clients = next;
                debug!(
                    "{}",
                    delete_event(Collection::Clients, Some(removed.id()), id, self.clients.len())
                );
                self.publish(StoreChange::Clients(self.clients()));
                true
            }
            None => {
                debug!(
                    "{}",
                    delete_event(Collection::Clients, None, id, self.clients.len())
                );
                false
            }
        }
    }

    /// Records a contact form submission stamped with the current time.
    pub fn add_contact(&mut self, contact: NewContact) -> EntityId {
        let id = self.issue_id(Collection::Contacts);
        let submission = contact.into_submission(id.clone(), now_epoch_ms());
        self.contacts = appended(&self.contacts, submission);
        self.log_added(Collection::Contacts, &id, self.contacts.len());
        self.publish(StoreChange::Contacts(self.contacts()));
        id
    }

    /// Records a newsletter sign-up. Repeated emails create separate records.
    pub fn add_subscriber(&mut self, email: impl Into<String>) -> EntityId {
        let id = self.issue_id(Collection::Subscribers);
        let subscriber = Subscriber {
            id: id.clone(),
            email: email.into(),
            subscribed_at: now_epoch_ms(),
        };
        self.subscribers = appended(&self.subscribers, subscriber);
        self.log_added(Collection::Subscribers, &id, self.subscribers.len());
        self.publish(StoreChange::Subscribers(self.subscribers()));
        id
    }

    /// Registers `listener` for changes to one collection.
    ///
    /// The listener runs synchronously inside each effective mutation, after
    /// the new snapshot is in place.
    pub fn subscribe<F>(&mut self, collection: Collection, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange) + 'static,
    {
        let id = self.listeners.register(collection, Box::new(listener));
        debug!(
            "event=listener_add module=store status=ok collection={} listeners={}",
            collection.as_str(),
            self.listeners.len()
        );
        id
    }

    /// Removes a listener. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    fn issue_id(&mut self, collection: Collection) -> EntityId {
        let length = self.config.id_length;
        let issued = self.issued.entry(collection).or_default();
        let mut attempts: u32 = 1;
        loop {
            let candidate = EntityId::generate(length);
            if issued.insert(candidate.clone()) {
                if attempts > 1 {
                    warn!(
                        "event=id_collision module=store status=ok collection={} attempts={}",
                        collection.as_str(),
                        attempts
                    );
                }
                return candidate;
            }
            attempts += 1;
        }
    }

    fn publish(&mut self, change: StoreChange) {
        let notified = self.listeners.notify(&change);
        if notified > 0 {
            debug!(
                "event=store_notify module=store status=ok collection={} listeners={}",
                change.collection().as_str(),
                notified
            );
        }
    }

    fn log_added(&self, collection: Collection, id: &EntityId, count: usize) {
        debug!(
            "event=entity_add module=store status=ok collection={} id={} count={}",
            collection.as_str(),
            id,
            count
        );
    }

}

/// Log line for one delete call.
///
/// Only store-issued ids are written; an id that matched nothing is caller
/// text and is reduced to its length.
fn delete_event(
    collection: Collection,
    removed: Option<&EntityId>,
    requested: &str,
    count: usize,
) -> String {
    match removed {
        Some(id) => format!(
            "event=entity_delete module=store status=ok collection={} id={} count={}",
            collection.as_str(),
            id,
            count
        ),
        None => format!(
            "event=entity_delete module=store status=noop collection={} requested_len={} count={}",
            collection.as_str(),
            requested.chars().count(),
            count
        ),
    }
}

fn collect_ids<T: Record>(items: &[T]) -> Vec<EntityId> {
    items.iter().map(|item| item.id().clone()).collect()
}

fn appended<T: Clone>(current: &[T], item: T) -> Snapshot<T> {
    current.iter().cloned().chain(iter::once(item)).collect()
}

/// Returns a snapshot without the first record matching `id` together with
/// the removed record, or `None` when nothing matched.
fn without<T: Record + Clone>(current: &[T], id: &str) -> Option<(Snapshot<T>, T)> {
    let position = current.iter().position(|item| item.id() == id)?;
    let next = current
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != position)
        .map(|(_, item)| item.clone())
        .collect();
    Some((next, current[position].clone()))
}
