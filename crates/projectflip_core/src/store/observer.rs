//! Change notification for store collections.
//!
//! # Responsibility
//! - Register per-collection listeners and hand them new snapshots.
//!
//! # Invariants
//! - Listeners only ever see fully swapped-in snapshots.
//! - Listeners run in registration order.
//! - A removed subscription is never called again.

use crate::model::client::Client;
use crate::model::contact::ContactSubmission;
use crate::model::project::Project;
use crate::model::subscriber::Subscriber;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Immutable view of one collection, replaced wholesale on each mutation.
pub type Snapshot<T> = Arc<[T]>;

/// The four independent collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Projects,
    Clients,
    Contacts,
    Subscribers,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Projects,
        Collection::Clients,
        Collection::Contacts,
        Collection::Subscribers,
    ];

    /// Stable name used in log events and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Clients => "clients",
            Self::Contacts => "contacts",
            Self::Subscribers => "subscribers",
        }
    }

    /// Inverse of [`Collection::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|collection| collection.as_str() == value)
    }
}

/// New snapshot of the collection touched by one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Projects(Snapshot<Project>),
    Clients(Snapshot<Client>),
    Contacts(Snapshot<ContactSubmission>),
    Subscribers(Snapshot<Subscriber>),
}

impl StoreChange {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Projects(_) => Collection::Projects,
            Self::Clients(_) => Collection::Clients,
            Self::Contacts(_) => Collection::Contacts,
            Self::Subscribers(_) => Collection::Subscribers,
        }
    }

    /// Record count of the new snapshot.
    pub fn len(&self) -> usize {
        match self {
            Self::Projects(items) => items.len(),
            Self::Clients(items) => items.len(),
            Self::Contacts(items) => items.len(),
            Self::Subscribers(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by `EntityStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreChange)>;

struct ListenerEntry {
    id: SubscriptionId,
    collection: Collection,
    listener: Listener,
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    entries: Vec<ListenerEntry>,
}

impl ListenerRegistry {
    pub(crate) fn register(&mut self, collection: Collection, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push(ListenerEntry {
            id,
            collection,
            listener,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Calls every listener registered for the changed collection.
    ///
    /// Returns how many listeners were notified.
    pub(crate) fn notify(&mut self, change: &StoreChange) -> usize {
        let collection = change.collection();
        let mut notified = 0;
        for entry in self
            .entries
            .iter_mut()
            .filter(|entry| entry.collection == collection)
        {
            (entry.listener)(change);
            notified += 1;
        }
        notified
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Debug for ListenerRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("next_id", &self.next_id)
            .field("listeners", &self.entries.len())
            .finish()
    }
}
