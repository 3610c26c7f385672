//! Item-to-state repository.
//!
//! Owns the review map, runs ratings through the [`Scheduler`], mirrors every
//! change into a [`KeyValueStore`] and broadcasts the full map to subscribers.

use crate::config::DEFAULT_STORAGE_KEY;
use crate::database::KeyValueStore;
use crate::error::Result;
use crate::export::json::{decode_snapshot, encode_snapshot};
use crate::models::{Clock, Rating, ReviewMap, ReviewState, Scheduler, SystemClock};
use chrono::{DateTime, Utc};

/// Handle returned by [`Repository::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ReviewMap) + Send>;

pub struct Repository<S: KeyValueStore> {
    items: ReviewMap,
    store: S,
    scheduler: Scheduler,
    clock: Box<dyn Clock + Send + Sync>,
    key: String,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> Repository<S> {
    /// Loads the map stored under the default key, using the system clock.
    pub fn open(store: S, scheduler: Scheduler) -> Result<Self> {
        Self::open_with(store, scheduler, SystemClock, DEFAULT_STORAGE_KEY)
    }

    pub fn open_with_clock<C>(store: S, scheduler: Scheduler, clock: C) -> Result<Self>
    where
        C: Clock + Send + Sync + 'static,
    {
        Self::open_with(store, scheduler, clock, DEFAULT_STORAGE_KEY)
    }

    /// Loads the map stored under `key`.
    ///
    /// A blob that fails to parse is logged and replaced by an empty map; only
    /// errors from the store itself are returned.
    pub fn open_with<C>(store: S, scheduler: Scheduler, clock: C, key: &str) -> Result<Self>
    where
        C: Clock + Send + Sync + 'static,
    {
        let items = match store.load(key)? {
            Some(blob) => match decode_snapshot(&blob) {
                Ok(items) => items,
                Err(e) => {
                    tracing::error!(key, error = %e, "Failed to parse SRS data, starting empty");
                    ReviewMap::new()
                }
            },
            None => ReviewMap::new(),
        };
        tracing::info!(key, items = items.len(), "Loaded review data");

        Ok(Self {
            items,
            store,
            scheduler,
            clock: Box::new(clock),
            key: key.to_string(),
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Adds `id` as a fresh item due immediately. Re-adding resets its progress.
    pub fn add_word(&mut self, id: &str) -> Result<()> {
        let now = self.clock.now();
        let mut next = self.items.clone();
        next.insert(id.to_string(), ReviewState::new(now));
        self.commit(next)?;
        tracing::debug!(id, "Added item");
        Ok(())
    }

    /// Applies `rating` to `id` and returns the new state.
    ///
    /// An id that was never added is reviewed from the default state.
    pub fn review(&mut self, id: &str, rating: Rating) -> Result<ReviewState> {
        let now = self.clock.now();
        let current = self.state_or_default(id, now);
        let reviewed = self.scheduler.calculate_next_review(&current, rating, now);

        let mut next = self.items.clone();
        next.insert(id.to_string(), reviewed.clone());
        self.commit(next)?;

        tracing::debug!(
            id,
            ?rating,
            interval = reviewed.interval,
            repetition = reviewed.repetition,
            due = %reviewed.due_date,
            "Reviewed item"
        );
        Ok(reviewed)
    }

    /// Current state of `id`, or the default state due at `now` if untracked.
    pub fn state_or_default(&self, id: &str, now: DateTime<Utc>) -> ReviewState {
        match self.items.get(id) {
            Some(state) => state.clone(),
            None => {
                tracing::debug!(id, "Item not tracked, using default state");
                ReviewState::new(now)
            }
        }
    }

    pub fn is_due(&self, id: &str, snapshot: &ReviewMap) -> bool {
        is_due_at(snapshot, id, self.clock.now())
    }

    /// Ids in `snapshot` that are due, all checked against one clock read.
    pub fn get_all_due(&self, snapshot: &ReviewMap) -> Vec<String> {
        due_at(snapshot, self.clock.now())
    }

    /// Removes every item and the persisted copy.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.remove(&self.key)?;
        let cleared = self.items.len();
        self.items.clear();
        self.notify();
        tracing::info!(key = %self.key, cleared, "Cleared all review data");
        Ok(())
    }

    /// Registers `callback`. It is called right away with the current map and
    /// then once after every mutation.
    pub fn subscribe<F>(&mut self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(&ReviewMap) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        callback(&self.items);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&ReviewState> {
        self.items.get(id)
    }

    pub fn snapshot(&self) -> &ReviewMap {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persists `next` and only then makes it the current map.
    fn commit(&mut self, next: ReviewMap) -> Result<()> {
        let blob = encode_snapshot(&next)?;
        self.store.save(&self.key, &blob)?;
        self.items = next;
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.items);
        }
    }
}

/// Whether `id` is tracked in `snapshot` and due at `now`.
pub fn is_due_at(snapshot: &ReviewMap, id: &str, now: DateTime<Utc>) -> bool {
    snapshot.get(id).is_some_and(|state| state.is_due_at(now))
}

/// Ids in `snapshot` due at `now`, in key order.
pub fn due_at(snapshot: &ReviewMap, now: DateTime<Utc>) -> Vec<String> {
    snapshot
        .iter()
        .filter(|(_, state)| state.is_due_at(now))
        .map(|(id, _)| id.clone())
        .collect()
}
