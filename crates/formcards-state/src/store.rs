//! Application state container
//!
//! [`AppStore`] is the single entry point for reading and mutating session
//! state. Writes take an exclusive lock, release it, and only then notify
//! subscribers, so listeners may call back into the store.

use crate::country::CountryStore;
use crate::submission::{NewSubmission, Submission, SubmissionId, SubmissionStore};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};

/// Everything the UI shell reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
	pub form: SubmissionStore,
	pub country: Arc<CountryStore>,
}

impl AppState {
	pub fn new(countries: CountryStore) -> Self {
		Self {
			form: SubmissionStore::new(),
			country: Arc::new(countries),
		}
	}
}

/// What changed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
	SubmissionAdded(SubmissionId),
	SubmissionRemoved(SubmissionId),
	NewSubmissionMarkerCleared,
}

type Listener = Arc<dyn Fn(StoreEvent) + Send + Sync>;
type ListenerList = Mutex<Vec<(usize, Listener)>>;

/// Cloneable handle to the shared [`AppState`].
#[derive(Clone)]
pub struct AppStore {
	state: Arc<RwLock<AppState>>,
	listeners: Arc<ListenerList>,
	next_listener: Arc<Mutex<usize>>,
}

impl Default for AppStore {
	fn default() -> Self {
		Self::new(CountryStore::reference())
	}
}

impl std::fmt::Debug for AppStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppStore")
			.field("state", &*self.state.read())
			.field("listeners", &self.listeners.lock().len())
			.finish()
	}
}

impl AppStore {
	pub fn new(countries: CountryStore) -> Self {
		Self::from_state(AppState::new(countries))
	}

	pub fn from_state(state: AppState) -> Self {
		Self {
			state: Arc::new(RwLock::new(state)),
			listeners: Arc::new(Mutex::new(Vec::new())),
			next_listener: Arc::new(Mutex::new(0)),
		}
	}

	/// Commit a validated submission. Returns the id it was stored under.
	pub fn add_submission(&self, new: NewSubmission) -> SubmissionId {
		let form_type = new.form_type;
		let id = self.state.write().form.add(new);
		tracing::info!(submission_id = %id, %form_type, "submission added");
		self.emit(StoreEvent::SubmissionAdded(id));
		id
	}

	/// Remove a submission. Unknown ids are a no-op and emit nothing.
	pub fn remove_submission(&self, id: &SubmissionId) -> Option<Submission> {
		let removed = self.state.write().form.remove(id);
		match &removed {
			Some(_) => {
				tracing::info!(submission_id = %id, "submission removed");
				self.emit(StoreEvent::SubmissionRemoved(*id));
			}
			None => tracing::debug!(submission_id = %id, "remove ignored, no such submission"),
		}
		removed
	}

	pub fn clear_new_submission_marker(&self) {
		self.state.write().form.clear_new_submission_marker();
		self.emit(StoreEvent::NewSubmissionMarkerCleared);
	}

	pub fn submissions(&self) -> Vec<Submission> {
		self.state.read().form.submissions().to_vec()
	}

	pub fn submission(&self, id: &SubmissionId) -> Option<Submission> {
		self.state.read().form.get(id).cloned()
	}

	pub fn new_submission_id(&self) -> Option<SubmissionId> {
		self.state.read().form.new_submission_id()
	}

	pub fn is_new(&self, id: &SubmissionId) -> bool {
		self.state.read().form.is_new(id)
	}

	/// Current country snapshot. Cheap: the list is shared, never copied.
	pub fn countries(&self) -> Arc<CountryStore> {
		Arc::clone(&self.state.read().country)
	}

	/// Owned copy of the whole state, e.g. for serialization.
	pub fn snapshot(&self) -> AppState {
		self.state.read().clone()
	}

	/// Call `listener` after every successful mutation.
	pub fn subscribe<F>(&self, listener: F) -> StoreSubscription
	where
		F: Fn(StoreEvent) + Send + Sync + 'static,
	{
		let id = {
			let mut next = self.next_listener.lock();
			let id = *next;
			*next += 1;
			id
		};
		self.listeners.lock().push((id, Arc::new(listener)));
		StoreSubscription {
			id,
			listeners: Arc::downgrade(&self.listeners),
		}
	}

	fn emit(&self, event: StoreEvent) {
		let listeners: Vec<Listener> = self
			.listeners
			.lock()
			.iter()
			.map(|(_, l)| Arc::clone(l))
			.collect();
		for listener in listeners {
			listener(event);
		}
	}
}

/// Keeps a store listener registered until dropped.
#[must_use = "dropping a StoreSubscription immediately unsubscribes the listener"]
#[derive(Debug)]
pub struct StoreSubscription {
	id: usize,
	listeners: Weak<ListenerList>,
}

impl Drop for StoreSubscription {
	fn drop(&mut self) {
		if let Some(listeners) = self.listeners.upgrade() {
			listeners.lock().retain(|(id, _)| *id != self.id);
		}
	}
}
