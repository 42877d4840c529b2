use chrono::{TimeZone, Utc};
use formcards_state::{
	AppState, AppStore, Country, CountryStore, FormType, NewSubmission, SubmissionId,
};
use rstest::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn submission(name: &str, form_type: FormType) -> NewSubmission {
	NewSubmission {
		name: name.to_string(),
		age: 30,
		email: "jane@example.com".to_string(),
		password: "Secret#123".to_string(),
		confirm_password: "Secret#123".to_string(),
		gender: "female".to_string(),
		accept_terms: true,
		profile_picture: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
		country: "Russia".to_string(),
		created_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
		form_type,
	}
}

#[fixture]
fn store() -> AppStore {
	AppStore::new(CountryStore::new(vec![
		Country::new("US", "USA"),
		Country::new("RU", "Russia"),
	]))
}

#[rstest]
fn identical_submissions_get_distinct_ids(store: AppStore) {
	// Arrange
	let first = submission("Jane", FormType::Uncontrolled);

	// Act
	let a = store.add_submission(first.clone());
	let b = store.add_submission(first);

	// Assert
	assert_ne!(a, b);
	assert_eq!(store.submissions().len(), 2);
	assert_eq!(store.new_submission_id(), Some(b));
	assert!(!store.is_new(&a));
}

#[rstest]
fn removing_unknown_id_leaves_state_alone(store: AppStore) {
	// Arrange
	let id = store.add_submission(submission("Jane", FormType::Controlled));
	let notified = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&notified);
	let _sub = store.subscribe(move |_| {
		counter.fetch_add(1, Ordering::SeqCst);
	});

	// Act
	let removed = store.remove_submission(&SubmissionId::new(42));

	// Assert
	assert!(removed.is_none());
	assert_eq!(store.submissions().len(), 1);
	assert_eq!(store.new_submission_id(), Some(id));
	assert_eq!(notified.load(Ordering::SeqCst), 0);
}

#[rstest]
fn marker_lifecycle(store: AppStore) {
	// Arrange
	let id = store.add_submission(submission("Jane", FormType::Controlled));

	// Act
	store.clear_new_submission_marker();

	// Assert
	assert_eq!(store.new_submission_id(), None);
	assert!(store.submission(&id).is_some());
}

#[rstest]
fn countries_are_sorted_for_readers(store: AppStore) {
	let names: Vec<_> = store.countries().iter().map(|c| c.name.clone()).collect();
	assert_eq!(names, ["Russia", "USA"]);
}

#[rstest]
fn snapshot_round_trips_through_json(store: AppStore) {
	// Arrange
	store.add_submission(submission("Jane", FormType::Uncontrolled));

	// Act
	let json = serde_json::to_string(&store.snapshot()).unwrap();
	let restored: AppState = serde_json::from_str(&json).unwrap();

	// Assert
	let restored = AppStore::from_state(restored);
	let entry = &restored.submissions()[0];
	assert_eq!(entry.name, "Jane");
	assert_eq!(entry.form_type, FormType::Uncontrolled);
	assert_eq!(entry.created_at, Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap());
	assert_eq!(restored.countries().len(), 2);
}
