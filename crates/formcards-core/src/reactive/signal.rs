//! Signal - observable value with explicit subscriptions

use core::cell::{Cell, RefCell};
use core::fmt;

extern crate alloc;
use alloc::rc::{Rc, Weak};

type Subscriber = Rc<dyn Fn()>;

struct SignalInner<T> {
	value: RefCell<T>,
	subscribers: RefCell<Vec<(usize, Subscriber)>>,
	next_subscriber: Cell<usize>,
}

/// A reactive value shared between clones.
///
/// `Signal<T>` is a cheap handle around `Rc`; all clones observe and modify the
/// same value. Every [`set`](Signal::set) or [`update`](Signal::update) notifies
/// subscribers in registration order, after the value has been written and all
/// internal borrows have been released, so a subscriber may freely read this or
/// any other signal.
pub struct Signal<T: 'static> {
	inner: Rc<SignalInner<T>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: 'static> Signal<T> {
	/// Create a new signal holding `value`.
	///
	/// # Examples
	///
	/// ```
	/// use formcards_core::Signal;
	///
	/// let count = Signal::new(0);
	/// assert_eq!(count.get(), 0);
	/// ```
	pub fn new(value: T) -> Self {
		Self {
			inner: Rc::new(SignalInner {
				value: RefCell::new(value),
				subscribers: RefCell::new(Vec::new()),
				next_subscriber: Cell::new(0),
			}),
		}
	}

	/// Get a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.inner.value.borrow().clone()
	}

	/// Borrow the current value for the duration of `f`.
	///
	/// Useful for values that are expensive to clone, such as file lists.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.inner.value.borrow())
	}

	/// Replace the value and notify subscribers.
	pub fn set(&self, value: T) {
		*self.inner.value.borrow_mut() = value;
		self.notify();
	}

	/// Mutate the value in place and notify subscribers once.
	///
	/// # Examples
	///
	/// ```
	/// use formcards_core::Signal;
	///
	/// let count = Signal::new(1);
	/// count.update(|n| *n += 1);
	/// assert_eq!(count.get(), 2);
	/// ```
	pub fn update(&self, f: impl FnOnce(&mut T)) {
		f(&mut self.inner.value.borrow_mut());
		self.notify();
	}

	/// Register `f` to run after every write.
	///
	/// The callback stays registered until the returned [`Subscription`] is
	/// dropped or [`Subscription::cancel`] is called.
	pub fn subscribe(&self, f: impl Fn() + 'static) -> Subscription {
		let id = self.inner.next_subscriber.get();
		self.inner.next_subscriber.set(id + 1);
		self.inner.subscribers.borrow_mut().push((id, Rc::new(f)));

		let weak: Weak<SignalInner<T>> = Rc::downgrade(&self.inner);
		Subscription {
			unsubscribe: Some(Box::new(move || {
				if let Some(inner) = weak.upgrade() {
					inner.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
				}
			})),
		}
	}

	/// Number of live subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.inner.subscribers.borrow().len()
	}

	fn notify(&self) {
		// Snapshot first so subscribers can subscribe/unsubscribe while running.
		let subscribers: Vec<Subscriber> = self
			.inner
			.subscribers
			.borrow()
			.iter()
			.map(|(_, f)| Rc::clone(f))
			.collect();
		for subscriber in subscribers {
			subscriber();
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.inner.value.borrow())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

impl<T: Default + 'static> Default for Signal<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

/// Handle that keeps a signal subscription registered.
///
/// Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the callback"]
pub struct Subscription {
	unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Unsubscribe now.
	pub fn cancel(mut self) {
		if let Some(unsubscribe) = self.unsubscribe.take() {
			unsubscribe();
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(unsubscribe) = self.unsubscribe.take() {
			unsubscribe();
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.unsubscribe.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_signal_set_and_get() {
		// Arrange
		let signal = Signal::new(10);

		// Act
		signal.set(42);

		// Assert
		assert_eq!(signal.get(), 42);
	}

	#[rstest]
	fn test_clones_share_value() {
		// Arrange
		let signal = Signal::new(String::from("a"));
		let clone = signal.clone();

		// Act
		clone.set(String::from("b"));

		// Assert
		assert_eq!(signal.get(), "b");
	}

	#[rstest]
	fn test_subscribers_run_on_every_write() {
		// Arrange
		let signal = Signal::new(0);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let observer = signal.clone();
		let log = Rc::clone(&seen);
		let _sub = signal.subscribe(move || log.borrow_mut().push(observer.get()));

		// Act
		signal.set(1);
		signal.update(|n| *n += 5);

		// Assert
		assert_eq!(*seen.borrow(), vec![1, 6]);
	}

	#[rstest]
	fn test_dropping_subscription_unsubscribes() {
		// Arrange
		let signal = Signal::new(0);
		let hits = Rc::new(Cell::new(0));
		let counter = Rc::clone(&hits);
		let sub = signal.subscribe(move || counter.set(counter.get() + 1));
		assert_eq!(signal.subscriber_count(), 1);

		// Act
		drop(sub);
		signal.set(1);

		// Assert
		assert_eq!(signal.subscriber_count(), 0);
		assert_eq!(hits.get(), 0);
	}

	#[rstest]
	fn test_cancel_only_removes_own_subscription() {
		// Arrange
		let signal = Signal::new(0);
		let first = signal.subscribe(|| {});
		let _second = signal.subscribe(|| {});

		// Act
		first.cancel();

		// Assert
		assert_eq!(signal.subscriber_count(), 1);
	}

	#[rstest]
	fn test_subscriber_may_write_other_signal() {
		// Arrange
		let source = Signal::new(2);
		let doubled = Signal::new(0);
		let (src, dst) = (source.clone(), doubled.clone());
		let _sub = source.subscribe(move || dst.set(src.get() * 2));

		// Act
		source.set(21);

		// Assert
		assert_eq!(doubled.get(), 42);
	}
}
