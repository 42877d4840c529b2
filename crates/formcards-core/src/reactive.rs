//! Reactive state primitives
//!
//! A small reactive layer: a [`Signal`] owns a value and a list of
//! subscribers that run synchronously after every write. There is no scheduler
//! and no automatic dependency tracking; whoever needs to react to a signal
//! subscribes to it explicitly and keeps the returned [`Subscription`] alive.
//!
//! ## Example
//!
//! ```
//! use formcards_core::reactive::Signal;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let name = Signal::new(String::new());
//! let writes = Rc::new(Cell::new(0));
//!
//! let counter = writes.clone();
//! let _sub = name.subscribe(move || counter.set(counter.get() + 1));
//!
//! name.set("John".to_string());
//! assert_eq!(name.get(), "John");
//! assert_eq!(writes.get(), 1);
//! ```

mod signal;

pub use signal::{Signal, Subscription};
