//! # Singleton Manager
//!
//! A type-keyed singleton registry: at most one instance per type, looked up by
//! type instead of being passed down call chains.
//!
//! Every operation comes in a strict and a lenient form, so initialization code
//! can fail loudly on wiring mistakes while optional lookups treat absence as a
//! normal branch:
//!
//! | strict (returns `Result`) | lenient (never fails) |
//! |---|---|
//! | [`register`] | [`register_or_replace`] |
//! | [`get`] | [`try_get`] |
//! | [`unregister`] | [`try_unregister`] |
//!
//! ## Quick Start
//!
//! ```rust
//! use singleton_manager::{get, register, RegistryError};
//! use std::sync::Arc;
//!
//! register("Hello, World!".to_string()).unwrap();
//!
//! let message: Arc<String> = get().unwrap();
//! assert_eq!(&*message, "Hello, World!");
//!
//! assert!(matches!(
//!     register("again".to_string()),
//!     Err(RegistryError::AlreadyRegistered { .. })
//! ));
//! ```
//!
//! ## Threading
//!
//! The crate-root functions use the default registry, [`LocalRegistry`], which
//! takes no locks and keeps **one map per thread**. A value registered on one
//! thread cannot be seen from another. For singletons shared across threads,
//! declare a synchronized registry with [`define_registry!`].
//!
//! ## Self-registration
//!
//! Types implementing [`Singleton`] (usually through [`singleton!`]) register
//! themselves from their constructor with [`register_self`], which refuses
//! mis-declared types and duplicates.
//!
//! ## Observability
//!
//! Every registry carries an optional trace callback receiving
//! [`RegistryEvent`]s, and all operations log through `tracing`.

mod macros;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;
mod singleton;

pub use registry::{
    clear, clear_trace_callback, create_and_register, get, get_cloned, has_been_registered,
    register, register_arc, register_or_replace, register_or_replace_arc, register_self,
    set_trace_callback, try_get, try_unregister, unregister, LocalRegistry, REGISTRY,
};
#[doc(hidden)]
pub use registry::with_thread_local;
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_trait::{RegistryApi, SingletonMap, TraceCallback, TraceSlot};
pub use singleton::Singleton;
