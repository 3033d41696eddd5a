//! The default registry behind the crate-root functions.
//!
//! It takes no locks: storage is a `thread_local!` `RefCell`, so every thread
//! works against its own map. Values registered on one thread are invisible to
//! every other thread. Share singletons between threads through a registry
//! declared with [`define_registry!`](crate::define_registry) instead.
//!
//! # Examples
//!
//! ```
//! use singleton_manager::{get, register, try_get, unregister};
//! use std::sync::Arc;
//!
//! let registered = register("Hello, World!".to_string()).unwrap();
//!
//! let message: Arc<String> = get().unwrap();
//! assert!(Arc::ptr_eq(&registered, &message));
//!
//! unregister::<String>().unwrap();
//! assert!(try_get::<String>().is_none());
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::thread::LocalKey;

use crate::{RegistryApi, SingletonMap, TraceSlot};

thread_local! {
    static STORAGE: RefCell<SingletonMap> = RefCell::new(HashMap::new());
    static TRACE: RefCell<TraceSlot> = const { RefCell::new(None) };
}

/// Runs `f` against a thread-local slot.
///
/// Once the thread has started destroying its locals, `f` gets a fresh empty
/// value instead and whatever it stores there is dropped on return.
#[doc(hidden)]
pub fn with_thread_local<T: Default, R>(
    key: &'static LocalKey<RefCell<T>>,
    f: impl FnOnce(&mut T) -> R,
) -> R {
    if key.try_with(|_| ()).is_err() {
        return f(&mut T::default());
    }
    key.with_borrow_mut(f)
}

/// Handle to the default, per-thread registry.
///
/// Entries still registered when a thread exits are dropped with its locals.
/// A `Drop` impl that reaches the registry during that teardown sees an empty
/// registry, and anything it registers is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRegistry;

impl RegistryApi for LocalRegistry {
    fn with_storage<R>(f: impl FnOnce(&mut SingletonMap) -> R) -> R {
        with_thread_local(&STORAGE, f)
    }

    fn with_trace<R>(f: impl FnOnce(&mut TraceSlot) -> R) -> R {
        with_thread_local(&TRACE, f)
    }
}

/// The default registry, for trait-based access.
pub const REGISTRY: LocalRegistry = LocalRegistry;

crate::__registry_free_functions!(REGISTRY);

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
