//! Macros for declaring registries and singleton types.
//!
//! - [`define_registry!`](crate::define_registry) creates a process-wide registry
//!   guarded by a `Mutex`.
//! - [`define_local_registry!`](crate::define_local_registry) creates a lock-free
//!   registry with one map per thread, like the crate-root registry.
//! - [`singleton!`](crate::singleton) implements [`Singleton`](crate::Singleton)
//!   for a type.

/// Creates a process-wide, synchronized singleton registry.
///
/// The macro generates a module containing:
/// - Storage and trace callback statics (hidden), each behind a `Mutex`
/// - An `Api` struct that implements `RegistryApi`, plus an `API` constant
/// - Free functions delegating to `API`
///
/// This is the registry to reach for when singletons are shared between threads.
/// Lock poisoning is recovered, and no user code (drops, trace callbacks) runs
/// while the lock is held.
///
/// # Examples
///
/// ```rust
/// use singleton_manager::define_registry;
/// use std::sync::Arc;
///
/// define_registry!(global);
///
/// global::register(42i32).unwrap();
/// global::register("Hello".to_string()).unwrap();
///
/// let num: Arc<i32> = global::get().unwrap();
/// let msg: Arc<String> = global::get().unwrap();
///
/// assert_eq!(*num, 42);
/// assert_eq!(&**msg, "Hello");
///
/// // A second registration of the same type is refused.
/// assert!(global::register(7i32).is_err());
/// ```
///
/// # Multiple Registries
///
/// ```rust
/// use singleton_manager::define_registry;
///
/// define_registry!(database);
/// define_registry!(cache);
///
/// database::register("db_connection".to_string()).unwrap();
/// cache::register("redis_connection".to_string()).unwrap();
///
/// assert_eq!(&*database::get::<String>().unwrap(), "db_connection");
/// assert_eq!(&*cache::get::<String>().unwrap(), "redis_connection");
/// ```
///
/// # Trait-Based Usage
///
/// ```rust
/// use singleton_manager::{define_registry, RegistryApi};
/// use std::sync::Arc;
///
/// define_registry!(app);
///
/// app::API.register(100i32).unwrap();
/// let value: Arc<i32> = app::API.get().unwrap();
/// assert_eq!(app::API.len(), 1);
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::collections::HashMap;
            use std::sync::{LazyLock, Mutex, PoisonError};

            static STORAGE: LazyLock<Mutex<$crate::SingletonMap>> =
                LazyLock::new(|| Mutex::new(HashMap::new()));

            static TRACE: Mutex<$crate::TraceSlot> = Mutex::new(None);

            /// Zero-sized handle to this registry.
            #[derive(Debug, Clone, Copy, Default)]
            pub struct Api;

            impl $crate::RegistryApi for Api {
                fn with_storage<R>(f: impl FnOnce(&mut $crate::SingletonMap) -> R) -> R {
                    f(&mut *STORAGE.lock().unwrap_or_else(PoisonError::into_inner))
                }

                fn with_trace<R>(f: impl FnOnce(&mut $crate::TraceSlot) -> R) -> R {
                    f(&mut *TRACE.lock().unwrap_or_else(PoisonError::into_inner))
                }
            }

            /// Handle for trait-based access.
            pub const API: Api = Api;

            $crate::__registry_free_functions!(API);
        }
    };
}

/// Creates a lock-free singleton registry with one map per thread.
///
/// Same surface as [`define_registry!`](crate::define_registry), but the storage is
/// a `thread_local!` `RefCell`: values registered on one thread are not visible
/// on any other thread. Entries left at thread exit are dropped with the thread's
/// locals; registry calls made from those drops see an empty registry.
///
/// ```rust
/// use singleton_manager::define_local_registry;
///
/// define_local_registry!(scratch);
///
/// scratch::register(1u8).unwrap();
/// assert!(scratch::has_been_registered::<u8>());
///
/// let seen_elsewhere = std::thread::spawn(|| scratch::has_been_registered::<u8>())
///     .join()
///     .unwrap();
/// assert!(!seen_elsewhere);
/// ```
#[macro_export]
macro_rules! define_local_registry {
    ($name:ident) => {
        pub mod $name {
            use std::cell::RefCell;
            use std::collections::HashMap;

            thread_local! {
                static STORAGE: RefCell<$crate::SingletonMap> = RefCell::new(HashMap::new());
                static TRACE: RefCell<$crate::TraceSlot> = const { RefCell::new(None) };
            }

            /// Zero-sized handle to this registry.
            #[derive(Debug, Clone, Copy, Default)]
            pub struct Api;

            impl $crate::RegistryApi for Api {
                fn with_storage<R>(f: impl FnOnce(&mut $crate::SingletonMap) -> R) -> R {
                    $crate::with_thread_local(&STORAGE, f)
                }

                fn with_trace<R>(f: impl FnOnce(&mut $crate::TraceSlot) -> R) -> R {
                    $crate::with_thread_local(&TRACE, f)
                }
            }

            /// Handle for trait-based access.
            pub const API: Api = Api;

            $crate::__registry_free_functions!(API);
        }
    };
}

/// Implements [`Singleton`](crate::Singleton) for a type, declaring it under itself.
///
/// ```rust
/// use singleton_manager::{register_self, singleton};
///
/// struct Config;
/// singleton!(Config);
///
/// register_self(Config).unwrap();
/// ```
#[macro_export]
macro_rules! singleton {
    ($ty:ty) => {
        impl $crate::Singleton for $ty {
            type Declared = $ty;
        }
    };
}

/// Free functions delegating to a registry handle. Shared by the registry macros
/// and the crate-root registry.
#[doc(hidden)]
#[macro_export]
macro_rules! __registry_free_functions {
    ($api:ident) => {
        /// Register a value; fails if its type already has an entry.
        pub fn register<T: Send + Sync + 'static>(
            value: T,
        ) -> Result<::std::sync::Arc<T>, $crate::RegistryError> {
            $crate::RegistryApi::register(&$api, value)
        }

        /// Register an Arc-wrapped value; fails if its type already has an entry.
        pub fn register_arc<T: Send + Sync + 'static>(
            value: ::std::sync::Arc<T>,
        ) -> Result<::std::sync::Arc<T>, $crate::RegistryError> {
            $crate::RegistryApi::register_arc(&$api, value)
        }

        /// Register a value, overwriting any earlier singleton of its type.
        pub fn register_or_replace<T: Send + Sync + 'static>(value: T) -> ::std::sync::Arc<T> {
            $crate::RegistryApi::register_or_replace(&$api, value)
        }

        /// Register an Arc-wrapped value, overwriting any earlier singleton of its type.
        pub fn register_or_replace_arc<T: Send + Sync + 'static>(
            value: ::std::sync::Arc<T>,
        ) -> ::std::sync::Arc<T> {
            $crate::RegistryApi::register_or_replace_arc(&$api, value)
        }

        /// Construct `T::default()` and register it.
        pub fn create_and_register<T: Default + Send + Sync + 'static>(
        ) -> Result<::std::sync::Arc<T>, $crate::RegistryError> {
            $crate::RegistryApi::create_and_register::<T>(&$api)
        }

        /// Register an instance under the type its `Singleton` impl declares.
        pub fn register_self<S: $crate::Singleton>(
            instance: S,
        ) -> Result<::std::sync::Arc<S>, $crate::RegistryError> {
            $crate::RegistryApi::register_self(&$api, instance)
        }

        /// Retrieve the singleton of type `T`.
        pub fn get<T: Send + Sync + 'static>(
        ) -> Result<::std::sync::Arc<T>, $crate::RegistryError> {
            $crate::RegistryApi::get::<T>(&$api)
        }

        /// Retrieve a clone of the singleton of type `T`.
        pub fn get_cloned<T: Send + Sync + Clone + 'static>() -> Result<T, $crate::RegistryError> {
            $crate::RegistryApi::get_cloned::<T>(&$api)
        }

        /// Retrieve the singleton of type `T` if one is registered.
        pub fn try_get<T: Send + Sync + 'static>() -> Option<::std::sync::Arc<T>> {
            $crate::RegistryApi::try_get::<T>(&$api)
        }

        /// Check if a type is registered.
        pub fn has_been_registered<T: Send + Sync + 'static>() -> bool {
            $crate::RegistryApi::has_been_registered::<T>(&$api)
        }

        /// Remove the singleton of type `T`; fails if there is none.
        pub fn unregister<T: Send + Sync + 'static>(
        ) -> Result<::std::sync::Arc<T>, $crate::RegistryError> {
            $crate::RegistryApi::unregister::<T>(&$api)
        }

        /// Remove the singleton of type `T` if one is registered.
        pub fn try_unregister<T: Send + Sync + 'static>() -> Option<::std::sync::Arc<T>> {
            $crate::RegistryApi::try_unregister::<T>(&$api)
        }

        /// Remove every registered singleton.
        pub fn clear() {
            $crate::RegistryApi::clear(&$api)
        }

        /// Set a tracing callback for registry operations.
        pub fn set_trace_callback(
            callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
        ) {
            $crate::RegistryApi::set_trace_callback(&$api, callback)
        }

        /// Clear the tracing callback.
        pub fn clear_trace_callback() {
            $crate::RegistryApi::clear_trace_callback(&$api)
        }
    };
}
