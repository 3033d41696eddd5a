//! Core trait defining registry behavior.
//!
//! This module provides the `RegistryApi` trait with default implementations for
//! strict registration, replacement, retrieval, removal and tracing of singleton
//! instances.
//!
//! The registry is type-based: each type (`TypeId`) can have at most one instance
//! stored. Registering a second instance of the same type fails unless the caller
//! explicitly asks for replacement.

use std::any::{type_name, Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{RegistryError, RegistryEvent, Singleton};

/// Type-erased storage behind every registry.
pub type SingletonMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// User-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time the registry is
/// interacted with.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Slot holding the optional trace callback of a registry.
pub type TraceSlot = Option<Arc<TraceCallback>>;

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// two accessors (`with_storage` and `with_trace`) from the implementor. Both hand
/// a mutable reference to the registry's statics to a closure; whether that goes
/// through a lock or a thread-local `RefCell` is the implementor's choice.
///
/// Every operation either fully succeeds or leaves the storage untouched.
/// Values removed from the storage are dropped only after `with_storage` returns,
/// and trace callbacks never run inside it.
pub trait RegistryApi {
    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Run `f` against the registry's trace callback slot.
    fn with_trace<R>(f: impl FnOnce(&mut TraceSlot) -> R) -> R;

    /// Set a tracing callback for registry operations.
    ///
    /// The callback is invoked after every registry operation. It runs outside
    /// the storage and trace slots, so it may call back into any registry. A
    /// replaced callback is dropped after the slot is released.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let callback: Arc<TraceCallback> = Arc::new(callback);
        let previous = Self::with_trace(|slot| slot.replace(callback));
        drop(previous);
    }

    /// Clear the tracing callback.
    ///
    /// Note: This does not affect registered values, only the tracing callback.
    fn clear_trace_callback(&self) {
        let previous = Self::with_trace(|slot| slot.take());
        drop(previous);
    }

    /// Emit a registry event to the current callback, if any.
    fn emit_event(&self, event: &RegistryEvent) {
        if let Some(callback) = Self::with_trace(|slot| slot.clone()) {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    /// Run `f` against the registry's storage.
    fn with_storage<R>(f: impl FnOnce(&mut SingletonMap) -> R) -> R;

    /// Register a value as the singleton of its type.
    ///
    /// Takes ownership of the value, wraps it in an `Arc` and returns the handle
    /// that later `get` calls hand out.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AlreadyRegistered`] if `T` already has an entry. The
    ///   existing entry is kept and `value` is dropped.
    fn register<T: Send + Sync + 'static>(&self, value: T) -> Result<Arc<T>, RegistryError> {
        self.register_arc(Arc::new(value))
    }

    /// Register an Arc-wrapped value as the singleton of its type.
    ///
    /// More efficient than `register` when you already have an `Arc`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AlreadyRegistered`] if `T` already has an entry.
    fn register_arc<T: Send + Sync + 'static>(
        &self,
        value: Arc<T>,
    ) -> Result<Arc<T>, RegistryError> {
        let registered = Self::with_storage(|map| match map.entry(TypeId::of::<T>()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let entry: Arc<dyn Any + Send + Sync> = value.clone();
                slot.insert(entry);
                true
            }
        });

        self.emit_event(&RegistryEvent::Register {
            type_name: type_name::<T>(),
            registered,
        });

        if registered {
            tracing::debug!(type_name = type_name::<T>(), "registered singleton");
            Ok(value)
        } else {
            tracing::warn!(type_name = type_name::<T>(), "singleton already registered");
            Err(RegistryError::already_registered::<T>())
        }
    }

    /// Register a value, replacing any earlier singleton of the same type.
    ///
    /// Handles obtained for the earlier value stay valid, they just no longer
    /// match what the registry returns.
    fn register_or_replace<T: Send + Sync + 'static>(&self, value: T) -> Arc<T> {
        self.register_or_replace_arc(Arc::new(value))
    }

    /// Arc-taking variant of `register_or_replace`.
    fn register_or_replace_arc<T: Send + Sync + 'static>(&self, value: Arc<T>) -> Arc<T> {
        let entry: Arc<dyn Any + Send + Sync> = value.clone();
        let previous = Self::with_storage(|map| map.insert(TypeId::of::<T>(), entry));
        let replaced = previous.is_some();
        drop(previous);

        self.emit_event(&RegistryEvent::Replace {
            type_name: type_name::<T>(),
            replaced,
        });
        tracing::debug!(type_name = type_name::<T>(), replaced, "stored singleton");

        value
    }

    /// Construct `T::default()` and register it.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AlreadyRegistered`] if `T` already has an entry. The
    ///   freshly constructed value is dropped.
    fn create_and_register<T: Default + Send + Sync + 'static>(
        &self,
    ) -> Result<Arc<T>, RegistryError> {
        self.register(T::default())
    }

    /// Register an instance under the type its [`Singleton`] impl declares.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidSelfRegistration`] if `S::Declared` is not `S`.
    /// - [`RegistryError::AlreadyRegistered`] if `S` already has an entry.
    ///
    /// The registry is left unchanged on either error.
    fn register_self<S: Singleton>(&self, instance: S) -> Result<Arc<S>, RegistryError> {
        if TypeId::of::<S::Declared>() != TypeId::of::<S>() {
            tracing::warn!(
                declared = type_name::<S::Declared>(),
                actual = type_name::<S>(),
                "singleton declared under another type"
            );
            return Err(RegistryError::InvalidSelfRegistration {
                declared: type_name::<S::Declared>(),
                actual: type_name::<S>(),
            });
        }

        self.register(instance)
    }

    // -------------------------------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------------------------------

    /// Retrieve the singleton of type `T`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`] if `T` has no entry.
    /// - [`RegistryError::TypeMismatch`] if the stored entry does not downcast to `T`.
    fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        let entry = Self::with_storage(|map| map.get(&TypeId::of::<T>()).cloned());

        let result = match entry {
            Some(entry) => downcast::<T>(entry),
            None => Err(RegistryError::not_registered::<T>()),
        };

        self.emit_event(&RegistryEvent::Get {
            type_name: type_name::<T>(),
            found: result.is_ok(),
        });

        match &result {
            Ok(_) => tracing::trace!(type_name = type_name::<T>(), "singleton lookup"),
            Err(err) => {
                tracing::warn!(type_name = type_name::<T>(), %err, "singleton lookup failed")
            }
        }

        result
    }

    /// Retrieve a cloned value of the singleton of type `T`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](RegistryApi::get).
    fn get_cloned<T: Send + Sync + Clone + 'static>(&self) -> Result<T, RegistryError> {
        let arc = self.get::<T>()?;
        Ok((*arc).clone())
    }

    /// Retrieve the singleton of type `T` if one is registered.
    fn try_get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        let entry = Self::with_storage(|map| map.get(&TypeId::of::<T>()).cloned());
        let value = entry.and_then(|entry| downcast::<T>(entry).ok());

        self.emit_event(&RegistryEvent::Get {
            type_name: type_name::<T>(),
            found: value.is_some(),
        });
        tracing::trace!(
            type_name = type_name::<T>(),
            found = value.is_some(),
            "singleton optional lookup"
        );

        value
    }

    /// Check if a type is registered in the registry.
    fn has_been_registered<T: Send + Sync + 'static>(&self) -> bool {
        let found = Self::with_storage(|map| map.contains_key(&TypeId::of::<T>()));

        self.emit_event(&RegistryEvent::Contains {
            type_name: type_name::<T>(),
            found,
        });
        tracing::trace!(type_name = type_name::<T>(), found, "singleton presence check");

        found
    }

    /// Number of registered singletons.
    fn len(&self) -> usize {
        Self::with_storage(|map| map.len())
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------------------------------
    // Removal
    // -------------------------------------------------------------------------------------------------

    /// Remove the singleton of type `T`, returning the registry's handle to it.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`] if `T` has no entry.
    fn unregister<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        let removed = Self::with_storage(|map| map.remove(&TypeId::of::<T>()));

        self.emit_event(&RegistryEvent::Unregister {
            type_name: type_name::<T>(),
            found: removed.is_some(),
        });

        match removed {
            Some(entry) => {
                tracing::debug!(type_name = type_name::<T>(), "unregistered singleton");
                downcast::<T>(entry)
            }
            None => {
                tracing::warn!(type_name = type_name::<T>(), "cannot unregister missing singleton");
                Err(RegistryError::not_registered::<T>())
            }
        }
    }

    /// Remove the singleton of type `T` if one is registered.
    fn try_unregister<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        let removed = Self::with_storage(|map| map.remove(&TypeId::of::<T>()));

        self.emit_event(&RegistryEvent::Unregister {
            type_name: type_name::<T>(),
            found: removed.is_some(),
        });
        tracing::debug!(
            type_name = type_name::<T>(),
            found = removed.is_some(),
            "try unregister singleton"
        );

        removed.and_then(|entry| downcast::<T>(entry).ok())
    }

    /// Clear all registered values from the registry.
    ///
    /// Already-retrieved `Arc<T>` handles remain valid. The tracing callback is
    /// kept (use `clear_trace_callback()` to clear that).
    fn clear(&self) {
        let entries = Self::with_storage(|map| std::mem::take(map));
        let count = entries.len();
        drop(entries);

        self.emit_event(&RegistryEvent::Clear { entries: count });
        tracing::debug!(entries = count, "cleared registry");
    }
}

fn downcast<T: Send + Sync + 'static>(
    entry: Arc<dyn Any + Send + Sync>,
) -> Result<Arc<T>, RegistryError> {
    entry.downcast::<T>().map_err(|_| RegistryError::TypeMismatch {
        type_name: type_name::<T>(),
    })
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
