//! Self-registration helper.
//!
//! A type implements [`Singleton`] to declare which type its instances register
//! under, and its constructor hands the new instance to `register_self`. The
//! declaration must name the implementing type itself; anything else is rejected
//! at registration time with [`RegistryError::InvalidSelfRegistration`].
//!
//! ```rust
//! use singleton_manager::{register_self, singleton, RegistryError};
//! use std::sync::Arc;
//!
//! struct AudioService {
//!     volume: u8,
//! }
//!
//! singleton!(AudioService);
//!
//! impl AudioService {
//!     fn start(volume: u8) -> Result<Arc<Self>, RegistryError> {
//!         register_self(AudioService { volume })
//!     }
//! }
//!
//! let audio = AudioService::start(7).unwrap();
//! assert_eq!(audio.volume, 7);
//! assert!(AudioService::start(9).is_err());
//! ```
//!
//! [`RegistryError::InvalidSelfRegistration`]: crate::RegistryError::InvalidSelfRegistration

/// A type whose instances register themselves on construction.
///
/// `Declared` plays the role of the generic parameter of a self-registering base:
/// it must be `Self`. The [`singleton!`](crate::singleton) macro writes the impl
/// with that guarantee.
pub trait Singleton: Send + Sync + Sized + 'static {
    /// The type this singleton registers under.
    type Declared: ?Sized + 'static;
}

#[cfg(test)]
mod tests {
    use crate::{RegistryApi, RegistryError, Singleton, REGISTRY};
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    struct Player {
        name: String,
        age: u32,
    }

    crate::singleton!(Player);

    #[derive(Debug)]
    struct Enemy;

    // Copy-pasted declaration pointing at the wrong type.
    impl Singleton for Enemy {
        type Declared = Player;
    }

    #[test]
    fn test_register_self() {
        REGISTRY.clear();

        let player = REGISTRY
            .register_self(Player {
                name: "Dave".into(),
                age: 35,
            })
            .unwrap();

        assert!(REGISTRY.has_been_registered::<Player>());
        assert!(Arc::ptr_eq(&player, &REGISTRY.get::<Player>().unwrap()));
    }

    #[test]
    fn test_mismatched_declaration_is_rejected() {
        REGISTRY.clear();

        let err = REGISTRY.register_self(Enemy).unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidSelfRegistration {
                declared: std::any::type_name::<Player>(),
                actual: std::any::type_name::<Enemy>(),
            }
        );
        assert!(REGISTRY.is_empty());
    }

    #[test]
    fn test_self_register_twice_keeps_first() {
        REGISTRY.clear();

        let first = REGISTRY
            .register_self(Player {
                name: "Dave".into(),
                age: 35,
            })
            .unwrap();
        let err = REGISTRY
            .register_self(Player {
                name: "James".into(),
                age: 24,
            })
            .unwrap_err();

        assert!(matches!(err, RegistryError::AlreadyRegistered { .. }));
        assert!(Arc::ptr_eq(&first, &REGISTRY.get::<Player>().unwrap()));
    }
}
