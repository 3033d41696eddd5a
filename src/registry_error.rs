use thiserror::Error;

/// Errors returned by registry operations.
///
/// All of them point at a wiring mistake (a type registered twice, looked up
/// before it was registered, or a mis-declared [`Singleton`](crate::Singleton)).
/// Callers that expect absence should use the non-failing counterparts such as
/// `try_get` or `try_unregister` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{type_name} has already been registered, use register_or_replace to overwrite it")]
    AlreadyRegistered { type_name: &'static str },

    #[error("{type_name} has not been registered")]
    NotRegistered { type_name: &'static str },

    #[error("{actual} cannot self-register as {declared}")]
    InvalidSelfRegistration {
        declared: &'static str,
        actual: &'static str,
    },

    /// The entry stored under `T`'s `TypeId` did not downcast to `T`.
    #[error("type mismatch in registry for {type_name}")]
    TypeMismatch { type_name: &'static str },
}

impl RegistryError {
    pub(crate) fn already_registered<T: ?Sized + 'static>() -> Self {
        RegistryError::AlreadyRegistered {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn not_registered<T: ?Sized + 'static>() -> Self {
        RegistryError::NotRegistered {
            type_name: std::any::type_name::<T>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_registered_display() {
        let err = RegistryError::already_registered::<i32>();
        assert_eq!(
            err.to_string(),
            "i32 has already been registered, use register_or_replace to overwrite it"
        );
    }

    #[test]
    fn test_not_registered_display() {
        let err = RegistryError::not_registered::<String>();
        assert_eq!(
            err.to_string(),
            "alloc::string::String has not been registered"
        );
    }

    #[test]
    fn test_invalid_self_registration_display() {
        let err = RegistryError::InvalidSelfRegistration {
            declared: "Player",
            actual: "Enemy",
        };
        assert_eq!(err.to_string(), "Enemy cannot self-register as Player");
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = RegistryError::TypeMismatch { type_name: "u8" };
        assert_eq!(err.to_string(), "type mismatch in registry for u8");
    }

    #[test]
    fn test_equality() {
        assert_eq!(
            RegistryError::not_registered::<u8>(),
            RegistryError::NotRegistered { type_name: "u8" }
        );
        assert_ne!(
            RegistryError::not_registered::<u8>(),
            RegistryError::already_registered::<u8>()
        );
    }

    #[test]
    fn test_error_trait() {
        let err: &dyn std::error::Error = &RegistryError::not_registered::<u16>();
        assert_eq!(err.to_string(), "u16 has not been registered");
        assert!(err.source().is_none());
    }
}
