/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use singleton_manager::RegistryEvent;
///
/// let event = RegistryEvent::Register { type_name: "i32", registered: true };
/// assert_eq!(event.to_string(), "register { type_name: i32, registered: true }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A strict registration was attempted.
    Register {
        /// The type name of the value (e.g., "i32", "alloc::string::String")
        type_name: &'static str,
        /// `false` when the type already had an entry and nothing was stored
        registered: bool,
    },

    /// A value was stored with `register_or_replace`.
    Replace {
        type_name: &'static str,
        /// Whether an earlier entry was overwritten
        replaced: bool,
    },

    /// A value was requested from the registry.
    Get {
        type_name: &'static str,
        found: bool,
    },

    /// A type existence check was performed.
    Contains {
        type_name: &'static str,
        found: bool,
    },

    /// An entry removal was attempted.
    Unregister {
        type_name: &'static str,
        found: bool,
    },

    /// The registry was cleared.
    Clear {
        /// Number of entries removed
        entries: usize,
    },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register {
                type_name,
                registered,
            } => write!(
                f,
                "register {{ type_name: {}, registered: {} }}",
                type_name, registered
            ),
            RegistryEvent::Replace {
                type_name,
                replaced,
            } => write!(
                f,
                "replace {{ type_name: {}, replaced: {} }}",
                type_name, replaced
            ),
            RegistryEvent::Get { type_name, found } => {
                write!(f, "get {{ type_name: {}, found: {} }}", type_name, found)
            }
            RegistryEvent::Contains { type_name, found } => {
                write!(
                    f,
                    "contains {{ type_name: {}, found: {} }}",
                    type_name, found
                )
            }
            RegistryEvent::Unregister { type_name, found } => {
                write!(
                    f,
                    "unregister {{ type_name: {}, found: {} }}",
                    type_name, found
                )
            }
            RegistryEvent::Clear { entries } => write!(f, "clear {{ entries: {} }}", entries),
        }
    }
}
