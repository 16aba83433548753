//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Entities and audio channels each get a strongly-typed ID so a snapshot
//! of one can never be replayed against the other. All IDs use UUID v7
//! (time-ordered), which also gives suspend snapshots a stable iteration
//! order when stored in ordered sets.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an actor (local or non-local) in the session.
    EntityId
}

define_id! {
    /// Unique identifier for a sound-emitting audio channel.
    ChannelId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let entity = EntityId::new();
        let channel = ChannelId::new();
        // Different types -- the compiler enforces no mixing.
        assert_ne!(entity.into_inner(), Uuid::nil());
        assert_ne!(channel.into_inner(), Uuid::nil());
    }

    #[test]
    fn ids_are_time_ordered() {
        let first = EntityId::new();
        let second = EntityId::new();
        assert!(first < second);
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = ChannelId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
