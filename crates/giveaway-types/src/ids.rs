//! Type-safe identifier wrappers around the store's `i64` keys.
//!
//! Participants are keyed by an opaque numeric id handed to us by the
//! caller (a chat user id, for example). Prize ids are assigned by the
//! store on insert. Wrapping both keeps them from being mixed up at call
//! sites that take one of each.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `i64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wrap a raw store key.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the inner `i64` value.
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of a participant, supplied by the caller on registration.
    ParticipantId
}

define_id! {
    /// Identifier of a prize, assigned by the store when the catalog is seeded.
    PrizeId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_i64() {
        let id = ParticipantId::from(42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(id.into_inner(), 42);
        assert_eq!(PrizeId::new(7).to_string(), "7");
    }

    #[test]
    fn ids_serialize_as_bare_integers() {
        let yaml = serde_yml::to_string(&PrizeId::new(3)).unwrap_or_default();
        assert_eq!(yaml.trim(), "3");
    }
}
