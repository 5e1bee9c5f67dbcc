use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Raised when an id argument is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must be a non-negative integer", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! server_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                raw.trim()
                    .parse()
                    .map(Self)
                    .map_err(|_| ParseIdError { kind: $kind })
            }
        }
    };
}

server_id!(
    /// Server-assigned question identifier.
    QuestionId,
    "question id"
);

server_id!(
    /// Server-assigned category identifier.
    CategoryId,
    "category id"
);
