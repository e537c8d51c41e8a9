//! Typed indices for trucks and stations.
//!
//! A truck or station has no identity beyond its position in the owning
//! `Vec`, so both ids are thin `u32` wrappers.  Prefer `.index()` over
//! `id.0 as usize` when indexing.

use std::fmt;

/// Generate a typed index wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel for "not assigned"; written to output rows as `u32::MAX`.
            pub const NONE: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Position of a truck in the fleet (insertion order = advance order).
    pub struct TruckId(u32);
}

typed_id! {
    /// Position of an unloading station.
    pub struct StationId(u32);
}
