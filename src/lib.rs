//! Workspace crate for `mastdup-core` and `mastdup-cli`.
//!
//! It exists to host the walkthroughs under `demos/`; everything here is a
//! re-export of [`mastdup_core`].

pub use mastdup_core::*;
