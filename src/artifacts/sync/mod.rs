//! Whole-tree mirroring for push and pull
//!
//! A mirror is a plain copy of a repository root. Push replaces the mirror wholesale; pull
//! replaces each mirrored entry of the local repository with the mirror's copy. There is no
//! object-level negotiation and no merging of divergent histories.

pub mod mirror;
