#![doc = "drop-sync-core: core logic library for drop-sync."]

//! This crate contains the channel index data model and codec, the
//! fetch/touch/publish cycle against a remote index, the local drop
//! scanner and the upload orchestration pipeline.
//! The concrete object store client lives in the CLI crate; everything
//! here talks to the store through the [`contract::ObjectStore`] trait.

pub mod channel;
pub mod contract;
pub mod index;
pub mod scan;
pub mod upload;
