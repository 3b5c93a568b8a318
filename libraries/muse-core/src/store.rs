//! Persistence collaborator
//!
//! Durable storage is consumed as whole-aggregate get/put of serialized
//! documents. The storage crate layers history and playlist semantics on
//! top of this seam; the mechanism behind it (file, database, keychain)
//! belongs to the platform.

use crate::error::Result;
use async_trait::async_trait;

/// Durable key → document storage for whole aggregates.
#[async_trait]
pub trait AggregateStore: Send + Sync {
    /// Read the document stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write (or replace) the document under `key`
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Remove the document under `key`; no-op if absent
    async fn remove(&self, key: &str) -> Result<()>;
}
