//! Object storage port trait.

use crate::domain::error::RepairError;

/// Boundary to the object store holding the sector mapping and price files.
///
/// Calls are blocking and single-shot: a transport failure is terminal for
/// the invocation, retries belong to the caller.
pub trait StoragePort {
    fn exists(&self, key: &str) -> Result<bool, RepairError>;

    fn download(&self, key: &str) -> Result<String, RepairError>;

    fn upload(&self, key: &str, content: &str) -> Result<(), RepairError>;
}
