use crate::domain::CarRecord;
use crate::errors::Result;

/// Capability for mirroring the saved record list to an external service.
///
/// The tool is fully functional offline; when a backend is configured the
/// controller pushes the list after each committed save or delete and treats
/// failures as non-fatal.
pub trait CloudSync: Send + Sync {
    /// Short human-readable backend name for log lines.
    fn label(&self) -> &str;

    fn push(&self, records: &[CarRecord]) -> Result<()>;
}
