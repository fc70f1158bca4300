use std::path::Path;

/// Answers "has this output already been produced?".
///
/// The output directory itself is the ledger in production; tests can swap in
/// something that never touches disk.
pub trait OutputLedger: Send + Sync {
    fn is_materialized(&self, target: &Path) -> bool;
}

/// Treats any existing file at the target path as done.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLedger;

impl OutputLedger for FsLedger {
    fn is_materialized(&self, target: &Path) -> bool {
        target.exists()
    }
}
