//! Workspace synchronisation modes
//!
//! Reset and checkout materialize a commit into the repository at one of
//! three levels. Each level includes everything the previous one does.

use crate::artifacts::index::entry_mode::EntryMode;
use bytes::Bytes;
use derive_new::new;
use std::path::PathBuf;

/// How much of the repository a sync touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ResetMode {
    /// Move HEAD (the checked-out branch, or the detached pointer) only
    Soft,
    /// Soft, then replace the index with the commit's tree
    #[default]
    Mixed,
    /// Mixed, then overwrite every working file named by the tree; files the
    /// tree does not name are left alone
    Hard,
}

impl ResetMode {
    pub fn updates_index(&self) -> bool {
        *self >= ResetMode::Mixed
    }

    pub fn updates_workspace(&self) -> bool {
        *self == ResetMode::Hard
    }
}

impl std::fmt::Display for ResetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResetMode::Soft => "soft",
            ResetMode::Mixed => "mixed",
            ResetMode::Hard => "hard",
        };
        write!(f, "{name}")
    }
}

/// A working file read out of the database and ready to be written
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct WorkspaceFile {
    pub path: PathBuf,
    pub content: Bytes,
    pub mode: EntryMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ResetMode::Soft, false, false)]
    #[case(ResetMode::Mixed, true, false)]
    #[case(ResetMode::Hard, true, true)]
    fn modes_are_cumulative(
        #[case] mode: ResetMode,
        #[case] index: bool,
        #[case] workspace: bool,
    ) {
        assert_eq!(mode.updates_index(), index);
        assert_eq!(mode.updates_workspace(), workspace);
    }
}
