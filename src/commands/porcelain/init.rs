use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::core::atomic_file::write_atomically;
use crate::artifacts::core::error::RepositoryError;
use anyhow::Context;
use std::fs;

pub const DEFAULT_BRANCH: &str = "main";

const DEFAULT_CONFIG: &str = "[core]\n\
    \trepositoryformatversion = 0\n\
    \tfilemode = true\n\
    \tbare = false\n";

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.repository_path().exists() {
            return Err(RepositoryError::AlreadyInitialized(self.path().to_path_buf()).into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .mygit/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .mygit/refs/heads directory")?;

        fs::create_dir_all(self.refs().tags_path())
            .context("Failed to create .mygit/refs/tags directory")?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .set_head(&Head::Symbolic(SymRefName::for_branch(&default_branch)))
            .context("Failed to create initial HEAD reference")?;

        write_atomically(&self.repository_path().join("config"), DEFAULT_CONFIG.as_bytes())
            .context("Failed to create .mygit/config file")?;

        self.index()
            .write_updates()
            .context("Failed to create .mygit/index file")?;

        tracing::info!(path = %self.path().display(), "repository initialized");

        Ok(())
    }
}
