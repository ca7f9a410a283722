use crate::artifacts::branch::{HEADS_PREFIX, INVALID_BRANCH_NAME_REGEX, TAGS_PREFIX};
use crate::artifacts::core::error::RepositoryError;
use anyhow::Context;
use derive_new::new;

/// Full path of a reference below the repository directory, e.g. `refs/heads/main`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn for_branch(branch_name: &BranchName) -> Self {
        Self(format!("{HEADS_PREFIX}{branch_name}"))
    }

    pub fn for_tag(tag_name: &BranchName) -> Self {
        Self(format!("{TAGS_PREFIX}{tag_name}"))
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }

    /// Short branch name when this ref lives under `refs/heads/`.
    pub fn branch_name(&self) -> Option<&str> {
        self.0.strip_prefix(HEADS_PREFIX)
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated short name of a branch or tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(RepositoryError::InvalidBranchName(name).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(RepositoryError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
