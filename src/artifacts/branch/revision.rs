use crate::areas::database::Database;
use crate::areas::refs::{Head, Refs};
use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::object_id::ObjectId;

/// A user supplied name for a commit.
///
/// Resolution follows a fixed precedence, stopping at the first step that
/// applies:
///
/// 1. a full 40-character hex id is taken literally, provided the object exists
/// 2. `HEAD` follows the symbolic target, or validates the detached id
/// 3. `refs/heads/<name>`, then `refs/tags/<name>`, then `<name>` itself when
///    it already starts with `refs/`
///
/// A literal id therefore wins over a branch that happens to carry the same
/// 40-character name.
///
/// # Examples
///
/// ```ignore
/// let oid = Revision::parse("main").resolve(repository.database(), repository.refs())?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    pub fn parse(name: &str) -> Self {
        Revision(name.trim().to_string())
    }

    pub fn head() -> Self {
        Revision(HEAD_REF_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn resolve(&self, database: &Database, refs: &Refs) -> anyhow::Result<ObjectId> {
        let name = self.0.as_str();

        if ObjectId::is_full_hex(name) {
            let oid = ObjectId::try_parse(name.to_string())?;
            return if database.exists(&oid) {
                Ok(oid)
            } else {
                Err(RepositoryError::ObjectNotFound(name.to_string()).into())
            };
        }

        if name == HEAD_REF_NAME {
            return match refs.read_head()? {
                Head::Symbolic(sym_ref_name) => {
                    Self::resolve_reference(sym_ref_name.as_ref_path(), refs)
                }
                Head::Detached(oid) => Ok(oid),
            };
        }

        Self::resolve_reference(name, refs)
    }

    fn resolve_reference(name: &str, refs: &Refs) -> anyhow::Result<ObjectId> {
        let path = refs
            .candidate_paths(name)
            .into_iter()
            .find(|path| path.is_file())
            .ok_or_else(|| RepositoryError::ReferenceNotFound(name.to_string()))?;

        tracing::debug!(reference = name, path = %path.display(), "reference resolved");

        refs.read_ref_file(&path)
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
