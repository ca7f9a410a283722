use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::lock::RepositoryLock;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::log::commit_graph::CommitGraph;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the metadata directory inside the workspace
pub const REPOSITORY_DIR: &str = ".mygit";

/// One repository, rooted at an explicit workspace directory.
///
/// Every path the storage areas touch is derived from `path`; nothing consults
/// the process working directory.
pub struct Repository {
    /// Workspace root
    path: Box<Path>,
    /// `<workspace>/.mygit`
    repository_path: Box<Path>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Bind to an existing directory. The metadata directory need not exist
    /// yet (see [`Repository::init`]).
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        let repository_path = path.join(REPOSITORY_DIR);

        let index = Index::new(repository_path.join("index").into_boxed_path());
        let database = Database::new(repository_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(repository_path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            repository_path: repository_path.into_boxed_path(),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Bind to `path` for `init`, creating the directory when missing.
    pub fn create(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory {}", path.display()))?;
        }

        Self::new(path)
    }

    /// Bind to an initialized repository. Nothing is created on disk.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if !path.is_dir() {
            return Err(RepositoryError::NotARepository(path.to_path_buf()).into());
        }

        let repository = Self::new(path)?;

        if !repository.repository_path.is_dir() {
            return Err(RepositoryError::NotARepository(repository.path.to_path_buf()).into());
        }

        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_path(&self) -> &Path {
        &self.repository_path
    }

    pub fn index(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Exclusive repository lock, held until the guard is dropped.
    pub fn lock(&self) -> anyhow::Result<RepositoryLock> {
        RepositoryLock::acquire(&self.repository_path)
    }

    /// Resolve a branch, tag, `HEAD` or full object id to an object id.
    pub fn resolve(&self, name: &str) -> anyhow::Result<ObjectId> {
        Revision::parse(name).resolve(&self.database, &self.refs)
    }

    /// Commit graph backed by the object database
    pub fn commit_graph(
        &self,
    ) -> CommitGraph<impl Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>> + '_> {
        CommitGraph::new(|oid: &ObjectId| {
            Ok(self.database.parse_object_as_commit(oid)?.parents().to_vec())
        })
    }
}
