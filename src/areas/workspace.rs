use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never considered part of the working tree
const IGNORED_PATHS: [&str; 1] = [".mygit"];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Express `path` relative to the workspace root.
    ///
    /// Relative inputs are taken as relative to the root already.
    pub fn relative_path(&self, path: &Path) -> anyhow::Result<PathBuf> {
        if path.is_relative() {
            return Ok(path.to_path_buf());
        }

        // the root is canonical, so the candidate must be too
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        path.strip_prefix(self.path.as_ref())
            .map(PathBuf::from)
            .with_context(|| format!("{:?} is outside the workspace {:?}", path, self.path))
    }

    pub fn parse_blob(&self, path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(path)?.into()))
    }

    pub fn file_mode(&self, path: &Path) -> EntryMode {
        EntryMode::from_file(&self.path.join(path))
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.path.join(path).is_file()
    }

    /// Every file below `root` (the whole workspace when `None`), relative to
    /// the workspace and sorted. The metadata directory is skipped.
    pub fn list_files(&self, root: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root = match root {
            Some(path) if path.components().any(|component| Self::is_ignored(component.as_ref())) => {
                return Ok(Vec::new());
            }
            Some(path) => self.path.join(path),
            None => self.path.to_path_buf(),
        };

        if !root.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", root);
        }

        if root.is_file() {
            return Ok(vec![self.relative_path(&root)?]);
        }

        let mut files = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(PathBuf::from)
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Vec<u8>> {
        let full_path = self.path.join(file_path);

        std::fs::read(&full_path).with_context(|| format!("Failed to read file: {:?}", file_path))
    }

    /// Fail when writing `file_path` would first have to remove something: a
    /// directory at the path itself, or a file where one of its parent
    /// directories belongs.
    pub fn ensure_writable(&self, file_path: &Path) -> anyhow::Result<()> {
        if self.path.join(file_path).is_dir() {
            anyhow::bail!("Refusing to replace directory {:?} with a file", file_path);
        }

        let blocking_parent = file_path
            .ancestors()
            .skip(1)
            .filter(|parent| !parent.as_os_str().is_empty())
            .find(|parent| {
                let full_parent = self.path.join(parent);
                full_parent.exists() && !full_parent.is_dir()
            });
        if let Some(parent) = blocking_parent {
            anyhow::bail!(
                "Refusing to replace file {:?} with a directory for {:?}",
                parent,
                file_path
            );
        }

        Ok(())
    }

    /// Write `data` to `file_path`, creating parent directories and applying
    /// the entry's permission bits. Nothing already on disk is removed.
    pub fn write_file(&self, file_path: &Path, data: &[u8], mode: EntryMode) -> anyhow::Result<()> {
        self.ensure_writable(file_path)?;
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for {:?}", file_path))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(mode.as_u32());
            std::fs::set_permissions(&full_path, permissions)
                .with_context(|| format!("Failed to set permissions for file: {:?}", file_path))?;
        }
        #[cfg(not(unix))]
        let _ = mode;

        Ok(())
    }

    /// Delete a working file; a file that is already gone is not an error.
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        Ok(())
    }
}
