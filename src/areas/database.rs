//! Object database
//!
//! Content-addressed storage of immutable objects. Each object is framed as
//! `"<kind> <len>\0<payload>"`, hashed, zlib-compressed and stored at
//! `objects/<id[0:2]>/<id[2:]>`. Objects are never rewritten once present, so
//! concurrent readers need no locking.

use crate::artifacts::core::atomic_file::write_atomically;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable, frame, hash_framed, unframe};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store `payload` as an object of the given kind and return its id.
    ///
    /// Writing content that is already present is a successful no-op.
    pub fn write(&self, object_type: ObjectType, payload: &[u8]) -> anyhow::Result<ObjectId> {
        let framed = frame(object_type, payload);
        let object_id = hash_framed(&framed)?;
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::debug!(oid = %object_id, kind = %object_type, "object already stored");
            return Ok(object_id);
        }

        // the final path only appears once the whole compressed buffer is on disk
        let compressed = Self::compress(framed)?;
        write_atomically(&object_path, &compressed)
            .with_context(|| format!("Unable to write object {object_id}"))?;

        tracing::debug!(oid = %object_id, kind = %object_type, size = payload.len(), "object stored");

        Ok(object_id)
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        self.write(object.object_type(), &object.payload()?)
    }

    /// Load an object back as its kind and raw payload.
    ///
    /// A missing file, a decompression failure and a malformed header all
    /// surface as [`RepositoryError::ObjectNotFound`].
    pub fn read(&self, object_id: &ObjectId) -> anyhow::Result<(ObjectType, Bytes)> {
        let object_path = self.path.join(object_id.to_path());

        self.read_object(&object_path).map_err(|error| {
            tracing::debug!(oid = %object_id, error = %format!("{error:#}"), "object unreadable");
            anyhow::Error::from(RepositoryError::ObjectNotFound(object_id.to_string()))
        })
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let payload = self.read_expecting(object_id, ObjectType::Blob)?;
        Blob::deserialize(&payload)
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        let payload = self.read_expecting(object_id, ObjectType::Tree)?;
        Tree::deserialize(&payload).with_context(|| format!("tree {object_id} is corrupt"))
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let payload = self.read_expecting(object_id, ObjectType::Commit)?;
        Commit::deserialize(&payload).with_context(|| format!("commit {object_id} is corrupt"))
    }

    /// Load the tree snapshot recorded by a commit.
    pub fn load_commit_tree(&self, commit_id: &ObjectId) -> anyhow::Result<Tree> {
        let commit = self.parse_object_as_commit(commit_id)?;
        self.parse_object_as_tree(commit.tree_oid())
    }

    fn read_expecting(&self, object_id: &ObjectId, expected: ObjectType) -> anyhow::Result<Bytes> {
        let (object_type, payload) = self.read(object_id)?;

        if object_type != expected {
            return Err(RepositoryError::UnexpectedObjectType {
                oid: object_id.to_string(),
                expected: expected.to_string(),
                actual: object_type.to_string(),
            }
            .into());
        }

        Ok(payload)
    }

    fn read_object(&self, object_path: &Path) -> anyhow::Result<(ObjectType, Bytes)> {
        let object_content = std::fs::read(object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        unframe(Self::decompress(object_content.into())?)
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    fn temp_database() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        (dir, database)
    }

    #[fixture]
    fn database() -> (TempDir, Database) {
        temp_database()
    }

    #[rstest]
    fn write_then_read_returns_kind_and_payload(database: (TempDir, Database)) -> anyhow::Result<()> {
        let (_dir, database) = database;

        let oid = database.write(ObjectType::Blob, b"hello\n")?;

        assert_eq!(oid.as_ref(), "ce013625030ba8dba906f756967f9e9ca394464a");
        let (kind, payload) = database.read(&oid)?;
        assert_eq!(kind, ObjectType::Blob);
        assert_eq!(&payload[..], b"hello\n");
        Ok(())
    }

    #[rstest]
    fn rewriting_identical_content_is_a_no_op(database: (TempDir, Database)) -> anyhow::Result<()> {
        let (_dir, database) = database;

        let first = database.write(ObjectType::Tree, b"100644 a.txt ce013625030ba8dba906f756967f9e9ca394464a")?;
        let path = database.objects_path().join(first.to_path());
        let modified = std::fs::metadata(&path)?.modified()?;

        let second = database.write(ObjectType::Tree, b"100644 a.txt ce013625030ba8dba906f756967f9e9ca394464a")?;

        assert_eq!(first, second);
        assert_eq!(std::fs::metadata(&path)?.modified()?, modified);
        Ok(())
    }

    #[rstest]
    fn missing_objects_are_reported_as_not_found(database: (TempDir, Database)) -> anyhow::Result<()> {
        let (_dir, database) = database;
        let oid = ObjectId::try_parse("0".repeat(40))?;

        let error = database.read(&oid).unwrap_err();

        assert_eq!(
            error.downcast_ref::<RepositoryError>(),
            Some(&RepositoryError::ObjectNotFound(oid.to_string()))
        );
        assert!(!database.exists(&oid));
        Ok(())
    }

    #[rstest]
    fn corrupt_objects_are_reported_as_not_found(database: (TempDir, Database)) -> anyhow::Result<()> {
        let (_dir, database) = database;
        let oid = database.write(ObjectType::Blob, b"content")?;
        std::fs::write(database.objects_path().join(oid.to_path()), b"not zlib at all")?;

        let error = database.read(&oid).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::ObjectNotFound(_))
        ));
        Ok(())
    }

    #[rstest]
    fn typed_reads_reject_other_kinds(database: (TempDir, Database)) -> anyhow::Result<()> {
        let (_dir, database) = database;
        let oid = database.write(ObjectType::Blob, b"just a blob")?;

        let error = database.parse_object_as_commit(&oid).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::UnexpectedObjectType { .. })
        ));
        Ok(())
    }

    proptest! {
        #[test]
        fn any_payload_survives_storage(payload in proptest::collection::vec(any::<u8>(), 0..512)) {
            let (_dir, database) = temp_database();

            let first = database.write(ObjectType::Blob, &payload).unwrap();
            let second = database.write(ObjectType::Blob, &payload).unwrap();
            let (kind, stored) = database.read(&first).unwrap();

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(kind, ObjectType::Blob);
            prop_assert_eq!(stored.to_vec(), payload);
        }
    }
}
