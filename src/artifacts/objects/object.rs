use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::{Context, Result};
use bytes::Bytes;
use sha1::{Digest, Sha1};

pub trait Packable {
    /// Encode the object body, without the `"<kind> <len>\0"` header.
    fn payload(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(payload: &[u8]) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn serialize(&self) -> Result<Bytes> {
        Ok(frame(self.object_type(), &self.payload()?))
    }

    fn object_id(&self) -> Result<ObjectId> {
        hash_framed(&self.serialize()?)
    }
}

/// Prefix `payload` with its `"<kind> <byte-length>\0"` header.
pub fn frame(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), payload.len());

    let mut framed = Vec::with_capacity(header.len() + payload.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(payload);

    Bytes::from(framed)
}

/// Digest of an already framed object.
pub fn hash_framed(framed: &[u8]) -> Result<ObjectId> {
    let mut hasher = Sha1::new();
    hasher.update(framed);

    ObjectId::from_digest(&hasher.finalize())
}

/// Split a framed object on its first NUL byte, validating the header.
pub fn unframe(framed: Bytes) -> Result<(ObjectType, Bytes)> {
    let header_end = framed
        .iter()
        .position(|byte| *byte == b'\0')
        .context("object header is not NUL terminated")?;

    let header = std::str::from_utf8(&framed[..header_end]).context("object header is not UTF-8")?;
    let (kind, declared_length) = header
        .split_once(' ')
        .with_context(|| format!("malformed object header '{header}'"))?;

    let object_type = ObjectType::try_from(kind)?;
    let declared_length = declared_length
        .parse::<usize>()
        .with_context(|| format!("malformed object length '{declared_length}'"))?;

    let payload = framed.slice(header_end + 1..);
    if payload.len() != declared_length {
        anyhow::bail!(
            "object length mismatch: header declares {declared_length} bytes, found {}",
            payload.len()
        );
    }

    Ok((object_type, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blob_digest_matches_the_well_known_git_value() -> Result<()> {
        let framed = frame(ObjectType::Blob, b"hello\n");

        assert_eq!(
            hash_framed(&framed)?.as_ref(),
            "ce013625030ba8dba906f756967f9e9ca394464a"
        );
        Ok(())
    }

    #[test]
    fn kind_participates_in_the_digest() -> Result<()> {
        let blob = hash_framed(&frame(ObjectType::Blob, b"same"))?;
        let tree = hash_framed(&frame(ObjectType::Tree, b"same"))?;

        assert_ne!(blob, tree);
        Ok(())
    }

    #[test]
    fn unframe_recovers_kind_and_payload() -> Result<()> {
        let (kind, payload) = unframe(frame(ObjectType::Commit, b"tree x\n\nmsg"))?;

        assert_eq!(kind, ObjectType::Commit);
        assert_eq!(&payload[..], b"tree x\n\nmsg");
        Ok(())
    }

    #[test]
    fn unframe_rejects_missing_separator_and_bad_lengths() {
        assert!(unframe(Bytes::from_static(b"blob 5hello")).is_err());
        assert!(unframe(Bytes::from_static(b"blob 9\0hello")).is_err());
        assert!(unframe(Bytes::from_static(b"tag 5\0hello")).is_err());
    }
}
