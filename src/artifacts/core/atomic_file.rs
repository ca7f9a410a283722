use anyhow::Context;
use fake::rand;
use std::io::Write;
use std::path::Path;

/// Replace the file at `path` with `content` so that readers observe either the
/// old bytes or the new bytes, never a partial write.
///
/// The content is written to a sibling temp file which is then renamed over the
/// destination. Missing parent directories are created.
pub fn write_atomically(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("invalid file path {}", path.display()))?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("unable to create directory {}", parent.display()))?;

    let temp_path = parent.join(generate_temp_name());

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| format!("unable to open temp file {}", temp_path.display()))?;

    let written = file
        .write_all(content)
        .and_then(|_| file.sync_all())
        .with_context(|| format!("unable to write temp file {}", temp_path.display()));

    if let Err(error) = written {
        let _ = std::fs::remove_file(&temp_path);
        return Err(error);
    }

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("unable to rename temp file to {}", path.display()))
}

fn generate_temp_name() -> String {
    format!("tmp-{}", rand::random::<u32>())
}
