use std::path::Path;

/// File mode recorded for a tracked path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum EntryMode {
    #[default]
    Regular,
    Executable,
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::Regular => "100644",
            EntryMode::Executable => "100755",
        }
    }

    /// Unix permission bits applied when materializing the file.
    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::Regular => 0o644,
            EntryMode::Executable => 0o755,
        }
    }

    pub fn from_file(path: &Path) -> Self {
        if is_executable::is_executable(path) {
            EntryMode::Executable
        } else {
            EntryMode::Regular
        }
    }
}

impl TryFrom<&str> for EntryMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "100644" => Ok(EntryMode::Regular),
            "100755" => Ok(EntryMode::Executable),
            _ => Err(anyhow::anyhow!("unsupported file mode '{value}'")),
        }
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
