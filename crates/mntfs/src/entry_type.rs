/// Node type identifiers for directory entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file entry. Never produced by the directory tree itself.
    File,
    /// Directory entry
    Directory,
}

impl EntryType {
    pub fn is_directory(&self) -> bool {
        matches!(self, EntryType::Directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_directory() {
        assert!(EntryType::Directory.is_directory());
        assert!(!EntryType::File.is_directory());
    }
}
