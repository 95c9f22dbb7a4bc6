use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

const MMAP_THRESHOLD: u64 = 1024 * 1024; // 1 MiB

pub enum FileContent {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Mapped(mmap) => &mmap[..],
            FileContent::Buffered(buf) => buf.as_slice(),
        }
    }

    /// UTF-8 view of the content, `None` if the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }
}

pub fn read_file_smart<P: AsRef<Path>>(path: P) -> std::io::Result<FileContent> {
    let path = path.as_ref();
    let metadata = fs::metadata(path)?;

    if metadata.len() > MMAP_THRESHOLD {
        // Use memory mapping for large review dumps
        let file = File::open(path)?;

        // Safety: the mapping is read-only and dropped before the run ends
        let mmap = unsafe { Mmap::map(&file) }?;

        Ok(FileContent::Mapped(mmap))
    } else {
        Ok(FileContent::Buffered(fs::read(path)?))
    }
}

/// Replace `path` with `data` through a same-directory temp file.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    tmp.persist(path)
        .with_context(|| format!("Failed to persist {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_small_file_buffered() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("a.txt");
        fs::write(&p, "hello").unwrap();

        let content = read_file_smart(&p).unwrap();
        assert!(matches!(content, FileContent::Buffered(_)));
        assert_eq!(content.as_str(), Some("hello"));
    }

    #[test]
    fn test_read_large_file_mapped() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("big.txt");
        fs::write(&p, "x".repeat(MMAP_THRESHOLD as usize + 10)).unwrap();

        let content = read_file_smart(&p).unwrap();
        assert!(matches!(content, FileContent::Mapped(_)));
        assert_eq!(content.as_bytes().len(), MMAP_THRESHOLD as usize + 10);
    }

    #[test]
    fn test_invalid_utf8_has_no_str_view() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("bin.dat");
        fs::write(&p, [0xff, 0xfe, 0x00]).unwrap();

        let content = read_file_smart(&p).unwrap();
        assert!(content.as_str().is_none());
    }

    #[test]
    fn test_write_atomic_creates_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("out/words.csv");

        write_atomic(&p, b"first").unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "first");

        write_atomic(&p, b"second").unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "second");
    }
}
