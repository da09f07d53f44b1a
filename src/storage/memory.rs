//! In-memory storage implementation for testing.

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Result, SaffronError};
use crate::storage::{Storage, StorageInput, StorageOutput};

type FileMap = Arc<Mutex<HashMap<String, Box<[u8]>>>>;

/// An in-memory storage implementation.
///
/// Clones share the same files, so a test can keep a handle while an engine
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: FileMap,
}

impl MemoryStorage {
    /// Create a new, empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of files stored.
    pub fn file_count(&self) -> usize {
        self.files.lock().len()
    }

    /// Overwrite a file directly.
    pub fn put(&self, name: &str, data: &[u8]) {
        self.files.lock().insert(name.to_string(), data.into());
    }
}

impl Storage for MemoryStorage {
    fn open_input(&self, name: &str) -> Result<Box<dyn StorageInput>> {
        let files = self.files.lock();
        let data = files
            .get(name)
            .ok_or_else(|| SaffronError::not_found(format!("file '{name}'")))?;
        Ok(Box::new(MemoryInput {
            cursor: Cursor::new(data.to_vec()),
        }))
    }

    fn create_output(&self, name: &str) -> Result<Box<dyn StorageOutput>> {
        Ok(Box::new(MemoryOutput {
            name: name.to_string(),
            buffer: Vec::new(),
            files: Arc::clone(&self.files),
        }))
    }

    fn file_exists(&self, name: &str) -> bool {
        self.files.lock().contains_key(name)
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        self.files.lock().remove(name);
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.files.lock().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn rename_file(&self, old_name: &str, new_name: &str) -> Result<()> {
        let mut files = self.files.lock();
        let data = files
            .remove(old_name)
            .ok_or_else(|| SaffronError::not_found(format!("file '{old_name}'")))?;
        files.insert(new_name.to_string(), data);
        Ok(())
    }
}

/// Reader over a snapshot of an in-memory file.
#[derive(Debug)]
pub struct MemoryInput {
    cursor: Cursor<Vec<u8>>,
}

impl Read for MemoryInput {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl StorageInput for MemoryInput {
    fn size(&self) -> Result<u64> {
        Ok(self.cursor.get_ref().len() as u64)
    }
}

/// Writer that publishes its buffer to the file map on flush.
#[derive(Debug)]
pub struct MemoryOutput {
    name: String,
    buffer: Vec<u8>,
    files: FileMap,
}

impl Write for MemoryOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.files
            .lock()
            .insert(self.name.clone(), self.buffer.clone().into_boxed_slice());
        Ok(())
    }
}

impl StorageOutput for MemoryOutput {
    fn flush_and_sync(&mut self) -> Result<()> {
        self.flush()?;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.buffer.len() as u64
    }
}

impl Drop for MemoryOutput {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_rename() {
        let storage = MemoryStorage::new();
        let (temp_name, mut output) = storage.create_temp_output("matrix.bin").unwrap();
        output.write_all(b"rows").unwrap();
        output.flush_and_sync().unwrap();
        drop(output);

        storage.rename_file(&temp_name, "matrix.bin").unwrap();
        assert_eq!(storage.read_all("matrix.bin").unwrap(), b"rows");
        assert_eq!(storage.list_files().unwrap(), vec!["matrix.bin"]);
        assert_eq!(storage.file_count(), 1);
    }

    #[test]
    fn test_open_temp_outputs_never_share_a_name() {
        let storage = MemoryStorage::new();
        let (first_name, mut first) = storage.create_temp_output("matrix.bin").unwrap();
        let (second_name, mut second) = storage.create_temp_output("matrix.bin").unwrap();
        assert_ne!(first_name, second_name);

        first.write_all(b"first").unwrap();
        second.write_all(b"second").unwrap();
        drop(first);
        drop(second);

        assert_eq!(storage.read_all(&first_name).unwrap(), b"first");
        assert_eq!(storage.read_all(&second_name).unwrap(), b"second");
    }

    #[test]
    fn test_clones_share_files() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.put("a.bin", b"1");
        assert!(handle.file_exists("a.bin"));
        handle.delete_file("a.bin").unwrap();
        assert!(!storage.file_exists("a.bin"));
    }

    #[test]
    fn test_missing_file() {
        let storage = MemoryStorage::new();
        assert!(storage.open_input("none").unwrap_err().is_not_found());
        assert!(storage.rename_file("none", "other").is_err());
    }
}
