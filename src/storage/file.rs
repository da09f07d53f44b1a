//! File-based storage implementation.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SaffronError};
use crate::storage::{Storage, StorageInput, StorageOutput};

/// Default I/O buffer size.
const BUFFER_SIZE: usize = 64 * 1024;

/// Storage rooted in a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// The root directory for storage.
    directory: PathBuf,
}

impl FileStorage {
    /// Open file storage in `directory`, creating it if needed.
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            std::fs::create_dir_all(&directory)
                .map_err(|e| SaffronError::storage(format!("Failed to create directory: {e}")))?;
        }

        if !directory.is_dir() {
            return Err(SaffronError::storage(format!(
                "Path is not a directory: {}",
                directory.display()
            )));
        }

        Ok(FileStorage { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }
}

fn io_error(name: &str, e: std::io::Error) -> SaffronError {
    if e.kind() == std::io::ErrorKind::NotFound {
        SaffronError::not_found(format!("file '{name}'"))
    } else {
        SaffronError::storage(format!("'{name}': {e}"))
    }
}

impl Storage for FileStorage {
    fn open_input(&self, name: &str) -> Result<Box<dyn StorageInput>> {
        let file = File::open(self.file_path(name)).map_err(|e| io_error(name, e))?;
        let size = file.metadata().map_err(|e| io_error(name, e))?.len();
        Ok(Box::new(FileInput {
            reader: BufReader::with_capacity(BUFFER_SIZE, file),
            size,
        }))
    }

    fn create_output(&self, name: &str) -> Result<Box<dyn StorageOutput>> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.file_path(name))
            .map_err(|e| io_error(name, e))?;
        Ok(Box::new(FileOutput {
            writer: BufWriter::with_capacity(BUFFER_SIZE, file),
            position: 0,
        }))
    }

    fn file_exists(&self, name: &str) -> bool {
        self.file_path(name).exists()
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        let path = self.file_path(name);
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| SaffronError::storage(format!("Failed to delete file: {e}")))?;
        }
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        let entries = std::fs::read_dir(&self.directory)
            .map_err(|e| SaffronError::storage(e.to_string()))?;
        for entry in entries {
            let path = entry.map_err(|e| SaffronError::storage(e.to_string()))?.path();
            if path.is_file() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    files.push(name.to_string());
                }
            }
        }
        files.sort();
        Ok(files)
    }

    fn rename_file(&self, old_name: &str, new_name: &str) -> Result<()> {
        std::fs::rename(self.file_path(old_name), self.file_path(new_name))
            .map_err(|e| SaffronError::storage(format!("Failed to rename file: {e}")))
    }
}

/// A buffered file reader.
#[derive(Debug)]
pub struct FileInput {
    reader: BufReader<File>,
    size: u64,
}

impl Read for FileInput {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl StorageInput for FileInput {
    fn size(&self) -> Result<u64> {
        Ok(self.size)
    }
}

/// A buffered file writer.
#[derive(Debug)]
pub struct FileOutput {
    writer: BufWriter<File>,
    position: u64,
}

impl Write for FileOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.writer.write(buf)?;
        self.position += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl StorageOutput for FileOutput {
    fn flush_and_sync(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("artifacts")).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_and_read_file() {
        let (_dir, storage) = create_test_storage();

        let mut output = storage.create_output("model.bin").unwrap();
        output.write_all(b"saffron").unwrap();
        output.flush_and_sync().unwrap();
        assert_eq!(output.position(), 7);
        drop(output);

        assert!(storage.file_exists("model.bin"));
        assert_eq!(storage.read_all("model.bin").unwrap(), b"saffron");
        assert_eq!(storage.list_files().unwrap(), vec!["model.bin"]);
    }

    #[test]
    fn test_temp_file_rename_replaces_target() {
        let (_dir, storage) = create_test_storage();
        let mut output = storage.create_output("data.bin").unwrap();
        output.write_all(b"old").unwrap();
        output.flush_and_sync().unwrap();
        drop(output);

        let (temp_name, mut temp) = storage.create_temp_output("data.bin").unwrap();
        temp.write_all(b"new").unwrap();
        temp.flush_and_sync().unwrap();
        drop(temp);
        storage.rename_file(&temp_name, "data.bin").unwrap();

        assert_eq!(storage.read_all("data.bin").unwrap(), b"new");
        assert!(!storage.file_exists(&temp_name));
    }

    #[test]
    fn test_file_not_found() {
        let (_dir, storage) = create_test_storage();
        let err = storage.open_input("missing.bin").unwrap_err();
        assert!(err.is_not_found());
        storage.delete_file("missing.bin").unwrap();
    }

    #[test]
    fn test_path_must_be_directory() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("plain");
        std::fs::write(&file_path, b"x").unwrap();
        assert!(FileStorage::new(&file_path).is_err());
    }
}
