//! Snapshot and restore of trained artifacts.
//!
//! The search artifact is stored as three files (vectorizer, matrix,
//! document table) and the classifier as one. Every file is a bincode
//! envelope carrying a header and the encoded payload:
//!
//! ```text
//! ArtifactHeader { format_version, kind, generation, trained_at, rows, checksum }
//! payload: bincode bytes of the part
//! ```
//!
//! Each file is written to a temporary name and renamed into place, so a
//! single file is never observed half written. The three search files are
//! not written transactionally; a crash between renames leaves files from
//! two generations, which loading detects through the shared generation id
//! and refuses.

use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::ClassifierArtifact;
use crate::error::{Result, SaffronError};
use crate::index::{DocumentRecord, SearchArtifact};
use crate::storage::{FileStorage, Storage, StorageOutput};
use crate::vectorize::{SparseVector, TfidfVectorizer};

/// Version of the on-disk envelope.
const FORMAT_VERSION: u32 = 1;

/// What a stored file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    Vectorizer,
    Matrix,
    Documents,
    Classifier,
}

/// Metadata stored in front of every payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactHeader {
    pub format_version: u32,
    pub kind: ArtifactKind,
    pub generation: Uuid,
    pub trained_at: DateTime<Utc>,
    /// Documents (search files) or classes (classifier file).
    pub rows: usize,
    /// CRC32 of the payload.
    pub checksum: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    header: ArtifactHeader,
    payload: Vec<u8>,
}

/// Saves and loads trained artifacts through a [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    storage: Arc<dyn Storage>,
}

impl ArtifactStore {
    pub const VECTORIZER_FILE: &'static str = "tfidf_vectorizer.bin";
    pub const MATRIX_FILE: &'static str = "tfidf_matrix.bin";
    pub const DOCUMENTS_FILE: &'static str = "product_data.bin";
    pub const CLASSIFIER_FILE: &'static str = "naive_bayes_model.bin";

    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Store files in a directory on disk.
    pub fn open<P: AsRef<std::path::Path>>(directory: P) -> Result<Self> {
        Ok(Self::new(Arc::new(FileStorage::new(directory)?)))
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Write the three search files.
    pub fn save_search(&self, artifact: &SearchArtifact) -> Result<()> {
        let generation = artifact.generation();
        let trained_at = artifact.trained_at();
        let rows = artifact.len();

        self.write_file(
            Self::VECTORIZER_FILE,
            header(ArtifactKind::Vectorizer, generation, trained_at, rows),
            artifact.vectorizer(),
        )?;
        self.write_file(
            Self::MATRIX_FILE,
            header(ArtifactKind::Matrix, generation, trained_at, rows),
            artifact.matrix(),
        )?;
        self.write_file(
            Self::DOCUMENTS_FILE,
            header(ArtifactKind::Documents, generation, trained_at, rows),
            artifact.documents(),
        )?;
        info!("TF-IDF model and data saved (generation {generation})");
        Ok(())
    }

    /// Read the search files back.
    ///
    /// Returns `Ok(None)` when none of the files exist. A partial or
    /// mismatched set is an error.
    pub fn load_search(&self) -> Result<Option<SearchArtifact>> {
        let vectorizer =
            self.read_optional::<TfidfVectorizer>(Self::VECTORIZER_FILE, ArtifactKind::Vectorizer)?;
        let matrix =
            self.read_optional::<Vec<SparseVector>>(Self::MATRIX_FILE, ArtifactKind::Matrix)?;
        let documents = self
            .read_optional::<Vec<DocumentRecord>>(Self::DOCUMENTS_FILE, ArtifactKind::Documents)?;

        let (vectorizer, matrix, documents) = match (vectorizer, matrix, documents) {
            (None, None, None) => return Ok(None),
            (Some(v), Some(m), Some(d)) => (v, m, d),
            _ => {
                return Err(SaffronError::persistence(
                    "incomplete search artifact set",
                ));
            }
        };

        let (vh, vectorizer) = vectorizer;
        let (mh, matrix) = matrix;
        let (dh, documents) = documents;

        if vh.generation != mh.generation || vh.generation != dh.generation {
            return Err(SaffronError::persistence(format!(
                "search artifacts come from different trainings ({}, {}, {})",
                vh.generation, mh.generation, dh.generation
            )));
        }
        if matrix.len() != mh.rows || documents.len() != dh.rows || mh.rows != vh.rows {
            return Err(SaffronError::persistence(format!(
                "search artifact row counts disagree: matrix {}, documents {}",
                matrix.len(),
                documents.len()
            )));
        }

        let artifact =
            SearchArtifact::from_parts(vectorizer, matrix, documents, vh.generation, vh.trained_at)
                .map_err(|e| SaffronError::persistence(e.to_string()))?;
        info!(
            "TF-IDF model and data loaded: {} products (generation {})",
            artifact.len(),
            artifact.generation()
        );
        Ok(Some(artifact))
    }

    /// Write the classifier file.
    pub fn save_classifier(&self, artifact: &ClassifierArtifact) -> Result<()> {
        self.write_file(
            Self::CLASSIFIER_FILE,
            header(
                ArtifactKind::Classifier,
                artifact.generation(),
                artifact.trained_at(),
                artifact.classes().len(),
            ),
            artifact,
        )?;
        info!("Naive Bayes model saved (generation {})", artifact.generation());
        Ok(())
    }

    /// Read the classifier back; `Ok(None)` when it was never saved.
    pub fn load_classifier(&self) -> Result<Option<ClassifierArtifact>> {
        let Some((_, artifact)) = self
            .read_optional::<ClassifierArtifact>(Self::CLASSIFIER_FILE, ArtifactKind::Classifier)?
        else {
            return Ok(None);
        };
        info!(
            "Naive Bayes model loaded: {} classes (generation {})",
            artifact.classes().len(),
            artifact.generation()
        );
        Ok(Some(artifact))
    }

    fn write_file<T: Serialize + ?Sized>(
        &self,
        name: &str,
        mut header: ArtifactHeader,
        value: &T,
    ) -> Result<()> {
        let payload = bincode::serialize(value)?;
        header.checksum = crc32fast::hash(&payload);
        let bytes = bincode::serialize(&Envelope { header, payload })?;

        let (temp_name, mut output) = self.storage.create_temp_output(name)?;
        let written = write_bytes(output.as_mut(), &bytes);
        drop(output);
        if let Err(e) = written {
            let _ = self.storage.delete_file(&temp_name);
            return Err(SaffronError::persistence(format!(
                "Failed to write '{name}': {e}"
            )));
        }

        if let Err(e) = self.storage.rename_file(&temp_name, name) {
            let _ = self.storage.delete_file(&temp_name);
            return Err(e);
        }
        debug!("wrote {name} ({} bytes)", bytes.len());
        Ok(())
    }

    fn read_optional<T: DeserializeOwned>(
        &self,
        name: &str,
        kind: ArtifactKind,
    ) -> Result<Option<(ArtifactHeader, T)>> {
        match self.read_file(name, kind) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => {
                debug!("{name} not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn read_file<T: DeserializeOwned>(
        &self,
        name: &str,
        kind: ArtifactKind,
    ) -> Result<(ArtifactHeader, T)> {
        let bytes = self.storage.read_all(name)?;
        let envelope: Envelope = bincode::deserialize(&bytes)
            .map_err(|e| SaffronError::persistence(format!("'{name}' is unreadable: {e}")))?;
        let header = envelope.header;

        if header.format_version != FORMAT_VERSION {
            return Err(SaffronError::persistence(format!(
                "'{name}' has format version {}, expected {FORMAT_VERSION}",
                header.format_version
            )));
        }
        if header.kind != kind {
            return Err(SaffronError::persistence(format!(
                "'{name}' holds {:?}, expected {kind:?}",
                header.kind
            )));
        }
        if crc32fast::hash(&envelope.payload) != header.checksum {
            return Err(SaffronError::persistence(format!(
                "'{name}' failed its checksum"
            )));
        }

        let value = bincode::deserialize(&envelope.payload)
            .map_err(|e| SaffronError::persistence(format!("'{name}' is unreadable: {e}")))?;
        Ok((header, value))
    }
}

fn header(
    kind: ArtifactKind,
    generation: Uuid,
    trained_at: DateTime<Utc>,
    rows: usize,
) -> ArtifactHeader {
    ArtifactHeader {
        format_version: FORMAT_VERSION,
        kind,
        generation,
        trained_at,
        rows,
        checksum: 0,
    }
}

fn write_bytes(output: &mut dyn StorageOutput, bytes: &[u8]) -> Result<()> {
    output.write_all(bytes)?;
    output.flush_and_sync()
}
