//! Flat-file persistence.
//!
//! The registry lives in five record-block files plus a two-line academic
//! calendar file (see [`codec`] for the field layouts). Loading reads
//! everything once at startup; after each successful command the mutated
//! collection is rewritten in full through a [`Persist`] sink.
//!
//! # Usage
//!
//! ```no_run
//! use u_enrollment::config::Config;
//! use u_enrollment::store::FileStore;
//!
//! let store = FileStore::new(Config::default());
//! let registry = store.load().expect("registry data");
//! println!("{} students", registry.students.len());
//! ```

pub mod codec;
pub mod records;

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::registry::{Collection, Registry};

use records::{read_blocks, write_blocks, Block};

/// Destination for rewritten collections.
pub trait Persist {
    /// Rewrites every member of `collection`.
    fn persist(&mut self, registry: &Registry, collection: Collection) -> StoreResult<()>;
}

/// Record-block files under the configured data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    config: Config,
}

impl FileStore {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads the calendar and all five collections.
    ///
    /// Any unreadable file or malformed record is an error; nothing is
    /// skipped.
    pub fn load(&self) -> StoreResult<Registry> {
        let calendar_path = self.config.calendar_path();
        let text = read(&calendar_path)?;
        let calendar = codec::decode_calendar(&text)
            .map_err(|reason| StoreError::malformed(&self.config.files.calendar, 1, reason))?;
        let mut registry = Registry::new(calendar);

        for collection in Collection::ALL {
            self.load_collection(&mut registry, collection)?;
            info!(
                "loaded {} {} from {}",
                registry.len_of(collection),
                collection,
                self.config.path_of(collection).display()
            );
        }
        Ok(registry)
    }

    fn load_collection(&self, registry: &mut Registry, collection: Collection) -> StoreResult<()> {
        let file = self.config.files.name_of(collection);
        let text = read(&self.config.path_of(collection))?;
        for (n, block) in read_blocks(&text).iter().enumerate() {
            decode_into(registry, collection, block)
                .map_err(|reason| StoreError::malformed(file, n + 1, reason))?;
        }
        Ok(())
    }

    /// Writes the calendar and every collection.
    pub fn save_all(&self, registry: &Registry) -> StoreResult<()> {
        let path = self.config.calendar_path();
        fs::write(&path, codec::encode_calendar(&registry.calendar))
            .map_err(|e| StoreError::io(&path, e))?;
        for collection in Collection::ALL {
            self.write_collection(registry, collection)?;
        }
        Ok(())
    }

    fn write_collection(&self, registry: &Registry, collection: Collection) -> StoreResult<()> {
        let path = self.config.path_of(collection);
        fs::write(&path, encode(registry, collection)).map_err(|e| StoreError::io(&path, e))?;
        debug!("wrote {} to {}", collection, path.display());
        Ok(())
    }
}

impl Persist for FileStore {
    fn persist(&mut self, registry: &Registry, collection: Collection) -> StoreResult<()> {
        self.write_collection(registry, collection)
    }
}

/// Keeps rewritten collections in memory, in persist order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Collections persisted so far, with their encoded contents.
    pub persisted: Vec<(Collection, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collections persisted so far.
    pub fn collections(&self) -> Vec<Collection> {
        self.persisted.iter().map(|(c, _)| *c).collect()
    }
}

impl Persist for MemoryStore {
    fn persist(&mut self, registry: &Registry, collection: Collection) -> StoreResult<()> {
        self.persisted.push((collection, encode(registry, collection)));
        Ok(())
    }
}

fn read(path: &Path) -> StoreResult<String> {
    fs::read_to_string(path).map_err(|e| StoreError::io(path, e))
}

fn decode_into(
    registry: &mut Registry,
    collection: Collection,
    block: &Block,
) -> Result<(), String> {
    match collection {
        Collection::Classrooms => registry.insert_classroom(codec::decode_classroom(block)?),
        Collection::Subjects => registry.insert_subject(codec::decode_subject(block)?),
        Collection::Quotas => registry.insert_quota(codec::decode_quota(block)?),
        Collection::Teachers => registry.insert_teacher(codec::decode_teacher(block)?),
        Collection::Students => registry.insert_student(codec::decode_student(block)?),
    }
    Ok(())
}

/// Encodes every member of a collection into file contents.
pub fn encode(registry: &Registry, collection: Collection) -> String {
    match collection {
        Collection::Classrooms => {
            write_blocks(registry.classrooms.values().map(codec::encode_classroom))
        }
        Collection::Subjects => write_blocks(registry.subjects.values().map(codec::encode_subject)),
        Collection::Quotas => write_blocks(registry.quotas.values().map(codec::encode_quota)),
        Collection::Teachers => write_blocks(registry.teachers.values().map(codec::encode_teacher)),
        Collection::Students => write_blocks(registry.students.values().map(codec::encode_student)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::sample_registry;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::new(Config::default().with_data_dir(dir.path()))
    }

    #[test]
    fn test_write_then_load_is_lossless() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let registry = sample_registry()
            .with_student(
                crate::models::Student::new(
                    "55555555K",
                    "Eva Sanz",
                    crate::registry::tests::date(2000, 1, 2),
                    crate::registry::tests::date(2018, 9, 3),
                )
                .with_email("eva@example.org")
                .with_passed("MATH", "17/18", 9.25),
            );
        store.save_all(&registry).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, registry);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = store_in(&dir).load().unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_missing_calendar_is_fatal() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save_all(&sample_registry()).unwrap();
        fs::remove_file(dir.path().join("cursoAcademico.txt")).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("cursoAcademico.txt"));
    }

    #[test]
    fn test_malformed_record_names_file_and_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save_all(&sample_registry()).unwrap();
        fs::write(dir.path().join("aulas.txt"), "AUL1\nA\n60\n*\nAUL2\nA\nlots\n").unwrap();

        let err = store.load().unwrap_err();
        assert_eq!(
            err.to_string(),
            "aulas.txt, record 2: capacity is not a number: lots"
        );
    }

    #[test]
    fn test_persist_rewrites_one_collection() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let mut registry = sample_registry();
        store.save_all(&registry).unwrap();

        registry.insert_classroom(crate::models::Classroom::lab("LAB2", 12));
        store.persist(&registry, Collection::Classrooms).unwrap();

        let text = fs::read_to_string(dir.path().join("aulas.txt")).unwrap();
        assert!(text.contains("LAB2\nB\n12"));
        assert_eq!(store.load().unwrap().classrooms.len(), 4);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        let registry = sample_registry();
        store.persist(&registry, Collection::Quotas).unwrap();
        assert_eq!(store.collections(), vec![Collection::Quotas]);
        assert!(store.persisted[0].1.contains("22222222B\nALGO\nA\n1.0"));
    }
}
