//! Runtime configuration.
//!
//! Every field has a default, so an empty (or absent) TOML file yields the
//! stock layout: data files under `data/`, commands in `ejecucion.txt`,
//! notices appended to `avisos.txt`.
//!
//! ```toml
//! data_dir = "registry"
//! script = "commands.txt"
//!
//! [files]
//! students = "students.txt"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::registry::Collection;

/// Configuration file failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// File names of the registry data, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub classrooms: String,
    pub subjects: String,
    pub quotas: String,
    pub teachers: String,
    pub students: String,
    /// Academic-year label and starting week.
    pub calendar: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            classrooms: "aulas.txt".into(),
            subjects: "asignaturas.txt".into(),
            quotas: "pod.txt".into(),
            teachers: "profesores.txt".into(),
            students: "alumnos.txt".into(),
            calendar: "cursoAcademico.txt".into(),
        }
    }
}

impl DataFiles {
    /// File name backing a collection.
    pub fn name_of(&self, collection: Collection) -> &str {
        match collection {
            Collection::Classrooms => &self.classrooms,
            Collection::Subjects => &self.subjects,
            Collection::Quotas => &self.quotas,
            Collection::Teachers => &self.teachers,
            Collection::Students => &self.students,
        }
    }
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the data files.
    pub data_dir: PathBuf,
    pub files: DataFiles,
    /// Command script.
    pub script: PathBuf,
    /// Notice log, appended to.
    pub notice_log: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            files: DataFiles::default(),
            script: PathBuf::from("ejecucion.txt"),
            notice_log: PathBuf::from("avisos.txt"),
        }
    }
}

impl Config {
    /// Loads a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Sets the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Sets the command script.
    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = script.into();
        self
    }

    /// Sets the notice log.
    pub fn with_notice_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.notice_log = path.into();
        self
    }

    /// Full path of a collection's backing file.
    pub fn path_of(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(self.files.name_of(collection))
    }

    /// Full path of the academic calendar file.
    pub fn calendar_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.path_of(Collection::Quotas), PathBuf::from("data/pod.txt"));
        assert_eq!(c.calendar_path(), PathBuf::from("data/cursoAcademico.txt"));
        assert_eq!(c.notice_log, PathBuf::from("avisos.txt"));
    }

    #[test]
    fn test_partial_toml() {
        let c: Config = toml::from_str(
            r#"
            data_dir = "registry"

            [files]
            students = "students.txt"
            "#,
        )
        .unwrap();
        assert_eq!(c.path_of(Collection::Students), PathBuf::from("registry/students.txt"));
        assert_eq!(c.path_of(Collection::Classrooms), PathBuf::from("registry/aulas.txt"));
        assert_eq!(c.script, PathBuf::from("ejecucion.txt"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "script = \"run.txt\"").unwrap();
        let c = Config::from_file(file.path()).unwrap();
        assert_eq!(c.script, PathBuf::from("run.txt"));

        assert!(matches!(
            Config::from_file("/nonexistent/u-enrollment.toml"),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_dir = [").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_builders() {
        let c = Config::default()
            .with_data_dir("/tmp/reg")
            .with_script("s.txt")
            .with_notice_log("n.txt");
        assert_eq!(c.path_of(Collection::Teachers), PathBuf::from("/tmp/reg/profesores.txt"));
        assert_eq!(c.script, PathBuf::from("s.txt"));
    }
}
