//! Embedded content retrieval.

use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use crate::error::{io_err, RuntimeError};

/// Opens the embedded content behind a record's resource path.
pub trait ResourceSource {
    fn open(&self, resource_path: &str) -> Result<Box<dyn Read + Send>, RuntimeError>;
}

/// Reads resources from the mirrored copies under a project directory.
///
/// Resource paths are the descriptor storage paths, `\`- or `/`-separated.
#[derive(Debug, Clone)]
pub struct MirrorResources {
    project_dir: PathBuf,
}

impl MirrorResources {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn resolve(&self, resource_path: &str) -> PathBuf {
        resource_path
            .split(['\\', '/'])
            .filter(|s| !s.is_empty())
            .fold(self.project_dir.clone(), |acc, s| acc.join(s))
    }
}

impl ResourceSource for MirrorResources {
    fn open(&self, resource_path: &str) -> Result<Box<dyn Read + Send>, RuntimeError> {
        let path = self.resolve(resource_path);
        match std::fs::File::open(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(RuntimeError::ResourceNotFound {
                resource_path: resource_path.to_string(),
            }),
            Err(err) => Err(io_err(path, err)),
        }
    }
}
