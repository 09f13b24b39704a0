use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, ErrorKind},
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::errors::Result;
use crate::types::{ProjectCollection, ProjectRecord};

/// On-device backend: the whole collection lives as one JSON blob under a
/// fixed path (the browser localStorage key, moved to disk).
#[derive(Clone, Debug)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        LocalStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// An absent file is an empty collection, never an error.
    pub fn load(&self) -> Result<ProjectCollection> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("no local data at {:?}, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(error) => return Err(error.into()),
        };
        let reader = BufReader::new(file);
        let projects: ProjectCollection = serde_json::from_reader(reader)?;
        info!("loaded {} projects from {:?}", projects.len(), self.path);
        Ok(projects)
    }

    /// Unconditional overwrite of the whole collection.
    pub fn save(&self, projects: &[ProjectRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, projects)?;
        info!("saved {} projects to {:?}", projects.len(), self.path);
        Ok(())
    }

    /// Writes the stock portfolio entries, but only when no data file exists
    /// yet. A deliberately emptied store is left alone.
    pub fn ensure_seeded(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        info!("seeding local store at {:?}", self.path);
        self.save(&seed_projects())
    }
}

/// Stock portfolio entries for a first run.
pub fn seed_projects() -> ProjectCollection {
    vec![
        ProjectRecord::new(
            "Raft Consensus Core",
            "res/project-cover-raft.webp",
            "Abstract Blue Tech Background",
            "Built a durable and fault-tolerant distributed consensus library \
             in Go by implementing the Raft algorithm with gRPC communication.",
            "pages/projects.html#project1",
            "View Project",
        ),
        ProjectRecord::new(
            "Distributed KV Store",
            "res/project-cover-kv.png",
            "Rust Logo",
            "Implemented a fault-tolerant, Rust-based key-value store featuring \
             a gRPC control plane with Lamport-clock convergence.",
            "pages/projects.html#project2",
            "View Project",
        ),
        ProjectRecord::new(
            "DB Management Kernel",
            "res/project-cover-dbms.webp",
            "C++ Logo",
            "Developed a high-performance C++ database kernel from scratch, \
             implementing a paged file manager and B+ tree indexing.",
            "pages/projects.html#project3",
            "View Project",
        ),
    ]
}
