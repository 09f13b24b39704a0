use std::{
    fs::File,
    io::{BufReader, ErrorKind},
    path::{Path, PathBuf},
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

pub const SETTINGS_FILE: &str = "settings.json";

/// Runtime configuration: the fixed local data path, the hosted document
/// URL and its static access key. Built-in defaults point at the public
/// jsonbin document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub local_store_path: PathBuf,
    pub remote_url: String,
    pub access_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            local_store_path: PathBuf::from("data/projects.json"),
            remote_url: "https://api.jsonbin.io/v3/b/692e2805d0ea881f400c8db8"
                .to_string(),
            access_key: "$2a$10$NX48S.xIMBthvl87eXBKcuy4u/MaFENMSuzWTbwJWbrAjMcxNFwnC"
                .to_string(),
        }
    }
}

impl Settings {
    /// An absent file falls back to the built-in defaults; a malformed one
    /// is an error so it gets fixed instead of silently ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!("no settings file at {:?}, using defaults", path);
                return Ok(Settings::default());
            }
            Err(error) => return Err(error.into()),
        };
        let settings: Settings = serde_json::from_reader(BufReader::new(file))?;
        info!("settings loaded from {:?}", path);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn absent_file_gives_defaults() {
        let dir = TempDir::new("folio-settings").unwrap();
        let settings = Settings::load(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = TempDir::new("folio-settings").unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "access_key": "secret" }"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.access_key, "secret");
        assert_eq!(settings.remote_url, Settings::default().remote_url);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new("folio-settings").unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, b"{").unwrap();
        assert!(Settings::load(&path).is_err());
    }
}
