pub mod types;

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, error};

use self::types::WalletRecord;
use crate::errors::WalletError;

const LEDGER_EXTENSION: &str = "txt";
const LEDGER_PREFIX: &str = "wallets-";

/// Directory holding every ledger file, one `wallets-<name>.txt` per batch.
#[derive(Debug, Clone)]
pub struct LedgerDir {
    root: PathBuf,
}

/// A single ledger file. Line order is the 1-based wallet index.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl LedgerDir {
    pub fn new(root: impl Into<PathBuf>) -> LedgerDir {
        LedgerDir { root: root.into() }
    }

    pub fn ensure(&self) -> Result<(), WalletError> {
        fs::create_dir_all(&self.root).map_err(|err| WalletError::persistence(&self.root, err))
    }

    /// `""` maps to `wallets.txt`, anything else to `wallets-<name>.txt`.
    pub fn ledger(&self, name: &str) -> Ledger {
        let file_name = if name.is_empty() {
            format!("wallets.{LEDGER_EXTENSION}")
        } else {
            format!("{LEDGER_PREFIX}{name}.{LEDGER_EXTENSION}")
        };
        Ledger {
            path: self.root.join(file_name),
        }
    }

    /// File names of all ledgers in the directory, sorted.
    pub fn scan(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                error!("Failed to list ledgers in {}: {err}", self.root.display());
                return Vec::new();
            }
        };

        let mut files: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(&format!(".{LEDGER_EXTENSION}")))
            .collect();
        files.sort();
        files
    }
}

/// Ledger name a file was created under: `wallets-a.txt` -> `a`, `other.txt` -> `other`.
pub fn ledger_name(file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(&format!(".{LEDGER_EXTENSION}"))
        .unwrap_or(file_name);
    if stem == "wallets" {
        return String::new();
    }
    stem.strip_prefix(LEDGER_PREFIX).unwrap_or(stem).to_string()
}

impl Ledger {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in file order. A missing file is an empty ledger; any other
    /// failure is logged and also degrades to an empty ledger.
    pub fn load(&self) -> Vec<WalletRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(err) => {
                error!("{err}");
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Vec<WalletRecord>, WalletError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("Ledger {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(WalletError::persistence(&self.path, err)),
        };

        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(position, line)| {
                line.parse::<WalletRecord>().map_err(|err| {
                    WalletError::persistence(&self.path, format!("id {}: {err}", position + 1))
                })
            })
            .collect()
    }

    /// Replaces the whole file. The new content is written to a temporary file
    /// next to the ledger and renamed over it, so readers never see a partial write.
    pub fn save(&self, records: &[WalletRecord]) -> Result<(), WalletError> {
        let directory = self.directory();
        fs::create_dir_all(directory).map_err(|err| WalletError::persistence(&self.path, err))?;

        let mut contents = String::new();
        for record in records {
            contents.push_str(&record.to_string());
            contents.push('\n');
        }

        let mut staging =
            NamedTempFile::new_in(directory).map_err(|err| WalletError::persistence(&self.path, err))?;
        staging
            .write_all(contents.as_bytes())
            .and_then(|_| staging.as_file().sync_all())
            .map_err(|err| WalletError::persistence(&self.path, err))?;
        staging
            .persist(&self.path)
            .map_err(|err| WalletError::persistence(&self.path, err.error))?;

        Ok(())
    }

    /// Appends one unresolved record without touching the rest of the file.
    pub fn append(&self, private_key: &str) -> Result<(), WalletError> {
        fs::create_dir_all(self.directory())
            .map_err(|err| WalletError::persistence(&self.path, err))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| WalletError::persistence(&self.path, err))?;
        writeln!(file, "{private_key}").map_err(|err| WalletError::persistence(&self.path, err))
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

/// Attaches `address` to the record holding `private_key`. Every other record
/// passes through untouched and order is preserved.
pub fn update_with_address(
    records: Vec<WalletRecord>,
    private_key: &str,
    address: &str,
) -> Vec<WalletRecord> {
    records
        .into_iter()
        .map(|record| {
            if record.private_key() == private_key {
                record.with_address(address)
            } else {
                record
            }
        })
        .collect()
}
