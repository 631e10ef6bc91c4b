//! # Ledger Store
//!
//! Append-only, newline-delimited JSON on a local file. One entry per
//! line; every line is a self-contained [`LedgerEntry`].
//!
//! ## Append discipline
//!
//! A single `parking_lot::Mutex` serializes writers in-process, and each
//! entry goes out as one `write_all` of the full line (newline included)
//! followed by flush and `sync_data`. Lines are therefore never
//! interleaved by this process, and a crash can at worst truncate the final
//! line — which readers already tolerate.
//!
//! ## Read discipline
//!
//! Lookups scan from the start and return the **first** match, so an entry
//! can never be superseded by a later line claiming the same txid. Lines
//! that fail to decode are skipped with a warning rather than aborting the
//! scan; a torn tail or a foreign line does not poison the records around
//! it.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use pvw_core::TxId;

use crate::error::LedgerError;
use crate::record::{LedgerEntry, LedgerRecord};

/// Default ledger filename under a data directory.
pub const LEDGER_FILE: &str = "ledger.jsonl";

/// Append-only ledger over a jsonl file.
pub struct Ledger {
    path: PathBuf,
    writer: Mutex<File>,
}

impl Ledger {
    /// Open (creating if absent) the ledger at `path`.
    ///
    /// Parent directories are created as needed. The file is opened in
    /// append mode; existing entries are never touched.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!(path = %path.display(), "ledger opened");
        Ok(Self {
            path,
            writer: Mutex::new(file),
        })
    }

    /// Open the ledger at its default filename under `data_dir`.
    pub fn open_in(data_dir: impl AsRef<Path>) -> Result<Self, LedgerError> {
        Self::open(data_dir.as_ref().join(LEDGER_FILE))
    }

    /// The file this ledger appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a sealed entry, returning its txid.
    pub fn append(&self, entry: &LedgerEntry) -> Result<TxId, LedgerError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = self.writer.lock();
        file.write_all(line.as_bytes())?;
        file.flush()?;
        file.sync_data()?;
        debug!(txid = %entry.txid, "ledger entry appended");
        Ok(entry.txid.clone())
    }

    /// Find the first **issue** entry with the given txid.
    ///
    /// Verify entries with a matching txid do not count: txid lookup exists
    /// to recover an issuance commitment, and the kind check keeps a
    /// crafted verify record from answering for one.
    pub fn find_issue_by_txid(&self, txid: &TxId) -> Result<Option<LedgerEntry>, LedgerError> {
        self.scan(|entry| {
            matches!(entry.record, LedgerRecord::Issue(_)) && &entry.txid == txid
        })
    }

    /// Find the first entry of any kind with the given txid.
    pub fn find_any(&self, txid: &TxId) -> Result<Option<LedgerEntry>, LedgerError> {
        self.scan(|entry| &entry.txid == txid)
    }

    /// Number of decodable entries. Scans the whole file; intended for
    /// tooling and tests, not hot paths.
    pub fn len(&self) -> Result<usize, LedgerError> {
        let mut count = 0;
        self.for_each_entry(|_| {
            count += 1;
            false
        })?;
        Ok(count)
    }

    /// Whether the ledger holds no decodable entries.
    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.len()? == 0)
    }

    fn scan(
        &self,
        mut predicate: impl FnMut(&LedgerEntry) -> bool,
    ) -> Result<Option<LedgerEntry>, LedgerError> {
        let mut found = None;
        self.for_each_entry(|entry| {
            if predicate(&entry) {
                found = Some(entry);
                true
            } else {
                false
            }
        })?;
        Ok(found)
    }

    /// Drive `visit` over decodable entries in file order; `visit` returns
    /// `true` to stop early.
    fn for_each_entry(
        &self,
        mut visit: impl FnMut(LedgerEntry) -> bool,
    ) -> Result<(), LedgerError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<LedgerEntry>(&line) {
                Ok(entry) => {
                    if visit(entry) {
                        break;
                    }
                }
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        line = lineno + 1,
                        error = %e,
                        "skipping undecodable ledger line"
                    );
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger").field("path", &self.path).finish()
    }
}
