//! # Watermark Service
//!
//! Owns the pieces every operation needs: the derivation salt, the record
//! signer, the open ledger, and the watermark scheme. Construct once at
//! startup from a [`ServiceConfig`]; the issue and verify operations live
//! in their own modules as further `impl` blocks.

use std::sync::Arc;

use pvw_crypto::{RecordSigner, ServerSalt};
use pvw_ledger::{Ledger, LedgerEntry, LedgerRecord};
use pvw_watermark::{Detector, Embedder, TagWatermark};

use crate::config::ServiceConfig;
use crate::error::ServiceError;

/// Endpoint label bound into issuance PoW material.
pub const ISSUE_ENDPOINT: &str = "/issue";
/// Endpoint label bound into verification PoW material.
pub const VERIFY_ENDPOINT: &str = "/verify";

/// The issuance and verification engine.
pub struct WatermarkService {
    pub(crate) salt: ServerSalt,
    pub(crate) signer: RecordSigner,
    pub(crate) ledger: Ledger,
    pub(crate) embedder: Arc<dyn Embedder>,
    pub(crate) detector: Arc<dyn Detector>,
}

impl WatermarkService {
    /// Build a service with the default tag watermark scheme.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let scheme = Arc::new(TagWatermark::new());
        Self::with_scheme(config, scheme.clone(), scheme)
    }

    /// Build a service around a custom watermark scheme.
    pub fn with_scheme(
        config: ServiceConfig,
        embedder: Arc<dyn Embedder>,
        detector: Arc<dyn Detector>,
    ) -> Result<Self, ServiceError> {
        let (data_dir, salt, key) = config.into_parts();
        let ledger = Ledger::open_in(&data_dir)?;
        Ok(Self {
            salt,
            signer: RecordSigner::new(key),
            ledger,
            embedder,
            detector,
        })
    }

    /// The ledger this service appends to.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Sign a record, seal it into an entry, and append it.
    ///
    /// Shared tail of both operations: the signature covers the record's
    /// canonical bytes, the txid is derived from the same bytes, and the
    /// entry only exists once the append has synced.
    pub(crate) fn record_and_sign(
        &self,
        record: LedgerRecord,
    ) -> Result<(LedgerEntry, pvw_crypto::RecordSignature), ServiceError> {
        let canonical = record.canonical()?;
        let signature = self.signer.sign(&canonical)?;
        let entry = LedgerEntry::seal(record, signature.to_hex())?;
        self.ledger.append(&entry)?;
        Ok((entry, signature))
    }
}

impl std::fmt::Debug for WatermarkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatermarkService")
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}
