//! Gene identifier/symbol pair refreshed from the gene-name service
//!
//! Lookups run on a worker thread and report back over a channel, the same
//! way background jobs do; [`Gene::poll`] applies finished lookups on the UI
//! thread.

use super::notification::{Notification, Notifier};
use crate::error::{GeneError, LookupError};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, LazyLock};
use std::thread;
use std::time::{Duration, Instant};

/// Stable Ensembl gene accession, e.g. ENSG00000169181
static ENSEMBL_GENE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ENS[A-Z]*G\d{11}(\.\d+)?$").unwrap());

/// Remote lookup keyed by a gene identifier or symbol
pub trait GeneNameService: Send + Sync {
    /// Fetch the raw response body for `key`
    fn lookup(&self, key: &str) -> Result<String, LookupError>;
}

/// Called once a refresh has settled, whatever the outcome
pub type Completion = Box<dyn FnOnce(&Gene)>;

/// Payload fields the service must provide
#[derive(Debug, Deserialize)]
struct GeneNameRecord {
    id: String,
    symbol: String,
}

/// Worker result tagged with the refresh that issued it
struct Settled {
    generation: u64,
    result: Result<String, LookupError>,
}

pub struct Gene {
    id: String,
    symbol: String,
    service: Arc<dyn GeneNameService>,
    notifier: Notifier,
    sender: Sender<Settled>,
    receiver: Receiver<Settled>,
    /// Generation of the most recently issued refresh
    generation: u64,
    pending: Vec<(u64, Option<Completion>)>,
}

impl fmt::Debug for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gene")
            .field("id", &self.id)
            .field("symbol", &self.symbol)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Gene {
    /// Create a gene from an id, a symbol or both, and start a refresh
    ///
    /// A missing field takes the value of the other one until the service
    /// answers.
    pub fn new(
        id: Option<&str>,
        symbol: Option<&str>,
        service: Arc<dyn GeneNameService>,
        notifier: Notifier,
        on_complete: Option<Completion>,
    ) -> Result<Self, GeneError> {
        let id = id.map(str::trim).filter(|s| !s.is_empty());
        let symbol = symbol.map(str::trim).filter(|s| !s.is_empty());
        let (id, symbol) = match (id, symbol) {
            (Some(id), Some(symbol)) => (id, symbol),
            (Some(id), None) => (id, id),
            (None, Some(symbol)) => (symbol, symbol),
            (None, None) => return Err(GeneError::MissingIdentifier),
        };

        let (sender, receiver) = mpsc::channel();
        let mut gene = Self {
            id: id.to_string(),
            symbol: symbol.to_string(),
            service,
            notifier,
            sender,
            receiver,
            generation: 0,
            pending: Vec::new(),
        };
        gene.refresh(on_complete);
        Ok(gene)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Whether the id is a canonical Ensembl accession rather than a symbol
    pub fn is_resolved(&self) -> bool {
        ENSEMBL_GENE_ID.is_match(&self.id)
    }

    /// Whether any refresh is still in flight
    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Issue a lookup keyed by the current id
    ///
    /// Only the most recently issued refresh may update the gene; older
    /// responses still settle and run their completion.
    pub fn refresh(&mut self, on_complete: Option<Completion>) {
        self.generation += 1;
        let generation = self.generation;
        let key = self.id.clone();
        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();

        tracing::debug!(key = %key, generation, "gene lookup issued");
        thread::spawn(move || {
            let result = service.lookup(&key);
            let _ = sender.send(Settled { generation, result });
        });
        self.pending.push((generation, on_complete));
    }

    /// Apply every settled lookup; returns true if any settled
    pub fn poll(&mut self) -> bool {
        let mut settled_any = false;
        while let Ok(settled) = self.receiver.try_recv() {
            self.settle(settled);
            settled_any = true;
        }
        settled_any
    }

    /// Block until all lookups have settled or `timeout` elapses
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !self.pending.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(settled) => self.settle(settled),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => {
                    let generations: Vec<u64> = self.pending.iter().map(|(g, _)| *g).collect();
                    for generation in generations {
                        self.settle(Settled {
                            generation,
                            result: Err(LookupError::Disconnected),
                        });
                    }
                }
            }
        }
        true
    }

    fn settle(&mut self, settled: Settled) {
        if settled.generation == self.generation {
            match settled.result {
                Ok(body) => self.on_data_ready(&body),
                Err(err) => tracing::warn!(gene = %self.id, error = %err, "gene lookup failed"),
            }
        } else {
            tracing::debug!(
                gene = %self.id,
                generation = settled.generation,
                "superseded gene lookup ignored"
            );
        }

        let Some(index) = self
            .pending
            .iter()
            .position(|(g, _)| *g == settled.generation)
        else {
            return;
        };
        let (_, on_complete) = self.pending.remove(index);
        if let Some(on_complete) = on_complete {
            on_complete(self);
        }
    }

    /// Apply a service response to the held id and symbol
    fn on_data_ready(&mut self, body: &str) {
        let parsed: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(gene = %self.id, error = %err, "unparseable gene-name response");
                return;
            }
        };
        let record: GeneNameRecord = match serde_json::from_value(parsed) {
            Ok(record) => record,
            Err(_) => {
                tracing::info!(gene = %self.id, "gene-name service returned no data");
                return;
            }
        };
        tracing::info!(id = %record.id, symbol = %record.symbol, "loaded gene info");

        let held = self.id.to_uppercase();
        if record.id.to_uppercase() == held {
            if record.symbol != self.symbol {
                tracing::debug!(gene = %self.id, "loaded symbol for id");
            }
        } else if record.symbol.to_uppercase() == held {
            tracing::debug!(gene = %self.id, "resolved id for symbol");
        } else {
            tracing::info!(gene = %self.id, "no exact gene match, keeping values");
            return;
        }

        let old_id = std::mem::replace(&mut self.id, record.id);
        let old_symbol = std::mem::replace(&mut self.symbol, record.symbol);
        if old_id != self.id || old_symbol != self.symbol {
            self.notifier.notify(Notification::GeneLoaded {
                old_id,
                new_id: self.id.clone(),
                symbol: self.symbol.clone(),
            });
        }
    }
}
