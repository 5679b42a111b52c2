// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Card, Document, Purchase, Transaction};
use crate::utils::new_id;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.billfold", "Billfold", "billfold"));

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("data file {} is not valid JSON", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn data_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().join("billfold.json"))
}

/// File-backed document store. Every operation reads the whole document,
/// mutates it, and writes it back; writes go through a temp file plus
/// rename so a crash never leaves a half-written document behind.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Store { path: data_path()? })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with an empty document if it does not exist yet.
    pub fn init(&self) -> Result<()> {
        if !self.path.exists() {
            self.write(&Document::default())?;
        }
        Ok(())
    }

    /// Read the current document. A missing file reads as the empty
    /// document; a file that exists but does not parse is an error, never
    /// silently treated as empty (the next write would destroy it).
    pub fn read(&self) -> Result<Document> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Document::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Read data file {}", self.path.display()));
            }
        };
        let doc = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(doc)
    }

    fn write(&self, doc: &Document) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("Create data dir {}", dir.display()))?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let json = serde_json::to_string_pretty(doc).context("Serialize data document")?;
        fs::write(&tmp, json).with_context(|| format!("Write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Replace {}", self.path.display()))?;
        Ok(())
    }

    // ---- monthly ledger ----

    pub fn get_monthly(&self, key: &str) -> Result<Vec<Transaction>> {
        let doc = self.read()?;
        Ok(doc.monthly.get(key).cloned().unwrap_or_default())
    }

    /// Replace the record with the same id, or append. Returns the new
    /// full list for the month.
    pub fn upsert_transaction(&self, key: &str, tx: Transaction) -> Result<Vec<Transaction>> {
        let mut doc = self.read()?;
        let list = doc.monthly.entry(key.to_string()).or_default();
        match list.iter().position(|t| t.id == tx.id) {
            Some(i) => list[i] = tx,
            None => list.push(tx),
        }
        let out = list.clone();
        self.write(&doc)?;
        Ok(out)
    }

    pub fn remove_transaction(&self, key: &str, id: &str) -> Result<Vec<Transaction>> {
        let mut doc = self.read()?;
        let list = doc.monthly.entry(key.to_string()).or_default();
        list.retain(|t| t.id != id);
        let out = list.clone();
        self.write(&doc)?;
        Ok(out)
    }

    /// Flip the paid flag; a record without one counts as unpaid.
    pub fn toggle_paid(&self, key: &str, id: &str) -> Result<Vec<Transaction>> {
        let mut doc = self.read()?;
        let list = doc.monthly.entry(key.to_string()).or_default();
        for t in list.iter_mut() {
            if t.id == id {
                t.paid = Some(!t.is_paid());
            }
        }
        let out = list.clone();
        self.write(&doc)?;
        Ok(out)
    }

    /// Clone every transaction of `src` into `dst` with fresh ids, after
    /// whatever `dst` already holds. Nothing is replaced.
    pub fn replicate_month(&self, src: &str, dst: &str) -> Result<Vec<Transaction>> {
        let mut doc = self.read()?;
        let cloned: Vec<Transaction> = doc
            .monthly
            .get(src)
            .map(|list| {
                list.iter()
                    .map(|t| Transaction {
                        id: new_id(),
                        ..t.clone()
                    })
                    .collect()
            })
            .unwrap_or_default();
        let dst_list = doc.monthly.entry(dst.to_string()).or_default();
        dst_list.extend(cloned);
        let out = dst_list.clone();
        self.write(&doc)?;
        Ok(out)
    }

    pub fn clear_month(&self, key: &str) -> Result<()> {
        let mut doc = self.read()?;
        doc.monthly.insert(key.to_string(), Vec::new());
        self.write(&doc)
    }

    // ---- cards ----

    pub fn get_cards(&self) -> Result<Vec<Card>> {
        Ok(self.read()?.cards)
    }

    pub fn upsert_card(&self, card: Card) -> Result<Vec<Card>> {
        let mut doc = self.read()?;
        match doc.cards.iter().position(|c| c.id == card.id) {
            Some(i) => doc.cards[i] = card,
            None => doc.cards.push(card),
        }
        self.write(&doc)?;
        Ok(doc.cards)
    }

    /// Deleting a card also deletes every purchase charged to it.
    pub fn remove_card(&self, id: &str) -> Result<(Vec<Card>, Vec<Purchase>)> {
        let mut doc = self.read()?;
        doc.cards.retain(|c| c.id != id);
        doc.purchases.retain(|p| p.card_id != id);
        self.write(&doc)?;
        Ok((doc.cards, doc.purchases))
    }

    // ---- installment purchases ----

    pub fn get_purchases(&self) -> Result<Vec<Purchase>> {
        Ok(self.read()?.purchases)
    }

    /// Upsert by id. The installment anchor is kept sane here rather than
    /// trusting callers: total is at least 1 and the starting installment
    /// lands inside [1, total].
    pub fn upsert_purchase(&self, p: Purchase) -> Result<Vec<Purchase>> {
        let mut p = p;
        p.total_installments = p.total_installments.max(1);
        p.current_installment_at_start =
            p.current_installment_at_start.clamp(1, p.total_installments);
        let mut doc = self.read()?;
        match doc.purchases.iter().position(|x| x.id == p.id) {
            Some(i) => doc.purchases[i] = p,
            None => doc.purchases.push(p),
        }
        self.write(&doc)?;
        Ok(doc.purchases)
    }

    pub fn remove_purchase(&self, id: &str) -> Result<Vec<Purchase>> {
        let mut doc = self.read()?;
        doc.purchases.retain(|p| p.id != id);
        self.write(&doc)?;
        Ok(doc.purchases)
    }
}
