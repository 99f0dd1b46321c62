//! Single-file index snapshots.
//!
//! Layout (bincode-encoded [`Snapshot`]): magic bytes, format version,
//! analyzer fingerprint, sorted universe ids, then each stem with its
//! sorted posting list. Writes go to a sibling temporary file that is
//! atomically renamed over the destination, so a crash mid-save never
//! clobbers a previously valid snapshot.

use std::collections::{BTreeSet, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analyzer_fingerprint;
use crate::error::IndexError;
use crate::index::{BooleanIndex, DocId};
use crate::stemmer::Stem;

const MAGIC: [u8; 4] = *b"BIDX";
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    magic: [u8; 4],
    version: u32,
    fingerprint: String,
    universe: Vec<DocId>,
    terms: Vec<TermPostings>,
}

#[derive(Serialize, Deserialize)]
struct TermPostings {
    stem: Stem,
    doc_ids: Vec<DocId>,
}

impl BooleanIndex {
    /// Write a complete snapshot of this index to `path`. Atomic: the
    /// bytes land in `<path>.tmp` first and are renamed into place only
    /// after a successful flush and sync.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        let universe: Vec<DocId> = self.universe().iter().copied().collect();
        let mut terms: Vec<TermPostings> = self
            .iter_postings()
            .map(|(stem, ids)| TermPostings {
                stem: stem.clone(),
                doc_ids: ids.iter().copied().collect(),
            })
            .collect();
        terms.sort_by(|a, b| a.stem.cmp(&b.stem));

        let snapshot = Snapshot {
            magic: MAGIC,
            version: FORMAT_VERSION,
            fingerprint: analyzer_fingerprint(),
            universe,
            terms,
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "index".to_string());
        let tmp = path.with_file_name(format!("{file_name}.tmp"));

        let written = (|| -> Result<(), IndexError> {
            let file = File::create(&tmp)?;
            let mut writer = BufWriter::new(file);
            bincode::serialize_into(&mut writer, &snapshot)
                .map_err(|e| IndexError::Corrupt(format!("encode failed: {e}")))?;
            writer.flush()?;
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
            fs::rename(&tmp, path)?;
            Ok(())
        })();
        if let Err(err) = written {
            // don't leave a stray temporary next to the destination
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }

        tracing::info!(
            path = %path.display(),
            docs = snapshot.universe.len(),
            terms = snapshot.terms.len(),
            "index saved"
        );
        Ok(())
    }

    /// Reconstruct an index from a snapshot written by [`Self::save`].
    /// Any structural problem (bad magic, unsupported version, analyzer
    /// fingerprint mismatch, truncation, unsorted or duplicate ids,
    /// empty posting lists, postings outside the universe) fails with
    /// [`IndexError::Corrupt`] and leaves no partial state behind.
    pub fn load(path: &Path) -> Result<BooleanIndex, IndexError> {
        let bytes = fs::read(path)?;
        // decode from the slice, not a reader: length fields in a
        // damaged snapshot are then bounds-checked against the buffer
        // instead of trusted for allocation
        let snapshot: Snapshot = bincode::deserialize(&bytes)
            .map_err(|e| IndexError::Corrupt(format!("decode failed: {e}")))?;

        if snapshot.magic != MAGIC {
            return Err(IndexError::Corrupt("bad magic bytes".into()));
        }
        if snapshot.version != FORMAT_VERSION {
            return Err(IndexError::Corrupt(format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                snapshot.version
            )));
        }
        let expected = analyzer_fingerprint();
        if snapshot.fingerprint != expected {
            return Err(IndexError::Corrupt(format!(
                "analyzer fingerprint {:?} does not match this build ({expected:?})",
                snapshot.fingerprint
            )));
        }

        let universe = sorted_unique(&snapshot.universe, "universe")?;
        let mut postings: HashMap<Stem, BTreeSet<DocId>> =
            HashMap::with_capacity(snapshot.terms.len());
        for term in snapshot.terms {
            if term.doc_ids.is_empty() {
                return Err(IndexError::Corrupt(format!(
                    "stem {:?} has an empty posting list",
                    term.stem.as_str()
                )));
            }
            let ids = sorted_unique(&term.doc_ids, term.stem.as_str())?;
            if !ids.is_subset(&universe) {
                return Err(IndexError::Corrupt(format!(
                    "stem {:?} references a document outside the universe",
                    term.stem.as_str()
                )));
            }
            if postings.insert(term.stem.clone(), ids).is_some() {
                return Err(IndexError::Corrupt(format!(
                    "stem {:?} appears twice",
                    term.stem.as_str()
                )));
            }
        }

        tracing::info!(
            path = %path.display(),
            docs = universe.len(),
            terms = postings.len(),
            "index loaded"
        );
        Ok(BooleanIndex::from_parts(universe, postings))
    }
}

fn sorted_unique(ids: &[DocId], what: &str) -> Result<BTreeSet<DocId>, IndexError> {
    if !ids.windows(2).all(|w| w[0] < w[1]) {
        return Err(IndexError::Corrupt(format!(
            "ids of {what:?} are not strictly sorted"
        )));
    }
    Ok(ids.iter().copied().collect())
}
