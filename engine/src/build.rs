use crate::error::IndexError;
use crate::index::{BooleanIndex, DocId};
use crate::stemmer::stem;
use crate::tokenizer::tokenize;

/// Outcome counters for one build run. `failed` counts documents that
/// were skipped (blank text, duplicate id), so a run that indexed
/// nothing is distinguishable from a source that produced nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub processed: usize,
    pub failed: usize,
}

/// Build an index from a stream of `(doc_id, raw_text)` pairs. The
/// source is expected to have stripped any markup already.
///
/// Per-document failures never abort the batch: the offending document
/// is logged, counted in the report, and the stream continues. A
/// document whose text tokenizes to nothing is still indexed; it lands
/// in the universe with no postings.
pub fn build<I>(documents: I) -> (BooleanIndex, BuildReport)
where
    I: IntoIterator<Item = (DocId, String)>,
{
    let mut index = BooleanIndex::new();
    let mut report = BuildReport::default();

    for (doc_id, text) in documents {
        if text.trim().is_empty() {
            tracing::warn!(doc_id, "skipping document with blank text");
            report.failed += 1;
            continue;
        }
        let stems = tokenize(&text).iter().map(stem).collect::<Vec<_>>();
        match index.add_document(doc_id, stems) {
            Ok(()) => report.processed += 1,
            Err(IndexError::DuplicateDocument(id)) => {
                tracing::warn!(doc_id = id, "skipping already-indexed document");
                report.failed += 1;
            }
            // add_document only fails on duplicates today; anything else
            // would be a bug worth surfacing loudly
            Err(err) => {
                tracing::error!(doc_id, %err, "skipping document");
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        processed = report.processed,
        failed = report.failed,
        terms = index.term_count(),
        "build finished"
    );
    (index, report)
}
