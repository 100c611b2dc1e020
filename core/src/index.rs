use crate::document::{average_rating, DocId, DocumentData, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::execution::ExecutionPolicy;
use crate::tokenizer::{split_into_words_no_stop, StopWords};
use rayon::prelude::*;
use std::collections::BTreeMap;

static EMPTY_FREQS: BTreeMap<String, f64> = BTreeMap::new();

/// Inverted index kept in both directions.
///
/// `word_to_doc_freqs` answers "which documents contain this word" and
/// `doc_to_word_freqs` answers "which words does this document contain". Every
/// `(word, doc, tf)` triple lives in both maps with the same tf.
#[derive(Debug, Default)]
pub struct IndexStore {
    word_to_doc_freqs: BTreeMap<String, BTreeMap<DocId, f64>>,
    doc_to_word_freqs: BTreeMap<DocId, BTreeMap<String, f64>>,
    documents: BTreeMap<DocId, DocumentData>,
    document_ids: Vec<DocId>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document. Nothing is modified unless the whole document is valid.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
        stop_words: &StopWords,
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::NegativeDocumentId(id));
        }
        if self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateDocument(id));
        }
        let words = split_into_words_no_stop(text, stop_words)?;

        let doc_freqs = self.doc_to_word_freqs.entry(id).or_default();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in &words {
                *self
                    .word_to_doc_freqs
                    .entry((*word).to_string())
                    .or_default()
                    .entry(id)
                    .or_insert(0.0) += inv_word_count;
                *doc_freqs.entry((*word).to_string()).or_insert(0.0) += inv_word_count;
            }
        }
        self.documents.insert(id, DocumentData { rating: average_rating(ratings), status });
        self.document_ids.push(id);
        tracing::debug!(id, words = words.len(), %status, "document added");
        Ok(())
    }

    /// Drop a document from both index directions. Unknown ids are ignored.
    pub fn remove_document(&mut self, policy: ExecutionPolicy, id: DocId) {
        if self.documents.remove(&id).is_none() {
            return;
        }
        let word_freqs = self.doc_to_word_freqs.remove(&id).unwrap_or_default();
        for word in word_freqs.keys() {
            if let Some(postings) = self.word_to_doc_freqs.get_mut(word) {
                postings.remove(&id);
                if postings.is_empty() {
                    self.word_to_doc_freqs.remove(word);
                }
            }
        }
        let position = match policy {
            ExecutionPolicy::Sequential => self.document_ids.iter().position(|&d| d == id),
            ExecutionPolicy::Parallel => self.document_ids.par_iter().position_any(|&d| d == id),
        };
        if let Some(position) = position {
            self.document_ids.remove(position);
        }
        tracing::debug!(id, words = word_freqs.len(), "document removed");
    }

    pub fn word_frequencies(&self, id: DocId) -> &BTreeMap<String, f64> {
        self.doc_to_word_freqs.get(&id).unwrap_or(&EMPTY_FREQS)
    }

    /// Postings of `word`, or `None` if no indexed document contains it.
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.word_to_doc_freqs.get(word)
    }

    pub fn document(&self, id: DocId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    /// ln(document count / documents containing `word`); `None` for unindexed words.
    pub fn inverse_document_freq(&self, word: &str) -> Option<f64> {
        let postings = self.postings(word)?;
        Some((self.document_count() as f64 / postings.len() as f64).ln())
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn document_id_at(&self, index: usize) -> Result<DocId> {
        self.document_ids
            .get(index)
            .copied()
            .ok_or(SearchError::PositionOutOfRange { index, count: self.document_ids.len() })
    }

    pub fn document_ids(&self) -> std::slice::Iter<'_, DocId> {
        self.document_ids.iter()
    }

    pub fn word_count(&self) -> usize {
        self.word_to_doc_freqs.len()
    }

    /// True when both directions hold exactly the same `(word, doc, tf)` triples.
    pub fn is_consistent(&self) -> bool {
        let forward: usize = self.word_to_doc_freqs.values().map(|p| p.len()).sum();
        let backward: usize = self.doc_to_word_freqs.values().map(|w| w.len()).sum();
        if forward != backward {
            return false;
        }
        self.word_to_doc_freqs.iter().all(|(word, postings)| {
            !postings.is_empty()
                && postings.iter().all(|(id, tf)| {
                    self.doc_to_word_freqs.get(id).and_then(|w| w.get(word)) == Some(tf)
                })
        })
    }
}
