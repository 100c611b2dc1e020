use crate::document::{DocId, Document, DocumentStatus};
use crate::error::Result;
use crate::execution::ExecutionPolicy;
use crate::index::IndexStore;
use crate::matching;
use crate::query::Query;
use crate::ranking::{self, DocumentPredicate};
use crate::tokenizer::StopWords;
use std::collections::{BTreeMap, BTreeSet};

/// Facade over the index: add and remove documents, rank and match queries.
///
/// Reads take `&self` and may run concurrently; add and remove take `&mut self`.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: IndexStore,
}

impl SearchServer {
    /// Build a server from a collection of stop words.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self { stop_words: StopWords::new(stop_words)?, index: IndexStore::new() })
    }

    /// Build a server from space-separated stop words, e.g. `"and in on"`.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self { stop_words: StopWords::from_text(text)?, index: IndexStore::new() })
    }

    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        self.index.add_document(id, text, status, ratings, &self.stop_words)
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_policy(ExecutionPolicy::Sequential, raw_query, &DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_policy(ExecutionPolicy::Sequential, raw_query, &status)
    }

    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        self.find_top_documents_policy(ExecutionPolicy::Sequential, raw_query, &predicate)
    }

    pub fn find_top_documents_policy<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: &P,
    ) -> Result<Vec<Document>>
    where
        P: DocumentPredicate + ?Sized,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        Ok(ranking::find_top_documents(&self.index, &query, predicate, policy))
    }

    pub fn match_document<'q>(&self, raw_query: &'q str, id: DocId) -> Result<(Vec<&'q str>, DocumentStatus)> {
        self.match_document_policy(ExecutionPolicy::Sequential, raw_query, id)
    }

    pub fn match_document_policy<'q>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &'q str,
        id: DocId,
    ) -> Result<(Vec<&'q str>, DocumentStatus)> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        matching::match_document(&self.index, raw_query, &query, id, policy)
    }

    pub fn remove_document(&mut self, id: DocId) {
        self.index.remove_document(ExecutionPolicy::Sequential, id);
    }

    pub fn remove_document_policy(&mut self, policy: ExecutionPolicy, id: DocId) {
        self.index.remove_document(policy, id);
    }

    /// Word → term frequency for `id`; empty for unknown documents.
    pub fn word_frequencies(&self, id: DocId) -> &BTreeMap<String, f64> {
        self.index.word_frequencies(id)
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    pub fn document_id_at(&self, index: usize) -> Result<DocId> {
        self.index.document_id_at(index)
    }

    /// Document ids in insertion order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, DocId>> {
        self.index.document_ids().copied()
    }

    pub fn stop_words(&self) -> &BTreeSet<String> {
        self.stop_words.as_set()
    }

    pub fn index(&self) -> &IndexStore {
        &self.index
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
