use crate::concurrent_map::ConcurrentMap;
use crate::config::{ACCUMULATOR_SHARD_COUNT, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use crate::document::{DocId, Document, DocumentStatus};
use crate::execution::ExecutionPolicy;
use crate::index::IndexStore;
use crate::query::Query;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Decides whether a document may be scored.
pub trait DocumentPredicate: Sync {
    fn accept(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
{
    fn accept(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(id, status, rating)
    }
}

/// Accept only documents with this status.
impl DocumentPredicate for DocumentStatus {
    fn accept(&self, _id: DocId, status: DocumentStatus, _rating: i32) -> bool {
        status == *self
    }
}

/// Score every document matching `query.plus_words` and passing `predicate`, then drop
/// anything containing a minus word. Results are unsorted.
pub fn find_all_documents<P>(
    index: &IndexStore,
    query: &Query,
    predicate: &P,
    policy: ExecutionPolicy,
) -> Vec<Document>
where
    P: DocumentPredicate + ?Sized,
{
    let scores: ConcurrentMap<f64> = ConcurrentMap::new(ACCUMULATOR_SHARD_COUNT);
    policy.for_each_word(&query.plus_words, |word| {
        let (Some(postings), Some(idf)) = (index.postings(word), index.inverse_document_freq(word)) else {
            return;
        };
        for (&id, &tf) in postings {
            let Some(data) = index.document(id) else { continue };
            if predicate.accept(id, data.status, data.rating) {
                *scores.access(id) += tf * idf;
            }
        }
    });

    let mut relevance = scores.build_ordinary_map();
    for word in &query.minus_words {
        if let Some(postings) = index.postings(word) {
            for id in postings.keys() {
                relevance.remove(id);
            }
        }
    }

    relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            index.document(id).map(|data| Document { id, relevance, rating: data.rating })
        })
        .collect()
}

/// Higher relevance first; near-equal relevance falls back to higher rating.
pub fn compare_documents(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance.partial_cmp(&lhs.relevance).unwrap_or(Ordering::Equal)
    }
}

/// Order by [`compare_documents`] and keep the top results. Earlier documents win ties.
///
/// [`compare_documents`] is not transitive across chains of near-equal relevance and
/// `slice::sort_by` may panic on such input; the sequential path selects the top
/// results one at a time instead.
pub fn sort_and_truncate(mut documents: Vec<Document>, policy: ExecutionPolicy) -> Vec<Document> {
    match policy {
        ExecutionPolicy::Sequential => select_top(documents, MAX_RESULT_DOCUMENT_COUNT),
        ExecutionPolicy::Parallel => {
            documents.par_sort_by(compare_documents);
            documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
            documents
        }
    }
}

fn select_top(mut documents: Vec<Document>, k: usize) -> Vec<Document> {
    let mut top = Vec::with_capacity(k.min(documents.len()));
    while top.len() < k && !documents.is_empty() {
        let mut best = 0;
        for i in 1..documents.len() {
            if compare_documents(&documents[i], &documents[best]) == Ordering::Less {
                best = i;
            }
        }
        top.push(documents.remove(best));
    }
    top
}

pub fn find_top_documents<P>(
    index: &IndexStore,
    query: &Query,
    predicate: &P,
    policy: ExecutionPolicy,
) -> Vec<Document>
where
    P: DocumentPredicate + ?Sized,
{
    let matched = find_all_documents(index, query, predicate, policy);
    let total = matched.len();
    let top = sort_and_truncate(matched, policy);
    tracing::trace!(
        plus = query.plus_words.len(),
        minus = query.minus_words.len(),
        total,
        returned = top.len(),
        ?policy,
        "ranked documents"
    );
    top
}
