use crate::document::{DocId, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::execution::ExecutionPolicy;
use crate::index::IndexStore;
use crate::query::Query;
use parking_lot::Mutex;

/// Report which plus words of `query` occur in document `id`, as slices of `raw_query`.
///
/// Any minus word present in the document empties the list. The order of matched words
/// is unspecified under [`ExecutionPolicy::Parallel`].
pub fn match_document<'q>(
    index: &IndexStore,
    raw_query: &'q str,
    query: &Query,
    id: DocId,
    policy: ExecutionPolicy,
) -> Result<(Vec<&'q str>, DocumentStatus)> {
    let status = index.document(id).ok_or(SearchError::DocumentNotFound(id))?.status;

    let vetoed = query
        .minus_words
        .iter()
        .any(|word| index.postings(word).is_some_and(|p| p.contains_key(&id)));
    if vetoed {
        return Ok((Vec::new(), status));
    }

    let matched = Mutex::new(Vec::with_capacity(query.plus_words.len()));
    policy.for_each_word(&query.plus_words, |word| {
        if !index.postings(word).is_some_and(|p| p.contains_key(&id)) {
            return;
        }
        if let Some(pos) = raw_query.find(word) {
            matched.lock().push(&raw_query[pos..pos + word.len()]);
        }
    });
    Ok((matched.into_inner(), status))
}
