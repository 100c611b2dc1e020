use crate::document::{Document, DocumentStatus};
use crate::error::Result;
use crate::execution::ExecutionPolicy;
use crate::search_server::SearchServer;
use rayon::prelude::*;

/// Run every query on the rayon pool. Output order follows `queries`.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    let results = queries
        .par_iter()
        .map(|query| {
            server.find_top_documents_policy(ExecutionPolicy::Parallel, query.as_ref(), &DocumentStatus::Actual)
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(queries = queries.len(), "processed query batch");
    Ok(results)
}

/// Like [`process_queries`], with the per-query results concatenated in query order.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}
