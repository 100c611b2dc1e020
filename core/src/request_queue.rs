use crate::config::REQUEST_WINDOW;
use crate::document::{Document, DocumentStatus};
use crate::error::Result;
use crate::ranking::DocumentPredicate;
use crate::search_server::SearchServer;
use std::collections::VecDeque;

struct QueryResult {
    empty: bool,
}

/// Remembers the outcome of the most recent requests against a server and counts how
/// many of them found nothing.
pub struct RequestQueue<'s> {
    server: &'s SearchServer,
    requests: VecDeque<QueryResult>,
    window: usize,
    empty_requests: usize,
}

impl<'s> RequestQueue<'s> {
    pub fn new(server: &'s SearchServer) -> Self {
        Self::with_window(server, REQUEST_WINDOW)
    }

    pub fn with_window(server: &'s SearchServer, window: usize) -> Self {
        Self { server, requests: VecDeque::with_capacity(window.min(REQUEST_WINDOW)), window, empty_requests: 0 }
    }

    pub fn add_find_request_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate,
    {
        let result = self.server.find_top_documents_with(raw_query, predicate)?;
        self.record(result.is_empty());
        Ok(result)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, status)
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Record the outcome of a request that was executed elsewhere.
    pub fn record(&mut self, empty: bool) {
        self.requests.push_back(QueryResult { empty });
        if empty {
            self.empty_requests += 1;
        }
        if self.requests.len() > self.window {
            if let Some(oldest) = self.requests.pop_front() {
                if oldest.empty {
                    self.empty_requests -= 1;
                }
            }
        }
    }

    pub fn no_result_requests(&self) -> usize {
        self.empty_requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
