//! In-memory TF-IDF search server.
//!
//! Documents are added with a caller-assigned id, a status tag and a list of ratings.
//! Queries are space-separated words; a leading `-` marks a word that must not appear
//! in a result. Ranking and matching run either sequentially or on the rayon pool.

pub mod concurrent_map;
pub mod config;
pub mod document;
pub mod error;
pub mod execution;
pub mod index;
pub mod matching;
pub mod process_queries;
pub mod query;
pub mod ranking;
pub mod request_queue;
pub mod search_server;
pub mod tokenizer;

pub use concurrent_map::ConcurrentMap;
pub use document::{DocId, Document, DocumentStatus};
pub use error::{ErrorKind, Result, SearchError};
pub use execution::ExecutionPolicy;
pub use process_queries::{process_queries, process_queries_joined};
pub use ranking::DocumentPredicate;
pub use request_queue::RequestQueue;
pub use search_server::SearchServer;
