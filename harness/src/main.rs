use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use search_core::{
    process_queries, DocId, DocumentStatus, ExecutionPolicy, RequestQueue, SearchServer,
};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "harness")]
#[command(about = "Load documents into an in-memory TF-IDF index and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Corpus {
    /// Input path (a .jsonl file or a directory of them)
    #[arg(long)]
    docs: String,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Spread ranking and matching over the thread pool
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

impl Corpus {
    fn policy(&self) -> ExecutionPolicy {
        if self.parallel { ExecutionPolicy::Parallel } else { ExecutionPolicy::Sequential }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for a query as JSON lines
    Search {
        #[command(flatten)]
        corpus: Corpus,
        #[arg(long)]
        query: String,
        /// Only rank documents with this status (ACTUAL, IRRELEVANT, BANNED, REMOVED)
        #[arg(long, default_value = "ACTUAL")]
        status: String,
    },
    /// Report which query words a document matches
    Match {
        #[command(flatten)]
        corpus: Corpus,
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
    },
    /// Run every query of a file (one per line) as a parallel batch
    Batch {
        #[command(flatten)]
        corpus: Corpus,
        #[arg(long)]
        queries: String,
    },
}

#[derive(Serialize)]
struct MatchReport<'a> {
    id: DocId,
    status: DocumentStatus,
    words: Vec<&'a str>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, query, status } => {
            let server = load_server(&corpus)?;
            let status = parse_status(&status)?;
            let docs = server.find_top_documents_policy(corpus.policy(), &query, &status)?;
            for doc in docs {
                println!("{}", serde_json::to_string(&doc)?);
            }
            Ok(())
        }
        Commands::Match { corpus, query, id } => {
            let server = load_server(&corpus)?;
            let (words, status) = server.match_document_policy(corpus.policy(), &query, id)?;
            println!("{}", serde_json::to_string(&MatchReport { id, status, words })?);
            Ok(())
        }
        Commands::Batch { corpus, queries } => {
            let server = load_server(&corpus)?;
            let queries = read_queries(Path::new(&queries))?;
            run_batch(&server, &queries)
        }
    }
}

fn parse_status(raw: &str) -> Result<DocumentStatus> {
    serde_json::from_value(serde_json::Value::String(raw.to_uppercase()))
        .with_context(|| format!("unknown document status {raw:?}"))
}

fn load_server(corpus: &Corpus) -> Result<SearchServer> {
    let mut server = SearchServer::from_stop_words_text(&corpus.stop_words)?;
    for file in collect_files(Path::new(&corpus.docs)) {
        for doc in read_jsonl(&file)? {
            server
                .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
                .with_context(|| format!("adding document {} from {}", doc.id, file.display()))?;
        }
    }
    tracing::info!(num_docs = server.document_count(), docs = %corpus.docs, "loaded corpus");
    Ok(server)
}

fn collect_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("jsonl") {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(docs)
}

fn read_queries(file: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    Ok(text.lines().filter(|l| !l.trim().is_empty()).map(str::to_string).collect())
}

fn run_batch(server: &SearchServer, queries: &[String]) -> Result<()> {
    let results = process_queries(server, queries)?;
    let mut history = RequestQueue::new(server);
    for (query, docs) in queries.iter().zip(&results) {
        history.record(docs.is_empty());
        for doc in docs {
            println!("{query}\t{doc}");
        }
    }
    tracing::info!(
        queries = queries.len(),
        empty = history.no_result_requests(),
        "batch complete"
    );
    Ok(())
}
