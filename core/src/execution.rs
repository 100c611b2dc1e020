use rayon::prelude::*;
use std::collections::BTreeSet;

/// How an index-reading operation distributes its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    /// Single thread, deterministic order.
    #[default]
    Sequential,
    /// Work spread over the rayon pool, no ordering between workers.
    Parallel,
}

impl ExecutionPolicy {
    pub(crate) fn for_each_word<F>(self, words: &BTreeSet<String>, f: F)
    where
        F: Fn(&str) + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => words.iter().for_each(|w| f(w)),
            ExecutionPolicy::Parallel => words.par_iter().for_each(|w| f(w)),
        }
    }
}
