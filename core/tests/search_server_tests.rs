use search_core::{DocId, DocumentStatus, ErrorKind, ExecutionPolicy, SearchError, SearchServer};
use std::collections::BTreeSet;

const CONTENT: &str = "cat in the city";

fn three_docs() -> SearchServer {
    let mut server = SearchServer::new(Vec::<String>::new()).unwrap();
    server.add_document(0, "cat in the city", DocumentStatus::Actual, &[8, -3]).unwrap();
    server.add_document(1, "dog in the park", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
    server.add_document(2, "smooth cat", DocumentStatus::Actual, &[5, -12, 2, 1]).unwrap();
    server
}

#[test]
fn finds_added_document() {
    let mut server = SearchServer::default();
    server.add_document(42, CONTENT, DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    let found = server.find_top_documents("in").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 42);
    assert_eq!(found[0].rating, 2);
}

#[test]
fn rating_is_truncated_mean() {
    let mut server = SearchServer::default();
    server.add_document(1, CONTENT, DocumentStatus::Actual, &[5, -12, 2, 1]).unwrap();
    server.add_document(2, "cat", DocumentStatus::Actual, &[]).unwrap();
    let found = server.find_top_documents("cat").unwrap();
    let rating_of = |id: DocId| found.iter().find(|d| d.id == id).unwrap().rating;
    assert_eq!(rating_of(1), -1);
    assert_eq!(rating_of(2), 0);
}

#[test]
fn stop_words_excluded_from_content() {
    let mut server = SearchServer::from_stop_words_text("in the").unwrap();
    server.add_document(42, CONTENT, DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    assert!(server.find_top_documents("in").unwrap().is_empty());
    assert_eq!(server.stop_words().len(), 2);
}

#[test]
fn minus_words_exclude_documents() {
    let mut server = SearchServer::default();
    server.add_document(42, CONTENT, DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    assert!(server.find_top_documents("in -cat").unwrap().is_empty());
    assert!(server.find_top_documents("cat -cat").unwrap().is_empty());
}

#[test]
fn matching_reports_words_and_veto() {
    let mut server = SearchServer::default();
    server.add_document(42, CONTENT, DocumentStatus::Actual, &[1, 2, 3]).unwrap();

    let (words, status) = server.match_document("in", 42).unwrap();
    assert_eq!(words, vec!["in"]);
    assert_eq!(status, DocumentStatus::Actual);

    let (words, _) = server.match_document("in -cat", 42).unwrap();
    assert!(words.is_empty());

    let (words, _) = server.match_document_policy(ExecutionPolicy::Parallel, "city cat dog", 42).unwrap();
    assert_eq!(words.into_iter().collect::<BTreeSet<_>>(), BTreeSet::from(["cat", "city"]));

    let err = server.match_document("cat", 7).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn predicate_and_status_filters() {
    let mut server = SearchServer::default();
    server.add_document(42, CONTENT, DocumentStatus::Removed, &[1, 2, 3]).unwrap();
    server.add_document(43, CONTENT, DocumentStatus::Actual, &[1]).unwrap();

    let even = server
        .find_top_documents_with("in", |id: DocId, _status: DocumentStatus, _rating: i32| id % 2 == 0)
        .unwrap();
    assert_eq!(even.iter().map(|d| d.id).collect::<Vec<_>>(), vec![42]);

    let removed = server.find_top_documents_by_status("in", DocumentStatus::Removed).unwrap();
    assert_eq!(removed.iter().map(|d| d.id).collect::<Vec<_>>(), vec![42]);

    let actual = server.find_top_documents("in").unwrap();
    assert_eq!(actual.iter().map(|d| d.id).collect::<Vec<_>>(), vec![43]);
}

#[test]
fn relevance_values_and_order() {
    let server = three_docs();
    let result = server.find_top_documents("cat").unwrap();
    let idf = (3.0f64 / 2.0).ln();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].id, 2);
    assert_eq!(result[1].id, 0);
    assert_eq!(result[0].relevance, idf * 0.5);
    assert_eq!(result[1].relevance, idf * 0.25);
    assert_eq!(result[0].rating, -1);
    assert_eq!(result[1].rating, 2);
}

#[test]
fn invalid_input_rejected() {
    let mut server = three_docs();
    for (id, text) in [(-1, "fine"), (1, "duplicate"), (9, "bad wo\u{11}rd")] {
        let err = server.add_document(id, text, DocumentStatus::Actual, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{id} {text:?}");
    }
    assert_eq!(server.document_count(), 3);
    assert!(server.word_frequencies(9).is_empty());

    for query in ["--cat", "-", "ca\u{1}t", "cat -"] {
        assert_eq!(server.find_top_documents(query).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }
    assert!(SearchServer::new(["fine", "bro\u{8}ken"]).is_err());
    assert!(matches!(
        SearchServer::from_stop_words_text("a\u{0}b"),
        Err(SearchError::InvalidStopWord(_))
    ));
}

#[test]
fn removal_is_idempotent_and_final() {
    let mut server = three_docs();
    server.remove_document(17);
    assert_eq!(server.document_count(), 3);

    server.remove_document(2);
    assert_eq!(server.document_count(), 2);
    assert!(server.word_frequencies(2).is_empty());
    assert!(server.index().postings("smooth").is_none());
    assert!(server.index().is_consistent());

    for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
        let found = server
            .find_top_documents_policy(policy, "cat smooth dog city park", &|_: DocId, _: DocumentStatus, _: i32| true)
            .unwrap();
        assert!(found.iter().all(|d| d.id != 2));
    }

    server.remove_document_policy(ExecutionPolicy::Parallel, 2);
    assert_eq!(server.iter().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn readding_removed_id_works() {
    let mut server = three_docs();
    server.remove_document(1);
    server.add_document(1, "new dog", DocumentStatus::Actual, &[]).unwrap();
    assert_eq!(server.iter().collect::<Vec<_>>(), vec![0, 2, 1]);
    assert_eq!(server.word_frequencies(1).keys().collect::<Vec<_>>(), vec!["dog", "new"]);
}

#[test]
fn word_frequencies_round_trip() {
    let stop = "in the a";
    let texts = ["cat in the city", "a dog a dog", "big big big cat in a hat"];
    let mut server = SearchServer::from_stop_words_text(stop).unwrap();
    for (id, text) in texts.iter().enumerate() {
        server.add_document(id as DocId, text, DocumentStatus::Actual, &[]).unwrap();
    }
    for (id, text) in texts.iter().enumerate() {
        let expected: BTreeSet<&str> = text.split(' ').filter(|w| !stop.split(' ').any(|s| s == *w)).collect();
        let freqs = server.word_frequencies(id as DocId);
        assert_eq!(freqs.keys().map(String::as_str).collect::<BTreeSet<_>>(), expected);
        assert!((freqs.values().sum::<f64>() - 1.0).abs() < 1e-9);
        for (word, tf) in freqs {
            assert_eq!(server.index().postings(word).unwrap().get(&(id as DocId)), Some(tf));
        }
    }
    assert!(server.index().is_consistent());
    assert!(server.word_frequencies(99).is_empty());
}

#[test]
fn top_results_capped_and_ordered() {
    let mut server = SearchServer::default();
    for id in 0..8 {
        let filler = "x ".repeat(id as usize);
        server.add_document(id, &format!("cat {filler}"), DocumentStatus::Actual, &[id]).unwrap();
    }
    server.add_document(8, "cat", DocumentStatus::Actual, &[100]).unwrap();
    server.add_document(9, "dog", DocumentStatus::Actual, &[]).unwrap();

    let found = server.find_top_documents("cat").unwrap();
    assert_eq!(found.len(), 5);
    // documents 0 and 8 tie on relevance; the higher rating wins
    assert_eq!(found.iter().map(|d| d.id).collect::<Vec<_>>(), vec![8, 0, 1, 2, 3]);
    for pair in found.windows(2) {
        assert!(pair[0].relevance + 1e-6 >= pair[1].relevance);
    }
}

#[test]
fn parallel_ranking_matches_sequential() {
    let mut server = SearchServer::from_stop_words_text("and with").unwrap();
    let words = ["white", "cat", "fancy", "collar", "dog", "tail", "bird", "eye", "nose", "paw"];
    for id in 0..200 {
        let text: Vec<&str> = (0..6).map(|k| words[(id * 7 + k * k) as usize % words.len()]).collect();
        let status = if id % 5 == 0 { DocumentStatus::Banned } else { DocumentStatus::Actual };
        server.add_document(id, &text.join(" "), status, &[id % 11, -(id % 3)]).unwrap();
    }
    for query in ["white cat", "fancy -dog", "bird eye nose paw tail", "collar -white -cat", "absent"] {
        let seq = server.find_top_documents_policy(ExecutionPolicy::Sequential, query, &DocumentStatus::Actual).unwrap();
        let seq_ids: Vec<DocId> = seq.iter().map(|d| d.id).collect();
        for _ in 0..10 {
            let par = server.find_top_documents_policy(ExecutionPolicy::Parallel, query, &DocumentStatus::Actual).unwrap();
            assert_eq!(par.iter().map(|d| d.id).collect::<Vec<_>>(), seq_ids, "{query}");
            for (s, p) in seq.iter().zip(&par) {
                assert!((s.relevance - p.relevance).abs() < 1e-9, "{query}");
                assert_eq!(s.rating, p.rating, "{query}");
            }
        }
    }
}

#[test]
fn long_documents_with_near_equal_relevance_rank_in_both_modes() {
    let mut server = SearchServer::default();
    for id in 0..200 {
        let len = 2000 + id;
        let text = format!("cat{}", " x".repeat(len as usize - 1));
        server.add_document(id, &text, DocumentStatus::Actual, &[len]).unwrap();
    }
    for id in 200..2000 {
        server.add_document(id, "dog", DocumentStatus::Actual, &[]).unwrap();
    }
    for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
        let found = server.find_top_documents_policy(policy, "cat", &DocumentStatus::Actual).unwrap();
        assert_eq!(found.len(), 5);
        assert!(found.iter().all(|d| d.id < 200));
    }
}

#[test]
fn positions_and_iteration() {
    let server = three_docs();
    assert_eq!(server.document_count(), 3);
    assert_eq!(server.document_id_at(2).unwrap(), 2);
    assert_eq!(server.document_id_at(3).unwrap_err().kind(), ErrorKind::OutOfRange);
    let ids: Vec<DocId> = (&server).into_iter().collect();
    assert_eq!(ids, vec![0, 1, 2]);
}
