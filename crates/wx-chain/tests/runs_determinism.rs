use wx_chain::{generate_runs, run_seed, MarkovChain, RunReport};
use wx_core::{RngHandle, WxError};

#[test]
fn repeated_batches_with_same_seed_match() {
    let chain = MarkovChain::weather();
    let a = generate_runs(&chain, 10, 4, 2024).unwrap();
    let b = generate_runs(&chain, 10, 4, 2024).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.runs.len(), 4);
    assert!(a.runs.iter().all(|record| record.sequence.len() == 11));
}

#[test]
fn each_run_replays_from_its_own_seed() {
    let chain = MarkovChain::weather();
    let report = generate_runs(&chain, 30, 3, 5).unwrap();
    for record in &report.runs {
        assert_eq!(record.seed, run_seed(5, record.run));
        let replay = chain
            .generate(30, &mut RngHandle::from_seed(record.seed))
            .unwrap();
        assert_eq!(replay, record.sequence);
        assert_eq!(record.transitions.total(), 30);
    }
}

#[test]
fn pooled_transitions_cover_all_runs() {
    let chain = MarkovChain::weather();
    let report = generate_runs(&chain, 12, 5, 77).unwrap();
    assert_eq!(report.pooled_transitions().total(), 60);
}

#[test]
fn report_round_trips_through_json() {
    let chain = MarkovChain::weather();
    let report = generate_runs(&chain, 6, 2, 13).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let decoded: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, report);
}

#[test]
fn oversized_batches_are_rejected_without_allocating() {
    let chain = MarkovChain::weather();
    let err = generate_runs(&chain, 0, usize::MAX, 1).unwrap_err();
    assert!(matches!(err, WxError::Config(_)));
    assert_eq!(err.code(), "runs-too-large");

    let err = generate_runs(&chain, usize::MAX, 1, 1).unwrap_err();
    assert_eq!(err.code(), "length-too-large");
}
