//! End-to-end runs of the benchmark harness on tiny sizes.

use strassen::harness::{self, Algorithm, BenchConfig, Verdict};

fn tiny_config() -> BenchConfig {
    BenchConfig {
        sizes: vec![4, 6, 16],
        repetitions: 2,
        seed: Some(42),
        cutoff: 2,
        parallel_depth: 1,
        ..BenchConfig::default()
    }
}

#[test]
fn test_run_produces_one_record_per_algorithm_and_size() {
    let config = tiny_config();
    let mut streamed = Vec::new();
    let records = harness::run_with(&config, |r| streamed.push(r.clone())).unwrap();

    assert_eq!(records.len(), config.sizes.len() * Algorithm::ALL.len());
    assert_eq!(records, streamed);

    for (chunk, &size) in records.chunks(Algorithm::ALL.len()).zip(&config.sizes) {
        let algorithms: Vec<Algorithm> = chunk.iter().map(|r| r.algorithm).collect();
        assert_eq!(algorithms, Algorithm::ALL.to_vec());
        assert!(chunk.iter().all(|r| r.size == size));
        assert_eq!(chunk[0].verdict, Verdict::Reference);
    }
}

#[test]
fn test_all_applicable_results_validate() {
    let records = harness::run(&tiny_config()).unwrap();

    for record in &records {
        match (record.size, record.algorithm) {
            (6, Algorithm::Strassen) | (6, Algorithm::ParallelStrassen) => {
                assert_eq!(record.verdict, Verdict::NotApplicable);
                assert!(record.mean.is_none());
            }
            (_, Algorithm::Naive) => assert_eq!(record.verdict, Verdict::Reference),
            _ => {
                assert_eq!(
                    record.verdict,
                    Verdict::Correct,
                    "{} at size {}",
                    record.algorithm.name(),
                    record.size
                );
                assert!(record.mean.is_some());
            }
        }
    }
}

#[test]
fn test_invalid_config_is_rejected_before_running() {
    let config = BenchConfig {
        repetitions: 0,
        ..tiny_config()
    };
    let mut called = false;
    assert!(harness::run_with(&config, |_| called = true).is_err());
    assert!(!called);
}

#[test]
fn test_csv_written_to_disk() {
    let records = harness::run(&BenchConfig {
        sizes: vec![2],
        repetitions: 1,
        seed: Some(1),
        ..BenchConfig::default()
    })
    .unwrap();

    let path = std::env::temp_dir().join(format!("strassen-harness-{}.csv", std::process::id()));
    harness::write_csv(&path, &records).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "n,algorithm,time_ms,mem_kb,check");
    assert_eq!(lines.len(), 1 + Algorithm::ALL.len());
    assert!(lines[1].starts_with("2,Naive (i-j-k),"));
    assert!(lines[1].ends_with(",reference"));
}
