//! Benchmark runner: naive vs Strassen across matrix sizes.

use std::process::ExitCode;

use strassen::harness::{self, BenchConfig, Verdict, USAGE};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let config = match BenchConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}\n");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    println!("=== Matrix Multiplication Benchmark: Naive vs Strassen ===\n");
    println!(
        "Started:      {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("Sizes:        {:?}", config.sizes);
    println!("Repetitions:  {} (after 1 warm-up run)", config.repetitions);
    println!("Cutoff:       {}", config.cutoff);
    println!("Epsilon:      {:e}", config.epsilon);
    println!("Threads:      {}\n", rayon::current_num_threads());

    let header = harness::table_header();
    println!("{header}");
    println!("{}", "-".repeat(header.len()));

    let mut previous_size = None;
    let records = harness::run_with(&config, |record| {
        if previous_size.is_some() && previous_size != Some(record.size) {
            println!();
        }
        previous_size = Some(record.size);
        println!("{}", harness::format_record(record));
    });

    let records = match records {
        Ok(records) => records,
        Err(e) => {
            eprintln!("\n❌ Benchmark aborted: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &config.csv_path {
        match harness::write_csv(path, &records) {
            Ok(()) => println!("\n📄 Results written to {}", path.display()),
            Err(e) => {
                eprintln!("\n❌ Could not write {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    let failures = records
        .iter()
        .filter(|r| r.verdict == Verdict::Incorrect)
        .count();
    if failures > 0 {
        eprintln!("\n❌ {failures} result(s) differ from the naive product by more than {:e}", config.epsilon);
        return ExitCode::FAILURE;
    }

    println!("\n✅ All results match the naive product within {:e}", config.epsilon);
    ExitCode::SUCCESS
}
