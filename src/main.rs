use std::process::ExitCode;

use checked_btree_index::run_test_file;

const USAGE: &str = "\
B-tree index self-test harness

  Test mode: build a tree from a key file (one integer per line) and
  print the invariant check verdicts as a JSON object on stdout.
    Usage: checked-btree-index -t <file>

  Invariant failures are reported in the JSON output, not via the exit
  code; a non-zero exit code means the test could not be run at all.
";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [flag, file] if flag == "-t" => run_and_report(file),
        [flag] if flag == "-h" => {
            eprint!("{USAGE}");
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Invalid argument configuration.");
            eprint!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}

fn run_and_report(file: &str) -> ExitCode {
    match run_test_file(file).and_then(|report| report.to_json()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
