use clap::Parser;
use search::{execute, EXIT_SUCCESS};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Evaluate a boolean query against a saved index", long_about = None)]
struct Args {
    /// Index file produced by the indexer
    #[arg(long)]
    index: PathBuf,
    /// Query: `term`, `NOT term`, `t1 AND t2`, or `t1 OR t2`
    #[arg(required = true, trailing_var_arg = true)]
    query: Vec<String>,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let query = args.query.join(" ");

    match execute(&args.index, &query) {
        Ok(output) => {
            // a zero-hit result still prints here and exits 0
            println!(
                "{}",
                serde_json::to_string_pretty(&output).expect("serializable output")
            );
            ExitCode::from(EXIT_SUCCESS as u8)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
