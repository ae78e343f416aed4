use clap::Parser;
use tracing_subscriber::EnvFilter;

use trivia_quiz::{Difficulty, FetchParams};

/// Terminal trivia quiz backed by the Open Trivia DB.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Category id passed to the question source
    #[arg(long, default_value_t = FetchParams::DEFAULT_CATEGORY)]
    category: u16,

    /// Question difficulty
    #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Question source endpoint
    #[arg(long, default_value = FetchParams::DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let params = FetchParams {
        api_url: args.api_url,
        category: args.category,
        difficulty: args.difficulty,
    };

    if let Err(e) = trivia_quiz::run(params).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
