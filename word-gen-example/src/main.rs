use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use word_gen_core::io::read_corpus;
use word_gen_core::{Chain, ChainConfig, GenerationConfig, Tokenizer};

/// Train a word chain on a text file and print generated lines
#[derive(Parser)]
#[command(name = "word-gen-example", version)]
struct Cli {
    /// Corpus file, one line of text per training line
    #[arg(value_name = "CORPUS")]
    corpus: PathBuf,

    /// Number of words in one training window
    #[arg(short, long, default_value_t = 2)]
    depth: usize,

    /// Number of lines to generate
    #[arg(short = 'n', long, default_value_t = 10)]
    count: usize,

    /// Maximum number of words per generated line
    #[arg(short, long, default_value_t = 64)]
    max_words: usize,

    /// Fold case when training and matching words
    #[arg(short, long)]
    ignore_case: bool,

    /// Random seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Characters ending a line (defaults to newline)
    #[arg(long)]
    line_delimiters: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    // Sentence mode: split on punctuation, treat newlines as plain spaces
    let tokenizer = match &cli.line_delimiters {
        Some(delimiters) => {
            let line: Vec<char> = delimiters.chars().collect();
            Tokenizer::new(&line, &[' ', '\t', '\n'], &['\r'])?
        }
        None => Tokenizer::default(),
    };

    let lines = read_corpus(&cli.corpus, &tokenizer)?;
    let mut chain = Chain::new(ChainConfig::new(cli.depth, cli.ignore_case));
    chain.train(&lines);
    info!("Trained {} lines with depth {}", chain.lines_trained(), chain.max_depth());

    let config = GenerationConfig::new(cli.max_words)?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    for i in 0..cli.count {
        println!("Generated line {}: {}", i + 1, chain.generate_line(&config, &mut rng));
    }

    Ok(())
}
