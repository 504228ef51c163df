use clap::{Parser, Subcommand};
use log::info;
use nlphmm::{
    common::Outcome,
    error::Result,
    hmm::HMMCounts,
    io::json::{load_hmm, load_sequences, save_hmm},
    utils::timer,
};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Opts {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate an HMM from labeled sequences
    Train {
        /// Number of hidden states (tags)
        #[clap(short = 'S', long)]
        num_states: usize,
        /// Number of outcomes (words)
        #[clap(short = 'O', long)]
        num_outcomes: usize,
        /// Count sequences in parallel
        #[clap(long)]
        parallel: bool,
        /// Input JSON of `[[state, outcome], ...]` sequences
        sequences: std::path::PathBuf,
        /// Output model JSON filename
        #[clap(short, long)]
        output: std::path::PathBuf,
    },
    /// Decode the most probable states of outcome ids
    Decode {
        /// Model JSON filename
        #[clap(short, long)]
        model: std::path::PathBuf,
        /// Outcome ids to decode
        outcomes: Vec<Outcome>,
    },
    /// Sample a labeled sequence from a model
    Sample {
        /// Model JSON filename
        #[clap(short, long)]
        model: std::path::PathBuf,
        /// Length of the sequence
        #[clap(short, long)]
        length: usize,
        /// Seed of the random generator
        #[clap(short, long, default_value_t = 0)]
        seed: u64,
    },
    /// Print the tables of a model
    Show {
        /// Model JSON filename
        #[clap(short, long)]
        model: std::path::PathBuf,
    },
}

fn run(opts: Opts) -> Result<()> {
    match opts.command {
        Commands::Train {
            num_states,
            num_outcomes,
            parallel,
            sequences,
            output,
        } => {
            let seqs = load_sequences(&sequences)?;
            let (counts, t) = timer(|| {
                if parallel {
                    HMMCounts::from_sequences_parallel(num_states, num_outcomes, &seqs)
                } else {
                    HMMCounts::from_sequences(num_states, num_outcomes, &seqs)
                }
            });
            info!("counted in {}ms", t);
            let hmm = counts?.to_hmm();
            save_hmm(&hmm, &output)?;
        }
        Commands::Decode { model, outcomes } => {
            let hmm = load_hmm(&model)?;
            let (score, states) = hmm.run_viterbi(&outcomes)?;
            println!("# score={}", score);
            let states: Vec<String> = states.iter().map(|s| s.to_string()).collect();
            println!("{}", states.join(" "));
        }
        Commands::Sample {
            model,
            length,
            seed,
        } => {
            let hmm = load_hmm(&model)?;
            let seq = hmm.sample(length, seed)?;
            println!("{}", serde_json::to_string(&seq)?);
        }
        Commands::Show { model } => {
            let hmm = load_hmm(&model)?;
            print!("{}", hmm);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let opts: Opts = Opts::parse();
    info!("opts={:?}", opts);
    if let Err(e) = run(opts) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
