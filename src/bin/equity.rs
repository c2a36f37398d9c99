use clap::Parser;
use hand_equity::core::HandCategory;
use hand_equity::holdem::{
    DEFAULT_ENUMERATION_LIMIT, DEFAULT_TRIAL_BUDGET, EquityConfig, EquityResult, KnownState,
    compute_equity,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "equity")]
#[command(about = "Odds of each hand category and of winning a Texas Hold'em hand")]
struct Cli {
    /// The two hole cards, e.g. AhKd
    hole: String,

    /// Community cards seen so far, e.g. 2c7d9s
    #[arg(short, long, default_value = "")]
    board: String,

    /// Number of opponents still in the hand
    #[arg(short, long, default_value_t = 1)]
    opponents: usize,

    /// Random deals used when the outcomes are too many to enumerate
    #[arg(short, long, default_value_t = DEFAULT_TRIAL_BUDGET)]
    trials: usize,

    /// Seed for reproducible sampling
    #[arg(short, long)]
    seed: Option<u64>,

    /// Enumerate every outcome when there are at most this many
    #[arg(long, default_value_t = DEFAULT_ENUMERATION_LIMIT)]
    enumeration_limit: u64,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let known = match KnownState::from_strs(&cli.hole, &cli.board, cli.opponents) {
        Ok(known) => known,
        Err(e) => {
            eprintln!("Invalid cards: {e}");
            std::process::exit(1);
        }
    };

    let mut config = EquityConfig::default()
        .with_trial_budget(cli.trials)
        .with_enumeration_limit(cli.enumeration_limit);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    match compute_equity(&known, &config) {
        Ok(result) if cli.json => print_json(&result),
        Ok(result) => print_table(&result),
        Err(e) => {
            eprintln!("Error computing equity: {e}");
            std::process::exit(1);
        }
    }
}

fn print_table(result: &EquityResult) {
    println!("{:<16} {:>8} {:>8}", "Hand", "You", "Them");
    for (category, ours) in result.player.iter() {
        println!(
            "{:<16} {:>7.2}% {:>7.2}%",
            category,
            ours * 100.0,
            result.opponent[category] * 100.0
        );
    }
    println!();
    println!("Win  {:>7.2}%", result.win * 100.0);
    println!("Tie  {:>7.2}%", result.tie * 100.0);
    println!("Lose {:>7.2}%", result.lose * 100.0);
    let how = if result.exact { "exact" } else { "sampled" };
    println!("({} deals, {how})", result.deals);
    println!(
        "At least a pair: {:.2}%",
        result.player.at_least(HandCategory::OnePair) * 100.0
    );
}

#[cfg(feature = "serde")]
fn print_json(result: &EquityResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error writing JSON: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "serde"))]
fn print_json(result: &EquityResult) {
    eprintln!("Built without serde, printing the table instead");
    print_table(result);
}
