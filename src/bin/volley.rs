use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use volley::config::{AdjustmentConfig, MatchFormat, SetConfig, TiebreakPolicy};
use volley::file::{ReadJsonFile, WriteJsonFile};
use volley::markov;
use volley::mc::{MonteCarloEngine, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_TRIALS};
use volley::print::{tabulate_distribution, tabulate_summary};
use volley::profile::{Matchup, PlayerProfile, ServeProfile};
use volley::timed::Timed;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the matchup from
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// serve profile of player 1: first_serve_in,first_serve_win,second_serve_win,ace,double_fault
    #[clap(long, value_delimiter = ',', allow_negative_numbers = true)]
    p1: Option<Vec<f64>>,

    /// serve profile of player 2, in the same form as --p1
    #[clap(long, value_delimiter = ',', allow_negative_numbers = true)]
    p2: Option<Vec<f64>>,

    /// number of matches to simulate
    #[clap(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
    trials: u64,

    /// seed of the random number generator
    #[clap(short = 's', long, default_value_t = 0)]
    seed: u64,

    /// number of sets in the match
    #[clap(short = 'b', long, default_value_t = 3)]
    best_of: u8,

    /// tiebreak policy of the deciding set (standard, super or none)
    #[clap(long, default_value_t = TiebreakPolicy::Standard)]
    final_set: TiebreakPolicy,

    /// games-all score at which a tiebreak is played
    #[clap(long, default_value_t = SetConfig::DEFAULT_TIEBREAK_AT)]
    tiebreak_at: u32,

    /// do not adjust the server's rates for the returner's strength
    #[clap(long)]
    no_adjustment: bool,

    /// confidence level of the interval
    #[clap(short = 'c', long, default_value_t = DEFAULT_CONFIDENCE_LEVEL)]
    confidence: f64,

    /// run the trials on all available cores
    #[clap(short = 'p', long)]
    parallel: bool,

    /// number of score lines to print
    #[clap(long, default_value_t = 10)]
    top: usize,

    /// file to write the summary to, in JSON
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        let flags = self.p1.is_some() || self.p2.is_some();
        if self.file.is_some() == flags {
            bail!("either the -f flag or the --p1 and --p2 flags must be specified");
        }
        if flags && (self.p1.is_none() || self.p2.is_none()) {
            bail!("both --p1 and --p2 must be specified");
        }
        for rates in [&self.p1, &self.p2].into_iter().flatten() {
            if rates.len() != 5 {
                bail!("a serve profile has 5 rates, got {}", rates.len());
            }
        }
        Ok(())
    }

    fn matchup(&self) -> anyhow::Result<Matchup> {
        match (&self.file, &self.p1, &self.p2) {
            (Some(file), _, _) => Ok(Matchup::read_json_file(file)?),
            (None, Some(p1), Some(p2)) => Ok(Matchup {
                p1: serve_profile(p1).into(),
                p2: serve_profile(p2).into(),
            }),
            _ => bail!("no matchup specified"),
        }
    }
}

fn serve_profile(rates: &[f64]) -> ServeProfile {
    ServeProfile {
        first_serve_in: rates[0],
        first_serve_win: rates[1],
        second_serve_win: rates[2],
        ace: rates[3],
        double_fault: rates[4],
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let matchup = args.matchup()?;
    debug!("matchup: {matchup:?}");

    let format = MatchFormat {
        best_of: args.best_of,
        final_set: args.final_set,
        tiebreak_at: args.tiebreak_at,
    };
    let adjustment = if args.no_adjustment {
        AdjustmentConfig::disabled()
    } else {
        AdjustmentConfig::default()
    };
    let engine = MonteCarloEngine::default()
        .with_trials(args.trials)
        .with_seed(args.seed)
        .with_confidence_level(args.confidence)
        .with_parallel(args.parallel)
        .with_format(format.clone())
        .with_adjustment(adjustment.clone());

    let summary = Timed::result(|| engine.simulate(&matchup.p1, &matchup.p2))?;
    info!(
        "simulated {} matches in {:.3}s ({:.0} matches/s)",
        args.trials,
        summary.elapsed.as_secs_f64(),
        summary.rate(args.trials)
    );
    let summary = summary.value;

    let reference = reference_prob(&matchup.p1, &matchup.p2, &format, &adjustment);
    info!("\n{}", Console::default().render(&tabulate_summary(&summary, reference)));
    info!(
        "\n{}",
        Console::default().render(&tabulate_distribution(&summary.set_score_distribution, "Sets", args.top))
    );
    info!(
        "\n{}",
        Console::default().render(&tabulate_distribution(&summary.full_score_distribution, "Score", args.top))
    );

    if let Some(out) = &args.out {
        summary.write_json_file(out)?;
        info!("wrote summary to {}", out.display());
    }
    Ok(())
}

/// The exact model assumes tiebreaks at 6–6.
fn reference_prob(
    p1: &PlayerProfile,
    p2: &PlayerProfile,
    format: &MatchFormat,
    adjustment: &AdjustmentConfig,
) -> Option<f64> {
    if format.tiebreak_at == SetConfig::DEFAULT_TIEBREAK_AT {
        Some(markov::match_prob_for_profiles(p1, p2, format, adjustment))
    } else {
        None
    }
}
