use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, StdRand};
use tracing::{debug, info};

use scorecast::data::{read_json, Fixture, Standings};
use scorecast::forecast;
use scorecast::forecast::Config;
use scorecast::linear::Matrix;
use scorecast::probs::SliceExt;
use scorecast::rates::Estimator;
use scorecast::{print, rates, scoregrid};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// home side's expected goals
    #[clap(long)]
    home_rate: Option<f64>,

    /// away side's expected goals
    #[clap(long)]
    away_rate: Option<f64>,

    /// file to source the league standings from
    #[clap(short = 's', long)]
    standings: Option<PathBuf>,

    /// home team name (requires --standings)
    #[clap(long)]
    home: Option<String>,

    /// away team name (requires --standings)
    #[clap(long)]
    away: Option<String>,

    /// file to source a fixture list from (requires --standings)
    #[clap(short = 'f', long)]
    fixtures: Option<PathBuf>,

    /// relative magnitude of the rate perturbation
    #[clap(long)]
    jitter: Option<f64>,

    /// seed for the perturbation source
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// emit each forecast as JSON instead of tables
    #[clap(long)]
    json: bool,

    /// print the full-time scoregrid
    #[clap(long)]
    scoregrid: bool,
}

enum Mode<'a> {
    Direct(f64, f64),
    Team(&'a PathBuf, &'a str, &'a str),
    Fixtures(&'a PathBuf, &'a PathBuf),
}

impl Args {
    fn mode(&self) -> anyhow::Result<Mode> {
        if let (Some(home_rate), Some(away_rate)) = (self.home_rate, self.away_rate) {
            return Ok(Mode::Direct(home_rate, away_rate));
        }
        if let Some(standings) = &self.standings {
            if let Some(fixtures) = &self.fixtures {
                return Ok(Mode::Fixtures(standings, fixtures));
            }
            if let (Some(home), Some(away)) = (&self.home, &self.away) {
                return Ok(Mode::Team(standings, home, away));
            }
        }
        bail!(
            "either --home-rate and --away-rate, or --standings with --home/--away or --fixtures, must be specified"
        );
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
    debug!("args: {args:?}");

    let config = Config::default();
    let mut rand = StdRand::seed(args.seed);

    match args.mode()? {
        Mode::Direct(home_rate, away_rate) => {
            let rates = perturb((home_rate, away_rate), &args, &mut rand);
            run_forecast("home", "away", rates, &config, &args)?;
        }
        Mode::Team(standings_path, home, away) => {
            let standings: Standings = read_json(standings_path)?;
            let rates = estimate(&standings, home, away, &args, &mut rand)?;
            run_forecast(home, away, rates, &config, &args)?;
        }
        Mode::Fixtures(standings_path, fixtures_path) => {
            let standings: Standings = read_json(standings_path)?;
            let mut fixtures: Vec<Fixture> = read_json(fixtures_path)?;
            fixtures.sort_by_key(|fixture| fixture.kickoff);
            info!("{} fixtures loaded", fixtures.len());
            for fixture in &fixtures {
                info!("{} vs {}, kicking off {}", fixture.home, fixture.away, fixture.kickoff);
                let rates = estimate(&standings, &fixture.home, &fixture.away, &args, &mut rand)?;
                run_forecast(&fixture.home, &fixture.away, rates, &config, &args)?;
            }
        }
    }
    Ok(())
}

fn estimate(
    standings: &Standings,
    home: &str,
    away: &str,
    args: &Args,
    rand: &mut StdRand,
) -> anyhow::Result<(f64, f64)> {
    let estimator = Estimator::default();
    let rates = estimator.rates(standings.team(home)?, standings.team(away)?);
    Ok(perturb(rates, args, rand))
}

fn perturb(rates: (f64, f64), args: &Args, rand: &mut StdRand) -> (f64, f64) {
    match args.jitter {
        Some(magnitude) => rates::jitter(rates, magnitude, rand),
        None => rates,
    }
}

fn run_forecast(
    home: &str,
    away: &str,
    (home_rate, away_rate): (f64, f64),
    config: &Config,
    args: &Args,
) -> anyhow::Result<()> {
    info!("rates: {home} {home_rate:.3}, {away} {away_rate:.3}");
    let forecast = forecast::compute(home_rate, away_rate, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
        return Ok(());
    }

    println!(
        "Most likely score: {} ({:.1}%)",
        forecast.most_likely,
        forecast.most_likely_probability * 100.0
    );
    println!(
        "{}",
        Console::default().render(&print::tabulate_markets(&forecast, config))
    );
    println!(
        "HT/FT top {}:\n{}",
        forecast.combinations.len(),
        Console::default().render(&print::tabulate_combinations(&forecast.combinations))
    );
    if args.scoregrid {
        let mut scoregrid = Matrix::allocate(config.fulltime_cap, config.fulltime_cap);
        scoregrid::from_univariate_poisson(home_rate, away_rate, &mut scoregrid);
        info!("grid booksum: {:.6}", scoregrid.flatten().sum());
        println!(
            "Scoregrid:\n{}",
            Console::default().render(&print::tabulate_scoregrid(&scoregrid))
        );
    }
    Ok(())
}
