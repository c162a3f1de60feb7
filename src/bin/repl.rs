use campaign_dice::session::RollLog;
use campaign_dice::{RollConfig, RollContext, DEFAULT_HISTORY_LIMIT};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Roll dice expressions interactively.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed the generator for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Most dice a single roll may throw.
    #[arg(long, conflicts_with = "unbounded")]
    max_dice: Option<u64>,

    /// Remove the dice cap entirely.
    #[arg(long)]
    unbounded: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_dice=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = match (args.unbounded, args.max_dice) {
        (true, _) => RollConfig::unbounded(),
        (false, Some(max)) => RollConfig::bounded(max),
        (false, None) => RollConfig::default(),
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut ctx = RollContext::new(config, rng);
    let log = RollLog::new();

    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        match line.as_str() {
            "" => {}
            ":quit" | ":q" => break,
            cmd if cmd.starts_with(":history") => {
                let limit = match cmd[":history".len()..].trim() {
                    "" => DEFAULT_HISTORY_LIMIT,
                    n => match n.parse() {
                        Ok(n) => n,
                        Err(why) => {
                            eprintln!("Error: {}", why);
                            print!("> ");
                            io::stdout().flush()?;
                            continue;
                        }
                    },
                };
                for record in log.recent(None, limit) {
                    println!(
                        "#{} {} {} = {}",
                        record.id,
                        record.created_at.format("%H:%M:%S"),
                        record.kind,
                        record.value
                    );
                }
            }
            expr => match ctx.roll(expr) {
                Ok(total) => {
                    log.record(None, expr, total, Default::default());
                    println!("{} = {}", expr, total);
                }
                Err(why) => eprintln!("Error: {}", why),
            },
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
