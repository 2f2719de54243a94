use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use tickline::display::{Document, PeriodicClock, TerminalSurface};
use tickline::report::Reporter;
use tickline::time::{CalendarFields, CalendarInput, Instant, SystemClock, WeekdayIndex, Zone};
use tickline_core::{logging, CalendarPolicy, ClockConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "tickline")]
#[command(about = "Date/time reporter and periodic clock display", long_about = None)]
struct Cli {
    /// Zone for calendar fields: local, utc or an offset like +05:30
    #[arg(long, global = true, env = "TICKLINE_ZONE")]
    zone: Option<String>,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the date/time report
    Report {
        /// Emit JSON instead of text lines
        #[arg(long)]
        json: bool,
        /// Reject out-of-range calendar fields instead of rolling them over
        #[arg(long)]
        strict: bool,
    },
    /// Keep a terminal line updated with the current time
    Clock(ClockArgs),
    /// Name a weekday index (defaults to today)
    Weekday {
        index: Option<u8>,
    },
    /// Parse a date string and print its fields
    Parse {
        text: String,
    },
    /// Print fields for now or for an epoch offset
    Fields {
        /// Milliseconds since the epoch
        #[arg(long, allow_hyphen_values = true)]
        epoch_ms: Option<i64>,
    },
    /// Build an instant from calendar fields (month is zero-based)
    Calendar(CalendarArgs),
    /// Show version information
    Version,
}

#[derive(Args)]
struct ClockArgs {
    /// Name of the output element
    #[arg(long)]
    element: Option<String>,
    /// Stop after this many updates
    #[arg(long)]
    ticks: Option<u64>,
    /// Milliseconds between updates
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    period_ms: Option<u64>,
    /// Run without any output element registered
    #[arg(long, default_value_t = false)]
    detached: bool,
}

#[derive(Args)]
struct CalendarArgs {
    #[arg(allow_hyphen_values = true)]
    year: i64,
    #[arg(allow_hyphen_values = true)]
    month_index: i64,
    #[arg(allow_hyphen_values = true)]
    day: i64,
    #[arg(allow_hyphen_values = true, default_value_t = 0)]
    hour: i64,
    #[arg(allow_hyphen_values = true, default_value_t = 0)]
    minute: i64,
    #[arg(allow_hyphen_values = true, default_value_t = 0)]
    second: i64,
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;

    let mut config = ClockConfig::from_env().context("loading configuration")?;
    if let Some(zone) = cli.zone {
        config.zone = zone;
    }
    let zone: Zone = config.zone.parse()?;

    match cli.command {
        Commands::Report { json, strict } => {
            let policy = if strict {
                CalendarPolicy::Strict
            } else {
                config.calendar_policy
            };
            let reporter = Reporter::new(Arc::new(SystemClock), zone, policy);
            let report = reporter.collect();
            let mut stdout = io::stdout().lock();
            if json {
                reporter.render_json(&report, &mut stdout)?;
            } else {
                reporter.render(&report, &mut stdout)?;
            }
        }
        Commands::Clock(args) => run_clock(args, config, zone).await?,
        Commands::Weekday { index } => {
            let index = match index {
                Some(raw) => WeekdayIndex::try_from(raw)?,
                None => Instant::now().weekday(zone),
            };
            println!("{} {}", index.to_string().bold(), index.name().green());
        }
        Commands::Parse { text } => {
            let instant = Instant::parse(&text, zone)
                .with_context(|| format!("could not parse {text:?}"))?;
            print_instant(&instant, zone);
        }
        Commands::Fields { epoch_ms } => {
            let instant = match epoch_ms {
                Some(ms) => Instant::from_epoch_millis(ms)?,
                None => Instant::now(),
            };
            print_instant(&instant, zone);
        }
        Commands::Calendar(args) => {
            let policy = if args.strict {
                CalendarPolicy::Strict
            } else {
                config.calendar_policy
            };
            let input = CalendarInput::date(args.year, args.month_index, args.day)
                .with_time(args.hour, args.minute, args.second);
            let instant = Instant::from_calendar(input, zone, policy)?;
            print_instant(&instant, zone);
        }
        Commands::Version => {
            println!("tickline v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

async fn run_clock(args: ClockArgs, mut config: ClockConfig, zone: Zone) -> Result<()> {
    if let Some(element) = args.element {
        config.element = element;
    }
    if let Some(period_ms) = args.period_ms {
        config.period_ms = period_ms;
    }

    let document = Document::new();
    if !args.detached {
        document.insert(config.element.clone(), Arc::new(TerminalSurface::stdout()));
    }

    let mut clock = PeriodicClock::from_config(Arc::new(document), &config, zone);
    if let Some(ticks) = args.ticks {
        clock = clock.with_max_ticks(ticks);
    }
    let mut handle = clock.start();

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("waiting for ctrl-c")?;
            info!("interrupted");
        }
        _ = handle.join() => {}
    }

    handle.stop().await;
    if !args.detached {
        println!();
    }
    Ok(())
}

fn print_instant(instant: &Instant, zone: Zone) {
    let fields: CalendarFields = instant.fields(zone);
    println!("{} {}", "✔".green().bold(), instant.to_date_string(zone).bold());
    println!("  ISO: {}", instant);
    println!("  Timestamp: {}", instant.timestamp_millis());
    println!("  Year: {}", fields.year);
    println!("  Month index: {}", fields.month_index);
    println!("  Day: {}", fields.day);
    println!(
        "  Weekday: {} ({})",
        fields.weekday,
        fields.weekday.name()
    );
    println!("  Time: {}", instant.to_time_string(zone));
}
