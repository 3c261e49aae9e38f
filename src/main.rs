//! tasknreward - Tasks & rewards tracker
//!
//! Command-line front end: listings of catalogs and scores, plus the
//! generate / refresh / complete cycle and explicit period rollups.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use tasknreward::{
    RewardLevel, TaskLevel, TaskRewardError, Tier, Tracker, TrackerConfig, UnrecognizedPolicy,
};

#[derive(Parser)]
#[command(name = "tasknreward")]
#[command(version = "0.1.0")]
#[command(about = "Tasks&Rewards", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding the documents (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    /// Parameters document, relative to the project directory
    #[arg(long, global = true, env = "TASKNREWARD_PARAMETERS")]
    parameters: Option<PathBuf>,

    /// Record document, relative to the project directory
    #[arg(long, global = true, env = "TASKNREWARD_RECORD")]
    record: Option<PathBuf>,

    /// Task manifest, relative to the project directory
    #[arg(long, global = true, env = "TASKNREWARD_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display task catalogs
    Task {
        /// Task level: all, d, m or a
        #[arg(short, long, value_enum, default_value = "all")]
        level: TaskLevel,
    },

    /// Display reward catalogs
    Reward {
        /// Reward level: all, w, m or a
        #[arg(short, long, value_enum, default_value = "all")]
        level: RewardLevel,
    },

    /// Display scores, creating the record if needed
    Score {
        /// Score level: all, d, m or a
        #[arg(short, long, value_enum, default_value = "all")]
        level: TaskLevel,
    },

    /// Show today's pending and completed tasks
    Status,

    /// Generate daily tasks
    Generate,

    /// Refresh the pending tasks
    Refresh,

    /// Complete task by reading the txt file
    Complete {
        /// What to do with lines that are not pending tasks
        #[arg(long, value_enum, default_value = "ignore")]
        unrecognized: UnrecognizedPolicy,
    },

    /// Close a day or month, carrying its score one tier up
    Rollup {
        /// Tier to close: daily or monthly
        #[arg(short, long, value_enum)]
        tier: Tier,
    },

    /// Zero one tier's score
    Reset {
        /// Tier to reset
        #[arg(short, long, value_enum)]
        tier: Tier,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "tasknreward=debug,info"
    } else {
        "tasknreward=info,warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        if e.is_fatal() {
            eprintln!("{} {}", "Error:".red().bold(), e);
        } else {
            eprintln!("{} {}", "Warning:".yellow(), e);
        }
        std::process::exit(e.exit_code());
    }
}

fn load_config(cli: &Cli) -> tasknreward::Result<TrackerConfig> {
    let project = &cli.project;
    if !project.is_dir() {
        return Err(TaskRewardError::config_with_path(
            "Project directory does not exist",
            project.clone(),
        ));
    }

    let mut config = TrackerConfig::load(project)?;
    if let Some(ref path) = cli.parameters {
        config = config.with_parameters_path(project.join(path));
    }
    if let Some(ref path) = cli.record {
        config = config.with_record_path(project.join(path));
    }
    if let Some(ref path) = cli.manifest {
        config = config.with_manifest_path(project.join(path));
    }
    Ok(config)
}

fn run(cli: Cli) -> tasknreward::Result<()> {
    let tracker = Tracker::new(load_config(&cli)?);

    match cli.command {
        Commands::Task { level } => {
            let params = tracker.parameters()?;
            for tier in level.tiers() {
                print_list(
                    &format!("{} Task List", tier.title()),
                    params.tasks(tier),
                );
            }
        }

        Commands::Reward { level } => {
            let params = tracker.parameters()?;
            for tier in level.tiers() {
                print_list(
                    &format!("{} Reward List", tier.title()),
                    params.rewards(tier),
                );
            }
        }

        Commands::Score { level } => {
            let (record, created) = tracker.scores()?;
            if created {
                println!("\nScore record created");
            } else {
                println!("\nScore record loaded");
            }
            for tier in level.tiers() {
                println!(
                    "\n{} Score: {}",
                    tier.title(),
                    record.scores.score(tier).to_string().bold()
                );
            }
        }

        Commands::Status => {
            let record = tracker.status()?;
            match record.date {
                Some(date) => println!("\nTasks generated for {date}"),
                None => println!("\nNo tasks generated yet"),
            }
            println!("Refreshes left: {}", record.daily_reset_limit);
            print_list("Pending", record.pending(Tier::Daily));
            print_list("Completed", record.completed(Tier::Daily));
        }

        Commands::Generate => {
            let today = chrono::Local::now().date_naive();
            let tasks = tracker.generate(today, &mut rand::thread_rng())?;
            println!(
                "Today is {today}, the day of week is {}, daily tasks are:",
                chrono::Datelike::weekday(&today).number_from_monday()
            );
            for task in &tasks {
                println!("  - {task}");
            }
            print_written(&tracker.config().manifest_path);
        }

        Commands::Refresh => {
            let outcome = tracker.refresh(&mut rand::thread_rng())?;
            for task in &outcome.tasks {
                println!("  - {task}");
            }
            println!("Refreshes left: {}", outcome.remaining);
            println!(
                "{} Refreshed tasks have written to: {}",
                "OK".green().bold(),
                tracker.config().manifest_path.display()
            );
        }

        Commands::Complete { unrecognized } => {
            let outcome = tracker.complete(unrecognized)?;
            let rec = &outcome.reconciliation;
            println!(
                "{} {} completed, {} pending",
                "OK".green().bold(),
                rec.completed.len(),
                rec.pending.len()
            );
            if !rec.unrecognized.is_empty() {
                let verb = match unrecognized {
                    UnrecognizedPolicy::Append => "Added",
                    _ => "Ignored",
                };
                println!(
                    "   {} {verb} unrecognized tasks: {}",
                    "Warning:".yellow(),
                    rec.unrecognized.join(", ")
                );
            }
            println!("Daily Score: {}", outcome.daily_score.to_string().bold());
        }

        Commands::Rollup { tier } => {
            let summary = tracker.rollup(tier)?;
            println!(
                "{} Carried {} points from {} into {}",
                "OK".green().bold(),
                summary.carried,
                summary.from,
                summary.into
            );
        }

        Commands::Reset { tier } => {
            tracker.reset_score(tier)?;
            println!("{} {} score reset", "OK".green().bold(), tier.title());
        }
    }

    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    println!("\n{}\n{}", title.bold(), "=".repeat(29));
    if items.is_empty() {
        println!("  (none)");
    }
    for item in items {
        println!("  - {item}");
    }
}

fn print_written(path: &Path) {
    println!(
        "{} Tasks have written to: {}",
        "OK".green().bold(),
        path.display()
    );
}
