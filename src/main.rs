use clap::{Args, Parser, Subcommand};
use profile_filter::activation::StaticActivation;
use profile_filter::config::AppConfig;
use profile_filter::error::AppError;
use profile_filter::filter::{Admission, Filter, RuleSet};
use profile_filter::notice::TracingNotices;
use profile_filter::profile::ProfileSnapshot;
use profile_filter::telemetry;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "profile-filter",
    about = "Screen captured profiles against the configured admission rules",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a captured profile snapshot
    Check(CheckArgs),
    /// Validate the rule file and print the effective rules
    Rules(RulesArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// JSON snapshot of the profile header
    #[arg(long)]
    snapshot: PathBuf,
    /// Override the configured rule file
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Treat the installation as activated regardless of configuration
    #[arg(long)]
    activated: bool,
    /// Print the decision as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct RulesArgs {
    /// Override the configured rule file
    #[arg(long)]
    rules: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    username: &'a str,
    #[serde(flatten)]
    admission: &'a Admission,
    follow_private_or_empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_numbers_in_profile_name: Option<u32>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Check(args) => run_check(&config, args),
        Command::Rules(args) => run_rules(&config, args),
    }
}

fn run_check(config: &AppConfig, args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs {
        snapshot,
        rules,
        activated,
        json,
    } = args;

    let gate = StaticActivation::new(activated || config.activation.activated);
    let rules_path = rules.unwrap_or_else(|| config.rules.path.clone());
    let filter = Filter::load(&gate, None, &rules_path, Arc::new(TracingNotices))?;

    let profile = ProfileSnapshot::from_path(&snapshot)?;
    info!(username = %profile.username, enabled = filter.is_enabled(), "screening profile");
    let admission = filter.evaluate(&profile, &profile.username);

    if json {
        let report = CheckReport {
            username: &profile.username,
            admission: &admission,
            follow_private_or_empty: filter.can_follow_private_or_empty(),
            max_numbers_in_profile_name: filter.max_numbers_in_profile_name(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match admission.rejection() {
        None => println!("@{}: admitted", profile.username),
        Some(reason) => println!("rejected: {}", reason.summary(&profile.username)),
    }
    println!(
        "follow private or empty profiles: {}",
        filter.can_follow_private_or_empty()
    );
    if let Some(max) = filter.max_numbers_in_profile_name() {
        println!("max numbers in profile name: {max}");
    }

    Ok(())
}

fn run_rules(config: &AppConfig, args: RulesArgs) -> Result<(), AppError> {
    let rules_path = args.rules.unwrap_or_else(|| config.rules.path.clone());

    if !rules_path.exists() {
        println!(
            "no rule file at {}, filtering disabled",
            rules_path.display()
        );
        return Ok(());
    }

    let rules = RuleSet::from_path(&rules_path)?;
    println!("{}", serde_json::to_string_pretty(&rules)?);
    Ok(())
}
