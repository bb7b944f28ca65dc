//! hirepilot: candidate scoring and shortlist selection tool

use clap::Parser;
use hirepilot::cli::{self, Cli, Commands, ConfigAction};
use hirepilot::config::{Config, OutputFormat};
use hirepilot::error::{HirePilotError, Result};
use hirepilot::input::CandidateLoader;
use hirepilot::output::report::{
    ExplanationReport, RankingReport, ReportMetadata, ShortlistReport, SnapshotReport,
};
use hirepilot::output::{save_report_to_file, suggest_export_filename, Report, ReportGenerator};
use hirepilot::processing::candidate::Candidate;
use hirepilot::processing::categorizer::Category;
use hirepilot::processing::ranking::{rank, Page};
use hirepilot::processing::scorer::Weights;
use hirepilot::processing::selector::auto_pick;
use hirepilot::processing::shortlist::Shortlist;
use hirepilot::processing::text_processor::{filter_candidates, matches_query};
use log::{error, info, warn};
use std::path::Path;
use std::process;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Rank {
            input,
            search,
            page,
            page_size,
            weights,
            blind,
            output,
            save,
        } => {
            let candidates = load_candidates(&input)?;
            let weights = apply_weight_overrides(config.weights(), &weights);
            let format = resolve_format(output.as_deref(), &config)?;

            let query = search.filter(|q| !q.trim().is_empty());
            let ranked: Vec<_> = rank(&candidates, &weights)
                .into_iter()
                .filter(|s| query.as_deref().map_or(true, |q| matches_query(s.candidate, q)))
                .collect();
            info!("{} of {} candidates match", ranked.len(), candidates.len());

            let page = Page::new(
                ranked.len(),
                page,
                page_size.unwrap_or(config.output.page_size),
            );
            let report = Report::Ranking(RankingReport::build(
                metadata(&input, blind || config.output.blind),
                query,
                candidates.len(),
                &ranked,
                page,
                &weights,
            ));

            let content = render(&report, format, &config)?;
            println!("{}", content);
            if let Some(path) = save {
                save_report_to_file(&content, &path)?;
                println!("💾 Saved to {}", path.display());
            }
        }

        Commands::Pick {
            input,
            search,
            budget,
            no_diversity,
            weights,
            include,
            exclude,
            blind,
            output,
            export,
        } => {
            let candidates = load_candidates(&input)?;
            let weights = apply_weight_overrides(config.weights(), &weights);
            let format = resolve_format(output.as_deref(), &config)?;

            let mut options = config.selection_options();
            if let Some(budget) = budget {
                options.budget_avg = Some(budget).filter(|&b| b > 0);
            }
            if no_diversity {
                options.prefer_diversity = false;
            }

            let pool: Vec<Candidate> = match search.as_deref().filter(|q| !q.trim().is_empty()) {
                Some(query) => {
                    let hits: Vec<Candidate> =
                        filter_candidates(&candidates, query).into_iter().cloned().collect();
                    info!("{} of {} candidates match", hits.len(), candidates.len());
                    hits
                }
                None => candidates.clone(),
            };

            let mut shortlist = Shortlist::new();
            shortlist.replace(auto_pick(&pool, &weights, &options).into_iter().cloned());
            info!("Auto-picked {} candidates", shortlist.len());

            for email in &include {
                let candidate = find_by_email(&candidates, email)
                    .ok_or_else(|| HirePilotError::CandidateNotFound(email.clone()))?;
                if !shortlist.add(candidate.clone()) {
                    warn!("{} is already shortlisted", email);
                }
            }
            for email in &exclude {
                match find_by_email(shortlist.as_slice(), email).cloned() {
                    Some(candidate) => {
                        shortlist.remove(&candidate);
                    }
                    None => warn!("{} is not on the shortlist", email),
                }
            }

            let mut report = ShortlistReport::build(
                metadata(&input, blind || config.output.blind),
                shortlist.as_slice(),
                &weights,
                options.budget_avg,
            );

            if let Some(target) = export {
                let path = if target.is_dir() {
                    target.join(suggest_export_filename())
                } else {
                    target
                };
                save_report_to_file(&shortlist.to_json()?, &path)?;
                info!("Exported shortlist to {}", path.display());
                report.export_path = Some(path.display().to_string());
            }

            println!("{}", render(&Report::Shortlist(report), format, &config)?);
        }

        Commands::Explain {
            input,
            candidate,
            blind,
            output,
        } => {
            let candidates = load_candidates(&input)?;
            let format = resolve_format(output.as_deref(), &config)?;

            let found = match candidate.trim().parse::<usize>() {
                Ok(index) => candidates.get(index),
                Err(_) => find_by_email(&candidates, &candidate),
            }
            .ok_or_else(|| HirePilotError::CandidateNotFound(candidate.clone()))?;

            let report = Report::Explanation(ExplanationReport::build(
                metadata(&input, blind || config.output.blind),
                found,
                &config.weights(),
            ));
            println!("{}", render(&report, format, &config)?);
        }

        Commands::Snapshot {
            input,
            shortlist,
            output,
        } => {
            let candidates = load_candidates(&input)?;
            let format = resolve_format(output.as_deref(), &config)?;
            let picked: Vec<Candidate> = match shortlist {
                Some(path) => load_candidates(&path)?,
                None => auto_pick(&candidates, &config.weights(), &config.selection_options())
                    .into_iter()
                    .cloned()
                    .collect(),
            };
            let report = Report::Snapshot(SnapshotReport::build(
                metadata(&input, config.output.blind),
                &candidates,
                &picked,
            ));
            println!("{}", render(&report, format, &config)?);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                println!("{}", toml::to_string_pretty(&config)?);
            }
            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }
            Some(ConfigAction::Set { key, value }) => {
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ Set {} = {}", key, value);
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    CandidateLoader::new().with_cache(false).load(path)
}

fn metadata(input: &Path, blind: bool) -> ReportMetadata {
    ReportMetadata::new(&input.to_string_lossy(), blind)
}

fn apply_weight_overrides(mut weights: Weights, overrides: &[(Category, f64)]) -> Weights {
    for (category, weight) in overrides {
        weights.set(*category, *weight);
    }
    weights
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(raw) => cli::parse_output_format(raw).map_err(HirePilotError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn render(report: &Report, format: OutputFormat, config: &Config) -> Result<String> {
    ReportGenerator::with_options(config.output.color_output, true, true)
        .generate_report(report, &format)
}

fn find_by_email<'a>(candidates: &'a [Candidate], email: &str) -> Option<&'a Candidate> {
    let wanted = email.trim().to_lowercase();
    candidates.iter().find(|c| {
        c.email
            .as_deref()
            .is_some_and(|e| e.trim().to_lowercase() == wanted)
    })
}
