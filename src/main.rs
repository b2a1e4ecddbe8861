mod aggregate;
mod cli;
mod config;
mod error;
mod normalize;
mod record;
mod report;
mod scan;
mod taxonomy;
mod types;
mod weight;
mod workbook;

use crate::aggregate::OfficialKey;
use crate::error::ShaftError;
use crate::record::Official;
use crate::taxonomy::Taxonomy;
use crate::types::config::ShaftConfig;
use crate::weight::WeightModel;
use crate::workbook::json::JsonWorkbookReader;
use chrono::NaiveDate;
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const REJECTED: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

struct Setup {
    config: ShaftConfig,
    taxonomy: Taxonomy,
    models: Vec<WeightModel>,
}

fn setup(dir: &Path) -> Result<Setup, ShaftError> {
    let config = config::load_config(dir)?;
    let taxonomy = config.taxonomy()?;
    let models = config.weight_models(&taxonomy)?;
    Ok(Setup {
        config,
        taxonomy,
        models,
    })
}

fn freeze_date(flag: Option<NaiveDate>, config: &ShaftConfig) -> NaiveDate {
    let freeze = flag
        .or(config.run.freeze_date)
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    info!(%freeze, "ages measured against freeze date");
    freeze
}

fn print_official(official: &Official, models: &[WeightModel], taxonomy: &Taxonomy) {
    println!("{}", official.name);
    println!(
        "  ref cert {} ({} games), nso cert {} ({} games), {} total",
        official.ref_certification,
        official.ref_tally(),
        official.nso_certification,
        official.nso_tally(),
        official.game_tally()
    );
    for game in official.games() {
        println!(
            "  {} {:<6} {:<8} {:<6} p{} age {}{}",
            game.date().map_or_else(|| "----------".to_string(), |d| d.to_string()),
            game.association(),
            game.game_type(),
            game.role(),
            game.primacy().rank(),
            game.age(),
            game.event().map(|event| format!(" ({event})")).unwrap_or_default()
        );
    }
    for model in models {
        let scored: Vec<String> = taxonomy
            .report_columns()
            .into_iter()
            .filter_map(|column| {
                let weight = official.weight_for(&model.name, column)?;
                (weight > 0.0).then(|| format!("{column} {weight:.2}"))
            })
            .collect();
        println!("  [{}] {}", model.name, scored.join(", "));
        println!(
            "  [{}] crew head {:.2} over {} qualified games",
            model.name,
            official.weight_for_roles(&model.name, taxonomy.crew_heads()),
            official.qualified_for_roles(&model.name, taxonomy.crew_heads())
        );
    }
}

fn run() -> Result<i32, ShaftError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.command {
        cli::Commands::Rank(cmd) => {
            let Setup {
                config,
                taxonomy,
                models,
            } = setup(&cmd.path)?;
            let freeze = freeze_date(cmd.freeze_date, &config);
            let mut batch = scan::load_directory(
                &cmd.path,
                &JsonWorkbookReader,
                freeze,
                &taxonomy,
                &config.run,
            )?;
            for official in &mut batch.loaded {
                official.apply_weight_models(&models, &taxonomy);
            }

            let order = match cmd.sort {
                cli::SortKey::Name => OfficialKey::Name,
                cli::SortKey::RefCert => OfficialKey::RefCert,
                cli::SortKey::NsoCert => OfficialKey::NsoCert,
                cli::SortKey::Games => OfficialKey::GameTally,
                cli::SortKey::RefGames => OfficialKey::RefTally,
                cli::SortKey::NsoGames => OfficialKey::NsoTally,
            };
            let mut exports = Vec::new();
            for model in &models {
                let name = report::export_name(&cmd.path, &model.name);
                let tables =
                    report::sheets::results_tables(&batch.loaded, &model.name, &taxonomy, order);
                report::export::write_workbook(&cmd.path.join(&name), &tables)?;
                exports.push(name);
            }
            let name = report::export_name(&cmd.path, "rejects");
            report::export::write_workbook(
                &cmd.path.join(&name),
                &[report::sheets::rejects_table(&batch.rejected)],
            )?;
            exports.push(name);
            let name = report::export_name(&cmd.path, "events");
            report::export::write_workbook(
                &cmd.path.join(&name),
                &[report::sheets::events_table(&batch.loaded)],
            )?;
            exports.push(name);

            if !cli.quiet {
                let summary = report::summarize(
                    &cmd.path, freeze, &batch, &models, &taxonomy, cmd.top, exports,
                );
                let output_format = match cmd.format {
                    cli::ReportFormat::Json => report::OutputFormat::Json,
                    cli::ReportFormat::Md => report::OutputFormat::Md,
                };
                println!("{}", report::render(&summary, output_format)?);
            }

            if batch.rejected.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::REJECTED)
            }
        }
        cli::Commands::Dump(cmd) => {
            let Setup {
                config,
                taxonomy,
                models,
            } = setup(&cmd.path)?;
            let model = match &cmd.model {
                Some(name) => models.iter().find(|model| &model.name == name),
                None => models.first(),
            }
            .ok_or_else(|| {
                ShaftError::UnknownModel(cmd.model.clone().unwrap_or_default())
            })?;
            let freeze = freeze_date(cmd.freeze_date, &config);
            let batch = scan::load_directory(
                &cmd.path,
                &JsonWorkbookReader,
                freeze,
                &taxonomy,
                &config.run,
            )?;

            let name = report::export_name(&cmd.path, "raw_dump");
            let tables = report::sheets::raw_dump_tables(&batch.loaded, model, &taxonomy);
            let written = report::export::write_workbook(&cmd.path.join(name), &tables)?;
            if !cli.quiet {
                println!(
                    "raw dump ({} officials, model {}): {}",
                    batch.loaded.len(),
                    model.name,
                    written.display()
                );
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Inspect(cmd) => {
            if !cmd.file.is_file() {
                return Err(ShaftError::PathNotFound(cmd.file.display().to_string()));
            }
            let dir = cmd
                .file
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let Setup {
                config,
                taxonomy,
                models,
            } = setup(dir)?;
            let freeze = freeze_date(cmd.freeze_date, &config);

            match normalize::load_document(&JsonWorkbookReader, &cmd.file, freeze, &taxonomy) {
                Ok(mut official) => {
                    official.apply_weight_models(&models, &taxonomy);
                    print_official(&official, &models, &taxonomy);
                    Ok(exit_code::SUCCESS)
                }
                Err(reason) => {
                    println!("rejected {}: {reason}", cmd.file.display());
                    Ok(exit_code::REJECTED)
                }
            }
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
