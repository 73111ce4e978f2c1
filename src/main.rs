use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use matgate::cli::{Cli, Commands};
use matgate::config::GateConfig;
use matgate::domain::CategoryRanges;
use matgate::error::Result;
use matgate::research::{RangeTableOracle, ResearchRequest};
use matgate::store::{FileStore, RecordStore};
use matgate::validation::{render_text, LifecycleOptions, OverallStatus, ValidationOrchestrator};
use matgate::ResearchCoordinator;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(passed) => {
            if passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("matgate=debug")
    } else {
        EnvFilter::new("matgate=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<bool> {
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let config = GateConfig::load(&config_dir).await?;
    let store = FileStore::new(&config.store.records_dir);
    let oracle = Arc::new(RangeTableOracle::new(CategoryRanges::builtin()));

    match cli.command {
        Commands::Validate {
            material,
            phases,
            auto_fix,
            report,
            save,
        } => {
            let orchestrator = ValidationOrchestrator::new(&config, oracle)?;
            let mut record = store.load(&material).await?;

            let mut options = LifecycleOptions {
                auto_fix,
                generate_report: false,
                ..LifecycleOptions::default()
            };
            if !phases.is_empty() {
                options.phases = phases.into_iter().map(Into::into).collect();
            }

            let result = orchestrator
                .validate_material_lifecycle(&mut record, &options)
                .await;
            if report {
                println!("{}", render_text(&result));
            } else {
                println!(
                    "{}: {} ({} issues)",
                    result.material_name,
                    result.overall_status,
                    result.severity_counts.total()
                );
            }
            if save && result.overall_status != OverallStatus::Fail {
                store.save(&record).await?;
            }
            Ok(result.overall_status != OverallStatus::Fail)
        }
        Commands::Audit { material, save } => {
            let orchestrator = ValidationOrchestrator::new(&config, oracle)?;
            let mut record = store.load(&material).await?;
            let result = orchestrator.audit_material(&mut record).await;
            println!("{}", render_text(&result));
            if save && result.overall_status != OverallStatus::Fail {
                store.save(&record).await?;
            }
            Ok(result.overall_status != OverallStatus::Fail)
        }
        Commands::Research { material, property } => {
            let record = store.load(&material).await?;
            let coordinator = ResearchCoordinator::new(
                Arc::new(matgate::CategoryRules::builtin()),
                Arc::new(matgate::QualitativeTaxonomy::builtin()),
                Arc::new(CategoryRanges::builtin()),
                oracle,
            );
            let request = ResearchRequest {
                material: record.name.clone(),
                property: property.clone(),
                category: record.category,
                current_value: record
                    .properties
                    .get(&property)
                    .and_then(|p| p.value.as_number()),
            };
            let researched = coordinator.research_single(&request).await?;
            println!(
                "{}",
                serde_yaml_bw::to_string(&researched.to_persisted())?
            );
            Ok(true)
        }
        Commands::Show { material } => {
            let record = store.load(&material).await?;
            println!("{}", serde_yaml_bw::to_string(&record)?);
            Ok(true)
        }
        Commands::List => {
            for name in store.list().await? {
                println!("{}", name);
            }
            Ok(true)
        }
    }
}
