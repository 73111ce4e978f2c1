use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::validation::Phase;

#[derive(Debug, Parser)]
#[command(name = "matgate", about = "Material record validation gate")]
pub struct Cli {
    /// Directory holding matgate.toml; defaults to the working directory.
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full validation lifecycle for a material.
    Validate {
        material: String,
        /// Subset of phases to run, comma separated.
        #[arg(long, value_delimiter = ',')]
        phases: Vec<PhaseArg>,
        #[arg(long)]
        auto_fix: bool,
        /// Print the human-readable report.
        #[arg(long)]
        report: bool,
        /// Persist the record back to the store after a passing run.
        #[arg(long)]
        save: bool,
    },
    /// Run only the discovery/research audit for a material.
    Audit {
        material: String,
        #[arg(long)]
        save: bool,
    },
    /// Research a single property with the acceptance floor applied.
    Research { material: String, property: String },
    /// Print a material record as stored.
    Show { material: String },
    /// List materials in the store.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PhaseArg {
    PreGeneration,
    MaterialAudit,
    PostGeneration,
    Schema,
}

impl From<PhaseArg> for Phase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::PreGeneration => Phase::PreGeneration,
            PhaseArg::MaterialAudit => Phase::MaterialAudit,
            PhaseArg::PostGeneration => Phase::PostGeneration,
            PhaseArg::Schema => Phase::Schema,
        }
    }
}
