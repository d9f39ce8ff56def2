use clap::Parser;
use foldermerge::config::{
    load_config_if_present, IdentifierMode, MergeConfig, OutputMode, RawConfig,
};
use foldermerge::logger::initialize_logger;
use foldermerge::merge_folders;
use foldermerge::reporting::print_summary;
use foldermerge::MergeError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, warn};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[arg(help = "Folders to merge, overriding `folders` from the config file")]
    folders: Vec<PathBuf>,
    #[arg(short = 'c', long, env = "FOLDERMERGE_CONFIG", default_value = "config.json")]
    config: PathBuf,
    #[arg(short = 'o', long, help = "Output file, overriding `output` from the config file")]
    output: Option<PathBuf>,
    #[arg(long, help = "Write <folder>/output.txt for every folder")]
    per_folder: bool,
    #[arg(long, help = "Use bare file names in provenance headers")]
    bare_names: bool,
    #[arg(long, help = "Carry .gitignore patterns over to the following folders")]
    share_rules: bool,
    #[arg(long, help = "Do not read .gitignore files")]
    no_gitignore: bool,
    #[arg(short = 'v', long)]
    verbose: bool,
}

async fn build_config(args: CliArgs) -> Result<MergeConfig, MergeError> {
    let mut raw = if let Some(raw) = load_config_if_present(&args.config).await? {
        raw
    } else if !args.folders.is_empty() {
        debug!(
            "No configuration file at {}, using defaults",
            args.config.display()
        );
        RawConfig::default()
    } else {
        return Err(MergeError::ConfigError(format!(
            "Configuration file {} not found and no folders given",
            args.config.display()
        )));
    };

    if !args.folders.is_empty() {
        raw.folders = Some(args.folders);
    }
    if args.output.is_some() {
        raw.output = args.output;
    }
    if args.per_folder {
        raw.output_mode = OutputMode::PerFolder;
    }
    if args.bare_names {
        raw.identifier = IdentifierMode::Name;
    }
    if args.share_rules {
        raw.share_rules_across_folders = true;
    }
    if args.no_gitignore {
        raw.consider_gitignore = Some(false);
    }

    if raw.output_mode == OutputMode::PerFolder && raw.output.is_some() {
        warn!("`output` is ignored in per-folder mode");
    }

    MergeConfig::from_raw(raw)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    initialize_logger(cli_args.verbose);

    let config = match build_config(cli_args).await {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match merge_folders(config).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error merging folders: {}", e);
            ExitCode::FAILURE
        }
    }
}
