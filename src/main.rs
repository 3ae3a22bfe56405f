use clap::Parser;
use colored::Colorize;
use menuinflate::config::Config;
use menuinflate::discovery::MenuFinder;
use menuinflate::inflate_files;
use menuinflate::report::{ReportFormat, Reporter};
use menuinflate::resources::ResourceTable;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use tracing::{debug, info};

/// menuinflate - Inflate Android menu resources into resolved menu trees
#[derive(Parser, Debug)]
#[command(name = "menuinflate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Menu XML files or project directories to scan for res/menu resources
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Additional values directories to resolve @string/ and @color/ from
    #[arg(long = "res", value_name = "DIR")]
    values_dirs: Vec<PathBuf>,

    /// Hide per-item attributes in terminal output
    #[arg(long)]
    no_attributes: bool,

    /// Inflate files in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    fn name(&self) -> &'static str {
        match self {
            OutputFormat::Terminal => "terminal",
            OutputFormat::Json => "json",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("menuinflate v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let failures = run(&config, &cli)?;

    if failures > 0 {
        return Err(miette::miette!("{} menu resource(s) failed to inflate", failures));
    }
    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        let root = cli
            .paths
            .iter()
            .find(|p| p.is_dir())
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."));
        Config::from_default_locations(&root)?
    };

    // Override with CLI arguments
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if !cli.values_dirs.is_empty() {
        config.values_dirs.extend(cli.values_dirs.clone());
    }
    if let Some(format) = &cli.format {
        config.report.format = format.name().to_string();
    }
    if cli.no_attributes {
        config.report.show_attributes = false;
    }

    Ok(config)
}

/// Inflate and report; returns the number of files that failed
fn run(config: &Config, cli: &Cli) -> Result<usize> {
    let finder = MenuFinder::new(config);
    let menus = finder.find_menus(&cli.paths)?;

    if menus.is_empty() {
        if !cli.quiet {
            eprintln!("{}", "No menu resources found.".yellow());
        }
        return Ok(0);
    }
    info!("Found {} menu resources", menus.len());

    // Load values next to each res/ dir, then the explicitly configured ones
    let mut res_dirs: Vec<PathBuf> = menus.iter().filter_map(|m| m.res_dir.clone()).collect();
    res_dirs.sort();
    res_dirs.dedup();
    let mut values_dirs = finder.values_dirs(&res_dirs);
    values_dirs.extend(config.values_dirs.iter().cloned());

    let mut resources = ResourceTable::new();
    for dir in &values_dirs {
        resources
            .load_values_dir(dir)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to load values from {}", dir.display()))?;
    }
    debug!(
        "Loaded {} strings and {} colors",
        resources.string_count(),
        resources.color_count()
    );

    let registry = config.extension_registry();
    let results = inflate_files(&menus, &resources, &registry, cli.parallel);

    let format = ReportFormat::parse(&config.report.format).unwrap_or_default();
    let reporter = Reporter::new(format, cli.output.clone())
        .with_attributes(config.report.show_attributes);
    reporter.report(&results, &resources)?;

    Ok(results.iter().filter(|r| !r.is_ok()).count())
}
