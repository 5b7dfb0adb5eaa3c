//! `state-info`: browse, search, chart, and update U.S. state records.
//!
//! Without a subcommand the interactive menu runs. Every other subcommand
//! performs one query or in-memory update and exits. Nothing is written back
//! to the record file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use state_info::catalog::Catalog;
use state_info::core::error::TableError;
use state_info::core::record::{StateRecord, parse_population};
use state_info::exit_codes;
use state_info::io::config::{DEFAULT_CONFIG_FILE, StateInfoConfig, load_config, write_config};
use state_info::io::viewer::CommandViewer;
use state_info::logging;
use state_info::menu::MenuSession;
use state_info::render;

#[derive(Parser)]
#[command(
    name = "state-info",
    version,
    about = "Browse, search, chart, and update U.S. state records"
)]
struct Cli {
    /// Config file (TOML). Defaults apply when it does not exist.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Record file to load instead of the configured `data_path`.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Image directory to use instead of the configured `assets_dir`.
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive menu (default).
    Menu,
    /// Print every state in table order.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print one state (exact, case-sensitive name) and its flower image path.
    Search {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Chart the most populous states.
    Top {
        /// Number of states; defaults to `top_n` from config.
        #[arg(short = 'n', long = "count")]
        count: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Set a state's population for this run and print the result.
    Update {
        name: String,
        #[arg(allow_hyphen_values = true)]
        population: String,
        #[arg(long)]
        json: bool,
    },
    /// Show which image each state resolves to.
    Assets,
    /// Write a config file with default values.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    let code = match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_code_for(&err)
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let command = cli.command.unwrap_or(Command::Menu);
    if let Command::InitConfig { force } = command {
        return cmd_init_config(&cli.config, force);
    }

    let cfg = effective_config(&cli.config, cli.data, cli.assets)?;
    let mut catalog = Catalog::open(&cfg)?;
    match command {
        Command::Menu => cmd_menu(&mut catalog, &cfg),
        Command::List { json } => cmd_list(&catalog, json),
        Command::Search { name, json } => cmd_search(&catalog, &name, json),
        Command::Top { count, json } => cmd_top(&catalog, count.unwrap_or(cfg.top_n), &cfg, json),
        Command::Update {
            name,
            population,
            json,
        } => cmd_update(&mut catalog, &name, &population, json),
        Command::Assets => cmd_assets(&catalog),
        Command::InitConfig { .. } => unreachable!("handled before loading the catalog"),
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<TableError>() {
        Some(TableError::NotFound(_) | TableError::UnknownState(_)) => exit_codes::NOT_FOUND,
        Some(TableError::InvalidPopulation { .. }) => exit_codes::INVALID_POPULATION,
        None => exit_codes::FAILURE,
    }
}

/// Config file values with command-line overrides applied.
fn effective_config(
    path: &Path,
    data: Option<PathBuf>,
    assets: Option<PathBuf>,
) -> Result<StateInfoConfig> {
    let mut cfg = load_config(path).with_context(|| format!("load config {}", path.display()))?;
    if let Some(data) = data {
        cfg.data_path = data;
    }
    if let Some(assets) = assets {
        cfg.assets_dir = assets;
    }
    cfg.validate()?;
    debug!(?cfg, "effective config");
    Ok(cfg)
}

fn cmd_init_config(path: &Path, force: bool) -> Result<i32> {
    if !force && path.exists() {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, &StateInfoConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_menu(catalog: &mut Catalog, cfg: &StateInfoConfig) -> Result<i32> {
    let viewer = CommandViewer::from_config(&cfg.viewer);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = MenuSession::new(catalog, stdin.lock(), stdout.lock())
        .with_chart(cfg.top_n, cfg.chart_width);
    if let Some(viewer) = &viewer {
        session = session.with_viewer(viewer);
    }
    let end = session.run()?;
    debug!(?end, "menu session ended");
    Ok(exit_codes::OK)
}

fn cmd_list(catalog: &Catalog, json: bool) -> Result<i32> {
    let records = catalog.table().list_all();
    if json {
        print_json(&records)?;
    } else {
        print!("{}", render::table(records));
    }
    Ok(exit_codes::OK)
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    #[serde(flatten)]
    record: &'a StateRecord,
    flower_image: Option<&'a Path>,
}

fn cmd_search(catalog: &Catalog, name: &str, json: bool) -> Result<i32> {
    let record = catalog.table().find_by_name(name)?;
    let image = catalog.flower_image(name);
    if json {
        print_json(&SearchOutput {
            record,
            flower_image: image.as_ref().ok().copied(),
        })?;
        return Ok(exit_codes::OK);
    }
    print!("{}", render::record(record));
    match image {
        Ok(path) => println!("Flower image: {}", path.display()),
        Err(err) => println!("Flower image unavailable: {err}"),
    }
    Ok(exit_codes::OK)
}

fn cmd_top(catalog: &Catalog, count: usize, cfg: &StateInfoConfig, json: bool) -> Result<i32> {
    let top = catalog.table().top_n_by_population(count);
    if json {
        print_json(&top)?;
    } else {
        println!("Top {} states by population:", top.len());
        print!("{}", render::bar_chart(&top, cfg.chart_width));
    }
    Ok(exit_codes::OK)
}

fn cmd_update(catalog: &mut Catalog, name: &str, raw: &str, json: bool) -> Result<i32> {
    let value = parse_population(raw)?;
    let record = catalog.update_population(name, value)?.clone();
    if json {
        print_json(&record)?;
        return Ok(exit_codes::OK);
    }
    print!("{}", render::record(&record));
    if let Some(rank) = catalog.table().population_rank(name) {
        println!("Rank:       {} of {}", rank, catalog.table().len());
    }
    println!("(not saved; the record file is unchanged)");
    Ok(exit_codes::OK)
}

fn cmd_assets(catalog: &Catalog) -> Result<i32> {
    for record in catalog.table().list_all() {
        match catalog.flower_image(&record.name) {
            Ok(path) => println!("{}: {}", record.name, path.display()),
            Err(err) => println!("{}: {}", record.name, err),
        }
    }
    for path in catalog.assets().unclaimed() {
        println!("unclaimed: {}", path.display());
    }
    Ok(exit_codes::OK)
}

/// Serialize `value` to pretty-printed JSON on stdout with trailing newline.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(value).context("serialize json")?;
    payload.push('\n');
    io::stdout()
        .lock()
        .write_all(payload.as_bytes())
        .context("write stdout")?;
    Ok(())
}
