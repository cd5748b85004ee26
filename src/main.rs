//! slitplan - CLI for the jumbo-roll cutting plan calculator.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use slitplan::history::DEFAULT_HISTORY_LIMIT;
use slitplan::update::CURRENT_VERSION;
use slitplan::{
    export_report, format_duration, parse_additional_width, parse_order_rolls, CuttingPlan,
    HistoryRecord, HistoryStore, MaterialCode, MaterialSpec, OrderSpec, Planner, PlannerConfig,
    RollSpec, StockTicket, UpdateChecker,
};

/// Plan how a jumbo roll is slit into finished rolls.
#[derive(Parser, Debug)]
#[command(name = "slitplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the history database
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Planner configuration (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute and print a cutting plan
    Calc {
        #[command(flatten)]
        plan: PlanArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute a plan and record it in the history
    Execute {
        #[command(flatten)]
        plan: PlanArgs,

        /// Warehouse stock ticket (NNN/YYYY)
        #[arg(long, default_value = "")]
        ticket: String,

        /// Material code (latin letters and digits)
        #[arg(long, default_value = "")]
        material_code: String,
    },

    /// List recorded plans, newest first
    History {
        /// Maximum number of rows
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: usize,
    },

    /// Delete every recorded plan
    ClearHistory,

    /// Export recorded plans to a CSV report
    Export {
        /// Output directory (defaults to the data directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Check whether a newer release is published
    CheckUpdate {
        /// URL of the plain-text version file (plain http:// only; https is not supported)
        #[arg(long)]
        url: String,
    },
}

/// Request parameters shared by `calc` and `execute`.
#[derive(Args, Debug)]
struct PlanArgs {
    /// Material width in mm
    #[arg(long)]
    material_width: f64,

    /// Useful width in mm
    #[arg(long)]
    useful_width: f64,

    /// Finished roll width in mm
    #[arg(long)]
    roll_width: f64,

    /// Finished roll length in m
    #[arg(long)]
    roll_length: f64,

    /// Jumbo roll length in m
    #[arg(long)]
    jumbo_length: f64,

    /// Number of main rolls ordered
    #[arg(long, allow_hyphen_values = true)]
    order: String,

    /// Trailing roll width in mm; automatic when omitted
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    additional_width: String,
}

impl PlanArgs {
    fn compute(&self, planner: &Planner) -> Result<CuttingPlan> {
        let order_rolls = parse_order_rolls(&self.order)?;
        let mut order = OrderSpec::new(self.jumbo_length, order_rolls);
        if let Some(width) = parse_additional_width(&self.additional_width)? {
            order = order.with_additional_width(width);
        }

        let plan = planner.compute(
            &MaterialSpec::new(self.material_width, self.useful_width),
            &RollSpec::new(self.roll_width, self.roll_length),
            &order,
        )?;
        Ok(plan)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let planner = Planner::new(load_config(cli.config.as_deref())?);
    let data_dir = cli.data_dir;

    match cli.command {
        Command::Calc { plan, json } => {
            let plan = plan.compute(&planner)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }

        Command::Execute {
            plan,
            ticket,
            material_code,
        } => {
            let ticket = StockTicket::parse_optional(&ticket)?;
            let material_code = MaterialCode::parse(&material_code)?;
            let plan = plan.compute(&planner)?;
            print_plan(&plan);

            let store = open_store(&resolve_data_dir(data_dir)?)?;
            let record =
                HistoryRecord::from_plan(&plan, Local::now().naive_local(), ticket, material_code);
            let id = store.insert(&record).context("Failed to record plan")?;
            info!("Recorded plan #{}", id);
        }

        Command::History { limit } => {
            let store = open_store(&resolve_data_dir(data_dir)?)?;
            let rows = store.fetch_recent(limit)?;
            if rows.is_empty() {
                println!("History is empty");
            }
            for row in rows {
                println!(
                    "{}  {:>8}  {:<10}  {:>6.1} mm  {:>9.1} m2  {:>5.1}%  +{}/+{}  {:.1} m",
                    row.timestamp.format("%Y-%m-%d %H:%M"),
                    row.stock_ticket,
                    row.material_code,
                    row.roll_width_mm,
                    row.useful_area_m2,
                    row.waste_percent,
                    row.surplus_main_rolls,
                    row.surplus_additional_rolls,
                    row.used_length_m,
                );
            }
        }

        Command::ClearHistory => {
            let store = open_store(&resolve_data_dir(data_dir)?)?;
            let removed = store.clear()?;
            println!("Removed {} record(s)", removed);
        }

        Command::Export { dir } => {
            let data_dir = resolve_data_dir(data_dir)?;
            let store = open_store(&data_dir)?;
            let dir = dir.unwrap_or(data_dir);
            let path = export_report(&store, &dir, Local::now().naive_local())
                .with_context(|| format!("Failed to export report to {}", dir.display()))?;
            println!("{}", path.display());
        }

        Command::CheckUpdate { url } => {
            if UpdateChecker::new(url, CURRENT_VERSION).check() {
                println!("A newer version is available");
            } else {
                println!("slitplan {} is up to date", CURRENT_VERSION);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = PlannerConfig::from_json(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|dir| dir.join("slitplan"))
        .context("No data directory on this platform; pass --data-dir")
}

fn open_store(data_dir: &Path) -> Result<HistoryStore> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let path = data_dir.join("history.db");
    HistoryStore::open(&path).with_context(|| format!("Failed to open {}", path.display()))
}

fn print_plan(plan: &CuttingPlan) {
    if plan.was_adjusted {
        println!(
            "Roll width:      {:.1} mm (adjusted from {:.1} mm)",
            plan.roll_width_mm, plan.roll_width_input_mm
        );
    } else {
        println!("Roll width:      {:.1} mm", plan.roll_width_mm);
    }
    println!("Rolls across:    {}", plan.main_count);
    match plan.additional_width_mm {
        Some(width) => println!("Additional roll: {:.1} mm", width),
        None => println!("Additional roll: none"),
    }

    let lanes: Vec<String> = plan.lanes().iter().map(|lane| lane.to_string()).collect();
    println!("Layout:          {}", lanes.join(" | "));

    println!(
        "Cycles:          {} of {} possible",
        plan.cycles_used, plan.length_count
    );
    println!(
        "Rolls:           {} main + {} additional = {}",
        plan.total_main_rolls, plan.total_additional_rolls, plan.total_rolls
    );
    println!(
        "Surplus:         {} main, {} additional",
        plan.surplus_main_rolls, plan.surplus_additional_rolls
    );
    println!("Used length:     {:.1} m", plan.used_length_m);
    println!(
        "Area:            {:.1} m2 total, {:.1} m2 useful, {:.1} m2 waste ({:.1}%)",
        plan.total_area_m2, plan.useful_area_m2, plan.waste_area_m2, plan.waste_percent
    );
    println!(
        "Duration:        {}",
        format_duration(plan.estimated_hours)
    );

    if plan.is_short() {
        warn!(
            "Jumbo length is not enough for the order: {} roll(s) short",
            plan.shortage_rolls
        );
    }
}
