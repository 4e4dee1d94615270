#![forbid(unsafe_code)]

mod output;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use output::OutputMode;
use pulse_core::query::{self, ItemFilter, ReportFilter};
use pulse_core::{
    EngineConfig, MemberStatus, Priority, Report, ReportStatus, Store, StoreError, TeamMember,
    WorkItem,
};
use pulse_sim::{DeterministicRng, run_ticks};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pulse: work item tracking engine",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Start from an empty store instead of the demo seed.
    #[arg(long, global = true)]
    no_seed: bool,

    /// Engine config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List work items",
        after_help = "EXAMPLES:\n    # Pending items only\n    pulse list --filter pending\n\n    # Machine-readable output\n    pulse list --json"
    )]
    List {
        /// Named filter to apply.
        #[arg(long, default_value = "all", value_parser = ["all", "completed", "pending", "starred"])]
        filter: String,

        /// Only items assigned to this owner.
        #[arg(long)]
        owner: Option<String>,
    },

    #[command(
        next_help_heading = "Write",
        about = "Create a new work item",
        after_help = "EXAMPLES:\n    pulse add \"Write spec\" --category Design --priority medium"
    )]
    Add {
        /// Item title.
        title: String,

        /// Free-form category label.
        #[arg(long, default_value = "Design")]
        category: String,

        /// Priority band: low, medium, high, or critical.
        #[arg(long, default_value = "medium")]
        priority: Priority,
    },

    #[command(next_help_heading = "Write", about = "Toggle an item's completed flag")]
    Done {
        /// Item id.
        id: u64,
    },

    #[command(next_help_heading = "Write", about = "Toggle an item's starred flag")]
    Star {
        /// Item id.
        id: u64,
    },

    #[command(next_help_heading = "Write", about = "Delete a work item")]
    Rm {
        /// Item id.
        id: u64,
    },

    #[command(next_help_heading = "Write", about = "Shift an item's progress by a signed delta")]
    Progress {
        /// Item id.
        id: u64,

        /// Signed delta; the result is clamped to 0..=100.
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },

    #[command(next_help_heading = "Read", about = "Aggregate counts and percentages")]
    Stats,

    #[command(
        next_help_heading = "Read",
        about = "List team members",
        after_help = "EXAMPLES:\n    pulse team --status online\n    pulse team --search developer"
    )]
    Team {
        /// Presence filter: online, busy, or offline.
        #[arg(long)]
        status: Option<MemberStatus>,

        /// Case-insensitive name/role search.
        #[arg(long)]
        search: Option<String>,
    },

    #[command(next_help_heading = "Read", about = "List status reports")]
    Reports {
        /// Status filter, e.g. "on-track" or "At Risk".
        #[arg(long)]
        status: Option<ReportStatus>,

        /// Only reports owned by this person.
        #[arg(long)]
        owner: Option<String>,
    },

    #[command(
        next_help_heading = "Simulation",
        about = "Replay deterministic drift ticks",
        long_about = "Apply the simulated-update generator to the store a fixed number of times.\nThe same seed always produces the same trajectory.",
        after_help = "EXAMPLES:\n    pulse drift --ticks 10 --seed 42"
    )]
    Drift {
        /// Number of ticks to apply.
        #[arg(long, default_value_t = 10)]
        ticks: u64,

        /// RNG seed for reproducible runs.
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        if let Some(store_err) = err.downcast_ref::<StoreError>() {
            eprintln!("error[{}]: {store_err}", store_err.code());
            if let Some(hint) = store_err.hint() {
                eprintln!("hint: {hint}");
            }
        } else {
            eprintln!("error: {err:#}");
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let mode = cli.output_mode();

    let mut store = if cli.no_seed { Store::new() } else { Store::seeded() };
    info!(items = store.items().len(), "store ready");

    match &cli.command {
        Commands::List { filter, owner } => {
            let filter = owner.as_ref().map_or_else(
                || named_item_filter(filter),
                |o| ItemFilter::Owner(o.clone()),
            );
            let items: Vec<WorkItem> = query::filter_items(&store, &filter)
                .into_iter()
                .cloned()
                .collect();
            render_items(mode, &items)
        }
        Commands::Add {
            title,
            category,
            priority,
        } => {
            let item = store.add_item_now(title, category, *priority)?;
            if !cli.quiet && !mode.is_json() {
                println!("added item {}", item.id);
            }
            render_item(mode, &item)
        }
        Commands::Done { id } => render_item(mode, &store.toggle_complete(*id)?),
        Commands::Star { id } => render_item(mode, &store.toggle_star(*id)?),
        Commands::Rm { id } => {
            let removed = store.delete_item(*id)?;
            if !cli.quiet && !mode.is_json() {
                println!("deleted item {}", removed.id);
            }
            render_item(mode, &removed)
        }
        Commands::Progress { id, delta } => render_item(mode, &store.update_progress(*id, *delta)?),
        Commands::Stats => render_stats(mode, &store),
        Commands::Team { status, search } => {
            let members: Vec<TeamMember> =
                query::filter_members(&store, *status, search.as_deref())
                    .into_iter()
                    .cloned()
                    .collect();
            render_members(mode, &members)
        }
        Commands::Reports { status, owner } => {
            let filter = match (status, owner) {
                (_, Some(o)) => ReportFilter::Owner(o.clone()),
                (Some(s), None) => ReportFilter::Status(*s),
                (None, None) => ReportFilter::All,
            };
            let reports: Vec<Report> = query::filter_reports(&store, &filter)
                .into_iter()
                .cloned()
                .collect();
            render_reports(mode, &reports)
        }
        Commands::Drift { ticks, seed } => {
            let mut rng = DeterministicRng::new(*seed);
            let drifted = run_ticks(&store, &config.drift, &mut rng, *ticks);
            render_drift(mode, &store, &drifted, *ticks)
        }
    }
}

fn named_item_filter(name: &str) -> ItemFilter {
    match name {
        "completed" => ItemFilter::Completed,
        "pending" => ItemFilter::Pending,
        "starred" => ItemFilter::Starred,
        _ => ItemFilter::All,
    }
}

fn item_line(item: &WorkItem) -> String {
    let check = if item.completed { "x" } else { " " };
    let star = if item.starred { "*" } else { " " };
    let days = query::days_remaining(item.due_date, Utc::now().date_naive());
    let due = match query::due_urgency(days) {
        query::DueUrgency::Overdue => "overdue".to_owned(),
        query::DueUrgency::Critical if days == 0 => "due today".to_owned(),
        _ => format!("{days}d left"),
    };
    format!(
        "[{check}]{star} #{:<3} {:<36} {:<8} {:<12} {:>3}%  {due}",
        item.id, item.title, item.priority, item.category, item.progress
    )
}

fn render_items(mode: OutputMode, items: &[WorkItem]) -> Result<()> {
    output::render(mode, &items.to_vec(), |items, w| {
        output::section(w, &format!("{} work item(s)", items.len()))?;
        for item in items {
            writeln!(w, "{}", item_line(item))?;
        }
        Ok(())
    })
}

fn render_item(mode: OutputMode, item: &WorkItem) -> Result<()> {
    output::render(mode, item, |item, w| {
        output::kv(w, "id", item.id.to_string())?;
        output::kv(w, "title", &item.title)?;
        output::kv(w, "completed", if item.completed { "yes" } else { "no" })?;
        output::kv(w, "starred", if item.starred { "yes" } else { "no" })?;
        output::kv(w, "priority", item.priority.label())?;
        output::kv(w, "category", &item.category)?;
        output::kv(w, "due", item.due_date.to_string())?;
        output::kv(w, "progress", format!("{}%", item.progress))
    })
}

fn render_stats(mode: OutputMode, store: &Store) -> Result<()> {
    #[derive(serde::Serialize)]
    struct Stats {
        #[serde(flatten)]
        counts: query::Counts,
        average_workload: u8,
    }

    let stats = Stats {
        counts: query::aggregate_counts(store),
        average_workload: query::average_workload(store),
    };
    output::render(mode, &stats, |stats, w| {
        output::section(w, "overview")?;
        output::kv(w, "items", stats.counts.total.to_string())?;
        output::kv(
            w,
            "completed",
            format!("{} ({}%)", stats.counts.completed, stats.counts.completed_percent),
        )?;
        output::kv(w, "pending", stats.counts.pending.to_string())?;
        output::kv(w, "starred", stats.counts.starred.to_string())?;
        output::kv(w, "on track", stats.counts.on_track.to_string())?;
        output::kv(w, "at risk", stats.counts.at_risk.to_string())?;
        output::kv(w, "behind", stats.counts.behind.to_string())?;
        output::kv(w, "avg workload", format!("{}%", stats.average_workload))
    })
}

fn render_members(mode: OutputMode, members: &[TeamMember]) -> Result<()> {
    output::render(mode, &members.to_vec(), |members, w| {
        output::section(w, &format!("{} member(s)", members.len()))?;
        for m in members {
            let severity = match query::workload_severity(m.workload) {
                query::Severity::Low => "low",
                query::Severity::Medium => "medium",
                query::Severity::High => "high",
            };
            writeln!(
                w,
                "#{:<3} {:<14} {:<20} {:<8} load {:>3}% ({severity}), {} tasks",
                m.id, m.name, m.role, m.status, m.workload, m.tasks
            )?;
            for p in &m.projects {
                writeln!(w, "      - {:<22} {:>3}% [{}]", p.name, p.progress, p.priority)?;
            }
        }
        Ok(())
    })
}

fn render_reports(mode: OutputMode, reports: &[Report]) -> Result<()> {
    output::render(mode, &reports.to_vec(), |reports, w| {
        output::section(w, &format!("{} report(s)", reports.len()))?;
        for r in reports {
            writeln!(
                w,
                "#{:<3} {:<26} {:>3}%  {:<9} {:<10} {} ({})",
                r.id,
                r.title,
                r.completion,
                r.status,
                r.priority,
                r.owner,
                r.last_updated.format("%Y-%m-%d %H:%M"),
            )?;
        }
        Ok(())
    })
}

fn render_drift(mode: OutputMode, before: &Store, after: &Store, ticks: u64) -> Result<()> {
    #[derive(serde::Serialize)]
    struct DriftReport {
        ticks: u64,
        items: Vec<WorkItem>,
        members: Vec<TeamMember>,
    }

    let report = DriftReport {
        ticks,
        items: after.items().to_vec(),
        members: after.members().to_vec(),
    };
    output::render(mode, &report, |report, w| {
        output::section(w, &format!("drift: {} tick(s)", report.ticks))?;
        for (old, new) in before.items().iter().zip(&report.items) {
            writeln!(
                w,
                "item #{:<3} {:<36} progress {:>3}% -> {:>3}%",
                old.id, old.title, old.progress, new.progress
            )?;
        }
        for (old, new) in before.members().iter().zip(&report.members) {
            writeln!(
                w,
                "member #{:<3} {:<14} workload {:>3}% -> {:>3}%",
                old.id, old.name, old.workload, new.workload
            )?;
        }
        Ok(())
    })
}
