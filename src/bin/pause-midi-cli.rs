#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pause_midi::{
    build_timeline, export_plan_xlsx, io,
    scheduler::{util::format_hm, BreakPlan, BreakScheduler, GridMedian, MiddayAnchor, Policy},
    Settings, ShiftRecord, TextTimeline, TimelineRenderer,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de répartition des pauses de midi
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de réglages (valeurs par défaut sinon)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PolicyArg {
    Midday,
    Grid,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Planning CSV (sinon planning d'exemple)
    #[arg(long)]
    roster: Option<String>,
    /// Date du planning (YYYY-MM-DD, défaut : aujourd'hui)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Durée de pause en heures (remplace le réglage)
    #[arg(long)]
    duration: Option<f64>,
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Écrire le planning d'exemple en CSV
    Sample {
        #[arg(long)]
        out: String,
    },

    /// Calculer les pauses et optionnellement exporter
    Plan {
        #[command(flatten)]
        run: RunArgs,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_xlsx: Option<String>,
    },

    /// Afficher la frise services + pauses
    Timeline {
        #[command(flatten)]
        run: RunArgs,
        #[arg(long, default_value_t = 40)]
        width: usize,
    },

    /// Relire un export CSV de pauses
    Inspect {
        #[arg(long)]
        csv: String,
    },

    /// Écrire les réglages effectifs en JSON
    Config {
        #[arg(long)]
        out: String,
    },
}

fn load_settings(path: Option<&str>) -> Result<Settings> {
    match path {
        Some(p) => Settings::load(p),
        None => Ok(Settings::default()),
    }
}

fn apply_overrides(settings: &mut Settings, run: &RunArgs) {
    if let Some(hours) = run.duration {
        settings.break_hours = hours;
    }
    match (run.policy, settings.policy) {
        (Some(PolicyArg::Midday), Policy::MiddayAnchor(_)) => {}
        (Some(PolicyArg::Midday), _) => settings.policy = Policy::MiddayAnchor(MiddayAnchor::default()),
        (Some(PolicyArg::Grid), Policy::GridMedian(_)) => {}
        (Some(PolicyArg::Grid), _) => settings.policy = Policy::GridMedian(GridMedian::default()),
        (None, _) => {}
    }
}

fn load_records(run: &RunArgs) -> Result<Vec<ShiftRecord>> {
    match &run.roster {
        Some(path) => io::import_roster_csv(path),
        None => Ok(pause_midi::sample_roster()),
    }
}

fn run_plan(settings: &Settings, run: &RunArgs) -> Result<BreakPlan> {
    let opts = settings
        .assign_options()
        .context("invalid break settings")?;
    let date = run.date.unwrap_or_else(|| Local::now().date_naive());
    let records = load_records(run)?;
    Ok(BreakScheduler::new(date, opts).plan(&records))
}

fn report_rejections(plan: &BreakPlan) -> i32 {
    if plan.is_complete() {
        return 0;
    }
    eprintln!("Rejected {} record(s)", plan.rejected.len());
    for r in &plan.rejected {
        eprintln!("  row {}: {}", r.index + 1, r.reason);
    }
    // Code 2 = WARNING/INCOMPLETE
    2
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let mut settings = load_settings(cli.config.as_deref())?;

    let code = match cli.cmd {
        Commands::Sample { out } => {
            io::export_roster_csv(&out, &pause_midi::sample_roster())?;
            println!("Sample roster written to {out}");
            0
        }
        Commands::Plan {
            run,
            out_csv,
            out_json,
            out_xlsx,
        } => {
            apply_overrides(&mut settings, &run);
            let plan = run_plan(&settings, &run)?;
            if let Some(path) = out_csv {
                io::export_plan_csv(path, &plan)?;
            }
            if let Some(path) = out_json {
                io::export_plan_json(path, &plan)?;
            }
            if let Some(path) = out_xlsx {
                export_plan_xlsx(path, &plan, &settings.xlsx)?;
            }
            // impression compacte
            for a in plan.assignments() {
                let window = a
                    .bounds()
                    .map(|(s, e)| format!("{} → {}", format_hm(s), format_hm(e)))
                    .unwrap_or_else(|| "-".to_string());
                println!("{} | {} | {}", a.staff_name, window, a.origin.label());
            }
            report_rejections(&plan)
        }
        Commands::Timeline { run, width } => {
            apply_overrides(&mut settings, &run);
            let plan = run_plan(&settings, &run)?;
            let timeline = build_timeline(&plan, settings.display_start, settings.display_end);
            print!("{}", TextTimeline { width }.render(&timeline));
            report_rejections(&plan)
        }
        Commands::Inspect { csv } => {
            let breaks = io::import_plan_csv(csv)?;
            for b in &breaks {
                match b.window {
                    Some((s, e)) => println!(
                        "{} | {} → {}",
                        b.staff_name,
                        s.format("%H:%M"),
                        e.format("%H:%M")
                    ),
                    None => println!("{} | no break", b.staff_name),
                }
            }
            0
        }
        Commands::Config { out } => {
            settings.save(&out)?;
            println!("Settings written to {out}");
            0
        }
    };

    std::process::exit(code);
}
