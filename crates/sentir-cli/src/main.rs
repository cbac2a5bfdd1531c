// Sentir CLI: log emotional check-ins and inspect metrics from the terminal.
//
// Entries live in a JSON array file (`--entries`, default `entries.json`).
// Every metric command reads the whole file, slices the requested period
// ending at `--now` and prints either a short human summary or JSON.

mod output;

use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use sentir::atoms::config::MetricsConfig;
use sentir::engine::axes;
use sentir::engine::window::{rescale_intensity, rescale_value};
use sentir::{
    AnalyticsService, BodyLocation, CertaintyBucket, EmotionEntry, EntryRepository,
    InMemoryEntryStore, IntensityScale, MetricsResult, Period, TimeReference,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sentir", version, about = "Emotional metrics from self-reported check-ins")]
struct Cli {
    /// JSON file holding the check-in history
    #[arg(long, global = true, env = "SENTIR_ENTRIES", default_value = "entries.json")]
    entries: PathBuf,

    /// TOML file overriding metric thresholds and weights
    #[arg(long, global = true, env = "SENTIR_CONFIG")]
    config: Option<PathBuf>,

    /// Reference time (RFC 3339). Defaults to the current time.
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    /// Print JSON instead of a text summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone, Copy)]
struct PeriodArgs {
    /// Analysis period
    #[arg(long, value_enum, default_value_t = PeriodArg::Week)]
    period: PeriodArg,

    /// Custom period length in days (overrides --period)
    #[arg(long)]
    days: Option<u32>,
}

impl PeriodArgs {
    fn resolve(&self) -> Period {
        match self.days {
            Some(days) => Period::from_days(days),
            None => match self.period {
                PeriodArg::Week => Period::Week,
                PeriodArg::Fortnight => Period::Fortnight,
                PeriodArg::Month => Period::Month,
            },
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum PeriodArg {
    Week,
    Fortnight,
    Month,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum ScaleArg {
    /// 0–10
    Ten,
    /// 0–100
    Hundred,
}

impl From<ScaleArg> for IntensityScale {
    fn from(scale: ScaleArg) -> Self {
        match scale {
            ScaleArg::Ten => IntensityScale::Ten,
            ScaleArg::Hundred => IntensityScale::Hundred,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Every metric for the period
    Panel(PeriodArgs),
    /// Current emotional state
    State(PeriodArgs),
    /// DEAM EQ composite with submetrics
    Deam(PeriodArgs),
    /// Emotional granularity
    Granularity(PeriodArgs),
    /// Emotional awareness with insights
    Awareness(PeriodArgs),
    /// Recovery time after intense negative peaks
    Inertia(PeriodArgs),
    /// Append a check-in
    Log {
        /// Emotion label, e.g. "Ansioso"
        emotion: String,
        #[arg(long)]
        intensity: Option<u8>,
        /// Scale the intensities were given on
        #[arg(long, value_enum, default_value_t = ScaleArg::Ten)]
        scale: ScaleArg,
        /// Coping technique applied
        #[arg(long)]
        intervention: Option<String>,
        /// Intensity after the intervention
        #[arg(long, requires = "intensity")]
        after: Option<u8>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        activity: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Body locations, snake_case (e.g. chest, whole_body)
        #[arg(long = "body", value_delimiter = ',', value_parser = parse_snake::<BodyLocation>)]
        body: Vec<BodyLocation>,
        /// just_now, few_hours_ago, within_day, few_days_ago, over_month_ago, not_yet_happened
        #[arg(long, value_parser = parse_snake::<TimeReference>)]
        when: Option<TimeReference>,
        /// zero_to_five, five_to_twenty, twenty_to_fifty, fifty_to_seventy, seventy_to_hundred, dont_know
        #[arg(long, value_parser = parse_snake::<CertaintyBucket>)]
        certainty: Option<CertaintyBucket>,
        /// Self-reported confidence in [0, 1]
        #[arg(long)]
        confidence: Option<f64>,
        /// Check-in time (RFC 3339). Defaults to --now.
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Record the post-intervention intensity of an existing check-in
    After {
        id: String,
        value: u8,
        /// Scale the value was given on
        #[arg(long, value_enum, default_value_t = ScaleArg::Ten)]
        scale: ScaleArg,
    },
    /// Look up a label's valence/arousal, or list the whole table
    Axes { label: Option<String> },
    /// Print the effective configuration as TOML
    Config,
    /// Generate shell completions
    Completions { shell: Shell },
}

/// Parse a snake_case enum name through its serde representation.
fn parse_snake<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string()))
        .map_err(|_| format!("unknown value '{raw}'"))
}

fn load_config(path: Option<&Path>) -> MetricsResult<MetricsConfig> {
    match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p)?;
            let cfg = MetricsConfig::from_toml_str(&raw)?;
            log::info!("[cli] Loaded config from {}", p.display());
            Ok(cfg)
        }
        None => Ok(MetricsConfig::default()),
    }
}

fn service(cli: &Cli) -> MetricsResult<AnalyticsService<InMemoryEntryStore>> {
    let config = load_config(cli.config.as_deref())?;
    let store = InMemoryEntryStore::load_json_file(&cli.entries)?;
    AnalyticsService::new(store, config)
}

fn run(cli: Cli) -> MetricsResult<()> {
    let now = cli.now.unwrap_or_else(Utc::now);
    match &cli.command {
        Commands::Panel(p) => {
            let panel = service(&cli)?.compute_panel(p.resolve(), now)?;
            output::emit(cli.json, &panel, output::panel)
        }
        Commands::State(p) => {
            let panel = service(&cli)?.compute_panel(p.resolve(), now)?;
            output::emit(cli.json, &panel.state, output::state)
        }
        Commands::Deam(p) => {
            let panel = service(&cli)?.compute_panel(p.resolve(), now)?;
            output::emit(cli.json, &panel.deam, output::deam)
        }
        Commands::Granularity(p) => {
            let panel = service(&cli)?.compute_panel(p.resolve(), now)?;
            output::emit(cli.json, &panel.granularity, output::granularity)
        }
        Commands::Awareness(p) => {
            let panel = service(&cli)?.compute_panel(p.resolve(), now)?;
            output::emit(cli.json, &panel.awareness, output::awareness)
        }
        Commands::Inertia(p) => {
            let panel = service(&cli)?.compute_panel(p.resolve(), now)?;
            output::emit(cli.json, &panel.inertia, output::inertia)?;
            if !cli.json {
                println!("Cruce negativo→positivo: {:.1} h", panel.crossing_inertia_hours);
            }
            Ok(())
        }
        Commands::Log {
            emotion,
            intensity,
            scale,
            intervention,
            after,
            notes,
            activity,
            company,
            tags,
            body,
            when,
            certainty,
            confidence,
            at,
        } => {
            let entry = EmotionEntry {
                intensity_before: *intensity,
                intensity_after: *after,
                intervention: intervention.clone(),
                notes: notes.clone(),
                activity: activity.clone(),
                company: company.clone(),
                context_tags: tags.clone(),
                body_signals: body.clone(),
                time_reference: when.unwrap_or_default(),
                certainty: certainty.unwrap_or_default(),
                confidence: *confidence,
                ..EmotionEntry::new(emotion.trim(), at.unwrap_or(now))
            };
            let entry = rescale_intensity(entry, (*scale).into())?;
            let store = InMemoryEntryStore::load_json_file(&cli.entries)?;
            let id = store.append_entry(entry)?;
            store.save_json_file(&cli.entries)?;
            if !axes::is_known(emotion) {
                log::warn!("[cli] '{}' is not in the label table; it will score as neutral", emotion);
            }
            println!("{id}");
            Ok(())
        }
        Commands::After { id, value, scale } => {
            let value = rescale_value(*value, (*scale).into(), "intensity_after")?;
            let store = InMemoryEntryStore::load_json_file(&cli.entries)?;
            store.record_intensity_after(id, value)?;
            store.save_json_file(&cli.entries)?;
            Ok(())
        }
        Commands::Axes { label } => match label {
            Some(l) => {
                let a = axes::axes_of(l);
                let family = axes::family_of(l);
                if cli.json {
                    output::print_json(&serde_json::json!({
                        "label": l,
                        "valence": a.valence,
                        "arousal": a.arousal,
                        "family": family,
                    }))
                } else {
                    match family {
                        Some(f) => println!("{l}: valencia {:+.2}, activación {:+.2} ({f})", a.valence, a.arousal),
                        None => println!("{l}: etiqueta desconocida, ejes neutros (0, 0)"),
                    }
                    Ok(())
                }
            }
            None => {
                for l in axes::known_labels() {
                    let a = axes::axes_of(l);
                    println!("{l:<16} {:+.2} {:+.2}", a.valence, a.arousal);
                }
                Ok(())
            }
        },
        Commands::Config => {
            let cfg = load_config(cli.config.as_deref())?;
            print!("{}", cfg.to_toml_string()?);
            Ok(())
        }
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "sentir", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
