use std::fmt::Display;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use ziwei_base::{
    ALL_STEMS, Chart, ChartError, EarthlyBranch, ErrorCode, Gender, HeavenlyStem, LunarBirthRecord, Star,
    basic_indices, brightness, interpretations, is_controversial, mutations_for, nayin_locus,
    resolve_mutations,
};
use ziwei_config::{ConfigError, SettingsStore, ZiweiConfig, current_interpretation};

#[derive(Parser)]
#[command(name = "ziwei", about = "Ziwei Doushu natal chart CLI")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full natal chart as JSON
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
        /// Also report the decade mutations at this age
        #[arg(long)]
        age: Option<u16>,
        /// Also report the annual mutations for this lunar year
        #[arg(long)]
        annual: Option<i32>,
    },
    /// Basic indices of a birth record
    Indices {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Twelve-palace ring
    Palaces {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Secondary star positions
    Stars {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Four mutations of a heavenly stem
    Mutations {
        /// Heavenly stem character (甲..癸)
        stem: char,
        /// Force an interpretation instead of the stored selection
        #[arg(long)]
        interpretation: Option<String>,
    },
    /// Five-elements locus of a stem-branch pair
    Nayin {
        /// Heavenly stem character
        stem: char,
        /// Earthly branch character
        branch: char,
    },
    /// Brightness of a star in a branch
    Brightness {
        /// Star name (traditional or simplified)
        star: String,
        /// Earthly branch character
        branch: char,
    },
    /// Read or change the interpretation selected for disputed stems
    Interpretation {
        #[command(subcommand)]
        action: InterpretationAction,
    },
}

#[derive(Subcommand)]
enum InterpretationAction {
    /// Show the current selection for every disputed stem
    List,
    /// Show the current selection for one stem
    Get { stem: char },
    /// Store a selection for one stem
    Set { stem: char, key: String },
}

#[derive(Args)]
struct BirthArgs {
    /// Lunar year
    #[arg(long)]
    year: i32,
    /// Lunar month (1-12)
    #[arg(long)]
    month: Option<u8>,
    /// Lunar day (1-30)
    #[arg(long)]
    day: Option<u8>,
    /// Two-hour time index (0 = 子 .. 11 = 亥)
    #[arg(long)]
    time: Option<u8>,
    /// Birth month is a leap month
    #[arg(long)]
    leap: bool,
    #[arg(long, value_enum)]
    gender: GenderArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

impl BirthArgs {
    fn record(&self) -> LunarBirthRecord {
        let gender = match self.gender {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        };
        LunarBirthRecord {
            lunar_year: self.year,
            lunar_month: self.month,
            lunar_day: self.day,
            time_index: self.time,
            is_leap_month: self.leap,
            gender,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ZiweiConfig::load(path).unwrap_or_else(|e| fail_config(&e)),
        None => ZiweiConfig::default(),
    };
    init_logging(&config.log_level, cli.verbose);

    let store = config.open_settings().unwrap_or_else(|e| fail_config(&e));

    match cli.command {
        Commands::Chart { birth, age, annual } => {
            let engine = config.build_engine(&store).unwrap_or_else(|e| fail_config(&e));
            let chart = engine.compute(&birth.record()).unwrap_or_else(|e| fail(&e));
            let decade = age.map(|age| {
                engine
                    .decade_mutations(&chart, age)
                    .unwrap_or_else(|e| fail(&e))
            });
            let annual = annual.map(|year| {
                engine
                    .annual_mutations(&chart, year)
                    .unwrap_or_else(|e| fail(&e))
            });
            print_json(&json!({
                "chart": chart,
                "decade_mutations": decade,
                "annual_mutations": annual,
            }));
        }

        Commands::Indices { birth } => {
            print_json(&basic_indices(&birth.record()));
        }

        Commands::Palaces { birth } => {
            let chart = compute(&config, &store, &birth);
            print_json(&chart.palaces);
        }

        Commands::Stars { birth } => {
            let chart = compute(&config, &store, &birth);
            let stars: Vec<_> = chart
                .secondary_stars
                .iter()
                .map(|(star, ring)| {
                    json!({
                        "star": star.name(),
                        "ring_index": ring,
                        "branch": EarthlyBranch::from_index(ring).map(EarthlyBranch::as_char),
                        "brightness": chart.secondary_brightness.get(&star),
                    })
                })
                .collect();
            print_json(&stars);
        }

        Commands::Mutations {
            stem,
            interpretation,
        } => {
            let assignment = match interpretation {
                Some(key) => {
                    let s = require_stem(stem);
                    mutations_for(s, &key).unwrap_or_else(|| {
                        fail_config(&ConfigError::UnknownInterpretation { stem, key })
                    })
                }
                None => resolve_mutations(stem, store.as_provider()).unwrap_or_else(|e| fail(&e)),
            };
            let rows: Vec<_> = assignment
                .by_type
                .iter()
                .map(|(m, star)| json!({ "mutation": m.name(), "star": star.name() }))
                .collect();
            print_json(&rows);
        }

        Commands::Nayin { stem, branch } => {
            let s = require_stem(stem);
            let b = require_branch(branch);
            match nayin_locus(s.index(), b.index()) {
                Some(locus) => print_json(&json!({
                    "locus": locus,
                    "number": locus.number(),
                    "name": locus.name(),
                })),
                None => fail_with(
                    ErrorCode::CalculationFailed,
                    format_args!("no nayin locus for {stem}{branch}"),
                ),
            }
        }

        Commands::Brightness { star, branch } => {
            let Some(s) = Star::from_name(&star) else {
                fail_with(ErrorCode::InputInvalid, format_args!("unknown star {star:?}"));
            };
            let b = require_branch(branch);
            let school = config
                .chart_options()
                .map(|o| o.brightness_school)
                .unwrap_or_default();
            let level = brightness(s, b.index(), school);
            print_json(&json!({
                "star": s.name(),
                "branch": b.as_char(),
                "brightness": level,
                "symbol": level.symbol(),
            }));
        }

        Commands::Interpretation { action } => interpretation(&store, action),
    }
}

fn interpretation(store: &SettingsStore, action: InterpretationAction) {
    let settings = store.as_provider();
    match action {
        InterpretationAction::List => {
            let rows: Vec<_> = ALL_STEMS
                .iter()
                .filter(|s| is_controversial(**s))
                .map(|s| {
                    json!({
                        "stem": s.as_char(),
                        "selected": current_interpretation(settings, *s),
                        "available": interpretations(*s),
                    })
                })
                .collect();
            print_json(&rows);
        }
        InterpretationAction::Get { stem } => {
            let s = require_stem(stem);
            println!("{}", current_interpretation(settings, s));
        }
        InterpretationAction::Set { stem, key } => {
            ziwei_config::select_interpretation(settings, stem, &key)
                .unwrap_or_else(|e| fail_config(&e));
            tracing::info!(%stem, key = %key, "interpretation selected");
        }
    }
}

fn compute(config: &ZiweiConfig, store: &SettingsStore, birth: &BirthArgs) -> Chart {
    let engine = config.build_engine(store).unwrap_or_else(|e| fail_config(&e));
    engine.compute(&birth.record()).unwrap_or_else(|e| fail(&e))
}

fn init_logging(level: &str, verbose: u8) {
    let level = match verbose {
        0 => level,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => fail_with(
            ErrorCode::CalculationFailed,
            format_args!("failed to serialize output: {e}"),
        ),
    }
}

fn require_stem(c: char) -> HeavenlyStem {
    HeavenlyStem::from_char(c).unwrap_or_else(|| fail(&ChartError::UnknownStem(c)))
}

fn require_branch(c: char) -> EarthlyBranch {
    EarthlyBranch::from_char(c).unwrap_or_else(|| {
        fail_with(
            ErrorCode::InputInvalid,
            format_args!("invalid earthly branch {c} (valid: 子丑寅卯辰巳午未申酉戌亥)"),
        )
    })
}

fn error_line(code: ErrorCode, message: impl Display) -> String {
    format!("error[{code}]: {message}")
}

fn fail_with(code: ErrorCode, message: impl Display) -> ! {
    eprintln!("{}", error_line(code, message));
    process::exit(1);
}

fn fail(e: &ChartError) -> ! {
    fail_with(e.code(), e)
}

fn fail_config(e: &ConfigError) -> ! {
    fail_with(e.code(), e)
}
