use clap::{Parser, Subcommand};
use rupantaran::config::{Config, OutputFormat};
use rupantaran::units::{self, ConversionResult, System};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "rupantaran")]
#[command(about = "Convert Nepali land-area and weight units", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: ./rupantaran.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value to the base unit (m² for land, g for weight)
    ToBase {
        /// Amount to convert
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Source unit (e.g., "bigha", "ropani", "tola")
        unit: String,

        /// Decimal places in the result
        #[arg(short, long, allow_negative_numbers = true)]
        precision: Option<i32>,
    },

    /// Convert a base-unit amount (m² or g) to a unit
    FromBase {
        /// Amount in the base unit
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Target unit
        unit: String,

        /// Decimal places in the result
        #[arg(short, long, allow_negative_numbers = true)]
        precision: Option<i32>,
    },

    /// Convert between two units, within a system or across land systems
    Convert {
        /// Amount to convert
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Source unit
        from: String,

        /// Target unit
        to: String,

        /// Decimal places in the result
        #[arg(short, long, allow_negative_numbers = true)]
        precision: Option<i32>,
    },

    /// Work with mixed expressions such as "1 ropani 2 aana"
    Mixed {
        #[command(subcommand)]
        action: MixedCommand,
    },

    /// List the unit tables
    Units {
        /// Only list one system (terai, hilly, weight)
        #[arg(short, long)]
        system: Option<System>,
    },
}

#[derive(Subcommand)]
enum MixedCommand {
    /// Sum a mixed expression into the base unit
    Parse {
        /// Expression, e.g. "1 bigha 5 kattha 10 dhur"
        expression: String,

        /// System of the expression (detected from the first unit by default)
        #[arg(short, long)]
        system: Option<System>,
    },

    /// Break a base-unit amount into a mixed expression
    Format {
        /// Amount in the base unit
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Target system (falls back to default_system in the config)
        #[arg(short, long)]
        system: Option<System>,

        /// Decimal places for the smallest unit
        #[arg(short, long, allow_negative_numbers = true)]
        precision: Option<i32>,
    },

    /// Convert a mixed expression into the other land system, or into --to
    Convert {
        /// Expression, e.g. "2 ropani 3 aana"
        expression: String,

        /// Target system (default: the other land system)
        #[arg(short, long)]
        to: Option<System>,

        /// Decimal places for the smallest unit
        #[arg(short, long, allow_negative_numbers = true)]
        precision: Option<i32>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match cli.verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::discover(cli.config.as_deref())?;
    let json = cli.json || config.output == OutputFormat::Json;
    let precision = |p: Option<i32>| p.unwrap_or(config.precision);

    match cli.command {
        Commands::ToBase {
            value,
            unit,
            precision: p,
        } => {
            let result = units::convert_to_base(value, &unit, precision(p))?;
            let base_unit = base_unit_of(&unit);
            print_result(
                ConversionResult {
                    input: format!("{} {}", value, unit),
                    value: result,
                    unit: base_unit.to_string(),
                    formatted: None,
                },
                json,
            )
        }
        Commands::FromBase {
            amount,
            unit,
            precision: p,
        } => {
            let result = units::convert_from_base(amount, &unit, precision(p))?;
            print_result(
                ConversionResult {
                    input: format!("{} {}", amount, base_unit_of(&unit)),
                    value: result,
                    unit: unit.to_lowercase(),
                    formatted: None,
                },
                json,
            )
        }
        Commands::Convert {
            value,
            from,
            to,
            precision: p,
        } => {
            let result = units::convert_across_systems(value, &from, &to, precision(p))?;
            print_result(
                ConversionResult {
                    input: format!("{} {}", value, from),
                    value: result,
                    unit: to.to_lowercase(),
                    formatted: None,
                },
                json,
            )
        }
        Commands::Mixed { action } => run_mixed(action, &config, json),
        Commands::Units { system } => list_units(system, json),
    }
}

fn run_mixed(
    action: MixedCommand,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MixedCommand::Parse { expression, system } => {
            let (system, total) = match system {
                Some(system) => (system, units::parse_mixed(&expression, system)?),
                None => units::parse_mixed_expression(&expression)?,
            };
            print_result(
                ConversionResult {
                    input: expression,
                    value: total,
                    unit: system.quantity().base_unit().to_string(),
                    formatted: None,
                },
                json,
            )
        }
        MixedCommand::Format {
            amount,
            system,
            precision,
        } => {
            let system = system.or(config.default_system).ok_or(
                "no target system: pass --system or set default_system in the config",
            )?;
            let formatted =
                units::format_mixed(amount, system, precision.unwrap_or(config.precision))?;
            print_result(
                ConversionResult {
                    input: format!("{} {}", amount, system.quantity().base_unit()),
                    value: amount,
                    unit: system.quantity().base_unit().to_string(),
                    formatted: Some(formatted),
                },
                json,
            )
        }
        MixedCommand::Convert {
            expression,
            to,
            precision,
        } => {
            let precision = precision.unwrap_or(config.precision);
            let (source, total) = units::parse_mixed_expression(&expression)?;
            let target = match to {
                Some(target) => target,
                None => units::land_counterpart(source)?,
            };
            let formatted = units::format_mixed_as(total, source, target, precision)?;
            print_result(
                ConversionResult {
                    input: expression,
                    value: total,
                    unit: source.quantity().base_unit().to_string(),
                    formatted: Some(formatted),
                },
                json,
            )
        }
    }
}

fn base_unit_of(unit: &str) -> &'static str {
    System::for_unit(unit)
        .map(|system| system.quantity().base_unit())
        .unwrap_or("")
}

fn print_result(result: ConversionResult, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(formatted) = &result.formatted {
        println!("{}", formatted);
    } else {
        println!("{} {}", result.value, result.unit);
    }
    Ok(())
}

fn list_units(system: Option<System>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let systems: Vec<System> = match system {
        Some(system) => vec![system],
        None => System::ALL.to_vec(),
    };

    if json {
        let tables: serde_json::Map<String, serde_json::Value> = systems
            .iter()
            .map(|system| -> Result<(String, serde_json::Value), serde_json::Error> {
                let units = serde_json::to_value(system.table().units())?;
                Ok((system.name().to_string(), units))
            })
            .collect::<Result<_, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    for system in systems {
        let base_unit = system.quantity().base_unit();
        println!("{} ({}):", system, system.quantity());
        for unit in system.table().units() {
            println!("  - {:<7} = {} {}", unit.name, unit.factor, base_unit);
        }
    }
    Ok(())
}
