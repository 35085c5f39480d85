mod config;
mod dispatch;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use widgetry_core::{
    ChartSpec, ComponentFactory, ComponentKind, CustomConfig, DashboardConfig, FactoryError,
    FormConfig, UiResource,
};
use widgetry_storage::MemoryStore;

use crate::config::WidgetryConfig;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "WIDGETRY_LOG";

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Component family accepted by `compile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Form,
    Dashboard,
    Chart,
    Custom,
}

impl From<KindArg> for ComponentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Form => ComponentKind::Form,
            KindArg::Dashboard => ComponentKind::Dashboard,
            KindArg::Chart => ComponentKind::Chart,
            KindArg::Custom => ComponentKind::Custom,
        }
    }
}

/// Generate embeddable UI widgets and route their actions.
#[derive(Parser)]
#[command(name = "widgetry", version, about = "Generate embeddable UI widgets and route their actions")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a TOML config file (defaults to $WIDGETRY_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a component from a free-text description
    Generate {
        /// What to build, e.g. "contact form with name and email"
        description: String,
        /// Id of the requesting user
        #[arg(long)]
        user: String,
        /// Print only the markup instead of the resource JSON
        #[arg(long)]
        html: bool,
    },

    /// Show the requirements extracted from a description
    Extract {
        description: String,
    },

    /// Compile an explicit JSON config
    Compile {
        /// Component family of the config
        #[arg(value_enum)]
        kind: KindArg,
        /// Path to the config JSON file
        config_file: PathBuf,
        /// Id of the requesting user
        #[arg(long)]
        user: String,
        /// Print only the markup instead of the resource JSON
        #[arg(long)]
        html: bool,
    },

    /// Suggest fuller descriptions for a partial one
    Suggest {
        description: String,
    },

    /// List the available generators
    Templates,

    /// Print the interactive settings demo resource
    Demo {
        /// Print only the markup instead of the resource JSON
        #[arg(long)]
        html: bool,
    },

    /// Render a resource JSON file into sandboxed frame markup
    Frame {
        /// Path to a UIResource JSON file
        resource: PathBuf,
        /// Fail instead of printing a placeholder for unsupported resources
        #[arg(long)]
        strict: bool,
    },

    /// Route inbound messages (one JSON object per line) through the host
    Dispatch {
        /// Path to a JSON-lines file, or - for stdin
        messages: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let config = match WidgetryConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, cli.output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Generate {
            description,
            user,
            html,
        } => {
            let factory = factory(&config);
            let result = block_on(
                factory.generate_from_description(&user, &description),
                cli.output,
                cli.quiet,
            );
            emit_resource(result, html, cli.output, cli.quiet);
        }
        Commands::Extract { description } => {
            print_json(&widgetry_core::extract(&description), cli.output, cli.quiet);
        }
        Commands::Compile {
            kind,
            config_file,
            user,
            html,
        } => {
            cmd_compile(&config, kind.into(), &config_file, &user, html, cli.output, cli.quiet);
        }
        Commands::Suggest { description } => {
            cmd_suggest(&description, cli.output);
        }
        Commands::Templates => {
            cmd_templates(cli.output);
        }
        Commands::Demo { html } => {
            emit_resource(
                Ok(widgetry_core::demo::settings_demo()),
                html,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Frame { resource, strict } => {
            cmd_frame(&resource, strict, cli.output, cli.quiet);
        }
        Commands::Dispatch { messages } => {
            let router = widgetry_host::HostActionRouter::new(config.router_config());
            let report = block_on(
                async { dispatch::run(&router, &messages).await },
                cli.output,
                cli.quiet,
            );
            match report {
                Ok(report) => print_json(&report, cli.output, cli.quiet),
                Err(msg) => {
                    report_error(&msg, cli.output, cli.quiet);
                    process::exit(1);
                }
            }
        }
    }
}

/// Log to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn factory(config: &WidgetryConfig) -> ComponentFactory {
    ComponentFactory::with_config(Arc::new(MemoryStore::new()), config.generator.clone())
}

/// Run a future to completion on a fresh current-thread runtime.
fn block_on<F: std::future::Future>(future: F, output: OutputFormat, quiet: bool) -> F::Output {
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            report_error(
                &format!("internal error: failed to create tokio runtime: {}", e),
                output,
                quiet,
            );
            process::exit(1);
        }
    };
    rt.block_on(future)
}

fn cmd_compile(
    config: &WidgetryConfig,
    kind: ComponentKind,
    config_file: &Path,
    user: &str,
    html: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let src = match std::fs::read_to_string(config_file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", config_file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let factory = factory(config);
    let result = block_on(
        async {
            match kind {
                ComponentKind::Form => {
                    let form: FormConfig = parse_config(&src, config_file)?;
                    factory.generate_form(user, &form).await
                }
                ComponentKind::Dashboard => {
                    let dashboard: DashboardConfig = parse_config(&src, config_file)?;
                    factory.generate_dashboard(user, &dashboard).await
                }
                ComponentKind::Chart => {
                    let chart: ChartSpec = parse_config(&src, config_file)?;
                    factory.generate_chart(user, &chart).await
                }
                ComponentKind::Custom => {
                    let custom: CustomConfig = parse_config(&src, config_file)?;
                    factory.generate_custom(user, &custom).await
                }
            }
        },
        output,
        quiet,
    );
    emit_resource(result, html, output, quiet);
}

fn parse_config<T: serde::de::DeserializeOwned>(src: &str, path: &Path) -> Result<T, FactoryError> {
    serde_json::from_str(src).map_err(|e| {
        FactoryError::InvalidRequest(format!("error parsing config '{}': {}", path.display(), e))
    })
}

fn cmd_suggest(description: &str, output: OutputFormat) {
    let suggestions = widgetry_core::suggest(description);
    match output {
        OutputFormat::Text => {
            for s in suggestions {
                println!("{}", s);
            }
        }
        OutputFormat::Json => print_json(&suggestions, output, false),
    }
}

fn cmd_templates(output: OutputFormat) {
    let templates = widgetry_core::templates();
    match output {
        OutputFormat::Text => {
            for (kind, description) in templates {
                println!("{:<10} {}", kind.as_str(), description);
            }
        }
        OutputFormat::Json => {
            let list: Vec<serde_json::Value> = templates
                .iter()
                .map(|(kind, description)| {
                    serde_json::json!({ "type": kind, "description": description })
                })
                .collect();
            print_json(&list, output, false);
        }
    }
}

fn cmd_frame(path: &Path, strict: bool, output: OutputFormat, quiet: bool) {
    let resource: UiResource = match std::fs::read_to_string(path)
        .map_err(|e| format!("error reading file '{}': {}", path.display(), e))
        .and_then(|src| {
            serde_json::from_str(&src)
                .map_err(|e| format!("error parsing resource '{}': {}", path.display(), e))
        }) {
        Ok(r) => r,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    if strict {
        match widgetry_host::try_render_frame(&resource) {
            Ok(frame) => println!("{}", frame),
            Err(e) => {
                report_error(&e.to_string(), output, quiet);
                process::exit(1);
            }
        }
    } else {
        println!("{}", widgetry_host::render_frame(&resource));
    }
}

fn emit_resource(
    result: Result<UiResource, FactoryError>,
    html: bool,
    output: OutputFormat,
    quiet: bool,
) {
    match result {
        Ok(resource) if html => println!("{}", resource.text),
        Ok(resource) => print_json(&resource, output, quiet),
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    }
}

/// Pretty JSON for text output, compact JSON for `--output json`.
fn print_json<T: serde::Serialize>(value: &T, output: OutputFormat, quiet: bool) {
    let rendered = match output {
        OutputFormat::Text => serde_json::to_string_pretty(value),
        OutputFormat::Json => serde_json::to_string(value),
    };
    match rendered {
        Ok(s) => println!("{}", s),
        Err(e) => {
            report_error(&format!("internal error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
