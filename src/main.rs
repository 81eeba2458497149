//! ContaSmart CLI
//!
//! Command-line interface for the ContaSmart calculation server:
//! - Compute DRE and Balanço statements
//! - Fetch sample payloads
//! - Check server status
//! - Inspect, clear and export the local history

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contasmart::api::{ApiClient, CalculationRequest};
use contasmart::config::{self, Config, LoggingConfig};
use contasmart::controller::EXAMPLE_FAILED;
use contasmart::format;
use contasmart::history::{FileStore, HistoryCache};
use contasmart::render::text;
use contasmart::{CalculationController, FormSource, StatementKind};

#[derive(Parser)]
#[command(name = "contasmart")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "ContaSmart Pro accounting client")]
#[command(long_about = "Compute income statements (DRE) and balance sheets through the ContaSmart calculation server.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Calculation server URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute an income statement
    Dre {
        #[command(flatten)]
        fields: DreFields,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Compute a balance sheet
    Balanco {
        #[command(flatten)]
        fields: BalancoFields,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Show the sample payload of a statement
    Exemplo {
        /// dre or balanco
        statement: StatementKind,
    },

    /// Show calculation server status
    Status,

    /// Show the local DRE history
    Historico {
        /// Show the server-side history instead
        #[arg(long)]
        remoto: bool,
        /// Remove the local history
        #[arg(long)]
        limpar: bool,
        /// Export the local history as CSV ("-" for stdout)
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Format a value as currency
    Moeda {
        /// Value, e.g. 1234.5 or 1.234,50
        #[arg(allow_hyphen_values = true)]
        valor: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Start from the server's sample values; explicit fields win
    #[arg(long)]
    exemplo: bool,
    /// Print the result panel as HTML
    #[arg(long)]
    html: bool,
}

#[derive(Args)]
pub struct DreFields {
    #[arg(long, allow_hyphen_values = true)]
    receita_bruta: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    deducoes_receita: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    custo_vendas: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    despesas_operacionais: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    despesas_financeiras: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    outros_rendimentos: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    impostos: Option<String>,
}

impl FormSource for DreFields {
    fn value(&self, id: &str) -> Option<String> {
        match id {
            "receita_bruta" => self.receita_bruta.clone(),
            "deducoes_receita" => self.deducoes_receita.clone(),
            "custo_vendas" => self.custo_vendas.clone(),
            "despesas_operacionais" => self.despesas_operacionais.clone(),
            "despesas_financeiras" => self.despesas_financeiras.clone(),
            "outros_rendimentos" => self.outros_rendimentos.clone(),
            "impostos" => self.impostos.clone(),
            _ => None,
        }
    }
}

#[derive(Args)]
pub struct BalancoFields {
    #[arg(long, allow_hyphen_values = true)]
    ativo_circulante: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    ativo_nao_circulante: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    passivo_circulante: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    passivo_nao_circulante: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    patrimonio_liquido: Option<String>,
}

impl FormSource for BalancoFields {
    fn value(&self, id: &str) -> Option<String> {
        match id {
            "ativo_circulante" => self.ativo_circulante.clone(),
            "ativo_nao_circulante" => self.ativo_nao_circulante.clone(),
            "passivo_circulante" => self.passivo_circulante.clone(),
            "passivo_nao_circulante" => self.passivo_nao_circulante.clone(),
            "patrimonio_liquido" => self.patrimonio_liquido.clone(),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }

    init_tracing(&config.logging);

    match cli.command {
        Commands::Dre { fields, run } => {
            calculate(&config, cli.format, StatementKind::Dre, &fields, &run).await?;
        }

        Commands::Balanco { fields, run } => {
            calculate(&config, cli.format, StatementKind::Balanco, &fields, &run).await?;
        }

        Commands::Exemplo { statement } => {
            let client = ApiClient::new(config.api.client_config())?;
            let example = client
                .example(statement)
                .await
                .with_context(|| EXAMPLE_FAILED.to_string())?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&example)?),
                OutputFormat::Table => print_request(statement, &example),
            }
        }

        Commands::Status => {
            let client = ApiClient::new(config.api.client_config())?;

            if client.check_status().await {
                println!("ContaSmart v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("API: {}", config.api.url);
                println!("API Status: ✅ Online");
            } else {
                eprintln!("API Status: ❌ Offline");
                eprintln!();
                eprintln!("Cannot reach the calculation server at {}", config.api.url);
                std::process::exit(1);
            }
        }

        Commands::Historico {
            remoto,
            limpar,
            csv,
        } => {
            if remoto {
                let client = ApiClient::new(config.api.client_config())?;
                let records = client.server_history().await.map_err(|e| anyhow!(e.user_message()))?;

                match cli.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
                    OutputFormat::Table => {
                        if records.is_empty() {
                            println!("Nenhum cálculo no servidor.");
                        }
                        for record in records {
                            println!("{}", serde_json::Value::Object(record));
                        }
                    }
                }
                return Ok(());
            }

            let history = local_history(&config);

            if limpar {
                history.clear()?;
                println!("Histórico local removido.");
                return Ok(());
            }

            if let Some(path) = csv {
                let rows = if path.as_os_str() == "-" {
                    history.export_csv(std::io::stdout().lock())?
                } else {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("Cannot create {:?}", path))?;
                    let rows = history.export_csv(file)?;
                    println!("Exported {} entries to {:?}", rows, path);
                    rows
                };
                tracing::debug!(rows, "History exported");
                return Ok(());
            }

            let entries = history.entries();
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Table => {
                    if entries.is_empty() {
                        println!("Nenhum cálculo salvo ainda.");
                        println!();
                        println!("Calcule sua primeira DRE com:");
                        println!("  contasmart dre --receita-bruta 10000");
                    } else {
                        println!("{:<18} {:>18} {:>16}", "Data", "Lucro Líquido", "Margem Líquida");
                        println!("{}", "-".repeat(54));
                        for entry in entries {
                            println!(
                                "{:<18} {:>18} {:>16}",
                                format::date_time(entry.data),
                                format::currency(entry.lucro_liquido),
                                format::percent(entry.margem_liquida)
                            );
                        }
                    }
                }
            }
        }

        Commands::Moeda { valor } => {
            let amount = format::parse_amount(&valor)
                .ok_or_else(|| anyhow!("Valor inválido: {}", valor))?;

            let client = ApiClient::new(config.api.client_config())?;
            let text = match client.format_currency(amount).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(error = %e, "Server formatting unavailable, formatting locally");
                    format::currency(amount)
                }
            };
            println!("{}", text);
        }

        Commands::Config { output } => {
            let content = config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("contasmart={}", logging.level)),
    );

    let (pretty, json) = if logging.format == "json" {
        (
            None,
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
    } else {
        (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();
}

fn local_history(config: &Config) -> HistoryCache<FileStore> {
    HistoryCache::new(FileStore::new(config.history.data_path()))
        .with_capacity(config.history.capacity)
}

async fn calculate(
    config: &Config,
    output: OutputFormat,
    kind: StatementKind,
    fields: &dyn FormSource,
    run: &RunArgs,
) -> anyhow::Result<()> {
    let client = ApiClient::new(config.api.client_config())?;
    let mut controller = CalculationController::new(kind, client, local_history(config));

    let mut form = if run.exemplo {
        match controller.load_example().await {
            Some(example) => example,
            None => return Err(anyhow!(EXAMPLE_FAILED)),
        }
    } else {
        CalculationRequest::new()
    };
    for field in kind.fields() {
        if let Some(value) = fields.value(field.id) {
            form.insert(field.id, value);
        }
    }

    let outcome = match controller.submit(&form).await {
        Ok(outcome) => outcome,
        Err(_) => {
            if let Some(note) = controller.notifications().latest() {
                eprintln!("{}", note.text());
            }
            std::process::exit(1);
        }
    };

    if run.html {
        println!("{}", controller.panel().snapshot());
    } else {
        match output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome.result)?),
            OutputFormat::Table => print!("{}", text::render(&outcome.view)),
        }
    }

    if let Some(len) = outcome.history_len {
        tracing::info!(entries = len, "Saved to local history");
    }

    Ok(())
}

fn print_request(kind: StatementKind, request: &CalculationRequest) {
    println!("Exemplo {}", kind.title());
    println!("{}", "-".repeat(44));
    for field in kind.fields() {
        println!(
            "{:<28} {:>15}",
            field.label,
            request.get(field.id).unwrap_or("0")
        );
    }
}
