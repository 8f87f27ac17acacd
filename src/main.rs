use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use storefront_forms::core::value::values_from_json;
use storefront_forms::store::StoreError;
use storefront_forms::validation::config::{self, ConfigError};
use storefront_forms::validation::schemas;
use storefront_forms::{
    FormMode, History, ProductForm, ProductStore, Schema, SubmitError, Value, ValidationErrors,
    Values, validate,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Validate storefront forms and edit a product catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a built-in schema as YAML.
    Schema { form: FormKind },
    /// Validate a JSON object of field values.
    Validate {
        form: FormKind,
        #[arg(long)]
        values: PathBuf,
        /// Schema document to use instead of the built-in one.
        #[arg(long)]
        schema: Option<PathBuf>,
    },
    /// Add a product to a JSON catalog, or edit one with `--id`.
    Save {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        values: PathBuf,
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormKind {
    Product,
    Checkout,
}

impl FormKind {
    fn schema(self) -> Schema {
        match self {
            Self::Product => schemas::product(),
            Self::Checkout => schemas::checkout(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid values file {path}: {source}")]
    Values {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Closed(SubmitError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    match cli.command {
        Command::Schema { form } => {
            print!("{}", config::schema_to_yaml(&form.schema())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate {
            form,
            values,
            schema,
        } => {
            let schema = match schema {
                Some(path) => config::load_schema(&path)?,
                None => form.schema(),
            };
            let values = read_values(&values)?;
            let report = validate(&schema, &values);
            if report.is_valid() {
                println!("valid");
                return Ok(ExitCode::SUCCESS);
            }
            for (field, message) in report.errors() {
                println!("{field}: {message}");
            }
            Ok(ExitCode::FAILURE)
        }
        Command::Save {
            catalog,
            values,
            id,
        } => {
            let mut store = ProductStore::load(&catalog)?;
            let mode = match id {
                Some(id) => FormMode::Edit { id },
                None => FormMode::Add,
            };
            let mut form = ProductForm::open(&mode, &store);
            for (field, value) in read_values(&values)? {
                match value {
                    Value::List(images) if field.as_str() == "images" => form.set_images(images),
                    value => {
                        form.change(field.as_str(), value);
                    }
                }
            }

            let mut history = History::new();
            match form.submit(&mut store, &mut history) {
                Ok(product) => {
                    store.save(&catalog)?;
                    println!("saved {} -> {}", product.id, history.current().unwrap_or_default());
                    Ok(ExitCode::SUCCESS)
                }
                Err(SubmitError::Invalid(errors)) => {
                    print_errors(&errors);
                    Ok(ExitCode::FAILURE)
                }
                Err(err) => Err(CliError::Closed(err)),
            }
        }
    }
}

fn read_values(path: &Path) -> Result<Values, CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let json: serde_json::Value =
        serde_json::from_str(&source).map_err(|source| CliError::Values {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(values_from_json(&json))
}

fn print_errors(errors: &ValidationErrors) {
    for err in errors.iter() {
        println!("{err}");
    }
}
