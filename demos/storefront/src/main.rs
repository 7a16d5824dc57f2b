// demos/storefront/src/main.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use storefront::commands::{catalog_rows, render_cart, render_catalog};
use storefront::{AppConfig, AppState};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Browse the catalog and manage your cart")]
struct Cli {
  /// Overrides STOREFRONT_API_URL.
  #[arg(long, global = true)]
  api_url: Option<String>,

  /// Overrides STOREFRONT_DATA_DIR.
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// List products with stock and the quantity already in the cart.
  Catalog,
  /// Show the cart with subtotals and total.
  Cart,
  /// Add one unit of a product.
  Add { product_id: u64 },
  /// Remove a product from the cart.
  Remove { product_id: u64 },
  /// Set the quantity of a product already in the cart.
  Update {
    product_id: u64,
    #[arg(allow_negative_numbers = true)]
    amount: i64,
  },
}

fn init_tracing(json: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_span_events(FmtSpan::CLOSE);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  let mut config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      eprintln!("Failed to load application configuration: {}", e);
      return ExitCode::FAILURE;
    }
  };
  if let Some(url) = cli.api_url {
    config.api_url = url.trim_end_matches('/').to_string();
  }
  if let Some(dir) = cli.data_dir {
    config.data_dir = dir;
  }

  init_tracing(config.log_json);

  let state = match AppState::build(config) {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialise the storefront.");
      return ExitCode::FAILURE;
    }
  };
  tracing::debug!(
    api_url = %state.config.api_url,
    data_dir = %state.config.data_dir.display(),
    cart_key = %state.config.cart_key,
    "Storefront ready."
  );

  // Rejected cart operations are already shown by the console sink; the
  // exit code is the only extra signal.
  let outcome = match cli.command {
    Command::Catalog => match catalog_rows(&state).await {
      Ok(rows) => {
        print!("{}", render_catalog(&rows));
        return ExitCode::SUCCESS;
      }
      Err(e) => {
        tracing::error!(error = %e, "Failed to load the catalog.");
        return ExitCode::FAILURE;
      }
    },
    Command::Cart => Ok(()),
    Command::Add { product_id } => state.store.add_product(product_id).await,
    Command::Remove { product_id } => state.store.remove_product(product_id).await,
    Command::Update { product_id, amount } => state.store.update_product_amount(product_id, amount).await,
  };

  print!("{}", render_cart(&state.store.cart()));
  if outcome.is_ok() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  }
}
