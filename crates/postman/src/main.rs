//! `openapi-to-postman`: regenerate the Postman collection from `docs/openapi.json`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tourdesk_postman::{convert_file, ConvertOptions};

#[derive(clap::Parser, Debug)]
#[command(about = "Generate a Postman collection from an OpenAPI document")]
struct Args {
    /// OpenAPI 3 document (JSON)
    #[arg(long, short = 'i', default_value = "docs/openapi.json")]
    input: PathBuf,

    /// Where to write the collection
    #[arg(long, short = 'o', default_value = "docs/postman_collection.json")]
    output: PathBuf,

    /// Collection name; defaults to the document title
    #[arg(long, short = 'n', env = "POSTMAN_COLLECTION_NAME")]
    name: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tourdesk_postman=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let summary = convert_file(
        &args.input,
        &args.output,
        &ConvertOptions { name: args.name },
    )
    .with_context(|| format!("could not convert {}", args.input.display()))?;

    tracing::info!(
        output = %args.output.display(),
        folders = summary.folders,
        requests = summary.requests,
        "Postman collection written"
    );
    Ok(())
}
