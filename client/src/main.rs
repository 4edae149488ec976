use std::path::{Path, PathBuf};

use clap::Parser;
use client::ConversionClient;
use common::dtos::ConversionRequest;
use tracing::{error, info};

/// Converts a local HTML file to PDF through a running conversion service.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// HTML document to convert
    input: PathBuf,
    /// Where to write the PDF
    output: PathBuf,
    /// Full URL of the convert endpoint
    #[arg(long, env = "CONVERSION_ENDPOINT", default_value = "http://localhost:8000/convert")]
    endpoint: String,
    /// HTML file used as the header template
    #[arg(long)]
    header: Option<PathBuf>,
    /// Space reserved for the header, e.g. 100px
    #[arg(long, default_value = "0px")]
    header_height: String,
    /// HTML file used as the footer template
    #[arg(long)]
    footer: Option<PathBuf>,
    /// Space reserved for the footer, e.g. 100px
    #[arg(long, default_value = "0px")]
    footer_height: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    if let Err(err) = run(args).await {
        error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), String> {
    let mut request = ConversionRequest::new(read(&args.input).await?);
    if let Some(header) = &args.header {
        request = request.with_header(read(header).await?, args.header_height.clone());
    }
    if let Some(footer) = &args.footer {
        request = request.with_footer(read(footer).await?, args.footer_height.clone());
    }

    let client = ConversionClient::new(args.endpoint);
    let pdf = client.convert(&request).await.map_err(|e| e.to_string())?;
    tokio::fs::write(&args.output, &pdf).await.map_err(|e| format!("Could not write {}: {}", args.output.display(), e))?;
    info!("wrote {} bytes to {}", pdf.len(), args.output.display());
    Ok(())
}

async fn read(path: &Path) -> Result<String, String> {
    tokio::fs::read_to_string(path).await.map_err(|e| format!("Could not read {}: {}", path.display(), e))
}
