//! Fetch all three factor measures for one factor and print them as a panel.
//!
//! Usage: `cargo run --example factor_timeseries -- <report-id> <factor-name> [out.csv]`

use factorplot::{
    ExportFormat, Exporter, FactorDataExtractor, FactorPanel, FetchOptions, ReportClient,
};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(report_id), Some(factor_name)) = (args.next(), args.next()) else {
        eprintln!("usage: factor_timeseries <report-id> <factor-name> [out.csv|out.json]");
        std::process::exit(2);
    };
    let output = args.next();

    let client = ReportClient::from_env()?;
    println!("=== factorplot demo against {} ===\n", client.base_url());

    let options = FetchOptions {
        source: Some("factor_timeseries".to_string()),
        ..FetchOptions::default()
    };
    let extractor = FactorDataExtractor::new(&client);

    let exposure = extractor.factor_exposure(&report_id, &factor_name, &options)?;
    let pnl = extractor.factor_pnl(&report_id, &factor_name, &options)?;
    let risk = extractor.factor_proportion_of_risk(&report_id, &factor_name, &options)?;

    for series in [&exposure, &pnl, &risk] {
        match (series.first(), series.last()) {
            (Some((start, _)), Some((end, _))) => {
                println!("{:>18}: {} points, {start} to {end}", series.label(), series.len())
            }
            _ => println!("{:>18}: no data", series.label()),
        }
    }

    let panel = FactorPanel::new(factor_name, vec![exposure, pnl, risk])?;
    match output {
        Some(path) => {
            let path = Path::new(&path);
            let format = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(Ok(ExportFormat::Csv), ExportFormat::from_extension)?;
            panel.export_to_file(path, format)?;
            println!("\nWrote {}", path.display());
        }
        None => println!("\n{}", panel.export_to_string(ExportFormat::Csv)?),
    }

    Ok(())
}
