// Engine demo entry point: parse the workbooks given on the command line,
// merge them in upload order, and print the merged dataset as JSON.
use fleet_engine::FleetIngestor;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        anyhow::bail!("usage: fleet-engine <workbook.xlsx> [more-workbooks...]");
    }

    let ingestor = FleetIngestor::default();

    let mut datasets = Vec::with_capacity(paths.len());
    for path in &paths {
        info!(path = %path, "parsing workbook");
        let data = ingestor.parse_file(path).await?;
        info!(path = %path, vehicles = data.vehicles.len(), "parsed");
        datasets.push(data);
    }

    let merged = if datasets.len() == 1 {
        datasets.remove(0)
    } else {
        ingestor.merge(&datasets)
    };

    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}
