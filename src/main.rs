use std::sync::Arc;

use clap::Parser;
use stamps_for_tomorrow::config::setup_logging;
use stamps_for_tomorrow::generate::GeminiGenerator;
use stamps_for_tomorrow::store::CollectionStore;
use tracing::{error, info};
use url::Url;

#[tokio::main]
async fn main() {
    let cli = stamps_for_tomorrow::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    let base_url = match Url::parse(&cli.base_url) {
        Ok(url) => url,
        Err(err) => {
            error!("Invalid base URL {:?}: {}", cli.base_url, err);
            return;
        }
    };

    let store = match CollectionStore::open(&cli.data_dir) {
        Ok(store) => store,
        Err(err) => {
            error!("Failed to open stamp collection: {}", err);
            return;
        }
    };
    info!("Loaded {} stamp(s) from {}", store.len(), cli.data_dir.display());

    let generator = Arc::new(GeminiGenerator::new(cli.gemini_api_key, cli.image_model));

    if let Err(err) = stamps_for_tomorrow::web::setup_server(
        &cli.listen_address,
        cli.port,
        base_url,
        store,
        generator,
    )
    .await
    {
        error!("Application error: {}", err);
    }
}
