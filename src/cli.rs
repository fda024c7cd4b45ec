//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;
use std::path::PathBuf;

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "STAMPS_DEBUG")]
    /// Enable debug logging. Env: STAMPS_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "9000", env = "STAMPS_PORT")]
    /// http listener, defaults to `9000`.
    /// Env: STAMPS_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "STAMPS_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: STAMPS_LISTEN_ADDRESS
    pub listen_address: String,
    #[clap(
        long,
        short,
        default_value = "https://stamps-for-tomorrow.ae",
        env = "STAMPS_BASE_URL"
    )]
    /// Public base URL used when building QR share links.
    /// Env: STAMPS_BASE_URL
    pub base_url: String,
    #[clap(long, default_value = "./data", env = "STAMPS_DATA_DIR")]
    /// Directory holding the persisted stamp collection.
    /// Env: STAMPS_DATA_DIR
    pub data_dir: PathBuf,
    #[clap(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    /// API key for the generative image service. Env: GEMINI_API_KEY
    pub gemini_api_key: String,
    #[clap(long, default_value = crate::constants::DEFAULT_IMAGE_MODEL, env = "STAMPS_IMAGE_MODEL")]
    /// Image model identifier. Env: STAMPS_IMAGE_MODEL
    pub image_model: String,
}
