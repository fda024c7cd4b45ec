//! Shared constants for the stamp app
//!

use std::time::Duration;

/// Storage key the collection document is persisted under; the on-disk file
/// is `<data_dir>/<STORAGE_KEY>.json`.
pub const STORAGE_KEY: &str = "uae-stamps-history-v2";

/// Base endpoint for the generative image service.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Image model used when none is configured.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// The one message shown to users when a generation fails, whatever the cause.
pub const GENERATION_ERROR_MESSAGE: &str =
    "We couldn't generate that stamp right now. Try a different theme!";

/// Progress copy cycled through while a generation is in flight.
pub const LOADING_MESSAGES: [&str; 6] = [
    "Inking the plates...",
    "Sketching Emirati wonders...",
    "Perforating the edges...",
    "Capturing the desert light...",
    "Building a masterpiece...",
    "Almost ready to post...",
];

/// How long each progress message stays on screen before the next one.
pub const LOADING_MESSAGE_INTERVAL: Duration = Duration::from_millis(2500);

/// Theme suggestions shown under the search box.
pub const SUGGESTIONS: [&str; 10] = [
    "Golden Camel",
    "Sheikh Zayed Mosque",
    "Burj Khalifa",
    "Dhow Boat",
    "Royal Falcon",
    "Louvre Abu Dhabi",
    "Al Ain Oasis",
    "Pearl Diver",
    "Majlis Dallah",
    "Qasr Al Hosn",
];

/// Pixel size (minimum) of rendered QR codes.
pub const QR_MIN_DIMENSIONS: u32 = 256;
