use crate::models::CartSeed;
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// Reads the cart seed. A missing or unreadable file yields an empty cart.
pub async fn load_seed(path: &Path) -> CartSeed {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(seed) => seed,
            Err(err) => {
                error!("failed to parse cart seed: {err}");
                CartSeed::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no cart seed at {}, starting empty", path.display());
            CartSeed::default()
        }
        Err(err) => {
            error!("failed to read cart seed: {err}");
            CartSeed::default()
        }
    }
}
