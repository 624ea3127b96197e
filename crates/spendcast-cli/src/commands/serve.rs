//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    iqr_multiplier: f64,
) -> Result<()> {
    if !iqr_multiplier.is_finite() || iqr_multiplier < 0.0 {
        anyhow::bail!(
            "--iqr-multiplier must be a non-negative number (got {})",
            iqr_multiplier
        );
    }

    println!("🚀 Starting Spendcast web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    let config = spendcast_server::ServerConfig {
        iqr_multiplier,
        ..spendcast_server::ServerConfig::from_env(!no_auth)
    };

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else {
        println!(
            "   🔒 Authentication: {} header from your auth proxy",
            spendcast_server::USER_HEADER
        );
        if !config.api_keys.is_empty() {
            println!(
                "   🔑 API keys: {} configured (SPENDCAST_API_KEYS)",
                config.api_keys.len()
            );
        }
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    spendcast_server::serve_with_config(db, host, port, config).await?;

    Ok(())
}
