//! Branch Kiosk - Main Entry Point
//!
//! Loads configuration, installs logging and runs the terminal kiosk on
//! stdin/stdout until the user quits.

use kiosk::telemetry::init_telemetry;
use kiosk_infrastructure::KioskConfig;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = KioskConfig::load()?;
    init_telemetry(&config.logging);

    info!(
        base_url = %config.api.base_url,
        branch_id = %config.bank.branch_id,
        language = %config.display.language,
        "starting kiosk"
    );

    let app = kiosk::build_app(&config)?;
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    app.run(stdin, &mut stdout).await?;

    Ok(())
}
