use anyhow::Result;

use newswall_core::AppConfig;

/// Print the configured panel set
pub fn run(config: &AppConfig) -> Result<()> {
    let panels = config.panel_configs()?;

    if panels.is_empty() {
        println!("No outlets configured.");
        return Ok(());
    }

    let width = panels
        .iter()
        .map(|p| p.label.len())
        .max()
        .unwrap_or(0);

    for panel in panels {
        println!("{:<width$}  {}", panel.label, panel.endpoint, width = width);
    }

    Ok(())
}
