//! `charbot config` -- print the effective configuration.

use console::style;

use crate::state::AppState;

pub fn show_config(state: &AppState, json: bool) -> anyhow::Result<()> {
    if json {
        let output = serde_json::json!({
            "path": state.config_path.as_ref().map(|p| p.display().to_string()),
            "config": state.config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let config = &state.config;
    let path = state
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    println!();
    println!("  {}  {}", style("Config file:").bold(), style(path).dim());
    println!("  {}     {}", style("Endpoint:").bold(), config.endpoint);
    println!("  {}      {}s", style("Timeout:").bold(), config.request_timeout_secs);
    println!("  {} {}", style("Send history:").bold(), config.send_history);
    println!("  {}  {:?}", style("Auth source:").bold(), config.auth.source);
    println!("  {}    {}", style("User var:").bold(), config.auth.user_var);
    println!("  {}   {}", style("Token var:").bold(), config.auth.token_var);
    if let Some(url) = &config.auth.token_url {
        println!("  {}   {}", style("Token URL:").bold(), url);
    }
    println!();
    Ok(())
}
