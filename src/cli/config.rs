use jumpdeck::config::Config;
use owo_colors::OwoColorize;
use std::error::Error;
use std::process::Command;

pub fn handle_config_view() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    println!("Current jumpdeck configuration:");
    println!(
        "  track: {}",
        config.track.as_deref().unwrap_or("(bundled demo track)")
    );
    println!("  jump_ms: {}", config.jump_ms);
    println!("  poll_interval_ms: {}", config.poll_interval_ms);
    println!("  toast_ms: {}", config.toast_ms);
    println!("  log_level: {}", config.log_level);
    println!("  {}", "messages:".bold());
    let messages = &config.messages;
    for (key, value) in [
        ("playing", &messages.playing),
        ("paused", &messages.paused),
        ("jumped_back", &messages.jumped_back),
        ("back_not_possible", &messages.back_not_possible),
        ("jumped_forward", &messages.jumped_forward),
        ("forward_not_possible", &messages.forward_not_possible),
        ("timer", &messages.timer),
    ] {
        println!("    {key}: {}", value.cyan());
    }

    Ok(())
}

pub fn handle_config_set(key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;

    config.set_value(key, value)?;
    config.save()?;

    println!("Configuration updated: {key} = {value}");

    Ok(())
}

pub fn handle_config_edit() -> Result<(), Box<dyn Error>> {
    // Ensure config exists
    if !Config::exists()? {
        return Err("jumpdeck not initialized. Run 'jumpdeck init' first.".into());
    }

    let config_path = Config::config_path()?;
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!("Opening {} in {}", config_path.display(), editor);

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                format!("Editor '{editor}' not found. Set $EDITOR to a valid editor path.")
            } else {
                format!("Failed to launch editor '{editor}': {e}")
            }
        })?;

    if !status.success() {
        return Err(format!("Editor '{editor}' exited with error").into());
    }

    // Validate the config after editing
    match Config::load() {
        Ok(_) => println!("Configuration saved successfully"),
        Err(e) => {
            return Err(format!("Configuration validation failed: {e}").into());
        }
    }

    Ok(())
}
