use super::{prompts, Context};
use crate::output::Output;
use crate::ui::is_interactive;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, Table};
use nebulix_config::{API_KEY_ENV, PLACEHOLDER_API_KEY};
use serde_json::json;

pub fn run_config(ctx: &Context, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(ctx, output),
        ConfigCommands::Init { api_key } => init_config(ctx, api_key, output),
    }
}

fn show_config(ctx: &Context, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    let config = &ctx.config;

    let key_source = if std::env::var(API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        API_KEY_ENV.to_string()
    } else {
        "config.toml".to_string()
    };
    let api_key = mask_string(&config.api_key().unwrap_or_default());
    let watchlist_file = config.watchlist_file(&ctx.paths);
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());

    let data = json!({
        "config_file": config_file.display().to_string(),
        "config_file_exists": config_file.exists(),
        "provider": {
            "api_key": api_key,
            "api_key_source": key_source,
            "base_url": config.provider.base_url,
            "image_base_url": config.provider.image_base_url,
            "timeout_secs": config.provider.timeout_secs,
        },
        "browse": {
            "debounce_ms": config.browse.debounce_ms,
            "card_poster_size": config.browse.card_poster_size,
            "detail_image_size": config.browse.detail_image_size,
            "cast_limit": config.browse.cast_limit,
        },
        "watchlist_file": watchlist_file.display().to_string(),
        "log_file": log_file,
    });

    output.emit(
        || {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.apply_modifier(UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
                Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
            ]);

            let file_note = if config_file.exists() { "" } else { " (not created, using defaults)" };
            table.add_row(vec![Cell::new("Config File"), Cell::new(format!("{}{}", config_file.display(), file_note))]);
            table.add_row(vec![Cell::new("API Key"), Cell::new(format!("{} (from {})", api_key, key_source))]);
            table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.provider.base_url)]);
            table.add_row(vec![Cell::new("Image Base URL"), Cell::new(&config.provider.image_base_url)]);
            table.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{}s", config.provider.timeout_secs))]);
            table.add_row(vec![Cell::new("Search Debounce"), Cell::new(format!("{}ms", config.browse.debounce_ms))]);
            table.add_row(vec![Cell::new("Card Poster Size"), Cell::new(&config.browse.card_poster_size)]);
            table.add_row(vec![Cell::new("Detail Image Size"), Cell::new(&config.browse.detail_image_size)]);
            table.add_row(vec![Cell::new("Cast Shown"), Cell::new(config.browse.cast_limit)]);
            table.add_row(vec![Cell::new("Watchlist File"), Cell::new(watchlist_file.display())]);
            table.add_row(vec![Cell::new("Log File"), Cell::new(&log_file)]);
            table.to_string()
        },
        &data,
    );
    Ok(())
}

fn init_config(ctx: &Context, api_key: Option<String>, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();

    if config_file.exists() && api_key.is_none() && is_interactive() {
        let replace = prompts::prompt_yes_no(
            &format!("{} already exists. Replace its API key?", config_file.display()),
            false,
        )?;
        if !replace {
            output.info("Configuration left unchanged.");
            return Ok(());
        }
    }

    let key = match api_key {
        Some(key) => key,
        None if is_interactive() => prompts::prompt_secret("TMDB API key (leave empty to fill in later)")?,
        None => String::new(),
    };
    let key = key.trim();

    // Keeps everything else the user already had in the file
    let mut config = ctx.config.clone();
    config.provider.api_key = if key.is_empty() { PLACEHOLDER_API_KEY.to_string() } else { key.to_string() };

    ctx.paths.ensure_directories().map_err(|e| eyre!("Failed to create directories: {}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Configuration written to {}", config_file.display()));
    if key.is_empty() {
        output.info(format!(
            "Replace {} in the file, or set {}, before browsing.",
            PLACEHOLDER_API_KEY, API_KEY_ENV
        ));
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() || s == PLACEHOLDER_API_KEY {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
