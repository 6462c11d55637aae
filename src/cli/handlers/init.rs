use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::config_io;
use crate::io::desk_io::{self, CONFIG_FILE, DeskError};
use crate::model::desk::DESK_DIR;

const DESK_TOML_TEMPLATE: &str = r##"[desk]
name = ""

# Departments offered when opening a ticket.
# Add more with: hd departments add "<name>"
departments = []

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# show_key_hints = false
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#5A5580"
# red = "#FF4444"
# amber = "#FFB000"
# green = "#44FF88"
# cyan = "#44DDFF"
"##;

/// Infer a desk name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + chars.as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render desk.toml from the template, keeping its comments.
fn render_desk_toml(name: &str, departments: &[String]) -> Result<String, DeskError> {
    let mut doc: toml_edit::DocumentMut =
        DESK_TOML_TEMPLATE
            .parse()
            .map_err(|e: toml_edit::TomlError| {
                DeskError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            })?;
    doc["desk"]["name"] = toml_edit::value(name);
    for dept in departments {
        if !dept.trim().is_empty() {
            config_io::add_department(&mut doc, dept);
        }
    }
    Ok(doc.to_string())
}

pub fn cmd_init(args: InitArgs, dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match dir {
        Some(d) => fs::canonicalize(d).map_err(|e| format!("cannot resolve -C path '{}': {}", d, e))?,
        None => std::env::current_dir()?,
    };
    let data_dir = root.join(DESK_DIR);

    if data_dir.join(CONFIG_FILE).exists() && !args.force {
        return Err(DeskError::AlreadyExists(root).into());
    }

    if let Some(parent) = root.parent()
        && let Ok(parent_root) = desk_io::discover_desk(parent)
    {
        eprintln!(
            "Note: parent helpdesk found at {}/",
            parent_root.join(DESK_DIR).display()
        );
        eprintln!("Creating new helpdesk in ./{}/", DESK_DIR);
    }

    let name = args.name.unwrap_or_else(|| {
        root.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "Helpdesk".to_string())
    });

    fs::create_dir_all(&data_dir)?;
    let content = render_desk_toml(&name, &args.departments)?;
    desk_io::atomic_write(&data_dir.join(CONFIG_FILE), content.as_bytes())?;

    // Existing records survive --force
    let inventory = desk_io::load_inventory(&data_dir)?;
    desk_io::save_inventory(&data_dir, &inventory)?;
    let tickets = desk_io::load_tickets(&data_dir)?;
    desk_io::save_tickets(&data_dir, &tickets)?;

    tracing::info!(desk = %name, path = %data_dir.display(), "desk initialized");
    println!("Initialized helpdesk: {}", name);
    for dept in &args.departments {
        println!("  department: {}", dept.trim());
    }
    Ok(())
}
