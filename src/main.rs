use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use catpick::app::App;
use catpick::category::{search, summary, CategoryStore};
use catpick::config::Config;
use catpick::{loader, output, ui};

/// Get the config directory path (~/.config/catpick/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("catpick"))
}

#[derive(Parser, Debug)]
#[command(name = "catpick", about = "Pick categories from a two-level checkbox tree")]
struct Args {
    /// Categories file (TOML, `[[category]]` tables)
    #[arg(long, value_name = "FILE")]
    categories: Option<PathBuf>,

    /// Config file (defaults to ~/.config/catpick/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Toggle a category by name without opening the TUI (repeatable)
    #[arg(long, value_name = "NAME")]
    toggle: Vec<String>,

    /// Print the category names matching QUERY and exit
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Print the category tree and exit
    #[arg(long)]
    list: bool,

    /// Print the selection as JSON
    #[arg(long)]
    json: bool,
}

/// Pick the categories file: flag, then config, then the config directory.
fn resolve_categories_path(args: &Args, config: &Config, config_dir: &Path) -> PathBuf {
    args.categories
        .clone()
        .or_else(|| config.categories_file.clone())
        .unwrap_or_else(|| config_dir.join("categories.toml"))
}

fn print_selection(store: &CategoryStore, json: bool) -> Result<()> {
    let selection = store.checked();
    if json {
        println!(
            "{}",
            output::selection_json(&selection).context("Failed to encode selection")?
        );
    } else if !selection.is_empty() {
        println!("{}", output::selection_text(&selection));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the selection
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let categories_path = resolve_categories_path(&args, &config, &config_dir);
    if !categories_path.exists() {
        eprintln!(
            "Error: No categories file found at {}",
            categories_path.display()
        );
        eprintln!();
        eprintln!("Create it with one [[category]] table per entry:");
        eprintln!();
        eprintln!("  [[category]]");
        eprintln!("  name = \"Food\"");
        eprintln!();
        eprintln!("  [[category]]");
        eprintln!("  name = \"Fruit\"");
        eprintln!("  parent = \"Food\"");
        eprintln!();
        eprintln!("or pass --categories FILE.");
        std::process::exit(1);
    }

    let mut store = loader::load_store(&categories_path).with_context(|| {
        format!(
            "Failed to load categories from {}",
            categories_path.display()
        )
    })?;

    // Headless modes
    if args.list {
        for line in output::tree_lines(&store) {
            println!("{}", line);
        }
        return Ok(());
    }

    if let Some(query) = &args.search {
        for name in search::filter_results(&store, query, config.dedupe_search) {
            println!("{}", name);
        }
        return Ok(());
    }

    if !args.toggle.is_empty() {
        for name in &args.toggle {
            store
                .toggle_by_names([name])
                .with_context(|| format!("Failed to toggle '{}'", name))?;
            let changes = store.changes();
            if changes.is_empty() {
                tracing::warn!(name = %name, "Toggle matched no category");
            }
            println!("{}", output::change_line(&changes));
        }
        println!("{}", summary::counter_text(store.checked_count()));
        if args.json {
            print_selection(&store, true)?;
        }
        return Ok(());
    }

    let mut app = App::new(store, &config);
    let outcome = ui::run(&mut app).await?;

    if outcome == ui::Action::Submit {
        tracing::info!(
            selected = app.store.checked_count(),
            "Selection submitted"
        );
        print_selection(&app.store, args.json)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("catpick").chain(argv.iter().copied()))
    }

    #[test]
    fn test_categories_flag_wins() {
        let config = Config {
            categories_file: Some(PathBuf::from("/etc/catpick/cats.toml")),
            ..Config::default()
        };
        let a = args(&["--categories", "/tmp/mine.toml"]);
        assert_eq!(
            resolve_categories_path(&a, &config, Path::new("/home/u/.config/catpick")),
            PathBuf::from("/tmp/mine.toml")
        );
    }

    #[test]
    fn test_config_then_default_dir() {
        let a = args(&[]);
        let config = Config {
            categories_file: Some(PathBuf::from("/etc/catpick/cats.toml")),
            ..Config::default()
        };
        let dir = Path::new("/home/u/.config/catpick");
        assert_eq!(
            resolve_categories_path(&a, &config, dir),
            PathBuf::from("/etc/catpick/cats.toml")
        );
        assert_eq!(
            resolve_categories_path(&a, &Config::default(), dir),
            dir.join("categories.toml")
        );
    }

    #[test]
    fn test_toggle_is_repeatable() {
        let a = args(&["--toggle", "Food", "--toggle", "Fruit", "--json"]);
        assert_eq!(a.toggle, vec!["Food", "Fruit"]);
        assert!(a.json);
    }
}
