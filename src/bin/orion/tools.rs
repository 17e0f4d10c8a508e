//! Offline tools and theme selection

use anyhow::anyhow;
use clap::Subcommand;
use orion::config::Config;
use orion::store::theme::{preview_for, THEMES};
use orion::store::{LocalStore, ThemeStore};
use orion::tools::color::palette;
use orion::tools::units::format_value;
use orion::tools::{convert, Category, EcLevel, Harmony, MoodBoard, QrCode, Rgb, Roll, TodoList};

/// Board size the CLI clamps moves to
const BOARD_SIZE: (f64, f64) = (1200.0, 800.0);

#[derive(Subcommand)]
pub enum ToolCommand {
    /// Convert a value between units
    Convert {
        /// length, mass, temperature, volume, area, speed, time or data
        category: String,
        value: f64,
        from: String,
        to: String,
    },
    /// List the units of a category (all categories when omitted)
    Units { category: Option<String> },
    /// Todo list kept in local storage
    Todo {
        #[command(subcommand)]
        action: Option<TodoAction>,
    },
    /// Mood board notes kept in local storage
    Board {
        #[command(subcommand)]
        action: Option<BoardAction>,
    },
    /// Convert a color and build palettes around it
    Color {
        /// Hex color, e.g. #0077B6
        hex: String,
        /// complementary, analogous, triadic, tints or shades (all when omitted)
        #[arg(long)]
        harmony: Option<String>,
    },
    /// Print a QR code for a URL or text
    Qr {
        text: String,
        /// Error correction: L or M
        #[arg(long, default_value = "L")]
        level: String,
    },
}

#[derive(Subcommand)]
pub enum TodoAction {
    List,
    Add { text: Vec<String> },
    Toggle { id: i64 },
    Remove { id: i64 },
    /// Remove completed todos
    Clear,
}

#[derive(Subcommand)]
pub enum BoardAction {
    List,
    /// Add a text note
    Add { text: Vec<String> },
    /// Add an image note from a URL or data URL
    Image { url: String },
    /// Replace the text of a note
    Edit { id: i64, text: Vec<String> },
    Move { id: i64, x: f64, y: f64 },
    Color { id: i64, color: String },
    Delete { id: i64 },
    /// Remove every note
    Clear {
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// List available themes
    List,
    /// Print the selected theme
    Show,
    /// Select a theme
    Set { id: String },
}

fn open_store(config: &Config) -> anyhow::Result<LocalStore> {
    Ok(LocalStore::in_dir(&config.storage.data_path())?)
}

fn parse_category(raw: &str) -> anyhow::Result<Category> {
    Category::parse(raw).ok_or_else(|| anyhow!("Unknown category '{}'", raw))
}

pub fn run(config: &Config, tool: ToolCommand) -> anyhow::Result<()> {
    match tool {
        ToolCommand::Convert {
            category,
            value,
            from,
            to,
        } => {
            let category = parse_category(&category)?;
            let result = convert(category, value, &from, &to)?;
            println!("{} {} = {} {}", format_value(value), from, format_value(result), to);
        }
        ToolCommand::Units { category } => {
            let categories = match category {
                Some(raw) => vec![parse_category(&raw)?],
                None => Category::ALL.to_vec(),
            };
            for category in categories {
                println!("{}", category);
                for unit in category.units() {
                    println!("  {:<8} {}", unit.id, unit.label);
                }
            }
        }
        ToolCommand::Todo { action } => todo(config, action.unwrap_or(TodoAction::List))?,
        ToolCommand::Board { action } => board(config, action.unwrap_or(BoardAction::List))?,
        ToolCommand::Color { hex, harmony } => {
            let base = Rgb::from_hex(&hex)?;
            println!("{}  {}  {}", base.to_hex(), base, base.to_hsl());

            let harmonies: Vec<Harmony> = match harmony {
                Some(raw) => vec![Harmony::ALL
                    .into_iter()
                    .find(|h| h.label().eq_ignore_ascii_case(&raw))
                    .ok_or_else(|| anyhow!("Unknown harmony '{}'", raw))?],
                None => Harmony::ALL.to_vec(),
            };
            for harmony in harmonies {
                let colors: Vec<String> = palette(base, harmony).iter().map(Rgb::to_hex).collect();
                println!("{:<14} {}", harmony.label(), colors.join(" "));
            }
        }
        ToolCommand::Qr { text, level } => {
            let level = EcLevel::parse(&level).ok_or_else(|| anyhow!("Level must be L or M"))?;
            let code = QrCode::encode_text(&text, level)?;
            print!("{}", code.to_half_blocks(2));
            println!("Version {} / level {} / mask {}", code.version(), code.level(), code.mask());
        }
    }
    Ok(())
}

fn todo(config: &Config, action: TodoAction) -> anyhow::Result<()> {
    let mut list = TodoList::load(open_store(config)?);

    match action {
        TodoAction::List => {}
        TodoAction::Add { text } => {
            if list.add(&text.join(" "))?.is_none() {
                println!("Nothing to add.");
            }
        }
        TodoAction::Toggle { id } => {
            if !list.toggle(id)? {
                println!("No todo {}", id);
            }
        }
        TodoAction::Remove { id } => {
            if !list.remove(id)? {
                println!("No todo {}", id);
            }
        }
        TodoAction::Clear => {
            let removed = list.clear_completed()?;
            println!("Removed {} completed", removed);
        }
    }

    for item in list.items() {
        let mark = if item.completed { "x" } else { " " };
        println!("[{}] {:>14}  {}", mark, item.id, item.text);
    }
    println!("{} remaining", list.remaining());
    Ok(())
}

fn board(config: &Config, action: BoardAction) -> anyhow::Result<()> {
    let mut board = MoodBoard::load(open_store(config)?);

    match action {
        BoardAction::List => {}
        BoardAction::Add { text } => {
            let id = board.add_text(Roll::random(&mut rand::thread_rng()))?;
            if !text.is_empty() {
                board.set_content(id, &text.join(" "))?;
            }
        }
        BoardAction::Image { url } => {
            board.add_image(&url, Roll::random(&mut rand::thread_rng()))?;
        }
        BoardAction::Edit { id, text } => {
            if !board.set_content(id, &text.join(" "))? {
                println!("No note {}", id);
            }
        }
        BoardAction::Move { id, x, y } => {
            if !board.move_to(id, x, y, BOARD_SIZE)? {
                println!("No note {}", id);
            }
        }
        BoardAction::Color { id, color } => {
            if !board.set_color(id, &color)? {
                println!("No note {}", id);
            }
        }
        BoardAction::Delete { id } => {
            if !board.delete(id)? {
                println!("No note {}", id);
            }
        }
        BoardAction::Clear { yes } => {
            if yes {
                board.clear()?;
            } else {
                println!("Pass --yes to remove every note.");
            }
        }
    }

    for note in board.notes() {
        let preview: String = note.content.chars().take(40).collect();
        println!(
            "{:>14}  {:?}  ({:.0}, {:.0})  {}  {}",
            note.id, note.kind, note.x, note.y, note.color, preview
        );
    }
    Ok(())
}

pub fn theme(config: &Config, action: ThemeAction) -> anyhow::Result<()> {
    let mut themes = ThemeStore::load(open_store(config)?);

    match action {
        ThemeAction::List => {
            for theme in THEMES.iter() {
                let marker = if theme.id == themes.current() { "*" } else { " " };
                println!(
                    "{} {:<16} {:<20} {} {} {}",
                    marker,
                    theme.id,
                    theme.name,
                    theme.preview.light,
                    theme.preview.default,
                    theme.preview.dark
                );
            }
        }
        ThemeAction::Show => {
            let preview = preview_for(themes.current());
            println!("{} ({})", themes.current(), themes.class());
            println!("{} {} {}", preview.light, preview.default, preview.dark);
        }
        ThemeAction::Set { id } => {
            themes.set(&id)?;
            println!("Theme set to {}", themes.current());
        }
    }
    Ok(())
}
