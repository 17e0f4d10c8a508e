//! Backend-stored records: conversations, characters, memory, novels

use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Subcommand;
use orion::api::ApiClient;
use orion::config::Config;
use orion::listing::characters as character_list;
use orion::listing::conversations::{group_by_date, search};
use orion::listing::memory::{self as memory_list, format_size};
use orion::listing::{CharacterForm, MemoryStats};
use orion::models::{
    date_label, ConversationPatch, MemoryPatch, NewConversation, NewMemoryItem, NovelLength,
};
use orion::tools::{NovelForm, Pov};
use serde::Serialize;

#[derive(Subcommand)]
pub enum ConversationAction {
    /// List conversations grouped by date
    List {
        /// Filter by title or smart tag
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Print a conversation
    Show { id: i64 },
    /// Rename a conversation
    Rename { id: i64, title: String },
    /// Delete a conversation
    Delete { id: i64 },
    /// Create an empty conversation
    New {
        #[arg(default_value = "New Chat")]
        title: String,
    },
}

#[derive(Subcommand)]
pub enum CharacterAction {
    /// List characters
    List {
        /// Filter by name, description or tag
        #[arg(short, long)]
        search: Option<String>,
        /// Only this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one character
    Show { id: String },
    /// Create a character
    Create {
        name: String,
        /// Short description (required)
        #[arg(short, long)]
        description: String,
        #[arg(long, default_value = "")]
        relationship: String,
        #[arg(long, default_value = "")]
        role: String,
        /// How the character addresses you
        #[arg(long, default_value = "")]
        nickname: String,
        #[arg(long, default_value = "")]
        greeting: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        visibility: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Delete a character
    Delete {
        id: String,
        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Mark a character as active
    Activate { id: String },
}

#[derive(Subcommand)]
pub enum MemoryAction {
    /// List memory sources
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Register a memory source
    Add {
        name: String,
        #[arg(long = "type", default_value = "Text")]
        kind: String,
        /// e.g. 1.2MB
        #[arg(long, default_value = "")]
        size: String,
        #[arg(long, default_value = "Manual")]
        source: String,
        #[arg(long, default_value = "Pending")]
        status: String,
    },
    /// Change the status of a source
    Status { id: i64, status: String },
    /// Remove a source
    Delete { id: i64 },
    /// Totals by status and size
    Stats,
}

#[derive(Subcommand)]
pub enum NovelAction {
    /// Generate a novel (or outline) with the language model
    Generate {
        #[arg(default_value = "")]
        title: String,
        /// Genre tag, repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// short, medium, long or epic
        #[arg(short, long, default_value = "medium")]
        length: String,
        #[arg(short, long)]
        model: Option<String>,
        #[arg(long)]
        language: Option<String>,
        /// Only produce an outline
        #[arg(long)]
        outline: bool,
        /// third, third-omniscient, first or second
        #[arg(long, default_value = "third")]
        pov: String,
        #[arg(long, default_value = "")]
        concept: String,
        /// Save the result to this folder
        #[arg(long)]
        save: Option<String>,
        #[arg(long, default_value = "")]
        filename: String,
    },
    /// Save a text file as a novel
    Save {
        title: String,
        file: PathBuf,
        #[arg(long)]
        folder: Option<String>,
        #[arg(long)]
        filename: Option<String>,
    },
    /// List novel folders
    Folders,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    use std::io::Write;
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

pub async fn conversations(
    client: &ApiClient,
    action: ConversationAction,
    json: bool,
) -> anyhow::Result<()> {
    match action {
        ConversationAction::List { search: query } => {
            let all = client.list_conversations().await?;
            let found = search(&all, query.as_deref().unwrap_or(""));
            if json {
                return print_json(&found);
            }
            if found.is_empty() {
                println!("No conversations found.");
                return Ok(());
            }
            for group in group_by_date(&found) {
                println!("{}", group.date);
                for conv in group.conversations {
                    let tags = if conv.smart_tags.is_empty() {
                        String::new()
                    } else {
                        format!("  #{}", conv.smart_tags.join(" #"))
                    };
                    println!("  {:>6}  {}{}", conv.id, conv.display_title(), tags);
                }
            }
        }
        ConversationAction::Show { id } => {
            let conv = client.get_conversation(id).await?;
            if json {
                return print_json(&conv);
            }
            println!("{} ({})", conv.display_title(), conv.last_updated);
            println!("{}", "-".repeat(60));
            for message in &conv.messages {
                println!("[{}] {:?}: {}", message.timestamp, message.kind, message.content);
            }
        }
        ConversationAction::Rename { id, title } => {
            client
                .update_conversation(id, &ConversationPatch::rename(title.trim()))
                .await?;
            println!("Renamed conversation {}", id);
        }
        ConversationAction::Delete { id } => {
            client.delete_conversation(id).await?;
            println!("Deleted conversation {}", id);
        }
        ConversationAction::New { title } => {
            let created = client
                .create_conversation(&NewConversation {
                    title,
                    smart_tags: Vec::new(),
                    is_active: true,
                    last_updated: date_label(chrono::Local::now()),
                    messages: Vec::new(),
                })
                .await?;
            println!("Created conversation {} (orion chat --id {})", created.id, created.id);
        }
    }
    Ok(())
}

pub async fn characters(
    client: &ApiClient,
    action: CharacterAction,
    json: bool,
) -> anyhow::Result<()> {
    match action {
        CharacterAction::List { search, category } => {
            let all = client.list_characters().await?;
            let found = character_list::filter(&all, search.as_deref().unwrap_or(""), category.as_deref());
            if json {
                return print_json(&found);
            }
            if found.is_empty() {
                println!("No characters found.");
                println!("Categories: {}", character_list::categories(&all).join(", "));
                return Ok(());
            }
            println!("{:<24} {:<24} {:<12} {}", "ID", "Name", "Category", "Description");
            println!("{}", "-".repeat(80));
            for c in found {
                let marker = if c.active() { "*" } else { " " };
                println!(
                    "{:<24} {}{:<23} {:<12} {}",
                    c.character_id, marker, c.short_name(), c.category, c.short_description
                );
            }
        }
        CharacterAction::Show { id } => {
            let c = client.get_character(&id).await?;
            if json {
                return print_json(&c);
            }
            println!("{}", c.name);
            println!("  {}", c.short_description);
            println!();
            println!("Relationship: {}", c.user_relationship);
            println!("Role:         {}", c.character_role);
            println!("Calls you:    {}", c.user_nickname());
            println!("Category:     {} ({})", c.category, c.visibility);
            if !c.tags.is_empty() {
                println!("Tags:         {}", c.tags.join(", "));
            }
            if !c.greeting.is_empty() {
                println!();
                println!("Greeting: {}", c.greeting);
            }
        }
        CharacterAction::Create {
            name,
            description,
            relationship,
            role,
            nickname,
            greeting,
            category,
            visibility,
            tags,
        } => {
            let form = CharacterForm {
                name,
                short_description: description,
                user_relationship: relationship,
                character_role: role,
                user_persona_nickname: nickname,
                greeting,
                category,
                visibility,
                tags,
            };
            let input = form.validate()?;
            let created = client.create_character(&input).await?;
            println!("Created {} ({})", created.name, created.character_id);
            println!("Start chatting: orion character-chat {}", created.character_id);
        }
        CharacterAction::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete character '{}'?", id))? {
                return Ok(());
            }
            client.delete_character(&id).await?;
            println!("Deleted character {}", id);
        }
        CharacterAction::Activate { id } => {
            client.activate_character(&id).await?;
            println!("Activated character {}", id);
        }
    }
    Ok(())
}

pub async fn memory(client: &ApiClient, action: MemoryAction, json: bool) -> anyhow::Result<()> {
    match action {
        MemoryAction::List { search } => {
            let items = client.list_memory_items().await?;
            let found = memory_list::search(&items, search.as_deref().unwrap_or(""));
            if json {
                return print_json(&found);
            }
            println!("{:>6}  {:<28} {:<10} {:>10}  {:<12} {}", "ID", "Name", "Type", "Size", "Source", "Status");
            println!("{}", "-".repeat(80));
            for item in found {
                println!(
                    "{:>6}  {:<28} {:<10} {:>10}  {:<12} {}",
                    item.id, item.name, item.kind, item.size, item.source, item.status
                );
            }
        }
        MemoryAction::Add {
            name,
            kind,
            size,
            source,
            status,
        } => {
            let item = NewMemoryItem {
                name,
                kind,
                size,
                source,
                status,
            };
            let created = client.create_memory_item(&item).await?;
            println!("Added memory item {}", created.id);
        }
        MemoryAction::Status { id, status } => {
            client.update_memory_item(id, &MemoryPatch::status(status)).await?;
            println!("Updated memory item {}", id);
        }
        MemoryAction::Delete { id } => {
            client.delete_memory_item(id).await?;
            println!("Deleted memory item {}", id);
        }
        MemoryAction::Stats => {
            let items = client.list_memory_items().await?;
            let stats = MemoryStats::from_items(&items);
            println!("Items:      {}", stats.total_items);
            println!("Total size: {}", format_size(stats.total_bytes));
            if stats.unknown_sizes > 0 {
                println!("            ({} without a readable size)", stats.unknown_sizes);
            }
            for (status, count) in &stats.by_status {
                println!("  {:<12} {}", status, count);
            }
        }
    }
    Ok(())
}

pub async fn novel(client: &ApiClient, config: &Config, action: NovelAction) -> anyhow::Result<()> {
    match action {
        NovelAction::Generate {
            title,
            tags,
            length,
            model,
            language,
            outline,
            pov,
            concept,
            save,
            filename,
        } => {
            let mut form = NovelForm {
                title,
                length: NovelLength::parse(&length)
                    .ok_or_else(|| anyhow!("Unknown length '{}'", length))?,
                pov: Pov::parse(&pov).ok_or_else(|| anyhow!("Unknown point of view '{}'", pov))?,
                outline_only: outline,
                concept,
                filename,
                ..Default::default()
            };
            if !tags.is_empty() {
                form.tags.clear();
                for tag in &tags {
                    form.add_tag(tag);
                }
            }
            form.model = model.unwrap_or_else(|| config.backend.model.clone());
            if let Some(language) = language {
                form.language = language;
            }

            eprintln!("Generating {}...", form.length.label());
            let draft = client.generate_novel(&form.request()).await?;
            println!("{}", draft.novel);

            if let Some(folder) = save {
                form.folder = folder;
                match form.save_request(&draft.novel) {
                    Some(body) => {
                        let saved = client.save_novel(&body).await?;
                        eprintln!("Saved to {}", saved.path.unwrap_or_else(|| form.folder.clone()));
                    }
                    None => bail!("Nothing was generated, so nothing was saved"),
                }
            }
        }
        NovelAction::Save {
            title,
            file,
            folder,
            filename,
        } => {
            let content = std::fs::read_to_string(&file)?;
            let mut form = NovelForm {
                title,
                filename: filename.unwrap_or_default(),
                ..Default::default()
            };
            if let Some(folder) = folder {
                form.folder = folder;
            }
            let body = form
                .save_request(&content)
                .ok_or_else(|| anyhow!("{:?} is empty", file))?;
            let saved = client.save_novel(&body).await?;
            println!("Saved to {}", saved.path.unwrap_or(form.folder));
        }
        NovelAction::Folders => {
            let folders = client.list_novel_folders().await?;
            for folder in folders.folders {
                println!("{}", folder);
            }
        }
    }
    Ok(())
}
