//! CLI module for the kbshelf application
//!
//! This module handles the command-line interface for interacting with the
//! note and bookmark stores.
use std::{
    fs::read_to_string,
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    cli::editor, display_host, distinct_tags, filter, suggest_title, Bookmark, BookmarkAction,
    BookmarkDraft, CollectionStore, Commands, Config, FileStorage, FormState, ListOptions, Note,
    NoteAction, NoteDraft, Record, Result, ShelfError, TagSelection,
};

/// CLI Application handler - processes CLI commands and interfaces with the stores
pub struct App {
    /// Application configuration
    config: Config,

    /// Where `config --set` and `config --reset` write to
    config_path: PathBuf,

    /// Directory holding the durable slots
    data_dir: PathBuf,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application with the given config and data directory
    pub fn new(config: Config, config_path: PathBuf, data_dir: PathBuf, verbose: bool) -> Self {
        Self {
            config,
            config_path,
            data_dir,
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Note { action } => self.run_note(action),
            Commands::Bookmark { action } => self.run_bookmark(action),
            Commands::Stats => self.show_stats(),
            Commands::Config { show, set, reset } => self.handle_config(show, set, reset),
        }
    }

    fn storage(&self) -> Result<FileStorage> {
        debug!("Using data directory {}", self.data_dir.display());
        FileStorage::new(&self.data_dir)
    }

    fn note_store(&self) -> Result<CollectionStore<Note, FileStorage>> {
        Ok(CollectionStore::open(self.storage()?))
    }

    fn bookmark_store(&self) -> Result<CollectionStore<Bookmark, FileStorage>> {
        Ok(CollectionStore::open(self.storage()?))
    }

    fn run_note(&self, action: NoteAction) -> Result<()> {
        match action {
            NoteAction::Create {
                title,
                content,
                edit,
                tags,
                file,
            } => self.create_note(title, content, file, tags, edit),

            NoteAction::View { id, json } => {
                let store = self.note_store()?;
                let note = find(&store, &id)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(note)?);
                } else {
                    print_note(note, true);
                }
                Ok(())
            }

            NoteAction::List(options) => {
                let store = self.note_store()?;
                self.list_records(store.list(), &options, print_note)
            }

            NoteAction::Edit {
                id,
                title,
                content,
                edit,
                tags,
                file,
            } => self.edit_note(id, title, content, file, tags, edit),

            NoteAction::Delete { id, force } => {
                let mut store = self.note_store()?;
                self.handle_delete(&mut store, &id, force, |note: &Note| note.title.clone())
            }

            NoteAction::Tags => print_tags(&distinct_tags(self.note_store()?.list())),
        }
    }

    fn run_bookmark(&self, action: BookmarkAction) -> Result<()> {
        match action {
            BookmarkAction::Add {
                url,
                title,
                description,
                tags,
            } => {
                let mut draft = BookmarkDraft::default().with_title(title.unwrap_or_default());
                draft.set_url(url);
                let draft = draft
                    .with_description(description.unwrap_or_default())
                    .with_tags(tags.unwrap_or_default());

                let mut store = self.bookmark_store()?;
                let bookmark = FormState::<Bookmark>::creating(draft).submit(&mut store)?;
                println!("Bookmark created with ID: {}", bookmark.id);
                if self.verbose {
                    println!("Title: {}", bookmark.title);
                }
                Ok(())
            }

            BookmarkAction::View { id, json } => {
                let store = self.bookmark_store()?;
                let bookmark = find(&store, &id)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(bookmark)?);
                } else {
                    print_bookmark(bookmark, true);
                }
                Ok(())
            }

            BookmarkAction::List(options) => {
                let store = self.bookmark_store()?;
                self.list_records(store.list(), &options, print_bookmark)
            }

            BookmarkAction::Edit {
                id,
                url,
                title,
                description,
                tags,
            } => {
                let mut store = self.bookmark_store()?;
                let mut form = FormState::editing(find(&store, &id)?);
                if let Some(draft) = form.draft_mut() {
                    if let Some(title) = title {
                        draft.title = title;
                    }
                    if let Some(url) = url {
                        draft.set_url(url);
                    }
                    if let Some(description) = description {
                        draft.description = description;
                    }
                    if let Some(tags) = tags {
                        draft.tags = tags;
                    }
                }
                let bookmark = form.submit(&mut store)?;
                println!("Bookmark {} updated successfully", bookmark.id);
                Ok(())
            }

            BookmarkAction::Delete { id, force } => {
                let mut store = self.bookmark_store()?;
                self.handle_delete(&mut store, &id, force, |bookmark: &Bookmark| {
                    format!("{} <{}>", bookmark.title, bookmark.url)
                })
            }

            BookmarkAction::Tags => print_tags(&distinct_tags(self.bookmark_store()?.list())),

            BookmarkAction::Suggest { url } => {
                match suggest_title(&url) {
                    Some(title) => println!("{}", title),
                    None => println!("No title could be derived from \"{}\"", url),
                }
                Ok(())
            }
        }
    }

    fn create_note(
        &self,
        title: String,
        content: Option<String>,
        file: Option<PathBuf>,
        tags: Option<String>,
        open_editor: bool,
    ) -> Result<()> {
        let content = self
            .resolve_content(content, file, open_editor, &title, "")?
            .unwrap_or_default();

        let mut store = self.note_store()?;
        let draft = NoteDraft::new(title, content, tags.unwrap_or_default());
        let note = FormState::<Note>::creating(draft).submit(&mut store)?;

        println!("Note created with ID: {}", note.id);
        Ok(())
    }

    fn edit_note(
        &self,
        id: String,
        title: Option<String>,
        content: Option<String>,
        file: Option<PathBuf>,
        tags: Option<String>,
        open_editor: bool,
    ) -> Result<()> {
        let mut store = self.note_store()?;
        let mut form = FormState::editing(find(&store, &id)?);

        if let Some(draft) = form.draft_mut() {
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(content) =
                self.resolve_content(content, file, open_editor, &draft.title, &draft.content)?
            {
                draft.content = content;
            }
            if let Some(tags) = tags {
                draft.tags = tags;
            }
        }

        let note = form.submit(&mut store)?;
        println!("Note {} updated successfully", note.id);
        Ok(())
    }

    /// Picks note content from exactly one of `--content`, `--file` or `--edit`.
    fn resolve_content(
        &self,
        content: Option<String>,
        file: Option<PathBuf>,
        open_editor: bool,
        title: &str,
        existing: &str,
    ) -> Result<Option<String>> {
        let sources = [content.is_some(), file.is_some(), open_editor];
        if sources.iter().filter(|given| **given).count() > 1 {
            return Err(ShelfError::ApplicationError {
                message: "Use only one of --content, --file and --edit".to_string(),
            });
        }

        if let Some(content) = content {
            return Ok(Some(content));
        }
        if let Some(path) = file {
            return read_content_from_file(&path).map(Some);
        }
        if open_editor {
            return editor::compose(&self.config, title, existing).map(Some);
        }
        Ok(None)
    }

    /// List records according to provided filters and options
    fn list_records<R: Record>(
        &self,
        records: &[R],
        options: &ListOptions,
        print_one: fn(&R, bool),
    ) -> Result<()> {
        let selection: TagSelection = options.tags.iter().collect();
        let matches = filter(records, &options.search, selection.as_slice());
        debug!(
            "{} of {} {} records match",
            matches.len(),
            records.len(),
            R::KIND
        );

        if options.json {
            println!("{}", serde_json::to_string_pretty(&matches)?);
            return Ok(());
        }

        if matches.is_empty() {
            println!("No {}s found matching the criteria.", R::KIND.to_lowercase());
            return Ok(());
        }

        // Use terminal width for formatting if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, record) in matches.iter().enumerate() {
            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }
            print_one(*record, options.detailed);
        }

        println!(
            "\nFound {} {}{}",
            matches.len(),
            R::KIND.to_lowercase(),
            if matches.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }

    fn handle_delete<R: Record>(
        &self,
        store: &mut CollectionStore<R, FileStorage>,
        id: &str,
        force: bool,
        describe: impl Fn(&R) -> String,
    ) -> Result<()> {
        let kind = R::KIND.to_lowercase();
        let Some(record) = store.get(id) else {
            println!("No {} with ID {}; nothing to delete.", kind, id);
            return Ok(());
        };

        if !force {
            println!("You are about to delete the following {}:", kind);
            println!("ID:     {}", record.id());
            println!("        {}", describe(record));
            print!("Are you sure you want to delete this {}? [y/N]: ", kind);
            stdout().flush()?;

            let mut input = String::new();
            stdin().read_line(&mut input)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        if let Some(removed) = store.delete(id)? {
            println!("{} '{}' has been deleted.", R::KIND, describe(&removed));
        }
        Ok(())
    }

    fn show_stats(&self) -> Result<()> {
        let notes = self.note_store()?.len();
        let bookmarks = self.bookmark_store()?.len();
        println!("Notes:     {}", notes);
        println!("Bookmarks: {}", bookmarks);
        Ok(())
    }

    fn handle_config(&self, show: bool, set: Option<String>, reset: bool) -> Result<()> {
        if reset {
            Config::default().save(&self.config_path)?;
            println!("Configuration reset to defaults");
            return Ok(());
        }

        if let Some(assignment) = set {
            let mut config = self.config.clone();
            config.set(&assignment)?;
            config.save(&self.config_path)?;
            info!("Applied setting {}", assignment);
            println!("Configuration updated");
            return Ok(());
        }

        if show || self.verbose {
            println!("Config file: {}", self.config_path.display());
        }
        println!("{}", serde_json::to_string_pretty(&self.config)?);
        Ok(())
    }
}

fn find<'a, R: Record>(store: &'a CollectionStore<R, FileStorage>, id: &str) -> Result<&'a R> {
    store.get(id).ok_or_else(|| ShelfError::NotFound {
        kind: R::KIND,
        id: id.to_string(),
    })
}

// Helper function for reading content from file
fn read_content_from_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(ShelfError::FileNotFound {
            file_path: path.display().to_string(),
        });
    }
    read_to_string(path).map_err(ShelfError::Io)
}

fn print_tags(tags: &std::collections::BTreeSet<String>) -> Result<()> {
    if tags.is_empty() {
        println!("No tags in use.");
    }
    for tag in tags {
        println!("{}", tag);
    }
    Ok(())
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_note(note: &Note, detailed: bool) {
    println!(
        "ID: {} | Updated: {}",
        note.id,
        note.updated_at.format("%Y-%m-%d %H:%M")
    );
    println!("Title: {}", console::style(&note.title).bold());
    if !note.tags.is_empty() {
        println!("Tags: {}", console::style(format_tags(&note.tags)).cyan());
    }

    if detailed {
        println!("\n{}", note.content);
    } else {
        let preview = content_preview(&note.content, 100);
        if !preview.is_empty() {
            println!("\n{}", preview);
        }
    }
}

fn print_bookmark(bookmark: &Bookmark, detailed: bool) {
    println!(
        "ID: {} | Updated: {}",
        bookmark.id,
        bookmark.updated_at.format("%Y-%m-%d %H:%M")
    );
    println!(
        "Title: {} ({})",
        console::style(&bookmark.title).bold(),
        display_host(&bookmark.url)
    );
    println!("URL: {}", console::style(&bookmark.url).underlined());
    if !bookmark.tags.is_empty() {
        println!("Tags: {}", console::style(format_tags(&bookmark.tags)).cyan());
    }
    if !bookmark.description.is_empty() {
        if detailed {
            println!("\n{}", bookmark.description);
        } else {
            println!("\n{}", content_preview(&bookmark.description, 100));
        }
    }
}

/// First non-empty line, cut to `max_chars` characters.
fn content_preview(content: &str, max_chars: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_on_char_boundaries() {
        assert_eq!(content_preview("\n\n  \nhello\nworld", 100), "hello");
        assert_eq!(content_preview("ééééé", 3), "ééé...");
        assert_eq!(content_preview("", 10), "");
    }

    #[test]
    fn tags_render_with_hashes() {
        assert_eq!(format_tags(&["a".into(), "b".into()]), "#a #b");
    }
}
