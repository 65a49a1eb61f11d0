//! Shared types for the kbshelf application: the result alias and the
//! command-line subcommands.
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::ShelfError;

/// A specialized Result type for kbshelf operations.
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Available subcommands for the kbshelf application
#[derive(Subcommand)]
pub enum Commands {
    /// Create, search and manage notes
    Note {
        #[clap(subcommand)]
        action: NoteAction,
    },

    /// Create, search and manage bookmarks
    Bookmark {
        #[clap(subcommand)]
        action: BookmarkAction,
    },

    /// Show how many notes and bookmarks are stored
    Stats,

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (KEY=VALUE)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}

/// Search and tag filters shared by the list commands
#[derive(Args, Debug, Default)]
pub struct ListOptions {
    /// Case-insensitive text to look for
    #[clap(short, long, default_value = "")]
    pub search: String,

    /// Only show records carrying this tag (repeatable, any of them matches)
    #[clap(short = 't', long = "tag")]
    pub tags: Vec<String>,

    /// Format output as JSON
    #[clap(short, long)]
    pub json: bool,

    /// Show full content instead of a preview
    #[clap(short, long)]
    pub detailed: bool,
}

#[derive(Subcommand)]
pub enum NoteAction {
    /// Create a new note
    Create {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: String,

        /// Content of the note
        #[clap(short, long)]
        content: Option<String>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,

        /// Tags to associate with the note (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,

        /// Path to a file containing the note's content
        #[clap(short, long)]
        file: Option<PathBuf>,
    },

    /// View a note by ID
    View {
        /// ID of the note to view
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List notes, optionally filtered by text and tags
    List(ListOptions),

    /// Edit an existing note
    Edit {
        /// ID of the note to edit
        id: String,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,

        /// Replacement tags (comma-separated, empty string clears them)
        #[clap(short = 't', long)]
        tags: Option<String>,

        /// Path to a file containing the new note content
        #[clap(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// List every tag used by notes
    Tags,
}

#[derive(Subcommand)]
pub enum BookmarkAction {
    /// Save a new bookmark
    Add {
        /// Absolute URL to save
        url: String,

        /// Title; derived from the domain when omitted
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// Optional description
        #[clap(short, long)]
        description: Option<String>,

        /// Tags to associate with the bookmark (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,
    },

    /// View a bookmark by ID
    View {
        /// ID of the bookmark to view
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List bookmarks, optionally filtered by text and tags
    List(ListOptions),

    /// Edit an existing bookmark
    Edit {
        /// ID of the bookmark to edit
        id: String,

        /// New URL
        #[clap(short, long)]
        url: Option<String>,

        /// New title
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New description
        #[clap(short, long)]
        description: Option<String>,

        /// Replacement tags (comma-separated, empty string clears them)
        #[clap(short = 't', long)]
        tags: Option<String>,
    },

    /// Delete a bookmark by ID
    Delete {
        /// ID of the bookmark to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// List every tag used by bookmarks
    Tags,

    /// Print the title that would be derived from a URL
    Suggest {
        url: String,
    },
}
