use clap::{Args, Parser, Subcommand};
use portal_config::{SourceMode, ViewMode};
use portal_core::{DateBucket, Field, FilterState, RecordKind, Selection};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Administration console for the support portal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data source: rest, stub or fallback
    #[arg(long, global = true)]
    pub source: Option<SourceMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Support tickets
    #[command(subcommand)]
    Tickets(RecordCommands),

    /// Educational content (tutorials, videos, articles)
    #[command(subcommand)]
    Contents(RecordCommands),

    /// Portal users
    #[command(subcommand)]
    Users(RecordCommands),

    /// Saved view preferences
    #[command(subcommand)]
    Prefs(PrefsCommands),

    /// Interactive list view
    Ui {
        /// tickets, contents or users
        view: RecordKind,
    },
}

#[derive(Subcommand)]
pub enum RecordCommands {
    /// List records, filtered and paginated
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Page to show (1-indexed)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Records per page (default: saved preference)
        #[arg(long)]
        page_size: Option<usize>,

        /// list or grid (default: saved preference)
        #[arg(long)]
        view: Option<ViewMode>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count filtered records per status
    Stats {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long)]
        json: bool,
    },

    /// Create a record from `key=value` fields (API names, e.g. subject=..)
    Create {
        #[arg(short, long = "field", value_parser = parse_field, required = true)]
        fields: Vec<(String, String)>,
    },

    /// Change fields of an existing record
    Update {
        /// Record ID
        id: String,

        /// `key=value` using API names (e.g. status=resuelto, assigned_to=u-2)
        #[arg(short, long = "field", value_parser = parse_field, required = true)]
        fields: Vec<(String, String)>,
    },

    /// Delete a record
    Delete {
        /// Record ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show saved preferences
    Show,

    /// Save the page size of a view
    SetPageSize { view: RecordKind, size: usize },

    /// Save the view mode (list or grid) of a view
    SetViewMode { view: RecordKind, mode: ViewMode },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Status value, or `all`
    #[arg(long)]
    pub status: Option<Selection>,

    /// Ticket priority (alta, media, baja)
    #[arg(long)]
    pub priority: Option<Selection>,

    #[arg(long)]
    pub category: Option<Selection>,

    #[arg(long)]
    pub department: Option<Selection>,

    /// Operator id, `current_user` or `unassigned`
    #[arg(long)]
    pub assignee: Option<Selection>,

    /// Content type (tutorial, video, articulo)
    #[arg(long = "type")]
    pub kind: Option<Selection>,

    /// User role (admin, soporte, cliente)
    #[arg(long)]
    pub role: Option<Selection>,

    /// today, yesterday, week, last_week, month, last_month, quarter
    #[arg(long, default_value_t = DateBucket::All)]
    pub date: DateBucket,

    /// Case-insensitive text search
    #[arg(long, default_value = "")]
    pub search: String,
}

impl FilterArgs {
    pub fn to_state(&self) -> FilterState {
        let mut state = FilterState::new();
        let selections = [
            (Field::Status, &self.status),
            (Field::Priority, &self.priority),
            (Field::Category, &self.category),
            (Field::Department, &self.department),
            (Field::Assignee, &self.assignee),
            (Field::Kind, &self.kind),
            (Field::Role, &self.role),
        ];
        for (field, selection) in selections {
            if let Some(selection) = selection {
                state.set_selection(field, selection.clone());
            }
        }
        state.set_date(self.date);
        state.set_search(self.search.clone());
        state
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
