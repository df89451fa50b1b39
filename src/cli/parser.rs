use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for tripdeck
/// CLI application to plan trips, daily schedules and budgets with SQLite
#[derive(Parser)]
#[command(
    name = "tripdeck",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal travel itinerary planner: trips, day plans and budgets over SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export the schedule of a trip
    Export {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "DAY",
            allow_negative_numbers = true,
            help = "Export a single day of the window instead of the whole trip"
        )]
        day: Option<i64>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Create, list, edit or delete trips
    Trip {
        #[command(subcommand)]
        action: TripAction,
    },

    /// Edit the cities, stay and check-in/out of one day
    Day {
        #[command(subcommand)]
        action: DayAction,
    },

    /// Manage stays across days
    Stay {
        #[command(subcommand)]
        action: StayAction,
    },

    /// Manage schedule items
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Show the day-by-day timetable of a trip
    Timetable {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,

        #[arg(long, help = "Show every day of the window, blank days included")]
        all: bool,

        #[arg(long, help = "Keep running and re-render on every change")]
        watch: bool,
    },

    /// Show the budget report of a trip
    Budget {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,
    },
}

#[derive(Subcommand)]
pub enum TripAction {
    /// Create a new trip
    Add {
        #[arg(long, value_name = "TITLE")]
        title: String,

        #[arg(long = "from", value_name = "YYYY-MM-DD")]
        from: String,

        #[arg(long = "to", value_name = "YYYY-MM-DD")]
        to: String,
    },

    /// List all trips
    List,

    /// Show one trip and its day window
    Show {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,
    },

    /// Edit the title or dates of a trip
    Set {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,

        #[arg(long, value_name = "TITLE")]
        title: Option<String>,

        #[arg(long = "from", value_name = "YYYY-MM-DD")]
        from: Option<String>,

        #[arg(long = "to", value_name = "YYYY-MM-DD")]
        to: Option<String>,
    },

    /// Delete a trip with all its day info and schedule items
    Del {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Add or remove buffer days before the trip
    Pre {
        #[command(subcommand)]
        action: BufferAction,
    },

    /// Add or remove buffer days after the trip
    Post {
        #[command(subcommand)]
        action: BufferAction,
    },

    /// Set the day number the timetable starts from
    ViewFrom {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,

        #[arg(long, value_name = "DAY", allow_negative_numbers = true)]
        day: i64,
    },
}

#[derive(Subcommand)]
pub enum BufferAction {
    /// Add one buffer day
    Add {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,
    },

    /// Remove the outermost buffer day, deleting whatever it holds
    Del {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum DayAction {
    /// Create or update the info row of one day
    Set {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,

        #[arg(long, value_name = "DAY", allow_negative_numbers = true)]
        day: i64,

        #[arg(
            long,
            value_name = "LIST",
            help = "Comma-separated city list; pass an empty string to clear"
        )]
        cities: Option<String>,

        #[arg(
            long,
            value_name = "NAME",
            help = "Accommodation name for the night; empty string clears"
        )]
        stay: Option<String>,

        #[arg(
            long = "check-in",
            value_name = "\"DAY HH:MM\"",
            help = "Check-in day and time; empty string clears"
        )]
        check_in: Option<String>,

        #[arg(
            long = "check-out",
            value_name = "\"DAY HH:MM\"",
            help = "Check-out day and time; empty string clears"
        )]
        check_out: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum StayAction {
    /// Rename a stay on every day row and matching schedule item
    Rename {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,

        #[arg(long, value_name = "NAME")]
        old: String,

        #[arg(long, value_name = "NAME")]
        new: String,
    },
}

#[derive(Subcommand)]
pub enum PlanAction {
    /// Add a schedule item to a day
    Add {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,

        #[arg(long, value_name = "DAY", allow_negative_numbers = true)]
        day: i64,

        #[arg(long, value_name = "HH:MM")]
        time: String,

        #[arg(long, value_name = "TITLE")]
        title: String,

        #[arg(
            long,
            value_name = "NAME",
            help = "other, transport, sightseeing, meal, accommodation or prep (default: other)"
        )]
        category: Option<String>,

        #[arg(long = "end", value_name = "HH:MM")]
        end: Option<String>,

        #[arg(long, value_name = "X.YY")]
        amount: Option<String>,

        #[arg(long, value_name = "TEXT")]
        note: Option<String>,

        #[command(flatten)]
        details: DetailFlags,
    },

    /// List the schedule items of a trip
    List {
        #[arg(long = "trip", value_name = "ID")]
        trip: i64,

        #[arg(long, value_name = "DAY", allow_negative_numbers = true)]
        day: Option<i64>,
    },

    /// Edit a schedule item
    Edit {
        #[arg(long, value_name = "ID")]
        id: i64,

        #[arg(long, value_name = "DAY", allow_negative_numbers = true)]
        day: Option<i64>,

        #[arg(long, value_name = "HH:MM")]
        time: Option<String>,

        #[arg(long, value_name = "TITLE")]
        title: Option<String>,

        #[arg(
            long,
            value_name = "NAME",
            help = "Change the category; detail flags then refill the new one"
        )]
        category: Option<String>,

        #[arg(long = "end", value_name = "HH:MM")]
        end: Option<String>,

        #[arg(long, value_name = "X.YY")]
        amount: Option<String>,

        #[arg(long, value_name = "TEXT")]
        note: Option<String>,

        #[command(flatten)]
        details: DetailFlags,
    },

    /// Delete a schedule item
    Del {
        #[arg(long, value_name = "ID")]
        id: i64,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

/// Category-specific flags shared by `plan add` and `plan edit`. Which of
/// them are accepted depends on the item's category.
#[derive(Args, Debug, Default)]
pub struct DetailFlags {
    #[arg(long, value_name = "PLACE", help = "Place of the activity")]
    pub place: Option<String>,

    #[arg(long, value_name = "MODE", help = "Transport mode (train, flight, ...)")]
    pub mode: Option<String>,

    #[arg(long = "from", value_name = "PLACE", help = "Transport origin")]
    pub from: Option<String>,

    #[arg(long = "to", value_name = "PLACE", help = "Transport destination")]
    pub to: Option<String>,

    #[arg(
        long,
        value_name = "\"DAY HH:MM\"",
        help = "Transport arrival day and time"
    )]
    pub arrives: Option<String>,

    #[arg(long, value_name = "KIND", help = "Meal kind (breakfast, lunch, dinner)")]
    pub kind: Option<String>,

    #[arg(
        long = "check-in",
        value_name = "\"DAY HH:MM\"",
        help = "Accommodation check-in day and time"
    )]
    pub check_in: Option<String>,

    #[arg(
        long = "check-out",
        value_name = "\"DAY HH:MM\"",
        help = "Accommodation check-out day and time"
    )]
    pub check_out: Option<String>,

    #[arg(long = "booking-ref", value_name = "REF", help = "Transport booking reference")]
    pub booking_ref: Option<String>,

    #[arg(long = "booked-via", value_name = "SITE", help = "Accommodation booking channel")]
    pub booked_via: Option<String>,
}
