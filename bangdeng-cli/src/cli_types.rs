//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use bangdeng_etl::DedupKey;
use bangdeng_source::UnknownCategoryPolicy;

use crate::config::{Backend, StoreFlags};

#[derive(Parser)]
#[command(name = "bangdeng")]
#[command(about = "Collect, clean and upload dengue facility locations", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Config file (default: <config dir>/bangdeng/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Document store selection, shared by every command.
#[derive(Args, Clone, Debug)]
pub(crate) struct StoreArgs {
    /// Document store backend
    #[arg(long = "store", global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Path to the SQLite store
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Collection to read and write (default: locations)
    #[arg(long, global = true)]
    pub collection: Option<String>,
}

impl From<StoreArgs> for StoreFlags {
    fn from(args: StoreArgs) -> Self {
        Self {
            backend: args.backend,
            db: args.db,
            collection: args.collection,
        }
    }
}

/// How to treat records whose type is not recognized.
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub(crate) enum FallbackArg {
    /// Label them hospital
    #[default]
    Hospital,
    /// Cycle through the five canonical types by row number
    Cyclic,
    /// Drop them
    Reject,
}

impl From<FallbackArg> for UnknownCategoryPolicy {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Hospital => Self::Hospital,
            FallbackArg::Cyclic => Self::Cyclic,
            FallbackArg::Reject => Self::Reject,
        }
    }
}

/// Which fields identify a duplicate facility.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum DedupArg {
    #[default]
    NameAddress,
    Name,
    /// Keep every record
    None,
}

impl DedupArg {
    pub(crate) fn key(self) -> Option<DedupKey> {
        match self {
            Self::NameAddress => Some(DedupKey::NameAddress),
            Self::Name => Some(DedupKey::Name),
            Self::None => None,
        }
    }
}

/// Arguments for commands that load a facility file.
#[derive(Args, Clone, Debug)]
pub(crate) struct LoadArgs {
    /// Facility file with a name,address,lat,lng,type header
    pub csv: PathBuf,

    /// What to do with unrecognized types
    #[arg(long, value_enum, default_value_t = FallbackArg::Hospital)]
    pub fallback: FallbackArg,

    /// Drop repeated facilities before writing
    #[arg(long, value_enum, default_value_t = DedupArg::NameAddress)]
    pub dedup: DedupArg,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List the countries that can be collected
    Countries,

    /// Collect facilities for a country from OpenStreetMap
    Collect {
        /// Country name, key or ISO code (e.g., bangladesh, BD)
        country: String,

        /// Output file (default: <country>_facilities.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep only facilities whose tags match a dengue-relevant category
        #[arg(long)]
        dengue_only: bool,

        /// Overpass API endpoint
        #[arg(long)]
        url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Replace unrecognized types in a facility file (keeps a _backup copy)
    Retype {
        /// Facility file to rewrite
        csv: PathBuf,
    },

    /// Upload a facility file to the store
    Upload {
        #[command(flatten)]
        load: LoadArgs,

        /// Show what would be uploaded without writing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Remove stored duplicates, keeping the first of each
    Dedup {
        /// Show duplicates without deleting them
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Which fields identify a duplicate
        #[arg(long, value_enum, default_value_t = KeyArg::NameAddress)]
        key: KeyArg,
    },

    /// Check stored documents for missing fields, bad coordinates and unknown types
    Validate,

    /// Delete every document in the collection
    Purge {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Clean duplicates, upload a facility file, then validate
    Sync {
        #[command(flatten)]
        load: LoadArgs,

        /// Repair the file's types before uploading
        #[arg(long)]
        retype: bool,
    },

    /// Show resolved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Stored-duplicate key (no "none": that would be a no-op).
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub(crate) enum KeyArg {
    #[default]
    NameAddress,
    Name,
}

impl From<KeyArg> for DedupKey {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::NameAddress => Self::NameAddress,
            KeyArg::Name => Self::Name,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn upload_flags_parse() {
        let cli = Cli::try_parse_from([
            "bangdeng",
            "--store",
            "sqlite",
            "upload",
            "data.csv",
            "--fallback",
            "cyclic",
            "--dedup",
            "none",
            "-n",
        ])
        .unwrap();
        assert_eq!(cli.store.backend, Some(Backend::Sqlite));
        match cli.command {
            Commands::Upload { load, dry_run } => {
                assert!(dry_run);
                assert_eq!(load.csv, PathBuf::from("data.csv"));
                assert!(matches!(
                    UnknownCategoryPolicy::from(load.fallback),
                    UnknownCategoryPolicy::Cyclic
                ));
                assert_eq!(load.dedup.key(), None);
            }
            _ => panic!("expected upload"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bangdeng", "validate", "--collection", "test", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.store.collection.as_deref(), Some("test"));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(Cli::try_parse_from(["bangdeng", "--store", "mongo", "validate"]).is_err());
    }
}
