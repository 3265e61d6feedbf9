use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use kotoba_core::query::{Extent, Field};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Build a store from a JMdict document and publish it.
    Build(BuildArgs),
    /// Look up entries by kanji, reading or gloss.
    Search(SearchArgs),
    /// Print entries by sequence number.
    Show(ShowArgs),
    /// List the abbreviations stored with the dictionary.
    Abbrevs(AbbrevsArgs),
    /// Show store version and row counts.
    Info,
}

#[derive(Clone, Debug, Args)]
pub struct BuildArgs {
    /// JMdict XML document (defaults to `store.source` from config)
    pub source: Option<PathBuf>,
    /// Where to publish the store (defaults to `--db`, then `store.path`)
    #[arg(long)]
    pub target: Option<PathBuf>,
    /// Entries written per transaction (defaults to `ingest.batch_size`)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

/// Field selector; `auto` lets the cascade choose.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum FieldChoice {
    #[default]
    Auto,
    Kanji,
    Reading,
    Gloss,
}

impl FieldChoice {
    #[must_use]
    pub const fn field(self) -> Option<Field> {
        match self {
            Self::Auto => None,
            Self::Kanji => Some(Field::Kanji),
            Self::Reading => Some(Field::Reading),
            Self::Gloss => Some(Field::Gloss),
        }
    }
}

/// Extent selector; `auto` lets the cascade choose.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ExtentChoice {
    #[default]
    Auto,
    Whole,
    Word,
    Partial,
}

impl ExtentChoice {
    #[must_use]
    pub const fn extent(self) -> Option<Extent> {
        match self {
            Self::Auto => None,
            Self::Whole => Some(Extent::Whole),
            Self::Word => Some(Extent::Word),
            Self::Partial => Some(Extent::Partial),
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    pub query: String,
    #[arg(long, value_enum, default_value_t = FieldChoice::Auto)]
    pub field: FieldChoice,
    #[arg(long, value_enum, default_value_t = ExtentChoice::Auto)]
    pub extent: ExtentChoice,
    /// Match case exactly (default: only when the query has uppercase letters)
    #[arg(long, conflicts_with = "case_insensitive")]
    pub case_sensitive: bool,
    /// Ignore case even when the query has uppercase letters
    #[arg(long)]
    pub case_insensitive: bool,
    /// Treat the query as a regular expression
    #[arg(long)]
    pub regex: bool,
    /// Only entries marked frequent
    #[arg(long)]
    pub frequent: bool,
    /// Print matching sequence numbers without entry bodies
    #[arg(long)]
    pub ids_only: bool,
}

impl SearchArgs {
    /// Explicit case sensitivity, if any flag was given.
    #[must_use]
    pub const fn case_sensitivity(&self) -> Option<bool> {
        if self.case_sensitive {
            Some(true)
        } else if self.case_insensitive {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    #[arg(required = true)]
    pub ent_seqs: Vec<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct AbbrevsArgs {
    /// Only abbreviations the built-in catalogue did not know
    #[arg(long)]
    pub provisional: bool,
}
