use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `kotoba` binary.
#[derive(Debug, Parser)]
#[command(
    name = "kotoba",
    version,
    about = "kotoba - JMdict dictionary store and lookup"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dictionary store path (defaults to `store.path` from config)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::root_commands::{ExtentChoice, FieldChoice};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "kotoba", "--format", "raw", "--limit", "10", "--verbose", "info",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Info));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["kotoba", "abbrevs", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Abbrevs(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["kotoba", "--format", "table", "info"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn search_defaults_to_auto_cascade() {
        let cli = Cli::try_parse_from(["kotoba", "search", "aikido"]).expect("cli should parse");
        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query, "aikido");
        assert_eq!(args.field, FieldChoice::Auto);
        assert_eq!(args.extent, ExtentChoice::Auto);
        assert_eq!(args.case_sensitivity(), None);
        assert!(!args.regex);
    }

    #[test]
    fn search_accepts_explicit_condition() {
        let cli = Cli::try_parse_from([
            "kotoba",
            "search",
            "気",
            "--field",
            "kanji",
            "--extent",
            "partial",
            "--case-sensitive",
            "--frequent",
        ])
        .expect("cli should parse");
        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.field, FieldChoice::Kanji);
        assert_eq!(args.extent, ExtentChoice::Partial);
        assert_eq!(args.case_sensitivity(), Some(true));
        assert!(args.frequent);
    }

    #[test]
    fn case_flags_conflict() {
        let parsed = Cli::try_parse_from([
            "kotoba",
            "search",
            "x",
            "--case-sensitive",
            "--case-insensitive",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn show_requires_at_least_one_id() {
        assert!(Cli::try_parse_from(["kotoba", "show"]).is_err());
        let cli = Cli::try_parse_from(["kotoba", "show", "1000000", "1000010"])
            .expect("cli should parse");
        let Commands::Show(args) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(args.ent_seqs, vec![1_000_000, 1_000_010]);
    }

    #[test]
    fn build_source_and_target_are_optional() {
        let cli = Cli::try_parse_from(["kotoba", "build"]).expect("cli should parse");
        let Commands::Build(args) = cli.command else {
            panic!("expected build command");
        };
        assert!(args.source.is_none());
        assert!(args.target.is_none());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["kotoba", "--db", "/tmp/jmdict.sqlite", "info"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some(Path::new("/tmp/jmdict.sqlite")));
    }
}
