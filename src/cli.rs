//! CLI schema for the catalog-browser binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Browse a hierarchical REST catalog from the terminal.
#[derive(Parser, Debug)]
#[command(name = "catalog-browser", version, about)]
pub struct Cli {
    /// Config file (defaults to the per-user config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog root URL, overriding the config file
    #[arg(long, global = true)]
    pub api_root: Option<String>,

    /// Localization table (JSON or TOML), overriding the config file
    #[arg(long, global = true)]
    pub locale: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the top-level categories
    Categories,
    /// Load and list the items of a category
    Expand {
        category: String,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Show one item, resolving its cross-references
    Show(ShowArgs),
    /// Show item counts per category
    Stats,
    /// Interactive session reading commands from stdin
    Browse,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ShowArgs {
    /// Collection key, e.g. `people`
    #[arg(long = "type", requires = "id", conflicts_with = "location")]
    pub item_type: Option<String>,

    /// Item identifier within the collection
    #[arg(long, requires = "item_type")]
    pub id: Option<String>,

    /// A location carrying `type` and `id` query parameters
    #[arg(long, required_unless_present = "item_type")]
    pub location: Option<String>,
}

/// One line of input in `browse` mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Expand(String),
    More(String),
    Pick { item_type: String, id: String },
    Back,
    Forward,
    Stats,
    Show,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb, args.as_slice()) {
            ("expand", [category]) => Self::Expand(category.to_string()),
            ("more", [category]) => Self::More(category.to_string()),
            ("pick", [item_type, id]) => Self::Pick {
                item_type: item_type.to_string(),
                id: id.to_string(),
            },
            ("back", []) => Self::Back,
            ("forward", []) => Self::Forward,
            ("stats", []) => Self::Stats,
            ("show", []) => Self::Show,
            ("help", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            _ => return Err(format!("unrecognized command: {}", line.trim())),
        };
        Ok(Some(command))
    }
}

pub const BROWSE_HELP: &str = "\
commands:
  expand <category>    toggle a category, loading its first page
  more <category>      load the next page of a category
  pick <type> <id>     show an item
  back | forward       move through history
  stats                item counts per category
  show                 print the current view
  quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_by_type_and_id() {
        let cli = Cli::try_parse_from([
            "catalog-browser",
            "show",
            "--type",
            "people",
            "--id",
            "1",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Show(ShowArgs {
                item_type: Some("people".into()),
                id: Some("1".into()),
                location: None,
            })
        );
    }

    #[test]
    fn test_show_requires_a_target() {
        assert!(Cli::try_parse_from(["catalog-browser", "show"]).is_err());
        assert!(Cli::try_parse_from(["catalog-browser", "show", "--type", "people"]).is_err());
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "catalog-browser",
            "expand",
            "people",
            "--pages",
            "3",
            "--api-root",
            "https://example.test/api/",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Expand {
                category: "people".into(),
                pages: 3
            }
        );
        assert_eq!(cli.api_root.as_deref(), Some("https://example.test/api/"));
    }

    #[test]
    fn test_browse_command_parsing() {
        assert_eq!(
            BrowseCommand::parse("pick people 1"),
            Ok(Some(BrowseCommand::Pick {
                item_type: "people".into(),
                id: "1".into()
            }))
        );
        assert_eq!(
            BrowseCommand::parse("  expand planets "),
            Ok(Some(BrowseCommand::Expand("planets".into())))
        );
        assert_eq!(BrowseCommand::parse("   "), Ok(None));
        assert!(BrowseCommand::parse("pick people").is_err());
        assert!(BrowseCommand::parse("fly").is_err());
    }
}
