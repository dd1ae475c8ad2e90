//! Command dispatch: config → settings → session → command → stdout.

use std::io::Write;

use anyhow::{bail, Context};
use cb_app::CatalogSession;
use cb_core::navigation::{location_with_selection, selection_from_location};
use cb_core::{ItemKey, ItemType};
use cb_infra::InMemoryHistory;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use super::config::load_config_or_default;
use super::wiring::{resolve_settings, wire_session, Settings};
use crate::cli::{BrowseCommand, Cli, Command, ShowArgs, BROWSE_HELP};
use crate::view::{render_categories, render_selection};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config_or_default(cli.config.as_deref())?;
    if let Some(api_root) = cli.api_root {
        config.api_root = api_root;
    }
    if let Some(locale) = cli.locale {
        config.locale_table_path = locale;
    }
    let settings = resolve_settings(&config);

    let initial_location = match &cli.command {
        Command::Show(args) => show_location(&settings, args)?,
        _ => settings.base_location.clone(),
    };
    let (session, history) = wire_session(&settings, initial_location).await?;

    match cli.command {
        Command::Categories => {
            load_root(&session).await?;
            print!("{}", render_categories(&session.store().snapshot().categories));
        }
        Command::Expand { category, pages } => {
            load_root(&session).await?;
            expand(&session, &ItemType::new(category), pages).await?;
            print!("{}", render_categories(&session.store().snapshot().categories));
        }
        Command::Show(_) => {
            if let Err(err) = session.start().await {
                warn!(error = %err, "catalog root unavailable");
            }
            session.wait_idle().await;
            let selection = session.store().snapshot().selection;
            if !selection.visible {
                bail!("item could not be loaded");
            }
            print!("{}", render_selection(&selection));
        }
        Command::Stats => {
            load_root(&session).await?;
            session.statistics().show().await;
            print!("{}", render_selection(&session.store().snapshot().selection));
        }
        Command::Browse => browse(&session, &history).await?,
    }

    Ok(())
}

/// The starting location for `show`: either the given one or the base
/// location with `type`/`id` set.
fn show_location(settings: &Settings, args: &ShowArgs) -> anyhow::Result<String> {
    let location = match (&args.location, &args.item_type, &args.id) {
        (Some(location), _, _) => location.clone(),
        (None, Some(item_type), Some(id)) => location_with_selection(
            &settings.base_location,
            &ItemKey::new(item_type.as_str(), id.as_str()),
        )
        .context("invalid base location")?,
        _ => bail!("either --location or both --type and --id are required"),
    };

    if selection_from_location(&location).is_none() {
        bail!("location carries no type/id selection: {location}");
    }
    Ok(location)
}

async fn load_root(session: &CatalogSession) -> anyhow::Result<()> {
    session
        .start()
        .await
        .context("failed to load the catalog root")?;
    Ok(())
}

async fn expand(session: &CatalogSession, category: &ItemType, pages: usize) -> anyhow::Result<()> {
    session
        .tree()
        .toggle(category)
        .await
        .with_context(|| format!("failed to expand {category}"))?;

    for _ in 1..pages {
        let next = session
            .tree()
            .load_next_page(category)
            .await
            .with_context(|| format!("failed to load next page of {category}"))?;
        if next.is_none() {
            break;
        }
    }
    Ok(())
}

async fn browse(session: &CatalogSession, history: &InMemoryHistory) -> anyhow::Result<()> {
    load_root(session).await?;
    println!("{BROWSE_HELP}");
    print!("{}", render_categories(&session.store().snapshot().categories));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match BrowseCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            BrowseCommand::Expand(category) => {
                if let Err(err) = session.tree().toggle(&ItemType::new(category)).await {
                    eprintln!("error: {err}");
                }
                print!("{}", render_categories(&session.store().snapshot().categories));
            }
            BrowseCommand::More(category) => {
                match session.tree().load_next_page(&ItemType::new(category)).await {
                    Ok(Some(_)) => {}
                    Ok(None) => println!("no more pages"),
                    Err(err) => eprintln!("error: {err}"),
                }
                print!("{}", render_categories(&session.store().snapshot().categories));
            }
            BrowseCommand::Pick { item_type, id } => {
                session.navigation().pick(ItemKey::new(item_type, id));
                print_selection(session).await;
            }
            BrowseCommand::Back => match history.back() {
                Some(_) => {
                    session.navigation().on_location_changed();
                    print_selection(session).await;
                }
                None => println!("already at the oldest entry"),
            },
            BrowseCommand::Forward => match history.forward() {
                Some(_) => {
                    session.navigation().on_location_changed();
                    print_selection(session).await;
                }
                None => println!("already at the newest entry"),
            },
            BrowseCommand::Stats => {
                session.statistics().show().await;
                print_selection(session).await;
            }
            BrowseCommand::Show => {
                print!("{}", render_categories(&session.store().snapshot().categories));
                print_selection(session).await;
            }
            BrowseCommand::Help => println!("{BROWSE_HELP}"),
            BrowseCommand::Quit => break,
        }
    }

    info!("browse session ended");
    Ok(())
}

async fn print_selection(session: &CatalogSession) {
    session.wait_idle().await;
    print!("{}", render_selection(&session.store().snapshot().selection));
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}
