//! CLI actions.
//!
//! Each action runs the contexts it needs in-process against the configured
//! store, so a `copy` travels the same capture → relay → engine → store path
//! a real page copy would.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;

use tc_app::usecases::relay::{CaptureOutcome, InsertOutcome, PlaybackOutcome};
use tc_core::clipboard::HistoryRow;
use tc_core::config::AppConfig;
use tc_core::page::{FocusedElement, TextInputState};
use tc_core::{HostCommand, ItemId};
use tc_infra::page::{MemoryClipboard, SimulatedPage};

use crate::bootstrap::SharedServices;
use crate::contexts::{BackgroundContext, ContentContext, Notice, PopupSession};

const INSERT_WAIT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FocusTarget {
    Textarea,
    /// A text `<input>`
    Input,
    /// Nothing editable; the paste goes through the clipboard
    None,
}

pub struct ListArgs {
    pub favorites: bool,
    pub search: Option<String>,
    pub json: bool,
}

pub struct PasteArgs {
    pub focus: FocusTarget,
    pub value: String,
}

async fn services(config: &AppConfig) -> Result<SharedServices> {
    SharedServices::from_config(config)
        .await
        .with_context(|| format!("Failed to open store: {}", config.store_path.display()))
}

async fn open_popup(config: &AppConfig) -> Result<PopupSession> {
    let services = services(config).await?;
    Ok(PopupSession::open(&services, Arc::new(MemoryClipboard::new())).await)
}

fn report(notices: Vec<Notice>) {
    for notice in notices {
        match notice {
            Notice::Info(text) => println!("{text}"),
            Notice::Error(text) => eprintln!("{text}"),
        }
    }
}

fn format_row(row: &HistoryRow) -> String {
    let marker = if row.favorite { "*" } else { " " };
    let when = row
        .captured_at
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!("{marker} {}  {when}  {}", row.id, row.text);
    if let Some(url) = &row.jump_url {
        line.push_str(&format!("  <{url}>"));
    }
    line
}

pub async fn copy(config: &AppConfig, text: &str, url: &str) -> Result<()> {
    let services = services(config).await?;
    let background = BackgroundContext::start(&services)
        .await
        .context("Failed to start background context")?;
    let history = background.history().clone();

    let tab = services.tabs.open()?;
    let clipboard = Arc::new(MemoryClipboard::new());
    let page = Arc::new(SimulatedPage::new(url, clipboard.clone()));
    page.select(text);
    let content = ContentContext::start(&services, tab, page, clipboard);

    let outcome = content.copy(None).await;
    content.shutdown().await;
    background.shutdown().await;

    match outcome {
        Some(CaptureOutcome::Sent) => match history.latest().await {
            Some(item) => println!("{}  {}", item.id, item.text),
            None => println!("captured"),
        },
        Some(CaptureOutcome::NothingToSend) => println!("nothing to capture"),
        Some(CaptureOutcome::Dropped(err)) => bail!("capture was dropped: {err}"),
        None => bail!("content context stopped before the copy was handled"),
    }
    Ok(())
}

pub async fn list(config: &AppConfig, args: ListArgs) -> Result<()> {
    let mut popup = open_popup(config).await?;
    if args.favorites {
        popup.show_favorites().await;
    }
    let view = popup.search(args.search.as_deref().unwrap_or("")).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view.history.rows)?);
    } else if let Some(placeholder) = view.placeholder {
        println!("{placeholder}");
    } else {
        for row in &view.history.rows {
            println!("{}", format_row(row));
        }
    }
    Ok(())
}

pub async fn delete(config: &AppConfig, ids: Vec<String>) -> Result<()> {
    let mut popup = open_popup(config).await?;
    let ids: Vec<ItemId> = ids.into_iter().map(ItemId::from).collect();

    let removed = match ids.as_slice() {
        [id] => usize::from(popup.delete(id).await?),
        _ => {
            for id in &ids {
                popup.set_selected(id, true);
            }
            popup.delete_selected().await?
        }
    };

    report(popup.take_notices());
    println!("deleted {removed} item(s)");
    Ok(())
}

pub async fn favorite(config: &AppConfig, id: String) -> Result<()> {
    let mut popup = open_popup(config).await?;
    match popup.toggle_favorite(&ItemId::from(id.clone())).await? {
        Some(true) => println!("{id} marked as favorite"),
        Some(false) => println!("{id} unmarked"),
        None => bail!("no item with id {id}"),
    }
    Ok(())
}

pub async fn snippet(config: &AppConfig, key: &str, text: &str) -> Result<()> {
    let mut popup = open_popup(config).await?;
    let saved = popup.save_snippet(key, text).await;
    report(popup.take_notices());
    if !saved {
        bail!("snippet not saved");
    }
    Ok(())
}

pub async fn backup(config: &AppConfig, out: Option<PathBuf>) -> Result<()> {
    let mut popup = open_popup(config).await?;
    let text = popup.backup().await;
    let notices = popup.take_notices();
    let Some(text) = text else {
        report(notices);
        bail!("backup failed");
    };

    match out {
        Some(path) => {
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write backup: {}", path.display()))?;
            report(notices);
        }
        None => println!("{text}"),
    }
    Ok(())
}

pub async fn restore(config: &AppConfig, input: PathBuf) -> Result<()> {
    let text = if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read backup from stdin")?;
        text
    } else {
        std::fs::read_to_string(&input)
            .with_context(|| format!("Failed to read backup: {}", input.display()))?
    };

    let mut popup = open_popup(config).await?;
    let restored = popup.restore(&text).await;
    report(popup.take_notices());
    if !restored {
        bail!("history not restored");
    }
    Ok(())
}

pub async fn paste_last(config: &AppConfig, args: PasteArgs) -> Result<()> {
    let services = services(config).await?;
    let background = BackgroundContext::start(&services)
        .await
        .context("Failed to start background context")?;

    let tab = services.tabs.open()?;
    let clipboard = Arc::new(MemoryClipboard::new());
    let page = Arc::new(SimulatedPage::new("", clipboard.clone()));
    match args.focus {
        FocusTarget::Textarea => {
            page.focus_input(FocusedElement::TextArea, TextInputState::at_end(args.value))
        }
        FocusTarget::Input => page.focus_input(
            FocusedElement::Input {
                input_type: "text".to_string(),
            },
            TextInputState::at_end(args.value),
        ),
        FocusTarget::None => page.blur(),
    }
    let mut content = ContentContext::start(&services, tab, page.clone(), clipboard.clone());

    let outcome = background.execute(HostCommand::PasteLastItem).await;
    let inserted = match outcome {
        Some(PlaybackOutcome::Sent(_)) => tokio::time::timeout(INSERT_WAIT, content.next_insert())
            .await
            .ok()
            .flatten(),
        _ => None,
    };
    content.shutdown().await;
    background.shutdown().await;

    match (outcome, inserted) {
        (Some(PlaybackOutcome::Sent(_)), Some(InsertOutcome::Spliced)) => {
            let value = page.input().map(|input| input.value).unwrap_or_default();
            println!("{value}");
        }
        (Some(PlaybackOutcome::Sent(_)), Some(InsertOutcome::PastedViaClipboard)) => {
            println!("{}", clipboard.contents().unwrap_or_default());
        }
        (Some(PlaybackOutcome::Sent(tab)), None) => bail!("{tab} did not insert the text"),
        (Some(PlaybackOutcome::EmptyHistory), _) => println!("history is empty"),
        (Some(PlaybackOutcome::NoActiveTab), _) => println!("no active tab"),
        (Some(PlaybackOutcome::Dropped(err)), _) => bail!("paste was dropped: {err}"),
        (None, _) => bail!("background context stopped before the command was handled"),
    }
    Ok(())
}
