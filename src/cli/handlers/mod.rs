use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::engine::{Controller, Key};
use crate::io::config_io;
use crate::io::directory::UserDirectory;
use crate::model::config::MentionConfig;
use crate::ops::locate::locate;
use crate::ops::rank::Ranker;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no mention under the caret (word is {0:?})")]
    NoMention(String),
    #[error("no users match {0:?}")]
    NoMatches(String),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let users = Path::new(&cli.users);
    let config_path = Path::new(&cli.config);

    match cli.command {
        None => crate::tui::run(users, config_path),
        Some(cmd) => match cmd {
            Commands::Locate(args) => cmd_locate(args, config_path, json),
            Commands::Rank(args) => cmd_rank(args, users, config_path, json),
            Commands::Complete(args) => cmd_complete(args, users, config_path, json),
            Commands::Users => cmd_users(users, json),
            Commands::Config(cmd) => match cmd.action {
                ConfigAction::Show => cmd_config_show(config_path, json),
                ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
            },
        },
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_locate(args: LocateArgs, config_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(config_path)?;
    let trigger = config.complete.trigger;
    let caret = args.caret.unwrap_or(args.text.len());
    let token = locate(&args.text, caret);

    if json {
        println!("{}", serde_json::to_string_pretty(&locate_to_json(&token, trigger))?);
    } else {
        println!("{}", format_token(&token, trigger));
    }
    Ok(())
}

fn cmd_rank(
    args: RankArgs,
    users: &Path,
    config_path: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(config_path)?;
    let dir = UserDirectory::open(users)?;
    let ranker = Ranker::from_config(&config.complete);
    let query = args.query.strip_prefix(config.complete.trigger).unwrap_or(&args.query);

    if json {
        // Browse mode is an unscored prefix of the directory
        let rows: Vec<CandidateJson> = if query.is_empty() {
            dir.snapshot()
                .iter()
                .take(ranker.browse_limit)
                .map(candidate_to_json)
                .collect()
        } else {
            ranker
                .scored(query, dir.snapshot())
                .iter()
                .map(scored_to_json)
                .collect()
        };
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        let ranked = ranker.rank(query, dir.snapshot());
        if ranked.is_empty() {
            println!("(no matches)");
        }
        for line in format_candidate_list(&ranked) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_users(users: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dir = UserDirectory::open(users)?;
    let loaded_at = dir
        .loaded_at()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    if json {
        let out = UsersJson {
            loaded_at,
            users: dir.snapshot().iter().map(candidate_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_candidate_list(dir.snapshot()) {
            println!("{}", line);
        }
        if let Some(at) = loaded_at {
            println!("{} user(s), loaded {}", dir.len(), at);
        }
    }
    Ok(())
}

fn cmd_config_show(config_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config: MentionConfig = config_io::load_config(config_path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_complete(
    args: CompleteArgs,
    users: &Path,
    config_path: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(config_path)?;
    let dir = UserDirectory::open(users)?;
    let caret = args.caret.unwrap_or(args.text.len());

    let mut controller = Controller::new(&config.complete);
    controller.on_input(&args.text, caret, &dir);
    if !controller.is_open() {
        let token = locate(&args.text, caret);
        return Err(match token.query(controller.trigger()) {
            Some(query) => CliError::NoMatches(query).into(),
            None => CliError::NoMention(token.text).into(),
        });
    }

    for _ in 0..args.next {
        controller.on_key(Key::Down);
    }
    for _ in 0..args.prev {
        controller.on_key(Key::Up);
    }
    let selected = controller
        .open_state()
        .map(|open| open.selected_candidate().clone())
        .ok_or_else(|| CliError::NoMention(args.text.clone()))?;
    let edit = controller
        .on_key(Key::Enter)
        .edit
        .ok_or_else(|| CliError::NoMention(args.text.clone()))?;

    let mut text = args.text.clone();
    let caret = edit.apply(&mut text);

    if json {
        let out = CompleteJson {
            selected: candidate_to_json(&selected),
            edit: &edit,
            text: &text,
            caret,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", format_edit(&edit));
        println!("{}", text);
    }
    Ok(())
}

fn cmd_config_set(config_path: &Path, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut doc) = config_io::read_config(config_path)?;
    config_io::set_value(&mut doc, key, value)?;
    config_io::write_config(config_path, &doc)?;
    println!("{} = {}", key, value);
    Ok(())
}
