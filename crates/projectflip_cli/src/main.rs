//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise `projectflip_core` end to end without the web UI.
//! - Optionally persist the store to a SQLite file between runs.
//!
//! Usage: `projectflip_cli [--db PATH] [--log-dir DIR] [--subscribe EMAIL]`

use log::info;
use projectflip_core::db::open_db;
use projectflip_core::{
    core_version, default_log_level, init_logging, ping, EntityStore, SnapshotRepository,
    SqliteSnapshotRepository, StoreConfig,
};
use std::process::ExitCode;

#[derive(Debug, Default)]
struct Args {
    db_path: Option<String>,
    log_dir: Option<String>,
    subscribe: Option<String>,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(flag) = raw.next() {
        let slot = match flag.as_str() {
            "--db" => &mut args.db_path,
            "--log-dir" => &mut args.log_dir,
            "--subscribe" => &mut args.subscribe,
            other => return Err(format!("unknown argument `{other}`")),
        };
        let value = raw
            .next()
            .ok_or_else(|| format!("missing value for `{flag}`"))?;
        *slot = Some(value);
    }
    Ok(args)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(log_dir) = args.log_dir.as_deref() {
        init_logging(default_log_level(), log_dir)?;
    }

    println!("projectflip_core ping={}", ping());
    println!("projectflip_core version={}", core_version());

    let conn = args.db_path.as_deref().map(open_db).transpose()?;
    let repo = conn
        .as_ref()
        .map(SqliteSnapshotRepository::try_new)
        .transpose()?;

    let mut store = match repo.as_ref().map(|repo| repo.load_state()).transpose()? {
        Some(Some(state)) => EntityStore::from_state(state, StoreConfig::default())?,
        _ => EntityStore::new(),
    };

    if let Some(email) = args.subscribe {
        let id = store.add_subscriber(email);
        println!("subscriber added id={id}");
    }

    println!(
        "projects={} clients={} contacts={} subscribers={}",
        store.projects().len(),
        store.clients().len(),
        store.contacts().len(),
        store.subscribers().len()
    );

    if let Some(repo) = repo.as_ref() {
        repo.save_state(&store.state())?;
        info!("event=cli_save module=cli status=ok");
        println!("state saved");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: projectflip_cli [--db PATH] [--log-dir DIR] [--subscribe EMAIL]");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
