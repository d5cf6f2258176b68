//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire logging, SQLite-backed preferences and the sample catalog together.
//! - Print the scoped browse listing for quick local sanity checks.
//!
//! Usage: `pastpaper_cli [university_id] [stream_id] [query]`
//!
//! Environment:
//! - `PASTPAPER_DB`: SQLite file for preferences (in-memory when unset).
//! - `PASTPAPER_LOG_DIR`: absolute directory for rolling logs (off when unset).

use log::info;
use pastpaper_core::db::{open_db, open_db_in_memory};
use pastpaper_core::{
    browse, context_summary, default_log_level, init_logging, subject_label,
    subject_paper_count, Catalog, MutationOutcome, PreferenceStore, SqliteKeyValueStore,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pastpaper_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("PASTPAPER_LOG_DIR") {
        init_logging(default_log_level(), &log_dir)?;
    }

    let conn = match std::env::var("PASTPAPER_DB") {
        Ok(path) => open_db(path)?,
        Err(_) => open_db_in_memory()?,
    };
    let storage = SqliteKeyValueStore::try_new(&conn)?;
    let catalog = Catalog::sample()?;
    let mut store = PreferenceStore::new(&catalog, storage);
    // Why: load explicitly so a run without arguments still reports the
    // persisted context instead of relying on the first mutator call.
    store.load();
    info!(
        "event=cli_run module=cli status=ok ready={} revision={}",
        store.is_ready(),
        store.snapshot().revision
    );

    let mut args = std::env::args().skip(1);
    if let Some(university_id) = args.next() {
        report("university", store.set_university(Some(university_id.as_str())));
    }
    if let Some(stream_id) = args.next() {
        report("stream", store.set_stream(Some(stream_id.as_str())));
    }
    let query = args.next().unwrap_or_default();

    let prefs = store.snapshot();
    println!("pastpaper_core version={}", pastpaper_core::core_version());
    println!("context: {}", context_summary(&catalog, &prefs));

    let result = browse(&catalog, &prefs, &query);
    let scope = if result.stream_scoped {
        "selected stream"
    } else {
        "all subjects"
    };
    println!("results: {} ({scope})", result.subjects.len());
    for subject in result.subjects {
        println!(
            "  {} [{} papers]",
            subject_label(subject),
            subject_paper_count(&catalog, &subject.id)
        );
    }
    Ok(())
}

fn report(field: &str, outcome: MutationOutcome) {
    if outcome == MutationOutcome::Rejected {
        println!("{field} rejected: not part of the selected university");
    }
}
