//! epub-search-worker: newline-delimited JSON search worker over stdio.
//!
//! stdin:  one request (`{"chapters":[...],"query":"..."}`) or `{"type":"cancel"}` per line
//! stdout: one event per line (`progress`, `result`, `done`, `error`)

use epub_search::kernel::services::adapters::{
    decode_inbound, encode_event, load_settings, BookSearchService, ConfigService, SearchWorker,
    WorkerInput,
};
use epub_search::kernel::services::ports::SearchEvent;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;

mod logging;

const OUTBOX_CAPACITY: usize = 256;

fn parse_args() -> Result<Option<PathBuf>, String> {
    let mut settings = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--settings requires a path".to_string())?;
                settings = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                return Err("usage: epub-search-worker [--settings <path>]".to_string());
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(settings)
}

fn build_runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .or_else(|e| {
            tracing::error!(
                error = %e,
                "Failed to create multi-thread tokio runtime, falling back to current-thread"
            );
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
        })
}

fn main() -> io::Result<()> {
    let settings_path = match parse_args() {
        Ok(path) => path,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    let _logging = logging::init();

    let config = ConfigService::from_settings(load_settings(settings_path.as_deref()));
    let runtime = build_runtime()?;
    let service = BookSearchService::new(runtime.handle().clone(), config.search().clone());

    let (inbox_tx, inbox_rx) = mpsc::channel();
    let (outbox_tx, outbox_rx) = mpsc::sync_channel::<SearchEvent>(OUTBOX_CAPACITY);
    let worker = SearchWorker::spawn(service, inbox_rx, outbox_tx)?;

    let writer = std::thread::Builder::new()
        .name("epub-search-stdout".to_string())
        .spawn(move || -> io::Result<()> {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for event in outbox_rx {
                writeln!(out, "{}", encode_event(&event))?;
                out.flush()?;
            }
            Ok(())
        })?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let input = WorkerInput::from(decode_inbound(&line));
        if inbox_tx.send(input).is_err() {
            tracing::warn!("search worker stopped");
            break;
        }
    }

    drop(inbox_tx);
    worker.join();

    match writer.join() {
        Ok(result) => result,
        Err(_) => Err(io::Error::new(io::ErrorKind::Other, "stdout writer panicked")),
    }
}
