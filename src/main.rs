//! Headless demo: load a challenge from a catalog document, apply one edit
//! and watch the sandbox converge. Usage:
//!
//!   codelab <category> <slug> [config.json]
//!
//! The config document is optional; a missing file falls back to defaults.
//! The catalog location comes from the config (`catalog` key), defaulting
//! to `catalog.json` in the working directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use codelab::app::PlaygroundSession;
use codelab::kernel::services::adapters::{
    config::load_config, BufferEditor, DescriptorLoader, JsonCatalog, LocalHost,
};
use codelab::runtime::ImmediateExecutor;

fn main() -> std::io::Result<()> {
    let _logging = codelab::logging::init();

    let mut args = std::env::args().skip(1);
    let (Some(category), Some(slug)) = (args.next(), args.next()) else {
        eprintln!("usage: codelab <category> <slug> [config.json]");
        std::process::exit(2);
    };
    let config_path = args.next().unwrap_or_else(|| "codelab.json".to_string());

    let config = load_config(Path::new(&config_path));
    let catalog_path = config
        .catalog
        .clone()
        .unwrap_or_else(|| PathBuf::from("catalog.json"));

    let loader = Arc::new(DescriptorLoader::new(Arc::new(JsonCatalog::new(
        catalog_path,
    ))));
    let executor = Arc::new(ImmediateExecutor::new()?);
    let host = Arc::new(LocalHost::new());

    let mut session = PlaygroundSession::new(
        loader,
        executor,
        Box::new(BufferEditor::new()),
        Arc::clone(&host) as Arc<dyn codelab::kernel::services::ports::sandbox::ExecutionHost>,
        &config,
    );

    session.open_challenge(&category, &slug);
    session.tick(Instant::now());

    let state = session.state();
    if let Some(error) = &state.load_error {
        eprintln!("load failed: {}", error);
        std::process::exit(1);
    }

    println!(
        "loaded '{}' with {} files, active: {}",
        state.model.as_ref().map(|m| m.title.as_str()).unwrap_or("?"),
        state.working.len(),
        state.active_file.as_deref().unwrap_or("-")
    );
    for path in state.editable_paths() {
        println!("  edit: {}", path);
    }

    // Simulate one edit landing through the widget, then let the debounce
    // window elapse and the sandbox reconcile.
    let edited = format!(
        "{}\n// edited at runtime\n",
        state.active_content().unwrap_or_default()
    );
    session.notify_edit(edited, Instant::now());
    std::thread::sleep(Duration::from_millis(config.debounce_ms + 50));
    session.tick(Instant::now());
    session.tick(Instant::now());

    println!(
        "sandbox instances: {}, busy: {}, failed: {}",
        host.instance_count(),
        session.state().host_busy,
        session.state().host_failed
    );

    session.shutdown();
    Ok(())
}
