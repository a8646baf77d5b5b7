//! Todo list on the command line.
//!
//! Each stdin line is typed into the form and submitted. Two commands are
//! recognized: `/clear` empties the list and `/remove N` drops item `N`.

use anyhow::Context;
use reflux_runtime::{logging::log_transitions, metrics::install_recorder, Store, StoreConfig};
use std::io::{self, BufRead};
use std::sync::Arc;
use todo::{
    load_snapshot, persist_to, render_to, DemoConfig, FormController, TodoAction, TodoReducer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr; stdout carries the rendered list
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=info,reflux_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = DemoConfig::from_env();
    tracing::debug!(?config, "Loaded configuration");

    let metrics = if config.print_metrics {
        Some(install_recorder().context("installing metrics recorder")?)
    } else {
        None
    };

    let mut builder = Store::<TodoReducer>::builder()
        .reducer(TodoReducer::new())
        .config(StoreConfig::default().with_name("todos"));

    if let Some(path) = &config.snapshot_path {
        if let Some(state) = load_snapshot(path)
            .with_context(|| format!("loading snapshot from {}", path.display()))?
        {
            tracing::info!(items = state.count(), "Restored snapshot");
            builder = builder.initial_state(state);
        }
    }

    let store = Arc::new(builder.build()?);

    let _logging = log_transitions(&store);
    let _renderer = render_to(&store, io::stdout());
    let _persistence = config
        .snapshot_path
        .as_ref()
        .map(|path| persist_to(&store, path.clone()));

    let mut form = FormController::new(Arc::clone(&store));

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;

        match parse_command(&line) {
            Some(action) => {
                store.dispatch(action)?;
            },
            None => {
                form.on_change(line);
                form.submit()?;
            },
        }
    }

    tracing::info!(items = store.state(todo::TodoState::count), "Done");

    if let Some(handle) = metrics {
        println!("{}", handle.render());
    }

    Ok(())
}

/// Recognize `/clear` and `/remove N`; anything else is item text
fn parse_command(line: &str) -> Option<TodoAction> {
    let command = line.strip_prefix('/')?;
    let mut parts = command.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some("clear"), None, None) => Some(TodoAction::ClearItems),
        (Some("remove"), Some(index), None) => index
            .parse()
            .ok()
            .map(|index| TodoAction::RemoveItem { index }),
        _ => None,
    }
}
