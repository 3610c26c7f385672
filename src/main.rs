use srs_engine::*;

use std::io;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let scheduler = Scheduler::new(SchedulerConfig::from_env());
    let store = SqliteStore::open("db.sqlite3")?;
    let mut repo = Repository::open(store, scheduler)?;

    repo.subscribe(|snapshot| tracing::debug!(items = snapshot.len(), "Review data changed"));

    if repo.is_empty() {
        for word in ["你好", "谢谢", "再见"] {
            repo.add_word(word)?;
        }
        println!("Sample data created!");
    }

    println!(
        "Loaded {} items (time unit: {}s)",
        repo.len(),
        repo.scheduler().config().time_unit.num_seconds()
    );
    let due = repo.get_all_due(repo.snapshot());
    println!("{} due for review", due.len());
    for id in &due {
        if let Some(state) = repo.get(id) {
            println!(
                "  - {} (repetition {}, interval {}, EF {:.2})",
                id, state.repetition, state.interval, state.efactor
            );
        }
    }

    Ok(())
}
