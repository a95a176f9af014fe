use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tempo_core::{aggregate, folder_detail, parse_local_due_to_utc, task_detail, Folder, Task};

mod state;

#[derive(Parser, Debug)]
#[command(name = "tempo", version, about = "Dependency-aware todo prioritizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task
    Add {
        name: String,

        /// Hours of work required
        #[arg(long, default_value_t = 1.0)]
        duration: f64,

        /// Due date as "YYYY-MM-DD HH:MM" wall-clock time
        #[arg(long)]
        due: Option<String>,

        /// IANA timezone for --due
        #[arg(long, default_value = "UTC")]
        tz: String,

        /// Comma-separated ids of tasks this one depends on
        #[arg(long, value_delimiter = ',')]
        after: Vec<String>,

        /// Folder id to file the task under
        #[arg(long)]
        folder: Option<String>,
    },

    /// Create a folder
    Mkdir {
        name: String,

        /// Parent folder id
        #[arg(long)]
        parent: Option<String>,
    },

    /// Mark a task done
    Done { id: String },

    /// Delete a task
    Rm { id: String },

    /// Print the todo order with per-task scores
    List,

    /// Print list-level urgency, velocity, and bait
    Stats,

    /// Show scores for a single task or folder
    Show { id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Add {
            name,
            duration,
            due,
            tz,
            after,
            folder,
        } => add_task(name, duration, due, &tz, after, folder),
        Command::Mkdir { name, parent } => add_folder(name, parent),
        Command::Done { id } => mark_done(&id),
        Command::Rm { id } => remove_task(&id),
        Command::List => list_order(),
        Command::Stats => print_stats(),
        Command::Show { id } => show(&id),
    }
}

fn add_task(
    name: String,
    duration: f64,
    due: Option<String>,
    tz: &str,
    after: Vec<String>,
    folder: Option<String>,
) -> Result<()> {
    if duration < 0.0 {
        bail!("duration must be non-negative (hours)");
    }

    let mut store = state::read_store()?;

    let due = match due {
        Some(s) => Some(parse_local_due_to_utc(&s, tz)?),
        None => None,
    };
    for dep in &after {
        if !store.tasks.iter().any(|t| t.id == *dep) {
            bail!("unknown dependency id: {dep}");
        }
    }
    if let Some(folder_id) = &folder {
        if !store.folders.iter().any(|f| f.id == *folder_id) {
            bail!("unknown folder id: {folder_id}");
        }
    }

    let id = state::next_id("t", store.tasks.iter().map(|t| t.id.clone()));
    let mut task = Task::new(id.clone(), name).with_duration(duration);
    task.due = due;
    task.dependencies = after;
    task.parent = folder;
    store.tasks.push(task);

    state::write_store(&store)?;
    println!("Added {id}");
    Ok(())
}

fn add_folder(name: String, parent: Option<String>) -> Result<()> {
    let mut store = state::read_store()?;

    if let Some(parent_id) = &parent {
        if !store.folders.iter().any(|f| f.id == *parent_id) {
            bail!("unknown folder id: {parent_id}");
        }
    }

    let id = state::next_id("f", store.folders.iter().map(|f| f.id.clone()));
    let mut folder = Folder::new(id.clone(), name);
    // First folder becomes the tree root.
    folder.root = store.folders.is_empty() && parent.is_none();
    folder.parent = parent;
    store.folders.push(folder);

    state::write_store(&store)?;
    println!("Created {id}");
    Ok(())
}

fn mark_done(id: &str) -> Result<()> {
    let mut store = state::read_store()?;
    let Some(task) = store.tasks.iter_mut().find(|t| t.id == id) else {
        bail!("no task with id {id}");
    };
    task.done = true;
    state::write_store(&store)?;
    println!("Done {id}");
    Ok(())
}

fn remove_task(id: &str) -> Result<()> {
    let mut store = state::read_store()?;
    let before = store.tasks.len();
    store.tasks.retain(|t| t.id != id);
    if store.tasks.len() == before {
        bail!("no task with id {id}");
    }
    // Drop dangling references so the graph stays clean.
    for task in store.tasks.iter_mut() {
        task.dependencies.retain(|dep| dep != id);
    }
    state::write_store(&store)?;
    println!("Removed {id}");
    Ok(())
}

fn list_order() -> Result<()> {
    let store = state::read_store()?;
    let metrics = aggregate(&store.tasks, Utc::now());

    if metrics.order.is_empty() {
        println!("Nothing queued. Tasks enter the list once they have a due date.");
        return Ok(());
    }

    println!(
        "{:<4} {:<6} {:<32} {:>9} {:>9}  {}",
        "#", "id", "name", "urgency", "velocity", "due"
    );
    for (rank, row) in metrics.order.iter().enumerate() {
        // "~" marks a due date inherited from a dependent.
        let (due, marker) = match (row.task.due, row.implied_due) {
            (Some(d), _) => (format_due(d), ""),
            (None, Some(d)) => (format_due(d), "~"),
            (None, None) => ("-".to_string(), ""),
        };
        println!(
            "{:<4} {:<6} {:<32} {:>9.2} {:>9.2}  {}{}",
            rank + 1,
            row.task.id,
            row.task.name,
            row.urgency,
            row.velocity,
            marker,
            due
        );
    }
    Ok(())
}

fn print_stats() -> Result<()> {
    let store = state::read_store()?;
    let metrics = aggregate(&store.tasks, Utc::now());

    println!("urgency  {:.2}", metrics.urgency);
    println!("velocity {:.2}", metrics.velocity);
    println!("bait     {:.2}", metrics.bait);
    println!("queued   {}", metrics.order.len());
    Ok(())
}

fn show(id: &str) -> Result<()> {
    let store = state::read_store()?;
    let now = Utc::now();

    if let Some(detail) = task_detail(id, &store.tasks, now) {
        let task = store
            .tasks
            .iter()
            .find(|t| t.id == id)
            .expect("detail implies the task exists");
        println!("task {} | {}", task.id, task.name);
        println!("  duration {:.1}h{}", task.duration, if task.done { "  (done)" } else { "" });
        if let Some(due) = task.due {
            println!("  due      {}", format_due(due));
        } else if let Some(due) = detail.implied_due {
            println!("  due      ~{} (inherited)", format_due(due));
        }
        println!("  urgency  {:.2}", detail.urgency);
        println!("  velocity {:.2}", detail.velocity);
        return Ok(());
    }

    if let Some(detail) = folder_detail(id, &store.folders, &store.tasks, now) {
        let folder = store
            .folders
            .iter()
            .find(|f| f.id == id)
            .expect("detail implies the folder exists");
        println!("folder {} | {}", folder.id, folder.name);
        println!("  urgency  {:.2}", detail.urgency);
        println!("  velocity {:.2}", detail.velocity);
        return Ok(());
    }

    bail!("no task or folder with id {id}");
}

fn format_due(due: DateTime<Utc>) -> String {
    due.format("%Y-%m-%d %H:%M").to_string()
}
