use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use todolist::application::todo_store::TodoStore;
use todolist::domain::todo::{StatusFilter, Task, TaskId};
use todolist::infrastructure::file_slot::FileSlot;
use todolist::view::projector::project;

#[derive(Parser)]
#[command(name = "todolist", about = "Persistent to-do list", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a task, optionally with a YYYY-MM-DD due date
    Add {
        text: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// List tasks matching the filter and search term
    List {
        #[arg(long, default_value_t = StatusFilter::All)]
        filter: StatusFilter,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Flip a task between active and completed
    Toggle { id: TaskId },
    /// Delete a task (asks for confirmation unless --yes)
    Rm {
        id: TaskId,
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let slot = FileSlot::open(todolist::slot_path_from_env())?;
    let mut store = TodoStore::open(slot)?;

    match cli.command {
        Command::Add { text, date } => {
            let task = store.add(&text, date.as_deref())?;
            println!("added {}: {}", task.id, task.text);
        }
        Command::List { filter, search } => {
            let visible = project(store.load_all(), filter, &search);
            if visible.is_empty() {
                println!("no tasks");
            }
            for task in visible {
                println!("{}", render_row(task));
            }
        }
        Command::Toggle { id } => {
            if store.toggle_complete(id)? {
                let task = store.load_all().iter().find(|t| t.id == id);
                let state = task.map(|t| t.completed).unwrap_or(false);
                println!("{} is now {}", id, if state { "completed" } else { "active" });
            } else {
                println!("no task {id}");
            }
        }
        Command::Rm { id, yes } => {
            if !yes && !confirm(&format!("delete task {id}? [y/N] "))? {
                return Ok(());
            }
            if store.delete(id)? {
                println!("deleted {id}");
            } else {
                println!("no task {id}");
            }
        }
    }
    Ok(())
}

fn render_row(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let date = task.date.as_deref().unwrap_or("-");
    format!("{:>4} [{}] {}  ({})", task.id, mark, task.text, date)
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y"))
}
