use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use task_manager_core::{MemoryTaskStore, TaskId, TaskRepository};
use task_manager_sqlite::{TaskStore, initialize, schema_status};
use tracing_subscriber::EnvFilter;

mod config;
mod display;
mod menu;

use config::AppConfig;
use display::OutputFormat;
use menu::Menu;

#[derive(Debug, Parser)]
#[command(name = "tasks")]
#[command(version, about = "Console task manager backed by SQLite")]
struct Cli {
    /// YAML config file (defaults to $TASKS_CONFIG when set).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the namespace database files.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Namespace (database) name.
    #[arg(long, global = true)]
    namespace: Option<String>,
    /// Keep tasks in memory only; nothing is saved (interactive menu only).
    #[arg(long)]
    memory: bool,
    /// Without a command the interactive menu starts.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the namespace and task table if they do not exist.
    Init,
    /// Print all tasks, oldest first.
    List(ListArgs),
    /// Add a task.
    Add(AddArgs),
    /// Change the state of a task.
    Update(UpdateArgs),
    /// Delete a task.
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Task name (1-100 characters).
    #[arg(long)]
    name: String,
    /// Task description (1-255 characters).
    #[arg(long)]
    description: String,
    /// Initial state: pending, in_progress or completed.
    #[arg(long, default_value = "pending")]
    state: String,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Task id.
    #[arg(long)]
    id: i64,
    /// New state: pending, in_progress or completed.
    #[arg(long)]
    state: String,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Task id.
    #[arg(long)]
    id: i64,
}

fn main() {
    // Logs go to stderr so the menu on stdout stays readable.
    // Use RUST_LOG=info or RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = resolve_config(&cli)?;

    if cli.memory && cli.command.is_some() {
        return Err("--memory only applies to the interactive menu".to_string());
    }

    match cli.command {
        None if cli.memory => run_menu(&mut MemoryTaskStore::new()),
        None => {
            let mut store = open_store(&config)?;
            run_menu(&mut store)?;
            store
                .close()
                .map_err(|e| format!("Failed to close database: {e}"))
        }
        Some(Command::Init) => run_init(&config),
        Some(Command::List(args)) => run_list(&config, args),
        Some(Command::Add(args)) => run_add(&config, args),
        Some(Command::Update(args)) => run_update(&config, args),
        Some(Command::Delete(args)) => run_delete(&config, args),
    }
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, String> {
    let mut config = AppConfig::resolve(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.database.data_dir = dir.clone();
    }
    if let Some(namespace) = &cli.namespace {
        config.database.namespace = namespace.clone();
    }
    Ok(config)
}

fn open_store(config: &AppConfig) -> Result<TaskStore, String> {
    TaskStore::open(&config.database.connection(), &config.database.namespace).map_err(|e| {
        format!(
            "Failed to open database '{}': {e}",
            config.database.namespace
        )
    })
}

// ---------------------------------------------------------------------------
// interactive menu
// ---------------------------------------------------------------------------

fn run_menu<R: TaskRepository>(repo: &mut R) -> Result<(), String> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(repo, stdin.lock(), stdout.lock())
        .run()
        .map_err(|e| format!("I/O error: {e}"))
}

// ---------------------------------------------------------------------------
// non-interactive commands
// ---------------------------------------------------------------------------

fn run_init(config: &AppConfig) -> Result<(), String> {
    let db = &config.database;
    let conn = initialize(&db.connection(), &db.namespace)
        .map_err(|e| format!("Initialization failed: {e}"))?;
    let status =
        schema_status(&conn).map_err(|e| format!("Failed to read schema status: {e}"))?;
    let path = db
        .connection()
        .namespace_path(&db.namespace)
        .map_err(|e| e.to_string())?;

    println!("Database '{}' and table 'tasks' initialized.", db.namespace);
    println!("  Path: {}", path.display());
    println!(
        "  Table exists: {}",
        if status.table_exists { "yes" } else { "no" }
    );
    println!("  Task count: {}", status.task_count);
    Ok(())
}

fn run_list(config: &AppConfig, args: ListArgs) -> Result<(), String> {
    let store = open_store(config)?;
    let tasks = store
        .list()
        .map_err(|e| format!("Failed to list tasks: {e}"))?;
    print!("{}", display::format_tasks(&tasks, args.format)?);
    if args.format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn run_add(config: &AppConfig, args: AddArgs) -> Result<(), String> {
    let store = open_store(config)?;
    let id = store
        .add_raw(&args.name, &args.description, &args.state)
        .map_err(|e| format!("Failed to add task: {e}"))?;
    println!("Úkol '{}' byl přidán (id {id}).", args.name);
    Ok(())
}

fn run_update(config: &AppConfig, args: UpdateArgs) -> Result<(), String> {
    let store = open_store(config)?;
    store
        .update_state_raw(TaskId(args.id), &args.state)
        .map_err(|e| format!("Failed to update task: {e}"))?;
    println!("Úkol {} byl aktualizován.", args.id);
    Ok(())
}

fn run_delete(config: &AppConfig, args: DeleteArgs) -> Result<(), String> {
    let store = open_store(config)?;
    store
        .delete(TaskId(args.id))
        .map_err(|e| format!("Failed to delete task: {e}"))?;
    println!("Úkol {} byl odstraněn.", args.id);
    Ok(())
}
