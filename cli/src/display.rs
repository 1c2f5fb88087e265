//! Output formatting for tasks.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use task_manager_core::{Task, TaskState};

/// Supported output formats for `tasks list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Czech label shown for a state in the menu.
pub fn state_label(state: TaskState) -> &'static str {
    match state {
        TaskState::Pending => "nezahájeno",
        TaskState::InProgress => "probíhá",
        TaskState::Completed => "hotovo",
    }
}

/// Formats the creation time the way the menu shows it, in local time.
pub fn format_created_at(task: &Task) -> String {
    format_timestamp(&task.created_at.with_timezone(&Local))
}

fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// One numbered menu line: `1. name - description (label) z created_at`.
pub fn format_task_line(position: usize, task: &Task) -> String {
    format!(
        "{position}. {} - {} ({}) z {}",
        task.name,
        task.description,
        state_label(task.state),
        format_created_at(task)
    )
}

/// Formats a task list in the requested output format.
pub fn format_tasks(tasks: &[Task], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(tasks)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(tasks).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(tasks_to_table(tasks)),
    }
}

fn tasks_to_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "Žádné úkoly k zobrazení.\n".to_string();
    }

    let id_width = tasks
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let state_width = TaskState::ALL
        .iter()
        .map(|s| s.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<id_width$}  {:<state_width$}  {:<19}  NAME\n",
        "ID", "STATE", "CREATED"
    ));
    for task in tasks {
        out.push_str(&format!(
            "{:<id_width$}  {:<state_width$}  {:<19}  {} - {}\n",
            task.id.to_string(),
            task.state.as_str(),
            format_created_at(task),
            task.name,
            task.description
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use task_manager_core::TaskId;

    fn sample() -> Task {
        Task {
            id: TaskId(3),
            name: "Task A".to_string(),
            description: "Desc A".to_string(),
            state: TaskState::InProgress,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(state_label(TaskState::Pending), "nezahájeno");
        assert_eq!(state_label(TaskState::InProgress), "probíhá");
        assert_eq!(state_label(TaskState::Completed), "hotovo");
    }

    #[test]
    fn test_task_line() {
        let task = sample();
        let local = task.created_at.with_timezone(&Local);
        assert_eq!(
            format_task_line(1, &task),
            format!(
                "1. Task A - Desc A (probíhá) z {}",
                local.format("%Y-%m-%d %H:%M:%S")
            )
        );
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(&at), "2024-05-01 09:30:00");
    }

    #[test]
    fn test_table_output() {
        let table = format_tasks(&[sample()], OutputFormat::Table).unwrap();
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("in_progress"));
        assert!(lines[1].ends_with("Task A - Desc A"));
    }

    #[test]
    fn test_empty_table_output() {
        let table = format_tasks(&[], OutputFormat::Table).unwrap();
        assert_eq!(table, "Žádné úkoly k zobrazení.\n");
    }

    #[test]
    fn test_json_output_uses_storage_names() {
        let json = format_tasks(&[sample()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], 3);
        assert_eq!(value[0]["state"], "in_progress");
    }

    #[test]
    fn test_yaml_output() {
        let yaml = format_tasks(&[sample()], OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("state: in_progress"));
        assert!(yaml.contains("name: Task A"));
    }
}
