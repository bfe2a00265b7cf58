use super::task::Task;
use anyhow::Result;
use prettytable::{row, Table};

const DUE_DISPLAY_FORMAT: &str = "%b %-d, %Y";

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        Self::tasks_table(tasks).printstd();
        Ok(())
    }

    pub fn tasks_table(tasks: &[Task]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "", "TITLE", "DESCRIPTION", "DUE", "PRIORITY", "STATUS"]);
        for task in tasks {
            let description = task.description.clone().unwrap_or_default();
            let due = task.due_date.map(|d| d.format(DUE_DISPLAY_FORMAT).to_string()).unwrap_or_default();
            let status = Self::status(task);
            table.add_row(row![task.id, Self::checkbox(task), task.title, description, due, task.priority, status]);
        }
        table
    }

    /// One-line label used in selection menus.
    pub fn task_label(task: &Task) -> String {
        let mut label = format!("{} #{} {} [{}]", Self::checkbox(task), task.id, task.title, task.priority);
        if let Some(due) = task.due_date {
            label.push_str(&format!(" due {}", due.format(DUE_DISPLAY_FORMAT)));
        }
        label
    }

    fn checkbox(task: &Task) -> &'static str {
        if task.is_complete {
            "[x]"
        } else {
            "[ ]"
        }
    }

    fn status(task: &Task) -> String {
        if task.is_archived {
            format!("{} (archived)", task.status())
        } else {
            task.status().to_string()
        }
    }
}
