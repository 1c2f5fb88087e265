//! Interactive text menu.
//!
//! The menu reads answers line by line from any [`BufRead`] and writes to any
//! [`Write`], so it runs the same against a terminal or a scripted buffer.
//! End of input ends the session as if `5` had been chosen.

use std::io::{self, BufRead, Write};

use task_manager_core::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, NewTask, Task, TaskRepository, TaskState, truncate_chars,
};
use tracing::warn;

use crate::display::format_task_line;

/// Whether the session continues after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Menu session over a task repository.
pub struct Menu<'a, R, I, O> {
    repo: &'a mut R,
    input: I,
    output: O,
}

impl<'a, R, I, O> Menu<'a, R, I, O>
where
    R: TaskRepository,
    I: BufRead,
    O: Write,
{
    pub fn new(repo: &'a mut R, input: I, output: O) -> Self {
        Self {
            repo,
            input,
            output,
        }
    }

    /// Runs the menu until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Vítejte v programu Task manager.")?;

        loop {
            self.print_main_menu()?;
            let Some(choice) = self.prompt("Vyberte možnost (1-5): ")? else {
                writeln!(self.output, "\nKonec programu.")?;
                break;
            };

            let flow = match choice.trim() {
                "1" => self.add_task()?,
                "2" => self.show_tasks("\nSeznam úkolů:").map(|_| Flow::Continue)?,
                "3" => self.update_task()?,
                "4" => self.delete_task()?,
                "5" => Flow::Quit,
                _ => {
                    writeln!(self.output, "Neplatná volba, zkuste to znovu.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                writeln!(self.output, "\nKonec programu.")?;
                break;
            }
        }

        self.output.flush()
    }

    fn print_main_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nSprávce úkolů - Hlavní menu")?;
        writeln!(self.output, "1. Přidat nový úkol")?;
        writeln!(self.output, "2. Zobrazit úkoly")?;
        writeln!(self.output, "3. Aktualizovat úkol")?;
        writeln!(self.output, "4. Odstranit úkol")?;
        writeln!(self.output, "5. Ukončit program")
    }

    fn add_task(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt_non_empty(
            "Zadejte název úkolu: ",
            "Název úkolu nemůže být prázdný.",
        )?
        else {
            return Ok(Flow::Quit);
        };
        let name = self.shorten(name, MAX_NAME_LEN, "Název úkolu je příliš dlouhý.")?;

        let Some(description) = self.prompt_non_empty(
            "Zadejte popis úkolu: ",
            "Popis úkolu nemůže být prázdný.",
        )?
        else {
            return Ok(Flow::Quit);
        };
        let description = self.shorten(
            description,
            MAX_DESCRIPTION_LEN,
            "Popis úkolu je příliš dlouhý.",
        )?;

        let result = NewTask::pending(name.as_str(), description)
            .map_err(|e| e.to_string())
            .and_then(|task| self.repo.add(task).map_err(|e| e.to_string()));
        match result {
            Ok(_) => writeln!(self.output, "Úkol '{name}' byl přidán.")?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    /// Prints the numbered task list and returns the tasks it showed.
    ///
    /// Returns `None` if the repository could not be read.
    fn show_tasks(&mut self, caption: &str) -> io::Result<Option<Vec<Task>>> {
        let tasks = match self.repo.list() {
            Ok(tasks) => tasks,
            Err(e) => {
                self.report_error(&e.to_string())?;
                return Ok(None);
            }
        };

        writeln!(self.output, "{caption}")?;
        if tasks.is_empty() {
            writeln!(self.output, "Žádné úkoly k zobrazení.")?;
        }
        for (i, task) in tasks.iter().enumerate() {
            writeln!(self.output, "{}", format_task_line(i + 1, task))?;
        }
        Ok(Some(tasks))
    }

    fn update_task(&mut self) -> io::Result<Flow> {
        let Some(task) = self.select_task(
            "\nSeznam úkolů k aktualizaci:",
            "Žádné úkoly k aktualizaci.",
            "Zadejte číslo úkolu k aktualizaci: ",
        )?
        else {
            return Ok(Flow::Continue);
        };
        let Some(task) = task else {
            return Ok(Flow::Quit);
        };

        writeln!(self.output, "Zadejte nový stav úkolu {}:", task.name)?;
        writeln!(self.output, "1. Probíhající")?;
        writeln!(self.output, "2. Dokončený")?;
        let Some(choice) = self.prompt_number("Vyberte možnost (1-2): ", 1, 2)? else {
            return Ok(Flow::Quit);
        };
        let state = if choice == 1 {
            TaskState::InProgress
        } else {
            TaskState::Completed
        };

        match self.repo.update_state(task.id, state) {
            Ok(()) => writeln!(self.output, "Úkol '{}' byl aktualizován.", task.name)?,
            Err(e) => self.report_error(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    fn delete_task(&mut self) -> io::Result<Flow> {
        let Some(task) = self.select_task(
            "\nSeznam úkolů k odstranění:",
            "Žádné úkoly k odstranění.",
            "Zadejte číslo úkolu k odstranění: ",
        )?
        else {
            return Ok(Flow::Continue);
        };
        let Some(task) = task else {
            return Ok(Flow::Quit);
        };

        match self.repo.delete(task.id) {
            Ok(()) => writeln!(self.output, "Úkol '{}' byl odstraněn.", task.name)?,
            Err(e) => self.report_error(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    /// Lists tasks and asks for one by its 1-based position.
    ///
    /// The outer `Option` is `None` when there is nothing to choose from; the
    /// inner one is `None` when input ended before a valid answer.
    fn select_task(
        &mut self,
        caption: &str,
        empty_message: &str,
        question: &str,
    ) -> io::Result<Option<Option<Task>>> {
        let Some(mut tasks) = self.show_tasks(caption)? else {
            return Ok(None);
        };
        if tasks.is_empty() {
            writeln!(self.output, "{empty_message}")?;
            return Ok(None);
        }

        let max = tasks.len();
        match self.prompt_number(question, 1, max)? {
            Some(position) => Ok(Some(Some(tasks.swap_remove(position - 1)))),
            None => Ok(Some(None)),
        }
    }

    fn shorten(&mut self, value: String, max: usize, notice: &str) -> io::Result<String> {
        if value.chars().count() <= max {
            return Ok(value);
        }
        writeln!(self.output, "{notice} Bude zkrácen na maximálně {max} znaků.")?;
        Ok(truncate_chars(&value, max).to_string())
    }

    fn report_error(&mut self, message: &str) -> io::Result<()> {
        warn!(error = message, "menu action failed");
        writeln!(self.output, "Chyba: {message}")
    }

    /// Writes `text` and reads one line without its line ending.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt_non_empty(&mut self, text: &str, empty_notice: &str) -> io::Result<Option<String>> {
        loop {
            match self.prompt(text)? {
                Some(value) if value.is_empty() => writeln!(self.output, "{empty_notice}")?,
                other => return Ok(other),
            }
        }
    }

    /// Asks until the answer is a whole number in `min..=max`.
    fn prompt_number(&mut self, text: &str, min: usize, max: usize) -> io::Result<Option<usize>> {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match answer.trim().parse::<i64>() {
                Ok(n) if n >= min as i64 && n <= max as i64 => return Ok(Some(n as usize)),
                Ok(_) => writeln!(
                    self.output,
                    "Prosím zadejte číslo mezi {min} a {max}."
                )?,
                Err(_) => writeln!(self.output, "Neplatný vstup. Zadejte prosím celé číslo.")?,
            }
        }
    }
}
