use chrono::Local;
use colored::*;
use std::{fs::{self, File}, io::{self, Write}, path::PathBuf};

/// Step-by-step trace of a search: one `devlog(N).txt` per event, optionally
/// echoed to the console.
pub struct DevLogger {
    dir: Option<PathBuf>,
    echo: bool,
    color: bool,
    step: bool,
    max_logs: usize,
    counter: usize,
}

impl DevLogger {
    pub fn new(dir: impl Into<PathBuf>, color: bool, step: bool, max_logs: usize) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir: Some(dir), echo: true, color, step, max_logs, counter: 0 })
    }

    /// Writes nothing anywhere. The solver's default.
    pub fn disabled() -> Self {
        Self { dir: None, echo: false, color: false, step: false, max_logs: 0, counter: 0 }
    }

    /// Console echo without files.
    pub fn console(color: bool, step: bool, max_logs: usize) -> Self {
        Self { dir: None, echo: true, color, step, max_logs, counter: 0 }
    }

    /// False once the cap is hit, so callers can skip building details.
    pub fn is_enabled(&self) -> bool {
        (self.dir.is_some() || self.echo) && (self.max_logs == 0 || self.counter < self.max_logs)
    }

    pub fn count(&self) -> usize { self.counter }

    pub fn log(&mut self, title: &str, details: &str) -> io::Result<()> {
        if !self.is_enabled() { return Ok(()); }
        self.counter += 1;

        if let Some(dir) = &self.dir {
            let path = dir.join(format!("devlog({}).txt", self.counter));
            let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut f = File::create(&path)?;
            writeln!(f, "[{}] {}\n\n{}", ts, title, details)?;
        }

        if self.echo {
            if self.color {
                println!("{} {}\n{}", "➤".blue().bold(), title.bold(), details);
            } else {
                println!("➤ {}\n{}", title, details);
            }
        }

        if self.step {
            print!("-- press Enter to continue --");
            io::stdout().flush().ok();
            let mut s = String::new();
            io::stdin().read_line(&mut s).ok();
        }
        Ok(())
    }
}
