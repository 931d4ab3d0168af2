//! Output sinks for finished pages: plain text, a framed preview, or the
//! system print spooler.

use std::io::{self, Write};
use std::process::{Child, Command, ExitStatus, Stdio};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::types::Page;

/// Render `page` framed the way it would fall on paper: a `+---+` rule at
/// the top, between pages and at the bottom, with `|` rails on each side.
pub fn framed(page: &Page) -> Vec<String> {
    let rule = format!("+{}+", "-".repeat(page.page_width));
    let mut out = Vec::with_capacity(page.rows.len() + page.pages + 1);
    for (i, line) in page.lines().into_iter().enumerate() {
        if i % page.page_height.max(1) == 0 {
            out.push(rule.clone());
        }
        out.push(format!("|{line}|"));
    }
    out.push(rule);
    out
}

/// Write the page as plain text, one row per line.
pub fn write_plain(w: &mut impl Write, page: &Page) -> io::Result<()> {
    for line in page.lines() {
        writeln!(w, "{line}")?;
    }
    Ok(())
}

/// Write the framed preview followed by a page count.
pub fn write_preview(w: &mut impl Write, page: &Page) -> io::Result<()> {
    for line in framed(page) {
        writeln!(w, "{line}")?;
    }
    writeln!(w, "pages={}", page.pages)
}

#[derive(Error, Debug)]
pub enum SpoolError {
    #[error("failed to start `{command}`: {source}")]
    Spawn { command: String, source: io::Error },

    #[error("failed to send banner to `{command}`: {source}")]
    Write { command: String, source: io::Error },

    #[error("`{command}` exited with {status}{}", detail(.stderr))]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

fn detail(stderr: &str) -> String {
    match stderr.lines().find(|l| !l.trim().is_empty()) {
        Some(line) => format!(": {}", line.trim()),
        None => String::new(),
    }
}

/// How to reach the print spooler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoolConfig {
    /// Program that reads the job on stdin.
    pub command: String,
    /// Passed as `-P <printer>` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printer: Option<String>,
}

impl Default for SpoolConfig {
    fn default() -> Self {
        SpoolConfig {
            command: "lpr".into(),
            printer: None,
        }
    }
}

impl SpoolConfig {
    /// The argument list for the spooler, printer selection included.
    pub fn args(&self) -> Vec<String> {
        match &self.printer {
            Some(p) if !p.is_empty() => vec!["-P".into(), p.clone()],
            _ => Vec::new(),
        }
    }

    /// Pipe `page` to the spooler and wait for it to accept the job.
    pub fn print(&self, page: &Page) -> Result<(), SpoolError> {
        let child = self.spawn()?;
        self.finish(child, page)?;
        info!(
            command = %self.command,
            printer = self.printer.as_deref().unwrap_or("default"),
            rows = page.rows.len(),
            "banner spooled"
        );
        Ok(())
    }

    /// Start the spooler. Its stdout is discarded and its stderr kept for
    /// the error report, so nothing reaches a terminal the caller owns.
    fn spawn(&self) -> Result<Child, SpoolError> {
        Command::new(&self.command)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SpoolError::Spawn {
                command: self.command.clone(),
                source,
            })
    }

    /// Feed the job to `child` and reap it. The child is waited on even
    /// when the write fails.
    fn finish(&self, mut child: Child, page: &Page) -> Result<(), SpoolError> {
        let written = match child.stdin.take() {
            Some(mut stdin) => {
                let job = page.to_text() + "\n";
                stdin.write_all(job.as_bytes())
                // Dropping stdin closes the pipe so the spooler sees EOF.
            }
            None => Ok(()),
        };

        let output = child.wait_with_output();
        if let Err(source) = written {
            return Err(SpoolError::Write {
                command: self.command.clone(),
                source,
            });
        }
        let output = output.map_err(|source| SpoolError::Write {
            command: self.command.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(SpoolError::Failed {
                command: self.command.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framed_draws_rule_between_pages() {
        let page = Page::blank(3, 2, 2);
        assert_eq!(
            framed(&page),
            vec!["+---+", "|   |", "|   |", "+---+", "|   |", "|   |", "+---+"]
        );
    }

    #[test]
    fn preview_ends_with_page_count() {
        let mut buf = Vec::new();
        write_preview(&mut buf, &Page::blank(2, 1, 1)).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "+--+\n|  |\n+--+\npages=1\n");
    }

    #[test]
    fn printer_name_becomes_dash_p() {
        let cfg = SpoolConfig {
            printer: Some("banner".into()),
            ..Default::default()
        };
        assert_eq!(cfg.args(), ["-P", "banner"]);
        assert!(SpoolConfig::default().args().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn spooling_to_cat_succeeds() {
        let cfg = SpoolConfig {
            command: "cat".into(),
            printer: None,
        };
        cfg.print(&Page::blank(4, 2, 1)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn rejected_job_reports_exit_status() {
        let cfg = SpoolConfig {
            command: "false".into(),
            printer: None,
        };
        let err = cfg.print(&Page::blank(4, 2, 1)).unwrap_err();
        assert!(matches!(err, SpoolError::Failed { ref stderr, .. } if stderr.is_empty()));
        assert!(err.to_string().starts_with("`false` exited with"));
    }

    #[test]
    fn failure_detail_is_first_stderr_line() {
        assert_eq!(detail("\nlpr: no default destination\nmore\n"), ": lpr: no default destination");
        assert_eq!(detail("  \n"), "");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn spooler_is_reaped_when_it_stops_reading() {
        // `true` exits without reading; a job far larger than a pipe
        // buffer then fails with a broken pipe.
        let cfg = SpoolConfig {
            command: "true".into(),
            printer: None,
        };
        let child = cfg.spawn().unwrap();
        let pid = child.id();
        let err = cfg.finish(child, &Page::blank(80, 66, 200)).unwrap_err();
        assert!(matches!(err, SpoolError::Write { .. }), "{err}");
        assert!(
            !std::path::Path::new(&format!("/proc/{pid}")).exists(),
            "spooler {pid} was left unreaped"
        );
    }

    #[test]
    fn missing_spooler_is_a_spawn_error() {
        let cfg = SpoolConfig {
            command: "definitely-not-a-spooler-binary".into(),
            printer: None,
        };
        assert!(matches!(
            cfg.print(&Page::blank(1, 1, 1)),
            Err(SpoolError::Spawn { .. })
        ));
    }
}
