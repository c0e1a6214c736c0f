use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use super::registry::{MetricsRegistry, Snapshot};

const TITLE: &str = "# Collection Advisor";

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        if self.is_empty() {
            writeln!(f, "## No intercepted calls on tracked containers.")?;
            writeln!(f, "## This may be because:")?;
            writeln!(f, "  - the interception hook is not active;")?;
            writeln!(
                f,
                "  - no code in namespace `{}` uses tracked containers;",
                self.namespace()
            )?;
            return writeln!(
                f,
                "  - the tracked namespace is misconfigured (currently `{}`).",
                self.namespace()
            );
        }

        writeln!(
            f,
            "## Intercepted container calls from namespace `{}`",
            self.namespace()
        )?;
        for (reference, metric) in self.sorted() {
            writeln!(f)?;
            writeln!(f, "{reference}:")?;
            writeln!(f, "{metric}")?;
        }
        Ok(())
    }
}

impl MetricsRegistry {
    /// Renders the current metrics as human-readable text.
    ///
    /// The registry is only locked while taking the snapshot, not while formatting.
    pub fn report(&self) -> String {
        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            log::warn!(
                "no container calls were recorded for namespace `{}`",
                snapshot.namespace()
            );
        }
        snapshot.to_string()
    }

    /// Writes [`report`](Self::report) to `out`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by `out`.
    pub fn write_report(&self, out: &mut impl io::Write) -> io::Result<()> {
        out.write_all(self.report().as_bytes())?;
        out.flush()
    }

    /// Writes [`report`](Self::report) to the file at `path`, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created or written.
    pub fn write_report_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_report(&mut out)
    }
}
