use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use indicatif::{ProgressBar, ProgressStyle};

use converter::{Diagnostics, Pass, Progress};

/// Terminal output for a run: one progress bar per pass (unless quiet) and
/// the unresolved references once discovery is done.
pub struct Reporter {
    quiet: bool,
    color_choice: ColorChoice,
    bar: Option<ProgressBar>,
}

impl Reporter {
    pub fn new(quiet: bool, color_choice: ColorChoice) -> Self {
        Reporter {
            quiet,
            color_choice,
            bar: None,
        }
    }
}

impl Progress for Reporter {
    fn start(&mut self, pass: Pass, total: usize) {
        if self.quiet {
            return;
        }
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message(format!("{}: {}", pass, pass.describe()));
        self.bar = Some(bar);
    }

    fn advance(&mut self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }

    fn discovered(&mut self, diagnostics: &Diagnostics) {
        emit_diagnostics(diagnostics, self.color_choice);
    }
}

/// Print each unresolved reference as a single `page/uid:line:col` line.
fn emit_diagnostics(diagnostics: &Diagnostics, color_choice: ColorChoice) {
    if diagnostics.is_empty() {
        return;
    }

    let writer = StandardStream::stderr(color_choice);
    let config = term::Config {
        display_style: term::DisplayStyle::Short,
        ..term::Config::default()
    };

    let mut files = SimpleFiles::new();
    for diagnostic in diagnostics.iter() {
        let file_id = files.add(diagnostic.file_name(), diagnostic.text.clone());
        let _ = term::emit_to_write_style(
            &mut writer.lock(),
            &config,
            &files,
            &diagnostic.to_diagnostic(file_id),
        );
    }
}
