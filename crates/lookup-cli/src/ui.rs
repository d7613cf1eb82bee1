use std::io::IsTerminal;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrowest `COLUMNS` value honored; anything smaller is ignored.
const MIN_TERM_WIDTH: usize = 40;

/// How command output should be presented, resolved once from the global
/// flags and the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiPrefs {
    pub format: OutputFormat,
    pub table_color: bool,
    pub term_width: Option<usize>,
}

impl UiPrefs {
    pub fn detect(flags: &GlobalFlags) -> Self {
        Self::resolve(flags, std::io::stdout().is_terminal(), |key| {
            std::env::var(key).ok()
        })
    }

    /// Resolve prefs with the terminal check and environment supplied.
    ///
    /// Only table output is ever colored. `NO_COLOR` or `LOOKUP_NO_COLOR`
    /// (any value) disable color in `auto` mode.
    fn resolve(flags: &GlobalFlags, is_tty: bool, env: impl Fn(&str) -> Option<String>) -> Self {
        let is_table = flags.format == OutputFormat::Table;
        let table_color = is_table
            && match flags.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => {
                    is_tty
                        && !flags.quiet
                        && env("NO_COLOR").is_none()
                        && env("LOOKUP_NO_COLOR").is_none()
                }
            };

        let term_width = env("COLUMNS")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|width| *width >= MIN_TERM_WIDTH);

        Self {
            format: flags.format,
            table_color,
            term_width,
        }
    }
}
