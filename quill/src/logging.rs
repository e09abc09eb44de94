use std::io::Write;

use colored::{ColoredString, Colorize};
use env_logger::{Builder, Env};
use log::Level;

/// Installs the global logger. `RUST_LOG` overrides the default filter,
/// which is `info`, or `error` when `quiet`.
pub fn init_logging(quiet: bool) {
    let default = if quiet { "error" } else { "info" };
    let logging_env = Env::default().filter_or("RUST_LOG", default);
    Builder::from_env(logging_env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                level_label(record.level()),
                record.args()
            )
        })
        .init();
}

fn level_label(level: Level) -> ColoredString {
    match level {
        Level::Error => "error".red().bold(),
        Level::Warn => "warn".yellow().bold(),
        Level::Info => "info".green(),
        Level::Debug => "debug".dimmed(),
        Level::Trace => "trace".dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_record_gets_a_level_label() {
        colored::control::set_override(false);
        let labels: Vec<_> = [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace]
            .into_iter()
            .map(|level| level_label(level).to_string())
            .collect();

        assert_eq!(labels, ["error", "warn", "info", "debug", "trace"]);
    }
}
