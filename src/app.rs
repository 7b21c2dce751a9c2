//! Command runner shared by the binary and its integration tests

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::cli::Cli;
use crate::config::SeqDiffConfig;
use crate::diff::{DiffEngine, DiffFormat, DiffFormatter};

/// Rendered output plus whether the inputs differ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOutcome {
    pub output: String,
    pub differ: bool,
}

/// Load config, read both inputs, diff them and render the requested format
pub fn run(cli: &Cli, stdout_is_terminal: bool) -> Result<DiffOutcome> {
    let mut config = SeqDiffConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply_to(&mut config);
    config.validate()?;

    let engine = DiffEngine::from_config(&config.engine);
    let left = read_input(&cli.left)?;
    let right = read_input(&cli.right)?;

    if cli.brief {
        let differ = !engine.identical(&left, &right);
        let output = if differ {
            format!("Files {} and {} differ", cli.left.display(), cli.right.display())
        } else {
            String::new()
        };
        return Ok(DiffOutcome { output, differ });
    }

    let result = engine.enhanced_diff(&left, &right)?;
    let differ = result.stats.base.has_changes();
    tracing::debug!(
        hunks = result.stats.hunk_count,
        modified = result.stats.modified_lines,
        "diff complete"
    );

    let format = DiffFormat::from(cli.format);
    if !differ && matches!(format, DiffFormat::Unified | DiffFormat::Inline) {
        return Ok(DiffOutcome {
            output: String::new(),
            differ,
        });
    }

    let rendered = DiffFormatter::format(
        &result,
        format,
        &file_label(&cli.left),
        &file_label(&cli.right),
        Some(config.output.default_width),
    )?;

    let output = if config.output.color && stdout_is_terminal {
        colorize(&rendered, format)
    } else {
        rendered
    };

    Ok(DiffOutcome { output, differ })
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Header label: the path followed by its modification time, as GNU diff prints it
pub fn file_label(path: &Path) -> String {
    let modified = std::fs::metadata(path).and_then(|meta| meta.modified());
    match modified {
        Ok(time) => {
            let time: DateTime<Local> = time.into();
            format!("{}\t{}", path.display(), time.format("%Y-%m-%d %H:%M:%S%.9f %z"))
        }
        Err(_) => path.display().to_string(),
    }
}

/// Wrap change lines in ANSI colors
fn colorize(rendered: &str, format: DiffFormat) -> String {
    if !matches!(format, DiffFormat::Unified | DiffFormat::Inline) {
        return rendered.to_string();
    }

    rendered
        .lines()
        .map(|line| {
            let color = if line.starts_with("---") || line.starts_with("+++") {
                "\x1b[1m" // Bold
            } else if line.starts_with("@@") {
                "\x1b[36m" // Cyan
            } else if line.starts_with('+') {
                "\x1b[32m" // Green
            } else if line.starts_with('-') {
                "\x1b[31m" // Red
            } else if line.starts_with('~') {
                "\x1b[33m" // Yellow
            } else {
                return line.to_string();
            };
            format!("{}{}\x1b[0m", color, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
