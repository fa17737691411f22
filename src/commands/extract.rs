//! Extract subcommand handler.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use humansize::{format_size, DECIMAL};
use tracing::debug;

use turnpair::files::filename::{render_template, TemplateContext};
use turnpair::pipeline::{Pipeline, PipelineConfig};
use turnpair::records::MessageLog;
use turnpair::Config;

use crate::cli::ExtractArgs;

#[cfg(not(tarpaulin_include))]
pub fn handle(args: ExtractArgs) -> Result<()> {
    let config = Config::load()?;

    let log = MessageLog::parse(&args.input)?;
    debug!(messages = log.len(), input = %args.input.display(), "parsed message log");

    let mut messages = log.messages;
    if let Some(id) = &args.conversation {
        messages.retain(|message| &message.conversation_id == id);
        debug!(conversation = %id, remaining = messages.len(), "applied conversation filter");
    }

    let pipeline = Pipeline::new(PipelineConfig {
        context_role: args
            .context_role
            .clone()
            .unwrap_or_else(|| config.roles.context.clone()),
        response_role: args
            .response_role
            .clone()
            .unwrap_or_else(|| config.roles.response.clone()),
        skip_unpaired: args.skip_unpaired,
        ..PipelineConfig::default()
    });
    let output = pipeline.run(messages);

    if output.examples.is_empty() {
        println!("No examples found");
        return Ok(());
    }

    let path = match args.output {
        Some(path) => path,
        None => derive_output_path(&args.input, args.conversation.as_deref(), &config),
    };

    if path.exists() && !args.force && !confirm_overwrite(&path)? {
        println!("No changes made.");
        return Ok(());
    }

    let json = if config.output.pretty {
        serde_json::to_string_pretty(&output.examples)?
    } else {
        serde_json::to_string(&output.examples)?
    };
    fs::write(&path, &json).with_context(|| format!("Failed to write {}", path.display()))?;

    let stats = &output.stats;
    println!(
        "Wrote {} examples to {} ({})",
        stats.examples,
        path.display(),
        format_size(json.len() as u64, DECIMAL)
    );
    println!(
        "  {} messages in, {} dropped, {} conversations, {} turns, {} without context",
        stats.messages_in, stats.messages_dropped, stats.conversations, stats.turns, stats.unpaired
    );

    Ok(())
}

/// Build the output path from the configured filename template, next to the
/// input file.
fn derive_output_path(input: &Path, conversation: Option<&str>, config: &Config) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("messages");

    let name = render_template(
        &config.output.filename_template,
        &TemplateContext {
            stem,
            conversation,
            now: chrono::Local::now().naive_local(),
        },
    );

    match input.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Prompt before overwriting an existing output file.
///
/// Returns false without prompting when stdin is not a TTY.
#[cfg(not(tarpaulin_include))]
fn confirm_overwrite(path: &Path) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{} exists; refusing to overwrite in non-interactive mode (use --force)",
            path.display()
        );
        return Ok(false);
    }

    print!("Overwrite {}? [y/N] ", path.display());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
