//! Implementation of `orgtree check`.

use std::process::ExitCode;

use orgtree_config::{ConfigWarning, discover_config_files, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, success, warning},
};

/// Shows configuration files, the dataset and validation warnings.
///
/// Exits with failure when there are warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("{}", subheader("Config files:"));
    if config_files.is_empty() {
        println!("   {}", dim("(none found, using defaults)"));
    }
    for path in &config_files {
        let scope = if is_global_config(path) {
            "global"
        } else {
            "local"
        };
        println!("   {} {}", path.display(), dim(&format!("({scope})")));
    }
    println!();

    println!("{}", subheader("Dataset:"));
    match ctx.data_path() {
        Some(path) if path.is_file() => println!("   {}", path.display()),
        Some(path) => println!("   {} {}", path.display(), warning("[missing]")),
        None => println!("   {}", dim("(none configured)")),
    }
    println!();

    let session = &ctx.config.session;
    println!("{}", subheader("Session:"));
    println!(
        "   root #{} in '{}', highlights clear after {} ms",
        session.root, session.container, session.highlight_ms
    );
    println!();

    // An explicit --data replaces the configured source.
    let mut warnings = ctx.config.validate();
    if let Some(data) = ctx.data_override() {
        warnings.retain(|w| !is_source_warning(w));
        if !data.is_file() {
            warnings.insert(
                0,
                ConfigWarning::SourceMissing {
                    path: data.display().to_string(),
                },
            );
        }
    }
    if warnings.is_empty() {
        println!("{}", success("No issues found."));
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Returns true for warnings about the configured dataset path.
fn is_source_warning(w: &ConfigWarning) -> bool {
    matches!(
        w,
        ConfigWarning::NoSourceConfigured
            | ConfigWarning::SourceMissing { .. }
            | ConfigWarning::SourceNotFile { .. }
    )
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::NoSourceConfigured => {
                println!("{}", dim("Hint: run 'orgtree init' and set [source] path"));
            }
            ConfigWarning::SourceMissing { .. } => {
                println!("{}", dim("Hint: paths resolve relative to the config file"));
            }
            _ => {}
        }
    }
}
