//! Database source shared by the introspecting commands.

use clap::{Arg, Args, Command, CommandFactory};
use eyre::Result;
use kdb_introspect::{AssembleOptions, Dialect};
use kdb_ir::Metadata;
use tracing::warn;

use crate::commands::Cli;

#[derive(Args)]
pub struct SourceArgs {
    /// Database dialect (mysql, postgresql, sqlite3, mssql)
    pub dialect: Dialect,

    /// Connection string passed to the database driver
    pub url: String,
}

impl SourceArgs {
    /// Connect, introspect and assemble the schema.
    pub fn introspect(&self, options: &AssembleOptions) -> Result<Metadata> {
        let mut conn = kdb_driver::connect(self.dialect, &self.url)?;
        let metadata = self.dialect.assemble(conn.as_mut(), options)?;

        for (table, field) in metadata.unknown_fields() {
            warn!(
                table = %table.source_name,
                column = %field.source_name,
                raw_type = %field.raw_type,
                "Unmapped column type, falling back to String"
            );
        }

        for collision in metadata.name_collisions() {
            warn!(
                table = collision.table,
                emit_name = collision.emit_name,
                sources = %collision.sources.join(", "),
                "Emitted names collide, the generated code will not compile"
            );
        }

        Ok(metadata)
    }

    /// The process command line without the program name or the connection
    /// string. Arguments that are not valid UTF-8 are converted lossily.
    pub fn command_line(&self) -> Vec<String> {
        let args = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned());
        strip_url(&Cli::command(), args, &self.url)
    }
}

/// Drop the connection string positional from `args`.
///
/// Option values are kept even when they equal the URL, and only the first
/// positional matching it is removed.
fn strip_url(cli: &Command, args: impl IntoIterator<Item = String>, url: &str) -> Vec<String> {
    let mut args = args.into_iter();
    let mut subcommand: Option<&Command> = None;
    let mut kept = Vec::new();
    let mut stripped = false;
    let mut escaped = false;

    while let Some(arg) = args.next() {
        if !escaped && arg == "--" {
            escaped = true;
            kept.push(arg);
            continue;
        }

        if !escaped && arg.len() > 1 && arg.starts_with('-') {
            let takes_value = option_takes_next(cli, subcommand, &arg);
            kept.push(arg);
            if takes_value {
                kept.extend(args.next());
            }
            continue;
        }

        if subcommand.is_none() {
            if let Some(found) = cli.find_subcommand(&arg) {
                subcommand = Some(found);
                kept.push(arg);
                continue;
            }
        }

        if !stripped && arg == url {
            stripped = true;
            continue;
        }
        kept.push(arg);
    }

    kept
}

/// Whether the option token consumes the following argument as its value.
fn option_takes_next(cli: &Command, subcommand: Option<&Command>, token: &str) -> bool {
    let known: Vec<&Arg> = cli
        .get_arguments()
        .chain(subcommand.into_iter().flat_map(Command::get_arguments))
        .collect();
    let takes_value = |arg: &Arg| arg.get_action().takes_values();

    if let Some(long) = token.strip_prefix("--") {
        if long.contains('=') {
            return false;
        }
        return known
            .iter()
            .any(|arg| arg.get_long() == Some(long) && takes_value(arg));
    }

    // Short flags may be clustered; a value-taking flag ends the cluster and
    // only reads the next argument when nothing is attached to it.
    let shorts: Vec<char> = token.chars().skip(1).collect();
    for (i, short) in shorts.iter().enumerate() {
        match known.iter().find(|arg| arg.get_short() == Some(*short)) {
            Some(arg) if takes_value(arg) => return i + 1 == shorts.len(),
            Some(_) => {}
            None => return false,
        }
    }
    false
}
