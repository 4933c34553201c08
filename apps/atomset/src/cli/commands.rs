//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::OutputMode;
use crate::error::CliError;
use crate::fixture::{Fixture, QuerySpec};
use atomset_core::{Atom, AtomTable, Handle, HandleSet, TypeRegistry, render, render_atom};
use std::io::Write;
use std::path::Path;

fn write_line(out: &mut impl Write, line: &str) -> Result<(), CliError> {
    writeln!(out, "{}", line).map_err(|e| CliError::Output(e.to_string()))
}

fn write_json(out: &mut impl Write, value: &serde_json::Value) -> Result<(), CliError> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))?;
    write_line(out, &text)
}

fn load_table(path: &Path) -> Result<(Fixture, AtomTable), CliError> {
    let fixture = Fixture::load(path)?;
    let table = fixture.build_table()?;
    Ok((fixture, table))
}

fn type_label(table: &AtomTable, atom: &Atom) -> String {
    table
        .type_name(atom.atom_type())
        .map(str::to_string)
        .unwrap_or_else(|| format!("type{}", atom.atom_type().code()))
}

// =============================================================================
// INSPECT COMMAND
// =============================================================================

/// Print every atom of a fixture in handle order.
pub fn cmd_inspect(
    fixture_path: &Path,
    mode: OutputMode,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (_, table) = load_table(fixture_path)?;

    if mode.json {
        let atoms: Vec<serde_json::Value> = table
            .atoms()
            .map(|(handle, atom)| {
                serde_json::json!({
                    "handle": handle.value(),
                    "type": type_label(&table, atom),
                    "name": atom.name(),
                    "outgoing": atom.outgoing().iter().map(|h| h.value()).collect::<Vec<_>>(),
                    "sti": atom.attention().sti,
                    "lti": atom.attention().lti,
                    "truth": atom.truth().kind(),
                    "versions": atom.truth().as_composite().map_or(0, |c| c.version_count()),
                    "primary": atom.truth().as_composite().map(|c| c.primary().kind()),
                    "marked": atom.is_marked_for_removal(),
                })
            })
            .collect();
        let output = serde_json::json!({
            "fixture": fixture_path.to_string_lossy(),
            "atom_count": table.len(),
            "type_count": table.classes().len(),
            "atoms": atoms,
        });
        return write_json(out, &output);
    }

    if !mode.quiet {
        write_line(out, "atomset Atom Table")?;
        write_line(out, "==================")?;
        write_line(out, &format!("Fixture: {}", fixture_path.display()))?;
        write_line(out, &format!("Atoms:   {}", table.len()))?;
        write_line(out, &format!("Types:   {}", table.classes().len()))?;
        write_line(out, "")?;
    }

    for (handle, atom) in table.atoms() {
        let mut line = format!(
            "{:<6} {:<16} {:<24} sti={:<5} truth={}",
            handle.to_string(),
            type_label(&table, atom),
            render_atom(handle, &table),
            atom.attention().sti(),
            atom.truth().kind(),
        );
        if let Some(composite) = atom.truth().as_composite().filter(|_| mode.verbose) {
            line.push_str(&format!(
                " versions={} primary={}",
                composite.version_count(),
                composite.primary().kind()
            ));
        }
        if atom.is_marked_for_removal() {
            line.push_str(" [marked]");
        }
        write_line(out, &line)?;
    }

    Ok(())
}

// =============================================================================
// EVAL COMMAND
// =============================================================================

/// Evaluate one stored query, or all of them in file order.
pub fn cmd_eval(
    fixture_path: &Path,
    query_name: Option<&str>,
    mode: OutputMode,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (fixture, table) = load_table(fixture_path)?;

    let selected: Vec<&QuerySpec> = match query_name {
        Some(name) => vec![
            fixture
                .query(name)
                .ok_or_else(|| CliError::UnknownQuery(name.to_string()))?,
        ],
        None => fixture.queries.iter().collect(),
    };

    let mut results: Vec<(&QuerySpec, HandleSet)> = Vec::with_capacity(selected.len());
    for spec in selected {
        let query = spec.resolve(&table)?;
        let set = query.evaluate(&table)?;
        tracing::info!(query = %spec.name, matched = set.len(), "query evaluated");
        results.push((spec, set));
    }

    if mode.json {
        let output: Vec<serde_json::Value> = results
            .iter()
            .map(|(spec, set)| {
                serde_json::json!({
                    "query": spec.name,
                    "count": set.len(),
                    "handles": set.iter().map(Handle::value).collect::<Vec<_>>(),
                    "rendered": render(set, &table),
                })
            })
            .collect();
        return write_json(out, &serde_json::Value::Array(output));
    }

    if !mode.quiet {
        write_line(out, "atomset Query Results")?;
        write_line(out, "=====================")?;
        write_line(out, &format!("Fixture: {}", fixture_path.display()))?;
        write_line(out, "")?;
    }

    for (spec, set) in &results {
        write_line(out, &format!("{} ({}): {}", spec.name, set.len(), render(set, &table)))?;
        if mode.verbose {
            let criteria = spec
                .resolve(&table)?
                .criteria
                .iter()
                .map(|c| c.label())
                .collect::<Vec<_>>()
                .join(", ");
            write_line(out, &format!("  sources: {}", spec.sources.len()))?;
            write_line(out, &format!("  criteria: {}", criteria))?;
        }
    }

    Ok(())
}
