#[cfg(any(feature = "with-serde", feature = "with-csv"))]
use anyhow::Context;
use anyhow::{Result, bail};

use crate::args::Cli;
use mailgrammar_lib::{InputSource, MailAddressValidator, RejectionKind};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
pub struct OutputRow {
    pub input: String,
    pub source: &'static str,
    pub valid: bool,
    pub is_request: bool,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub sanitized: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub kind: Option<RejectionKind>,
    pub message: String,
}

impl OutputRow {
    pub fn from_validator(
        input: &str,
        source: InputSource,
        validator: &MailAddressValidator,
    ) -> Self {
        let outcome = validator.outcome();
        Self {
            input: input.to_string(),
            source: source.name(),
            valid: outcome.is_some_and(|o| o.valid),
            is_request: validator.is_request(),
            sanitized: outcome.and_then(|o| o.sanitized_value.clone()),
            kind: outcome.and_then(|o| o.kind()),
            message: validator.message().to_string(),
        }
    }
}

pub fn write_reports(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(rows),
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

pub fn any_invalid(rows: &[OutputRow]) -> bool {
    rows.iter().any(|row| !row.valid)
}

fn write_human(rows: &[OutputRow]) -> Result<()> {
    for row in rows {
        let tag = match (row.valid, row.is_request) {
            (true, _) => "[OK]     ",
            (false, true) => "[INVALID]",
            (false, false) => "[MISSING]",
        };
        match (&row.sanitized, row.kind) {
            (Some(sanitized), None) => {
                println!("{tag} {} ({}) -> {sanitized}", row.input, row.source)
            }
            (_, Some(kind)) => {
                println!("{tag} {} ({}) :: {kind:?}: {}", row.input, row.source, row.message)
            }
            (None, None) => println!("{tag} {} ({})", row.input, row.source),
        }
    }
    Ok(())
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    let mut buf = serde_json::to_vec_pretty(rows)?;
    buf.push(b'\n');
    emit(cli, &buf)
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    let mut buf = Vec::new();
    for row in rows {
        serde_json::to_writer(&mut buf, row)?;
        buf.push(b'\n');
    }
    emit(cli, &buf)
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["input", "source", "valid", "is_request", "sanitized", "kind", "message"])?;
    for row in rows {
        let kind = row.kind.map(|kind| format!("{kind:?}")).unwrap_or_default();
        wtr.write_record([
            row.input.as_str(),
            row.source,
            if row.valid { "true" } else { "false" },
            if row.is_request { "true" } else { "false" },
            row.sanitized.as_deref().unwrap_or(""),
            kind.as_str(),
            row.message.as_str(),
        ])?;
    }
    let data = wtr.into_inner()?;
    emit(cli, &data)
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=csv nécessite la feature 'with-csv'")
}

/// Machine formats go to `--out` when given, stdout otherwise.
#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn emit(cli: &Cli, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    match &cli.out {
        Some(path) => write_all_atomically(path, bytes),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}
