mod args;
mod output;

use anyhow::{Context, Result, bail};
use mailgrammar_lib::{InputSource, MailAddressValidator, RequestInputs};

use std::io::{self, BufRead};
use std::sync::Arc;

use crate::args::Cli;
use crate::output::{OutputRow, any_invalid, write_reports};

#[cfg(feature = "with-tracing")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // déjà initialisé: on garde l'existant
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(not(feature = "with-tracing"))]
fn init_tracing(_verbose: bool) {}

fn build_validator(cli: &Cli) -> Result<MailAddressValidator> {
    let mut validator = match cli.standard.as_deref() {
        Some(name) => MailAddressValidator::with_standard(name)?,
        None => MailAddressValidator::default(),
    };

    #[cfg(feature = "with-serde")]
    {
        if let Some(path) = &cli.config {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            validator
                .apply_json_options(&json)
                .with_context(|| format!("apply config {}", path.display()))?;
        }
    }

    if cli.allow_domain_literal {
        validator.set_allow_domain_literal(true);
    }
    if cli.allow_cfws {
        validator.set_allow_comments_folding_whitespace(true);
    }
    if cli.allow_obsolete {
        validator.set_allow_obsolete(true);
    }
    if !cli.tld_blacklist.is_empty() {
        validator.set_tld_blacklist(cli.tld_blacklist.iter().map(String::as_str));
    }
    if !cli.domain_blacklist.is_empty() {
        validator.set_domain_blacklist(cli.domain_blacklist.iter().map(String::as_str));
    }
    for (name, value) in cli.raw_options()? {
        validator.set_option(&name, value);
    }

    if cli.check_mx {
        attach_mx_lookup(&mut validator, cli)?;
    }
    Ok(validator)
}

#[cfg(feature = "with-mx")]
fn attach_mx_lookup(validator: &mut MailAddressValidator, cli: &Cli) -> Result<()> {
    use mailgrammar_lib::DnsMxLookup;
    use std::time::Duration;

    let lookup = DnsMxLookup::from_system_conf(Duration::from_millis(cli.mx_timeout_ms))
        .context("init DNS resolver")?;
    validator.set_check_for_mx(true).set_mx_lookup(Arc::new(lookup));
    Ok(())
}

#[cfg(not(feature = "with-mx"))]
fn attach_mx_lookup(_: &mut MailAddressValidator, _: &Cli) -> Result<()> {
    bail!("--check-mx nécessite la feature 'with-mx'")
}

fn collect_emails(cli: &Cli) -> Result<Vec<String>> {
    let mut emails = cli.emails.clone();
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            emails.push(line.context("read stdin")?);
        }
    }
    Ok(emails)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let source: InputSource = cli.source.parse()?;
    let data = cli.data_pairs()?;
    let emails = collect_emails(&cli)?;
    let mut validator = build_validator(&cli)?;
    let mut rows = Vec::new();

    if source == InputSource::Custom {
        if !emails.is_empty() {
            for email in &emails {
                validator.set_custom_data([(cli.key.as_str(), email.as_str())]);
                validator.validate(source, &cli.key, None)?;
                rows.push(OutputRow::from_validator(email, source, &validator));
            }
        } else if !data.is_empty() {
            validator.set_custom_data(data);
            validator.validate(source, &cli.key, None)?;
            let input = validator.value().unwrap_or_default().to_string();
            rows.push(OutputRow::from_validator(&input, source, &validator));
        } else {
            Cli::clap_command().print_help()?;
            println!();
            return Ok(());
        }
    } else {
        if !emails.is_empty() {
            bail!("positional addresses and --stdin only apply to --source custom");
        }
        let inputs = match source {
            InputSource::Env => RequestInputs::from_process_env().with(InputSource::Env, data),
            // REQUEST est servi par GET/POST
            InputSource::Request => RequestInputs::new().with(InputSource::Post, data),
            other => RequestInputs::new().with(other, data),
        };
        validator.set_inputs(Arc::new(inputs));
        validator.validate(source, &cli.key, None)?;
        let input = validator.value().unwrap_or_default().to_string();
        rows.push(OutputRow::from_validator(&input, source, &validator));
    }

    write_reports(&rows, &cli)?;

    // codes de sortie : 0 OK, 2 invalids, 1 fatal
    if any_invalid(&rows) {
        std::process::exit(2);
    }
    Ok(())
}
