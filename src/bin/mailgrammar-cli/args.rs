use anyhow::{Context, Result};
use clap::Parser;
use mailgrammar_lib::OptionValue;

#[derive(Parser)]
#[command(name = "mailgrammar-cli", version)]
pub struct Cli {
    /// adresses à valider (source custom)
    pub emails: Vec<String>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// source: post|get|cookie|env|server|session|request|custom (ou code numérique)
    #[arg(long, default_value = "custom")]
    pub source: String,

    /// nom du champ à lire dans la source
    #[arg(long, default_value = "mail")]
    pub key: String,

    /// paire KEY=VALUE servie par la source (répétable)
    #[arg(long = "data", value_name = "KEY=VALUE")]
    pub data: Vec<String>,

    /// préréglage: basic|rfc5321|rfc5322
    #[arg(long)]
    pub standard: Option<String>,

    /// accepte les littéraux de domaine ([1.2.3.4], [IPv6:...])
    #[arg(long)]
    pub allow_domain_literal: bool,

    /// accepte commentaires et espaces repliés (CFWS)
    #[arg(long)]
    pub allow_cfws: bool,

    /// accepte la syntaxe obsolète de la partie locale
    #[arg(long)]
    pub allow_obsolete: bool,

    /// option brute NAME=VALUE, appliquée en dernier (répétable)
    #[arg(long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// TLD interdits (séparés par des virgules)
    #[arg(long, value_delimiter = ',')]
    pub tld_blacklist: Vec<String>,

    /// domaines interdits (séparés par des virgules)
    #[arg(long, value_delimiter = ',')]
    pub domain_blacklist: Vec<String>,

    /// exige un enregistrement MX (feature `with-mx`)
    #[arg(long)]
    pub check_mx: bool,

    /// timeout de la requête MX (ms)
    #[cfg(feature = "with-mx")]
    #[arg(long, default_value_t = 5_000)]
    pub mx_timeout_ms: u64,

    /// fichier JSON d'options {"AllowLocal": true, ...}
    #[cfg(feature = "with-serde")]
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// write report to file (JSON/NDJSON/CSV selon --format)
    #[arg(long)]
    pub out: Option<String>,

    /// logs de debug (sinon RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn data_pairs(&self) -> Result<Vec<(String, String)>> {
        self.data
            .iter()
            .map(|raw| {
                split_pair(raw)
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .with_context(|| format!("--data '{raw}' is not KEY=VALUE"))
            })
            .collect()
    }

    pub fn raw_options(&self) -> Result<Vec<(String, OptionValue)>> {
        self.options
            .iter()
            .map(|raw| {
                split_pair(raw)
                    .map(|(name, value)| (name.trim().to_string(), option_value(value)))
                    .with_context(|| format!("--option '{raw}' is not NAME=VALUE"))
            })
            .collect()
    }
}

fn split_pair(raw: &str) -> Option<(&str, &str)> {
    raw.split_once('=').filter(|(key, _)| !key.trim().is_empty())
}

/// `a,b` becomes an array, anything else a string coerced by the option kind.
fn option_value(raw: &str) -> OptionValue {
    if raw.contains(',') {
        OptionValue::Array(
            raw.split(',')
                .map(|item| OptionValue::Str(item.trim().to_string()))
                .collect(),
        )
    } else {
        OptionValue::Str(raw.trim().to_string())
    }
}
