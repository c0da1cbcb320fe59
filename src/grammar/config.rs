use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::options::{ConfigError, OptionKind, OptionStore, OptionValue};

pub const ALLOW_QUOTED_STRING: &str = "AllowQuotedString";
pub const ALLOW_OBSOLETE: &str = "AllowObsolete";
pub const REQUIRE_BASIC_DOMAIN_NAME: &str = "RequireBasicDomainName";
pub const ALLOW_DOMAIN_LITERAL: &str = "AllowDomainLiteral";
pub const ALLOW_COMMENTS_FOLDING_WHITESPACE: &str = "AllowCommentsFoldingWhitespace";
pub const REQUIRE_TLD: &str = "RequireTLD";
pub const REQUIRE_KNOWN_TLD: &str = "RequireKnownTLD";
pub const ALLOW_LOCAL: &str = "AllowLocal";
pub const ALLOW_RESERVED: &str = "AllowReserved";
pub const ALLOW_GEOGRAPHIC: &str = "AllowGeographic";
pub const ALLOW_LOCALIZED: &str = "AllowLocalized";
pub const ALLOW_DYNAMIC: &str = "AllowDynamic";
pub const TLD_BLACKLIST: &str = "TLDBlacklist";
pub const DOMAIN_BLACKLIST: &str = "DomainBlacklist";
pub const CHECK_FOR_MX: &str = "CheckForMX";

const FLAG_DEFAULTS: [(&str, bool); 13] = [
    (ALLOW_QUOTED_STRING, true),
    (ALLOW_OBSOLETE, false),
    (REQUIRE_BASIC_DOMAIN_NAME, true),
    (ALLOW_DOMAIN_LITERAL, false),
    (ALLOW_COMMENTS_FOLDING_WHITESPACE, false),
    (REQUIRE_TLD, true),
    (REQUIRE_KNOWN_TLD, true),
    (ALLOW_LOCAL, false),
    (ALLOW_RESERVED, false),
    (ALLOW_GEOGRAPHIC, true),
    (ALLOW_LOCALIZED, false),
    (ALLOW_DYNAMIC, false),
    (CHECK_FOR_MX, false),
];

fn default_flag(name: &str) -> bool {
    FLAG_DEFAULTS
        .iter()
        .find(|(flag, _)| *flag == name)
        .is_some_and(|(_, value)| *value)
}

/// Named bundles of grammar flags.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standard {
    /// Dot-atom local parts and basic domain names only.
    Basic,
    Rfc5321,
    Rfc5322,
}

impl Standard {
    /// The flags a preset owns. Everything else is left alone.
    pub fn flags(self) -> [(&'static str, bool); 5] {
        let (quoted, obsolete, basic_domain, literal, cfws) = match self {
            Self::Basic => (false, false, true, false, false),
            Self::Rfc5321 => (true, false, false, true, false),
            Self::Rfc5322 => (false, true, false, true, true),
        };
        [
            (ALLOW_QUOTED_STRING, quoted),
            (ALLOW_OBSOLETE, obsolete),
            (REQUIRE_BASIC_DOMAIN_NAME, basic_domain),
            (ALLOW_DOMAIN_LITERAL, literal),
            (ALLOW_COMMENTS_FOLDING_WHITESPACE, cfws),
        ]
    }

    pub fn apply(self, store: &mut OptionStore) {
        for (name, value) in self.flags() {
            store.set(name, value);
        }
    }
}

impl FromStr for Standard {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "5321" | "rfc5321" | "rfc-5321" => Ok(Self::Rfc5321),
            "5322" | "rfc5322" | "rfc-5322" => Ok(Self::Rfc5322),
            other => Err(ConfigError::unknown_standard(other)),
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Basic => "basic",
            Self::Rfc5321 => "rfc5321",
            Self::Rfc5322 => "rfc5322",
        })
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalPartForm {
    DotAtom,
    #[default]
    DotAtomOrQuotedString,
    /// Dot-separated atoms and quoted strings, CFWS around the dots.
    Obsolete,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainNameForm {
    /// At least two labels, the last one 2 to 6 letters.
    #[default]
    Basic,
    Full,
}

/// Post-parse acceptance rules.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptancePolicy {
    pub require_tld: bool,
    pub require_known_tld: bool,
    pub allow_local: bool,
    pub allow_reserved: bool,
    pub allow_geographic: bool,
    pub allow_localized: bool,
    pub allow_dynamic: bool,
    /// Lower-cased.
    pub tld_blacklist: BTreeSet<String>,
    /// Lower-cased.
    pub domain_blacklist: BTreeSet<String>,
    pub check_for_mx: bool,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            require_tld: default_flag(REQUIRE_TLD),
            require_known_tld: default_flag(REQUIRE_KNOWN_TLD),
            allow_local: default_flag(ALLOW_LOCAL),
            allow_reserved: default_flag(ALLOW_RESERVED),
            allow_geographic: default_flag(ALLOW_GEOGRAPHIC),
            allow_localized: default_flag(ALLOW_LOCALIZED),
            allow_dynamic: default_flag(ALLOW_DYNAMIC),
            tld_blacklist: BTreeSet::new(),
            domain_blacklist: BTreeSet::new(),
            check_for_mx: default_flag(CHECK_FOR_MX),
        }
    }
}

/// Immutable snapshot of the active productions, derived per validation.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarConfig {
    pub local_part: LocalPartForm,
    pub domain_name: DomainNameForm,
    pub allow_domain_literal: bool,
    pub allow_cfws: bool,
    pub policy: AcceptancePolicy,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self::derive(&OptionStore::new())
    }
}

impl GrammarConfig {
    /// Declares every grammar option with its default.
    pub fn declare(store: &mut OptionStore) {
        for (name, value) in FLAG_DEFAULTS {
            store.declare(name, OptionKind::Bool, value, false);
        }
        store
            .declare(TLD_BLACKLIST, OptionKind::Array, OptionValue::Array(Vec::new()), false)
            .declare(DOMAIN_BLACKLIST, OptionKind::Array, OptionValue::Array(Vec::new()), false);
    }

    /// Reads the flags from `store`; missing options take their defaults.
    pub fn derive(store: &OptionStore) -> Self {
        let flag = |name: &str| store.flag(name, default_flag(name));
        let lowered = |name: &str| -> BTreeSet<String> {
            store
                .list(name)
                .into_iter()
                .map(|item| item.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|item| !item.is_empty())
                .collect()
        };

        let local_part = if flag(ALLOW_OBSOLETE) {
            LocalPartForm::Obsolete
        } else if flag(ALLOW_QUOTED_STRING) {
            LocalPartForm::DotAtomOrQuotedString
        } else {
            LocalPartForm::DotAtom
        };
        let domain_name = if flag(REQUIRE_BASIC_DOMAIN_NAME) {
            DomainNameForm::Basic
        } else {
            DomainNameForm::Full
        };

        Self {
            local_part,
            domain_name,
            allow_domain_literal: flag(ALLOW_DOMAIN_LITERAL),
            allow_cfws: flag(ALLOW_COMMENTS_FOLDING_WHITESPACE),
            policy: AcceptancePolicy {
                require_tld: flag(REQUIRE_TLD),
                require_known_tld: flag(REQUIRE_KNOWN_TLD),
                allow_local: flag(ALLOW_LOCAL),
                allow_reserved: flag(ALLOW_RESERVED),
                allow_geographic: flag(ALLOW_GEOGRAPHIC),
                allow_localized: flag(ALLOW_LOCALIZED),
                allow_dynamic: flag(ALLOW_DYNAMIC),
                tld_blacklist: lowered(TLD_BLACKLIST),
                domain_blacklist: lowered(DOMAIN_BLACKLIST),
                check_for_mx: flag(CHECK_FOR_MX),
            },
        }
    }

    pub fn for_standard(standard: Standard) -> Self {
        let mut store = OptionStore::new();
        Self::declare(&mut store);
        standard.apply(&mut store);
        Self::derive(&store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_table() {
        let config = GrammarConfig::default();
        assert_eq!(config.local_part, LocalPartForm::DotAtomOrQuotedString);
        assert_eq!(config.domain_name, DomainNameForm::Basic);
        assert!(!config.allow_domain_literal);
        assert!(!config.allow_cfws);
        assert!(config.policy.require_tld);
        assert!(config.policy.require_known_tld);
        assert!(!config.policy.allow_local);
        assert!(!config.policy.allow_reserved);
        assert!(config.policy.allow_geographic);
        assert!(!config.policy.allow_localized);
        assert!(!config.policy.allow_dynamic);
        assert!(!config.policy.check_for_mx);
    }

    #[test]
    fn obsolete_overrides_quoted_string() {
        let mut store = OptionStore::new();
        GrammarConfig::declare(&mut store);
        store.set(ALLOW_QUOTED_STRING, false);
        store.set(ALLOW_OBSOLETE, true);
        assert_eq!(GrammarConfig::derive(&store).local_part, LocalPartForm::Obsolete);
    }

    #[test]
    fn preset_only_overwrites_its_own_flags() {
        let mut store = OptionStore::new();
        GrammarConfig::declare(&mut store);
        store.set(ALLOW_DOMAIN_LITERAL, true);
        store.set(ALLOW_LOCAL, true);
        Standard::Basic.apply(&mut store);
        let config = GrammarConfig::derive(&store);
        assert!(!config.allow_domain_literal);
        assert!(config.policy.allow_local);
        assert_eq!(config.local_part, LocalPartForm::DotAtom);
    }

    #[test]
    fn rfc5322_preset() {
        let config = GrammarConfig::for_standard(Standard::Rfc5322);
        assert_eq!(config.local_part, LocalPartForm::Obsolete);
        assert_eq!(config.domain_name, DomainNameForm::Full);
        assert!(config.allow_domain_literal);
        assert!(config.allow_cfws);
    }

    #[test]
    fn blacklists_are_normalized() {
        let mut store = OptionStore::new();
        GrammarConfig::declare(&mut store);
        store.set(TLD_BLACKLIST, vec![".RU", " cn ", ""]);
        store.set(DOMAIN_BLACKLIST, "Spam.Example");
        let policy = GrammarConfig::derive(&store).policy;
        assert!(policy.tld_blacklist.contains("ru"));
        assert!(policy.tld_blacklist.contains("cn"));
        assert_eq!(policy.tld_blacklist.len(), 2);
        assert!(policy.domain_blacklist.contains("spam.example"));
    }

    #[test]
    fn unknown_standard_is_a_config_error() {
        assert_eq!("5321".parse::<Standard>().unwrap(), Standard::Rfc5321);
        assert!(matches!(
            "rfc822".parse::<Standard>(),
            Err(ConfigError::UnknownStandard { .. })
        ));
    }
}
