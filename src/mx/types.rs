/// One mail exchanger. Orders by priority first, lowest wins.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MxHost {
    pub priority: u16,
    /// Lower-cased, without the trailing dot. Empty for a null MX.
    pub host: String,
}

impl MxHost {
    pub fn new(priority: u16, host: impl Into<String>) -> Self {
        Self {
            priority,
            host: host.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.host.is_empty()
    }
}

/// Exchangers published for a domain, sorted and without duplicates.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MxAnswer {
    hosts: Vec<MxHost>,
}

impl MxAnswer {
    pub fn new(mut hosts: Vec<MxHost>) -> Self {
        hosts.sort();
        hosts.dedup();
        Self { hosts }
    }

    pub fn hosts(&self) -> &[MxHost] {
        &self.hosts
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// The preferred exchanger that actually takes mail.
    pub fn primary(&self) -> Option<&MxHost> {
        self.hosts.iter().find(|host| !host.is_null())
    }

    /// False without records and for a null MX (RFC 7505).
    pub fn accepts_mail(&self) -> bool {
        self.primary().is_some()
    }
}
