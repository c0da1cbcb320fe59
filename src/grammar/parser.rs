//! Byte-level recursive descent over the address productions.
//!
//! Every production either consumes input and succeeds, or fails. Only CFWS
//! and the repeated `.` separators restore the cursor on failure; the local
//! part and domain alternatives are picked by a one byte lookahead.

use super::config::{DomainNameForm, GrammarConfig, LocalPartForm};
use super::error::GrammarError;
use super::literal;
use super::types::{DomainPart, ParseResult};

const MAX_LOCAL_UNITS: usize = 64;
const MAX_TOTAL_UNITS: usize = 254;
const MAX_LABEL_LEN: usize = 63;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABELS: usize = 127;

fn is_atext(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-/=?^_`{|}~".contains(&b)
}

fn is_wsp(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn is_ctext(b: u8) -> bool {
    matches!(b, 0x01..=0x08 | 0x0B | 0x0C | 0x0E..=0x27 | 0x2A..=0x5B | 0x5D..=0x7F)
}

fn is_qtext(b: u8) -> bool {
    matches!(b, b' ' | b'!' | b'#'..=b'[' | b']'..=b'~')
}

fn is_obs_qtext(b: u8) -> bool {
    matches!(b, 0x01..=0x08 | 0x0B | 0x0C | 0x0E..=0x21 | 0x23..=0x5B | 0x5D..=0x7F)
}

fn is_label_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/// Matches `input` against the productions selected by `config`.
pub fn parse_address(config: &GrammarConfig, input: &str) -> Result<ParseResult, GrammarError> {
    Parser::new(input.as_bytes(), config.allow_cfws).address(config)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    allow_cfws: bool,
    /// Spans of the words of an obsolete local part.
    words: Vec<(usize, usize)>,
}

impl<'a> Parser<'a> {
    fn new(bytes: &'a [u8], allow_cfws: bool) -> Self {
        Self {
            bytes,
            pos: 0,
            allow_cfws,
            words: Vec::new(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8, what: &'static str) -> Result<(), GrammarError> {
        if self.eat(b) {
            Ok(())
        } else {
            Err(GrammarError::expected(what, self.pos))
        }
    }

    fn text(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.bytes[start..end]).into_owned()
    }

    fn address(mut self, config: &GrammarConfig) -> Result<ParseResult, GrammarError> {
        self.cfws();
        let local_start = self.pos;
        let local_units = match config.local_part {
            LocalPartForm::DotAtom => self.dot_atom()?,
            LocalPartForm::DotAtomOrQuotedString if self.peek() == Some(b'"') => {
                self.quoted_string()?
            }
            LocalPartForm::DotAtomOrQuotedString => self.dot_atom()?,
            LocalPartForm::Obsolete => self.obs_local_part()?,
        };
        let local_end = self.pos;

        self.cfws();
        self.expect(b'@', "'@'")?;
        self.cfws();

        let domain_start = self.pos;
        let (domain, domain_units) =
            if config.allow_domain_literal && self.peek() == Some(b'[') {
                self.domain_literal()?
            } else {
                self.domain_name(config.domain_name)?
            };
        let domain_end = self.pos;

        self.cfws();
        if self.pos != self.bytes.len() {
            return Err(GrammarError::expected("end of input", self.pos));
        }

        if local_units > MAX_LOCAL_UNITS {
            return Err(GrammarError::LocalPartTooLong { units: local_units });
        }
        let total_units = local_units + 1 + domain_units;
        if total_units > MAX_TOTAL_UNITS {
            return Err(GrammarError::AddressTooLong { units: total_units });
        }

        let local_part = self.text(local_start, local_end);
        let normalized_local = if self.words.len() > 1 {
            self.words
                .iter()
                .map(|&(start, end)| self.text(start, end))
                .collect::<Vec<_>>()
                .join(".")
        } else {
            local_part.clone()
        };

        Ok(ParseResult {
            local_part,
            normalized_local,
            domain_part: self.text(domain_start, domain_end),
            domain,
            matched_length: self.bytes.len(),
            local_units,
            total_units,
        })
    }

    // ---- whitespace and comments ----

    /// `(CRLF? WSP)*`; returns the number of WSP bytes consumed.
    fn fws(&mut self) -> usize {
        let mut wsp = 0;
        loop {
            let save = self.pos;
            if self.peek() == Some(b'\r') && self.peek_at(1) == Some(b'\n') {
                self.pos += 2;
            }
            match self.peek() {
                Some(b) if is_wsp(b) => {
                    self.pos += 1;
                    wsp += 1;
                }
                _ => {
                    self.pos = save;
                    return wsp;
                }
            }
        }
    }

    /// One comment, nested comments included. Nesting is tracked with a
    /// counter so hostile input cannot grow the stack. Restores the cursor
    /// and returns `false` when no complete comment starts here.
    fn comment(&mut self) -> bool {
        let start = self.pos;
        if !self.eat(b'(') {
            return false;
        }
        let mut depth = 1usize;
        while depth > 0 {
            self.fws();
            match self.peek() {
                Some(b'(') => {
                    self.pos += 1;
                    depth += 1;
                }
                Some(b')') => {
                    self.pos += 1;
                    depth -= 1;
                }
                Some(b'\\') if self.peek_at(1).is_some_and(|b| b <= 0x7F) => self.pos += 2,
                Some(b) if is_ctext(b) => self.pos += 1,
                _ => {
                    self.pos = start;
                    return false;
                }
            }
        }
        true
    }

    /// `FWS (comment FWS)*`, or nothing when CFWS is disabled.
    fn cfws(&mut self) {
        if !self.allow_cfws {
            return;
        }
        self.fws();
        while self.comment() {
            self.fws();
        }
    }

    // ---- local part ----

    fn atom(&mut self) -> Result<usize, GrammarError> {
        let start = self.pos;
        while self.peek().is_some_and(is_atext) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(GrammarError::expected("atom", start));
        }
        Ok(self.pos - start)
    }

    fn dot_atom(&mut self) -> Result<usize, GrammarError> {
        let mut units = self.atom()?;
        while self.peek() == Some(b'.') && self.peek_at(1).is_some_and(is_atext) {
            self.pos += 1;
            units += 1 + self.atom()?;
        }
        Ok(units)
    }

    fn quoted_string(&mut self) -> Result<usize, GrammarError> {
        self.expect(b'"', "'\"'")?;
        let mut units = 0;
        loop {
            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(units);
                }
                Some(b'\\') if self.peek_at(1).is_some_and(|b| (b' '..=b'~').contains(&b)) => {
                    self.pos += 2;
                }
                Some(b) if is_qtext(b) => self.pos += 1,
                _ => return Err(GrammarError::expected("quoted string content", self.pos)),
            }
            units += 1;
        }
    }

    /// Quoted string of the obsolete syntax: control bytes, folding
    /// whitespace and `\` before any byte are allowed.
    fn obs_quoted_string(&mut self) -> Result<usize, GrammarError> {
        self.expect(b'"', "'\"'")?;
        let mut units = 0;
        loop {
            units += self.fws();
            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(units);
                }
                Some(b'\\') if self.peek_at(1).is_some() => self.pos += 2,
                Some(b) if is_obs_qtext(b) => self.pos += 1,
                _ => return Err(GrammarError::expected("quoted string content", self.pos)),
            }
            units += 1;
        }
    }

    fn obs_word(&mut self) -> Result<usize, GrammarError> {
        let start = self.pos;
        let units = if self.peek() == Some(b'"') {
            self.obs_quoted_string()?
        } else {
            self.atom()?
        };
        self.words.push((start, self.pos));
        Ok(units)
    }

    /// `word (CFWS "." CFWS word)*`
    fn obs_local_part(&mut self) -> Result<usize, GrammarError> {
        let mut units = self.obs_word()?;
        loop {
            let save = self.pos;
            self.cfws();
            if !self.eat(b'.') {
                self.pos = save;
                return Ok(units);
            }
            self.cfws();
            match self.obs_word() {
                Ok(word) => units += 1 + word,
                Err(_) => {
                    self.pos = save;
                    return Ok(units);
                }
            }
        }
    }

    // ---- domain ----

    fn label(&mut self) -> Result<&'a [u8], GrammarError> {
        let bytes = self.bytes;
        let start = self.pos;
        while self.peek().is_some_and(is_label_byte) {
            self.pos += 1;
        }
        let label = &bytes[start..self.pos];
        let (Some(first), Some(last)) = (label.first(), label.last()) else {
            return Err(GrammarError::expected("domain label", start));
        };
        if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
            return Err(GrammarError::expected("alphanumeric label boundary", start));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(GrammarError::LabelTooLong { at: start });
        }
        Ok(label)
    }

    fn domain_name(&mut self, form: DomainNameForm) -> Result<(DomainPart, usize), GrammarError> {
        let mut labels = vec![self.label()?];
        loop {
            let save = self.pos;
            self.cfws();
            if !self.eat(b'.') {
                self.pos = save;
                break;
            }
            self.cfws();
            labels.push(self.label()?);
        }

        let min_labels = match form {
            DomainNameForm::Basic => 2,
            DomainNameForm::Full => 1,
        };
        if labels.len() < min_labels || labels.len() > MAX_LABELS {
            return Err(GrammarError::LabelCount {
                count: labels.len(),
            });
        }
        if form == DomainNameForm::Basic {
            let tld = labels[labels.len() - 1];
            if !(2..=6).contains(&tld.len()) || !tld.iter().all(u8::is_ascii_alphabetic) {
                return Err(GrammarError::InvalidTld {
                    tld: String::from_utf8_lossy(tld).into_owned(),
                });
            }
        }

        let name = labels
            .iter()
            .map(|label| String::from_utf8_lossy(label).to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(".");
        if name.len() > MAX_DOMAIN_LEN {
            return Err(GrammarError::DomainTooLong { length: name.len() });
        }
        let units = name.len();
        Ok((DomainPart::Name(name), units))
    }

    fn domain_literal(&mut self) -> Result<(DomainPart, usize), GrammarError> {
        let start = self.pos;
        self.expect(b'[', "'['")?;
        let tagged = self
            .bytes
            .get(self.pos..self.pos + 5)
            .is_some_and(|tag| tag.eq_ignore_ascii_case(b"IPv6:"));
        if tagged {
            self.pos += 5;
        }
        let body_start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_hexdigit() || b == b':' || b == b'.')
        {
            self.pos += 1;
        }
        let body = self.text(body_start, self.pos);
        self.expect(b']', "']'")?;

        let addr = literal::parse_literal(&body, tagged).ok_or_else(|| {
            GrammarError::InvalidLiteral {
                literal: self.text(start, self.pos),
            }
        })?;
        Ok((DomainPart::Literal(addr), self.pos - start))
    }
}
