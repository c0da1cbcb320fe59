//! Domain literal bodies: IPv4, IPv6 and IPv4-mapped IPv6.
//!
//! The textual forms are stricter than `std::net`'s parsers (no leading zero
//! octets, explicit group limits around `::`), so they are recognized here and
//! only the final value is built with `std::net` types.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Parses the text between `[` and `]`. `tagged` is set when the body was
/// preceded by the case-insensitive `IPv6:` tag.
pub(crate) fn parse_literal(body: &str, tagged: bool) -> Option<IpAddr> {
    if tagged {
        parse_ipv6(body)
            .or_else(|| parse_ipv4_mapped(body))
            .map(IpAddr::V6)
    } else {
        parse_ipv4(body).map(IpAddr::V4)
    }
}

pub(crate) fn parse_ipv4(text: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = text.split('.');
    for octet in &mut octets {
        *octet = parse_octet(parts.next()?)?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

fn parse_octet(text: &str) -> Option<u8> {
    let bytes = text.as_bytes();
    if bytes.is_empty() || bytes.len() > 3 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    text.parse::<u8>().ok()
}

fn parse_group(text: &str) -> Option<u16> {
    if text.is_empty() || text.len() > 4 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(text, 16).ok()
}

/// Colon-separated groups, no empty group allowed. The empty string is zero
/// groups.
fn parse_groups(text: &str) -> Option<Vec<u16>> {
    if text.is_empty() {
        return Some(Vec::new());
    }
    text.split(':').map(parse_group).collect()
}

/// Groups of an IPv6 text with `width` groups in total: either exactly
/// `width` explicit groups or one `::` with at most `max_compressed`
/// explicit ones.
fn expand_groups(text: &str, width: usize, max_compressed: usize) -> Option<Vec<u16>> {
    match text.find("::") {
        None => {
            let groups = parse_groups(text)?;
            (groups.len() == width).then_some(groups)
        }
        Some(at) => {
            let (head, tail) = (&text[..at], &text[at + 2..]);
            if tail.contains("::") {
                return None;
            }
            let head = parse_groups(head)?;
            let tail = parse_groups(tail)?;
            if head.len() + tail.len() > max_compressed {
                return None;
            }
            let mut groups = head;
            groups.resize(width - tail.len(), 0);
            groups.extend(tail);
            Some(groups)
        }
    }
}

pub(crate) fn parse_ipv6(text: &str) -> Option<Ipv6Addr> {
    let groups = expand_groups(text, 8, 7)?;
    let mut segments = [0u16; 8];
    segments.copy_from_slice(&groups);
    Some(Ipv6Addr::from(segments))
}

/// `x:x:x:x:x:x:d.d.d.d`, or a compressed prefix with at most five explicit
/// groups before the IPv4 part.
pub(crate) fn parse_ipv4_mapped(text: &str) -> Option<Ipv6Addr> {
    let split = text.rfind(':')?;
    let (prefix, v4) = (&text[..=split], &text[split + 1..]);
    let v4 = parse_ipv4(v4)?;

    // a trailing "::" belongs to the groups, a single trailing ':' separates
    // them from the IPv4 part.
    let body = if prefix.ends_with("::") {
        prefix
    } else {
        prefix.strip_suffix(':')?
    };
    let groups = expand_groups(body, 6, 5)?;

    let [a, b, c, d] = v4.octets();
    let mut segments = [0u16; 8];
    segments[..6].copy_from_slice(&groups);
    segments[6] = u16::from_be_bytes([a, b]);
    segments[7] = u16::from_be_bytes([c, d]);
    Some(Ipv6Addr::from(segments))
}
