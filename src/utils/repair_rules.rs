//! Ordered repair rules applied by [`UrlNormalizer`](super::url_normalizer::UrlNormalizer).
//!
//! Each rule is a pure `&str -> Option<String>` step. A rule returns `Some`
//! only with a URL that passes [`parse_candidate`]; `None` hands the input
//! to the next rule in [`RepairRule::PIPELINE`].

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use super::s3_host::complete_s3_host;

/// A well-formed protocol token, case-insensitive.
static PROTOCOL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)https?://").unwrap());

/// `.org` glued to a protocol that lost its colon: `example.orghttps//cdn...`.
static MALFORMED_PROTOCOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.org(?P<scheme>https?)//").unwrap());

/// Same artifact without the leading dot, for suffixes that are not a real domain.
static MALFORMED_PROTOCOL_LOOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)org(?P<scheme>https?)//").unwrap());

/// A single step of the normalization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairRule {
    /// `...orghttps//host/path` becomes `https://host/path`.
    MalformedProtocol,
    /// Two or more protocols: the rightmost candidate that parses wins.
    RightmostOccurrence,
    /// One protocol preceded by garbage: everything before it is dropped.
    EmbeddedOccurrence,
    /// The whole string is already a usable URL.
    DirectParse,
}

impl RepairRule {
    /// Rules in evaluation order. The first one returning `Some` wins.
    pub const PIPELINE: [RepairRule; 4] = [
        RepairRule::MalformedProtocol,
        RepairRule::RightmostOccurrence,
        RepairRule::EmbeddedOccurrence,
        RepairRule::DirectParse,
    ];

    /// Stable name used in logs and metric labels.
    pub fn name(self) -> &'static str {
        match self {
            RepairRule::MalformedProtocol => "malformed_protocol",
            RepairRule::RightmostOccurrence => "rightmost_occurrence",
            RepairRule::EmbeddedOccurrence => "embedded_occurrence",
            RepairRule::DirectParse => "direct_parse",
        }
    }

    /// Runs the rule against already trimmed, non-empty input.
    pub fn apply(self, input: &str) -> Option<String> {
        match self {
            RepairRule::MalformedProtocol => repair_malformed_protocol(input),
            RepairRule::RightmostOccurrence => extract_rightmost_occurrence(input),
            RepairRule::EmbeddedOccurrence => extract_embedded_occurrence(input),
            RepairRule::DirectParse => parse_direct(input),
        }
    }
}

/// Parses `candidate` and keeps it only if it has a host that does not contain `http`.
///
/// A host containing `http` is what a mis-split concatenation such as
/// `http://xhttp://y` produces, so such parses are never trusted.
pub fn parse_candidate(candidate: &str) -> Option<Url> {
    let url = Url::parse(candidate).ok()?;
    let host = url.host_str()?;

    if host.is_empty() || host.to_ascii_lowercase().contains("http") {
        return None;
    }

    Some(url)
}

/// Byte offsets of every `http://` / `https://` token, left to right.
pub fn protocol_offsets(input: &str) -> Vec<usize> {
    PROTOCOL.find_iter(input).map(|m| m.start()).collect()
}

/// Parses, then completes a truncated S3 host. Returns the canonical serialization.
fn accept(candidate: &str) -> Option<String> {
    parse_candidate(candidate)
        .map(complete_s3_host)
        .map(String::from)
}

/// Runs [`RepairRule::PIPELINE`] and reports which rule produced the URL.
pub fn repair(input: &str) -> Option<(RepairRule, String)> {
    RepairRule::PIPELINE
        .into_iter()
        .find_map(|rule| rule.apply(input).map(|url| (rule, url)))
}

/// Rules after [`RepairRule::MalformedProtocol`], used to settle a rebuilt string.
fn extract(input: &str) -> Option<String> {
    extract_rightmost_occurrence(input)
        .or_else(|| extract_embedded_occurrence(input))
        .or_else(|| parse_direct(input))
}

/// Repairs `<suffix>https//rest` into `https://rest`.
///
/// Tries the strict `.org` pattern first and the dot-less one only if the strict
/// pattern produced nothing usable. Within a pattern, the rightmost artifact is
/// tried first. The rebuilt string goes through the extraction rules, so a
/// repaired URL that still carries concatenated garbage settles the same way a
/// second normalization pass would.
pub fn repair_malformed_protocol(input: &str) -> Option<String> {
    [&*MALFORMED_PROTOCOL, &*MALFORMED_PROTOCOL_LOOSE]
        .into_iter()
        .find_map(|pattern| {
            let artifacts: Vec<_> = pattern.captures_iter(input).collect();

            artifacts.iter().rev().find_map(|caps| {
                let token = caps.get(0)?;
                let scheme = caps.name("scheme")?.as_str().to_ascii_lowercase();
                let rest = &input[token.end()..];

                if rest.is_empty() {
                    return None;
                }

                extract(&format!("{scheme}://{rest}"))
            })
        })
}

/// With two or more protocol tokens, walks candidates from the last token back
/// to the first. Each candidate runs from its token to the end of the input.
pub fn extract_rightmost_occurrence(input: &str) -> Option<String> {
    let offsets = protocol_offsets(input);
    if offsets.len() < 2 {
        return None;
    }

    offsets.iter().rev().find_map(|&start| accept(&input[start..]))
}

/// With exactly one protocol token that is not at the start, drops the prefix.
pub fn extract_embedded_occurrence(input: &str) -> Option<String> {
    match protocol_offsets(input).as_slice() {
        [start] if *start > 0 => accept(&input[*start..]),
        _ => None,
    }
}

/// Accepts the input as a whole when it already parses.
pub fn parse_direct(input: &str) -> Option<String> {
    accept(input)
}
