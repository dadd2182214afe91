//! Google Maps URL → place identifier resolution.
//!
//! Shared links come in many shapes: `?place_id=` / `?query_place_id=`
//! parameters, opaque `data=!4m2!3m1!1s…` path segments carrying a feature id,
//! or just a `/place/<Name>/` path. [`resolve`] tries each heuristic in
//! priority order and never fails: anything it cannot make sense of comes back
//! as [`ResolvedIdentifier::Unresolved`].

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

use crate::types::{ResolvedIdentifier, UnresolvedReason};

/// Query parameters that carry a place id verbatim.
const PLACE_ID_PARAMS: &[&str] = &["place_id", "query_place_id", "placeid"];

/// A `data=` token: numeric field tag, type letter `s` (string), value.
static DATA_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+s(.+)$").expect("valid data token regex"));

/// Places API id, e.g. `ChIJa147K9HX3IAR5sqXKl9ss8E`.
static PLACES_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ChI[A-Za-z0-9_-]{10,}$").expect("valid place id regex"));

/// Maps feature id, e.g. `0x808580af3cd399d1:0xffceeb92a11a5a6d`.
static FEATURE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0x[0-9a-fA-F]+:0x[0-9a-fA-F]+$").expect("valid feature id regex")
});

static PERCENT_ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[0-9A-Fa-f]{2}").expect("valid percent escape regex"));

/// Resolves a Google Maps URL to a place id or a search query.
///
/// Priority order, first success wins:
/// 1. a `place_id`-like query parameter (or `q=place_id:<id>`);
/// 2. a place-id-shaped token inside the `data=` segment;
/// 3. the decoded name from the segment after `/place/`.
///
/// Unparseable input yields `Unresolved(Malformed)`; URLs with neither an id
/// nor a `/place/` segment yield `Unresolved(NoPlaceSegment)`.
#[must_use]
pub fn resolve(raw: &str) -> ResolvedIdentifier {
    let Some(url) = parse_absolute(raw) else {
        return ResolvedIdentifier::Unresolved(UnresolvedReason::Malformed);
    };

    if let Some(id) = place_id_from_query(&url) {
        return ResolvedIdentifier::PlaceId(id);
    }

    if let Some(id) = place_id_from_data(&url) {
        return ResolvedIdentifier::PlaceId(id);
    }

    match place_name_from_path(&url) {
        Ok(name) => ResolvedIdentifier::SearchQuery(name),
        Err(reason) => ResolvedIdentifier::Unresolved(reason),
    }
}

/// Extracts just the human-readable name from the `/place/` segment.
///
/// Returns `None` when the URL is malformed or has no usable name.
#[must_use]
pub fn place_name(raw: &str) -> Option<String> {
    parse_absolute(raw).and_then(|url| place_name_from_path(&url).ok())
}

/// `true` for a Maps feature id (`0x…:0x…`), which Place Details does not
/// accept as a `place_id`.
#[must_use]
pub fn is_feature_id(id: &str) -> bool {
    FEATURE_ID_RE.is_match(id)
}

fn parse_absolute(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.host_str().filter(|h| !h.is_empty())?;
    Some(url)
}

fn place_id_from_query(url: &Url) -> Option<String> {
    for (key, value) in url.query_pairs() {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if PLACE_ID_PARAMS
            .iter()
            .any(|p| key.eq_ignore_ascii_case(p))
        {
            return Some(value.to_owned());
        }
        if key == "q" {
            if let Some(id) = value.strip_prefix("place_id:") {
                let id = id.trim();
                if !id.is_empty() {
                    return Some(id.to_owned());
                }
            }
        }
    }
    None
}

fn place_id_from_data(url: &Url) -> Option<String> {
    let from_path = url
        .path_segments()
        .into_iter()
        .flatten()
        .find_map(|seg| seg.strip_prefix("data=").map(str::to_owned));
    let from_query = || {
        url.query_pairs()
            .find(|(k, _)| k == "data")
            .map(|(_, v)| v.into_owned())
    };
    let data = from_path.or_else(from_query)?;
    let data = percent_decode_str(&data).decode_utf8_lossy();
    scan_data_tokens(&data)
}

/// Scans a `!`-delimited token list for an id. A Places id beats a feature id.
pub(crate) fn scan_data_tokens(data: &str) -> Option<String> {
    let mut feature_id = None;
    for token in data.split('!') {
        let Some(value) = DATA_TOKEN_RE
            .captures(token)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
        else {
            continue;
        };
        if PLACES_ID_RE.is_match(value) {
            return Some(value.to_owned());
        }
        if feature_id.is_none() && FEATURE_ID_RE.is_match(value) {
            feature_id = Some(value.to_owned());
        }
    }
    feature_id
}

fn place_name_from_path(url: &Url) -> Result<String, UnresolvedReason> {
    let mut segments = url.path_segments().ok_or(UnresolvedReason::NoPlaceSegment)?;
    segments
        .by_ref()
        .find(|seg| seg.eq_ignore_ascii_case("place"))
        .ok_or(UnresolvedReason::NoPlaceSegment)?;
    let raw = segments.next().unwrap_or_default();
    if raw.is_empty() || raw.starts_with('@') || raw.starts_with("data=") {
        return Err(UnresolvedReason::EmptyName);
    }

    let name = decode_name(raw)?;
    if name.is_empty() {
        return Err(UnresolvedReason::EmptyName);
    }
    Ok(name)
}

/// `+`/`-` → space, then percent-decode. A second pass handles
/// double-encoded input such as `%2520`.
pub(crate) fn decode_name(raw: &str) -> Result<String, UnresolvedReason> {
    let spaced = raw.replace(['+', '-'], " ");
    let mut decoded = percent_decode_str(&spaced)
        .decode_utf8()
        .map_err(|_| UnresolvedReason::Malformed)?
        .into_owned();

    if PERCENT_ESCAPE_RE.is_match(&decoded) {
        if let Ok(again) = percent_decode_str(&decoded).decode_utf8() {
            decoded = again.into_owned();
        }
    }

    Ok(decoded.split_whitespace().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
