//! Typed filter values parsed out of raw query-string parameters.
//!
//! Every recognised filter has a declared value type and a defined behaviour
//! when the parameter is absent:
//!
//! | Kind | Type | Absent / empty |
//! |------|------|----------------|
//! | list membership | [`IdList`] | no clause |
//! | date bound | `Option<String>` via [`date_bound`] | no clause |
//! | row cap | `usize` via [`parse_limit`] | [`DEFAULT_LIMIT`] |

/// Row cap applied to `GET /incidents` when no usable `limit` is supplied.
pub const DEFAULT_LIMIT: usize = 1000;

/// A comma-separated list of identifiers, e.g. `?code=100,110`.
///
/// Elements are trimmed and empty elements dropped, so `" 100, ,110 "` holds
/// exactly `["100", "110"]`. Elements stay opaque text: a non-numeric id is
/// passed to the store as-is and simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList(Vec<String>);

impl IdList {
  pub fn parse(raw: &str) -> Self {
    raw
      .split(',')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .collect()
  }

  /// Parse an optional parameter; `None` yields an empty list.
  pub fn from_param(raw: Option<&str>) -> Self {
    raw.map(Self::parse).unwrap_or_default()
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = &str> { self.0.iter().map(String::as_str) }
}

impl<S: Into<String>> FromIterator<S> for IdList {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self(iter.into_iter().map(Into::into).collect())
  }
}

/// Normalise a date-range bound. Blank values count as absent.
pub fn date_bound(raw: Option<&str>) -> Option<String> {
  raw.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
}

/// Parse a caller-supplied row cap, falling back to [`DEFAULT_LIMIT`] when
/// the value is absent or not a non-negative integer.
pub fn parse_limit(raw: Option<&str>) -> usize {
  raw
    .and_then(|s| s.trim().parse().ok())
    .unwrap_or(DEFAULT_LIMIT)
}
