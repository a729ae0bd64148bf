//! Ordinal marker detection for heading lines (`I.`, `1.`, `A)`).

use once_cell::sync::Lazy;
use regex::Regex;

// Marker token, separator, then whitespace or end of line.
static MARKER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([a-z]+|\d{1,3})[.)](?:\s+|$)").unwrap());

static ROMAN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^m{0,3}(cm|cd|d?c{0,3})(xc|xl|l?x{0,3})(ix|iv|v?i{0,3})$").unwrap()
});

/// Kind of ordinal a marker uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum MarkerFamily {
    /// `I.`, `iv)`, `XII.`
    Roman,
    /// `1.`, `12)`
    Numeric,
    /// `A.`, `b)`
    Alpha,
}

/// A marker found at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    token: String,
}

impl Marker {
    /// Parse the marker at the start of a trimmed line, if any.
    pub fn parse(line: &str) -> Option<Self> {
        let captures = MARKER_PATTERN.captures(line)?;
        let token = captures.get(1)?.as_str();
        let marker = Self {
            token: token.to_string(),
        };
        // Multi-letter tokens only count when they are roman numerals.
        marker.primary_family().map(|_| marker)
    }

    /// The family this marker most likely belongs to when it opens a list.
    ///
    /// A lone `I`/`i` is read as roman (outlines open with `I.`); other
    /// single letters are alphabetic even if they are valid numerals. Once
    /// a roman list is open, [`Marker::continues_roman`] decides whether a
    /// single letter such as `V` or `C` extends it.
    pub fn primary_family(&self) -> Option<MarkerFamily> {
        if self.is_numeric() {
            Some(MarkerFamily::Numeric)
        } else if self.is_roman() && (self.token.len() > 1 || self.token.eq_ignore_ascii_case("i")) {
            Some(MarkerFamily::Roman)
        } else if self.is_single_letter() {
            Some(MarkerFamily::Alpha)
        } else {
            None
        }
    }

    /// Whether this marker can continue a list of the given family.
    pub fn belongs_to(&self, family: MarkerFamily) -> bool {
        match family {
            MarkerFamily::Roman => self.is_roman(),
            MarkerFamily::Numeric => self.is_numeric(),
            MarkerFamily::Alpha => self.is_single_letter(),
        }
    }

    /// Whether this marker extends a roman list whose last heading had the
    /// value `previous`.
    ///
    /// Multi-letter numerals and `I` always do. Other single letters (`V`,
    /// `X`, `L`, `C`, `D`, `M`) are ambiguous with alphabetic sub-lists and
    /// only count when they are the next numeral in sequence.
    pub fn continues_roman(&self, previous: Option<u32>) -> bool {
        let Some(value) = self.roman_value() else {
            return false;
        };
        if self.token.len() > 1 || value == 1 {
            return true;
        }
        previous.map(|p| p + 1 == value).unwrap_or(false)
    }

    /// Numeric value of a roman numeral token.
    pub fn roman_value(&self) -> Option<u32> {
        if !self.is_roman() {
            return None;
        }
        let digits: Vec<u32> = self
            .token
            .chars()
            .map(|c| match c.to_ascii_uppercase() {
                'I' => 1,
                'V' => 5,
                'X' => 10,
                'L' => 50,
                'C' => 100,
                'D' => 500,
                _ => 1000,
            })
            .collect();

        let mut total: i64 = 0;
        for (i, digit) in digits.iter().enumerate() {
            match digits.get(i + 1) {
                Some(next) if next > digit => total -= *digit as i64,
                _ => total += *digit as i64,
            }
        }
        u32::try_from(total).ok()
    }

    /// The marker token without its separator.
    pub fn token(&self) -> &str {
        &self.token
    }

    fn is_numeric(&self) -> bool {
        self.token.chars().all(|c| c.is_ascii_digit())
    }

    fn is_roman(&self) -> bool {
        !self.token.is_empty() && ROMAN_PATTERN.is_match(&self.token)
    }

    fn is_single_letter(&self) -> bool {
        self.token.len() == 1 && self.token.chars().all(|c| c.is_ascii_alphabetic())
    }
}
