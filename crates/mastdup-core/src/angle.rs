// crates/mastdup-core/src/angle.rs

//! # Angles and Sky Positions
//!
//! Converts the angle spellings found in proposal target lists into decimal
//! degrees:
//!
//! - plain decimals: `10.684708`, `-41.27`
//! - unit-annotated: `10.5deg`, `0.5 arcmin`, `30"`, `2.5h`
//! - letter-delimited sexagesimal: `00h42m44.3s`, `+41d16m09s`, `41°16'09"`
//! - colon/space sexagesimal: `00:42:44.3`, `-05 23 28`
//!
//! Bare sexagesimal is read in hours for right ascension and in degrees for
//! everything else.

use crate::error::{MastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit of the leading component of a sexagesimal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Hour,
    Degree,
}

impl AngleUnit {
    fn degrees_per_unit(self) -> f64 {
        match self {
            AngleUnit::Hour => 15.0,
            AngleUnit::Degree => 1.0,
        }
    }
}

/// Right ascension in degrees, normalized into `[0, 360)`.
pub fn parse_ra(s: &str) -> Result<f64> {
    let deg = parse_angle(s, AngleUnit::Hour)?;
    Ok(deg.rem_euclid(360.0))
}

/// Declination in degrees; must lie in `[-90, 90]`.
pub fn parse_dec(s: &str) -> Result<f64> {
    let deg = parse_angle(s, AngleUnit::Degree)?;
    if !(-90.0..=90.0).contains(&deg) {
        return Err(MastError::InvalidAngle(format!(
            "{} (declination out of range)",
            s.trim()
        )));
    }
    Ok(deg)
}

/// Search radius in degrees; a bare number is degrees.
pub fn parse_radius(s: &str) -> Result<f64> {
    let deg = parse_angle(s, AngleUnit::Degree)?;
    if deg < 0.0 {
        return Err(MastError::InvalidAngle(format!(
            "{} (radius must not be negative)",
            s.trim()
        )));
    }
    Ok(deg)
}

/// Parse any supported spelling into degrees.
///
/// `bare` decides how colon/space separated sexagesimal is read.
pub fn parse_angle(s: &str, bare: AngleUnit) -> Result<f64> {
    let invalid = || MastError::InvalidAngle(s.trim().to_string());
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let (sign, body) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, trimmed[1..].trim_start()),
        b'+' => (1.0, trimmed[1..].trim_start()),
        _ => (1.0, trimmed),
    };
    if body.is_empty() || body.starts_with(['-', '+']) {
        return Err(invalid());
    }

    // Plain decimals first, so exponents (`1.5e-05`) are not taken for units.
    let magnitude = match body.parse::<f64>() {
        Ok(v) => v,
        Err(_) if body.chars().any(is_unit_char) => parse_annotated(body).ok_or_else(invalid)?,
        Err(_) if body.contains(':') || body.contains(char::is_whitespace) => {
            parse_sexagesimal(body, bare).ok_or_else(invalid)?
        }
        Err(_) => return Err(invalid()),
    };

    if !magnitude.is_finite() {
        return Err(invalid());
    }
    Ok(sign * magnitude)
}

fn is_unit_char(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '°' | '\'' | '"' | '′' | '″')
}

/// `hh:mm:ss.s` / `dd mm ss` with two or three fields.
fn parse_sexagesimal(body: &str, unit: AngleUnit) -> Option<f64> {
    let parts: Vec<f64> = body
        .split(|c: char| c == ':' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().ok())
        .collect::<Option<_>>()?;

    if !(2..=3).contains(&parts.len()) {
        return None;
    }
    let minutes = parts[1];
    let seconds = parts.get(2).copied().unwrap_or(0.0);
    if !in_sexagesimal_range(minutes) || !in_sexagesimal_range(seconds) {
        return None;
    }
    let value = parts[0] + minutes / 60.0 + seconds / 3600.0;
    Some(value * unit.degrees_per_unit())
}

fn in_sexagesimal_range(v: f64) -> bool {
    (0.0..60.0).contains(&v)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Hours(f64),
    Degrees(f64),
    Minutes(f64),
    Seconds(f64),
    Arcmin(f64),
    Arcsec(f64),
}

fn classify(value: f64, unit: &str) -> Option<Token> {
    let token = match unit.to_ascii_lowercase().as_str() {
        "h" | "hr" | "hour" | "hours" => Token::Hours(value),
        "d" | "deg" | "degree" | "degrees" | "°" => Token::Degrees(value),
        "m" | "'" | "′" => Token::Minutes(value),
        "s" | "\"" | "″" => Token::Seconds(value),
        "arcmin" | "amin" => Token::Arcmin(value),
        "arcsec" | "asec" => Token::Arcsec(value),
        _ => return None,
    };
    Some(token)
}

fn tokenize(body: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = body.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut number = String::new();
        while let Some(c) = chars.next_if(|c| c.is_ascii_digit() || *c == '.') {
            number.push(c);
        }
        let value = number.parse::<f64>().ok()?;

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let mut unit = String::new();
        while let Some(c) = chars.next_if(|c| is_unit_char(*c)) {
            unit.push(c);
        }
        tokens.push(classify(value, &unit)?);
    }

    Some(tokens)
}

/// Letter/symbol delimited values such as `00h42m44.3s` or `30 arcsec`.
fn parse_annotated(body: &str) -> Option<f64> {
    let tokens = tokenize(body)?;
    match tokens.as_slice() {
        [Token::Arcmin(v)] => Some(v / 60.0),
        [Token::Arcsec(v)] => Some(v / 3600.0),
        [lead, rest @ ..] => {
            let (unit, base) = match *lead {
                Token::Hours(v) => (AngleUnit::Hour, v),
                Token::Degrees(v) => (AngleUnit::Degree, v),
                _ => return None,
            };
            let (minutes, seconds) = match rest {
                [] => (0.0, 0.0),
                [Token::Minutes(m)] => (*m, 0.0),
                [Token::Minutes(m), Token::Seconds(s)] => (*m, *s),
                _ => return None,
            };
            let out_of_range = !in_sexagesimal_range(minutes) || !in_sexagesimal_range(seconds);
            if !rest.is_empty() && out_of_range {
                return None;
            }
            Some((base + minutes / 60.0 + seconds / 3600.0) * unit.degrees_per_unit())
        }
        [] => None,
    }
}

/// An ICRS position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyCoord {
    pub ra: f64,
    pub dec: f64,
}

impl SkyCoord {
    pub fn new(ra: f64, dec: f64) -> Result<Self> {
        if !ra.is_finite() || !dec.is_finite() || !(-90.0..=90.0).contains(&dec) {
            return Err(MastError::InvalidAngle(format!("({ra}, {dec})")));
        }
        Ok(Self {
            ra: ra.rem_euclid(360.0),
            dec,
        })
    }

    /// Parse a right ascension / declination pair in any supported spelling.
    pub fn parse(ra: &str, dec: &str) -> Result<Self> {
        Self::new(parse_ra(ra)?, parse_dec(dec)?)
    }
}

impl fmt::Display for SkyCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} {:+.6}", self.ra, self.dec)
    }
}

/// A rectangular RA/Dec region, bounds inclusive, in degrees.
///
/// Boxes crossing RA = 0 must be split by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyBox {
    pub ra_min: f64,
    pub ra_max: f64,
    pub dec_min: f64,
    pub dec_max: f64,
}

impl SkyBox {
    pub fn new(ra_min: f64, ra_max: f64, dec_min: f64, dec_max: f64) -> Result<Self> {
        let ra_ok = (0.0..=360.0).contains(&ra_min)
            && (0.0..=360.0).contains(&ra_max)
            && ra_min <= ra_max;
        let dec_ok = (-90.0..=90.0).contains(&dec_min)
            && (-90.0..=90.0).contains(&dec_max)
            && dec_min <= dec_max;
        if !ra_ok || !dec_ok {
            return Err(MastError::InvalidAngle(format!(
                "box ra [{ra_min}, {ra_max}] dec [{dec_min}, {dec_max}]"
            )));
        }
        Ok(Self {
            ra_min,
            ra_max,
            dec_min,
            dec_max,
        })
    }

    pub fn contains(&self, coord: &SkyCoord) -> bool {
        (self.ra_min..=self.ra_max).contains(&coord.ra)
            && (self.dec_min..=self.dec_max).contains(&coord.dec)
    }
}

impl fmt::Display for SkyBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ra [{:.6}, {:.6}] dec [{:+.6}, {:+.6}]",
            self.ra_min, self.ra_max, self.dec_min, self.dec_max
        )
    }
}
