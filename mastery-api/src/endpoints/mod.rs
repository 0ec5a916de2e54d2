pub mod auth;
pub mod children;
pub mod insights;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;

/// Identifier of a linked child account.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildId(i64);

impl ChildId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ChildId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ChildId> for i64 {
    fn from(value: ChildId) -> Self {
        value.0
    }
}

impl Display for ChildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChildId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A mastery level reported as a fraction in `0.0..=1.0`.
///
/// Some endpoints report percentages instead. Values strictly above 1.0 are
/// read as percentages and scaled down; everything in `0.0..=1.0` is a
/// fraction, so `1.0` is full mastery and a reported `1` percent cannot be
/// told apart from it.
#[derive(Default, Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Mastery(f64);

impl Mastery {
    pub fn new(value: f64) -> Self {
        let fraction = if value > 1.0 { value / 100.0 } else { value };
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl<'de> Deserialize<'de> for Mastery {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(Self::new(value.unwrap_or_default()))
    }
}

impl Display for Mastery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

pub(crate) fn serialize_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}
