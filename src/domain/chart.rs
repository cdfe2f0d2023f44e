use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier of the card a chart belongs to.
///
/// Cards are addressed either by number or by an opaque string. The two
/// spaces never overlap: `Number(1)` and `Text("1")` are different keys.
/// Numbers with an integral value are always held as `Number`, so `1` and
/// `1.0` name the same card; only fractional values become `Real`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CardId {
    Number(i64),
    Real(RealKey),
    Text(String),
}

/// A non-integral numeric key. Equality and hashing use the bit pattern.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct RealKey(f64);

impl RealKey {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for RealKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for RealKey {}

impl Hash for RealKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCardId {
            Integer(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawCardId::deserialize(deserializer)? {
            RawCardId::Integer(n) => CardId::Number(n),
            RawCardId::Float(x) => CardId::from(x),
            RawCardId::Text(s) => CardId::Text(s),
        })
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardId::Number(n) => write!(f, "{n}"),
            CardId::Real(x) => write!(f, "{}", x.0),
            CardId::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId::Text(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        CardId::Text(s)
    }
}

impl From<&String> for CardId {
    fn from(s: &String) -> Self {
        CardId::Text(s.clone())
    }
}

impl From<i64> for CardId {
    fn from(n: i64) -> Self {
        CardId::Number(n)
    }
}

impl From<i32> for CardId {
    fn from(n: i32) -> Self {
        CardId::Number(n.into())
    }
}

impl From<u32> for CardId {
    fn from(n: u32) -> Self {
        CardId::Number(n.into())
    }
}

impl From<f64> for CardId {
    fn from(x: f64) -> Self {
        if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
            CardId::Number(x as i64)
        } else {
            CardId::Real(RealKey(x))
        }
    }
}

impl ToSql for CardId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            CardId::Number(n) => Ok(ToSqlOutput::from(*n)),
            CardId::Real(x) => Ok(ToSqlOutput::from(x.0)),
            CardId::Text(s) => Ok(ToSqlOutput::from(s.as_str())),
        }
    }
}

impl FromSql for CardId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(n) => Ok(CardId::Number(n)),
            ValueRef::Real(x) => Ok(CardId::from(x)),
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .map(|s| CardId::Text(s.to_string()))
                .map_err(|e| FromSqlError::Other(Box::new(e))),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// A stored chart: the serialized chart payload for one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub card_id: CardId,
    /// Serialized chart, kept verbatim.
    pub content: String,
    /// Write time in milliseconds since the Unix epoch.
    pub stored_at: i64,
}

impl ChartRecord {
    /// Build a record stamped with the current time.
    pub fn new(card_id: impl Into<CardId>, content: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            content: content.into(),
            stored_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
