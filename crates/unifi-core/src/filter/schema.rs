// ── Filterable attribute schema ──
//
// The closed set of `ClientRecord` attributes a predicate may name, their
// semantic types, and how a record surfaces each one as a comparable value.

use std::fmt;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::error::FilterError;
use crate::model::ClientRecord;

/// Semantic type of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    /// Stored as `bool`, compared as integer 0/1.
    Boolean,
    /// Integer or floating point.
    Numeric,
}

impl FieldKind {
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Numeric => "numeric",
        })
    }
}

/// A filterable client attribute, named as it appears in predicates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Field {
    // Text
    Mac,
    Name,
    Hostname,
    Ip,
    Essid,
    ApMac,
    SwMac,
    // Boolean
    IsWired,
    Blocked,
    UseFixedIp,
    QosPolicyApplied,
    // Integer
    Signal,
    Uptime,
    TxRate,
    RxRate,
    Channel,
    Rssi,
    Satisfaction,
    SwPort,
    // Numeric
    TxBytes,
    RxBytes,
    TxBytesR,
    RxBytesR,
}

impl Field {
    /// Resolve a predicate identifier (ASCII case-insensitive).
    pub fn lookup(name: &str) -> Result<Self, FilterError> {
        name.parse().map_err(|_| FilterError::UnknownField {
            name: name.to_owned(),
            valid: Self::names(),
        })
    }

    /// Canonical names of every filterable field, in schema order.
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(Self::as_str).collect()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Mac
            | Self::Name
            | Self::Hostname
            | Self::Ip
            | Self::Essid
            | Self::ApMac
            | Self::SwMac => FieldKind::Text,
            Self::IsWired | Self::Blocked | Self::UseFixedIp | Self::QosPolicyApplied => {
                FieldKind::Boolean
            }
            Self::Signal
            | Self::Uptime
            | Self::TxRate
            | Self::RxRate
            | Self::Channel
            | Self::Rssi
            | Self::Satisfaction
            | Self::SwPort => FieldKind::Integer,
            Self::TxBytes | Self::RxBytes | Self::TxBytesR | Self::RxBytesR => FieldKind::Numeric,
        }
    }
}

/// A comparable value pulled from a record or a literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
}

impl ClientRecord {
    /// Surface a field for comparison. Booleans become `Int(0 | 1)`.
    pub fn field_value(&self, field: Field) -> Value<'_> {
        match field {
            Field::Mac => Value::Text(&self.mac),
            Field::Name => Value::Text(&self.name),
            Field::Hostname => Value::Text(&self.hostname),
            Field::Ip => Value::Text(&self.ip),
            Field::Essid => Value::Text(&self.essid),
            Field::ApMac => Value::Text(&self.ap_mac),
            Field::SwMac => Value::Text(&self.sw_mac),
            Field::IsWired => Value::Int(self.is_wired.into()),
            Field::Blocked => Value::Int(self.blocked.into()),
            Field::UseFixedIp => Value::Int(self.use_fixed_ip.into()),
            Field::QosPolicyApplied => Value::Int(self.qos_policy_applied.into()),
            Field::Signal => Value::Int(self.signal),
            Field::Uptime => Value::Int(self.uptime),
            Field::TxRate => Value::Int(self.tx_rate),
            Field::RxRate => Value::Int(self.rx_rate),
            Field::Channel => Value::Int(self.channel),
            Field::Rssi => Value::Int(self.rssi),
            Field::Satisfaction => Value::Int(self.satisfaction),
            Field::SwPort => Value::Int(self.sw_port),
            Field::TxBytes => Value::Int(self.tx_bytes),
            Field::RxBytes => Value::Int(self.rx_bytes),
            Field::TxBytesR => Value::Float(self.tx_bytes_r),
            Field::RxBytesR => Value::Float(self.rx_bytes_r),
        }
    }
}
