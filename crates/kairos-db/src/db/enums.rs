//! Database enum types with Diesel serialization.
//!
//! Each enum mirrors a CHECK constraint and implements `ToSql` and `FromSql`
//! for conversion between Rust and `PostgreSQL`.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

/// Recurrence frequency.
///
/// Maps to `event.frequency` CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl ToSql<Text, Pg> for Frequency {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for Frequency {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"DAILY" => Ok(Self::Daily),
            b"WEEKLY" => Ok(Self::Weekly),
            b"MONTHLY" => Ok(Self::Monthly),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl Frequency {
    /// Returns the database string representation of this frequency.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Frequency> for kairos_core::types::Frequency {
    fn from(db_frequency: Frequency) -> Self {
        match db_frequency {
            Frequency::Daily => Self::Daily,
            Frequency::Weekly => Self::Weekly,
            Frequency::Monthly => Self::Monthly,
        }
    }
}

impl From<kairos_core::types::Frequency> for Frequency {
    fn from(core_frequency: kairos_core::types::Frequency) -> Self {
        match core_frequency {
            kairos_core::types::Frequency::Daily => Self::Daily,
            kairos_core::types::Frequency::Weekly => Self::Weekly,
            kairos_core::types::Frequency::Monthly => Self::Monthly,
        }
    }
}
