//! Политика диалектов: кавычки, написание ключевых слов, поддержка фич.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    MySQL,
    MariaDB,
    SQLite,
    Postgres,
    Redshift,
    Snowflake,
    BigQuery,
    Hive,
    TransactSQL,
    Db2,
}

impl Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::MySQL => write!(f, "mysql"),
            Dialect::MariaDB => write!(f, "mariadb"),
            Dialect::SQLite => write!(f, "sqlite"),
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::Redshift => write!(f, "redshift"),
            Dialect::Snowflake => write!(f, "snowflake"),
            Dialect::BigQuery => write!(f, "bigquery"),
            Dialect::Hive => write!(f, "hive"),
            Dialect::TransactSQL => write!(f, "transactsql"),
            Dialect::Db2 => write!(f, "db2"),
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let d = match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Dialect::MySQL,
            "mariadb" => Dialect::MariaDB,
            "sqlite" => Dialect::SQLite,
            "postgresql" | "postgres" | "pg" => Dialect::Postgres,
            "redshift" => Dialect::Redshift,
            "snowflake" => Dialect::Snowflake,
            "bigquery" => Dialect::BigQuery,
            "hive" => Dialect::Hive,
            "transactsql" | "tsql" | "mssql" => Dialect::TransactSQL,
            "db2" => Dialect::Db2,
            _ => {
                return Err(Error::UnknownDialect {
                    name: s.to_string(),
                });
            }
        };
        Ok(d)
    }
}

/// Как диалект оборачивает идентификаторы.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteStyle {
    Backtick,
    Double,
    Bracket,
}

impl QuoteStyle {
    #[inline]
    pub fn open(self) -> char {
        match self {
            QuoteStyle::Backtick => '`',
            QuoteStyle::Double => '"',
            QuoteStyle::Bracket => '[',
        }
    }

    #[inline]
    pub fn close(self) -> char {
        match self {
            QuoteStyle::Backtick => '`',
            QuoteStyle::Double => '"',
            QuoteStyle::Bracket => ']',
        }
    }
}

/// Конструкции, которые есть не во всех диалектах.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    DoubleColonCast,
    DistinctOn,
    ILike,
    Returning,
    Minus,
    FullTextMatch,
    CteMaterialized,
    NullsOrdering,
    GroupByRollup,
    GroupByCube,
    GroupingSets,
    InsertIgnore,
    OnDuplicateKey,
    OnConflict,
    Attach,
}

impl Feature {
    pub fn label(self) -> &'static str {
        match self {
            Feature::DoubleColonCast => "expr::type cast",
            Feature::DistinctOn => "DISTINCT ON",
            Feature::ILike => "ILIKE",
            Feature::Returning => "RETURNING",
            Feature::Minus => "MINUS",
            Feature::FullTextMatch => "MATCH ... AGAINST",
            Feature::CteMaterialized => "WITH [NOT] MATERIALIZED",
            Feature::NullsOrdering => "ORDER BY ... NULLS FIRST/LAST",
            Feature::GroupByRollup => "GROUP BY ROLLUP",
            Feature::GroupByCube => "GROUP BY CUBE",
            Feature::GroupingSets => "GROUP BY GROUPING SETS",
            Feature::InsertIgnore => "INSERT IGNORE",
            Feature::OnDuplicateKey => "ON DUPLICATE KEY UPDATE",
            Feature::OnConflict => "ON CONFLICT",
            Feature::Attach => "ATTACH DATABASE",
        }
    }
}

impl Dialect {
    pub fn quote_style(self) -> QuoteStyle {
        match self {
            Dialect::MySQL
            | Dialect::MariaDB
            | Dialect::SQLite
            | Dialect::BigQuery
            | Dialect::Hive => QuoteStyle::Backtick,
            Dialect::Postgres | Dialect::Redshift | Dialect::Snowflake | Dialect::Db2 => {
                QuoteStyle::Double
            }
            Dialect::TransactSQL => QuoteStyle::Bracket,
        }
    }

    #[inline]
    pub fn is_mysql_family(self) -> bool {
        matches!(self, Dialect::MySQL | Dialect::MariaDB)
    }

    #[inline]
    pub fn is_postgres_family(self) -> bool {
        matches!(self, Dialect::Postgres | Dialect::Redshift)
    }

    pub fn supports(self, feature: Feature) -> bool {
        use Dialect::*;
        match feature {
            Feature::DoubleColonCast => matches!(self, Postgres | Redshift | Snowflake),
            Feature::DistinctOn => matches!(self, Postgres),
            Feature::ILike => matches!(self, Postgres | Redshift | Snowflake),
            Feature::Returning => matches!(self, Postgres | SQLite | MariaDB),
            Feature::Minus => matches!(self, MariaDB | Snowflake | Db2),
            Feature::FullTextMatch => self.is_mysql_family(),
            Feature::CteMaterialized => matches!(self, Postgres | SQLite),
            Feature::NullsOrdering => {
                matches!(self, Postgres | Redshift | Snowflake | SQLite | Db2)
            }
            // MySQL знает только WITH ROLLUP
            Feature::GroupByRollup => !matches!(self, SQLite | Hive),
            Feature::GroupByCube | Feature::GroupingSets => {
                matches!(self, Postgres | Redshift | Snowflake | BigQuery | Db2 | TransactSQL)
            }
            Feature::InsertIgnore => matches!(self, MySQL | MariaDB | SQLite | Postgres),
            Feature::OnDuplicateKey => self.is_mysql_family(),
            Feature::OnConflict => matches!(self, Postgres | SQLite),
            Feature::Attach => matches!(self, SQLite),
        }
    }

    /// Написание AUTO_INCREMENT в определении колонки.
    pub fn auto_increment_keyword(self) -> &'static str {
        match self {
            Dialect::SQLite | Dialect::Snowflake => "AUTOINCREMENT",
            Dialect::TransactSQL => "IDENTITY",
            Dialect::Redshift => "IDENTITY(1, 1)",
            Dialect::Postgres | Dialect::Db2 => "GENERATED BY DEFAULT AS IDENTITY",
            _ => "AUTO_INCREMENT",
        }
    }

    /// В T-SQL нет строкового X'..': только 0x...
    #[inline]
    pub fn hex_string_as_zero_x(self) -> bool {
        matches!(self, Dialect::TransactSQL)
    }
}
