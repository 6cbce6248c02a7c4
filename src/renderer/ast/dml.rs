use serde::{Deserialize, Serialize};

use super::default_true;
use super::expr::Expr;
use super::query::{Join, OrderItem, Query, SelectItem, TableRef, With};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InsertSource {
    /// VALUES (...), (...)
    Values { rows: Vec<Vec<Expr>> },
    /// INSERT ... SELECT
    Query { query: Box<Query> },
    /// MySQL: INSERT t SET c = v
    Set { assignments: Vec<Assign> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    /// REPLACE INTO вместо INSERT INTO
    #[serde(default)]
    pub replace: bool,
    /// MySQL: INSERT IGNORE; SQLite: INSERT OR IGNORE; PG: через ON CONFLICT DO NOTHING
    #[serde(default)]
    pub ignore: bool,
    #[serde(default = "default_true")]
    pub into: bool,
    pub table: TableRef, // ожидаем Named { .. }
    #[serde(default)]
    pub columns: Vec<String>, // пусто ⇒ вставка "по всем"
    pub source: InsertSource,
    #[serde(default)]
    pub on_conflict: Option<OnConflict>,
    #[serde(default)]
    pub returning: Vec<SelectItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnConflict {
    pub target_columns: Vec<String>,
    pub on_constraint: Option<String>, // для PG: ON CONSTRAINT <name>
    pub action: Option<OnConflictAction>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OnConflictAction {
    DoNothing,
    DoUpdate {
        set: Vec<Assign>, // SET col = expr / EXCLUDED.col / new.col
        #[serde(default)]
        where_predicate: Option<Expr>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    #[serde(default)]
    pub table: Option<String>,
    pub col: String,
    pub value: Expr,
    #[serde(default)]
    pub from_inserted: bool, // true → PG/SQLite: EXCLUDED.col, MySQL: new.col
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqliteOr {
    Replace,
    Ignore,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub with: Option<With>,
    #[serde(default)]
    pub sqlite_or: Option<SqliteOr>,
    pub table: TableRef,
    #[serde(default)]
    pub joins: Vec<Join>,
    pub set: Vec<Assign>,
    #[serde(default)]
    pub from: Vec<TableRef>,
    #[serde(default)]
    pub r#where: Option<Expr>,
    #[serde(default)]
    pub order_by: Vec<OrderItem>,
    #[serde(default)]
    pub limit: Option<Expr>,
    #[serde(default)]
    pub returning: Vec<SelectItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    #[serde(default)]
    pub with: Option<With>,
    /// MySQL multi-table: DELETE t1, t2 FROM ...
    #[serde(default)]
    pub targets: Vec<String>,
    pub from: Vec<TableRef>,
    #[serde(default)]
    pub joins: Vec<Join>,
    #[serde(default)]
    pub using: Vec<TableRef>,
    #[serde(default)]
    pub r#where: Option<Expr>,
    #[serde(default)]
    pub order_by: Vec<OrderItem>,
    #[serde(default)]
    pub limit: Option<Expr>,
    #[serde(default)]
    pub returning: Vec<SelectItem>,
}
