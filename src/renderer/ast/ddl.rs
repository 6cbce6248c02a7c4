use serde::{Deserialize, Serialize};

use super::expr::{DataType, Expr};
use super::query::{OrderDirection, Query};

/// [schema.]name
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectName {
    #[serde(default)]
    pub schema: Option<String>,
    pub name: String,
}

impl ObjectName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOptions {
    /// Some(false) → NOT NULL, Some(true) → NULL
    pub nullable: Option<bool>,
    pub default: Option<Expr>,
    pub on_update: Option<Expr>,
    pub auto_increment: bool,
    pub unique: bool,
    pub primary_key: bool,
    pub comment: Option<String>,
    pub character_set: Option<String>,
    pub collate: Option<String>,
    pub check: Option<Expr>,
    pub references: Option<Reference>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    /// SQLite допускает колонки без типа
    #[serde(default)]
    pub data_type: Option<DataType>,
    #[serde(default)]
    pub options: ColumnOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefAction {
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
    NoAction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub table: ObjectName,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub on_delete: Option<RefAction>,
    #[serde(default)]
    pub on_update: Option<RefAction>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    Btree,
    Hash,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKeyword {
    Key,
    Index,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Key,
    Index,
    Fulltext,
    Spatial,
}

/// `col`(768) DESC
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
    pub column: String,
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(default)]
    pub order: Option<OrderDirection>,
}

impl IndexColumn {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            length: None,
            order: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableConstraint {
    PrimaryKey {
        #[serde(default)]
        constraint: Option<String>,
        columns: Vec<IndexColumn>,
        #[serde(default)]
        using: Option<IndexType>,
    },
    Unique {
        #[serde(default)]
        constraint: Option<String>,
        #[serde(default)]
        keyword: Option<IndexKeyword>,
        #[serde(default)]
        name: Option<String>,
        columns: Vec<IndexColumn>,
        #[serde(default)]
        using: Option<IndexType>,
    },
    ForeignKey {
        #[serde(default)]
        constraint: Option<String>,
        columns: Vec<String>,
        references: Reference,
    },
    Check {
        #[serde(default)]
        constraint: Option<String>,
        expr: Expr,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexDef {
    pub kind: IndexKind,
    #[serde(default)]
    pub name: Option<String>,
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub using: Option<IndexType>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableElement {
    Column(ColumnDef),
    Constraint { constraint: TableConstraint },
    Index(IndexDef),
}

/// ENGINE = InnoDB, DEFAULT CHARSET = utf8mb4 ...
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOption {
    pub keyword: String,
    pub value: String,
}

impl TableOption {
    pub fn new(keyword: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateTable {
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub if_not_exists: bool,
    pub name: ObjectName,
    #[serde(default)]
    pub definitions: Vec<TableElement>,
    #[serde(default)]
    pub options: Vec<TableOption>,
    /// CREATE TABLE t AS SELECT ...
    #[serde(default)]
    pub as_query: Option<Box<Query>>,
    /// CREATE TABLE t LIKE src
    #[serde(default)]
    pub like: Option<ObjectName>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseKeyword {
    #[default]
    Database,
    Schema,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateDatabase {
    #[serde(default)]
    pub keyword: DatabaseKeyword,
    #[serde(default)]
    pub if_not_exists: bool,
    pub name: String,
    #[serde(default)]
    pub options: Vec<TableOption>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateView {
    #[serde(default)]
    pub or_replace: bool,
    pub name: ObjectName,
    #[serde(default)]
    pub columns: Vec<String>,
    pub query: Box<Query>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateIndex {
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub if_not_exists: bool,
    pub name: String,
    pub table: ObjectName,
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub using: Option<IndexType>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlterAction {
    AddColumn {
        #[serde(default)]
        column_keyword: bool,
        column: ColumnDef,
    },
    DropColumn {
        #[serde(default)]
        column_keyword: bool,
        name: String,
    },
    ModifyColumn {
        #[serde(default)]
        column_keyword: bool,
        column: ColumnDef,
    },
    ChangeColumn {
        #[serde(default)]
        column_keyword: bool,
        old_name: String,
        column: ColumnDef,
    },
    RenameColumn {
        old_name: String,
        new_name: String,
    },
    AddConstraint {
        constraint: TableConstraint,
    },
    AddIndex {
        index: IndexDef,
    },
    DropIndex {
        name: String,
    },
    DropPrimaryKey,
    RenameTable {
        to: ObjectName,
    },
    SetOption {
        option: TableOption,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlterTable {
    pub name: ObjectName,
    pub actions: Vec<AlterAction>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Table,
    Database,
    Schema,
    View,
    Index,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropObject {
    pub kind: ObjectKind,
    #[serde(default)]
    pub if_exists: bool,
    pub names: Vec<ObjectName>,
    /// DROP INDEX idx ON t
    #[serde(default)]
    pub on: Option<ObjectName>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowCreateKind {
    Table,
    View,
    Event,
    Trigger,
    Procedure,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShowTarget {
    Tables {
        #[serde(default)]
        from: Option<String>,
    },
    Databases,
    Columns {
        table: ObjectName,
    },
    Index {
        table: ObjectName,
    },
    Create {
        kind: ShowCreateKind,
        name: ObjectName,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub target: ShowTarget,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Analyze {
    #[serde(default)]
    pub table_keyword: bool,
    pub names: Vec<ObjectName>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attach {
    pub expr: Expr,
    pub schema: String,
}
