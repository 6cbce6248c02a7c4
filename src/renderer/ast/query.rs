use serde::{Deserialize, Serialize};

use super::expr::{Expr, Function, WindowSpec};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupByModifier {
    Rollup,
    Cube,
    GroupingSets { sets: Vec<Vec<Expr>> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CteMaterialized {
    Materialized,
    NotMaterialized,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Select {
    pub distinct: bool,
    pub distinct_on: Vec<Expr>,
    /// SQL_CALC_FOUND_ROWS, HIGH_PRIORITY, STRAIGHT_JOIN ...
    pub options: Vec<String>,
    pub items: Vec<SelectItem>,
    pub into: Option<SelectInto>,
    pub from: Vec<TableRef>,
    pub joins: Vec<Join>,
    pub r#where: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub group_by_modifiers: Vec<GroupByModifier>,
    pub having: Option<Expr>,
    pub window: Vec<NamedWindow>,
    pub order_by: Vec<OrderItem>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
    pub locking: Option<Locking>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectItem {
    Star,
    QualifiedStar {
        table: String,
    },
    Expr {
        expr: Expr,
        #[serde(default)]
        alias: Option<String>,
    },
}

/// Где стоит INTO: после списка колонок, после табличного выражения
/// (перед FOR UPDATE) или в самом конце.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntoPosition {
    #[default]
    Column,
    From,
    End,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntoTarget {
    Vars {
        vars: Vec<Expr>,
    },
    Outfile {
        file: String,
        #[serde(default)]
        charset: Option<String>,
    },
    Dumpfile {
        file: String,
    },
    Table {
        name: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectInto {
    #[serde(default)]
    pub position: IntoPosition,
    pub target: IntoTarget,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableRef {
    Named {
        #[serde(default)]
        schema: Option<String>,
        name: String,
        #[serde(default)]
        alias: Option<String>,
    },
    Subquery {
        query: Box<Query>,
        #[serde(default)]
        alias: Option<String>,
    },
    /// json_each(...), generate_series(...)
    Function {
        function: Function,
        #[serde(default)]
        alias: Option<String>,
    },
    /// (VALUES ROW(1,2), ROW(3,4)) AS t
    Values {
        rows: Vec<Vec<Expr>>,
        #[serde(default)]
        row_keyword: bool,
        #[serde(default)]
        alias: Option<String>,
    },
    /// FROM (`t`)
    Paren {
        table: Box<TableRef>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
    NaturalInner,
    NaturalLeft,
    NaturalRight,
    NaturalFull,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub table: TableRef,
    #[serde(default)]
    pub on: Option<Expr>, // для CROSS on=None
    #[serde(default, rename = "using")]
    pub using_cols: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullsOrder {
    First,
    Last,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub expr: Expr,
    /// None: направление не писали, ASC не печатаем
    #[serde(default)]
    pub dir: Option<OrderDirection>,
    #[serde(default)]
    pub nulls: Option<NullsOrder>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedWindow {
    pub name: String,
    pub spec: WindowSpec,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    /// FOR UPDATE
    Update,
    /// FOR SHARE
    Share,
    /// LOCK IN SHARE MODE
    LockInShareMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockWait {
    Nowait,
    SkipLocked,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Locking {
    pub mode: LockMode,
    #[serde(default)]
    pub of: Vec<String>,
    #[serde(default)]
    pub wait: Option<LockWait>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOp {
    Union,
    UnionAll,
    UnionDistinct,
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,
    Minus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryBody {
    Select(Box<Select>),
    Set {
        left: Box<QueryBody>,
        op: SetOp,
        right: Box<QueryBody>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct With {
    #[serde(default)]
    pub recursive: bool,
    pub ctes: Vec<Cte>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cte {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub materialized: Option<CteMaterialized>,
    pub query: Box<Query>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub with: Option<With>,
    pub body: QueryBody,
    /// ORDER BY ... на уровне всего запроса (после UNION и т.п.)
    #[serde(default)]
    pub order_by: Vec<OrderItem>,
    #[serde(default)]
    pub limit: Option<Expr>,
    #[serde(default)]
    pub offset: Option<Expr>,
}

impl From<Select> for Query {
    fn from(sel: Select) -> Self {
        Query {
            with: None,
            body: QueryBody::Select(Box::new(sel)),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }
}
