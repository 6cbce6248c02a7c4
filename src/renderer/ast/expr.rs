use serde::{Deserialize, Serialize};

use super::default_true;
use super::query::{OrderItem, Query};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    pub column: String,
}

/// `COLLATE utf8mb4_bin`, `CHARACTER SET = utf8` и прочие "KEYWORD [=] VALUE".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonType {
    pub keyword: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    Column(ColumnRef),
    Star {
        #[serde(default)]
        table: Option<String>,
    },
    Keyword {
        value: String,
    },
    Literal {
        value: Literal,
    },
    Param {
        param: Param,
    },
    Var {
        #[serde(default = "default_var_prefix")]
        prefix: String,
        name: String,
    },
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnOp,
        expr: Box<Expr>,
    },
    Between {
        expr: Box<Expr>,
        #[serde(default)]
        not: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    Paren {
        expr: Box<Expr>,
    },
    List {
        items: Vec<Expr>,
    },
    Function(Function),
    Aggregate(AggrFunc),
    Cast(Cast),
    Extract(ExtractFunc),
    AnyValue(AnyValueFunc),
    Case {
        #[serde(default)]
        operand: Option<Box<Expr>>,
        when_then: Vec<(Expr, Expr)>,
        #[serde(default)]
        else_expr: Option<Box<Expr>>,
    },
    Subquery {
        query: Box<Query>,
    },
    Collate {
        expr: Box<Expr>,
        collate: CommonType,
    },
    FullText {
        columns: Vec<ColumnRef>,
        against: Box<Expr>,
        #[serde(default)]
        mode: Option<String>,
    },
    Interval {
        expr: Box<Expr>,
        unit: String,
    },
}

fn default_var_prefix() -> String {
    "@".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Literal {
    /// Значение хранится без экранирования; `'` удваивается при рендере.
    String {
        value: String,
        #[serde(default)]
        prefix: Option<String>,
    },
    National {
        value: String,
    },
    Hex {
        value: String,
        #[serde(default)]
        style: HexStyle,
        #[serde(default)]
        prefix: Option<String>,
    },
    Bit {
        value: String,
        #[serde(default)]
        style: BitStyle,
        #[serde(default)]
        prefix: Option<String>,
    },
    Number {
        value: String,
    },
    Bool {
        value: bool,
    },
    Null,
    /// DATE '2020-01-01', TIMESTAMP '...'
    Typed {
        kind: String,
        value: String,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexStyle {
    /// X'4D79'
    #[default]
    XQuote,
    /// 0x4D79
    ZeroX,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitStyle {
    /// b'1010'
    #[default]
    BQuote,
    /// 0b1010
    ZeroB,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Param {
    /// ?
    Question,
    /// $1
    Dollar { index: u64 },
    /// :name
    Named { name: String },
    /// стиль берётся из конфига
    Bind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BinOp {
    Eq,
    NotEq,
    LtGt,
    Lt,
    LtEq,
    Gt,
    GtEq,
    NullSafeEq,
    And,
    Or,
    Xor,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    IntDiv,
    Like,
    NotLike,
    ILike,
    NotILike,
    Glob,
    Regexp,
    NotRegexp,
    RLike,
    In,
    NotIn,
    Is,
    IsNot,
    /// @x := expr
    Assign,
    /// Всё остальное печатается как есть: `||`, `&&`, `->>`, `@>` ...
    Other(String),
}

impl BinOp {
    pub fn as_str(&self) -> &str {
        match self {
            BinOp::Eq => "=",
            BinOp::NotEq => "!=",
            BinOp::LtGt => "<>",
            BinOp::Lt => "<",
            BinOp::LtEq => "<=",
            BinOp::Gt => ">",
            BinOp::GtEq => ">=",
            BinOp::NullSafeEq => "<=>",
            BinOp::And => "AND",
            BinOp::Or => "OR",
            BinOp::Xor => "XOR",
            BinOp::Plus => "+",
            BinOp::Minus => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Modulo => "%",
            BinOp::IntDiv => "DIV",
            BinOp::Like => "LIKE",
            BinOp::NotLike => "NOT LIKE",
            BinOp::ILike => "ILIKE",
            BinOp::NotILike => "NOT ILIKE",
            BinOp::Glob => "GLOB",
            BinOp::Regexp => "REGEXP",
            BinOp::NotRegexp => "NOT REGEXP",
            BinOp::RLike => "RLIKE",
            BinOp::In => "IN",
            BinOp::NotIn => "NOT IN",
            BinOp::Is => "IS",
            BinOp::IsNot => "IS NOT",
            BinOp::Assign => ":=",
            BinOp::Other(s) => s,
        }
    }
}

impl From<String> for BinOp {
    fn from(s: String) -> Self {
        let norm = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match norm.to_ascii_uppercase().as_str() {
            "=" => BinOp::Eq,
            "!=" => BinOp::NotEq,
            "<>" => BinOp::LtGt,
            "<" => BinOp::Lt,
            "<=" => BinOp::LtEq,
            ">" => BinOp::Gt,
            ">=" => BinOp::GtEq,
            "<=>" => BinOp::NullSafeEq,
            "AND" => BinOp::And,
            "OR" => BinOp::Or,
            "XOR" => BinOp::Xor,
            "+" => BinOp::Plus,
            "-" => BinOp::Minus,
            "*" => BinOp::Multiply,
            "/" => BinOp::Divide,
            "%" | "MOD" => BinOp::Modulo,
            "DIV" => BinOp::IntDiv,
            "LIKE" => BinOp::Like,
            "NOT LIKE" => BinOp::NotLike,
            "ILIKE" => BinOp::ILike,
            "NOT ILIKE" => BinOp::NotILike,
            "GLOB" => BinOp::Glob,
            "REGEXP" => BinOp::Regexp,
            "NOT REGEXP" => BinOp::NotRegexp,
            "RLIKE" => BinOp::RLike,
            "IN" => BinOp::In,
            "NOT IN" => BinOp::NotIn,
            "IS" => BinOp::Is,
            "IS NOT" => BinOp::IsNot,
            ":=" => BinOp::Assign,
            _ => BinOp::Other(s),
        }
    }
}

impl From<BinOp> for String {
    fn from(op: BinOp) -> Self {
        match op {
            BinOp::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UnOp {
    Not,
    Neg,
    Plus,
    BitNot,
    Bang,
    Binary,
    Exists,
}

impl UnOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnOp::Not => "NOT",
            UnOp::Neg => "-",
            UnOp::Plus => "+",
            UnOp::BitNot => "~",
            UnOp::Bang => "!",
            UnOp::Binary => "BINARY",
            UnOp::Exists => "EXISTS",
        }
    }

    /// Словесные операторы отделяются от операнда пробелом.
    #[inline]
    pub fn is_word(self) -> bool {
        matches!(self, UnOp::Not | UnOp::Binary | UnOp::Exists)
    }
}

impl TryFrom<String> for UnOp {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NOT" => Ok(UnOp::Not),
            "-" => Ok(UnOp::Neg),
            "+" => Ok(UnOp::Plus),
            "~" => Ok(UnOp::BitNot),
            "!" => Ok(UnOp::Bang),
            "BINARY" => Ok(UnOp::Binary),
            "EXISTS" => Ok(UnOp::Exists),
            _ => Err(format!("unknown unary operator: {s}")),
        }
    }
}

impl From<UnOp> for String {
    fn from(op: UnOp) -> Self {
        op.as_str().to_string()
    }
}

/// Вызов скалярной функции.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    /// `None`: вызов без списка аргументов (`CURRENT_TIMESTAMP`)
    #[serde(default)]
    pub args: Option<Vec<Expr>>,
    #[serde(default = "default_true")]
    pub args_parentheses: bool,
    #[serde(default)]
    pub separator: Option<String>,
    /// Обернуть весь вызов в ещё одни скобки
    #[serde(default)]
    pub parentheses: bool,
    #[serde(default)]
    pub over: Option<Over>,
    #[serde(default)]
    pub collate: Option<CommonType>,
    #[serde(default)]
    pub suffix: Option<Box<Expr>>,
}

impl Function {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args: Some(args),
            args_parentheses: true,
            separator: None,
            parentheses: false,
            over: None,
            collate: None,
            suffix: None,
        }
    }
}

/// SUM/COUNT/GROUP_CONCAT/...
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggrFunc {
    pub name: String,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub args: Vec<Expr>,
    #[serde(default)]
    pub order_by: Vec<OrderItem>,
    #[serde(default)]
    pub separator: Option<Box<Expr>>,
    #[serde(default)]
    pub filter: Option<Box<Expr>>,
    #[serde(default)]
    pub over: Option<Over>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastSymbol {
    /// CAST(x AS T)
    As,
    /// x::T
    #[serde(rename = "::")]
    DoubleColon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayDim {
    One,
    Two,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataType {
    pub data_type: String,
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(default)]
    pub scale: Option<u64>,
    #[serde(default)]
    pub parentheses: bool,
    /// Кавычка вокруг имени типа (`"int4"`); имя тогда не нормализуется
    #[serde(default)]
    pub quoted: Option<String>,
    /// UNSIGNED, ZEROFILL, WITH TIME ZONE ...
    #[serde(default)]
    pub suffix: Vec<String>,
    #[serde(default)]
    pub array: Option<ArrayDim>,
    /// Варианты для ENUM/SET
    #[serde(default)]
    pub values: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CastTail {
    pub operator: String,
    pub expr: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cast {
    pub expr: Box<Expr>,
    pub target: DataType,
    pub symbol: CastSymbol,
    /// CAST / TRY_CAST / SAFE_CAST; обязателен при symbol = as
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub tail: Option<CastTail>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub collate: Option<CommonType>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractFunc {
    pub name: String,
    pub field: String,
    #[serde(default)]
    pub cast_type: Option<String>,
    pub source: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnyValueHaving {
    /// MAX | MIN
    pub prefix: String,
    pub expr: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnyValueFunc {
    pub name: String,
    pub expr: Box<Expr>,
    #[serde(default)]
    pub having: Option<AnyValueHaving>,
    #[serde(default)]
    pub over: Option<Over>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Over {
    /// OVER w
    Named { name: String },
    /// OVER (...)
    Spec(WindowSpec),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// OVER (w ORDER BY ...)
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub partition_by: Vec<Expr>,
    #[serde(default)]
    pub order_by: Vec<OrderItem>,
    #[serde(default)]
    pub frame: Option<WindowFrame>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameUnits {
    Rows,
    Range,
    Groups,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding { expr: Box<Expr> },
    CurrentRow,
    Following { expr: Box<Expr> },
    UnboundedFollowing,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowFrame {
    pub units: FrameUnits,
    pub start: FrameBound,
    /// Есть конец ⇒ печатаем BETWEEN start AND end
    #[serde(default)]
    pub end: Option<FrameBound>,
}
