use serde::Deserialize;

pub use super::dialect::Dialect;
use super::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteMode {
    /// Всегда квотить идентификаторы: `Users`, "Users", [Users]
    Always,
    /// Квотить только при необходимости; если preserve_case=true: тоже квотим
    Smart { preserve_case: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// $1, $2, $3... (Postgres)
    Numbered,
    /// ? (SQLite/MySQL)
    Question,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MysqlLimitStyle {
    /// LIMIT 10 OFFSET 20
    LimitOffset,
    /// LIMIT 20, 10
    OffsetCommaLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeaturePolicy {
    /// Печатаем как есть, даже если диалект такое не примет
    Lenient,
    /// Строгая политика: неподдержанные фичи → ошибка рендера
    Strict,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoldCase {
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct SqlRenderCfg {
    pub dialect: Dialect,
    pub quote: QuoteMode,
    /// Для узлов Param::Bind
    pub placeholders: PlaceholderStyle,

    /// Эмулировать NULLS LAST/FIRST там, где диалект их не знает
    pub emulate_nulls_ordering: bool,

    /// Способ печати LIMIT в MySQL/MariaDB
    pub mysql_limit_style: MysqlLimitStyle,

    /// Политика по фичам (строго/мягко)
    pub policy: FeaturePolicy,

    /// Добавлять ли "AS" для алиаса таблицы/колонки
    pub emit_as_for_table_alias: bool,
    pub emit_as_for_column_alias: bool,

    /// Принудительная нормализация идентификаторов (до квотирования)
    pub fold_idents: Option<FoldCase>,
}

impl Default for SqlRenderCfg {
    fn default() -> Self {
        Self::for_dialect(Dialect::MySQL)
    }
}

impl SqlRenderCfg {
    pub fn for_dialect(dialect: Dialect) -> Self {
        let placeholders = if dialect.is_postgres_family() {
            PlaceholderStyle::Numbered
        } else {
            PlaceholderStyle::Question
        };
        Self {
            dialect,
            quote: QuoteMode::Always,
            placeholders,
            emulate_nulls_ordering: false,
            mysql_limit_style: MysqlLimitStyle::LimitOffset,
            policy: FeaturePolicy::Lenient,
            emit_as_for_table_alias: true,
            emit_as_for_column_alias: true,
            fold_idents: None,
        }
    }

    /// `{ "database": "mariadb" }` → конфиг; без database: MySQL.
    pub fn from_opt(opt: &SqlifyOpt) -> Result<Self> {
        let dialect = match opt.database.as_deref() {
            Some(name) => name.parse()?,
            None => Dialect::MySQL,
        };
        let mut cfg = Self::for_dialect(dialect);
        if opt.strict {
            cfg.policy = FeaturePolicy::Strict;
        }
        Ok(cfg)
    }
}

/// Опции вызова в том виде, в каком их передаёт внешний код.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SqlifyOpt {
    pub database: Option<String>,
    pub strict: bool,
}
