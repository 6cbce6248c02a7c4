#[cfg(test)]
mod __tests__;
pub mod ast;
mod config;
mod ddl;
mod delete;
mod dialect;
mod error;
mod expr;
mod func;
mod ident;
mod insert;
mod literal;
mod select;
mod stmt;
mod update;
mod validate;
mod writer;

use tracing::debug;

pub use config::{
    Dialect, FeaturePolicy, FoldCase, MysqlLimitStyle, PlaceholderStyle, QuoteMode, SqlRenderCfg,
    SqlifyOpt,
};
pub use ddl::{column_def_to_sql, data_type_to_sql};
pub use dialect::{Feature, QuoteStyle};
pub use error::{Error, Result};
pub use expr::{expr_to_sql, render_expr};
pub use func::{
    aggr_func_to_sql, any_value_func_to_sql, cast_to_sql, common_type_value, extract_func_to_sql,
    func_to_sql, over_to_sql, window_spec_to_sql,
};
pub use ident::{quote_ident, quote_ident_always, quote_path};
pub use literal::{quote_string, render_literal};
pub use select::{render_query, render_select, render_sql_query};
pub use validate::{validate_query_features, validate_stmt_features};
pub use writer::{Fragments, SqlWriter, to_upper};

use crate::renderer::stmt::render_stmt_into;

/// Рендер одного оператора. При строгой политике сначала проверяются фичи.
pub fn render_stmt(s: &ast::Stmt, cfg: &SqlRenderCfg) -> Result<String> {
    if let Some(err) = validate_stmt_features(s, cfg) {
        return Err(err);
    }
    // capacity эвристика; можно параметризовать
    let mut w = SqlWriter::new(256, cfg.placeholders);
    render_stmt_into(&mut w, s, cfg)?;
    Ok(w.finish())
}

/// Рендер пачки операторов, склейка через `" ; "`.
///
/// Первая же ошибка прерывает рендер; частичный результат не возвращается.
pub fn sqlify(stmts: &[ast::Stmt], cfg: &SqlRenderCfg) -> Result<String> {
    debug!(dialect = %cfg.dialect, count = stmts.len(), "sqlify");
    let mut parts = Vec::with_capacity(stmts.len());
    for s in stmts {
        parts.push(render_stmt(s, cfg)?);
    }
    Ok(parts.join(" ; "))
}

/// JSON-вход: объект оператора или массив операторов.
pub fn sqlify_json(json: &str, opt: &SqlifyOpt) -> Result<String> {
    let cfg = SqlRenderCfg::from_opt(opt)?;
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        let stmts: Vec<ast::Stmt> = serde_json::from_value(value)?;
        sqlify(&stmts, &cfg)
    } else {
        let stmt: ast::Stmt = serde_json::from_value(value)?;
        render_stmt(&stmt, &cfg)
    }
}

/// Удобные пресеты под диалекты
pub fn cfg_mysql() -> SqlRenderCfg {
    SqlRenderCfg::for_dialect(Dialect::MySQL)
}
pub fn cfg_mariadb() -> SqlRenderCfg {
    SqlRenderCfg::for_dialect(Dialect::MariaDB)
}
pub fn cfg_sqlite() -> SqlRenderCfg {
    SqlRenderCfg::for_dialect(Dialect::SQLite)
}
pub fn cfg_postgres() -> SqlRenderCfg {
    SqlRenderCfg::for_dialect(Dialect::Postgres)
}
