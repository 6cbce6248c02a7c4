use super::ast::{BinOp, ColumnRef, Expr, Param};
use super::config::SqlRenderCfg;
use super::error::{Error, Result};
use super::func::{
    aggr_func_to_sql, any_value_func_to_sql, cast_to_sql, common_type_value, extract_func_to_sql,
    func_to_sql,
};
use super::ident::{push_quoted_path, quote_ident};
use super::literal::render_literal;
use super::select::render_query;
use super::writer::{SqlWriter, non_empty, to_upper};

/// Рендер одиночного выражения; нумерация плейсхолдеров начинается с 1.
pub fn expr_to_sql(e: &Expr, cfg: &SqlRenderCfg) -> Result<String> {
    let mut w = SqlWriter::new(64, cfg.placeholders);
    render_expr(&mut w, e, cfg)?;
    Ok(w.finish())
}

/// Рендер выражения в строку внутри общего writer'а.
#[inline]
pub(crate) fn expr_fragment(w: &mut SqlWriter, e: &Expr, cfg: &SqlRenderCfg) -> Result<String> {
    w.capture(|w| render_expr(w, e, cfg))
}

pub(crate) fn render_expr_list(
    w: &mut SqlWriter,
    xs: &[Expr],
    sep: &str,
    cfg: &SqlRenderCfg,
) -> Result<()> {
    for (i, x) in xs.iter().enumerate() {
        w.push_sep(i, sep);
        render_expr(w, x, cfg)?;
    }
    Ok(())
}

pub(crate) fn push_column_ref(w: &mut SqlWriter, c: &ColumnRef, cfg: &SqlRenderCfg) -> Result<()> {
    if c.column.is_empty() {
        return Err(Error::malformed("column", "column"));
    }
    let path = [
        non_empty(c.schema.as_deref()),
        non_empty(c.table.as_deref()),
        Some(c.column.as_str()),
    ];
    push_quoted_path(w, path.into_iter().flatten(), cfg);
    Ok(())
}

pub fn render_expr(w: &mut SqlWriter, e: &Expr, cfg: &SqlRenderCfg) -> Result<()> {
    match e {
        Expr::Column(c) => push_column_ref(w, c, cfg)?,
        Expr::Star { table } => {
            if let Some(t) = non_empty(table.as_deref()) {
                w.push(quote_ident(t, cfg));
                w.push_char('.');
            }
            w.push_char('*');
        }
        Expr::Keyword { value } => {
            if value.is_empty() {
                return Err(Error::malformed("keyword", "value"));
            }
            w.push(to_upper(value));
        }
        Expr::Literal { value } => render_literal(w, value, cfg)?,
        Expr::Param { param } => match param {
            Param::Question => w.push_question(),
            Param::Dollar { index } => {
                w.push_char('$');
                w.push_u64(*index);
            }
            Param::Named { name } => {
                w.push_char(':');
                w.push(name);
            }
            Param::Bind => w.push_placeholder(),
        },
        Expr::Var { prefix, name } => {
            if name.is_empty() {
                return Err(Error::malformed("var", "name"));
            }
            w.push(prefix);
            w.push(name);
        }
        Expr::Binary { left, op, right } => {
            if let BinOp::Other(s) = op {
                if s.trim().is_empty() {
                    return Err(Error::malformed("binary", "op"));
                }
            }
            render_expr(w, left, cfg)?;
            w.push_char(' ');
            w.push(op.as_str());
            w.push_char(' ');
            render_expr(w, right, cfg)?;
        }
        Expr::Unary { op, expr } => {
            w.push(op.as_str());
            if op.is_word() {
                w.push_char(' ');
            }
            render_expr(w, expr, cfg)?;
        }
        Expr::Between {
            expr,
            not,
            low,
            high,
        } => {
            render_expr(w, expr, cfg)?;
            w.push(if *not { " NOT BETWEEN " } else { " BETWEEN " });
            render_expr(w, low, cfg)?;
            w.push(" AND ");
            render_expr(w, high, cfg)?;
        }
        Expr::Paren { expr } => {
            w.push_char('(');
            render_expr(w, expr, cfg)?;
            w.push_char(')');
        }
        Expr::List { items } => {
            w.push_char('(');
            render_expr_list(w, items, ", ", cfg)?;
            w.push_char(')');
        }
        Expr::Function(f) => {
            let sql = func_to_sql(w, f, cfg)?;
            w.push(sql);
        }
        Expr::Aggregate(a) => {
            let sql = aggr_func_to_sql(w, a, cfg)?;
            w.push(sql);
        }
        Expr::Cast(c) => {
            let sql = cast_to_sql(w, c, cfg)?;
            w.push(sql);
        }
        Expr::Extract(x) => {
            let sql = extract_func_to_sql(w, x, cfg)?;
            w.push(sql);
        }
        Expr::AnyValue(a) => {
            let sql = any_value_func_to_sql(w, a, cfg)?;
            w.push(sql);
        }
        Expr::Case {
            operand,
            when_then,
            else_expr,
        } => {
            if when_then.is_empty() {
                return Err(Error::malformed("case", "when_then"));
            }
            w.push("CASE");
            if let Some(op) = operand {
                w.push_char(' ');
                render_expr(w, op, cfg)?;
            }
            for (wcond, wval) in when_then {
                w.push(" WHEN ");
                render_expr(w, wcond, cfg)?;
                w.push(" THEN ");
                render_expr(w, wval, cfg)?;
            }
            if let Some(e) = else_expr.as_deref() {
                w.push(" ELSE ");
                render_expr(w, e, cfg)?;
            }
            w.push(" END");
        }
        Expr::Subquery { query } => {
            w.push_char('(');
            render_query(w, query, cfg)?;
            w.push_char(')');
        }
        Expr::Collate { expr, collate } => {
            render_expr(w, expr, cfg)?;
            w.push_char(' ');
            w.push(common_type_value(collate).join(" "));
        }
        Expr::FullText {
            columns,
            against,
            mode,
        } => {
            if columns.is_empty() {
                return Err(Error::malformed("full_text", "columns"));
            }
            w.push("MATCH (");
            for (i, c) in columns.iter().enumerate() {
                w.push_sep(i, ", ");
                push_column_ref(w, c, cfg)?;
            }
            w.push(") AGAINST (");
            render_expr(w, against, cfg)?;
            if let Some(m) = mode.as_deref().filter(|m| !m.is_empty()) {
                w.push_char(' ');
                w.push(to_upper(m));
            }
            w.push_char(')');
        }
        Expr::Interval { expr, unit } => {
            if unit.is_empty() {
                return Err(Error::malformed("interval", "unit"));
            }
            w.push("INTERVAL ");
            render_expr(w, expr, cfg)?;
            w.push_char(' ');
            w.push(to_upper(unit));
        }
    }
    Ok(())
}
