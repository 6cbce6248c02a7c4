use crate::renderer::config::MysqlLimitStyle;
use crate::renderer::dialect::Feature;
use crate::renderer::ident::push_quoted_path;

use super::ast as R;
use super::ast::*;
use super::config::SqlRenderCfg;
use super::error::{Error, Result};
use super::expr::{render_expr, render_expr_list};
use super::func::{func_to_sql, window_spec_to_sql};
use super::ident::quote_ident;
use super::literal::quote_string;
use super::writer::{SqlWriter, non_empty, to_upper};

pub fn render_sql_query(q: &R::Query, cfg: &SqlRenderCfg) -> Result<String> {
    let mut w = SqlWriter::new(256, cfg.placeholders);
    render_query(&mut w, q, cfg)?;
    Ok(w.finish())
}

pub fn render_query(w: &mut SqlWriter, q: &R::Query, cfg: &SqlRenderCfg) -> Result<()> {
    if let Some(with) = &q.with {
        render_with(w, with, cfg)?;
        w.push_char(' ');
    }

    // тело (Select/Set)
    render_query_body(w, &q.body, cfg)?;

    // общий ORDER BY / LIMIT / OFFSET
    if !q.order_by.is_empty() {
        w.push(" ORDER BY ");
        render_order_by_list(w, &q.order_by, cfg)?;
    }
    render_limit(w, q.limit.as_ref(), q.offset.as_ref(), cfg)
}

pub(crate) fn render_with(w: &mut SqlWriter, with: &R::With, cfg: &SqlRenderCfg) -> Result<()> {
    if with.ctes.is_empty() {
        return Err(Error::malformed("with", "ctes"));
    }
    w.push("WITH");
    if with.recursive {
        w.push(" RECURSIVE");
    }
    w.push_char(' ');
    for (i, cte) in with.ctes.iter().enumerate() {
        w.push_sep(i, ", ");

        if cte.name.is_empty() {
            return Err(Error::malformed("cte", "name"));
        }
        w.push(quote_ident(&cte.name, cfg));

        // (col1, col2, ...)
        if !cte.columns.is_empty() {
            w.push(" (");
            push_ident_list(w, &cte.columns, ("cte", "columns"), cfg)?;
            w.push_char(')');
        }

        // AS [MATERIALIZED|NOT MATERIALIZED] ( ... )
        w.push(" AS");
        match cte.materialized {
            Some(CteMaterialized::Materialized) => w.push(" MATERIALIZED"),
            Some(CteMaterialized::NotMaterialized) => w.push(" NOT MATERIALIZED"),
            None => {}
        }
        w.push(" (");
        render_query(w, &cte.query, cfg)?;
        w.push_char(')');
    }
    Ok(())
}

fn render_query_body(w: &mut SqlWriter, body: &R::QueryBody, cfg: &SqlRenderCfg) -> Result<()> {
    match body {
        R::QueryBody::Select(s) => render_select(w, s, cfg),
        R::QueryBody::Set { left, op, right } => {
            // скобки только явные: left OP right
            render_query_body(w, left, cfg)?;
            w.push(match op {
                R::SetOp::Union => " UNION ",
                R::SetOp::UnionAll => " UNION ALL ",
                R::SetOp::UnionDistinct => " UNION DISTINCT ",
                R::SetOp::Intersect => " INTERSECT ",
                R::SetOp::IntersectAll => " INTERSECT ALL ",
                R::SetOp::Except => " EXCEPT ",
                R::SetOp::ExceptAll => " EXCEPT ALL ",
                R::SetOp::Minus => " MINUS ",
            });
            render_query_body(w, right, cfg)
        }
    }
}

pub fn render_select(w: &mut SqlWriter, sel: &Select, cfg: &SqlRenderCfg) -> Result<()> {
    w.push("SELECT ");
    if !sel.distinct_on.is_empty() {
        w.push("DISTINCT ON (");
        render_expr_list(w, &sel.distinct_on, ", ", cfg)?;
        w.push(") ");
    } else if sel.distinct {
        w.push("DISTINCT ");
    }

    for opt in sel.options.iter().filter(|o| !o.is_empty()) {
        w.push(to_upper(opt));
        w.push_char(' ');
    }

    if sel.items.is_empty() {
        w.push_char('*');
    } else {
        render_select_items(w, &sel.items, cfg)?;
    }

    render_into_at(w, sel, IntoPosition::Column, cfg)?;

    if !sel.from.is_empty() {
        w.push(" FROM ");
        render_from(w, &sel.from, &sel.joins, cfg)?;
    }

    if let Some(pred) = &sel.r#where {
        w.push(" WHERE ");
        render_expr(w, pred, cfg)?;
    }

    render_group_by(w, sel, cfg)?;

    if let Some(h) = &sel.having {
        w.push(" HAVING ");
        render_expr(w, h, cfg)?;
    }

    if !sel.window.is_empty() {
        w.push(" WINDOW ");
        for (i, nw) in sel.window.iter().enumerate() {
            w.push_sep(i, ", ");
            if nw.name.is_empty() {
                return Err(Error::malformed("window", "name"));
            }
            let spec = window_spec_to_sql(w, &nw.spec, cfg)?;
            w.push(&nw.name);
            w.push(" AS (");
            w.push(spec);
            w.push_char(')');
        }
    }

    if !sel.order_by.is_empty() {
        w.push(" ORDER BY ");
        render_order_by_list(w, &sel.order_by, cfg)?;
    }

    render_limit(w, sel.limit.as_ref(), sel.offset.as_ref(), cfg)?;

    render_into_at(w, sel, IntoPosition::From, cfg)?;

    if let Some(lock) = &sel.locking {
        render_locking(w, lock, cfg)?;
    }

    render_into_at(w, sel, IntoPosition::End, cfg)
}

fn render_group_by(w: &mut SqlWriter, sel: &Select, cfg: &SqlRenderCfg) -> Result<()> {
    let grouping_sets = sel.group_by_modifiers.iter().find_map(|m| match m {
        GroupByModifier::GroupingSets { sets } => Some(sets),
        _ => None,
    });
    let has = |want: fn(&GroupByModifier) -> bool| sel.group_by_modifiers.iter().any(want);

    if let Some(sets) = grouping_sets {
        w.push(" GROUP BY GROUPING SETS (");
        for (i, set) in sets.iter().enumerate() {
            w.push_sep(i, ", ");
            w.push_char('(');
            render_expr_list(w, set, ", ", cfg)?;
            w.push_char(')');
        }
        w.push_char(')');
        return Ok(());
    }

    if sel.group_by.is_empty() {
        return Ok(());
    }

    if has(|m| matches!(m, GroupByModifier::Cube)) {
        w.push(" GROUP BY CUBE (");
        render_expr_list(w, &sel.group_by, ", ", cfg)?;
        w.push_char(')');
    } else if has(|m| matches!(m, GroupByModifier::Rollup)) {
        // MySQL/MariaDB знают только WITH ROLLUP
        if cfg.dialect.is_mysql_family() {
            w.push(" GROUP BY ");
            render_expr_list(w, &sel.group_by, ", ", cfg)?;
            w.push(" WITH ROLLUP");
        } else {
            w.push(" GROUP BY ROLLUP (");
            render_expr_list(w, &sel.group_by, ", ", cfg)?;
            w.push_char(')');
        }
    } else {
        w.push(" GROUP BY ");
        render_expr_list(w, &sel.group_by, ", ", cfg)?;
    }
    Ok(())
}

fn render_into_at(
    w: &mut SqlWriter,
    sel: &Select,
    pos: IntoPosition,
    cfg: &SqlRenderCfg,
) -> Result<()> {
    let Some(into) = sel.into.as_ref().filter(|i| i.position == pos) else {
        return Ok(());
    };
    w.push(" INTO ");
    match &into.target {
        IntoTarget::Vars { vars } => {
            if vars.is_empty() {
                return Err(Error::malformed("into", "vars"));
            }
            render_expr_list(w, vars, ", ", cfg)?;
        }
        IntoTarget::Outfile { file, charset } => {
            w.push("OUTFILE ");
            w.push(quote_string(file));
            if let Some(cs) = non_empty(charset.as_deref()) {
                w.push(" CHARACTER SET ");
                w.push(cs);
            }
        }
        IntoTarget::Dumpfile { file } => {
            w.push("DUMPFILE ");
            w.push(quote_string(file));
        }
        IntoTarget::Table { name } => w.push(quote_ident(name, cfg)),
    }
    Ok(())
}

fn render_locking(w: &mut SqlWriter, lock: &Locking, cfg: &SqlRenderCfg) -> Result<()> {
    match lock.mode {
        LockMode::Update => w.push(" FOR UPDATE"),
        LockMode::Share => w.push(" FOR SHARE"),
        LockMode::LockInShareMode => {
            w.push(" LOCK IN SHARE MODE");
            return Ok(());
        }
    }
    if !lock.of.is_empty() {
        w.push(" OF ");
        push_ident_list(w, &lock.of, ("locking", "of"), cfg)?;
    }
    match lock.wait {
        Some(LockWait::Nowait) => w.push(" NOWAIT"),
        Some(LockWait::SkipLocked) => w.push(" SKIP LOCKED"),
        None => {}
    }
    Ok(())
}

pub(crate) fn render_limit(
    w: &mut SqlWriter,
    limit: Option<&Expr>,
    offset: Option<&Expr>,
    cfg: &SqlRenderCfg,
) -> Result<()> {
    match (cfg.mysql_limit_style, limit, offset) {
        (MysqlLimitStyle::OffsetCommaLimit, Some(l), Some(o)) if cfg.dialect.is_mysql_family() => {
            w.push(" LIMIT ");
            render_expr(w, o, cfg)?; // offset
            w.push(", ");
            render_expr(w, l, cfg)?; // count
        }
        _ => {
            if let Some(l) = limit {
                w.push(" LIMIT ");
                render_expr(w, l, cfg)?;
            }
            if let Some(o) = offset {
                w.push(" OFFSET ");
                render_expr(w, o, cfg)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn render_order_by_list(
    w: &mut SqlWriter,
    items: &[OrderItem],
    cfg: &SqlRenderCfg,
) -> Result<()> {
    let emulate_nulls =
        cfg.emulate_nulls_ordering && !cfg.dialect.supports(Feature::NullsOrdering);

    for (i, oi) in items.iter().enumerate() {
        w.push_sep(i, ", ");

        if let (true, Some(nulls)) = (emulate_nulls, oi.nulls) {
            // (expr IS NULL) ASC|DESC, expr <ASC|DESC>
            // выражение рендерится один раз: $n повторяется, а два `?` потребовали бы двух значений
            let positional = w.positional;
            let expr = w.capture(|w| render_expr(w, &oi.expr, cfg))?;
            if w.positional != positional {
                return Err(Error::UnsupportedConstruct {
                    construct: "positional parameter in emulated NULLS FIRST/LAST".into(),
                    dialect: cfg.dialect,
                });
            }
            w.push_char('(');
            w.push(&expr);
            w.push(match nulls {
                NullsOrder::Last => " IS NULL) ASC, ",
                NullsOrder::First => " IS NULL) DESC, ",
            });
            w.push(&expr);
            push_direction(w, oi.dir);
            continue;
        }

        render_expr(w, &oi.expr, cfg)?;
        push_direction(w, oi.dir);
        match oi.nulls {
            Some(NullsOrder::First) => w.push(" NULLS FIRST"),
            Some(NullsOrder::Last) => w.push(" NULLS LAST"),
            None => {}
        }
    }
    Ok(())
}

#[inline]
fn push_direction(w: &mut SqlWriter, dir: Option<OrderDirection>) {
    match dir {
        Some(OrderDirection::Asc) => w.push(" ASC"),
        Some(OrderDirection::Desc) => w.push(" DESC"),
        None => {}
    }
}

pub(crate) fn render_select_items(
    w: &mut SqlWriter,
    items: &[SelectItem],
    cfg: &SqlRenderCfg,
) -> Result<()> {
    for (i, it) in items.iter().enumerate() {
        w.push_sep(i, ", ");
        render_select_item(w, it, cfg)?;
    }
    Ok(())
}

fn render_select_item(w: &mut SqlWriter, it: &SelectItem, cfg: &SqlRenderCfg) -> Result<()> {
    match it {
        // SELECT *
        SelectItem::Star => w.push_char('*'),

        // SELECT table.*
        SelectItem::QualifiedStar { table } => {
            if table.is_empty() {
                return Err(Error::malformed("select item", "table"));
            }
            w.push(quote_ident(table, cfg));
            w.push(".*");
        }

        // SELECT expr [AS alias]
        SelectItem::Expr { expr, alias } => {
            render_expr(w, expr, cfg)?;
            if let Some(a) = non_empty(alias.as_deref()) {
                push_alias(w, a, cfg, cfg.emit_as_for_column_alias);
            }
        }
    }
    Ok(())
}

/// RETURNING для INSERT/UPDATE/DELETE.
pub(crate) fn render_returning(
    w: &mut SqlWriter,
    items: &[SelectItem],
    cfg: &SqlRenderCfg,
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    w.push(" RETURNING ");
    render_select_items(w, items, cfg)
}

/// FROM a, b JOIN c ...
pub(crate) fn render_from(
    w: &mut SqlWriter,
    from: &[TableRef],
    joins: &[Join],
    cfg: &SqlRenderCfg,
) -> Result<()> {
    for (i, t) in from.iter().enumerate() {
        w.push_sep(i, ", ");
        render_table_ref(w, t, cfg)?;
    }
    for j in joins {
        w.push_char(' ');
        render_join(w, j, cfg)?;
    }
    Ok(())
}

/// (1,'hi'): значения строки через запятую без пробела.
pub(crate) fn render_value_row(w: &mut SqlWriter, row: &[Expr], cfg: &SqlRenderCfg) -> Result<()> {
    w.push_char('(');
    render_expr_list(w, row, ",", cfg)?;
    w.push_char(')');
    Ok(())
}

pub(crate) fn render_table_ref(w: &mut SqlWriter, t: &TableRef, cfg: &SqlRenderCfg) -> Result<()> {
    match t {
        TableRef::Named {
            schema,
            name,
            alias,
        } => {
            if name.is_empty() {
                return Err(Error::malformed("table", "name"));
            }
            if let Some(s) = non_empty(schema.as_deref()) {
                push_quoted_path(w, [s, name.as_str()], cfg);
            } else {
                w.push(quote_ident(name, cfg));
            }
            push_table_alias(w, alias.as_deref(), cfg);
        }
        TableRef::Subquery { query, alias } => {
            w.push_char('(');
            render_query(w, query, cfg)?;
            w.push_char(')');
            push_table_alias(w, alias.as_deref(), cfg);
        }
        TableRef::Function { function, alias } => {
            let sql = func_to_sql(w, function, cfg)?;
            w.push(sql);
            push_table_alias(w, alias.as_deref(), cfg);
        }
        TableRef::Values {
            rows,
            row_keyword,
            alias,
        } => {
            if rows.is_empty() {
                return Err(Error::malformed("values", "rows"));
            }
            w.push("(VALUES ");
            for (i, row) in rows.iter().enumerate() {
                w.push_sep(i, ", ");
                if *row_keyword {
                    w.push("ROW");
                }
                render_value_row(w, row, cfg)?;
            }
            w.push_char(')');
            push_table_alias(w, alias.as_deref(), cfg);
        }
        TableRef::Paren { table } => {
            w.push_char('(');
            render_table_ref(w, table, cfg)?;
            w.push_char(')');
        }
    }
    Ok(())
}

fn render_join(w: &mut SqlWriter, j: &Join, cfg: &SqlRenderCfg) -> Result<()> {
    match j.kind {
        JoinKind::Inner => w.push("INNER JOIN "),
        JoinKind::Left => w.push("LEFT JOIN "),
        JoinKind::Right => w.push("RIGHT JOIN "),
        JoinKind::Full => w.push("FULL JOIN "),
        JoinKind::Cross => w.push("CROSS JOIN "),
        JoinKind::NaturalInner => w.push("NATURAL INNER JOIN "),
        JoinKind::NaturalLeft => w.push("NATURAL LEFT JOIN "),
        JoinKind::NaturalRight => w.push("NATURAL RIGHT JOIN "),
        JoinKind::NaturalFull => w.push("NATURAL FULL JOIN "),
    }
    render_table_ref(w, &j.table, cfg)?;
    if !matches!(
        j.kind,
        JoinKind::Cross
            | JoinKind::NaturalInner
            | JoinKind::NaturalLeft
            | JoinKind::NaturalRight
            | JoinKind::NaturalFull
    ) {
        if let Some(on) = &j.on {
            w.push(" ON ");
            render_expr(w, on, cfg)?;
        } else if let Some(cols) = &j.using_cols {
            w.push(" USING (");
            push_ident_list(w, cols, ("join", "using"), cfg)?;
            w.push_char(')');
        }
    }
    Ok(())
}

/// `a`, `b`, `c`; пустое имя в списке: `MalformedNode { node, field }`.
pub(crate) fn push_ident_list(
    w: &mut SqlWriter,
    names: &[String],
    (node, field): (&'static str, &'static str),
    cfg: &SqlRenderCfg,
) -> Result<()> {
    for (i, c) in names.iter().enumerate() {
        if c.is_empty() {
            return Err(Error::malformed(node, field));
        }
        w.push_sep(i, ", ");
        w.push(quote_ident(c, cfg));
    }
    Ok(())
}

#[inline]
pub(crate) fn push_table_alias(w: &mut SqlWriter, alias: Option<&str>, cfg: &SqlRenderCfg) {
    if let Some(a) = non_empty(alias) {
        push_alias(w, a, cfg, cfg.emit_as_for_table_alias);
    }
}

#[inline]
fn push_alias(w: &mut SqlWriter, alias: &str, cfg: &SqlRenderCfg, emit_as: bool) {
    if emit_as {
        w.push(" AS ");
    } else {
        w.push_char(' ');
    }
    w.push(quote_ident(alias, cfg));
}
