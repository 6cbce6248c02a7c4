use crate::renderer::ast as R;
use crate::renderer::error::Result;
use crate::renderer::expr::render_expr;
use crate::renderer::insert::render_assignments;
use crate::renderer::select::{
    render_from, render_limit, render_order_by_list, render_returning, render_table_ref,
    render_with,
};
use crate::renderer::{SqlRenderCfg, SqlWriter};

/// Рендер `[WITH ...] UPDATE t [JOIN ...] SET ... [FROM ...] [WHERE ...] [ORDER BY] [LIMIT] [RETURNING ...]`
pub fn render_update(w: &mut SqlWriter, u: &R::Update, cfg: &SqlRenderCfg) -> Result<()> {
    if let Some(with) = &u.with {
        render_with(w, with, cfg)?;
        w.push_char(' ');
    }

    // Префикс; OR REPLACE/IGNORE есть только в SQLite
    w.push("UPDATE");
    if let Some(or_) = &u.sqlite_or {
        w.push(" OR ");
        match or_ {
            R::SqliteOr::Replace => w.push("REPLACE"),
            R::SqliteOr::Ignore => w.push("IGNORE"),
        }
    }
    w.push_char(' ');

    render_from(w, std::slice::from_ref(&u.table), &u.joins, cfg)?;

    w.push(" SET ");
    render_assignments(w, &u.set, cfg)?;

    // FROM (PG/SQLite)
    if !u.from.is_empty() {
        w.push(" FROM ");
        for (i, t) in u.from.iter().enumerate() {
            w.push_sep(i, ", ");
            render_table_ref(w, t, cfg)?;
        }
    }

    if let Some(pred) = &u.r#where {
        w.push(" WHERE ");
        render_expr(w, pred, cfg)?;
    }

    if !u.order_by.is_empty() {
        w.push(" ORDER BY ");
        render_order_by_list(w, &u.order_by, cfg)?;
    }
    render_limit(w, u.limit.as_ref(), None, cfg)?;

    render_returning(w, &u.returning, cfg)
}
