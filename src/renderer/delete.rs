use crate::renderer::ast as R;
use crate::renderer::error::{Error, Result};
use crate::renderer::expr::render_expr;
use crate::renderer::select::{
    push_ident_list, render_from, render_limit, render_order_by_list, render_returning,
    render_table_ref, render_with,
};
use crate::renderer::{SqlRenderCfg, SqlWriter};

/// Рендер `DELETE [t1, t2] FROM ... [USING ...] [WHERE ...] [ORDER BY] [LIMIT] [RETURNING ...]`
pub fn render_delete(w: &mut SqlWriter, d: &R::Delete, cfg: &SqlRenderCfg) -> Result<()> {
    if d.from.is_empty() {
        return Err(Error::malformed("delete", "from"));
    }

    if let Some(with) = &d.with {
        render_with(w, with, cfg)?;
        w.push_char(' ');
    }

    w.push("DELETE ");
    // MySQL multi-table
    if !d.targets.is_empty() {
        push_ident_list(w, &d.targets, ("delete", "targets"), cfg)?;
        w.push_char(' ');
    }
    w.push("FROM ");
    render_from(w, &d.from, &d.joins, cfg)?;

    if !d.using.is_empty() {
        w.push(" USING ");
        for (i, t) in d.using.iter().enumerate() {
            w.push_sep(i, ", ");
            render_table_ref(w, t, cfg)?;
        }
    }

    if let Some(pred) = &d.r#where {
        w.push(" WHERE ");
        render_expr(w, pred, cfg)?;
    }

    if !d.order_by.is_empty() {
        w.push(" ORDER BY ");
        render_order_by_list(w, &d.order_by, cfg)?;
    }
    render_limit(w, d.limit.as_ref(), None, cfg)?;

    render_returning(w, &d.returning, cfg)
}
