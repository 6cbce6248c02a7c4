use crate::renderer::ast as R;
use crate::renderer::error::{Error, Result};
use crate::renderer::expr::render_expr;
use crate::renderer::ident::{quote_ident, quote_path};
use crate::renderer::select::{
    push_ident_list, render_query, render_returning, render_table_ref, render_value_row,
};
use crate::renderer::writer::non_empty;
use crate::renderer::{Dialect, SqlRenderCfg, SqlWriter};

/// Рендер `INSERT` / `REPLACE` с учётом диалектов.
pub fn render_insert(w: &mut SqlWriter, i: &R::Insert, cfg: &SqlRenderCfg) -> Result<()> {
    if !matches!(i.table, R::TableRef::Named { .. }) {
        return Err(Error::malformed("insert", "table"));
    }

    let mysql = cfg.dialect.is_mysql_family();
    let action = i.on_conflict.as_ref().and_then(|c| c.action.as_ref());

    // 1) Префикс
    w.push(if i.replace { "REPLACE" } else { "INSERT" });
    let mysql_do_nothing = mysql && matches!(action, Some(R::OnConflictAction::DoNothing));
    match cfg.dialect {
        // OR IGNORE уживается с ON CONFLICT: upsert-клауза применяется первой
        Dialect::SQLite if i.ignore => w.push(" OR IGNORE"),
        Dialect::SQLite => {}
        d if d.is_postgres_family()
            && i.ignore
            && matches!(action, Some(R::OnConflictAction::DoUpdate { .. })) =>
        {
            return Err(Error::UnsupportedConstruct {
                construct: "INSERT IGNORE with ON CONFLICT DO UPDATE".into(),
                dialect: d,
            });
        }
        // PG: IGNORE выражается через ON CONFLICT DO NOTHING ниже
        d if d.is_postgres_family() => {}
        _ if i.ignore || mysql_do_nothing => w.push(" IGNORE"),
        _ => {}
    }
    if i.into {
        w.push(" INTO");
    }
    w.push_char(' ');

    // 2) Таблица и колонки
    render_table_ref(w, &i.table, cfg)?;

    if !i.columns.is_empty() {
        w.push(" (");
        push_ident_list(w, &i.columns, ("insert", "columns"), cfg)?;
        w.push_char(')');
    }

    // 3) Источник строк
    match &i.source {
        R::InsertSource::Values { rows } => {
            if rows.is_empty() {
                return Err(Error::malformed("insert", "rows"));
            }
            w.push(" VALUES ");
            for (n, row) in rows.iter().enumerate() {
                w.push_sep(n, ", ");
                render_value_row(w, row, cfg)?;
            }
        }
        R::InsertSource::Query { query } => {
            w.push_char(' ');
            render_query(w, query, cfg)?;
        }
        R::InsertSource::Set { assignments } => {
            w.push(" SET ");
            render_assignments(w, assignments, cfg)?;
        }
    }

    // MySQL 8: ON DUPLICATE KEY UPDATE c = `new`.c требует алиаса строки,
    // у INSERT ... SELECT алиаса нет, там остаётся VALUES(c)
    let inserted = InsertedRef::for_insert(i, cfg);
    if inserted == InsertedRef::RowAlias && uses_inserted_values(action) {
        w.push(" AS ");
        w.push(quote_ident(ROW_ALIAS, cfg));
    }

    // 4) UPSERT/IGNORE
    if mysql {
        if let Some(R::OnConflictAction::DoUpdate {
            set,
            where_predicate,
        }) = action
        {
            if where_predicate.is_some() {
                return Err(Error::UnsupportedConstruct {
                    construct: "ON DUPLICATE KEY UPDATE ... WHERE".into(),
                    dialect: cfg.dialect,
                });
            }
            w.push(" ON DUPLICATE KEY UPDATE ");
            render_assignments_with(w, set, inserted, cfg)?;
        }
    } else if let Some(spec) = &i.on_conflict {
        w.push(" ON CONFLICT");
        if let Some(name) = non_empty(spec.on_constraint.as_deref()) {
            w.push(" ON CONSTRAINT ");
            w.push(quote_ident(name, cfg));
        } else if !spec.target_columns.is_empty() {
            w.push(" (");
            push_ident_list(w, &spec.target_columns, ("on conflict", "target_columns"), cfg)?;
            w.push_char(')');
        }
        match &spec.action {
            None => {
                if i.ignore {
                    w.push(" DO NOTHING");
                }
            }
            Some(R::OnConflictAction::DoNothing) => w.push(" DO NOTHING"),
            Some(R::OnConflictAction::DoUpdate {
                set,
                where_predicate,
            }) => {
                w.push(" DO UPDATE SET ");
                render_assignments_with(w, set, inserted, cfg)?;
                if let Some(pred) = where_predicate {
                    w.push(" WHERE ");
                    render_expr(w, pred, cfg)?;
                }
            }
        }
    } else if i.ignore && cfg.dialect.is_postgres_family() {
        w.push(" ON CONFLICT DO NOTHING");
    }

    render_returning(w, &i.returning, cfg)
}

fn uses_inserted_values(action: Option<&R::OnConflictAction>) -> bool {
    match action {
        Some(R::OnConflictAction::DoUpdate { set, .. }) => set.iter().any(|a| a.from_inserted),
        _ => false,
    }
}

const ROW_ALIAS: &str = "new";

/// Как сослаться на вставляемое значение колонки.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InsertedRef {
    /// EXCLUDED.col (PG/SQLite)
    Excluded,
    /// `new`.col (MySQL 8)
    RowAlias,
    /// VALUES(col) (MariaDB, MySQL для INSERT ... SELECT)
    ValuesFn,
}

impl InsertedRef {
    fn for_insert(i: &R::Insert, cfg: &SqlRenderCfg) -> Self {
        match cfg.dialect {
            Dialect::MySQL if matches!(i.source, R::InsertSource::Query { .. }) => {
                InsertedRef::ValuesFn
            }
            Dialect::MySQL => InsertedRef::RowAlias,
            Dialect::MariaDB => InsertedRef::ValuesFn,
            _ => InsertedRef::Excluded,
        }
    }
}

/// a = b, t.c = d, ...
pub(crate) fn render_assignments(
    w: &mut SqlWriter,
    set: &[R::Assign],
    cfg: &SqlRenderCfg,
) -> Result<()> {
    render_assignments_with(w, set, InsertedRef::Excluded, cfg)
}

fn render_assignments_with(
    w: &mut SqlWriter,
    set: &[R::Assign],
    inserted: InsertedRef,
    cfg: &SqlRenderCfg,
) -> Result<()> {
    if set.is_empty() {
        return Err(Error::malformed("assignment list", "set"));
    }
    for (i, a) in set.iter().enumerate() {
        w.push_sep(i, ", ");
        if a.col.is_empty() {
            return Err(Error::malformed("assignment", "col"));
        }
        let target = [non_empty(a.table.as_deref()), Some(a.col.as_str())];
        w.push(quote_path(target.into_iter().flatten(), cfg));
        w.push(" = ");
        if a.from_inserted {
            push_inserted_ref(w, &a.col, inserted, cfg);
        } else {
            render_expr(w, &a.value, cfg)?;
        }
    }
    Ok(())
}

fn push_inserted_ref(w: &mut SqlWriter, col: &str, inserted: InsertedRef, cfg: &SqlRenderCfg) {
    match inserted {
        InsertedRef::RowAlias => w.push(quote_path([ROW_ALIAS, col], cfg)),
        InsertedRef::ValuesFn => {
            w.push("VALUES(");
            w.push(quote_ident(col, cfg));
            w.push_char(')');
        }
        InsertedRef::Excluded => {
            w.push("EXCLUDED.");
            w.push(quote_ident(col, cfg));
        }
    }
}
