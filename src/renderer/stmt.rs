use tracing::trace;

use super::ast::*;
use super::config::SqlRenderCfg;
use super::ddl::{
    push_object_name, render_alter_table, render_create_database, render_create_index,
    render_create_table, render_create_view, render_drop,
};
use super::delete::render_delete;
use super::dialect::Feature;
use super::error::{Error, Result};
use super::expr::render_expr;
use super::ident::quote_ident;
use super::insert::render_insert;
use super::select::render_query;
use super::update::render_update;
use super::writer::SqlWriter;

pub(crate) fn render_stmt_into(w: &mut SqlWriter, s: &Stmt, cfg: &SqlRenderCfg) -> Result<()> {
    trace!(kind = s.kind(), dialect = %cfg.dialect, "rendering statement");
    match s {
        Stmt::Query(q) => render_query(w, q, cfg),
        Stmt::Insert(i) => render_insert(w, i, cfg),
        Stmt::Update(u) => render_update(w, u, cfg),
        Stmt::Delete(d) => render_delete(w, d, cfg),
        Stmt::CreateTable(t) => render_create_table(w, t, cfg),
        Stmt::CreateDatabase(d) => render_create_database(w, d, cfg),
        Stmt::CreateView(v) => render_create_view(w, v, cfg),
        Stmt::CreateIndex(i) => render_create_index(w, i, cfg),
        Stmt::AlterTable(t) => render_alter_table(w, t, cfg),
        Stmt::Drop(d) => render_drop(w, d, cfg),
        Stmt::Show(s) => render_show(w, s, cfg),
        Stmt::Analyze(a) => render_analyze(w, a, cfg),
        Stmt::Attach(a) => render_attach(w, a, cfg),
    }
}

fn render_show(w: &mut SqlWriter, s: &Show, cfg: &SqlRenderCfg) -> Result<()> {
    match &s.target {
        ShowTarget::Tables { from } => {
            w.push("SHOW TABLES");
            if let Some(db) = from {
                w.push(" FROM ");
                w.push(quote_ident(db, cfg));
            }
        }
        ShowTarget::Databases => w.push("SHOW DATABASES"),
        ShowTarget::Columns { table } => {
            w.push("SHOW COLUMNS FROM ");
            push_object_name(w, table, cfg)?;
        }
        ShowTarget::Index { table } => {
            w.push("SHOW INDEX FROM ");
            push_object_name(w, table, cfg)?;
        }
        ShowTarget::Create { kind, name } => {
            w.push(match kind {
                ShowCreateKind::Table => "SHOW CREATE TABLE ",
                ShowCreateKind::View => "SHOW CREATE VIEW ",
                ShowCreateKind::Event => "SHOW CREATE EVENT ",
                ShowCreateKind::Trigger => "SHOW CREATE TRIGGER ",
                ShowCreateKind::Procedure => "SHOW CREATE PROCEDURE ",
            });
            push_object_name(w, name, cfg)?;
        }
    }
    Ok(())
}

fn render_analyze(w: &mut SqlWriter, a: &Analyze, cfg: &SqlRenderCfg) -> Result<()> {
    if a.names.is_empty() {
        return Err(Error::malformed("analyze", "names"));
    }
    w.push("ANALYZE ");
    if a.table_keyword {
        w.push("TABLE ");
    }
    for (i, n) in a.names.iter().enumerate() {
        w.push_sep(i, ", ");
        push_object_name(w, n, cfg)?;
    }
    Ok(())
}

/// ATTACH DATABASE есть только в SQLite, для остальных диалектов это ошибка
/// независимо от политики.
fn render_attach(w: &mut SqlWriter, a: &Attach, cfg: &SqlRenderCfg) -> Result<()> {
    if !cfg.dialect.supports(Feature::Attach) {
        return Err(Error::UnsupportedConstruct {
            construct: "ATTACH DATABASE".into(),
            dialect: cfg.dialect,
        });
    }
    if a.schema.is_empty() {
        return Err(Error::malformed("attach", "schema"));
    }
    w.push("ATTACH DATABASE ");
    render_expr(w, &a.expr, cfg)?;
    w.push(" AS ");
    w.push(quote_ident(&a.schema, cfg));
    Ok(())
}
