//! CREATE / ALTER / DROP.
//!
//! Атрибуты колонки всегда печатаются в одном порядке: тип, NULL/NOT NULL,
//! DEFAULT, ON UPDATE, AUTO_INCREMENT, UNIQUE, PRIMARY KEY, COMMENT,
//! CHARACTER SET, COLLATE, CHECK, REFERENCES.

use super::ast::*;
use super::config::SqlRenderCfg;
use super::error::{Error, Result};
use super::expr::{expr_fragment, render_expr, render_expr_list};
use super::func::upper_words;
use super::ident::{push_quoted_path, quote_ident};
use super::literal::quote_string;
use super::select::{push_ident_list, render_query};
use super::writer::{Fragments, SqlWriter, non_empty, to_upper};

pub(crate) fn push_object_name(
    w: &mut SqlWriter,
    name: &ObjectName,
    cfg: &SqlRenderCfg,
) -> Result<()> {
    if name.name.is_empty() {
        return Err(Error::malformed("object name", "name"));
    }
    let path = [non_empty(name.schema.as_deref()), Some(name.name.as_str())];
    push_quoted_path(w, path.into_iter().flatten(), cfg);
    Ok(())
}

/// VARCHAR(64), DECIMAL(10, 2), ENUM('A', 'B'), INT(11) UNSIGNED
pub fn data_type_to_sql(w: &mut SqlWriter, dt: &DataType, cfg: &SqlRenderCfg) -> Result<String> {
    if dt.data_type.is_empty() {
        return Err(Error::malformed("data type", "data_type"));
    }
    let mut head = String::with_capacity(dt.data_type.len() + 8);
    match dt.quoted.as_deref() {
        Some(q) => {
            head.push_str(q);
            head.push_str(&dt.data_type);
            head.push_str(q);
        }
        None => head.push_str(&to_upper(&dt.data_type)),
    }

    if !dt.values.is_empty() {
        let values = w.capture(|w| render_expr_list(w, &dt.values, ", ", cfg))?;
        head.push('(');
        head.push_str(&values);
        head.push(')');
    } else if let Some(len) = dt.length {
        let mut buf = itoa::Buffer::new();
        head.push('(');
        head.push_str(buf.format(len));
        if let Some(scale) = dt.scale {
            head.push_str(", ");
            head.push_str(buf.format(scale));
        }
        head.push(')');
    } else if dt.parentheses {
        head.push_str("()");
    }

    match dt.array {
        Some(ArrayDim::One) => head.push_str("[]"),
        Some(ArrayDim::Two) => head.push_str("[][]"),
        None => {}
    }

    let mut parts = Fragments::new();
    parts.push(head).push(upper_words(&dt.suffix));
    Ok(parts.join(" "))
}

fn ref_action(a: RefAction) -> &'static str {
    match a {
        RefAction::Restrict => "RESTRICT",
        RefAction::Cascade => "CASCADE",
        RefAction::SetNull => "SET NULL",
        RefAction::SetDefault => "SET DEFAULT",
        RefAction::NoAction => "NO ACTION",
    }
}

fn render_reference(w: &mut SqlWriter, r: &Reference, cfg: &SqlRenderCfg) -> Result<()> {
    w.push("REFERENCES ");
    push_object_name(w, &r.table, cfg)?;
    if !r.columns.is_empty() {
        w.push(" (");
        push_ident_list(w, &r.columns, ("reference", "columns"), cfg)?;
        w.push_char(')');
    }
    if let Some(a) = r.on_delete {
        w.push(" ON DELETE ");
        w.push(ref_action(a));
    }
    if let Some(a) = r.on_update {
        w.push(" ON UPDATE ");
        w.push(ref_action(a));
    }
    Ok(())
}

pub fn column_def_to_sql(w: &mut SqlWriter, c: &ColumnDef, cfg: &SqlRenderCfg) -> Result<String> {
    if c.name.is_empty() {
        return Err(Error::malformed("column definition", "name"));
    }
    let o = &c.options;
    let mut parts = Fragments::new();
    parts.push(quote_ident(&c.name, cfg));

    if let Some(dt) = &c.data_type {
        let dt = data_type_to_sql(w, dt, cfg)?;
        parts.push(dt);
    }
    match o.nullable {
        Some(false) => {
            parts.push("NOT NULL");
        }
        Some(true) => {
            parts.push("NULL");
        }
        None => {}
    }
    if let Some(d) = &o.default {
        let d = expr_fragment(w, d, cfg)?;
        parts.push(format!("DEFAULT {d}"));
    }
    if let Some(u) = &o.on_update {
        let u = expr_fragment(w, u, cfg)?;
        parts.push(format!("ON UPDATE {u}"));
    }
    if o.auto_increment {
        parts.push(cfg.dialect.auto_increment_keyword());
    }
    if o.unique {
        parts.push("UNIQUE");
    }
    if o.primary_key {
        parts.push("PRIMARY KEY");
    }
    if let Some(comment) = &o.comment {
        parts.push(format!("COMMENT {}", quote_string(comment)));
    }
    if let Some(cs) = &o.character_set {
        parts.push(format!("CHARACTER SET {}", to_upper(cs)));
    }
    if let Some(coll) = &o.collate {
        parts.push(format!("COLLATE {}", to_upper(coll)));
    }
    if let Some(check) = &o.check {
        let check = expr_fragment(w, check, cfg)?;
        parts.push(format!("CHECK ({check})"));
    }
    if let Some(r) = &o.references {
        let r = w.capture(|w| render_reference(w, r, cfg))?;
        parts.push(r);
    }
    Ok(parts.join(" "))
}

fn push_index_columns(w: &mut SqlWriter, cols: &[IndexColumn], cfg: &SqlRenderCfg) -> Result<()> {
    if cols.is_empty() {
        return Err(Error::malformed("index", "columns"));
    }
    w.push_char('(');
    for (i, c) in cols.iter().enumerate() {
        if c.column.is_empty() {
            return Err(Error::malformed("index", "column"));
        }
        w.push_sep(i, ", ");
        w.push(quote_ident(&c.column, cfg));
        if let Some(len) = c.length {
            w.push_char('(');
            w.push_u64(len);
            w.push_char(')');
        }
        match c.order {
            Some(OrderDirection::Asc) => w.push(" ASC"),
            Some(OrderDirection::Desc) => w.push(" DESC"),
            None => {}
        }
    }
    w.push_char(')');
    Ok(())
}

#[inline]
fn push_using(w: &mut SqlWriter, using: Option<IndexType>) {
    match using {
        Some(IndexType::Btree) => w.push(" USING BTREE"),
        Some(IndexType::Hash) => w.push(" USING HASH"),
        None => {}
    }
}

fn push_constraint_name(w: &mut SqlWriter, name: Option<&str>, cfg: &SqlRenderCfg) {
    if let Some(n) = non_empty(name) {
        w.push("CONSTRAINT ");
        w.push(quote_ident(n, cfg));
        w.push_char(' ');
    }
}

pub(crate) fn render_constraint(
    w: &mut SqlWriter,
    c: &TableConstraint,
    cfg: &SqlRenderCfg,
) -> Result<()> {
    match c {
        TableConstraint::PrimaryKey {
            constraint,
            columns,
            using,
        } => {
            push_constraint_name(w, constraint.as_deref(), cfg);
            w.push("PRIMARY KEY ");
            push_index_columns(w, columns, cfg)?;
            push_using(w, *using);
        }
        TableConstraint::Unique {
            constraint,
            keyword,
            name,
            columns,
            using,
        } => {
            push_constraint_name(w, constraint.as_deref(), cfg);
            w.push("UNIQUE");
            match keyword {
                Some(IndexKeyword::Key) => w.push(" KEY"),
                Some(IndexKeyword::Index) => w.push(" INDEX"),
                None => {}
            }
            if let Some(n) = non_empty(name.as_deref()) {
                w.push_char(' ');
                w.push(quote_ident(n, cfg));
            }
            w.push_char(' ');
            push_index_columns(w, columns, cfg)?;
            push_using(w, *using);
        }
        TableConstraint::ForeignKey {
            constraint,
            columns,
            references,
        } => {
            if columns.is_empty() {
                return Err(Error::malformed("foreign key", "columns"));
            }
            push_constraint_name(w, constraint.as_deref(), cfg);
            w.push("FOREIGN KEY (");
            push_ident_list(w, columns, ("foreign key", "columns"), cfg)?;
            w.push(") ");
            render_reference(w, references, cfg)?;
        }
        TableConstraint::Check { constraint, expr } => {
            push_constraint_name(w, constraint.as_deref(), cfg);
            w.push("CHECK (");
            render_expr(w, expr, cfg)?;
            w.push_char(')');
        }
    }
    Ok(())
}

pub(crate) fn render_index_def(w: &mut SqlWriter, idx: &IndexDef, cfg: &SqlRenderCfg) -> Result<()> {
    w.push(match idx.kind {
        IndexKind::Key => "KEY",
        IndexKind::Index => "INDEX",
        IndexKind::Fulltext => "FULLTEXT INDEX",
        IndexKind::Spatial => "SPATIAL INDEX",
    });
    if let Some(n) = non_empty(idx.name.as_deref()) {
        w.push_char(' ');
        w.push(quote_ident(n, cfg));
    }
    w.push_char(' ');
    push_index_columns(w, &idx.columns, cfg)?;
    push_using(w, idx.using);
    Ok(())
}

/// ENGINE = INNODB; значения ENGINE и ROW_FORMAT нормализуются в верхний регистр.
fn table_option_to_sql(o: &TableOption) -> Result<String> {
    if o.keyword.is_empty() {
        return Err(Error::malformed("table option", "keyword"));
    }
    let keyword = to_upper(&o.keyword);
    let value = match &*keyword {
        "ENGINE" | "ROW_FORMAT" => to_upper(&o.value),
        _ => o.value.as_str().into(),
    };
    Ok(format!("{keyword} = {value}"))
}

fn push_table_options(w: &mut SqlWriter, options: &[TableOption]) -> Result<()> {
    for o in options {
        w.push_char(' ');
        w.push(table_option_to_sql(o)?);
    }
    Ok(())
}

pub fn render_create_table(w: &mut SqlWriter, t: &CreateTable, cfg: &SqlRenderCfg) -> Result<()> {
    if t.definitions.is_empty() && t.like.is_none() && t.as_query.is_none() {
        return Err(Error::malformed("create table", "definitions"));
    }

    w.push("CREATE ");
    if t.temporary {
        w.push("TEMPORARY ");
    }
    w.push("TABLE ");
    if t.if_not_exists {
        w.push("IF NOT EXISTS ");
    }
    push_object_name(w, &t.name, cfg)?;

    if let Some(src) = &t.like {
        w.push(" LIKE ");
        push_object_name(w, src, cfg)?;
        return Ok(());
    }

    if !t.definitions.is_empty() {
        w.push(" (");
        for (i, def) in t.definitions.iter().enumerate() {
            w.push_sep(i, ", ");
            match def {
                TableElement::Column(c) => {
                    let col = column_def_to_sql(w, c, cfg)?;
                    w.push(col);
                }
                TableElement::Constraint { constraint } => render_constraint(w, constraint, cfg)?,
                TableElement::Index(idx) => render_index_def(w, idx, cfg)?,
            }
        }
        w.push_char(')');
    }

    push_table_options(w, &t.options)?;

    if let Some(q) = &t.as_query {
        w.push(" AS ");
        render_query(w, q, cfg)?;
    }
    Ok(())
}

pub fn render_create_database(
    w: &mut SqlWriter,
    d: &CreateDatabase,
    cfg: &SqlRenderCfg,
) -> Result<()> {
    if d.name.is_empty() {
        return Err(Error::malformed("create database", "name"));
    }
    w.push(match d.keyword {
        DatabaseKeyword::Database => "CREATE DATABASE ",
        DatabaseKeyword::Schema => "CREATE SCHEMA ",
    });
    if d.if_not_exists {
        w.push("IF NOT EXISTS ");
    }
    w.push(quote_ident(&d.name, cfg));
    push_table_options(w, &d.options)
}

pub fn render_create_view(w: &mut SqlWriter, v: &CreateView, cfg: &SqlRenderCfg) -> Result<()> {
    w.push("CREATE ");
    if v.or_replace {
        w.push("OR REPLACE ");
    }
    w.push("VIEW ");
    push_object_name(w, &v.name, cfg)?;
    if !v.columns.is_empty() {
        w.push(" (");
        push_ident_list(w, &v.columns, ("create view", "columns"), cfg)?;
        w.push_char(')');
    }
    w.push(" AS ");
    render_query(w, &v.query, cfg)
}

pub fn render_create_index(w: &mut SqlWriter, idx: &CreateIndex, cfg: &SqlRenderCfg) -> Result<()> {
    if idx.name.is_empty() {
        return Err(Error::malformed("create index", "name"));
    }
    w.push("CREATE ");
    if idx.unique {
        w.push("UNIQUE ");
    }
    w.push("INDEX ");
    if idx.if_not_exists {
        w.push("IF NOT EXISTS ");
    }
    w.push(quote_ident(&idx.name, cfg));
    w.push(" ON ");
    push_object_name(w, &idx.table, cfg)?;
    w.push_char(' ');
    push_index_columns(w, &idx.columns, cfg)?;
    push_using(w, idx.using);
    Ok(())
}

#[inline]
fn push_column_keyword(w: &mut SqlWriter, verb: &str, column_keyword: bool) {
    w.push(verb);
    if column_keyword {
        w.push(" COLUMN");
    }
    w.push_char(' ');
}

fn render_alter_action(w: &mut SqlWriter, a: &AlterAction, cfg: &SqlRenderCfg) -> Result<()> {
    match a {
        AlterAction::AddColumn {
            column_keyword,
            column,
        } => {
            push_column_keyword(w, "ADD", *column_keyword);
            let col = column_def_to_sql(w, column, cfg)?;
            w.push(col);
        }
        AlterAction::DropColumn {
            column_keyword,
            name,
        } => {
            if name.is_empty() {
                return Err(Error::malformed("drop column", "name"));
            }
            push_column_keyword(w, "DROP", *column_keyword);
            w.push(quote_ident(name, cfg));
        }
        AlterAction::ModifyColumn {
            column_keyword,
            column,
        } => {
            push_column_keyword(w, "MODIFY", *column_keyword);
            let col = column_def_to_sql(w, column, cfg)?;
            w.push(col);
        }
        AlterAction::ChangeColumn {
            column_keyword,
            old_name,
            column,
        } => {
            if old_name.is_empty() {
                return Err(Error::malformed("change column", "old_name"));
            }
            push_column_keyword(w, "CHANGE", *column_keyword);
            w.push(quote_ident(old_name, cfg));
            w.push_char(' ');
            let col = column_def_to_sql(w, column, cfg)?;
            w.push(col);
        }
        AlterAction::RenameColumn { old_name, new_name } => {
            if old_name.is_empty() {
                return Err(Error::malformed("rename column", "old_name"));
            }
            if new_name.is_empty() {
                return Err(Error::malformed("rename column", "new_name"));
            }
            w.push("RENAME COLUMN ");
            w.push(quote_ident(old_name, cfg));
            w.push(" TO ");
            w.push(quote_ident(new_name, cfg));
        }
        AlterAction::AddConstraint { constraint } => {
            w.push("ADD ");
            render_constraint(w, constraint, cfg)?;
        }
        AlterAction::AddIndex { index } => {
            w.push("ADD ");
            render_index_def(w, index, cfg)?;
        }
        AlterAction::DropIndex { name } => {
            if name.is_empty() {
                return Err(Error::malformed("drop index", "name"));
            }
            w.push("DROP INDEX ");
            w.push(quote_ident(name, cfg));
        }
        AlterAction::DropPrimaryKey => w.push("DROP PRIMARY KEY"),
        AlterAction::RenameTable { to } => {
            w.push("RENAME TO ");
            push_object_name(w, to, cfg)?;
        }
        AlterAction::SetOption { option } => w.push(table_option_to_sql(option)?),
    }
    Ok(())
}

pub fn render_alter_table(w: &mut SqlWriter, t: &AlterTable, cfg: &SqlRenderCfg) -> Result<()> {
    if t.actions.is_empty() {
        return Err(Error::malformed("alter table", "actions"));
    }
    w.push("ALTER TABLE ");
    push_object_name(w, &t.name, cfg)?;
    w.push_char(' ');
    for (i, a) in t.actions.iter().enumerate() {
        w.push_sep(i, ", ");
        render_alter_action(w, a, cfg)?;
    }
    Ok(())
}

pub fn render_drop(w: &mut SqlWriter, d: &DropObject, cfg: &SqlRenderCfg) -> Result<()> {
    if d.names.is_empty() {
        return Err(Error::malformed("drop", "names"));
    }
    w.push(match d.kind {
        ObjectKind::Table => "DROP TABLE ",
        ObjectKind::Database => "DROP DATABASE ",
        ObjectKind::Schema => "DROP SCHEMA ",
        ObjectKind::View => "DROP VIEW ",
        ObjectKind::Index => "DROP INDEX ",
    });
    if d.if_exists {
        w.push("IF EXISTS ");
    }
    for (i, n) in d.names.iter().enumerate() {
        w.push_sep(i, ", ");
        push_object_name(w, n, cfg)?;
    }
    if let Some(t) = &d.on {
        w.push(" ON ");
        push_object_name(w, t, cfg)?;
    }
    Ok(())
}
