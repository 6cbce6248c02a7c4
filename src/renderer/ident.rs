use crate::renderer::config::FoldCase;

use super::config::{Dialect, QuoteMode, SqlRenderCfg};
use super::writer::SqlWriter;
use std::{borrow::Cow, collections::HashSet, sync::OnceLock};

fn is_simple_ident(s: &str) -> bool {
    let mut it = s.chars();
    match it.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    it.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

const COMMON_KEYWORDS: &[&str] = &[
    "select",
    "from",
    "where",
    "group",
    "order",
    "by",
    "having",
    "limit",
    "offset",
    "join",
    "left",
    "right",
    "inner",
    "outer",
    "cross",
    "natural",
    "on",
    "using",
    "as",
    "and",
    "or",
    "not",
    "in",
    "is",
    "null",
    "like",
    "between",
    "case",
    "when",
    "then",
    "else",
    "end",
    "union",
    "all",
    "distinct",
    "user",
    "table",
    "index",
    "key",
    "primary",
    "unique",
    "constraint",
    "default",
    "check",
    "references",
    "create",
    "drop",
    "alter",
    "insert",
    "update",
    "delete",
    "into",
    "values",
    "set",
    "with",
    "window",
    "over",
    "partition",
];

static KW_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn kw_set() -> &'static HashSet<&'static str> {
    KW_SET.get_or_init(|| COMMON_KEYWORDS.iter().copied().collect())
}

fn is_common_keyword(s: &str) -> bool {
    kw_set().contains(&*s.to_ascii_lowercase())
}

fn escape_body(s: &str, dialect: Dialect) -> Cow<'_, str> {
    let close = dialect.quote_style().close();
    if s.contains(close) {
        let mut doubled = String::with_capacity(2);
        doubled.push(close);
        doubled.push(close);
        Cow::Owned(s.replace(close, &doubled))
    } else {
        Cow::Borrowed(s)
    }
}

pub fn quote_ident_always(name: &str, dialect: Dialect) -> String {
    let style = dialect.quote_style();
    let body = escape_body(name, dialect);
    let mut out = String::with_capacity(body.len() + 2);
    out.push(style.open());
    out.push_str(&body);
    out.push(style.close());
    out
}

/// Идентификатор по правилам диалекта: `name`, "name", [name].
/// `*` и псевдотаблица DUAL не квотируются.
pub fn quote_ident(name: &str, cfg: &SqlRenderCfg) -> String {
    if name == "*" || name.eq_ignore_ascii_case("dual") {
        return name.to_ascii_uppercase();
    }

    let name = match cfg.fold_idents {
        Some(FoldCase::Lower) => name.to_ascii_lowercase(),
        Some(FoldCase::Upper) => name.to_ascii_uppercase(),
        None => name.to_string(),
    };

    match cfg.quote {
        QuoteMode::Always => quote_ident_always(&name, cfg.dialect),
        QuoteMode::Smart { preserve_case } => {
            if preserve_case || !is_simple_ident(&name) || is_common_keyword(&name) {
                quote_ident_always(&name, cfg.dialect)
            } else {
                name
            }
        }
    }
}

/// schema.table / table.column / schema.table.column
pub fn quote_path<'a, I>(parts: I, cfg: &SqlRenderCfg) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    parts
        .into_iter()
        .map(|p| quote_ident(p, cfg))
        .collect::<Vec<_>>()
        .join(".")
}

pub fn push_quoted_path<'a, I>(w: &mut SqlWriter, parts: I, cfg: &SqlRenderCfg)
where
    I: IntoIterator<Item = &'a str>,
{
    for (i, p) in parts.into_iter().enumerate() {
        w.push_sep(i, ".");
        w.push(quote_ident(p, cfg));
    }
}
