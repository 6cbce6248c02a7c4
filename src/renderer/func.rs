//! Вызовы функций, CAST, EXTRACT, ANY_VALUE, агрегаты и оконные спецификации.
//!
//! Все функции здесь собирают результат из необязательных фрагментов через
//! [`Fragments`], поэтому отсутствующие части не оставляют лишних пробелов.

use super::ast::{
    AggrFunc, AnyValueFunc, ArrayDim, Cast, CastSymbol, CommonType, ExtractFunc, FrameBound,
    FrameUnits, Function, Over, WindowFrame, WindowSpec,
};
use super::config::SqlRenderCfg;
use super::error::{Error, Result};
use super::expr::{expr_fragment, render_expr_list};
use super::ident::quote_ident;
use super::select::render_order_by_list;
use super::writer::{Fragments, SqlWriter, non_empty, to_upper, to_upper_opt};

/// `[KEYWORD, symbol?, VALUE]`: например `COLLATE UTF8MB4_BIN`.
pub fn common_type_value(c: &CommonType) -> Fragments<'_> {
    let mut parts = Fragments::new();
    parts
        .push(to_upper(&c.keyword))
        .push_opt(c.symbol.as_deref())
        .push(to_upper(&c.value));
    parts
}

fn over_opt(w: &mut SqlWriter, over: Option<&Over>, cfg: &SqlRenderCfg) -> Result<Option<String>> {
    over.map(|o| over_to_sql(w, o, cfg)).transpose()
}

pub fn func_to_sql(w: &mut SqlWriter, f: &Function, cfg: &SqlRenderCfg) -> Result<String> {
    if f.name.is_empty() {
        return Err(Error::malformed("function", "name"));
    }

    let Some(args) = &f.args else {
        let over = over_opt(w, f.over.as_ref(), cfg)?;
        let mut parts = Fragments::new();
        parts.push(f.name.as_str()).push_opt(over);
        return Ok(parts.join(" "));
    };

    // TRIM(BOTH '.' FROM x): единственная функция со своим разделителем
    let sep = if to_upper(&f.name) == "TRIM" {
        " "
    } else {
        f.separator
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(", ")
    };
    let rendered = w.capture(|w| render_expr_list(w, args, sep, cfg))?;

    let call = if f.args_parentheses {
        let mut call = String::with_capacity(f.name.len() + rendered.len() + 2);
        call.push_str(&f.name);
        call.push('(');
        call.push_str(&rendered);
        call.push(')');
        call
    } else {
        let mut parts = Fragments::new();
        parts.push(f.name.as_str()).push(rendered);
        parts.join(" ")
    };

    let suffix = f
        .suffix
        .as_deref()
        .map(|s| expr_fragment(w, s, cfg))
        .transpose()?;
    let mut call_parts = Fragments::new();
    call_parts.push(call).push_opt(suffix);
    let call = call_parts.join(" ");
    let call = if f.parentheses {
        format!("({call})")
    } else {
        call
    };

    let collate = f.collate.as_ref().map(|c| common_type_value(c).join(" "));
    let over = over_opt(w, f.over.as_ref(), cfg)?;

    let mut parts = Fragments::new();
    parts.push(call).push_opt(collate).push_opt(over);
    Ok(parts.join(" "))
}

fn array_dimension(dim: Option<ArrayDim>) -> &'static str {
    match dim {
        Some(ArrayDim::One) => "[]",
        Some(ArrayDim::Two) => "[][]",
        None => "",
    }
}

pub fn cast_to_sql(w: &mut SqlWriter, c: &Cast, cfg: &SqlRenderCfg) -> Result<String> {
    let target = &c.target;
    if target.data_type.is_empty() {
        return Err(Error::malformed("cast", "data_type"));
    }

    let mut size = String::new();
    if let Some(len) = target.length {
        let mut buf = itoa::Buffer::new();
        size.push_str(buf.format(len));
        if let Some(scale) = target.scale {
            size.push_str(", ");
            size.push_str(buf.format(scale));
        }
    }
    if target.parentheses {
        size = format!("({size})");
    }
    if !target.suffix.is_empty() {
        size.push(' ');
        size.push_str(&upper_words(&target.suffix));
    }

    let inner = expr_fragment(w, &c.expr, cfg)?;
    let (prefix, symbol, mut suffix) = match c.symbol {
        CastSymbol::As => {
            let keyword = c
                .keyword
                .as_deref()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| Error::malformed("cast", "keyword"))?;
            (format!("{}({inner}", to_upper(keyword)), " AS ", String::from(")"))
        }
        CastSymbol::DoubleColon => (inner, "::", String::new()),
    };

    if let Some(tail) = &c.tail {
        if tail.operator.trim().is_empty() {
            return Err(Error::malformed("cast", "tail.operator"));
        }
        let tail_expr = expr_fragment(w, &tail.expr, cfg)?;
        suffix.push(' ');
        suffix.push_str(&tail.operator);
        suffix.push(' ');
        suffix.push_str(&tail_expr);
    }
    if let Some(alias) = non_empty(c.alias.as_deref()) {
        suffix.push_str(" AS ");
        suffix.push_str(&quote_ident(alias, cfg));
    }
    if let Some(collate) = &c.collate {
        suffix.push(' ');
        suffix.push_str(&common_type_value(collate).join(" "));
    }

    let quote = target.quoted.as_deref();
    let type_name = match quote {
        Some(_) => target.data_type.as_str().into(),
        None => to_upper(&target.data_type),
    };

    let mut parts = Fragments::new();
    parts
        .push(prefix)
        .push(symbol)
        .push_opt(quote)
        .push(type_name)
        .push_opt(quote)
        .push(array_dimension(target.array))
        .push(size)
        .push(suffix);
    Ok(parts.concat())
}

pub(crate) fn upper_words(words: &[String]) -> String {
    words
        .iter()
        .map(|s| to_upper(s))
        .collect::<Fragments<'_>>()
        .join(" ")
}

pub fn extract_func_to_sql(
    w: &mut SqlWriter,
    x: &ExtractFunc,
    cfg: &SqlRenderCfg,
) -> Result<String> {
    if x.name.is_empty() {
        return Err(Error::malformed("extract", "name"));
    }
    if x.field.is_empty() {
        return Err(Error::malformed("extract", "field"));
    }
    let head = format!("{}({}", to_upper(&x.name), to_upper(&x.field));
    let source = expr_fragment(w, &x.source, cfg)?;

    let mut parts = Fragments::new();
    parts
        .push(head)
        .push("FROM")
        .push_opt(to_upper_opt(x.cast_type.as_deref()))
        .push(source);
    let mut sql = parts.join(" ");
    sql.push(')');
    Ok(sql)
}

pub fn any_value_func_to_sql(
    w: &mut SqlWriter,
    a: &AnyValueFunc,
    cfg: &SqlRenderCfg,
) -> Result<String> {
    if a.name.is_empty() {
        return Err(Error::malformed("any_value", "name"));
    }
    let inner = expr_fragment(w, &a.expr, cfg)?;
    let mut sql = format!("{}({inner}", to_upper(&a.name));
    if let Some(having) = &a.having {
        if having.prefix.is_empty() {
            return Err(Error::malformed("any_value", "having.prefix"));
        }
        let hv = expr_fragment(w, &having.expr, cfg)?;
        sql.push_str(" HAVING ");
        sql.push_str(&to_upper(&having.prefix));
        sql.push(' ');
        sql.push_str(&hv);
    }
    sql.push(')');

    let over = over_opt(w, a.over.as_ref(), cfg)?;
    let mut parts = Fragments::new();
    parts.push(sql).push_opt(over);
    Ok(parts.join(" "))
}

/// NAME([DISTINCT ]args[ ORDER BY ...][ SEPARATOR s])[ FILTER (WHERE ...)][ OVER ...]
pub fn aggr_func_to_sql(w: &mut SqlWriter, a: &AggrFunc, cfg: &SqlRenderCfg) -> Result<String> {
    if a.name.is_empty() {
        return Err(Error::malformed("aggregate", "name"));
    }
    let inner = w.capture(|w| {
        if a.distinct {
            w.push("DISTINCT ");
        }
        render_expr_list(w, &a.args, ", ", cfg)?;
        if !a.order_by.is_empty() {
            w.push(" ORDER BY ");
            render_order_by_list(w, &a.order_by, cfg)?;
        }
        Ok(())
    })?;
    let mut sql = format!("{}({inner}", to_upper(&a.name));
    if let Some(sep) = &a.separator {
        let sep = expr_fragment(w, sep, cfg)?;
        sql.push_str(" SEPARATOR ");
        sql.push_str(&sep);
    }
    sql.push(')');

    let filter = a
        .filter
        .as_deref()
        .map(|f| expr_fragment(w, f, cfg).map(|f| format!("FILTER (WHERE {f})")))
        .transpose()?;
    let over = over_opt(w, a.over.as_ref(), cfg)?;

    let mut parts = Fragments::new();
    parts.push(sql).push_opt(filter).push_opt(over);
    Ok(parts.join(" "))
}

pub fn over_to_sql(w: &mut SqlWriter, over: &Over, cfg: &SqlRenderCfg) -> Result<String> {
    match over {
        Over::Named { name } => {
            if name.is_empty() {
                return Err(Error::malformed("over", "name"));
            }
            Ok(format!("OVER {name}"))
        }
        Over::Spec(spec) => {
            let body = window_spec_to_sql(w, spec, cfg)?;
            Ok(format!("OVER ({body})"))
        }
    }
}

/// Содержимое скобок `OVER (...)` / `WINDOW w AS (...)`.
pub fn window_spec_to_sql(w: &mut SqlWriter, spec: &WindowSpec, cfg: &SqlRenderCfg) -> Result<String> {
    let mut parts = Fragments::new();
    parts.push_opt(spec.base.as_deref());

    if !spec.partition_by.is_empty() {
        let cols = w.capture(|w| render_expr_list(w, &spec.partition_by, ", ", cfg))?;
        parts.push(format!("PARTITION BY {cols}"));
    }
    if !spec.order_by.is_empty() {
        let items = w.capture(|w| render_order_by_list(w, &spec.order_by, cfg))?;
        parts.push(format!("ORDER BY {items}"));
    }
    if let Some(frame) = &spec.frame {
        let frame = frame_to_sql(w, frame, cfg)?;
        parts.push(frame);
    }
    Ok(parts.join(" "))
}

fn frame_to_sql(w: &mut SqlWriter, frame: &WindowFrame, cfg: &SqlRenderCfg) -> Result<String> {
    let units = match frame.units {
        FrameUnits::Rows => "ROWS",
        FrameUnits::Range => "RANGE",
        FrameUnits::Groups => "GROUPS",
    };
    let start = frame_bound_to_sql(w, &frame.start, cfg)?;
    match &frame.end {
        Some(end) => {
            let end = frame_bound_to_sql(w, end, cfg)?;
            Ok(format!("{units} BETWEEN {start} AND {end}"))
        }
        None => Ok(format!("{units} {start}")),
    }
}

fn frame_bound_to_sql(w: &mut SqlWriter, b: &FrameBound, cfg: &SqlRenderCfg) -> Result<String> {
    let s = match b {
        FrameBound::UnboundedPreceding => "UNBOUNDED PRECEDING".to_string(),
        FrameBound::Preceding { expr } => format!("{} PRECEDING", expr_fragment(w, expr, cfg)?),
        FrameBound::CurrentRow => "CURRENT ROW".to_string(),
        FrameBound::Following { expr } => format!("{} FOLLOWING", expr_fragment(w, expr, cfg)?),
        FrameBound::UnboundedFollowing => "UNBOUNDED FOLLOWING".to_string(),
    };
    Ok(s)
}
