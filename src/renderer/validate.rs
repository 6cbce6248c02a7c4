use std::collections::BTreeSet;

use tracing::debug;

use super::Error;
use crate::renderer::{
    ast::{self as R, Stmt},
    config::{FeaturePolicy, SqlRenderCfg},
    dialect::Feature,
};

/// Строгая политика: первая (в порядке [`Feature`]) конструкция, которой нет
/// в диалекте, превращается в ошибку. При мягкой политике всегда `None`.
pub fn validate_stmt_features(s: &Stmt, cfg: &SqlRenderCfg) -> Option<Error> {
    if !matches!(cfg.policy, FeaturePolicy::Strict) {
        return None;
    }

    let mut used = Used::new();
    collect_stmt(s, cfg, &mut used);
    reject_first(used, cfg)
}

pub fn validate_query_features(q: &R::Query, cfg: &SqlRenderCfg) -> Option<Error> {
    if !matches!(cfg.policy, FeaturePolicy::Strict) {
        return None;
    }

    let mut used = Used::new();
    collect_query(q, cfg, &mut used);
    reject_first(used, cfg)
}

type Used = BTreeSet<Feature>;

fn reject_first(used: Used, cfg: &SqlRenderCfg) -> Option<Error> {
    let feature = used.into_iter().find(|f| !cfg.dialect.supports(*f))?;
    debug!(
        feature = feature.label(),
        dialect = %cfg.dialect,
        "strict policy rejected feature"
    );
    Some(Error::UnsupportedFeature {
        feature: feature.label().into(),
        dialect: cfg.dialect,
    })
}

fn collect_stmt(s: &Stmt, cfg: &SqlRenderCfg, out: &mut Used) {
    match s {
        Stmt::Query(q) => collect_query(q, cfg, out),
        Stmt::Insert(i) => {
            if i.ignore {
                out.insert(Feature::InsertIgnore);
            }
            if let Some(c) = &i.on_conflict {
                out.insert(if cfg.dialect.is_mysql_family() {
                    Feature::OnDuplicateKey
                } else {
                    Feature::OnConflict
                });
                if let Some(R::OnConflictAction::DoUpdate {
                    set,
                    where_predicate,
                }) = &c.action
                {
                    collect_assignments(set, cfg, out);
                    collect_opt(where_predicate.as_ref(), cfg, out);
                }
            }
            match &i.source {
                R::InsertSource::Values { rows } => {
                    rows.iter().flatten().for_each(|e| collect_expr(e, cfg, out))
                }
                R::InsertSource::Query { query } => collect_query(query, cfg, out),
                R::InsertSource::Set { assignments } => collect_assignments(assignments, cfg, out),
            }
            collect_returning(&i.returning, cfg, out);
        }
        Stmt::Update(u) => {
            if let Some(w) = &u.with {
                collect_with(w, cfg, out);
            }
            collect_table(&u.table, cfg, out);
            collect_joins(&u.joins, cfg, out);
            collect_assignments(&u.set, cfg, out);
            u.from.iter().for_each(|t| collect_table(t, cfg, out));
            collect_opt(u.r#where.as_ref(), cfg, out);
            collect_order(&u.order_by, cfg, out);
            collect_opt(u.limit.as_ref(), cfg, out);
            collect_returning(&u.returning, cfg, out);
        }
        Stmt::Delete(d) => {
            if let Some(w) = &d.with {
                collect_with(w, cfg, out);
            }
            d.from.iter().for_each(|t| collect_table(t, cfg, out));
            collect_joins(&d.joins, cfg, out);
            d.using.iter().for_each(|t| collect_table(t, cfg, out));
            collect_opt(d.r#where.as_ref(), cfg, out);
            collect_order(&d.order_by, cfg, out);
            collect_opt(d.limit.as_ref(), cfg, out);
            collect_returning(&d.returning, cfg, out);
        }
        Stmt::CreateTable(t) => {
            if let Some(q) = &t.as_query {
                collect_query(q, cfg, out);
            }
        }
        Stmt::CreateView(v) => collect_query(&v.query, cfg, out),
        // ATTACH вне SQLite: UnsupportedConstruct при рендере
        Stmt::Attach(_)
        | Stmt::CreateDatabase(_)
        | Stmt::CreateIndex(_)
        | Stmt::AlterTable(_)
        | Stmt::Drop(_)
        | Stmt::Show(_)
        | Stmt::Analyze(_) => {}
    }
}

fn collect_with(w: &R::With, cfg: &SqlRenderCfg, out: &mut Used) {
    for cte in &w.ctes {
        if cte.materialized.is_some() {
            out.insert(Feature::CteMaterialized);
        }
        collect_query(&cte.query, cfg, out);
    }
}

fn collect_query(q: &R::Query, cfg: &SqlRenderCfg, out: &mut Used) {
    if let Some(w) = &q.with {
        collect_with(w, cfg, out);
    }
    collect_body(&q.body, cfg, out);
    collect_order(&q.order_by, cfg, out);
    collect_opt(q.limit.as_ref(), cfg, out);
    collect_opt(q.offset.as_ref(), cfg, out);
}

fn collect_body(body: &R::QueryBody, cfg: &SqlRenderCfg, out: &mut Used) {
    match body {
        R::QueryBody::Select(s) => collect_select(s, cfg, out),
        R::QueryBody::Set { left, op, right } => {
            if matches!(op, R::SetOp::Minus) {
                out.insert(Feature::Minus);
            }
            collect_body(left, cfg, out);
            collect_body(right, cfg, out);
        }
    }
}

fn collect_select(s: &R::Select, cfg: &SqlRenderCfg, out: &mut Used) {
    if !s.distinct_on.is_empty() {
        out.insert(Feature::DistinctOn);
    }
    s.distinct_on.iter().for_each(|e| collect_expr(e, cfg, out));
    for it in &s.items {
        if let R::SelectItem::Expr { expr, .. } = it {
            collect_expr(expr, cfg, out);
        }
    }
    if let Some(R::SelectInto {
        target: R::IntoTarget::Vars { vars },
        ..
    }) = &s.into
    {
        vars.iter().for_each(|e| collect_expr(e, cfg, out));
    }
    s.from.iter().for_each(|t| collect_table(t, cfg, out));
    collect_joins(&s.joins, cfg, out);
    collect_opt(s.r#where.as_ref(), cfg, out);
    s.group_by.iter().for_each(|e| collect_expr(e, cfg, out));
    for m in &s.group_by_modifiers {
        let feature = match m {
            R::GroupByModifier::Rollup => Feature::GroupByRollup,
            R::GroupByModifier::Cube => Feature::GroupByCube,
            R::GroupByModifier::GroupingSets { sets } => {
                sets.iter().flatten().for_each(|e| collect_expr(e, cfg, out));
                Feature::GroupingSets
            }
        };
        out.insert(feature);
    }
    collect_opt(s.having.as_ref(), cfg, out);
    for nw in &s.window {
        collect_window(&nw.spec, cfg, out);
    }
    collect_order(&s.order_by, cfg, out);
    collect_opt(s.limit.as_ref(), cfg, out);
    collect_opt(s.offset.as_ref(), cfg, out);
}

fn collect_table(t: &R::TableRef, cfg: &SqlRenderCfg, out: &mut Used) {
    match t {
        R::TableRef::Named { .. } => {}
        R::TableRef::Subquery { query, .. } => collect_query(query, cfg, out),
        R::TableRef::Function { function, .. } => collect_function(function, cfg, out),
        R::TableRef::Values { rows, .. } => {
            rows.iter().flatten().for_each(|e| collect_expr(e, cfg, out))
        }
        R::TableRef::Paren { table } => collect_table(table, cfg, out),
    }
}

fn collect_joins(joins: &[R::Join], cfg: &SqlRenderCfg, out: &mut Used) {
    for j in joins {
        collect_table(&j.table, cfg, out);
        collect_opt(j.on.as_ref(), cfg, out);
    }
}

fn collect_order(items: &[R::OrderItem], cfg: &SqlRenderCfg, out: &mut Used) {
    for oi in items {
        // при эмуляции NULLS FIRST/LAST в тексте не появляется
        if oi.nulls.is_some() && !cfg.emulate_nulls_ordering {
            out.insert(Feature::NullsOrdering);
        }
        collect_expr(&oi.expr, cfg, out);
    }
}

fn collect_assignments(set: &[R::Assign], cfg: &SqlRenderCfg, out: &mut Used) {
    set.iter().for_each(|a| collect_expr(&a.value, cfg, out));
}

fn collect_returning(items: &[R::SelectItem], cfg: &SqlRenderCfg, out: &mut Used) {
    if items.is_empty() {
        return;
    }
    out.insert(Feature::Returning);
    for it in items {
        if let R::SelectItem::Expr { expr, .. } = it {
            collect_expr(expr, cfg, out);
        }
    }
}

fn collect_window(spec: &R::WindowSpec, cfg: &SqlRenderCfg, out: &mut Used) {
    spec.partition_by.iter().for_each(|e| collect_expr(e, cfg, out));
    collect_order(&spec.order_by, cfg, out);
    if let Some(frame) = &spec.frame {
        for bound in std::iter::once(&frame.start).chain(frame.end.as_ref()) {
            if let R::FrameBound::Preceding { expr } | R::FrameBound::Following { expr } = bound {
                collect_expr(expr, cfg, out);
            }
        }
    }
}

fn collect_over(over: Option<&R::Over>, cfg: &SqlRenderCfg, out: &mut Used) {
    if let Some(R::Over::Spec(spec)) = over {
        collect_window(spec, cfg, out);
    }
}

fn collect_function(f: &R::Function, cfg: &SqlRenderCfg, out: &mut Used) {
    f.args.iter().flatten().for_each(|e| collect_expr(e, cfg, out));
    if let Some(s) = &f.suffix {
        collect_expr(s, cfg, out);
    }
    collect_over(f.over.as_ref(), cfg, out);
}

#[inline]
fn collect_opt(e: Option<&R::Expr>, cfg: &SqlRenderCfg, out: &mut Used) {
    if let Some(e) = e {
        collect_expr(e, cfg, out);
    }
}

fn collect_expr(e: &R::Expr, cfg: &SqlRenderCfg, out: &mut Used) {
    match e {
        R::Expr::Column(_)
        | R::Expr::Star { .. }
        | R::Expr::Keyword { .. }
        | R::Expr::Literal { .. }
        | R::Expr::Param { .. }
        | R::Expr::Var { .. } => {}
        R::Expr::Binary { left, op, right } => {
            if matches!(op, R::BinOp::ILike | R::BinOp::NotILike) {
                out.insert(Feature::ILike);
            }
            collect_expr(left, cfg, out);
            collect_expr(right, cfg, out);
        }
        R::Expr::Unary { expr, .. }
        | R::Expr::Paren { expr }
        | R::Expr::Collate { expr, .. }
        | R::Expr::Interval { expr, .. } => collect_expr(expr, cfg, out),
        R::Expr::Between {
            expr, low, high, ..
        } => {
            collect_expr(expr, cfg, out);
            collect_expr(low, cfg, out);
            collect_expr(high, cfg, out);
        }
        R::Expr::List { items } => items.iter().for_each(|x| collect_expr(x, cfg, out)),
        R::Expr::Function(f) => collect_function(f, cfg, out),
        R::Expr::Aggregate(a) => {
            a.args.iter().for_each(|x| collect_expr(x, cfg, out));
            collect_order(&a.order_by, cfg, out);
            collect_opt(a.separator.as_deref(), cfg, out);
            collect_opt(a.filter.as_deref(), cfg, out);
            collect_over(a.over.as_ref(), cfg, out);
        }
        R::Expr::Cast(c) => {
            if matches!(c.symbol, R::CastSymbol::DoubleColon) {
                out.insert(Feature::DoubleColonCast);
            }
            collect_expr(&c.expr, cfg, out);
            if let Some(tail) = &c.tail {
                collect_expr(&tail.expr, cfg, out);
            }
        }
        R::Expr::Extract(x) => collect_expr(&x.source, cfg, out),
        R::Expr::AnyValue(a) => {
            collect_expr(&a.expr, cfg, out);
            if let Some(h) = &a.having {
                collect_expr(&h.expr, cfg, out);
            }
            collect_over(a.over.as_ref(), cfg, out);
        }
        R::Expr::Case {
            operand,
            when_then,
            else_expr,
        } => {
            collect_opt(operand.as_deref(), cfg, out);
            for (a, b) in when_then {
                collect_expr(a, cfg, out);
                collect_expr(b, cfg, out);
            }
            collect_opt(else_expr.as_deref(), cfg, out);
        }
        R::Expr::Subquery { query } => collect_query(query, cfg, out),
        R::Expr::FullText { against, .. } => {
            out.insert(Feature::FullTextMatch);
            collect_expr(against, cfg, out);
        }
    }
}
