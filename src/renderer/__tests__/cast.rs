use super::utils::*;
use crate::renderer::{
    Error,
    ast::{ArrayDim, Cast, CastSymbol, CastTail, CommonType, DataType, Expr},
    cfg_mysql, cfg_postgres, expr_to_sql,
};

fn ty(name: &str) -> DataType {
    DataType {
        data_type: name.to_string(),
        ..Default::default()
    }
}

fn cast_as(expr: Expr, target: DataType) -> Cast {
    Cast {
        expr: Box::new(expr),
        target,
        symbol: CastSymbol::As,
        keyword: Some("cast".into()),
        tail: None,
        alias: None,
        collate: None,
    }
}

fn cast_colons(expr: Expr, target: DataType) -> Cast {
    Cast {
        symbol: CastSymbol::DoubleColon,
        keyword: None,
        ..cast_as(expr, target)
    }
}

#[test]
fn cast_function_form() {
    let c = cast_as(col("a"), ty("int"));
    assert_eq!(expr_sql(&Expr::Cast(c), &cfg_mysql()), "CAST(`a` AS INT)");

    let c = Cast {
        keyword: Some("try_cast".into()),
        ..cast_as(col("a"), ty("date"))
    };
    assert_eq!(expr_sql(&Expr::Cast(c), &cfg_mysql()), "TRY_CAST(`a` AS DATE)");
}

#[test]
fn cast_length_and_scale() {
    let target = DataType {
        length: Some(10),
        scale: Some(2),
        parentheses: true,
        ..ty("decimal")
    };
    let c = cast_as(col("a"), target);
    assert_eq!(
        expr_sql(&Expr::Cast(c), &cfg_mysql()),
        "CAST(`a` AS DECIMAL(10, 2))"
    );

    // нулевой масштаб печатается
    let target = DataType {
        length: Some(10),
        scale: Some(0),
        parentheses: true,
        ..ty("decimal")
    };
    let c = cast_as(col("a"), target);
    assert_eq!(
        expr_sql(&Expr::Cast(c), &cfg_mysql()),
        "CAST(`a` AS DECIMAL(10, 0))"
    );

    let target = DataType {
        parentheses: true,
        ..ty("char")
    };
    let c = cast_as(col("a"), target);
    assert_eq!(expr_sql(&Expr::Cast(c), &cfg_mysql()), "CAST(`a` AS CHAR())");
}

#[test]
fn cast_type_suffix_words() {
    let target = DataType {
        suffix: vec!["integer".into()],
        ..ty("unsigned")
    };
    let c = cast_as(col("a"), target);
    assert_eq!(
        expr_sql(&Expr::Cast(c), &cfg_mysql()),
        "CAST(`a` AS UNSIGNED INTEGER)"
    );
}

#[test]
fn double_colon_with_array_dims() {
    let target = DataType {
        array: Some(ArrayDim::Two),
        ..ty("int")
    };
    let c = cast_colons(col("a"), target);
    assert_eq!(expr_sql(&Expr::Cast(c), &cfg_postgres()), "\"a\"::INT[][]");

    let target = DataType {
        array: Some(ArrayDim::One),
        ..ty("text")
    };
    let c = cast_colons(str_("{a,b}"), target);
    assert_eq!(expr_sql(&Expr::Cast(c), &cfg_postgres()), "'{a,b}'::TEXT[]");
}

#[test]
fn quoted_type_name_keeps_case() {
    let target = DataType {
        quoted: Some("\"".into()),
        ..ty("int4")
    };
    let c = cast_colons(col("a"), target);
    assert_eq!(expr_sql(&Expr::Cast(c), &cfg_postgres()), "\"a\"::\"int4\"");
}

#[test]
fn tail_alias_collate_order() {
    let c = Cast {
        tail: Some(CastTail {
            operator: "->>".into(),
            expr: Box::new(str_("id")),
        }),
        ..cast_colons(col("doc"), ty("jsonb"))
    };
    assert_eq!(
        expr_sql(&Expr::Cast(c), &cfg_postgres()),
        "\"doc\"::JSONB ->> 'id'"
    );

    let c = Cast {
        alias: Some("b".into()),
        collate: Some(CommonType {
            keyword: "collate".into(),
            symbol: None,
            value: "utf8mb4_bin".into(),
        }),
        ..cast_as(col("a"), ty("char"))
    };
    assert_eq!(
        expr_sql(&Expr::Cast(c), &cfg_mysql()),
        "CAST(`a` AS CHAR) AS `b` COLLATE UTF8MB4_BIN"
    );
}

#[test]
fn cast_as_requires_keyword() {
    let c = Cast {
        keyword: None,
        ..cast_as(col("a"), ty("int"))
    };
    assert!(matches!(
        expr_to_sql(&Expr::Cast(c), &cfg_mysql()),
        Err(Error::MalformedNode {
            node: "cast",
            field: "keyword"
        })
    ));
}

#[test]
fn cast_requires_data_type() {
    let c = cast_as(col("a"), ty(""));
    assert!(matches!(
        expr_to_sql(&Expr::Cast(c), &cfg_mysql()),
        Err(Error::MalformedNode {
            node: "cast",
            field: "data_type"
        })
    ));
}

#[test]
fn empty_alias_is_absent() {
    let c = Cast {
        alias: Some(String::new()),
        ..cast_as(col("a"), ty("char"))
    };
    assert_eq!(expr_sql(&Expr::Cast(c), &cfg_mysql()), "CAST(`a` AS CHAR)");
}

#[test]
fn cast_tail_requires_operator() {
    let c = Cast {
        tail: Some(CastTail {
            operator: " ".into(),
            expr: Box::new(str_("id")),
        }),
        ..cast_colons(col("doc"), ty("jsonb"))
    };
    assert!(matches!(
        expr_to_sql(&Expr::Cast(c), &cfg_postgres()),
        Err(Error::MalformedNode {
            node: "cast",
            field: "tail.operator"
        })
    ));
}
