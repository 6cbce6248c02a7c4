use super::utils::*;
use crate::renderer::{
    Error, SqlWriter, render_stmt, sqlify,
    ast::{
        AlterAction, AlterTable, Analyze, Attach, ColumnDef, ColumnOptions, CreateDatabase,
        CreateIndex, CreateTable, CreateView, DataType, DatabaseKeyword, DropObject, Expr,
        IndexColumn, IndexDef, IndexKind, IndexType, ObjectKind, ObjectName, OrderDirection,
        RefAction, Reference, Show, ShowCreateKind, ShowTarget, Stmt, TableConstraint,
        TableElement, TableOption,
    },
    cfg_mysql, cfg_postgres, cfg_sqlite, column_def_to_sql, data_type_to_sql,
};

fn ty(name: &str) -> DataType {
    DataType {
        data_type: name.to_string(),
        ..Default::default()
    }
}

fn sized(name: &str, len: u64) -> DataType {
    DataType {
        length: Some(len),
        ..ty(name)
    }
}

fn column(name: &str, data_type: Option<DataType>, options: ColumnOptions) -> TableElement {
    TableElement::Column(ColumnDef {
        name: name.to_string(),
        data_type,
        options,
    })
}

fn not_null() -> ColumnOptions {
    ColumnOptions {
        nullable: Some(false),
        ..Default::default()
    }
}

fn primary_key(cols: &[&str]) -> TableElement {
    TableElement::Constraint {
        constraint: TableConstraint::PrimaryKey {
            constraint: None,
            columns: cols.iter().map(|c| IndexColumn::new(*c)).collect(),
            using: None,
        },
    }
}

fn create_table(name: &str, definitions: Vec<TableElement>, options: Vec<TableOption>) -> Stmt {
    Stmt::CreateTable(CreateTable {
        temporary: false,
        if_not_exists: false,
        name: ObjectName::new(name),
        definitions,
        options,
        as_query: None,
        like: None,
    })
}

fn innodb_utf8() -> Vec<TableOption> {
    vec![
        TableOption::new("engine", "InnoDB"),
        TableOption::new("default charset", "utf8mb4"),
        TableOption::new("collate", "utf8mb4_0900_ai_ci"),
    ]
}

fn drop(kind: ObjectKind, if_exists: bool, names: Vec<ObjectName>) -> Stmt {
    Stmt::Drop(DropObject {
        kind,
        if_exists,
        names,
        on: None,
    })
}

#[test]
fn mysql_create_table_with_attributes() {
    let unsigned = |len| DataType {
        suffix: vec!["unsigned".into()],
        ..sized("int", len)
    };
    let timestamp = |on_update: Option<Expr>| ColumnOptions {
        nullable: Some(true),
        default: Some(null()),
        on_update,
        ..Default::default()
    };
    let stmt = create_table(
        "t1",
        vec![
            column(
                "id",
                Some(unsigned(11)),
                ColumnOptions {
                    auto_increment: true,
                    ..not_null()
                },
            ),
            column(
                "name",
                Some(sized("varchar", 64)),
                ColumnOptions {
                    default: Some(str_("ttt")),
                    ..not_null()
                },
            ),
            column(
                "zf",
                Some(DataType {
                    suffix: vec!["unsigned".into(), "zerofill".into()],
                    ..sized("int", 10)
                }),
                ColumnOptions {
                    default: Some(null()),
                    ..Default::default()
                },
            ),
            column("created_at", Some(ty("timestamp")), timestamp(None)),
            column(
                "updated_at",
                Some(ty("timestamp")),
                timestamp(Some(kw("current_timestamp"))),
            ),
            primary_key(&["id"]),
        ],
        vec![
            TableOption::new("ENGINE", "InnoDB"),
            TableOption::new("AUTO_INCREMENT", "5"),
            TableOption::new("DEFAULT CHARSET", "utf8mb4"),
        ],
    );
    assert_eq!(
        sql(&stmt, &cfg_mysql()),
        "CREATE TABLE `t1` (`id` INT(11) UNSIGNED NOT NULL AUTO_INCREMENT, `name` VARCHAR(64) NOT NULL DEFAULT 'ttt', `zf` INT(10) UNSIGNED ZEROFILL DEFAULT NULL, `created_at` TIMESTAMP NULL DEFAULT NULL, `updated_at` TIMESTAMP NULL DEFAULT NULL ON UPDATE CURRENT_TIMESTAMP, PRIMARY KEY (`id`)) ENGINE = INNODB AUTO_INCREMENT = 5 DEFAULT CHARSET = utf8mb4"
    );
}

#[test]
fn table_options_keep_collation_case() {
    let stmt = create_table(
        "GeoCoordinateTable",
        vec![column("geoCoordinate", Some(ty("point")), not_null())],
        innodb_utf8(),
    );
    assert_eq!(
        sql(&stmt, &cfg_mysql()),
        "CREATE TABLE `GeoCoordinateTable` (`geoCoordinate` POINT NOT NULL) ENGINE = INNODB DEFAULT CHARSET = utf8mb4 COLLATE = utf8mb4_0900_ai_ci"
    );
}

#[test]
fn charset_collate_and_prefix_index() {
    let stmt = create_table(
        "Translation",
        vec![
            column(
                "id",
                Some(sized("char", 36)),
                ColumnOptions {
                    character_set: Some("ascii".into()),
                    collate: Some("ascii_bin".into()),
                    ..not_null()
                },
            ),
            column("en-GB", Some(ty("text")), ColumnOptions::default()),
            primary_key(&["id"]),
            TableElement::Index(IndexDef {
                kind: IndexKind::Key,
                name: Some("Translation_en-GB_btree_idx".into()),
                columns: vec![IndexColumn {
                    length: Some(768),
                    ..IndexColumn::new("en-GB")
                }],
                using: None,
            }),
        ],
        innodb_utf8(),
    );
    assert_eq!(
        sql(&stmt, &cfg_mysql()),
        "CREATE TABLE `Translation` (`id` CHAR(36) NOT NULL CHARACTER SET ASCII COLLATE ASCII_BIN, `en-GB` TEXT, PRIMARY KEY (`id`), KEY `Translation_en-GB_btree_idx` (`en-GB`(768))) ENGINE = INNODB DEFAULT CHARSET = utf8mb4 COLLATE = utf8mb4_0900_ai_ci"
    );
}

#[test]
fn enum_set_decimal_types() {
    let variants = || vec![str_("A"), str_("B"), str_("C")];
    let nullable_default = || ColumnOptions {
        default: Some(null()),
        ..Default::default()
    };
    let stmt = create_table(
        "t",
        vec![
            column(
                "type_ENUM",
                Some(DataType {
                    values: variants(),
                    ..ty("enum")
                }),
                nullable_default(),
            ),
            column(
                "type_SET",
                Some(DataType {
                    values: variants(),
                    ..ty("set")
                }),
                nullable_default(),
            ),
            column(
                "amount",
                Some(DataType {
                    scale: Some(2),
                    ..sized("decimal", 10)
                }),
                ColumnOptions::default(),
            ),
        ],
        vec![],
    );
    assert_eq!(
        sql(&stmt, &cfg_mysql()),
        "CREATE TABLE `t` (`type_ENUM` ENUM('A', 'B', 'C') DEFAULT NULL, `type_SET` SET('A', 'B', 'C') DEFAULT NULL, `amount` DECIMAL(10, 2))"
    );
}

#[test]
fn sqlite_create_table_forms() {
    let stmt = create_table(
        "foobar1",
        vec![
            column(
                "id",
                Some(ty("integer")),
                ColumnOptions {
                    auto_increment: true,
                    primary_key: true,
                    ..not_null()
                },
            ),
            column("name", Some(sized("varchar", 255)), ColumnOptions::default()),
            column("batch", Some(ty("boolean")), ColumnOptions::default()),
            column("migration_time", Some(ty("datetime")), ColumnOptions::default()),
        ],
        vec![],
    );
    assert_eq!(
        sql(&stmt, &cfg_sqlite()),
        "CREATE TABLE `foobar1` (`id` INTEGER NOT NULL AUTOINCREMENT PRIMARY KEY, `name` VARCHAR(255), `batch` BOOLEAN, `migration_time` DATETIME)"
    );

    let untyped = ["tbl", "idx", "neq", "nlt", "ndlt", "sample"]
        .iter()
        .map(|c| column(c, None, ColumnOptions::default()))
        .collect();
    assert_eq!(
        sql(&create_table("sqlite_stat4", untyped, vec![]), &cfg_sqlite()),
        "CREATE TABLE `sqlite_stat4` (`tbl`, `idx`, `neq`, `nlt`, `ndlt`, `sample`)"
    );
}

#[test]
fn create_table_as_select_and_like() {
    let q = crate::renderer::ast::Select {
        r#where: Some(bin(num("1"), "=", num("0"))),
        ..select(vec![], vec![table("devices")])
    };
    let stmt = Stmt::CreateTable(CreateTable {
        temporary: false,
        if_not_exists: true,
        name: ObjectName::new("stg_devices"),
        definitions: vec![],
        options: vec![],
        as_query: Some(Box::new(q.into())),
        like: None,
    });
    assert_eq!(
        sql(&stmt, &cfg_sqlite()),
        "CREATE TABLE IF NOT EXISTS `stg_devices` AS SELECT * FROM `devices` WHERE 1 = 0"
    );

    let stmt = Stmt::CreateTable(CreateTable {
        temporary: true,
        if_not_exists: false,
        name: ObjectName::new("copy"),
        definitions: vec![],
        options: vec![],
        as_query: None,
        like: Some(ObjectName::qualified("db", "orig")),
    });
    assert_eq!(
        sql(&stmt, &cfg_mysql()),
        "CREATE TEMPORARY TABLE `copy` LIKE `db`.`orig`"
    );
}

#[test]
fn constraints_and_references() {
    let stmt = create_table(
        "orders",
        vec![
            column(
                "user_id",
                Some(ty("int")),
                ColumnOptions {
                    references: Some(Reference {
                        table: ObjectName::new("users"),
                        columns: vec!["id".into()],
                        on_delete: Some(RefAction::Cascade),
                        on_update: None,
                    }),
                    ..Default::default()
                },
            ),
            column(
                "qty",
                Some(ty("int")),
                ColumnOptions {
                    check: Some(bin(col("qty"), ">", num("0"))),
                    comment: Some("it's a count".into()),
                    ..Default::default()
                },
            ),
            TableElement::Constraint {
                constraint: TableConstraint::Unique {
                    constraint: Some("uq_user".into()),
                    keyword: None,
                    name: None,
                    columns: vec![IndexColumn::new("user_id")],
                    using: Some(IndexType::Btree),
                },
            },
            TableElement::Constraint {
                constraint: TableConstraint::ForeignKey {
                    constraint: None,
                    columns: vec!["user_id".into()],
                    references: Reference {
                        table: ObjectName::new("users"),
                        columns: vec!["id".into()],
                        on_delete: Some(RefAction::SetNull),
                        on_update: Some(RefAction::NoAction),
                    },
                },
            },
        ],
        vec![],
    );
    assert_eq!(
        sql(&stmt, &cfg_postgres()),
        "CREATE TABLE \"orders\" (\"user_id\" INT REFERENCES \"users\" (\"id\") ON DELETE CASCADE, \"qty\" INT COMMENT 'it''s a count' CHECK (\"qty\" > 0), CONSTRAINT \"uq_user\" UNIQUE (\"user_id\") USING BTREE, FOREIGN KEY (\"user_id\") REFERENCES \"users\" (\"id\") ON DELETE SET NULL ON UPDATE NO ACTION)"
    );
}

#[test]
fn empty_create_table_is_malformed() {
    assert!(matches!(
        render_stmt(&create_table("t", vec![], vec![]), &cfg_mysql()),
        Err(Error::MalformedNode {
            node: "create table",
            field: "definitions"
        })
    ));
}

#[test]
fn create_database_view_index() {
    let stmt = Stmt::CreateDatabase(CreateDatabase {
        keyword: DatabaseKeyword::Schema,
        if_not_exists: true,
        name: "app".into(),
        options: vec![TableOption::new("default character set", "utf8mb4")],
    });
    assert_eq!(
        sql(&stmt, &cfg_mysql()),
        "CREATE SCHEMA IF NOT EXISTS `app` DEFAULT CHARACTER SET = utf8mb4"
    );

    let stmt = Stmt::CreateView(CreateView {
        or_replace: true,
        name: ObjectName::qualified("abc", "test"),
        columns: vec!["x".into()],
        query: Box::new(select(vec![item(col("a"))], vec![table("t")]).into()),
    });
    assert_eq!(
        sql(&stmt, &cfg_mysql()),
        "CREATE OR REPLACE VIEW `abc`.`test` (`x`) AS SELECT `a` FROM `t`"
    );

    let stmt = Stmt::CreateIndex(CreateIndex {
        unique: true,
        if_not_exists: true,
        name: "idx_a".into(),
        table: ObjectName::new("t"),
        columns: vec![
            IndexColumn::new("a"),
            IndexColumn {
                order: Some(OrderDirection::Desc),
                ..IndexColumn::new("b")
            },
        ],
        using: None,
    });
    assert_eq!(
        sql(&stmt, &cfg_sqlite()),
        "CREATE UNIQUE INDEX IF NOT EXISTS `idx_a` ON `t` (`a`, `b` DESC)"
    );
}

#[test]
fn alter_table_actions() {
    let stmt = Stmt::AlterTable(AlterTable {
        name: ObjectName::new("test"),
        actions: vec![AlterAction::AddColumn {
            column_keyword: false,
            column: ColumnDef {
                name: "type".into(),
                data_type: Some(sized("varchar", 255)),
                options: ColumnOptions {
                    default: Some(Expr::Paren {
                        expr: Box::new(str_("default")),
                    }),
                    ..not_null()
                },
            },
        }],
    });
    assert_eq!(
        sql(&stmt, &cfg_mysql()),
        "ALTER TABLE `test` ADD `type` VARCHAR(255) NOT NULL DEFAULT ('default')"
    );

    let stmt = Stmt::AlterTable(AlterTable {
        name: ObjectName::new("myTable"),
        actions: vec![AlterAction::SetOption {
            option: TableOption::new("auto_increment", "1"),
        }],
    });
    assert_eq!(
        sql(&stmt, &cfg_mysql()),
        "ALTER TABLE `myTable` AUTO_INCREMENT = 1"
    );

    let stmt = Stmt::AlterTable(AlterTable {
        name: ObjectName::new("t"),
        actions: vec![
            AlterAction::ChangeColumn {
                column_keyword: true,
                old_name: "a".into(),
                column: ColumnDef {
                    name: "b".into(),
                    data_type: Some(ty("bigint")),
                    options: not_null(),
                },
            },
            AlterAction::DropColumn {
                column_keyword: false,
                name: "c".into(),
            },
            AlterAction::RenameColumn {
                old_name: "d".into(),
                new_name: "e".into(),
            },
            AlterAction::AddIndex {
                index: IndexDef {
                    kind: IndexKind::Fulltext,
                    name: Some("ft".into()),
                    columns: vec![IndexColumn::new("body")],
                    using: None,
                },
            },
            AlterAction::DropIndex { name: "old".into() },
            AlterAction::DropPrimaryKey,
            AlterAction::RenameTable {
                to: ObjectName::new("t2"),
            },
        ],
    });
    assert_eq!(
        sql(&stmt, &cfg_mysql()),
        "ALTER TABLE `t` CHANGE COLUMN `a` `b` BIGINT NOT NULL, DROP `c`, RENAME COLUMN `d` TO `e`, ADD FULLTEXT INDEX `ft` (`body`), DROP INDEX `old`, DROP PRIMARY KEY, RENAME TO `t2`"
    );
}

#[test]
fn alter_without_actions_is_malformed() {
    let stmt = Stmt::AlterTable(AlterTable {
        name: ObjectName::new("t"),
        actions: vec![],
    });
    assert!(render_stmt(&stmt, &cfg_mysql()).is_err());
}

fn alter_error(action: AlterAction) -> Option<(&'static str, &'static str)> {
    let stmt = Stmt::AlterTable(AlterTable {
        name: ObjectName::new("t"),
        actions: vec![action],
    });
    match render_stmt(&stmt, &cfg_mysql()) {
        Err(Error::MalformedNode { node, field }) => Some((node, field)),
        _ => None,
    }
}

#[test]
fn alter_actions_require_names() {
    assert_eq!(
        alter_error(AlterAction::DropColumn {
            column_keyword: true,
            name: String::new(),
        }),
        Some(("drop column", "name"))
    );
    assert_eq!(
        alter_error(AlterAction::ChangeColumn {
            column_keyword: false,
            old_name: String::new(),
            column: ColumnDef {
                name: "b".into(),
                data_type: Some(ty("int")),
                options: ColumnOptions::default(),
            },
        }),
        Some(("change column", "old_name"))
    );
    assert_eq!(
        alter_error(AlterAction::RenameColumn {
            old_name: String::new(),
            new_name: "e".into(),
        }),
        Some(("rename column", "old_name"))
    );
    assert_eq!(
        alter_error(AlterAction::RenameColumn {
            old_name: "d".into(),
            new_name: String::new(),
        }),
        Some(("rename column", "new_name"))
    );
    assert_eq!(
        alter_error(AlterAction::DropIndex {
            name: String::new()
        }),
        Some(("drop index", "name"))
    );
}

#[test]
fn empty_optional_names_in_ddl() {
    // пустое имя индекса опускается
    let stmt = Stmt::AlterTable(AlterTable {
        name: ObjectName::new("t"),
        actions: vec![AlterAction::AddIndex {
            index: IndexDef {
                kind: IndexKind::Index,
                name: Some(String::new()),
                columns: vec![IndexColumn::new("a")],
                using: None,
            },
        }],
    });
    assert_eq!(sql(&stmt, &cfg_mysql()), "ALTER TABLE `t` ADD INDEX (`a`)");

    let stmt = Stmt::CreateView(CreateView {
        or_replace: false,
        name: ObjectName::new("v"),
        columns: vec![String::new()],
        query: Box::new(select(vec![item(col("a"))], vec![table("t")]).into()),
    });
    assert!(matches!(
        render_stmt(&stmt, &cfg_mysql()),
        Err(Error::MalformedNode {
            node: "create view",
            field: "columns"
        })
    ));
}

#[test]
fn drop_statements_join_with_separator() {
    let stmts = [
        drop(ObjectKind::Database, true, vec![ObjectName::new("dbName")]),
        drop(ObjectKind::Schema, false, vec![ObjectName::new("abc")]),
    ];
    assert_eq!(
        sqlify(&stmts, &cfg_mysql()).unwrap(),
        "DROP DATABASE IF EXISTS `dbName` ; DROP SCHEMA `abc`"
    );
    assert_eq!(
        sql(
            &drop(ObjectKind::Table, true, vec![ObjectName::new("event_log")]),
            &cfg_mysql()
        ),
        "DROP TABLE IF EXISTS `event_log`"
    );

    let stmt = Stmt::Drop(DropObject {
        kind: ObjectKind::Index,
        if_exists: false,
        names: vec![ObjectName::new("idx")],
        on: Some(ObjectName::new("t")),
    });
    assert_eq!(sql(&stmt, &cfg_mysql()), "DROP INDEX `idx` ON `t`");
}

#[test]
fn show_statements() {
    let show = |target| Stmt::Show(Show { target });
    let cfg = cfg_mysql();
    assert_eq!(
        sql(
            &show(ShowTarget::Create {
                kind: ShowCreateKind::View,
                name: ObjectName::qualified("abc", "test"),
            }),
            &cfg
        ),
        "SHOW CREATE VIEW `abc`.`test`"
    );
    assert_eq!(
        sql(
            &show(ShowTarget::Create {
                kind: ShowCreateKind::Table,
                name: ObjectName::new("debug"),
            }),
            &cfg
        ),
        "SHOW CREATE TABLE `debug`"
    );
    assert_eq!(
        sql(&show(ShowTarget::Tables { from: Some("db".into()) }), &cfg),
        "SHOW TABLES FROM `db`"
    );
    assert_eq!(sql(&show(ShowTarget::Databases), &cfg), "SHOW DATABASES");
    assert_eq!(
        sql(
            &show(ShowTarget::Columns {
                table: ObjectName::new("t")
            }),
            &cfg
        ),
        "SHOW COLUMNS FROM `t`"
    );
}

#[test]
fn analyze_and_attach() {
    let stmt = Stmt::Analyze(Analyze {
        table_keyword: false,
        names: vec![ObjectName::qualified("schemaName", "tableName")],
    });
    assert_eq!(sql(&stmt, &cfg_sqlite()), "ANALYZE `schemaName`.`tableName`");

    let attach = Stmt::Attach(Attach {
        expr: str_("contacts.db"),
        schema: "contacts".into(),
    });
    assert_eq!(
        sql(&attach, &cfg_sqlite()),
        "ATTACH DATABASE 'contacts.db' AS `contacts`"
    );
    // даже в мягком режиме
    assert!(matches!(
        render_stmt(&attach, &cfg_mysql()),
        Err(Error::UnsupportedConstruct { .. })
    ));
}

#[test]
fn fragment_helpers_share_writer_counter() {
    let cfg = cfg_postgres();
    let mut w = SqlWriter::new(32, cfg.placeholders);
    w.push_placeholder();
    let c = ColumnDef {
        name: "n".into(),
        data_type: Some(ty("int")),
        options: ColumnOptions {
            default: Some(bind()),
            ..Default::default()
        },
    };
    assert_eq!(
        column_def_to_sql(&mut w, &c, &cfg).unwrap(),
        "\"n\" INT DEFAULT $2"
    );
    assert_eq!(
        data_type_to_sql(&mut w, &DataType {
            suffix: vec!["with".into(), "time".into(), "zone".into()],
            ..ty("timestamp")
        }, &cfg)
        .unwrap(),
        "TIMESTAMP WITH TIME ZONE"
    );
    assert!(data_type_to_sql(&mut w, &ty(""), &cfg).is_err());
}
