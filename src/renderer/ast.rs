//! AST, который принимает рендерер. Всё дерево (де)сериализуется через serde,
//! дискриминант лежит в поле `type`.

mod ddl;
mod dml;
mod expr;
mod query;

pub use ddl::*;
pub use dml::*;
pub use expr::*;
pub use query::*;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stmt {
    Query(Query),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    CreateTable(CreateTable),
    CreateDatabase(CreateDatabase),
    CreateView(CreateView),
    CreateIndex(CreateIndex),
    AlterTable(AlterTable),
    Drop(DropObject),
    Show(Show),
    Analyze(Analyze),
    Attach(Attach),
}

impl Stmt {
    /// Короткое имя для логов.
    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::Query(_) => "query",
            Stmt::Insert(_) => "insert",
            Stmt::Update(_) => "update",
            Stmt::Delete(_) => "delete",
            Stmt::CreateTable(_) => "create_table",
            Stmt::CreateDatabase(_) => "create_database",
            Stmt::CreateView(_) => "create_view",
            Stmt::CreateIndex(_) => "create_index",
            Stmt::AlterTable(_) => "alter_table",
            Stmt::Drop(_) => "drop",
            Stmt::Show(_) => "show",
            Stmt::Analyze(_) => "analyze",
            Stmt::Attach(_) => "attach",
        }
    }
}

#[inline]
pub(crate) fn default_true() -> bool {
    true
}
