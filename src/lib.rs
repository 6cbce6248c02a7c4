pub mod renderer;

pub use renderer::ast;
pub use renderer::{
    Dialect, Error, FeaturePolicy, Result, SqlRenderCfg, SqlifyOpt, render_stmt, sqlify,
    sqlify_json,
};
