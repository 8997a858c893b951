use std::sync::Arc;

use askama::Template;
use poem::error::InternalServerError;
use poem::handler;
use poem::web::{Data, Html, Json, Query, Redirect};
use serde::Deserialize;

use crate::pipeline::ClientView;
use crate::state::{QuerySlot, TaskSlot};
use crate::{get_context_for, AppContext, BaseContext};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexContext<'a> {
    base: BaseContext<'a>,
    tasks: TaskSlot,
    query: QuerySlot,
}

#[handler]
pub async fn index(Data(ctx): Data<&Arc<AppContext>>) -> poem::Result<Html<String>> {
    let backend = ctx.config.api_base.as_str();

    // First visit loads the listing before rendering.
    if ctx.state.tasks_snapshot().never_loaded() {
        ctx.state.load_tasks(&*ctx.backend, backend).await;
    }

    let tpl = IndexContext {
        base: get_context_for("index", backend),
        tasks: ctx.state.tasks_snapshot(),
        query: ctx.state.query_snapshot(),
    };

    Ok(Html(tpl.render().map_err(InternalServerError)?))
}

#[handler]
pub async fn refresh(Data(ctx): Data<&Arc<AppContext>>) -> Redirect {
    ctx.state.load_tasks(&*ctx.backend, &ctx.config.api_base).await;
    Redirect::see_other("/")
}

#[derive(Debug, Deserialize)]
pub struct AskParams {
    #[serde(default)]
    q: String,
}

#[handler]
pub async fn ask(
    Query(AskParams { q }): Query<AskParams>,
    Data(ctx): Data<&Arc<AppContext>>,
) -> Redirect {
    ctx.state
        .run_query(&*ctx.backend, &ctx.config.api_base, &q)
        .await;
    Redirect::see_other("/")
}

#[handler]
pub async fn clients(Data(ctx): Data<&Arc<AppContext>>) -> Json<Vec<ClientView>> {
    Json(ctx.state.tasks_snapshot().view)
}

#[handler]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
