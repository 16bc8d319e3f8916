//! Read-only GraphQL query root.

use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema};
use std::sync::Arc;

use crate::config::Settings;
use crate::health;

pub type AppSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Service status, always "ok" while the process is serving.
    async fn status(&self, ctx: &Context<'_>) -> String {
        health::health_status(settings(ctx)).data.status
    }

    /// Configured service display name.
    async fn service_name(&self, ctx: &Context<'_>) -> String {
        health::health_status(settings(ctx)).data.service
    }

    /// Database connection string with the password masked.
    async fn database_dsn(&self, ctx: &Context<'_>) -> String {
        health::database_config(settings(ctx)).data.database_url
    }
}

fn settings<'a>(ctx: &Context<'a>) -> &'a Settings {
    ctx.data_unchecked::<Arc<Settings>>()
}

/// Build the schema with `settings` attached as context data.
pub fn build_schema(settings: Arc<Settings>) -> AppSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(settings)
        .finish()
}
