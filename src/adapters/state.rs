use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    application::services::StatementConverter, domain::config::service::ServiceConfig,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub converter: Arc<dyn StatementConverter>,
}
