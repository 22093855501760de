mod error;
mod mt940;
mod revolut;

pub use error::ConvertError;
pub use revolut::RevolutConverter;

use std::sync::Arc;

use crate::{application::services::StatementConverter, domain::config::service::SourceFormat};

pub fn create_converter(format: &SourceFormat) -> Arc<dyn StatementConverter> {
    match format {
        SourceFormat::Revolut => Arc::new(RevolutConverter::new()),
    }
}
