use std::sync::Arc;

use crate::{render::{chromium::ChromiumPdfRenderer, IPdfRenderer}, settings::BrowserSettings};

pub type Services = Arc<ServiceCollection>;

pub struct ServiceCollection {
    pub renderer: Arc<dyn IPdfRenderer>,
}

impl ServiceCollection {
    pub fn build(settings: BrowserSettings) -> Services {
        Arc::new(ServiceCollection {
            renderer: Arc::new(ChromiumPdfRenderer::new(settings)),
        })
    }

    pub fn with_renderer(renderer: Arc<dyn IPdfRenderer>) -> Services {
        Arc::new(ServiceCollection { renderer })
    }
}
