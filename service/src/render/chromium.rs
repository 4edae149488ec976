use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use base64::{engine::general_purpose, Engine};
use chromiumoxide::{
    browser::{Browser, BrowserConfig},
    cdp::browser_protocol::page::{EventLifecycleEvent, NavigateParams, SetLifecycleEventsEnabledParams},
    listeners::EventStream,
    Page,
};
use common::dtos::ConversionRequest;
use futures::StreamExt;
use tokio::{
    runtime::Handle,
    sync::{OwnedSemaphorePermit, Semaphore},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{error::RenderError, profile::TempProfileDir, settings::BrowserSettings};

use super::{IPdfRenderer, PdfOptions, WaitUntil};

/// Renders each request in its own freshly launched headless Chromium.
pub struct ChromiumPdfRenderer {
    settings: BrowserSettings,
    permits: Arc<Semaphore>,
    live: Arc<AtomicUsize>,
}

impl ChromiumPdfRenderer {
    pub fn new(settings: BrowserSettings) -> Self {
        if settings.no_sandbox {
            warn!("Chromium sandbox is disabled");
        }
        ChromiumPdfRenderer {
            permits: Arc::new(Semaphore::new(settings.max_concurrent_browsers.max(1))),
            live: Arc::new(AtomicUsize::new(0)),
            settings,
        }
    }

    /// Number of browser processes currently held by this renderer.
    pub fn live_browsers(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    async fn print(&self, browser: &ScopedBrowser, request: &ConversionRequest, options: &PdfOptions) -> Result<Vec<u8>, RenderError> {
        let page = browser.browser()?.new_page("about:blank").await.map_err(|e| RenderError::Navigation(e.to_string()))?;
        self.navigate(&page, &request.pdf_body).await?;
        let pdf = page.pdf(options.to_params()).await.map_err(|e| RenderError::Print(e.to_string()))?;
        if pdf.is_empty() {
            return Err(RenderError::EmptyDocument);
        }
        Ok(pdf)
    }

    async fn navigate(&self, page: &Page, html: &str) -> Result<(), RenderError> {
        page.execute(SetLifecycleEventsEnabledParams::new(true)).await?;
        let mut events = page.event_listener::<EventLifecycleEvent>().await?;

        let navigation = page.execute(NavigateParams::new(data_url(html))).await?.result;
        if let Some(error_text) = navigation.error_text.filter(|text| !text.is_empty()) {
            return Err(RenderError::Navigation(error_text));
        }

        let wait_until = self.settings.wait_until;
        let timeout = self.settings.navigation_timeout;
        let target = LifecycleTarget {
            frame_id: navigation.frame_id.inner().clone(),
            loader_id: navigation.loader_id.map(|loader_id| loader_id.inner().clone()),
        };
        tokio::time::timeout(timeout, wait_for_lifecycle(&mut events, &target, wait_until))
            .await
            .map_err(|_| RenderError::NavigationTimeout(wait_until.lifecycle_event(), timeout.as_secs()))?
    }
}

#[async_trait::async_trait]
impl IPdfRenderer for ChromiumPdfRenderer {
    #[tracing::instrument(skip_all)]
    async fn render(&self, request: &ConversionRequest) -> Result<Vec<u8>, RenderError> {
        let options = PdfOptions::from_request(request)?;
        let browser = ScopedBrowser::launch(&self.settings, self.permits.clone(), self.live.clone()).await?;
        let result = self.print(&browser, request, &options).await;
        browser.release().await;
        if let Ok(pdf) = &result {
            info!("rendered pdf with {} bytes", pdf.len());
        }
        result
    }
}

/// A browser process owned by exactly one render.
///
/// `release` closes it gracefully. If a render is dropped before that, for
/// example by the request timeout, `Drop` kills and reaps the process and
/// removes its profile on a background task.
struct ScopedBrowser {
    browser: Option<Browser>,
    handler: JoinHandle<()>,
    profile: TempProfileDir,
    live: Arc<AtomicUsize>,
    _permit: OwnedSemaphorePermit,
}

impl ScopedBrowser {
    async fn launch(settings: &BrowserSettings, permits: Arc<Semaphore>, live: Arc<AtomicUsize>) -> Result<Self, RenderError> {
        let permit = permits.acquire_owned().await.map_err(|e| RenderError::Launch(e.to_string()))?;
        let profile = TempProfileDir::build(&settings.profile_root).await.map_err(|e| RenderError::Launch(e.to_string()))?;

        let mut builder = BrowserConfig::builder().user_data_dir(profile.path());
        if let Some(executable) = &settings.executable {
            builder = builder.chrome_executable(executable);
        }
        if settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        let config = match builder.build() {
            Ok(config) => config,
            Err(err) => {
                profile.clean_up().await;
                return Err(RenderError::Launch(err));
            }
        };

        let (browser, mut handler) = match Browser::launch(config).await {
            Ok(launched) => launched,
            Err(err) => {
                profile.clean_up().await;
                return Err(RenderError::Launch(err.to_string()));
            }
        };
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });
        live.fetch_add(1, Ordering::SeqCst);
        debug!("browser launched");

        Ok(ScopedBrowser {
            browser: Some(browser),
            handler,
            profile,
            live,
            _permit: permit,
        })
    }

    fn browser(&self) -> Result<&Browser, RenderError> {
        self.browser.as_ref().ok_or_else(|| RenderError::Launch("browser already released".to_string()))
    }

    async fn release(mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(err) = browser.close().await {
                warn!("Could not close browser gracefully, killing it: {}", err);
                if let Some(Err(err)) = browser.kill().await {
                    warn!("Could not kill browser: {}", err);
                }
            }
            if let Err(err) = browser.wait().await {
                warn!("Could not reap browser process: {}", err);
            }
        }
        self.handler.abort();
        self.profile.clean_up().await;
        debug!("browser released");
    }
}

impl Drop for ScopedBrowser {
    fn drop(&mut self) {
        self.handler.abort();
        if let Some(mut browser) = self.browser.take() {
            warn!("browser dropped without release");
            let profile = self.profile.clone();
            match Handle::try_current() {
                Ok(runtime) => {
                    runtime.spawn(async move {
                        if let Some(Err(err)) = browser.kill().await {
                            warn!("Could not kill browser: {}", err);
                        }
                        if let Err(err) = browser.wait().await {
                            warn!("Could not reap browser process: {}", err);
                        }
                        profile.clean_up().await;
                    });
                }
                Err(_) => warn!("No runtime left to remove browser profile {}", profile.path().display()),
            }
        }
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

struct LifecycleTarget {
    frame_id: String,
    loader_id: Option<String>,
}

impl LifecycleTarget {
    fn matches(&self, event: &EventLifecycleEvent) -> bool {
        match &self.loader_id {
            Some(loader_id) => event.loader_id.inner() == loader_id,
            None => event.frame_id.inner() == &self.frame_id,
        }
    }
}

async fn wait_for_lifecycle(events: &mut EventStream<EventLifecycleEvent>, target: &LifecycleTarget, wait_until: WaitUntil) -> Result<(), RenderError> {
    let expected = wait_until.lifecycle_event();
    while let Some(event) = events.next().await {
        if target.matches(&event) && event.name == expected {
            debug!("page reached {}", expected);
            return Ok(());
        }
    }
    Err(RenderError::Navigation(format!("page closed before {}", expected)))
}

/// Inline document URL, so the markup is never fetched from anywhere.
pub fn data_url(html: &str) -> String {
    format!("data:text/html;charset=utf-8;base64,{}", general_purpose::STANDARD.encode(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_round_trips_markup() {
        let html = "<h1>Grüße & <b>Hello</b></h1>";
        let url = data_url(html);
        let encoded = url.strip_prefix("data:text/html;charset=utf-8;base64,").unwrap();
        let decoded = general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), html);
    }

    #[test]
    fn new_renderer_holds_no_browsers() {
        let renderer = ChromiumPdfRenderer::new(BrowserSettings::default());
        assert_eq!(renderer.live_browsers(), 0);
    }

    #[test]
    fn zero_concurrency_still_allows_one_browser() {
        let renderer = ChromiumPdfRenderer::new(BrowserSettings {
            max_concurrent_browsers: 0,
            ..Default::default()
        });
        assert_eq!(renderer.permits.available_permits(), 1);
    }

    #[tokio::test]
    async fn invalid_height_fails_before_launching() {
        let renderer = ChromiumPdfRenderer::new(BrowserSettings {
            executable: Some("/nonexistent/chromium".into()),
            ..Default::default()
        });
        let request = ConversionRequest::new("<p>x</p>").with_footer("<b>f</b>", "-3px");
        assert!(matches!(renderer.render(&request).await, Err(RenderError::InvalidLength("footerHeight", _))));
        assert_eq!(renderer.live_browsers(), 0);
    }

    #[tokio::test]
    async fn missing_executable_is_a_launch_error() {
        let renderer = ChromiumPdfRenderer::new(BrowserSettings {
            executable: Some("/nonexistent/chromium".into()),
            ..Default::default()
        });
        for _ in 0..3 {
            let result = renderer.render(&ConversionRequest::new("<h1>Hello</h1>")).await;
            assert!(matches!(result, Err(RenderError::Launch(_))));
        }
        assert_eq!(renderer.live_browsers(), 0);
        assert_eq!(renderer.permits.available_permits(), 4);
    }
}
