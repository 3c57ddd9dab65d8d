//! Real browser control via the Chrome DevTools Protocol.
//!
//! Compiled with the `browser` feature only. [`CdpDriver`] implements the
//! same [`TodoDriver`] surface as the in-process simulation, but against a
//! live Chromium: every interaction and read-back is a script generated
//! from the target [`Selector`] and evaluated in the page. Interactions
//! auto-wait for the element through [`crate::wait::wait_until`], matching
//! the engine's retry-until-actionable contract.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use tracing::debug;

use crate::driver::{Key, TodoDriver};
use crate::result::{TodoError, TodoResult};
use crate::selector::Selector;
use crate::wait::{wait_until, WaitOptions};

/// Launch configuration for the Chromium instance.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Path to chromium binary (None = auto-detect, `CHROMIUM_PATH` honored)
    pub chromium_path: Option<String>,
    /// Auto-wait window for interactions
    pub wait: WaitOptions,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: true,
            chromium_path: std::env::var("CHROMIUM_PATH").ok(),
            wait: WaitOptions::default(),
        }
    }
}

impl BrowserConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }
}

/// [`TodoDriver`] backed by a live Chromium page.
pub struct CdpDriver {
    browser: CdpBrowser,
    page: CdpPage,
    wait: WaitOptions,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl CdpDriver {
    /// Launch a browser and open one blank page.
    pub async fn launch(config: BrowserConfig) -> TodoResult<Self> {
        let mut builder = CdpConfig::builder();
        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder
            .build()
            .map_err(|e| TodoError::BrowserLaunchError {
                message: e.to_string(),
            })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| TodoError::BrowserLaunchError {
                    message: e.to_string(),
                })?;

        // Drive the CDP event stream for the browser's lifetime.
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| TodoError::BrowserLaunchError {
                message: e.to_string(),
            })?;

        Ok(Self {
            browser,
            page,
            wait: config.wait,
            handle,
        })
    }

    /// Close the browser.
    pub async fn close(mut self) -> TodoResult<()> {
        self.browser
            .close()
            .await
            .map_err(|e| TodoError::BrowserLaunchError {
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn eval(&self, script: &str) -> TodoResult<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| TodoError::EvalError {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| TodoError::EvalError {
            message: e.to_string(),
        })
    }

    /// Run `js_fn` (a one-argument function expression) against the first
    /// match of `target`, auto-waiting for the element to appear.
    async fn act(&self, target: &Selector, js_fn: &str) -> TodoResult<()> {
        let script = format!(
            "(() => {{ const el = {}; if (!el) return false; ({js_fn})(el); return true; }})()",
            target.to_query()
        );
        let this = &self;
        wait_until(&self.wait, move || {
            let script = script.clone();
            async move {
                let value = this.eval(&script).await?;
                if value.as_bool() == Some(true) {
                    Ok(None)
                } else {
                    Ok(Some("element not attached".to_string()))
                }
            }
        })
        .await
        .map_err(|err| match err {
            TodoError::AssertionFailed { .. } => TodoError::ElementNotFound {
                selector: target.to_string(),
            },
            other => other,
        })
    }

    /// Evaluate `js_fn` against the first match of `target` and return its
    /// value, auto-waiting for the element to appear.
    async fn read(&self, target: &Selector, js_fn: &str) -> TodoResult<serde_json::Value> {
        let script = format!(
            "(() => {{ const el = {}; if (!el) return undefined; return ({js_fn})(el); }})()",
            target.to_query()
        );
        let this = &self;
        wait_until(&self.wait, move || {
            let script = script.clone();
            async move {
                let value = this.eval(&script).await?;
                if value.is_null() {
                    Ok(Some("element not attached".to_string()))
                } else {
                    Ok(None)
                }
            }
        })
        .await
        .map_err(|err| match err {
            TodoError::AssertionFailed { .. } => TodoError::ElementNotFound {
                selector: target.to_string(),
            },
            other => other,
        })?;
        // Element is attached now; read once more for the settled value.
        self.eval(&script).await
    }

    fn js_string(text: &str) -> String {
        serde_json::Value::String(text.to_string()).to_string()
    }
}

#[async_trait]
impl TodoDriver for CdpDriver {
    async fn goto(&mut self, url: &str) -> TodoResult<()> {
        debug!(%url, "goto");
        self.page
            .goto(url)
            .await
            .map_err(|e| TodoError::NavigationError {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn reload(&mut self) -> TodoResult<()> {
        debug!("reload");
        self.eval("location.reload()").await?;
        let this = &self;
        wait_until(&self.wait, move || async move {
            let state = this.eval("document.readyState").await?;
            if state.as_str() == Some("complete") {
                Ok(None)
            } else {
                Ok(Some(format!("readyState {state}")))
            }
        })
        .await
    }

    async fn go_back(&mut self) -> TodoResult<()> {
        debug!("go_back");
        self.eval("history.back()").await?;
        Ok(())
    }

    async fn click(&mut self, target: &Selector) -> TodoResult<()> {
        self.act(target, "el => el.click()").await
    }

    async fn double_click(&mut self, target: &Selector) -> TodoResult<()> {
        self.act(
            target,
            "el => el.dispatchEvent(new MouseEvent('dblclick', { bubbles: true, cancelable: true }))",
        )
        .await
    }

    async fn fill(&mut self, target: &Selector, text: &str) -> TodoResult<()> {
        let js_fn = format!(
            "el => {{ el.focus(); el.value = {}; el.dispatchEvent(new Event('input', {{ bubbles: true }})); }}",
            Self::js_string(text)
        );
        self.act(target, &js_fn).await
    }

    async fn press(&mut self, target: &Selector, key: Key) -> TodoResult<()> {
        let js_fn = format!(
            "el => {{ for (const type of ['keydown', 'keyup']) {{ el.dispatchEvent(new KeyboardEvent(type, {{ key: {}, bubbles: true, cancelable: true }})); }} }}",
            Self::js_string(key.as_str())
        );
        self.act(target, &js_fn).await
    }

    async fn blur(&mut self, target: &Selector) -> TodoResult<()> {
        self.act(target, "el => el.blur()").await
    }

    async fn set_checked(&mut self, target: &Selector, checked: bool) -> TodoResult<()> {
        let js_fn = format!("el => {{ if (el.checked !== {checked}) el.click(); }}");
        self.act(target, &js_fn).await
    }

    async fn is_checked(&self, target: &Selector) -> TodoResult<bool> {
        let value = self.read(target, "el => !!el.checked").await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn is_visible(&self, target: &Selector) -> TodoResult<bool> {
        // No auto-wait: an absent element reads as not visible.
        let script = format!(
            "(() => {{ const el = {}; return !!(el && (el.offsetWidth || el.offsetHeight || el.getClientRects().length)); }})()",
            target.to_query()
        );
        let value = self.eval(&script).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn input_value(&self, target: &Selector) -> TodoResult<String> {
        let value = self.read(target, "el => el.value ?? ''").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn texts(&self, target: &Selector) -> TodoResult<Vec<String>> {
        let script = format!(
            "({}).map(el => (el.textContent || '').trim())",
            target.to_query_all()
        );
        let value = self.eval(&script).await?;
        serde_json::from_value(value).map_err(Into::into)
    }

    async fn class_names(&self, target: &Selector) -> TodoResult<Vec<String>> {
        let script = format!(
            "({}).map(el => el.getAttribute('class') || '')",
            target.to_query_all()
        );
        let value = self.eval(&script).await?;
        serde_json::from_value(value).map_err(Into::into)
    }

    async fn evaluate(&self, script: &str) -> TodoResult<serde_json::Value> {
        self.eval(script).await
    }
}
