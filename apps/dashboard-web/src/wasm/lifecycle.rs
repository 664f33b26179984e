use super::*;

    pub(super) fn current_pathname() -> String {
        let Some(window) = web_sys::window() else {
            return "/".to_string();
        };
        let Ok(pathname) = window.location().pathname() else {
            return "/".to_string();
        };
        if pathname.trim().is_empty() {
            "/".to_string()
        } else {
            pathname
        }
    }

    pub(super) fn epoch_millis_now() -> u64 {
        let now = js_sys::Date::now();
        if !now.is_finite() || now.is_sign_negative() {
            return 0;
        }
        now.floor().min(u64::MAX as f64) as u64
    }

    /// `window.__DASHBOARD_SYNC_CONFIG__` as JSON text, whether the page set a
    /// string or a plain object.
    pub(super) fn read_config_document() -> Option<String> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL_KEY)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        if let Some(raw) = value.as_string() {
            return Some(raw);
        }
        js_sys::JSON::stringify(&value).ok()?.as_string()
    }

    pub(super) fn report_config_rejection(error: &ConfigError) {
        tracing::warn!(%error, "dashboard sync config rejected, using defaults");
    }

    pub(super) fn install_console_tracing(filter: &str) {
        let installed = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
            .with_writer(MakeConsoleWriter)
            .with_ansi(false)
            .without_time()
            .try_init();
        if let Err(error) = installed {
            console::warn_1(&JsValue::from_str(&format!(
                "dashboard sync tracing unavailable: {error}"
            )));
        }
    }

    struct MakeConsoleWriter;

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter { buffer: Vec::new() }
        }
    }

    /// Buffers one formatted event and emits it as a single console line on drop.
    struct ConsoleWriter {
        buffer: Vec<u8>,
    }

    impl std::io::Write for ConsoleWriter {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.buffer.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buffer);
            let line = line.trim_end();
            if !line.is_empty() {
                console::log_1(&JsValue::from_str(line));
            }
        }
    }

    /// Failure reports go to `console.error` and the bounded diagnostics log.
    pub(super) struct ConsoleSink;

    impl ObservabilitySink for ConsoleSink {
        fn report_failure(&self, message: &str, error: &FetchError) {
            console::error_2(
                &JsValue::from_str(message),
                &JsValue::from_str(&error.to_string()),
            );
            DIAGNOSTICS.with(|state| {
                state.borrow_mut().record_failure(FailureReport {
                    message: message.to_string(),
                    error: error.clone(),
                    recorded_at_unix_ms: epoch_millis_now(),
                });
            });
        }

        fn acknowledge(&self, message: &str) {
            console::log_1(&JsValue::from_str(message));
        }
    }

    pub(super) struct BrowserSpawner;

    impl LocalSpawn for BrowserSpawner {
        fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
            spawn_local(future);
            Ok(())
        }
    }

    pub(super) struct BrowserIntervalScheduler;

    /// `setInterval` registration; dropping or cancelling it clears the timer.
    pub(super) struct BrowserTimer(Interval);

    impl ScheduledHandle for BrowserTimer {
        fn cancel(self) {
            drop(self.0.cancel());
        }
    }

    impl IntervalScheduler for BrowserIntervalScheduler {
        type Handle = BrowserTimer;

        fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Self::Handle {
            let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
            BrowserTimer(Interval::new(millis, tick))
        }
    }
