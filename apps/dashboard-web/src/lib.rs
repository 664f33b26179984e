#![allow(clippy::needless_pass_by_value)]

#[cfg(any(target_arch = "wasm32", test))]
mod config_source;
#[cfg(target_arch = "wasm32")]
mod wasm_constants;
#[cfg(any(target_arch = "wasm32", test))]
mod wasm_state;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use async_trait::async_trait;
    use dashboard_sync_core::{
        BalanceResponse, ConfigError, CycleStart, DashboardApi, FailureReport, FetchError,
        IntervalScheduler, ObservabilitySink, RefreshCycle, RenderSurface, ScheduledHandle,
        SyncCollaborators, SyncConfig, SyncSession, TextTarget, TransactionBatch, ViewLocation,
        decode_json_body,
    };
    use futures::task::{LocalFutureObj, LocalSpawn, SpawnError};
    use gloo_net::http::Request;
    use gloo_timers::callback::Interval;
    use serde::de::DeserializeOwned;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::console;

    use crate::config_source::{ResolvedConfig, resolve_sync_config};
    use crate::wasm_constants::*;
    use crate::wasm_state::SyncDiagnostics;

    mod dom;
    mod lifecycle;
    mod network;

    use dom::*;
    use lifecycle::*;
    use network::*;

    thread_local! {
        static SESSION: RefCell<Option<SyncSession<BrowserTimer>>> = const { RefCell::new(None) };
        static DIAGNOSTICS: RefCell<SyncDiagnostics> = RefCell::new(SyncDiagnostics::default());
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let ResolvedConfig {
            config,
            source,
            rejected,
        } = resolve_sync_config(read_config_document().as_deref());
        install_console_tracing(&config.log_filter);
        if let Some(error) = rejected {
            report_config_rejection(&error);
        }
        boot(config, source);
    }

    /// Manual refresh. Returns whether requests were launched.
    #[wasm_bindgen]
    pub fn refresh_dashboard_now() -> bool {
        SESSION.with(|slot| {
            slot.borrow()
                .as_ref()
                .is_some_and(|session| session.refresh_now() == CycleStart::Launched)
        })
    }

    #[wasm_bindgen]
    pub fn stop_dashboard_sync() -> bool {
        let stopped = SESSION.with(|slot| {
            slot.borrow_mut()
                .as_mut()
                .is_some_and(|session| session.stop())
        });
        if stopped {
            DIAGNOSTICS.with(|state| state.borrow_mut().session_stopped());
        }
        stopped
    }

    #[wasm_bindgen]
    pub fn sync_diagnostics_json() -> String {
        DIAGNOSTICS.with(|state| state.borrow().to_json())
    }

    #[wasm_bindgen]
    pub fn format_date(date_string: String) -> String {
        let date = js_sys::Date::new(&JsValue::from_str(&date_string));
        date.to_locale_string(DATE_LOCALE, &JsValue::UNDEFINED).into()
    }

    fn boot(config: SyncConfig, config_source: &'static str) {
        let cycle = Rc::new(RefreshCycle::new(
            &config,
            SyncCollaborators {
                location: Rc::new(BrowserLocation),
                api: Rc::new(HttpDashboardApi::new(&config)),
                surface: Rc::new(DomSurface),
                sink: Rc::new(ConsoleSink),
                spawner: Rc::new(BrowserSpawner),
            },
        ));
        let session = SyncSession::start(&BrowserIntervalScheduler, cycle, config.poll_interval);
        let scheduled = session.is_scheduled();

        DIAGNOSTICS.with(|state| {
            state.borrow_mut().session_started(
                current_pathname(),
                scheduled,
                config.poll_interval_ms(),
                config_source,
            );
        });
        SESSION.with(|slot| {
            if let Some(mut previous) = slot.borrow_mut().replace(session) {
                previous.stop();
            }
        });
    }
}
