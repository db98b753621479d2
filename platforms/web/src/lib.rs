//! Browser bindings: registers the swipe key listener on `document` and lets page scripts
//! collect the actions it records.

mod document;

pub use document::WebDocument;

use gloo_events::EventListener;
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use std::cell::RefCell;
use std::sync::Once;
use swipe::{
    Action, CollectorOptions, KeyActionDispatcher, KeyActionMap, KeyPress, Registration,
    SwipeCollector, SwipeError,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

thread_local! {
    static LISTENER: RefCell<Registration<EventListener>> = const { RefCell::new(Registration::new()) };
}

static LOGGER: Once = Once::new();

#[derive(Serialize)]
struct KeyBinding {
    key: &'static str,
    action: Action,
    legacy: bool,
}

fn to_js(error: SwipeError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn init_logging(debug: bool) {
    LOGGER.call_once(|| {
        let level = if debug {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        wasm_logger::init(wasm_logger::Config::new(level));

        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
    });
}

fn register_listener() -> Result<EventListener, JsValue> {
    let web_document = WebDocument::current().map_err(to_js)?;
    let target = web_document.document().clone();
    let mut dispatcher = KeyActionDispatcher::new(web_document);

    Ok(EventListener::new(&target, "keydown", move |event| {
        let event = KeyPress {
            key: event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key),
        };

        if let Err(e) = dispatcher.handle_key_down(&event) {
            log::error!("Failed to record swipe action: {}", e);
        }
    }))
}

/// Registers the `keydown` handler on the current document.
///
/// Returns `false` without registering anything if a handler is already installed.
#[wasm_bindgen]
pub fn install_swipe_listener(debug: Option<bool>) -> Result<bool, JsValue> {
    init_logging(debug.unwrap_or(false));

    let installed = LISTENER.with(|registration| {
        registration.borrow_mut().try_install(register_listener)
    })?;

    if installed {
        log::debug!("Swipe listener installed");
    } else {
        log::debug!("Swipe listener already installed");
    }
    Ok(installed)
}

/// Removes the `keydown` handler. Returns `false` if none was installed.
#[wasm_bindgen]
pub fn uninstall_swipe_listener() -> bool {
    let removed = LISTENER.with(|registration| registration.borrow_mut().uninstall());

    if removed {
        log::debug!("Swipe listener removed");
    }
    removed
}

#[wasm_bindgen]
pub fn is_swipe_listener_installed() -> bool {
    LISTENER.with(|registration| registration.borrow().is_installed())
}

/// Runs one key identifier through the dispatcher against the current document, as if it had
/// been pressed. Returns the recorded action name, if any.
#[wasm_bindgen]
pub fn dispatch_key(key: &str) -> Result<Option<String>, JsValue> {
    let mut dispatcher = KeyActionDispatcher::new(WebDocument::current().map_err(to_js)?);

    dispatcher
        .handle_key(key)
        .map(|outcome| outcome.action().map(|action| action.to_string()))
        .map_err(to_js)
}

/// Consumes the pending swipe: returns the first marker's action and removes every marker.
#[wasm_bindgen]
pub fn take_swipe_action() -> Result<Option<String>, JsValue> {
    let mut web_document = WebDocument::current().map_err(to_js)?;

    SwipeCollector::collect(&mut web_document)
        .map(|action| action.map(|action| action.to_string()))
        .map_err(to_js)
}

/// Polls for a swipe until one is collected or the timeout elapses.
///
/// Resolves to the action name, or `undefined` on timeout.
#[wasm_bindgen]
pub fn wait_for_swipe(timeout_ms: Option<u32>, poll_interval_ms: Option<u32>) -> js_sys::Promise {
    let defaults = CollectorOptions::default();
    let options = CollectorOptions {
        timeout_ms: timeout_ms.unwrap_or(defaults.timeout_ms),
        poll_interval_ms: poll_interval_ms.unwrap_or(defaults.poll_interval_ms),
    };

    wasm_bindgen_futures::future_to_promise(async move {
        let mut web_document = WebDocument::current().map_err(to_js)?;
        let polls = options.max_polls();
        log::info!("You can swipe now!");

        for attempt in 0..=polls {
            if let Some(action) = SwipeCollector::collect(&mut web_document).map_err(to_js)? {
                return Ok(JsValue::from_str(action.as_str()));
            }
            if attempt < polls {
                TimeoutFuture::new(options.poll_interval_ms).await;
            }
        }

        log::warn!("No swipe received within {} ms", options.timeout_ms);
        Ok(JsValue::UNDEFINED)
    })
}

/// Returns the key table as JSON: `[{"key": "Enter", "action": "superlike", "legacy": false}, ...]`.
#[wasm_bindgen]
pub fn key_action_table() -> Result<String, JsValue> {
    let bindings: Vec<KeyBinding> = KeyActionMap::ENTRIES
        .into_iter()
        .map(|(key, action)| KeyBinding {
            key,
            action,
            legacy: KeyActionMap::is_legacy_alias(key),
        })
        .collect();

    serde_json::to_string(&bindings)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize key table: {}", e)))
}
