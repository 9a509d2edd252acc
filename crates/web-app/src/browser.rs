use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    sync::{Arc, Mutex},
};

use chrono::Utc;
use gloo_timers::callback::Interval;
use gloo_utils::{document, window};
use log::{error, warn};
use setbook_domain::{DocumentFormat, StateRepository};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::{
    Settings, SettingsRepository, chart,
    history::ProgressView,
    tracker::{Platform, Prompt, Tracker},
    view::TrackerView,
};

const TICK_INTERVAL: u32 = 1000;

const ALARM_FREQUENCY: f32 = 880.;
const ALARM_LENGTH: f64 = 0.18;
const ALARM_GAIN: f32 = 0.05;
const VIBRATION_PATTERN: [u32; 3] = [200, 100, 200];

/// Platform implementation backed by the browser window.
///
/// Rendering is delegated to the given callback, which typically updates the
/// DOM.
pub struct Browser {
    render: Box<dyn Fn(&TrackerView)>,
    tick_handler: RefCell<Option<Rc<dyn Fn()>>>,
    interval: RefCell<Option<Interval>>,
    audio_context: Option<web_sys::AudioContext>,
}

impl Browser {
    pub fn new(render: impl Fn(&TrackerView) + 'static) -> Self {
        Self {
            render: Box::new(render),
            tick_handler: RefCell::new(None),
            interval: RefCell::new(None),
            audio_context: match web_sys::AudioContext::new() {
                Ok(audio_context) => Some(audio_context),
                Err(err) => {
                    error!("failed to create audio context: {err:?}");
                    None
                }
            },
        }
    }

    fn set_tick_handler(&self, handler: Rc<dyn Fn()>) {
        *self.tick_handler.borrow_mut() = Some(handler);
    }
}

impl Platform for Browser {
    fn render(&self, view: &TrackerView) {
        (self.render)(view);
    }

    fn schedule_ticks(&self) {
        let Some(handler) = self.tick_handler.borrow().clone() else {
            warn!("failed to schedule ticks: no tick handler");
            return;
        };
        *self.interval.borrow_mut() = Some(Interval::new(TICK_INTERVAL, move || handler()));
    }

    fn cancel_ticks(&self) {
        if let Some(interval) = self.interval.borrow_mut().take() {
            let callback = interval.cancel();
            // Cancelling may happen inside the callback itself, which must
            // stay alive until it returns.
            wasm_bindgen_futures::spawn_local(async move {
                drop(callback);
            });
        }
    }

    fn alarm(&self, settings: &Settings) {
        if settings.vibration {
            vibrate();
        }
        if let Some(audio_context) = &self.audio_context {
            if let Err(err) = play_beep(
                audio_context,
                ALARM_FREQUENCY,
                audio_context.current_time(),
                ALARM_LENGTH,
                ALARM_GAIN * f32::from(settings.beep_volume) / 100.,
            ) {
                error!("failed to play beep: {err:?}");
            }
        }
    }

    fn confirm(&self, text: &str) -> bool {
        window().confirm_with_message(text).unwrap_or_else(|err| {
            error!("failed to ask for confirmation: {err:?}");
            false
        })
    }

    fn prompt(&self, prompt: &Prompt) -> Option<String> {
        window()
            .prompt_with_message_and_default(&prompt.text, &prompt.default)
            .unwrap_or_else(|err| {
                error!("failed to prompt: {err:?}");
                None
            })
    }

    fn open_link(&self, url: &str) {
        if let Err(err) = window().open_with_url_and_target_and_features(url, "_blank", "noopener")
        {
            error!("failed to open {url}: {err:?}");
        }
    }

    fn download(&self, file_name: &str, text: &str) {
        if let Err(err) = download(file_name, text) {
            error!("failed to download {file_name}: {err:?}");
        }
    }
}

/// Create a tracker for the browser, with the rest timer ticking on the
/// window's interval timer.
///
/// The repository also receives the log.
pub fn start<R>(
    repository: R,
    render: impl Fn(&TrackerView) + 'static,
) -> Rc<RefCell<Tracker<R, Browser>>>
where
    R: StateRepository + DocumentFormat + SettingsRepository + crate::log::Repository + Clone,
{
    if let Err(err) = crate::log::init(Arc::new(Mutex::new(repository.clone()))) {
        warn!("failed to initialize logger: {err}");
    }
    let tracker = Rc::new(RefCell::new(Tracker::new(repository, Browser::new(render))));
    let weak: Weak<RefCell<Tracker<R, Browser>>> = Rc::downgrade(&tracker);
    tracker
        .borrow()
        .platform()
        .set_tick_handler(Rc::new(move || {
            if let Some(tracker) = weak.upgrade() {
                if let Ok(mut tracker) = tracker.try_borrow_mut() {
                    tracker.tick(Utc::now());
                } else {
                    warn!("skipped timer tick during another transition");
                }
            }
        }));
    tracker
}

/// Import a document from a file chosen by the user.
pub async fn import_file<R, P>(tracker: Rc<RefCell<Tracker<R, P>>>, file: web_sys::File) -> bool
where
    R: StateRepository + DocumentFormat + SettingsRepository + Clone,
    P: Platform,
{
    let text = JsFuture::from(file.text()).await.map(|text| text.as_string());
    let Ok(mut tracker) = tracker.try_borrow_mut() else {
        warn!("skipped import during another transition");
        return false;
    };
    match text {
        Ok(Some(text)) => tracker.import_document(&text),
        Ok(None) => {
            warn!("failed to read {}: no text", file.name());
            tracker.import_failed();
            false
        }
        Err(err) => {
            warn!("failed to read {}: {err:?}", file.name());
            tracker.import_failed();
            false
        }
    }
}

/// Render the charts of the progress view for the current display, in the
/// order of the view. A chart that fails to render is left empty.
#[must_use]
pub fn render_charts(progress: &ProgressView, settings: &Settings) -> Vec<String> {
    let dpr = chart::device_pixel_ratio();
    progress
        .charts
        .iter()
        .map(|c| {
            c.svg(settings, dpr).unwrap_or_else(|err| {
                error!("failed to render chart {}: {err}", c.title);
                String::new()
            })
        })
        .collect()
}

fn download(file_name: &str, text: &str) -> Result<(), JsValue> {
    let parts = serde_wasm_bindgen::to_value(&[text])?;
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let anchor = document()
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url)
}

fn vibrate() {
    match serde_wasm_bindgen::to_value(&VIBRATION_PATTERN) {
        Ok(pattern) => {
            window().navigator().vibrate_with_pattern(&pattern);
        }
        Err(err) => error!("failed to vibrate: {err}"),
    }
}

fn play_beep(
    audio_context: &web_sys::AudioContext,
    frequency: f32,
    start: f64,
    length: f64,
    gain: f32,
) -> Result<(), JsValue> {
    let oscillator = audio_context.create_oscillator()?;
    let gain_node = audio_context.create_gain()?;
    gain_node.gain().set_value(gain);
    gain_node.connect_with_audio_node(&audio_context.destination())?;
    oscillator.connect_with_audio_node(&gain_node)?;
    oscillator.frequency().set_value(frequency);
    oscillator.start_with_when(start)?;
    oscillator.stop_with_when(start + length)?;
    Ok(())
}
