// THEORY:
// The `session` module is the top-level API of the color keyer. It ties the core
// modules together behind one object and one entry point: feed it `SessionEvent`s,
// read back state, swatch views and the image to display.
//
// Key architectural principles:
// 1.  **Pure reducer**: `SessionState::reduce` maps (state, event) to a new state
//     plus a note of which records changed. It does no I/O, so every rule about
//     toggling, custom colors and filtering can be exercised without a store.
// 2.  **Injected persistence**: `FilterSession` owns a `KeyValueStore` and writes
//     exactly the records a transition marks dirty. Loading (including first-run
//     seeding) happens once, in `FilterSession::open`.
// 3.  **Immutable original**: an upload is kept behind an `Arc` and never modified.
//     Every filter pass reads from it, so passes never stack.
// 4.  **Recoverable failures**: a bad color spec leaves the state untouched and
//     raises a transient `Notice`; filter or reset without an image do nothing.

use crate::config::SessionConfig;
use crate::core_modules::active_set::{ActiveKeySet, DragGesture};
use crate::core_modules::color_spec::color_spec::parse;
use crate::core_modules::custom_colors::CustomColorList;
use crate::core_modules::palette::free_palette_keys;
use crate::core_modules::pixel::pixel::RgbKey;
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::recolor::apply_filter;
use crate::core_modules::utils::image_helper::image_helper;
use crate::error::{ColorKeyError, Result};
use crate::store::{KeyValueStore, Records};
use crate::swatches::{SwatchGroup, render_swatches};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Everything a user can do to a session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Discrete click on a swatch.
    Toggle(RgbKey),
    /// Pointer pressed with the paint modifier held.
    DragStart,
    /// Pointer entered a swatch during a drag.
    DragEnter(RgbKey),
    DragEnd,
    AddCustom(String),
    RemoveCustom(String),
    Upload { name: String, buffer: PixelBuffer },
    ApplyFilter,
    Reset,
}

/// What is currently shown for the loaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Canvas {
    Original,
    Filtered(Arc<PixelBuffer>),
}

#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// File name of the upload, used to name exports.
    pub name: String,
    pub original: Arc<PixelBuffer>,
    pub canvas: Canvas,
}

impl LoadedImage {
    pub fn displayed(&self) -> &PixelBuffer {
        match &self.canvas {
            Canvas::Original => self.original.as_ref(),
            Canvas::Filtered(filtered) => filtered.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub active: ActiveKeySet,
    pub custom: CustomColorList,
    pub image: Option<LoadedImage>,
    drag: Option<DragGesture>,
}

/// Records a transition wants written back to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dirty {
    pub selected: bool,
    pub custom: bool,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: SessionState,
    pub dirty: Dirty,
}

impl SessionState {
    pub fn new(active: ActiveKeySet, custom: CustomColorList) -> Self {
        Self {
            active,
            custom,
            image: None,
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// True once a filter pass has produced something to export.
    pub fn export_ready(&self) -> bool {
        matches!(
            self.image,
            Some(LoadedImage {
                canvas: Canvas::Filtered(_),
                ..
            })
        )
    }

    /// Applies one event. Fails only on a malformed custom color, leaving `self` as is.
    pub fn reduce(&self, event: SessionEvent) -> Result<Transition> {
        let mut next = self.clone();
        let mut dirty = Dirty::default();

        match event {
            SessionEvent::Toggle(key) => {
                next.active.toggle(key);
                dirty.selected = true;
            }
            SessionEvent::DragStart => next.drag = Some(DragGesture::begin()),
            SessionEvent::DragEnter(key) => match next.drag.as_mut() {
                Some(gesture) => {
                    dirty.selected = gesture.enter(key, &mut next.active).is_some();
                }
                None => debug!(%key, "drag enter outside a gesture ignored"),
            },
            SessionEvent::DragEnd => next.drag = None,
            SessionEvent::AddCustom(spec) => {
                let color = parse(&spec).map_err(|err| ColorKeyError::invalid_spec(spec.as_str(), err))?;
                next.active.insert(color.rgb_key());
                dirty.selected = true;
                dirty.custom = next.custom.add(&color);
            }
            SessionEvent::RemoveCustom(hex) => {
                if let Some(key) = next.custom.remove(&hex) {
                    next.active.remove(&key);
                    dirty.selected = true;
                    dirty.custom = true;
                    next.refilter();
                } else {
                    debug!(%hex, "remove of unknown custom color ignored");
                }
            }
            SessionEvent::Upload { name, buffer } => {
                info!(%name, width = buffer.width(), height = buffer.height(), "image uploaded");
                next.image = Some(LoadedImage {
                    name,
                    original: Arc::new(buffer),
                    canvas: Canvas::Original,
                });
            }
            SessionEvent::ApplyFilter => next.refilter(),
            SessionEvent::Reset => match next.image.as_mut() {
                Some(image) => image.canvas = Canvas::Original,
                None => debug!("reset without an image is a no-op"),
            },
        }

        Ok(Transition { state: next, dirty })
    }

    fn refilter(&mut self) {
        let Some(image) = self.image.as_mut() else {
            debug!("filter without an image is a no-op");
            return;
        };
        let filtered = apply_filter(&image.original, &self.active);
        image.canvas = Canvas::Filtered(Arc::new(filtered));
    }
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub raised_at: Instant,
    pub ttl: Duration,
}

impl Notice {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) < self.ttl
    }
}

/// A color keying session bound to a store.
pub struct FilterSession<S: KeyValueStore> {
    store: S,
    config: SessionConfig,
    state: SessionState,
    notice: Option<Notice>,
}

impl<S: KeyValueStore> FilterSession<S> {
    /// Loads custom colors and the selection from `store`. On the very first run the
    /// selection is seeded with the free palette and written back.
    pub fn open(mut store: S, config: SessionConfig) -> Result<Self> {
        let mut records = Records::new(&mut store);
        let custom = records.load_custom()?;
        let active = if records.claim_first_run()? {
            let seeded: ActiveKeySet = if config.seed_free_palette {
                free_palette_keys().collect()
            } else {
                ActiveKeySet::new()
            };
            records.save_selected(&seeded)?;
            info!(colors = seeded.len(), "first run, seeded free palette");
            seeded
        } else {
            records.load_selected()?
        };

        Ok(Self {
            store,
            config,
            state: SessionState::new(active, custom),
            notice: None,
        })
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> Result<()> {
        match self.state.reduce(event) {
            Ok(Transition { state, dirty }) => {
                self.persist(&state, dirty)?;
                self.state = state;
                Ok(())
            }
            Err(err) => {
                warn!(%err, "event rejected");
                self.notice = Some(Notice {
                    message: err.notice_text(),
                    raised_at: Instant::now(),
                    ttl: self.config.notice_duration(),
                });
                Err(err)
            }
        }
    }

    // Custom colors are written before the selection. If the second write fails the
    // store is left with at most an unselected custom swatch or a selected key with
    // no swatch, and the in-memory state keeps its previous value.
    fn persist(&mut self, state: &SessionState, dirty: Dirty) -> Result<()> {
        let mut records = Records::new(&mut self.store);
        if dirty.custom {
            records.save_custom(&state.custom)?;
        }
        if dirty.selected {
            records.save_selected(&state.active)?;
        }
        Ok(())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn swatches(&self) -> Vec<SwatchGroup> {
        render_swatches(&self.state.active, &self.state.custom)
    }

    /// The notice to show right now, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice_at(Instant::now())
    }

    pub fn notice_at(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| notice.is_visible_at(now))
    }

    /// The buffer currently on display, original or filtered.
    pub fn displayed(&self) -> Option<&PixelBuffer> {
        self.state.image.as_ref().map(LoadedImage::displayed)
    }

    /// PNG bytes of the displayed image and the file name to save them under.
    pub fn export_png(&self) -> Result<(String, Vec<u8>)> {
        let image = self.state.image.as_ref().ok_or(ColorKeyError::MissingImage)?;
        let png = image_helper::encode_png(image.displayed())?;
        Ok((image_helper::export_file_name(&image.name), png))
    }

    pub fn export_data_uri(&self) -> Result<String> {
        let image = self.state.image.as_ref().ok_or(ColorKeyError::MissingImage)?;
        image_helper::png_data_uri(image.displayed())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
