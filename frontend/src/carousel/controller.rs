//! Center-snapping horizontal carousel over a fixed set of slides.
//!
//! Geometry is measured through [`CarouselSurface`] on every call. Layout can
//! shift at any time (resize, images loading, fonts), so nothing is cached
//! between events. The slides themselves are never moved or cloned; all
//! navigation happens by scrolling the container.

/// Visible box of the scroll container, in client (viewport) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub client_width: f64,
    pub scroll_left: f64,
}

impl Viewport {
    pub fn center(&self) -> f64 {
        self.left + self.client_width / 2.0
    }
}

/// Horizontal extent of one slide, in the same client pixels as [`Viewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideBounds {
    pub left: f64,
    pub width: f64,
}

impl SlideBounds {
    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollMode {
    Smooth,
    Instant,
}

/// Live view of the carousel markup. Every method is best effort: a surface
/// that lost an element just reports less.
pub trait CarouselSurface {
    fn slide_count(&self) -> usize;
    fn viewport(&self) -> Option<Viewport>;
    fn slide_bounds(&self, index: usize) -> Option<SlideBounds>;
    fn scroll_to(&self, left: f64, mode: ScrollMode);
    fn set_scroll_left(&self, left: f64);
    fn set_slide_active(&self, index: usize, active: bool);
    fn set_controls_visible(&self, visible: bool);
    fn set_dragging(&self, dragging: bool);
}

/// Index of the slide whose center is nearest `center`. Ties keep the earlier slide.
/// Slides that could not be measured are skipped but keep their position.
pub fn closest_to_center<I>(center: f64, slides: I) -> Option<usize>
where
    I: IntoIterator<Item = Option<SlideBounds>>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, slide) in slides.into_iter().enumerate() {
        let Some(slide) = slide else {
            continue;
        };
        let distance = (slide.center() - center).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

pub fn clamp_index(index: isize, count: usize) -> usize {
    if count == 0 || index <= 0 {
        return 0;
    }
    (index as usize).min(count - 1)
}

/// Scroll offset that puts `slide` in the middle of `viewport`.
pub fn centering_offset(viewport: &Viewport, slide: &SlideBounds) -> f64 {
    let delta = slide.center() - viewport.center();
    (viewport.scroll_left + delta).max(0.0).round()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGesture {
    pub pointer_id: i32,
    start_x: f64,
    start_scroll: f64,
}

pub struct CarouselController<S> {
    surface: S,
    drag: Option<DragGesture>,
}

impl<S: CarouselSurface> CarouselController<S> {
    /// `None` when there is nothing to scroll through; the carousel then stays inert.
    pub fn new(surface: S) -> Option<Self> {
        if surface.slide_count() == 0 {
            return None;
        }
        Some(Self { surface, drag: None })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn slide_count(&self) -> usize {
        self.surface.slide_count()
    }

    fn all_bounds(&self) -> Vec<Option<SlideBounds>> {
        (0..self.slide_count())
            .map(|i| self.surface.slide_bounds(i))
            .collect()
    }

    pub fn closest_index(&self) -> usize {
        let Some(viewport) = self.surface.viewport() else {
            return 0;
        };
        closest_to_center(viewport.center(), self.all_bounds())
            .map(|index| clamp_index(index as isize, self.slide_count()))
            .unwrap_or(0)
    }

    fn scroll_to_slide(&self, index: isize, mode: ScrollMode) {
        let index = clamp_index(index, self.slide_count());
        let (Some(viewport), Some(slide)) = (self.surface.viewport(), self.surface.slide_bounds(index)) else {
            return;
        };
        self.surface.scroll_to(centering_offset(&viewport, &slide), mode);
    }

    /// Smoothly centers slide `index`, clamped into range. The scroll events
    /// that follow refresh the active marker.
    pub fn go_to(&self, index: isize) {
        self.scroll_to_slide(index, ScrollMode::Smooth);
    }

    pub fn step(&self, delta: isize) {
        self.go_to(self.closest_index() as isize + delta);
    }

    /// Flags the centered slide as active and clears every other one.
    pub fn set_active_marker(&self) -> usize {
        let active = self.closest_index();
        for index in 0..self.slide_count() {
            self.surface.set_slide_active(index, index == active);
        }
        active
    }

    /// Arrow keys step one slide. Returns whether the key was consumed so the
    /// caller can suppress the browser's own scrolling.
    pub fn handle_key(&self, key: &str) -> bool {
        match key {
            "ArrowLeft" => {
                self.step(-1);
                true
            }
            "ArrowRight" => {
                self.step(1);
                true
            }
            _ => false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self, pointer_id: i32, x: f64) {
        let start_scroll = self.surface.viewport().map(|v| v.scroll_left).unwrap_or(0.0);
        self.drag = Some(DragGesture { pointer_id, start_x: x, start_scroll });
        self.surface.set_dragging(true);
    }

    /// Content follows the pointer: dragging left reveals slides to the right.
    pub fn drag_to(&self, x: f64) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        self.surface.set_scroll_left(drag.start_scroll - (x - drag.start_x));
        true
    }

    /// Ends the gesture and hands back the pointer to release. The caller
    /// schedules [`settle`](Self::settle) once the scroll has come to rest.
    pub fn end_drag(&mut self) -> Option<i32> {
        let drag = self.drag.take()?;
        self.surface.set_dragging(false);
        Some(drag.pointer_id)
    }

    /// Snaps to whichever slide ended up nearest the center.
    pub fn settle(&self) {
        let index = self.set_active_marker();
        self.go_to(index as isize);
    }

    /// Prev/next controls are only useful when the slides overflow the viewport.
    pub fn refresh_controls(&self) -> bool {
        let Some(viewport) = self.surface.viewport() else {
            return false;
        };
        let total: f64 = self.all_bounds().iter().flatten().map(|s| s.width).sum();
        let visible = total > viewport.client_width;
        self.surface.set_controls_visible(visible);
        visible
    }

    /// Geometry changed under us: re-center the current slide without animating.
    pub fn handle_resize(&self) {
        self.refresh_controls();
        self.scroll_to_slide(self.closest_index() as isize, ScrollMode::Instant);
    }
}
