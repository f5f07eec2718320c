use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use super::controller::{CarouselSurface, ScrollMode, SlideBounds, Viewport};

pub const ACTIVE_CLASS: &str = "active-slide";
pub const DRAGGING_CLASS: &str = "dragging";

/// Children carrying one of these classes are navigation chrome, not slides.
const CONTROL_CLASSES: [&str; 4] = [
    "swipe-controls",
    "swiper-pagination",
    "swiper-button-next",
    "swiper-button-prev",
];

fn is_control(element: &Element) -> bool {
    let classes = element.class_list();
    CONTROL_CLASSES.iter().any(|class| classes.contains(class))
}

/// The carousel as it exists in the document. Slides are collected once, when
/// the surface is attached.
pub struct DomSurface {
    container: HtmlElement,
    slides: Vec<Element>,
    prev: Option<HtmlElement>,
    next: Option<HtmlElement>,
}

impl DomSurface {
    pub fn attach(container: HtmlElement, prev: Option<HtmlElement>, next: Option<HtmlElement>) -> Self {
        if !container.has_attribute("tabindex") {
            let _ = container.set_attribute("tabindex", "0");
        }
        let children = container.children();
        let slides = (0..children.length())
            .filter_map(|i| children.item(i))
            .filter(|child| !is_control(child))
            .collect();
        Self { container, slides, prev, next }
    }
}

impl CarouselSurface for DomSurface {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn viewport(&self) -> Option<Viewport> {
        if !self.container.is_connected() {
            return None;
        }
        let rect = self.container.get_bounding_client_rect();
        Some(Viewport {
            left: rect.left(),
            client_width: self.container.client_width() as f64,
            scroll_left: self.container.scroll_left() as f64,
        })
    }

    fn slide_bounds(&self, index: usize) -> Option<SlideBounds> {
        let rect = self.slides.get(index)?.get_bounding_client_rect();
        Some(SlideBounds {
            left: rect.left(),
            width: rect.width(),
        })
    }

    fn scroll_to(&self, left: f64, mode: ScrollMode) {
        let mut options = ScrollToOptions::new();
        options.left(left);
        options.behavior(match mode {
            ScrollMode::Smooth => ScrollBehavior::Smooth,
            ScrollMode::Instant => ScrollBehavior::Auto,
        });
        self.container.scroll_to_with_scroll_to_options(&options);
    }

    fn set_scroll_left(&self, left: f64) {
        self.container.set_scroll_left(left.round() as i32);
    }

    fn set_slide_active(&self, index: usize, active: bool) {
        if let Some(slide) = self.slides.get(index) {
            let classes = slide.class_list();
            let _ = if active {
                classes.add_1(ACTIVE_CLASS)
            } else {
                classes.remove_1(ACTIVE_CLASS)
            };
        }
    }

    fn set_controls_visible(&self, visible: bool) {
        for control in [&self.prev, &self.next].into_iter().flatten() {
            let style = control.style();
            let _ = if visible {
                style.remove_property("display").map(|_| ())
            } else {
                style.set_property("display", "none")
            };
        }
    }

    fn set_dragging(&self, dragging: bool) {
        let classes = self.container.class_list();
        let _ = if dragging {
            classes.add_1(DRAGGING_CLASS)
        } else {
            classes.remove_1(DRAGGING_CLASS)
        };
    }
}
