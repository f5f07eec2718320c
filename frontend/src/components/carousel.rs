use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent, MouseEvent, PointerEvent};
use yew::prelude::*;
use yew_hooks::use_event_with_window;

use crate::carousel::controller::CarouselController;
use crate::carousel::dom_surface::DomSurface;

/// Delay before the first active-slide pass, so the slides have laid out.
const INITIAL_MARK_DELAY_MS: u32 = 60;
/// Delay between releasing a drag and snapping to the nearest slide.
const SETTLE_DELAY_MS: u32 = 80;

type SharedController = Rc<RefCell<Option<CarouselController<DomSurface>>>>;

#[derive(Properties, PartialEq)]
pub struct CarouselProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(String::from("Carousel"))]
    pub label: String,
}

#[function_component(Carousel)]
pub fn carousel(props: &CarouselProps) -> Html {
    let container_ref = use_node_ref();
    let prev_ref = use_node_ref();
    let next_ref = use_node_ref();
    let controller: SharedController = use_mut_ref(|| None);
    let frame_pending = use_mut_ref(|| false);

    {
        let controller = controller.clone();
        let container_ref = container_ref.clone();
        let prev_ref = prev_ref.clone();
        let next_ref = next_ref.clone();
        use_effect_with_deps(
            move |_| {
                let mut initial_mark = None;
                if let Some(container) = container_ref.cast::<HtmlElement>() {
                    let surface = DomSurface::attach(
                        container,
                        prev_ref.cast::<HtmlElement>(),
                        next_ref.cast::<HtmlElement>(),
                    );
                    *controller.borrow_mut() = CarouselController::new(surface);
                    if let Some(ctrl) = controller.borrow().as_ref() {
                        debug!("carousel attached with {} slides", ctrl.slide_count());
                        ctrl.refresh_controls();
                    }
                    let controller = controller.clone();
                    initial_mark = Some(Timeout::new(INITIAL_MARK_DELAY_MS, move || {
                        if let Some(ctrl) = controller.borrow().as_ref() {
                            ctrl.set_active_marker();
                        }
                    }));
                }
                move || {
                    drop(initial_mark);
                }
            },
            (),
        );
    }

    {
        let controller = controller.clone();
        use_event_with_window("resize", move |_: Event| {
            if let Some(ctrl) = controller.borrow().as_ref() {
                ctrl.handle_resize();
            }
        });
    }

    // At most one marker pass per animation frame, however many scroll events arrive.
    let onscroll = {
        let controller = controller.clone();
        let frame_pending = frame_pending.clone();
        Callback::from(move |_: Event| {
            if *frame_pending.borrow() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            *frame_pending.borrow_mut() = true;
            let controller = controller.clone();
            let pending = frame_pending.clone();
            let frame = Closure::once_into_js(move || {
                *pending.borrow_mut() = false;
                if let Some(ctrl) = controller.borrow().as_ref() {
                    ctrl.set_active_marker();
                }
            });
            if window.request_animation_frame(frame.unchecked_ref()).is_err() {
                *frame_pending.borrow_mut() = false;
            }
        })
    };

    let onkeydown = {
        let controller = controller.clone();
        Callback::from(move |e: KeyboardEvent| {
            let handled = controller
                .borrow()
                .as_ref()
                .map(|ctrl| ctrl.handle_key(&e.key()))
                .unwrap_or(false);
            if handled {
                e.prevent_default();
            }
        })
    };

    let onpointerdown = {
        let controller = controller.clone();
        let container_ref = container_ref.clone();
        Callback::from(move |e: PointerEvent| {
            if e.button() != 0 {
                return;
            }
            let mut slot = controller.borrow_mut();
            let Some(ctrl) = slot.as_mut() else {
                return;
            };
            if let Some(container) = container_ref.cast::<HtmlElement>() {
                let _ = container.set_pointer_capture(e.pointer_id());
            }
            ctrl.begin_drag(e.pointer_id(), e.client_x() as f64);
        })
    };

    let onpointermove = {
        let controller = controller.clone();
        Callback::from(move |e: PointerEvent| {
            if let Some(ctrl) = controller.borrow().as_ref() {
                ctrl.drag_to(e.client_x() as f64);
            }
        })
    };

    let release = {
        let controller = controller.clone();
        let container_ref = container_ref.clone();
        Callback::from(move |_: PointerEvent| {
            let pointer_id = controller.borrow_mut().as_mut().and_then(|ctrl| ctrl.end_drag());
            let Some(pointer_id) = pointer_id else {
                return;
            };
            if let Some(container) = container_ref.cast::<HtmlElement>() {
                let _ = container.release_pointer_capture(pointer_id);
            }
            let controller = controller.clone();
            Timeout::new(SETTLE_DELAY_MS, move || {
                if let Some(ctrl) = controller.borrow().as_ref() {
                    ctrl.settle();
                }
            })
            .forget();
        })
    };

    let on_prev = {
        let controller = controller.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(ctrl) = controller.borrow().as_ref() {
                ctrl.step(-1);
            }
        })
    };

    let on_next = {
        let controller = controller.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(ctrl) = controller.borrow().as_ref() {
                ctrl.step(1);
            }
        })
    };

    html! {
        <div class="carousel-shell">
            <div
                ref={container_ref}
                class={classes!("industries-snap", props.class.clone())}
                role="region"
                aria-label={props.label.clone()}
                tabindex="0"
                {onscroll}
                {onkeydown}
                {onpointerdown}
                {onpointermove}
                onpointerup={release.clone()}
                onpointercancel={release.clone()}
                onpointerleave={release}
            >
                { for props.children.iter() }
            </div>
            <div class="swipe-controls">
                <button ref={prev_ref} class="swipe-prev" aria-label="Previous slide" onclick={on_prev}>
                    {"‹"}
                </button>
                <button ref={next_ref} class="swipe-next" aria-label="Next slide" onclick={on_next}>
                    {"›"}
                </button>
            </div>
        </div>
    }
}
