//! Modal image/diagram viewer with wheel, button and keyboard zoom plus
//! mouse and single-finger touch panning.
//!
//! The overlay is built once and lives for the page lifetime. Content
//! triggers are discovered on install and again after every batch of DOM
//! mutations, so diagrams rendered after load become clickable too.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlDialogElement, HtmlElement, HtmlImageElement, KeyboardEvent,
    MouseEvent, MutationObserver, MutationObserverInit, Node, TouchEvent, WheelEvent,
};

use crate::dom::{body, create_html, js_err, query_all, set_style};
use pagelens_core::{SiteConfig, ViewBox, ViewerCommand, ViewerState};

pub(crate) const MARKER_ATTRIBUTE: &str = "data-modal-ready";
pub(crate) const ACTION_ATTRIBUTE: &str = "data-action";
pub(crate) const FALLBACK_ALT: &str = "Enlarged image";
const STRIPPED_DIAGRAM_ATTRIBUTES: [&str; 3] = ["width", "height", "style"];

thread_local! {
    static IMAGE_VIEWER: RefCell<Option<Rc<ImageViewer>>> = RefCell::new(None);
}

type MutationCallback = Closure<dyn FnMut(js_sys::Array, MutationObserver)>;

struct DiscoveryObserver {
    _observer: MutationObserver,
    _callback: MutationCallback,
}

pub(crate) struct ImageViewer {
    document: Document,
    dialog: HtmlDialogElement,
    viewport: HtmlElement,
    content: HtmlElement,
    image_selector: String,
    diagram_selector: String,
    state: RefCell<ViewerState>,
    listeners: RefCell<Vec<EventListener>>,
    observer: RefCell<Option<DiscoveryObserver>>,
}

pub(crate) fn install(document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
    if viewer().is_some() {
        return Ok(());
    }
    let viewer = ImageViewer::new(document, config)?;
    let wired = viewer.discover();
    viewer.observe_document()?;
    IMAGE_VIEWER.with(|slot| {
        *slot.borrow_mut() = Some(viewer);
    });
    gloo::console::log!("image viewer: installed", wired);
    Ok(())
}

pub(crate) fn viewer() -> Option<Rc<ImageViewer>> {
    IMAGE_VIEWER.with(|slot| slot.borrow().clone())
}

impl ImageViewer {
    pub(crate) fn new(document: &Document, config: &SiteConfig) -> Result<Rc<Self>, JsValue> {
        let dialog = document
            .create_element("dialog")?
            .dyn_into::<HtmlDialogElement>()?;
        dialog.set_class_name("image-modal-dialog");

        let controls = create_html(document, "div", "modal-controls")?;
        for command in ViewerCommand::ALL {
            let button = create_html(document, "button", "modal-btn")?;
            button.set_attribute("type", "button")?;
            button.set_attribute(ACTION_ATTRIBUTE, command.action())?;
            button.set_title(command.title());
            button.set_text_content(Some(command.label()));
            controls.append_child(&button)?;
        }
        let viewport = create_html(document, "div", "modal-viewport")?;
        let content = create_html(document, "div", "modal-content")?;
        viewport.append_child(&content)?;
        dialog.append_child(&controls)?;
        dialog.append_child(&viewport)?;
        body(document)?.append_child(&dialog)?;

        let viewer = Rc::new(Self {
            document: document.clone(),
            dialog,
            viewport,
            content,
            image_selector: config.image_selector(),
            diagram_selector: config.diagram_selector(),
            state: RefCell::new(ViewerState::new()),
            listeners: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
        });
        viewer.install_listeners();
        viewer.render();
        Ok(viewer)
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> ViewerState {
        self.state.borrow().clone()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    #[cfg(test)]
    pub(crate) fn content_element(&self) -> Option<Element> {
        self.content.first_element_child()
    }

    /// Replaces the displayed content and presents the overlay modally.
    pub(crate) fn open(&self, element: &Element) -> Result<(), JsValue> {
        self.content.set_inner_html("");
        self.content.append_child(element)?;
        self.state.borrow_mut().open();
        self.render();
        set_style(&self.viewport, "cursor", "");
        if !self.dialog.open() {
            if let Err(err) = self.dialog.show_modal() {
                self.state.borrow_mut().close();
                return Err(err);
            }
        }
        Ok(())
    }

    pub(crate) fn close(&self) {
        self.state.borrow_mut().close();
        set_style(&self.viewport, "cursor", "");
        if self.dialog.open() {
            self.dialog.close();
        }
    }

    pub(crate) fn zoom_in(&self) {
        self.run(ViewerCommand::ZoomIn);
    }

    pub(crate) fn zoom_out(&self) {
        self.run(ViewerCommand::ZoomOut);
    }

    pub(crate) fn reset(&self) {
        self.run(ViewerCommand::Reset);
    }

    pub(crate) fn run(&self, command: ViewerCommand) {
        if command == ViewerCommand::Close {
            self.close();
            return;
        }
        self.state.borrow_mut().apply(command);
        self.render();
    }

    fn render(&self) {
        let css = self.state.borrow().transform().css();
        set_style(&self.content, "transform", &css);
    }

    /// Wires every trigger not wired before. Returns how many were added.
    pub(crate) fn discover(self: &Rc<Self>) -> usize {
        let mut wired = 0;
        for element in query_all(&self.document, &self.image_selector) {
            let Ok(image) = element.dyn_into::<HtmlImageElement>() else {
                continue;
            };
            if !claim_trigger(&image) {
                continue;
            }
            self.wire_image(image);
            wired += 1;
        }
        for graphic in query_all(&self.document, &self.diagram_selector) {
            let Some(container) = graphic.parent_element() else {
                continue;
            };
            if !claim_trigger(&container) {
                continue;
            }
            self.wire_diagram(container, graphic);
            wired += 1;
        }
        wired
    }

    fn wire_image(self: &Rc<Self>, image: HtmlImageElement) {
        let viewer = Rc::clone(self);
        let source = image.clone();
        let listener = EventListener::new_with_options(
            &image,
            "click",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                event.prevent_default();
                let result = enlarged_image(&viewer.document, &source)
                    .and_then(|content| viewer.open(&content));
                if let Err(err) = result {
                    gloo::console::warn!("image viewer: open image failed", js_err(err));
                }
            },
        );
        listener.forget();
    }

    fn wire_diagram(self: &Rc<Self>, container: Element, graphic: Element) {
        let viewer = Rc::clone(self);
        let target = container.clone();
        let listener = EventListener::new_with_options(
            &container,
            "click",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                event.prevent_default();
                let current = target
                    .query_selector("svg")
                    .ok()
                    .flatten()
                    .unwrap_or_else(|| graphic.clone());
                let result = clone_diagram(&current).and_then(|content| viewer.open(&content));
                if let Err(err) = result {
                    gloo::console::warn!("image viewer: open diagram failed", js_err(err));
                }
            },
        );
        listener.forget();
    }

    fn observe_document(self: &Rc<Self>) -> Result<(), JsValue> {
        let viewer = Rc::clone(self);
        let callback: MutationCallback = Closure::wrap(Box::new(
            move |_records: js_sys::Array, _observer: MutationObserver| {
                let wired = viewer.discover();
                if wired > 0 {
                    gloo::console::log!("image viewer: wired new triggers", wired);
                }
            },
        ));
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        let body = body(&self.document)?;
        observer.observe_with_options(body.as_ref(), &options)?;
        *self.observer.borrow_mut() = Some(DiscoveryObserver {
            _observer: observer,
            _callback: callback,
        });
        Ok(())
    }

    fn is_backdrop(&self, target: &Node) -> bool {
        let dialog: &Node = self.dialog.as_ref();
        let viewport: &Node = self.viewport.as_ref();
        target.is_same_node(Some(dialog)) || target.is_same_node(Some(viewport))
    }

    fn starts_drag(&self, target: &Node) -> bool {
        let viewport: &Node = self.viewport.as_ref();
        target.is_same_node(Some(viewport)) || self.content.contains(Some(target))
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.dialog, "click", move |event: &Event| {
            let Some(target) = event.target().and_then(|target| target.dyn_into::<Element>().ok())
            else {
                return;
            };
            let action = target
                .closest(&format!("[{ACTION_ATTRIBUTE}]"))
                .ok()
                .flatten()
                .and_then(|control| control.get_attribute(ACTION_ATTRIBUTE));
            if let Some(action) = action {
                match action.parse::<ViewerCommand>() {
                    Ok(command) => view.run(command),
                    Err(err) => gloo::console::warn!("image viewer:", err.to_string()),
                }
                return;
            }
            if view.is_backdrop(&target) {
                view.close();
            }
        });
        listeners.push(listener);

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.dialog, "keydown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if !view.is_open() {
                return;
            }
            let Some(command) = ViewerCommand::from_key(&event.key()) else {
                return;
            };
            if command == ViewerCommand::Close {
                event.prevent_default();
            }
            view.run(command);
        });
        listeners.push(listener);

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.dialog, "close", move |_event: &Event| {
            // The event is queued; a reopen in the same task must win.
            if view.dialog.open() {
                return;
            }
            view.state.borrow_mut().close();
            set_style(&view.viewport, "cursor", "");
        });
        listeners.push(listener);

        let view = Rc::clone(self);
        let listener = EventListener::new_with_options(
            &self.viewport,
            "wheel",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                event.prevent_default();
                view.state.borrow_mut().wheel(event.delta_y());
                view.render();
            },
        );
        listeners.push(listener);

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.viewport, "mousedown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let Some(target) = event.target().and_then(|target| target.dyn_into::<Node>().ok())
            else {
                return;
            };
            if !view.starts_drag(&target) {
                return;
            }
            view.state
                .borrow_mut()
                .begin_drag(event.client_x() as f64, event.client_y() as f64);
            set_style(&view.viewport, "cursor", "grabbing");
        });
        listeners.push(listener);

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.document, "mousemove", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let moved = view
                .state
                .borrow_mut()
                .drag_to(event.client_x() as f64, event.client_y() as f64);
            if moved {
                view.render();
            }
        });
        listeners.push(listener);

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.document, "mouseup", move |_event: &Event| {
            view.state.borrow_mut().end_drag();
            set_style(&view.viewport, "cursor", "");
        });
        listeners.push(listener);

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.viewport, "touchstart", move |event: &Event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            view.state.borrow_mut().touch_start(&touch_points(event));
        });
        listeners.push(listener);

        let view = Rc::clone(self);
        let listener = EventListener::new(&self.viewport, "touchmove", move |event: &Event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            let moved = view.state.borrow_mut().touch_move(&touch_points(event));
            if moved {
                view.render();
            }
        });
        listeners.push(listener);

        for kind in ["touchend", "touchcancel"] {
            let view = Rc::clone(self);
            let listener = EventListener::new(&self.viewport, kind, move |_event: &Event| {
                view.state.borrow_mut().end_drag();
            });
            listeners.push(listener);
        }

        *self.listeners.borrow_mut() = listeners;
    }
}

/// Marks an element as wired. Returns false if it already was.
fn claim_trigger(element: &Element) -> bool {
    if element.has_attribute(MARKER_ATTRIBUTE) {
        return false;
    }
    let _ = element.set_attribute(MARKER_ATTRIBUTE, "true");
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        set_style(element, "cursor", "zoom-in");
    }
    true
}

fn touch_points(event: &TouchEvent) -> Vec<(f64, f64)> {
    let touches = event.touches();
    (0..touches.length())
        .filter_map(|index| touches.get(index))
        .map(|touch| (touch.client_x() as f64, touch.client_y() as f64))
        .collect()
}

pub(crate) fn enlarged_image(
    document: &Document,
    source: &HtmlImageElement,
) -> Result<Element, JsValue> {
    let image = document
        .create_element("img")?
        .dyn_into::<HtmlImageElement>()?;
    image.set_src(&source.src());
    let alt = source.alt();
    if alt.trim().is_empty() {
        image.set_alt(FALLBACK_ALT);
    } else {
        image.set_alt(&alt);
    }
    Ok(image.into())
}

/// Deep-copies a diagram for display. The copy gets a viewBox when it lacks
/// one and loses its fixed size so it scales with the viewport.
pub(crate) fn clone_diagram(source: &Element) -> Result<Element, JsValue> {
    let copy = source.clone_node_with_deep(true)?.dyn_into::<Element>()?;
    let has_view_box = copy
        .get_attribute("viewBox")
        .map(|value| !value.trim().is_empty())
        .unwrap_or(false);
    if !has_view_box {
        let rect = source.get_bounding_client_rect();
        let view_box = ViewBox::from_attributes(
            source.get_attribute("width").as_deref(),
            source.get_attribute("height").as_deref(),
            (rect.width(), rect.height()),
        );
        copy.set_attribute("viewBox", &view_box.to_string())?;
    }
    for name in STRIPPED_DIAGRAM_ATTRIBUTES {
        copy.remove_attribute(name)?;
    }
    Ok(copy)
}
