use ripple_core::{FrameInputs, GridSize};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::input;

/// Routes pointer and resize events into the shared frame inputs. Handlers
/// only record state; the frame loop consumes it.
pub fn wire_input_handlers(canvas: &web::HtmlCanvasElement, inputs: Rc<RefCell<FrameInputs>>) {
    wire_pointermove(canvas, inputs.clone());
    wire_pointerleave(canvas, inputs.clone());
    wire_resize(canvas, inputs);
}

fn wire_pointermove(canvas: &web::HtmlCanvasElement, inputs: Rc<RefCell<FrameInputs>>) {
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = dom::canvas_rect(&canvas);
        let mut inputs = inputs.borrow_mut();
        match input::client_to_device_px(&rect, ev.client_x() as f32, ev.client_y() as f32) {
            Some([x, y]) => inputs.on_pointer_move(x, y),
            None => inputs.on_pointer_leave(),
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerleave(canvas: &web::HtmlCanvasElement, inputs: Rc<RefCell<FrameInputs>>) {
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        inputs.borrow_mut().on_pointer_leave();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_resize(canvas: &web::HtmlCanvasElement, inputs: Rc<RefCell<FrameInputs>>) {
    let canvas = canvas.clone();
    let mut last = GridSize::new(canvas.width(), canvas.height());
    let closure = Closure::wrap(Box::new(move || {
        let size = dom::sync_canvas_backing_size(&canvas);
        if size == last {
            return;
        }
        log::debug!("[resize] canvas backing store {} -> {}", last, size);
        last = size;
        inputs.borrow_mut().on_resize(size.width, size.height);
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
