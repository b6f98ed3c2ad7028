#![cfg(target_arch = "wasm32")]
use ripple_core::{FrameDriver, FrameInputs, RippleConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod background;
mod constants;
mod dom;
mod events;
mod fallback;
mod frame;
mod input;
mod render;

use background::CaptionBackground;
use frame::{Backend, FrameContext, FrameStats};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ripple-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document)?;

    // Maintain canvas internal pixel size to match CSS size * capped devicePixelRatio
    let size = dom::sync_canvas_backing_size(&canvas);

    let config = RippleConfig::default();
    config.validate()?;
    let caption = CaptionBackground::new(&document, config.caption.clone())?;

    let inputs = Rc::new(RefCell::new(FrameInputs::default()));
    events::wire_input_handlers(&canvas, inputs.clone());

    let background = caption.rasterize_or_fill(size);
    let backend = match render::GpuState::new(&canvas, config.clone(), &background).await {
        Ok(state) => Backend::Gpu { state, caption },
        Err(e) => {
            log::warn!("[gpu] WebGPU unavailable ({:?}); using CPU fallback", e);
            let presenter = fallback::CanvasPresenter::new(&canvas)?;
            Backend::Cpu {
                driver: FrameDriver::new(size, caption, config),
                presenter,
            }
        }
    };
    log::info!("[frame] starting loop at {}", size);

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        inputs,
        backend,
        stats: FrameStats::default(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
