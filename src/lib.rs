#![cfg(target_arch = "wasm32")]
use backdrop_core::Backdrop;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

mod constants;
mod dom;
mod events;
mod frame;
mod host;
mod render;
mod surface;

use constants::MOUNT_ELEMENT_ID;
use frame::FrameLoop;
use host::WebHost;

/// Everything alive while the backdrop is on the page.
pub(crate) struct Mounted {
    pub(crate) host: WebHost,
    pub(crate) backdrop: Backdrop<WebHost>,
    frame_loop: FrameLoop,
}

pub(crate) type Slot = Rc<RefCell<Option<Mounted>>>;
pub(crate) type WeakSlot = Weak<RefCell<Option<Mounted>>>;

thread_local! {
    static CURRENT: Slot = Rc::new(RefCell::new(None));
}

/// Run `f` against the live mount. `None` once unmounted or while the slot is busy.
pub(crate) fn with_mounted<R>(slot: &WeakSlot, f: impl FnOnce(&mut Mounted) -> R) -> Option<R> {
    backdrop_core::with_slot(slot, f).ran()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cosmic-backdrop starting");
    mount_backdrop();
    Ok(())
}

#[wasm_bindgen]
pub fn mount_backdrop() {
    CURRENT.with(|slot| {
        match slot.try_borrow() {
            Ok(current) if current.is_none() => {}
            _ => {
                log::warn!("[backdrop] already mounted");
                return;
            }
        }
        let Some((window, document)) = dom::window_document() else {
            log::warn!("[backdrop] no window/document");
            return;
        };
        let target = document.get_element_by_id(MOUNT_ELEMENT_ID);
        let mut host = WebHost::new(window.clone(), document, Rc::downgrade(slot));
        let mut rng = StdRng::from_entropy();
        let Some(backdrop) = Backdrop::mount(&mut host, target.as_ref(), &mut rng) else {
            return;
        };
        let frame_loop = FrameLoop::start(window, backdrop.loop_token(), Rc::downgrade(slot));
        let mut mounted = Mounted {
            host,
            backdrop,
            frame_loop,
        };
        match slot.try_borrow_mut() {
            Ok(mut current) => *current = Some(mounted),
            Err(_) => {
                mounted.frame_loop.stop();
                mounted.backdrop.unmount(&mut mounted.host);
            }
        }
    });
}

#[wasm_bindgen]
pub fn unmount_backdrop() {
    CURRENT.with(|slot| {
        let taken = match slot.try_borrow_mut() {
            Ok(mut current) => current.take(),
            Err(_) => {
                log::warn!("[backdrop] unmount while busy; ignored");
                None
            }
        };
        if let Some(Mounted {
            mut host,
            mut backdrop,
            mut frame_loop,
        }) = taken
        {
            frame_loop.stop();
            backdrop.unmount(&mut host);
        }
    });
}
