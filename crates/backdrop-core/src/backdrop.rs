//! Mount/unmount controller for the animated backdrop.
//!
//! [`Backdrop`] is the single owner of the scene, camera, drawing surface,
//! event subscriptions and loop handle. Platform code implements [`Host`] and
//! [`Surface`] and forwards events into the controller; it never touches the
//! scene directly.

use crate::camera::{Camera, Viewport};
use crate::error::BackdropError;
use crate::lifecycle::{LoopHandle, LoopToken};
use crate::scene::{Scene, SceneParams};
use fnv::FnvHashMap;
use glam::Vec2;
use rand::Rng;
use std::time::Duration;

/// Host events the backdrop subscribes to while mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    PointerMove,
    Resize,
}

impl HostEvent {
    pub const ALL: [HostEvent; 2] = [HostEvent::PointerMove, HostEvent::Resize];

    /// DOM event type name.
    pub fn dom_name(self) -> &'static str {
        match self {
            HostEvent::PointerMove => "pointermove",
            HostEvent::Resize => "resize",
        }
    }
}

/// A drawing surface attached behind the page content.
pub trait Surface {
    fn resize(&mut self, viewport: Viewport);

    /// Current backing size in device pixels.
    fn size(&self) -> (u32, u32);

    fn draw(&mut self, scene: &mut Scene, camera: &Camera) -> Result<(), BackdropError>;

    /// Detach from the page and free GPU resources. Must tolerate repeat calls.
    fn release(&mut self);
}

/// Platform services the controller needs at mount and unmount.
pub trait Host {
    type Target: ?Sized;
    type Surface: Surface;
    type Listener;

    fn viewport(&self) -> Viewport;

    /// Wall-clock seconds; seeds the scene clock.
    fn clock_sec(&self) -> f64;

    fn create_surface(
        &mut self,
        target: &Self::Target,
        viewport: Viewport,
    ) -> Result<Self::Surface, BackdropError>;

    fn listen(&mut self, event: HostEvent) -> Self::Listener;

    fn unlisten(&mut self, event: HostEvent, listener: Self::Listener);
}

pub struct Backdrop<H: Host> {
    scene: Scene,
    camera: Camera,
    viewport: Viewport,
    pointer_ndc: Option<Vec2>,
    surface: Option<H::Surface>,
    listeners: FnvHashMap<HostEvent, H::Listener>,
    frame_loop: LoopHandle,
}

impl<H: Host> Backdrop<H> {
    /// Mount with the stock scene. A missing target is a silent no-op.
    pub fn mount<R: Rng + ?Sized>(
        host: &mut H,
        target: Option<&H::Target>,
        rng: &mut R,
    ) -> Option<Self> {
        Self::mount_with(host, target, SceneParams::default(), rng)
    }

    pub fn mount_with<R: Rng + ?Sized>(
        host: &mut H,
        target: Option<&H::Target>,
        params: SceneParams,
        rng: &mut R,
    ) -> Option<Self> {
        let Some(target) = target else {
            log::debug!("[backdrop] mount target absent; skipping");
            return None;
        };

        let viewport = host.viewport();
        let surface = match host.create_surface(target, viewport) {
            Ok(s) => s,
            Err(e) => {
                log::error!("[backdrop] {e}");
                return None;
            }
        };

        let scene = Scene::build(params, rng, host.clock_sec());
        let camera = Camera::backdrop(&viewport);

        let mut listeners = FnvHashMap::default();
        for event in HostEvent::ALL {
            let listener = host.listen(event);
            if let Some(stale) = listeners.insert(event, listener) {
                host.unlisten(event, stale);
            }
        }

        log::info!(
            "[backdrop] mounted {}x{} @{:.2} stars={} nebulae={}",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            scene.stars().len(),
            scene.nebulae().len()
        );

        Some(Self {
            scene,
            camera,
            viewport,
            pointer_ndc: None,
            surface: Some(surface),
            listeners,
            frame_loop: LoopHandle::new(),
        })
    }

    /// Advance and draw one frame. Returns `false` once torn down; the caller stops scheduling.
    pub fn frame(&mut self, dt: Duration) -> bool {
        if !self.frame_loop.is_active() {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        self.scene.advance(dt);
        if let Err(e) = surface.draw(&mut self.scene, &self.camera) {
            log::error!("[backdrop] {e}");
        }
        true
    }

    /// Ripple stars under the pointer. Returns the number of stars displaced.
    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32) -> usize {
        if !self.is_mounted() {
            return 0;
        }
        let ndc = self.viewport.client_to_ndc(client_x, client_y);
        self.pointer_ndc = Some(ndc);
        let ray = self.camera.ray_from_ndc(ndc);
        self.scene.apply_ripple(&ray)
    }

    pub fn resized(&mut self, viewport: Viewport) {
        if !self.is_mounted() {
            return;
        }
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport);
        }
        log::debug!(
            "[backdrop] resized {}x{} aspect={:.3}",
            viewport.width,
            viewport.height,
            self.camera.aspect
        );
    }

    /// Stop the loop, drop listeners and release the surface. Safe to call more than once.
    pub fn unmount(&mut self, host: &mut H) {
        let stopped = self.frame_loop.cancel();
        for (event, listener) in self.listeners.drain() {
            host.unlisten(event, listener);
        }
        if let Some(mut surface) = self.surface.take() {
            surface.release();
        }
        if stopped {
            log::info!("[backdrop] unmounted");
        }
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.frame_loop.is_active()
    }

    pub fn loop_token(&self) -> LoopToken {
        self.frame_loop.token()
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn pointer_ndc(&self) -> Option<Vec2> {
        self.pointer_ndc
    }

    #[inline]
    pub fn surface(&self) -> Option<&H::Surface> {
        self.surface.as_ref()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
