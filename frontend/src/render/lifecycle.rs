use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use crate::render::particles::SceneSpec;
use crate::utils::capability::DeviceProfile;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    NoWindow,
    NoContext,
    Shader(String),
    Link(String),
    Resource(&'static str),
    Dom(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::NoWindow => write!(f, "no window"),
            SurfaceError::NoContext => write!(f, "WebGL2 is not available"),
            SurfaceError::Shader(log) => write!(f, "shader failed to compile: {}", log),
            SurfaceError::Link(log) => write!(f, "program failed to link: {}", log),
            SurfaceError::Resource(what) => write!(f, "could not allocate {}", what),
            SurfaceError::Dom(message) => write!(f, "DOM error: {}", message),
        }
    }
}

impl std::error::Error for SurfaceError {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

pub trait RenderSurface {
    fn resize(&mut self, size: SurfaceSize, profile: &DeviceProfile);
    /// `elapsed` is seconds since the first frame.
    fn render(&mut self, elapsed: f64);
}

/// Where a section gets its drawing surface, frame clock and resize events.
/// The handles release what they hold when dropped.
pub trait Platform: Clone + 'static {
    type Surface: RenderSurface + 'static;
    type Frames;
    type Listener;

    fn device_profile(&self) -> DeviceProfile;
    fn measure(&self) -> SurfaceSize;
    fn create_surface(&self, scene: &SceneSpec, profile: &DeviceProfile, size: SurfaceSize) -> Result<Self::Surface, SurfaceError>;
    fn start_frames(&self, tick: Box<dyn FnMut(f64)>) -> Result<Self::Frames, SurfaceError>;
    fn on_resize(&self, handler: Box<dyn FnMut()>) -> Result<Self::Listener, SurfaceError>;
}

/// A running scene. Dropping it stops the frame loop first, then the resize
/// listener, then the surface.
pub struct MountedSection<P: Platform> {
    _frames: P::Frames,
    _resize: P::Listener,
    surface: Rc<RefCell<P::Surface>>,
}

impl<P: Platform> MountedSection<P> {
    pub fn mount(platform: &P, scene: &SceneSpec) -> Result<Self, SurfaceError> {
        let profile = platform.device_profile();
        let size = platform.measure();
        let surface = Rc::new(RefCell::new(platform.create_surface(scene, &profile, size)?));

        let frames = {
            let surface = surface.clone();
            let mut first_frame: Option<f64> = None;
            platform.start_frames(Box::new(move |now_ms| {
                let started = *first_frame.get_or_insert(now_ms);
                surface.borrow_mut().render((now_ms - started) / 1000.0);
            }))?
        };

        let resize = {
            let surface = surface.clone();
            let source = platform.clone();
            platform.on_resize(Box::new(move || {
                let profile = source.device_profile();
                surface.borrow_mut().resize(source.measure(), &profile);
            }))?
        };

        Ok(Self {
            _frames: frames,
            _resize: resize,
            surface,
        })
    }

    pub fn surface(&self) -> &Rc<RefCell<P::Surface>> {
        &self.surface
    }
}

#[cfg(test)]
pub(crate) mod counting {
    use super::*;
    use std::cell::Cell;
    use std::rc::Weak;

    #[derive(Default)]
    pub struct Ledger {
        pub live_frames: Cell<usize>,
        pub live_listeners: Cell<usize>,
        pub live_surfaces: Cell<usize>,
        pub renders: Cell<usize>,
        pub resizes: Cell<usize>,
        pub fail_surface: Cell<bool>,
        pub fail_listener: Cell<bool>,
        /// What was alive at the moment each kind of handle was released.
        pub release_log: RefCell<Vec<(&'static str, usize, usize, usize)>>,
        ticks: RefCell<Vec<Weak<RefCell<Box<dyn FnMut(f64)>>>>>,
        resize_handlers: RefCell<Vec<Weak<RefCell<Box<dyn FnMut()>>>>>,
    }

    impl Ledger {
        fn snapshot(&self, what: &'static str) {
            self.release_log.borrow_mut().push((
                what,
                self.live_frames.get(),
                self.live_listeners.get(),
                self.live_surfaces.get(),
            ));
        }

        pub fn fire_frame(&self, now_ms: f64) {
            let ticks: Vec<_> = self.ticks.borrow().iter().filter_map(Weak::upgrade).collect();
            for tick in ticks {
                (tick.borrow_mut())(now_ms);
            }
        }

        pub fn fire_resize(&self) {
            let handlers: Vec<_> = self.resize_handlers.borrow().iter().filter_map(Weak::upgrade).collect();
            for handler in handlers {
                (handler.borrow_mut())();
            }
        }

        pub fn live_total(&self) -> usize {
            self.live_frames.get() + self.live_listeners.get() + self.live_surfaces.get()
        }
    }

    #[derive(Clone, Default)]
    pub struct CountingPlatform {
        pub ledger: Rc<Ledger>,
        pub profile: Option<DeviceProfile>,
    }

    pub struct CountingSurface {
        ledger: Rc<Ledger>,
        pub particle_count: usize,
        pub last_size: SurfaceSize,
    }

    impl RenderSurface for CountingSurface {
        fn resize(&mut self, size: SurfaceSize, _profile: &DeviceProfile) {
            self.last_size = size;
            self.ledger.resizes.set(self.ledger.resizes.get() + 1);
        }

        fn render(&mut self, _elapsed: f64) {
            self.ledger.renders.set(self.ledger.renders.get() + 1);
        }
    }

    impl Drop for CountingSurface {
        fn drop(&mut self) {
            self.ledger.snapshot("surface");
            self.ledger.live_surfaces.set(self.ledger.live_surfaces.get() - 1);
        }
    }

    pub struct CountingFrames {
        ledger: Rc<Ledger>,
        _tick: Rc<RefCell<Box<dyn FnMut(f64)>>>,
    }

    impl Drop for CountingFrames {
        fn drop(&mut self) {
            self.ledger.snapshot("frames");
            self.ledger.live_frames.set(self.ledger.live_frames.get() - 1);
        }
    }

    pub struct CountingListener {
        ledger: Rc<Ledger>,
        _handler: Rc<RefCell<Box<dyn FnMut()>>>,
    }

    impl Drop for CountingListener {
        fn drop(&mut self) {
            self.ledger.snapshot("listener");
            self.ledger.live_listeners.set(self.ledger.live_listeners.get() - 1);
        }
    }

    impl Platform for CountingPlatform {
        type Surface = CountingSurface;
        type Frames = CountingFrames;
        type Listener = CountingListener;

        fn device_profile(&self) -> DeviceProfile {
            self.profile.unwrap_or_else(|| DeviceProfile::from_viewport(1280.0, 2.0))
        }

        fn measure(&self) -> SurfaceSize {
            SurfaceSize { width: 1280.0, height: 720.0 }
        }

        fn create_surface(&self, scene: &SceneSpec, profile: &DeviceProfile, size: SurfaceSize) -> Result<Self::Surface, SurfaceError> {
            if self.ledger.fail_surface.get() {
                return Err(SurfaceError::NoContext);
            }
            self.ledger.live_surfaces.set(self.ledger.live_surfaces.get() + 1);
            Ok(CountingSurface {
                ledger: self.ledger.clone(),
                particle_count: scene.particle_count(profile),
                last_size: size,
            })
        }

        fn start_frames(&self, tick: Box<dyn FnMut(f64)>) -> Result<Self::Frames, SurfaceError> {
            let tick = Rc::new(RefCell::new(tick));
            self.ledger.ticks.borrow_mut().push(Rc::downgrade(&tick));
            self.ledger.live_frames.set(self.ledger.live_frames.get() + 1);
            Ok(CountingFrames {
                ledger: self.ledger.clone(),
                _tick: tick,
            })
        }

        fn on_resize(&self, handler: Box<dyn FnMut()>) -> Result<Self::Listener, SurfaceError> {
            if self.ledger.fail_listener.get() {
                return Err(SurfaceError::Dom("listener refused".to_string()));
            }
            let handler = Rc::new(RefCell::new(handler));
            self.ledger.resize_handlers.borrow_mut().push(Rc::downgrade(&handler));
            self.ledger.live_listeners.set(self.ledger.live_listeners.get() + 1);
            Ok(CountingListener {
                ledger: self.ledger.clone(),
                _handler: handler,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::counting::CountingPlatform;
    use super::*;

    #[test]
    fn mount_then_teardown_releases_everything() {
        let platform = CountingPlatform::default();
        let section = MountedSection::mount(&platform, &SceneSpec::gallery()).unwrap();
        assert_eq!(platform.ledger.live_frames.get(), 1);
        assert_eq!(platform.ledger.live_listeners.get(), 1);
        assert_eq!(platform.ledger.live_surfaces.get(), 1);

        platform.ledger.fire_frame(16.0);
        platform.ledger.fire_frame(32.0);
        assert_eq!(platform.ledger.renders.get(), 2);

        drop(section);
        assert_eq!(platform.ledger.live_total(), 0);

        platform.ledger.fire_frame(48.0);
        platform.ledger.fire_resize();
        assert_eq!(platform.ledger.renders.get(), 2);
        assert_eq!(platform.ledger.resizes.get(), 0);
    }

    #[test]
    fn teardown_stops_frames_before_releasing_the_surface() {
        let platform = CountingPlatform::default();
        drop(MountedSection::mount(&platform, &SceneSpec::services()).unwrap());

        let log = platform.ledger.release_log.borrow();
        let order: Vec<_> = log.iter().map(|(what, ..)| *what).collect();
        assert_eq!(order, ["frames", "listener", "surface"]);
        // When the surface went away no frame loop or listener was alive.
        assert_eq!(log[2], ("surface", 0, 0, 1));
    }

    #[test]
    fn repeated_mount_cycles_do_not_accumulate() {
        let platform = CountingPlatform::default();
        for _ in 0..25 {
            let section = MountedSection::mount(&platform, &SceneSpec::footer()).unwrap();
            platform.ledger.fire_frame(1.0);
            drop(section);
        }
        assert_eq!(platform.ledger.live_total(), 0);
        assert_eq!(platform.ledger.renders.get(), 25);
    }

    #[test]
    fn failed_acquisition_releases_what_was_already_acquired() {
        let platform = CountingPlatform::default();
        platform.ledger.fail_listener.set(true);
        let result = MountedSection::mount(&platform, &SceneSpec::location());
        assert!(result.is_err());
        assert_eq!(platform.ledger.live_total(), 0);

        platform.ledger.fail_listener.set(false);
        platform.ledger.fail_surface.set(true);
        assert_eq!(
            MountedSection::mount(&platform, &SceneSpec::gallery()).err(),
            Some(SurfaceError::NoContext)
        );
        assert_eq!(platform.ledger.live_total(), 0);
    }

    #[test]
    fn constrained_profile_selects_reduced_counts() {
        let platform = CountingPlatform {
            profile: Some(DeviceProfile::from_viewport(375.0, 3.0)),
            ..Default::default()
        };
        let section = MountedSection::mount(&platform, &SceneSpec::gallery()).unwrap();
        assert_eq!(section.surface().borrow().particle_count, 400);
    }

    #[test]
    fn resize_reaches_the_surface_while_mounted() {
        let platform = CountingPlatform::default();
        let section = MountedSection::mount(&platform, &SceneSpec::location()).unwrap();
        platform.ledger.fire_resize();
        assert_eq!(platform.ledger.resizes.get(), 1);
        assert_eq!(section.surface().borrow().last_size.width, 1280.0);
    }
}
