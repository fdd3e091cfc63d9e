use crate::config::WIDE_BREAKPOINT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Full,
    Constrained,
}

/// What the current device can afford to render. Read once when a scene
/// mounts and again only on an explicit resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceProfile {
    pub class: DeviceClass,
    pub viewport_width: f64,
    pub device_pixel_ratio: f64,
}

impl DeviceProfile {
    pub fn from_viewport(viewport_width: f64, device_pixel_ratio: f64) -> Self {
        let class = if viewport_width < WIDE_BREAKPOINT {
            DeviceClass::Constrained
        } else {
            DeviceClass::Full
        };
        Self {
            class,
            viewport_width,
            device_pixel_ratio: if device_pixel_ratio > 0.0 { device_pixel_ratio } else { 1.0 },
        }
    }

    pub fn detect() -> Self {
        match web_sys::window() {
            Some(window) => {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|w| w.as_f64())
                    .unwrap_or(WIDE_BREAKPOINT);
                Self::from_viewport(width, window.device_pixel_ratio())
            }
            None => Self::from_viewport(WIDE_BREAKPOINT, 1.0),
        }
    }

    pub fn is_constrained(&self) -> bool {
        self.class == DeviceClass::Constrained
    }

    pub fn is_wide(&self) -> bool {
        self.viewport_width >= WIDE_BREAKPOINT
    }

    /// Constrained devices render at 1x, everything else is capped at 2x.
    pub fn pixel_ratio(&self) -> f64 {
        let cap = if self.is_constrained() { 1.0 } else { 2.0 };
        self.device_pixel_ratio.min(cap)
    }

    pub fn antialias(&self) -> bool {
        !self.is_constrained()
    }

    pub fn pick<T>(&self, full: T, constrained: T) -> T {
        match self.class {
            DeviceClass::Full => full,
            DeviceClass::Constrained => constrained,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_viewport_is_constrained() {
        let phone = DeviceProfile::from_viewport(390.0, 3.0);
        assert!(phone.is_constrained());
        assert_eq!(phone.pixel_ratio(), 1.0);
        assert!(!phone.antialias());
        assert_eq!(phone.pick(1000, 400), 400);
    }

    #[test]
    fn wide_viewport_caps_pixel_ratio_at_two() {
        let desktop = DeviceProfile::from_viewport(1440.0, 3.0);
        assert_eq!(desktop.class, DeviceClass::Full);
        assert_eq!(desktop.pixel_ratio(), 2.0);
        assert!(desktop.antialias());
        assert_eq!(DeviceProfile::from_viewport(1440.0, 1.5).pixel_ratio(), 1.5);
    }

    #[test]
    fn breakpoint_itself_is_wide() {
        assert_eq!(DeviceProfile::from_viewport(768.0, 1.0).class, DeviceClass::Full);
        assert_eq!(DeviceProfile::from_viewport(767.0, 1.0).class, DeviceClass::Constrained);
    }
}
