use std::f32::consts::PI;
use crate::config::{SHOP_LATITUDE, SHOP_LONGITUDE};
use crate::utils::capability::DeviceProfile;

#[derive(Clone, Debug, PartialEq)]
pub enum SceneShape {
    /// Particles scattered through a box and drifting down through it.
    Snow { extent: [f32; 3] },
    /// Points on a sphere with one highlighted marker and an optional star field.
    Globe {
        radius: f32,
        marker: (f32, f32),
        stars: usize,
        star_extent: f32,
    },
}

/// Everything needed to build one particle scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSpec {
    pub shape: SceneShape,
    pub full_count: usize,
    pub constrained_count: usize,
    pub point_size: f32,
    pub fall_base: f32,
    pub fall_range: f32,
    /// Radians per second around the vertical axis.
    pub spin: f32,
    pub initial_yaw: f32,
    pub tilt: f32,
    pub camera_z: f32,
    pub fov_degrees: f32,
    pub fog_density: f32,
    pub color: [f32; 3],
    /// Horizontal shift applied on wide viewports.
    pub wide_offset_x: f32,
}

const SNOW_EXTENT: [f32; 3] = [300.0, 250.0, 200.0];
const WARM_WHITE: [f32; 3] = [1.0, 0.96, 0.88];
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

impl SceneSpec {
    pub fn gallery() -> Self {
        Self {
            shape: SceneShape::Snow { extent: SNOW_EXTENT },
            full_count: 1000,
            constrained_count: 400,
            point_size: 8.0,
            fall_base: 8.0,
            fall_range: 12.0,
            spin: 0.03,
            initial_yaw: 0.0,
            tilt: 0.0,
            camera_z: 30.0,
            fov_degrees: 75.0,
            fog_density: 0.002,
            color: WARM_WHITE,
            wide_offset_x: 0.0,
        }
    }

    pub fn services() -> Self {
        Self {
            full_count: 2000,
            constrained_count: 400,
            point_size: 6.0,
            fall_base: 15.0,
            fall_range: 15.0,
            spin: 0.01,
            camera_z: 60.0,
            color: WHITE,
            ..Self::gallery()
        }
    }

    /// The services snowfall with fewer flakes.
    pub fn footer() -> Self {
        Self {
            full_count: 1000,
            constrained_count: 300,
            ..Self::services()
        }
    }

    pub fn location() -> Self {
        Self {
            shape: SceneShape::Globe {
                radius: 8.5,
                marker: (SHOP_LATITUDE, SHOP_LONGITUDE),
                stars: 2000,
                star_extent: 50.0,
            },
            full_count: 2400,
            constrained_count: 900,
            point_size: 3.0,
            fall_base: 0.0,
            fall_range: 0.0,
            spin: 0.18,
            initial_yaw: -1.5,
            tilt: 0.3,
            camera_z: 30.0,
            fov_degrees: 45.0,
            fog_density: 0.0,
            color: [0.83, 0.69, 0.22],
            wide_offset_x: 6.0,
        }
    }

    pub fn particle_count(&self, profile: &DeviceProfile) -> usize {
        profile.pick(self.full_count, self.constrained_count)
    }

    /// Stars only render on the full profile.
    pub fn star_count(&self, profile: &DeviceProfile) -> usize {
        match self.shape {
            SceneShape::Globe { stars, .. } => profile.pick(stars, 0),
            SceneShape::Snow { .. } => 0,
        }
    }

    pub fn offset_x(&self, profile: &DeviceProfile) -> f32 {
        if profile.is_wide() {
            self.wide_offset_x
        } else {
            0.0
        }
    }

    pub fn fall_height(&self) -> f32 {
        match self.shape {
            SceneShape::Snow { extent } => extent[1],
            SceneShape::Globe { .. } => 0.0,
        }
    }
}

/// Per-vertex attributes, flattened for upload.
/// `kinds` is 0 for ordinary particles, 1 for the marker and 2 for stars.
#[derive(Debug, Default)]
pub struct ParticleBuffers {
    pub positions: Vec<f32>,
    pub scales: Vec<f32>,
    pub randomness: Vec<f32>,
    pub kinds: Vec<f32>,
}

impl ParticleBuffers {
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    fn push(&mut self, position: [f32; 3], scale: f32, random: f32, kind: f32) {
        self.positions.extend_from_slice(&position);
        self.scales.push(scale);
        self.randomness.push(random);
        self.kinds.push(kind);
    }

    /// `rng` yields values in [0, 1).
    pub fn generate(scene: &SceneSpec, profile: &DeviceProfile, rng: &mut dyn FnMut() -> f32) -> Self {
        let count = scene.particle_count(profile);
        let mut buffers = Self::default();
        match scene.shape {
            SceneShape::Snow { extent } => {
                for _ in 0..count {
                    let position = [
                        (rng() - 0.5) * extent[0],
                        (rng() - 0.5) * extent[1],
                        (rng() - 0.5) * extent[2],
                    ];
                    let scale = 0.5 + rng() * 1.5;
                    buffers.push(position, scale, rng(), 0.0);
                }
            }
            SceneShape::Globe { radius, marker, star_extent, .. } => {
                for i in 0..count {
                    buffers.push(fibonacci_point(i, count, radius), 0.6 + rng() * 0.6, rng(), 0.0);
                }
                buffers.push(lat_lon_to_point(marker.0, marker.1, radius * 1.02), 3.0, 0.0, 1.0);
                for _ in 0..scene.star_count(profile) {
                    let position = [
                        (rng() - 0.5) * 2.0 * star_extent,
                        (rng() - 0.5) * 2.0 * star_extent,
                        (rng() - 0.5) * 2.0 * star_extent,
                    ];
                    buffers.push(position, 0.4 + rng() * 0.4, rng(), 2.0);
                }
            }
        }
        buffers
    }
}

fn fibonacci_point(i: usize, count: usize, radius: f32) -> [f32; 3] {
    let golden = PI * (3.0 - 5f32.sqrt());
    let y = 1.0 - (i as f32 + 0.5) / count as f32 * 2.0;
    let ring = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden * i as f32;
    [theta.cos() * ring * radius, y * radius, theta.sin() * ring * radius]
}

pub fn lat_lon_to_point(latitude: f32, longitude: f32, radius: f32) -> [f32; 3] {
    let lat = latitude.to_radians();
    let lon = (-longitude).to_radians();
    [lat.cos() * lon.cos() * radius, lat.sin() * radius, lat.cos() * lon.sin() * radius]
}

/// Small deterministic generator so scenes need no extra entropy source.
pub struct XorShift(u32);

impl XorShift {
    pub fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    pub fn next_unit(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x >> 8) as f32 / (1u32 << 24) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> DeviceProfile {
        DeviceProfile::from_viewport(1440.0, 2.0)
    }

    fn constrained() -> DeviceProfile {
        DeviceProfile::from_viewport(390.0, 3.0)
    }

    #[test]
    fn presets_choose_counts_by_profile() {
        assert_eq!(SceneSpec::gallery().particle_count(&full()), 1000);
        assert_eq!(SceneSpec::gallery().particle_count(&constrained()), 400);
        assert_eq!(SceneSpec::services().particle_count(&full()), 2000);
        assert_eq!(SceneSpec::footer().particle_count(&constrained()), 300);
        assert_eq!(SceneSpec::location().particle_count(&constrained()), 900);
    }

    #[test]
    fn footer_snow_falls_like_services_snow() {
        let footer = SceneSpec::footer();
        let services = SceneSpec::services();
        assert_eq!((footer.fall_base, footer.fall_range), (15.0, 15.0));
        assert_eq!(footer.fall_base, services.fall_base);
        assert_eq!(footer.color, WHITE);
        assert_eq!(footer.particle_count(&full()), 1000);
        assert_eq!(footer.particle_count(&constrained()), 300);
    }

    #[test]
    fn snow_stays_inside_its_box() {
        let scene = SceneSpec::gallery();
        let mut rng = XorShift::new(7);
        let buffers = ParticleBuffers::generate(&scene, &full(), &mut || rng.next_unit());
        assert_eq!(buffers.len(), 1000);
        assert_eq!(buffers.positions.len(), 3000);
        for point in buffers.positions.chunks(3) {
            assert!(point[0].abs() <= 150.0 && point[1].abs() <= 125.0 && point[2].abs() <= 100.0);
        }
        assert!(buffers.scales.iter().all(|s| (0.5..2.0).contains(s)));
    }

    #[test]
    fn globe_has_marker_and_stars_only_on_full_profile() {
        let scene = SceneSpec::location();
        let mut rng = XorShift::new(11);
        let wide = ParticleBuffers::generate(&scene, &full(), &mut || rng.next_unit());
        assert_eq!(wide.len(), 2400 + 1 + 2000);
        assert_eq!(wide.kinds.iter().filter(|k| **k == 1.0).count(), 1);

        let narrow = ParticleBuffers::generate(&scene, &constrained(), &mut || rng.next_unit());
        assert_eq!(narrow.len(), 900 + 1);
        assert!(narrow.kinds.iter().all(|k| *k != 2.0));
    }

    #[test]
    fn globe_points_lie_on_the_sphere() {
        let scene = SceneSpec::location();
        let buffers = ParticleBuffers::generate(&scene, &constrained(), &mut || 0.5);
        for point in buffers.positions.chunks(3).take(900) {
            let r = (point[0] * point[0] + point[1] * point[1] + point[2] * point[2]).sqrt();
            assert!((r - 8.5).abs() < 1e-3);
        }
    }

    #[test]
    fn marker_sits_in_the_northern_hemisphere() {
        let [_, y, _] = lat_lon_to_point(SHOP_LATITUDE, SHOP_LONGITUDE, 10.0);
        assert!((y - 10.0 * SHOP_LATITUDE.to_radians().sin()).abs() < 1e-4);
        assert!(y > 0.0);
    }

    #[test]
    fn globe_shifts_only_on_wide_viewports() {
        let scene = SceneSpec::location();
        assert_eq!(scene.offset_x(&full()), 6.0);
        assert_eq!(scene.offset_x(&constrained()), 0.0);
    }

    #[test]
    fn xorshift_stays_in_unit_range() {
        let mut rng = XorShift::new(0);
        assert!((0..10_000).map(|_| rng.next_unit()).all(|v| (0.0..1.0).contains(&v)));
    }
}
