use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{
    HtmlCanvasElement, HtmlElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};
use crate::render::lifecycle::{Platform, RenderSurface, SurfaceError, SurfaceSize};
use crate::render::particles::{ParticleBuffers, SceneSpec, XorShift};
use crate::utils::capability::DeviceProfile;
use crate::utils::subscription::{EventSubscription, FrameLoop};

const VERTEX_SHADER: &str = r#"#version 300 es
in vec3 aPosition;
in float aScale;
in float aRandom;
in float aKind;

uniform float uTime;
uniform float uSize;
uniform float uAspect;
uniform float uFocal;
uniform float uCameraZ;
uniform float uSpin;
uniform float uYaw;
uniform float uTilt;
uniform float uFallBase;
uniform float uFallRange;
uniform float uHeight;
uniform float uOffsetX;
uniform float uFog;

out float vAlpha;
out float vKind;

const float NEAR = 0.1;
const float FAR = 1000.0;

void main() {
    vec3 pos = aPosition;
    if (uFallBase > 0.0) {
        float speed = uFallBase + aRandom * uFallRange;
        pos.y = mod(pos.y - uTime * speed + aRandom * 100.0, uHeight) - uHeight * 0.5;
        pos.x += sin(uTime * 0.5 + aRandom * 10.0) * (2.0 + aRandom * 2.0);
        pos.z += cos(uTime * 0.3 + aRandom * 20.0) * (1.0 + aRandom * 2.0);
    }

    if (aKind < 1.5) {
        float a = uYaw + uTime * uSpin;
        pos = vec3(cos(a) * pos.x + sin(a) * pos.z, pos.y, -sin(a) * pos.x + cos(a) * pos.z);
        float t = uTilt;
        pos = vec3(pos.x, cos(t) * pos.y - sin(t) * pos.z, sin(t) * pos.y + cos(t) * pos.z);
    }
    pos.x += uOffsetX;

    float zv = pos.z - uCameraZ;
    float depth = -zv;
    gl_Position = vec4(
        pos.x * uFocal / uAspect,
        pos.y * uFocal,
        (FAR + NEAR) / (NEAR - FAR) * zv + 2.0 * FAR * NEAR / (NEAR - FAR),
        depth
    );
    gl_PointSize = max(uSize * aScale * (30.0 / max(depth, 0.1)), 1.0);

    float alpha = 0.35 + 0.65 * aRandom;
    if (uFallBase > 0.0) {
        alpha *= 1.0 - smoothstep(0.4, 0.5, abs(pos.y) / uHeight);
    }
    if (aKind > 0.5 && aKind < 1.5) {
        alpha = 1.0;
    }
    vAlpha = alpha * exp(-uFog * uFog * depth * depth);
    vKind = aKind;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
in float vAlpha;
in float vKind;
uniform vec3 uColor;
out vec4 outColor;

void main() {
    vec2 c = gl_PointCoord - vec2(0.5);
    float d = length(c);
    if (d > 0.5) discard;
    float soft = 1.0 - smoothstep(0.2, 0.5, d);
    vec3 color = uColor;
    if (vKind > 1.5) color = vec3(0.85, 0.88, 1.0);
    if (vKind > 0.5 && vKind < 1.5) color = vec3(1.0, 0.84, 0.35);
    outColor = vec4(color, vAlpha * soft);
}
"#;

struct Uniforms {
    time: Option<WebGlUniformLocation>,
    size: Option<WebGlUniformLocation>,
    aspect: Option<WebGlUniformLocation>,
    offset_x: Option<WebGlUniformLocation>,
}

/// A WebGL2 point cloud drawn into a canvas it creates inside the section's
/// container. Dropping it frees the GPU objects, loses the context and
/// detaches the canvas.
pub struct ParticleSurface {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    buffers: Vec<WebGlBuffer>,
    uniforms: Uniforms,
    scene: SceneSpec,
    vertex_count: i32,
}

fn dom(e: JsValue) -> SurfaceError {
    SurfaceError::Dom(format!("{:?}", e))
}

fn compile(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, SurfaceError> {
    let shader = gl.create_shader(kind).ok_or(SurfaceError::Resource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl.get_shader_parameter(&shader, GL::COMPILE_STATUS).as_bool().unwrap_or(false) {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(SurfaceError::Shader(log))
    }
}

fn link(gl: &GL) -> Result<WebGlProgram, SurfaceError> {
    let vertex = compile(gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
    let fragment = match compile(gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER) {
        Ok(fragment) => fragment,
        Err(e) => {
            gl.delete_shader(Some(&vertex));
            return Err(e);
        }
    };
    let program = gl.create_program().ok_or(SurfaceError::Resource("program"))?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));

    if gl.get_program_parameter(&program, GL::LINK_STATUS).as_bool().unwrap_or(false) {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(SurfaceError::Link(log))
    }
}

impl ParticleSurface {
    pub fn new(container: &HtmlElement, scene: &SceneSpec, profile: &DeviceProfile, size: SurfaceSize) -> Result<Self, SurfaceError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(SurfaceError::NoWindow)?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(dom)?
            .dyn_into()
            .map_err(|_| SurfaceError::Dom("not a canvas".to_string()))?;
        canvas.set_class_name("particle-canvas");

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::TRUE).map_err(dom)?;
        js_sys::Reflect::set(&options, &"antialias".into(), &JsValue::from_bool(profile.antialias())).map_err(dom)?;
        js_sys::Reflect::set(&options, &"powerPreference".into(), &"high-performance".into()).map_err(dom)?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)
            .map_err(dom)?
            .ok_or(SurfaceError::NoContext)?
            .dyn_into()
            .map_err(|_| SurfaceError::NoContext)?;

        let program = link(&gl)?;
        let vao = gl.create_vertex_array().ok_or(SurfaceError::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u32;
        let mut rng = XorShift::new(seed);
        let data = ParticleBuffers::generate(scene, profile, &mut || rng.next_unit());

        let mut surface = Self {
            uniforms: Uniforms {
                time: gl.get_uniform_location(&program, "uTime"),
                size: gl.get_uniform_location(&program, "uSize"),
                aspect: gl.get_uniform_location(&program, "uAspect"),
                offset_x: gl.get_uniform_location(&program, "uOffsetX"),
            },
            canvas,
            gl,
            program,
            vao,
            buffers: Vec::with_capacity(4),
            scene: scene.clone(),
            vertex_count: data.len() as i32,
        };
        surface.upload("aPosition", &data.positions, 3)?;
        surface.upload("aScale", &data.scales, 1)?;
        surface.upload("aRandom", &data.randomness, 1)?;
        surface.upload("aKind", &data.kinds, 1)?;
        surface.set_static_uniforms();

        container.append_child(&surface.canvas).map_err(dom)?;
        surface.resize(size, profile);
        log::debug!("Particle surface ready with {} points", surface.vertex_count);
        Ok(surface)
    }

    fn upload(&mut self, name: &str, data: &[f32], components: i32) -> Result<(), SurfaceError> {
        let gl = &self.gl;
        let buffer = gl.create_buffer().ok_or(SurfaceError::Resource("buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let array = js_sys::Float32Array::from(data);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
        self.buffers.push(buffer);

        let location = gl.get_attrib_location(&self.program, name);
        if location >= 0 {
            gl.enable_vertex_attrib_array(location as u32);
            gl.vertex_attrib_pointer_with_i32(location as u32, components, GL::FLOAT, false, 0, 0);
        }
        Ok(())
    }

    fn set_static_uniforms(&self) {
        let gl = &self.gl;
        let scene = &self.scene;
        gl.use_program(Some(&self.program));
        let set = |name: &str, value: f32| {
            gl.uniform1f(gl.get_uniform_location(&self.program, name).as_ref(), value);
        };
        set("uFocal", 1.0 / (scene.fov_degrees.to_radians() / 2.0).tan());
        set("uCameraZ", scene.camera_z);
        set("uSpin", scene.spin);
        set("uYaw", scene.initial_yaw);
        set("uTilt", scene.tilt);
        set("uFallBase", scene.fall_base);
        set("uFallRange", scene.fall_range);
        set("uHeight", scene.fall_height());
        set("uFog", scene.fog_density);
        gl.uniform3f(
            gl.get_uniform_location(&self.program, "uColor").as_ref(),
            scene.color[0],
            scene.color[1],
            scene.color[2],
        );
    }
}

impl RenderSurface for ParticleSurface {
    fn resize(&mut self, size: SurfaceSize, profile: &DeviceProfile) {
        let ratio = profile.pixel_ratio();
        let width = (size.width * ratio).max(1.0) as u32;
        let height = (size.height * ratio).max(1.0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let gl = &self.gl;
        gl.viewport(0, 0, width as i32, height as i32);
        gl.use_program(Some(&self.program));
        gl.uniform1f(self.uniforms.aspect.as_ref(), (size.width / size.height.max(1.0)) as f32);
        gl.uniform1f(self.uniforms.size.as_ref(), self.scene.point_size * ratio as f32);
        gl.uniform1f(self.uniforms.offset_x.as_ref(), self.scene.offset_x(profile));
    }

    fn render(&mut self, elapsed: f64) {
        let gl = &self.gl;
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE);
        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));
        gl.uniform1f(self.uniforms.time.as_ref(), elapsed as f32);
        gl.draw_arrays(GL::POINTS, 0, self.vertex_count);
    }
}

impl Drop for ParticleSurface {
    fn drop(&mut self) {
        let gl = &self.gl;
        for buffer in self.buffers.drain(..) {
            gl.delete_buffer(Some(&buffer));
        }
        gl.delete_vertex_array(Some(&self.vao));
        gl.delete_program(Some(&self.program));
        if let Ok(Some(extension)) = gl.get_extension("WEBGL_lose_context") {
            if let Ok(extension) = extension.dyn_into::<web_sys::WebglLoseContext>() {
                extension.lose_context();
            }
        }
        self.canvas.remove();
        log::debug!("Particle surface released");
    }
}

/// The browser: canvases go into `container`, frames come from
/// requestAnimationFrame and resizes from the window.
#[derive(Clone)]
pub struct WebPlatform {
    container: HtmlElement,
}

impl WebPlatform {
    pub fn new(container: HtmlElement) -> Self {
        Self { container }
    }
}

impl Platform for WebPlatform {
    type Surface = ParticleSurface;
    type Frames = FrameLoop;
    type Listener = EventSubscription;

    fn device_profile(&self) -> DeviceProfile {
        DeviceProfile::detect()
    }

    fn measure(&self) -> SurfaceSize {
        SurfaceSize {
            width: self.container.client_width() as f64,
            height: self.container.client_height() as f64,
        }
    }

    fn create_surface(&self, scene: &SceneSpec, profile: &DeviceProfile, size: SurfaceSize) -> Result<Self::Surface, SurfaceError> {
        ParticleSurface::new(&self.container, scene, profile, size)
    }

    fn start_frames(&self, tick: Box<dyn FnMut(f64)>) -> Result<Self::Frames, SurfaceError> {
        FrameLoop::start(tick).map_err(dom)
    }

    fn on_resize(&self, handler: Box<dyn FnMut()>) -> Result<Self::Listener, SurfaceError> {
        EventSubscription::window("resize", handler).map_err(dom)
    }
}
