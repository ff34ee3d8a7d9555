use js_sys::Float32Array;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::describe;
use crate::background::Renderer;
use crate::error::RenderError;
use crate::shader::{Uniforms, Viewport, FRAGMENT_SHADER, QUAD, UNIFORM_NAMES, VERTEX_SHADER};

/// Full-screen quad drawn with the chromatic wave program.
pub struct GlRenderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    shaders: Vec<WebGlShader>,
    program: Option<WebGlProgram>,
    buffer: Option<WebGlBuffer>,
    vao: Option<WebGlVertexArrayObject>,
    locations: [Option<WebGlUniformLocation>; 5],
}

impl GlRenderer {
    /// Creates the production context on `canvas` and uploads the scene.
    /// Partially built state is released before an error is returned.
    pub fn open(canvas: &HtmlCanvasElement) -> Result<Self, RenderError> {
        let gl: GL = canvas
            .get_context("webgl2")
            .map_err(|e| RenderError::Host(describe(&e)))?
            .ok_or(RenderError::ContextUnavailable("WebGL2"))?
            .dyn_into()
            .map_err(|_| RenderError::ContextUnavailable("WebGL2"))?;

        let mut renderer = Self {
            gl,
            canvas: canvas.clone(),
            shaders: Vec::with_capacity(2),
            program: None,
            buffer: None,
            vao: None,
            locations: Default::default(),
        };
        if let Err(err) = renderer.build() {
            renderer.release();
            return Err(err);
        }
        Ok(renderer)
    }

    fn build(&mut self) -> Result<(), RenderError> {
        let vertex = self.compile(GL::VERTEX_SHADER, "vertex", VERTEX_SHADER)?;
        let fragment = self.compile(GL::FRAGMENT_SHADER, "fragment", FRAGMENT_SHADER)?;

        let gl = &self.gl;
        let program = gl.create_program().ok_or(RenderError::Resource("program"))?;
        gl.attach_shader(&program, &vertex);
        gl.attach_shader(&program, &fragment);
        gl.link_program(&program);
        let linked = gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            gl.delete_program(Some(&program));
            return Err(RenderError::ProgramLink(log));
        }
        // Owned from here on so `release` frees it on any later error.
        self.program = Some(program.clone());

        let vao = gl.create_vertex_array().ok_or(RenderError::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));
        self.vao = Some(vao);

        let buffer = gl.create_buffer().ok_or(RenderError::Resource("vertex buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let vertices = Float32Array::from(&QUAD[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);
        self.buffer = Some(buffer);

        let position = gl.get_attrib_location(&program, "position");
        if position < 0 {
            return Err(RenderError::Resource("position attribute"));
        }
        gl.enable_vertex_attrib_array(position as u32);
        gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);
        gl.bind_vertex_array(None);

        for (slot, name) in self.locations.iter_mut().zip(UNIFORM_NAMES) {
            *slot = gl.get_uniform_location(&program, name);
        }
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        Ok(())
    }

    fn compile(&mut self, kind: u32, stage: &'static str, source: &str) -> Result<WebGlShader, RenderError> {
        let gl = &self.gl;
        let shader = gl.create_shader(kind).ok_or(RenderError::Resource("shader"))?;
        gl.shader_source(&shader, source);
        gl.compile_shader(&shader);
        let compiled = gl
            .get_shader_parameter(&shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !compiled {
            let log = gl.get_shader_info_log(&shader).unwrap_or_default();
            gl.delete_shader(Some(&shader));
            return Err(RenderError::ShaderCompile { stage, log });
        }
        self.shaders.push(shader.clone());
        Ok(shader)
    }
}

impl Renderer for GlRenderer {
    fn resize(&mut self, viewport: Viewport, _uniforms: &Uniforms) {
        let (w, h) = viewport.drawing_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.gl.viewport(0, 0, w as i32, h as i32);
    }

    fn draw(&mut self, u: &Uniforms) {
        let gl = &self.gl;
        let Some(program) = self.program.as_ref() else {
            return;
        };
        gl.use_program(Some(program));
        let [resolution, time, x_scale, y_scale, distortion] = &self.locations;
        gl.uniform2f(resolution.as_ref(), u.resolution[0], u.resolution[1]);
        gl.uniform1f(time.as_ref(), u.time);
        gl.uniform1f(x_scale.as_ref(), u.x_scale);
        gl.uniform1f(y_scale.as_ref(), u.y_scale);
        gl.uniform1f(distortion.as_ref(), u.distortion);

        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.bind_vertex_array(self.vao.as_ref());
        gl.draw_arrays(GL::TRIANGLES, 0, (QUAD.len() / 2) as i32);
        gl.bind_vertex_array(None);
    }

    fn release(&mut self) {
        let gl = &self.gl;
        gl.use_program(None);
        gl.bind_vertex_array(None);
        gl.bind_buffer(GL::ARRAY_BUFFER, None);
        if let Some(vao) = self.vao.take() {
            gl.delete_vertex_array(Some(&vao));
        }
        if let Some(buffer) = self.buffer.take() {
            gl.delete_buffer(Some(&buffer));
        }
        if let Some(program) = self.program.take() {
            gl.delete_program(Some(&program));
        }
        for shader in self.shaders.drain(..) {
            gl.delete_shader(Some(&shader));
        }
        self.locations = Default::default();
    }
}
