/// Terminal front-end: renders the cargo scene and drags blocks with the mouse
use cargoyard_core::{
    pick_block, BuilderSession, Camera, CargoError, DragPlane, Mesh, Orbit, PointerId, Ray,
    Transform, VisualTag,
};
use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use nalgebra::{Point3, Vector3};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;
/// Rows above the scene (header) and below it (status line)
const SCENE_TOP: u16 = 1;
const CHROME_ROWS: u16 = 2;

const FLOOR_COLOR: VisualTag = VisualTag::rgb(0xdd, 0xdd, 0xdd);
const ORBIT_STEP: f32 = 0.1;
const ZOOM_STEP: f32 = 0.9;
const HELP: &str = "Mouse=Drag block | WASD/Arrows=Orbit | +/-=Zoom | C=Cancel drag | Q=Quit";

/// Main application struct for the terminal cargo builder
pub struct TerminalApp {
    session: BuilderSession,
    orbit: Orbit,
    camera: Camera,
    renderer: AsciiRenderer,
    floor_tile: Mesh,
    grab: Option<DragPlane>,
    status: Option<String>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(session: BuilderSession) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(session, width, height))
    }

    /// Build the app for a terminal of the given size without touching the tty
    pub fn with_size(session: BuilderSession, width: u16, height: u16) -> Self {
        let camera = Camera::default();
        let orbit = Orbit::looking_at(camera.position, camera.target);
        let mut app = Self {
            session,
            orbit,
            camera,
            renderer: AsciiRenderer::new(0, 0),
            floor_tile: Mesh::cuboid(Vector3::new(1.0, 0.1, 1.0)),
            grab: None,
            status: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        app.resize(width, height);
        app
    }

    pub fn session(&self) -> &BuilderSession {
        &self.session
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Last error shown on the status line
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture,
            EnableFocusChange
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Apply every pending event in delivery order
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.resize(width, height),
            Event::FocusLost => self.cancel_drag(),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => self.orbit.rotate(0.0, ORBIT_STEP),
            KeyCode::Char('s') | KeyCode::Down => self.orbit.rotate(0.0, -ORBIT_STEP),
            KeyCode::Char('a') | KeyCode::Left => self.orbit.rotate(-ORBIT_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.orbit.rotate(ORBIT_STEP, 0.0),
            KeyCode::Char('+') | KeyCode::Char('=') => self.orbit.zoom(ZOOM_STEP),
            KeyCode::Char('-') => self.orbit.zoom(1.0 / ZOOM_STEP),
            KeyCode::Char('c') => self.cancel_drag(),
            _ => {}
        }
        self.camera.follow(&self.orbit);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => self.drag(mouse.column, mouse.row),
            MouseEventKind::Up(MouseButton::Left) => {
                self.session.pointer_up(PointerId::PRIMARY);
                self.grab = None;
            }
            _ => {}
        }
    }

    fn press(&mut self, column: u16, row: u16) {
        let Some(ray) = self.ray_at(column, row) else {
            return;
        };
        let Some(hit) = pick_block(self.session.blocks(), &ray) else {
            return;
        };

        match self.session.pointer_down(PointerId::PRIMARY, hit.block) {
            Ok(()) => {
                debug!(block = %hit.block, point = ?hit.point, "grabbed block");
                self.grab = Some(DragPlane::facing_camera(hit.point, self.camera.forward()));
                self.status = None;
            }
            Err(err) => self.report(err),
        }
    }

    fn drag(&mut self, column: u16, row: u16) {
        let Some(plane) = self.grab else {
            return;
        };
        let Some(point) = self.ray_at(column, row).and_then(|ray| plane.intersect(&ray)) else {
            return;
        };

        if let Err(err) = self.session.pointer_move(PointerId::PRIMARY, point) {
            self.report(err);
        }
    }

    fn cancel_drag(&mut self) {
        self.session.pointer_cancel(PointerId::PRIMARY);
        self.grab = None;
    }

    fn report(&mut self, err: CargoError) {
        warn!(%err, "pointer input rejected");
        self.status = Some(err.to_string());
    }

    /// Pointer ray through the centre of a terminal cell, `None` outside the scene
    fn ray_at(&self, column: u16, row: u16) -> Option<Ray> {
        let scene_row = row.checked_sub(SCENE_TOP)? as usize;
        if scene_row >= self.renderer.height() || column as usize >= self.renderer.width() {
            return None;
        }
        self.camera.screen_ray(
            column as f32 + 0.5,
            scene_row as f32 + 0.5,
            self.renderer.width() as u32,
            self.renderer.height() as u32,
        )
    }

    fn resize(&mut self, width: u16, height: u16) {
        let scene_height = height.saturating_sub(CHROME_ROWS).max(1);
        let width = width.max(1);
        self.renderer.resize(width as usize, scene_height as usize);
        self.camera.aspect = width as f32 / (scene_height as f32 * CELL_ASPECT);
    }

    /// Rasterize floor and blocks into the renderer's buffers
    pub fn draw_scene(&mut self) {
        self.renderer.clear();

        for (x, z) in self.session.floor().solid_cells() {
            let model = Transform::translation_matrix(&Point3::new(x as f32, 0.0, z as f32));
            self.renderer
                .render_mesh(&self.floor_tile, &model, &self.camera, FLOOR_COLOR);
        }

        for block in self.session.blocks() {
            let model = Transform::translation_matrix(&block.position);
            self.renderer
                .render_mesh(&block.mesh(), &model, &self.camera, block.tag);
        }
    }

    fn header(&self) -> String {
        let drag = match self.session.dragged_by(PointerId::PRIMARY) {
            Some(id) => match self.session.block(id) {
                Some(block) => format!(
                    "Dragging block {} (extent {}) at ({}, {}, {})",
                    id, block.extent, block.position.x, block.position.y, block.position.z
                ),
                None => format!("Dragging block {}", id),
            },
            None => "Idle".to_string(),
        };
        format!(
            "Cargoyard | Height limit: {} | {} | FPS: {:.1}",
            self.session.height_limit(),
            drag,
            self.fps
        )
    }

    fn render(&mut self) -> io::Result<()> {
        self.draw_scene();

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0), terminal::Clear(ClearType::CurrentLine))?;
        queue!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print(self.header()),
            ResetColor
        )?;

        self.renderer.draw(&mut stdout, SCENE_TOP)?;

        // Draw status line
        let status_row = SCENE_TOP + self.renderer.height() as u16;
        let (color, text) = match &self.status {
            Some(error) => (Color::Red, error.as_str()),
            None => (Color::DarkGrey, HELP),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, status_row),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(color),
            Print(text),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
