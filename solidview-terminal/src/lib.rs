/// Interactive terminal viewer for solidview scenes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use solidview_core::{Scene, Shape, ShapeKind};

pub mod cli;
pub mod logging;
pub mod renderer;

pub use renderer::TerminalCanvas;

const ORBIT_STEP: f32 = 0.1;
const SPIN_STEP: f32 = 0.1;
const SIZE_STEP: f32 = 0.25;

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    scene: Scene,
    canvas: TerminalCanvas,
    selected: usize,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, width, height))
    }

    pub fn with_size(scene: Scene, columns: u16, rows: u16) -> Self {
        Self {
            scene,
            canvas: TerminalCanvas::new(columns, rows),
            selected: 0,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selected(&self) -> Option<&Shape> {
        self.scene.get(self.selected)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

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

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => self.handle_key(code),
            Event::Resize(columns, rows) => self.canvas.resize(columns, rows),
            _ => {}
        }
    }

    fn edit_selected<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Shape),
    {
        if let Some(shape) = self.scene.get_mut(self.selected) {
            f(shape);
        }
    }

    fn add(&mut self, kind: ShapeKind) {
        self.selected = self.scene.add(Shape::new(kind));
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') | KeyCode::Up => self.scene.camera.orbit(0.0, ORBIT_STEP),
            KeyCode::Char('s') | KeyCode::Down => self.scene.camera.orbit(0.0, -ORBIT_STEP),
            KeyCode::Char('a') | KeyCode::Left => self.scene.camera.orbit(-ORBIT_STEP, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.scene.camera.orbit(ORBIT_STEP, 0.0),
            KeyCode::Char('+') | KeyCode::Char('=') => self.scene.camera.zoom(0.9),
            KeyCode::Char('-') => self.scene.camera.zoom(1.1),
            KeyCode::Tab => {
                if !self.scene.is_empty() {
                    self.selected = (self.selected + 1) % self.scene.len();
                }
            }
            KeyCode::Char('.') => self.edit_selected(|s| {
                s.edit(|kind| kind.grow(SIZE_STEP));
            }),
            KeyCode::Char(',') => self.edit_selected(|s| {
                s.edit(|kind| kind.grow(-SIZE_STEP));
            }),
            KeyCode::Char(']') => self.edit_selected(|s| {
                s.edit(|kind| kind.refine(1));
            }),
            KeyCode::Char('[') => self.edit_selected(|s| {
                s.edit(|kind| kind.refine(-1));
            }),
            KeyCode::Char('e') => self.edit_selected(|s| s.rotation.rotate(0.0, SPIN_STEP, 0.0)),
            KeyCode::Char('r') => self.edit_selected(|s| s.rotation.rotate(0.0, -SPIN_STEP, 0.0)),
            KeyCode::Char('v') => self.edit_selected(|s| s.visible = !s.visible),
            KeyCode::Char('x') => self.scene.show_axes = !self.scene.show_axes,
            KeyCode::Char('1') => self.add(ShapeKind::cuboid()),
            KeyCode::Char('2') => self.add(ShapeKind::sphere()),
            KeyCode::Char('3') => self.add(ShapeKind::cylinder()),
            KeyCode::Char('4') => self.add(ShapeKind::cone()),
            KeyCode::Delete | KeyCode::Backspace => {
                self.scene.remove(self.selected);
                self.selected = self.selected.min(self.scene.len().saturating_sub(1));
            }
            _ => {}
        }
    }

    pub fn status_line(&self) -> String {
        let selection = match self.selected() {
            Some(shape) => format!(
                "{} [{} tris{}]",
                shape.display_name(),
                shape.mesh().len(),
                if shape.visible { "" } else { ", hidden" }
            ),
            None => "no shapes".to_string(),
        };
        format!(
            "FPS: {:.1} | {} | {}",
            self.fps,
            selection,
            self.scene.camera.display_name()
        )
    }

    fn render(&mut self) -> io::Result<()> {
        self.scene.render(self.canvas.framebuffer_mut());

        let mut stdout = stdout();
        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        let (columns, _) = self.canvas.size();
        let status: String = self.status_line().chars().take(columns as usize).collect();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(Color::Black),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
