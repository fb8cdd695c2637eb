pub mod config;
pub mod log;

use tracing::{debug, info};

use crate::audio::PopSound;
use crate::game::Game;
use crate::graphics::Canvas;
use crate::math::rng::GameRng;

use config::Config;

/// Main program struct
///
/// `pix` is the canvas at game resolution. The window shows it
/// enlarged `scale` times.
pub(crate) struct Program {
    pub pix: Canvas,

    game: Game,

    scale: u8,

    fps: u32,

    /// Allow for resizing.
    resize: bool,

    hidden: bool,
}

#[derive(Debug, PartialEq)]
pub enum Command {
    /// Pointer press in canvas coordinates.
    Click(f32, f32),
    /// New canvas size.
    Resize(u32, u32),
    Hidden(bool),
    Close,
}

impl Command {
    pub fn is_close_requested(&self) -> bool {
        *self == Command::Close
    }
}

impl Program {
    pub fn new(config: &Config) -> Self {
        let sound = match &config.sound {
            Some(path) => PopSound::load(path),
            None => PopSound::empty(),
        };

        Self::with_sound(config, sound)
    }

    pub fn with_sound(config: &Config, sound: PopSound) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::seeded(seed),
            None => GameRng::from_entropy(),
        };

        Self {
            pix: Canvas::new(config.width as usize, config.height as usize),
            game: Game::new(&config.game_config(), rng, sound),
            scale: config.scale,
            fps: config.fps,
            resize: config.resizable,
            hidden: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn is_resizable(&self) -> bool {
        self.resize
    }

    pub fn set_hidden(&mut self, b: bool) {
        self.hidden = b;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Returns whether the command changed what is on screen.
    pub fn eval_command(&mut self, cmd: &Command) -> bool {
        use Command::*;

        match *cmd {
            Click(x, y) => {
                let Some(change) = self.game.on_click(x, y) else {
                    return false;
                };

                debug!(
                    change,
                    score = self.game.score(),
                    particles = self.game.particles().len(),
                    labels = self.game.score_displays().len(),
                    "Popped a bubble at ({x:.0}, {y:.0})."
                );

                true
            }

            Resize(w, h) => {
                self.update_size((w, h));
                true
            }

            Hidden(b) => {
                self.set_hidden(b);
                false
            }

            Close => false,
        }
    }

    pub fn eval_commands(&mut self, cmds: &mut Vec<Command>) -> bool {
        let mut redraw = false;
        for cmd in cmds.iter() {
            redraw |= self.eval_command(cmd);
        }
        cmds.clear();

        redraw
    }

    pub fn update_size(&mut self, (w, h): (u32, u32)) {
        let (w, h) = (w.max(1), h.max(1));

        if (w as usize, h as usize) == (self.pix.width(), self.pix.height()) {
            return;
        }

        self.pix.resize(w as usize, h as usize);
        self.game.on_resize(w as f32, h as f32);

        let bounds = self.game.bounds();
        debug!("Playing field resized to {}x{}.", bounds.width, bounds.height);
    }

    /// Advances the game one frame and draws it into `pix`.
    /// Nothing moves while the window is hidden.
    pub fn render(&mut self) {
        if self.hidden {
            return;
        }

        self.game.on_frame(&mut self.pix);
    }

    pub fn print_startup_info(&self) {
        info!(
            "Canvas {}x{} at scale {}, {} fps, {} bubbles.",
            self.pix.width(),
            self.pix.height(),
            self.scale,
            self.fps,
            self.game.bubbles().len()
        );

        if !self.game.has_sound() {
            info!("Sound is off.");
        }

        if self.resize {
            info!("Resizing the window resizes the playing field.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BACKGROUND;
    use std::path::PathBuf;

    fn config() -> Config {
        Config {
            width: 200,
            height: 100,
            scale: 2,
            num_bubbles: 5,
            fps: 30,
            sound: Some(PathBuf::from("/nonexistent/pop.wav")),
            seed: Some(5),
            tag: String::new(),
            resizable: true,
            quiet: true,
        }
    }

    #[test]
    fn new_program_matches_config() {
        let prog = Program::with_sound(&config(), PopSound::empty());

        assert_eq!((prog.pix.width(), prog.pix.height()), (200, 100));
        assert_eq!(prog.scale(), 2);
        assert_eq!(prog.fps(), 30);
        assert!(prog.is_resizable());
        assert_eq!(prog.game().bubbles().len(), 5);
    }

    #[test]
    fn missing_sound_file_is_not_fatal() {
        let prog = Program::new(&config());
        assert!(!prog.game().has_sound());
    }

    #[test]
    fn resize_command_resizes_canvas_and_bounds() {
        let mut prog = Program::with_sound(&config(), PopSound::empty());

        assert!(prog.eval_command(&Command::Resize(64, 0)));
        assert_eq!((prog.pix.width(), prog.pix.height()), (64, 1));
        assert_eq!(prog.game().bounds().width, 64.0);
        assert_eq!(prog.game().bounds().height, 1.0);
    }

    #[test]
    fn hidden_program_does_not_advance() {
        let mut prog = Program::with_sound(&config(), PopSound::empty());
        let before = prog.game().bubbles().to_vec();

        let mut cmds = vec![Command::Click(-200.0, -200.0), Command::Hidden(true)];
        assert!(!prog.eval_commands(&mut cmds));
        assert!(cmds.is_empty());

        prog.render();
        assert_eq!(prog.game().bubbles(), &before[..]);

        prog.eval_command(&Command::Hidden(false));
        prog.render();
        assert_ne!(prog.game().bubbles(), &before[..]);
    }

    #[test]
    fn render_paints_background() {
        let mut cfg = config();
        cfg.num_bubbles = 0;
        let mut prog = Program::with_sound(&cfg, PopSound::empty());

        prog.render();
        // bottom-right corner is clear of the HUD
        let last = *prog.pix.as_slice().last().unwrap();
        assert_eq!(last, BACKGROUND);
    }

    #[test]
    fn click_on_nothing_needs_no_redraw() {
        let mut cfg = config();
        cfg.num_bubbles = 0;
        let mut prog = Program::with_sound(&cfg, PopSound::empty());

        assert!(!prog.eval_command(&Command::Click(10.0, 10.0)));
        assert!(Command::Close.is_close_requested());
        assert!(!prog.eval_command(&Command::Close));
    }
}
