use std::path::PathBuf;

use clap::Parser;

use crate::game::{Bounds, GameConfig, DEFAULT_NUM_BUBBLES};

pub const DEFAULT_SIZE: &str = "960x640";
pub const DEFAULT_SCALE: u8 = 1;
pub const MAX_SCALE_FACTOR: u8 = 8;
pub const DEFAULT_FPS: u32 = 60;
pub const MAX_FPS: u32 = 240;
pub const MAX_DIMENSION: u32 = 8192;
pub const DEFAULT_SOUND: &str = "pop.mp3";
pub const DEFAULT_TAG: &str = "ID: 414736529";

/// Pop the bubbles drifting up the screen.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Canvas size, WIDTHxHEIGHT
    #[arg(long, default_value = DEFAULT_SIZE)]
    pub size: String,

    /// Window pixels per canvas pixel (1-8)
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    pub scale: u8,

    /// Number of bubbles in play
    #[arg(long, default_value_t = DEFAULT_NUM_BUBBLES)]
    pub bubbles: usize,

    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Pop sound, MP3, WAV or Ogg Vorbis
    #[arg(long, default_value = DEFAULT_SOUND)]
    pub sound: PathBuf,

    /// Play without sound
    #[arg(long)]
    pub mute: bool,

    /// Seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Identifier line shown in the bottom-left corner
    #[arg(long, default_value = DEFAULT_TAG)]
    pub tag: String,

    /// Lock the window size
    #[arg(long)]
    pub fixed_size: bool,

    /// Only log warnings and errors
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid size {0:?}, expected WIDTHxHEIGHT")]
    InvalidSize(String),

    #[error("size {0}x{1} must be non-zero and at most {max} per side", max = MAX_DIMENSION)]
    SizeOutOfRange(u32, u32),

    #[error("scale {0} must be between 1 and {max}", max = MAX_SCALE_FACTOR)]
    ScaleOutOfRange(u8),

    #[error("fps {0} must be between 1 and {max}", max = MAX_FPS)]
    FpsOutOfRange(u32),
}

/// Validated startup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub scale: u8,
    pub num_bubbles: usize,
    pub fps: u32,
    /// `None` when muted.
    pub sound: Option<PathBuf>,
    pub seed: Option<u64>,
    pub tag: String,
    pub resizable: bool,
    pub quiet: bool,
}

pub fn parse_size(s: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidSize(s.to_string());

    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;

    let w = w.trim().parse::<u32>().map_err(|_| invalid())?;
    let h = h.trim().parse::<u32>().map_err(|_| invalid())?;

    if w == 0 || h == 0 || w > MAX_DIMENSION || h > MAX_DIMENSION {
        return Err(ConfigError::SizeOutOfRange(w, h));
    }

    Ok((w, h))
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, ConfigError> {
        let (width, height) = parse_size(&args.size)?;

        if !(1..=MAX_SCALE_FACTOR).contains(&args.scale) {
            return Err(ConfigError::ScaleOutOfRange(args.scale));
        }

        if !(1..=MAX_FPS).contains(&args.fps) {
            return Err(ConfigError::FpsOutOfRange(args.fps));
        }

        Ok(Config {
            width,
            height,
            scale: args.scale,
            num_bubbles: args.bubbles,
            fps: args.fps,
            sound: (!args.mute).then_some(args.sound),
            seed: args.seed,
            tag: args.tag,
            resizable: !args.fixed_size,
            quiet: args.quiet,
        })
    }
}

impl Config {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            num_bubbles: self.num_bubbles,
            bounds: Bounds {
                width: self.width as f32,
                height: self.height as f32,
            },
            tag: self.tag.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let args = Args::try_parse_from(std::iter::once("bubblepop").chain(args.iter().copied()))
            .expect("arguments should parse");
        Config::try_from(args)
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();

        assert_eq!((config.width, config.height), (960, 640));
        assert_eq!(config.scale, 1);
        assert_eq!(config.num_bubbles, 100);
        assert_eq!(config.fps, 60);
        assert_eq!(config.sound, Some(PathBuf::from("pop.mp3")));
        assert_eq!(config.tag, DEFAULT_TAG);
        assert!(config.resizable);
        assert!(!config.quiet);
    }

    #[test]
    fn size_parsing() {
        assert_eq!(parse_size("800x600"), Ok((800, 600)));
        assert_eq!(parse_size(" 1X2 "), Ok((1, 2)));

        for bad in ["800", "x600", "800x", "axb", "800x600x2", "-1x5", ""] {
            assert_eq!(parse_size(bad), Err(ConfigError::InvalidSize(bad.to_string())));
        }

        assert_eq!(parse_size("0x600"), Err(ConfigError::SizeOutOfRange(0, 600)));
        assert_eq!(
            parse_size("9000x600"),
            Err(ConfigError::SizeOutOfRange(9000, 600))
        );
    }

    #[test]
    fn scale_bounds() {
        assert!(parse(&["--scale", "1"]).is_ok());
        assert!(parse(&["--scale", "8"]).is_ok());
        assert_eq!(
            parse(&["--scale", "0"]),
            Err(ConfigError::ScaleOutOfRange(0))
        );
        assert_eq!(
            parse(&["--scale", "9"]),
            Err(ConfigError::ScaleOutOfRange(9))
        );
    }

    #[test]
    fn fps_bounds() {
        assert_eq!(parse(&["--fps", "0"]), Err(ConfigError::FpsOutOfRange(0)));
        assert!(parse(&["--fps", "144"]).is_ok());
    }

    #[test]
    fn flags() {
        let config = parse(&[
            "--mute",
            "--fixed-size",
            "--seed",
            "7",
            "--tag",
            "",
            "--bubbles",
            "3",
            "--size",
            "320x200",
        ])
        .unwrap();

        assert_eq!(config.sound, None);
        assert!(!config.resizable);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tag, "");

        let game = config.game_config();
        assert_eq!(game.num_bubbles, 3);
        assert_eq!(game.bounds, Bounds { width: 320.0, height: 200.0 });
    }
}
