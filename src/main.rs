mod audio;
mod data;
mod game;
mod graphics;
mod math;
mod modes;

use clap::Parser;

use data::{
    config::{Args, Config},
    Program,
};

fn main() -> anyhow::Result<()> {
    let config = Config::try_from(Args::parse())?;

    data::log::init(config.quiet);

    let prog = Program::new(&config);

    modes::windowed_mode::winit_main(prog)
}
