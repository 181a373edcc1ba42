// Engine modules: renderer, input, timing

pub mod frame_clock;
pub mod input;
pub mod renderer;
