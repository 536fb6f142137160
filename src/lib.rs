#![doc = include_str!("../readme.md")]

pub mod config;
pub mod dsp;
pub mod error;
pub mod stream;

pub use config::AgcConfig;
pub use dsp::agc::Agc;
pub use dsp::strategy::GainStrategy;
pub use dsp::DspBlock;
pub use error::{Error, Result};
pub use stream::{AgcIter, AgcStream};
