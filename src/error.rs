//! Error type shared by the catalog, sampler and session constructors.

/// Failures that can occur while assembling a sketch.
///
/// None of these happen per frame: once a [`crate::Sketch`] exists, every
/// operation on it is infallible.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SketchError {
    /// A theme identifier that is neither a preset nor `"random"`.
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    /// A theme range whose lower bound exceeds its upper bound.
    #[error("theme `{theme}` has inverted {param} range [{min}, {max}]")]
    InvertedRange {
        theme: &'static str,
        param: &'static str,
        min: f32,
        max: f32,
    },
    /// Distinct palette indices need at least two slots to choose from.
    #[error("palette pool of size {0} cannot yield two distinct indices")]
    PalettePoolTooSmall(usize),
    /// A discrete sampling pool with nothing in it.
    #[error("sampling pool `{0}` is empty")]
    EmptyPool(&'static str),
}

pub type Result<T> = std::result::Result<T, SketchError>;
