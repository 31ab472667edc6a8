pub mod channels;
pub mod errors;
pub mod frequency;
pub mod hopper;
pub mod interfaces;
pub mod preflight;
pub mod probe;
pub mod survey;
pub mod wireless;
