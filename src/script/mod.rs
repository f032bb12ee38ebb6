//! Scene-script compiler.
//!
//! The language is line oriented:
//!
//! ```text
//! timeline: intro
//! # comments and blank lines are ignored
//! card "Welcome" | "a short tour" @3s
//!   say "Hello there" @0.5s voice=af_heart anchor=inEnd
//! swipe left 15
//! cast casts/setup.cast 100x30
//!   say "First we install the tools"
//! crossfade 10
//! card "Done" @2s
//! ```

mod cursor;
mod parser;
mod rules;

pub use parser::parse;
