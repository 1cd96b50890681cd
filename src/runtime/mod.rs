//! Tree-walking execution of Tiny programs

mod interpreter;
pub mod io;
mod value;

pub use interpreter::{apply_arithmetic, Interpreter};
pub use io::{InputSource, OutputSink, ReaderInput, ScriptedInput, WriterSink};
pub use value::Value;
