//! Scan → parse → resolve → execute, as one call

use crate::analyzer::{resolve, SymbolTable};
use crate::config::Config;
use crate::error::Result;
use crate::lexer::{LineSource, StrSource};
use crate::parser::{Parser, Program};
use crate::runtime::{InputSource, Interpreter, OutputSink, ScriptedInput};

/// Configured front end plus interpreter
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: Config,
}

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Parsed program
    pub program: Program,
    /// Resolved symbols
    pub symbols: SymbolTable,
    /// Final variable values, by slot
    pub values: Vec<i64>,
}

impl RunReport {
    /// Final value of a named variable
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.symbols.slot_of(name).map(|slot| self.values[slot])
    }
}

impl Pipeline {
    /// Creates a pipeline, rejecting an inconsistent token configuration
    pub fn new(config: Config) -> Result<Self> {
        config.language.validate()?;
        Ok(Pipeline { config })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse from any line source
    pub fn parse<S: LineSource>(&self, source: S) -> Result<Program> {
        Parser::with_config(source, &self.config.language)?.parse_program()
    }

    /// Parse a program held in memory
    pub fn parse_str(&self, source: &str) -> Result<Program> {
        self.parse(StrSource::new(source))
    }

    /// Run the whole pipeline over a line source
    pub fn run<S, I, O>(&self, source: S, input: I, output: O) -> Result<RunReport>
    where
        S: LineSource,
        I: InputSource,
        O: OutputSink,
    {
        let program = self.parse(source)?;
        let symbols = resolve(&program);

        let mut interpreter =
            Interpreter::with_config(&symbols, input, output, self.config.interpreter.clone());
        interpreter.execute(&program)?;
        let (values, _, _) = interpreter.into_parts();

        Ok(RunReport {
            program,
            symbols,
            values,
        })
    }

    /// Run a program held in memory
    pub fn run_str<I, O>(&self, source: &str, input: I, output: O) -> Result<RunReport>
    where
        I: InputSource,
        O: OutputSink,
    {
        self.run(StrSource::new(source), input, output)
    }
}

/// Run `source` with the default configuration, feeding `inputs` to `read`
/// statements and returning every written value
pub fn run_source(source: &str, inputs: &[i64]) -> Result<Vec<i64>> {
    let mut output = Vec::new();
    Pipeline::default().run_str(source, ScriptedInput::new(inputs.to_vec()), &mut output)?;
    Ok(output)
}
