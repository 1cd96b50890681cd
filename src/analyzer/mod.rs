//! Static symbol resolution for Tiny programs

mod resolver;
mod symbol_table;

pub use resolver::{resolve, Resolver};
pub use symbol_table::{SymbolEntry, SymbolTable};
