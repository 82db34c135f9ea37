//! Graph Assembler (§4.4): turns per-module visitor output into the final
//! node/edge lists, folds unresolved imports into external-package nodes,
//! and computes per-module call graphs and dead code.

mod assembler;

pub use assembler::{assemble, AssembledModule, AssemblyOutput, ModuleInput};
