// Document understanding and matching.
// Pure, synchronous components (tokenizer → fields/sections → scoring →
// suggestions, plus region heuristics) composed by `pipeline` into the
// service use cases. Only the pipeline touches external collaborators.

pub mod cancel;
pub mod catalog;
pub mod compatibility;
pub mod fallback;
pub mod fields;
pub mod handlers;
pub mod pipeline;
pub mod regions;
pub mod sections;
pub mod suggestions;
pub mod tokenizer;

#[cfg(test)]
pub mod testing;
