/*! Provides an abstract syntax for typed first-order theories together with the logical
transformations (CNF, Skolemization, Horn rule extraction and stratification) that prepare
them for rendering into solver input languages. */

pub mod stratify;
pub mod syntax;
#[cfg(test)]
pub mod test_macros;
#[cfg(test)]
mod test_prelude;
pub mod transform;
