//! Preload fragments: caller-declared selections that are always requested
//! alongside any access to a value of the fragment's type (or a type that
//! overlaps with it).

mod fragment_type_map;
mod fragment_type_map_builder;

pub use fragment_type_map::FragmentTypeMap;
pub use fragment_type_map_builder::FragmentTypeMapBuilder;
pub use fragment_type_map_builder::FragmentTypeMapBuildError;

#[cfg(test)]
mod tests;
