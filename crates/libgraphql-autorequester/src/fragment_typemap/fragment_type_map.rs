use crate::fragment_typemap::FragmentTypeMapBuilder;
use crate::schema::Schema;
use crate::selection::FieldSelection;
use crate::selection::InlineFragment;
use crate::selection::Selection;
use crate::selection::SelectionError;
use crate::selection::SelectionSet;
use crate::selection::TYPENAME_FIELD;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, SelectionError>;

/// Validated preload selections, keyed by the type they were declared on.
///
/// Built once (see [`FragmentTypeMapBuilder`]) and never mutated after.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FragmentTypeMap {
    pub(super) entries: IndexMap<String, SelectionSet>,
}
impl FragmentTypeMap {
    pub fn builder(schema: &Schema) -> FragmentTypeMapBuilder<'_> {
        FragmentTypeMapBuilder::new(schema)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, type_name: &str) -> Option<&SelectionSet> {
        self.entries.get(type_name)
    }

    /// The minimum selection that resolves a value of `type_name` whose
    /// concrete type is not yet known: `__typename` plus the related preload
    /// fragments.
    pub fn initial_selections(&self, schema: &Schema, type_name: &str) -> Result<SelectionSet> {
        let mut selections = SelectionSet::from_selections(vec![
            Selection::Field(FieldSelection::new(TYPENAME_FIELD)),
        ]);
        selections.merge(&self.related_fragments(schema, type_name)?)?;
        Ok(selections)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of types with a preload selection.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Every preload selection relevant to a value of `type_name`.
    ///
    /// Each composite type of the schema (in declaration order) that
    /// overlaps with `type_name` contributes its entry: as-is when
    /// `type_name` is a concrete type or the same type, and wrapped in an
    /// inline fragment on that other type otherwise.
    pub fn related_fragments(&self, schema: &Schema, type_name: &str) -> Result<SelectionSet> {
        let graphql_type = schema.get_type(type_name)
            .filter(|t| t.is_composite())
            .ok_or_else(|| SelectionError::UnknownCompositeType {
                type_name: type_name.to_string(),
            })?;

        let mut related = SelectionSet::new();
        if self.entries.is_empty() {
            return Ok(related);
        }

        for other_type in schema.all_types().values().filter(|t| t.is_composite()) {
            let other_name = other_type.name();
            let Some(other_selections) = self.entries.get(other_name) else {
                continue;
            };
            if !schema.do_types_overlap(type_name, other_name) {
                continue;
            }

            if other_name == type_name || !graphql_type.is_abstract() {
                related.merge(other_selections)?;
            } else {
                related.merge_selection(&Selection::InlineFragment(InlineFragment::new(
                    other_name,
                    other_selections.clone(),
                )))?;
            }
        }
        Ok(related)
    }
}
