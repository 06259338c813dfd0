use crate::schema::Schema;
use crate::selection::InlineFragment;
use crate::selection::Selection;
use crate::selection::SelectionError;
use crate::selection::SelectionSet;
use crate::selection::TYPENAME_FIELD;
use crate::types::GraphQLType;
use crate::types::ObjectOrInterfaceTypeTrait;

/// Re-root `selection_set`, written against the concrete object type
/// `concrete_type_name`, so that it is valid to select on `root_type_name`
/// (an abstract type `concrete_type_name` is a possible type of).
///
/// - `__typename` stays at the top level.
/// - Fields declared by the root interface stay at the top level.
/// - Fields declared by an interface the concrete type implements are
///   wrapped in an inline fragment on each such interface.
/// - Everything else is wrapped in a single inline fragment on the concrete
///   type.
///
/// When the root and concrete types are the same, `selection_set` is
/// returned as-is. Only field selections are accepted.
pub fn canonicalize(
    schema: &Schema,
    root_type_name: &str,
    concrete_type_name: &str,
    selection_set: &SelectionSet,
) -> Result<SelectionSet, SelectionError> {
    if root_type_name == concrete_type_name {
        return Ok(selection_set.clone());
    }

    let root_type = schema.get_type(root_type_name).filter(|t| t.is_composite())
        .ok_or_else(|| SelectionError::UnknownCompositeType {
            type_name: root_type_name.to_string(),
        })?;
    let concrete_type = schema.object_type(concrete_type_name)
        .ok_or_else(|| SelectionError::UnknownCompositeType {
            type_name: concrete_type_name.to_string(),
        })?;
    let root_interface = root_type.as_interface();

    let mut root_selections = SelectionSet::new();
    let mut concrete_selections = SelectionSet::new();
    for selection in &selection_set.selections {
        let field = match selection {
            Selection::Field(field) => field,
            Selection::FragmentSpread(spread) =>
                return Err(SelectionError::UnexpandedFragmentSpread {
                    fragment_name: spread.fragment_name.clone(),
                }),
            Selection::InlineFragment(inline) =>
                return Err(SelectionError::UnsupportedSelection {
                    found: match &inline.type_condition {
                        Some(type_name) => format!("an inline fragment on `{type_name}`"),
                        None => "an inline fragment".to_string(),
                    },
                }),
        };

        if field.name == TYPENAME_FIELD
            || root_interface.is_some_and(|iface| iface.field(&field.name).is_some()) {
            root_selections.merge_selection(selection)?;
            continue;
        }

        let declaring_interfaces = concrete_type.interfaces()
            .iter()
            .filter(|iface_name| {
                schema.get_type(iface_name)
                    .and_then(GraphQLType::as_interface)
                    .is_some_and(|iface| iface.field(&field.name).is_some())
            });

        let mut declared_by_interface = false;
        for iface_name in declaring_interfaces {
            declared_by_interface = true;
            root_selections.merge_selection(&Selection::InlineFragment(InlineFragment::new(
                iface_name.as_str(),
                SelectionSet::from_selections(vec![selection.clone()]),
            )))?;
        }

        if !declared_by_interface {
            concrete_selections.merge_selection(selection)?;
        }
    }

    if !concrete_selections.is_empty() {
        root_selections.merge_selection(&Selection::InlineFragment(InlineFragment::new(
            concrete_type_name,
            concrete_selections,
        )))?;
    }

    Ok(root_selections)
}
