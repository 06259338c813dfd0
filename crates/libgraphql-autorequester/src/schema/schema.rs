use crate::schema::SchemaBuilder;
use crate::types::GraphQLType;
use crate::types::ObjectOrInterfaceTypeTrait;
use crate::types::ObjectType;
use indexmap::IndexMap;

/// Represents a fully typechecked and immutable GraphQL schema.
///
/// This is the type-system half of the collaborator the auto-requester is
/// built atop: it answers which kind a named type is, which fields it has
/// and, for abstract types, which concrete types it may resolve to.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(crate) query_type: String,
    pub(crate) types: IndexMap<String, GraphQLType>,
}
impl Schema {
    /// Returns every type defined within this [`Schema`] (builtin scalars
    /// included), in declaration order.
    pub fn all_types(&self) -> &IndexMap<String, GraphQLType> {
        &self.types
    }

    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Whether a value of type `left` could also be a value of type `right`:
    /// identical types, a concrete type and an abstract type that may resolve
    /// to it, or two abstract types sharing at least one possible type.
    pub fn do_types_overlap(&self, left: &str, right: &str) -> bool {
        if left == right {
            return true;
        }

        let (Some(left_type), Some(right_type)) = (
            self.get_type(left),
            self.get_type(right),
        ) else {
            return false;
        };

        match (left_type.is_abstract(), right_type.is_abstract()) {
            (true, true) =>
                self.possible_types(left)
                    .iter()
                    .any(|obj_type| self.is_possible_type(right, obj_type.name())),
            (true, false) => self.is_possible_type(left, right),
            (false, true) => self.is_possible_type(right, left),
            (false, false) => false,
        }
    }

    pub fn get_type(&self, type_name: &str) -> Option<&GraphQLType> {
        self.types.get(type_name)
    }

    /// Whether `object_type_name` is one of the concrete types that the
    /// abstract type `abstract_type_name` may resolve to.
    pub fn is_possible_type(&self, abstract_type_name: &str, object_type_name: &str) -> bool {
        match self.get_type(abstract_type_name) {
            Some(GraphQLType::Union(union_t)) =>
                union_t.has_member(object_type_name),
            Some(GraphQLType::Interface(_)) =>
                self.object_type(object_type_name)
                    .is_some_and(|obj_t| obj_t.implements_interface(abstract_type_name)),
            _ => false,
        }
    }

    /// Looks up a type by name and returns it only if it is an object type.
    pub fn object_type(&self, type_name: &str) -> Option<&ObjectType> {
        self.get_type(type_name).and_then(GraphQLType::as_object)
    }

    /// The concrete object types a value of `type_name` may be at runtime.
    ///
    /// For an object type this is the type itself; for a union its members;
    /// for an interface every object type implementing it (in declaration
    /// order). Non-composite types have no possible types.
    pub fn possible_types(&self, type_name: &str) -> Vec<&ObjectType> {
        match self.get_type(type_name) {
            Some(GraphQLType::Object(obj_t)) => vec![obj_t],
            Some(GraphQLType::Union(union_t)) =>
                union_t.members()
                    .iter()
                    .filter_map(|member| self.object_type(member))
                    .collect(),
            Some(GraphQLType::Interface(_)) =>
                self.types
                    .values()
                    .filter_map(GraphQLType::as_object)
                    .filter(|obj_t| obj_t.implements_interface(type_name))
                    .collect(),
            _ => vec![],
        }
    }

    /// Returns this [`Schema`]'s Query root operation type.
    ///
    /// GraphQL defines an object type named "Query" as the _default_ Query
    /// type, but a `schema { query: ... }` definition may override it; this
    /// accounts for such an override.
    pub fn query_type(&self) -> Option<&ObjectType> {
        self.object_type(self.query_type.as_str())
    }

    pub fn query_type_name(&self) -> &str {
        self.query_type.as_str()
    }
}
