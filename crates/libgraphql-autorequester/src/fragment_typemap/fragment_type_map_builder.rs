use crate::ast;
use crate::file_reader;
use crate::fragment_typemap::FragmentTypeMap;
use crate::schema::Schema;
use crate::selection::Selection;
use crate::selection::SelectionError;
use crate::selection::SelectionSet;
use crate::selection::TYPENAME_FIELD;
use crate::types::GraphQLType;
use crate::types::GraphQLTypeKind;
use crate::types::ObjectOrInterfaceTypeTrait;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, FragmentTypeMapBuildError>;

#[derive(Debug)]
struct PendingFragment {
    selection_set: SelectionSet,
    type_condition: String,
}

/// Collects preload fragment definitions from one or more sources and
/// validates them together when [`build`](Self::build) is called.
///
/// ```
/// use libgraphql_autorequester::fragment_typemap::FragmentTypeMapBuilder;
/// use libgraphql_autorequester::schema::Schema;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let schema = Schema::builder()
///     .load_str(None, "type Query { me: User } type User { id: ID! name: String }")?
///     .build()?;
///
/// let typemap = FragmentTypeMapBuilder::new(&schema)
///     .load_str(None, "fragment UserPreload on User { id name }")?
///     .build()?;
///
/// assert!(typemap.get("User").is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FragmentTypeMapBuilder<'schema> {
    fragments: IndexMap<String, PendingFragment>,
    schema: &'schema Schema,
    str_load_counter: u16,
}
impl<'schema> FragmentTypeMapBuilder<'schema> {
    /// Validate every collected fragment and fold them into a
    /// [`FragmentTypeMap`]. Fails on the first violation found.
    pub fn build(self) -> Result<FragmentTypeMap> {
        for (fragment_name, fragment) in &self.fragments {
            self.check_type_condition(fragment_name, &fragment.type_condition)?;
        }

        if let Some(err) = self.find_fragment_cycle() {
            return Err(err);
        }
        self.check_fragment_references()?;

        let mut entries: IndexMap<String, SelectionSet> = IndexMap::new();
        for (fragment_name, fragment) in &self.fragments {
            let expanded = self.expand_spreads(fragment_name, &fragment.selection_set)?;
            self.check_no_interface_fields(fragment_name, &fragment.type_condition, &expanded)?;
            self.check_fields(fragment_name, &fragment.type_condition, &expanded)?;

            entries.entry(fragment.type_condition.to_string())
                .or_default()
                .merge(&expanded)?;
        }

        Ok(FragmentTypeMap { entries })
    }

    fn check_fields(
        &self,
        fragment_name: &str,
        type_name: &str,
        selection_set: &SelectionSet,
    ) -> Result<()> {
        for selection in selection_set.selections() {
            let Selection::Field(field) = selection else {
                // Spreads are expanded and inline fragments rejected by now.
                continue;
            };

            if let Some(alias) = field.alias() {
                return Err(FragmentTypeMapBuildError::AliasNotAllowed {
                    alias: alias.to_string(),
                    field_name: field.name().to_string(),
                    fragment_name: fragment_name.to_string(),
                });
            }

            if field.name() == TYPENAME_FIELD {
                continue;
            }

            let field_def = self.schema.get_type(type_name)
                .and_then(GraphQLType::fields)
                .and_then(|fields| fields.get(field.name()))
                .ok_or_else(|| FragmentTypeMapBuildError::UndefinedField {
                    field_name: field.name().to_string(),
                    fragment_name: fragment_name.to_string(),
                    type_name: type_name.to_string(),
                })?;

            if let Some(nested) = field.selection_set() {
                let nested_type = field_def.type_annotation()
                    .innermost_named_type_annotation()
                    .type_name();
                self.check_fields(fragment_name, nested_type, nested)?;
            }
        }
        Ok(())
    }

    fn check_fragment_references(&self) -> Result<()> {
        for (fragment_name, fragment) in &self.fragments {
            let mut spreads = vec![];
            collect_spreads(&fragment.selection_set, &mut spreads);
            if let Some(undefined) = spreads.into_iter()
                .find(|spread_name| !self.fragments.contains_key(*spread_name)) {
                return Err(FragmentTypeMapBuildError::UndefinedFragmentReference {
                    fragment_name: fragment_name.to_string(),
                    undefined_fragment: undefined.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Fields an object type inherits from its interfaces are preloaded
    /// through a fragment on the interface, never per implementor.
    fn check_no_interface_fields(
        &self,
        fragment_name: &str,
        type_name: &str,
        selection_set: &SelectionSet,
    ) -> Result<()> {
        let Some(obj_type) = self.schema.object_type(type_name) else {
            return Ok(());
        };

        for field in selection_set.selections().iter().filter_map(Selection::as_field) {
            let declaring_iface = obj_type.interfaces().iter().find(|iface_name| {
                self.schema.get_type(iface_name)
                    .and_then(GraphQLType::as_interface)
                    .is_some_and(|iface| iface.field(field.name()).is_some())
            });
            if let Some(iface_name) = declaring_iface {
                return Err(FragmentTypeMapBuildError::InterfaceFieldNotAllowed {
                    field_name: field.name().to_string(),
                    fragment_name: fragment_name.to_string(),
                    interface_name: iface_name.to_string(),
                    type_name: type_name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_type_condition(&self, fragment_name: &str, type_name: &str) -> Result<()> {
        match self.schema.get_type(type_name) {
            None => Err(FragmentTypeMapBuildError::UnknownTypeCondition {
                fragment_name: fragment_name.to_string(),
                type_name: type_name.to_string(),
            }),

            Some(GraphQLType::Union(_)) =>
                Err(FragmentTypeMapBuildError::UnionTypeCondition {
                    fragment_name: fragment_name.to_string(),
                    type_name: type_name.to_string(),
                }),

            Some(GraphQLType::Interface(_) | GraphQLType::Object(_)) => Ok(()),

            Some(other) =>
                Err(FragmentTypeMapBuildError::NonCompositeTypeCondition {
                    fragment_name: fragment_name.to_string(),
                    type_kind: other.type_kind(),
                    type_name: type_name.to_string(),
                }),
        }
    }

    /// Substitute every fragment spread with the (recursively expanded)
    /// selections of the fragment it names. Requires a spread graph free of
    /// cycles and undefined references.
    fn expand_spreads(
        &self,
        fragment_name: &str,
        selection_set: &SelectionSet,
    ) -> Result<SelectionSet> {
        let mut expanded = SelectionSet::new();
        for selection in selection_set.selections() {
            match selection {
                Selection::Field(field) => {
                    let mut field = field.clone();
                    if let Some(nested) = field.selection_set.as_ref() {
                        field.selection_set = Some(self.expand_spreads(fragment_name, nested)?);
                    }
                    expanded.merge_selection(&Selection::Field(field))?;
                },

                Selection::FragmentSpread(spread) => {
                    let Some(target) = self.fragments.get(spread.fragment_name()) else {
                        return Err(FragmentTypeMapBuildError::UndefinedFragmentReference {
                            fragment_name: fragment_name.to_string(),
                            undefined_fragment: spread.fragment_name().to_string(),
                        });
                    };
                    expanded.merge(&self.expand_spreads(
                        spread.fragment_name(),
                        &target.selection_set,
                    )?)?;
                },

                Selection::InlineFragment(_) =>
                    return Err(FragmentTypeMapBuildError::InlineFragmentNotAllowed {
                        fragment_name: fragment_name.to_string(),
                    }),
            }
        }
        Ok(expanded)
    }

    /// Depth-first search of the spread graph. Returns the first cycle
    /// found, rotated to start at its lexicographically smallest fragment.
    fn find_fragment_cycle(&self) -> Option<FragmentTypeMapBuildError> {
        for fragment_name in self.fragments.keys() {
            let mut path = vec![];
            let mut visiting = HashSet::new();
            if let Some(cycle) = self.find_cycle_from(fragment_name, &mut path, &mut visiting) {
                return Some(FragmentTypeMapBuildError::FragmentCycleDetected {
                    cycle_path: normalize_cycle(&cycle),
                });
            }
        }
        None
    }

    fn find_cycle_from(
        &self,
        fragment_name: &str,
        path: &mut Vec<String>,
        visiting: &mut HashSet<String>,
    ) -> Option<Vec<String>> {
        if visiting.contains(fragment_name) {
            let cycle_start = path.iter().position(|name| name == fragment_name)?;
            let mut cycle = path[cycle_start..].to_vec();
            cycle.push(fragment_name.to_string());
            return Some(cycle);
        }

        // Undefined references are reported separately.
        let fragment = self.fragments.get(fragment_name)?;

        path.push(fragment_name.to_string());
        visiting.insert(fragment_name.to_string());

        let mut spreads = vec![];
        collect_spreads(&fragment.selection_set, &mut spreads);
        for spread_name in spreads {
            if let Some(cycle) = self.find_cycle_from(spread_name, path, visiting) {
                return Some(cycle);
            }
        }

        path.pop();
        visiting.remove(fragment_name);
        None
    }

    pub fn load_ast(
        mut self,
        file_path: Option<PathBuf>,
        doc: &ast::query::Document,
    ) -> Result<Self> {
        for def in &doc.definitions {
            let ast::query::Definition::Fragment(frag_def) = def else {
                return Err(FragmentTypeMapBuildError::NonFragmentDefinition {
                    file: file_path,
                });
            };

            if self.fragments.contains_key(frag_def.name.as_str()) {
                return Err(FragmentTypeMapBuildError::DuplicateFragmentDefinition {
                    fragment_name: frag_def.name.to_string(),
                });
            }

            let ast::query::TypeCondition::On(type_condition) = &frag_def.type_condition;
            self.fragments.insert(frag_def.name.to_string(), PendingFragment {
                selection_set: SelectionSet::from_ast(&frag_def.selection_set),
                type_condition: type_condition.to_string(),
            });
        }
        Ok(self)
    }

    pub fn load_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let content = file_reader::read_content(file_path)
            .map_err(FragmentTypeMapBuildError::FileReadError)?;
        self.load_str(Some(file_path.to_path_buf()), content.as_str())
    }

    pub fn load_str(mut self, file_path: Option<PathBuf>, content: &str) -> Result<Self> {
        let file_path =
            if let Some(file_path) = file_path {
                file_path
            } else {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            };

        let ast_doc = ast::query::parse(content)
            .map_err(|err| FragmentTypeMapBuildError::ParseError {
                file: file_path.to_owned(),
                err: err.to_string(),
            })?;

        self.load_ast(Some(file_path), &ast_doc)
    }

    pub fn new(schema: &'schema Schema) -> Self {
        Self {
            fragments: IndexMap::new(),
            schema,
            str_load_counter: 0,
        }
    }
}

fn collect_spreads<'a>(selection_set: &'a SelectionSet, spreads: &mut Vec<&'a str>) {
    for selection in selection_set.selections() {
        match selection {
            Selection::FragmentSpread(spread) => spreads.push(spread.fragment_name()),
            Selection::Field(_) | Selection::InlineFragment(_) => {
                if let Some(nested) = selection.selection_set() {
                    collect_spreads(nested, spreads);
                }
            },
        }
    }
}

/// Rotate a cycle (`[B, C, A, B]`) so it starts at its lexicographically
/// smallest member (`[A, B, C, A]`), making rotations of the same cycle
/// compare equal.
fn normalize_cycle(cycle: &[String]) -> Vec<String> {
    let Some((_, members)) = cycle.split_last() else {
        return vec![];
    };

    let min_idx = members.iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    let mut normalized = Vec::with_capacity(cycle.len());
    normalized.extend_from_slice(&members[min_idx..]);
    normalized.extend_from_slice(&members[..min_idx]);
    if let Some(first) = normalized.first().cloned() {
        normalized.push(first);
    }
    normalized
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FragmentTypeMapBuildError {
    #[error("Preload fields must not be aliased (`{alias}: {field_name}` in fragment `{fragment_name}`).")]
    AliasNotAllowed {
        alias: String,
        field_name: String,
        fragment_name: String,
    },

    #[error("Duplicate fragment definition: `{fragment_name}`")]
    DuplicateFragmentDefinition {
        fragment_name: String,
    },

    #[error(transparent)]
    FileReadError(file_reader::ReadContentError),

    #[error("Fragment cycle detected: {}", .cycle_path.join(" → "))]
    FragmentCycleDetected {
        cycle_path: Vec<String>,
    },

    #[error("Inline fragments are not allowed in preload fragments (found in `{fragment_name}`).")]
    InlineFragmentNotAllowed {
        fragment_name: String,
    },

    #[error(
        "`{type_name}.{field_name}` must not appear in the `{fragment_name}` preload \
        fragment as it is declared by the `{interface_name}` interface; preload it \
        through a fragment on `{interface_name}` instead."
    )]
    InterfaceFieldNotAllowed {
        field_name: String,
        fragment_name: String,
        interface_name: String,
        type_name: String,
    },

    #[error("Preload fragments cannot be declared on the {type_kind} type `{type_name}` (fragment `{fragment_name}`).")]
    NonCompositeTypeCondition {
        fragment_name: String,
        type_kind: GraphQLTypeKind,
        type_name: String,
    },

    #[error("Preload documents may only contain fragment definitions.")]
    NonFragmentDefinition {
        file: Option<PathBuf>,
    },

    #[error("Failed to parse `{}`: {err}", file.display())]
    ParseError {
        file: PathBuf,
        err: String,
    },

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("The `{type_name}` type has no field named `{field_name}` (fragment `{fragment_name}`).")]
    UndefinedField {
        field_name: String,
        fragment_name: String,
        type_name: String,
    },

    #[error("Fragment `{fragment_name}` references undefined fragment `{undefined_fragment}`.")]
    UndefinedFragmentReference {
        fragment_name: String,
        undefined_fragment: String,
    },

    #[error(
        "Preload fragments cannot be declared on the union type `{type_name}` \
        (fragment `{fragment_name}`); declare one fragment per member type instead."
    )]
    UnionTypeCondition {
        fragment_name: String,
        type_name: String,
    },

    #[error("Unknown type `{type_name}` in the type condition of fragment `{fragment_name}`.")]
    UnknownTypeCondition {
        fragment_name: String,
        type_name: String,
    },
}
