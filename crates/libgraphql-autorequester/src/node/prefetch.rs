use crate::ast;
use crate::coercion::arguments_cache_key;
use crate::coercion::coerce_arguments;
use crate::node::ProxyNode;
use crate::requester::AutoRequesterError;
use crate::requester::RequesterShared;
use crate::selection::FieldSelection;
use crate::selection::InlineFragment;
use crate::selection::SelectionError;
use crate::selection::SelectionSet;
use crate::selection::TYPENAME_FIELD;
use crate::types::GraphQLType;
use crate::Value;
use std::collections::HashMap;

type JsonMap = serde_json::Map<String, serde_json::Value>;
type Result<T> = std::result::Result<T, AutoRequesterError>;

impl ProxyNode {
    /// Warm this node with a selection written by someone else (typically
    /// the sub-selection an outer GraphQL server received for a field it
    /// forwards to this node) in a single round trip.
    ///
    /// `document` holds one query (anonymous, `{ ... }`, or named) plus any
    /// fragment definitions it spreads; `variables` supplies the values of
    /// the variables it references.
    ///
    /// Before the request is issued the selection is rewritten into the
    /// shape property access asks for, so that later reads are answered
    /// from the prefetched data:
    ///
    /// - fragment spreads are inlined, and inline fragments that apply to
    ///   the selected type are flattened (others are dropped, or kept as
    ///   type-scoped selections beneath an abstract type);
    /// - fields the schema does not know are dropped;
    /// - aliases are removed, and argument-taking fields are aliased to
    ///   their arguments cache key instead;
    /// - every composite selection gains `__typename` and its related
    ///   preload fragments.
    ///
    /// Field-level errors in the response are not reported here; they
    /// surface on the affected properties.
    pub async fn prefetch(&self, document: &str, variables: serde_json::Value) -> Result<()> {
        let variables = match variables {
            serde_json::Value::Null => JsonMap::new(),
            serde_json::Value::Object(variables) => variables,
            other => return Err(AutoRequesterError::InvalidVariables {
                found: other.to_string(),
            }),
        };

        let doc = ast::query::parse(document)
            .map_err(|err| SelectionError::ParseError(err.to_string()))?;
        let mut fragments = HashMap::new();
        let mut operation = None;
        for def in &doc.definitions {
            let selection_set = match def {
                ast::query::Definition::Fragment(fragment) => {
                    fragments.insert(fragment.name.as_str(), fragment);
                    continue;
                },
                ast::query::Definition::Operation(
                    ast::query::OperationDefinition::SelectionSet(selection_set),
                ) => selection_set,
                ast::query::Definition::Operation(
                    ast::query::OperationDefinition::Query(query),
                ) => &query.selection_set,
                ast::query::Definition::Operation(
                    ast::query::OperationDefinition::Mutation(_),
                ) => return Err(SelectionError::UnsupportedOperation {
                    operation: "mutation".to_string(),
                }.into()),
                ast::query::Definition::Operation(
                    ast::query::OperationDefinition::Subscription(_),
                ) => return Err(SelectionError::UnsupportedOperation {
                    operation: "subscription".to_string(),
                }.into()),
            };
            if operation.replace(selection_set).is_some() {
                return Err(SelectionError::UnsupportedDocument.into());
            }
        }
        let operation = operation.ok_or(SelectionError::UnsupportedDocument)?;

        let normalizer = PrefetchNormalizer {
            fragments,
            requester: &self.core.requester,
            variables: &variables,
        };
        let selection_set = normalizer.normalize(
            &self.core.type_name,
            operation,
            &mut vec![],
        )?;

        self.core.execute(selection_set).await?;
        Ok(())
    }
}

struct PrefetchNormalizer<'a> {
    fragments: HashMap<&'a str, &'a ast::query::FragmentDefinition>,
    requester: &'a RequesterShared,
    variables: &'a JsonMap,
}
impl<'a> PrefetchNormalizer<'a> {
    fn applies_to(&self, type_condition: &str, type_name: &str) -> bool {
        let schema = self.requester.schema();
        type_condition == type_name
            || schema.is_possible_type(type_condition, type_name)
            || schema.get_type(type_name)
                .and_then(GraphQLType::as_interface)
                .is_some_and(|iface| iface.implements_interface(type_condition))
    }

    fn collect(
        &self,
        type_name: &str,
        ast_set: &'a ast::query::SelectionSet,
        into: &mut SelectionSet,
        spread_stack: &mut Vec<&'a str>,
    ) -> Result<()> {
        for item in &ast_set.items {
            match item {
                ast::query::Selection::Field(ast_field) => {
                    if let Some(field) = self.normalize_field(type_name, ast_field, spread_stack)? {
                        into.merge_selection(&field.into())?;
                    }
                },

                ast::query::Selection::FragmentSpread(spread) => {
                    let fragment_name = spread.fragment_name.as_str();
                    let fragment = self.fragments.get(fragment_name).ok_or_else(|| {
                        SelectionError::UndefinedFragment {
                            fragment_name: fragment_name.to_string(),
                        }
                    })?;
                    if spread_stack.contains(&fragment_name) {
                        return Err(SelectionError::FragmentSpreadCycle {
                            fragment_name: fragment_name.to_string(),
                        }.into());
                    }

                    let ast::query::TypeCondition::On(type_condition) = &fragment.type_condition;
                    spread_stack.push(fragment_name);
                    self.collect_fragment(
                        type_name,
                        Some(type_condition.as_str()),
                        &fragment.selection_set,
                        into,
                        spread_stack,
                    )?;
                    spread_stack.pop();
                },

                ast::query::Selection::InlineFragment(inline) => {
                    let type_condition = inline.type_condition.as_ref().map(
                        |ast::query::TypeCondition::On(type_name)| type_name.as_str(),
                    );
                    self.collect_fragment(
                        type_name,
                        type_condition,
                        &inline.selection_set,
                        into,
                        spread_stack,
                    )?;
                },
            }
        }
        Ok(())
    }

    fn collect_fragment(
        &self,
        type_name: &str,
        type_condition: Option<&str>,
        ast_set: &'a ast::query::SelectionSet,
        into: &mut SelectionSet,
        spread_stack: &mut Vec<&'a str>,
    ) -> Result<()> {
        let schema = self.requester.schema();
        match type_condition {
            None => self.collect(type_name, ast_set, into, spread_stack),

            Some(type_condition) if self.applies_to(type_condition, type_name) =>
                self.collect(type_name, ast_set, into, spread_stack),

            Some(type_condition)
                if schema.get_type(type_name).is_some_and(GraphQLType::is_abstract)
                    && schema.do_types_overlap(type_name, type_condition) => {
                let mut scoped = SelectionSet::new();
                self.collect(type_condition, ast_set, &mut scoped, spread_stack)?;
                if !scoped.is_empty() {
                    into.merge_selection(&InlineFragment::new(type_condition, scoped).into())?;
                }
                Ok(())
            },

            Some(_) => Ok(()),
        }
    }

    /// The normalized selection of a composite value of `type_name`:
    /// `__typename`, then what `ast_set` selects, then the related preload
    /// fragments.
    fn normalize(
        &self,
        type_name: &str,
        ast_set: &'a ast::query::SelectionSet,
        spread_stack: &mut Vec<&'a str>,
    ) -> Result<SelectionSet> {
        let mut normalized = SelectionSet::from_selections(vec![
            FieldSelection::new(TYPENAME_FIELD).into(),
        ]);
        self.collect(type_name, ast_set, &mut normalized, spread_stack)?;
        normalized.merge(
            &self.requester.fragment_typemap().related_fragments(self.requester.schema(), type_name)?,
        )?;
        Ok(normalized)
    }

    fn normalize_field(
        &self,
        type_name: &str,
        ast_field: &'a ast::query::Field,
        spread_stack: &mut Vec<&'a str>,
    ) -> Result<Option<FieldSelection>> {
        if ast_field.name == TYPENAME_FIELD {
            return Ok(Some(FieldSelection::new(TYPENAME_FIELD)));
        }

        let schema = self.requester.schema();
        let Some(field) = schema.get_type(type_name)
            .and_then(GraphQLType::fields)
            .and_then(|fields| fields.get(ast_field.name.as_str())) else {
            return Ok(None);
        };

        let mut selection = FieldSelection::new(field.name());
        if !field.parameters().is_empty() {
            let raw_arguments: JsonMap = ast_field.arguments.iter()
                .filter_map(|(arg_name, ast_value)| {
                    let raw_value = Value::from_ast(ast_value).to_json(self.variables)?;
                    Some((arg_name.to_string(), raw_value))
                })
                .collect();
            let arguments = coerce_arguments(schema, field, &raw_arguments)?;
            selection = selection
                .with_alias(arguments_cache_key(field.name(), &arguments))
                .with_arguments(arguments);
        }

        let output_type = field.type_annotation()
            .innermost_named_type_annotation()
            .graphql_type(schema)
            .filter(|output_type| output_type.is_composite());
        if let Some(output_type) = output_type {
            selection = selection.with_selection_set(self.normalize(
                output_type.name(),
                &ast_field.selection_set,
                spread_stack,
            )?);
        }

        Ok(Some(selection))
    }
}
