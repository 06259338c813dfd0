use crate::ast;
use crate::selection::SelectionError;
use crate::value::Value;

fn synthetic_pos() -> graphql_parser::Pos {
    graphql_parser::Pos { line: 0, column: 0 }
}

/// An ordered collection of [`Selection`]s.
///
/// Insertion order is kept so that printed documents are stable, but it is
/// not significant to any of the algebra defined over selection sets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSet {
    pub(crate) selections: Vec<Selection>,
}
impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_selections(selections: Vec<Selection>) -> Self {
        Self { selections }
    }

    pub(crate) fn from_ast(ast_set: &ast::query::SelectionSet) -> Self {
        Self {
            selections: ast_set.items.iter().map(Selection::from_ast).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Parse a document holding a single anonymous selection set, e.g.
    /// `{ id name friends { id } }`.
    pub fn parse(content: &str) -> Result<Self, SelectionError> {
        let doc = ast::query::parse(content)
            .map_err(|err| SelectionError::ParseError(err.to_string()))?;
        match doc.definitions.as_slice() {
            [ast::query::Definition::Operation(
                ast::query::OperationDefinition::SelectionSet(ast_set),
            )] => Ok(Self::from_ast(ast_set)),
            _ => Err(SelectionError::UnsupportedDocument),
        }
    }

    /// Append a selection without merging it with any similar selection
    /// already present.
    pub fn push(&mut self, selection: Selection) {
        self.selections.push(selection);
    }

    pub fn selections(&self) -> &[Selection] {
        self.selections.as_slice()
    }

    pub(crate) fn to_ast(&self) -> ast::query::SelectionSet {
        ast::query::SelectionSet {
            span: (synthetic_pos(), synthetic_pos()),
            items: self.selections.iter().map(Selection::to_ast).collect(),
        }
    }

    /// An anonymous query document selecting this set from the root.
    pub fn to_document(&self) -> ast::query::Document {
        ast::query::Document {
            definitions: vec![
                ast::query::Definition::Operation(
                    ast::query::OperationDefinition::SelectionSet(self.to_ast()),
                ),
            ],
        }
    }
}
impl std::fmt::Display for SelectionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_document())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(FieldSelection),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}
impl Selection {
    pub fn as_field(&self) -> Option<&FieldSelection> {
        if let Self::Field(field) = self {
            Some(field)
        } else {
            None
        }
    }

    pub(crate) fn from_ast(ast_selection: &ast::query::Selection) -> Self {
        match ast_selection {
            ast::query::Selection::Field(ast_field) =>
                Selection::Field(FieldSelection::from_ast(ast_field)),

            ast::query::Selection::FragmentSpread(ast_spread) =>
                Selection::FragmentSpread(FragmentSpread {
                    fragment_name: ast_spread.fragment_name.clone(),
                }),

            ast::query::Selection::InlineFragment(ast_inline) =>
                Selection::InlineFragment(InlineFragment {
                    selection_set: SelectionSet::from_ast(&ast_inline.selection_set),
                    type_condition: ast_inline.type_condition.as_ref().map(
                        |ast::query::TypeCondition::On(type_name)| type_name.clone(),
                    ),
                }),
        }
    }

    /// The nested selection set, if this kind of selection carries one.
    pub fn selection_set(&self) -> Option<&SelectionSet> {
        match self {
            Self::Field(field) => field.selection_set.as_ref(),
            Self::FragmentSpread(_) => None,
            Self::InlineFragment(inline) => Some(&inline.selection_set),
        }
    }

    pub(crate) fn selection_set_mut(&mut self) -> Option<&mut SelectionSet> {
        match self {
            Self::Field(field) => field.selection_set.as_mut(),
            Self::FragmentSpread(_) => None,
            Self::InlineFragment(inline) => Some(&mut inline.selection_set),
        }
    }

    pub(crate) fn to_ast(&self) -> ast::query::Selection {
        match self {
            Self::Field(field) =>
                ast::query::Selection::Field(field.to_ast()),

            Self::FragmentSpread(spread) =>
                ast::query::Selection::FragmentSpread(ast::query::FragmentSpread {
                    position: synthetic_pos(),
                    fragment_name: spread.fragment_name.clone(),
                    directives: vec![],
                }),

            Self::InlineFragment(inline) =>
                ast::query::Selection::InlineFragment(ast::query::InlineFragment {
                    position: synthetic_pos(),
                    type_condition: inline.type_condition.as_ref().map(
                        |type_name| ast::query::TypeCondition::On(type_name.clone()),
                    ),
                    directives: vec![],
                    selection_set: inline.selection_set.to_ast(),
                }),
        }
    }
}
impl From<FieldSelection> for Selection {
    fn from(field: FieldSelection) -> Self {
        Self::Field(field)
    }
}
impl From<InlineFragment> for Selection {
    fn from(inline: InlineFragment) -> Self {
        Self::InlineFragment(inline)
    }
}

/// A single field selection: `alias: name(arguments) { ... }`.
///
/// Leaf fields carry no nested set (`selection_set` is `None`), composite
/// fields always carry one, even when it is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSelection {
    pub(crate) alias: Option<String>,
    pub(crate) arguments: Vec<(String, Value)>,
    pub(crate) name: String,
    pub(crate) selection_set: Option<SelectionSet>,
}
impl FieldSelection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            arguments: vec![],
            name: name.into(),
            selection_set: None,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn arguments(&self) -> &[(String, Value)] {
        self.arguments.as_slice()
    }

    pub(crate) fn from_ast(ast_field: &ast::query::Field) -> Self {
        Self {
            alias: ast_field.alias.clone(),
            arguments: ast_field.arguments.iter().map(|(name, ast_value)| {
                (name.clone(), Value::from_ast(ast_value))
            }).collect(),
            name: ast_field.name.clone(),
            selection_set: if ast_field.selection_set.items.is_empty() {
                None
            } else {
                Some(SelectionSet::from_ast(&ast_field.selection_set))
            },
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The key this field's value lands under in a response: the alias when
    /// one is present, otherwise the field name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }

    pub fn selection_set(&self) -> Option<&SelectionSet> {
        self.selection_set.as_ref()
    }

    pub(crate) fn to_ast(&self) -> ast::query::Field {
        ast::query::Field {
            position: synthetic_pos(),
            alias: self.alias.clone(),
            name: self.name.clone(),
            arguments: self.arguments.iter().map(|(name, value)| {
                (name.clone(), value.to_ast())
            }).collect(),
            directives: vec![],
            selection_set: self.selection_set.as_ref()
                .map(SelectionSet::to_ast)
                .unwrap_or_else(|| SelectionSet::new().to_ast()),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_arguments(mut self, arguments: Vec<(String, Value)>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_selection_set(mut self, selection_set: SelectionSet) -> Self {
        self.selection_set = Some(selection_set);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub(crate) fragment_name: String,
}
impl FragmentSpread {
    pub fn fragment_name(&self) -> &str {
        self.fragment_name.as_str()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub(crate) selection_set: SelectionSet,
    pub(crate) type_condition: Option<String>,
}
impl InlineFragment {
    pub fn new(type_condition: impl Into<String>, selection_set: SelectionSet) -> Self {
        Self {
            selection_set,
            type_condition: Some(type_condition.into()),
        }
    }

    pub fn selection_set(&self) -> &SelectionSet {
        &self.selection_set
    }

    pub fn type_condition(&self) -> Option<&str> {
        self.type_condition.as_deref()
    }
}
