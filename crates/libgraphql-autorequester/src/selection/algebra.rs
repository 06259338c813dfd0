use crate::selection::FieldSelection;
use crate::selection::InlineFragment;
use crate::selection::Selection;
use crate::selection::SelectionError;
use crate::selection::SelectionSet;
use crate::value::are_similar_entries;

type Result<T> = std::result::Result<T, SelectionError>;

impl SelectionSet {
    /// Describes what `self` asks for that `have` does not already cover.
    ///
    /// A selection with no similar counterpart in `have` is kept whole. One
    /// with a similar counterpart is kept only if its nested selections are
    /// not fully covered, and then only with the uncovered part nested
    /// beneath it. Selections without a nested set on either side count as
    /// covered.
    pub fn left_outer_join(&self, have: &SelectionSet) -> Result<SelectionSet> {
        let mut missing = SelectionSet::new();
        for wanted in &self.selections {
            match have.find_similar(wanted)? {
                None => missing.merge_selection(wanted)?,

                Some(existing) => {
                    let (Some(wanted_set), Some(existing_set)) = (
                        wanted.selection_set(),
                        existing.selection_set(),
                    ) else {
                        continue;
                    };

                    let uncovered = wanted_set.left_outer_join(existing_set)?;
                    if !uncovered.is_empty() {
                        missing.merge_selection(&wanted.with_nested(uncovered))?;
                    }
                },
            }
        }
        Ok(missing)
    }

    /// Merge every selection of `addition` into `self`, in order.
    pub fn merge(&mut self, addition: &SelectionSet) -> Result<()> {
        for selection in &addition.selections {
            self.merge_selection(selection)?;
        }
        Ok(())
    }

    /// Merge one selection into `self`.
    ///
    /// When `self` already holds a similar selection, the incoming nested
    /// selections are merged into it recursively. Otherwise a copy of the
    /// incoming selection (with an empty nested set) is appended first and
    /// the nested selections are merged into that copy.
    pub fn merge_selection(&mut self, selection: &Selection) -> Result<()> {
        if let Selection::FragmentSpread(spread) = selection {
            return Err(SelectionError::UnexpandedFragmentSpread {
                fragment_name: spread.fragment_name.clone(),
            });
        }

        let target_idx = match self.position_of_similar(selection)? {
            Some(idx) => idx,
            None => {
                self.selections.push(selection.with_nested(SelectionSet::new()));
                self.selections.len() - 1
            },
        };

        if let (Some(target_set), Some(incoming_set)) = (
            self.selections[target_idx].selection_set_mut(),
            selection.selection_set(),
        ) {
            target_set.merge(incoming_set)?;
        }
        Ok(())
    }

    fn find_similar(&self, selection: &Selection) -> Result<Option<&Selection>> {
        Ok(self.position_of_similar(selection)?.map(|idx| &self.selections[idx]))
    }

    fn position_of_similar(&self, selection: &Selection) -> Result<Option<usize>> {
        for (idx, candidate) in self.selections.iter().enumerate() {
            if candidate.is_similar(selection)? {
                return Ok(Some(idx));
            }
        }
        Ok(None)
    }
}

impl Selection {
    /// Two selections are similar when they would occupy the same place in
    /// a merged selection set: fields with the same response key, name and
    /// (order-insensitively) equal arguments, or inline fragments with the
    /// same type condition.
    ///
    /// Nested selections are not compared.
    pub fn is_similar(&self, other: &Selection) -> Result<bool> {
        match (self, other) {
            (Selection::FragmentSpread(spread), _)
                | (_, Selection::FragmentSpread(spread)) =>
                Err(SelectionError::UnexpandedFragmentSpread {
                    fragment_name: spread.fragment_name.clone(),
                }),

            (Selection::Field(left), Selection::Field(right)) =>
                Ok(left.is_similar(right)),

            (Selection::InlineFragment(left), Selection::InlineFragment(right)) =>
                Ok(left.type_condition == right.type_condition),

            _ => Ok(false),
        }
    }

    /// A copy of this selection whose nested set (if it has one) is
    /// replaced with `nested`.
    fn with_nested(&self, nested: SelectionSet) -> Selection {
        match self {
            Selection::Field(field) => Selection::Field(FieldSelection {
                alias: field.alias.clone(),
                arguments: field.arguments.clone(),
                name: field.name.clone(),
                selection_set: field.selection_set.as_ref().map(|_| nested),
            }),

            Selection::InlineFragment(inline) =>
                Selection::InlineFragment(InlineFragment {
                    selection_set: nested,
                    type_condition: inline.type_condition.clone(),
                }),

            Selection::FragmentSpread(spread) =>
                Selection::FragmentSpread(spread.clone()),
        }
    }
}

impl FieldSelection {
    pub fn is_similar(&self, other: &FieldSelection) -> bool {
        self.response_key() == other.response_key()
            && self.name == other.name
            && are_similar_entries(
                self.arguments.iter().map(|(name, value)| (name.as_str(), value)),
                other.arguments.iter().map(|(name, value)| (name.as_str(), value)),
            )
    }
}
