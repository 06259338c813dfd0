use crate::selection::SelectionError;
use crate::selection::SelectionSet;

type Result<T> = std::result::Result<T, SelectionError>;

fn parse(content: &str) -> SelectionSet {
    SelectionSet::parse(content).unwrap()
}

mod merge {
    use super::*;

    #[test]
    fn appends_missing_selections() -> Result<()> {
        let mut target = parse("{ a }");
        target.merge(&parse("{ b c }"))?;
        assert_eq!(target, parse("{ a b c }"));
        Ok(())
    }

    #[test]
    fn merges_nested_selections_of_similar_fields() -> Result<()> {
        let mut target = parse("{ a { x } b }");
        target.merge(&parse("{ a { y { z } } }"))?;
        assert_eq!(target, parse("{ a { x y { z } } b }"));
        Ok(())
    }

    #[test]
    fn treats_argument_order_as_insignificant() -> Result<()> {
        let mut target = parse("{ f(a: 1, b: 2) { x } }");
        target.merge(&parse("{ f(b: 2, a: 1) { y } }"))?;
        assert_eq!(target, parse("{ f(a: 1, b: 2) { x y } }"));
        Ok(())
    }

    #[test]
    fn keeps_differently_aliased_fields_apart() -> Result<()> {
        let mut target = parse("{ small: picture(size: 10) }");
        target.merge(&parse("{ large: picture(size: 200) picture }"))?;
        assert_eq!(target.len(), 3);
        Ok(())
    }

    #[test]
    fn merges_inline_fragments_by_type_condition() -> Result<()> {
        let mut target = parse("{ ... on User { id } }");
        target.merge(&parse("{ ... on User { name } ... on Bot { id } }"))?;
        assert_eq!(target, parse("{ ... on User { id name } ... on Bot { id } }"));
        Ok(())
    }

    #[test]
    fn into_an_empty_set_copies_the_addition() -> Result<()> {
        let addition = parse("{ a(x: [1, 2]) { b } ... on T { c } }");
        let mut target = SelectionSet::new();
        target.merge(&addition)?;
        assert_eq!(target, addition);
        Ok(())
    }

    #[test]
    fn rejects_fragment_spreads() {
        let mut target = parse("{ a }");
        let result = target.merge(&parse("{ ...UserFields }"));
        assert_eq!(result, Err(SelectionError::UnexpandedFragmentSpread {
            fragment_name: "UserFields".to_string(),
        }));
    }
}

mod left_outer_join {
    use super::*;

    #[test]
    fn keeps_only_uncovered_selections() -> Result<()> {
        let wanted = parse("{ a b { c d } e }");
        let have = parse("{ a b { c } }");
        assert_eq!(wanted.left_outer_join(&have)?, parse("{ b { d } e }"));
        Ok(())
    }

    #[test]
    fn fully_covered_selection_yields_empty_set() -> Result<()> {
        let wanted = parse("{ a { b } }");
        let have = parse("{ z a { b c } }");
        assert!(wanted.left_outer_join(&have)?.is_empty());
        Ok(())
    }

    #[test]
    fn distinguishes_fields_by_arguments() -> Result<()> {
        let wanted = parse("{ f(a: 1) }");
        let have = parse("{ f(a: 2) }");
        assert_eq!(wanted.left_outer_join(&have)?, wanted);
        Ok(())
    }

    #[test]
    fn covers_objects_with_reordered_entries() -> Result<()> {
        let wanted = parse("{ f(filter: { a: 1, b: \"x\" }) }");
        let have = parse("{ f(filter: { b: \"x\", a: 1 }) }");
        assert!(wanted.left_outer_join(&have)?.is_empty());
        Ok(())
    }

    #[test]
    fn descends_into_inline_fragments() -> Result<()> {
        let wanted = parse("{ ... on User { id name } }");
        let have = parse("{ ... on User { id } ... on Bot { name } }");
        assert_eq!(wanted.left_outer_join(&have)?, parse("{ ... on User { name } }"));
        Ok(())
    }

    #[test]
    fn rejects_fragment_spreads_on_either_side() {
        let spread = parse("{ ...F }");
        let plain = parse("{ a }");
        assert!(spread.left_outer_join(&plain).is_err());
        assert!(plain.left_outer_join(&spread).is_err());
    }
}
