/// Test applied to a single character by the scanning primitives
///
/// Implemented for a plain `char` (equality), a slice of chars (membership)
/// and any `Fn(char) -> bool`, so `char::is_whitespace`, `'{'` and
/// `|c| c != '<'` can all be passed where a predicate is expected.
pub trait CharPredicate {
    fn matches(&self, c: char) -> bool;
}

impl CharPredicate for char {
    #[inline]
    fn matches(&self, c: char) -> bool {
        *self == c
    }
}

impl CharPredicate for &[char] {
    #[inline]
    fn matches(&self, c: char) -> bool {
        self.contains(&c)
    }
}

impl<F> CharPredicate for F
where
    F: Fn(char) -> bool,
{
    #[inline]
    fn matches(&self, c: char) -> bool {
        self(c)
    }
}

/// Negation of a predicate
#[derive(Debug, Clone, Copy)]
pub struct Not<P>(P);

impl<P: CharPredicate> CharPredicate for Not<P> {
    #[inline]
    fn matches(&self, c: char) -> bool {
        !self.0.matches(c)
    }
}

/// Matches when both predicates match
#[derive(Debug, Clone, Copy)]
pub struct And<P1, P2>(P1, P2);

impl<P1: CharPredicate, P2: CharPredicate> CharPredicate for And<P1, P2> {
    #[inline]
    fn matches(&self, c: char) -> bool {
        self.0.matches(c) && self.1.matches(c)
    }
}

/// Matches when either predicate matches
#[derive(Debug, Clone, Copy)]
pub struct Or<P1, P2>(P1, P2);

impl<P1: CharPredicate, P2: CharPredicate> CharPredicate for Or<P1, P2> {
    #[inline]
    fn matches(&self, c: char) -> bool {
        self.0.matches(c) || self.1.matches(c)
    }
}

/// Matches any character contained in the given set
#[derive(Debug, Clone, Copy)]
pub struct OneOf<'set>(&'set str);

impl CharPredicate for OneOf<'_> {
    #[inline]
    fn matches(&self, c: char) -> bool {
        self.0.contains(c)
    }
}

/// Matches every character
#[derive(Debug, Clone, Copy)]
pub struct Any;

impl CharPredicate for Any {
    #[inline]
    fn matches(&self, _: char) -> bool {
        true
    }
}

/// Convenience function to negate a predicate
pub fn not<P: CharPredicate>(predicate: P) -> Not<P> {
    Not(predicate)
}

/// Convenience function to combine two predicates with logical and
pub fn and<P1: CharPredicate, P2: CharPredicate>(first: P1, second: P2) -> And<P1, P2> {
    And(first, second)
}

/// Convenience function to combine two predicates with logical or
pub fn or<P1: CharPredicate, P2: CharPredicate>(first: P1, second: P2) -> Or<P1, P2> {
    Or(first, second)
}

/// Convenience function to match any character of `set`
pub fn one_of(set: &str) -> OneOf<'_> {
    OneOf(set)
}

/// Convenience function to match every character
pub fn any() -> Any {
    Any
}

/// Extension trait to add `.not()`, `.and()` and `.or()` to predicates
pub trait CharPredicateExt: CharPredicate + Sized {
    fn not(self) -> Not<Self> {
        Not(self)
    }

    fn and<P: CharPredicate>(self, other: P) -> And<Self, P> {
        And(self, other)
    }

    fn or<P: CharPredicate>(self, other: P) -> Or<Self, P> {
        Or(self, other)
    }
}

impl<P: CharPredicate> CharPredicateExt for P {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_predicate() {
        assert!('a'.matches('a'));
        assert!(!'a'.matches('b'));
    }

    #[test]
    fn test_slice_predicate() {
        let brackets: &[char] = &['[', ']'];
        assert!(brackets.matches('['));
        assert!(!brackets.matches('('));
    }

    #[test]
    fn test_function_predicate() {
        assert!(char::is_whitespace.matches('\t'));
        assert!((|c: char| c.is_ascii_digit()).matches('7'));
        assert!(!char::is_alphabetic.matches('7'));
    }

    #[test]
    fn test_not() {
        let not_newline = not('\n');
        assert!(not_newline.matches('a'));
        assert!(!not_newline.matches('\n'));
    }

    #[test]
    fn test_not_method_syntax() {
        let predicate = char::is_whitespace.not();
        assert!(predicate.matches('x'));
        assert!(!predicate.matches(' '));
    }

    #[test]
    fn test_and_or() {
        let upper_letter = char::is_alphabetic.and(char::is_uppercase);
        assert!(upper_letter.matches('Q'));
        assert!(!upper_letter.matches('q'));

        let sign = or('+', '-');
        assert!(sign.matches('+'));
        assert!(sign.matches('-'));
        assert!(!sign.matches('*'));
    }

    #[test]
    fn test_complex_chain() {
        // Identifier tail: letters, digits or underscore, but never a dash
        let tail = char::is_alphanumeric.or('_').and(not('-'));
        assert!(tail.matches('_'));
        assert!(tail.matches('9'));
        assert!(!tail.matches('-'));
    }

    #[test]
    fn test_one_of() {
        let number = one_of("0123456789.eE+-");
        assert!(number.matches('e'));
        assert!(number.matches('5'));
        assert!(!number.matches(','));
    }

    #[test]
    fn test_any() {
        assert!(any().matches('\0'));
        assert!(any().matches('中'));
    }

    #[test]
    fn test_predicate_by_reference() {
        let digit = |c: char| c.is_ascii_digit();
        let by_ref = &digit;
        assert!(by_ref.matches('1'));
        assert!(!by_ref.matches('x'));
    }
}
