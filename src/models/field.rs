//! Collaborator traits between the engine and whatever owns the inputs.
//!
//! The engine never walks a DOM or any other widget tree itself. It reads
//! and writes values through [`FieldAccessor`], resolves cross-field
//! references through [`FieldLookup`] and enumerates a form's inputs through
//! [`FormAccessor`].

/// One input and its directive attributes.
pub trait FieldAccessor {
    /// Key used in the form error map (the input's `name`).
    fn identifier(&self) -> &str;

    fn value(&self) -> &str;

    fn set_value(&mut self, value: String);

    fn attribute(&self, key: &str) -> Option<&str>;
}

/// Reference to another field as written in a `consistency` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldReference<'a> {
    /// `#password` addresses a field by element id.
    Id(&'a str),
    /// A bare `password` addresses a field by name.
    Name(&'a str),
}

impl<'a> FieldReference<'a> {
    pub fn parse(reference: &'a str) -> Self {
        match reference.strip_prefix('#') {
            Some(id) => FieldReference::Id(id),
            None => FieldReference::Name(reference),
        }
    }
}

/// Resolves the current value of another field.
pub trait FieldLookup {
    fn lookup(&self, reference: &FieldReference<'_>) -> Option<&str>;
}

/// Lookup for fields validated outside of any form: resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl FieldLookup for NoLookup {
    fn lookup(&self, _reference: &FieldReference<'_>) -> Option<&str> {
        None
    }
}

/// A container of fields in document order.
pub trait FormAccessor: FieldLookup {
    type Field: FieldAccessor;

    fn field_count(&self) -> usize;

    fn field(&self, index: usize) -> Option<&Self::Field>;

    fn field_mut(&mut self, index: usize) -> Option<&mut Self::Field>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference() {
        assert_eq!(FieldReference::parse("#password"), FieldReference::Id("password"));
        assert_eq!(FieldReference::parse("password"), FieldReference::Name("password"));
        assert_eq!(FieldReference::parse("#"), FieldReference::Id(""));
    }

    #[test]
    fn test_no_lookup() {
        assert_eq!(NoLookup.lookup(&FieldReference::Name("anything")), None);
    }
}
