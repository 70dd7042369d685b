//! Owned element tree and the lookups the registry queries rely on.

use std::slice;

/// A single XML element with its direct text and child elements.
///
/// Attributes, comments and processing instructions are not retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Qualified tag name as written in the source.
    pub name: String,
    /// Character data before the first child element, `None` when there is none.
    pub text: Option<String>,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Set the element text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Element text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Direct children with the given name, in document order.
    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a XmlElement> + use<'a, 'n> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Every element below this one in pre-order (document order).
    ///
    /// The element itself is not included.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Descendants with the given name, in document order.
    pub fn descendants_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a XmlElement> + use<'a, 'n> {
        self.descendants().filter(move |element| element.name == name)
    }

    /// First element matching `.//first/second/.../last` below this one.
    ///
    /// The first step matches at any depth, the remaining steps are direct
    /// children of the previous match. Candidates are visited in document
    /// order, so the result is the same element a single-match path query
    /// would return. An empty path matches nothing.
    pub fn find_path(&self, path: &[&str]) -> Option<&XmlElement> {
        let (first, rest) = path.split_first()?;
        self.descendants_named(first)
            .find_map(|element| element.follow_children(rest))
    }

    fn follow_children(&self, path: &[&str]) -> Option<&XmlElement> {
        match path.split_first() {
            None => Some(self),
            Some((head, tail)) => self
                .children_named(head)
                .find_map(|child| child.follow_children(tail)),
        }
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        // Character data after a child element is tail text and not kept.
        if !self.children.is_empty() {
            return;
        }
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

/// Pre-order iterator returned by [`XmlElement::descendants`].
pub struct Descendants<'a> {
    stack: Vec<slice::Iter<'a, XmlElement>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(element) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
