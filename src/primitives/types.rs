//! Element descriptors.
//!
//! An [`Element`] is an immutable `{type, props}` description of one node of the
//! UI tree. Its props are reference counted so handing them to fibers never
//! deep-copies the subtree.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::types::{AttrValue, Attributes, ElementType, CHILDREN};

// =============================================================================
// Element
// =============================================================================

/// Immutable element descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub(crate) kind: ElementType,
    pub(crate) props: Rc<Props>,
}

/// Element props: attributes plus the ordered children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Props {
    #[serde(flatten)]
    pub(crate) attributes: Attributes,
    pub(crate) children: Vec<Element>,
}

impl Element {
    /// A `children` entry in `attributes` is dropped; `children` always wins.
    pub(crate) fn new(kind: ElementType, mut attributes: Attributes, children: Vec<Element>) -> Self {
        attributes.remove(CHILDREN);
        Self {
            kind,
            props: Rc::new(Props {
                attributes,
                children,
            }),
        }
    }

    pub fn kind(&self) -> &ElementType {
        &self.kind
    }

    pub fn props(&self) -> &Rc<Props> {
        &self.props
    }

    pub fn children(&self) -> &[Element] {
        &self.props.children
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.props.attributes.get(name)
    }

    /// Number of descriptors in this tree, this one included.
    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            count += 1;
            stack.extend(element.children());
        }
        count
    }
}

impl Props {
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Props of the root fiber: no attributes, the requested element as only child.
    pub(crate) fn root(element: Element) -> Self {
        Self {
            attributes: Attributes::new(),
            children: vec![element],
        }
    }
}

// =============================================================================
// Child - factory input
// =============================================================================

/// A child passed to [`create_element`](super::create_element).
///
/// Anything that is not already an element is coerced into a text element.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Element(Element),
    Value(AttrValue),
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Child::Element(element)
    }
}

impl From<&str> for Child {
    fn from(value: &str) -> Self {
        Child::Value(value.into())
    }
}

impl From<String> for Child {
    fn from(value: String) -> Self {
        Child::Value(value.into())
    }
}

impl From<i64> for Child {
    fn from(value: i64) -> Self {
        Child::Value(value.into())
    }
}

impl From<i32> for Child {
    fn from(value: i32) -> Self {
        Child::Value(value.into())
    }
}

impl From<f64> for Child {
    fn from(value: f64) -> Self {
        Child::Value(value.into())
    }
}

impl From<bool> for Child {
    fn from(value: bool) -> Self {
        Child::Value(value.into())
    }
}

impl From<AttrValue> for Child {
    fn from(value: AttrValue) -> Self {
        Child::Value(value)
    }
}
