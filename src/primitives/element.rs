//! Element factory.
//!
//! # Example
//!
//! ```
//! use spark_fiber::element;
//!
//! let tree = element!("div", { "id" => "foo" },
//!     element!("a", {}, "bar"),
//!     element!("b"),
//!     element!("br"),
//! );
//! assert_eq!(tree.children().len(), 3);
//! ```

use crate::types::{AttrValue, Attributes, ElementType, NODE_VALUE};
use super::types::{Child, Element};

/// Create an element descriptor.
///
/// Children that are plain values become text elements.
pub fn create_element<C>(kind: impl Into<ElementType>, attributes: Attributes, children: C) -> Element
where
    C: IntoIterator,
    C::Item: Into<Child>,
{
    let children = children
        .into_iter()
        .map(|child| match child.into() {
            Child::Element(element) => element,
            Child::Value(value) => create_text_element(value),
        })
        .collect();

    Element::new(kind.into(), attributes, children)
}

/// Create a text element: `{type: TEXT_ELEMENT, props: {nodeValue, children: []}}`.
pub fn create_text_element(value: impl Into<AttrValue>) -> Element {
    let mut attributes = Attributes::new();
    attributes.insert(NODE_VALUE.to_string(), value.into());
    Element::new(ElementType::Text, attributes, Vec::new())
}

/// Build an attribute map from pairs.
pub fn attrs<I, K, V>(pairs: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttrValue>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// `createElement(type, {attrs}, ...children)` shorthand.
///
/// `element!("br")` has no attributes and no children;
/// `element!("a", { "href" => "/" }, "home")` takes attributes and any number of children.
#[macro_export]
macro_rules! element {
    ($kind:expr) => {
        $crate::primitives::create_element(
            $kind,
            $crate::types::Attributes::new(),
            ::std::vec::Vec::<$crate::primitives::Child>::new(),
        )
    };
    ($kind:expr, { $($key:expr => $value:expr),* $(,)? } $(, $child:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut attributes = $crate::types::Attributes::new();
        $(
            attributes.insert(
                ::std::string::String::from($key),
                $crate::types::AttrValue::from($value),
            );
        )*
        let children: ::std::vec::Vec<$crate::primitives::Child> =
            ::std::vec![$($crate::primitives::Child::from($child)),*];
        $crate::primitives::create_element($kind, attributes, children)
    }};
}

// =============================================================================
// Tests
// =============================================================================
