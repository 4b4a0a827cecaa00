//! JSON interchange and shape validation for element trees.
//!
//! Wire shape: `{"type": "div", "props": {"id": "foo", "children": [...]}}`.
//! Anything that does not fit is reported as [`RenderError::MalformedElement`]
//! with the path of the offending node, never passed on to the fiber builder.

use crate::error::RenderError;
use crate::types::ElementType;
use super::types::Element;

impl Element {
    /// Parse and validate an element tree from JSON.
    pub fn from_json(input: &str) -> Result<Element, RenderError> {
        let element: Element = serde_json::from_str(input)
            .map_err(|err| RenderError::malformed("root", err.to_string()))?;
        element.validate()?;
        Ok(element)
    }

    /// Serialize this tree to its JSON wire shape.
    ///
    /// Fails on a tree `validate` rejects, so the output always parses back.
    pub fn to_json(&self) -> Result<String, RenderError> {
        self.validate()?;
        serde_json::to_string(self).map_err(|err| RenderError::malformed("root", err.to_string()))
    }

    /// Check the shape of the whole tree.
    ///
    /// Rejects empty tag names, text elements with children and non-finite
    /// float attributes.
    pub fn validate(&self) -> Result<(), RenderError> {
        let mut stack = vec![(self, String::from("root"))];

        while let Some((element, path)) = stack.pop() {
            if let Some(reason) = shape_error(element.kind(), element.children().len()) {
                return Err(RenderError::malformed(path, reason));
            }
            let attributes = element.props().attributes();
            if let Some((name, value)) = attributes.iter().find(|(_, value)| !value.is_finite()) {
                return Err(RenderError::malformed(path, format!("attribute {} is {}", name, value)));
            }
            for (i, child) in element.children().iter().enumerate().rev() {
                stack.push((child, format!("{}.children[{}]", path, i)));
            }
        }

        Ok(())
    }
}

/// Shape problem of a single descriptor, if any (children not descended).
pub(crate) fn shape_error(kind: &ElementType, child_count: usize) -> Option<String> {
    match kind {
        ElementType::Tag(tag) if tag.trim().is_empty() => Some("element type is empty".to_string()),
        ElementType::Text if child_count > 0 => {
            Some(format!("text element has {} children", child_count))
        }
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
