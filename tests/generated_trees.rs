//! Render properties over generated element trees.
//!
//! Strategy:
//! 1. Generate wide and deep element trees plus a slice budget
//! 2. Render once uninterrupted and once in slices of that budget
//! 3. Assert both leave the same markup and the same operation log, and that
//!    the sliced build visited every fiber exactly once

use proptest::prelude::*;
use spark_fiber::{
    attrs, create_element, create_text_element, Attributes, Child, Element, ElementType,
    MemorySurface, NodeId, Renderer, SliceStatus, UnitBudget, WorkScheduler, NODE_VALUE,
};

// =============================================================================
// Strategies
// =============================================================================

fn tag() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["div", "span", "p", "ul", "li", "a", "b", "br"])
}

fn element_tree() -> impl Strategy<Value = Element> {
    let leaf = prop_oneof![
        "[a-z ]{0,6}".prop_map(|text: String| create_text_element(text)),
        (0i64..1000).prop_map(|value: i64| create_text_element(value)),
        tag().prop_map(|tag| create_element(tag, Attributes::new(), Vec::<Child>::new())),
    ];

    leaf.prop_recursive(8, 96, 10, |inner| {
        (tag(), prop::option::of(0i64..100), prop::collection::vec(inner, 0..10)).prop_map(
            |(tag, id, children)| {
                let attributes = id.map(|id| attrs([("id", id)])).unwrap_or_default();
                create_element(tag, attributes, children)
            },
        )
    })
}

/// `depth` nested divs around one text element.
fn chain(depth: usize) -> Element {
    let mut element = create_text_element("leaf");
    for _ in 0..depth {
        element = create_element("div", Attributes::new(), [element]);
    }
    element
}

// =============================================================================
// Helpers
// =============================================================================

fn renderer() -> (Renderer<MemorySurface>, NodeId) {
    let (surface, container) = MemorySurface::with_container("root").unwrap();
    (Renderer::new(surface), container)
}

fn render_whole(element: &Element) -> (Renderer<MemorySurface>, NodeId) {
    let (mut renderer, container) = renderer();
    renderer.render(element.clone(), container);
    renderer.flush().unwrap();
    (renderer, container)
}

/// Markup the element should produce, worked out from the descriptor alone.
fn expected_markup(element: &Element, out: &mut String) {
    match element.kind() {
        ElementType::Text => {
            if let Some(value) = element.attribute(NODE_VALUE) {
                out.push_str(&value.to_string());
            }
        }
        ElementType::Tag(tag) => {
            out.push_str(&format!("<{}", tag));
            for (name, value) in element.props().attributes() {
                out.push_str(&format!(" {}=\"{}\"", name, value));
            }
            out.push('>');
            for child in element.children() {
                expected_markup(child, out);
            }
            out.push_str(&format!("</{}>", tag));
        }
    }
}

fn root_markup(element: &Element) -> String {
    let mut out = String::from("<root>");
    expected_markup(element, &mut out);
    out.push_str("</root>");
    out
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn test_sibling_order_follows_declaration(element in element_tree()) {
        let (renderer, container) = render_whole(&element);

        prop_assert_eq!(renderer.surface().to_markup(container), root_markup(&element));
    }

    #[test]
    fn test_sliced_render_matches_whole_render(element in element_tree(), units in 1usize..16) {
        let (whole, whole_container) = render_whole(&element);
        let (mut sliced, container) = renderer();
        sliced.render(element.clone(), container);

        loop {
            let report = sliced.run_slice(&UnitBudget::new(units)).unwrap();
            if report.status == SliceStatus::Committed {
                break;
            }
            prop_assert_eq!(report.visited, units);
            prop_assert!(sliced.surface().children(container).is_empty());
        }

        prop_assert_eq!(sliced.stats().units, element.count() as u64 + 1);
        prop_assert_eq!(whole.stats().units, sliced.stats().units);
        prop_assert_eq!(whole.surface().ops(), sliced.surface().ops());
        prop_assert_eq!(
            whole.surface().to_markup(whole_container),
            sliced.surface().to_markup(container)
        );
    }

    #[test]
    fn test_resume_after_any_number_of_visits(element in element_tree(), split in any::<prop::sample::Index>()) {
        let total = element.count() + 1;
        let first = split.index(total) + 1;
        let (whole, whole_container) = render_whole(&element);

        let (mut resumed, container) = renderer();
        resumed.render(element.clone(), container);
        let report = resumed.run_slice(&UnitBudget::new(first)).unwrap();
        prop_assert_eq!(report.visited, first);
        resumed.flush().unwrap();

        prop_assert_eq!(resumed.stats().units, total as u64);
        prop_assert_eq!(whole.surface().ops(), resumed.surface().ops());
        prop_assert_eq!(
            whole.surface().to_markup(whole_container),
            resumed.surface().to_markup(container)
        );
    }

    #[test]
    fn test_deep_chain(depth in 1usize..300, units in 1usize..8) {
        let element = chain(depth);
        let (mut renderer, container) = renderer();
        renderer.render(element.clone(), container);

        while renderer.run_slice(&UnitBudget::new(units)).unwrap().status != SliceStatus::Committed {}

        let expected = format!("<root>{}leaf{}</root>", "<div>".repeat(depth), "</div>".repeat(depth));
        prop_assert_eq!(renderer.surface().to_markup(container), expected);
        prop_assert_eq!(renderer.stats().units, depth as u64 + 2);
    }
}
