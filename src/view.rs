//! Plain-text rendering of a [`RenderSnapshot`].

use std::fmt::Write;

use cb_core::{CategoryEntry, SelectionState};

const EXPANDED: &str = "▾";
const COLLAPSED: &str = "▸";

/// The category tree: one line per category, items under expanded ones.
pub fn render_categories(categories: &[CategoryEntry]) -> String {
    let mut out = String::new();
    for entry in categories {
        let marker = if entry.expanded { EXPANDED } else { COLLAPSED };
        let _ = writeln!(out, "{marker} {} ({})", entry.label, entry.id);

        if !entry.expanded {
            continue;
        }
        for item in entry.items.iter().flatten() {
            let _ = writeln!(out, "    {}  [{}]", item.display_name(), item.key());
        }
        if let Some(page) = &entry.page {
            if page.next_url.is_some() {
                let _ = writeln!(
                    out,
                    "    … {} of {} loaded",
                    entry.loaded_count(),
                    page.count
                );
            }
        }
    }
    out
}

/// The selection as aligned `label: value` lines.
pub fn render_selection(selection: &SelectionState) -> String {
    if !selection.visible {
        return "(nothing selected)\n".to_string();
    }

    let mut out = String::new();
    if let Some(subject) = &selection.subject {
        let _ = writeln!(out, "[{subject}]");
    }

    let width = selection
        .fields
        .keys()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in &selection.fields {
        let pad = width - label.chars().count();
        let _ = writeln!(out, "{label}:{} {}", " ".repeat(pad), value.render());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_core::{CatalogItem, DisplayValue, ItemKey, ItemType, PageCursor, ReferenceSlot};
    use serde_json::json;
    use std::sync::Arc;

    fn luke() -> Arc<CatalogItem> {
        Arc::new(
            CatalogItem::from_value(json!({
                "name": "Luke Skywalker",
                "url": "https://swapi.dev/api/people/1/"
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_collapsed_category_hides_items() {
        let mut entry = CategoryEntry::new(ItemType::new("people"), "People", "https://x/people/");
        entry.append_page(PageCursor::default(), vec![luke()]);

        let text = render_categories(&[entry]);

        assert_eq!(text, "▸ People (people)\n");
    }

    #[test]
    fn test_expanded_category_lists_items_and_remaining_pages() {
        let mut entry = CategoryEntry::new(ItemType::new("people"), "People", "https://x/people/");
        entry.append_page(
            PageCursor {
                count: 82,
                next_url: Some("https://x/people/?page=2".into()),
                prev_url: None,
            },
            vec![luke()],
        );
        entry.expanded = true;

        let text = render_categories(&[entry]);

        assert_eq!(
            text,
            "▾ People (people)\n    Luke Skywalker  [people/1]\n    … 1 of 82 loaded\n"
        );
    }

    #[test]
    fn test_selection_aligns_labels() {
        let mut selection = SelectionState {
            generation: 1,
            subject: Some(ItemKey::new("people", "1")),
            visible: true,
            ..Default::default()
        };
        selection
            .fields
            .insert("name".into(), DisplayValue::Plain(json!("Luke Skywalker")));
        selection.fields.insert(
            "homeworld".into(),
            DisplayValue::References(vec![ReferenceSlot::Unresolved(
                "https://swapi.dev/api/planets/1/".into(),
            )]),
        );

        let text = render_selection(&selection);

        assert_eq!(
            text,
            "[people/1]\nname:      Luke Skywalker\nhomeworld: https://swapi.dev/api/planets/1/\n"
        );
    }

    #[test]
    fn test_hidden_selection() {
        assert_eq!(
            render_selection(&SelectionState::default()),
            "(nothing selected)\n"
        );
    }
}
