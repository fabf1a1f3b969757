//! Preparation for schaledb student pages.

use bawiki_dom::Document;

use crate::is_inline_hidden;

/// Inputs only the screenshot host knows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchaleOptions {
    /// Scrollable page height in CSS pixels; when set, the background is
    /// stretched to cover it.
    pub page_height: Option<f64>,
}

/// Side effects the host has to act on after preparation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchaleOutcome {
    /// The stored locale was flipped to `Cn`; the page needs a reload to
    /// pick it up.
    pub locale_switched: bool,
}

const SLIDER_SELECTORS: &[&str] = &[
    "#ba-statpreview-levelrange",
    "#ba-skillpreview-exrange",
    "#ba-skillpreview-range",
    "#ba-weaponpreview-levelrange",
    "#ba-weapon-skillpreview-range",
    "#ba-gear-skillpreview-range",
];

const CHANGELOG_SEEN_MARKER: &str = "1145141919810";

/// Prepare a student page for capture: force the locale, dismiss the
/// changelog dialog, pull every preview slider to its maximum, flatten
/// the tabbed card into a sequence of expanded sections, and stretch the
/// background to the full page height.
pub fn prepare_student_page(doc: &mut Document, opts: &SchaleOptions) -> SchaleOutcome {
    let mut outcome = SchaleOutcome::default();

    if doc.storage().get("language") != Some("Cn") {
        doc.storage_mut().set("language", "Cn");
        outcome.locale_switched = true;
        log::debug!("forced locale to Cn");
    }

    dismiss_changelog(doc);

    for selector in SLIDER_SELECTORS {
        pull_slider_to_max(doc, selector);
    }

    expand_card_sections(doc);

    if let Some(height) = opts.page_height {
        if let Some(background) = doc.select_first("#ba-background") {
            doc.mutate()
                .set_style_property(background, "height", &format!("{height}px"));
        }
    }

    outcome
}

fn dismiss_changelog(doc: &mut Document) {
    let Some(modal) = doc.select_first("#modal-changelog") else {
        return;
    };
    if is_inline_hidden(doc, modal) {
        return;
    }
    doc.mutate().remove_node(modal);
    for backdrop in doc.select_all(".modal-backdrop") {
        doc.mutate().remove_node(backdrop);
    }
    doc.storage_mut().set("changelog_seen", CHANGELOG_SEEN_MARKER);
    log::debug!("dismissed changelog dialog");
}

/// Snap a preview slider to its `max` attribute (1 when unspecified).
fn pull_slider_to_max(doc: &mut Document, selector: &str) {
    let Some(id) = doc.select_first(selector) else {
        return;
    };
    let Some(element) = doc.get(id).and_then(|node| node.element()) else {
        return;
    };
    if element.local_name() != "input" || element.attr("type") != Some("range") {
        log::warn!("slider target `{selector}` is not a range input");
        return;
    }
    let max = element
        .attr("max")
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or(1.0);
    doc.mutate().set_attribute(id, "value", &format_number(max));
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Flatten the tabbed student card: the tab nav moves from the card
/// header onto each page, every page is expanded, and pages whose tab is
/// hidden are dropped. Pre-flattened mirrors carry no card header and are
/// left alone.
fn expand_card_sections(doc: &mut Document) {
    let Some(card_header) = doc.select_first(".card-header") else {
        return;
    };
    let Some(card_body) = doc.select_first(".card-body") else {
        return;
    };
    let pages = doc.select_all(".card-body > .tab-content > *");

    let nav = doc.select_first(".card-header > nav#ba-item-list-tabs");
    if let Some(nav) = nav {
        for child in doc.get(nav).map(|node| node.children.clone()).unwrap_or_default() {
            doc.mutate().remove_class(child, "active");
        }
        doc.mutate().remove_node(nav);
    }

    // Whatever else the header held moves to the front of the body.
    let header_children = doc
        .get(card_header)
        .map(|node| node.children.clone())
        .unwrap_or_default();
    doc.mutate().prepend_children(card_body, &header_children);
    doc.mutate().remove_node(card_header);

    for page in pages {
        let nav_clone = nav.map(|nav| doc.mutate().clone_subtree(nav));
        if let Some(clone) = nav_clone {
            doc.mutate().prepend_children(page, &[clone]);
        }
        doc.mutate().add_class(page, "show");
        doc.mutate().add_class(page, "active");

        let page_name = doc
            .get(page)
            .and_then(|node| node.element())
            .and_then(|element| element.id())
            .map(|id| id.replace("ba-student-page-", ""))
            .unwrap_or_default();
        let tab = nav_clone.and_then(|clone| {
            direct_child_with_id(doc, clone, &format!("ba-student-tab-{page_name}"))
        });
        match tab {
            Some(tab) if !is_inline_hidden(doc, tab) => doc.mutate().add_class(tab, "active"),
            _ => {
                doc.mutate().remove_node(page);
                log::debug!("dropped hidden student page `{page_name}`");
            }
        }
    }
}

fn direct_child_with_id(doc: &Document, parent: usize, want: &str) -> Option<usize> {
    doc.get(parent)?.children.iter().copied().find(|&child| {
        doc.get(child)
            .and_then(|node| node.element())
            .and_then(|element| element.id())
            == Some(want)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDENT_PAGE: &str = "<!DOCTYPE html><html><body>\
        <div id=\"modal-changelog\">news</div>\
        <div class=\"modal-backdrop\"></div>\
        <input type=\"range\" id=\"ba-statpreview-levelrange\" min=\"1\" max=\"90\">\
        <input type=\"text\" id=\"ba-skillpreview-exrange\">\
        <div class=\"card\">\
            <div class=\"card-header\"><h5>Aru</h5>\
                <nav id=\"ba-item-list-tabs\">\
                    <a id=\"ba-student-tab-stats\" class=\"active\">stats</a>\
                    <a id=\"ba-student-tab-weapon\" style=\"display: none\">weapon</a>\
                </nav>\
            </div>\
            <div class=\"card-body\"><div class=\"tab-content\">\
                <div id=\"ba-student-page-stats\"></div>\
                <div id=\"ba-student-page-weapon\"></div>\
            </div></div>\
        </div>\
        <div id=\"ba-background\"></div>\
        </body></html>";

    #[test]
    fn forces_the_locale_once() {
        let mut doc = Document::parse_html("<body></body>");
        let outcome = prepare_student_page(&mut doc, &SchaleOptions::default());
        assert!(outcome.locale_switched);
        assert_eq!(doc.storage().get("language"), Some("Cn"));

        let outcome = prepare_student_page(&mut doc, &SchaleOptions::default());
        assert!(!outcome.locale_switched);
    }

    #[test]
    fn dismisses_the_changelog_dialog() {
        let mut doc = Document::parse_html(STUDENT_PAGE);
        prepare_student_page(&mut doc, &SchaleOptions::default());

        assert!(doc.select_first("#modal-changelog").is_none());
        assert!(doc.select_all(".modal-backdrop").is_empty());
        assert_eq!(doc.storage().get("changelog_seen"), Some("1145141919810"));
    }

    #[test]
    fn hidden_changelog_is_left_alone() {
        let mut doc = Document::parse_html(
            "<div id=\"modal-changelog\" style=\"display: none\"></div>",
        );
        prepare_student_page(&mut doc, &SchaleOptions::default());
        assert!(doc.select_first("#modal-changelog").is_some());
        assert!(doc.storage().get("changelog_seen").is_none());
    }

    #[test]
    fn pulls_sliders_to_their_max() {
        let mut doc = Document::parse_html(STUDENT_PAGE);
        prepare_student_page(&mut doc, &SchaleOptions::default());

        let slider = doc.select_first("#ba-statpreview-levelrange").unwrap();
        let element = doc.get(slider).unwrap().element().unwrap();
        assert_eq!(element.attr("value"), Some("90"));

        // The text input shares a slider id but is not a range control.
        let text = doc.select_first("#ba-skillpreview-exrange").unwrap();
        assert!(doc.get(text).unwrap().element().unwrap().attr("value").is_none());
    }

    #[test]
    fn flattens_the_tabbed_card() {
        let mut doc = Document::parse_html(STUDENT_PAGE);
        prepare_student_page(&mut doc, &SchaleOptions::default());

        // Header is gone, its title now leads the card body.
        assert!(doc.select_first(".card-header").is_none());
        let body = doc.select_first(".card-body").unwrap();
        let first = doc.get(body).unwrap().children[0];
        let first = doc.get(first).unwrap().element().unwrap();
        assert_eq!(first.local_name(), "h5");

        // The visible page kept a nav clone with its own tab activated.
        let stats = doc.select_first("#ba-student-page-stats").unwrap();
        let element = doc.get(stats).unwrap().element().unwrap();
        assert!(element.has_class("show") && element.has_class("active"));
        assert_eq!(doc.select_all("nav#ba-item-list-tabs").len(), 1);
        let tab = doc.select_first("#ba-student-tab-stats").unwrap();
        assert!(doc.get(tab).unwrap().element().unwrap().has_class("active"));

        // The page behind a hidden tab is dropped entirely.
        assert!(doc.select_first("#ba-student-page-weapon").is_none());
    }

    #[test]
    fn stretches_the_background_when_a_height_is_supplied() {
        let mut doc = Document::parse_html(STUDENT_PAGE);
        prepare_student_page(
            &mut doc,
            &SchaleOptions {
                page_height: Some(2143.0),
            },
        );
        let background = doc.select_first("#ba-background").unwrap();
        let element = doc.get(background).unwrap().element().unwrap();
        assert_eq!(element.style_property("height").as_deref(), Some("2143px"));
    }

    #[test]
    fn skips_card_flattening_on_pre_flattened_mirrors() {
        let mut doc = Document::parse_html(
            "<div class=\"card-body\"><div class=\"tab-content\">\
             <div id=\"ba-student-page-stats\"></div></div></div>",
        );
        prepare_student_page(&mut doc, &SchaleOptions::default());
        // No card-header: the page list is untouched.
        assert!(doc.select_first("#ba-student-page-stats").is_some());
    }
}
