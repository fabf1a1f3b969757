//! Preparation for gamekee wiki article pages.

use bawiki_dom::Document;

/// Clean an article page up for capture: pad the body, hide the floating
/// chrome, drop the video players and vote buttons, and expand every
/// collapsed tab.
pub fn prepare_wiki_page(doc: &mut Document) {
    // Give the content some breathing room.
    if let Some(body) = doc.select_first("div.wiki-detail-body") {
        doc.mutate().set_style_property(body, "padding", "20px");
        log::debug!("padded wiki-detail-body");
    }

    // The sticky header would cover the page.
    if let Some(header) = doc.select_first("div.wiki-header") {
        doc.mutate().set_style_property(header, "display", "none");
    }

    // Follow button.
    if let Some(button) = doc.select_first("div.user-box > button") {
        doc.mutate().set_style_property(button, "display", "none");
    }

    // Video players don't render in a still capture.
    for player in doc.select_all("div.video-play-wrapper") {
        doc.mutate().remove_node(player);
        log::debug!("removed video player");
    }

    // Expand every tab pane.
    for item in doc.select_all("div.slide-item") {
        doc.mutate().add_class(item, "active");
    }

    // Like/favorite buttons.
    if let Some(options) = doc.select_first("div.article-options") {
        doc.mutate().remove_node(options);
    }

    // And the gap those buttons left behind.
    if let Some(body) = doc.select_first("div.wiki-detail-body") {
        doc.mutate().set_style_property(body, "margin-bottom", "0");
    }
}
