//! Mounts a `PageView` into the host document and applies state to it.
//!
//! Everything the page mutates later (sections, nav links, cards) is kept as
//! handles in `Mounted`, so filtering and highlighting never query the DOM.

use crate::config::ElementIds;
use crate::scroll::ScrollMetrics;
use crate::search::Visibility;
use crate::view::{CardView, InfoSection, NavItem, PageView, SectionView};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    window, Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node,
};

pub const NAV_LINK_CLASS: &str = "cat-link";
pub const COPY_BUTTON_CLASS: &str = "copy-btn";
pub const ACTIVE_CLASS: &str = "active";
pub const REVEAL_CLASS: &str = "reveal";
const COPY_ICON_HTML: &str = r#"<i class="fa-regular fa-copy"></i>"#;

pub struct CardHandle {
    pub key: String,
    pub command: &'static str,
    pub element: HtmlElement,
    pub button: Element,
}

pub struct SectionHandle {
    pub element: HtmlElement,
    pub nav: Element,
    pub cards: Vec<CardHandle>,
}

pub struct Mounted {
    pub sections: Vec<SectionHandle>,
    pub info: HtmlElement,
}

impl Mounted {
    /// Every element carrying the reveal class, in document order.
    pub fn reveal_targets(&self) -> impl Iterator<Item = &HtmlElement> {
        self.sections
            .iter()
            .map(|s| &s.element)
            .chain(std::iter::once(&self.info))
    }

    pub fn card(&self, key: &str) -> Option<&CardHandle> {
        self.sections
            .iter()
            .flat_map(|s| s.cards.iter())
            .find(|c| c.key == key)
    }
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

fn element(doc: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

fn text(doc: &Document, tag: &str, class: &str, content: &str) -> Result<Node, JsValue> {
    let el = element(doc, tag, class)?;
    el.set_text_content(Some(content));
    Ok(el.into())
}

/// `<i class="fa-solid icon"></i> label`
fn labelled(doc: &Document, el: &Element, icon: &str, label: &str) -> Result<(), JsValue> {
    let i = element(doc, "i", &format!("fa-solid {}", icon))?;
    el.append_child(&i)?;
    el.append_child(&doc.create_text_node(&format!(" {}", label)))?;
    Ok(())
}

fn render_nav(doc: &Document, item: &NavItem) -> Result<(Element, Element), JsValue> {
    let li = doc.create_element("li")?;
    let link = element(doc, "a", NAV_LINK_CLASS)?;
    link.set_attribute("href", &item.href)?;
    link.set_attribute("data-index", &item.index.to_string())?;
    labelled(doc, &link, item.icon, item.label)?;
    li.append_child(&link)?;
    Ok((li, link))
}

fn render_card(doc: &Document, card: &CardView) -> Result<CardHandle, JsValue> {
    let el = element(doc, "div", "cmd-card")?;
    let header = element(doc, "div", "cmd-header")?;
    header.append_child(&text(doc, "code", "cmd-code", card.command)?)?;

    let button = element(doc, "button", COPY_BUTTON_CLASS)?;
    button.set_attribute("title", "Copy command")?;
    button.set_attribute("data-key", &card.key())?;
    button.set_inner_html(COPY_ICON_HTML);
    header.append_child(&button)?;

    el.append_child(&header)?;
    el.append_child(&text(doc, "p", "cmd-desc", card.description)?)?;
    Ok(CardHandle {
        key: card.key(),
        command: card.command,
        element: el.dyn_into()?,
        button,
    })
}

fn render_troubleshooting(doc: &Document, section: &SectionView) -> Result<Option<Element>, JsValue> {
    let rows = match section.troubleshooting {
        Some(rows) => rows,
        None => return Ok(None),
    };
    let wrap = element(doc, "div", "trouble-block")?;
    wrap.append_child(&text(doc, "h3", "trouble-title", "Troubleshooting")?)?;
    let table = element(doc, "table", "trouble-table")?;
    let head = doc.create_element("tr")?;
    head.append_child(&text(doc, "th", "", "Problem")?)?;
    head.append_child(&text(doc, "th", "", "Fix")?)?;
    table.append_child(&head)?;
    for row in rows {
        let tr = doc.create_element("tr")?;
        tr.append_child(&text(doc, "td", "trouble-problem", row.problem)?)?;
        let fix = element(doc, "td", "trouble-fix")?;
        fix.append_child(&text(doc, "code", "", row.fix)?)?;
        tr.append_child(&fix)?;
        table.append_child(&tr)?;
    }
    wrap.append_child(&table)?;
    Ok(Some(wrap))
}

fn render_section(doc: &Document, section: &SectionView) -> Result<(Element, Vec<CardHandle>), JsValue> {
    let el = element(doc, "div", &format!("category-section {}", REVEAL_CLASS))?;
    el.set_id(&section.id);

    let title = element(doc, "h2", "category-title")?;
    labelled(doc, &title, section.icon, section.title)?;
    el.append_child(&title)?;

    let grid = element(doc, "div", "cards-grid")?;
    let mut cards = Vec::with_capacity(section.cards.len());
    for card in &section.cards {
        let handle = render_card(doc, card)?;
        grid.append_child(&handle.element)?;
        cards.push(handle);
    }
    el.append_child(&grid)?;

    if let Some(table) = render_troubleshooting(doc, section)? {
        el.append_child(&table)?;
    }
    Ok((el, cards))
}

fn render_info(doc: &Document, info: &InfoSection) -> Result<Element, JsValue> {
    let el = element(doc, "div", &format!("info-section {}", REVEAL_CLASS))?;
    el.set_id(info.id);
    el.append_child(&text(doc, "h2", "category-title", info.title)?)?;
    for p in info.paragraphs {
        el.append_child(&text(doc, "p", "info-text", p)?)?;
    }
    Ok(el)
}

/// Clear both containers and attach the page. Returns `Ok(None)` without
/// touching anything when either container is missing.
pub fn mount(doc: &Document, page: &PageView, ids: &ElementIds) -> Result<Option<Mounted>, JsValue> {
    let (nav_root, content_root) = match (
        doc.get_element_by_id(&ids.nav),
        doc.get_element_by_id(&ids.content),
    ) {
        (Some(n), Some(c)) => (n, c),
        _ => return Ok(None),
    };
    nav_root.set_inner_html("");
    content_root.set_inner_html("");

    let mut sections = Vec::with_capacity(page.sections.len());
    for (item, section) in page.nav.iter().zip(&page.sections) {
        let (li, link) = render_nav(doc, item)?;
        nav_root.append_child(&li)?;
        let (el, cards) = render_section(doc, section)?;
        content_root.append_child(&el)?;
        sections.push(SectionHandle {
            element: el.dyn_into()?,
            nav: link,
            cards,
        });
    }

    let info = render_info(doc, &page.info)?;
    content_root.append_child(&info)?;

    Ok(Some(Mounted {
        sections,
        info: info.dyn_into()?,
    }))
}

pub fn set_visible(el: &HtmlElement, visible: bool) {
    let style = el.style();
    let _ = if visible {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", "none")
    };
}

pub fn apply_visibility(mounted: &Mounted, vis: &Visibility) {
    for (s, section) in mounted.sections.iter().enumerate() {
        for (c, card) in section.cards.iter().enumerate() {
            set_visible(&card.element, vis.card(s, c));
        }
        set_visible(&section.element, vis.section(s));
    }
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn highlight(mounted: &Mounted, active: Option<usize>) {
    for (i, section) in mounted.sections.iter().enumerate() {
        set_class(&section.nav, ACTIVE_CLASS, active == Some(i));
    }
}

/// Top offset of every section, `None` for filtered-out ones.
pub fn section_tops(mounted: &Mounted, vis: &Visibility) -> Vec<Option<f64>> {
    mounted
        .sections
        .iter()
        .enumerate()
        .map(|(i, s)| vis.section(i).then(|| s.element.offset_top() as f64))
        .collect()
}

pub fn scroll_metrics() -> Option<ScrollMetrics> {
    let win = window()?;
    let root = win.document()?.document_element()?;
    Some(ScrollMetrics {
        offset: win.scroll_y().unwrap_or(0.0),
        document_height: root.scroll_height() as f64,
        viewport_height: root.client_height() as f64,
    })
}

pub fn set_progress(doc: &Document, selector: &str, percent: f64) {
    if let Some(bar) = doc
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|b| b.dyn_into::<HtmlElement>().ok())
    {
        let _ = bar.style().set_property("width", &format!("{}%", percent));
    }
}

/// Fade out the loading overlay.
pub fn hide_loader(loader: &Element) {
    if let Some(el) = loader.dyn_ref::<HtmlElement>() {
        let style = el.style();
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("visibility", "hidden");
    }
}

/// Add the active class to each reveal target once `threshold` of it is on
/// screen. Without IntersectionObserver support everything is revealed at once.
pub fn observe_reveal(mounted: &Mounted, threshold: f64) -> Option<IntersectionObserver> {
    let callback = Closure::<dyn FnMut(js_sys::Array)>::new(|entries: js_sys::Array| {
        for entry in entries.iter() {
            if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                if entry.is_intersecting() {
                    set_class(&entry.target(), ACTIVE_CLASS, true);
                }
            }
        }
    });
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(o) => o,
            Err(_) => {
                for target in mounted.reveal_targets() {
                    set_class(target, ACTIVE_CLASS, true);
                }
                return None;
            }
        };
    callback.forget(); // Leak to keep active for life of page
    for target in mounted.reveal_targets() {
        observer.observe(target);
    }
    Some(observer)
}
