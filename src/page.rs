//! Page controller.
//!
//! Boots the page once the host document is ready and wires its controls:
//! search box, theme toggle, scroll-to-top, mobile drawer, nav links and copy
//! buttons. State lives in thread-locals and is only touched from event
//! callbacks on the UI thread.

use crate::catalog::{self, CATALOG};
use crate::clipboard;
use crate::config::PageConfig;
use crate::dom::{self, Mounted, ACTIVE_CLASS, COPY_BUTTON_CLASS, NAV_LINK_CLASS};
use crate::scroll;
use crate::search::{self, Visibility};
use crate::state::{Theme, UiState, LIGHT_THEME_CLASS};
use crate::view::{self, PageView};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, window, Document, Element, Event, EventTarget, HtmlInputElement,
    IntersectionObserver, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions,
};

struct Page {
    config: PageConfig,
    state: UiState,
    view: PageView,
    visibility: Visibility,
    mounted: Option<Mounted>,
    reveal: Option<IntersectionObserver>,
}

/// Handles attached by the current boot, released when the page boots again.
struct Bindings<H> {
    attached: Vec<H>,
}

impl<H> Bindings<H> {
    const fn new() -> Self {
        Self {
            attached: Vec::new(),
        }
    }

    fn attach(&mut self, handle: H) {
        self.attached.push(handle);
    }

    fn take_all(&mut self) -> Vec<H> {
        std::mem::take(&mut self.attached)
    }

    fn len(&self) -> usize {
        self.attached.len()
    }
}

struct Listener {
    target: EventTarget,
    event: String,
    closure: Closure<dyn FnMut(Event)>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    static LISTENERS: RefCell<Bindings<Listener>> = const { RefCell::new(Bindings::new()) };
}

fn with_page<R>(f: impl FnOnce(&mut Page) -> R) -> Option<R> {
    PAGE.with(|p| p.borrow_mut().as_mut().map(f))
}

/// Boot with the default element ids and timings.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    boot(PageConfig::default())
}

/// Boot with a JSON config overlaid on the defaults.
#[wasm_bindgen]
pub fn start_with_config(json: &str) -> Result<(), JsValue> {
    let config = PageConfig::from_json(json)
        .map_err(|e| JsValue::from_str(&format!("invalid config: {}", e)))?;
    boot(config)
}

fn boot(config: PageConfig) -> Result<(), JsValue> {
    let doc = match dom::document() {
        Some(d) => d,
        None => return Ok(()),
    };

    let view = view::build(CATALOG);
    let mounted = dom::mount(&doc, &view, &config.ids)?;
    if let Some(m) = &mounted {
        console::log_1(
            &format!(
                "git-archive: rendered {} categories, {} commands",
                m.sections.len(),
                view.card_count()
            )
            .into(),
        );
    }

    let mut state = UiState::new();
    if doc
        .body()
        .map(|b| b.class_list().contains(LIGHT_THEME_CLASS))
        .unwrap_or(false)
    {
        state.theme = Theme::Light;
    }

    let reveal = mounted
        .as_ref()
        .and_then(|m| dom::observe_reveal(m, config.reveal_threshold));
    let visibility = search::filter(&view.sections, "");
    let previous = PAGE.with(|p| {
        p.borrow_mut().replace(Page {
            config: config.clone(),
            state,
            view,
            visibility,
            mounted,
            reveal,
        })
    });
    if let Some(observer) = previous.and_then(|p| p.reveal) {
        observer.disconnect();
    }

    // Rebind everything so a reboot with new ids never keeps stale targets.
    detach_listeners();
    install_listeners(&doc, &config);
    let wired = LISTENERS.with(|l| l.borrow().len());
    console::log_1(&format!("git-archive: wired {} listeners", wired).into());
    dismiss_loader(&doc, &config);
    refresh_scroll();
    Ok(())
}

fn dismiss_loader(doc: &Document, config: &PageConfig) {
    let (win, loader) = match (window(), doc.get_element_by_id(&config.ids.loader)) {
        (Some(w), Some(l)) => (w, l),
        _ => return,
    };
    let hide = Closure::wrap(Box::new(move || dom::hide_loader(&loader)) as Box<dyn FnMut()>);
    if win
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            hide.as_ref().unchecked_ref(),
            config.loader_delay_ms,
        )
        .is_ok()
    {
        hide.forget();
    }
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    LISTENERS.with(|l| {
        l.borrow_mut().attach(Listener {
            target: target.clone(),
            event: event.to_string(),
            closure,
        })
    });
    Ok(())
}

fn detach_listeners() {
    let old = LISTENERS.with(|l| l.borrow_mut().take_all());
    for listener in old {
        let _ = listener.target.remove_event_listener_with_callback(
            &listener.event,
            listener.closure.as_ref().unchecked_ref(),
        );
    }
}

fn report(what: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        console::error_2(&format!("git-archive: failed to wire {}:", what).into(), &e);
    }
}

fn listen_by_id(doc: &Document, id: &str, event: &str, handler: impl FnMut(Event) + 'static) {
    // Absent controls are simply not wired.
    if let Some(el) = doc.get_element_by_id(id) {
        report(id, listen(&el, event, handler));
    }
}

fn closest(e: &Event, selector: &str) -> Option<Element> {
    e.target()?.dyn_into::<Element>().ok()?.closest(selector).ok()?
}

fn install_listeners(doc: &Document, config: &PageConfig) {
    let ids = &config.ids;

    listen_by_id(doc, &ids.search, "input", |e: Event| {
        if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            filter_commands(&input.value());
        }
    });

    listen_by_id(doc, &ids.theme_toggle, "click", |_e: Event| {
        toggle_theme();
    });

    listen_by_id(doc, &ids.scroll_top, "click", |_e: Event| scroll_to_top());
    listen_by_id(doc, &ids.drawer_open, "click", |_e: Event| open_drawer());
    listen_by_id(doc, &ids.drawer_close, "click", |_e: Event| close_drawer());
    listen_by_id(doc, &ids.overlay, "click", |_e: Event| close_drawer());

    let nav_selector = format!("a.{}", NAV_LINK_CLASS);
    listen_by_id(doc, &ids.nav, "click", move |e: Event| {
        if let Some(link) = closest(&e, &nav_selector) {
            e.prevent_default();
            let index = link
                .get_attribute("data-index")
                .and_then(|i| i.parse::<usize>().ok());
            if let Some(index) = index {
                scroll_to_section(index);
            }
            close_drawer();
        }
    });

    let copy_selector = format!(".{}", COPY_BUTTON_CLASS);
    listen_by_id(doc, &ids.content, "click", move |e: Event| {
        if let Some(button) = closest(&e, &copy_selector) {
            if let Some(key) = button.get_attribute("data-key") {
                copy_card(key);
            }
        }
    });

    report("keydown", listen(doc, "keydown", on_keydown));

    if let Some(win) = window() {
        report("scroll", listen(&win, "scroll", |_e: Event| refresh_scroll()));
        report("resize", listen(&win, "resize", |_e: Event| refresh_scroll()));
    }
}

fn on_keydown(e: Event) {
    let key = match e.dyn_ref::<KeyboardEvent>() {
        Some(k) => k.key(),
        None => return,
    };

    if key == "Escape" {
        if with_page(|page| page.state.drawer_open).unwrap_or(false) {
            close_drawer();
        }
        return;
    }

    let (shortcut, search_id) =
        match with_page(|page| (page.config.search_shortcut.clone(), page.config.ids.search.clone())) {
            Some(v) => v,
            None => return,
        };
    if key != shortcut {
        return;
    }
    let search = match dom::by_id(&search_id).and_then(|s| s.dyn_into::<HtmlInputElement>().ok()) {
        Some(s) => s,
        None => return,
    };
    let focused = dom::document().and_then(|d| d.active_element());
    let search_el: &Element = search.as_ref();
    if focused.as_ref() != Some(search_el) {
        e.prevent_default();
        let _ = search.focus();
    }
}

fn copy_card(key: String) {
    let found = with_page(|page| {
        let confirm_ms = page.config.confirm_ms;
        page.mounted
            .as_ref()
            .and_then(|m| m.card(&key))
            .map(|c| (c.command, c.button.clone(), confirm_ms))
    })
    .flatten();
    if let Some((command, button, confirm_ms)) = found {
        clipboard::copy(command.to_string(), key, button, confirm_ms);
    }
}

fn scroll_to_section(index: usize) {
    let section = with_page(|page| {
        page.mounted
            .as_ref()
            .and_then(|m| m.sections.get(index))
            .map(|s| s.element.clone())
    })
    .flatten();
    if let Some(section) = section {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        opts.set_block(ScrollLogicalPosition::Start);
        section.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

fn refresh_scroll() {
    let (metrics, doc) = match (dom::scroll_metrics(), dom::document()) {
        (Some(m), Some(d)) => (m, d),
        _ => return,
    };
    with_page(|page| {
        if let Some(percent) = metrics.progress_percent() {
            dom::set_progress(&doc, &page.config.progress_selector, percent);
        }
        if let Some(button) = doc.get_element_by_id(&page.config.ids.scroll_top) {
            let past = scroll::past_threshold(metrics.offset, page.config.scroll_top_threshold);
            dom::set_class(&button, "visible", past);
        }
        if let Some(m) = &page.mounted {
            let tops = dom::section_tops(m, &page.visibility);
            let active = scroll::active_section(metrics.offset, &tops, page.config.activation_margin);
            page.state.set_active(active);
            dom::highlight(m, active);
        }
    });
}

fn set_drawer(open: bool) {
    with_page(|page| {
        page.state.drawer_open = open;
        let ids = &page.config.ids;
        if let Some(drawer) = dom::by_id(&ids.drawer) {
            dom::set_class(&drawer, "open", open);
        }
        if let Some(overlay) = dom::by_id(&ids.overlay) {
            dom::set_class(&overlay, ACTIVE_CLASS, open);
        }
    });
}

/// Show only the cards matching `query` and the sections that still have one.
#[wasm_bindgen]
pub fn filter_commands(query: &str) {
    with_page(|page| {
        page.state.query = query.to_string();
        let vis = search::filter(&page.view.sections, query);
        if let Some(m) = &page.mounted {
            dom::apply_visibility(m, &vis);
        }
        console::log_1(
            &format!(
                "git-archive: filter {:?} -> {}/{} commands",
                query,
                vis.visible_cards(),
                page.view.card_count()
            )
            .into(),
        );
        page.visibility = vis;
    });
    // Hidden sections no longer count for highlighting.
    refresh_scroll();
}

/// Flip between dark and light. Returns true when the light theme is on.
#[wasm_bindgen]
pub fn toggle_theme() -> bool {
    let doc = dom::document();
    with_page(|page| {
        let theme = page.state.toggle_theme();
        if let Some(doc) = &doc {
            if let Some(body) = doc.body() {
                dom::set_class(&body, LIGHT_THEME_CLASS, theme.is_light());
            }
            let icon = doc
                .get_element_by_id(&page.config.ids.theme_toggle)
                .and_then(|t| t.query_selector("i").ok().flatten());
            if let Some(icon) = icon {
                icon.set_class_name(theme.toggle_icon());
            }
        }
        theme.is_light()
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn scroll_to_top() {
    if let Some(win) = window() {
        let opts = ScrollToOptions::new();
        opts.set_top(0.0);
        opts.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&opts);
    }
}

#[wasm_bindgen]
pub fn open_drawer() {
    set_drawer(true);
}

#[wasm_bindgen]
pub fn close_drawer() {
    set_drawer(false);
}

/// The catalog as JSON, for host scripts.
#[wasm_bindgen]
pub fn catalog_json() -> String {
    serde_json::to_string(CATALOG).unwrap_or_else(|_| "[]".to_string())
}

#[wasm_bindgen]
pub fn command_count() -> usize {
    catalog::command_count(CATALOG)
}
