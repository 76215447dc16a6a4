//! Copy-to-clipboard with a transient confirmation glyph on the button.
//!
//! The async Clipboard API is preferred. Pages served without a secure
//! context don't expose `navigator.clipboard`, so those fall back to
//! `document.execCommand("copy")` on a throwaway textarea.

use std::cell::RefCell;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Element, HtmlDocument, HtmlTextAreaElement};

pub const CONFIRM_HTML: &str =
    r#"<i class="fa-solid fa-check" style="color: var(--accent-success)"></i>"#;

/// A restore scheduled for one copy button.
#[derive(Clone, Debug, PartialEq)]
struct Pending {
    timer: i32,
    original: String,
}

/// Tracks the restore timer of every button currently showing confirmation.
#[derive(Debug, Default)]
pub struct Confirmations {
    pending: HashMap<String, Pending>,
}

impl Confirmations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content to restore for `key`. While a confirmation is showing, the
    /// button holds the check glyph, so the first captured content wins.
    pub fn original_for(&self, key: &str, current: &str) -> String {
        self.pending
            .get(key)
            .map(|p| p.original.clone())
            .unwrap_or_else(|| current.to_string())
    }

    /// Record a new restore timer. Returns the timer it replaces, which the
    /// caller must cancel.
    pub fn schedule(&mut self, key: &str, timer: i32, original: String) -> Option<i32> {
        self.pending
            .insert(key.to_string(), Pending { timer, original })
            .map(|p| p.timer)
    }

    /// Called when `timer` fires. Returns the content to restore, or `None`
    /// if the timer was superseded.
    pub fn complete(&mut self, key: &str, timer: i32) -> Option<String> {
        match self.pending.get(key) {
            Some(p) if p.timer == timer => self.pending.remove(key).map(|p| p.original),
            _ => None,
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending.contains_key(key)
    }
}

thread_local! {
    static CONFIRMATIONS: RefCell<Confirmations> = RefCell::new(Confirmations::new());
}

fn clipboard_api() -> Option<JsValue> {
    let navigator = window()?.navigator();
    let api = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).ok()?;
    if api.is_undefined() || api.is_null() {
        None
    } else {
        Some(api)
    }
}

async fn write_text(api: &JsValue, text: &str) -> Result<(), JsValue> {
    let write: js_sys::Function =
        js_sys::Reflect::get(api, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: js_sys::Promise = write.call1(api, &JsValue::from_str(text))?.dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

fn legacy_copy(text: &str) -> Result<(), JsValue> {
    let doc = window()
        .and_then(|w| w.document())
        .ok_or("document not available")?;
    let body = doc.body().ok_or("body not available")?;
    let area: HtmlTextAreaElement = doc.create_element("textarea")?.dyn_into()?;
    area.set_value(text);
    body.append_child(&area)?;
    area.select();
    let copied = doc.dyn_ref::<HtmlDocument>().map(|d| d.exec_command("copy"));
    area.remove();
    match copied {
        Some(Ok(_)) => Ok(()),
        Some(Err(e)) => Err(e),
        None => Err("execCommand unavailable".into()),
    }
}

fn show_confirmation(key: &str, button: &Element, delay_ms: i32) {
    let win = match window() {
        Some(w) => w,
        None => return,
    };
    let original = CONFIRMATIONS.with(|c| c.borrow().original_for(key, &button.inner_html()));
    button.set_inner_html(CONFIRM_HTML);

    // The timer id is only known after scheduling, so the closure reads it back.
    let timer_cell = std::rc::Rc::new(std::cell::Cell::new(-1));
    let restore = {
        let key = key.to_string();
        let button = button.clone();
        let timer_cell = timer_cell.clone();
        Closure::wrap(Box::new(move || {
            let restored =
                CONFIRMATIONS.with(|c| c.borrow_mut().complete(&key, timer_cell.get()));
            if let Some(html) = restored {
                button.set_inner_html(&html);
            }
        }) as Box<dyn FnMut()>)
    };
    let timer = match win.set_timeout_with_callback_and_timeout_and_arguments_0(
        restore.as_ref().unchecked_ref(),
        delay_ms,
    ) {
        Ok(id) => id,
        Err(_) => {
            button.set_inner_html(&original);
            return;
        }
    };
    timer_cell.set(timer);
    restore.forget();

    let replaced = CONFIRMATIONS.with(|c| c.borrow_mut().schedule(key, timer, original));
    if let Some(old) = replaced {
        win.clear_timeout_with_handle(old);
    }
}

/// Copy `text` and flash the confirmation glyph on `button`.
pub fn copy(text: String, key: String, button: Element, delay_ms: i32) {
    match clipboard_api() {
        Some(api) => wasm_bindgen_futures::spawn_local(async move {
            match write_text(&api, &text).await {
                Ok(()) => show_confirmation(&key, &button, delay_ms),
                Err(e) => {
                    web_sys::console::warn_2(&JsValue::from_str("clipboard write failed:"), &e)
                }
            }
        }),
        None => match legacy_copy(&text) {
            Ok(()) => show_confirmation(&key, &button, delay_ms),
            Err(e) => web_sys::console::warn_2(&JsValue::from_str("legacy copy failed:"), &e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COPY_ICON: &str = r#"<i class="fa-regular fa-copy"></i>"#;

    #[test]
    fn test_restore_after_delay() {
        let mut c = Confirmations::new();
        let original = c.original_for("0-1", COPY_ICON);
        assert_eq!(c.schedule("0-1", 7, original), None);
        assert!(c.is_pending("0-1"));
        assert_eq!(c.complete("0-1", 7).as_deref(), Some(COPY_ICON));
        assert!(!c.is_pending("0-1"));
    }

    #[test]
    fn test_other_buttons_untouched() {
        let mut c = Confirmations::new();
        c.schedule("0-1", 7, COPY_ICON.to_string());
        assert!(!c.is_pending("0-2"));
        assert_eq!(c.complete("0-2", 7), None);
        assert!(c.is_pending("0-1"));
    }

    #[test]
    fn test_second_copy_cancels_first_timer() {
        let mut c = Confirmations::new();
        c.schedule("2-0", 1, COPY_ICON.to_string());
        // Button now shows the check glyph; it must not become the original.
        let original = c.original_for("2-0", CONFIRM_HTML);
        assert_eq!(original, COPY_ICON);
        assert_eq!(c.schedule("2-0", 2, original), Some(1));
        assert_eq!(c.complete("2-0", 1), None);
        assert_eq!(c.complete("2-0", 2).as_deref(), Some(COPY_ICON));
    }

    #[test]
    fn test_complete_twice() {
        let mut c = Confirmations::new();
        c.schedule("1-1", 4, COPY_ICON.to_string());
        assert!(c.complete("1-1", 4).is_some());
        assert_eq!(c.complete("1-1", 4), None);
    }
}
