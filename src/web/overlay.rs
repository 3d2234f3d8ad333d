// DOM overlays: score / lives HUD and the game-over summary.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, window};

const SCORE_ID: &str = "cb-score";
const LIVES_ID: &str = "cb-lives";
const SUMMARY_ID: &str = "cb-summary";

fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Create the HUD elements unless the host page already provides them.
pub fn ensure_hud(doc: &Document) -> Result<(), JsValue> {
    let Some(body) = doc.body() else {
        return Err(JsValue::from_str("no body"));
    };
    if doc.get_element_by_id(SCORE_ID).is_none() {
        let div = doc.create_element("div")?;
        div.set_id(SCORE_ID);
        div.set_text_content(Some("Score: 0"));
        div.set_attribute("style", "position:fixed; top:10px; right:12px; font-family:sans-serif; font-size:16px; padding:4px 8px; background:rgba(0,0,0,0.42); border-radius:6px; color:#fff; z-index:45;").ok();
        body.append_child(&div)?;
    }
    if doc.get_element_by_id(LIVES_ID).is_none() {
        let div = doc.create_element("div")?;
        div.set_id(LIVES_ID);
        div.set_attribute("style", "position:fixed; top:42px; right:12px; font-family:sans-serif; font-size:16px; padding:4px 8px; background:rgba(0,0,0,0.42); border-radius:6px; color:#fff; z-index:44;").ok();
        body.append_child(&div)?;
    }
    Ok(())
}

pub fn set_score(score: u32) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(SCORE_ID)) {
        el.set_text_content(Some(&format!("Score: {score}")));
    }
}

/// HUD text for the lives counter. Hearts are only drawn on the canvas.
fn lives_label(lives: u32, max: u32) -> String {
    format!("Lives: {lives}/{max}")
}

pub fn set_lives(lives: u32, max: u32) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(LIVES_ID)) {
        el.set_text_content(Some(&lives_label(lives, max)));
    }
}

/// Game-over modal with the final score and restart / menu buttons.
pub fn show_summary(score: u32, menu_url: &str) -> Result<(), JsValue> {
    let doc = document().ok_or_else(|| JsValue::from_str("no document"))?;
    hide_summary();
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let modal = doc.create_element("div")?;
    modal.set_id(SUMMARY_ID);
    modal.set_class_name("modal");
    modal.set_attribute("style", "position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:60;").ok();

    let content = doc.create_element("div")?;
    content.set_class_name("modal-content");
    content.set_attribute("style", "background:#fff; padding:24px 32px; border-radius:10px; text-align:center; font-family:sans-serif;").ok();

    let title = doc.create_element("h1")?;
    title.set_text_content(Some("Game Over"));
    content.append_child(&title)?;

    let line = doc.create_element("p")?;
    line.set_text_content(Some(&format!("Your score: {score}")));
    content.append_child(&line)?;

    let restart = doc.create_element("button")?;
    restart.set_text_content(Some("Play again"));
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            crate::restart_game();
        }) as Box<dyn FnMut(_)>);
        restart.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    content.append_child(&restart)?;

    let menu = doc.create_element("button")?;
    menu.set_text_content(Some("Menu"));
    {
        let url = menu_url.to_string();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            if let Some(w) = window() {
                w.location().set_href(&url).ok();
            }
        }) as Box<dyn FnMut(_)>);
        menu.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    content.append_child(&menu)?;

    modal.append_child(&content)?;
    body.append_child(&modal)?;
    Ok(())
}

pub fn hide_summary() {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(SUMMARY_ID)) {
        el.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lives_label_is_plain_text() {
        assert_eq!(lives_label(4, 5), "Lives: 4/5");
        assert_eq!(lives_label(0, 3), "Lives: 0/3");
        assert!(!lives_label(5, 5).contains("hearts"));
    }
}
