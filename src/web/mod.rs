//! Browser wiring: canvas, pointer listeners, the spawn `setTimeout` and the
//! overlays. All game rules live in [`crate::game`]; this module only turns
//! DOM events into core calls and carries out the returned [`Effect`]s.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent, window};

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::game::{Effect, Game, InputEvent, Point, SpawnTicket};
use crate::log::log_line;
use crate::render::render;
use crate::rng::SimpleRng;

mod canvas;
mod overlay;

use canvas::CanvasSurface;

const CANVAS_ID: &str = "gameCanvas";

/// Everything the browser side keeps alive between events.
struct Session {
    game: Game<SimpleRng>,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
    /// Handle of the single pending spawn timeout, if any.
    timer_handle: Option<i32>,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    static SPAWN_TICK: RefCell<Option<Closure<dyn FnMut(JsValue)>>> = const { RefCell::new(None) };
}

fn with_session(f: impl FnOnce(&mut Session)) {
    SESSION.with(|cell| {
        if let Some(session) = cell.borrow_mut().as_mut() {
            f(session);
        }
    });
}

/// Feed core effects through to the page.
fn apply_effects(session: &mut Session, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Redraw => {
                render(session.game.state(), session.game.config(), &mut session.surface);
            }
            Effect::ScoreChanged(score) => overlay::set_score(score),
            Effect::LivesChanged(lives) => {
                overlay::set_lives(lives, session.game.config().starting_lives)
            }
            Effect::ScheduleSpawn(ticket) => {
                clear_timer(session);
                match set_timer(ticket) {
                    Ok(handle) => session.timer_handle = Some(handle),
                    Err(err) => log_line(&format!("connectbook: cannot schedule spawn: {err}")),
                }
            }
            Effect::CancelSpawn => clear_timer(session),
            Effect::Connected(_) => {}
            Effect::GameOver { score, .. } => {
                if let Err(err) = overlay::show_summary(score, &session.game.config().menu_url) {
                    log_line(&format!("connectbook: cannot show summary: {err:?}"));
                }
            }
            Effect::DismissSummary => overlay::hide_summary(),
        }
    }
}

fn clear_timer(session: &mut Session) {
    if let Some(handle) = session.timer_handle.take() {
        if let Some(w) = window() {
            w.clear_timeout_with_handle(handle);
        }
    }
}

fn set_timer(ticket: SpawnTicket) -> Result<i32> {
    let win = window().ok_or_else(|| GameError::Dom("no window".into()))?;
    SPAWN_TICK.with(|cell| -> Result<i32> {
        let tick = cell.borrow();
        let callback = tick
            .as_ref()
            .ok_or_else(|| GameError::Dom("spawn callback not installed".into()))?;
        let handle = win.set_timeout_with_callback_and_timeout_and_arguments_1(
            callback.as_ref().unchecked_ref(),
            timeout_ms(ticket.delay_ms),
            &JsValue::from_f64(ticket.generation as f64),
        )?;
        Ok(handle)
    })
}

// setTimeout takes an i32; longer intervals saturate instead of wrapping negative.
fn timeout_ms(delay_ms: u32) -> i32 {
    i32::try_from(delay_ms).unwrap_or(i32::MAX)
}

fn install_spawn_tick() {
    SPAWN_TICK.with(|cell| {
        if cell.borrow().is_some() {
            return;
        }
        let closure = Closure::wrap(Box::new(move |generation: JsValue| {
            // generation 0 is never issued, so a garbled argument is simply stale
            let generation = generation.as_f64().map(|g| g as u64).unwrap_or(0);
            with_session(|session| {
                session.timer_handle = None;
                let fx = session.game.on_spawn_timer(generation);
                apply_effects(session, fx);
            });
        }) as Box<dyn FnMut(JsValue)>);
        cell.replace(Some(closure));
    });
}

fn pointer_pos(canvas: &HtmlCanvasElement, evt: &MouseEvent) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(
        evt.client_x() as f64 - rect.left(),
        evt.client_y() as f64 - rect.top(),
    )
}

fn listen_pointer(
    canvas: &HtmlCanvasElement,
    event: &str,
    to_input: fn(Point) -> InputEvent,
) -> Result<()> {
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
        let input = to_input(pointer_pos(&target, &evt));
        with_session(|session| {
            let fx = session.game.handle(input);
            apply_effects(session, fx);
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn create_canvas(config: &GameConfig) -> Result<HtmlCanvasElement> {
    let win = window().ok_or_else(|| GameError::Dom("no window".into()))?;
    let doc = win
        .document()
        .ok_or_else(|| GameError::Dom("no document".into()))?;

    // Reuse the host page's canvas when present.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()
            .map_err(|_| GameError::Dom(format!("#{CANVAS_ID} is not a canvas")))?
    } else {
        let c: HtmlCanvasElement = doc
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| GameError::Dom("created element is not a canvas".into()))?;
        c.set_id(CANVAS_ID);
        c.set_attribute("style", "display:block; margin:40px auto; border:2px solid #222; border-radius:8px; background:#f0f2f5;").ok();
        let body = doc.body().ok_or_else(|| GameError::Dom("no body".into()))?;
        body.append_child(&c)?;
        c
    };
    canvas.set_width(config.width as u32);
    canvas.set_height(config.height as u32);
    overlay::ensure_hud(&doc)?;
    Ok(canvas)
}

fn load_token_image(url: &str) -> Result<HtmlImageElement> {
    let image = HtmlImageElement::new()?;
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        with_session(|session| apply_effects(session, vec![Effect::Redraw]));
    }) as Box<dyn FnMut(_)>);
    image.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref())?;
    closure.forget();
    image.set_src(url);
    Ok(image)
}

/// Build the canvas, hook up input and start the spawn timer.
///
/// Calling it again while a session exists keeps the canvas and listeners but
/// starts a fresh game under the new `config`: the pending spawn timer is
/// cleared, the canvas is resized to the new dimensions and the token image is
/// reloaded if its URL changed.
pub fn start_connect_mode(config: GameConfig) -> Result<()> {
    config.validate()?;

    let already_running = SESSION.with(|cell| cell.borrow().is_some());
    if already_running {
        with_session(|session| {
            session.canvas.set_width(config.width as u32);
            session.canvas.set_height(config.height as u32);
            if session.game.config().token_image_url != config.token_image_url {
                session.surface.set_image_src(&config.token_image_url);
            }
            let fx = session.game.reconfigure(config);
            apply_effects(session, fx);
        });
        return Ok(());
    }

    let canvas = create_canvas(&config)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| GameError::Dom("2d context unavailable".into()))?
        .dyn_into()
        .map_err(|_| GameError::Dom("2d context has unexpected type".into()))?;
    let image = load_token_image(&config.token_image_url)?;

    install_spawn_tick();
    let game = Game::new(config, SimpleRng::from_entropy());
    SESSION.with(|cell| {
        cell.replace(Some(Session {
            game,
            surface: CanvasSurface::new(ctx, image),
            canvas: canvas.clone(),
            timer_handle: None,
        }))
    });

    listen_pointer(&canvas, "mousedown", InputEvent::Press)?;
    listen_pointer(&canvas, "mousemove", InputEvent::Move)?;
    listen_pointer(&canvas, "mouseup", InputEvent::Release)?;

    with_session(|session| {
        let fx = session.game.start();
        apply_effects(session, fx);
    });
    Ok(())
}

pub fn restart_session() {
    with_session(|session| {
        let fx = session.game.restart();
        apply_effects(session, fx);
    });
}

#[cfg(feature = "serde_json")]
pub fn snapshot_json() -> Option<String> {
    SESSION.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|s| serde_json::to_string(s.game.state()).ok())
    })
}
