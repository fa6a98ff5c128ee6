//! Pure Yew view components for the Game Center UI.
//!
//! These render from props only; state and timers stay in the game components.

use crate::config::*;
use game_center::utils::format_seconds;
use game_center::{ordinal, Candidate, Slice};
use rand::Rng;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LaneProps {
    pub name: String,
    pub color: String,
    pub progress: f64,
}

/// One horse's progress bar.
#[function_component(Lane)]
pub fn lane(props: &LaneProps) -> Html {
    let finished = props.progress >= 100.0;
    html! {
        <div class="lane">
            <div class="lane-row">
                <span class="lane-name">{ &props.name }</span>
                <div class="lane-track">
                    <div class="lane-bar"
                        style={format!("width: {}%; background-color: {};", props.progress, props.color)}
                    />
                </div>
            </div>
            if finished {
                <span class="lane-finished">{ format!("Finished! ({:.1}%)", props.progress) }</span>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RaceResultsProps {
    /// (place, name) in finishing order.
    pub standings: Vec<(usize, String)>,
    pub elapsed_ms: u64,
}

#[function_component(RaceResults)]
pub fn race_results(props: &RaceResultsProps) -> Html {
    html! {
        <div class="race-results">
            <h3>{ "Race Results:" }</h3>
            { props.standings.iter().map(|(place, name)| html! {
                <div key={format!("{}-{}", name, place)} class="race-place">
                    { format!("{} Place: {}", ordinal(*place), name) }
                </div>
            }).collect::<Html>() }
            <div class="race-time">{ format!("Race time: {}", format_seconds(props.elapsed_ms)) }</div>
        </div>
    }
}

/// SVG path of a wedge starting at the pointer and sweeping clockwise.
fn wedge_path(sweep: f64) -> String {
    let rad = sweep.to_radians();
    let x = WHEEL_CENTER + WHEEL_RADIUS * rad.sin();
    let y = WHEEL_CENTER - WHEEL_RADIUS * rad.cos();
    let large_arc = if sweep > 180.0 { 1 } else { 0 };
    format!(
        "M{c} {c} L{c} {top} A{r} {r} 0 {large_arc} 1 {x} {y} Z",
        c = WHEEL_CENTER,
        top = WHEEL_CENTER - WHEEL_RADIUS,
        r = WHEEL_RADIUS,
    )
}

fn render_slice(index: usize, slice: &Slice) -> Html {
    let fill = format!("hsl({}, 70%, 80%)", slice.hue);
    // A single entry covers the whole disc, which an arc cannot describe.
    let shape = if slice.sweep >= 360.0 {
        html! { <circle cx={WHEEL_CENTER.to_string()} cy={WHEEL_CENTER.to_string()} r={WHEEL_RADIUS.to_string()} fill={fill} /> }
    } else {
        html! {
            <path d={wedge_path(slice.sweep)}
                fill={fill}
                transform={format!("rotate({} {c} {c})", slice.start, c = WHEEL_CENTER)}
            />
        }
    };
    html! {
        <g key={index}>
            { shape }
            <text x={WHEEL_CENTER.to_string()} y={WHEEL_LABEL_Y.to_string()}
                text-anchor="middle"
                class="wheel-label"
                transform={format!("rotate({} {c} {c})", slice.label_angle(), c = WHEEL_CENTER)}
            >
                { &slice.label }
            </text>
        </g>
    }
}

#[derive(Properties, PartialEq)]
pub struct WheelFaceProps {
    pub slices: Vec<Slice>,
    pub rotation: f64,
    pub settle_ms: u32,
}

#[function_component(WheelFace)]
pub fn wheel_face(props: &WheelFaceProps) -> Html {
    html! {
        <div class="wheel">
            <svg viewBox="0 0 100 100">
                <g transform={format!("rotate({} {c} {c})", props.rotation, c = WHEEL_CENTER)}
                    style={format!("transition: transform {}ms {};", props.settle_ms, WHEEL_EASING)}
                >
                    { props.slices.iter().enumerate().map(|(i, s)| render_slice(i, s)).collect::<Html>() }
                </g>
                <circle cx="50" cy="50" r="5" fill="gray" />
                <path d="M50 50 L50 10" stroke="black" stroke-width="2" />
            </svg>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TimerPanelProps {
    pub configured_minutes: u32,
    pub display: String,
    pub running: bool,
    pub on_minutes: Callback<String>,
    pub on_toggle: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(TimerPanel)]
pub fn timer_panel(props: &TimerPanelProps) -> Html {
    let oninput = {
        let on_minutes = props.on_minutes.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_minutes.emit(input.value());
        })
    };
    let on_toggle = props.on_toggle.reform(|_: MouseEvent| ());
    let on_reset = props.on_reset.reform(|_: MouseEvent| ());

    html! {
        <div class="timer">
            <div class="timer-minutes">
                <input type="number" min="0"
                    value={props.configured_minutes.to_string()}
                    {oninput}
                />
                <span>{ "min" }</span>
            </div>
            <div class="timer-display">{ &props.display }</div>
            <button class={classes!("btn", if props.running { "btn-stop" } else { "btn-go" })}
                onclick={on_toggle}
            >
                { if props.running { "Pause" } else { "Play" } }
            </button>
            <button class="btn btn-reset" onclick={on_reset}>{ "Reset" }</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RosterProps {
    pub candidates: Vec<Candidate>,
    pub on_toggle: Callback<usize>,
    pub on_remove: Callback<usize>,
    pub on_add: Callback<String>,
}

/// Participant list with presence checkboxes, removal and an add field.
#[function_component(Roster)]
pub fn roster(props: &RosterProps) -> Html {
    let new_name = use_state(String::new);

    let oninput = {
        let new_name = new_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_name.set(input.value());
        })
    };
    let add = {
        let new_name = new_name.clone();
        let on_add = props.on_add.clone();
        Callback::from(move |_: MouseEvent| {
            if !new_name.trim().is_empty() {
                on_add.emit((*new_name).clone());
                new_name.set(String::new());
            }
        })
    };

    html! {
        <div class="roster">
            <h2>{ "Participants" }</h2>
            { props.candidates.iter().enumerate().map(|(index, c)| {
                let on_toggle = props.on_toggle.reform(move |_: Event| index);
                let on_remove = props.on_remove.reform(move |_: MouseEvent| index);
                html! {
                    <div key={format!("{:?}", c.id)} class="roster-row">
                        <input type="checkbox" checked={c.present} onchange={on_toggle} />
                        <span class={classes!(c.selected.then_some("picked"))}>{ &c.name }</span>
                        <button class="btn-remove" onclick={on_remove}>{ "Remove" }</button>
                    </div>
                }
            }).collect::<Html>() }
            <div class="roster-add">
                <input type="text" placeholder="New participant" value={(*new_name).clone()} {oninput} />
                <button class="btn btn-add" onclick={add}>{ "Add" }</button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfettiProps {
    pub active: bool,
}

struct Piece {
    left_pct: f64,
    hue: f64,
    angle: f64,
    delay_s: f64,
    fall_s: f64,
}

/// Falling confetti shown while a pick is being celebrated.
#[function_component(Confetti)]
pub fn confetti(props: &ConfettiProps) -> Html {
    // Regenerated only when the cue switches on, so pieces don't jump on re-render.
    let pieces = use_memo(props.active, |_| {
        let mut rng = rand::rng();
        (0..CONFETTI_PIECES)
            .map(|_| Piece {
                left_pct: rng.random_range(0.0..100.0),
                hue: rng.random_range(0.0..360.0),
                angle: rng.random_range(0.0..360.0),
                delay_s: rng.random_range(0.0..CONFETTI_MAX_DELAY_S),
                fall_s: CONFETTI_MIN_FALL_S + rng.random_range(0.0..1.0),
            })
            .collect::<Vec<_>>()
    });

    if !props.active {
        return html! {};
    }
    html! {
        <div class="confetti">
            { pieces.iter().map(|p| html! {
                <div class="confetti-piece"
                    style={format!(
                        "left: {}%; background-color: hsl({}, 70%, 50%); transform: rotate({}deg); animation-delay: {}s; animation-duration: {}s;",
                        p.left_pct, p.hue, p.angle, p.delay_s, p.fall_s
                    )}
                />
            }).collect::<Html>() }
        </div>
    }
}
